//! # Grid State Store
//!
//! Sparse map from coordinates to cell contents. Cells are discovered the
//! first time they are looked at and keep their value from then on.

use crate::game::{Coordinate, TokenValue};
use crate::generation::DeterministicSpawner;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One discovered grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub coordinate: Coordinate,
    /// Token held by the cell, `None` when empty
    pub value: Option<TokenValue>,
}

impl Cell {
    pub fn new(coordinate: Coordinate, value: Option<TokenValue>) -> Self {
        Self { coordinate, value }
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_none()
    }
}

/// Single source of truth for discovered cells and what they hold.
///
/// # Examples
///
/// ```
/// use gridmerge::{Coordinate, DeterministicSpawner, GridStateStore};
///
/// let mut store = GridStateStore::new(DeterministicSpawner::default());
/// let c = Coordinate::new(4, 2);
/// let first = store.get(c);
/// assert_eq!(store.get(c), first);
/// assert!(store.is_discovered(c));
/// ```
#[derive(Debug, Clone)]
pub struct GridStateStore {
    cells: HashMap<Coordinate, Option<TokenValue>>,
    spawner: DeterministicSpawner,
}

impl GridStateStore {
    /// Creates an empty store that discovers cells with the given spawner.
    pub fn new(spawner: DeterministicSpawner) -> Self {
        Self {
            cells: HashMap::new(),
            spawner,
        }
    }

    /// Returns the cell at `coordinate`, discovering it first if needed.
    pub fn get(&mut self, coordinate: Coordinate) -> Cell {
        let spawner = &self.spawner;
        let value = *self.cells.entry(coordinate).or_insert_with(|| {
            let value = spawner.spawn(coordinate);
            debug!("Discovered cell {} holding {:?}", coordinate, value);
            value
        });
        Cell::new(coordinate, value)
    }

    /// Returns the cell only if it has already been discovered.
    pub fn peek(&self, coordinate: Coordinate) -> Option<Cell> {
        self.cells
            .get(&coordinate)
            .map(|value| Cell::new(coordinate, *value))
    }

    /// Overwrites a cell's value, discovering the cell first if needed.
    pub fn set(&mut self, coordinate: Coordinate, value: Option<TokenValue>) {
        self.get(coordinate);
        self.cells.insert(coordinate, value);
    }

    /// Checks whether a coordinate has been discovered.
    pub fn is_discovered(&self, coordinate: Coordinate) -> bool {
        self.cells.contains_key(&coordinate)
    }

    /// Number of discovered cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Discovers and returns every cell whose offset from `center` lies in
    /// `[-radius, radius)` on both axes, ordered by coordinate. Offsets that
    /// fall off the grid are skipped.
    pub fn window(&mut self, center: Coordinate, radius: i32) -> Vec<Cell> {
        let mut cells = Vec::new();
        for di in -radius..radius {
            for dj in -radius..radius {
                if let Some(coordinate) = center.checked_add(Coordinate::new(di, dj)) {
                    cells.push(self.get(coordinate));
                }
            }
        }
        cells
    }

    /// Returns every discovered cell, ordered by coordinate.
    pub fn snapshot(&self) -> Vec<Cell> {
        let mut cells: Vec<Cell> = self
            .cells
            .iter()
            .map(|(coordinate, value)| Cell::new(*coordinate, *value))
            .collect();
        cells.sort_by_key(|cell| cell.coordinate);
        cells
    }

    /// Replaces all contents with the given cells.
    pub fn restore(&mut self, cells: impl IntoIterator<Item = Cell>) {
        self.cells.clear();
        self.cells
            .extend(cells.into_iter().map(|cell| (cell.coordinate, cell.value)));
        debug!("Restored {} cells", self.cells.len());
    }

    /// Forgets every discovered cell.
    pub fn clear(&mut self) {
        self.cells.clear();
    }

    pub fn spawner(&self) -> &DeterministicSpawner {
        &self.spawner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spawner() -> DeterministicSpawner {
        // Only (1, 0) spawns, and it spawns a 2
        DeterministicSpawner::new(
            |seed: &str| match seed {
                "1,0" => 0.0,
                "1,0:initialValue" => 0.0,
                _ => 0.9,
            },
            0.2,
            0.8,
        )
    }

    #[test]
    fn test_get_discovers_once() {
        let mut store = GridStateStore::new(spawner());
        let c = Coordinate::new(1, 0);
        assert!(!store.is_discovered(c));
        assert_eq!(store.peek(c), None);

        assert_eq!(store.get(c).value, Some(2));
        assert!(store.is_discovered(c));
        assert_eq!(store.len(), 1);

        store.get(c);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_set_overrides_spawned_value() {
        let mut store = GridStateStore::new(spawner());
        let c = Coordinate::new(1, 0);
        store.get(c);
        store.set(c, None);
        assert!(store.get(c).is_empty());

        store.set(c, Some(8));
        assert_eq!(store.get(c).value, Some(8));
    }

    #[test]
    fn test_set_discovers_undiscovered_cell() {
        let mut store = GridStateStore::new(spawner());
        let c = Coordinate::new(-4, 9);
        store.set(c, Some(16));
        assert!(store.is_discovered(c));
        assert_eq!(store.peek(c), Some(Cell::new(c, Some(16))));
    }

    #[test]
    fn test_snapshot_is_sorted_and_complete() {
        let mut store = GridStateStore::new(spawner());
        store.get(Coordinate::new(3, 3));
        store.get(Coordinate::new(-1, 2));
        store.set(Coordinate::new(1, 0), None);

        let snapshot = store.snapshot();
        assert_eq!(snapshot.len(), 3);
        assert_eq!(snapshot[0].coordinate, Coordinate::new(-1, 2));
        assert_eq!(snapshot[1], Cell::new(Coordinate::new(1, 0), None));
        assert_eq!(snapshot[2].coordinate, Coordinate::new(3, 3));
    }

    #[test]
    fn test_restore_replaces_contents() {
        let mut store = GridStateStore::new(spawner());
        store.get(Coordinate::new(5, 5));

        store.restore(vec![
            Cell::new(Coordinate::new(1, 0), None),
            Cell::new(Coordinate::new(0, 0), Some(4)),
        ]);

        assert!(!store.is_discovered(Coordinate::new(5, 5)));
        assert_eq!(store.get(Coordinate::new(1, 0)).value, None);
        assert_eq!(store.get(Coordinate::new(0, 0)).value, Some(4));
    }

    #[test]
    fn test_window_covers_half_open_range() {
        let mut store = GridStateStore::new(spawner());
        let cells = store.window(Coordinate::origin(), 2);
        assert_eq!(cells.len(), 16);
        assert!(cells.iter().any(|c| c.coordinate == Coordinate::new(-2, -2)));
        assert!(cells.iter().any(|c| c.coordinate == Coordinate::new(1, 1)));
        assert!(!cells.iter().any(|c| c.coordinate == Coordinate::new(2, 0)));
        assert_eq!(store.len(), 16);
    }

    #[test]
    fn test_window_at_grid_edge_skips_missing_cells() {
        let mut store = GridStateStore::new(spawner());
        let cells = store.window(Coordinate::new(i32::MAX, i32::MAX), 2);
        // offset +1 falls off the grid on both axes
        assert_eq!(cells.len(), 9);
        assert!(cells
            .iter()
            .any(|c| c.coordinate == Coordinate::new(i32::MAX, i32::MAX)));
        assert!(cells
            .iter()
            .any(|c| c.coordinate == Coordinate::new(i32::MAX - 2, i32::MAX - 2)));
    }
}
