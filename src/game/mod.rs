//! # Game Module
//!
//! Grid state, inventory, and the interaction rules of the merging game.
//!
//! This module contains the fundamental building blocks of Gridmerge:
//! - Coordinates and directions on the infinite grid
//! - The lazily discovered grid store and the player's inventory slot
//! - The game session and its statistics
//! - The interaction engine and the driver that wires it to persistence

pub mod driver;
pub mod engine;
pub mod events;
pub mod grid;
pub mod inventory;
pub mod state;

pub use driver::*;
pub use engine::*;
pub use events::*;
pub use grid::*;
pub use inventory::*;
pub use state::*;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Value carried by a token. Tokens belong to the power-of-two family.
pub type TokenValue = u64;

/// Identifies one cell of the grid.
///
/// `i` grows northward (latitude) and `j` grows eastward (longitude); cell
/// (0, 0) has its south-west corner at the configured origin.
///
/// # Examples
///
/// ```
/// use gridmerge::Coordinate;
///
/// let here = Coordinate::new(0, 0);
/// let there = Coordinate::new(2, -1);
/// assert_eq!(here.chebyshev_distance(there), 2);
/// assert_eq!(here.neighbors().len(), 8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coordinate {
    pub i: i32,
    pub j: i32,
}

impl Coordinate {
    /// Creates a new coordinate.
    pub fn new(i: i32, j: i32) -> Self {
        Self { i, j }
    }

    /// Returns the origin cell (0, 0).
    pub fn origin() -> Self {
        Self::new(0, 0)
    }

    /// King-move distance: the larger of the two axis offsets.
    pub fn chebyshev_distance(self, other: Coordinate) -> u32 {
        let di = (i64::from(self.i) - i64::from(other.i)).unsigned_abs();
        let dj = (i64::from(self.j) - i64::from(other.j)).unsigned_abs();
        di.max(dj).min(u64::from(u32::MAX)) as u32
    }

    /// Canonical string form used as the luck seed for this cell.
    ///
    /// ```
    /// use gridmerge::Coordinate;
    ///
    /// assert_eq!(Coordinate::new(-3, 7).seed_key(), "-3,7");
    /// ```
    pub fn seed_key(self) -> String {
        format!("{},{}", self.i, self.j)
    }

    /// Offsets by `delta`, or `None` if the result leaves the grid.
    pub fn checked_add(self, delta: Coordinate) -> Option<Coordinate> {
        Some(Self::new(
            self.i.checked_add(delta.i)?,
            self.j.checked_add(delta.j)?,
        ))
    }

    /// Returns the surrounding coordinates (including diagonals), all 8 of
    /// them away from the grid edge.
    pub fn neighbors(self) -> Vec<Coordinate> {
        Direction::all()
            .into_iter()
            .filter_map(|direction| self.checked_add(direction.to_delta()))
            .collect()
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.i, self.j)
    }
}

/// Saturates at the edge of the grid.
impl std::ops::Add for Coordinate {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.i.saturating_add(other.i), self.j.saturating_add(other.j))
    }
}

/// Saturates at the edge of the grid.
impl std::ops::Sub for Coordinate {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.i.saturating_sub(other.i), self.j.saturating_sub(other.j))
    }
}

/// Directions for stepping the player one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
    Northeast,
    Northwest,
    Southeast,
    Southwest,
}

impl Direction {
    /// Converts a direction to a coordinate delta.
    ///
    /// # Examples
    ///
    /// ```
    /// use gridmerge::{Coordinate, Direction};
    ///
    /// assert_eq!(Direction::North.to_delta(), Coordinate::new(1, 0));
    /// assert_eq!(Direction::Southwest.to_delta(), Coordinate::new(-1, -1));
    /// ```
    pub fn to_delta(self) -> Coordinate {
        match self {
            Direction::North => Coordinate::new(1, 0),
            Direction::South => Coordinate::new(-1, 0),
            Direction::East => Coordinate::new(0, 1),
            Direction::West => Coordinate::new(0, -1),
            Direction::Northeast => Coordinate::new(1, 1),
            Direction::Northwest => Coordinate::new(1, -1),
            Direction::Southeast => Coordinate::new(-1, 1),
            Direction::Southwest => Coordinate::new(-1, -1),
        }
    }

    /// Converts a coordinate delta to a direction.
    ///
    /// Returns None if the delta isn't a single king move.
    pub fn from_delta(delta: Coordinate) -> Option<Direction> {
        Direction::all()
            .into_iter()
            .find(|direction| direction.to_delta() == delta)
    }

    /// Parses a compass abbreviation or name such as `n`, `se`, or `west`.
    pub fn parse(text: &str) -> Option<Direction> {
        match text.to_ascii_lowercase().as_str() {
            "n" | "north" => Some(Direction::North),
            "s" | "south" => Some(Direction::South),
            "e" | "east" => Some(Direction::East),
            "w" | "west" => Some(Direction::West),
            "ne" | "northeast" => Some(Direction::Northeast),
            "nw" | "northwest" => Some(Direction::Northwest),
            "se" | "southeast" => Some(Direction::Southeast),
            "sw" | "southwest" => Some(Direction::Southwest),
            _ => None,
        }
    }

    /// Returns all 8 directions.
    pub fn all() -> Vec<Direction> {
        vec![
            Direction::North,
            Direction::South,
            Direction::East,
            Direction::West,
            Direction::Northeast,
            Direction::Northwest,
            Direction::Southeast,
            Direction::Southwest,
        ]
    }
}
