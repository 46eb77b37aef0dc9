//! # Game Session Module
//!
//! The session owns everything a single player's game consists of: the grid
//! store, the inventory slot, the player position, and progress statistics.
//! It is created once and handed by reference to the interaction engine and
//! the persistence gateway.

use crate::game::{Coordinate, GridStateStore, InventorySlot, Outcome, TokenValue};
use crate::generation::DeterministicSpawner;
use serde::{Deserialize, Serialize};

/// Complete state of one game.
#[derive(Debug, Clone)]
pub struct GameSession {
    /// Discovered cells and their contents
    pub grid: GridStateStore,
    /// Token carried by the player
    pub inventory: InventorySlot,
    /// Cell the player stands in
    pub player_position: Coordinate,
    /// Progress counters
    pub statistics: GameStatistics,
}

/// Counters tracking the player's progress.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameStatistics {
    /// Tokens picked up from cells
    pub tokens_picked_up: u32,
    /// Tokens placed into empty cells
    pub tokens_placed: u32,
    /// Successful merges
    pub merges: u32,
    /// Cells moved
    pub moves: u32,
    /// Activations that were refused
    pub rejected_actions: u32,
    /// Largest token ever created by a merge
    pub highest_token: TokenValue,
}

impl GameStatistics {
    /// Creates new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates statistics based on the outcome of an activation or move.
    pub fn record(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::PickedUp { .. } => {
                self.tokens_picked_up += 1;
            }
            Outcome::Placed { .. } => {
                self.tokens_placed += 1;
            }
            Outcome::Combined { value, .. } => {
                self.merges += 1;
                self.highest_token = self.highest_token.max(*value);
            }
            Outcome::Moved { .. } => {
                self.moves += 1;
            }
            Outcome::Rejected(_) => {
                self.rejected_actions += 1;
            }
        }
    }
}

impl GameSession {
    /// Creates a fresh session with the player at the origin.
    ///
    /// # Examples
    ///
    /// ```
    /// use gridmerge::{Coordinate, DeterministicSpawner, GameSession};
    ///
    /// let session = GameSession::new(DeterministicSpawner::default());
    /// assert_eq!(session.player_position, Coordinate::origin());
    /// assert!(session.inventory.is_empty());
    /// assert!(session.grid.is_empty());
    /// ```
    pub fn new(spawner: DeterministicSpawner) -> Self {
        Self {
            grid: GridStateStore::new(spawner),
            inventory: InventorySlot::new(),
            player_position: Coordinate::origin(),
            statistics: GameStatistics::new(),
        }
    }

    /// Creates a fresh session with the player at `position`.
    pub fn with_position(spawner: DeterministicSpawner, position: Coordinate) -> Self {
        Self {
            player_position: position,
            ..Self::new(spawner)
        }
    }

    /// Wipes all progress, keeping the spawner.
    pub fn reset(&mut self) {
        self.grid.clear();
        self.inventory = InventorySlot::new();
        self.player_position = Coordinate::origin();
        self.statistics = GameStatistics::new();
    }

    /// Returns the distance from the player to `target`.
    pub fn distance_to(&self, target: Coordinate) -> u32 {
        self.player_position.chebyshev_distance(target)
    }
}
