//! # Game Configuration
//!
//! Tunable gameplay parameters and their defaults.

use crate::{GeoPoint, GridError, GridResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Probability that an undiscovered cell holds a token.
pub const DEFAULT_SPAWN_PROBABILITY: f64 = 0.2;

/// Probability that a spawned token is a 2 rather than a 4.
pub const DEFAULT_TWO_PROBABILITY: f64 = 0.8;

/// Token value at which a merge announces victory.
pub const DEFAULT_VICTORY_THRESHOLD: u64 = 16;

/// King-move distance within which cells can be activated.
pub const DEFAULT_PROXIMITY_RADIUS: u32 = 1;

/// Half-width of the cell window shown around the player.
pub const DEFAULT_NEIGHBORHOOD_SIZE: i32 = 8;

/// Size of one grid cell in degrees of latitude and longitude.
pub const DEFAULT_CELL_DEGREES: f64 = 1e-4;

/// Latitude of the grid origin (the classroom).
pub const DEFAULT_ORIGIN_LAT: f64 = 36.997936938057016;

/// Longitude of the grid origin (the classroom).
pub const DEFAULT_ORIGIN_LNG: f64 = -122.05703507501151;

/// Source of player movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementMode {
    /// Clicking an empty nearby cell (or stepping) moves the player
    #[default]
    ManualClick,
    /// A geographic position feed moves the player; manual moves are refused
    ExternalFeed,
}

/// Complete set of recognized gameplay options.
///
/// Every field has a default, so a JSON config file only needs the values it
/// wants to override.
///
/// # Examples
///
/// ```
/// use gridmerge::{GameConfig, MovementMode};
///
/// let config = GameConfig::default();
/// assert_eq!(config.victory_threshold, 16);
/// assert_eq!(config.movement_mode, MovementMode::ManualClick);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Probability (0.0 to 1.0) that a cell spawns a token
    pub spawn_probability: f64,
    /// Probability (0.0 to 1.0) that a spawned token is a 2
    pub two_probability: f64,
    /// Merged value that triggers a victory notification
    pub victory_threshold: u64,
    /// Maximum king-move distance for activations
    pub proximity_radius: u32,
    /// Who moves the player
    pub movement_mode: MovementMode,
    /// Half-width of the visible cell window
    pub neighborhood_size: i32,
    /// Geographic position of cell (0, 0)'s south-west corner
    pub origin: GeoPoint,
    /// Cell edge length in degrees
    pub cell_degrees: f64,
}

impl GameConfig {
    /// Creates a configuration with smaller thresholds for tests and demos.
    pub fn for_testing() -> Self {
        Self {
            victory_threshold: 4,
            ..Self::default()
        }
    }

    /// Loads a configuration from a JSON file and validates it.
    pub fn load(path: impl AsRef<Path>) -> GridResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every option is within its meaningful range.
    pub fn validate(&self) -> GridResult<()> {
        if !(0.0..=1.0).contains(&self.spawn_probability) {
            return Err(GridError::InvalidConfig(format!(
                "spawn_probability must be within [0, 1], got {}",
                self.spawn_probability
            )));
        }
        if !(0.0..=1.0).contains(&self.two_probability) {
            return Err(GridError::InvalidConfig(format!(
                "two_probability must be within [0, 1], got {}",
                self.two_probability
            )));
        }
        if self.victory_threshold < 2 {
            return Err(GridError::InvalidConfig(
                "victory_threshold must be at least 2".to_string(),
            ));
        }
        if self.neighborhood_size < 0 {
            return Err(GridError::InvalidConfig(
                "neighborhood_size cannot be negative".to_string(),
            ));
        }
        if !(self.cell_degrees.is_finite() && self.cell_degrees > 0.0) {
            return Err(GridError::InvalidConfig(format!(
                "cell_degrees must be positive, got {}",
                self.cell_degrees
            )));
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            spawn_probability: DEFAULT_SPAWN_PROBABILITY,
            two_probability: DEFAULT_TWO_PROBABILITY,
            victory_threshold: DEFAULT_VICTORY_THRESHOLD,
            proximity_radius: DEFAULT_PROXIMITY_RADIUS,
            movement_mode: MovementMode::ManualClick,
            neighborhood_size: DEFAULT_NEIGHBORHOOD_SIZE,
            origin: GeoPoint::new(DEFAULT_ORIGIN_LAT, DEFAULT_ORIGIN_LNG),
            cell_degrees: DEFAULT_CELL_DEGREES,
        }
    }
}
