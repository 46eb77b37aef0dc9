//! # Gridmerge
//!
//! Game engine for a location-grid merging game: the player stands in one cell
//! of an infinite, quantized geographic grid, picks up numeric tokens, carries
//! them to neighboring cells, and merges equal tokens into doubled ones.
//!
//! ## Architecture Overview
//!
//! - **Generation**: a pure spawner deciding each cell's initial token from a
//!   deterministic luck oracle
//! - **Grid State**: a sparse store that discovers cells lazily and remembers them
//! - **Interaction**: a state machine turning cell activations into transitions
//! - **Persistence**: JSON snapshots of inventory, position, and discovered cells
//! - **Movement**: projection from an external geographic feed onto grid cells
//!
//! Rendering is left to whichever adapter drives [`GameDriver`]; the engine only
//! reports which cells changed through [`GameEvent`]s.

pub mod config;
pub mod game;
pub mod generation;
pub mod input;
pub mod movement;
pub mod persistence;

pub use config::{GameConfig, MovementMode};
pub use game::*;
pub use generation::*;
pub use input::*;
pub use movement::*;
pub use persistence::*;

/// Core error type for the Gridmerge engine.
#[derive(thiserror::Error, Debug)]
pub enum GridError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Configuration values are out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Game state is invalid
    #[error("Invalid game state: {0}")]
    InvalidState(String),

    /// Player input could not be understood
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Save storage rejected an operation
    #[error("Storage error: {0}")]
    Storage(String),
}

/// Result type used throughout the Gridmerge codebase.
pub type GridResult<T> = Result<T, GridError>;

/// Version information for the engine.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
