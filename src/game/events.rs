//! # Game Events
//!
//! Notifications emitted by accepted transitions. Presentation layers redraw
//! from these instead of inspecting engine internals.

use crate::game::{Coordinate, TokenValue};
use serde::{Deserialize, Serialize};

/// How prominently a message should be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageImportance {
    Info,
    Warning,
    Important,
}

/// Something that happened in the game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A cell's content changed and should be redrawn
    CellChanged {
        coordinate: Coordinate,
        value: Option<TokenValue>,
    },
    /// The player moved to another cell
    PlayerMoved { from: Coordinate, to: Coordinate },
    /// The carried token changed
    InventoryChanged { value: Option<TokenValue> },
    /// A merge reached the victory threshold; play continues
    Victory { value: TokenValue },
    /// A status line for the player
    Message {
        text: String,
        importance: MessageImportance,
    },
}

impl GameEvent {
    /// Creates an informational message event.
    pub fn info(text: impl Into<String>) -> Self {
        GameEvent::Message {
            text: text.into(),
            importance: MessageImportance::Info,
        }
    }

    /// Creates a warning message event.
    pub fn warning(text: impl Into<String>) -> Self {
        GameEvent::Message {
            text: text.into(),
            importance: MessageImportance::Warning,
        }
    }

    /// Creates a message the player must not miss, such as lost progress.
    pub fn important(text: impl Into<String>) -> Self {
        GameEvent::Message {
            text: text.into(),
            importance: MessageImportance::Important,
        }
    }
}
