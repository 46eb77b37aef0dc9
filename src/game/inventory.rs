//! # Inventory Slot
//!
//! The player carries at most one token at a time.

use crate::game::TokenValue;
use serde::{Deserialize, Serialize};

/// Holds zero or one token.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InventorySlot {
    token: Option<TokenValue>,
}

impl InventorySlot {
    /// Creates an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.token.is_none()
    }

    /// Returns the carried token without removing it.
    pub fn peek(&self) -> Option<TokenValue> {
        self.token
    }

    pub fn set(&mut self, token: Option<TokenValue>) {
        self.token = token;
    }

    /// Removes and returns the carried token.
    pub fn take(&mut self) -> Option<TokenValue> {
        self.token.take()
    }
}
