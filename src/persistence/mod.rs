//! # Persistence Module
//!
//! Saves and restores a player's progress.
//!
//! Only the inventory, the player position, and the discovered cells are
//! stored; undiscovered cells are regenerated by the spawner on demand.
//! Loading never fails the caller: a missing, unreadable, or malformed save
//! yields a fresh game instead.

pub mod storage;

pub use storage::*;

use crate::game::{Cell, Coordinate, GameSession, GameStatistics, TokenValue};
use crate::generation::DeterministicSpawner;
use crate::GridResult;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

/// Serialized form of a game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedGame {
    /// Carried token, `null` when empty
    pub inventory: Option<TokenValue>,
    pub player_position: Coordinate,
    /// Every discovered cell with its current value
    pub cells: Vec<Cell>,
    #[serde(default)]
    pub statistics: GameStatistics,
}

impl PersistedGame {
    /// Captures the persistent parts of a session.
    pub fn from_session(session: &GameSession) -> Self {
        Self {
            inventory: session.inventory.peek(),
            player_position: session.player_position,
            cells: session.grid.snapshot(),
            statistics: session.statistics.clone(),
        }
    }

    /// Rebuilds a session around `spawner`.
    pub fn into_session(self, spawner: DeterministicSpawner) -> GameSession {
        let mut session = GameSession::with_position(spawner, self.player_position);
        session.inventory.set(self.inventory);
        session.grid.restore(self.cells);
        session.statistics = self.statistics;
        session
    }

    /// Saves the game to JSON.
    pub fn to_json(&self) -> GridResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Loads a game from JSON.
    pub fn from_json(json: &str) -> GridResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Moves game snapshots in and out of a [`SaveStore`].
pub struct PersistenceGateway {
    store: Box<dyn SaveStore>,
}

impl PersistenceGateway {
    pub fn new(store: impl SaveStore + 'static) -> Self {
        Self {
            store: Box::new(store),
        }
    }

    /// Captures the persistent parts of a session.
    pub fn snapshot(&self, session: &GameSession) -> PersistedGame {
        PersistedGame::from_session(session)
    }

    /// Writes a snapshot of `session` to the store.
    pub fn persist(&mut self, session: &GameSession) -> GridResult<()> {
        let json = self.snapshot(session).to_json()?;
        self.store.save(&json)?;
        debug!("Persisted {} cells", session.grid.len());
        Ok(())
    }

    /// Reads the saved game, if any.
    pub fn load(&self) -> GridResult<Option<PersistedGame>> {
        match self.store.load()? {
            Some(json) => Ok(Some(PersistedGame::from_json(&json)?)),
            None => Ok(None),
        }
    }

    /// Restores the saved game, or starts a fresh one if no usable save exists.
    pub fn restore(&self, spawner: DeterministicSpawner) -> GameSession {
        match self.load() {
            Ok(Some(saved)) => {
                info!(
                    "Restored game at {} with {} discovered cells",
                    saved.player_position,
                    saved.cells.len()
                );
                saved.into_session(spawner)
            }
            Ok(None) => {
                info!("No saved game found, starting fresh");
                GameSession::new(spawner)
            }
            Err(e) => {
                warn!("Ignoring unusable saved game: {}", e);
                GameSession::new(spawner)
            }
        }
    }

    /// Deletes the saved game.
    pub fn clear(&mut self) -> GridResult<()> {
        self.store.clear()
    }
}

impl std::fmt::Debug for PersistenceGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PersistenceGateway").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> GameSession {
        let mut session = GameSession::new(DeterministicSpawner::default());
        session.grid.get(Coordinate::new(0, 1));
        session.grid.set(Coordinate::new(1, 1), Some(8));
        session.grid.set(Coordinate::new(-1, 0), None);
        session.inventory.set(Some(4));
        session.player_position = Coordinate::new(1, 0);
        session.statistics.merges = 2;
        session
    }

    #[test]
    fn test_persist_then_restore() {
        let store = MemorySaveStore::new();
        let mut gateway = PersistenceGateway::new(store.clone());
        let original = session();

        gateway.persist(&original).unwrap();
        assert!(store.contents().is_some());

        let restored = gateway.restore(DeterministicSpawner::default());
        assert_eq!(restored.grid.snapshot(), original.grid.snapshot());
        assert_eq!(restored.inventory, original.inventory);
        assert_eq!(restored.player_position, original.player_position);
        assert_eq!(restored.statistics, original.statistics);
    }

    #[test]
    fn test_restore_without_save_is_fresh() {
        let gateway = PersistenceGateway::new(MemorySaveStore::new());
        let session = gateway.restore(DeterministicSpawner::default());
        assert!(session.grid.is_empty());
        assert!(session.inventory.is_empty());
        assert_eq!(session.player_position, Coordinate::origin());
    }

    #[test]
    fn test_corrupt_save_is_treated_as_missing() {
        let store = MemorySaveStore::with_contents("{ not json");
        let gateway = PersistenceGateway::new(store);
        assert!(gateway.load().is_err());

        let session = gateway.restore(DeterministicSpawner::default());
        assert!(session.grid.is_empty());
    }

    #[test]
    fn test_save_missing_fields_is_treated_as_missing() {
        let store = MemorySaveStore::with_contents(r#"{"inventory": 2}"#);
        let gateway = PersistenceGateway::new(store);

        let session = gateway.restore(DeterministicSpawner::default());
        assert!(session.inventory.is_empty());
    }

    #[test]
    fn test_save_without_statistics_still_loads() {
        let json = r#"{
            "inventory": null,
            "player_position": {"i": 2, "j": 3},
            "cells": [{"coordinate": {"i": 2, "j": 3}, "value": 16}]
        }"#;
        let saved = PersistedGame::from_json(json).unwrap();
        assert_eq!(saved.statistics, GameStatistics::new());

        let mut session = saved.into_session(DeterministicSpawner::default());
        assert_eq!(session.player_position, Coordinate::new(2, 3));
        assert_eq!(session.grid.get(Coordinate::new(2, 3)).value, Some(16));
    }

    #[test]
    fn test_clear_removes_save() {
        let store = MemorySaveStore::new();
        let mut gateway = PersistenceGateway::new(store.clone());
        gateway.persist(&session()).unwrap();

        gateway.clear().unwrap();
        assert!(store.contents().is_none());
        assert!(gateway.load().unwrap().is_none());
    }
}
