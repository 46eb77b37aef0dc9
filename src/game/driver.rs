//! # Game Driver
//!
//! Entry point for presentation adapters. The driver owns the session and
//! runs every incoming event (activation, step, position update) through the
//! interaction engine to completion, then snapshots the session and notifies
//! observers of what changed.

use crate::config::GameConfig;
use crate::game::{
    ActivationResult, Cell, Coordinate, Direction, GameEvent, GameSession, InteractionEngine,
    RejectReason,
};
use crate::generation::DeterministicSpawner;
use crate::movement::{GeoPoint, GridProjection};
use crate::persistence::PersistenceGateway;
use crate::GridResult;
use log::{info, warn};

type Observer = Box<dyn FnMut(&GameEvent)>;

/// Owns a game session and wires it to the engine, persistence, and observers.
pub struct GameDriver {
    session: GameSession,
    engine: InteractionEngine,
    projection: GridProjection,
    config: GameConfig,
    gateway: Option<PersistenceGateway>,
    observers: Vec<Observer>,
}

impl GameDriver {
    /// Creates a driver with a fresh session and no persistence.
    pub fn new(config: GameConfig, spawner: DeterministicSpawner) -> Self {
        Self::with_session(config, GameSession::new(spawner), None)
    }

    /// Creates a driver whose session is restored from `gateway`, falling
    /// back to a fresh session when no usable save exists.
    pub fn with_persistence(
        config: GameConfig,
        spawner: DeterministicSpawner,
        gateway: PersistenceGateway,
    ) -> Self {
        let session = gateway.restore(spawner);
        Self::with_session(config, session, Some(gateway))
    }

    fn with_session(
        config: GameConfig,
        session: GameSession,
        gateway: Option<PersistenceGateway>,
    ) -> Self {
        Self {
            session,
            engine: InteractionEngine::new(&config),
            projection: GridProjection::from_config(&config),
            config,
            gateway,
            observers: Vec::new(),
        }
    }

    /// Registers a callback that receives every emitted event.
    pub fn subscribe(&mut self, observer: impl FnMut(&GameEvent) + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Handles a click or tap on a cell.
    pub fn handle_activation(&mut self, target: Coordinate) -> ActivationResult {
        let result = self.engine.handle_activation(&mut self.session, target);
        self.complete(result)
    }

    /// Moves the player one cell in manual movement mode.
    pub fn step(&mut self, direction: Direction) -> ActivationResult {
        let result = self.engine.step(&mut self.session, direction);
        self.complete(result)
    }

    /// Handles a reading from the external position feed. Readings that map
    /// to no grid cell are refused.
    pub fn handle_position_update(&mut self, point: GeoPoint) -> ActivationResult {
        let result = match self.projection.to_coordinate(point) {
            Some(reported) => self.engine.handle_position_update(&mut self.session, reported),
            None => {
                warn!("Ignoring position reading off the grid: {:?}", point);
                self.engine.refuse(&mut self.session, RejectReason::OffGrid)
            }
        };
        self.complete(result)
    }

    /// Discovers and returns the cells around the player that an adapter
    /// should draw.
    pub fn visible_cells(&mut self) -> Vec<Cell> {
        let center = self.session.player_position;
        self.session.grid.window(center, self.config.neighborhood_size)
    }

    /// Starts over with a fresh game and deletes the save. If the save cannot
    /// be deleted, the fresh game is written over it instead; if that fails
    /// too, the player is warned and play goes on.
    pub fn reset(&mut self) {
        self.session.reset();
        info!("Game reset");
        let mut events = vec![GameEvent::info("Started a new game.")];

        if let Some(gateway) = self.gateway.as_mut() {
            if let Err(e) = gateway.clear() {
                warn!("Failed to delete save: {}", e);
                if let Err(e) = gateway.persist(&self.session) {
                    warn!("Failed to overwrite save: {}", e);
                    events.push(GameEvent::important(format!(
                        "The old save could not be removed: {e}"
                    )));
                }
            }
        }

        for event in &events {
            self.notify(event);
        }
    }

    /// Writes the session to storage now.
    pub fn save(&mut self) -> GridResult<()> {
        match self.gateway.as_mut() {
            Some(gateway) => gateway.persist(&self.session),
            None => Ok(()),
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn projection(&self) -> &GridProjection {
        &self.projection
    }

    fn complete(&mut self, mut result: ActivationResult) -> ActivationResult {
        if result.accepted {
            if let Err(e) = self.save() {
                warn!("Failed to save game: {}", e);
                result
                    .events
                    .push(GameEvent::important(format!("Progress could not be saved: {e}")));
            }
        }
        for event in &result.events {
            self.notify(event);
        }
        result
    }

    fn notify(&mut self, event: &GameEvent) {
        for observer in &mut self.observers {
            observer(event);
        }
    }
}

impl std::fmt::Debug for GameDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameDriver")
            .field("session", &self.session)
            .field("engine", &self.engine)
            .field("config", &self.config)
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}
