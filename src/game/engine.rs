//! # Interaction Engine
//!
//! Evaluates a cell activation against the player's position, inventory, and
//! the grid, and applies the resulting transition to the session.
//!
//! The engine is a state machine with two states derived from the inventory
//! slot (empty or full). Activations are evaluated in order:
//!
//! 1. Cells beyond the proximity radius are refused without touching state.
//! 2. With an empty inventory, a token is picked up, or an empty cell is
//!    walked into (manual movement only).
//! 3. With a full inventory, an equal token is merged, an empty cell receives
//!    the token, and a different token is refused.

use crate::config::{GameConfig, MovementMode};
use crate::game::{Coordinate, Direction, GameEvent, GameSession, MessageImportance, TokenValue};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why an activation or move was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectReason {
    /// Target lies outside the proximity radius
    TooFar { distance: u32 },
    /// Carried token and cell token differ
    MismatchedTokens {
        held: TokenValue,
        found: TokenValue,
    },
    /// A position feed owns movement
    MovementExternallyControlled,
    /// Clicks own movement; feed updates are ignored
    MovementManuallyControlled,
    /// The player already stands in the target cell
    AlreadyThere,
    /// The destination lies beyond the addressable grid
    OffGrid,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::TooFar { .. } => write!(f, "That cell is too far away."),
            RejectReason::MismatchedTokens { held, found } => {
                write!(f, "You can't combine different tokens ({held} and {found}).")
            }
            RejectReason::MovementExternallyControlled => {
                write!(f, "Movement is externally controlled.")
            }
            RejectReason::MovementManuallyControlled => {
                write!(f, "Movement is manually controlled.")
            }
            RejectReason::AlreadyThere => write!(f, "You are already there."),
            RejectReason::OffGrid => write!(f, "That position is off the map."),
        }
    }
}

/// What an activation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    PickedUp {
        coordinate: Coordinate,
        value: TokenValue,
    },
    Placed {
        coordinate: Coordinate,
        value: TokenValue,
    },
    Combined {
        coordinate: Coordinate,
        value: TokenValue,
        victory: bool,
    },
    Moved {
        from: Coordinate,
        to: Coordinate,
    },
    Rejected(RejectReason),
}

/// Structured result of one activation, handed to the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivationResult {
    /// Whether state changed
    pub accepted: bool,
    /// Status line for the player
    pub message: String,
    /// Cells whose content changed
    pub mutated_coordinates: Vec<Coordinate>,
    pub outcome: Outcome,
    /// Notifications for observers, in emission order
    pub events: Vec<GameEvent>,
}

impl ActivationResult {
    fn rejected(reason: RejectReason) -> Self {
        let message = reason.to_string();
        Self {
            accepted: false,
            events: vec![GameEvent::Message {
                text: message.clone(),
                importance: MessageImportance::Warning,
            }],
            message,
            mutated_coordinates: Vec::new(),
            outcome: Outcome::Rejected(reason),
        }
    }

    fn accepted(outcome: Outcome, message: String, mut events: Vec<GameEvent>) -> Self {
        let mutated_coordinates = events
            .iter()
            .filter_map(|event| match event {
                GameEvent::CellChanged { coordinate, .. } => Some(*coordinate),
                _ => None,
            })
            .collect();
        events.push(GameEvent::info(message.clone()));
        Self {
            accepted: true,
            message,
            mutated_coordinates,
            outcome,
            events,
        }
    }
}

/// Applies the game rules to a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InteractionEngine {
    pub proximity_radius: u32,
    pub victory_threshold: TokenValue,
    pub movement_mode: MovementMode,
}

impl InteractionEngine {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            proximity_radius: config.proximity_radius,
            victory_threshold: config.victory_threshold,
            movement_mode: config.movement_mode,
        }
    }

    /// Evaluates a click or tap on `target`.
    ///
    /// # Examples
    ///
    /// ```
    /// use gridmerge::{Coordinate, DeterministicSpawner, GameConfig, GameSession, InteractionEngine};
    ///
    /// let engine = InteractionEngine::new(&GameConfig::default());
    /// let mut session = GameSession::new(DeterministicSpawner::default());
    ///
    /// let result = engine.handle_activation(&mut session, Coordinate::new(5, 5));
    /// assert!(!result.accepted);
    /// assert!(session.grid.is_empty());
    /// ```
    pub fn handle_activation(
        &self,
        session: &mut GameSession,
        target: Coordinate,
    ) -> ActivationResult {
        let distance = session.distance_to(target);
        if distance > self.proximity_radius {
            debug!("Refused activation of {target}: distance {distance}");
            return self.finish(session, ActivationResult::rejected(RejectReason::TooFar { distance }));
        }

        let cell = session.grid.get(target);
        let result = match (session.inventory.peek(), cell.value) {
            (None, Some(value)) => self.pick_up(session, target, value),
            (None, None) => self.walk_to(session, target),
            (Some(held), Some(found)) if held == found => self.combine(session, target, held),
            (Some(held), None) => self.place(session, target, held),
            (Some(held), Some(found)) => {
                ActivationResult::rejected(RejectReason::MismatchedTokens { held, found })
            }
        };
        self.finish(session, result)
    }

    /// Moves the player one cell in `direction`, if clicks own movement.
    pub fn step(&self, session: &mut GameSession, direction: Direction) -> ActivationResult {
        let result = match self.movement_mode {
            MovementMode::ManualClick => {
                match session.player_position.checked_add(direction.to_delta()) {
                    Some(to) => self.move_player(session, to),
                    None => ActivationResult::rejected(RejectReason::OffGrid),
                }
            }
            MovementMode::ExternalFeed => {
                ActivationResult::rejected(RejectReason::MovementExternallyControlled)
            }
        };
        self.finish(session, result)
    }

    /// Applies a position reported by an external feed, already projected
    /// onto the grid. Positions inside the current cell are ignored.
    pub fn handle_position_update(
        &self,
        session: &mut GameSession,
        reported: Coordinate,
    ) -> ActivationResult {
        let result = match self.movement_mode {
            MovementMode::ExternalFeed if reported == session.player_position => {
                ActivationResult::rejected(RejectReason::AlreadyThere)
            }
            MovementMode::ExternalFeed => self.move_player(session, reported),
            MovementMode::ManualClick => {
                ActivationResult::rejected(RejectReason::MovementManuallyControlled)
            }
        };
        self.finish(session, result)
    }

    /// Refuses an event that never reached the rules, such as a feed reading
    /// with no grid cell.
    pub fn refuse(&self, session: &mut GameSession, reason: RejectReason) -> ActivationResult {
        self.finish(session, ActivationResult::rejected(reason))
    }

    fn finish(&self, session: &mut GameSession, result: ActivationResult) -> ActivationResult {
        session.statistics.record(&result.outcome);
        result
    }

    fn pick_up(
        &self,
        session: &mut GameSession,
        target: Coordinate,
        value: TokenValue,
    ) -> ActivationResult {
        session.inventory.set(Some(value));
        session.grid.set(target, None);
        info!("Picked up {value} from {target}");

        ActivationResult::accepted(
            Outcome::PickedUp {
                coordinate: target,
                value,
            },
            format!("You picked up a {value}."),
            vec![
                GameEvent::CellChanged {
                    coordinate: target,
                    value: None,
                },
                GameEvent::InventoryChanged { value: Some(value) },
            ],
        )
    }

    fn place(
        &self,
        session: &mut GameSession,
        target: Coordinate,
        value: TokenValue,
    ) -> ActivationResult {
        session.grid.set(target, Some(value));
        session.inventory.set(None);
        info!("Placed {value} at {target}");

        ActivationResult::accepted(
            Outcome::Placed {
                coordinate: target,
                value,
            },
            format!("You placed a {value}."),
            vec![
                GameEvent::CellChanged {
                    coordinate: target,
                    value: Some(value),
                },
                GameEvent::InventoryChanged { value: None },
            ],
        )
    }

    fn combine(
        &self,
        session: &mut GameSession,
        target: Coordinate,
        held: TokenValue,
    ) -> ActivationResult {
        debug_assert_eq!(session.grid.peek(target).and_then(|c| c.value), Some(held));

        let value = held.saturating_mul(2);
        session.grid.set(target, Some(value));
        session.inventory.set(None);
        let victory = value >= self.victory_threshold;
        info!("Combined two {held}s into {value} at {target}");

        let mut events = vec![
            GameEvent::CellChanged {
                coordinate: target,
                value: Some(value),
            },
            GameEvent::InventoryChanged { value: None },
        ];
        let message = if victory {
            info!("Victory: reached {value}");
            events.push(GameEvent::Victory { value });
            format!("You combined them into a {value}! You win!")
        } else {
            format!("You combined them into a {value}.")
        };

        ActivationResult::accepted(
            Outcome::Combined {
                coordinate: target,
                value,
                victory,
            },
            message,
            events,
        )
    }

    fn walk_to(&self, session: &mut GameSession, target: Coordinate) -> ActivationResult {
        match self.movement_mode {
            MovementMode::ManualClick => self.move_player(session, target),
            MovementMode::ExternalFeed => {
                ActivationResult::rejected(RejectReason::MovementExternallyControlled)
            }
        }
    }

    fn move_player(&self, session: &mut GameSession, to: Coordinate) -> ActivationResult {
        let from = session.player_position;
        if from == to {
            return ActivationResult::rejected(RejectReason::AlreadyThere);
        }
        session.player_position = to;
        debug!("Player moved from {from} to {to}");

        ActivationResult::accepted(
            Outcome::Moved { from, to },
            format!("You moved to {to}."),
            vec![GameEvent::PlayerMoved { from, to }],
        )
    }
}

impl Default for InteractionEngine {
    fn default() -> Self {
        Self::new(&GameConfig::default())
    }
}
