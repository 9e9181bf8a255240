//! Core engine types: entities, players, positions, state, actions, RNG,
//! configuration and errors.

pub mod action;
pub mod config;
pub mod entity;
pub mod error;
pub mod player;
pub mod position;
pub mod rng;
pub mod state;

pub use action::{Action, ActionRecord, AttackTarget};
pub use config::MatchConfig;
pub use entity::EntityId;
pub use error::{ActionError, CatalogError};
pub use player::{Player, PlayerId, PlayerMap, PLAYER_COUNT};
pub use position::Position;
pub use rng::GameRng;
pub use state::{GameState, TurnPhase};
