//! # grid-tactics
//!
//! Rules engine for a grid-based tactical card battle game.
//!
//! Two players deploy unit, fortification and tactic cards onto a shared
//! board, move and fight under range and type-counter rules, and the match
//! ends when a player's health reaches zero or a campaign objective is met.
//!
//! ## Design Principles
//!
//! 1. **Atomic Actions**: Every action either resolves completely or is
//!    rejected with an `ActionError` and no state change.
//!
//! 2. **Templates vs Instances**: The catalog holds card templates; the board
//!    holds independent copies with their own `EntityId`.
//!
//! 3. **No Presentation**: The engine emits named `GameEvent`s and never
//!    renders, plays sound or reads files.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: `GameState` clones in O(1) via `im`,
//!   which makes all-or-nothing compound effects a snapshot and a swap.
//!
//! - **Pluggable Drivers**: `RulesEngine::legal_actions` lets AI players and
//!   UIs act through the same API.
//!
//! ## Modules
//!
//! - `core`: Entity handles, players, positions, configuration, state, actions
//! - `board`: Grid, occupants and owner map
//! - `cards`: Card model, catalog and card-play resolution
//! - `effects`: Abilities, tactic effects and the effect factory
//! - `movement`: Per-turn movement rules
//! - `formations`: Formation detection and bonuses
//! - `combat`: Ranges, counters, taunt and damage
//! - `events`: Named trigger events
//! - `campaign`: Level descriptors and objectives
//! - `rules`: `RulesEngine` trait
//! - `game`: Turn state machine and action API

pub mod board;
pub mod campaign;
pub mod cards;
pub mod combat;
pub mod core;
pub mod effects;
pub mod events;
pub mod formations;
pub mod game;
pub mod movement;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionError, ActionRecord, AttackTarget, CatalogError, EntityId, GameRng, GameState, MatchConfig,
    Player, PlayerId, PlayerMap, Position, TurnPhase,
};

pub use crate::board::{Board, Occupant};

pub use crate::cards::{
    Card, CardBase, CardCatalog, CardId, CardKind, FortType, FortificationCard, TacticCard, TacticType, TargetType,
    UnitCard, UnitEra, UnitType,
};

pub use crate::effects::{Ability, EffectDescriptor, EffectFactory, TacticEffect, TimedBuff};

pub use crate::campaign::{CampaignLevel, CampaignObjective, CompletionCheck, Objective, ObjectiveOutcome, SpecialRule};
pub use crate::events::GameEvent;
pub use crate::formations::{Formation, FormationEffect, FormationManager};
pub use crate::game::{GameManager, MatchContext};
pub use crate::movement::MovementManager;
pub use crate::rules::{GameResult, RulesEngine};
