//! Abilities and tactic effects.
//!
//! ## Key Types
//!
//! - `Ability`: Passive or activated unit ability
//! - `TacticEffect`: What a tactic card does, including compound effects
//! - `TimedBuff`: Attack bonus that expires on the owner's turn start
//! - `EffectFactory`: Builds effects from data-driven descriptors

pub mod ability;
pub mod factory;
pub mod tactic;

pub use ability::Ability;
pub use factory::{EffectConstructor, EffectDescriptor, EffectFactory};
pub use tactic::{TacticEffect, TimedBuff};
