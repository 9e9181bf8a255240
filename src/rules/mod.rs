//! Rules engine trait for match drivers.
//!
//! `RulesEngine` exposes:
//! - Legal actions for each match state
//! - How actions modify state
//! - Win/loss conditions
//!
//! `game::MatchContext` is the implementation; drivers only need the trait.

pub mod engine;

pub use engine::{GameResult, RulesEngine};
