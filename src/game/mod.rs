//! Match orchestration: the rules context and the game manager.
//!
//! ## Key Types
//!
//! - `MatchContext`: Catalog, formations, effect factory and config;
//!   implements `RulesEngine`
//! - `GameManager`: Owns a running match and exposes the action API

pub mod context;
pub mod manager;

pub use context::MatchContext;
pub use manager::GameManager;
