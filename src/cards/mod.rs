//! Card system: definitions, catalog, and play resolution.
//!
//! ## Key Types
//!
//! - `CardId`: Identifier for a catalog template
//! - `Card`: Unit, fortification or tactic card
//! - `CardCatalog`: Template lookup, filled once per match
//!
//! ## Templates and Instances
//!
//! Hands and decks hold `CardId`s. The catalog owns the templates, and
//! placing a card on the board clones its template, so board damage never
//! leaks back into the catalog.

pub mod definition;
pub mod fortification;
pub mod play;
pub mod registry;
pub mod tactic;
pub mod unit;

pub use definition::{Card, CardBase, CardId, CardKind};
pub use fortification::{FortType, FortificationCard};
pub use play::{play_fortification, play_tactic, play_unit};
pub use registry::CardCatalog;
pub use tactic::{TacticCard, TacticType, TargetType};
pub use unit::{UnitCard, UnitEra, UnitType};
