//! Card definitions.
//!
//! `Card` is the polymorphic card type: every card shares a `CardBase`
//! (id, name, description, cost, art path) and carries one of three
//! variant payloads. Catalog cards are templates; the board only ever holds
//! clones made at placement time.

use serde::{Deserialize, Serialize};

use super::fortification::FortificationCard;
use super::tactic::TacticCard;
use super::unit::UnitCard;

/// Unique identifier for a card in the catalog.
///
/// This identifies the "type" of card (e.g., "Hussars"), not a specific
/// instance on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Data shared by every card variant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardBase {
    pub id: CardId,
    pub name: String,
    pub description: String,
    pub mana_cost: i32,
    /// Art asset path, opaque to the engine.
    pub image_path: String,
}

impl CardBase {
    /// Create a base with empty description and art path.
    #[must_use]
    pub fn new(id: CardId, name: impl Into<String>, mana_cost: i32) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            mana_cost,
            image_path: String::new(),
        }
    }
}

/// Which variant a card is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardKind {
    Unit,
    Fortification,
    Tactic,
}

/// A playable card.
///
/// ## Example
///
/// ```
/// use grid_tactics::cards::{Card, CardId, CardKind, UnitCard, UnitType};
///
/// let card: Card = UnitCard::new(CardId::new(1), "Pikemen", 2, UnitType::Infantry, 2, 3).into();
/// assert_eq!(card.kind(), CardKind::Unit);
/// assert_eq!(card.mana_cost(), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Card {
    Unit(UnitCard),
    Fortification(FortificationCard),
    Tactic(TacticCard),
}

impl Card {
    /// Shared card data.
    #[must_use]
    pub fn base(&self) -> &CardBase {
        match self {
            Card::Unit(unit) => &unit.base,
            Card::Fortification(fort) => &fort.base,
            Card::Tactic(tactic) => &tactic.base,
        }
    }

    #[must_use]
    pub fn id(&self) -> CardId {
        self.base().id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.base().name
    }

    #[must_use]
    pub fn mana_cost(&self) -> i32 {
        self.base().mana_cost
    }

    #[must_use]
    pub fn kind(&self) -> CardKind {
        match self {
            Card::Unit(_) => CardKind::Unit,
            Card::Fortification(_) => CardKind::Fortification,
            Card::Tactic(_) => CardKind::Tactic,
        }
    }

    /// Units and fortifications occupy a board cell when played.
    #[must_use]
    pub fn is_deployable(&self) -> bool {
        !matches!(self, Card::Tactic(_))
    }
}

impl From<UnitCard> for Card {
    fn from(unit: UnitCard) -> Self {
        Card::Unit(unit)
    }
}

impl From<FortificationCard> for Card {
    fn from(fort: FortificationCard) -> Self {
        Card::Fortification(fort)
    }
}

impl From<TacticCard> for Card {
    fn from(tactic: TacticCard) -> Self {
        Card::Tactic(tactic)
    }
}
