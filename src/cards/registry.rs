//! Card catalog.
//!
//! The `CardCatalog` stores every card template for a match. It is filled
//! once from already-parsed card data and read-only afterwards. Lookups are
//! null-safe: a missing id yields `None`, never a panic.

use im::Vector;
use rustc_hash::FxHashMap;

use super::definition::{Card, CardId, CardKind};
use crate::core::CatalogError;

/// Registry of card templates.
///
/// ## Example
///
/// ```
/// use grid_tactics::cards::{CardCatalog, CardId, UnitCard, UnitType};
///
/// let mut catalog = CardCatalog::new();
/// catalog
///     .register(UnitCard::new(CardId::new(1), "Legionaries", 3, UnitType::Infantry, 3, 3))
///     .unwrap();
///
/// assert_eq!(catalog.get(CardId::new(1)).unwrap().name(), "Legionaries");
/// assert!(catalog.get(CardId::new(2)).is_none());
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardCatalog {
    cards: FxHashMap<CardId, Card>,
}

impl CardCatalog {
    /// Create a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a card template.
    ///
    /// Ids are unique across the catalog; a duplicate is rejected and the
    /// existing card is kept.
    pub fn register(&mut self, card: impl Into<Card>) -> Result<CardId, CatalogError> {
        let card = card.into();
        let id = card.id();
        if self.cards.contains_key(&id) {
            return Err(CatalogError::DuplicateId(id));
        }
        self.cards.insert(id, card);
        Ok(id)
    }

    /// Build a catalog from a list of cards, stopping at the first duplicate.
    pub fn from_cards(cards: impl IntoIterator<Item = Card>) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();
        for card in cards {
            catalog.register(card)?;
        }
        Ok(catalog)
    }

    /// Get a card template by ID.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.cards.get(&id)
    }

    /// Check if a card ID is registered.
    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.cards.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all card templates in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        let mut cards: Vec<_> = self.cards.values().collect();
        cards.sort_by_key(|c| c.id());
        cards.into_iter()
    }

    /// Find cards of one kind, in id order.
    pub fn find_by_kind(&self, kind: CardKind) -> impl Iterator<Item = &Card> {
        self.iter().filter(move |c| c.kind() == kind)
    }

    /// Resolve a deck list against the catalog.
    ///
    /// Ids the catalog does not know are skipped with a warning; the match
    /// runs with whatever resolved.
    pub fn resolve_deck(&self, ids: &[CardId]) -> Vector<CardId> {
        ids.iter()
            .copied()
            .filter(|&id| {
                let known = self.contains(id);
                if !known {
                    tracing::warn!(card = %id, "deck references a card missing from the catalog");
                }
                known
            })
            .collect()
    }
}
