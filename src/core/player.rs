//! Player identification and per-side resources.
//!
//! ## PlayerId
//!
//! Type-safe identifier. A match always has two sides, `PlayerId(0)` and
//! `PlayerId(1)`; `opponent()` flips between them.
//!
//! ## PlayerMap
//!
//! Per-player storage backed by a `Vec`, indexed by `PlayerId`.
//!
//! ## Player
//!
//! Health, mana, hand and deck for one side. Hands and decks hold catalog
//! card ids (templates); board instances are cloned from the catalog on play.

use im::Vector;
use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use crate::cards::CardId;

/// Number of sides in a match.
pub const PLAYER_COUNT: usize = 2;

/// Player identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The other side of a two-player match.
    ///
    /// ```
    /// use grid_tactics::core::PlayerId;
    ///
    /// assert_eq!(PlayerId::new(0).opponent(), PlayerId::new(1));
    /// assert_eq!(PlayerId::new(1).opponent(), PlayerId::new(0));
    /// ```
    #[must_use]
    pub const fn opponent(self) -> Self {
        Self(1 - self.0)
    }

    /// Both player IDs in turn order.
    pub fn both() -> impl Iterator<Item = PlayerId> {
        (0..PLAYER_COUNT as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Per-player data storage with O(1) access.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Create a map for both players from a factory function.
    pub fn new(factory: impl Fn(PlayerId) -> T) -> Self {
        Self {
            data: PlayerId::both().map(factory).collect(),
        }
    }

    /// Create a map with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(|_| value.clone())
    }

    /// Get a reference to a player's data.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    /// Get a mutable reference to a player's data.
    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}

/// One side's resources.
///
/// Mana is kept within `0..=max_mana` by every mutator; health may go
/// negative, and `is_defeated` reports the terminal condition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    health: i32,
    current_mana: i32,
    max_mana: i32,
    starting_mana: i32,
    hand: Vector<CardId>,
    deck: Vector<CardId>,
    turns_started: u32,
}

impl Player {
    /// Create a player with an empty hand.
    ///
    /// Mana starts at zero; the first `start_turn_mana` call fills it to
    /// `starting_mana`.
    pub fn new(
        id: PlayerId,
        name: impl Into<String>,
        starting_health: i32,
        starting_mana: i32,
        deck: impl IntoIterator<Item = CardId>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            health: starting_health,
            current_mana: 0,
            max_mana: 0,
            starting_mana: starting_mana.max(0),
            hand: Vector::new(),
            deck: deck.into_iter().collect(),
            turns_started: 0,
        }
    }

    // === Health ===

    #[must_use]
    pub fn health(&self) -> i32 {
        self.health
    }

    /// Health at or below zero ends the match.
    #[must_use]
    pub fn is_defeated(&self) -> bool {
        self.health <= 0
    }

    /// Apply direct damage. Negative amounts are ignored.
    pub fn take_damage(&mut self, amount: i32) {
        self.health -= amount.max(0);
    }

    // === Mana ===

    #[must_use]
    pub fn current_mana(&self) -> i32 {
        self.current_mana
    }

    #[must_use]
    pub fn max_mana(&self) -> i32 {
        self.max_mana
    }

    #[must_use]
    pub fn can_afford(&self, cost: i32) -> bool {
        cost >= 0 && self.current_mana >= cost
    }

    /// Deduct mana. Returns false without mutating if unaffordable.
    pub fn spend_mana(&mut self, cost: i32) -> bool {
        if !self.can_afford(cost) {
            return false;
        }
        self.current_mana -= cost;
        true
    }

    /// Override the mana the first turn starts with (campaign rule).
    pub fn set_starting_mana(&mut self, mana: i32) {
        self.starting_mana = mana.max(0);
    }

    /// Turn-start refill.
    ///
    /// The first turn fills to `starting_mana`; later turns grow `max_mana`
    /// by `step` up to `cap` (a starting value above the cap is kept).
    pub fn start_turn_mana(&mut self, step: i32, cap: i32) {
        if self.turns_started == 0 {
            self.max_mana = self.starting_mana;
        } else {
            let grown = (self.max_mana + step.max(0)).min(cap);
            self.max_mana = self.max_mana.max(grown);
        }
        self.turns_started += 1;
        self.current_mana = self.max_mana;
    }

    /// Number of turns this player has started.
    #[must_use]
    pub fn turns_started(&self) -> u32 {
        self.turns_started
    }

    // === Hand ===

    #[must_use]
    pub fn hand(&self) -> &Vector<CardId> {
        &self.hand
    }

    #[must_use]
    pub fn has_in_hand(&self, card: CardId) -> bool {
        self.hand.contains(&card)
    }

    pub fn add_to_hand(&mut self, card: CardId) {
        self.hand.push_back(card);
    }

    /// Remove the first copy of a card from the hand.
    ///
    /// Returns true if the card was found and removed.
    pub fn remove_from_hand(&mut self, card: CardId) -> bool {
        if let Some(pos) = self.hand.index_of(&card) {
            self.hand.remove(pos);
            true
        } else {
            false
        }
    }

    // === Deck ===

    #[must_use]
    pub fn deck(&self) -> &Vector<CardId> {
        &self.deck
    }

    /// Draw from the front of the deck into the hand.
    ///
    /// Returns the drawn card id, or None if the deck is empty.
    pub fn draw(&mut self) -> Option<CardId> {
        let card = self.deck.pop_front()?;
        self.hand.push_back(card);
        Some(card)
    }

    /// Remove the first copy of a card from the deck.
    pub fn remove_from_deck(&mut self, card: CardId) -> bool {
        if let Some(pos) = self.deck.index_of(&card) {
            self.deck.remove(pos);
            true
        } else {
            false
        }
    }

    /// Replace deck order (used by the seeded shuffle at match start).
    pub fn set_deck(&mut self, deck: Vector<CardId>) {
        self.deck = deck;
    }
}
