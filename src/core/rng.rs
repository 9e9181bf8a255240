//! Seeded randomness for deck shuffles and random drivers.
//!
//! Rules resolution never consults the RNG. It is used by the optional
//! opening shuffle and by drivers picking among legal actions, so one seed
//! always replays one match.
//!
//! ```
//! use grid_tactics::cards::CardId;
//! use grid_tactics::core::GameRng;
//!
//! let deck: im::Vector<CardId> = (1..=10).map(CardId::new).collect();
//! let a = GameRng::new(42).shuffle_deck(&deck);
//! let b = GameRng::new(42).shuffle_deck(&deck);
//! assert_eq!(a, b);
//! ```

use im::Vector;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::cards::CardId;

/// ChaCha8 stream tagged with the seed it came from.
#[derive(Clone, Debug)]
pub struct GameRng {
    stream: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            stream: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// A shuffled copy of a deck. The input order is the tie-break, so equal
    /// decks and seeds give equal results.
    #[must_use]
    pub fn shuffle_deck(&mut self, deck: &Vector<CardId>) -> Vector<CardId> {
        let mut cards: Vec<CardId> = deck.iter().copied().collect();
        cards.shuffle(&mut self.stream);
        cards.into_iter().collect()
    }

    /// Pick one item, `None` for an empty slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.stream)
    }
}
