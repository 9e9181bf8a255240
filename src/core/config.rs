//! Match configuration.
//!
//! A match is configured once at startup by providing a `MatchConfig`:
//! board dimensions, deployment rows per side, and the resource economy.
//! Campaign levels override individual fields before the match starts.
//!
//! The engine never reads configuration from disk; `MatchConfig` derives
//! `Deserialize` so the surrounding application can load it however it likes.

use serde::{Deserialize, Serialize};

use super::player::{PlayerId, PlayerMap};
use super::position::Position;

/// Complete match configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Board rows.
    pub rows: usize,

    /// Board columns.
    pub columns: usize,

    /// Rows each player may deploy into.
    pub deployment_rows: PlayerMap<Vec<usize>>,

    /// Health each player starts with.
    pub starting_health: i32,

    /// Mana available on a player's first turn.
    pub starting_mana: i32,

    /// Growth of maximum mana at each later turn start.
    pub mana_per_turn: i32,

    /// Maximum mana can never grow past this.
    pub max_mana_cap: i32,

    /// Direct damage taken when a draw is due and the deck is empty.
    pub fatigue_damage: i32,

    /// Cards drawn before the first turn.
    pub starting_hand_size: usize,

    /// Minimum health of a wall created by petrification.
    pub petrify_min_health: i32,

    /// Shuffle both decks with the seeded RNG before the opening draw.
    pub shuffle_decks: bool,

    /// Seed for the match RNG.
    pub seed: u64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            rows: 6,
            columns: 6,
            deployment_rows: PlayerMap::new(|p| if p.0 == 0 { vec![4, 5] } else { vec![0, 1] }),
            starting_health: 20,
            starting_mana: 1,
            mana_per_turn: 1,
            max_mana_cap: 10,
            fatigue_damage: 2,
            starting_hand_size: 3,
            petrify_min_health: 3,
            shuffle_decks: false,
            seed: 0,
        }
    }
}

impl MatchConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set board dimensions, raised to at least 2 rows and 1 column so each
    /// side has a home row. Deployment rows are reset to the two rows
    /// nearest each side's edge.
    #[must_use]
    pub fn with_board(mut self, rows: usize, columns: usize) -> Self {
        let (rows, columns) = (rows.max(2), columns.max(1));
        self.rows = rows;
        self.columns = columns;
        let home = rows.min(4) / 2;
        self.deployment_rows = PlayerMap::new(|p| {
            if p.0 == 0 {
                (rows - home..rows).collect()
            } else {
                (0..home).collect()
            }
        });
        self
    }

    /// Override one player's deployment rows.
    #[must_use]
    pub fn with_deployment_rows(mut self, player: PlayerId, rows: Vec<usize>) -> Self {
        self.deployment_rows[player] = rows;
        self
    }

    #[must_use]
    pub fn with_starting_health(mut self, health: i32) -> Self {
        self.starting_health = health;
        self
    }

    #[must_use]
    pub fn with_starting_mana(mut self, mana: i32) -> Self {
        self.starting_mana = mana;
        self
    }

    /// Set mana growth per turn and its cap.
    #[must_use]
    pub fn with_mana_growth(mut self, per_turn: i32, cap: i32) -> Self {
        self.mana_per_turn = per_turn;
        self.max_mana_cap = cap;
        self
    }

    #[must_use]
    pub fn with_fatigue_damage(mut self, damage: i32) -> Self {
        self.fatigue_damage = damage;
        self
    }

    #[must_use]
    pub fn with_starting_hand_size(mut self, size: usize) -> Self {
        self.starting_hand_size = size;
        self
    }

    #[must_use]
    pub fn with_petrify_min_health(mut self, health: i32) -> Self {
        self.petrify_min_health = health;
        self
    }

    /// Shuffle decks with the given seed before the opening draw.
    #[must_use]
    pub fn with_shuffle(mut self, seed: u64) -> Self {
        self.shuffle_decks = true;
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Total number of cells.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.rows * self.columns
    }

    /// Check whether a position lies inside the board.
    #[must_use]
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.row < self.rows && pos.col < self.columns
    }

    /// Check whether a position lies in a player's deployment zone.
    #[must_use]
    pub fn in_deployment_zone(&self, player: PlayerId, pos: Position) -> bool {
        self.in_bounds(pos) && self.deployment_rows[player].contains(&pos.row)
    }
}
