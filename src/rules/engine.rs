//! Rules engine trait.
//!
//! A `RulesEngine` knows which actions are legal in a state and how to apply
//! them. Drivers of any kind (the demo binary, an AI, a UI) pick from
//! `legal_actions` and feed the choice back through `apply_action`, so an AI
//! opponent is just another source of actions.

use serde::{Deserialize, Serialize};

use crate::core::{Action, ActionError, GameState, PlayerId};

/// Result of a completed match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    /// Single winner.
    Winner(PlayerId),
    /// Both players fell in the same step.
    Draw,
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        matches!(self, GameResult::Winner(p) if *p == player)
    }
}

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `legal_actions`: Return empty if the player can't act
/// - `apply_action`: Must be atomic; on `Err` the state is unchanged
/// - `is_terminal`: Return None if the match continues
pub trait RulesEngine {
    /// Enumerate every legal action for a player.
    fn legal_actions(&self, state: &GameState, player: PlayerId) -> Vec<Action>;

    /// Apply an action for a player.
    fn apply_action(&self, state: &mut GameState, player: PlayerId, action: &Action) -> Result<(), ActionError>;

    /// Check if the match is over.
    fn is_terminal(&self, state: &GameState) -> Option<GameResult>;

    /// Check whether a specific action is currently legal.
    fn is_legal(&self, state: &GameState, player: PlayerId, action: &Action) -> bool {
        self.legal_actions(state, player).contains(action)
    }
}
