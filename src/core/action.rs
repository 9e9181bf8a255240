//! Player actions.
//!
//! An `Action` is one request from the acting player. The game manager
//! resolves it atomically: it either fully applies or is rejected with no
//! state change. Actions are plain data so AI drivers, replays of legal-move
//! lists, and presentation layers can all produce them.

use serde::{Deserialize, Serialize};

use super::entity::EntityId;
use super::player::PlayerId;
use super::position::Position;
use crate::cards::CardId;
use crate::effects::Ability;

/// What an attack is aimed at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackTarget {
    /// A unit or fortification on the board.
    Occupant(EntityId),
    /// The opposing player directly (direct assault).
    Player,
}

/// A complete player action.
///
/// ## Example
///
/// ```
/// use grid_tactics::core::{Action, AttackTarget, EntityId};
/// use grid_tactics::cards::CardId;
///
/// let deploy = Action::Deploy { card: CardId::new(3), position: None };
/// let strike = Action::Attack {
///     attacker: EntityId(0),
///     target: AttackTarget::Occupant(EntityId(4)),
/// };
/// assert!(!deploy.ends_turn());
/// assert!(!strike.ends_turn());
/// assert!(Action::EndTurn.ends_turn());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Play a unit or fortification card from hand.
    /// `position` is a row-major linear index; `None` picks the first free
    /// deployment cell.
    Deploy { card: CardId, position: Option<usize> },

    /// Move one of the player's units.
    Move { unit: EntityId, to: Position },

    /// Attack with a unit (or an enabled fortification).
    Attack { attacker: EntityId, target: AttackTarget },

    /// Play a tactic card.
    PlayTactic { card: CardId, target: Option<Position> },

    /// Use an activated ability of a unit.
    ActivateAbility { unit: EntityId, ability: Ability },

    /// Finish the turn.
    EndTurn,
}

impl Action {
    /// Check if this action hands the turn over.
    #[must_use]
    pub fn ends_turn(&self) -> bool {
        matches!(self, Action::EndTurn)
    }

    /// Short name for logging.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Action::Deploy { .. } => "deploy",
            Action::Move { .. } => "move",
            Action::Attack { .. } => "attack",
            Action::PlayTactic { .. } => "play_tactic",
            Action::ActivateAbility { .. } => "activate_ability",
            Action::EndTurn => "end_turn",
        }
    }
}

/// A resolved action with metadata for history tracking.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The player who took this action.
    pub player: PlayerId,

    /// The action taken.
    pub action: Action,

    /// Turn number when action was taken.
    pub turn: u32,

    /// Sequence number within the turn (for ordering).
    pub sequence: u32,
}

impl ActionRecord {
    /// Create a new action record.
    #[must_use]
    pub fn new(player: PlayerId, action: Action, turn: u32, sequence: u32) -> Self {
        Self {
            player,
            action,
            turn,
            sequence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_kind() {
        assert_eq!(Action::EndTurn.kind(), "end_turn");
        assert_eq!(
            Action::Move { unit: EntityId(1), to: Position::new(0, 0) }.kind(),
            "move"
        );
    }

    #[test]
    fn test_action_equality() {
        let a1 = Action::Deploy { card: CardId::new(1), position: Some(4) };
        let a2 = Action::Deploy { card: CardId::new(1), position: Some(4) };
        let a3 = Action::Deploy { card: CardId::new(1), position: None };

        assert_eq!(a1, a2);
        assert_ne!(a1, a3);
    }

    #[test]
    fn test_action_record() {
        let action = Action::PlayTactic { card: CardId::new(9), target: Some(Position::new(1, 1)) };
        let record = ActionRecord::new(PlayerId::new(1), action.clone(), 3, 2);

        assert_eq!(record.player, PlayerId::new(1));
        assert_eq!(record.action, action);
        assert_eq!(record.turn, 3);
        assert_eq!(record.sequence, 2);
    }

    #[test]
    fn test_action_serialization() {
        let action = Action::Attack {
            attacker: EntityId(5),
            target: AttackTarget::Player,
        };
        let json = serde_json::to_string(&action).unwrap();
        let deserialized: Action = serde_json::from_str(&json).unwrap();

        assert_eq!(action, deserialized);
    }
}
