//! Tactic cards.

use serde::{Deserialize, Serialize};

use super::definition::{CardBase, CardId};
use crate::effects::TacticEffect;

/// Broad classification of a tactic, used for display and filtering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TacticType {
    Buff,
    Debuff,
    Damage,
    Heal,
    Transform,
}

/// What a tactic may be aimed at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetType {
    /// No target position.
    None,
    /// An occupant owned by the caster.
    Friendly,
    /// An occupant owned by the opponent.
    Enemy,
    /// Any occupant.
    Any,
    /// Any cell on the board, occupied or not.
    Board,
}

impl TargetType {
    /// Check if a target position must be supplied.
    #[must_use]
    pub fn needs_target(self) -> bool {
        self != TargetType::None
    }
}

/// A card whose play invokes an effect.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TacticCard {
    pub base: CardBase,
    pub tactic_type: TacticType,
    pub target_type: TargetType,
    pub effect: TacticEffect,
}

impl TacticCard {
    #[must_use]
    pub fn new(
        id: CardId,
        name: impl Into<String>,
        mana_cost: i32,
        tactic_type: TacticType,
        target_type: TargetType,
        effect: TacticEffect,
    ) -> Self {
        Self {
            base: CardBase::new(id, name, mana_cost),
            tactic_type,
            target_type,
            effect,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.base.description = description.into();
        self
    }
}
