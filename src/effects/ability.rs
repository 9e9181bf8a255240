//! Unit abilities.
//!
//! Passive abilities (`Charge`, `Taunt`) are applied once when the unit is
//! deployed. Activated abilities (`Bayonet`) are used through
//! `Action::ActivateAbility` and consume the unit's move for the turn.

use serde::{Deserialize, Serialize};

use crate::cards::UnitType;
use crate::core::{EntityId, GameState};

/// A unit ability.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ability {
    /// May attack on the turn it is deployed.
    Charge,
    /// Musket only: fix bayonets and fight as infantry.
    Bayonet,
    /// Adjacent enemies must attack this unit first.
    Taunt,
}

impl Ability {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Ability::Charge => "Charge",
            Ability::Bayonet => "Bayonet",
            Ability::Taunt => "Taunt",
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Ability::Charge => "Can attack the turn it is deployed.",
            Ability::Bayonet => "Becomes infantry. Cannot attack or move again this turn.",
            Ability::Taunt => "Adjacent enemies must target this unit.",
        }
    }

    /// Passive abilities apply on deployment rather than on activation.
    #[must_use]
    pub fn is_passive(self) -> bool {
        matches!(self, Ability::Charge | Ability::Taunt)
    }

    /// Apply the ability to a unit on the board.
    ///
    /// Returns false with no mutation if the handle is not a unit or the
    /// ability does not apply to it.
    pub fn apply(self, state: &mut GameState, unit: EntityId) -> bool {
        match self {
            Ability::Charge => {
                let Some(card) = state.board.unit_mut(unit) else {
                    return false;
                };
                card.has_charge = true;
                card.can_attack_this_turn = true;
                true
            }
            Ability::Taunt => {
                let Some(card) = state.board.unit_mut(unit) else {
                    return false;
                };
                card.has_taunt = true;
                true
            }
            Ability::Bayonet => {
                if state.movement.has_moved(unit) {
                    return false;
                }
                let Some(card) = state.board.unit_mut(unit) else {
                    return false;
                };
                if card.unit_type != UnitType::Musket {
                    return false;
                }
                card.unit_type = UnitType::Infantry;
                card.can_attack_this_turn = false;
                state.movement.mark_moved(unit);
                true
            }
        }
    }
}

impl std::fmt::Display for Ability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
