//! Board occupants.
//!
//! A cell holds either a unit or a fortification, never both. `Occupant`
//! exposes the combat-facing view both kinds share.

use serde::{Deserialize, Serialize};

use crate::cards::{CardId, FortType, FortificationCard, UnitCard, UnitType};

/// A unit or fortification instance placed on the board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Occupant {
    Unit(UnitCard),
    Fortification(FortificationCard),
}

impl Occupant {
    #[must_use]
    pub fn card_id(&self) -> CardId {
        match self {
            Occupant::Unit(unit) => unit.base.id,
            Occupant::Fortification(fort) => fort.base.id,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Occupant::Unit(unit) => &unit.base.name,
            Occupant::Fortification(fort) => &fort.base.name,
        }
    }

    #[must_use]
    pub fn attack(&self) -> i32 {
        match self {
            Occupant::Unit(unit) => unit.attack,
            Occupant::Fortification(fort) => fort.attack,
        }
    }

    #[must_use]
    pub fn health(&self) -> i32 {
        match self {
            Occupant::Unit(unit) => unit.health,
            Occupant::Fortification(fort) => fort.health,
        }
    }

    #[must_use]
    pub fn can_attack(&self) -> bool {
        match self {
            Occupant::Unit(unit) => unit.can_attack_this_turn,
            Occupant::Fortification(fort) => fort.can_attack_this_turn,
        }
    }

    pub fn set_can_attack(&mut self, value: bool) {
        match self {
            Occupant::Unit(unit) => unit.can_attack_this_turn = value,
            Occupant::Fortification(fort) => fort.can_attack_this_turn = value,
        }
    }

    /// Taunt is a unit-only flag.
    #[must_use]
    pub fn has_taunt(&self) -> bool {
        matches!(self, Occupant::Unit(unit) if unit.has_taunt)
    }

    /// Reduce health. Returns true if the occupant is destroyed.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        match self {
            Occupant::Unit(unit) => unit.take_damage(amount),
            Occupant::Fortification(fort) => fort.take_damage(amount),
        }
    }

    #[must_use]
    pub fn is_unit(&self) -> bool {
        matches!(self, Occupant::Unit(_))
    }

    #[must_use]
    pub fn as_unit(&self) -> Option<&UnitCard> {
        match self {
            Occupant::Unit(unit) => Some(unit),
            Occupant::Fortification(_) => None,
        }
    }

    pub fn as_unit_mut(&mut self) -> Option<&mut UnitCard> {
        match self {
            Occupant::Unit(unit) => Some(unit),
            Occupant::Fortification(_) => None,
        }
    }

    #[must_use]
    pub fn as_fortification(&self) -> Option<&FortificationCard> {
        match self {
            Occupant::Fortification(fort) => Some(fort),
            Occupant::Unit(_) => None,
        }
    }

    /// Unit type, if this is a unit.
    #[must_use]
    pub fn unit_type(&self) -> Option<UnitType> {
        self.as_unit().map(|u| u.unit_type)
    }

    /// Fortification type, if this is a fortification.
    #[must_use]
    pub fn fort_type(&self) -> Option<FortType> {
        self.as_fortification().map(|f| f.fort_type)
    }
}

impl From<UnitCard> for Occupant {
    fn from(unit: UnitCard) -> Self {
        Occupant::Unit(unit)
    }
}

impl From<FortificationCard> for Occupant {
    fn from(fort: FortificationCard) -> Self {
        Occupant::Fortification(fort)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_view() {
        let mut occupant: Occupant =
            UnitCard::new(CardId::new(1), "Hoplites", 2, UnitType::Infantry, 2, 4).into();

        assert!(occupant.is_unit());
        assert_eq!(occupant.unit_type(), Some(UnitType::Infantry));
        assert_eq!(occupant.fort_type(), None);
        assert!(!occupant.can_attack());

        occupant.set_can_attack(true);
        assert!(occupant.can_attack());
        assert!(!occupant.take_damage(3));
        assert_eq!(occupant.health(), 1);
    }

    #[test]
    fn test_fortification_has_no_taunt() {
        let occupant: Occupant =
            FortificationCard::new(CardId::new(2), "Bastion", 3, FortType::Tower, 1, 8).into();

        assert!(!occupant.is_unit());
        assert!(!occupant.has_taunt());
        assert_eq!(occupant.fort_type(), Some(FortType::Tower));
    }
}
