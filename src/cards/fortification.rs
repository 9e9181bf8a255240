//! Fortification cards.

use serde::{Deserialize, Serialize};

use super::definition::{CardBase, CardId};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FortType {
    Wall,
    Tower,
}

/// A non-moving board occupant.
///
/// Fortifications never move. `can_attack_this_turn` is never set by
/// deployment or turn start; only an effect can enable it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FortificationCard {
    pub base: CardBase,
    pub attack: i32,
    pub health: i32,
    pub max_health: i32,
    pub fort_type: FortType,
    pub can_attack_this_turn: bool,
}

impl FortificationCard {
    #[must_use]
    pub fn new(
        id: CardId,
        name: impl Into<String>,
        mana_cost: i32,
        fort_type: FortType,
        attack: i32,
        health: i32,
    ) -> Self {
        Self {
            base: CardBase::new(id, name, mana_cost),
            attack,
            health,
            max_health: health,
            fort_type,
            can_attack_this_turn: false,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.base.description = description.into();
        self
    }

    /// Reduce health. Returns true if the fortification is destroyed.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        self.health -= amount.max(0);
        self.health <= 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fortification_never_attacks_by_default() {
        let tower = FortificationCard::new(CardId::new(1), "Watchtower", 3, FortType::Tower, 2, 5);
        assert!(!tower.can_attack_this_turn);
        assert_eq!(tower.max_health, 5);
    }

    #[test]
    fn test_take_damage() {
        let mut wall = FortificationCard::new(CardId::new(2), "Stone Wall", 2, FortType::Wall, 0, 4);
        assert!(!wall.take_damage(3));
        assert!(wall.take_damage(1));
    }
}
