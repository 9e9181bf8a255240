//! Unit cards.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::definition::{CardBase, CardId};
use crate::effects::Ability;

/// Combat category of a unit. Drives attack range, movement and counters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitType {
    Infantry,
    Cavalry,
    Musket,
    Missile,
    Artillery,
}

/// Historical era, cosmetic to the rules.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitEra {
    #[default]
    Ancient,
    Medieval,
    Renaissance,
    Napoleonic,
}

/// A unit card. The same struct serves as catalog template and as the
/// board instance cloned from it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitCard {
    pub base: CardBase,
    pub attack: i32,
    pub health: i32,
    pub max_health: i32,
    pub unit_type: UnitType,
    pub unit_era: UnitEra,
    pub abilities: SmallVec<[Ability; 2]>,
    pub can_attack_this_turn: bool,
    pub has_charge: bool,
    pub has_taunt: bool,
}

impl UnitCard {
    /// Create a unit at full health with no abilities.
    #[must_use]
    pub fn new(
        id: CardId,
        name: impl Into<String>,
        mana_cost: i32,
        unit_type: UnitType,
        attack: i32,
        health: i32,
    ) -> Self {
        Self {
            base: CardBase::new(id, name, mana_cost),
            attack,
            health,
            max_health: health,
            unit_type,
            unit_era: UnitEra::default(),
            abilities: SmallVec::new(),
            can_attack_this_turn: false,
            has_charge: false,
            has_taunt: false,
        }
    }

    /// Add an ability (builder pattern).
    #[must_use]
    pub fn with_ability(mut self, ability: Ability) -> Self {
        if !self.abilities.contains(&ability) {
            self.abilities.push(ability);
        }
        self
    }

    #[must_use]
    pub fn with_era(mut self, era: UnitEra) -> Self {
        self.unit_era = era;
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.base.description = description.into();
        self
    }

    #[must_use]
    pub fn with_image(mut self, path: impl Into<String>) -> Self {
        self.base.image_path = path.into();
        self
    }

    #[must_use]
    pub fn has_ability(&self, ability: Ability) -> bool {
        self.abilities.contains(&ability)
    }

    /// Reduce health. Returns true if the unit is now dead.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        self.health -= amount.max(0);
        self.is_dead()
    }

    /// Restore health, never above `max_health`. Returns the amount healed.
    pub fn heal(&mut self, amount: i32) -> i32 {
        let before = self.health;
        self.health = (self.health + amount.max(0)).min(self.max_health);
        self.health - before
    }

    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    #[must_use]
    pub fn is_damaged(&self) -> bool {
        self.health < self.max_health
    }
}
