//! Tactic effects.
//!
//! A `TacticEffect` is what a tactic card does when played. Effects report
//! success as a `bool`; the card-play layer only charges mana and discards
//! the card when the effect succeeded, so an effect that returns false must
//! leave the state untouched.
//!
//! ## Area Effects
//!
//! `AreaDamage`, `AreaHeal` and `AttackBuff` hit every valid occupant within
//! a Chebyshev `radius` of the target cell, scanning row-major. They fail
//! when nothing valid is in the area.
//!
//! ## Compound
//!
//! A `Compound` applies its parts in order to a scratch copy of the state and
//! commits only if every part succeeded.

use serde::{Deserialize, Serialize};

use crate::board::Occupant;
use crate::cards::{FortType, FortificationCard};
use crate::core::{EntityId, GameState, PlayerId, Position};

/// The effect carried by a tactic card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TacticEffect {
    /// Set an enemy unit to 1 attack and 1 health.
    Weaken,

    /// Turn an enemy unit into a wall with at least `min_health` health.
    /// `None` uses the match's configured floor.
    Petrify { min_health: Option<i32> },

    /// Damage enemy occupants around the target.
    AreaDamage { amount: i32, radius: usize },

    /// Heal damaged friendly units around the target.
    AreaHeal { amount: i32, radius: usize },

    /// Raise the attack of friendly units around the target. A `duration`
    /// of zero makes the buff permanent.
    AttackBuff { amount: i32, duration: u32, radius: usize },

    /// All parts succeed or nothing happens.
    Compound(Vec<TacticEffect>),
}

impl TacticEffect {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            TacticEffect::Weaken => "Weaken",
            TacticEffect::Petrify { .. } => "Petrify",
            TacticEffect::AreaDamage { .. } => "Area Damage",
            TacticEffect::AreaHeal { .. } => "Area Heal",
            TacticEffect::AttackBuff { .. } => "Attack Buff",
            TacticEffect::Compound(_) => "Compound",
        }
    }

    #[must_use]
    pub fn description(&self) -> String {
        match self {
            TacticEffect::Weaken => "Reduce an enemy unit to 1 attack and 1 health.".to_string(),
            TacticEffect::Petrify { min_health: Some(floor) } => {
                format!("Turn an enemy unit into a wall with at least {} health.", floor)
            }
            TacticEffect::Petrify { min_health: None } => "Turn an enemy unit into a wall.".to_string(),
            TacticEffect::AreaDamage { amount, radius } => {
                format!("Deal {} damage to enemies within {} cells.", amount, radius)
            }
            TacticEffect::AreaHeal { amount, radius } => {
                format!("Heal friendly units within {} cells by {}.", radius, amount)
            }
            TacticEffect::AttackBuff { amount, duration: 0, radius } => {
                format!("Friendly units within {} cells gain +{} attack.", radius, amount)
            }
            TacticEffect::AttackBuff { amount, duration, radius } => format!(
                "Friendly units within {} cells gain +{} attack for {} turns.",
                radius, amount, duration
            ),
            TacticEffect::Compound(parts) => parts
                .iter()
                .map(TacticEffect::description)
                .collect::<Vec<_>>()
                .join(" "),
        }
    }

    /// Apply the effect for `player`, aimed at `target`.
    ///
    /// Returns true on success. On failure nothing has been mutated.
    pub fn apply(&self, player: PlayerId, state: &mut GameState, target: Option<Position>) -> bool {
        match self {
            TacticEffect::Weaken => {
                let Some(id) = enemy_unit_at(state, player, target) else {
                    return false;
                };
                state.clear_attack_modifiers(id);
                let Some(unit) = state.board.unit_mut(id) else {
                    return false;
                };
                unit.attack = 1;
                unit.health = 1;
                true
            }

            TacticEffect::Petrify { min_health } => {
                let Some(id) = enemy_unit_at(state, player, target) else {
                    return false;
                };
                let floor = min_health.unwrap_or(state.config.petrify_min_health);
                let Some((Occupant::Unit(unit), owner, pos)) = state.remove_occupant(id) else {
                    return false;
                };

                let health = unit.health.max(floor);
                let wall = FortificationCard::new(
                    unit.base.id,
                    format!("Petrified {}", unit.base.name),
                    unit.base.mana_cost,
                    FortType::Wall,
                    0,
                    health,
                );
                state.board.put_occupant(wall.into(), pos, owner).is_some()
            }

            TacticEffect::AreaDamage { amount, radius } => {
                let targets = area_targets(state, target, *radius, |state, id| {
                    state.board.owner_of(id) == Some(player.opponent())
                });
                if targets.is_empty() {
                    return false;
                }
                for id in targets {
                    state.damage_occupant(id, *amount);
                }
                true
            }

            TacticEffect::AreaHeal { amount, radius } => {
                let targets = area_targets(state, target, *radius, |state, id| {
                    state.board.owner_of(id) == Some(player)
                        && state.board.unit(id).is_some_and(|u| u.is_damaged())
                });
                if targets.is_empty() {
                    return false;
                }
                for id in targets {
                    if let Some(unit) = state.board.unit_mut(id) {
                        unit.heal(*amount);
                    }
                }
                true
            }

            TacticEffect::AttackBuff { amount, duration, radius } => {
                let targets = area_targets(state, target, *radius, |state, id| {
                    state.board.owner_of(id) == Some(player) && state.board.unit(id).is_some()
                });
                if targets.is_empty() {
                    return false;
                }
                for id in targets {
                    if let Some(unit) = state.board.unit_mut(id) {
                        unit.attack += amount;
                    }
                    if *duration > 0 {
                        state.timed_buffs.push_back(TimedBuff::new(id, player, *amount, *duration));
                    }
                }
                true
            }

            TacticEffect::Compound(parts) => {
                if parts.is_empty() {
                    return false;
                }
                let mut scratch = state.clone();
                for part in parts {
                    if !part.apply(player, &mut scratch, target) {
                        return false;
                    }
                }
                *state = scratch;
                true
            }
        }
    }
}

fn enemy_unit_at(state: &GameState, player: PlayerId, target: Option<Position>) -> Option<EntityId> {
    let id = state.board.entity_at(target?)?;
    state.board.unit(id)?;
    (state.board.owner_of(id)? != player).then_some(id)
}

fn area_targets(
    state: &GameState,
    center: Option<Position>,
    radius: usize,
    valid: impl Fn(&GameState, EntityId) -> bool,
) -> Vec<EntityId> {
    let Some(center) = center.filter(|&c| state.board.in_bounds(c)) else {
        return Vec::new();
    };
    state
        .board
        .entities_within(center, radius)
        .into_iter()
        .filter(|&id| valid(state, id))
        .collect()
}

/// A temporary attack bonus waiting to expire.
///
/// `turns_remaining` counts down at the start of each of the owner's turns;
/// the bonus is removed when it reaches zero.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimedBuff {
    pub target: EntityId,
    pub owner: PlayerId,
    pub amount: i32,
    pub turns_remaining: u32,
}

impl TimedBuff {
    #[must_use]
    pub fn new(target: EntityId, owner: PlayerId, amount: i32, duration: u32) -> Self {
        Self {
            target,
            owner,
            amount,
            turns_remaining: duration,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardId, UnitCard, UnitType};
    use crate::core::{MatchConfig, PlayerMap};

    const P0: PlayerId = PlayerId::new(0);
    const P1: PlayerId = PlayerId::new(1);

    fn empty_state() -> GameState {
        GameState::new(MatchConfig::default(), PlayerMap::with_value(im::Vector::new()))
    }

    fn put(state: &mut GameState, unit: UnitCard, pos: Position, owner: PlayerId) -> EntityId {
        state.board.put_occupant(unit.into(), pos, owner).unwrap()
    }

    fn grunt(attack: i32, health: i32) -> UnitCard {
        UnitCard::new(CardId::new(1), "Grunt", 1, UnitType::Infantry, attack, health)
    }

    #[test]
    fn test_weaken_enemy() {
        let mut state = empty_state();
        let id = put(&mut state, grunt(5, 5), Position::new(1, 1), P1);

        assert!(TacticEffect::Weaken.apply(P0, &mut state, Some(Position::new(1, 1))));
        let unit = state.board.unit(id).unwrap();
        assert_eq!((unit.attack, unit.health), (1, 1));
    }

    #[test]
    fn test_weaken_survives_buff_expiry() {
        let mut state = empty_state();
        let pos = Position::new(1, 1);
        let id = put(&mut state, grunt(2, 4), pos, P1);
        state.board.unit_mut(id).unwrap().attack += 2;
        state.timed_buffs.push_back(TimedBuff::new(id, P1, 2, 1));

        assert!(TacticEffect::Weaken.apply(P0, &mut state, Some(pos)));
        state.expire_buffs(P1);

        assert_eq!(state.board.unit(id).unwrap().attack, 1);
        assert!(state.timed_buffs.is_empty());
    }

    #[test]
    fn test_weaken_rejects_friendly_and_empty() {
        let mut state = empty_state();
        put(&mut state, grunt(5, 5), Position::new(4, 1), P0);

        assert!(!TacticEffect::Weaken.apply(P0, &mut state, Some(Position::new(4, 1))));
        assert!(!TacticEffect::Weaken.apply(P0, &mut state, Some(Position::new(2, 2))));
        assert!(!TacticEffect::Weaken.apply(P0, &mut state, None));
    }

    #[test]
    fn test_petrify_uses_floor() {
        let mut state = empty_state();
        let pos = Position::new(1, 2);
        let id = put(&mut state, grunt(4, 1), pos, P1);

        assert!(TacticEffect::Petrify { min_health: Some(4) }.apply(P0, &mut state, Some(pos)));

        assert!(state.board.occupant(id).is_none());
        let wall = state.board.occupant_at(pos).unwrap();
        assert_eq!(wall.fort_type(), Some(FortType::Wall));
        assert_eq!(wall.health(), 4);
        let new_id = state.board.entity_at(pos).unwrap();
        assert_eq!(state.board.owner_of(new_id), Some(P1));
    }

    #[test]
    fn test_petrify_keeps_higher_health() {
        let mut state = empty_state();
        let pos = Position::new(0, 0);
        put(&mut state, grunt(1, 7), pos, P1);

        assert!(TacticEffect::Petrify { min_health: None }.apply(P0, &mut state, Some(pos)));
        assert_eq!(state.board.occupant_at(pos).unwrap().health(), 7);
    }

    #[test]
    fn test_area_damage_hits_enemies_only() {
        let mut state = empty_state();
        let enemy_a = put(&mut state, grunt(1, 3), Position::new(2, 2), P1);
        let enemy_b = put(&mut state, grunt(1, 1), Position::new(3, 3), P1);
        let friend = put(&mut state, grunt(1, 3), Position::new(2, 3), P0);
        let far = put(&mut state, grunt(1, 3), Position::new(0, 0), P1);

        let effect = TacticEffect::AreaDamage { amount: 2, radius: 1 };
        assert!(effect.apply(P0, &mut state, Some(Position::new(2, 2))));

        assert_eq!(state.board.unit(enemy_a).unwrap().health, 1);
        assert!(state.board.occupant(enemy_b).is_none());
        assert_eq!(state.board.unit(friend).unwrap().health, 3);
        assert_eq!(state.board.unit(far).unwrap().health, 3);
    }

    #[test]
    fn test_area_damage_fails_on_empty_area() {
        let mut state = empty_state();
        let effect = TacticEffect::AreaDamage { amount: 2, radius: 1 };
        assert!(!effect.apply(P0, &mut state, Some(Position::new(2, 2))));
    }

    #[test]
    fn test_area_heal_clamps() {
        let mut state = empty_state();
        let id = put(&mut state, grunt(1, 5), Position::new(4, 4), P0);
        state.board.unit_mut(id).unwrap().health = 4;

        let effect = TacticEffect::AreaHeal { amount: 3, radius: 0 };
        assert!(effect.apply(P0, &mut state, Some(Position::new(4, 4))));
        assert_eq!(state.board.unit(id).unwrap().health, 5);

        // Nobody damaged any more.
        assert!(!effect.apply(P0, &mut state, Some(Position::new(4, 4))));
    }

    #[test]
    fn test_attack_buff_registers_timer() {
        let mut state = empty_state();
        let id = put(&mut state, grunt(2, 2), Position::new(4, 4), P0);

        let effect = TacticEffect::AttackBuff { amount: 2, duration: 1, radius: 1 };
        assert!(effect.apply(P0, &mut state, Some(Position::new(5, 5))));

        assert_eq!(state.board.unit(id).unwrap().attack, 4);
        assert_eq!(state.timed_buffs.len(), 1);
        assert_eq!(state.timed_buffs[0], TimedBuff::new(id, P0, 2, 1));
    }

    #[test]
    fn test_compound_all_or_nothing() {
        let mut state = empty_state();
        let pos = Position::new(1, 1);
        let id = put(&mut state, grunt(5, 5), pos, P1);

        let failing = TacticEffect::Compound(vec![
            TacticEffect::Weaken,
            TacticEffect::AreaHeal { amount: 1, radius: 0 },
        ]);
        assert!(!failing.apply(P0, &mut state, Some(pos)));
        assert_eq!(state.board.unit(id).unwrap().attack, 5);

        let passing = TacticEffect::Compound(vec![
            TacticEffect::Weaken,
            TacticEffect::AreaDamage { amount: 1, radius: 0 },
        ]);
        assert!(passing.apply(P0, &mut state, Some(pos)));
        assert!(state.board.occupant(id).is_none());
    }

    #[test]
    fn test_descriptions() {
        assert_eq!(TacticEffect::Weaken.name(), "Weaken");
        let buff = TacticEffect::AttackBuff { amount: 1, duration: 2, radius: 1 };
        assert!(buff.description().contains("2 turns"));
    }
}
