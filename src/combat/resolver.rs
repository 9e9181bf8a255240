//! Attack resolution.
//!
//! Ranges are Chebyshev distances:
//!
//! | Attacker | Range |
//! |---|---|
//! | Infantry, Cavalry | 1 |
//! | Musket, Missile | 1..=2 |
//! | Artillery | 2..=3 |
//! | Tower | 1..=2 |
//! | Wall | never attacks |
//!
//! Counters double base damage: Cavalry against Missile or Artillery,
//! Infantry against Cavalry, Artillery against any fortification.

use std::ops::RangeInclusive;

use crate::board::Occupant;
use crate::cards::{FortType, UnitType};
use crate::core::{ActionError, AttackTarget, EntityId, GameState, PlayerId};
use crate::events::GameEvent;

const COUNTER_MULTIPLIER: i32 = 2;

/// What one attack did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AttackOutcome {
    pub damage: i32,
    pub countered: bool,
    pub destroyed: bool,
}

/// Attack range of an occupant, `None` if it can never attack.
#[must_use]
pub fn attack_range(occupant: &Occupant) -> Option<RangeInclusive<usize>> {
    match occupant {
        Occupant::Unit(unit) => Some(match unit.unit_type {
            UnitType::Infantry | UnitType::Cavalry => 1..=1,
            UnitType::Musket | UnitType::Missile => 1..=2,
            UnitType::Artillery => 2..=3,
        }),
        Occupant::Fortification(fort) => match fort.fort_type {
            FortType::Tower => Some(1..=2),
            FortType::Wall => None,
        },
    }
}

/// Damage multiplier from the type-counter table.
#[must_use]
pub fn counter_multiplier(attacker: &Occupant, defender: &Occupant) -> i32 {
    let Some(kind) = attacker.unit_type() else {
        return 1;
    };
    let countered = match (kind, defender) {
        (UnitType::Cavalry, Occupant::Unit(d)) => {
            matches!(d.unit_type, UnitType::Missile | UnitType::Artillery)
        }
        (UnitType::Infantry, Occupant::Unit(d)) => d.unit_type == UnitType::Cavalry,
        (UnitType::Artillery, Occupant::Fortification(_)) => true,
        _ => false,
    };
    if countered {
        COUNTER_MULTIPLIER
    } else {
        1
    }
}

/// Damage an attacker deals to a defender and whether a counter applied.
#[must_use]
pub fn attack_damage(attacker: &Occupant, defender: &Occupant) -> (i32, bool) {
    let multiplier = counter_multiplier(attacker, defender);
    (attacker.attack() * multiplier, multiplier > 1)
}

/// Check whether a unit stands in the opposing deployment zone.
#[must_use]
pub fn can_assault_player(state: &GameState, attacker: EntityId) -> bool {
    let (Some(owner), Some(pos)) = (state.board.owner_of(attacker), state.board.position_of(attacker)) else {
        return false;
    };
    state.board.unit(attacker).is_some() && state.board.in_deployment_zone(owner.opponent(), pos)
}

/// Every target within range, before the taunt rule, in row-major order.
/// A direct assault on the enemy player comes last.
#[must_use]
pub fn candidate_targets(state: &GameState, attacker: EntityId) -> Vec<AttackTarget> {
    let (Some(occupant), Some(owner), Some(from)) = (
        state.board.occupant(attacker),
        state.board.owner_of(attacker),
        state.board.position_of(attacker),
    ) else {
        return Vec::new();
    };
    let Some(range) = attack_range(occupant) else {
        return Vec::new();
    };

    let mut targets: Vec<_> = state
        .board
        .iter()
        .filter(|(pos, id, _)| state.board.owner_of(*id) == Some(owner.opponent()) && range.contains(&from.distance(*pos)))
        .map(|(_, id, _)| AttackTarget::Occupant(id))
        .collect();

    if can_assault_player(state, attacker) {
        targets.push(AttackTarget::Player);
    }
    targets
}

/// Targets an attacker may legally choose.
///
/// If any candidate is a taunt unit adjacent to the attacker, only those
/// taunt units are legal. Readiness (`can_attack_this_turn`) is not checked
/// here.
#[must_use]
pub fn legal_targets(state: &GameState, attacker: EntityId) -> Vec<AttackTarget> {
    let candidates = candidate_targets(state, attacker);
    let taunting = taunting_targets(state, attacker, &candidates);
    if taunting.is_empty() {
        candidates
    } else {
        taunting
    }
}

fn taunting_targets(state: &GameState, attacker: EntityId, candidates: &[AttackTarget]) -> Vec<AttackTarget> {
    let Some(from) = state.board.position_of(attacker) else {
        return Vec::new();
    };
    candidates
        .iter()
        .copied()
        .filter(|target| match target {
            AttackTarget::Occupant(id) => {
                state.board.occupant(*id).is_some_and(Occupant::has_taunt)
                    && state.board.position_of(*id).is_some_and(|pos| pos.distance(from) == 1)
            }
            AttackTarget::Player => false,
        })
        .collect()
}

/// Validate an attack without applying it.
pub fn validate_attack(
    state: &GameState,
    player: PlayerId,
    attacker: EntityId,
    target: AttackTarget,
) -> Result<(), ActionError> {
    let occupant = state.board.occupant(attacker).ok_or(ActionError::NoSuchOccupant(attacker))?;
    if state.board.owner_of(attacker) != Some(player) {
        return Err(ActionError::NotOwner(attacker));
    }
    if !occupant.can_attack() || attack_range(occupant).is_none() {
        return Err(ActionError::CannotAttack(attacker));
    }
    if let AttackTarget::Occupant(id) = target {
        let owner = state.board.owner_of(id).ok_or(ActionError::NoSuchOccupant(id))?;
        if owner == player {
            return Err(ActionError::FriendlyTarget);
        }
    }

    let candidates = candidate_targets(state, attacker);
    if !candidates.contains(&target) {
        return Err(ActionError::OutOfAttackRange);
    }
    let taunting = taunting_targets(state, attacker, &candidates);
    if !taunting.is_empty() && !taunting.contains(&target) {
        return Err(ActionError::TauntRedirect);
    }
    Ok(())
}

/// Resolve an attack: deal damage, consume the attacker's readiness and
/// remove the target if it dies.
pub fn resolve_attack(
    state: &mut GameState,
    player: PlayerId,
    attacker: EntityId,
    target: AttackTarget,
) -> Result<AttackOutcome, ActionError> {
    validate_attack(state, player, attacker, target)?;

    let attacking = state
        .board
        .occupant_mut(attacker)
        .ok_or(ActionError::NoSuchOccupant(attacker))?;
    attacking.set_can_attack(false);
    let attacking = attacking.clone();

    let outcome = match target {
        AttackTarget::Occupant(id) => {
            let defender = state.board.occupant(id).ok_or(ActionError::NoSuchOccupant(id))?;
            let (damage, countered) = attack_damage(&attacking, defender);
            state.emit(GameEvent::AttackResolved {
                attacker,
                target: Some(id),
                damage,
                countered,
            });
            let destroyed = state.damage_occupant(id, damage).unwrap_or(false);
            AttackOutcome {
                damage,
                countered,
                destroyed,
            }
        }
        AttackTarget::Player => {
            let damage = attacking.attack();
            state.emit(GameEvent::AttackResolved {
                attacker,
                target: None,
                damage,
                countered: false,
            });
            state.damage_player(player.opponent(), damage);
            AttackOutcome {
                damage,
                countered: false,
                destroyed: false,
            }
        }
    };

    tracing::debug!(
        entity = %attacker,
        ?target,
        damage = outcome.damage,
        countered = outcome.countered,
        destroyed = outcome.destroyed,
        "attack resolved"
    );
    Ok(outcome)
}
