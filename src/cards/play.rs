//! Card play resolution.
//!
//! Playing a card is atomic. Every check runs before anything is mutated, so
//! a rejected play leaves mana, hand and board exactly as they were. On
//! success the card's mana cost is deducted, the card leaves the hand, and
//! a fresh copy of the template enters the board (or the tactic's effect
//! resolves).

use super::fortification::FortificationCard;
use super::tactic::{TacticCard, TargetType};
use super::unit::UnitCard;
use crate::board::Occupant;
use crate::core::{ActionError, EntityId, GameState, PlayerId, Position};
use crate::events::GameEvent;

/// Deploy a unit from hand.
///
/// `position` is a row-major linear index; `None` picks the first empty
/// cell of the player's deployment zone. The placed unit gets its passive
/// abilities and may attack this turn only if it has charge.
pub fn play_unit(
    state: &mut GameState,
    player: PlayerId,
    card: &UnitCard,
    position: Option<usize>,
) -> Result<EntityId, ActionError> {
    let pos = check_deploy(state, player, card.base.id, card.base.mana_cost, position)?;

    let id = commit_deploy(state, player, card.base.id, card.base.mana_cost, card.clone().into(), pos)?;
    state.apply_passive_abilities(id);
    if let Some(unit) = state.board.unit_mut(id) {
        unit.can_attack_this_turn = unit.has_charge;
    }
    Ok(id)
}

/// Deploy a fortification from hand. Fortifications are never ready to
/// attack on the turn they arrive.
pub fn play_fortification(
    state: &mut GameState,
    player: PlayerId,
    card: &FortificationCard,
    position: Option<usize>,
) -> Result<EntityId, ActionError> {
    let pos = check_deploy(state, player, card.base.id, card.base.mana_cost, position)?;

    let mut fort = card.clone();
    fort.can_attack_this_turn = false;
    commit_deploy(state, player, card.base.id, card.base.mana_cost, fort.into(), pos)
}

/// Play a tactic from hand.
///
/// The target must match the card's `target_type`. Mana and hand change only
/// if the effect reports success.
pub fn play_tactic(
    state: &mut GameState,
    player: PlayerId,
    card: &TacticCard,
    target: Option<Position>,
) -> Result<(), ActionError> {
    let id = card.base.id;
    check_hand_and_mana(state, player, id, card.base.mana_cost)?;
    check_tactic_target(state, player, card.target_type, target)?;

    if !card.effect.apply(player, state, target) {
        return Err(ActionError::EffectFailed);
    }

    let paid = state.player_mut(player).spend_mana(card.base.mana_cost);
    let discarded = state.player_mut(player).remove_from_hand(id);
    debug_assert!(paid && discarded);

    tracing::debug!(%player, card = %id, effect = card.effect.name(), ?target, "tactic played");
    state.emit(GameEvent::TacticPlayed {
        player,
        card: id,
        target,
    });
    Ok(())
}

fn check_hand_and_mana(
    state: &GameState,
    player: PlayerId,
    card: crate::cards::CardId,
    cost: i32,
) -> Result<(), ActionError> {
    let owner = state.player(player);
    if !owner.has_in_hand(card) {
        return Err(ActionError::CardNotInHand(card));
    }
    if !owner.can_afford(cost) {
        return Err(ActionError::InsufficientMana {
            required: cost,
            available: owner.current_mana(),
        });
    }
    Ok(())
}

fn check_deploy(
    state: &GameState,
    player: PlayerId,
    card: crate::cards::CardId,
    cost: i32,
    position: Option<usize>,
) -> Result<Position, ActionError> {
    check_hand_and_mana(state, player, card, cost)?;

    let Some(index) = position else {
        return state
            .board
            .first_empty_in_deployment_zone(player)
            .ok_or(ActionError::NoDeploymentSpace);
    };

    let pos = state
        .board
        .position_from_linear(index)
        .ok_or_else(|| ActionError::OutOfBounds(Position::from_linear(index, state.board.columns())))?;
    if !state.board.is_position_empty(pos) {
        return Err(ActionError::PositionOccupied(pos));
    }
    if !state.board.in_deployment_zone(player, pos) {
        return Err(ActionError::OutsideDeploymentZone(pos));
    }
    Ok(pos)
}

fn commit_deploy(
    state: &mut GameState,
    player: PlayerId,
    card: crate::cards::CardId,
    cost: i32,
    occupant: Occupant,
    pos: Position,
) -> Result<EntityId, ActionError> {
    let name = occupant.name().to_string();
    let placed = match occupant {
        Occupant::Unit(unit) => state.board.place_unit(unit, pos, player),
        Occupant::Fortification(fort) => state.board.place_fortification(fort, pos, player),
    };
    let id = placed.ok_or(ActionError::PositionOccupied(pos))?;

    let paid = state.player_mut(player).spend_mana(cost);
    let discarded = state.player_mut(player).remove_from_hand(card);
    debug_assert!(paid && discarded);

    tracing::debug!(%player, card = %card, %name, entity = %id, position = %pos, "deployed");
    state.emit(GameEvent::UnitDeployed {
        player,
        entity: id,
        card,
        position: pos,
    });
    Ok(id)
}

fn check_tactic_target(
    state: &GameState,
    player: PlayerId,
    target_type: TargetType,
    target: Option<Position>,
) -> Result<(), ActionError> {
    if !target_type.needs_target() {
        return Ok(());
    }
    let pos = target.ok_or(ActionError::TargetRequired)?;
    if !state.board.in_bounds(pos) {
        return Err(ActionError::OutOfBounds(pos));
    }

    let owner = state.board.entity_at(pos).and_then(|id| state.board.owner_of(id));
    let valid = match target_type {
        TargetType::None | TargetType::Board => true,
        TargetType::Any => owner.is_some(),
        TargetType::Friendly => owner == Some(player),
        TargetType::Enemy => owner == Some(player.opponent()),
    };
    if valid {
        Ok(())
    } else {
        Err(ActionError::InvalidTarget(pos))
    }
}
