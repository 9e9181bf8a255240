//! Property tests for the rules invariants.
//!
//! Mana and hand accounting on card plays, the counter table, and removal of
//! destroyed occupants.

use grid_tactics::board::Occupant;
use grid_tactics::cards::{play_unit, CardId, FortType, FortificationCard, UnitCard, UnitType};
use grid_tactics::combat::attack_damage;
use grid_tactics::core::{GameState, MatchConfig, PlayerId, PlayerMap, Position};
use im::Vector;
use proptest::prelude::*;

const P0: PlayerId = PlayerId::new(0);
const P1: PlayerId = PlayerId::new(1);
const CARD: CardId = CardId::new(7);

fn unit_type() -> impl Strategy<Value = UnitType> {
    prop_oneof![
        Just(UnitType::Infantry),
        Just(UnitType::Cavalry),
        Just(UnitType::Musket),
        Just(UnitType::Missile),
        Just(UnitType::Artillery),
    ]
}

fn fort_type() -> impl Strategy<Value = FortType> {
    prop_oneof![Just(FortType::Wall), Just(FortType::Tower)]
}

fn state_with_mana(mana: i32) -> GameState {
    let config = MatchConfig::default().with_starting_mana(mana);
    let mut state = GameState::new(config, PlayerMap::with_value(Vector::new()));
    state.player_mut(P0).start_turn_mana(1, 10);
    state
}

fn expected_counter(attacker: UnitType, defender: &Occupant) -> bool {
    match (attacker, defender) {
        (UnitType::Cavalry, Occupant::Unit(d)) => matches!(d.unit_type, UnitType::Missile | UnitType::Artillery),
        (UnitType::Infantry, Occupant::Unit(d)) => d.unit_type == UnitType::Cavalry,
        (UnitType::Artillery, Occupant::Fortification(_)) => true,
        _ => false,
    }
}

proptest! {
    /// A successful deploy costs exactly the card's mana and one hand card;
    /// a failed one leaves the player untouched.
    #[test]
    fn test_deploy_accounting(
        mana in 0..8i32,
        cost in 0..8i32,
        position in proptest::option::of(0..40usize),
        blocked in proptest::option::of(24..36usize),
    ) {
        let mut state = state_with_mana(mana);
        state.player_mut(P0).add_to_hand(CARD);
        if let Some(index) = blocked {
            let pos = Position::from_linear(index, 6);
            let wall = FortificationCard::new(CardId::new(99), "Stakes", 0, FortType::Wall, 0, 1);
            state.board.put_occupant(wall.into(), pos, P0);
        }
        let before = state.player(P0).clone();
        let occupants = state.board.len();

        let card = UnitCard::new(CARD, "Levy", cost, UnitType::Infantry, 1, 1);
        match play_unit(&mut state, P0, &card, position) {
            Ok(id) => {
                prop_assert_eq!(state.player(P0).current_mana(), before.current_mana() - cost);
                prop_assert_eq!(state.player(P0).hand().len(), before.hand().len() - 1);
                let pos = state.board.position_of(id).unwrap();
                prop_assert!(state.board.in_deployment_zone(P0, pos));
                prop_assert_eq!(state.board.len(), occupants + 1);
            }
            Err(_) => {
                prop_assert_eq!(state.player(P0), &before);
                prop_assert_eq!(state.board.len(), occupants);
            }
        }
    }

    /// Damage is base attack, doubled exactly when the counter table says so.
    #[test]
    fn test_counter_damage(
        attacker_type in unit_type(),
        defender_unit in unit_type(),
        defender_fort in proptest::option::of(fort_type()),
        attack in 0..10i32,
    ) {
        let attacker: Occupant = UnitCard::new(CardId::new(1), "A", 1, attacker_type, attack, 3).into();
        let defender: Occupant = match defender_fort {
            Some(kind) => FortificationCard::new(CardId::new(2), "F", 1, kind, 1, 5).into(),
            None => UnitCard::new(CardId::new(2), "D", 1, defender_unit, 1, 5).into(),
        };

        let (damage, countered) = attack_damage(&attacker, &defender);
        let expected = expected_counter(attacker_type, &defender);
        prop_assert_eq!(countered, expected);
        prop_assert_eq!(damage, if expected { attack * 2 } else { attack });
    }

    /// Nothing with health at or below zero stays on the board.
    #[test]
    fn test_dead_occupants_removed(
        health in 1..8i32,
        hits in proptest::collection::vec(0..4i32, 1..6),
    ) {
        let mut state = state_with_mana(0);
        let pos = Position::new(2, 2);
        let id = state
            .board
            .put_occupant(UnitCard::new(CARD, "Target", 1, UnitType::Infantry, 1, health).into(), pos, P1)
            .unwrap();

        let mut remaining = health;
        for amount in hits {
            match state.damage_occupant(id, amount) {
                Some(dead) => {
                    remaining -= amount;
                    prop_assert_eq!(dead, remaining <= 0);
                }
                None => prop_assert!(remaining <= 0),
            }
            match state.board.occupant(id) {
                Some(occupant) => prop_assert!(occupant.health() > 0),
                None => prop_assert!(state.board.is_position_empty(pos)),
            }
        }
        prop_assert_eq!(state.board.occupant(id).is_none(), remaining <= 0);
    }
}
