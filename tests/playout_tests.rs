//! Random playouts through the `RulesEngine` trait.
//!
//! Every enumerated legal action must apply cleanly, board invariants must
//! hold after each step, and every match must finish.

use grid_tactics::cards::{
    Card, CardCatalog, CardId, FortType, FortificationCard, TacticCard, TacticType, TargetType, UnitCard, UnitType,
};
use grid_tactics::core::{GameRng, GameState, MatchConfig, PlayerId, PlayerMap};
use grid_tactics::effects::{Ability, TacticEffect};
use grid_tactics::game::MatchContext;
use grid_tactics::rules::{GameResult, RulesEngine};

const TURN_LIMIT: u32 = 200;

fn catalog() -> CardCatalog {
    let cards: [Card; 11] = [
        UnitCard::new(CardId::new(1), "Pikemen", 1, UnitType::Infantry, 2, 3).into(),
        UnitCard::new(CardId::new(2), "Hussars", 2, UnitType::Cavalry, 3, 2)
            .with_ability(Ability::Charge)
            .into(),
        UnitCard::new(CardId::new(3), "Fusiliers", 2, UnitType::Musket, 2, 2)
            .with_ability(Ability::Bayonet)
            .into(),
        UnitCard::new(CardId::new(4), "Archers", 2, UnitType::Missile, 2, 2).into(),
        UnitCard::new(CardId::new(5), "Culverin", 3, UnitType::Artillery, 3, 2).into(),
        UnitCard::new(CardId::new(6), "Hoplites", 2, UnitType::Infantry, 1, 4)
            .with_ability(Ability::Taunt)
            .into(),
        FortificationCard::new(CardId::new(7), "Palisade", 1, FortType::Wall, 0, 4).into(),
        FortificationCard::new(CardId::new(8), "Watchtower", 2, FortType::Tower, 2, 3).into(),
        TacticCard::new(
            CardId::new(9),
            "Volley",
            2,
            TacticType::Damage,
            TargetType::Board,
            TacticEffect::AreaDamage { amount: 2, radius: 1 },
        )
        .into(),
        TacticCard::new(
            CardId::new(10),
            "Stone Curse",
            3,
            TacticType::Transform,
            TargetType::Enemy,
            TacticEffect::Petrify { min_health: None },
        )
        .into(),
        TacticCard::new(
            CardId::new(11),
            "Drums",
            1,
            TacticType::Buff,
            TargetType::Friendly,
            TacticEffect::AttackBuff { amount: 1, duration: 1, radius: 1 },
        )
        .into(),
    ];
    CardCatalog::from_cards(cards).unwrap()
}

fn deck() -> Vec<CardId> {
    (1..=11).chain(1..=9).map(CardId::new).collect()
}

fn check_invariants(state: &GameState) {
    for player in PlayerId::both() {
        let p = state.player(player);
        assert!(p.current_mana() >= 0 && p.current_mana() <= p.max_mana());
    }
    for (pos, id, occupant) in state.board.iter() {
        assert!(occupant.health() > 0, "{} at {} should have been removed", occupant.name(), pos);
        assert_eq!(state.board.position_of(id), Some(pos));
        assert!(state.board.owner_of(id).is_some());
    }
}

/// Play random legal actions until the match ends. Returns the result and
/// the number of actions taken.
fn playout(seed: u64) -> (GameResult, usize, GameState) {
    let config = MatchConfig::default().with_shuffle(seed);
    let context = MatchContext::new(catalog(), config);
    let mut state = context.new_state(&PlayerMap::with_value(deck()));
    context.start_match(&mut state);
    let mut driver = GameRng::new(seed ^ 0x5eed);
    let mut steps = 0;

    while context.is_terminal(&state).is_none() {
        assert!(state.turn_number() <= TURN_LIMIT, "seed {} did not finish", seed);
        let player = state.active_player().unwrap();
        let actions = context.legal_actions(&state, player);
        assert!(!actions.is_empty());

        let action = driver.choose(&actions).cloned().unwrap();
        context
            .apply_action(&mut state, player, &action)
            .unwrap_or_else(|e| panic!("legal action {:?} rejected: {}", action, e));
        check_invariants(&state);
        state.drain_events();
        steps += 1;
    }

    let result = context.is_terminal(&state).unwrap();
    (result, steps, state)
}

/// Random playouts reach a result without any legal action failing.
#[test]
fn test_game_to_completion() {
    for seed in 0..12 {
        let (result, steps, state) = playout(seed);
        assert!(steps > 0);
        assert!(state.is_over());
        match result {
            GameResult::Winner(winner) => {
                assert!(!state.player(winner).is_defeated());
                assert!(state.player(winner.opponent()).is_defeated());
            }
            GameResult::Draw => {
                assert!(PlayerId::both().all(|p| state.player(p).is_defeated()));
            }
        }
    }
}

/// The same seed replays the same match.
#[test]
fn test_playout_deterministic() {
    let (first, first_steps, first_state) = playout(99);
    let (second, second_steps, second_state) = playout(99);

    assert_eq!(first, second);
    assert_eq!(first_steps, second_steps);
    assert_eq!(first_state.history(), second_state.history());
}

/// Legal actions never include anything for the waiting player.
#[test]
fn test_waiting_player_has_no_actions() {
    let context = MatchContext::new(catalog(), MatchConfig::default());
    let mut state = context.new_state(&PlayerMap::with_value(deck()));
    context.start_match(&mut state);

    assert!(context.legal_actions(&state, PlayerId::new(1)).is_empty());
    let actions = context.legal_actions(&state, PlayerId::new(0));
    assert!(actions.iter().all(|a| context.is_legal(&state, PlayerId::new(0), a)));
}
