//! Skirmish driver
//!
//! Plays a random-vs-random match on the standard board and prints the
//! resulting events. Set `RUST_LOG=grid_tactics=debug` for per-action logs.

use clap::Parser;

use grid_tactics::cards::{
    CardBase, CardCatalog, CardId, FortType, FortificationCard, TacticType, TargetType, UnitCard, UnitEra, UnitType,
};
use grid_tactics::core::{GameRng, MatchConfig, PlayerId, PlayerMap};
use grid_tactics::effects::{Ability, EffectDescriptor};
use grid_tactics::game::{GameManager, MatchContext};
use grid_tactics::rules::GameResult;

/// Random-vs-random skirmish
#[derive(Parser, Debug)]
#[command(name = "skirmish")]
#[command(about = "Play a random grid tactics match and print the event log")]
struct Args {
    /// Random seed for deterministic runs
    #[arg(long, default_value_t = 7)]
    seed: u64,

    /// Stop after this many turns
    #[arg(long, default_value_t = 60)]
    max_turns: u32,

    /// Shuffle decks before the opening draw
    #[arg(long)]
    shuffle: bool,

    /// Print every event, not just the summary
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn build_context(config: MatchConfig) -> Result<MatchContext, grid_tactics::CatalogError> {
    let mut catalog = CardCatalog::new();
    catalog.register(UnitCard::new(CardId::new(1), "Pikemen", 1, UnitType::Infantry, 2, 3).with_era(UnitEra::Medieval))?;
    catalog.register(
        UnitCard::new(CardId::new(2), "Hussars", 3, UnitType::Cavalry, 3, 2)
            .with_ability(Ability::Charge)
            .with_era(UnitEra::Napoleonic),
    )?;
    catalog.register(
        UnitCard::new(CardId::new(3), "Fusiliers", 2, UnitType::Musket, 2, 2)
            .with_ability(Ability::Bayonet)
            .with_era(UnitEra::Napoleonic),
    )?;
    catalog.register(UnitCard::new(CardId::new(4), "Longbowmen", 2, UnitType::Missile, 2, 2))?;
    catalog.register(UnitCard::new(CardId::new(5), "Bombard", 4, UnitType::Artillery, 4, 2))?;
    catalog.register(
        UnitCard::new(CardId::new(6), "Shield Wall", 2, UnitType::Infantry, 1, 5).with_ability(Ability::Taunt),
    )?;
    catalog.register(FortificationCard::new(CardId::new(7), "Palisade", 1, FortType::Wall, 0, 5))?;
    catalog.register(FortificationCard::new(CardId::new(8), "Watchtower", 3, FortType::Tower, 2, 4))?;

    let context = MatchContext::new(catalog, config);
    let tactics = [
        context.build_tactic(
            CardBase::new(CardId::new(9), "Cannonade", 3),
            TacticType::Damage,
            TargetType::Board,
            &[EffectDescriptor::new("AREA_DAMAGE", 2).with_radius(1)],
        )?,
        context.build_tactic(
            CardBase::new(CardId::new(10), "Rally", 2),
            TacticType::Buff,
            TargetType::Friendly,
            &[EffectDescriptor::new("ATTACK_BUFF", 2).with_duration(1).with_radius(1)],
        )?,
        context.build_tactic(
            CardBase::new(CardId::new(11), "Medusa's Gaze", 4),
            TacticType::Transform,
            TargetType::Enemy,
            &[EffectDescriptor::new("PETRIFY", 0)],
        )?,
        context.build_tactic(
            CardBase::new(CardId::new(12), "Sap and Storm", 5),
            TacticType::Debuff,
            TargetType::Enemy,
            &[EffectDescriptor::new("WEAKEN", 0), EffectDescriptor::new("AREA_DAMAGE", 1).with_radius(0)],
        )?,
    ];

    let mut context = context;
    for tactic in tactics {
        context.catalog.register(tactic)?;
    }
    Ok(context)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();

    let mut config = MatchConfig::default().with_seed(args.seed);
    if args.shuffle {
        config = config.with_shuffle(args.seed);
    }
    let context = build_context(config)?;

    let deck: Vec<CardId> = (1..=12).chain(1..=8).map(CardId::new).collect();
    let mut game = GameManager::new(context, &PlayerMap::with_value(deck));
    let mut driver = GameRng::new(args.seed.wrapping_add(1));

    while game.result().is_none() && game.state().turn_number() <= args.max_turns {
        let actions = game.legal_actions();
        let Some(action) = driver.choose(&actions).cloned() else {
            break;
        };
        game.act(action)?;

        for event in game.drain_events() {
            if args.verbose {
                println!("{:>4}  {:?}", game.state().turn_number(), event);
            }
        }
    }

    let state = game.state();
    println!("turns played: {}", state.turn_number());
    for player in PlayerId::both() {
        let p = state.player(player);
        println!(
            "{}: health {}, units on board {}, losses {}",
            p.name,
            p.health(),
            state.board.entities_of(player).len(),
            state.casualties[player]
        );
    }
    match game.result() {
        Some(GameResult::Winner(player)) => println!("winner: {}", player),
        Some(GameResult::Draw) => println!("draw"),
        None => println!("no result after {} turns", args.max_turns),
    }
    Ok(())
}
