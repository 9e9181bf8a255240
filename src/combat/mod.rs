//! Combat Resolver: attack ranges, type counters, taunt and damage.

pub mod resolver;

pub use resolver::{
    attack_damage, attack_range, can_assault_player, candidate_targets, counter_multiplier, legal_targets,
    resolve_attack, validate_attack, AttackOutcome,
};
