//! Campaign support: level descriptors, special rules and objectives.

pub mod level;
pub mod objective;

pub use level::{CampaignLevel, Placement, SpecialRule, CAMPAIGN_PLAYER};
pub use objective::{
    CampaignObjective, CompletionCheck, EliminateEnemyUnits, HoldPositions, Objective, ObjectiveOutcome,
    OpponentHealthAtMost, SurviveTurns,
};
