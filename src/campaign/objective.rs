//! Campaign objectives.
//!
//! An objective is checked at the end of every turn. When it holds for the
//! campaign player, that player wins immediately.

use serde::{Deserialize, Serialize};

use super::level::CAMPAIGN_PLAYER;
use crate::core::{GameState, PlayerId, Position};
use crate::rules::GameResult;

/// A win condition evaluated against the match state.
pub trait CompletionCheck {
    /// Check whether `player` has met the objective.
    fn evaluate(&self, state: &GameState, player: PlayerId) -> bool;

    /// Short description for display.
    fn describe(&self) -> String;
}

/// Start this many turns.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurviveTurns {
    pub turns: u32,
}

impl CompletionCheck for SurviveTurns {
    fn evaluate(&self, state: &GameState, player: PlayerId) -> bool {
        let me = state.player(player);
        !me.is_defeated() && me.turns_started() >= self.turns
    }

    fn describe(&self) -> String {
        format!("Survive {} turns", self.turns)
    }
}

/// Destroy this many enemy units or fortifications.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EliminateEnemyUnits {
    pub count: u32,
}

impl CompletionCheck for EliminateEnemyUnits {
    fn evaluate(&self, state: &GameState, player: PlayerId) -> bool {
        state.casualties[player.opponent()] >= self.count
    }

    fn describe(&self) -> String {
        format!("Destroy {} enemy units", self.count)
    }
}

/// Occupy every listed cell with a friendly unit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoldPositions {
    pub positions: Vec<Position>,
}

impl CompletionCheck for HoldPositions {
    fn evaluate(&self, state: &GameState, player: PlayerId) -> bool {
        !self.positions.is_empty()
            && self.positions.iter().all(|&pos| {
                state
                    .board
                    .entity_at(pos)
                    .is_some_and(|id| state.board.unit(id).is_some() && state.board.owner_of(id) == Some(player))
            })
    }

    fn describe(&self) -> String {
        let cells: Vec<_> = self.positions.iter().map(Position::to_string).collect();
        format!("Hold {}", cells.join(", "))
    }
}

/// Bring the opponent down to this much health or less.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpponentHealthAtMost {
    pub health: i32,
}

impl CompletionCheck for OpponentHealthAtMost {
    fn evaluate(&self, state: &GameState, player: PlayerId) -> bool {
        state.player(player.opponent()).health() <= self.health
    }

    fn describe(&self) -> String {
        format!("Reduce the enemy to {} health", self.health)
    }
}

/// Serializable choice of objective.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Objective {
    SurviveTurns(SurviveTurns),
    EliminateEnemyUnits(EliminateEnemyUnits),
    HoldPositions(HoldPositions),
    OpponentHealthAtMost(OpponentHealthAtMost),
}

impl Objective {
    fn check(&self) -> &dyn CompletionCheck {
        match self {
            Objective::SurviveTurns(c) => c,
            Objective::EliminateEnemyUnits(c) => c,
            Objective::HoldPositions(c) => c,
            Objective::OpponentHealthAtMost(c) => c,
        }
    }
}

impl CompletionCheck for Objective {
    fn evaluate(&self, state: &GameState, player: PlayerId) -> bool {
        self.check().evaluate(state, player)
    }

    fn describe(&self) -> String {
        self.check().describe()
    }
}

/// Which way a campaign objective ends the match.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectiveOutcome {
    /// The campaign player wins when they meet the objective.
    #[default]
    Victory,
    /// The campaign player loses when the opponent meets the objective.
    Defeat,
}

/// An objective attached to a campaign level.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignObjective {
    pub objective: Objective,
    #[serde(default)]
    pub outcome: ObjectiveOutcome,
}

impl CampaignObjective {
    #[must_use]
    pub fn victory(objective: Objective) -> Self {
        Self {
            objective,
            outcome: ObjectiveOutcome::Victory,
        }
    }

    #[must_use]
    pub fn defeat(objective: Objective) -> Self {
        Self {
            objective,
            outcome: ObjectiveOutcome::Defeat,
        }
    }

    /// The player whose progress is checked, and who wins on completion.
    #[must_use]
    pub fn subject(&self) -> PlayerId {
        match self.outcome {
            ObjectiveOutcome::Victory => CAMPAIGN_PLAYER,
            ObjectiveOutcome::Defeat => CAMPAIGN_PLAYER.opponent(),
        }
    }

    /// The match result if the objective is met now.
    #[must_use]
    pub fn resolve(&self, state: &GameState) -> Option<GameResult> {
        let subject = self.subject();
        self.objective
            .evaluate(state, subject)
            .then_some(GameResult::Winner(subject))
    }
}
