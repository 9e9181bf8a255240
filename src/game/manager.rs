//! Game Manager.
//!
//! `GameManager` owns one match: its `MatchContext` and `GameState`. The
//! action API acts for whoever's turn it is; `apply` lets a driver act for an
//! explicit player.
//!
//! ## Example
//!
//! ```
//! use grid_tactics::cards::{CardCatalog, CardId, UnitCard, UnitType};
//! use grid_tactics::core::{MatchConfig, PlayerMap};
//! use grid_tactics::game::{GameManager, MatchContext};
//!
//! let mut catalog = CardCatalog::new();
//! catalog.register(UnitCard::new(CardId::new(1), "Pikemen", 1, UnitType::Infantry, 2, 3)).unwrap();
//!
//! let context = MatchContext::new(catalog, MatchConfig::default());
//! let mut game = GameManager::new(context, &PlayerMap::with_value(vec![CardId::new(1); 10]));
//!
//! let pikes = game.deploy(CardId::new(1), None).unwrap();
//! assert!(game.state().board.position_of(pikes).is_some());
//! game.end_turn().unwrap();
//! ```

use crate::campaign::CampaignLevel;
use crate::cards::CardId;
use crate::core::{Action, ActionError, AttackTarget, EntityId, GameState, PlayerId, PlayerMap, Position};
use crate::effects::Ability;
use crate::events::GameEvent;
use crate::rules::{GameResult, RulesEngine};

use super::context::MatchContext;

/// One running match.
#[derive(Clone, Debug)]
pub struct GameManager {
    context: MatchContext,
    state: GameState,
}

impl GameManager {
    /// Start a match from two deck lists. Player 0 moves first.
    #[must_use]
    pub fn new(context: MatchContext, decks: &PlayerMap<Vec<CardId>>) -> Self {
        let mut state = context.new_state(decks);
        context.start_match(&mut state);
        Self { context, state }
    }

    /// Start a campaign level. The campaign player uses `player_deck`; the
    /// opponent uses the level's deck.
    #[must_use]
    pub fn from_campaign(context: MatchContext, level: &CampaignLevel, player_deck: Vec<CardId>) -> Self {
        let mut context = context.with_objectives(level.objectives().cloned());
        context.config = level.configure(context.config);

        let opponent_deck = level.opponent_deck.clone();
        let decks = PlayerMap::new(|p| if p.index() == 0 { player_deck.clone() } else { opponent_deck.clone() });

        let mut state = context.new_state(&decks);
        level.prepare(&mut state, &context.catalog);
        context.start_match(&mut state);
        tracing::info!(level = %level.name, "campaign level started");
        Self { context, state }
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn context(&self) -> &MatchContext {
        &self.context
    }

    #[must_use]
    pub fn active_player(&self) -> Option<PlayerId> {
        self.state.active_player()
    }

    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        self.context.is_terminal(&self.state)
    }

    /// Legal actions for the player to move.
    #[must_use]
    pub fn legal_actions(&self) -> Vec<Action> {
        match self.active_player() {
            Some(player) => self.context.legal_actions(&self.state, player),
            None => Vec::new(),
        }
    }

    /// Apply an action for a specific player.
    pub fn apply(&mut self, player: PlayerId, action: Action) -> Result<(), ActionError> {
        let result = self.context.apply_action(&mut self.state, player, &action);
        match &result {
            Ok(()) => tracing::debug!(%player, action = action.kind(), "action resolved"),
            Err(err) => tracing::debug!(%player, action = action.kind(), %err, "action rejected"),
        }
        result
    }

    /// Apply an action for the player to move.
    pub fn act(&mut self, action: Action) -> Result<(), ActionError> {
        let player = self.active_player().ok_or(ActionError::GameOver)?;
        self.apply(player, action)
    }

    // === Action API ===

    /// Deploy a unit or fortification. Returns the new occupant's handle.
    pub fn deploy(&mut self, card: CardId, position: Option<usize>) -> Result<EntityId, ActionError> {
        self.act(Action::Deploy { card, position })?;
        self.last_deployed().ok_or(ActionError::NoDeploymentSpace)
    }

    pub fn move_unit(&mut self, unit: EntityId, to: Position) -> Result<(), ActionError> {
        self.act(Action::Move { unit, to })
    }

    pub fn attack(&mut self, attacker: EntityId, target: AttackTarget) -> Result<(), ActionError> {
        self.act(Action::Attack { attacker, target })
    }

    pub fn play_tactic(&mut self, card: CardId, target: Option<Position>) -> Result<(), ActionError> {
        self.act(Action::PlayTactic { card, target })
    }

    pub fn activate_ability(&mut self, unit: EntityId, ability: Ability) -> Result<(), ActionError> {
        self.act(Action::ActivateAbility { unit, ability })
    }

    pub fn end_turn(&mut self) -> Result<(), ActionError> {
        self.act(Action::EndTurn)
    }

    /// Take all pending events, oldest first.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.drain_events()
    }

    fn last_deployed(&self) -> Option<EntityId> {
        self.state.events().iter().rev().find_map(|event| match event {
            GameEvent::UnitDeployed { entity, .. } => Some(*entity),
            _ => None,
        })
    }
}
