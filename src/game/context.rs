//! Per-match rules context.
//!
//! `MatchContext` bundles everything a match reads but never mutates: the
//! card catalog, formation registry, effect factory, configuration and any
//! campaign objectives. It implements `RulesEngine`, holding the turn state
//! machine:
//!
//! ```text
//! TurnStart(p) -> ActionPhase(p) -> TurnEnd(p) -> TurnStart(other) ... -> GameOver
//! ```
//!
//! `TurnStart` and `TurnEnd` are transient; actions are only accepted in
//! `ActionPhase`.

use crate::campaign::{CampaignObjective, CompletionCheck};
use crate::cards::{
    play_fortification, play_tactic, play_unit, Card, CardBase, CardCatalog, CardId, TacticCard, TacticType,
    TargetType,
};
use crate::combat;
use crate::core::{
    Action, ActionError, CatalogError, EntityId, GameState, MatchConfig, PlayerId, PlayerMap, Position,
    TurnPhase,
};
use crate::effects::{Ability, EffectDescriptor, EffectFactory};
use crate::events::GameEvent;
use crate::formations::FormationManager;
use crate::movement::max_move_distance;
use crate::rules::{GameResult, RulesEngine};

/// Read-only collaborators for one match.
#[derive(Clone, Debug)]
pub struct MatchContext {
    pub catalog: CardCatalog,
    pub formations: FormationManager,
    pub factory: EffectFactory,
    pub config: MatchConfig,
    objectives: Vec<CampaignObjective>,
}

impl MatchContext {
    /// Context with the standard formations and effect factory.
    #[must_use]
    pub fn new(catalog: CardCatalog, config: MatchConfig) -> Self {
        Self {
            catalog,
            formations: FormationManager::standard(),
            factory: EffectFactory::new(),
            config,
            objectives: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_formations(mut self, formations: FormationManager) -> Self {
        self.formations = formations;
        self
    }

    #[must_use]
    pub fn with_factory(mut self, factory: EffectFactory) -> Self {
        self.factory = factory;
        self
    }

    /// Add campaign win or loss objectives.
    #[must_use]
    pub fn with_objectives(mut self, objectives: impl IntoIterator<Item = CampaignObjective>) -> Self {
        self.objectives.extend(objectives);
        self
    }

    #[must_use]
    pub fn objectives(&self) -> &[CampaignObjective] {
        &self.objectives
    }

    /// Build a tactic card whose effect comes from data descriptors.
    pub fn build_tactic(
        &self,
        base: CardBase,
        tactic_type: TacticType,
        target_type: TargetType,
        descriptors: &[EffectDescriptor],
    ) -> Result<TacticCard, CatalogError> {
        let effect = self.factory.build_compound(descriptors)?;
        Ok(TacticCard {
            base,
            tactic_type,
            target_type,
            effect,
        })
    }

    // === Match setup ===

    /// Create a match state from deck lists. Unknown ids are dropped.
    #[must_use]
    pub fn new_state(&self, decks: &PlayerMap<Vec<CardId>>) -> GameState {
        let resolved = PlayerMap::new(|p| self.catalog.resolve_deck(&decks[p]));
        GameState::new(self.config.clone(), resolved)
    }

    /// Shuffle (if configured), draw opening hands and start player 0's
    /// first turn.
    pub fn start_match(&self, state: &mut GameState) {
        if state.config.shuffle_decks {
            for player in PlayerId::both() {
                let deck = state.player(player).deck().clone();
                let shuffled = state.rng.shuffle_deck(&deck);
                state.player_mut(player).set_deck(shuffled);
            }
        }

        for player in PlayerId::both() {
            for _ in 0..state.config.starting_hand_size {
                let Some(card) = state.player_mut(player).draw() else {
                    break;
                };
                state.emit(GameEvent::CardDrawn { player, card });
            }
        }

        tracing::info!(seed = state.config.seed, "match started");
        self.begin_turn(state, PlayerId::new(0));
    }

    // === Turn state machine ===

    fn begin_turn(&self, state: &mut GameState, player: PlayerId) {
        state.set_phase(TurnPhase::TurnStart(player));
        let turn = state.turn_number();
        tracing::info!(%player, turn, "turn started");
        state.emit(GameEvent::TurnStarted { player, turn });

        let (step, cap) = (state.config.mana_per_turn, state.config.max_mana_cap);
        state.player_mut(player).start_turn_mana(step, cap);

        match state.player_mut(player).draw() {
            Some(card) => state.emit(GameEvent::CardDrawn { player, card }),
            None => {
                let amount = state.config.fatigue_damage;
                tracing::debug!(%player, amount, "fatigue");
                state.emit(GameEvent::FatigueDamage { player, amount });
                state.damage_player(player, amount);
            }
        }

        state.refresh_occupants(player);
        state.expire_buffs(player);
        self.formations.apply_formation_effects(state, player);

        if let Some(result) = state.health_result() {
            state.finish(result);
            return;
        }
        state.set_phase(TurnPhase::ActionPhase(player));
    }

    fn end_turn(&self, state: &mut GameState, player: PlayerId) {
        state.set_phase(TurnPhase::TurnEnd(player));
        tracing::info!(%player, turn = state.turn_number(), "turn ended");
        state.emit(GameEvent::TurnEnded { player });

        if let Some((goal, result)) = self
            .objectives
            .iter()
            .find_map(|goal| goal.resolve(state).map(|result| (goal, result)))
        {
            tracing::info!(objective = %goal.objective.describe(), outcome = ?goal.outcome, "objective complete");
            state.finish(result);
            return;
        }

        state.advance_turn();
        self.begin_turn(state, player.opponent());
    }

    // === Action resolution ===

    fn check_turn(state: &GameState, player: PlayerId) -> Result<(), ActionError> {
        match state.phase() {
            TurnPhase::GameOver(_) => Err(ActionError::GameOver),
            TurnPhase::ActionPhase(active) if active == player => Ok(()),
            phase if phase.player() != Some(player) => Err(ActionError::NotYourTurn(player)),
            _ => Err(ActionError::NotInActionPhase),
        }
    }

    fn card_from_hand(&self, state: &GameState, player: PlayerId, card: CardId) -> Result<&Card, ActionError> {
        if !state.player(player).has_in_hand(card) {
            return Err(ActionError::CardNotInHand(card));
        }
        self.catalog.get(card).ok_or(ActionError::UnknownCard(card))
    }

    fn deploy(
        &self,
        state: &mut GameState,
        player: PlayerId,
        card: CardId,
        position: Option<usize>,
    ) -> Result<(), ActionError> {
        match self.card_from_hand(state, player, card)? {
            Card::Unit(unit) => play_unit(state, player, unit, position).map(drop),
            Card::Fortification(fort) => play_fortification(state, player, fort, position).map(drop),
            Card::Tactic(_) => Err(ActionError::WrongCardKind(card)),
        }
    }

    fn cast(
        &self,
        state: &mut GameState,
        player: PlayerId,
        card: CardId,
        target: Option<Position>,
    ) -> Result<(), ActionError> {
        match self.card_from_hand(state, player, card)? {
            Card::Tactic(tactic) => play_tactic(state, player, tactic, target),
            Card::Unit(_) | Card::Fortification(_) => Err(ActionError::WrongCardKind(card)),
        }
    }

    fn move_unit(state: &mut GameState, player: PlayerId, unit: EntityId, to: Position) -> Result<(), ActionError> {
        let occupant = state.board.occupant(unit).ok_or(ActionError::NoSuchOccupant(unit))?;
        if state.board.owner_of(unit) != Some(player) {
            return Err(ActionError::NotOwner(unit));
        }
        let unit_type = occupant.unit_type().ok_or(ActionError::CannotMove)?;
        if state.movement.has_moved(unit) {
            return Err(ActionError::AlreadyMoved(unit));
        }
        if !state.board.in_bounds(to) {
            return Err(ActionError::OutOfBounds(to));
        }
        if !state.board.is_position_empty(to) {
            return Err(ActionError::PositionOccupied(to));
        }
        let from = state.board.position_of(unit).ok_or(ActionError::NoSuchOccupant(unit))?;
        let distance = from.distance(to);
        if distance == 0 || distance > max_move_distance(unit_type) {
            return Err(ActionError::OutOfMoveRange { to });
        }

        if !state.movement.move_unit(&mut state.board, unit, to) {
            return Err(ActionError::OutOfMoveRange { to });
        }
        tracing::debug!(entity = %unit, %from, %to, "moved");
        state.emit(GameEvent::UnitMoved { entity: unit, from, to });
        Ok(())
    }

    fn activate(state: &mut GameState, player: PlayerId, unit: EntityId, ability: Ability) -> Result<(), ActionError> {
        let card = state.board.unit(unit).ok_or(ActionError::NoSuchOccupant(unit))?;
        if state.board.owner_of(unit) != Some(player) {
            return Err(ActionError::NotOwner(unit));
        }
        if ability.is_passive() || !card.has_ability(ability) {
            return Err(ActionError::AbilityNotApplicable(unit));
        }
        if !ability.apply(state, unit) {
            return Err(ActionError::AbilityNotApplicable(unit));
        }
        tracing::debug!(entity = %unit, %ability, "ability activated");
        Ok(())
    }

    // === Legal action enumeration ===

    fn legal_deploys(&self, state: &GameState, player: PlayerId, out: &mut Vec<Action>) {
        let zone: Vec<usize> = (0..state.board.rows() * state.board.columns())
            .filter(|&index| {
                state
                    .board
                    .position_from_linear(index)
                    .is_some_and(|pos| state.board.is_position_empty(pos) && state.board.in_deployment_zone(player, pos))
            })
            .collect();

        for card in distinct_hand(state, player) {
            let Some(template) = self.catalog.get(card) else {
                continue;
            };
            if !template.is_deployable() || !state.player(player).can_afford(template.mana_cost()) {
                continue;
            }
            out.extend(zone.iter().map(|&index| Action::Deploy {
                card,
                position: Some(index),
            }));
        }
    }

    fn legal_tactics(&self, state: &GameState, player: PlayerId, out: &mut Vec<Action>) {
        for card in distinct_hand(state, player) {
            let Some(Card::Tactic(tactic)) = self.catalog.get(card) else {
                continue;
            };
            if !state.player(player).can_afford(tactic.base.mana_cost) {
                continue;
            }

            let targets: Vec<Option<Position>> = if tactic.target_type.needs_target() {
                (0..state.board.rows() * state.board.columns())
                    .filter_map(|index| state.board.position_from_linear(index))
                    .map(Some)
                    .collect()
            } else {
                vec![None]
            };
            for target in targets {
                let mut scratch = state.clone();
                if play_tactic(&mut scratch, player, tactic, target).is_ok() {
                    out.push(Action::PlayTactic { card, target });
                }
            }
        }
    }

    fn legal_moves(state: &GameState, player: PlayerId, out: &mut Vec<Action>) {
        for unit in state.board.entities_of(player) {
            out.extend(
                state
                    .movement
                    .reachable(&state.board, unit)
                    .into_iter()
                    .map(|to| Action::Move { unit, to }),
            );
        }
    }

    fn legal_attacks(state: &GameState, player: PlayerId, out: &mut Vec<Action>) {
        for attacker in state.board.entities_of(player) {
            if !state.board.occupant(attacker).is_some_and(|o| o.can_attack()) {
                continue;
            }
            out.extend(
                combat::legal_targets(state, attacker)
                    .into_iter()
                    .map(|target| Action::Attack { attacker, target }),
            );
        }
    }

    fn legal_abilities(state: &GameState, player: PlayerId, out: &mut Vec<Action>) {
        for unit in state.board.entities_of(player) {
            let Some(card) = state.board.unit(unit) else {
                continue;
            };
            for &ability in card.abilities.iter().filter(|a| !a.is_passive()) {
                let mut scratch = state.clone();
                if ability.apply(&mut scratch, unit) {
                    out.push(Action::ActivateAbility { unit, ability });
                }
            }
        }
    }
}

fn distinct_hand(state: &GameState, player: PlayerId) -> Vec<CardId> {
    let mut seen = Vec::new();
    for &card in state.player(player).hand() {
        if !seen.contains(&card) {
            seen.push(card);
        }
    }
    seen
}

impl RulesEngine for MatchContext {
    fn legal_actions(&self, state: &GameState, player: PlayerId) -> Vec<Action> {
        if Self::check_turn(state, player).is_err() {
            return Vec::new();
        }

        let mut actions = Vec::new();
        self.legal_deploys(state, player, &mut actions);
        self.legal_tactics(state, player, &mut actions);
        Self::legal_moves(state, player, &mut actions);
        Self::legal_attacks(state, player, &mut actions);
        Self::legal_abilities(state, player, &mut actions);
        actions.push(Action::EndTurn);
        actions
    }

    fn apply_action(&self, state: &mut GameState, player: PlayerId, action: &Action) -> Result<(), ActionError> {
        Self::check_turn(state, player)?;

        match action {
            Action::Deploy { card, position } => self.deploy(state, player, *card, *position)?,
            Action::Move { unit, to } => Self::move_unit(state, player, *unit, *to)?,
            Action::Attack { attacker, target } => {
                combat::resolve_attack(state, player, *attacker, *target).map(drop)?;
            }
            Action::PlayTactic { card, target } => self.cast(state, player, *card, *target)?,
            Action::ActivateAbility { unit, ability } => Self::activate(state, player, *unit, *ability)?,
            Action::EndTurn => {
                state.record_action(player, action.clone());
                self.end_turn(state, player);
                return Ok(());
            }
        }

        state.record_action(player, action.clone());
        if let Some(result) = state.health_result() {
            state.finish(result);
        }
        Ok(())
    }

    fn is_terminal(&self, state: &GameState) -> Option<GameResult> {
        state.result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{UnitCard, UnitType};
    use crate::effects::TacticEffect;

    const P0: PlayerId = PlayerId::new(0);
    const P1: PlayerId = PlayerId::new(1);

    fn context() -> MatchContext {
        let mut catalog = CardCatalog::new();
        catalog
            .register(UnitCard::new(CardId::new(1), "Pikemen", 1, UnitType::Infantry, 2, 3))
            .unwrap();
        catalog
            .register(TacticCard::new(
                CardId::new(2),
                "Volley",
                1,
                TacticType::Damage,
                TargetType::Board,
                TacticEffect::AreaDamage { amount: 1, radius: 1 },
            ))
            .unwrap();
        MatchContext::new(catalog, MatchConfig::default())
    }

    fn started(context: &MatchContext) -> GameState {
        let deck = vec![CardId::new(1); 6];
        let mut state = context.new_state(&PlayerMap::with_value(deck));
        context.start_match(&mut state);
        state
    }

    #[test]
    fn test_start_match() {
        let context = context();
        let state = started(&context);

        assert_eq!(state.phase(), TurnPhase::ActionPhase(P0));
        assert_eq!(state.player(P0).hand().len(), 4);
        assert_eq!(state.player(P1).hand().len(), 3);
        assert_eq!(state.player(P0).current_mana(), 1);
    }

    #[test]
    fn test_wrong_player_rejected() {
        let context = context();
        let mut state = started(&context);

        assert_eq!(
            context.apply_action(&mut state, P1, &Action::EndTurn),
            Err(ActionError::NotYourTurn(P1))
        );
    }

    #[test]
    fn test_end_turn_passes_control() {
        let context = context();
        let mut state = started(&context);

        context.apply_action(&mut state, P0, &Action::EndTurn).unwrap();

        assert_eq!(state.phase(), TurnPhase::ActionPhase(P1));
        assert_eq!(state.turn_number(), 2);
        assert_eq!(state.history().len(), 1);
    }

    #[test]
    fn test_legal_actions_only_for_active_player() {
        let context = context();
        let state = started(&context);

        assert!(context.legal_actions(&state, P1).is_empty());
        let actions = context.legal_actions(&state, P0);
        // 12 zone cells for the one distinct affordable unit, plus end turn.
        assert_eq!(actions.len(), 13);
        assert!(actions.iter().all(|a| context.is_legal(&state, P0, a)));
    }

    #[test]
    fn test_deploy_tactic_is_wrong_kind() {
        let context = context();
        let mut state = started(&context);
        state.player_mut(P0).add_to_hand(CardId::new(2));

        assert_eq!(
            context.apply_action(&mut state, P0, &Action::Deploy { card: CardId::new(2), position: None }),
            Err(ActionError::WrongCardKind(CardId::new(2)))
        );
    }

    #[test]
    fn test_build_tactic_from_descriptors() {
        let context = context();
        let card = context
            .build_tactic(
                CardBase::new(CardId::new(7), "Rally", 2),
                TacticType::Buff,
                TargetType::Board,
                &[EffectDescriptor::new("ATTACK_BUFF", 1).with_duration(2)],
            )
            .unwrap();
        assert_eq!(card.effect, TacticEffect::AttackBuff { amount: 1, duration: 2, radius: 1 });
    }
}
