//! Match state.
//!
//! `GameState` is everything that changes during a match: the board, both
//! players, per-turn movement flags, timed and formation bonuses, the turn
//! phase, the action history and the pending event log.
//!
//! ## Cloning
//!
//! Collections are `im` persistent structures, so a clone shares almost all
//! of its memory with the original. Compound tactic effects rely on this to
//! run against a scratch copy and commit only on success.
//!
//! ## Invariants
//!
//! - An occupant at or below zero health is removed in the same step that
//!   damaged it (`damage_occupant`).
//! - Once the phase is `GameOver` it never changes again.

use im::Vector;

use super::action::{Action, ActionRecord};
use super::config::MatchConfig;
use super::entity::EntityId;
use super::player::{Player, PlayerId, PlayerMap};
use super::position::Position;
use super::rng::GameRng;
use crate::board::{Board, Occupant};
use crate::cards::CardId;
use crate::effects::{Ability, TimedBuff};
use crate::events::GameEvent;
use crate::formations::{FormationBonus, FormationEffect};
use crate::movement::MovementManager;
use crate::rules::GameResult;

/// Where the turn state machine currently is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnPhase {
    TurnStart(PlayerId),
    ActionPhase(PlayerId),
    TurnEnd(PlayerId),
    GameOver(GameResult),
}

impl TurnPhase {
    /// The player whose turn it is, `None` once the match is over.
    #[must_use]
    pub fn player(self) -> Option<PlayerId> {
        match self {
            TurnPhase::TurnStart(p) | TurnPhase::ActionPhase(p) | TurnPhase::TurnEnd(p) => Some(p),
            TurnPhase::GameOver(_) => None,
        }
    }

    #[must_use]
    pub fn is_game_over(self) -> bool {
        matches!(self, TurnPhase::GameOver(_))
    }
}

/// Complete state of one match.
#[derive(Clone, Debug)]
pub struct GameState {
    /// Rules parameters for this match.
    pub config: MatchConfig,

    pub board: Board,
    pub players: PlayerMap<Player>,
    pub movement: MovementManager,

    /// Attack bonuses from tactics that expire on the owner's turn start.
    pub timed_buffs: Vector<TimedBuff>,

    /// Bonuses granted by the last formation evaluation, per player.
    pub formation_bonuses: PlayerMap<Vector<FormationBonus>>,

    /// Occupants destroyed so far, by owner.
    pub casualties: PlayerMap<u32>,

    /// Deterministic RNG.
    pub rng: GameRng,

    phase: TurnPhase,
    turn_number: u32,
    action_sequence: u32,
    history: Vector<ActionRecord>,
    events: Vector<GameEvent>,
}

impl GameState {
    /// Create a match with the given decks. Nobody has drawn yet and the
    /// phase is `TurnStart` for player 0.
    #[must_use]
    pub fn new(config: MatchConfig, decks: PlayerMap<Vector<CardId>>) -> Self {
        let players = PlayerMap::new(|id| {
            Player::new(
                id,
                format!("Player {}", id.index() + 1),
                config.starting_health,
                config.starting_mana,
                decks[id].clone(),
            )
        });

        Self {
            board: Board::new(&config),
            rng: GameRng::new(config.seed),
            config,
            players,
            movement: MovementManager::new(),
            timed_buffs: Vector::new(),
            formation_bonuses: PlayerMap::with_value(Vector::new()),
            casualties: PlayerMap::with_value(0),
            phase: TurnPhase::TurnStart(PlayerId::new(0)),
            turn_number: 1,
            action_sequence: 0,
            history: Vector::new(),
            events: Vector::new(),
        }
    }

    // === Players ===

    #[must_use]
    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id]
    }

    pub fn player_mut(&mut self, id: PlayerId) -> &mut Player {
        &mut self.players[id]
    }

    /// Player whose turn it is, `None` once the match is over.
    #[must_use]
    pub fn active_player(&self) -> Option<PlayerId> {
        self.phase.player()
    }

    /// Apply direct damage to a player.
    pub fn damage_player(&mut self, id: PlayerId, amount: i32) {
        let player = &mut self.players[id];
        player.take_damage(amount);
        let remaining = player.health();
        self.emit(GameEvent::PlayerDamaged {
            player: id,
            amount,
            remaining,
        });
    }

    // === Phase ===

    #[must_use]
    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub(crate) fn set_phase(&mut self, phase: TurnPhase) {
        if self.phase.is_game_over() {
            return;
        }
        self.phase = phase;
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.phase.is_game_over()
    }

    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        match self.phase {
            TurnPhase::GameOver(result) => Some(result),
            _ => None,
        }
    }

    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    pub(crate) fn advance_turn(&mut self) {
        self.turn_number += 1;
        self.action_sequence = 0;
    }

    /// Outcome implied by player health alone.
    ///
    /// Both players at or below zero is a draw.
    #[must_use]
    pub fn health_result(&self) -> Option<GameResult> {
        let p0 = PlayerId::new(0);
        let p1 = PlayerId::new(1);
        match (self.players[p0].is_defeated(), self.players[p1].is_defeated()) {
            (true, true) => Some(GameResult::Draw),
            (true, false) => Some(GameResult::Winner(p1)),
            (false, true) => Some(GameResult::Winner(p0)),
            (false, false) => None,
        }
    }

    /// End the match. Emits `Victory`/`Defeat` events; a draw counts as a
    /// defeat for both sides. No-op if the match is already over.
    pub fn finish(&mut self, result: GameResult) {
        if self.is_over() {
            return;
        }
        self.phase = TurnPhase::GameOver(result);
        tracing::info!(?result, turn = self.turn_number, "game over");

        match result {
            GameResult::Winner(winner) => {
                self.emit(GameEvent::Victory { player: winner });
                self.emit(GameEvent::Defeat {
                    player: winner.opponent(),
                });
            }
            GameResult::Draw => {
                for player in PlayerId::both() {
                    self.emit(GameEvent::Defeat { player });
                }
            }
        }
    }

    // === Occupants ===

    /// Deal damage to an occupant, removing it if it dies.
    ///
    /// Returns `Some(true)` if the occupant was destroyed and `None` if the
    /// handle is not on the board.
    pub fn damage_occupant(&mut self, id: EntityId, amount: i32) -> Option<bool> {
        let dead = self.board.occupant_mut(id)?.take_damage(amount);
        if dead {
            self.destroy_occupant(id);
        }
        Some(dead)
    }

    /// Remove an occupant as destroyed, emitting `UnitDestroyed`.
    pub fn destroy_occupant(&mut self, id: EntityId) -> Option<Occupant> {
        let (occupant, owner, position) = self.remove_occupant(id)?;
        tracing::debug!(entity = %id, name = occupant.name(), %owner, %position, "occupant destroyed");
        self.casualties[owner] += 1;
        self.emit(GameEvent::UnitDestroyed {
            entity: id,
            owner,
            position,
        });
        Some(occupant)
    }

    /// Take an occupant off the board and drop every per-occupant record.
    pub fn remove_occupant(&mut self, id: EntityId) -> Option<(Occupant, PlayerId, Position)> {
        let position = self.board.position_of(id)?;
        let (occupant, owner) = self.board.remove_entity(id)?;

        self.movement.forget(id);
        self.timed_buffs.retain(|buff| buff.target != id);
        for player in PlayerId::both() {
            self.formation_bonuses[player].retain(|bonus| bonus.entity != id);
        }
        Some((occupant, owner, position))
    }

    /// Forget every tracked attack modifier on an occupant so a later revert
    /// cannot subtract from an overridden attack value. Taunt grants stay.
    pub fn clear_attack_modifiers(&mut self, id: EntityId) {
        self.timed_buffs.retain(|buff| buff.target != id);
        for player in PlayerId::both() {
            self.formation_bonuses[player]
                .retain(|bonus| bonus.entity != id || !matches!(bonus.effect, FormationEffect::AttackBoost(_)));
        }
    }

    /// Start-of-turn refresh for a player's occupants: unit attack flags
    /// and movement. Fortifications keep whatever an effect last set.
    pub fn refresh_occupants(&mut self, player: PlayerId) {
        let ids = self.board.entities_of(player);
        for &id in &ids {
            if let Some(unit) = self.board.unit_mut(id) {
                unit.can_attack_this_turn = true;
            }
        }
        self.movement.reset(ids);
    }

    /// Tick a player's timed buffs and revert the ones that expire.
    pub fn expire_buffs(&mut self, player: PlayerId) {
        let mut kept = Vector::new();
        for mut buff in std::mem::take(&mut self.timed_buffs) {
            if buff.owner != player {
                kept.push_back(buff);
                continue;
            }
            buff.turns_remaining = buff.turns_remaining.saturating_sub(1);
            if buff.turns_remaining > 0 {
                kept.push_back(buff);
            } else if let Some(unit) = self.board.unit_mut(buff.target) {
                unit.attack = (unit.attack - buff.amount).max(0);
            }
        }
        self.timed_buffs = kept;
    }

    /// Apply a unit's passive abilities after placement.
    pub fn apply_passive_abilities(&mut self, id: EntityId) {
        let abilities: Vec<Ability> = match self.board.unit(id) {
            Some(unit) => unit.abilities.iter().copied().filter(|a| a.is_passive()).collect(),
            None => return,
        };
        for ability in abilities {
            ability.apply(self, id);
        }
    }

    // === History ===

    /// Record a resolved action.
    pub fn record_action(&mut self, player: PlayerId, action: Action) {
        let record = ActionRecord::new(player, action, self.turn_number, self.action_sequence);
        self.action_sequence += 1;
        self.history.push_back(record);
    }

    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord> {
        &self.history
    }

    // === Events ===

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push_back(event);
    }

    /// Events not yet drained.
    #[must_use]
    pub fn events(&self) -> &Vector<GameEvent> {
        &self.events
    }

    /// Take all pending events, oldest first.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events).into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{FortType, FortificationCard, UnitCard, UnitType};

    const P0: PlayerId = PlayerId::new(0);
    const P1: PlayerId = PlayerId::new(1);

    fn state() -> GameState {
        let deck: Vector<CardId> = (1..=3).map(CardId::new).collect();
        GameState::new(MatchConfig::default(), PlayerMap::with_value(deck))
    }

    fn grunt() -> UnitCard {
        UnitCard::new(CardId::new(1), "Grunt", 1, UnitType::Infantry, 2, 3)
    }

    #[test]
    fn test_new_state() {
        let state = state();

        assert_eq!(state.phase(), TurnPhase::TurnStart(P0));
        assert_eq!(state.active_player(), Some(P0));
        assert_eq!(state.turn_number(), 1);
        assert_eq!(state.player(P1).health(), 20);
        assert_eq!(state.player(P1).deck().len(), 3);
        assert!(state.player(P0).hand().is_empty());
        assert!(state.board.is_empty());
    }

    #[test]
    fn test_damage_occupant_removes_dead() {
        let mut state = state();
        let id = state.board.put_occupant(grunt().into(), Position::new(2, 2), P1).unwrap();
        state.movement.mark_moved(id);

        assert_eq!(state.damage_occupant(id, 2), Some(false));
        assert_eq!(state.board.unit(id).unwrap().health, 1);

        assert_eq!(state.damage_occupant(id, 5), Some(true));
        assert!(state.board.is_position_empty(Position::new(2, 2)));
        assert!(state.board.owner_of(id).is_none());
        assert!(!state.movement.has_moved(id));
        assert_eq!(state.damage_occupant(id, 1), None);
        assert_eq!(state.casualties[P1], 1);

        let events = state.drain_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].name(), "unit_destroyed");
        assert!(state.events().is_empty());
    }

    #[test]
    fn test_health_result() {
        let mut state = state();
        assert_eq!(state.health_result(), None);

        state.player_mut(P1).take_damage(20);
        assert_eq!(state.health_result(), Some(GameResult::Winner(P0)));

        state.player_mut(P0).take_damage(25);
        assert_eq!(state.health_result(), Some(GameResult::Draw));
    }

    #[test]
    fn test_finish_is_final() {
        let mut state = state();
        state.finish(GameResult::Winner(P1));
        state.finish(GameResult::Winner(P0));
        state.set_phase(TurnPhase::ActionPhase(P0));

        assert_eq!(state.result(), Some(GameResult::Winner(P1)));
        assert_eq!(state.active_player(), None);
        let names: Vec<_> = state.drain_events().iter().map(GameEvent::name).collect();
        assert_eq!(names, vec!["victory", "defeat"]);
    }

    #[test]
    fn test_expire_buffs_counts_owner_turns() {
        let mut state = state();
        let id = state.board.put_occupant(grunt().into(), Position::new(4, 0), P0).unwrap();
        state.board.unit_mut(id).unwrap().attack += 2;
        state.timed_buffs.push_back(TimedBuff::new(id, P0, 2, 2));

        state.expire_buffs(P1);
        state.expire_buffs(P0);
        assert_eq!(state.board.unit(id).unwrap().attack, 4);

        state.expire_buffs(P0);
        assert_eq!(state.board.unit(id).unwrap().attack, 2);
        assert!(state.timed_buffs.is_empty());
    }

    #[test]
    fn test_refresh_occupants() {
        let mut state = state();
        let mine = state.board.put_occupant(grunt().into(), Position::new(4, 0), P0).unwrap();
        let theirs = state.board.put_occupant(grunt().into(), Position::new(0, 0), P1).unwrap();
        let tower = FortificationCard::new(CardId::new(3), "Tower", 2, FortType::Tower, 2, 4);
        let tower = state.board.put_occupant(tower.into(), Position::new(5, 0), P0).unwrap();
        state.movement.mark_moved(mine);

        state.refresh_occupants(P0);

        assert!(state.board.occupant(mine).unwrap().can_attack());
        assert!(!state.board.occupant(tower).unwrap().can_attack());
        assert!(!state.movement.has_moved(mine));
        assert!(!state.board.occupant(theirs).unwrap().can_attack());
    }

    #[test]
    fn test_clear_attack_modifiers() {
        let mut state = state();
        let id = state.board.put_occupant(grunt().into(), Position::new(4, 0), P0).unwrap();
        let other = state.board.put_occupant(grunt().into(), Position::new(4, 1), P0).unwrap();
        state.timed_buffs.push_back(TimedBuff::new(id, P0, 2, 1));
        state.timed_buffs.push_back(TimedBuff::new(other, P0, 2, 1));
        state.formation_bonuses[P0].push_back(FormationBonus {
            entity: id,
            effect: FormationEffect::AttackBoost(1),
        });
        state.formation_bonuses[P0].push_back(FormationBonus {
            entity: id,
            effect: FormationEffect::GrantTaunt,
        });

        state.clear_attack_modifiers(id);

        assert_eq!(state.timed_buffs.len(), 1);
        assert_eq!(state.timed_buffs[0].target, other);
        assert_eq!(state.formation_bonuses[P0].len(), 1);
        assert_eq!(state.formation_bonuses[P0][0].effect, FormationEffect::GrantTaunt);
    }

    #[test]
    fn test_record_action_sequence() {
        let mut state = state();
        state.record_action(P0, Action::EndTurn);
        state.advance_turn();
        state.record_action(P1, Action::EndTurn);

        let history = state.history();
        assert_eq!(history.len(), 2);
        assert_eq!((history[0].turn, history[0].sequence), (1, 0));
        assert_eq!((history[1].turn, history[1].sequence), (2, 0));
    }

    #[test]
    fn test_clone_is_independent() {
        let mut state = state();
        let mut scratch = state.clone();
        scratch.player_mut(P0).take_damage(5);
        scratch.emit(GameEvent::TurnEnded { player: P0 });

        assert_eq!(state.player(P0).health(), 20);
        assert!(state.drain_events().is_empty());
    }
}
