//! Formation Manager.
//!
//! A formation is a shape of friendly units that grants a bonus while it
//! holds. Shapes are either fixed board cells or offsets relative to an
//! anchor unit; relative shapes anchor at the first of the player's units,
//! in row-major order, that completes the shape.
//!
//! ## Re-evaluation
//!
//! `apply_formation_effects` runs at the start of each of a player's turns.
//! It first reverts every bonus it granted last time and then re-applies
//! formations in registration order, so bonuses never stack across turns.

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::board::Board;
use crate::core::{EntityId, GameState, PlayerId, Position};
use crate::effects::Ability;

/// Cells a formation occupies.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormationShape {
    /// Exact board cells.
    Absolute(SmallVec<[Position; 4]>),
    /// `(row, col)` offsets from an anchor unit. Include `(0, 0)` for the
    /// anchor itself.
    Relative(SmallVec<[(i32, i32); 4]>),
}

/// Bonus granted to every member of an active formation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormationEffect {
    AttackBoost(i32),
    GrantTaunt,
}

/// A named formation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Formation {
    pub name: String,
    pub shape: FormationShape,
    pub effect: FormationEffect,
}

impl Formation {
    #[must_use]
    pub fn absolute(
        name: impl Into<String>,
        cells: impl IntoIterator<Item = Position>,
        effect: FormationEffect,
    ) -> Self {
        Self {
            name: name.into(),
            shape: FormationShape::Absolute(cells.into_iter().collect()),
            effect,
        }
    }

    #[must_use]
    pub fn relative(
        name: impl Into<String>,
        offsets: impl IntoIterator<Item = (i32, i32)>,
        effect: FormationEffect,
    ) -> Self {
        Self {
            name: name.into(),
            shape: FormationShape::Relative(offsets.into_iter().collect()),
            effect,
        }
    }

    /// Units forming this formation for `player`, or `None` if it does not
    /// hold.
    #[must_use]
    pub fn members(&self, board: &Board, player: PlayerId) -> Option<Vec<EntityId>> {
        let friendly_unit = |pos: Position| {
            let id = board.entity_at(pos)?;
            board.unit(id)?;
            (board.owner_of(id)? == player).then_some(id)
        };

        match &self.shape {
            FormationShape::Absolute(cells) => {
                if cells.is_empty() {
                    return None;
                }
                cells.iter().map(|&pos| friendly_unit(pos)).collect()
            }
            FormationShape::Relative(offsets) => {
                if offsets.is_empty() {
                    return None;
                }
                board.entities_of(player).into_iter().find_map(|anchor| {
                    let origin = board.position_of(anchor)?;
                    offsets
                        .iter()
                        .map(|&(dr, dc)| origin.offset(dr, dc).and_then(&friendly_unit))
                        .collect()
                })
            }
        }
    }
}

/// A bonus currently applied to one unit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormationBonus {
    pub entity: EntityId,
    pub effect: FormationEffect,
}

/// Registry of formations, shared by every match that uses it.
#[derive(Clone, Debug, Default)]
pub struct FormationManager {
    formations: Vec<Formation>,
}

impl FormationManager {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the standard formations: `Line` (three abreast,
    /// +1 attack) and `Square` (two by two, taunt).
    #[must_use]
    pub fn standard() -> Self {
        let mut manager = Self::new();
        manager.register(Formation::relative(
            "Line",
            [(0, 0), (0, 1), (0, 2)],
            FormationEffect::AttackBoost(1),
        ));
        manager.register(Formation::relative(
            "Square",
            [(0, 0), (0, 1), (1, 0), (1, 1)],
            FormationEffect::GrantTaunt,
        ));
        manager
    }

    pub fn register(&mut self, formation: Formation) {
        self.formations.push(formation);
    }

    #[must_use]
    pub fn formations(&self) -> &[Formation] {
        &self.formations
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Formation> {
        self.formations.iter().find(|f| f.name == name)
    }

    #[must_use]
    pub fn is_formation_active(&self, board: &Board, player: PlayerId, formation: &Formation) -> bool {
        formation.members(board, player).is_some()
    }

    /// Names of the formations currently held by a player.
    #[must_use]
    pub fn active_formations(&self, board: &Board, player: PlayerId) -> Vec<&str> {
        self.formations
            .iter()
            .filter(|f| self.is_formation_active(board, player, f))
            .map(|f| f.name.as_str())
            .collect()
    }

    /// Revert last evaluation's bonuses, then apply every active formation
    /// in registration order.
    pub fn apply_formation_effects(&self, state: &mut GameState, player: PlayerId) {
        revert_bonuses(state, player);

        let mut applied = Vector::new();
        for formation in &self.formations {
            let Some(members) = formation.members(&state.board, player) else {
                continue;
            };
            tracing::debug!(%player, formation = %formation.name, members = members.len(), "formation active");

            for id in members {
                let Some(unit) = state.board.unit_mut(id) else {
                    continue;
                };
                match formation.effect {
                    FormationEffect::AttackBoost(amount) => {
                        unit.attack += amount;
                    }
                    FormationEffect::GrantTaunt => {
                        if unit.has_taunt {
                            continue;
                        }
                        unit.has_taunt = true;
                    }
                }
                applied.push_back(FormationBonus {
                    entity: id,
                    effect: formation.effect,
                });
            }
        }
        state.formation_bonuses[player] = applied;
    }
}

fn revert_bonuses(state: &mut GameState, player: PlayerId) {
    let bonuses = std::mem::take(&mut state.formation_bonuses[player]);
    for bonus in bonuses {
        let Some(unit) = state.board.unit_mut(bonus.entity) else {
            continue;
        };
        match bonus.effect {
            FormationEffect::AttackBoost(amount) => unit.attack = (unit.attack - amount).max(0),
            FormationEffect::GrantTaunt => unit.has_taunt = unit.has_ability(Ability::Taunt),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardId, UnitCard, UnitType};
    use crate::core::{MatchConfig, PlayerMap};

    const P0: PlayerId = PlayerId::new(0);
    const P1: PlayerId = PlayerId::new(1);

    fn state() -> GameState {
        GameState::new(MatchConfig::default(), PlayerMap::with_value(Vector::new()))
    }

    fn put(state: &mut GameState, pos: Position, owner: PlayerId) -> EntityId {
        let unit = UnitCard::new(CardId::new(1), "Pikes", 1, UnitType::Infantry, 2, 2);
        state.board.put_occupant(unit.into(), pos, owner).unwrap()
    }

    #[test]
    fn test_relative_line_anchors_first_match() {
        let mut state = state();
        let a = put(&mut state, Position::new(4, 1), P0);
        let b = put(&mut state, Position::new(4, 2), P0);
        let c = put(&mut state, Position::new(4, 3), P0);
        put(&mut state, Position::new(4, 4), P0);

        let manager = FormationManager::standard();
        let line = manager.get("Line").unwrap();
        assert_eq!(line.members(&state.board, P0), Some(vec![a, b, c]));
        assert!(!manager.is_formation_active(&state.board, P1, line));
    }

    #[test]
    fn test_enemy_breaks_formation() {
        let mut state = state();
        put(&mut state, Position::new(4, 0), P0);
        put(&mut state, Position::new(4, 1), P1);
        put(&mut state, Position::new(4, 2), P0);

        let manager = FormationManager::standard();
        assert!(manager.active_formations(&state.board, P0).is_empty());
    }

    #[test]
    fn test_absolute_formation() {
        let mut state = state();
        put(&mut state, Position::new(5, 0), P0);

        let mut manager = FormationManager::new();
        manager.register(Formation::absolute(
            "Corner",
            [Position::new(5, 0), Position::new(5, 1)],
            FormationEffect::AttackBoost(2),
        ));
        let corner = &manager.formations()[0];
        assert!(!manager.is_formation_active(&state.board, P0, corner));

        put(&mut state, Position::new(5, 1), P0);
        assert!(manager.is_formation_active(&state.board, P0, corner));
    }

    #[test]
    fn test_bonuses_do_not_stack() {
        let mut state = state();
        let ids: Vec<_> = (0..3).map(|c| put(&mut state, Position::new(4, c), P0)).collect();
        let manager = FormationManager::standard();

        manager.apply_formation_effects(&mut state, P0);
        manager.apply_formation_effects(&mut state, P0);
        assert!(ids.iter().all(|&id| state.board.unit(id).unwrap().attack == 3));

        state.board.remove_entity(ids[2]);
        manager.apply_formation_effects(&mut state, P0);
        assert_eq!(state.board.unit(ids[0]).unwrap().attack, 2);
        assert!(state.formation_bonuses[P0].is_empty());
    }

    #[test]
    fn test_square_grants_and_reverts_taunt() {
        let mut state = state();
        let ids: Vec<_> = [(4, 0), (4, 1), (5, 0), (5, 1)]
            .iter()
            .map(|&(r, c)| put(&mut state, Position::new(r, c), P0))
            .collect();
        let manager = FormationManager::standard();

        manager.apply_formation_effects(&mut state, P0);
        assert!(ids.iter().all(|&id| state.board.unit(id).unwrap().has_taunt));

        state.board.remove_entity(ids[3]);
        manager.apply_formation_effects(&mut state, P0);
        assert!(!state.board.unit(ids[0]).unwrap().has_taunt);
    }
}
