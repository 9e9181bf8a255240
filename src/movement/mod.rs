//! Movement Manager.
//!
//! Units move at most once per turn, up to a type-dependent Chebyshev
//! distance. Fortifications never move. The manager only tracks which
//! occupants have moved; cell bookkeeping stays on the `Board`.

use im::HashSet as ImHashSet;

use crate::board::{Board, Occupant};
use crate::cards::UnitType;
use crate::core::{EntityId, PlayerId, Position};

/// Maximum move distance for a unit type.
#[must_use]
pub fn max_move_distance(unit_type: UnitType) -> usize {
    match unit_type {
        UnitType::Cavalry => 2,
        UnitType::Infantry | UnitType::Musket | UnitType::Missile | UnitType::Artillery => 1,
    }
}

/// Per-turn movement bookkeeping.
#[derive(Clone, Debug, Default)]
pub struct MovementManager {
    moved: ImHashSet<EntityId>,
}

impl MovementManager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn has_moved(&self, id: EntityId) -> bool {
        self.moved.contains(&id)
    }

    pub fn mark_moved(&mut self, id: EntityId) {
        self.moved.insert(id);
    }

    /// Forget an occupant that left the board.
    pub fn forget(&mut self, id: EntityId) {
        self.moved.remove(&id);
    }

    /// Clear the moved flag of every listed occupant.
    pub fn reset(&mut self, ids: impl IntoIterator<Item = EntityId>) {
        for id in ids {
            self.moved.remove(&id);
        }
    }

    /// Check whether a unit may still move this turn.
    #[must_use]
    pub fn can_move(&self, board: &Board, id: EntityId) -> bool {
        matches!(board.occupant(id), Some(Occupant::Unit(_))) && !self.has_moved(id)
    }

    /// Check whether a move is legal without applying it.
    #[must_use]
    pub fn is_legal_move(&self, board: &Board, id: EntityId, to: Position) -> bool {
        let (Some(unit), Some(from)) = (board.unit(id), board.position_of(id)) else {
            return false;
        };
        !self.has_moved(id)
            && board.is_position_empty(to)
            && from.distance(to) <= max_move_distance(unit.unit_type)
            && from != to
    }

    /// Cells a unit can reach this turn, in row-major order.
    #[must_use]
    pub fn reachable(&self, board: &Board, id: EntityId) -> Vec<Position> {
        let (Some(unit), Some(from)) = (board.unit(id), board.position_of(id)) else {
            return Vec::new();
        };
        if self.has_moved(id) {
            return Vec::new();
        }

        let range = max_move_distance(unit.unit_type);
        let rows = from.row.saturating_sub(range)..=(from.row + range).min(board.rows().saturating_sub(1));
        rows.flat_map(|row| {
            let cols = from.col.saturating_sub(range)..=(from.col + range).min(board.columns().saturating_sub(1));
            cols.map(move |col| Position::new(row, col))
        })
        .filter(|&to| to != from && board.is_position_empty(to))
        .collect()
    }

    /// Move a unit and mark it as moved. Returns false with no mutation if
    /// the move is illegal.
    pub fn move_unit(&mut self, board: &mut Board, id: EntityId, to: Position) -> bool {
        if !self.is_legal_move(board, id, to) {
            return false;
        }
        if !board.move_occupant(id, to) {
            return false;
        }
        self.mark_moved(id);
        true
    }

    /// Clear the moved flags of one player's occupants.
    pub fn reset_player(&mut self, board: &Board, player: PlayerId) {
        self.reset(board.entities_of(player));
    }
}
