//! The battle grid.
//!
//! The `Board` tracks which occupant stands on which cell and who owns it.
//! Occupants live in an arena keyed by `EntityId`; each cell stores at most
//! one handle. The owner map is keyed by that handle, so two occupants cloned
//! from the same template are always distinct.
//!
//! Invariant: a cell is non-empty iff its occupant has an arena entry, an
//! owner entry and a position entry. Every mutator keeps all four in step.

use im::{HashMap as ImHashMap, Vector};

use super::occupant::Occupant;
use crate::cards::{FortificationCard, UnitCard};
use crate::core::{EntityId, MatchConfig, PlayerId, PlayerMap, Position};

/// Fixed-size grid holding at most one occupant per cell.
///
/// ## Usage
///
/// ```
/// use grid_tactics::board::Board;
/// use grid_tactics::cards::{CardId, UnitCard, UnitType};
/// use grid_tactics::core::{MatchConfig, PlayerId, Position};
///
/// let mut board = Board::new(&MatchConfig::default());
/// let pikes = UnitCard::new(CardId::new(1), "Pikemen", 2, UnitType::Infantry, 2, 3);
///
/// let id = board.place_unit(pikes, Position::new(5, 0), PlayerId::new(0)).unwrap();
/// assert_eq!(board.owner_of(id), Some(PlayerId::new(0)));
/// assert!(!board.is_position_empty(Position::new(5, 0)));
/// ```
#[derive(Clone, Debug)]
pub struct Board {
    rows: usize,
    columns: usize,
    deployment_rows: PlayerMap<Vec<usize>>,

    /// Row-major cell contents.
    cells: Vector<Option<EntityId>>,

    occupants: ImHashMap<EntityId, Occupant>,
    owners: ImHashMap<EntityId, PlayerId>,
    positions: ImHashMap<EntityId, Position>,

    next_id: EntityId,
}

impl Board {
    /// Create an empty board sized by the match configuration.
    #[must_use]
    pub fn new(config: &MatchConfig) -> Self {
        Self {
            rows: config.rows,
            columns: config.columns,
            deployment_rows: config.deployment_rows.clone(),
            cells: std::iter::repeat(None).take(config.cell_count()).collect(),
            occupants: ImHashMap::new(),
            owners: ImHashMap::new(),
            positions: ImHashMap::new(),
            next_id: EntityId::FIRST,
        }
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn columns(&self) -> usize {
        self.columns
    }

    #[must_use]
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.row < self.rows && pos.col < self.columns
    }

    /// Decode a row-major linear index, `None` if it is past the last cell.
    #[must_use]
    pub fn position_from_linear(&self, index: usize) -> Option<Position> {
        if index >= self.rows * self.columns {
            return None;
        }
        Some(Position::from_linear(index, self.columns))
    }

    #[must_use]
    pub fn in_deployment_zone(&self, player: PlayerId, pos: Position) -> bool {
        self.in_bounds(pos) && self.deployment_rows[player].contains(&pos.row)
    }

    fn index(&self, pos: Position) -> usize {
        pos.to_linear(self.columns)
    }

    // === Placement ===

    /// Place a unit inside its owner's deployment zone.
    ///
    /// Fails without mutation if the cell is out of range, occupied or
    /// outside the zone. Returns the new instance's handle.
    pub fn place_unit(&mut self, unit: UnitCard, pos: Position, owner: PlayerId) -> Option<EntityId> {
        if !self.in_deployment_zone(owner, pos) {
            return None;
        }
        self.put_occupant(Occupant::Unit(unit), pos, owner)
    }

    /// Place a fortification inside its owner's deployment zone.
    pub fn place_fortification(
        &mut self,
        fort: FortificationCard,
        pos: Position,
        owner: PlayerId,
    ) -> Option<EntityId> {
        if !self.in_deployment_zone(owner, pos) {
            return None;
        }
        self.put_occupant(Occupant::Fortification(fort), pos, owner)
    }

    /// Place an occupant on any empty in-bounds cell.
    ///
    /// Used for transformations and scripted layouts, which are not bound
    /// to deployment zones.
    pub fn put_occupant(&mut self, occupant: Occupant, pos: Position, owner: PlayerId) -> Option<EntityId> {
        if !self.is_position_empty(pos) {
            return None;
        }

        let id = self.next_id;
        self.next_id = id.next();

        let index = self.index(pos);
        self.cells.set(index, Some(id));
        self.occupants.insert(id, occupant);
        self.owners.insert(id, owner);
        self.positions.insert(id, pos);
        Some(id)
    }

    // === Removal ===

    /// Clear a cell. No-op if the cell is empty or out of range.
    ///
    /// Returns the removed handle, occupant and owner.
    pub fn remove_unit(&mut self, pos: Position) -> Option<(EntityId, Occupant, PlayerId)> {
        let id = self.entity_at(pos)?;
        self.remove_entity(id).map(|(occupant, owner)| (id, occupant, owner))
    }

    /// Remove an occupant by handle.
    pub fn remove_entity(&mut self, id: EntityId) -> Option<(Occupant, PlayerId)> {
        let pos = self.positions.remove(&id)?;
        let index = self.index(pos);
        self.cells.set(index, None);
        let occupant = self.occupants.remove(&id)?;
        let owner = self.owners.remove(&id)?;
        Some((occupant, owner))
    }

    // === Movement ===

    /// Move an occupant to an empty in-bounds cell.
    ///
    /// Returns false without mutation if the handle is unknown or the
    /// destination is unavailable.
    pub fn move_occupant(&mut self, id: EntityId, to: Position) -> bool {
        let Some(&from) = self.positions.get(&id) else {
            return false;
        };
        if !self.is_position_empty(to) {
            return false;
        }

        let from_index = self.index(from);
        let to_index = self.index(to);
        self.cells.set(from_index, None);
        self.cells.set(to_index, Some(id));
        self.positions.insert(id, to);
        true
    }

    // === Queries ===

    /// Check whether a cell is in range and unoccupied.
    #[must_use]
    pub fn is_position_empty(&self, pos: Position) -> bool {
        self.in_bounds(pos) && self.entity_at(pos).is_none()
    }

    /// Handle of the occupant at a cell.
    #[must_use]
    pub fn entity_at(&self, pos: Position) -> Option<EntityId> {
        if !self.in_bounds(pos) {
            return None;
        }
        self.cells.get(self.index(pos)).copied().flatten()
    }

    /// Occupant at a cell.
    #[must_use]
    pub fn occupant_at(&self, pos: Position) -> Option<&Occupant> {
        self.entity_at(pos).and_then(|id| self.occupants.get(&id))
    }

    /// Unit at a cell; `None` for empty cells and fortifications.
    #[must_use]
    pub fn unit_at(&self, pos: Position) -> Option<&UnitCard> {
        self.occupant_at(pos).and_then(Occupant::as_unit)
    }

    #[must_use]
    pub fn occupant(&self, id: EntityId) -> Option<&Occupant> {
        self.occupants.get(&id)
    }

    pub fn occupant_mut(&mut self, id: EntityId) -> Option<&mut Occupant> {
        self.occupants.get_mut(&id)
    }

    #[must_use]
    pub fn unit(&self, id: EntityId) -> Option<&UnitCard> {
        self.occupant(id).and_then(Occupant::as_unit)
    }

    pub fn unit_mut(&mut self, id: EntityId) -> Option<&mut UnitCard> {
        self.occupant_mut(id).and_then(Occupant::as_unit_mut)
    }

    /// Reverse lookup of an occupant's owner by identity.
    #[must_use]
    pub fn owner_of(&self, id: EntityId) -> Option<PlayerId> {
        self.owners.get(&id).copied()
    }

    #[must_use]
    pub fn position_of(&self, id: EntityId) -> Option<Position> {
        self.positions.get(&id).copied()
    }

    /// First free cell of a player's deployment zone, scanning row-major.
    #[must_use]
    pub fn first_empty_in_deployment_zone(&self, player: PlayerId) -> Option<Position> {
        let mut rows = self.deployment_rows[player].clone();
        rows.sort_unstable();
        rows.into_iter()
            .filter(|&row| row < self.rows)
            .flat_map(|row| (0..self.columns).map(move |col| Position::new(row, col)))
            .find(|&pos| self.is_position_empty(pos))
    }

    /// All occupants in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Position, EntityId, &Occupant)> + '_ {
        self.cells.iter().enumerate().filter_map(move |(index, cell)| {
            let id = (*cell)?;
            let occupant = self.occupants.get(&id)?;
            Some((Position::from_linear(index, self.columns), id, occupant))
        })
    }

    /// Handles of a player's occupants in row-major order.
    #[must_use]
    pub fn entities_of(&self, player: PlayerId) -> Vec<EntityId> {
        self.iter()
            .filter(|(_, id, _)| self.owner_of(*id) == Some(player))
            .map(|(_, id, _)| id)
            .collect()
    }

    /// Handles of occupants within `radius` of `center`, in row-major order.
    #[must_use]
    pub fn entities_within(&self, center: Position, radius: usize) -> Vec<EntityId> {
        self.iter()
            .filter(|(pos, _, _)| pos.distance(center) <= radius)
            .map(|(_, id, _)| id)
            .collect()
    }

    /// Number of occupants on the board.
    #[must_use]
    pub fn len(&self) -> usize {
        self.occupants.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.occupants.is_empty()
    }
}
