//! Board system: the grid and its occupants.
//!
//! ## Key Types
//!
//! - `Board`: Row-major grid, occupant arena and owner map
//! - `Occupant`: A unit or fortification instance on a cell
//!
//! Board occupants are always independent copies of catalog templates.

pub mod grid;
pub mod occupant;

pub use grid::Board;
pub use occupant::Occupant;
