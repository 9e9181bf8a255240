//! Board occupant identification.
//!
//! Every card placed on the board becomes a fresh instance with its own
//! `EntityId`. Hand and deck entries are catalog card ids and never carry an
//! `EntityId`, so board events can never reach a template.
//!
//! ## Usage
//!
//! ```
//! use grid_tactics::core::EntityId;
//!
//! let first = EntityId::FIRST;
//! assert_eq!(first.next(), EntityId(1));
//! ```

use serde::{Deserialize, Serialize};

/// Handle to a single board occupant (unit or fortification instance).
///
/// Ids are allocated monotonically by `GameState` and never reused within a
/// match, so a stale handle never aliases a newer occupant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    /// The first id handed out in a match.
    pub const FIRST: EntityId = EntityId(0);

    /// The id allocated after this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }

    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for EntityId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "occupant#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next() {
        assert_eq!(EntityId::FIRST.next(), EntityId(1));
        assert_eq!(EntityId(41).next().raw(), 42);
    }

    #[test]
    fn test_ordering() {
        assert!(EntityId(1) < EntityId(2));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", EntityId(42)), "occupant#42");
    }

    #[test]
    fn test_serializes_as_number() {
        assert_eq!(serde_json::to_string(&EntityId(123)).unwrap(), "123");
        assert_eq!(serde_json::from_str::<EntityId>("7").unwrap(), EntityId(7));
    }
}
