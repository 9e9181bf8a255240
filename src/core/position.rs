//! Board coordinates.
//!
//! Positions are zero-based `(row, col)` pairs. At the presentation boundary
//! cells are addressed by a row-major linear index:
//! `row = index / columns`, `col = index % columns`.

use serde::{Deserialize, Serialize};

/// A board cell coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    /// Create a new position.
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Decode a row-major linear index.
    ///
    /// ```
    /// use grid_tactics::core::Position;
    ///
    /// assert_eq!(Position::from_linear(7, 5), Position::new(1, 2));
    /// ```
    #[must_use]
    pub const fn from_linear(index: usize, columns: usize) -> Self {
        Self {
            row: index / columns,
            col: index % columns,
        }
    }

    /// Encode as a row-major linear index.
    #[must_use]
    pub const fn to_linear(self, columns: usize) -> usize {
        self.row * columns + self.col
    }

    /// Chebyshev distance (king moves).
    #[must_use]
    pub fn distance(self, other: Position) -> usize {
        self.row.abs_diff(other.row).max(self.col.abs_diff(other.col))
    }

    /// Offset by a signed delta, `None` if it would leave the non-negative quadrant.
    #[must_use]
    pub fn offset(self, d_row: i32, d_col: i32) -> Option<Position> {
        let row = self.row as i64 + d_row as i64;
        let col = self.col as i64 + d_col as i64;
        if row < 0 || col < 0 {
            return None;
        }
        Some(Position::new(row as usize, col as usize))
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_round_trip() {
        let columns = 6;
        for index in [0, 5, 6, 17, 35] {
            assert_eq!(Position::from_linear(index, columns).to_linear(columns), index);
        }
        assert_eq!(Position::from_linear(6, 6), Position::new(1, 0));
    }

    #[test]
    fn test_chebyshev_distance() {
        let origin = Position::new(2, 2);
        assert_eq!(origin.distance(Position::new(2, 2)), 0);
        assert_eq!(origin.distance(Position::new(3, 3)), 1);
        assert_eq!(origin.distance(Position::new(0, 3)), 2);
        assert_eq!(origin.distance(Position::new(5, 2)), 3);
    }

    #[test]
    fn test_offset() {
        let p = Position::new(1, 1);
        assert_eq!(p.offset(1, -1), Some(Position::new(2, 0)));
        assert_eq!(p.offset(-2, 0), None);
    }
}
