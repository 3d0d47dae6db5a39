//! Grid coordinates and the four movement directions.

use derive_new::new;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A (row, column) coordinate on the grid, zero-based from the top-left.
///
/// "Not placed" is expressed as `Option<Position>::None` wherever a figure
/// may be off the board.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, new,
)]
pub struct Position {
    /// Row index.
    pub row: usize,
    /// Column index.
    pub column: usize,
}

impl Position {
    /// Returns the position `distance` cells away in `direction`.
    ///
    /// Returns `None` when the result would have a negative coordinate.
    /// Upper bounds are the grid's concern.
    #[instrument]
    pub fn shifted(self, direction: Direction, distance: usize) -> Option<Self> {
        let (row, column) = match direction {
            Direction::Up => (self.row.checked_sub(distance)?, self.column),
            Direction::Down => (self.row.checked_add(distance)?, self.column),
            Direction::Left => (self.row, self.column.checked_sub(distance)?),
            Direction::Right => (self.row, self.column.checked_add(distance)?),
        };
        Some(Self { row, column })
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

/// Direction of a single movement leg.
///
/// Parses from and displays as the lowercase console tokens
/// `up`, `down`, `left`, `right`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(serialize_all = "lowercase")]
pub enum Direction {
    /// Towards row 0.
    Up,
    /// Towards the last row.
    Down,
    /// Towards column 0.
    Left,
    /// Towards the last column.
    Right,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_shift_each_direction() {
        let origin = Position::new(2, 2);
        assert_eq!(origin.shifted(Direction::Up, 2), Some(Position::new(0, 2)));
        assert_eq!(origin.shifted(Direction::Down, 1), Some(Position::new(3, 2)));
        assert_eq!(origin.shifted(Direction::Left, 1), Some(Position::new(2, 1)));
        assert_eq!(origin.shifted(Direction::Right, 3), Some(Position::new(2, 5)));
    }

    #[test]
    fn test_shift_below_zero_is_none() {
        assert_eq!(Position::new(0, 1).shifted(Direction::Up, 1), None);
        assert_eq!(Position::new(1, 0).shifted(Direction::Left, 2), None);
    }

    #[test]
    fn test_direction_tokens() {
        assert_eq!(Direction::from_str("left"), Ok(Direction::Left));
        assert!(Direction::from_str("Left").is_err());
        assert!(Direction::from_str("north").is_err());
        assert_eq!(Direction::Down.to_string(), "down");
    }
}
