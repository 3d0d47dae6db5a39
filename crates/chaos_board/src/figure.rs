//! Figures: the playing pieces each player brings onto the board.

use crate::{GameError, Position};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::instrument;

/// Number of figures every player owns.
pub const MAX_FIGURES: u8 = 5;

/// Stable identity of a figure: owner letter plus 1-based index.
///
/// Displays and parses as the console name, e.g. `A1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FigureId {
    /// Letter of the owning player.
    pub owner: char,
    /// Index within the owner's figures, starting at 1.
    pub index: u8,
}

impl FigureId {
    /// Creates a figure id.
    pub fn new(owner: char, index: u8) -> Self {
        Self { owner, index }
    }
}

impl std::fmt::Display for FigureId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.owner, self.index)
    }
}

impl FromStr for FigureId {
    type Err = GameError;

    /// Parses `<letter><digits>`; anything else is [`GameError::InvalidFigure`].
    #[instrument]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let owner = chars
            .next()
            .filter(|c| c.is_ascii_alphabetic())
            .ok_or(GameError::InvalidFigure)?;
        let digits = chars.as_str();
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(GameError::InvalidFigure);
        }
        let index = digits.parse::<u8>().map_err(|_| GameError::InvalidFigure)?;
        Ok(Self { owner, index })
    }
}

/// A figure together with where it currently stands.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct Figure {
    id: FigureId,
    position: Option<Position>,
}

impl Figure {
    /// Creates an unplaced figure.
    pub fn new(owner: char, index: u8) -> Self {
        Self {
            id: FigureId::new(owner, index),
            position: None,
        }
    }

    /// Moves the figure to `position`, or takes it off the board with `None`.
    pub(crate) fn set_position(&mut self, position: Option<Position>) {
        self.position = position;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_figure_name_round_trip() {
        let id: FigureId = "B3".parse().expect("valid name");
        assert_eq!(id, FigureId::new('B', 3));
        assert_eq!(id.to_string(), "B3");
    }

    #[test]
    fn test_malformed_names_rejected() {
        for name in ["", "A", "1A", "AB", "A-1", "A1x", "A999"] {
            assert_eq!(name.parse::<FigureId>(), Err(GameError::InvalidFigure), "{name}");
        }
    }

    #[test]
    fn test_new_figure_is_unplaced() {
        let figure = Figure::new('A', 1);
        assert_eq!(figure.position(), &None);
        assert_eq!(figure.id().to_string(), "A1");
    }
}
