//! Errors raised by board and session operations.
//!
//! Every error rejects the command that raised it and leaves the session
//! exactly as it was before the command. The display text is what the
//! console shows after the `Error, ` prefix.

use serde::{Deserialize, Serialize};

/// Broad class of a [`GameError`], used by callers that only care about
/// why a command was refused rather than the precise reason.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumIter,
)]
#[strum(serialize_all = "lowercase")]
pub enum ErrorCategory {
    /// Malformed number, direction or figure token.
    Parse,
    /// Well-formed input that breaks a board or session rule.
    Validation,
    /// Command issued in the wrong turn phase.
    State,
    /// Map file could not be read.
    Io,
}

/// Error that can occur while building a board or executing a command.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum GameError {
    /// The map has no rows or no columns.
    #[display("the given game field is not valid. Please add new file path.")]
    InvalidField,

    /// Exactly one of forest and village cells is present on the map.
    #[display("invalid forest or village.")]
    InvalidForestVillage,

    /// A lowercase target or protected zone symbol was found.
    #[display("invalid character found.")]
    InvalidCharacter,

    /// Unreadable map file or a path with the wrong number of tokens.
    #[display("an invalid path has been passed!")]
    InvalidPath,

    /// Obstacle would leave the grid or land on a cell that cannot hold it.
    #[display("an invalid path has been passed!")]
    InvalidObstaclePath,

    /// A session with this id already exists.
    #[display("this session already exists.")]
    DuplicateId,

    /// Session ids must consist of ASCII letters and digits only.
    #[display("this session is not alphanumerical.")]
    NotAlphanumericId,

    /// The map has fewer start markers than requested players.
    #[display("the map does not provide a starting position for every player.")]
    TooManyPlayersForMap,

    /// Player count outside 2..=21 or a non-numeric count or seed.
    #[display(
        "the entered numbers are not integers or number of players do not fall within the range 2-21."
    )]
    OutOfPlayerRange,

    /// Distance token is not a positive integer or the distances do not add up to the dice.
    #[display("invalid number of moves.")]
    InvalidMoveCount,

    /// Direction token is unknown, or an obstacle was moved twice the same way.
    #[display("invalid direction. Please use: up, right, left or down.")]
    InvalidDirection,

    /// A step left the grid.
    #[display("figure cannot go out of bounds in the matrix.")]
    OutOfBounds,

    /// A step landed on a cell the figure may not enter.
    #[display("the figure cannot be moved across the given path.")]
    CellNotFree,

    /// A step revisited a cell already crossed during this move.
    #[display(
        "it is forbidden to move a figure within one move over the same field multiple times."
    )]
    AlreadyVisited,

    /// The destination holds a figure standing on a protected zone.
    #[display("the figure you want to hit is placed on protected zone and cannot be hit.")]
    ProtectedZoneCapture,

    /// The named figure is not one of the current player's figures in play.
    #[display("invalid figure name or this figure is not on the playing field.")]
    InvalidFigure,

    /// The figure to capture is not in play for its owner.
    #[display("the figure does not exist in enemy list.")]
    FigureNotInPlay,

    /// Dice value missing, superfluous, or outside 1..=6.
    #[display("an invalid parameter for the command dice roll. Please parse an valid digit between 1 and 6.")]
    InvalidDiceRoll,

    /// The current player has already rolled this turn.
    #[display("this player already rolled the dice.")]
    AlreadyRolled,

    /// The command is not allowed in the current turn phase.
    #[display("this command is not available.")]
    CommandNotAvailable,

    /// No session with the given id exists.
    #[display("wrong command or parameters.")]
    UnknownSession,

    /// The session to switch to is already the active one.
    #[display("this session is already active.")]
    AlreadyActive,
}

impl std::error::Error for GameError {}

impl GameError {
    /// Returns the broad class of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            GameError::InvalidMoveCount
            | GameError::InvalidDirection
            | GameError::InvalidFigure
            | GameError::InvalidDiceRoll => ErrorCategory::Parse,
            GameError::InvalidPath => ErrorCategory::Io,
            GameError::AlreadyRolled | GameError::CommandNotAvailable | GameError::AlreadyActive => {
                ErrorCategory::State
            }
            GameError::InvalidField
            | GameError::InvalidForestVillage
            | GameError::InvalidCharacter
            | GameError::DuplicateId
            | GameError::NotAlphanumericId
            | GameError::TooManyPlayersForMap
            | GameError::OutOfPlayerRange
            | GameError::OutOfBounds
            | GameError::CellNotFree
            | GameError::AlreadyVisited
            | GameError::InvalidObstaclePath
            | GameError::ProtectedZoneCapture
            | GameError::FigureNotInPlay
            | GameError::UnknownSession => ErrorCategory::Validation,
        }
    }
}
