//! Outcomes reported by gameplay commands.

use crate::{FigureId, Position};
use serde::{Deserialize, Serialize};

/// Something that happened while a command ran.
///
/// Commands return their events in the order they occurred; the caller decides
/// how to present them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
pub enum GameEvent {
    /// The current player rolled this value.
    #[display("{_0}")]
    DiceRolled(u8),

    /// A figure entered the board on its owner's start cell.
    #[display("{_0}")]
    FigureEntered(FigureId),

    /// A figure finished a move.
    #[display("{figure} moved to {to}")]
    FigureMoved {
        /// The moved figure.
        figure: FigureId,
        /// Where it landed.
        to: Position,
    },

    /// A figure of `attacker` hit a figure of `victim`.
    #[display("Player {attacker} has hit Player {victim}.")]
    Hit {
        /// Letter of the moving player.
        attacker: char,
        /// Letter of the player whose figure was hit.
        victim: char,
    },

    /// The mover landed on an obstacle and now carries it.
    #[display("obstacle picked up at {_0}")]
    ObstaclePickedUp(Position),

    /// A carried obstacle was dropped.
    #[display("obstacle placed at {_0}")]
    ObstaclePlaced(Position),

    /// A player reached the target.
    #[display("Player {_0} has won!")]
    Won(char),

    /// The turn passed to this player.
    #[display("It's player {_0}'s turn.")]
    TurnPassed(char),
}

impl GameEvent {
    /// True for events the console announces to players.
    ///
    /// Moves and obstacle bookkeeping are visible on the grid itself.
    pub fn is_announced(&self) -> bool {
        !matches!(
            self,
            GameEvent::FigureMoved { .. }
                | GameEvent::ObstaclePickedUp(_)
                | GameEvent::ObstaclePlaced(_)
        )
    }
}
