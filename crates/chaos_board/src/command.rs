//! Command kinds and when each one may run.

use crate::Session;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Every command the console understands.
///
/// Displays as the console keyword, e.g. `move obstacle`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
pub enum CommandKind {
    /// Leave the program.
    #[strum(serialize = "quit")]
    Quit,
    /// List available commands.
    #[strum(serialize = "help")]
    Help,
    /// List sessions, or show one.
    #[strum(serialize = "show session")]
    ShowSession,
    /// Create and activate a session.
    #[strum(serialize = "start session")]
    StartSession,
    /// Remove a session.
    #[strum(serialize = "delete session")]
    DeleteSession,
    /// Activate another session.
    #[strum(serialize = "switch session")]
    SwitchSession,
    /// Print the active grid.
    #[strum(serialize = "show")]
    Show,
    /// Print the current player.
    #[strum(serialize = "current player")]
    CurrentPlayer,
    /// Roll the dice.
    #[strum(serialize = "roll dice")]
    RollDice,
    /// Bring a figure onto the board.
    #[strum(serialize = "new figure")]
    NewFigure,
    /// Move a figure along a path.
    #[strum(serialize = "move")]
    Move,
    /// Drop a carried obstacle.
    #[strum(serialize = "move obstacle")]
    MoveObstacle,
    /// Pass the turn.
    #[strum(serialize = "skip turn")]
    SkipTurn,
    /// Restart a finished game.
    #[strum(serialize = "rematch")]
    Rematch,
}

/// Decides whether `kind` may run right now.
///
/// `active` is the active session, if any, and `sessions` every session that
/// exists (active one included). Session-level rules are delegated to
/// [`Session::permits`].
#[instrument(skip(active, sessions), fields(has_active = active.is_some(), sessions = sessions.len()))]
pub fn is_command_available(kind: CommandKind, active: Option<&Session>, sessions: &[Session]) -> bool {
    let available = match kind {
        CommandKind::Quit | CommandKind::Help | CommandKind::StartSession => true,
        CommandKind::ShowSession | CommandKind::DeleteSession => !sessions.is_empty(),
        CommandKind::SwitchSession => {
            (sessions.len() == 1 && active.is_none()) || sessions.len() >= 2
        }
        _ => active.is_some_and(|session| session.permits(kind)),
    };
    debug!(%kind, available, "Checked command availability");
    available
}
