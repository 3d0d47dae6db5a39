//! Help texts for the console commands.

use chaos_board::{CommandKind, SessionManager};
use strum::IntoEnumIterator;

/// Description line of one command.
pub fn description(kind: CommandKind) -> &'static str {
    match kind {
        CommandKind::Help => "help: This command displays a list of available commands.",
        CommandKind::DeleteSession => {
            "delete session: This command deletes a session. Please add a valid session_id in order to delete it. Example: delete session TestSession."
        }
        CommandKind::Quit => "quit: This command ends the game.",
        CommandKind::ShowSession => {
            "show session: This command shows all details about existing sessions. The session that is active has an * as a suffix. If a session id is provided after the command, only the details about it are shown."
        }
        CommandKind::SwitchSession => {
            "switch session: This command change the active game. Please add a valid session_id in order to switch it. Example: switch session TestSession"
        }
        CommandKind::StartSession => {
            "start session: This command creates and starts a game session. The command must have three or four parameters, each separated by a space: session_id, file_to_field, num_of_players and optionally seed. Number of players must be between 2 and 21."
        }
        CommandKind::Show => {
            "show: This command displays the playing field of the current session. No parameters needed."
        }
        CommandKind::CurrentPlayer => {
            "current player: This command displays the current player and rolled dice. If not dice was rolled, a question mark will be shown. No parameters needed."
        }
        CommandKind::RollDice => {
            "roll dice: This command rolls a dice. Please add a number between 1 and 6 after command. If the session was created with seed, no number is needed. Example: roll dice 6."
        }
        CommandKind::NewFigure => {
            "new figure: This command brings a new figure into play. No need for parameters."
        }
        CommandKind::Move => {
            "move: Moves a piece of the current player. Please add a valid figure name, followed by a non-empty list of pair of distances and directions. Example: move A1 1 up 2 left."
        }
        CommandKind::MoveObstacle => {
            "move obstacle: This command moves an obstacle that is currently reached by a figure. The command must contain 2 distances and 2 directions. Example : move obstacle 3 up 4 right."
        }
        CommandKind::SkipTurn => {
            "skip turn: This command skips the current players turn. No need for parameters."
        }
        CommandKind::Rematch => {
            "rematch: This command the same game one more time. No need for parameters."
        }
    }
}

/// Every command with its description, ordered by keyword.
#[derive(Debug, Clone)]
pub struct HelpTable {
    entries: Vec<(CommandKind, &'static str)>,
}

impl Default for HelpTable {
    fn default() -> Self {
        Self::new()
    }
}

impl HelpTable {
    /// Builds the table.
    pub fn new() -> Self {
        let mut entries: Vec<(CommandKind, &'static str)> = CommandKind::iter()
            .map(|kind| (kind, description(kind)))
            .collect();
        entries.sort_by_key(|(kind, _)| kind.to_string());
        Self { entries }
    }

    /// Descriptions of the commands `manager` allows right now.
    pub fn available(&self, manager: &SessionManager) -> Vec<String> {
        self.entries
            .iter()
            .filter(|(kind, _)| manager.is_available(*kind))
            .map(|(_, text)| text.to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chaos_board::Grid;

    #[test]
    fn test_descriptions_start_with_keyword() {
        for kind in CommandKind::iter() {
            assert!(
                description(kind).starts_with(&format!("{kind}:")),
                "{kind}"
            );
        }
    }

    #[test]
    fn test_without_sessions() {
        let lines = HelpTable::new().available(&SessionManager::new());
        let keywords: Vec<&str> = lines
            .iter()
            .filter_map(|line| line.split(':').next())
            .collect();
        assert_eq!(keywords, vec!["help", "quit", "start session"]);
    }

    #[test]
    fn test_fresh_session() {
        let mut manager = SessionManager::new();
        let grid = Grid::from_rows(&["aPPT", "bPPP"]).expect("valid map");
        manager.create_session("s", "m", grid, 2, None).expect("created");

        let lines = HelpTable::new().available(&manager);
        let keywords: Vec<&str> = lines
            .iter()
            .filter_map(|line| line.split(':').next())
            .collect();
        assert_eq!(
            keywords,
            vec![
                "current player",
                "delete session",
                "help",
                "new figure",
                "quit",
                "roll dice",
                "show",
                "show session",
                "start session",
            ]
        );
    }
}
