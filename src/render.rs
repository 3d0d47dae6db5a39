//! Text output for grids, sessions, events and errors.

use chaos_board::{Cell, GameEvent, Grid, Session};
use std::fmt::Display;

/// Character shown for one cell from the view of `current`.
///
/// The current player's figures show their index, everyone else's their
/// owner letter. Forest cells always show the forest symbol.
fn cell_char(cell: &Cell, current: char) -> Option<char> {
    match cell.figure() {
        Some(figure) if !cell.kind().is_forest() => {
            if figure.owner == current {
                char::from_digit(u32::from(figure.index), 10)
            } else {
                Some(figure.owner)
            }
        }
        _ => cell.symbol(),
    }
}

/// Renders the grid, one line per row. Padding cells are left out.
pub fn render_grid(grid: &Grid, current: char) -> Vec<String> {
    grid.rows()
        .map(|row| row.iter().filter_map(|cell| cell_char(cell, current)).collect())
        .collect()
}

/// Renders the active session's grid.
pub fn render_session_grid(session: &Session) -> Vec<String> {
    render_grid(session.grid(), *session.current_player().letter())
}

/// One line of the session listing.
///
/// Example: `s1* -> Players: A,B | Map: map.txt | Seed: 7`
pub fn session_line(session: &Session, active: bool) -> String {
    let players = session
        .players()
        .iter()
        .map(|player| player.letter().to_string())
        .collect::<Vec<_>>()
        .join(",");
    let mut line = format!(
        "{}{} -> Players: {} | Map: {}",
        session.id(),
        if active { "*" } else { "" },
        players,
        session.map_label()
    );
    if let Some(seed) = session.seed() {
        line.push_str(&format!(" | Seed: {seed}"));
    }
    line
}

/// Lines announcing the events a command produced.
pub fn event_lines(events: &[GameEvent]) -> Vec<String> {
    events
        .iter()
        .filter(|event| event.is_announced())
        .map(ToString::to_string)
        .collect()
}

/// Error line as written to the error stream.
pub fn error_line(error: &impl Display) -> String {
    format!("Error, {error}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chaos_board::{FigureId, Leg, SessionManager};

    #[test]
    fn test_render_plain_grid() {
        let grid = Grid::from_rows(&["aPPT", "bP"]).expect("valid map");
        assert_eq!(render_grid(&grid, 'A'), vec!["aPPT", "bP"]);
    }

    #[test]
    fn test_render_owner_view() {
        let mut manager = SessionManager::new();
        let grid = Grid::from_rows(&["aPPPT", "bPPPP"]).expect("valid map");
        manager.create_session("s", "m", grid, 2, None).expect("created");
        let session = manager.active_mut().expect("active");
        session.new_figure().expect("entered");
        session.roll_dice(Some(1)).expect("rolled");
        session
            .move_figure(FigureId::new('A', 1), &Leg::pairs(&["1", "right"]))
            .expect("moved");

        // Player B's turn now, so A's figure shows as its letter.
        assert_eq!(render_session_grid(session), vec!["aAPPT", "bPPPP"]);
        assert_eq!(render_grid(session.grid(), 'A'), vec!["a1PPT", "bPPPP"]);
    }

    #[test]
    fn test_session_line() {
        let mut manager = SessionManager::new();
        let grid = Grid::from_rows(&["aPPT", "bPPP"]).expect("valid map");
        manager.create_session("s1", "map.txt", grid.clone(), 2, Some(7)).expect("created");
        manager.create_session("s2", "map.txt", grid, 2, None).expect("created");

        let lines: Vec<String> = manager
            .sessions()
            .iter()
            .map(|session| session_line(session, manager.is_active(session.id())))
            .collect();
        assert_eq!(
            lines,
            vec![
                "s1 -> Players: A,B | Map: map.txt | Seed: 7",
                "s2* -> Players: A,B | Map: map.txt",
            ]
        );
    }

    #[test]
    fn test_event_lines_skip_silent_events() {
        let events = [
            GameEvent::FigureMoved {
                figure: FigureId::new('A', 1),
                to: chaos_board::Position::new(0, 1),
            },
            GameEvent::TurnPassed('B'),
        ];
        assert_eq!(event_lines(&events), vec!["It's player B's turn."]);
    }
}
