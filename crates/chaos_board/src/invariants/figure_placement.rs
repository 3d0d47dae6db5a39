//! Figure placement invariant: grid cells and figure positions agree.

use super::Invariant;
use crate::Session;

/// Invariant: every figure is where the board says it is.
///
/// - A figure shown on a cell is in play for its owner at that position.
/// - A figure in play stands on the cell at its position, or is held by the
///   forest when its position is the forest's.
/// - Unused figures have no position.
pub struct FigurePlacementInvariant;

impl Invariant<Session> for FigurePlacementInvariant {
    fn holds(session: &Session) -> bool {
        let forest_position = session.forest().as_ref().map(|forest| *forest.position());

        let cells_agree = session.grid().cells().all(|cell| match *cell.figure() {
            None => true,
            Some(id) => session
                .player(id.owner)
                .and_then(|player| player.figure_in_play(id))
                .is_some_and(|figure| *figure.position() == Some(*cell.position())),
        });

        let figures_agree = session.players().iter().all(|player| {
            let in_play_placed = player.in_play().iter().all(|figure| match *figure.position() {
                None => false,
                Some(position) if Some(position) == forest_position => session
                    .forest()
                    .as_ref()
                    .is_some_and(|forest| forest.holds(*figure.id())),
                Some(position) => session
                    .grid()
                    .cell(position)
                    .is_some_and(|cell| *cell.figure() == Some(*figure.id())),
            });
            let unused_unplaced = player.unused().iter().all(|figure| figure.position().is_none());
            in_play_placed && unused_unplaced
        });

        cells_agree && figures_agree
    }

    fn description() -> &'static str {
        "Grid cells and figure positions agree"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FigureId, Grid, Position};

    fn session() -> Session {
        let grid = Grid::from_rows(&["aPPT", "bPPP"]).expect("valid map");
        Session::create("s", "m", grid, 2, None).expect("valid session")
    }

    #[test]
    fn test_new_session_holds() {
        assert!(FigurePlacementInvariant::holds(&session()));
    }

    #[test]
    fn test_entered_figure_holds() {
        let mut session = session();
        session.new_figure().expect("start empty");
        assert!(FigurePlacementInvariant::holds(&session));
    }

    #[test]
    fn test_stray_cell_figure_violates() {
        let mut session = session();
        session.new_figure().expect("start empty");
        session
            .grid_mut()
            .cell_mut(Position::new(0, 0))
            .expect("inside")
            .set_figure(None);
        assert!(!FigurePlacementInvariant::holds(&session));
        session
            .grid_mut()
            .cell_mut(Position::new(0, 0))
            .expect("inside")
            .set_figure(Some(FigureId::new('A', 2)));
        assert!(!FigurePlacementInvariant::holds(&session));
    }
}
