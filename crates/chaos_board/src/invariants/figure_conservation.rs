//! Figure conservation invariant: nobody gains or loses figures.

use super::Invariant;
use crate::session::{DICE_MAX, DICE_MIN};
use crate::{MAX_FIGURES, Session};
use std::collections::BTreeSet;

/// Invariant: every player owns each of its figures exactly once and holds a
/// valid dice value.
pub struct FigureConservationInvariant;

impl Invariant<Session> for FigureConservationInvariant {
    fn holds(session: &Session) -> bool {
        session.players().iter().all(|player| {
            let indices: BTreeSet<u8> = player
                .unused()
                .iter()
                .chain(player.in_play())
                .filter(|figure| figure.id().owner == *player.letter())
                .map(|figure| figure.id().index)
                .collect();
            let owns_all = player.figure_count() == usize::from(MAX_FIGURES)
                && indices == (1..=MAX_FIGURES).collect();
            let dice_valid = player
                .dice()
                .is_none_or(|value| (DICE_MIN..=DICE_MAX).contains(&value));
            owns_all && dice_valid
        })
    }

    fn description() -> &'static str {
        "Every player owns five figures and a valid dice value"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FigureId, Grid, Leg};

    #[test]
    fn test_hit_without_forest_conserves_figures() {
        let grid = Grid::from_rows(&["aPPT", "bPPP"]).expect("valid map");
        let mut session = Session::create("s", "m", grid, 2, None).expect("valid session");

        session.new_figure().expect("start empty");
        session.roll_dice(Some(1)).expect("rolled");
        session
            .move_figure(FigureId::new('A', 1), &Leg::pairs(&["1", "right"]))
            .expect("valid path");

        session.new_figure().expect("start empty");
        session.roll_dice(Some(2)).expect("rolled");
        session
            .move_figure(FigureId::new('B', 1), &Leg::pairs(&["1", "up", "1", "right"]))
            .expect("hit");

        assert!(FigureConservationInvariant::holds(&session));
        assert_eq!(session.players()[0].unused().len(), usize::from(MAX_FIGURES));
    }
}
