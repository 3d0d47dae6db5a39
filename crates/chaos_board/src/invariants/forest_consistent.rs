//! Forest consistency invariant: the forest cell reflects what it holds.

use super::Invariant;
use crate::Session;

/// Invariant: the forest cell is occupied iff figures are held, and every
/// held figure is in play at the forest position.
pub struct ForestConsistentInvariant;

impl Invariant<Session> for ForestConsistentInvariant {
    fn holds(session: &Session) -> bool {
        let Some(forest) = session.forest() else {
            return true;
        };

        let kind_matches = session
            .grid()
            .cell(*forest.position())
            .is_some_and(|cell| *cell.kind() == forest.kind());

        let held_in_play = forest.captured().iter().all(|id| {
            session
                .player(id.owner)
                .and_then(|player| player.figure_in_play(*id))
                .is_some_and(|figure| *figure.position() == Some(*forest.position()))
        });

        kind_matches && held_in_play
    }

    fn description() -> &'static str {
        "Forest cell type matches its captured figures"
    }
}
