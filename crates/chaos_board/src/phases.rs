//! Turn phases of a session.
//!
//! The phase is derived from session state rather than stored, so it can
//! never disagree with the dice, the pending obstacle, or the winner.

use serde::{Deserialize, Serialize};

/// Where the current turn stands.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumIter,
)]
pub enum TurnPhase {
    /// The current player has not rolled yet.
    #[strum(to_string = "awaiting roll")]
    AwaitingRoll,
    /// Dice rolled; a figure may move or the turn may be skipped.
    #[strum(to_string = "rolled")]
    Rolled,
    /// An obstacle was picked up and must be placed.
    #[strum(to_string = "obstacle pending")]
    ObstaclePending,
    /// A player reached the target; only rematch continues the game.
    #[strum(to_string = "finished")]
    Finished,
}

impl TurnPhase {
    /// Derives the phase from the raw turn flags.
    pub fn from_flags(has_winner: bool, has_pending_obstacle: bool, has_rolled: bool) -> Self {
        if has_winner {
            TurnPhase::Finished
        } else if has_pending_obstacle {
            TurnPhase::ObstaclePending
        } else if has_rolled {
            TurnPhase::Rolled
        } else {
            TurnPhase::AwaitingRoll
        }
    }

    /// True once the game has a winner.
    pub fn is_finished(&self) -> bool {
        matches!(self, TurnPhase::Finished)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_winner_dominates() {
        assert_eq!(TurnPhase::from_flags(true, true, true), TurnPhase::Finished);
        assert!(TurnPhase::from_flags(true, false, false).is_finished());
    }

    #[test]
    fn test_pending_obstacle_before_roll_state() {
        assert_eq!(
            TurnPhase::from_flags(false, true, true),
            TurnPhase::ObstaclePending
        );
        assert_eq!(TurnPhase::from_flags(false, false, true), TurnPhase::Rolled);
        assert_eq!(
            TurnPhase::from_flags(false, false, false),
            TurnPhase::AwaitingRoll
        );
    }
}
