//! Players, their figure pools and per-turn state.

use crate::{Cell, Figure, FigureId, GameError, MAX_FIGURES, Position};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tracing::{debug, instrument, warn};

/// Letters that name map symbols and are never handed to players.
pub const RESERVED_LETTERS: [char; 5] = ['O', 'Z', 'P', 'T', 'F'];

/// Fewest players a session accepts.
pub const MIN_PLAYERS: usize = 2;

/// Most players a session accepts: the alphabet minus the reserved letters.
pub const MAX_PLAYERS: usize = 26 - RESERVED_LETTERS.len();

/// Returns the letter of the player at `index` in turn order.
///
/// Letters run A, B, C, ... skipping [`RESERVED_LETTERS`]. Returns `None`
/// once the alphabet is exhausted.
pub fn player_letter(index: usize) -> Option<char> {
    ('A'..='Z')
        .filter(|letter| !RESERVED_LETTERS.contains(letter))
        .nth(index)
}

/// A participant in a session.
///
/// Owns exactly [`MAX_FIGURES`] figures split across the unused and in-play
/// queues. Both queues keep insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct Player {
    letter: char,
    /// Where this player's figures enter the board.
    start: Position,
    unused: VecDeque<Figure>,
    in_play: VecDeque<Figure>,
    /// Current dice value; `None` until rolled this turn.
    dice: Option<u8>,
    /// Obstacle picked up and not yet placed.
    pending_obstacle: Option<Cell>,
}

impl Player {
    /// Creates a player with all figures unused.
    #[instrument]
    pub fn new(letter: char, start: Position) -> Self {
        Self {
            letter,
            start,
            unused: (1..=MAX_FIGURES).map(|index| Figure::new(letter, index)).collect(),
            in_play: VecDeque::new(),
            dice: None,
            pending_obstacle: None,
        }
    }

    /// True once no figure is left in the unused queue.
    pub fn all_figures_in_play(&self) -> bool {
        self.unused.is_empty()
    }

    /// True if the player has rolled this turn.
    pub fn has_rolled(&self) -> bool {
        self.dice.is_some()
    }

    /// True if the player carries an obstacle.
    pub fn has_pending_obstacle(&self) -> bool {
        self.pending_obstacle.is_some()
    }

    /// Looks up one of this player's figures in play.
    pub fn figure_in_play(&self, id: FigureId) -> Option<&Figure> {
        self.in_play.iter().find(|figure| *figure.id() == id)
    }

    /// Total figures in both queues.
    pub fn figure_count(&self) -> usize {
        self.unused.len() + self.in_play.len()
    }

    pub(crate) fn figure_in_play_mut(&mut self, id: FigureId) -> Option<&mut Figure> {
        self.in_play.iter_mut().find(|figure| *figure.id() == id)
    }

    /// Moves the head of the unused queue to the tail of the in-play queue
    /// and places it on the start position.
    #[instrument(skip(self), fields(player = %self.letter))]
    pub(crate) fn bring_in_figure(&mut self) -> Option<FigureId> {
        let mut figure = self.unused.pop_front()?;
        figure.set_position(Some(self.start));
        let id = *figure.id();
        self.in_play.push_back(figure);
        debug!(figure = %id, "Figure brought into play");
        Some(id)
    }

    /// Takes a figure out of play and appends it to the unused queue.
    ///
    /// # Errors
    ///
    /// [`GameError::FigureNotInPlay`] if the figure is not in play.
    #[instrument(skip(self), fields(player = %self.letter, figure = %id))]
    pub(crate) fn return_to_unused(&mut self, id: FigureId) -> Result<(), GameError> {
        let index = self
            .in_play
            .iter()
            .position(|figure| *figure.id() == id)
            .ok_or_else(|| {
                warn!("Figure not found among figures in play");
                GameError::FigureNotInPlay
            })?;
        if let Some(mut figure) = self.in_play.remove(index) {
            figure.set_position(None);
            self.unused.push_back(figure);
        }
        Ok(())
    }

    pub(crate) fn set_dice(&mut self, dice: Option<u8>) {
        self.dice = dice;
    }

    pub(crate) fn set_pending_obstacle(&mut self, obstacle: Option<Cell>) {
        self.pending_obstacle = obstacle;
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "It's player {}'s turn. Dice Roll: ", self.letter)?;
        match self.dice {
            Some(value) => write!(f, "{value}"),
            None => write!(f, "?"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letters_skip_reserved() {
        let letters: String = (0..MAX_PLAYERS).filter_map(player_letter).collect();
        assert_eq!(letters, "ABCDEGHIJKLMNQRSUVWXY");
        assert_eq!(player_letter(MAX_PLAYERS), None);
    }

    #[test]
    fn test_new_player_owns_all_figures_unused() {
        let player = Player::new('A', Position::new(0, 0));
        assert_eq!(player.unused().len(), usize::from(MAX_FIGURES));
        assert!(player.in_play().is_empty());
        assert!(!player.all_figures_in_play());
        assert_eq!(player.to_string(), "It's player A's turn. Dice Roll: ?");
    }

    #[test]
    fn test_bring_in_and_return() {
        let start = Position::new(2, 1);
        let mut player = Player::new('B', start);

        let id = player.bring_in_figure().expect("figures left");
        assert_eq!(id, FigureId::new('B', 1));
        assert_eq!(
            player.figure_in_play(id).and_then(|f| *f.position()),
            Some(start)
        );

        player.return_to_unused(id).expect("in play");
        assert!(player.figure_in_play(id).is_none());
        let last = player.unused().back().expect("returned figure");
        assert_eq!(*last.id(), id);
        assert_eq!(*last.position(), None);
        assert_eq!(player.figure_count(), usize::from(MAX_FIGURES));
    }

    #[test]
    fn test_return_unknown_figure_fails() {
        let mut player = Player::new('A', Position::new(0, 0));
        assert_eq!(
            player.return_to_unused(FigureId::new('A', 1)),
            Err(GameError::FigureNotInPlay)
        );
    }

    #[test]
    fn test_all_figures_in_play() {
        let mut player = Player::new('A', Position::new(0, 0));
        for _ in 0..MAX_FIGURES {
            player.bring_in_figure();
        }
        assert!(player.all_figures_in_play());
        assert_eq!(player.bring_in_figure(), None);
    }

    #[test]
    fn test_display_shows_dice() {
        let mut player = Player::new('C', Position::new(0, 0));
        player.set_dice(Some(4));
        assert_eq!(player.to_string(), "It's player C's turn. Dice Roll: 4");
    }
}
