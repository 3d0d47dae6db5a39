//! One game instance and its turn state machine.
//!
//! Every command validates fully before writing anything, so a rejected
//! command leaves the session exactly as it found it. Commands report what
//! happened as a list of [`GameEvent`]s.

use crate::invariants::assert_invariants;
use crate::path::{Leg, resolve_figure_path, resolve_obstacle_path};
use crate::player::{MAX_PLAYERS, MIN_PLAYERS, player_letter};
use crate::{CommandKind, FigureId, Forest, GameError, GameEvent, Grid, Player, Position, TurnPhase};
use derive_getters::Getters;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, instrument, warn};

/// Lowest value a die shows.
pub const DICE_MIN: u8 = 1;
/// Highest value a die shows.
pub const DICE_MAX: u8 = 6;

/// True if `id` is a non-empty run of ASCII letters and digits.
pub fn is_valid_session_id(id: &str) -> bool {
    !id.is_empty() && id.chars().all(|c| c.is_ascii_alphanumeric())
}

/// A running game.
#[derive(Debug, Clone, Getters)]
pub struct Session {
    id: String,
    /// Map path as the player typed it.
    map_label: String,
    seed: Option<u64>,
    /// Live board.
    grid: Grid,
    /// Board as loaded, restored by rematch.
    original: Grid,
    forest: Option<Forest>,
    /// Players in turn order.
    players: Vec<Player>,
    #[getter(skip)]
    current: usize,
    #[getter(skip)]
    rng: Option<ChaCha8Rng>,
    winner: Option<char>,
}

impl Session {
    /// Creates a session on a validated grid.
    ///
    /// Player letters come from [`player_letter`]; each player starts on the
    /// last cell marked with the lowercase form of its letter. A `seed` makes
    /// the session roll its own dice.
    ///
    /// # Errors
    ///
    /// - [`GameError::OutOfPlayerRange`] if `player_count` is outside 2..=21.
    /// - [`GameError::TooManyPlayersForMap`] if a player has no start marker.
    #[instrument(skip(grid), fields(session_id = %id))]
    pub fn create(
        id: &str,
        map_label: &str,
        grid: Grid,
        player_count: usize,
        seed: Option<u64>,
    ) -> Result<Self, GameError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&player_count) {
            warn!(player_count, "Player count out of range");
            return Err(GameError::OutOfPlayerRange);
        }

        let markers = grid.start_markers();
        let players = (0..player_count)
            .map(|index| {
                let letter = player_letter(index).ok_or(GameError::OutOfPlayerRange)?;
                let start = markers
                    .get(&letter.to_ascii_lowercase())
                    .copied()
                    .ok_or(GameError::TooManyPlayersForMap)?;
                Ok(Player::new(letter, start))
            })
            .collect::<Result<Vec<_>, GameError>>()
            .inspect_err(|_| warn!(player_count, "Map lacks start markers"))?;

        let session = Self {
            id: id.to_string(),
            map_label: map_label.to_string(),
            seed,
            forest: grid.forest_position().map(Forest::new),
            original: grid.clone(),
            grid,
            players,
            current: 0,
            rng: seed.map(ChaCha8Rng::seed_from_u64),
            winner: None,
        };
        info!(
            players = session.players.len(),
            seeded = seed.is_some(),
            forest = session.forest.is_some(),
            "Session created"
        );
        Ok(session)
    }

    /// The player whose turn it is.
    pub fn current_player(&self) -> &Player {
        &self.players[self.current]
    }

    /// Index of the current player in turn order.
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// True if the session rolls its own dice.
    pub fn is_seeded(&self) -> bool {
        self.seed.is_some()
    }

    /// Looks up a player by letter.
    pub fn player(&self, letter: char) -> Option<&Player> {
        self.players.iter().find(|player| *player.letter() == letter)
    }

    /// Phase of the current turn.
    pub fn phase(&self) -> TurnPhase {
        let player = self.current_player();
        TurnPhase::from_flags(
            self.winner.is_some(),
            player.has_pending_obstacle(),
            player.has_rolled(),
        )
    }

    /// True if no figure stands on the current player's start cell.
    pub fn is_start_empty(&self) -> bool {
        self.grid
            .cell(*self.current_player().start())
            .is_some_and(|cell| cell.figure().is_none())
    }

    /// Session-level availability of a command.
    ///
    /// Commands that do not depend on session state are always permitted
    /// here; [`is_command_available`](crate::is_command_available) handles them.
    #[instrument(skip(self), fields(session_id = %self.id))]
    pub fn permits(&self, kind: CommandKind) -> bool {
        let player = self.current_player();
        let open = self.winner.is_none();
        match kind {
            CommandKind::CurrentPlayer => open,
            CommandKind::RollDice => open && !player.has_rolled(),
            CommandKind::NewFigure => {
                open && !player.all_figures_in_play() && self.is_start_empty()
            }
            CommandKind::Move => open && player.has_rolled() && !player.has_pending_obstacle(),
            CommandKind::SkipTurn => open && player.has_rolled(),
            CommandKind::MoveObstacle => open && player.has_pending_obstacle(),
            CommandKind::Rematch => !open,
            _ => true,
        }
    }

    fn require(&self, kind: CommandKind) -> Result<(), GameError> {
        if self.permits(kind) {
            Ok(())
        } else {
            warn!(session_id = %self.id, %kind, phase = %self.phase(), "Command not available");
            Err(GameError::CommandNotAvailable)
        }
    }

    // ─────────────────────────────────────────────────────────────
    //  Commands
    // ─────────────────────────────────────────────────────────────

    /// Rolls the current player's dice.
    ///
    /// Seeded sessions roll themselves and must not be given a value;
    /// unseeded sessions must be given a value in 1..=6.
    ///
    /// # Errors
    ///
    /// [`GameError::AlreadyRolled`], [`GameError::InvalidDiceRoll`], or
    /// [`GameError::CommandNotAvailable`] once the game is won.
    #[instrument(skip(self), fields(session_id = %self.id, player = %self.current_player().letter()))]
    pub fn roll_dice(&mut self, value: Option<u8>) -> Result<Vec<GameEvent>, GameError> {
        if self.winner.is_some() {
            return Err(GameError::CommandNotAvailable);
        }
        if self.current_player().has_rolled() {
            warn!("Dice already rolled this turn");
            return Err(GameError::AlreadyRolled);
        }

        let rolled = match (self.rng.as_mut(), value) {
            (Some(rng), None) => rng.gen_range(DICE_MIN..=DICE_MAX),
            (None, Some(value)) if (DICE_MIN..=DICE_MAX).contains(&value) => value,
            (rng, value) => {
                warn!(seeded = rng.is_some(), ?value, "Invalid dice roll");
                return Err(GameError::InvalidDiceRoll);
            }
        };

        self.players[self.current].set_dice(Some(rolled));
        info!(dice = rolled, "Dice rolled");
        assert_invariants(self);
        Ok(vec![GameEvent::DiceRolled(rolled)])
    }

    /// Brings the current player's next unused figure onto its start cell.
    ///
    /// Neither the dice nor the turn are consumed.
    #[instrument(skip(self), fields(session_id = %self.id, player = %self.current_player().letter()))]
    pub fn new_figure(&mut self) -> Result<Vec<GameEvent>, GameError> {
        self.require(CommandKind::NewFigure)?;

        let start = *self.current_player().start();
        let id = self.players[self.current]
            .bring_in_figure()
            .ok_or(GameError::CommandNotAvailable)?;
        if let Some(cell) = self.grid.cell_mut(start) {
            cell.set_figure(Some(id));
        }

        info!(figure = %id, position = %start, "Figure entered the board");
        assert_invariants(self);
        Ok(vec![GameEvent::FigureEntered(id)])
    }

    /// Moves one of the current player's figures along `legs`.
    ///
    /// The path must spend the dice exactly. After landing, the figure picks
    /// up an obstacle (the turn stays), wins on the target, or passes the turn.
    ///
    /// # Errors
    ///
    /// [`GameError::InvalidFigure`] if `figure` is not one of the current
    /// player's figures in play, any path error from
    /// [`resolve_figure_path`], or [`GameError::ProtectedZoneCapture`].
    #[instrument(skip(self, legs), fields(session_id = %self.id, figure = %figure))]
    pub fn move_figure(
        &mut self,
        figure: FigureId,
        legs: &[Leg],
    ) -> Result<Vec<GameEvent>, GameError> {
        self.require(CommandKind::Move)?;

        let player = self.current_player();
        let from = player
            .figure_in_play(figure)
            .and_then(|f| *f.position())
            .ok_or_else(|| {
                warn!("Figure is not in play for the current player");
                GameError::InvalidFigure
            })?;
        let dice = (*player.dice()).ok_or(GameError::CommandNotAvailable)?;

        let to = resolve_figure_path(legs, dice, from, &self.grid)?;
        let mut events = self.place_figure(Some(from), to, figure)?;
        events.push(GameEvent::FigureMoved { figure, to });

        let (has_obstacle, is_target) = self
            .grid
            .cell(to)
            .map(|cell| (cell.has_obstacle(), cell.is_target()))
            .unwrap_or_default();

        if has_obstacle {
            events.push(self.pick_up_obstacle(to));
        } else if is_target {
            let letter = *self.current_player().letter();
            self.winner = Some(letter);
            info!(winner = %letter, "Player reached the target");
            events.push(GameEvent::Won(letter));
        } else {
            events.push(self.change_current_player());
        }

        assert_invariants(self);
        Ok(events)
    }

    /// Drops the carried obstacle at the end of `legs` and passes the turn.
    ///
    /// # Errors
    ///
    /// Any error from [`resolve_obstacle_path`].
    #[instrument(skip(self, legs), fields(session_id = %self.id, player = %self.current_player().letter()))]
    pub fn move_obstacle(&mut self, legs: &[Leg]) -> Result<Vec<GameEvent>, GameError> {
        self.require(CommandKind::MoveObstacle)?;

        let obstacle = self
            .current_player()
            .pending_obstacle()
            .clone()
            .ok_or(GameError::CommandNotAvailable)?;
        let to = resolve_obstacle_path(legs, *obstacle.position(), &self.grid)?;

        self.grid.put(obstacle.relocated(to));
        self.players[self.current].set_pending_obstacle(None);
        info!(position = %to, "Obstacle placed");

        let events = vec![GameEvent::ObstaclePlaced(to), self.change_current_player()];
        assert_invariants(self);
        Ok(events)
    }

    /// Ends the current player's turn. A carried obstacle stays carried.
    #[instrument(skip(self), fields(session_id = %self.id, player = %self.current_player().letter()))]
    pub fn skip_turn(&mut self) -> Result<Vec<GameEvent>, GameError> {
        self.require(CommandKind::SkipTurn)?;
        let event = self.change_current_player();
        assert_invariants(self);
        Ok(vec![event])
    }

    /// Restarts a finished game on the same map with the same players.
    ///
    /// Figures, dice, obstacles, the forest and the grid are reset; the dice
    /// generator keeps its sequence.
    #[instrument(skip(self), fields(session_id = %self.id))]
    pub fn rematch(&mut self) -> Result<Vec<GameEvent>, GameError> {
        self.require(CommandKind::Rematch)?;

        self.players = self
            .players
            .iter()
            .map(|player| Player::new(*player.letter(), *player.start()))
            .collect();
        self.current = 0;
        self.winner = None;
        self.grid = self.original.clone();
        if let Some(forest) = self.forest.as_mut() {
            forest.clear();
        }

        info!("Session restarted");
        assert_invariants(self);
        Ok(vec![GameEvent::TurnPassed(*self.current_player().letter())])
    }

    // ─────────────────────────────────────────────────────────────
    //  Board mutation
    // ─────────────────────────────────────────────────────────────

    /// Puts `figure` on `to`, hitting whatever stands there.
    ///
    /// A figure on a protected zone cannot be hit; the whole move is refused
    /// before anything changes. A hit figure goes to the forest when the map
    /// has one and back to its owner's unused figures otherwise. A figure of
    /// the mover's own standing on `to` is sent back to the unused figures.
    #[instrument(skip(self), fields(session_id = %self.id))]
    fn place_figure(
        &mut self,
        from: Option<Position>,
        to: Position,
        figure: FigureId,
    ) -> Result<Vec<GameEvent>, GameError> {
        let destination = self.grid.cell(to).ok_or(GameError::OutOfBounds)?;
        let occupant = (*destination.figure()).filter(|occupant| *occupant != figure);
        let mut events = Vec::new();

        if let Some(victim) = occupant {
            if destination.is_protected_zone() {
                warn!(victim = %victim, "Cannot hit a figure on a protected zone");
                return Err(GameError::ProtectedZoneCapture);
            }
            if victim.owner == figure.owner {
                debug!(displaced = %victim, "Own figure displaced");
                self.player_mut(victim.owner)
                    .ok_or(GameError::FigureNotInPlay)?
                    .return_to_unused(victim)?;
            } else {
                self.capture(victim)?;
                events.push(GameEvent::Hit {
                    attacker: figure.owner,
                    victim: victim.owner,
                });
            }
        }

        if let Some(from) = from {
            self.vacate(from, figure);
        }
        if let Some(cell) = self.grid.cell_mut(to) {
            cell.set_figure(Some(figure));
        }
        if let Some(moved) = self
            .player_mut(figure.owner)
            .and_then(|player| player.figure_in_play_mut(figure))
        {
            moved.set_position(Some(to));
        }

        info!(from = ?from, to = %to, "Figure placed");
        Ok(events)
    }

    /// Takes a hit figure off the board.
    ///
    /// # Errors
    ///
    /// [`GameError::FigureNotInPlay`] if the victim is not in play for its
    /// owner; nothing changes in that case.
    #[instrument(skip(self), fields(session_id = %self.id, victim = %victim))]
    fn capture(&mut self, victim: FigureId) -> Result<(), GameError> {
        let owner = self
            .players
            .iter()
            .position(|player| player.figure_in_play(victim).is_some())
            .ok_or_else(|| {
                warn!("Hit figure is not in play");
                GameError::FigureNotInPlay
            })?;

        match self.forest.as_mut() {
            Some(forest) => {
                forest.capture(victim);
                let position = *forest.position();
                if let Some(held) = self.players[owner].figure_in_play_mut(victim) {
                    held.set_position(Some(position));
                }
                self.refresh_forest_cell();
                info!(forest = %position, "Figure sent to the forest");
            }
            None => {
                self.players[owner].return_to_unused(victim)?;
                info!("Figure returned to its owner");
            }
        }
        Ok(())
    }

    /// Clears `figure` from where it stood, the forest or a grid cell.
    fn vacate(&mut self, from: Position, figure: FigureId) {
        let in_forest = self
            .forest
            .as_ref()
            .is_some_and(|forest| *forest.position() == from);
        if in_forest {
            if let Some(forest) = self.forest.as_mut() {
                forest.release(figure);
            }
            self.refresh_forest_cell();
        } else if let Some(cell) = self.grid.cell_mut(from) {
            cell.set_figure(None);
        }
    }

    fn refresh_forest_cell(&mut self) {
        if let Some(forest) = self.forest.as_ref() {
            let (position, kind) = (*forest.position(), forest.kind());
            if let Some(cell) = self.grid.cell_mut(position) {
                cell.set_kind(kind);
            }
        }
    }

    /// Lifts the obstacle at `position` into the current player's hands.
    fn pick_up_obstacle(&mut self, position: Position) -> GameEvent {
        if let Some(cell) = self.grid.cell_mut(position) {
            let snapshot = cell.obstacle_snapshot();
            cell.lift_obstacle();
            self.players[self.current].set_pending_obstacle(Some(snapshot));
            info!(position = %position, "Obstacle picked up");
        }
        GameEvent::ObstaclePickedUp(position)
    }

    /// Clears the outgoing player's dice and hands the turn to the next player.
    fn change_current_player(&mut self) -> GameEvent {
        self.players[self.current].set_dice(None);
        self.current = (self.current + 1) % self.players.len();
        let letter = *self.current_player().letter();
        info!(player = %letter, "Turn passed");
        GameEvent::TurnPassed(letter)
    }

    fn player_mut(&mut self, letter: char) -> Option<&mut Player> {
        self.players.iter_mut().find(|player| *player.letter() == letter)
    }

    #[cfg(test)]
    pub(crate) fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(rows: &[&str], players: usize, seed: Option<u64>) -> Session {
        let grid = Grid::from_rows(rows).expect("valid map");
        Session::create("test", "map.txt", grid, players, seed).expect("valid session")
    }

    #[test]
    fn test_create_assigns_starts() {
        let session = session(&["aPPT", "bPPP"], 2, None);
        assert_eq!(session.players().len(), 2);
        assert_eq!(*session.players()[1].start(), Position::new(1, 0));
        assert_eq!(session.phase(), TurnPhase::AwaitingRoll);
    }

    #[test]
    fn test_create_rejects_player_counts() {
        let grid = Grid::from_rows(&["aPPT", "bPPP"]).expect("valid map");
        assert_eq!(
            Session::create("s", "m", grid.clone(), 1, None).err(),
            Some(GameError::OutOfPlayerRange)
        );
        assert_eq!(
            Session::create("s", "m", grid.clone(), 22, None).err(),
            Some(GameError::OutOfPlayerRange)
        );
        assert_eq!(
            Session::create("s", "m", grid, 3, None).err(),
            Some(GameError::TooManyPlayersForMap)
        );
    }

    #[test]
    fn test_unseeded_roll_needs_value() {
        let mut session = session(&["aPPT", "bPPP"], 2, None);
        assert_eq!(session.roll_dice(None), Err(GameError::InvalidDiceRoll));
        assert_eq!(session.roll_dice(Some(7)), Err(GameError::InvalidDiceRoll));
        assert_eq!(session.roll_dice(Some(0)), Err(GameError::InvalidDiceRoll));
        assert_eq!(session.roll_dice(Some(3)), Ok(vec![GameEvent::DiceRolled(3)]));
        assert_eq!(session.roll_dice(Some(3)), Err(GameError::AlreadyRolled));
    }

    #[test]
    fn test_seeded_roll_is_deterministic() {
        let mut first = session(&["aPPT", "bPPP"], 2, Some(42));
        let mut second = session(&["aPPT", "bPPP"], 2, Some(42));
        assert_eq!(first.roll_dice(Some(3)), Err(GameError::InvalidDiceRoll));
        let a = first.roll_dice(None).expect("rolled");
        let b = second.roll_dice(None).expect("rolled");
        assert_eq!(a, b);
        let value = first.current_player().dice().expect("rolled");
        assert!((DICE_MIN..=DICE_MAX).contains(&value));
    }

    #[test]
    fn test_winning_move() {
        let mut session = session(&["aPPT", "bPPP"], 2, None);
        session.new_figure().expect("start empty");
        session.roll_dice(Some(3)).expect("rolled");
        let events = session
            .move_figure(FigureId::new('A', 1), &Leg::pairs(&["3", "right"]))
            .expect("valid path");
        assert_eq!(events.last(), Some(&GameEvent::Won('A')));
        assert_eq!(*session.winner(), Some('A'));
        assert!(session.phase().is_finished());
        assert!(!session.permits(CommandKind::RollDice));
        assert!(session.permits(CommandKind::Rematch));
    }

    #[test]
    fn test_move_passes_turn_and_clears_dice() {
        let mut session = session(&["aPPPT", "bPPPP"], 2, None);
        session.new_figure().expect("start empty");
        session.roll_dice(Some(2)).expect("rolled");
        let events = session
            .move_figure(FigureId::new('A', 1), &Leg::pairs(&["2", "right"]))
            .expect("valid path");
        assert_eq!(events.last(), Some(&GameEvent::TurnPassed('B')));
        assert_eq!(*session.current_player().letter(), 'B');
        assert_eq!(*session.players()[0].dice(), None);
        let cell = session.grid().cell(Position::new(0, 2)).expect("inside");
        assert_eq!(*cell.figure(), Some(FigureId::new('A', 1)));
        let start = session.grid().cell(Position::new(0, 0)).expect("inside");
        assert_eq!(*start.figure(), None);
    }

    #[test]
    fn test_rejected_move_changes_nothing() {
        let mut session = session(&["aPPT", "bPPP"], 2, None);
        session.new_figure().expect("start empty");
        session.roll_dice(Some(2)).expect("rolled");
        let before = session.clone();
        assert_eq!(
            session.move_figure(FigureId::new('A', 1), &Leg::pairs(&["1", "right"])),
            Err(GameError::InvalidMoveCount)
        );
        assert_eq!(session.grid(), before.grid());
        assert_eq!(session.players(), before.players());
    }

    #[test]
    fn test_unknown_figure_rejected() {
        let mut session = session(&["aPPT", "bPPP"], 2, None);
        session.roll_dice(Some(1)).expect("rolled");
        assert_eq!(
            session.move_figure(FigureId::new('A', 1), &Leg::pairs(&["1", "right"])),
            Err(GameError::InvalidFigure)
        );
        session.new_figure().expect("start empty");
        assert_eq!(
            session.move_figure(FigureId::new('B', 1), &Leg::pairs(&["1", "right"])),
            Err(GameError::InvalidFigure)
        );
    }

    #[test]
    fn test_skip_keeps_pending_obstacle() {
        let mut session = session(&["aOPT", "bPPP"], 2, None);
        session.new_figure().expect("start empty");
        session.roll_dice(Some(1)).expect("rolled");
        let events = session
            .move_figure(FigureId::new('A', 1), &Leg::pairs(&["1", "right"]))
            .expect("lands on obstacle");
        assert_eq!(
            events.last(),
            Some(&GameEvent::ObstaclePickedUp(Position::new(0, 1)))
        );
        assert_eq!(session.phase(), TurnPhase::ObstaclePending);
        assert!(!session.permits(CommandKind::Move));

        session.skip_turn().expect("dice rolled");
        assert!(session.players()[0].has_pending_obstacle());
        assert_eq!(*session.current_player().letter(), 'B');
    }
}
