//! The interactive console: one command per line until `quit`.

use crate::command::{Command, ConsoleError, classify};
use crate::help::HelpTable;
use crate::map_loader::MapLoader;
use crate::render::{error_line, event_lines, render_session_grid, session_line};
use chaos_board::{GameError, GameEvent, Session, SessionManager};
use std::io::{BufRead, Write};
use tracing::{debug, info, instrument, warn};

/// Line printed when the console starts.
pub const GREETING: &str = "Welcome to CampusChaos 2024. Enter 'help' for more details.";

/// Outcome of one console line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// Lines to print on standard output.
    Lines(Vec<String>),
    /// Stop reading input.
    Quit,
}

/// Executes console lines against a set of sessions.
#[derive(Debug, Default)]
pub struct Console {
    manager: SessionManager,
    help: HelpTable,
    loader: MapLoader,
}

impl Console {
    /// Creates a console that loads maps through `loader`.
    pub fn new(loader: MapLoader) -> Self {
        Self {
            manager: SessionManager::new(),
            help: HelpTable::new(),
            loader,
        }
    }

    /// Sessions known to this console.
    pub fn manager(&self) -> &SessionManager {
        &self.manager
    }

    /// Runs one line.
    ///
    /// The command must be available before its parameters are looked at.
    ///
    /// # Errors
    ///
    /// Any [`ConsoleError`]; the console state is unchanged when one is
    /// returned.
    #[instrument(skip(self))]
    pub fn execute(&mut self, line: &str) -> Result<Response, ConsoleError> {
        let (kind, params) = classify(line)?;
        if !self.manager.is_available(kind) {
            warn!(%kind, "Command not available");
            return Err(GameError::CommandNotAvailable.into());
        }
        let command = Command::parse(kind, &params)?;
        debug!(?command, "Executing command");
        self.dispatch(command)
    }

    fn dispatch(&mut self, command: Command) -> Result<Response, ConsoleError> {
        let lines = match command {
            Command::Quit => {
                info!("Quit requested");
                return Ok(Response::Quit);
            }
            Command::Help => self.help.available(&self.manager),
            Command::ShowSession(None) => self
                .manager
                .sessions()
                .iter()
                .map(|session| session_line(session, self.manager.is_active(session.id())))
                .collect(),
            Command::ShowSession(Some(id)) => {
                let session = self.manager.find(&id).ok_or(GameError::UnknownSession)?;
                vec![session_line(session, self.manager.is_active(&id))]
            }
            Command::StartSession {
                id,
                map,
                players,
                seed,
            } => {
                let grid = self.loader.load_grid(&map)?;
                let session = self
                    .manager
                    .create_session(&id, &map, grid, players, seed)?;
                let mut lines = render_session_grid(session);
                lines.push(session.id().clone());
                lines.push(GameEvent::TurnPassed(*session.current_player().letter()).to_string());
                lines
            }
            Command::DeleteSession(id) => {
                let removed = self.manager.delete_session(&id)?;
                vec![removed.id().clone()]
            }
            Command::SwitchSession(id) => {
                let session = self.manager.switch_session(&id)?;
                vec![session.id().clone()]
            }
            Command::Show => render_session_grid(self.active()?),
            Command::CurrentPlayer => vec![self.active()?.current_player().to_string()],
            Command::RollDice(value) => event_lines(&self.active_mut()?.roll_dice(value)?),
            Command::NewFigure => event_lines(&self.active_mut()?.new_figure()?),
            Command::Move { figure, legs } => {
                event_lines(&self.active_mut()?.move_figure(figure, &legs)?)
            }
            Command::MoveObstacle(legs) => event_lines(&self.active_mut()?.move_obstacle(&legs)?),
            Command::SkipTurn => event_lines(&self.active_mut()?.skip_turn()?),
            Command::Rematch => event_lines(&self.active_mut()?.rematch()?),
        };
        Ok(Response::Lines(lines))
    }

    fn active(&self) -> Result<&Session, GameError> {
        self.manager.active().ok_or(GameError::CommandNotAvailable)
    }

    fn active_mut(&mut self) -> Result<&mut Session, GameError> {
        self.manager
            .active_mut()
            .ok_or(GameError::CommandNotAvailable)
    }
}

/// Reads commands from `input` until `quit` or end of input.
///
/// Results go to `out`, errors to `err` as `Error, <message>`.
///
/// # Errors
///
/// Only I/O failures of the three streams.
#[instrument(skip_all, fields(greeting = greeting))]
pub fn run<R, W, E>(
    console: &mut Console,
    input: R,
    out: &mut W,
    err: &mut E,
    greeting: bool,
) -> std::io::Result<()>
where
    R: BufRead,
    W: Write,
    E: Write,
{
    if greeting {
        writeln!(out, "{GREETING}")?;
    }
    for line in input.lines() {
        let line = line?;
        match console.execute(&line) {
            Ok(Response::Lines(lines)) => {
                for line in lines {
                    writeln!(out, "{line}")?;
                }
            }
            Ok(Response::Quit) => break,
            Err(e) => writeln!(err, "{}", error_line(&e))?,
        }
        out.flush()?;
    }
    info!("Console closed");
    Ok(())
}
