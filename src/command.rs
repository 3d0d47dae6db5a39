//! Parsing of console lines into typed commands.
//!
//! Parsing happens in two steps so that availability can be checked in
//! between: [`classify`] finds the command keyword, [`Command::parse`] turns
//! the remaining tokens into typed parameters.

use chaos_board::{CommandKind, FigureId, GameError, Leg, MAX_OBSTACLE_LEGS};
use derive_more::{Display, Error, From};
use strum::IntoEnumIterator;
use tracing::{debug, instrument, warn};

/// Fewest parameters of `start session`: id, map and player count.
const START_SESSION_MIN_PARAMS: usize = 3;
/// Most parameters of `start session`, with the seed.
const START_SESSION_MAX_PARAMS: usize = 4;

/// Malformed command line.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum ParseError {
    /// No command keyword matches, or a parameterless command got parameters.
    #[display("wrong command or parameters.")]
    UnknownCommand,

    /// Parameters of a session command have the wrong count.
    #[display("wrong command or parameters.")]
    WrongParameters,

    /// `start session` needs three or four parameters.
    #[display("wrong command parameters.")]
    StartSessionParameters,

    /// A move has the wrong number of path tokens.
    #[display("an invalid path has been passed!")]
    InvalidPath,
}

/// Anything that rejects a console line.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error, From)]
pub enum ConsoleError {
    /// The line could not be parsed.
    #[display("{_0}")]
    Parse(ParseError),
    /// The game refused the command.
    #[display("{_0}")]
    Game(GameError),
}

/// A command with typed parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `quit`
    Quit,
    /// `help`
    Help,
    /// `show session [id]`
    ShowSession(Option<String>),
    /// `start session <id> <map> <players> [seed]`
    StartSession {
        /// New session id.
        id: String,
        /// Map path as typed.
        map: String,
        /// Number of players.
        players: usize,
        /// Seed for self-rolling dice.
        seed: Option<u64>,
    },
    /// `delete session <id>`
    DeleteSession(String),
    /// `switch session <id>`
    SwitchSession(String),
    /// `show`
    Show,
    /// `current player`
    CurrentPlayer,
    /// `roll dice [value]`
    RollDice(Option<u8>),
    /// `new figure`
    NewFigure,
    /// `move <figure> (<distance> <direction>)+`
    Move {
        /// Figure to move.
        figure: FigureId,
        /// Path legs in order.
        legs: Vec<Leg>,
    },
    /// `move obstacle <distance> <direction> [<distance> <direction>]`
    MoveObstacle(Vec<Leg>),
    /// `skip turn`
    SkipTurn,
    /// `rematch`
    Rematch,
}

/// True for kinds whose keyword may be followed by parameters.
fn takes_parameters(kind: CommandKind) -> bool {
    matches!(
        kind,
        CommandKind::ShowSession
            | CommandKind::StartSession
            | CommandKind::DeleteSession
            | CommandKind::SwitchSession
            | CommandKind::RollDice
            | CommandKind::Move
            | CommandKind::MoveObstacle
    )
}

/// Finds the command keyword at the start of `line`.
///
/// Returns the kind and the parameter tokens after the keyword. The longest
/// matching keyword wins, so `move obstacle` is never read as `move`.
///
/// # Errors
///
/// [`ParseError::UnknownCommand`] if no keyword matches or a command that
/// takes no parameters is followed by more tokens.
#[instrument]
pub fn classify(line: &str) -> Result<(CommandKind, Vec<&str>), ParseError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();

    let matched = CommandKind::iter()
        .map(|kind| (kind, kind.as_ref().split(' ').count()))
        .filter(|(kind, words)| {
            tokens.len() >= *words && tokens[..*words].join(" ") == kind.as_ref()
        })
        .max_by_key(|(_, words)| *words);

    let (kind, words) = matched.ok_or_else(|| {
        debug!("No command keyword matched");
        ParseError::UnknownCommand
    })?;
    let params = tokens[words..].to_vec();

    if !takes_parameters(kind) && !params.is_empty() {
        debug!(%kind, "Parameterless command got parameters");
        return Err(ParseError::UnknownCommand);
    }
    debug!(%kind, params = params.len(), "Command classified");
    Ok((kind, params))
}

fn parse_number<T: std::str::FromStr>(token: &str) -> Option<T> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    token.parse().ok()
}

impl Command {
    /// Converts the parameters of a classified line.
    ///
    /// # Errors
    ///
    /// Arity problems as [`ParseError`]; malformed figure names, player
    /// counts, seeds and dice values as the matching [`GameError`].
    #[instrument]
    pub fn parse(kind: CommandKind, params: &[&str]) -> Result<Self, ConsoleError> {
        let single = || match params {
            [id] => Ok(id.to_string()),
            _ => Err(ParseError::WrongParameters),
        };

        let command = match kind {
            CommandKind::Quit => Command::Quit,
            CommandKind::Help => Command::Help,
            CommandKind::Show => Command::Show,
            CommandKind::CurrentPlayer => Command::CurrentPlayer,
            CommandKind::NewFigure => Command::NewFigure,
            CommandKind::SkipTurn => Command::SkipTurn,
            CommandKind::Rematch => Command::Rematch,
            CommandKind::ShowSession => match params {
                [] => Command::ShowSession(None),
                [id] => Command::ShowSession(Some(id.to_string())),
                _ => return Err(ParseError::WrongParameters.into()),
            },
            CommandKind::DeleteSession => Command::DeleteSession(single()?),
            CommandKind::SwitchSession => Command::SwitchSession(single()?),
            CommandKind::StartSession => Self::parse_start_session(params)?,
            CommandKind::RollDice => match params {
                [] => Command::RollDice(None),
                [value] => Command::RollDice(Some(
                    parse_number(value).ok_or(GameError::InvalidDiceRoll)?,
                )),
                _ => return Err(GameError::InvalidDiceRoll.into()),
            },
            CommandKind::Move => {
                if params.len() < 3 || params.len() % 2 == 0 {
                    warn!(tokens = params.len(), "Move path has wrong arity");
                    return Err(ParseError::InvalidPath.into());
                }
                let figure: FigureId = params[0].parse()?;
                Command::Move {
                    figure,
                    legs: Leg::pairs(&params[1..]),
                }
            }
            CommandKind::MoveObstacle => {
                if params.len() != 2 && params.len() != 2 * MAX_OBSTACLE_LEGS {
                    warn!(tokens = params.len(), "Obstacle path has wrong arity");
                    return Err(ParseError::InvalidPath.into());
                }
                Command::MoveObstacle(Leg::pairs(params))
            }
        };
        Ok(command)
    }

    fn parse_start_session(params: &[&str]) -> Result<Self, ConsoleError> {
        if !(START_SESSION_MIN_PARAMS..=START_SESSION_MAX_PARAMS).contains(&params.len()) {
            return Err(ParseError::StartSessionParameters.into());
        }
        let players = parse_number(params[2]).ok_or(GameError::OutOfPlayerRange)?;
        let seed = match params.get(3) {
            Some(token) => Some(parse_number(token).ok_or(GameError::OutOfPlayerRange)?),
            None => None,
        };
        Ok(Command::StartSession {
            id: params[0].to_string(),
            map: params[1].to_string(),
            players,
            seed,
        })
    }
}
