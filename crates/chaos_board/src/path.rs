//! Path resolution for figure and obstacle moves.
//!
//! Both resolvers only read the grid. They return the landing position or
//! the first rule the path breaks, so a rejected path never touches state.

use crate::{Direction, GameError, Grid, Position};
use derive_new::new;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::str::FromStr;
use tracing::{debug, instrument, warn};

/// Most legs an obstacle move may have.
pub const MAX_OBSTACLE_LEGS: usize = 2;

/// One `(distance, direction)` pair of a move, as typed by the player.
///
/// Tokens stay raw until resolution so that each leg reports its own
/// parse error in the order the legs were given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct Leg {
    /// Distance token, expected to be a positive integer.
    #[new(into)]
    pub distance: String,
    /// Direction token, one of `up`, `down`, `left`, `right`.
    #[new(into)]
    pub direction: String,
}

impl Leg {
    /// Pairs up alternating distance and direction tokens.
    ///
    /// A trailing unpaired token is dropped; arity is the parser's concern.
    pub fn pairs<S: AsRef<str>>(tokens: &[S]) -> Vec<Leg> {
        tokens
            .chunks_exact(2)
            .map(|pair| Leg::new(pair[0].as_ref(), pair[1].as_ref()))
            .collect()
    }
}

/// Parses a distance token: ASCII digits with a value of at least one.
fn parse_distance(token: &str) -> Result<usize, GameError> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(GameError::InvalidMoveCount);
    }
    match token.parse::<usize>() {
        Ok(distance) if distance >= 1 => Ok(distance),
        _ => Err(GameError::InvalidMoveCount),
    }
}

fn parse_direction(token: &str) -> Result<Direction, GameError> {
    Direction::from_str(token).map_err(|_| GameError::InvalidDirection)
}

/// Resolves a figure move of exactly `budget` unit steps.
///
/// Legs are processed in order. For each leg the distance is parsed and the
/// running total checked against the budget, then the direction is parsed,
/// then the figure walks one cell at a time. Every unit step must stay on the
/// grid, pass [`Cell::is_free_to_move`](crate::Cell::is_free_to_move), and
/// reach a position not yet visited during this move (the start counts as
/// visited). Only the final unit step of the final leg uses the stricter
/// landing rule.
///
/// # Errors
///
/// - [`GameError::InvalidMoveCount`] for a malformed distance, a running total
///   above the budget, or a final total below it.
/// - [`GameError::InvalidDirection`] for an unknown direction token.
/// - [`GameError::OutOfBounds`], [`GameError::CellNotFree`] and
///   [`GameError::AlreadyVisited`] for the first offending unit step.
#[instrument(skip(legs, grid), fields(legs = legs.len()))]
pub fn resolve_figure_path(
    legs: &[Leg],
    budget: u8,
    start: Position,
    grid: &Grid,
) -> Result<Position, GameError> {
    let budget = usize::from(budget);
    let mut visited = HashSet::from([start]);
    let mut current = start;
    let mut spent = 0usize;
    let last_leg = legs.len().saturating_sub(1);

    for (leg_index, leg) in legs.iter().enumerate() {
        let distance = parse_distance(&leg.distance)?;
        spent = spent.saturating_add(distance);
        if spent > budget {
            warn!(spent, budget, "Path exceeds dice budget");
            return Err(GameError::InvalidMoveCount);
        }
        let direction = parse_direction(&leg.direction)?;

        for step in 1..=distance {
            let is_last_step = leg_index == last_leg && step == distance;
            let next = current
                .shifted(direction, 1)
                .filter(|position| grid.contains(*position))
                .ok_or(GameError::OutOfBounds)?;
            let cell = grid.cell(next).ok_or(GameError::OutOfBounds)?;
            if !cell.is_free_to_move(is_last_step) {
                debug!(position = %next, is_last_step, "Cell blocks the path");
                return Err(GameError::CellNotFree);
            }
            if !visited.insert(next) {
                debug!(position = %next, "Cell already visited");
                return Err(GameError::AlreadyVisited);
            }
            current = next;
        }
    }

    if spent != budget {
        warn!(spent, budget, "Path does not spend the dice exactly");
        return Err(GameError::InvalidMoveCount);
    }

    debug!(from = %start, to = %current, "Figure path resolved");
    Ok(current)
}

/// Resolves where a carried obstacle lands.
///
/// Each leg jumps the obstacle its full distance from where the previous leg
/// left it, starting at `origin`. Only leg landings are bounds-checked and only
/// the final landing must [accept an obstacle](crate::Cell::accepts_obstacle).
/// Two legs may not share a direction token.
///
/// # Errors
///
/// - [`GameError::InvalidObstaclePath`] for zero or too many legs, a landing
///   outside the grid, or a final cell that cannot hold the obstacle.
/// - [`GameError::InvalidMoveCount`] for a malformed distance.
/// - [`GameError::InvalidDirection`] for an unknown or repeated direction.
#[instrument(skip(legs, grid), fields(legs = legs.len()))]
pub fn resolve_obstacle_path(
    legs: &[Leg],
    origin: Position,
    grid: &Grid,
) -> Result<Position, GameError> {
    if legs.is_empty() || legs.len() > MAX_OBSTACLE_LEGS {
        return Err(GameError::InvalidObstaclePath);
    }
    let repeated = legs.len() == MAX_OBSTACLE_LEGS && legs[0].direction == legs[1].direction;

    let mut current = origin;
    for leg in legs {
        let distance = parse_distance(&leg.distance)?;
        let direction = parse_direction(&leg.direction)?;
        if repeated {
            warn!(direction = %direction, "Obstacle moved twice in the same direction");
            return Err(GameError::InvalidDirection);
        }
        current = current
            .shifted(direction, distance)
            .filter(|position| grid.contains(*position))
            .ok_or_else(|| {
                warn!(from = %current, %direction, distance, "Obstacle leaves the grid");
                GameError::InvalidObstaclePath
            })?;
    }

    let accepts = grid.cell(current).is_some_and(|cell| cell.accepts_obstacle());
    if !accepts {
        warn!(position = %current, "Obstacle cannot be dropped here");
        return Err(GameError::InvalidObstaclePath);
    }

    debug!(from = %origin, to = %current, "Obstacle path resolved");
    Ok(current)
}
