//! Tests for figure and obstacle path resolution on loaded grids.

use chaos_board::{
    Direction, GameError, Grid, Leg, Position, resolve_figure_path, resolve_obstacle_path,
};
use strum::IntoEnumIterator;

fn open_grid() -> Grid {
    Grid::from_rows(&["PPPPP", "PPPPP", "PPaPP", "PPPPP", "PPPPT"]).expect("valid map")
}

const CENTER: Position = Position { row: 2, column: 2 };

#[test]
fn test_every_direction_within_reach() {
    let grid = open_grid();
    for direction in Direction::iter() {
        let legs = vec![Leg::new("2", direction.to_string())];
        let end = resolve_figure_path(&legs, 2, CENTER, &grid).expect("inside the grid");
        assert_eq!(Some(end), CENTER.shifted(direction, 2), "{direction}");
    }
}

#[test]
fn test_budget_must_be_spent_exactly() {
    let grid = open_grid();
    for dice in 1..=6u8 {
        let legs = Leg::pairs(&["1", "up"]);
        let result = resolve_figure_path(&legs, dice, CENTER, &grid);
        if dice == 1 {
            assert!(result.is_ok());
        } else {
            assert_eq!(result, Err(GameError::InvalidMoveCount), "dice {dice}");
        }
    }
}

#[test]
fn test_overspending_stops_before_walking() {
    let grid = open_grid();
    // The second leg would leave the grid, but the budget fails first.
    let legs = Leg::pairs(&["1", "up", "9", "up"]);
    assert_eq!(
        resolve_figure_path(&legs, 3, CENTER, &grid),
        Err(GameError::InvalidMoveCount)
    );
}

#[test]
fn test_leaving_the_grid() {
    let grid = open_grid();
    let legs = Leg::pairs(&["3", "up"]);
    assert_eq!(
        resolve_figure_path(&legs, 3, CENTER, &grid),
        Err(GameError::OutOfBounds)
    );
}

#[test]
fn test_revisiting_the_start() {
    let grid = open_grid();
    let legs = Leg::pairs(&["1", "up", "1", "down"]);
    assert_eq!(
        resolve_figure_path(&legs, 2, CENTER, &grid),
        Err(GameError::AlreadyVisited)
    );
}

#[test]
fn test_walls_and_gaps_block() {
    let grid = Grid::from_rows(&["aP PT", "POPPP"]).expect("valid map");
    let start = Position::new(0, 0);

    assert_eq!(
        resolve_figure_path(&Leg::pairs(&["3", "right"]), 3, start, &grid),
        Err(GameError::CellNotFree)
    );
    assert_eq!(
        resolve_figure_path(&Leg::pairs(&["1", "down", "2", "right"]), 3, start, &grid),
        Err(GameError::CellNotFree)
    );
    // Landing on an obstacle is allowed.
    assert_eq!(
        resolve_figure_path(&Leg::pairs(&["1", "down", "1", "right"]), 2, start, &grid),
        Ok(Position::new(1, 1))
    );
}

#[test]
fn test_bad_tokens() {
    let grid = open_grid();
    assert_eq!(
        resolve_figure_path(&Leg::pairs(&["0", "up"]), 1, CENTER, &grid),
        Err(GameError::InvalidMoveCount)
    );
    assert_eq!(
        resolve_figure_path(&Leg::pairs(&["1", "north"]), 1, CENTER, &grid),
        Err(GameError::InvalidDirection)
    );
}

#[test]
fn test_obstacle_jumps_over_everything() {
    let grid = Grid::from_rows(&["PPOPP", "PPPPP"]).expect("valid map");
    let origin = Position::new(0, 0);
    assert_eq!(
        resolve_obstacle_path(&Leg::pairs(&["4", "right"]), origin, &grid),
        Ok(Position::new(0, 4))
    );
    assert_eq!(
        resolve_obstacle_path(&Leg::pairs(&["1", "down", "2", "right"]), origin, &grid),
        Ok(Position::new(1, 2))
    );
    assert_eq!(
        resolve_obstacle_path(&Leg::pairs(&["2", "right"]), origin, &grid),
        Err(GameError::InvalidObstaclePath)
    );
    assert_eq!(
        resolve_obstacle_path(&Leg::pairs(&["5", "right"]), origin, &grid),
        Err(GameError::InvalidObstaclePath)
    );
}
