//! CampusChaos board - the rules of a dice-driven race across a campus map
//!
//! Players bring figures onto a grid loaded from a text map, roll dice and
//! move figures along paths that spend the dice exactly. Figures hit each
//! other, carry obstacles around and race for the target cell.
//!
//! # Architecture
//!
//! - **Grid**: cells parsed from map rows, with free-to-move rules
//! - **Path**: validation of multi-leg figure moves and obstacle drops
//! - **Session**: one game's turn state machine, hits, forest and rematch
//! - **Manager**: all sessions of a console and which one is active
//!
//! This crate performs no I/O; callers hand it parsed tokens and render the
//! returned [`GameEvent`]s.
//!
//! # Example
//!
//! ```
//! use chaos_board::{FigureId, GameEvent, Grid, Leg, SessionManager};
//!
//! # fn example() -> Result<(), chaos_board::GameError> {
//! let grid = Grid::from_rows(&["aPPT", "bPPP"])?;
//! let mut manager = SessionManager::new();
//! manager.create_session("demo", "map.txt", grid, 2, None)?;
//!
//! let session = manager.active_mut().ok_or(chaos_board::GameError::UnknownSession)?;
//! session.new_figure()?;
//! session.roll_dice(Some(3))?;
//! let events = session.move_figure(FigureId::new('A', 1), &Leg::pairs(&["3", "right"]))?;
//! assert_eq!(events.last(), Some(&GameEvent::Won('A')));
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod cell;
mod command;
mod error;
mod event;
mod figure;
mod forest;
mod grid;
mod invariants;
mod manager;
mod path;
mod phases;
mod player;
mod position;
mod session;

// Crate-level exports - Errors
pub use error::{ErrorCategory, GameError};

// Crate-level exports - Board
pub use cell::{
    Cell, CellType, EMPTY_FOREST_SYMBOL, EMPTY_SYMBOL, NON_EXISTENT_SYMBOL, OBSTACLE_SYMBOL,
    OBSTACLE_VILLAGE_SYMBOL, OCCUPIED_FOREST_SYMBOL, PATHWAY_SYMBOL, PATHWAY_VILLAGE_SYMBOL,
    PROTECTED_ZONE_SYMBOL, TARGET_SYMBOL,
};
pub use grid::Grid;
pub use position::{Direction, Position};

// Crate-level exports - Pieces and players
pub use figure::{Figure, FigureId, MAX_FIGURES};
pub use forest::Forest;
pub use player::{MAX_PLAYERS, MIN_PLAYERS, Player, RESERVED_LETTERS, player_letter};

// Crate-level exports - Movement
pub use path::{Leg, MAX_OBSTACLE_LEGS, resolve_figure_path, resolve_obstacle_path};

// Crate-level exports - Sessions
pub use command::{CommandKind, is_command_available};
pub use event::GameEvent;
pub use manager::SessionManager;
pub use phases::TurnPhase;
pub use session::{DICE_MAX, DICE_MIN, Session, is_valid_session_id};

// Crate-level exports - Invariants
pub use invariants::{
    FigureConservationInvariant, FigurePlacementInvariant, ForestConsistentInvariant, Invariant,
    InvariantSet, InvariantViolation, SessionInvariants, assert_invariants,
};
