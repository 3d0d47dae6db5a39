//! Cell types and the cell overlay flags.
//!
//! A cell is a tagged variant: its [`CellType`] plus overlay flags for a
//! figure and an obstacle. Mutators keep the three consistent, e.g. lifting
//! an obstacle degrades an obstacle cell to the matching pathway.

use crate::{FigureId, Position};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Map symbol for a pathway cell.
pub const PATHWAY_SYMBOL: char = 'P';
/// Map symbol for a village pathway cell.
pub const PATHWAY_VILLAGE_SYMBOL: char = 'p';
/// Map symbol for an obstacle cell.
pub const OBSTACLE_SYMBOL: char = 'O';
/// Map symbol for a village obstacle cell.
pub const OBSTACLE_VILLAGE_SYMBOL: char = 'o';
/// Map symbol for the target cell.
pub const TARGET_SYMBOL: char = 'T';
/// Map symbol for a protected zone.
pub const PROTECTED_ZONE_SYMBOL: char = 'Z';
/// Map symbol for a forest without captured figures.
pub const EMPTY_FOREST_SYMBOL: char = 'f';
/// Map symbol for a forest holding captured figures.
pub const OCCUPIED_FOREST_SYMBOL: char = 'F';
/// Map symbol for an empty cell.
pub const EMPTY_SYMBOL: char = ' ';
/// Map symbol for a cell that does not exist (row padding).
pub const NON_EXISTENT_SYMBOL: char = '\0';

/// Kind of a grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::EnumIter)]
pub enum CellType {
    /// Walkable pathway.
    Pathway,
    /// Walkable pathway of a village map.
    PathwayVillage,
    /// Obstacle that can be picked up.
    Obstacle,
    /// Obstacle of a village map.
    ObstacleVillage,
    /// The cell every player races to.
    Target,
    /// Figures standing here cannot be hit.
    ProtectedZone,
    /// Forest holding no captured figures.
    EmptyForest,
    /// Forest holding captured figures.
    OccupiedForest,
    /// Gap in the board.
    Empty,
    /// Start marker of a player.
    PlayerStart,
    /// Padding beyond the end of a short map row.
    NonExistent,
}

impl CellType {
    /// Maps a map character to its cell type.
    ///
    /// Any character outside the fixed table is a player start marker.
    #[instrument]
    pub fn from_symbol(symbol: char) -> Self {
        match symbol {
            PATHWAY_SYMBOL => CellType::Pathway,
            PATHWAY_VILLAGE_SYMBOL => CellType::PathwayVillage,
            OBSTACLE_SYMBOL => CellType::Obstacle,
            OBSTACLE_VILLAGE_SYMBOL => CellType::ObstacleVillage,
            TARGET_SYMBOL => CellType::Target,
            PROTECTED_ZONE_SYMBOL => CellType::ProtectedZone,
            EMPTY_FOREST_SYMBOL => CellType::EmptyForest,
            OCCUPIED_FOREST_SYMBOL => CellType::OccupiedForest,
            EMPTY_SYMBOL => CellType::Empty,
            NON_EXISTENT_SYMBOL => CellType::NonExistent,
            _ => CellType::PlayerStart,
        }
    }

    /// Returns the fixed map symbol, if the type has one.
    ///
    /// Player starts carry their own marker and non-existent cells have none.
    pub fn symbol(self) -> Option<char> {
        match self {
            CellType::Pathway => Some(PATHWAY_SYMBOL),
            CellType::PathwayVillage => Some(PATHWAY_VILLAGE_SYMBOL),
            CellType::Obstacle => Some(OBSTACLE_SYMBOL),
            CellType::ObstacleVillage => Some(OBSTACLE_VILLAGE_SYMBOL),
            CellType::Target => Some(TARGET_SYMBOL),
            CellType::ProtectedZone => Some(PROTECTED_ZONE_SYMBOL),
            CellType::EmptyForest => Some(EMPTY_FOREST_SYMBOL),
            CellType::OccupiedForest => Some(OCCUPIED_FOREST_SYMBOL),
            CellType::Empty => Some(EMPTY_SYMBOL),
            CellType::PlayerStart | CellType::NonExistent => None,
        }
    }

    /// True for both forest variants.
    pub fn is_forest(self) -> bool {
        matches!(self, CellType::EmptyForest | CellType::OccupiedForest)
    }

    /// True for the village pathway and village obstacle.
    pub fn is_village(self) -> bool {
        matches!(self, CellType::PathwayVillage | CellType::ObstacleVillage)
    }

    /// True for the two plain pathway variants.
    pub fn is_pathway(self) -> bool {
        matches!(self, CellType::Pathway | CellType::PathwayVillage)
    }
}

/// One location of the grid.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct Cell {
    kind: CellType,
    position: Position,
    /// Start marker character; only set for [`CellType::PlayerStart`].
    marker: Option<char>,
    figure: Option<FigureId>,
    #[getter(skip)]
    has_obstacle: bool,
}

impl Cell {
    /// Builds the cell a map character describes.
    #[instrument]
    pub fn from_symbol(symbol: char, position: Position) -> Self {
        let kind = CellType::from_symbol(symbol);
        Self {
            kind,
            position,
            marker: (kind == CellType::PlayerStart).then_some(symbol),
            figure: None,
            has_obstacle: matches!(kind, CellType::Obstacle | CellType::ObstacleVillage),
        }
    }

    /// Builds a padding cell.
    pub fn non_existent(position: Position) -> Self {
        Self {
            kind: CellType::NonExistent,
            position,
            marker: None,
            figure: None,
            has_obstacle: false,
        }
    }

    /// True if an obstacle overlays this cell.
    pub fn has_obstacle(&self) -> bool {
        self.has_obstacle
    }

    /// True if the cell blocks figures passing over it.
    pub fn is_obstacle(&self) -> bool {
        matches!(self.kind, CellType::Obstacle | CellType::ObstacleVillage) || self.has_obstacle
    }

    /// True if a figure may step onto this cell.
    ///
    /// Interior steps may not touch obstacles, gaps or padding. The last step
    /// of a whole move may land on an obstacle (to pick it up) but never on a
    /// gap, padding or forest.
    #[instrument(skip(self), fields(kind = ?self.kind, position = %self.position))]
    pub fn is_free_to_move(&self, is_last_step: bool) -> bool {
        let gap = matches!(self.kind, CellType::Empty | CellType::NonExistent);
        if is_last_step {
            !gap && !self.kind.is_forest()
        } else {
            !gap && !self.is_obstacle()
        }
    }

    /// True if this cell is a protected zone.
    pub fn is_protected_zone(&self) -> bool {
        self.kind == CellType::ProtectedZone
    }

    /// True if this cell is the target.
    pub fn is_target(&self) -> bool {
        self.kind == CellType::Target
    }

    /// True if an obstacle may be dropped here.
    pub fn accepts_obstacle(&self) -> bool {
        self.kind.is_pathway() && self.figure.is_none() && !self.has_obstacle
    }

    /// Character shown for this cell when no figure stands on it.
    pub fn symbol(&self) -> Option<char> {
        self.marker.or(self.kind.symbol())
    }

    /// Puts `figure` on the cell, or clears it with `None`.
    pub(crate) fn set_figure(&mut self, figure: Option<FigureId>) {
        self.figure = figure;
    }

    /// Sets the kind; used for the forest cell flipping between empty and occupied.
    pub(crate) fn set_kind(&mut self, kind: CellType) {
        self.kind = kind;
    }

    /// Removes the obstacle, degrading the cell to the matching pathway.
    pub(crate) fn lift_obstacle(&mut self) {
        self.kind = if self.kind.is_village() {
            CellType::PathwayVillage
        } else {
            CellType::Pathway
        };
        self.has_obstacle = false;
    }

    /// Returns a detached copy of the obstacle carried by this cell.
    ///
    /// The copy keeps the obstacle's flavour (village or not) and holds no figure.
    pub(crate) fn obstacle_snapshot(&self) -> Self {
        Self {
            kind: self.kind,
            position: self.position,
            marker: None,
            figure: None,
            has_obstacle: true,
        }
    }

    /// Returns this obstacle snapshot relocated to `position`.
    pub(crate) fn relocated(&self, position: Position) -> Self {
        Self {
            position,
            figure: None,
            ..self.clone()
        }
    }
}
