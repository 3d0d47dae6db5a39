//! The rectangular board built from a text map.

use crate::{Cell, CellType, GameError, Position};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info, instrument, warn};

/// Symbols that are illegal anywhere on a map.
const INVALID_SYMBOLS: [char; 2] = ['z', 't'];

/// Rectangular matrix of cells.
///
/// Short source rows are padded with [`CellType::NonExistent`] cells so that
/// every row has the same width. Cloning a grid copies every cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    rows: Vec<Vec<Cell>>,
    width: usize,
}

impl Grid {
    /// Builds and validates a grid from map rows.
    ///
    /// # Errors
    ///
    /// - [`GameError::InvalidField`] if there are no rows or every row is empty.
    /// - [`GameError::InvalidCharacter`] if a lowercase `z` or `t` appears.
    /// - [`GameError::InvalidForestVillage`] if a forest appears without a
    ///   village or a village without a forest.
    #[instrument(skip(rows), fields(row_count = rows.len()))]
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, GameError> {
        let width = rows
            .iter()
            .map(|row| row.as_ref().chars().count())
            .max()
            .unwrap_or(0);
        if width == 0 {
            warn!("Map has no cells");
            return Err(GameError::InvalidField);
        }

        let mut has_forest = false;
        let mut has_village = false;
        let mut has_invalid = false;

        let mut cells = Vec::with_capacity(rows.len());
        for (row_index, row) in rows.iter().enumerate() {
            let mut line = Vec::with_capacity(width);
            for (column, symbol) in row.as_ref().chars().enumerate() {
                let cell = Cell::from_symbol(symbol, Position::new(row_index, column));
                match cell.kind() {
                    CellType::EmptyForest => has_forest = true,
                    kind if kind.is_village() => has_village = true,
                    _ if INVALID_SYMBOLS.contains(&symbol) => has_invalid = true,
                    _ => {}
                }
                line.push(cell);
            }
            for column in line.len()..width {
                line.push(Cell::non_existent(Position::new(row_index, column)));
            }
            cells.push(line);
        }

        if has_invalid {
            warn!("Map contains an illegal symbol");
            return Err(GameError::InvalidCharacter);
        }
        if has_forest != has_village {
            warn!(has_forest, has_village, "Forest and village must appear together");
            return Err(GameError::InvalidForestVillage);
        }

        info!(height = cells.len(), width, "Grid built");
        Ok(Self { rows: cells, width })
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// True if `position` lies inside the grid.
    pub fn contains(&self, position: Position) -> bool {
        position.row < self.height() && position.column < self.width
    }

    /// Returns the cell at `position`, or `None` outside the grid.
    pub fn cell(&self, position: Position) -> Option<&Cell> {
        self.rows.get(position.row)?.get(position.column)
    }

    /// Mutable access to the cell at `position`.
    pub(crate) fn cell_mut(&mut self, position: Position) -> Option<&mut Cell> {
        self.rows.get_mut(position.row)?.get_mut(position.column)
    }

    /// Replaces the cell at its own position.
    pub(crate) fn put(&mut self, cell: Cell) {
        if let Some(slot) = self.cell_mut(*cell.position()) {
            *slot = cell;
        }
    }

    /// Iterates over the rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.rows.iter().map(Vec::as_slice)
    }

    /// Iterates over every cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.rows.iter().flatten()
    }

    /// Collects start marker positions keyed by marker character.
    ///
    /// When a marker occurs several times the last one in row-major order wins.
    #[instrument(skip(self))]
    pub fn start_markers(&self) -> BTreeMap<char, Position> {
        let markers: BTreeMap<char, Position> = self
            .cells()
            .filter_map(|cell| cell.marker().map(|marker| (marker, *cell.position())))
            .collect();
        debug!(count = markers.len(), "Collected start markers");
        markers
    }

    /// Position of the forest, the last empty forest cell in row-major order.
    pub fn forest_position(&self) -> Option<Position> {
        self.cells()
            .filter(|cell| *cell.kind() == CellType::EmptyForest)
            .map(|cell| *cell.position())
            .last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FigureId;

    #[test]
    fn test_short_rows_are_padded() {
        let grid = Grid::from_rows(&["aPPT", "bP"]).expect("valid map");
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.width(), 4);
        let padded = grid.cell(Position::new(1, 3)).expect("inside");
        assert_eq!(padded.kind(), &CellType::NonExistent);
    }

    #[test]
    fn test_empty_map_is_invalid() {
        let rows: [&str; 0] = [];
        assert_eq!(Grid::from_rows(&rows), Err(GameError::InvalidField));
        assert_eq!(Grid::from_rows(&["", ""]), Err(GameError::InvalidField));
    }

    #[test]
    fn test_forest_requires_village() {
        assert_eq!(
            Grid::from_rows(&["aPPfT"]),
            Err(GameError::InvalidForestVillage)
        );
        assert_eq!(
            Grid::from_rows(&["aPpPT"]),
            Err(GameError::InvalidForestVillage)
        );
        assert!(Grid::from_rows(&["aPpfT"]).is_ok());
    }

    #[test]
    fn test_lowercase_target_is_invalid() {
        assert_eq!(Grid::from_rows(&["aPPt"]), Err(GameError::InvalidCharacter));
        assert_eq!(Grid::from_rows(&["aPzT"]), Err(GameError::InvalidCharacter));
    }

    #[test]
    fn test_invalid_character_reported_before_forest_mismatch() {
        assert_eq!(Grid::from_rows(&["afzT"]), Err(GameError::InvalidCharacter));
    }

    #[test]
    fn test_start_markers_and_forest() {
        let grid = Grid::from_rows(&["aPpT", "bPof"]).expect("valid map");
        let markers = grid.start_markers();
        assert_eq!(markers.get(&'a'), Some(&Position::new(0, 0)));
        assert_eq!(markers.get(&'b'), Some(&Position::new(1, 0)));
        assert_eq!(grid.forest_position(), Some(Position::new(1, 3)));
    }

    #[test]
    fn test_clone_is_independent() {
        let original = Grid::from_rows(&["aPPT"]).expect("valid map");
        let mut copy = original.clone();
        assert_eq!(copy, original);

        let position = Position::new(0, 1);
        copy.cell_mut(position)
            .expect("inside")
            .set_figure(Some(FigureId::new('A', 1)));

        assert_eq!(original.cell(position).and_then(|c| *c.figure()), None);
        assert_ne!(copy, original);
    }
}
