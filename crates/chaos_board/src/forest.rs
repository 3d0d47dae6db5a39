//! The forest: shared holding pen for hit figures on village maps.

use crate::{CellType, FigureId, Position};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Holding area at a fixed grid position.
///
/// Captured figures stay in their owner's in-play queue and carry the forest
/// position; the forest only records which figures it currently holds.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct Forest {
    position: Position,
    captured: Vec<FigureId>,
}

impl Forest {
    /// Creates an empty forest at `position`.
    pub fn new(position: Position) -> Self {
        Self {
            position,
            captured: Vec::new(),
        }
    }

    /// True if no figure is held.
    pub fn is_empty(&self) -> bool {
        self.captured.is_empty()
    }

    /// True if `figure` is held here.
    pub fn holds(&self, figure: FigureId) -> bool {
        self.captured.contains(&figure)
    }

    /// Cell type the forest cell should currently show.
    pub fn kind(&self) -> CellType {
        if self.is_empty() {
            CellType::EmptyForest
        } else {
            CellType::OccupiedForest
        }
    }

    /// Adds a hit figure to the end of the captured list.
    #[instrument(skip(self), fields(figure = %figure))]
    pub(crate) fn capture(&mut self, figure: FigureId) {
        self.captured.push(figure);
        debug!(held = self.captured.len(), "Figure sent to forest");
    }

    /// Lets `figure` leave the forest. Returns false if it was not held.
    #[instrument(skip(self), fields(figure = %figure))]
    pub(crate) fn release(&mut self, figure: FigureId) -> bool {
        let before = self.captured.len();
        self.captured.retain(|held| *held != figure);
        let released = self.captured.len() != before;
        debug!(released, held = self.captured.len(), "Figure left forest");
        released
    }

    /// Drops every captured figure.
    pub(crate) fn clear(&mut self) {
        self.captured.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_follows_captured_list() {
        let mut forest = Forest::new(Position::new(1, 3));
        assert_eq!(forest.kind(), CellType::EmptyForest);

        let figure = FigureId::new('B', 1);
        forest.capture(figure);
        assert_eq!(forest.kind(), CellType::OccupiedForest);
        assert!(forest.holds(figure));

        assert!(forest.release(figure));
        assert_eq!(forest.kind(), CellType::EmptyForest);
        assert!(!forest.release(figure));
    }

    #[test]
    fn test_capture_keeps_order() {
        let mut forest = Forest::new(Position::new(0, 0));
        forest.capture(FigureId::new('A', 2));
        forest.capture(FigureId::new('B', 1));
        assert_eq!(
            forest.captured(),
            &vec![FigureId::new('A', 2), FigureId::new('B', 1)]
        );
    }
}
