//! Reading map files from disk.

use chaos_board::{GameError, Grid};
use derive_new::new;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument, warn};

/// Resolves and reads map files.
///
/// Relative paths are taken against the configured map directory when one
/// is set, and against the working directory otherwise.
#[derive(Debug, Clone, Default, new)]
pub struct MapLoader {
    base: Option<PathBuf>,
}

impl MapLoader {
    /// Path a typed map argument refers to.
    pub fn resolve(&self, raw: &str) -> PathBuf {
        let path = Path::new(raw);
        match &self.base {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }

    /// Reads the lines of a map file.
    ///
    /// # Errors
    ///
    /// [`GameError::InvalidPath`] if the file cannot be read.
    #[instrument(skip(self))]
    pub fn load_rows(&self, raw: &str) -> Result<Vec<String>, GameError> {
        let path = self.resolve(raw);
        let content = std::fs::read_to_string(&path).map_err(|e| {
            warn!(path = %path.display(), error = %e, "Failed to read map");
            GameError::InvalidPath
        })?;
        let rows: Vec<String> = content.lines().map(str::to_string).collect();
        debug!(path = %path.display(), rows = rows.len(), "Map read");
        Ok(rows)
    }

    /// Reads and validates a map file.
    ///
    /// # Errors
    ///
    /// [`GameError::InvalidPath`] for unreadable files, otherwise any error
    /// from [`Grid::from_rows`].
    pub fn load_grid(&self, raw: &str) -> Result<Grid, GameError> {
        Grid::from_rows(&self.load_rows(raw)?)
    }
}
