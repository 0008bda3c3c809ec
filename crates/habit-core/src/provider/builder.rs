//! Builder for creating and configuring DataProvider instances.

use std::path::{Path, PathBuf};

use super::DataProvider;
use crate::{
    db::Database,
    error::{Result, TrackerError},
};

/// Builder for creating and configuring [`DataProvider`] instances.
#[derive(Debug, Clone, Default)]
pub struct DataProviderBuilder {
    database_path: Option<PathBuf>,
    in_memory: bool,
}

impl DataProviderBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/habit/habit.db` or `~/.local/share/habit/habit.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Keeps everything in memory. Takes precedence over any path.
    pub fn in_memory(mut self) -> Self {
        self.in_memory = true;
        self
    }

    /// Opens the database and wires the stores together.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::FileSystem` if the database directory cannot be
    /// created, `TrackerError::XdgDirectory` if no default location exists,
    /// and `TrackerError::Persistence` if SQLite initialization fails.
    pub fn build(self) -> Result<DataProvider> {
        if self.in_memory {
            return Ok(DataProvider::new(Database::in_memory()?));
        }

        let db_path = match self.database_path {
            Some(path) => path,
            None => Self::default_database_path()?,
        };

        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| TrackerError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        Ok(DataProvider::new(Database::new(&db_path)?))
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("habit")
            .place_data_file("habit.db")
            .map_err(|e| TrackerError::XdgDirectory(e.to_string()))
    }
}
