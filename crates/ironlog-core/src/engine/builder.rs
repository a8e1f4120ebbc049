//! Builder for creating and configuring WorkoutEngine instances.

use std::path::{Path, PathBuf};

use tokio::task;

use super::WorkoutEngine;
use crate::{
    db::Database,
    error::{EngineError, Result},
};

/// Builder for creating and configuring WorkoutEngine instances.
#[derive(Debug, Clone)]
pub struct WorkoutEngineBuilder {
    database_path: Option<PathBuf>,
}

impl WorkoutEngineBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            database_path: None,
        }
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/ironlog/ironlog.db` or
    /// `~/.local/share/ironlog/ironlog.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Builds the configured engine instance, creating the database
    /// and applying the schema eagerly so later operations only open.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::FileSystem` if the database path is invalid
    /// Returns `EngineError::Database` if database initialization fails
    pub async fn build(self) -> Result<WorkoutEngine> {
        let db_path = if let Some(path) = self.database_path {
            path
        } else {
            Self::default_database_path()?
        };

        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| EngineError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let db_path_clone = db_path.clone();
        task::spawn_blocking(move || {
            let _db = Database::new(&db_path_clone)?;
            Ok::<(), EngineError>(())
        })
        .await
        .map_err(|e| EngineError::Configuration {
            message: format!("Task join error: {e}"),
        })??;

        Ok(WorkoutEngine::new(db_path))
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("ironlog")
            .place_data_file("ironlog.db")
            .map_err(|e| EngineError::XdgDirectory(e.to_string()))
    }
}

impl Default for WorkoutEngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
