//! High-level lifecycle engine for workout sessions and their sets.
//!
//! The [`WorkoutEngine`] is the single place where transition legality
//! and the "all sets resolved" completion invariant are checked. It
//! coordinates between callers and the database:
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │    Callers      │    │     Engine      │    │    Database     │
//! │ (CLI, client    │───▶│ (session_ops,   │───▶│   (via db/)     │
//! │  state, sync)   │    │  set_ops)       │    │                 │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! Every operation takes the caller's user id and treats ownership
//! mismatches as not-found, so existence is never disclosed across
//! users. Presentation code never mutates statuses directly.

use std::path::PathBuf;

use tokio::task;

use crate::{
    db::Database,
    error::{EngineError, Result},
};

pub mod builder;
pub mod session_ops;
pub mod set_ops;


pub use builder::WorkoutEngineBuilder;

/// Main engine interface for managing workout sessions.
pub struct WorkoutEngine {
    pub(crate) db_path: PathBuf,
}

impl WorkoutEngine {
    /// Creates a new engine with the specified database path.
    pub(crate) fn new(db_path: PathBuf) -> Self {
        Self { db_path }
    }

    /// Runs a store operation on the blocking thread pool.
    pub(crate) async fn with_db<T, F>(&self, op: F) -> Result<T>
    where
        F: FnOnce(&mut Database) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let db_path = self.db_path.clone();
        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            op(&mut db)
        })
        .await
        .map_err(|e| EngineError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }
}
