//! Error types for the workout engine library.

use std::path::PathBuf;

use thiserror::Error;

use crate::models::SessionStatus;

/// Comprehensive error type for all workout engine operations.
///
/// Not-found variants deliberately cover both "absent" and "owned by a
/// different user" so that ownership mismatches never disclose whether
/// the entity exists.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// Workout session not found for the given ID (or not owned by caller)
    #[error("Workout session with ID {id} not found")]
    SessionNotFound { id: i64 },
    /// Session set not found for the given ID (or not owned by caller)
    #[error("Session set with ID {id} not found")]
    SetNotFound { id: i64 },
    /// Workout plan not found for the given ID (or not owned by caller)
    #[error("Workout plan with ID {id} not found")]
    PlanNotFound { id: i64 },
    /// Operation not legal from the session's current lifecycle state
    #[error("Session must be '{required}' to {action} (currently '{actual}')")]
    InvalidState {
        action: &'static str,
        required: SessionStatus,
        actual: SessionStatus,
    },
    /// A second in-progress session would violate the uniqueness invariant
    #[error(
        "A workout session is already in progress. \
         Complete or abandon the current session first"
    )]
    SessionInProgress,
    /// Set mutation attempted while the parent session is not active
    #[error(
        "Session sets can only be updated while the workout session \
         is in progress (session is '{status}')"
    )]
    SessionNotActive { status: SessionStatus },
    /// Input fails a field-level business rule
    #[error("Invalid input for field '{field}': {reason}")]
    Validation { field: String, reason: String },
    /// Session cannot be completed while sets remain pending
    #[error(
        "Cannot complete session: all sets must be completed or skipped, \
         found {pending} pending"
    )]
    PendingSets { pending: i64 },
    /// Started sessions carry history and must not be deleted
    #[error("Cannot delete session {id}: only scheduled sessions can be deleted")]
    NotDeletable { id: i64 },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl EngineError {
    /// Creates a database error with a message and its rusqlite source.
    pub fn database(message: impl Into<String>, source: rusqlite::Error) -> Self {
        Self::Database {
            message: message.into(),
            source,
        }
    }

    /// Creates an input validation error for a field.
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Extension trait for database-related Results providing concise
/// context mapping.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| EngineError::database(message, e))
    }
}

/// Result type alias for workout engine operations
pub type Result<T> = std::result::Result<T, EngineError>;
