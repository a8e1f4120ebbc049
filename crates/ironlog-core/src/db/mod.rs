//! Database operations and SQLite management for workout sessions.
//!
//! This module provides the low-level store for the ironlog execution
//! engine. It handles the SQLite connection, schema application, and
//! the query interfaces for sessions, sets and the plan rows that set
//! instantiation reads from. The lifecycle guards that must survive
//! racing requests (one in-progress session per user) are enforced
//! here with SQL constraints, not just application checks.

use std::path::Path;
use std::time::Duration;

use rusqlite::Connection;

use crate::error::{DatabaseResultExt, Result};

pub mod migrations;
pub mod plan_queries;
pub mod session_queries;
pub mod set_queries;

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Creates a new database connection and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;

        // Writers from other connections queue behind the current
        // transaction instead of failing with SQLITE_BUSY, so a racing
        // second start loses at the lifecycle guards.
        connection
            .busy_timeout(Duration::from_secs(5))
            .db_context("Failed to set busy timeout")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }
}
