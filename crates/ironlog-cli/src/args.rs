use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{PlanCommands, SessionCommands, SetArgs};

/// Main command-line interface for the Ironlog workout tracker
///
/// Ironlog tracks workout sessions scheduled from plans: start a
/// session to materialize its sets, record each set as you perform
/// it, and complete or abandon the session when you are done.
#[derive(Parser)]
#[command(version, about, name = "il")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/ironlog/ironlog.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    /// User to act as (multi-user databases)
    #[arg(long, global = true, default_value_t = 1)]
    pub user: i64,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the Ironlog CLI
///
/// The CLI is organized into three main command categories:
/// - `plan`: Seed workout plans and their exercise entries
/// - `session`: Schedule sessions and drive their lifecycle
/// - `set`: Record individual sets during an active session
#[derive(Subcommand)]
pub enum Commands {
    /// Manage workout plans
    #[command(alias = "p")]
    Plan {
        #[command(subcommand)]
        command: PlanCommands,
    },
    /// Manage workout sessions
    #[command(alias = "s")]
    Session {
        #[command(subcommand)]
        command: SessionCommands,
    },
    /// Update a set in the active session
    Set(SetArgs),
}
