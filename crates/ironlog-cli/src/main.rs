//! Ironlog CLI Application
//!
//! Command-line interface for the ironlog workout tracker.

mod args;
mod cli;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use ironlog_core::WorkoutEngineBuilder;
use log::info;
use renderer::TerminalRenderer;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        no_color,
        user,
        command,
    } = Args::parse();

    let engine = WorkoutEngineBuilder::new()
        .with_database_path(database_file)
        .build()
        .await
        .context("Failed to initialize workout engine")?;

    let renderer = TerminalRenderer::new(!no_color);
    let cli = Cli::new(engine, renderer, user);

    info!("Ironlog started");

    match command {
        Some(Commands::Plan { command }) => cli.handle_plan_command(command).await,
        Some(Commands::Session { command }) => cli.handle_session_command(command).await,
        Some(Commands::Set(args)) => cli.handle_set_command(args).await,
        None => cli.list_sessions(None).await,
    }
}
