//! Habit CLI Application
//!
//! Command-line interface for the habit tracker.

mod args;
mod cli;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::{Cli, ShowArgs};
use habit_core::DataProviderBuilder;
use log::info;
use renderer::TerminalRenderer;
use Commands::*;

fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        no_color,
        command,
    } = Args::parse();

    let provider = DataProviderBuilder::new()
        .with_database_path(database_file)
        .build()
        .context("Failed to open habit database")?;

    let cli = Cli::new(provider, TerminalRenderer::new(!no_color));

    info!("habit started");

    match command {
        Some(Category { command }) => cli.handle_category_command(command),
        Some(Tracker { command }) => cli.handle_tracker_command(command),
        Some(Mark(args)) => cli.mark(args),
        Some(Unmark(args)) => cli.unmark(args),
        Some(Show(args)) => cli.show(args),
        None => cli.show(ShowArgs {
            date: None,
            search: None,
            json: false,
        }),
    }
}
