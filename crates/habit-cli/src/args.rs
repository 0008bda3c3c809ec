use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{CategoryCommands, CompletionArgs, ShowArgs, TrackerCommands};

/// Main command-line interface for the habit tracker
///
/// Trackers are habits, which repeat on chosen weekdays, or one-off events.
/// Each tracker belongs to a category, and completing it on a day leaves a
/// mark. Running `habit` with no command shows today's trackers.
#[derive(Parser)]
#[command(version, about, name = "habit")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/habit/habit.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the habit CLI
#[derive(Subcommand)]
pub enum Commands {
    /// Manage categories
    #[command(alias = "c")]
    Category {
        #[command(subcommand)]
        command: CategoryCommands,
    },
    /// Manage trackers
    #[command(alias = "t")]
    Tracker {
        #[command(subcommand)]
        command: TrackerCommands,
    },
    /// Mark a tracker completed on a day
    #[command(alias = "m")]
    Mark(CompletionArgs),
    /// Remove a completion mark
    #[command(alias = "u")]
    Unmark(CompletionArgs),
    /// Show the trackers due on a day, grouped by category
    #[command(alias = "s")]
    Show(ShowArgs),
}
