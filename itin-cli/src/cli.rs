//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    CompletionsCommand, EventCommand, InitCommand, ReorderCommand, SuggestCommand, TripCommand,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line tool for planning trip itineraries.
#[derive(Parser)]
#[command(name = "itin")]
#[command(version, about = "Plan trip itineraries day by day", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Override the data directory location
    #[arg(long, value_name = "PATH", global = true, env = "ITIN_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Override the default busy timeout (in seconds)
    #[arg(long, value_name = "SECONDS", global = true, env = "ITIN_BUSY_TIMEOUT")]
    pub busy_timeout: Option<u64>,

    /// Disable automatic database initialization
    #[arg(long, global = true, env = "ITIN_DISABLE_AUTOINIT")]
    pub disable_autoinit: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Initialize the data directory and database
    Init(InitCommand),

    /// Manage trips
    Trip(TripCommand),

    /// Manage itinerary events
    Event(EventCommand),

    /// Suggest start and end times for a new event
    Suggest(SuggestCommand),

    /// Reorder a trip's events and recompute their times
    Reorder(ReorderCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}
