//! Main entry point for the itin CLI.
//!
//! This is the command-line interface for the itin trip itinerary planner.
//! It provides commands for managing trips and their event timelines:
//! - `trip`: Create, list, show, update, and delete trips
//! - `event`: Create, list, show, update, delete, restore, and pin events
//! - `suggest`: Preview the times a new event would get
//! - `reorder`: Reorder a trip's timeline and recompute times

mod cli;
mod commands;
mod error;
mod utils;

use clap::Parser;
use cli::Cli;
use utils::GlobalOptions;

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let _logger = itin::init_logger(cli.verbose, cli.quiet);

    // Convert CLI args to GlobalOptions
    let global = GlobalOptions {
        verbose: cli.verbose,
        quiet: cli.quiet,
        data_dir: cli.data_dir,
        busy_timeout: cli.busy_timeout,
        disable_autoinit: cli.disable_autoinit,
    };

    // Execute the command
    let result = match cli.command {
        cli::Command::Init(cmd) => cmd.execute(&global),
        cli::Command::Trip(cmd) => cmd.execute(&global),
        cli::Command::Event(cmd) => cmd.execute(&global),
        cli::Command::Suggest(cmd) => cmd.execute(&global),
        cli::Command::Reorder(cmd) => cmd.execute(&global),
        cli::Command::Completions(cmd) => cmd.execute(&global),
    };

    // Handle errors and set exit code
    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
