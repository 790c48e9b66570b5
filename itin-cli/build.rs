//! Build script for itin-cli.
//!
//! This script generates man pages at build time using clap_mangen.
//! The generated man page is placed in OUT_DIR for inclusion in release builds.
//!
//! Note: We build a minimal command structure here rather than importing from
//! the main crate, since build scripts cannot depend on the crate being built.

use clap::{Arg, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Build the CLI command structure for man page generation.
///
/// IMPORTANT: Keep this structure synchronized with src/cli.rs
/// When adding/removing/modifying commands, update both files.
fn build_cli() -> Command {
    Command::new("itin")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Plan trip itineraries day by day")
        .long_about(
            "Command-line tool for planning trip itineraries as day-by-day event timelines",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .help("Override the data directory location")
                .value_name("PATH")
                .global(true)
                .env("ITIN_DATA_DIR"),
        )
        .arg(
            Arg::new("busy-timeout")
                .long("busy-timeout")
                .help("Override the default busy timeout (in seconds)")
                .value_name("SECONDS")
                .global(true)
                .env("ITIN_BUSY_TIMEOUT"),
        )
        .arg(
            Arg::new("disable-autoinit")
                .long("disable-autoinit")
                .help("Disable automatic database initialization")
                .global(true)
                .action(clap::ArgAction::SetTrue)
                .env("ITIN_DISABLE_AUTOINIT"),
        )
        .subcommands(vec![
            Command::new("init")
                .about("Initialize itin data directory and database")
                .long_about("Set up the itin database and configuration"),
            Command::new("trip")
                .about("Manage trips")
                .long_about("Create, list, show, update, and delete trips")
                .subcommands(vec![
                    Command::new("add").about("Create a new trip"),
                    Command::new("list").about("List all trips"),
                    Command::new("show").about("Show a single trip with its event summary"),
                    Command::new("update").about("Update trip fields"),
                    Command::new("delete").about("Delete a trip and all of its events"),
                ]),
            Command::new("event")
                .about("Manage itinerary events")
                .long_about("Create, list, show, update, delete, restore, and pin events")
                .subcommands(vec![
                    Command::new("add")
                        .about("Create a new event, suggesting times when none are given"),
                    Command::new("list").about("List a trip's events in timeline order"),
                    Command::new("show").about("Show a single event with its details"),
                    Command::new("update").about("Update event fields"),
                    Command::new("delete").about("Soft-delete an event"),
                    Command::new("restore").about("Restore a soft-deleted event"),
                    Command::new("pin").about("Toggle an event's pinned flag"),
                ]),
            Command::new("suggest")
                .about("Suggest start and end times for a new event")
                .long_about(
                    "Preview the start and end times the library would assign to a new event",
                ),
            Command::new("reorder")
                .about("Reorder a trip's events and recompute their times")
                .long_about(
                    "Rewrite a trip's timeline to the given event order, keeping pinned starts",
                ),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .long_about("Generate shell completion scripts for bash, zsh, fish, or PowerShell"),
        ])
}

fn main() {
    // Generate man pages at build time
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").unwrap());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).unwrap();

    // Generate main itin.1 man page
    let app = build_cli();
    let man = Man::new(app);
    let mut buffer = Vec::new();
    man.render(&mut buffer).unwrap();

    fs::write(man_dir.join("itin.1"), buffer).unwrap();

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
}
