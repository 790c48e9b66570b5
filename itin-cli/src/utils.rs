//! Utility functions for CLI operations.
//!
//! This module provides common utility functions used across CLI commands,
//! including configuration loading, database management, argument parsing,
//! and output format resolution.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{NaiveDate, NaiveDateTime};
use clap::ValueEnum;
use itin::config::OutputFormat;
use itin::{Config, ConfigBuilder, Database, DatabaseConfig, EventCategory};

use crate::error::CliError;

/// Name of the database file inside the data directory.
const DATABASE_FILE: &str = "itin.db";

/// Global CLI options shared across all commands.
#[derive(Debug, Clone)]
#[allow(dead_code)] // Fields used via pattern matching in main.rs
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Override the data directory location.
    pub data_dir: Option<PathBuf>,

    /// Override the default busy timeout (in seconds).
    pub busy_timeout: Option<u64>,

    /// Disable automatic database initialization.
    pub disable_autoinit: bool,
}

/// Output format argument shared by list and show commands.
///
/// Mirrors [`itin::config::OutputFormat`] so commands can accept `--format`
/// while the configuration file supplies the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum FormatArg {
    /// Human-readable table.
    Table,
    /// Pretty-printed JSON.
    Json,
    /// YAML document.
    Yaml,
    /// Comma-separated values.
    Csv,
}

impl From<OutputFormat> for FormatArg {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Table => FormatArg::Table,
            OutputFormat::Json => FormatArg::Json,
            OutputFormat::Yaml => FormatArg::Yaml,
            OutputFormat::Csv => FormatArg::Csv,
        }
    }
}

/// Resolve the output format for a command.
///
/// Priority: `--format` flag > configuration file > table.
pub fn resolve_format(flag: Option<FormatArg>, config: &Config) -> FormatArg {
    flag.or_else(|| config.output_format.map(FormatArg::from))
        .unwrap_or(FormatArg::Table)
}

/// Event category argument shared by the event and suggest commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum CategoryArg {
    /// Sightseeing stop, museum visit, or other generic activity.
    Activity,
    /// Meal or food stop.
    Food,
    /// Overnight stay.
    Lodging,
    /// Local transit leg.
    Transit,
    /// Flight.
    Flight,
}

impl From<CategoryArg> for EventCategory {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::Activity => EventCategory::Activity,
            CategoryArg::Food => EventCategory::Food,
            CategoryArg::Lodging => EventCategory::Lodging,
            CategoryArg::Transit => EventCategory::Transit,
            CategoryArg::Flight => EventCategory::Flight,
        }
    }
}

/// Load hierarchical configuration.
///
/// Configuration is merged from multiple sources with precedence:
/// 1. Global options (highest priority)
/// 2. Environment variables
/// 3. Configuration files
/// 4. Built-in defaults (lowest priority)
pub fn load_configuration(global: &GlobalOptions) -> Result<Config, CliError> {
    let mut builder = ConfigBuilder::new();

    if let Some(ref data_dir) = global.data_dir {
        builder = builder.with_data_dir(data_dir);
    }

    builder.build().map_err(|e| CliError::Config(e.to_string()))
}

/// Resolve the database path from global options and configuration.
fn resolve_database_path(global: &GlobalOptions, config: &Config) -> Result<PathBuf, CliError> {
    // Priority: global option > configuration > default (~/.itin)
    let data_dir = match global.data_dir {
        Some(ref dir) => dir.clone(),
        None => config
            .resolved_data_dir()
            .map_err(|e| CliError::Config(e.to_string()))?,
    };

    Ok(data_dir.join(DATABASE_FILE))
}

/// Open database with configuration.
///
/// # Errors
///
/// Returns `NoDataDirectory` if the database doesn't exist and auto-init
/// is disabled.
pub fn open_database(global: &GlobalOptions, config: &Config) -> Result<Database, CliError> {
    let db_path = resolve_database_path(global, config)?;

    if !db_path.exists() && (global.disable_autoinit || config.autoinit_disabled()) {
        return Err(CliError::NoDataDirectory);
    }

    let mut db_config = DatabaseConfig::new(db_path);

    // Set busy timeout if specified
    if let Some(timeout_seconds) = global.busy_timeout {
        db_config = db_config.with_busy_timeout(Duration::from_secs(timeout_seconds));
    } else {
        db_config = db_config.with_busy_timeout(config.busy_timeout());
    }

    Database::open(db_config).map_err(CliError::from)
}

/// Shorten a path for display.
///
/// If the path is within the home directory, show it as ~/...
/// Otherwise, show the full path.
pub fn shorten_path(path: &Path) -> String {
    if let Some(home) = home::home_dir() {
        if let Ok(relative) = path.strip_prefix(&home) {
            return format!("~/{}", relative.display());
        }
    }
    path.display().to_string()
}

/// Parse a `YYYY-MM-DD` date argument.
///
/// Parsing here rather than in clap keeps date failures on the invalid
/// arguments exit code instead of clap's own.
pub fn parse_date(value: &str) -> Result<NaiveDate, CliError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        CliError::InvalidArguments(format!("invalid date '{value}' (expected YYYY-MM-DD)"))
    })
}

/// Parse an `HH:MM` time argument against a specific day.
pub fn parse_time_on(day: NaiveDate, value: &str) -> Result<NaiveDateTime, CliError> {
    let time = chrono::NaiveTime::parse_from_str(value, "%H:%M").map_err(|_| {
        CliError::InvalidArguments(format!("invalid time '{value}' (expected HH:MM)"))
    })?;
    Ok(day.and_time(time))
}
