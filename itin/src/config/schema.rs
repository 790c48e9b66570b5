//! Configuration schema definitions.
//!
//! This module defines the configuration structure for itin, covering the
//! data directory, database lock behavior, and default output format.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{Error, Result};

/// Default busy timeout applied when no configuration or flag overrides it.
pub const DEFAULT_BUSY_TIMEOUT_SECONDS: u64 = 5;

/// Complete configuration structure.
///
/// Every field is optional; an unset field falls back to the built-in
/// default at the point of use. This keeps merging trivial: a later source
/// overrides a field only when it actually sets it.
///
/// # Examples
///
/// ```
/// use itin::config::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     data_dir: Some(PathBuf::from("/tmp/itin")),
///     busy_timeout_seconds: Some(10),
///     ..Default::default()
/// };
/// assert_eq!(config.busy_timeout().as_secs(), 10);
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Data directory holding the itinerary database.
    pub data_dir: Option<PathBuf>,

    /// Maximum time to wait for database lock acquisition (seconds).
    pub busy_timeout_seconds: Option<u64>,

    /// Disable automatic database initialization.
    pub disable_autoinit: Option<bool>,

    /// Default output format for list and show commands.
    pub output_format: Option<OutputFormat>,
}

impl Config {
    /// Overlays another configuration on top of this one.
    ///
    /// Fields set in `overlay` win; unset fields leave this configuration
    /// unchanged.
    pub fn merge_from(&mut self, overlay: Self) {
        if overlay.data_dir.is_some() {
            self.data_dir = overlay.data_dir;
        }
        if overlay.busy_timeout_seconds.is_some() {
            self.busy_timeout_seconds = overlay.busy_timeout_seconds;
        }
        if overlay.disable_autoinit.is_some() {
            self.disable_autoinit = overlay.disable_autoinit;
        }
        if overlay.output_format.is_some() {
            self.output_format = overlay.output_format;
        }
    }

    /// Validates the merged configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when `busy_timeout_seconds` is zero; a zero timeout
    /// would make every concurrent write fail immediately.
    pub fn validate(&self) -> Result<()> {
        if self.busy_timeout_seconds == Some(0) {
            return Err(Error::InvalidConfiguration {
                message: "busy_timeout_seconds must be greater than zero".into(),
            });
        }
        Ok(())
    }

    /// Returns the configured data directory, falling back to `~/.itin`.
    ///
    /// # Errors
    ///
    /// Returns an error if no directory is configured and the home
    /// directory cannot be determined.
    pub fn resolved_data_dir(&self) -> Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => crate::database::default_data_dir(),
        }
    }

    /// Returns the busy timeout as a duration.
    #[must_use]
    pub fn busy_timeout(&self) -> Duration {
        Duration::from_secs(
            self.busy_timeout_seconds
                .unwrap_or(DEFAULT_BUSY_TIMEOUT_SECONDS),
        )
    }

    /// Returns true when automatic database initialization is disabled.
    #[must_use]
    pub fn autoinit_disabled(&self) -> bool {
        self.disable_autoinit.unwrap_or(false)
    }
}

/// Output format for list and show commands.
///
/// # Examples
///
/// ```
/// use itin::config::OutputFormat;
///
/// let format: OutputFormat = "json".parse().unwrap();
/// assert_eq!(format, OutputFormat::Json);
/// assert_eq!(format.to_string(), "json");
/// ```
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable table format.
    Table,
    /// JSON output format.
    Json,
    /// YAML output format.
    Yaml,
    /// CSV output format.
    Csv,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Table => write!(f, "table"),
            Self::Json => write!(f, "json"),
            Self::Yaml => write!(f, "yaml"),
            Self::Csv => write!(f, "csv"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            "yaml" => Ok(Self::Yaml),
            "csv" => Ok(Self::Csv),
            other => Err(Error::validation(
                "output_format",
                format!("invalid output format \"{other}\" (expected table/json/yaml/csv)"),
            )),
        }
    }
}
