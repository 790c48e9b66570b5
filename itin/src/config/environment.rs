//! Environment variable handling for configuration overrides.
//!
//! This module provides support for ITIN_* environment variables that
//! override configuration file values.

use crate::config::schema::Config;
use crate::error::{Error, Result};
use std::env;
use std::path::PathBuf;

/// Handles environment variable overrides for configuration.
///
/// # Examples
///
/// ```no_run
/// use itin::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Apply environment variable overrides to config.
    ///
    /// Reads all ITIN_* environment variables and applies them to the
    /// configuration with higher precedence than file-based configs.
    ///
    /// # Errors
    ///
    /// Returns an error if any environment variable value is invalid
    /// (e.g., non-numeric timeout, invalid boolean).
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        // ITIN_DATA_DIR
        if let Ok(dir) = env::var("ITIN_DATA_DIR") {
            config.data_dir = Some(PathBuf::from(dir));
        }

        // ITIN_BUSY_TIMEOUT
        if let Ok(seconds) = env::var("ITIN_BUSY_TIMEOUT") {
            config.busy_timeout_seconds = Some(seconds.parse().map_err(|_| Error::Validation {
                field: "ITIN_BUSY_TIMEOUT".into(),
                message: "Must be a positive integer".into(),
            })?);
        }

        // ITIN_DISABLE_AUTOINIT
        if let Ok(val) = env::var("ITIN_DISABLE_AUTOINIT") {
            config.disable_autoinit = Some(Self::parse_bool("ITIN_DISABLE_AUTOINIT", &val)?);
        }

        // ITIN_OUTPUT_FORMAT
        if let Ok(format) = env::var("ITIN_OUTPUT_FORMAT") {
            config.output_format = Some(format.parse()?);
        }

        Ok(())
    }

    /// Parse a boolean value from a string.
    ///
    /// Accepts: true/1/yes/on for true, false/0/no/off for false (case-insensitive).
    fn parse_bool(field: &str, s: &str) -> Result<bool> {
        match s.to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(Error::Validation {
                field: field.into(),
                message: format!(
                    "Invalid boolean value: '{s}' (expected true/false/1/0/yes/no/on/off)"
                ),
            }),
        }
    }
}
