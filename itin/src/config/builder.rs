//! Programmatic configuration assembly.
//!
//! The builder gathers configuration from files, environment variables, and
//! programmatic overrides, merges them in precedence order, and validates
//! the result.

use std::path::{Path, PathBuf};

use crate::config::environment::EnvironmentConfig;
use crate::config::loader::ConfigLoader;
use crate::config::schema::Config;
use crate::error::Result;

/// Builds a merged [`Config`] from all configuration sources.
///
/// Sources are applied lowest precedence first: built-in defaults, then the
/// user config file, then the project `itin.yaml`, then `ITIN_*` environment
/// variables, then programmatic overrides.
///
/// # Examples
///
/// ```
/// use itin::config::ConfigBuilder;
///
/// // Pure defaults, ignoring files and the environment
/// let config = ConfigBuilder::new()
///     .skip_files()
///     .skip_env()
///     .build()
///     .unwrap();
/// assert!(config.data_dir.is_none());
/// ```
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    working_dir: Option<PathBuf>,
    data_dir: Option<PathBuf>,
    skip_files: bool,
    skip_env: bool,
    overrides: Option<Config>,
}

impl ConfigBuilder {
    /// Creates a builder with default behavior (files and env applied).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the directory the project config search starts from.
    ///
    /// Defaults to the current working directory.
    #[must_use]
    pub fn with_working_dir(mut self, dir: &Path) -> Self {
        self.working_dir = Some(dir.to_path_buf());
        self
    }

    /// Sets the data directory the user config is loaded from.
    #[must_use]
    pub fn with_data_dir(mut self, dir: &Path) -> Self {
        self.data_dir = Some(dir.to_path_buf());
        self
    }

    /// Skips configuration files entirely.
    #[must_use]
    pub const fn skip_files(mut self) -> Self {
        self.skip_files = true;
        self
    }

    /// Skips `ITIN_*` environment variables.
    #[must_use]
    pub const fn skip_env(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Applies programmatic overrides on top of every other source.
    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.overrides = Some(config);
        self
    }

    /// Builds the merged configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file cannot be read or parsed,
    /// an environment variable holds an invalid value, or the merged
    /// configuration fails validation.
    pub fn build(self) -> Result<Config> {
        let mut config = Config::default();

        if !self.skip_files {
            let working_dir = match self.working_dir {
                Some(dir) => dir,
                None => std::env::current_dir()?,
            };
            let sources = ConfigLoader::load_all(&working_dir, self.data_dir.as_deref())?;
            for source in sources {
                config.merge_from(source.config);
            }
        }

        if !self.skip_env {
            EnvironmentConfig::apply_overrides(&mut config)?;
        }

        if let Some(overrides) = self.overrides {
            config.merge_from(overrides);
        }

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::OutputFormat;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_build_defaults() {
        let config = ConfigBuilder::new().skip_files().skip_env().build().unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_build_with_overrides() {
        let overrides = Config {
            busy_timeout_seconds: Some(30),
            output_format: Some(OutputFormat::Json),
            ..Default::default()
        };

        let config = ConfigBuilder::new()
            .skip_files()
            .skip_env()
            .with_config(overrides)
            .build()
            .unwrap();

        assert_eq!(config.busy_timeout_seconds, Some(30));
        assert_eq!(config.output_format, Some(OutputFormat::Json));
    }

    #[test]
    fn test_build_reads_project_file() {
        let temp_dir = TempDir::new().unwrap();
        let data_dir = temp_dir.path().join("data");
        fs::create_dir(&data_dir).unwrap();
        fs::write(
            temp_dir.path().join("itin.yaml"),
            "busy_timeout_seconds: 42\n",
        )
        .unwrap();

        let config = ConfigBuilder::new()
            .with_working_dir(temp_dir.path())
            .with_data_dir(&data_dir)
            .skip_env()
            .build()
            .unwrap();

        assert_eq!(config.busy_timeout_seconds, Some(42));
    }

    #[test]
    fn test_overrides_beat_project_file() {
        let temp_dir = TempDir::new().unwrap();
        let data_dir = temp_dir.path().join("data");
        fs::create_dir(&data_dir).unwrap();
        fs::write(
            temp_dir.path().join("itin.yaml"),
            "busy_timeout_seconds: 42\n",
        )
        .unwrap();

        let config = ConfigBuilder::new()
            .with_working_dir(temp_dir.path())
            .with_data_dir(&data_dir)
            .skip_env()
            .with_config(Config {
                busy_timeout_seconds: Some(99),
                ..Default::default()
            })
            .build()
            .unwrap();

        assert_eq!(config.busy_timeout_seconds, Some(99));
    }

    #[test]
    fn test_user_file_loses_to_project_file() {
        let temp_dir = TempDir::new().unwrap();
        let data_dir = temp_dir.path().join("data");
        fs::create_dir(&data_dir).unwrap();
        fs::write(data_dir.join("config.yaml"), "busy_timeout_seconds: 5\n").unwrap();
        fs::write(
            temp_dir.path().join("itin.yaml"),
            "busy_timeout_seconds: 9\n",
        )
        .unwrap();

        let config = ConfigBuilder::new()
            .with_working_dir(temp_dir.path())
            .with_data_dir(&data_dir)
            .skip_env()
            .build()
            .unwrap();

        assert_eq!(config.busy_timeout_seconds, Some(9));
    }

    #[test]
    fn test_build_rejects_invalid_merged_config() {
        let result = ConfigBuilder::new()
            .skip_files()
            .skip_env()
            .with_config(Config {
                busy_timeout_seconds: Some(0),
                ..Default::default()
            })
            .build();

        assert!(result.is_err());
    }
}
