//! Configuration file discovery and loading.
//!
//! This module handles discovering and loading itin configuration files
//! from various locations with proper precedence.

use crate::config::schema::Config;
use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration source with its precedence level.
///
/// Lower precedence values are overridden by higher ones.
#[derive(Debug, Clone)]
pub struct ConfigSource {
    /// Path to the configuration file.
    pub path: PathBuf,
    /// Precedence level (higher values take priority).
    pub precedence: u8,
    /// Parsed configuration.
    pub config: Config,
}

/// Loads configuration from various sources.
///
/// # Examples
///
/// ```no_run
/// use itin::config::ConfigLoader;
/// use std::path::Path;
///
/// let sources = ConfigLoader::load_all(Path::new("."), None).unwrap();
/// println!("Found {} configuration sources", sources.len());
/// ```
pub struct ConfigLoader;

impl ConfigLoader {
    /// Discover and load all configuration files.
    ///
    /// Searches for:
    /// 1. User config at `~/.itin/config.yaml` (precedence 1)
    /// 2. Project `itin.yaml` files walking up from `working_dir` (precedence 2)
    ///
    /// The `data_dir` parameter allows overriding where the user config is
    /// loaded from.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration file exists but cannot be read
    /// or parsed.
    pub fn load_all(working_dir: &Path, data_dir: Option<&Path>) -> Result<Vec<ConfigSource>> {
        let mut sources = Vec::new();

        // Load user config (~/.itin/config.yaml or custom data dir)
        if let Some(user_config) = Self::load_user_config(data_dir)? {
            sources.push(user_config);
        }

        // Walk up directory tree looking for itin.yaml
        if let Some(project_config) = Self::discover_project_config(working_dir)? {
            sources.push(project_config);
        }

        // Sort by precedence (higher precedence last for easier processing)
        sources.sort_by_key(|s| s.precedence);

        Ok(sources)
    }

    /// Load user configuration file.
    ///
    /// If `data_dir` is provided, loads from `{data_dir}/config.yaml`.
    /// Otherwise uses the default data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    fn load_user_config(data_dir: Option<&Path>) -> Result<Option<ConfigSource>> {
        let config_path = if let Some(dir) = data_dir {
            dir.join("config.yaml")
        } else {
            Self::user_config_path()?
        };

        if !config_path.exists() {
            return Ok(None);
        }

        let config = Self::load_file(&config_path)?;
        Ok(Some(ConfigSource {
            path: config_path,
            precedence: 1, // Lowest precedence
            config,
        }))
    }

    /// Discover the project configuration by walking up directories.
    ///
    /// Stops at the first directory containing an `itin.yaml`.
    ///
    /// # Errors
    ///
    /// Returns an error if a discovered file cannot be read or parsed.
    pub fn discover_project_config(start_dir: &Path) -> Result<Option<ConfigSource>> {
        let mut current = start_dir.to_path_buf();

        loop {
            let candidate = current.join("itin.yaml");
            if candidate.exists() {
                let config = Self::load_file(&candidate)?;
                return Ok(Some(ConfigSource {
                    path: candidate,
                    precedence: 2,
                    config,
                }));
            }

            if !current.pop() {
                return Ok(None);
            }
        }
    }

    /// Load and parse a YAML configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the YAML is invalid.
    pub fn load_file(path: &Path) -> Result<Config> {
        let contents = fs::read_to_string(path).map_err(|e| Error::InvalidConfiguration {
            message: format!("failed to read {}: {e}", path.display()),
        })?;

        serde_yaml::from_str(&contents).map_err(|e| Error::InvalidConfiguration {
            message: format!("{}: {e}", path.display()),
        })
    }

    /// Get user config file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    fn user_config_path() -> Result<PathBuf> {
        let data_dir = crate::database::default_data_dir()?;
        Ok(data_dir.join("config.yaml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_nonexistent_file() {
        let result = ConfigLoader::load_file(Path::new("/nonexistent/path/config.yaml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_invalid_yaml() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("bad.yaml");
        fs::write(&config_path, "busy_timeout_seconds: [not a number").unwrap();

        let result = ConfigLoader::load_file(&config_path);
        assert!(result.is_err());
    }

    #[test]
    fn test_load_valid_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        fs::write(&config_path, "busy_timeout_seconds: 12\n").unwrap();

        let config = ConfigLoader::load_file(&config_path).unwrap();
        assert_eq!(config.busy_timeout_seconds, Some(12));
    }

    #[test]
    fn test_discover_no_config() {
        let temp_dir = TempDir::new().unwrap();
        let source = ConfigLoader::discover_project_config(temp_dir.path()).unwrap();
        assert!(source.is_none());
    }

    #[test]
    fn test_discover_itin_yaml() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("itin.yaml"), "disable_autoinit: true\n").unwrap();

        let source = ConfigLoader::discover_project_config(temp_dir.path())
            .unwrap()
            .unwrap();
        assert_eq!(source.precedence, 2);
        assert_eq!(source.config.disable_autoinit, Some(true));
    }

    #[test]
    fn test_discover_walks_up_to_parent() {
        let temp_dir = TempDir::new().unwrap();
        let child = temp_dir.path().join("child");
        fs::create_dir(&child).unwrap();

        // Put config in parent
        fs::write(
            temp_dir.path().join("itin.yaml"),
            "busy_timeout_seconds: 7\n",
        )
        .unwrap();

        // Discover from child - should find parent's config
        let source = ConfigLoader::discover_project_config(&child).unwrap().unwrap();
        assert_eq!(source.config.busy_timeout_seconds, Some(7));
    }

    #[test]
    fn test_load_all_sorts_by_precedence() {
        let temp_dir = TempDir::new().unwrap();
        let data_dir = temp_dir.path().join("data");
        fs::create_dir(&data_dir).unwrap();
        fs::write(data_dir.join("config.yaml"), "busy_timeout_seconds: 5\n").unwrap();
        fs::write(
            temp_dir.path().join("itin.yaml"),
            "busy_timeout_seconds: 9\n",
        )
        .unwrap();

        let sources = ConfigLoader::load_all(temp_dir.path(), Some(&data_dir)).unwrap();

        assert_eq!(sources.len(), 2);
        for i in 1..sources.len() {
            assert!(sources[i - 1].precedence <= sources[i].precedence);
        }
    }

    #[test]
    fn test_load_all_without_any_files() {
        let temp_dir = TempDir::new().unwrap();
        let data_dir = temp_dir.path().join("data");
        fs::create_dir(&data_dir).unwrap();

        let sources = ConfigLoader::load_all(temp_dir.path(), Some(&data_dir)).unwrap();
        assert!(sources.is_empty());
    }
}
