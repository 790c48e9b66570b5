//! Configuration system for itin.
//!
//! This module provides hierarchical configuration with support for:
//! - YAML configuration files (user config and project itin files)
//! - Environment variable overrides
//! - Programmatic configuration via builder pattern
//!
//! # Configuration Precedence
//!
//! Configuration is merged from multiple sources with the following precedence
//! (highest to lowest):
//!
//! 1. Programmatic overrides (via `ConfigBuilder::with_config`)
//! 2. Environment variables (ITIN_*)
//! 3. Project config (`itin.yaml`, discovered walking up from the working
//!    directory)
//! 4. User config (`~/.itin/config.yaml`)
//! 5. Built-in defaults
//!
//! # Examples
//!
//! Basic usage with defaults:
//!
//! ```no_run
//! use itin::config::ConfigBuilder;
//!
//! let config = ConfigBuilder::new().build().unwrap();
//! println!("Busy timeout: {:?}", config.busy_timeout());
//! ```
//!
//! Programmatic configuration:
//!
//! ```
//! use itin::config::{Config, ConfigBuilder};
//! use std::path::PathBuf;
//!
//! let custom = Config {
//!     data_dir: Some(PathBuf::from("/tmp/itin")),
//!     busy_timeout_seconds: Some(10),
//!     ..Default::default()
//! };
//!
//! let config = ConfigBuilder::new()
//!     .skip_files()
//!     .skip_env()
//!     .with_config(custom)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.busy_timeout_seconds, Some(10));
//! ```

pub mod builder;
pub mod environment;
pub mod loader;
pub mod schema;

pub use builder::ConfigBuilder;
pub use environment::EnvironmentConfig;
pub use loader::{ConfigLoader, ConfigSource};
pub use schema::{Config, OutputFormat, DEFAULT_BUSY_TIMEOUT_SECONDS};
