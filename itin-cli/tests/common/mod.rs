//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing, including:
//! - Test environment setup with temporary directories
//! - Command builder helpers for common patterns
//! - Fixture helpers that create trips and events through the binary
//!
//! The fixture dates below all land inside the standard trip created by
//! [`TestEnv::add_trip_simple`] (2026-05-01 through 2026-05-10).

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test environment with isolated data directory.
///
/// This struct provides an isolated test environment with:
/// - A temporary directory for test files
/// - A separate data directory for the itin database
/// - Helper methods for common CLI operations
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory
    pub temp_path: PathBuf,
    /// Path to the itin data directory
    pub data_dir: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    ///
    /// This creates:
    /// - A temporary directory for test files
    /// - A data directory path (not created yet - itin will create it)
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir.path().to_path_buf();
        let data_dir = temp_path.join("itin-data");

        Self {
            temp_dir,
            temp_path,
            data_dir,
        }
    }

    /// Get a bare command builder without pre-configured flags.
    ///
    /// This returns a Command with only the itin binary, allowing tests
    /// to have full control over all flags including --data-dir.
    /// Use this when you need to override the data directory or test
    /// global flag behavior.
    pub fn command_bare(&self) -> Command {
        Command::cargo_bin("itin").expect("Failed to find itin binary")
    }

    /// Get a command builder with the data directory pre-configured.
    ///
    /// This is a convenience method that returns a Command with:
    /// - The itin binary
    /// - The --data-dir flag set to this environment's data directory
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.arg("--data-dir").arg(&self.data_dir);
        cmd
    }

    /// Get the temp path.
    pub fn path(&self) -> &Path {
        &self.temp_path
    }

    /// Create a trip and return its id.
    ///
    /// Runs `itin trip add` with the given fields and parses the id the
    /// command prints to stdout.
    ///
    /// # Panics
    /// Panics if the command fails or doesn't print a valid id.
    pub fn add_trip(&self, name: &str, destination: &str, start: &str, end: &str) -> i64 {
        let output = self
            .command()
            .arg("trip")
            .arg("add")
            .arg(name)
            .arg(destination)
            .arg("--start")
            .arg(start)
            .arg("--end")
            .arg(end)
            .output()
            .expect("Failed to run trip add");

        assert!(
            output.status.success(),
            "Trip add failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );

        let stdout = String::from_utf8(output.stdout).expect("Invalid UTF-8 in output");
        stdout.trim().parse().expect("Output is not a valid trip id")
    }

    /// Create a trip with standard fixture dates (2026-05-01 to 2026-05-10).
    pub fn add_trip_simple(&self) -> i64 {
        self.add_trip("Lisbon", "Portugal", "2026-05-01", "2026-05-10")
    }

    /// Create an event with suggested times and return its id.
    ///
    /// Runs `itin event add` without --start/--end so the times come from
    /// the day's suggestion.
    ///
    /// # Panics
    /// Panics if the command fails or doesn't print a valid id.
    pub fn add_event(&self, trip_id: i64, title: &str, date: &str) -> i64 {
        let output = self
            .command()
            .arg("event")
            .arg("add")
            .arg(trip_id.to_string())
            .arg(title)
            .arg("--date")
            .arg(date)
            .output()
            .expect("Failed to run event add");

        assert!(
            output.status.success(),
            "Event add failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );

        let stdout = String::from_utf8(output.stdout).expect("Invalid UTF-8 in output");
        stdout.trim().parse().expect("Output is not a valid event id")
    }

    /// Create an event with explicit times and return its id.
    ///
    /// Similar to `add_event` but passes --start and --end (HH:MM).
    pub fn add_event_at(
        &self,
        trip_id: i64,
        title: &str,
        date: &str,
        start: &str,
        end: &str,
    ) -> i64 {
        let output = self
            .command()
            .arg("event")
            .arg("add")
            .arg(trip_id.to_string())
            .arg(title)
            .arg("--date")
            .arg(date)
            .arg("--start")
            .arg(start)
            .arg("--end")
            .arg(end)
            .output()
            .expect("Failed to run event add");

        assert!(
            output.status.success(),
            "Event add failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );

        let stdout = String::from_utf8(output.stdout).expect("Invalid UTF-8 in output");
        stdout.trim().parse().expect("Output is not a valid event id")
    }

    /// List a trip's events and return stdout (table format).
    pub fn list_events(&self, trip_id: i64) -> String {
        let output = self
            .command()
            .arg("event")
            .arg("list")
            .arg(trip_id.to_string())
            .output()
            .expect("Failed to run event list");

        assert!(
            output.status.success(),
            "Event list failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );

        String::from_utf8(output.stdout).expect("Invalid UTF-8 in output")
    }

    /// Show an event and return stdout (key-value format).
    pub fn show_event(&self, event_id: i64) -> String {
        let output = self
            .command()
            .arg("event")
            .arg("show")
            .arg(event_id.to_string())
            .output()
            .expect("Failed to run event show");

        assert!(
            output.status.success(),
            "Event show failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );

        String::from_utf8(output.stdout).expect("Invalid UTF-8 in output")
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

/// Helper to parse an id from command output.
///
/// This function takes the stdout from an add command and extracts the
/// printed id, handling surrounding whitespace.
#[allow(dead_code)]
pub fn parse_id(output: &str) -> i64 {
    output.trim().parse().expect("Output is not a valid id")
}
