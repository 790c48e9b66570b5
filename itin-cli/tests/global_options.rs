//! Comprehensive integration tests for global CLI options.
//!
//! These tests verify global flags and environment variables that affect
//! all commands, including:
//! - --verbose flag
//! - --quiet flag
//! - --data-dir override
//! - --busy-timeout override
//! - --disable-autoinit flag
//! - Environment variable handling (ITIN_DATA_DIR, ITIN_BUSY_TIMEOUT, etc.)
//! - Configuration file handling (user config.yaml, project itin.yaml)
//! - Precedence rules (CLI flags > env vars > project file > user file)

mod common;

use common::TestEnv;
use predicates::prelude::*;
use std::fs;

// ============================================================================
// Verbose Flag Tests
// ============================================================================

/// Test that --verbose doesn't disturb machine-readable output.
///
/// Verbose diagnostics go to stderr, so stdout must stay parseable.
#[test]
fn test_verbose_flag_accepted() {
    let env = TestEnv::new();

    let output = env
        .command()
        .arg("--verbose")
        .arg("trip")
        .arg("add")
        .arg("Lisbon")
        .arg("Portugal")
        .arg("--start")
        .arg("2026-05-01")
        .arg("--end")
        .arg("2026-05-10")
        .output()
        .expect("Failed to run trip add");

    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(
        stdout.trim().parse::<i64>().is_ok(),
        "Stdout should still carry the bare trip id: {stdout}"
    );
}

/// Test --verbose works with listing commands.
#[test]
fn test_verbose_flag_works_with_commands() {
    let env = TestEnv::new();
    let trip_id = env.add_trip_simple();

    env.command()
        .arg("--verbose")
        .arg("trip")
        .arg("list")
        .assert()
        .success();

    env.command()
        .arg("--verbose")
        .arg("event")
        .arg("list")
        .arg(trip_id.to_string())
        .assert()
        .success();
}

// ============================================================================
// Quiet Flag Tests
// ============================================================================

/// Test --quiet suppresses confirmation messages.
///
/// Update confirmations are chatter; --quiet drops them while leaving the
/// exit code intact.
#[test]
fn test_quiet_suppresses_confirmations() {
    let env = TestEnv::new();
    let trip_id = env.add_trip_simple();

    // Without --quiet the update confirms on stdout
    let output = env
        .command()
        .arg("trip")
        .arg("update")
        .arg(trip_id.to_string())
        .arg("--name")
        .arg("Lisbon and Porto")
        .output()
        .expect("Failed to run trip update");
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(
        stdout.contains("Updated trip"),
        "Update should confirm by default: {stdout}"
    );

    // With --quiet the confirmation disappears
    let output = env
        .command()
        .arg("--quiet")
        .arg("trip")
        .arg("update")
        .arg(trip_id.to_string())
        .arg("--name")
        .arg("Lisbon")
        .output()
        .expect("Failed to run trip update");
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(
        stdout.trim().is_empty(),
        "Quiet update should print nothing: {stdout}"
    );
}

/// Test --quiet keeps listing output.
///
/// Listings are the requested result, not chatter, so they survive --quiet.
#[test]
fn test_quiet_keeps_list_output() {
    let env = TestEnv::new();
    let trip_id = env.add_trip_simple();
    env.add_event(trip_id, "Castle visit", "2026-05-02");

    let output = env
        .command()
        .arg("--quiet")
        .arg("event")
        .arg("list")
        .arg(trip_id.to_string())
        .output()
        .expect("Failed to run event list");

    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(
        stdout.contains("Castle visit"),
        "Quiet listing should still show events: {stdout}"
    );
}

/// Test that --quiet and --verbose together is handled gracefully.
#[test]
fn test_quiet_and_verbose_together() {
    let env = TestEnv::new();

    env.command()
        .arg("--quiet")
        .arg("--verbose")
        .arg("trip")
        .arg("list")
        .assert()
        .success();
}

// ============================================================================
// Data Directory Tests
// ============================================================================

/// Test --data-dir places the database in the given directory.
#[test]
fn test_data_dir_flag_creates_database() {
    let env = TestEnv::new();
    env.add_trip_simple();

    assert!(
        env.data_dir.join("itin.db").exists(),
        "Database should live in the overridden data directory"
    );
}

/// Test that different data directories are independent.
#[test]
fn test_data_dir_isolation() {
    let env_a = TestEnv::new();
    let env_b = TestEnv::new();

    env_a.add_trip_simple();

    let output = env_b
        .command()
        .arg("trip")
        .arg("list")
        .output()
        .expect("Failed to run trip list");

    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(
        !stdout.contains("Lisbon"),
        "Second data directory should not see the first one's trips: {stdout}"
    );
}

/// Test --data-dir with a relative path.
#[test]
fn test_data_dir_with_relative_path() {
    let env = TestEnv::new();

    env.command_bare()
        .current_dir(&env.temp_path)
        .arg("--data-dir")
        .arg("nested/itin-data")
        .arg("trip")
        .arg("add")
        .arg("Lisbon")
        .arg("Portugal")
        .arg("--start")
        .arg("2026-05-01")
        .arg("--end")
        .arg("2026-05-10")
        .assert()
        .success();

    assert!(
        env.temp_path.join("nested/itin-data/itin.db").exists(),
        "Relative data dir should resolve against the working directory"
    );
}

/// Test that global flags are accepted after the subcommand.
#[test]
fn test_global_data_dir_after_subcommand() {
    let env = TestEnv::new();
    env.add_trip_simple();

    let output = env
        .command_bare()
        .arg("trip")
        .arg("list")
        .arg("--data-dir")
        .arg(&env.data_dir)
        .output()
        .expect("Failed to run trip list");

    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(
        stdout.contains("Lisbon"),
        "Trailing --data-dir should be honored: {stdout}"
    );
}

// ============================================================================
// Busy Timeout Tests
// ============================================================================

/// Test --busy-timeout flag is accepted.
#[test]
fn test_busy_timeout_flag_accepted() {
    let env = TestEnv::new();

    env.command()
        .arg("--busy-timeout")
        .arg("30")
        .arg("trip")
        .arg("list")
        .assert()
        .success();
}

/// Test --busy-timeout with a non-numeric value.
#[test]
fn test_busy_timeout_invalid_value() {
    let env = TestEnv::new();

    let output = env
        .command()
        .arg("--busy-timeout")
        .arg("forever")
        .arg("trip")
        .arg("list")
        .output()
        .expect("Failed to run trip list");

    assert!(!output.status.success());

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(
        stderr.contains("invalid value"),
        "Clap should reject the value: {stderr}"
    );
}

// ============================================================================
// Autoinit Tests
// ============================================================================

/// Test that without --disable-autoinit the database appears on first use.
#[test]
fn test_autoinit_creates_database() {
    let env = TestEnv::new();

    assert!(!env.data_dir.exists());

    env.command().arg("trip").arg("list").assert().success();

    assert!(
        env.data_dir.join("itin.db").exists(),
        "First use should create the database"
    );
}

/// Test --disable-autoinit prevents database creation.
#[test]
fn test_disable_autoinit_prevents_database_creation() {
    let env = TestEnv::new();

    env.command()
        .arg("--disable-autoinit")
        .arg("trip")
        .arg("list")
        .assert()
        .code(3);

    assert!(
        !env.data_dir.exists(),
        "Data directory should not be created"
    );
}

/// Test --disable-autoinit with an existing database.
///
/// The flag only refuses to create a database, it never refuses to use one.
#[test]
fn test_disable_autoinit_with_existing_database() {
    let env = TestEnv::new();
    env.add_trip_simple();

    let output = env
        .command()
        .arg("--disable-autoinit")
        .arg("trip")
        .arg("list")
        .output()
        .expect("Failed to run trip list");

    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(
        stdout.contains("Lisbon"),
        "Existing database should be usable: {stdout}"
    );
}

/// Test disabling autoinit through the project configuration file.
#[test]
fn test_disable_autoinit_via_project_config() {
    let env = TestEnv::new();

    fs::write(env.temp_path.join("itin.yaml"), "disable_autoinit: true\n")
        .expect("Failed to write config");

    env.command()
        .current_dir(&env.temp_path)
        .arg("trip")
        .arg("list")
        .assert()
        .code(3);
}

// ============================================================================
// Environment Variable Tests
// ============================================================================

/// Test ITIN_DATA_DIR environment variable.
#[test]
fn test_itin_data_dir_env_variable() {
    let env = TestEnv::new();
    let custom_data = env.temp_path.join("env-data");

    env.command_bare()
        .env("ITIN_DATA_DIR", &custom_data)
        .arg("trip")
        .arg("add")
        .arg("Lisbon")
        .arg("Portugal")
        .arg("--start")
        .arg("2026-05-01")
        .arg("--end")
        .arg("2026-05-10")
        .assert()
        .success();

    assert!(
        custom_data.join("itin.db").exists(),
        "Database should be created where the env var points"
    );
}

/// Test --data-dir flag overrides ITIN_DATA_DIR.
///
/// CLI flags have higher precedence than environment variables.
#[test]
fn test_data_dir_flag_overrides_env() {
    let env = TestEnv::new();
    let env_data = env.temp_path.join("env-data");
    let flag_data = env.temp_path.join("flag-data");

    env.command_bare()
        .env("ITIN_DATA_DIR", &env_data)
        .arg("--data-dir")
        .arg(&flag_data)
        .arg("trip")
        .arg("list")
        .assert()
        .success();

    assert!(flag_data.exists(), "Flag location should be used");
    assert!(!env_data.exists(), "Env location should not be created");
}

/// Test ITIN_BUSY_TIMEOUT environment variable.
#[test]
fn test_itin_busy_timeout_env_variable() {
    let env = TestEnv::new();

    env.command()
        .env("ITIN_BUSY_TIMEOUT", "30")
        .arg("trip")
        .arg("list")
        .assert()
        .success();
}

/// Test --busy-timeout flag overrides ITIN_BUSY_TIMEOUT.
///
/// An unparseable env value only matters when the flag is absent.
#[test]
fn test_busy_timeout_flag_overrides_env() {
    let env = TestEnv::new();

    // Env alone: rejected by clap
    env.command()
        .env("ITIN_BUSY_TIMEOUT", "not-a-number")
        .arg("trip")
        .arg("list")
        .assert()
        .failure();

    // Flag present: env is never consulted
    env.command()
        .env("ITIN_BUSY_TIMEOUT", "not-a-number")
        .arg("--busy-timeout")
        .arg("10")
        .arg("trip")
        .arg("list")
        .assert()
        .success();
}

/// Test ITIN_DISABLE_AUTOINIT environment variable.
#[test]
fn test_itin_disable_autoinit_env_variable() {
    let env = TestEnv::new();

    env.command()
        .env("ITIN_DISABLE_AUTOINIT", "true")
        .arg("trip")
        .arg("list")
        .assert()
        .code(3);

    assert!(!env.data_dir.exists());
}

/// Test an explicit false value keeps auto-init on.
#[test]
fn test_disable_autoinit_env_false() {
    let env = TestEnv::new();

    env.command()
        .env("ITIN_DISABLE_AUTOINIT", "false")
        .arg("trip")
        .arg("list")
        .assert()
        .success();

    assert!(
        env.data_dir.join("itin.db").exists(),
        "Auto-init should still run"
    );
}

// ============================================================================
// Configuration File Tests
// ============================================================================

/// Test that the user config file sets the default output format.
#[test]
fn test_user_config_sets_output_format() {
    let env = TestEnv::new();

    fs::create_dir_all(&env.data_dir).expect("Failed to create data dir");
    fs::write(env.data_dir.join("config.yaml"), "output_format: json\n")
        .expect("Failed to write config");

    env.add_trip_simple();

    let output = env
        .command()
        .arg("trip")
        .arg("list")
        .output()
        .expect("Failed to run trip list");

    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let parsed: serde_json::Value =
        serde_json::from_str(&stdout).expect("Config-driven output should be JSON");
    assert_eq!(parsed[0]["name"], "Lisbon");
}

/// Test that the project config overrides the user config.
#[test]
fn test_project_config_overrides_user_config() {
    let env = TestEnv::new();

    fs::create_dir_all(&env.data_dir).expect("Failed to create data dir");
    fs::write(env.data_dir.join("config.yaml"), "output_format: json\n")
        .expect("Failed to write user config");
    fs::write(env.temp_path.join("itin.yaml"), "output_format: yaml\n")
        .expect("Failed to write project config");

    env.add_trip_simple();

    let output = env
        .command()
        .current_dir(&env.temp_path)
        .arg("trip")
        .arg("list")
        .output()
        .expect("Failed to run trip list");

    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(
        stdout.contains("name: Lisbon"),
        "Project config should win with YAML output: {stdout}"
    );
    assert!(
        !stdout.contains("\"name\""),
        "Output should not be JSON: {stdout}"
    );
}

/// Test that --format overrides the configured default.
#[test]
fn test_format_flag_overrides_config() {
    let env = TestEnv::new();

    fs::create_dir_all(&env.data_dir).expect("Failed to create data dir");
    fs::write(env.data_dir.join("config.yaml"), "output_format: json\n")
        .expect("Failed to write config");

    env.add_trip_simple();

    let output = env
        .command()
        .arg("trip")
        .arg("list")
        .arg("--format")
        .arg("table")
        .output()
        .expect("Failed to run trip list");

    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(
        stdout.starts_with("ID\t"),
        "Explicit --format should beat the config file: {stdout}"
    );
}

/// Test that a configured busy timeout is accepted.
#[test]
fn test_config_busy_timeout_accepted() {
    let env = TestEnv::new();

    fs::create_dir_all(&env.data_dir).expect("Failed to create data dir");
    fs::write(env.data_dir.join("config.yaml"), "busy_timeout_seconds: 30\n")
        .expect("Failed to write config");

    env.command().arg("trip").arg("list").assert().success();
}

// ============================================================================
// Combined Flags Tests
// ============================================================================

/// Test combining multiple global flags.
#[test]
fn test_multiple_global_flags() {
    let env = TestEnv::new();

    let output = env
        .command()
        .arg("--quiet")
        .arg("--busy-timeout")
        .arg("10")
        .arg("trip")
        .arg("add")
        .arg("Lisbon")
        .arg("Portugal")
        .arg("--start")
        .arg("2026-05-01")
        .arg("--end")
        .arg("2026-05-10")
        .output()
        .expect("Failed to run trip add");

    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(
        stdout.trim().parse::<i64>().is_ok(),
        "Id output should survive combined flags: {stdout}"
    );
}

/// Test that --help works with global flags present.
#[test]
fn test_help_with_global_flags() {
    let env = TestEnv::new();

    env.command()
        .arg("--help")
        .assert()
        .code(0)
        .stdout(predicate::str::contains("Usage:"));
}
