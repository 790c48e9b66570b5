//! Database layer for persistent storage of trips and events.
//!
//! This module provides a SQLite-based storage layer for managing trip
//! itineraries, including connection management, schema versioning, and
//! CRUD operations for trips, events, and their detail records.
//!
//! # Examples
//!
//! ```no_run
//! use itin::database::{Database, DatabaseConfig};
//! use itin::DateRange;
//! use chrono::NaiveDate;
//!
//! // Open a database
//! let config = DatabaseConfig::new("/tmp/itin.db");
//! let mut db = Database::open(config).unwrap();
//!
//! // Create a trip
//! let dates = DateRange::new(
//!     NaiveDate::from_ymd_opt(2026, 5, 1).unwrap(),
//!     NaiveDate::from_ymd_opt(2026, 5, 10).unwrap(),
//! )
//! .unwrap();
//! let trip = db.create_trip("Lisbon", "Portugal", &dates).unwrap();
//!
//! // List its events
//! let events = Database::list_events_by_trip(db.connection(), trip.id).unwrap();
//! for event in events {
//!     println!("{:?}", event);
//! }
//! ```

mod config;
mod connection;
mod details;
mod events;
pub mod migrations;
mod schema;
mod trips;

#[cfg(test)]
pub mod test_util;

// Re-export public API
pub use config::{default_data_dir, resolve_database_path, DatabaseConfig};
pub use connection::Database;
pub use events::POSITION_STEP;

// Re-export migration functions for advanced use cases
pub use migrations::{check_schema_compatibility, get_schema_version, initialize_schema};
