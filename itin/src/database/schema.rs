//! Database schema definitions and SQL constants.
//!
//! This module contains all SQL table definitions, indices, and constants
//! related to the database schema for the itin itinerary system.

/// Current schema version for the database.
///
/// This version is stored in the metadata table and is used to ensure
/// compatibility between the database and the application.
pub const CURRENT_SCHEMA_VERSION: i32 = 1;

/// SQL statement to create the metadata table.
///
/// The metadata table stores key-value pairs for database configuration
/// and versioning information.
pub const CREATE_METADATA_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS metadata (
        key TEXT PRIMARY KEY NOT NULL,
        value TEXT NOT NULL
    )";

/// SQL statement to create the trips table.
///
/// Dates are stored as ISO-8601 TEXT (`YYYY-MM-DD`), which compares
/// chronologically under SQLite's lexicographic TEXT ordering.
pub const CREATE_TRIPS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS trips (
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL,
        destination TEXT NOT NULL,
        start_date TEXT NOT NULL,
        end_date TEXT NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )";

/// SQL statement to create the events table.
///
/// Events reference their trip with ON DELETE CASCADE: removing a trip is
/// the only path that permanently removes event rows. `deleted_at` carries
/// the soft-delete marker; every read filters on it being NULL.
pub const CREATE_EVENTS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS events (
        id INTEGER PRIMARY KEY,
        trip_id INTEGER NOT NULL REFERENCES trips(id) ON DELETE CASCADE,
        category TEXT NOT NULL,
        event_date TEXT NOT NULL,
        title TEXT NOT NULL,
        location TEXT NOT NULL DEFAULT '',
        latitude REAL,
        longitude REAL,
        start_time TEXT,
        end_time TEXT,
        pinned INTEGER NOT NULL DEFAULT 0,
        position INTEGER NOT NULL,
        notes TEXT NOT NULL DEFAULT '',
        deleted_at TEXT,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )";

/// SQL statement to create the flight details table.
///
/// One row per flight event, keyed by the event id; the row cascades away
/// with its event.
pub const CREATE_FLIGHT_DETAILS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS flight_details (
        event_id INTEGER PRIMARY KEY REFERENCES events(id) ON DELETE CASCADE,
        airline TEXT NOT NULL DEFAULT '',
        flight_number TEXT NOT NULL DEFAULT '',
        departure_airport TEXT NOT NULL DEFAULT '',
        arrival_airport TEXT NOT NULL DEFAULT '',
        departure_terminal TEXT NOT NULL DEFAULT '',
        arrival_terminal TEXT NOT NULL DEFAULT '',
        departure_gate TEXT NOT NULL DEFAULT '',
        arrival_gate TEXT NOT NULL DEFAULT '',
        booking_reference TEXT NOT NULL DEFAULT ''
    )";

/// SQL statement to create the lodging details table.
pub const CREATE_LODGING_DETAILS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS lodging_details (
        event_id INTEGER PRIMARY KEY REFERENCES events(id) ON DELETE CASCADE,
        check_in TEXT,
        check_out TEXT,
        booking_reference TEXT NOT NULL DEFAULT ''
    )";

/// SQL statement to create the transit details table.
pub const CREATE_TRANSIT_DETAILS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS transit_details (
        event_id INTEGER PRIMARY KEY REFERENCES events(id) ON DELETE CASCADE,
        origin TEXT NOT NULL DEFAULT '',
        destination TEXT NOT NULL DEFAULT '',
        transport_mode TEXT NOT NULL DEFAULT ''
    )";

/// SQL statement to create the (trip, date) index on events.
///
/// This index backs the per-day list, position assignment, and the
/// out-of-range grouped counts used by the trip shrink guard.
pub const CREATE_EVENTS_TRIP_DATE_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_events_trip_date ON events(trip_id, event_date)";

/// SQL statement to create the (trip, `start_time`) index on events.
///
/// This index backs reorder's start-ordered load and the last-event query.
pub const CREATE_EVENTS_TRIP_START_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_events_trip_start ON events(trip_id, start_time)";

/// SQL statement to select the schema version from the metadata table.
pub const SELECT_SCHEMA_VERSION: &str = "SELECT value FROM metadata WHERE key = 'schema_version'";

/// SQL statement to insert or update the schema version in the metadata table.
pub const INSERT_SCHEMA_VERSION: &str =
    "INSERT OR REPLACE INTO metadata (key, value) VALUES ('schema_version', ?)";
