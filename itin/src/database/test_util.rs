//! Shared helpers for database tests.

use chrono::{NaiveDate, NaiveDateTime};

use crate::database::{Database, DatabaseConfig};
use crate::event::{Event, EventCategory};
use crate::trip::DateRange;

/// Creates a database backed by a temporary directory.
pub fn create_test_database() -> Database {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test.db");
    let config = DatabaseConfig::new(&path);
    let db = Database::open(config).unwrap();
    // Keep the tempdir alive for the duration of the test process
    std::mem::forget(dir);
    db
}

/// Shorthand for a calendar date.
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Shorthand for a minute-precision timestamp.
pub fn datetime(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    date(year, month, day).and_hms_opt(hour, minute, 0).unwrap()
}

/// Shorthand for an inclusive date range.
pub fn range(
    start_year: i32,
    start_month: u32,
    start_day: u32,
    end_year: i32,
    end_month: u32,
    end_day: u32,
) -> DateRange {
    DateRange::new(
        date(start_year, start_month, start_day),
        date(end_year, end_month, end_day),
    )
    .unwrap()
}

/// Builds an unstored event with the given schedule, ready for `create_event`.
pub fn draft_event(
    trip_id: i64,
    category: EventCategory,
    title: &str,
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> Event {
    Event {
        id: 0,
        trip_id,
        category,
        event_date: start.date(),
        title: title.to_string(),
        location: String::new(),
        latitude: None,
        longitude: None,
        start_time: Some(start),
        end_time: Some(end),
        pinned: false,
        position: 0,
        notes: String::new(),
        deleted_at: None,
        created_at: NaiveDateTime::default(),
        updated_at: NaiveDateTime::default(),
        details: None,
    }
}
