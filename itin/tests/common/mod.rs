//! Common test utilities for integration tests.
//!
//! This module provides helper functions and fixture builders for testing
//! the itin library.

pub mod database;

use chrono::{NaiveDate, NaiveDateTime};

use itin::{Event, EventCategory, EventDetails};

/// Creates a temporary directory for testing.
///
/// The directory will be automatically cleaned up when the returned
/// `TempDir` is dropped.
#[allow(dead_code)]
pub fn create_temp_dir() -> std::io::Result<tempfile::TempDir> {
    tempfile::tempdir()
}

/// Shorthand for a calendar date.
#[allow(dead_code)]
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Shorthand for a minute-precision timestamp.
#[allow(dead_code)]
pub fn datetime(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    date(year, month, day).and_hms_opt(hour, minute, 0).unwrap()
}

/// Builder for creating test events with sensible defaults.
///
/// # Examples
///
/// ```no_run
/// # use common::EventFixture;
/// let event = EventFixture::new(1)
///     .with_title("Castle tour")
///     .with_times(10, 0, 12, 0)
///     .build();
/// ```
#[allow(dead_code)]
pub struct EventFixture {
    trip_id: i64,
    category: EventCategory,
    title: String,
    location: String,
    start_time: Option<NaiveDateTime>,
    end_time: Option<NaiveDateTime>,
    pinned: bool,
    notes: String,
    details: Option<EventDetails>,
}

#[allow(dead_code)]
impl EventFixture {
    /// Creates a new fixture builder with default values.
    ///
    /// Defaults:
    /// - category: Activity
    /// - title: "Walking tour"
    /// - date: 2026-05-02, 10:00 to 11:00
    /// - pinned: false
    /// - no location, notes, or details
    pub fn new(trip_id: i64) -> Self {
        Self {
            trip_id,
            category: EventCategory::Activity,
            title: "Walking tour".to_string(),
            location: String::new(),
            start_time: Some(datetime(2026, 5, 2, 10, 0)),
            end_time: Some(datetime(2026, 5, 2, 11, 0)),
            pinned: false,
            notes: String::new(),
            details: None,
        }
    }

    /// Sets the event category.
    pub fn with_category(mut self, category: EventCategory) -> Self {
        self.category = category;
        self
    }

    /// Sets the event title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the event location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// Sets start and end on the default day (2026-05-02).
    pub fn with_times(mut self, start_h: u32, start_m: u32, end_h: u32, end_m: u32) -> Self {
        self.start_time = Some(datetime(2026, 5, 2, start_h, start_m));
        self.end_time = Some(datetime(2026, 5, 2, end_h, end_m));
        self
    }

    /// Sets start and end on a specific day of May 2026.
    pub fn on_day(mut self, day: u32, start_h: u32, start_m: u32, end_h: u32, end_m: u32) -> Self {
        self.start_time = Some(datetime(2026, 5, day, start_h, start_m));
        self.end_time = Some(datetime(2026, 5, day, end_h, end_m));
        self
    }

    /// Clears both times.
    pub fn untimed(mut self) -> Self {
        self.start_time = None;
        self.end_time = None;
        self
    }

    /// Sets whether the event is pinned.
    pub fn with_pinned(mut self, pinned: bool) -> Self {
        self.pinned = pinned;
        self
    }

    /// Sets the notes field.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Attaches a detail payload.
    pub fn with_details(mut self, details: EventDetails) -> Self {
        self.details = Some(details);
        self
    }

    /// Builds the unstored event, ready for `Database::create_event`.
    pub fn build(self) -> Event {
        let event_date = self
            .start_time
            .map_or_else(|| date(2026, 5, 2), |t| t.date());
        Event {
            id: 0,
            trip_id: self.trip_id,
            category: self.category,
            event_date,
            title: self.title,
            location: self.location,
            latitude: None,
            longitude: None,
            start_time: self.start_time,
            end_time: self.end_time,
            pinned: self.pinned,
            position: 0,
            notes: self.notes,
            deleted_at: None,
            created_at: NaiveDateTime::default(),
            updated_at: NaiveDateTime::default(),
            details: self.details,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_default() {
        let event = EventFixture::new(7).build();
        assert_eq!(event.trip_id, 7);
        assert_eq!(event.category, EventCategory::Activity);
        assert_eq!(event.title, "Walking tour");
        assert_eq!(event.start_time, Some(datetime(2026, 5, 2, 10, 0)));
        assert_eq!(event.event_date, date(2026, 5, 2));
    }

    #[test]
    fn test_fixture_custom() {
        let event = EventFixture::new(1)
            .with_category(EventCategory::Food)
            .with_title("Dinner")
            .with_location("Alfama")
            .on_day(3, 19, 0, 21, 0)
            .with_pinned(true)
            .build();

        assert_eq!(event.category, EventCategory::Food);
        assert_eq!(event.title, "Dinner");
        assert_eq!(event.location, "Alfama");
        assert_eq!(event.event_date, date(2026, 5, 3));
        assert!(event.pinned);
    }

    #[test]
    fn test_temp_dir_creation() {
        let temp_dir = create_temp_dir().expect("should create temp dir");
        assert!(temp_dir.path().exists());
    }
}
