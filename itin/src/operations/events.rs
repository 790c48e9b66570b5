//! Event operations: validation, partial updates, pin/restore, reorder,
//! and default time suggestion.
//!
//! Creation and update enforce different ordering rules on purpose. A new
//! event may start and end at the same instant (zero-length markers such as
//! "checkout" are legitimate), but an update that supplies both times must
//! leave a strictly positive duration so that editing cannot collapse an
//! existing scheduled slot into nothing.

use chrono::{NaiveDate, NaiveDateTime};

use crate::database::Database;
use crate::error::{Error, Result};
use crate::event::{Event, EventCategory, EventDetails};
use crate::timeline::{self, SuggestedTimes};

/// Input for creating an event.
///
/// Only `trip_id`, `title`, and the two times are required; everything else
/// falls back to a sensible default (`Activity` category, empty text fields,
/// unpinned, auto-assigned position).
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use itin::operations::EventDraft;
///
/// let day = NaiveDate::from_ymd_opt(2026, 5, 1).unwrap();
/// let draft = EventDraft::new(1, "Castle of São Jorge")
///     .with_times(
///         day.and_hms_opt(10, 0, 0).unwrap(),
///         day.and_hms_opt(12, 0, 0).unwrap(),
///     )
///     .with_location("Lisbon");
/// assert!(draft.category.is_none());
/// ```
#[derive(Debug, Clone)]
pub struct EventDraft {
    /// Owning trip.
    pub trip_id: i64,
    /// Display title.
    pub title: String,
    /// Event category; defaults to `Activity` when unset.
    pub category: Option<EventCategory>,
    /// Free-form location text.
    pub location: String,
    /// Latitude, when known.
    pub latitude: Option<f64>,
    /// Longitude, when known.
    pub longitude: Option<f64>,
    /// Scheduled start time.
    pub start_time: Option<NaiveDateTime>,
    /// Scheduled end time.
    pub end_time: Option<NaiveDateTime>,
    /// Whether the event keeps its start time through reorders.
    pub pinned: bool,
    /// Free-form notes.
    pub notes: String,
    /// Category-specific detail payload.
    pub details: Option<EventDetails>,
}

impl EventDraft {
    /// Creates a draft with the required identity fields.
    #[must_use]
    pub fn new(trip_id: i64, title: impl Into<String>) -> Self {
        Self {
            trip_id,
            title: title.into(),
            category: None,
            location: String::new(),
            latitude: None,
            longitude: None,
            start_time: None,
            end_time: None,
            pinned: false,
            notes: String::new(),
            details: None,
        }
    }

    /// Sets the category.
    #[must_use]
    pub const fn with_category(mut self, category: EventCategory) -> Self {
        self.category = Some(category);
        self
    }

    /// Sets the scheduled start and end times.
    #[must_use]
    pub const fn with_times(mut self, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        self.start_time = Some(start);
        self.end_time = Some(end);
        self
    }

    /// Sets the location text.
    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// Sets the coordinates.
    #[must_use]
    pub const fn with_coordinates(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }

    /// Marks the event as pinned.
    #[must_use]
    pub const fn with_pinned(mut self, pinned: bool) -> Self {
        self.pinned = pinned;
        self
    }

    /// Sets the notes.
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Attaches a category-specific detail payload.
    #[must_use]
    pub fn with_details(mut self, details: EventDetails) -> Self {
        self.details = Some(details);
        self
    }
}

/// Partial update for an event.
///
/// Unset fields leave the stored value unchanged. Times and coordinates can
/// be replaced but not cleared.
#[derive(Debug, Clone, Default)]
pub struct EventPatch {
    /// New title.
    pub title: Option<String>,
    /// New category.
    pub category: Option<EventCategory>,
    /// New location text.
    pub location: Option<String>,
    /// New latitude.
    pub latitude: Option<f64>,
    /// New longitude.
    pub longitude: Option<f64>,
    /// New start time; also moves the event to the new start's calendar day.
    pub start_time: Option<NaiveDateTime>,
    /// New end time.
    pub end_time: Option<NaiveDateTime>,
    /// New pinned flag.
    pub pinned: Option<bool>,
    /// New manual position within the day.
    pub position: Option<i64>,
    /// New notes.
    pub notes: Option<String>,
    /// New detail payload; ignored unless it matches the event's category
    /// after the patch is applied.
    pub details: Option<EventDetails>,
}

impl EventPatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the category.
    #[must_use]
    pub const fn with_category(mut self, category: EventCategory) -> Self {
        self.category = Some(category);
        self
    }

    /// Sets the location text.
    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Sets the coordinates.
    #[must_use]
    pub const fn with_coordinates(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }

    /// Sets the start time.
    #[must_use]
    pub const fn with_start_time(mut self, start: NaiveDateTime) -> Self {
        self.start_time = Some(start);
        self
    }

    /// Sets the end time.
    #[must_use]
    pub const fn with_end_time(mut self, end: NaiveDateTime) -> Self {
        self.end_time = Some(end);
        self
    }

    /// Sets the pinned flag.
    #[must_use]
    pub const fn with_pinned(mut self, pinned: bool) -> Self {
        self.pinned = Some(pinned);
        self
    }

    /// Sets the manual position.
    #[must_use]
    pub const fn with_position(mut self, position: i64) -> Self {
        self.position = Some(position);
        self
    }

    /// Sets the notes.
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Sets the detail payload.
    #[must_use]
    pub fn with_details(mut self, details: EventDetails) -> Self {
        self.details = Some(details);
        self
    }
}

/// Event operations over an open database.
pub struct EventOperations;

impl EventOperations {
    /// Creates an event from a draft.
    ///
    /// The category defaults to `Activity`. A detail payload is kept only
    /// when it matches the resolved category; otherwise detail-carrying
    /// categories get an empty record so the detail row always exists.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the title is empty, the trip id is
    /// not positive, either time is missing, the end precedes the start, or
    /// a lodging payload has check-out at or before check-in. Database
    /// failures are passed through.
    pub fn create(db: &mut Database, draft: &EventDraft) -> Result<Event> {
        if draft.title.is_empty() {
            return Err(Error::validation("title", "title is required"));
        }
        if draft.trip_id <= 0 {
            return Err(Error::validation("trip_id", "trip_id is required"));
        }
        let Some(start_time) = draft.start_time else {
            return Err(Error::validation("start_time", "start time is required"));
        };
        let Some(end_time) = draft.end_time else {
            return Err(Error::validation("end_time", "end time is required"));
        };
        if end_time < start_time {
            return Err(Error::validation(
                "end_time",
                "end time must be on or after start time",
            ));
        }

        let category = draft.category.unwrap_or(EventCategory::Activity);
        let details = match &draft.details {
            Some(details) if details.matches(category) => {
                if let Some(lodging) = details.as_lodging() {
                    lodging.validate()?;
                }
                Some(details.clone())
            }
            _ => EventDetails::empty_for(category),
        };

        let event = Event {
            id: 0,
            trip_id: draft.trip_id,
            category,
            event_date: start_time.date(),
            title: draft.title.clone(),
            location: draft.location.clone(),
            latitude: draft.latitude,
            longitude: draft.longitude,
            start_time: Some(start_time),
            end_time: Some(end_time),
            pinned: draft.pinned,
            position: 0,
            notes: draft.notes.clone(),
            deleted_at: None,
            created_at: NaiveDateTime::default(),
            updated_at: NaiveDateTime::default(),
            details,
        };

        db.create_event(&event)
    }

    /// Retrieves an event by id.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no live event with this id exists.
    pub fn get(db: &Database, id: i64) -> Result<Event> {
        Database::get_event(db.connection(), id)?
            .ok_or_else(|| Error::not_found(format!("event {id}")))
    }

    /// Lists a trip's events in timeline order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list(db: &Database, trip_id: i64) -> Result<Vec<Event>> {
        Database::list_events_by_trip(db.connection(), trip_id)
    }

    /// Lists a trip's events on a single day in timeline order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_for_day(db: &Database, trip_id: i64, date: NaiveDate) -> Result<Vec<Event>> {
        Database::list_events_by_trip_and_date(db.connection(), trip_id, date)
    }

    /// Counts a trip's live events.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_for_trip(db: &Database, trip_id: i64) -> Result<i64> {
        Database::count_events_by_trip(db.connection(), trip_id)
    }

    /// Applies a partial update to an event.
    ///
    /// When both times are patched they are validated against each other;
    /// when only one is patched it is validated against the stored value of
    /// the other, so a patch can never leave the event with an end at or
    /// before its start. Changing the start time also moves the event to the
    /// new start's calendar day.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown event, or a validation error when
    /// the patched times do not leave a positive duration or a lodging
    /// payload is inconsistent.
    pub fn update(db: &mut Database, id: i64, patch: &EventPatch) -> Result<Event> {
        match (patch.start_time, patch.end_time) {
            (Some(start), Some(end)) => {
                if end <= start {
                    return Err(Error::validation(
                        "end_time",
                        "end time must be after start time",
                    ));
                }
            }
            (None, None) => {}
            _ => {
                let existing = Self::get(db, id)?;
                let start = patch.start_time.or(existing.start_time);
                let end = patch.end_time.or(existing.end_time);
                if let (Some(start), Some(end)) = (start, end) {
                    if end <= start {
                        return Err(Error::validation(
                            "end_time",
                            "end time must be after start time",
                        ));
                    }
                }
            }
        }

        if let Some(details) = &patch.details {
            if let Some(lodging) = details.as_lodging() {
                lodging.validate()?;
            }
        }

        let updated = db.update_event(id, |event| {
            if let Some(title) = &patch.title {
                event.title = title.clone();
            }
            if let Some(category) = patch.category {
                event.category = category;
            }
            if let Some(location) = &patch.location {
                event.location = location.clone();
            }
            if let Some(latitude) = patch.latitude {
                event.latitude = Some(latitude);
            }
            if let Some(longitude) = patch.longitude {
                event.longitude = Some(longitude);
            }
            if let Some(start) = patch.start_time {
                event.start_time = Some(start);
                event.event_date = start.date();
            }
            if let Some(end) = patch.end_time {
                event.end_time = Some(end);
            }
            if let Some(pinned) = patch.pinned {
                event.pinned = pinned;
            }
            if let Some(position) = patch.position {
                event.position = position;
            }
            if let Some(notes) = &patch.notes {
                event.notes = notes.clone();
            }
            if let Some(details) = &patch.details {
                if details.matches(event.category) {
                    event.details = Some(details.clone());
                }
            }
        })?;

        updated.ok_or_else(|| Error::not_found(format!("event {id}")))
    }

    /// Soft-deletes an event.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no live event with this id exists.
    pub fn delete(db: &mut Database, id: i64) -> Result<()> {
        if db.delete_event(id)? {
            Ok(())
        } else {
            Err(Error::not_found(format!("event {id}")))
        }
    }

    /// Restores a soft-deleted event.
    ///
    /// Restoring an event that was never deleted succeeds and returns it
    /// unchanged.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no event with this id exists at all.
    pub fn restore(db: &mut Database, id: i64) -> Result<Event> {
        db.restore_event(id)?
            .ok_or_else(|| Error::not_found(format!("event {id}")))
    }

    /// Flips an event's pinned flag.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no live event with this id exists.
    pub fn toggle_pin(db: &mut Database, id: i64) -> Result<Event> {
        db.update_event(id, |event| event.pinned = !event.pinned)?
            .ok_or_else(|| Error::not_found(format!("event {id}")))
    }

    /// Reorders a trip's whole timeline to the caller's sequence and
    /// reschedules every event, keeping pinned start times fixed.
    ///
    /// `ordered_ids` must list every non-deleted event of the trip exactly
    /// once.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the id list does not match the
    /// trip's events, or a database error if persisting fails. On error no
    /// event is modified.
    pub fn reorder(db: &mut Database, trip_id: i64, ordered_ids: &[i64]) -> Result<Vec<Event>> {
        db.reorder_events(trip_id, ordered_ids)
    }

    /// Suggests default start and end times for a new event on a day.
    ///
    /// The suggestion starts where the day's latest scheduled event ends
    /// (9:00 on an empty day) and runs for the category's default duration.
    /// This never fails: if the day's events cannot be loaded the fallback
    /// suggestion is returned and the failure is logged.
    #[must_use]
    pub fn suggest_defaults(
        db: &Database,
        trip_id: i64,
        date: NaiveDate,
        category: EventCategory,
    ) -> SuggestedTimes {
        let events = match Database::list_events_by_trip_and_date(db.connection(), trip_id, date) {
            Ok(events) => events,
            Err(e) => {
                log::warn!("failed to load events for time suggestion: {e}");
                Vec::new()
            }
        };
        timeline::suggest_times(&events, date, category)
    }
}
