//! Trip operations: creation, partial updates, and the date range guard.
//!
//! The date range guard is the one piece of cross-record validation in the
//! trip path: narrowing a trip's dates must never strand events on days the
//! trip no longer spans, so shrinking is refused while any affected day
//! still has events.

use chrono::NaiveDate;

use crate::database::Database;
use crate::error::{Error, Result};
use crate::trip::{DateRange, Trip};

/// Partial update for a trip.
///
/// Unset fields leave the stored value unchanged.
///
/// # Examples
///
/// ```
/// use itin::operations::TripPatch;
///
/// let patch = TripPatch::new().with_name("Lisbon and Porto");
/// assert!(patch.destination.is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct TripPatch {
    /// New trip name.
    pub name: Option<String>,
    /// New destination.
    pub destination: Option<String>,
    /// New first day.
    pub start_date: Option<NaiveDate>,
    /// New last day.
    pub end_date: Option<NaiveDate>,
}

impl TripPatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the trip name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the destination.
    #[must_use]
    pub fn with_destination(mut self, destination: impl Into<String>) -> Self {
        self.destination = Some(destination.into());
        self
    }

    /// Sets the first day.
    #[must_use]
    pub const fn with_start_date(mut self, start_date: NaiveDate) -> Self {
        self.start_date = Some(start_date);
        self
    }

    /// Sets the last day.
    #[must_use]
    pub const fn with_end_date(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }
}

/// Trip operations over an open database.
pub struct TripOperations;

impl TripOperations {
    /// Creates a trip.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty name ("name is required") or
    /// an empty destination ("destination is required"), or a database error
    /// if the insert fails.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use chrono::NaiveDate;
    /// use itin::database::{Database, DatabaseConfig};
    /// use itin::operations::TripOperations;
    /// use itin::DateRange;
    ///
    /// let mut db = Database::open(DatabaseConfig::new("/tmp/itin.db")).unwrap();
    /// let dates = DateRange::new(
    ///     NaiveDate::from_ymd_opt(2026, 5, 1).unwrap(),
    ///     NaiveDate::from_ymd_opt(2026, 5, 10).unwrap(),
    /// )
    /// .unwrap();
    ///
    /// let trip = TripOperations::create(&mut db, "Lisbon", "Portugal", &dates).unwrap();
    /// assert!(trip.id > 0);
    /// ```
    pub fn create(
        db: &mut Database,
        name: &str,
        destination: &str,
        dates: &DateRange,
    ) -> Result<Trip> {
        if name.is_empty() {
            return Err(Error::validation("name", "name is required"));
        }
        if destination.is_empty() {
            return Err(Error::validation("destination", "destination is required"));
        }

        db.create_trip(name, destination, dates)
    }

    /// Retrieves a trip by id.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no trip with this id exists.
    pub fn get(db: &Database, id: i64) -> Result<Trip> {
        Database::get_trip(db.connection(), id)?
            .ok_or_else(|| Error::not_found(format!("trip {id}")))
    }

    /// Lists all trips ordered by start date.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list(db: &Database) -> Result<Vec<Trip>> {
        Database::list_trips(db.connection())
    }

    /// Applies a partial update to a trip.
    ///
    /// The patched date range is validated as a whole, then checked against
    /// the trip's events with [`Self::validate_date_range_shrink`] before
    /// anything is persisted.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown trip, a validation error for an
    /// inverted date range, or `DateRangeConflict` when the narrowed range
    /// would strand events.
    pub fn update(db: &mut Database, id: i64, patch: &TripPatch) -> Result<Trip> {
        let current = Self::get(db, id)?;

        let dates = DateRange::new(
            patch.start_date.unwrap_or_else(|| current.dates.start()),
            patch.end_date.unwrap_or_else(|| current.dates.end()),
        )?;
        Self::validate_date_range_shrink(db, id, &current.dates, &dates)?;

        let updated = db.update_trip(id, |trip| {
            if let Some(name) = &patch.name {
                trip.name = name.clone();
            }
            if let Some(destination) = &patch.destination {
                trip.destination = destination.clone();
            }
            trip.dates = dates;
        })?;

        updated.ok_or_else(|| Error::not_found(format!("trip {id}")))
    }

    /// Deletes a trip and, through the schema cascade, all of its events
    /// and detail records.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no trip with this id exists.
    pub fn delete(db: &mut Database, id: i64) -> Result<()> {
        if db.delete_trip(id)? {
            Ok(())
        } else {
            Err(Error::not_found(format!("trip {id}")))
        }
    }

    /// Refuses a date range change that would strand events.
    ///
    /// A change that covers the old range on both ends cannot strand
    /// anything and passes without touching the database. Otherwise the
    /// trip's non-deleted events are counted per day outside the new range;
    /// any hits produce a `DateRangeConflict` listing each affected day,
    /// e.g. `"Fri, May 1 has 2 event(s); Tue, May 5 has 1 event(s)"`.
    ///
    /// # Errors
    ///
    /// Returns `DateRangeConflict` when events fall outside the new range,
    /// or a database error if the count query fails.
    pub fn validate_date_range_shrink(
        db: &Database,
        trip_id: i64,
        old: &DateRange,
        new: &DateRange,
    ) -> Result<()> {
        if new.covers(old) {
            return Ok(());
        }

        let affected =
            Database::count_events_by_date_outside_range(db.connection(), trip_id, new)?;
        if affected.is_empty() {
            return Ok(());
        }

        let message = affected
            .iter()
            .map(|day| format!("{} has {} event(s)", day.date.format("%a, %b %-d"), day.count))
            .collect::<Vec<_>>()
            .join("; ");

        Err(Error::DateRangeConflict { message })
    }
}
