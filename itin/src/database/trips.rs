//! Database CRUD operations for trips.
//!
//! This module implements all create, read, update, and delete operations
//! for trips, plus the grouped event counts backing the date-range shrink
//! guard.

use chrono::{Local, NaiveDate, NaiveDateTime};
use rusqlite::{params, Connection};

use crate::error::Result;
use crate::trip::{DateEventCount, DateRange, Trip};

use super::connection::Database;

/// Helper function to deserialize a trip from a database row.
///
/// Expects row fields in this order: id, name, destination, `start_date`,
/// `end_date`, `created_at`, `updated_at`
fn row_to_trip(row: &rusqlite::Row<'_>) -> rusqlite::Result<Trip> {
    let id: i64 = row.get(0)?;
    let name: String = row.get(1)?;
    let destination: String = row.get(2)?;
    let start_date: NaiveDate = row.get(3)?;
    let end_date: NaiveDate = row.get(4)?;
    let created_at: NaiveDateTime = row.get(5)?;
    let updated_at: NaiveDateTime = row.get(6)?;

    let dates = DateRange::new(start_date, end_date)
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

    Ok(Trip {
        id,
        name,
        destination,
        dates,
        created_at,
        updated_at,
    })
}

// SQL statements for CRUD operations
const INSERT_TRIP: &str = r"
    INSERT INTO trips (name, destination, start_date, end_date, created_at, updated_at)
    VALUES (?, ?, ?, ?, ?, ?)
";

const SELECT_TRIP: &str = r"
    SELECT id, name, destination, start_date, end_date, created_at, updated_at
    FROM trips
    WHERE id = ?
";

const LIST_TRIPS: &str = r"
    SELECT id, name, destination, start_date, end_date, created_at, updated_at
    FROM trips
    ORDER BY start_date, id
";

const UPDATE_TRIP: &str = r"
    UPDATE trips
    SET name = ?, destination = ?, start_date = ?, end_date = ?, updated_at = ?
    WHERE id = ?
";

const DELETE_TRIP: &str = "DELETE FROM trips WHERE id = ?";

const COUNT_EVENTS_OUTSIDE_RANGE: &str = r"
    SELECT event_date, COUNT(*)
    FROM events
    WHERE trip_id = ?
      AND deleted_at IS NULL
      AND (event_date < ? OR event_date > ?)
    GROUP BY event_date
    ORDER BY event_date
";

impl Database {
    /// Creates a trip and returns the stored record with its assigned id.
    ///
    /// Creation and update timestamps are stamped from the wall clock at
    /// insert time.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use itin::database::{Database, DatabaseConfig};
    /// use itin::DateRange;
    /// use chrono::NaiveDate;
    ///
    /// let config = DatabaseConfig::new("/tmp/itin.db");
    /// let mut db = Database::open(config).unwrap();
    ///
    /// let dates = DateRange::new(
    ///     NaiveDate::from_ymd_opt(2026, 5, 1).unwrap(),
    ///     NaiveDate::from_ymd_opt(2026, 5, 10).unwrap(),
    /// ).unwrap();
    /// let trip = db.create_trip("Lisbon", "Portugal", &dates).unwrap();
    /// assert!(trip.id > 0);
    /// ```
    pub fn create_trip(&mut self, name: &str, destination: &str, dates: &DateRange) -> Result<Trip> {
        let now = Local::now().naive_local();

        self.conn.execute(
            INSERT_TRIP,
            params![name, destination, dates.start(), dates.end(), now, now],
        )?;
        let id = self.conn.last_insert_rowid();

        Ok(Trip {
            id,
            name: name.to_string(),
            destination: destination.to_string(),
            dates: *dates,
            created_at: now,
            updated_at: now,
        })
    }

    /// Retrieves a trip by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails (other than "not found").
    ///
    /// # Returns
    ///
    /// - `Ok(Some(trip))` if the trip exists
    /// - `Ok(None)` if the trip doesn't exist
    /// - `Err(_)` if a database error occurs
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use itin::database::{Database, DatabaseConfig};
    ///
    /// let config = DatabaseConfig::new("/tmp/itin.db");
    /// let db = Database::open(config).unwrap();
    ///
    /// let trip = Database::get_trip(db.connection(), 1).unwrap();
    /// ```
    pub fn get_trip(conn: &Connection, id: i64) -> Result<Option<Trip>> {
        let mut stmt = conn.prepare(SELECT_TRIP)?;

        match stmt.query_row(params![id], row_to_trip) {
            Ok(trip) => Ok(Some(trip)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Lists all trips ordered by start date.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or if any trip cannot be
    /// deserialized.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use itin::database::{Database, DatabaseConfig};
    ///
    /// let config = DatabaseConfig::new("/tmp/itin.db");
    /// let db = Database::open(config).unwrap();
    ///
    /// for trip in Database::list_trips(db.connection()).unwrap() {
    ///     println!("{trip}");
    /// }
    /// ```
    pub fn list_trips(conn: &Connection) -> Result<Vec<Trip>> {
        let mut stmt = conn.prepare(LIST_TRIPS)?;

        let trips = stmt
            .query_map([], row_to_trip)?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;

        Ok(trips)
    }

    /// Updates a trip through a functional mutation.
    ///
    /// The trip is loaded, the closure applied, and the result persisted,
    /// all inside one transaction with IMMEDIATE mode. The `updated_at`
    /// timestamp is bumped on persist.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction, load, or update fails.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(trip))` with the persisted state if the trip exists
    /// - `Ok(None)` if the trip doesn't exist
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use itin::database::{Database, DatabaseConfig};
    ///
    /// let config = DatabaseConfig::new("/tmp/itin.db");
    /// let mut db = Database::open(config).unwrap();
    ///
    /// let updated = db
    ///     .update_trip(1, |trip| trip.name = "Lisbon, revised".to_string())
    ///     .unwrap();
    /// ```
    pub fn update_trip(
        &mut self,
        id: i64,
        mutate: impl FnOnce(&mut Trip),
    ) -> Result<Option<Trip>> {
        let tx = self.begin_immediate()?;

        let Some(mut trip) = Self::get_trip(&tx, id)? else {
            return Ok(None);
        };

        mutate(&mut trip);
        trip.updated_at = Local::now().naive_local();

        tx.execute(
            UPDATE_TRIP,
            params![
                trip.name,
                trip.destination,
                trip.dates.start(),
                trip.dates.end(),
                trip.updated_at,
                id,
            ],
        )?;

        tx.commit()?;
        Ok(Some(trip))
    }

    /// Deletes a trip permanently.
    ///
    /// Foreign keys cascade the delete to the trip's events and their
    /// detail rows. This is the only path that removes event rows for good;
    /// event-level deletion is a soft delete.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction or delete fails.
    ///
    /// # Returns
    ///
    /// - `Ok(true)` if the trip was found and deleted
    /// - `Ok(false)` if the trip was not found
    pub fn delete_trip(&mut self, id: i64) -> Result<bool> {
        let tx = self.begin_immediate()?;

        let rows_affected = tx.execute(DELETE_TRIP, params![id])?;

        tx.commit()?;
        Ok(rows_affected > 0)
    }

    /// Counts non-deleted events falling outside a candidate date range,
    /// grouped by day.
    ///
    /// Soft-deleted events are excluded. Rows come back ordered by date, so
    /// conflict summaries read chronologically.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use itin::database::{Database, DatabaseConfig};
    /// use itin::DateRange;
    /// use chrono::NaiveDate;
    ///
    /// let config = DatabaseConfig::new("/tmp/itin.db");
    /// let db = Database::open(config).unwrap();
    ///
    /// let narrowed = DateRange::new(
    ///     NaiveDate::from_ymd_opt(2026, 5, 2).unwrap(),
    ///     NaiveDate::from_ymd_opt(2026, 5, 8).unwrap(),
    /// ).unwrap();
    /// let orphaned =
    ///     Database::count_events_by_date_outside_range(db.connection(), 1, &narrowed).unwrap();
    /// ```
    pub fn count_events_by_date_outside_range(
        conn: &Connection,
        trip_id: i64,
        range: &DateRange,
    ) -> Result<Vec<DateEventCount>> {
        let mut stmt = conn.prepare(COUNT_EVENTS_OUTSIDE_RANGE)?;

        let counts = stmt
            .query_map(params![trip_id, range.start(), range.end()], |row| {
                let date: NaiveDate = row.get(0)?;
                let count: i64 = row.get(1)?;
                Ok(DateEventCount { date, count })
            })?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;

        Ok(counts)
    }
}
