//! Database CRUD operations for events.
//!
//! Events are soft-deleted: every read filters on `deleted_at IS NULL` and
//! only the trip cascade removes rows permanently. Detail-bearing events
//! (flight, lodging, transit) persist their detail row atomically with the
//! base row; reads enrich base rows in per-category batches.

use chrono::{Local, NaiveDate};
use rusqlite::{params, Connection};

use crate::error::{Error, Result};
use crate::event::{Event, EventCategory};
use crate::timeline;

use super::connection::Database;
use super::details;

/// Gap left between neighboring positions so events can be inserted
/// between two others without renumbering the day.
pub const POSITION_STEP: i64 = 1000;

/// Helper function to deserialize an event from a database row.
///
/// Expects row fields in this order: id, `trip_id`, category, `event_date`,
/// title, location, latitude, longitude, `start_time`, `end_time`, pinned,
/// position, notes, `deleted_at`, `created_at`, `updated_at`
fn row_to_event(row: &rusqlite::Row<'_>) -> rusqlite::Result<Event> {
    let category: String = row.get(2)?;
    let category = category
        .parse::<EventCategory>()
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

    Ok(Event {
        id: row.get(0)?,
        trip_id: row.get(1)?,
        category,
        event_date: row.get(3)?,
        title: row.get(4)?,
        location: row.get(5)?,
        latitude: row.get(6)?,
        longitude: row.get(7)?,
        start_time: row.get(8)?,
        end_time: row.get(9)?,
        pinned: row.get(10)?,
        position: row.get(11)?,
        notes: row.get(12)?,
        deleted_at: row.get(13)?,
        created_at: row.get(14)?,
        updated_at: row.get(15)?,
        details: None,
    })
}

// SQL statements for CRUD operations
const INSERT_EVENT: &str = r"
    INSERT INTO events (
        trip_id, category, event_date, title, location, latitude, longitude,
        start_time, end_time, pinned, position, notes, created_at, updated_at
    )
    VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
";

const SELECT_EVENT: &str = r"
    SELECT id, trip_id, category, event_date, title, location, latitude, longitude,
           start_time, end_time, pinned, position, notes, deleted_at, created_at, updated_at
    FROM events
    WHERE id = ? AND deleted_at IS NULL
";

const LIST_EVENTS_BY_TRIP: &str = r"
    SELECT id, trip_id, category, event_date, title, location, latitude, longitude,
           start_time, end_time, pinned, position, notes, deleted_at, created_at, updated_at
    FROM events
    WHERE trip_id = ? AND deleted_at IS NULL
    ORDER BY event_date, position, id
";

const LIST_EVENTS_BY_TRIP_AND_DATE: &str = r"
    SELECT id, trip_id, category, event_date, title, location, latitude, longitude,
           start_time, end_time, pinned, position, notes, deleted_at, created_at, updated_at
    FROM events
    WHERE trip_id = ? AND event_date = ? AND deleted_at IS NULL
    ORDER BY position, id
";

// Start-ordered load backing reorder; NULL starts sort to the end
const SELECT_EVENTS_FOR_REORDER: &str = r"
    SELECT id, trip_id, category, event_date, title, location, latitude, longitude,
           start_time, end_time, pinned, position, notes, deleted_at, created_at, updated_at
    FROM events
    WHERE trip_id = ? AND deleted_at IS NULL
    ORDER BY start_time IS NULL, start_time, id
";

const SELECT_LAST_EVENT: &str = r"
    SELECT id, trip_id, category, event_date, title, location, latitude, longitude,
           start_time, end_time, pinned, position, notes, deleted_at, created_at, updated_at
    FROM events
    WHERE trip_id = ? AND deleted_at IS NULL
    ORDER BY event_date DESC, start_time IS NULL, start_time DESC, id DESC
    LIMIT 1
";

const MAX_POSITION_FOR_DATE: &str = r"
    SELECT COALESCE(MAX(position), 0)
    FROM events
    WHERE trip_id = ? AND event_date = ? AND deleted_at IS NULL
";

const UPDATE_EVENT: &str = r"
    UPDATE events
    SET category = ?, event_date = ?, title = ?, location = ?, latitude = ?,
        longitude = ?, start_time = ?, end_time = ?, pinned = ?, position = ?,
        notes = ?, updated_at = ?
    WHERE id = ?
";

const UPDATE_EVENT_TIMES: &str = r"
    UPDATE events
    SET start_time = ?, end_time = ?, updated_at = ?
    WHERE id = ?
";

const SOFT_DELETE_EVENT: &str = r"
    UPDATE events
    SET deleted_at = ?, updated_at = ?
    WHERE id = ? AND deleted_at IS NULL
";

const RESTORE_EVENT: &str = r"
    UPDATE events
    SET deleted_at = NULL, updated_at = ?
    WHERE id = ?
";

const COUNT_EVENTS_BY_TRIP: &str = r"
    SELECT COUNT(*)
    FROM events
    WHERE trip_id = ? AND deleted_at IS NULL
";

/// Attaches detail records to a freshly loaded batch of events.
///
/// One query per detail-bearing category. A failed batch is logged and
/// skipped; callers get the affected events without details rather than an
/// error.
fn enrich_events(conn: &Connection, events: &mut [Event]) {
    for category in [
        EventCategory::Flight,
        EventCategory::Lodging,
        EventCategory::Transit,
    ] {
        let ids: Vec<i64> = events
            .iter()
            .filter(|e| e.category == category)
            .map(|e| e.id)
            .collect();
        if ids.is_empty() {
            continue;
        }

        match details::details_batch(conn, category, &ids) {
            Ok(mut map) => {
                for event in events.iter_mut() {
                    if event.category == category {
                        if let Some(d) = map.remove(&event.id) {
                            event.details = Some(d);
                        }
                    }
                }
            }
            Err(e) => log::warn!("failed to load {category} details batch: {e}"),
        }
    }
}

impl Database {
    /// Creates an event and returns the stored record.
    ///
    /// The caller provides an event with `id` 0; the stored copy comes back
    /// with the assigned id, stamped timestamps, and a resolved position.
    /// When `position` is not positive, the event lands after the existing
    /// events of its (trip, date) bucket with a gap of `POSITION_STEP`.
    ///
    /// Events carrying a detail payload are persisted in one transaction
    /// with IMMEDIATE mode: base row and detail row, both or neither.
    /// Events without a payload take a lightweight single-statement path.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails; persistence errors carry the
    /// "inserting event" context.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use itin::database::{Database, DatabaseConfig};
    /// use itin::{Event, EventCategory};
    ///
    /// let config = DatabaseConfig::new("/tmp/itin.db");
    /// let mut db = Database::open(config).unwrap();
    ///
    /// # let draft: Event = unimplemented!();
    /// let stored = db.create_event(&draft).unwrap();
    /// assert!(stored.id > 0);
    /// ```
    pub fn create_event(&mut self, event: &Event) -> Result<Event> {
        let mut stored = event.clone();
        stored.deleted_at = None;
        let now = Local::now().naive_local();
        stored.created_at = now;
        stored.updated_at = now;

        if let Some(details) = stored.details.clone() {
            let tx = self.begin_immediate()?;

            if stored.position <= 0 {
                stored.position = Self::next_position(&tx, stored.trip_id, stored.event_date)?;
            }
            Self::insert_event_row(&tx, &mut stored)?;
            details::insert_details(&tx, stored.id, &details)?;

            tx.commit()
                .map_err(|e| Error::database_context("inserting event", e))?;
        } else {
            if stored.position <= 0 {
                stored.position =
                    Self::next_position(&self.conn, stored.trip_id, stored.event_date)?;
            }
            Self::insert_event_row(&self.conn, &mut stored)?;
        }

        Ok(stored)
    }

    fn insert_event_row(conn: &Connection, event: &mut Event) -> Result<()> {
        conn.execute(
            INSERT_EVENT,
            params![
                event.trip_id,
                event.category.as_str(),
                event.event_date,
                event.title,
                event.location,
                event.latitude,
                event.longitude,
                event.start_time,
                event.end_time,
                event.pinned,
                event.position,
                event.notes,
                event.created_at,
                event.updated_at,
            ],
        )
        .map_err(|e| Error::database_context("inserting event", e))?;
        event.id = conn.last_insert_rowid();
        Ok(())
    }

    fn next_position(conn: &Connection, trip_id: i64, event_date: NaiveDate) -> Result<i64> {
        let max: i64 = conn.query_row(MAX_POSITION_FOR_DATE, params![trip_id, event_date], |row| {
            row.get(0)
        })?;
        Ok(max + POSITION_STEP)
    }

    /// Retrieves a non-deleted event by id, with its detail record attached.
    ///
    /// # Errors
    ///
    /// Returns an error if the base query fails (other than "not found").
    /// A detail load failure is logged and the event returned bare.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(event))` if the event exists and is not soft-deleted
    /// - `Ok(None)` otherwise
    pub fn get_event(conn: &Connection, id: i64) -> Result<Option<Event>> {
        let mut stmt = conn.prepare(SELECT_EVENT)?;

        let mut event = match stmt.query_row(params![id], row_to_event) {
            Ok(event) => event,
            Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        if event.category.has_details() {
            match details::get_details(conn, event.id, event.category) {
                Ok(d) => event.details = d,
                Err(e) => log::warn!(
                    "failed to load {} details for event {}: {e}",
                    event.category,
                    event.id
                ),
            }
        }

        Ok(Some(event))
    }

    /// Lists a trip's non-deleted events in itinerary order.
    ///
    /// Ordering is `(event_date, position, id)`; detail records are attached
    /// in per-category batches.
    ///
    /// # Errors
    ///
    /// Returns an error if the base query fails or a row cannot be
    /// deserialized.
    pub fn list_events_by_trip(conn: &Connection, trip_id: i64) -> Result<Vec<Event>> {
        let mut stmt = conn.prepare(LIST_EVENTS_BY_TRIP)?;

        let mut events = stmt
            .query_map(params![trip_id], row_to_event)?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;

        enrich_events(conn, &mut events);
        Ok(events)
    }

    /// Lists a trip's non-deleted events for one day, ordered by
    /// `(position, id)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the base query fails or a row cannot be
    /// deserialized.
    pub fn list_events_by_trip_and_date(
        conn: &Connection,
        trip_id: i64,
        event_date: NaiveDate,
    ) -> Result<Vec<Event>> {
        let mut stmt = conn.prepare(LIST_EVENTS_BY_TRIP_AND_DATE)?;

        let mut events = stmt
            .query_map(params![trip_id, event_date], row_to_event)?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;

        enrich_events(conn, &mut events);
        Ok(events)
    }

    /// Updates an event through a functional mutation.
    ///
    /// Inside one transaction with IMMEDIATE mode the event is loaded with
    /// its details, the closure applied, the base row persisted with a
    /// bumped `updated_at`, and the detail row upserted when the resulting
    /// event carries a payload matching its category.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction, load, or persist fails.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(event))` with the persisted state if the event exists
    /// - `Ok(None)` if the event doesn't exist or is soft-deleted
    pub fn update_event(
        &mut self,
        id: i64,
        mutate: impl FnOnce(&mut Event),
    ) -> Result<Option<Event>> {
        let tx = self.begin_immediate()?;

        let Some(mut event) = Self::get_event(&tx, id)? else {
            return Ok(None);
        };

        mutate(&mut event);
        event.updated_at = Local::now().naive_local();

        tx.execute(
            UPDATE_EVENT,
            params![
                event.category.as_str(),
                event.event_date,
                event.title,
                event.location,
                event.latitude,
                event.longitude,
                event.start_time,
                event.end_time,
                event.pinned,
                event.position,
                event.notes,
                event.updated_at,
                id,
            ],
        )?;

        if let Some(details) = &event.details {
            if details.category() == event.category {
                details::upsert_details(&tx, event.id, details)?;
            }
        }

        tx.commit()?;
        Ok(Some(event))
    }

    /// Soft-deletes an event.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction or update fails.
    ///
    /// # Returns
    ///
    /// - `Ok(true)` if the event existed and was marked deleted
    /// - `Ok(false)` if it was absent or already deleted
    pub fn delete_event(&mut self, id: i64) -> Result<bool> {
        let tx = self.begin_immediate()?;

        let now = Local::now().naive_local();
        let rows_affected = tx.execute(SOFT_DELETE_EVENT, params![now, now, id])?;

        tx.commit()?;
        Ok(rows_affected > 0)
    }

    /// Clears an event's soft-delete marker and returns the restored event.
    ///
    /// Restoring an event that was never deleted is a no-op that still
    /// returns the event.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction or update fails; persistence
    /// errors carry the "restoring event" context.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(event))` with the restored state
    /// - `Ok(None)` if no event with this id exists
    pub fn restore_event(&mut self, id: i64) -> Result<Option<Event>> {
        let tx = self.begin_immediate()?;

        let now = Local::now().naive_local();
        let rows_affected = tx
            .execute(RESTORE_EVENT, params![now, id])
            .map_err(|e| Error::database_context(format!("restoring event {id}"), e))?;
        if rows_affected == 0 {
            return Ok(None);
        }

        let event = Self::get_event(&tx, id)?;
        tx.commit()
            .map_err(|e| Error::database_context(format!("restoring event {id}"), e))?;
        Ok(event)
    }

    /// Counts a trip's non-deleted events.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_events_by_trip(conn: &Connection, trip_id: i64) -> Result<i64> {
        let count: i64 = conn.query_row(COUNT_EVENTS_BY_TRIP, params![trip_id], |row| row.get(0))?;
        Ok(count)
    }

    /// Returns the chronologically last non-deleted event of a trip.
    ///
    /// "Last" is the maximum of `(event_date, start_time)`; events without a
    /// start time sort before any timed event on the same day.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn last_event_by_trip(conn: &Connection, trip_id: i64) -> Result<Option<Event>> {
        let mut stmt = conn.prepare(SELECT_LAST_EVENT)?;

        let mut event = match stmt.query_row(params![trip_id], row_to_event) {
            Ok(event) => event,
            Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        if event.category.has_details() {
            match details::get_details(conn, event.id, event.category) {
                Ok(d) => event.details = d,
                Err(e) => log::warn!(
                    "failed to load {} details for event {}: {e}",
                    event.category,
                    event.id
                ),
            }
        }

        Ok(Some(event))
    }

    /// Rebuilds a trip's schedule around a caller-supplied event order.
    ///
    /// All of the trip's non-deleted events are loaded and locked in one
    /// transaction with IMMEDIATE mode, the scheduling walk plans new times
    /// (see [`timeline::plan_reorder`]), and the planned times are persisted
    /// before the transaction commits. Any validation or persistence failure
    /// rolls the whole transaction back; no partial reorder is ever visible.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `ordered_ids` doesn't match the trip's
    /// events exactly (count mismatch, duplicate, or unknown id), or a
    /// database error if the load or persist fails.
    ///
    /// # Returns
    ///
    /// The trip's events in the caller's order with their updated times, or
    /// an empty vector for a trip without events.
    pub fn reorder_events(&mut self, trip_id: i64, ordered_ids: &[i64]) -> Result<Vec<Event>> {
        let tx = self.begin_immediate()?;

        let events = {
            let mut stmt = tx.prepare(SELECT_EVENTS_FOR_REORDER)?;
            let events = stmt
                .query_map(params![trip_id], row_to_event)?
                .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;
            events
        };
        if events.is_empty() {
            return Ok(Vec::new());
        }

        let now = Local::now().naive_local();
        let planned = timeline::plan_reorder(events, ordered_ids, now)?;

        for event in &planned {
            tx.execute(
                UPDATE_EVENT_TIMES,
                params![event.start_time, event.end_time, event.updated_at, event.id],
            )?;
        }

        tx.commit()?;
        Ok(planned)
    }
}
