//! Storage for per-category event detail records.
//!
//! Flight, lodging, and transit events carry a one-to-one detail row in a
//! category-specific table, keyed by the event id. Detail rows are written
//! inside the owning event's transaction and read back in batches when
//! listing events.

use std::collections::HashMap;

use chrono::NaiveDateTime;
use rusqlite::{params, Connection};

use crate::error::{Error, Result};
use crate::event::{EventCategory, EventDetails, FlightDetails, LodgingDetails, TransitDetails};

const INSERT_FLIGHT_DETAILS: &str = r"
    INSERT INTO flight_details (
        event_id, airline, flight_number, departure_airport, arrival_airport,
        departure_terminal, arrival_terminal, departure_gate, arrival_gate,
        booking_reference
    )
    VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
";

const UPSERT_FLIGHT_DETAILS: &str = r"
    INSERT OR REPLACE INTO flight_details (
        event_id, airline, flight_number, departure_airport, arrival_airport,
        departure_terminal, arrival_terminal, departure_gate, arrival_gate,
        booking_reference
    )
    VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
";

const FLIGHT_COLUMNS: &str = "airline, flight_number, departure_airport, arrival_airport, \
     departure_terminal, arrival_terminal, departure_gate, arrival_gate, booking_reference";

const INSERT_LODGING_DETAILS: &str = r"
    INSERT INTO lodging_details (event_id, check_in, check_out, booking_reference)
    VALUES (?, ?, ?, ?)
";

const UPSERT_LODGING_DETAILS: &str = r"
    INSERT OR REPLACE INTO lodging_details (event_id, check_in, check_out, booking_reference)
    VALUES (?, ?, ?, ?)
";

const LODGING_COLUMNS: &str = "check_in, check_out, booking_reference";

const INSERT_TRANSIT_DETAILS: &str = r"
    INSERT INTO transit_details (event_id, origin, destination, transport_mode)
    VALUES (?, ?, ?, ?)
";

const UPSERT_TRANSIT_DETAILS: &str = r"
    INSERT OR REPLACE INTO transit_details (event_id, origin, destination, transport_mode)
    VALUES (?, ?, ?, ?)
";

const TRANSIT_COLUMNS: &str = "origin, destination, transport_mode";

fn row_to_flight_details(row: &rusqlite::Row<'_>, offset: usize) -> rusqlite::Result<FlightDetails> {
    Ok(FlightDetails {
        airline: row.get(offset)?,
        flight_number: row.get(offset + 1)?,
        departure_airport: row.get(offset + 2)?,
        arrival_airport: row.get(offset + 3)?,
        departure_terminal: row.get(offset + 4)?,
        arrival_terminal: row.get(offset + 5)?,
        departure_gate: row.get(offset + 6)?,
        arrival_gate: row.get(offset + 7)?,
        booking_reference: row.get(offset + 8)?,
    })
}

fn row_to_lodging_details(
    row: &rusqlite::Row<'_>,
    offset: usize,
) -> rusqlite::Result<LodgingDetails> {
    let check_in: Option<NaiveDateTime> = row.get(offset)?;
    let check_out: Option<NaiveDateTime> = row.get(offset + 1)?;
    Ok(LodgingDetails {
        check_in,
        check_out,
        booking_reference: row.get(offset + 2)?,
    })
}

fn row_to_transit_details(
    row: &rusqlite::Row<'_>,
    offset: usize,
) -> rusqlite::Result<TransitDetails> {
    Ok(TransitDetails {
        origin: row.get(offset)?,
        destination: row.get(offset + 1)?,
        transport_mode: row.get(offset + 2)?,
    })
}

fn execute_flight(
    conn: &Connection,
    sql: &str,
    event_id: i64,
    details: &FlightDetails,
) -> rusqlite::Result<usize> {
    conn.execute(
        sql,
        params![
            event_id,
            details.airline,
            details.flight_number,
            details.departure_airport,
            details.arrival_airport,
            details.departure_terminal,
            details.arrival_terminal,
            details.departure_gate,
            details.arrival_gate,
            details.booking_reference,
        ],
    )
}

fn execute_lodging(
    conn: &Connection,
    sql: &str,
    event_id: i64,
    details: &LodgingDetails,
) -> rusqlite::Result<usize> {
    conn.execute(
        sql,
        params![
            event_id,
            details.check_in,
            details.check_out,
            details.booking_reference,
        ],
    )
}

fn execute_transit(
    conn: &Connection,
    sql: &str,
    event_id: i64,
    details: &TransitDetails,
) -> rusqlite::Result<usize> {
    conn.execute(
        sql,
        params![
            event_id,
            details.origin,
            details.destination,
            details.transport_mode,
        ],
    )
}

/// Inserts a detail row for a freshly created event.
///
/// Runs on the caller's connection so it participates in the caller's
/// transaction.
pub(crate) fn insert_details(
    conn: &Connection,
    event_id: i64,
    details: &EventDetails,
) -> Result<()> {
    let result = match details {
        EventDetails::Flight(d) => execute_flight(conn, INSERT_FLIGHT_DETAILS, event_id, d),
        EventDetails::Lodging(d) => execute_lodging(conn, INSERT_LODGING_DETAILS, event_id, d),
        EventDetails::Transit(d) => execute_transit(conn, INSERT_TRANSIT_DETAILS, event_id, d),
    };
    result.map_err(|e| {
        Error::database_context(
            format!(
                "inserting {} details for event {event_id}",
                details.category()
            ),
            e,
        )
    })?;
    Ok(())
}

/// Inserts or replaces the detail row for an existing event.
pub(crate) fn upsert_details(
    conn: &Connection,
    event_id: i64,
    details: &EventDetails,
) -> Result<()> {
    let result = match details {
        EventDetails::Flight(d) => execute_flight(conn, UPSERT_FLIGHT_DETAILS, event_id, d),
        EventDetails::Lodging(d) => execute_lodging(conn, UPSERT_LODGING_DETAILS, event_id, d),
        EventDetails::Transit(d) => execute_transit(conn, UPSERT_TRANSIT_DETAILS, event_id, d),
    };
    result.map_err(|e| {
        Error::database_context(
            format!(
                "updating {} details for event {event_id}",
                details.category()
            ),
            e,
        )
    })?;
    Ok(())
}

/// Loads the detail row for a single event, if one exists for its category.
///
/// Categories without a detail table (activity, food) always resolve to
/// `Ok(None)`.
pub(crate) fn get_details(
    conn: &Connection,
    event_id: i64,
    category: EventCategory,
) -> Result<Option<EventDetails>> {
    let mut map = details_batch(conn, category, &[event_id])?;
    Ok(map.remove(&event_id))
}

/// Loads detail rows for a set of events of one category in a single query.
///
/// Events without a detail row are simply absent from the returned map.
pub(crate) fn details_batch(
    conn: &Connection,
    category: EventCategory,
    event_ids: &[i64],
) -> Result<HashMap<i64, EventDetails>> {
    if event_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let (table, columns) = match category {
        EventCategory::Flight => ("flight_details", FLIGHT_COLUMNS),
        EventCategory::Lodging => ("lodging_details", LODGING_COLUMNS),
        EventCategory::Transit => ("transit_details", TRANSIT_COLUMNS),
        EventCategory::Activity | EventCategory::Food => return Ok(HashMap::new()),
    };

    let placeholders = vec!["?"; event_ids.len()].join(", ");
    let sql =
        format!("SELECT event_id, {columns} FROM {table} WHERE event_id IN ({placeholders})");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(rusqlite::params_from_iter(event_ids.iter()), |row| {
        let event_id: i64 = row.get(0)?;
        let details = match category {
            EventCategory::Flight => EventDetails::Flight(row_to_flight_details(row, 1)?),
            EventCategory::Lodging => EventDetails::Lodging(row_to_lodging_details(row, 1)?),
            EventCategory::Transit => EventDetails::Transit(row_to_transit_details(row, 1)?),
            EventCategory::Activity | EventCategory::Food => {
                unreachable!("categories without detail tables are filtered above")
            }
        };
        Ok((event_id, details))
    })?;

    let mut map = HashMap::new();
    for row in rows {
        let (event_id, details) = row?;
        map.insert(event_id, details);
    }
    Ok(map)
}
