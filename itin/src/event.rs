//! Event domain types.
//!
//! An event is a single itinerary entry within a trip: an activity, a meal,
//! a lodging stay, a transit leg, or a flight. Flights, lodging stays, and
//! transit legs carry a category-specific detail record; which variant an
//! event may carry is determined by its category, never by the caller.

use std::fmt;
use std::str::FromStr;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// The fixed set of event categories.
///
/// Categories determine the default suggested duration of a new event and
/// whether the event carries a detail record.
///
/// # Examples
///
/// ```
/// use itin::EventCategory;
///
/// let category: EventCategory = "flight".parse().unwrap();
/// assert_eq!(category, EventCategory::Flight);
/// assert!(category.has_details());
/// assert!("teleport".parse::<EventCategory>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventCategory {
    /// A sightseeing stop, museum visit, or other generic activity.
    Activity,
    /// A meal or food stop.
    Food,
    /// An overnight stay.
    Lodging,
    /// A local transit leg (train, bus, taxi).
    Transit,
    /// A flight.
    Flight,
}

impl EventCategory {
    /// All categories, in display order.
    pub const ALL: [Self; 5] = [
        Self::Activity,
        Self::Food,
        Self::Lodging,
        Self::Transit,
        Self::Flight,
    ];

    /// Returns the lowercase name used in storage and user-facing text.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Activity => "activity",
            Self::Food => "food",
            Self::Lodging => "lodging",
            Self::Transit => "transit",
            Self::Flight => "flight",
        }
    }

    /// Returns the default duration suggested for a new event of this
    /// category.
    ///
    /// Lodging has no natural per-slot duration and falls back to the
    /// activity default.
    #[must_use]
    pub fn default_duration(self) -> Duration {
        match self {
            Self::Food => Duration::minutes(90),
            Self::Transit => Duration::minutes(30),
            Self::Flight => Duration::hours(3),
            Self::Activity | Self::Lodging => Duration::hours(2),
        }
    }

    /// Returns true if events of this category carry a detail record.
    #[must_use]
    pub const fn has_details(self) -> bool {
        matches!(self, Self::Flight | Self::Lodging | Self::Transit)
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "activity" => Ok(Self::Activity),
            "food" => Ok(Self::Food),
            "lodging" => Ok(Self::Lodging),
            "transit" => Ok(Self::Transit),
            "flight" => Ok(Self::Flight),
            other => Err(Error::validation(
                "category",
                format!("invalid category \"{other}\""),
            )),
        }
    }
}

/// Flight-specific attributes of an event.
///
/// All fields are free-form text; an empty string means "not recorded".
/// Deserialization treats every field as optional, so a partial payload
/// (say, airline and flight number only) is accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlightDetails {
    /// Operating airline.
    pub airline: String,
    /// Flight number, e.g. "JL061".
    pub flight_number: String,
    /// Departure airport code or name.
    pub departure_airport: String,
    /// Arrival airport code or name.
    pub arrival_airport: String,
    /// Departure terminal.
    pub departure_terminal: String,
    /// Arrival terminal.
    pub arrival_terminal: String,
    /// Departure gate.
    pub departure_gate: String,
    /// Arrival gate.
    pub arrival_gate: String,
    /// Booking reference / record locator.
    pub booking_reference: String,
}

/// Lodging-specific attributes of an event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LodgingDetails {
    /// Check-in time, when known.
    pub check_in: Option<NaiveDateTime>,
    /// Check-out time, when known.
    pub check_out: Option<NaiveDateTime>,
    /// Booking reference.
    pub booking_reference: String,
}

impl LodgingDetails {
    /// Validates the check-in/check-out pair.
    ///
    /// # Errors
    ///
    /// Returns a validation error when both times are set and check-out does
    /// not come after check-in.
    pub fn validate(&self) -> Result<()> {
        if let (Some(check_in), Some(check_out)) = (self.check_in, self.check_out) {
            if check_out <= check_in {
                return Err(Error::validation(
                    "check_out",
                    "check-out time must be after check-in time",
                ));
            }
        }
        Ok(())
    }
}

/// Transit-specific attributes of an event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitDetails {
    /// Where the leg starts.
    pub origin: String,
    /// Where the leg ends.
    pub destination: String,
    /// Mode of transport, e.g. "Metro".
    pub transport_mode: String,
}

/// Category-specific detail record attached to an event.
///
/// At most one variant exists per event, and its variant always agrees with
/// the event's category. Activity and food events never carry details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventDetails {
    /// Flight detail record.
    Flight(FlightDetails),
    /// Lodging detail record.
    Lodging(LodgingDetails),
    /// Transit detail record.
    Transit(TransitDetails),
}

impl EventDetails {
    /// Returns the category this detail record belongs to.
    #[must_use]
    pub const fn category(&self) -> EventCategory {
        match self {
            Self::Flight(_) => EventCategory::Flight,
            Self::Lodging(_) => EventCategory::Lodging,
            Self::Transit(_) => EventCategory::Transit,
        }
    }

    /// Returns true if this detail record matches the given category.
    #[must_use]
    pub fn matches(&self, category: EventCategory) -> bool {
        self.category() == category
    }

    /// Returns the zero-valued detail record for a category, or `None` for
    /// categories that carry no details.
    ///
    /// # Examples
    ///
    /// ```
    /// use itin::{EventCategory, EventDetails};
    ///
    /// assert!(EventDetails::empty_for(EventCategory::Flight).is_some());
    /// assert!(EventDetails::empty_for(EventCategory::Food).is_none());
    /// ```
    #[must_use]
    pub fn empty_for(category: EventCategory) -> Option<Self> {
        match category {
            EventCategory::Flight => Some(Self::Flight(FlightDetails::default())),
            EventCategory::Lodging => Some(Self::Lodging(LodgingDetails::default())),
            EventCategory::Transit => Some(Self::Transit(TransitDetails::default())),
            EventCategory::Activity | EventCategory::Food => None,
        }
    }

    /// Returns the flight detail record, if this is one.
    #[must_use]
    pub const fn as_flight(&self) -> Option<&FlightDetails> {
        match self {
            Self::Flight(details) => Some(details),
            _ => None,
        }
    }

    /// Returns the lodging detail record, if this is one.
    #[must_use]
    pub const fn as_lodging(&self) -> Option<&LodgingDetails> {
        match self {
            Self::Lodging(details) => Some(details),
            _ => None,
        }
    }

    /// Returns the transit detail record, if this is one.
    #[must_use]
    pub const fn as_transit(&self) -> Option<&TransitDetails> {
        match self {
            Self::Transit(details) => Some(details),
            _ => None,
        }
    }
}

/// A single itinerary entry within a trip.
///
/// `event_date` is derived state: it always equals the calendar date of
/// `start_time` and is recomputed whenever the start time changes. `position`
/// orders events within a (trip, day) bucket and is assigned with large gaps
/// so manual reordering rarely renumbers neighbors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    /// Database identity (0 before the event is persisted).
    pub id: i64,
    /// Owning trip.
    pub trip_id: i64,
    /// Event category.
    pub category: EventCategory,
    /// Calendar date of the event, derived from `start_time`.
    pub event_date: NaiveDate,
    /// Display title.
    pub title: String,
    /// Free-form location text (empty when unset).
    pub location: String,
    /// Latitude, when geocoded.
    pub latitude: Option<f64>,
    /// Longitude, when geocoded.
    pub longitude: Option<f64>,
    /// Scheduled start time.
    pub start_time: Option<NaiveDateTime>,
    /// Scheduled end time.
    pub end_time: Option<NaiveDateTime>,
    /// User-pinned events keep their start time through reorders.
    pub pinned: bool,
    /// Manual ordering position within the (trip, day) bucket.
    pub position: i64,
    /// Free-form notes (empty when unset).
    pub notes: String,
    /// Soft-delete marker; set rows are hidden from every read path.
    pub deleted_at: Option<NaiveDateTime>,
    /// Creation timestamp.
    pub created_at: NaiveDateTime,
    /// Last-modification timestamp.
    pub updated_at: NaiveDateTime,
    /// Category-specific detail record, when the category carries one.
    pub details: Option<EventDetails>,
}

impl Event {
    /// Returns the scheduled duration, when both start and end are set.
    #[must_use]
    pub fn duration(&self) -> Option<Duration> {
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => Some(end - start),
            _ => None,
        }
    }

    /// Returns true if the event is soft-deleted.
    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}
