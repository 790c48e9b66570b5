//! Trip domain types.
//!
//! A trip is the root aggregate of the itinerary model: it carries a name,
//! a destination, and an inclusive date range, and owns zero or more events.
//! Events live and die with their trip (deleting a trip cascades).

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::error::{Error, Result};

/// An inclusive, date-only range with the invariant `end >= start`.
///
/// The range is validated on construction; once built it cannot represent
/// an inverted range.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use itin::DateRange;
///
/// let start = NaiveDate::from_ymd_opt(2026, 5, 1).unwrap();
/// let end = NaiveDate::from_ymd_opt(2026, 5, 5).unwrap();
/// let range = DateRange::new(start, end).unwrap();
///
/// assert!(range.contains(NaiveDate::from_ymd_opt(2026, 5, 3).unwrap()));
/// assert!(!range.contains(NaiveDate::from_ymd_opt(2026, 5, 6).unwrap()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Creates a new date range.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `end` precedes `start`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if end < start {
            return Err(Error::validation(
                "end_date",
                "end date must be on or after start date",
            ));
        }
        Ok(Self { start, end })
    }

    /// Returns the first day of the range.
    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// Returns the last day of the range (inclusive).
    #[must_use]
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// Returns true if `date` falls within the range (inclusive on both ends).
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Returns true if this range covers `other` entirely.
    ///
    /// A range that covers another leaves no day of the other range outside
    /// itself; replacing `other` with `self` cannot orphan dated records.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use itin::DateRange;
    ///
    /// let date = |d| NaiveDate::from_ymd_opt(2026, 5, d).unwrap();
    /// let old = DateRange::new(date(2), date(4)).unwrap();
    /// let wider = DateRange::new(date(1), date(5)).unwrap();
    ///
    /// assert!(wider.covers(&old));
    /// assert!(!old.covers(&wider));
    /// ```
    #[must_use]
    pub fn covers(&self, other: &Self) -> bool {
        self.start <= other.start && self.end >= other.end
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

/// A trip: the owning aggregate for a set of itinerary events.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trip {
    /// Database identity (0 before the trip is persisted).
    pub id: i64,
    /// Display name of the trip.
    pub name: String,
    /// Destination of the trip.
    pub destination: String,
    /// Inclusive date range the trip spans.
    pub dates: DateRange,
    /// Creation timestamp.
    pub created_at: NaiveDateTime,
    /// Last-modification timestamp.
    pub updated_at: NaiveDateTime,
}

impl fmt::Display for Trip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.name, self.destination, self.dates)
    }
}

/// Number of events on a single calendar day.
///
/// Produced by the trip store when checking whether a date-range change
/// would orphan events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateEventCount {
    /// The calendar day.
    pub date: NaiveDate,
    /// Number of non-deleted events on that day.
    pub count: i64,
}
