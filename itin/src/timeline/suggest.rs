//! Default time suggestion for new events.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::event::{Event, EventCategory};

/// Suggested start and end times for a new event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuggestedTimes {
    /// Suggested start time.
    pub start: NaiveDateTime,
    /// Suggested end time.
    pub end: NaiveDateTime,
}

/// Anchor for the first event of an otherwise empty day.
fn day_start() -> NaiveTime {
    NaiveTime::from_hms_opt(9, 0, 0).unwrap_or(NaiveTime::MIN)
}

/// Suggests default times for a new event on a given day.
///
/// `events` holds the day's existing events. The suggested start is the
/// latest end time among them, so the new event lands after everything
/// already planned; a day without any timed event starts at 09:00. The end
/// follows from the category's default duration.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use itin::timeline::suggest_times;
/// use itin::EventCategory;
///
/// let date = NaiveDate::from_ymd_opt(2026, 5, 2).unwrap();
/// let suggested = suggest_times(&[], date, EventCategory::Food);
///
/// assert_eq!(suggested.start, date.and_hms_opt(9, 0, 0).unwrap());
/// assert_eq!(suggested.end, date.and_hms_opt(10, 30, 0).unwrap());
/// ```
#[must_use]
pub fn suggest_times(events: &[Event], date: NaiveDate, category: EventCategory) -> SuggestedTimes {
    let start = events
        .iter()
        .filter_map(|e| e.end_time)
        .max()
        .unwrap_or_else(|| date.and_time(day_start()));

    SuggestedTimes {
        start,
        end: start + category.default_duration(),
    }
}
