//! The scheduling walk behind whole-trip reordering.
//!
//! Reordering never moves events around individually: the whole trip is
//! rescheduled in one pass. Each event keeps its duration, pinned events
//! keep their wall-clock start, and everything else packs back-to-back
//! behind a single advancing anchor.

use std::collections::HashMap;

use chrono::{Duration, NaiveDateTime, Timelike};

use crate::error::{Error, Result};
use crate::event::Event;

/// Slot length assumed for events that don't carry both times yet.
fn fallback_duration() -> Duration {
    Duration::hours(1)
}

fn truncate_to_minute(t: NaiveDateTime) -> NaiveDateTime {
    t.with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(t)
}

/// Plans new times for a trip's events in the caller's order.
///
/// `events` is the trip's full set of live events sorted by start time
/// (untimed events last); `ordered_ids` is the desired order and must be a
/// permutation of the event ids. The walk starts its anchor at the earliest
/// existing start time, or the current minute for a trip with no scheduled
/// times yet, and then assigns each event in the caller's order:
///
/// - the event keeps its duration (end minus start), or a one hour slot if
///   it doesn't carry both times
/// - a pinned event with a start time keeps that start; everything else
///   starts at the anchor
/// - the anchor advances to the event's new end either way, so unpinned
///   events following a pinned one pack behind it
///
/// The same inputs always produce the same schedule. The input order of
/// `events` only seeds the anchor; the result is in the caller's order.
///
/// # Errors
///
/// Returns a validation error if `ordered_ids` and `events` differ in
/// length, contain a repeated id, or name an event that isn't in `events`.
pub fn plan_reorder(
    events: Vec<Event>,
    ordered_ids: &[i64],
    now: NaiveDateTime,
) -> Result<Vec<Event>> {
    if events.is_empty() {
        return Ok(Vec::new());
    }
    if events.len() != ordered_ids.len() {
        return Err(Error::validation(
            "event_ids",
            format!(
                "event count mismatch: expected {}, got {}",
                events.len(),
                ordered_ids.len()
            ),
        ));
    }

    // The load order puts the earliest scheduled event first
    let anchor_seed = events[0].start_time;

    let mut remaining: HashMap<i64, Event> = events.into_iter().map(|e| (e.id, e)).collect();
    let mut ordered: Vec<Event> = Vec::with_capacity(ordered_ids.len());

    for &id in ordered_ids {
        let Some(event) = remaining.remove(&id) else {
            // A repeated id was consumed on its first occurrence
            if ordered.iter().any(|e| e.id == id) {
                return Err(Error::validation(
                    "event_ids",
                    format!("duplicate event ID in reorder list: {id}"),
                ));
            }
            return Err(Error::validation(
                "event_ids",
                format!("event {id} not found in trip"),
            ));
        };
        ordered.push(event);
    }

    let mut anchor = anchor_seed.unwrap_or_else(|| truncate_to_minute(now));

    for event in &mut ordered {
        let duration = match (event.start_time, event.end_time) {
            (Some(start), Some(end)) => end - start,
            _ => fallback_duration(),
        };

        let new_start = if event.pinned {
            event.start_time.unwrap_or(anchor)
        } else {
            anchor
        };
        let new_end = new_start + duration;

        event.start_time = Some(new_start);
        event.end_time = Some(new_end);
        event.updated_at = now;

        anchor = new_end;
    }

    Ok(ordered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_util::{datetime, draft_event};
    use crate::event::EventCategory;

    fn event_with_id(id: i64, start_h: u32, start_m: u32, end_h: u32, end_m: u32) -> Event {
        let mut event = draft_event(
            1,
            EventCategory::Activity,
            "test",
            datetime(2026, 5, 2, start_h, start_m),
            datetime(2026, 5, 2, end_h, end_m),
        );
        event.id = id;
        event
    }

    fn now() -> NaiveDateTime {
        datetime(2026, 5, 2, 8, 30)
    }

    #[test]
    fn test_plan_reorder_empty() {
        let planned = plan_reorder(Vec::new(), &[], now()).unwrap();
        assert!(planned.is_empty());
    }

    #[test]
    fn test_plan_reorder_count_mismatch() {
        let events = vec![event_with_id(1, 9, 0, 10, 0), event_with_id(2, 10, 0, 11, 0)];

        let err = plan_reorder(events, &[1], now()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "validation error for 'event_ids': event count mismatch: expected 2, got 1"
        );
    }

    #[test]
    fn test_plan_reorder_duplicate_id() {
        let events = vec![event_with_id(1, 9, 0, 10, 0), event_with_id(2, 10, 0, 11, 0)];

        let err = plan_reorder(events, &[1, 1], now()).unwrap_err();
        assert!(err
            .to_string()
            .contains("duplicate event ID in reorder list: 1"));
    }

    #[test]
    fn test_plan_reorder_unknown_id() {
        let events = vec![event_with_id(1, 9, 0, 10, 0), event_with_id(2, 10, 0, 11, 0)];

        let err = plan_reorder(events, &[1, 99], now()).unwrap_err();
        assert!(err.to_string().contains("event 99 not found in trip"));
    }

    #[test]
    fn test_plan_reorder_preserves_durations() {
        // A runs 2.5h, B runs 1h; swapping them keeps both lengths
        let events = vec![event_with_id(1, 10, 0, 12, 30), event_with_id(2, 13, 0, 14, 0)];

        let planned = plan_reorder(events, &[2, 1], now()).unwrap();
        assert_eq!(planned[0].id, 2);
        assert_eq!(planned[0].start_time, Some(datetime(2026, 5, 2, 10, 0)));
        assert_eq!(planned[0].end_time, Some(datetime(2026, 5, 2, 11, 0)));
        assert_eq!(planned[1].id, 1);
        assert_eq!(planned[1].start_time, Some(datetime(2026, 5, 2, 11, 0)));
        assert_eq!(planned[1].end_time, Some(datetime(2026, 5, 2, 13, 30)));
    }

    #[test]
    fn test_plan_reorder_pinned_keeps_start_and_repacks_rest() {
        // A 10:00-12:30, P pinned 12:00-13:00, B 13:00-14:00
        let a = event_with_id(1, 10, 0, 12, 30);
        let mut p = event_with_id(2, 12, 0, 13, 0);
        p.pinned = true;
        let b = event_with_id(3, 13, 0, 14, 0);

        // Identity order: A keeps its slot, P stays pinned, B packs behind P
        let planned = plan_reorder(vec![a.clone(), p.clone(), b.clone()], &[1, 2, 3], now()).unwrap();
        assert_eq!(planned[0].start_time, Some(datetime(2026, 5, 2, 10, 0)));
        assert_eq!(planned[0].end_time, Some(datetime(2026, 5, 2, 12, 30)));
        assert_eq!(planned[1].start_time, Some(datetime(2026, 5, 2, 12, 0)));
        assert_eq!(planned[1].end_time, Some(datetime(2026, 5, 2, 13, 0)));
        assert_eq!(planned[2].start_time, Some(datetime(2026, 5, 2, 13, 0)));
        assert_eq!(planned[2].end_time, Some(datetime(2026, 5, 2, 14, 0)));

        // Reversed order: B takes the anchor, P stays put, A packs after P
        let planned = plan_reorder(vec![a, p, b], &[3, 2, 1], now()).unwrap();
        assert_eq!(planned[0].id, 3);
        assert_eq!(planned[0].start_time, Some(datetime(2026, 5, 2, 10, 0)));
        assert_eq!(planned[0].end_time, Some(datetime(2026, 5, 2, 11, 0)));
        assert_eq!(planned[1].id, 2);
        assert_eq!(planned[1].start_time, Some(datetime(2026, 5, 2, 12, 0)));
        assert_eq!(planned[1].end_time, Some(datetime(2026, 5, 2, 13, 0)));
        assert_eq!(planned[2].id, 1);
        assert_eq!(planned[2].start_time, Some(datetime(2026, 5, 2, 13, 0)));
        assert_eq!(planned[2].end_time, Some(datetime(2026, 5, 2, 15, 30)));
    }

    #[test]
    fn test_plan_reorder_pinned_without_start_uses_anchor() {
        let a = event_with_id(1, 10, 0, 11, 0);
        let mut p = event_with_id(2, 0, 0, 0, 0);
        p.pinned = true;
        p.start_time = None;
        p.end_time = None;

        let planned = plan_reorder(vec![a, p], &[1, 2], now()).unwrap();
        // The pin has nothing to hold on to, so it takes the anchor and a
        // one hour slot
        assert_eq!(planned[1].start_time, Some(datetime(2026, 5, 2, 11, 0)));
        assert_eq!(planned[1].end_time, Some(datetime(2026, 5, 2, 12, 0)));
    }

    #[test]
    fn test_plan_reorder_untimed_events_anchor_on_now() {
        let mut a = event_with_id(1, 0, 0, 0, 0);
        a.start_time = None;
        a.end_time = None;
        let mut b = event_with_id(2, 0, 0, 0, 0);
        b.start_time = None;
        b.end_time = None;

        let now = datetime(2026, 5, 2, 8, 30);
        let planned = plan_reorder(vec![a, b], &[1, 2], now).unwrap();

        assert_eq!(planned[0].start_time, Some(datetime(2026, 5, 2, 8, 30)));
        assert_eq!(planned[0].end_time, Some(datetime(2026, 5, 2, 9, 30)));
        assert_eq!(planned[1].start_time, Some(datetime(2026, 5, 2, 9, 30)));
        assert_eq!(planned[1].end_time, Some(datetime(2026, 5, 2, 10, 30)));
    }

    #[test]
    fn test_plan_reorder_truncates_anchor_to_minute() {
        let mut a = event_with_id(1, 0, 0, 0, 0);
        a.start_time = None;
        a.end_time = None;

        let now = datetime(2026, 5, 2, 8, 30).with_second(42).unwrap();
        let planned = plan_reorder(vec![a], &[1], now).unwrap();

        assert_eq!(planned[0].start_time, Some(datetime(2026, 5, 2, 8, 30)));
    }

    #[test]
    fn test_plan_reorder_single_timed_event_missing_end() {
        let mut a = event_with_id(1, 14, 0, 0, 0);
        a.end_time = None;

        let planned = plan_reorder(vec![a], &[1], now()).unwrap();
        // Without both times the event gets the fallback slot
        assert_eq!(planned[0].start_time, Some(datetime(2026, 5, 2, 14, 0)));
        assert_eq!(planned[0].end_time, Some(datetime(2026, 5, 2, 15, 0)));
    }

    #[test]
    fn test_plan_reorder_stamps_updated_at() {
        let events = vec![event_with_id(1, 9, 0, 10, 0)];
        let now = datetime(2026, 5, 2, 8, 30);

        let planned = plan_reorder(events, &[1], now).unwrap();
        assert_eq!(planned[0].updated_at, now);
    }

    #[test]
    fn test_plan_reorder_deterministic() {
        let make = || {
            vec![
                event_with_id(1, 10, 0, 12, 30),
                event_with_id(2, 12, 30, 13, 30),
                event_with_id(3, 14, 0, 16, 0),
            ]
        };

        let first = plan_reorder(make(), &[3, 1, 2], now()).unwrap();
        let second = plan_reorder(make(), &[3, 1, 2], now()).unwrap();
        assert_eq!(first, second);
    }
}
