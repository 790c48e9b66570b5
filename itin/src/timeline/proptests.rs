//! Property-based tests for the scheduling walk.
//!
//! These tests focus on the invariants of the reorder pass: it is a
//! bijection over the trip's events, it preserves durations and pinned
//! starts, and it is deterministic.

use chrono::Duration;
use proptest::prelude::*;

use crate::database::test_util::{date, datetime, draft_event};
use crate::event::{Event, EventCategory};

use super::plan_reorder;

/// Builds a trip's worth of events from compact specs and a shuffled id
/// order. Events are sorted the way the reorder load returns them, timed
/// events first by start.
fn events_and_order() -> impl Strategy<Value = (Vec<Event>, Vec<i64>)> {
    prop::collection::vec(
        (0u32..1200, 0i64..=300, any::<bool>(), prop::bool::weighted(0.8)),
        1..8,
    )
    .prop_map(|specs| {
        let mut events: Vec<Event> = specs
            .iter()
            .enumerate()
            .map(|(i, &(start_minute, duration_minutes, pinned, timed))| {
                let start = datetime(2026, 5, 2, 0, 0) + Duration::minutes(i64::from(start_minute));
                let mut event = draft_event(
                    1,
                    EventCategory::Activity,
                    "prop",
                    start,
                    start + Duration::minutes(duration_minutes),
                );
                event.id = i as i64 + 1;
                event.pinned = pinned;
                if !timed {
                    event.start_time = None;
                    event.end_time = None;
                }
                event
            })
            .collect();
        events.sort_by_key(|e| (e.start_time.is_none(), e.start_time, e.id));
        events
    })
    .prop_flat_map(|events| {
        let ids: Vec<i64> = events.iter().map(|e| e.id).collect();
        (Just(events), Just(ids).prop_shuffle())
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    // The result is exactly the requested permutation, nothing dropped or
    // invented
    #[test]
    fn reorder_returns_caller_order((events, order) in events_and_order()) {
        let planned = plan_reorder(events, &order, datetime(2026, 5, 2, 8, 0)).unwrap();

        let planned_ids: Vec<i64> = planned.iter().map(|e| e.id).collect();
        prop_assert_eq!(planned_ids, order);
    }

    // Every event comes out fully scheduled
    #[test]
    fn reorder_schedules_every_event((events, order) in events_and_order()) {
        let now = datetime(2026, 5, 2, 8, 0);
        let planned = plan_reorder(events, &order, now).unwrap();

        for event in &planned {
            prop_assert!(event.start_time.is_some());
            prop_assert!(event.end_time.is_some());
            prop_assert_eq!(event.updated_at, now);
        }
    }

    // Events that carried both times keep their length through the walk
    #[test]
    fn reorder_preserves_durations((events, order) in events_and_order()) {
        let original: Vec<(i64, Option<Duration>)> = events
            .iter()
            .map(|e| (e.id, e.duration()))
            .collect();

        let planned = plan_reorder(events, &order, datetime(2026, 5, 2, 8, 0)).unwrap();

        for (id, duration) in original {
            if let Some(duration) = duration {
                let event = planned.iter().find(|e| e.id == id).unwrap();
                prop_assert_eq!(event.duration(), Some(duration));
            }
        }
    }

    // A pinned event with a start time never moves
    #[test]
    fn reorder_keeps_pinned_starts((events, order) in events_and_order()) {
        let pinned_starts: Vec<(i64, chrono::NaiveDateTime)> = events
            .iter()
            .filter(|e| e.pinned)
            .filter_map(|e| e.start_time.map(|start| (e.id, start)))
            .collect();

        let planned = plan_reorder(events, &order, datetime(2026, 5, 2, 8, 0)).unwrap();

        for (id, start) in pinned_starts {
            let event = planned.iter().find(|e| e.id == id).unwrap();
            prop_assert_eq!(event.start_time, Some(start));
        }
    }

    // Same inputs, same schedule
    #[test]
    fn reorder_deterministic((events, order) in events_and_order()) {
        let now = datetime(2026, 5, 2, 8, 0);
        let first = plan_reorder(events.clone(), &order, now).unwrap();
        let second = plan_reorder(events, &order, now).unwrap();
        prop_assert_eq!(first, second);
    }

    // An id list of the wrong length is always rejected
    #[test]
    fn reorder_rejects_short_id_list((events, order) in events_and_order()) {
        let short = &order[..order.len() - 1];
        let result = plan_reorder(events, short, datetime(2026, 5, 2, 8, 0));
        prop_assert!(result.is_err());
    }

    // Suggested slots always start at or after 09:00 and respect the
    // category duration
    #[test]
    fn suggest_end_follows_duration(
        end_minute in 0u32..1200,
        timed in any::<bool>(),
    ) {
        let day = date(2026, 5, 2);
        let mut event = draft_event(
            1,
            EventCategory::Activity,
            "prop",
            datetime(2026, 5, 2, 0, 0),
            datetime(2026, 5, 2, 0, 0) + Duration::minutes(i64::from(end_minute)),
        );
        if !timed {
            event.start_time = None;
            event.end_time = None;
        }

        let suggested = super::suggest_times(&[event], day, EventCategory::Food);
        prop_assert_eq!(suggested.end - suggested.start, Duration::minutes(90));
    }
}
