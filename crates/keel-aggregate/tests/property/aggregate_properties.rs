//! Property tests over the aggregator: counter identities that must hold for
//! any generated history.

use chrono::{DateTime, Duration, Utc};
use proptest::prelude::*;

use keel_aggregate::RollingAggregator;
use keel_core::event::{EventType, Role, TrustEvent};
use keel_core::score::{Window, WindowMetrics};

fn history_strategy() -> impl Strategy<Value = Vec<(EventType, i64, Option<u8>)>> {
    // (taxonomy member, days ago, counterpart bucket)
    prop::collection::vec(
        (
            prop::sample::select(EventType::all().to_vec()),
            0i64..400,
            prop::option::of(0u8..5),
        ),
        0..60,
    )
}

fn build_events(raw: &[(EventType, i64, Option<u8>)], now: DateTime<Utc>) -> Vec<TrustEvent> {
    raw.iter()
        .map(|(event_type, days_ago, counterpart)| {
            TrustEvent::new(
                "prop-actor",
                Role::Requester,
                *event_type,
                counterpart.map(|c| format!("counterpart-{c}")),
                now - Duration::days(*days_ago),
                vec![],
                None,
                now,
            )
        })
        .collect()
}

proptest! {
    #[test]
    fn prop_day_windows_nest(raw in history_strategy()) {
        let now = Utc::now();
        let events = build_events(&raw, now);
        let aggregates = RollingAggregator::new().aggregate(&events, now);

        // Wider window, never fewer events.
        prop_assert!(aggregates.last_30d.negative_events <= aggregates.last_90d.negative_events);
        prop_assert!(aggregates.last_90d.negative_events <= aggregates.last_180d.negative_events);
        prop_assert!(aggregates.last_30d.completed_events <= aggregates.last_90d.completed_events);
        prop_assert!(aggregates.last_90d.completed_events <= aggregates.last_180d.completed_events);
        // Lifetime dominates everything, expired included.
        prop_assert!(aggregates.last_180d.negative_events <= aggregates.lifetime.negative_events);
        prop_assert!(aggregates.last_180d.completed_events <= aggregates.lifetime.completed_events);
    }

    #[test]
    fn prop_rate_stays_in_unit_interval(raw in history_strategy()) {
        let now = Utc::now();
        let events = build_events(&raw, now);
        let aggregates = RollingAggregator::new().aggregate(&events, now);

        for window in Window::ALL {
            let rate = aggregates.window(window).negative_rate;
            prop_assert!((0.0..=1.0).contains(&rate), "rate {rate} out of range");
        }
    }

    #[test]
    fn prop_rate_matches_counts(raw in history_strategy()) {
        let now = Utc::now();
        let events = build_events(&raw, now);
        let aggregates = RollingAggregator::new().aggregate(&events, now);

        for window in Window::ALL {
            let m = aggregates.window(window);
            prop_assert_eq!(
                m.negative_rate,
                WindowMetrics::rate_of(m.negative_events, m.completed_events)
            );
        }
    }

    #[test]
    fn prop_counterparts_bounded_by_negatives(raw in history_strategy()) {
        let now = Utc::now();
        let events = build_events(&raw, now);
        let aggregates = RollingAggregator::new().aggregate(&events, now);

        for window in Window::ALL {
            let m = aggregates.window(window);
            prop_assert!(m.unique_counterparts <= m.negative_events);
        }
    }

    #[test]
    fn prop_lifetime_counts_every_past_event(raw in history_strategy()) {
        let now = Utc::now();
        let events = build_events(&raw, now);
        let aggregates = RollingAggregator::new().aggregate(&events, now);

        let total = aggregates.lifetime.negative_events
            + aggregates.lifetime.completed_events
            + aggregates.lifetime.neutral_events;
        prop_assert_eq!(total as usize, events.len());
    }
}
