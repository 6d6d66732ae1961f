//! The rolling aggregator: one pass per window over the event list,
//! producing the counters the transition policy reads.

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use keel_core::event::{EventCategory, TrustEvent};
use keel_core::score::{TrustAggregates, Window, WindowMetrics};

/// Recomputes all windowed counters from an actor/role event history.
#[derive(Debug, Default, Clone, Copy)]
pub struct RollingAggregator;

impl RollingAggregator {
    pub fn new() -> Self {
        Self
    }

    /// Compute the full aggregate set at instant `now`. The input is one
    /// actor/role's history; mixing actors or roles here is a caller bug and
    /// produces meaningless counters.
    pub fn aggregate(&self, events: &[TrustEvent], now: DateTime<Utc>) -> TrustAggregates {
        let mut aggregates = TrustAggregates::empty(now);
        for window in Window::ALL {
            *aggregates.window_mut(window) = self.window_metrics(events, window, now);
        }
        aggregates
    }

    /// Counters for a single window.
    pub fn window_metrics(
        &self,
        events: &[TrustEvent],
        window: Window,
        now: DateTime<Utc>,
    ) -> WindowMetrics {
        let mut negative = 0u64;
        let mut completed = 0u64;
        let mut neutral = 0u64;
        let mut counterparts: HashSet<&str> = HashSet::new();

        for event in events {
            if !crate::qualify::counts_in_window(event, window, now) {
                continue;
            }
            match event.category {
                EventCategory::Negative => {
                    negative += 1;
                    if let Some(counterpart) = &event.counterpart_id {
                        counterparts.insert(counterpart.as_str());
                    }
                }
                EventCategory::Positive => completed += 1,
                EventCategory::Neutral => neutral += 1,
            }
        }

        WindowMetrics {
            negative_events: negative,
            completed_events: completed,
            neutral_events: neutral,
            negative_rate: WindowMetrics::rate_of(negative, completed),
            unique_counterparts: counterparts.len() as u64,
        }
    }
}
