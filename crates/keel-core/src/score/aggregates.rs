use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Trailing ranges over which event counters are computed.
///
/// The three day-windows count only non-expired events. `Lifetime` counts
/// every event ever recorded, expired ones included; it is the audit-trail
/// view and is never read by promotion or recovery thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Window {
    Days30,
    Days90,
    Days180,
    Lifetime,
}

impl Window {
    /// All windows, in the order they appear in `TrustAggregates`.
    pub const ALL: [Window; 4] = [
        Window::Days30,
        Window::Days90,
        Window::Days180,
        Window::Lifetime,
    ];

    /// Trailing length in days; `None` for the lifetime window.
    pub fn days(self) -> Option<i64> {
        match self {
            Window::Days30 => Some(30),
            Window::Days90 => Some(90),
            Window::Days180 => Some(180),
            Window::Lifetime => None,
        }
    }

    /// Map a configured day count to a window. Policy bands may only
    /// reference the day-windows.
    pub fn from_days(days: u32) -> Option<Window> {
        match days {
            30 => Some(Window::Days30),
            90 => Some(Window::Days90),
            180 => Some(Window::Days180),
            _ => None,
        }
    }
}

/// Counters for one window, grouped by event category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WindowMetrics {
    /// Qualifying negative events in the window.
    pub negative_events: u64,
    /// Positive (completion) events in the window.
    pub completed_events: u64,
    /// Neutral events in the window.
    pub neutral_events: u64,
    /// `negative / max(1, negative + completed)`, guarded against a zero
    /// denominator.
    pub negative_rate: f64,
    /// Distinct counterpart ids among the qualifying negative events.
    pub unique_counterparts: u64,
}

impl WindowMetrics {
    /// The guarded rate used everywhere a ratio of negatives is needed.
    pub fn rate_of(negative: u64, completed: u64) -> f64 {
        negative as f64 / (negative + completed).max(1) as f64
    }
}

/// The full set of windowed counters for one actor/role, recomputed from the
/// event ledger on every recorded event and persisted beside the score row.
///
/// A pure function of `(event list, now)`: recomputing from the same inputs
/// yields bit-identical output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrustAggregates {
    /// The `now` the aggregation ran against.
    pub computed_at: DateTime<Utc>,
    pub last_30d: WindowMetrics,
    pub last_90d: WindowMetrics,
    pub last_180d: WindowMetrics,
    pub lifetime: WindowMetrics,
}

impl TrustAggregates {
    /// Empty counters, for a record that has not aggregated anything yet.
    pub fn empty(now: DateTime<Utc>) -> Self {
        Self {
            computed_at: now,
            last_30d: WindowMetrics::default(),
            last_90d: WindowMetrics::default(),
            last_180d: WindowMetrics::default(),
            lifetime: WindowMetrics::default(),
        }
    }

    /// The counters for a given window.
    pub fn window(&self, window: Window) -> &WindowMetrics {
        match window {
            Window::Days30 => &self.last_30d,
            Window::Days90 => &self.last_90d,
            Window::Days180 => &self.last_180d,
            Window::Lifetime => &self.lifetime,
        }
    }

    /// Mutable access for the aggregator while it fills the windows in.
    pub fn window_mut(&mut self, window: Window) -> &mut WindowMetrics {
        match window {
            Window::Days30 => &mut self.last_30d,
            Window::Days90 => &mut self.last_90d,
            Window::Days180 => &mut self.last_180d,
            Window::Lifetime => &mut self.lifetime,
        }
    }
}
