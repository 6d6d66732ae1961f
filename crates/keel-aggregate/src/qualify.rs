//! Window membership predicates.
//!
//! Day-windows count an event when it occurred inside the trailing range AND
//! has not expired. The lifetime window keeps expired events: it is the
//! audit-trail view, and thresholds never read it.

use chrono::{DateTime, Duration, Utc};

use keel_core::event::TrustEvent;
use keel_core::score::Window;

/// Whether `event` counts toward `window` at instant `now`.
pub fn counts_in_window(event: &TrustEvent, window: Window, now: DateTime<Utc>) -> bool {
    if event.occurred_at > now {
        return false;
    }
    match window.days() {
        None => true,
        Some(days) => {
            event.is_live(now) && event.occurred_at > now - Duration::days(days)
        }
    }
}
