use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::taxonomy::{EventCategory, EventType, Role};

/// Input for `record_event`: everything a collaborator supplies when it
/// reports a trust-relevant occurrence.
///
/// `category` travels alongside `event_type` because callers carry it
/// out-of-band; the engine rejects a value that contradicts the canonical
/// taxonomy mapping rather than silently remapping it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTrustEvent {
    pub actor_id: String,
    pub role: Role,
    pub event_type: EventType,
    pub category: EventCategory,
    pub counterpart_id: Option<String>,
    /// When the behavior happened. `None` means "now"; late reports such as
    /// dispute outcomes may backdate.
    pub occurred_at: Option<DateTime<Utc>>,
    /// Deterministic key tied to the triggering job/booking/incident. Two
    /// retries with the same key within the dedup window yield one event.
    pub dedup_key: Option<String>,
    /// Opaque references to the triggering job/booking/incident, audit only.
    pub related_refs: Vec<String>,
}

impl NewTrustEvent {
    /// New request with the canonical category for the event type and no
    /// optional fields set.
    pub fn new(actor_id: impl Into<String>, role: Role, event_type: EventType) -> Self {
        Self {
            actor_id: actor_id.into(),
            role,
            event_type,
            category: event_type.category(),
            counterpart_id: None,
            occurred_at: None,
            dedup_key: None,
            related_refs: Vec::new(),
        }
    }

    /// Set the caller-supplied category (validated against the taxonomy at
    /// record time).
    pub fn with_category(mut self, category: EventCategory) -> Self {
        self.category = category;
        self
    }

    pub fn with_counterpart(mut self, counterpart_id: impl Into<String>) -> Self {
        self.counterpart_id = Some(counterpart_id.into());
        self
    }

    pub fn with_occurred_at(mut self, occurred_at: DateTime<Utc>) -> Self {
        self.occurred_at = Some(occurred_at);
        self
    }

    pub fn with_dedup_key(mut self, dedup_key: impl Into<String>) -> Self {
        self.dedup_key = Some(dedup_key.into());
        self
    }

    pub fn with_ref(mut self, reference: impl Into<String>) -> Self {
        self.related_refs.push(reference.into());
        self
    }
}
