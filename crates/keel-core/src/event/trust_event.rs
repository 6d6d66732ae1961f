use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{NEGATIVE_EXPIRY_DAYS, NEUTRAL_EXPIRY_DAYS};

use super::taxonomy::{EventCategory, EventType, Role};

/// An immutable entry in the append-only trust ledger. Created by
/// `record_event` only; never updated or deleted (expired events drop out of
/// windowed aggregates but stay on disk for audit).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrustEvent {
    /// UUID v4 identifier.
    pub id: String,
    /// The scored account.
    pub actor_id: String,
    /// Which of the actor's two independent records this event feeds.
    pub role: Role,
    /// Taxonomy member.
    pub event_type: EventType,
    /// Canonical category of `event_type`, denormalized for windowed queries.
    pub category: EventCategory,
    /// The other party in the transaction, when there was one.
    pub counterpart_id: Option<String>,
    /// When the behavior happened (may predate `recorded_at` for late
    /// reports such as dispute outcomes).
    pub occurred_at: DateTime<Utc>,
    /// When the event stops counting toward windowed aggregates.
    /// `None` for positive events; completions never expire.
    pub expires_at: Option<DateTime<Utc>>,
    /// Opaque references to the triggering job/booking/incident. Audit only.
    pub related_refs: Vec<String>,
    /// blake3 digest of the caller's dedup key, when one was supplied.
    pub dedup_digest: Option<String>,
    /// Ledger insertion time.
    pub recorded_at: DateTime<Utc>,
}

impl TrustEvent {
    /// Build a new ledger entry with a fresh id and derived expiry.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        actor_id: impl Into<String>,
        role: Role,
        event_type: EventType,
        counterpart_id: Option<String>,
        occurred_at: DateTime<Utc>,
        related_refs: Vec<String>,
        dedup_digest: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        let category = event_type.category();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            actor_id: actor_id.into(),
            role,
            event_type,
            category,
            counterpart_id,
            occurred_at,
            expires_at: Self::expiry_for(category, occurred_at),
            related_refs,
            dedup_digest,
            recorded_at: now,
        }
    }

    /// Expiry policy: negative events age out after 180 days, neutral after
    /// 90, positive never.
    pub fn expiry_for(
        category: EventCategory,
        occurred_at: DateTime<Utc>,
    ) -> Option<DateTime<Utc>> {
        match category {
            EventCategory::Negative => Some(occurred_at + Duration::days(NEGATIVE_EXPIRY_DAYS)),
            EventCategory::Neutral => Some(occurred_at + Duration::days(NEUTRAL_EXPIRY_DAYS)),
            EventCategory::Positive => None,
        }
    }

    /// blake3 digest tying a caller dedup key to one actor/role/event-type.
    /// Two retries of the same triggering incident hash identically; the
    /// same key reused for a different event type does not collide.
    pub fn dedup_digest_for(
        actor_id: &str,
        role: Role,
        event_type: EventType,
        dedup_key: &str,
    ) -> String {
        let material = format!("{actor_id}|{}|{}|{dedup_key}", role.as_str(), event_type.as_str());
        blake3::hash(material.as_bytes()).to_hex().to_string()
    }

    /// Whether this event still counts toward day-window aggregates at `now`.
    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        match self.expires_at {
            Some(expiry) => expiry > now,
            None => true,
        }
    }
}
