use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::event::Role;

use super::aggregates::TrustAggregates;
use super::level::TrustLevel;

/// The per-actor/role score row. Created lazily on the first recorded event,
/// updated by every subsequent one, never hard-deleted.
///
/// `version` is the optimistic-concurrency token: the storage layer only
/// applies an update whose expected version matches the row, and a miss
/// rolls the whole append+recalculate transaction back for retry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrustScoreRecord {
    pub actor_id: String,
    pub role: Role,
    pub trust_level: TrustLevel,
    /// Recovery streak: incremented on every positive event, reset to 0 on
    /// every qualifying negative event and on every applied level change.
    pub consecutive_completed_since_last_negative: u64,
    pub last_negative_at: Option<DateTime<Utc>>,
    pub aggregates: TrustAggregates,
    pub version: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TrustScoreRecord {
    /// Fresh record for an actor/role seen for the first time. Starts at
    /// level 0 with empty counters and version 1.
    pub fn bootstrap(actor_id: impl Into<String>, role: Role, now: DateTime<Utc>) -> Self {
        Self {
            actor_id: actor_id.into(),
            role,
            trust_level: TrustLevel::Good,
            consecutive_completed_since_last_negative: 0,
            last_negative_at: None,
            aggregates: TrustAggregates::empty(now),
            version: 1,
            created_at: now,
            updated_at: now,
        }
    }
}
