use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::event::Role;
use crate::score::{TrustAggregates, TrustLevel, TrustScoreRecord};

/// Immutable periodic copy of a score record plus a free-text reason.
/// Insert-only: used for audit, trend analysis, and as the sanctioned place
/// for a support annotation. Never mutated, never a direct level override.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrustSnapshot {
    /// UUID v4 identifier.
    pub id: String,
    pub actor_id: String,
    pub role: Role,
    pub trust_level: TrustLevel,
    pub consecutive_completed_since_last_negative: u64,
    pub aggregates: TrustAggregates,
    /// Why the snapshot was taken ("auto-2026-08-24", a support note, ...).
    pub reason: String,
    pub created_at: DateTime<Utc>,
}

impl TrustSnapshot {
    /// Freeze the given record under a reason label.
    pub fn of_record(
        record: &TrustScoreRecord,
        reason: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            actor_id: record.actor_id.clone(),
            role: record.role,
            trust_level: record.trust_level,
            consecutive_completed_since_last_negative: record
                .consecutive_completed_since_last_negative,
            aggregates: record.aggregates.clone(),
            reason: reason.into(),
            created_at: now,
        }
    }
}
