use chrono::{DateTime, Utc};

use crate::errors::KeelResult;
use crate::event::{Role, TrustEvent};
use crate::models::TrustSnapshot;
use crate::score::TrustScoreRecord;

/// Read/audit surface over the trust store: event history, per-role score
/// records, and snapshots. Writes to events and scores go through the engine,
/// which needs transaction scope for dedup and version checks.
pub trait ITrustStorage: Send + Sync {
    // --- Events ---
    fn get_event(&self, event_id: &str) -> KeelResult<Option<TrustEvent>>;
    fn list_events(&self, actor_id: &str, role: Role) -> KeelResult<Vec<TrustEvent>>;
    fn event_count_since(
        &self,
        actor_id: &str,
        role: Role,
        recorded_after: DateTime<Utc>,
    ) -> KeelResult<u64>;

    // --- Scores ---
    fn get_score(&self, actor_id: &str, role: Role) -> KeelResult<Option<TrustScoreRecord>>;
    fn list_score_keys(&self) -> KeelResult<Vec<(String, Role)>>;

    // --- Snapshots ---
    fn insert_snapshot(&self, snapshot: &TrustSnapshot) -> KeelResult<()>;
    fn snapshots_in_range(
        &self,
        actor_id: &str,
        role: Role,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> KeelResult<Vec<TrustSnapshot>>;
    fn latest_snapshot(&self, actor_id: &str, role: Role) -> KeelResult<Option<TrustSnapshot>>;
}
