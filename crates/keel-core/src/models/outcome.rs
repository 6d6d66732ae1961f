use serde::{Deserialize, Serialize};

use crate::score::TrustScoreRecord;

/// What `record_event` returns to the calling collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordOutcome {
    /// The ledger entry id (the existing one when the call deduplicated).
    pub event_id: String,
    /// True when a prior event with the same dedup key absorbed this call
    /// and nothing was recomputed.
    pub deduplicated: bool,
    /// The score record as committed by this call.
    pub record: TrustScoreRecord,
}
