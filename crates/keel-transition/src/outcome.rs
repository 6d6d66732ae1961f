use chrono::{DateTime, Utc};

use keel_core::TrustLevel;

/// Direction of an applied level step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelChange {
    /// One step up the ladder: the aggregates crossed into a higher band.
    Promoted,
    /// One step down the ladder: the recovery streak completed.
    Demoted,
    /// No step this evaluation.
    Unchanged,
}

/// Result of one transition evaluation.
///
/// Carries every score-record field the recalculation pipeline writes back;
/// the caller folds it into the record and persists under the version check.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionOutcome {
    pub previous_level: TrustLevel,
    pub level: TrustLevel,
    pub change: LevelChange,
    /// Streak value after this evaluation: category effect applied, then
    /// reset to 0 if a level step was taken.
    pub consecutive_completed: u64,
    pub last_negative_at: Option<DateTime<Utc>>,
}

impl TransitionOutcome {
    /// Whether this evaluation moved the level.
    pub fn changed(&self) -> bool {
        self.change != LevelChange::Unchanged
    }
}
