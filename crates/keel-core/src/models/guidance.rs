use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::event::Role;
use crate::score::TrustLevel;

/// Human-readable status for one actor/role, served from the last-committed
/// score record with no recomputation. An actor with no history gets the
/// level-0 result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuidanceResult {
    pub actor_id: String,
    pub role: Role,
    pub level: TrustLevel,
    pub status_label: String,
    pub key_metrics: KeyMetrics,
    pub improvement_tips: Vec<ImprovementTip>,
    /// Present when the actor is above level 0 and a completion streak would
    /// move them down.
    pub recovery_progress: Option<RecoveryProgress>,
}

/// The handful of numbers a profile/dashboard surface shows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeyMetrics {
    pub negative_events_90d: u64,
    pub completed_events_90d: u64,
    pub negative_rate_90d: f64,
    pub unique_counterparts_180d: u64,
    pub lifetime_completed: u64,
    pub last_negative_at: Option<DateTime<Utc>>,
}

/// Severity of an improvement tip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TipSeverity {
    Info,
    Warning,
    Critical,
}

/// An actionable suggestion surfaced through the guidance result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImprovementTip {
    pub severity: TipSeverity,
    pub message: String,
    pub action: String,
}

/// How far along the completion streak toward the next level decrease is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecoveryProgress {
    /// Completions recorded since the last qualifying negative event.
    pub streak: u64,
    /// Role-specific streak length that triggers a one-level decrease.
    pub required: u64,
    /// Completions still needed.
    pub remaining: u64,
}
