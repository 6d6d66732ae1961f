use serde::{Deserialize, Serialize};

use super::defaults;

/// Periodic snapshot settings. Snapshots are audit points the scheduler cuts
/// when an actor has new events since the last one; disabling them leaves
/// manual snapshots available.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapshotConfig {
    pub enabled: bool,
    /// Minimum days between automatic snapshots for one (actor, role).
    pub interval_days: u32,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_days: defaults::DEFAULT_SNAPSHOT_INTERVAL_DAYS,
        }
    }
}
