//! Automatic snapshot scheduling.
//!
//! Cuts a snapshot per (actor, role) at configurable intervals, skipping
//! actors with no recorded events since their last one. Caller-driven:
//! nothing here spawns threads or owns a clock.

use chrono::{DateTime, Duration, Utc};

use keel_core::config::SnapshotConfig;
use keel_core::errors::KeelResult;
use keel_core::models::TrustSnapshot;
use keel_core::{ITrustStorage, Role};

/// Decides when a scored actor/role is due an automatic snapshot.
pub struct SnapshotScheduler {
    config: SnapshotConfig,
}

impl SnapshotScheduler {
    pub fn new(config: SnapshotConfig) -> Self {
        Self { config }
    }

    /// Check whether one actor/role should get an automatic snapshot at
    /// `now`.
    ///
    /// Returns `Some(label)` (e.g. "auto-2026-08-24") if:
    /// - No snapshot exists yet for the pair, OR
    /// - The configured interval since the latest snapshot has elapsed
    ///   AND events have been recorded since it
    ///
    /// Returns `None` when snapshots are disabled, the interval has not
    /// elapsed, or nothing happened since the last one.
    pub fn should_snapshot(
        &self,
        storage: &dyn ITrustStorage,
        actor_id: &str,
        role: Role,
        now: DateTime<Utc>,
    ) -> KeelResult<Option<String>> {
        if !self.config.enabled {
            return Ok(None);
        }

        let interval = Duration::days(self.config.interval_days as i64);

        match storage.latest_snapshot(actor_id, role)? {
            Some(latest) => {
                let elapsed = now - latest.created_at;
                if elapsed < interval {
                    return Ok(None);
                }
                if storage.event_count_since(actor_id, role, latest.created_at)? == 0 {
                    return Ok(None);
                }
                Ok(Some(Self::label(now)))
            }
            // First sweep over a scored pair cuts its baseline.
            None => Ok(Some(Self::label(now))),
        }
    }

    /// Sweep every scored actor/role and cut the snapshots that are due.
    /// Returns how many were cut.
    pub fn run(&self, storage: &dyn ITrustStorage, now: DateTime<Utc>) -> KeelResult<usize> {
        if !self.config.enabled {
            return Ok(0);
        }

        let mut cut = 0usize;
        for (actor_id, role) in storage.list_score_keys()? {
            let Some(label) = self.should_snapshot(storage, &actor_id, role, now)? else {
                continue;
            };
            // The score row exists: list_score_keys only returns pairs that
            // have one.
            let Some(record) = storage.get_score(&actor_id, role)? else {
                continue;
            };
            let snapshot = TrustSnapshot::of_record(&record, &label, now);
            storage.insert_snapshot(&snapshot)?;
            tracing::debug!(actor_id = %actor_id, role = %role, label = %label, "snapshot cut");
            cut += 1;
        }

        if cut > 0 {
            tracing::info!(cut, "automatic snapshot sweep finished");
        }
        Ok(cut)
    }

    fn label(now: DateTime<Utc>) -> String {
        format!("auto-{}", now.format("%Y-%m-%d"))
    }
}
