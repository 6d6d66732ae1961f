//! TrustEngine is the public façade. It owns the storage engine and the three
//! pure components, and runs the conflict-retry loop around the record
//! pipeline.

use std::path::Path;

use chrono::Utc;
use tracing::instrument;

use keel_aggregate::RollingAggregator;
use keel_core::config::KeelConfig;
use keel_core::constants::MAX_RECALC_ATTEMPTS;
use keel_core::errors::{KeelError, KeelResult, StorageError};
use keel_core::models::{
    ActionContext, EligibilityResult, GuidanceResult, RecordOutcome, TrustSnapshot,
};
use keel_core::{ITrustStorage, NewTrustEvent, Role};
use keel_guidance::GuidanceEngine;
use keel_storage::StorageEngine;
use keel_transition::TransitionEngine;

use crate::recalc;
use crate::scheduler::SnapshotScheduler;

/// The assembled trust engine.
///
/// One instance per database. Shared freely across threads: the storage
/// layer serializes writes through its single write connection, and
/// everything else here is immutable after construction.
pub struct TrustEngine {
    storage: StorageEngine,
    aggregator: RollingAggregator,
    transitions: TransitionEngine,
    guidance: GuidanceEngine,
    scheduler: SnapshotScheduler,
}

impl TrustEngine {
    /// Open a file-backed engine with default configuration.
    pub fn open(path: &Path) -> KeelResult<Self> {
        Self::open_with_config(path, KeelConfig::default())
    }

    /// Open a file-backed engine.
    pub fn open_with_config(path: &Path, config: KeelConfig) -> KeelResult<Self> {
        config.policy.validate()?;
        let storage = StorageEngine::open_with_config(path, &config.storage)?;
        Ok(Self::assemble(storage, config))
    }

    /// Open an in-memory engine (for testing).
    pub fn open_in_memory() -> KeelResult<Self> {
        Self::open_in_memory_with_config(KeelConfig::default())
    }

    /// Open an in-memory engine with explicit configuration.
    pub fn open_in_memory_with_config(config: KeelConfig) -> KeelResult<Self> {
        config.policy.validate()?;
        let storage = StorageEngine::open_in_memory()?;
        Ok(Self::assemble(storage, config))
    }

    fn assemble(storage: StorageEngine, config: KeelConfig) -> Self {
        Self {
            storage,
            aggregator: RollingAggregator::new(),
            transitions: TransitionEngine::new(config.policy.clone()),
            guidance: GuidanceEngine::new(config.policy),
            scheduler: SnapshotScheduler::new(config.snapshot),
        }
    }

    /// The underlying storage engine, for direct reads over the
    /// `ITrustStorage` surface (audit queries, tests).
    pub fn storage(&self) -> &StorageEngine {
        &self.storage
    }

    /// Record one trust-relevant occurrence and recalculate the actor's
    /// score record.
    ///
    /// Append, aggregate recomputation, transition evaluation, and the
    /// score write happen in one transaction. When another writer commits
    /// a recalculation for the same actor/role between this call's read
    /// and write, the transaction rolls back and the whole pipeline
    /// re-runs from the fresh committed state, up to
    /// `MAX_RECALC_ATTEMPTS` times before surfacing
    /// `RecalculationConflict`.
    #[instrument(skip(self, request), fields(
        actor_id = %request.actor_id,
        role = %request.role,
        event_type = %request.event_type,
    ))]
    pub fn record_event(&self, request: &NewTrustEvent) -> KeelResult<RecordOutcome> {
        let canonical = request.event_type.category();
        if request.category != canonical {
            return Err(KeelError::CategoryMismatch {
                event_type: request.event_type.to_string(),
                expected: canonical.to_string(),
                got: request.category.to_string(),
            });
        }

        for attempt in 1..=MAX_RECALC_ATTEMPTS {
            let now = Utc::now();
            let result = self.storage.pool().writer.with_conn(|conn| {
                recalc::record_in_tx(conn, &self.aggregator, &self.transitions, request, now)
            });

            match result {
                Ok(outcome) => {
                    tracing::debug!(
                        event_id = %outcome.event_id,
                        deduplicated = outcome.deduplicated,
                        level = %outcome.record.trust_level,
                        version = outcome.record.version,
                        "event recorded"
                    );
                    return Ok(outcome);
                }
                Err(KeelError::StorageError(StorageError::VersionConflict {
                    expected, ..
                })) => {
                    tracing::warn!(
                        attempt,
                        expected,
                        "score version moved underneath the recalculation"
                    );
                }
                Err(e) => return Err(e),
            }
        }

        Err(KeelError::RecalculationConflict {
            actor_id: request.actor_id.clone(),
            role: request.role,
            attempts: MAX_RECALC_ATTEMPTS,
        })
    }

    /// Human-readable status for one actor/role. Read-only, no recomputation.
    pub fn get_guidance(&self, actor_id: &str, role: Role) -> KeelResult<GuidanceResult> {
        self.guidance.get_guidance(&self.storage, actor_id, role)
    }

    /// Yes/no gate for a job-post or job-accept action. Read-only.
    pub fn check_eligibility(
        &self,
        actor_id: &str,
        role: Role,
        context: &ActionContext,
    ) -> KeelResult<EligibilityResult> {
        self.guidance
            .check_eligibility(&self.storage, actor_id, role, context)
    }

    /// Freeze the current score record under a free-text reason. The
    /// sanctioned way to annotate a record for audit or support.
    #[instrument(skip(self))]
    pub fn take_snapshot(
        &self,
        actor_id: &str,
        role: Role,
        reason: &str,
    ) -> KeelResult<TrustSnapshot> {
        let record = self
            .storage
            .get_score(actor_id, role)?
            .ok_or_else(|| KeelError::RecordNotFound {
                actor_id: actor_id.to_string(),
                role,
            })?;
        let snapshot = TrustSnapshot::of_record(&record, reason, Utc::now());
        self.storage.insert_snapshot(&snapshot)?;
        tracing::debug!(snapshot_id = %snapshot.id, "snapshot taken");
        Ok(snapshot)
    }

    /// Sweep every scored actor/role and cut automatic snapshots for those
    /// due one. Caller-driven (cron, maintenance task); returns the number
    /// of snapshots cut.
    pub fn snapshot_all_due(&self) -> KeelResult<usize> {
        self.scheduler.run(&self.storage, Utc::now())
    }
}
