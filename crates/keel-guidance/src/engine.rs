use keel_core::config::PolicyConfig;
use keel_core::errors::KeelResult;
use keel_core::models::{
    ActionContext, EligibilityResult, GuidanceResult, KeyMetrics, RecoveryProgress,
};
use keel_core::{ITrustStorage, Role, TrustLevel, TrustScoreRecord};

use crate::{eligibility, status, tips};

/// Read-only façade over committed score records.
///
/// Both calls are a single indexed read with no suspension points and no
/// recomputation, cheap enough to sit on every job-post and job-accept
/// decision. The policy is only consulted for recovery-streak lengths; the
/// thresholds themselves never run here.
pub struct GuidanceEngine {
    policy: PolicyConfig,
}

impl GuidanceEngine {
    pub fn new(policy: PolicyConfig) -> Self {
        Self { policy }
    }

    /// Status, key metrics, tips, and recovery progress for one actor/role.
    /// An actor with no record gets the level-0 "no history" result.
    pub fn get_guidance(
        &self,
        storage: &dyn ITrustStorage,
        actor_id: &str,
        role: Role,
    ) -> KeelResult<GuidanceResult> {
        let record = storage.get_score(actor_id, role)?;
        tracing::debug!(actor_id, role = %role, found = record.is_some(), "guidance read");
        Ok(match record {
            Some(record) => self.guidance_of(&record),
            None => Self::no_history(actor_id, role),
        })
    }

    /// Yes/no gate for a job-post (requester) or job-accept (fulfiller)
    /// action. Unknown actors are level 0 and all clear.
    pub fn check_eligibility(
        &self,
        storage: &dyn ITrustStorage,
        actor_id: &str,
        role: Role,
        context: &ActionContext,
    ) -> KeelResult<EligibilityResult> {
        let level = storage
            .get_score(actor_id, role)?
            .map(|record| record.trust_level)
            .unwrap_or_default();
        let result = eligibility::decide(level, role, context);
        tracing::debug!(
            actor_id,
            role = %role,
            level = %level,
            eligible = result.eligible,
            "eligibility check"
        );
        Ok(result)
    }

    fn guidance_of(&self, record: &TrustScoreRecord) -> GuidanceResult {
        let required = self.policy.role(record.role).recovery_streak;
        let recovery_progress = if record.trust_level > TrustLevel::Good {
            let streak = record.consecutive_completed_since_last_negative;
            Some(RecoveryProgress {
                streak,
                required,
                remaining: required.saturating_sub(streak),
            })
        } else {
            None
        };

        GuidanceResult {
            actor_id: record.actor_id.clone(),
            role: record.role,
            level: record.trust_level,
            status_label: status::status_label(record.trust_level).to_string(),
            key_metrics: Self::key_metrics_of(record),
            improvement_tips: tips::generate(record, required),
            recovery_progress,
        }
    }

    fn key_metrics_of(record: &TrustScoreRecord) -> KeyMetrics {
        let m90 = &record.aggregates.last_90d;
        KeyMetrics {
            negative_events_90d: m90.negative_events,
            completed_events_90d: m90.completed_events,
            negative_rate_90d: m90.negative_rate,
            unique_counterparts_180d: record.aggregates.last_180d.unique_counterparts,
            lifetime_completed: record.aggregates.lifetime.completed_events,
            last_negative_at: record.last_negative_at,
        }
    }

    fn no_history(actor_id: &str, role: Role) -> GuidanceResult {
        GuidanceResult {
            actor_id: actor_id.to_string(),
            role,
            level: TrustLevel::Good,
            status_label: status::status_label(TrustLevel::Good).to_string(),
            key_metrics: KeyMetrics::default(),
            improvement_tips: Vec::new(),
            recovery_progress: None,
        }
    }
}
