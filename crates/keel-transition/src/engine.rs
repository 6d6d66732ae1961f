use keel_core::config::PolicyConfig;
use keel_core::constants::PROMOTION_MIN_QUALIFYING;
use keel_core::{EventCategory, TrustAggregates, TrustEvent, TrustLevel, TrustScoreRecord, Window};

use crate::bands;
use crate::outcome::{LevelChange, TransitionOutcome};

/// Applies the transition policy to one recalculated actor/role record.
///
/// Stateless apart from the policy: every evaluation is a pure function of
/// `(record, event, aggregates)`, which is what makes the append+recalculate
/// retry loop safe to re-run from fresh state.
#[derive(Debug, Clone)]
pub struct TransitionEngine {
    policy: PolicyConfig,
}

impl TransitionEngine {
    pub fn new(policy: PolicyConfig) -> Self {
        Self { policy }
    }

    /// Evaluate one recorded event against the record it was appended to.
    ///
    /// Order is fixed: the event's category effect on the streak first, then
    /// promotion, then recovery. At most one level step is applied, and any
    /// applied step resets the streak, so a second step in either direction
    /// needs its own triggering events.
    pub fn evaluate(
        &self,
        record: &TrustScoreRecord,
        event: &TrustEvent,
        aggregates: &TrustAggregates,
    ) -> TransitionOutcome {
        let mut streak = record.consecutive_completed_since_last_negative;
        let mut last_negative_at = record.last_negative_at;
        match event.category {
            EventCategory::Negative => {
                streak = 0;
                last_negative_at = Some(event.occurred_at);
            }
            EventCategory::Positive => streak += 1,
            EventCategory::Neutral => {}
        }

        let previous_level = record.trust_level;
        let role_policy = self.policy.role(record.role);

        let (level, change) = if let Some(target) = self.promotion_target(record, event, aggregates)
        {
            (target, LevelChange::Promoted)
        } else if previous_level > TrustLevel::Good && streak >= role_policy.recovery_streak {
            (previous_level.demote(), LevelChange::Demoted)
        } else {
            (previous_level, LevelChange::Unchanged)
        };

        if change != LevelChange::Unchanged {
            streak = 0;
        }

        TransitionOutcome {
            previous_level,
            level,
            change,
            consecutive_completed: streak,
            last_negative_at,
        }
    }

    /// The next level up, when the fresh aggregates reach its band.
    ///
    /// Only a negative event can move the band inputs upward (counts, rate,
    /// and counterpart diversity all grow on negatives alone), so a band is
    /// crossed exactly when a negative event lands. Gating on the category
    /// keeps a recovered level from being re-promoted by the clean events
    /// that earned the recovery.
    fn promotion_target(
        &self,
        record: &TrustScoreRecord,
        event: &TrustEvent,
        aggregates: &TrustAggregates,
    ) -> Option<TrustLevel> {
        if event.category != EventCategory::Negative {
            return None;
        }
        let target = record.trust_level.next_up()?;
        let band = self.policy.role(record.role).band_for(target)?;
        let window = Window::from_days(band.window_days)?;
        let metrics = aggregates.window(window);
        // Hard floor: one incident alone never promotes, whatever the policy.
        if metrics.negative_events < PROMOTION_MIN_QUALIFYING {
            return None;
        }
        if bands::band_reached(band, metrics) {
            Some(target)
        } else {
            None
        }
    }
}
