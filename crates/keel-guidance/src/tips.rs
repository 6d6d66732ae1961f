//! Actionable improvement tips derived from the persisted aggregates.
//!
//! Examples: "3 negative events in the last 90 days", "2 more consecutive
//! completions lower the trust level one step".

use keel_core::models::{ImprovementTip, TipSeverity};
use keel_core::{TrustLevel, TrustScoreRecord};

/// Generate tips from the committed record. Reads the persisted aggregates
/// only; a clean level-0 record produces no tips.
pub fn generate(record: &TrustScoreRecord, required_streak: u64) -> Vec<ImprovementTip> {
    let mut tips = Vec::new();
    let m90 = &record.aggregates.last_90d;
    let m180 = &record.aggregates.last_180d;

    if m90.negative_events > 0 {
        let severity = if m90.negative_events >= 3 {
            TipSeverity::Warning
        } else {
            TipSeverity::Info
        };
        tips.push(ImprovementTip {
            severity,
            message: format!(
                "{} negative events in the last 90 days",
                m90.negative_events
            ),
            action: "complete the next bookings without incident".into(),
        });
    }

    if m90.negative_events >= 2 && m90.negative_rate >= 0.15 {
        tips.push(ImprovementTip {
            severity: TipSeverity::Warning,
            message: format!(
                "negative rate is {:.0}% over the last 90 days",
                m90.negative_rate * 100.0
            ),
            action: "a run of clean completions brings the rate down".into(),
        });
    }

    if m180.unique_counterparts >= 2 {
        tips.push(ImprovementTip {
            severity: TipSeverity::Critical,
            message: format!(
                "incidents involve {} different counterparts",
                m180.unique_counterparts
            ),
            action: "review how bookings are planned and confirmed".into(),
        });
    }

    if record.trust_level > TrustLevel::Good {
        let streak = record.consecutive_completed_since_last_negative;
        let remaining = required_streak.saturating_sub(streak);
        tips.push(ImprovementTip {
            severity: TipSeverity::Info,
            message: format!(
                "{remaining} more consecutive completions lower the trust level one step"
            ),
            action: "keep the completion streak unbroken".into(),
        });
    }

    tips
}
