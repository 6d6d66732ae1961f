//! The per-level decision table gating job-post and job-accept actions.

use keel_core::models::{ActionContext, EligibilityResult, Urgency};
use keel_core::{Role, TrustLevel};

/// Decide eligibility for an action. Pure function of (level, role, context):
///
/// | level | requester (posting)        | fulfiller (accepting)                |
/// |-------|----------------------------|--------------------------------------|
/// | 0     | all clear                  | all clear                            |
/// | 1     | confirmation               | confirmation                         |
/// | 2     | fee + confirmation         | confirmation, urgent work limited    |
/// | 3     | fee + confirmation + limit | confirmation + limit; high-urgency refused |
///
/// The high-urgency refusal for a level-3 fulfiller is the only `eligible =
/// false` this table produces; every other combination stays eligible with
/// requirements attached.
pub fn decide(level: TrustLevel, role: Role, context: &ActionContext) -> EligibilityResult {
    match (level, role) {
        (TrustLevel::Good, _) => EligibilityResult::all_clear(),

        (TrustLevel::Advisory, _) => EligibilityResult {
            eligible: true,
            requires_confirmation: true,
            warnings: vec!["recent reliability issues are on record".into()],
            ..EligibilityResult::default()
        },

        (TrustLevel::Risk, Role::Requester) => EligibilityResult {
            eligible: true,
            requires_fee: true,
            requires_confirmation: true,
            warnings: vec!["a no-show fee must be configured before this post is accepted".into()],
            ..EligibilityResult::default()
        },

        (TrustLevel::Risk, Role::Fulfiller) => EligibilityResult {
            eligible: true,
            requires_confirmation: true,
            limits_urgent_actions: true,
            warnings: vec!["urgent bookings are limited at the current trust level".into()],
            ..EligibilityResult::default()
        },

        (TrustLevel::HighRisk, Role::Requester) => EligibilityResult {
            eligible: true,
            requires_fee: true,
            requires_confirmation: true,
            limits_urgent_actions: true,
            warnings: vec![
                "a no-show fee must be configured before this post is accepted".into(),
                "urgent posts are limited at the current trust level".into(),
            ],
        },

        (TrustLevel::HighRisk, Role::Fulfiller) => {
            let refused = context.urgency == Urgency::High;
            EligibilityResult {
                eligible: !refused,
                requires_fee: false,
                requires_confirmation: true,
                limits_urgent_actions: true,
                warnings: if refused {
                    vec!["high-urgency jobs cannot be accepted at the current trust level".into()]
                } else {
                    vec!["urgent bookings are limited at the current trust level".into()]
                },
            }
        }
    }
}
