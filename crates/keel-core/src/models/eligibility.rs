use serde::{Deserialize, Serialize};

/// Urgency of the action being gated. High-urgency job acceptance is the one
/// action a level-3 fulfiller is refused outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Normal,
    High,
}

impl Default for Urgency {
    fn default() -> Self {
        Urgency::Normal
    }
}

/// Context for an eligibility check: what the actor is about to do.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionContext {
    pub urgency: Urgency,
}

impl ActionContext {
    pub fn urgent() -> Self {
        Self {
            urgency: Urgency::High,
        }
    }
}

/// Yes/no decision for a job-post or job-accept action, plus the
/// requirements the calling workflow must enforce before proceeding.
///
/// Fails closed only for the named restricted action; everything else stays
/// eligible. The engine never issues a blanket block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EligibilityResult {
    pub eligible: bool,
    /// Requester-only: a no-show fee must be configured before the booking
    /// subsystem accepts the post.
    pub requires_fee: bool,
    /// The actor must explicitly confirm before the action proceeds.
    pub requires_confirmation: bool,
    /// Urgent variants of this action are limited for the actor.
    pub limits_urgent_actions: bool,
    pub warnings: Vec<String>,
}

impl EligibilityResult {
    /// Unrestricted result for actors in good standing.
    pub fn all_clear() -> Self {
        Self {
            eligible: true,
            ..Self::default()
        }
    }
}
