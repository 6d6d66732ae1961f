//! API surface models shared across the workspace: snapshots, guidance,
//! eligibility, and record outcomes.

mod eligibility;
mod guidance;
mod outcome;
mod snapshot;

pub use eligibility::{ActionContext, EligibilityResult, Urgency};
pub use guidance::{GuidanceResult, ImprovementTip, KeyMetrics, RecoveryProgress, TipSeverity};
pub use outcome::RecordOutcome;
pub use snapshot::TrustSnapshot;
