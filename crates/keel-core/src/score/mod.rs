//! Score model: trust level, windowed aggregates, and the per-actor record.

mod aggregates;
mod level;
mod record;

pub use aggregates::{TrustAggregates, Window, WindowMetrics};
pub use level::TrustLevel;
pub use record::TrustScoreRecord;
