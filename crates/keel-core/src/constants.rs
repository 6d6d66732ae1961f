/// Keel system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Days a negative event stays live before it stops counting toward windows.
pub const NEGATIVE_EXPIRY_DAYS: i64 = 180;

/// Days a neutral event stays live before it stops counting toward windows.
pub const NEUTRAL_EXPIRY_DAYS: i64 = 90;

/// Recency window for dedup-key matching on append (hours).
pub const DEDUP_WINDOW_HOURS: i64 = 24;

/// Maximum append+recalculate attempts before surfacing a conflict.
pub const MAX_RECALC_ATTEMPTS: u32 = 3;

/// Minimum qualifying negative events a window must hold before any
/// promotion can fire. Hard floor, independent of policy configuration:
/// a single incident never moves an actor away from level 0.
pub const PROMOTION_MIN_QUALIFYING: u64 = 2;
