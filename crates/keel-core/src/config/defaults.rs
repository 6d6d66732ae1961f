//! Named default values for every configurable knob.

// Storage
pub const DEFAULT_DB_PATH: &str = "keel.db";
pub const DEFAULT_READ_POOL_SIZE: usize = 4;
pub const DEFAULT_MMAP_SIZE: i64 = 268_435_456;
pub const DEFAULT_CACHE_SIZE: i64 = -64_000;
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

// Snapshots
pub const DEFAULT_SNAPSHOT_INTERVAL_DAYS: u32 = 14;

// Requester-role policy. The numbers are product policy, not engineering
// constants; they ship as configuration so operators can tune them.
pub const REQUESTER_L1_WINDOW_DAYS: u32 = 90;
pub const REQUESTER_L1_MIN_EVENTS: u64 = 2;
pub const REQUESTER_L1_MIN_RATE: f64 = 0.15;
pub const REQUESTER_L2_WINDOW_DAYS: u32 = 180;
pub const REQUESTER_L2_MIN_EVENTS: u64 = 4;
pub const REQUESTER_L3_WINDOW_DAYS: u32 = 180;
pub const REQUESTER_L3_MIN_EVENTS: u64 = 5;
pub const REQUESTER_L3_MIN_COUNTERPARTS: u64 = 2;
pub const REQUESTER_RECOVERY_STREAK: u64 = 5;

// Fulfiller-role policy.
pub const FULFILLER_L1_WINDOW_DAYS: u32 = 90;
pub const FULFILLER_L1_MIN_EVENTS: u64 = 2;
pub const FULFILLER_L1_MIN_RATE: f64 = 0.10;
pub const FULFILLER_L2_WINDOW_DAYS: u32 = 90;
pub const FULFILLER_L2_MIN_RATE: f64 = 0.20;
pub const FULFILLER_L3_WINDOW_DAYS: u32 = 180;
pub const FULFILLER_L3_MIN_RATE: f64 = 0.20;
pub const FULFILLER_L3_MIN_COUNTERPARTS: u64 = 2;
pub const FULFILLER_RECOVERY_STREAK: u64 = 10;
