use serde::{Deserialize, Serialize};

use super::defaults;

/// SQLite layer configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Database file path.
    pub db_path: String,
    /// Number of read-only connections (clamped to 1–8 by the pool).
    pub read_pool_size: usize,
    /// Memory-map size in bytes.
    pub mmap_size: i64,
    /// SQLite cache_size pragma value (negative = KiB).
    pub cache_size: i64,
    /// busy_timeout pragma (milliseconds).
    pub busy_timeout_ms: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: defaults::DEFAULT_DB_PATH.to_string(),
            read_pool_size: defaults::DEFAULT_READ_POOL_SIZE,
            mmap_size: defaults::DEFAULT_MMAP_SIZE,
            cache_size: defaults::DEFAULT_CACHE_SIZE,
            busy_timeout_ms: defaults::DEFAULT_BUSY_TIMEOUT_MS,
        }
    }
}
