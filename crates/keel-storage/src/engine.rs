//! StorageEngine owns the ConnectionPool, runs migrations at startup, and
//! implements the read/audit trait. Writes that need transaction scope (the
//! record pipeline) go through `pool().writer` directly.

use std::path::Path;

use chrono::{DateTime, Utc};

use keel_core::config::StorageConfig;
use keel_core::errors::KeelResult;
use keel_core::event::{Role, TrustEvent};
use keel_core::models::TrustSnapshot;
use keel_core::score::TrustScoreRecord;
use keel_core::traits::ITrustStorage;

use crate::migrations;
use crate::pool::ConnectionPool;

/// The main storage engine. Owns the connection pool and provides the
/// ITrustStorage read surface.
pub struct StorageEngine {
    pool: ConnectionPool,
    /// When true, use the read pool for read operations (file-backed mode).
    /// When false, route all reads through the writer (in-memory mode,
    /// because in-memory read pool connections are isolated databases).
    use_read_pool: bool,
}

impl StorageEngine {
    /// Open a storage engine backed by a file on disk, with default settings.
    pub fn open(path: &Path) -> KeelResult<Self> {
        Self::open_with_config(path, &StorageConfig::default())
    }

    /// Open a storage engine backed by a file on disk.
    pub fn open_with_config(path: &Path, config: &StorageConfig) -> KeelResult<Self> {
        let pool = ConnectionPool::open(path, config)?;
        let engine = Self {
            pool,
            use_read_pool: true,
        };
        engine.initialize()?;
        Ok(engine)
    }

    /// Open an in-memory storage engine (for testing).
    /// Routes all reads through the writer since in-memory read pool
    /// connections are isolated databases that can't see writer's changes.
    pub fn open_in_memory() -> KeelResult<Self> {
        let config = StorageConfig {
            read_pool_size: 1,
            ..StorageConfig::default()
        };
        let pool = ConnectionPool::open_in_memory(&config)?;
        let engine = Self {
            pool,
            use_read_pool: false,
        };
        engine.initialize()?;
        Ok(engine)
    }

    /// Run migrations on the write connection.
    fn initialize(&self) -> KeelResult<()> {
        self.pool.writer.with_conn(|conn| {
            migrations::run_migrations(conn)?;
            Ok(())
        })
    }

    /// Get a reference to the connection pool (for transactional pipelines).
    pub fn pool(&self) -> &ConnectionPool {
        &self.pool
    }

    /// Execute a read-only query on the best available connection.
    /// File-backed: uses the read pool (no writer contention).
    /// In-memory: uses the writer (read pool is isolated).
    pub fn with_reader<F, T>(&self, f: F) -> KeelResult<T>
    where
        F: FnOnce(&rusqlite::Connection) -> KeelResult<T>,
    {
        if self.use_read_pool {
            self.pool.readers.with_conn(f)
        } else {
            self.pool.writer.with_conn(f)
        }
    }
}

impl ITrustStorage for StorageEngine {
    fn get_event(&self, event_id: &str) -> KeelResult<Option<TrustEvent>> {
        self.with_reader(|conn| crate::queries::event_ops::get_event(conn, event_id))
    }

    fn list_events(&self, actor_id: &str, role: Role) -> KeelResult<Vec<TrustEvent>> {
        self.with_reader(|conn| crate::queries::event_ops::list_events(conn, actor_id, role))
    }

    fn event_count_since(
        &self,
        actor_id: &str,
        role: Role,
        recorded_after: DateTime<Utc>,
    ) -> KeelResult<u64> {
        self.with_reader(|conn| {
            crate::queries::event_ops::event_count_since(conn, actor_id, role, recorded_after)
        })
    }

    fn get_score(&self, actor_id: &str, role: Role) -> KeelResult<Option<TrustScoreRecord>> {
        self.with_reader(|conn| crate::queries::score_ops::get_score(conn, actor_id, role))
    }

    fn list_score_keys(&self) -> KeelResult<Vec<(String, Role)>> {
        self.with_reader(crate::queries::score_ops::list_score_keys)
    }

    fn insert_snapshot(&self, snapshot: &TrustSnapshot) -> KeelResult<()> {
        self.pool
            .writer
            .with_conn(|conn| crate::queries::snapshot_ops::insert_snapshot(conn, snapshot))
    }

    fn snapshots_in_range(
        &self,
        actor_id: &str,
        role: Role,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> KeelResult<Vec<TrustSnapshot>> {
        self.with_reader(|conn| {
            crate::queries::snapshot_ops::snapshots_in_range(conn, actor_id, role, from, to)
        })
    }

    fn latest_snapshot(&self, actor_id: &str, role: Role) -> KeelResult<Option<TrustSnapshot>> {
        self.with_reader(|conn| crate::queries::snapshot_ops::latest_snapshot(conn, actor_id, role))
    }
}
