//! The single write connection. All ledger appends and score updates are
//! serialized through it; WAL mode keeps readers unblocked meanwhile.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::Connection;

use keel_core::config::StorageConfig;
use keel_core::errors::KeelResult;

use super::pragmas::apply_write_pragmas;
use crate::to_storage_err;

/// Exclusive write connection guarded by a mutex.
pub struct WriteConnection {
    conn: Mutex<Connection>,
}

impl WriteConnection {
    /// Open the write connection for the given database file.
    pub fn open(path: &Path, config: &StorageConfig) -> KeelResult<Self> {
        let conn = Connection::open(path).map_err(|e| to_storage_err(e.to_string()))?;
        apply_write_pragmas(&conn, config)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory write connection (for testing).
    pub fn open_in_memory(config: &StorageConfig) -> KeelResult<Self> {
        let conn = Connection::open_in_memory().map_err(|e| to_storage_err(e.to_string()))?;
        apply_write_pragmas(&conn, config)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Execute a closure holding the write connection. Transactions opened
    /// inside the closure commit or roll back before the lock is released.
    pub fn with_conn<F, T>(&self, f: F) -> KeelResult<T>
    where
        F: FnOnce(&Connection) -> KeelResult<T>,
    {
        let guard = self
            .conn
            .lock()
            .map_err(|e| to_storage_err(format!("write connection lock poisoned: {e}")))?;
        f(&guard)
    }
}
