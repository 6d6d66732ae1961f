//! PRAGMA configuration applied to every SQLite connection.
//!
//! WAL mode, NORMAL sync, configurable mmap/cache/busy_timeout,
//! foreign_keys ON, incremental auto_vacuum.

use rusqlite::Connection;

use keel_core::config::StorageConfig;
use keel_core::errors::KeelResult;

use crate::to_storage_err;

/// Apply all performance and safety pragmas to the write connection.
pub fn apply_write_pragmas(conn: &Connection, config: &StorageConfig) -> KeelResult<()> {
    conn.execute_batch(&format!(
        "
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        PRAGMA mmap_size = {};
        PRAGMA cache_size = {};
        PRAGMA busy_timeout = {};
        PRAGMA foreign_keys = ON;
        PRAGMA auto_vacuum = INCREMENTAL;
        ",
        config.mmap_size, config.cache_size, config.busy_timeout_ms
    ))
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Apply pragmas valid on a read-only connection. Journal mode is a property
/// of the database file and is set by the writer.
pub fn apply_read_pragmas(conn: &Connection, config: &StorageConfig) -> KeelResult<()> {
    conn.execute_batch(&format!(
        "
        PRAGMA mmap_size = {};
        PRAGMA cache_size = {};
        PRAGMA busy_timeout = {};
        ",
        config.mmap_size, config.cache_size, config.busy_timeout_ms
    ))
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Verify that WAL mode is active on a connection.
pub fn verify_wal_mode(conn: &Connection) -> KeelResult<bool> {
    let mode: String = conn
        .pragma_query_value(None, "journal_mode", |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(mode.eq_ignore_ascii_case("wal"))
}
