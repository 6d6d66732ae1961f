//! Schema migrations, applied in order at engine startup.
//!
//! Applied versions are recorded in `schema_migrations`; re-running the
//! engine against an existing database is a no-op for versions already
//! applied.

mod v001_trust_events;
mod v002_trust_scores;
mod v003_trust_snapshots;

use rusqlite::{params, Connection};

use keel_core::errors::{KeelResult, StorageError};

use crate::to_storage_err;

type Migration = fn(&Connection) -> KeelResult<()>;

const MIGRATIONS: &[(u32, Migration)] = &[
    (1, v001_trust_events::migrate),
    (2, v002_trust_scores::migrate),
    (3, v003_trust_snapshots::migrate),
];

/// Run all pending migrations on the given connection.
pub fn run_migrations(conn: &Connection) -> KeelResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version    INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL
        )",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;

    for (version, migrate) in MIGRATIONS {
        if is_applied(conn, *version)? {
            continue;
        }
        migrate(conn).map_err(|e| {
            StorageError::MigrationFailed {
                version: *version,
                reason: e.to_string(),
            }
        })?;
        mark_applied(conn, *version)?;
    }
    Ok(())
}

/// Highest applied migration version, 0 for a fresh database.
pub fn current_version(conn: &Connection) -> KeelResult<u32> {
    let version: Option<u32> = conn
        .query_row(
            "SELECT MAX(version) FROM schema_migrations",
            [],
            |row| row.get(0),
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(version.unwrap_or(0))
}

fn is_applied(conn: &Connection, version: u32) -> KeelResult<bool> {
    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM schema_migrations WHERE version = ?1",
            params![version],
            |row| row.get(0),
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(count > 0)
}

fn mark_applied(conn: &Connection, version: u32) -> KeelResult<()> {
    conn.execute(
        "INSERT INTO schema_migrations (version, applied_at) VALUES (?1, ?2)",
        params![version, chrono::Utc::now().to_rfc3339()],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
