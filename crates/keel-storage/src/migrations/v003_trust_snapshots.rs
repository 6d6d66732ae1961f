//! v003: Insert-only snapshot audit table.

use rusqlite::Connection;

use keel_core::errors::KeelResult;

use crate::to_storage_err;

/// Run the v003 migration: create the trust_snapshots table.
pub fn migrate(conn: &Connection) -> KeelResult<()> {
    tracing::info!("v003: creating trust snapshot table");

    conn.execute_batch(
        "
        -- Periodic frozen copies of score rows, plus support annotations.
        -- Insert-only; never read back into live scoring.
        CREATE TABLE IF NOT EXISTS trust_snapshots (
            id                    TEXT PRIMARY KEY,
            actor_id              TEXT NOT NULL,
            role                  TEXT NOT NULL,
            trust_level           INTEGER NOT NULL,
            consecutive_completed INTEGER NOT NULL,
            aggregates            TEXT NOT NULL,
            reason                TEXT NOT NULL,
            created_at            TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_trust_snapshots_actor
            ON trust_snapshots(actor_id, role, created_at);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;

    tracing::info!("v003: trust snapshot table created");
    Ok(())
}
