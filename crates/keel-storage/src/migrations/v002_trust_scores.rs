//! v002: Per-actor/role score rows with the optimistic version token.

use rusqlite::Connection;

use keel_core::errors::KeelResult;

use crate::to_storage_err;

/// Run the v002 migration: create the trust_scores table.
pub fn migrate(conn: &Connection) -> KeelResult<()> {
    tracing::info!("v002: creating trust score table");

    conn.execute_batch(
        "
        -- One row per (actor, role). `version` increments on every applied
        -- update; writers supply the version they read and lose the race if
        -- the row moved underneath them.
        CREATE TABLE IF NOT EXISTS trust_scores (
            actor_id              TEXT NOT NULL,
            role                  TEXT NOT NULL,
            trust_level           INTEGER NOT NULL DEFAULT 0,
            consecutive_completed INTEGER NOT NULL DEFAULT 0,
            last_negative_at      TEXT,
            aggregates            TEXT NOT NULL,
            version               INTEGER NOT NULL DEFAULT 1,
            created_at            TEXT NOT NULL,
            updated_at            TEXT NOT NULL,
            PRIMARY KEY (actor_id, role)
        );

        CREATE INDEX IF NOT EXISTS idx_trust_scores_level
            ON trust_scores(trust_level);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;

    tracing::info!("v002: trust score table created");
    Ok(())
}
