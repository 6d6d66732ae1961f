//! v001: The append-only trust event ledger.

use rusqlite::Connection;

use keel_core::errors::KeelResult;

use crate::to_storage_err;

/// Run the v001 migration: create the trust_events table and its indexes.
pub fn migrate(conn: &Connection) -> KeelResult<()> {
    tracing::info!("v001: creating trust event ledger");

    conn.execute_batch(
        "
        -- Append-only ledger. Rows are inserted by record_event and never
        -- updated or deleted; expired rows drop out of windowed aggregates
        -- but stay on disk for audit.
        CREATE TABLE IF NOT EXISTS trust_events (
            id             TEXT PRIMARY KEY,
            actor_id       TEXT NOT NULL,
            role           TEXT NOT NULL,
            event_type     TEXT NOT NULL,
            category       TEXT NOT NULL,
            counterpart_id TEXT,
            occurred_at    TEXT NOT NULL,
            expires_at     TEXT,
            related_refs   TEXT NOT NULL,
            dedup_digest   TEXT,
            recorded_at    TEXT NOT NULL
        );

        -- Windowed aggregation scans one actor/role ordered by occurrence.
        CREATE INDEX IF NOT EXISTS idx_trust_events_actor
            ON trust_events(actor_id, role, occurred_at);

        -- Dedup probe: same digest within the trailing dedup window.
        CREATE INDEX IF NOT EXISTS idx_trust_events_dedup
            ON trust_events(dedup_digest, recorded_at);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;

    tracing::info!("v001: trust event ledger created");
    Ok(())
}
