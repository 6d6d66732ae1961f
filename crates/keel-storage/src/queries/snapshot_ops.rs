//! Snapshot operations: insert and time-range reads. Insert-only by design.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};

use keel_core::errors::KeelResult;
use keel_core::event::Role;
use keel_core::models::TrustSnapshot;
use keel_core::score::{TrustAggregates, TrustLevel};

use super::OptionalRow;
use crate::to_storage_err;

/// The SELECT columns for all snapshot queries (8 columns, indices 0-7).
const SNAPSHOT_COLUMNS: &str =
    "id, actor_id, role, trust_level, consecutive_completed, aggregates,
     reason, created_at";

/// Insert one snapshot row.
pub fn insert_snapshot(conn: &Connection, snapshot: &TrustSnapshot) -> KeelResult<()> {
    let aggregates_json =
        serde_json::to_string(&snapshot.aggregates).map_err(|e| to_storage_err(e.to_string()))?;

    conn.execute(
        "INSERT INTO trust_snapshots (
            id, actor_id, role, trust_level, consecutive_completed,
            aggregates, reason, created_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            snapshot.id,
            snapshot.actor_id,
            snapshot.role.as_str(),
            snapshot.trust_level.as_i64(),
            snapshot.consecutive_completed_since_last_negative as i64,
            aggregates_json,
            snapshot.reason,
            snapshot.created_at.to_rfc3339(),
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Snapshots for one actor/role inside [from, to], oldest first.
pub fn snapshots_in_range(
    conn: &Connection,
    actor_id: &str,
    role: Role,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> KeelResult<Vec<TrustSnapshot>> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {SNAPSHOT_COLUMNS} FROM trust_snapshots
             WHERE actor_id = ?1 AND role = ?2 AND created_at >= ?3 AND created_at <= ?4
             ORDER BY created_at ASC"
        ))
        .map_err(|e| to_storage_err(e.to_string()))?;

    let rows = stmt
        .query_map(
            params![
                actor_id,
                role.as_str(),
                from.to_rfc3339(),
                to.to_rfc3339()
            ],
            |row| Ok(row_to_snapshot(row)),
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut results = Vec::new();
    for row in rows {
        let snapshot = row.map_err(|e| to_storage_err(e.to_string()))??;
        results.push(snapshot);
    }
    Ok(results)
}

/// Most recent snapshot for one actor/role, if any.
pub fn latest_snapshot(
    conn: &Connection,
    actor_id: &str,
    role: Role,
) -> KeelResult<Option<TrustSnapshot>> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {SNAPSHOT_COLUMNS} FROM trust_snapshots
             WHERE actor_id = ?1 AND role = ?2
             ORDER BY created_at DESC
             LIMIT 1"
        ))
        .map_err(|e| to_storage_err(e.to_string()))?;

    let result = stmt
        .query_row(params![actor_id, role.as_str()], |row| {
            Ok(row_to_snapshot(row))
        })
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;

    match result {
        Some(Ok(snapshot)) => Ok(Some(snapshot)),
        Some(Err(e)) => Err(e),
        None => Ok(None),
    }
}

/// Parse a row from the trust_snapshots table into a TrustSnapshot.
pub(crate) fn row_to_snapshot(row: &rusqlite::Row<'_>) -> KeelResult<TrustSnapshot> {
    let role_str: String = row.get(2).map_err(|e| to_storage_err(e.to_string()))?;
    let level_raw: i64 = row.get(3).map_err(|e| to_storage_err(e.to_string()))?;
    let aggregates_json: String = row.get(5).map_err(|e| to_storage_err(e.to_string()))?;
    let created_str: String = row.get(7).map_err(|e| to_storage_err(e.to_string()))?;

    let trust_level = TrustLevel::from_i64(level_raw)
        .ok_or_else(|| to_storage_err(format!("trust_level {level_raw} out of range")))?;
    let aggregates: TrustAggregates = serde_json::from_str(&aggregates_json)
        .map_err(|e| to_storage_err(format!("parse aggregates: {e}")))?;

    let created_at = DateTime::parse_from_rfc3339(&created_str)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| to_storage_err(format!("parse datetime '{created_str}': {e}")))?;

    Ok(TrustSnapshot {
        id: row.get(0).map_err(|e| to_storage_err(e.to_string()))?,
        actor_id: row.get(1).map_err(|e| to_storage_err(e.to_string()))?,
        role: Role::from_str(&role_str)?,
        trust_level,
        consecutive_completed_since_last_negative: row
            .get::<_, i64>(4)
            .map_err(|e| to_storage_err(e.to_string()))? as u64,
        aggregates,
        reason: row.get(6).map_err(|e| to_storage_err(e.to_string()))?,
        created_at,
    })
}
