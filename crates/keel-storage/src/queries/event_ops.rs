//! Ledger operations: append, point lookup, per-actor history, dedup probe.
//! There is no update or delete here; the ledger is append-only.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};

use keel_core::errors::KeelResult;
use keel_core::event::{EventCategory, EventType, Role, TrustEvent};

use super::OptionalRow;
use crate::to_storage_err;

/// The SELECT columns for all event queries (11 columns, indices 0-10).
const EVENT_COLUMNS: &str =
    "id, actor_id, role, event_type, category, counterpart_id,
     occurred_at, expires_at, related_refs, dedup_digest, recorded_at";

/// Append one event to the ledger.
pub fn insert_event(conn: &Connection, event: &TrustEvent) -> KeelResult<()> {
    let refs_json =
        serde_json::to_string(&event.related_refs).map_err(|e| to_storage_err(e.to_string()))?;

    conn.execute(
        "INSERT INTO trust_events (
            id, actor_id, role, event_type, category, counterpart_id,
            occurred_at, expires_at, related_refs, dedup_digest, recorded_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        params![
            event.id,
            event.actor_id,
            event.role.as_str(),
            event.event_type.as_str(),
            event.category.as_str(),
            event.counterpart_id,
            event.occurred_at.to_rfc3339(),
            event.expires_at.map(|t| t.to_rfc3339()),
            refs_json,
            event.dedup_digest,
            event.recorded_at.to_rfc3339(),
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Get a single event by id.
pub fn get_event(conn: &Connection, event_id: &str) -> KeelResult<Option<TrustEvent>> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {EVENT_COLUMNS} FROM trust_events WHERE id = ?1"
        ))
        .map_err(|e| to_storage_err(e.to_string()))?;

    let result = stmt
        .query_row(params![event_id], |row| Ok(row_to_trust_event(row)))
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;

    match result {
        Some(Ok(event)) => Ok(Some(event)),
        Some(Err(e)) => Err(e),
        None => Ok(None),
    }
}

/// Full history for one actor/role, oldest occurrence first. Ties on
/// occurrence break by insertion time so replays are deterministic.
pub fn list_events(conn: &Connection, actor_id: &str, role: Role) -> KeelResult<Vec<TrustEvent>> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {EVENT_COLUMNS} FROM trust_events
             WHERE actor_id = ?1 AND role = ?2
             ORDER BY occurred_at ASC, recorded_at ASC"
        ))
        .map_err(|e| to_storage_err(e.to_string()))?;

    let rows = stmt
        .query_map(params![actor_id, role.as_str()], |row| {
            Ok(row_to_trust_event(row))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut results = Vec::new();
    for row in rows {
        let event = row.map_err(|e| to_storage_err(e.to_string()))??;
        results.push(event);
    }
    Ok(results)
}

/// Find the most recent ledger entry carrying the given dedup digest,
/// restricted to entries recorded after `recorded_after`.
pub fn find_recent_by_digest(
    conn: &Connection,
    digest: &str,
    recorded_after: DateTime<Utc>,
) -> KeelResult<Option<TrustEvent>> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {EVENT_COLUMNS} FROM trust_events
             WHERE dedup_digest = ?1 AND recorded_at > ?2
             ORDER BY recorded_at DESC
             LIMIT 1"
        ))
        .map_err(|e| to_storage_err(e.to_string()))?;

    let result = stmt
        .query_row(params![digest, recorded_after.to_rfc3339()], |row| {
            Ok(row_to_trust_event(row))
        })
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;

    match result {
        Some(Ok(event)) => Ok(Some(event)),
        Some(Err(e)) => Err(e),
        None => Ok(None),
    }
}

/// Count events recorded for an actor/role after the given instant. Used by
/// the snapshot scheduler to skip actors with no fresh activity.
pub fn event_count_since(
    conn: &Connection,
    actor_id: &str,
    role: Role,
    recorded_after: DateTime<Utc>,
) -> KeelResult<u64> {
    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM trust_events
             WHERE actor_id = ?1 AND role = ?2 AND recorded_at > ?3",
            params![actor_id, role.as_str(), recorded_after.to_rfc3339()],
            |row| row.get(0),
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(count as u64)
}

/// Parse a row from the trust_events table into a TrustEvent.
pub(crate) fn row_to_trust_event(row: &rusqlite::Row<'_>) -> KeelResult<TrustEvent> {
    let role_str: String = row.get(2).map_err(|e| to_storage_err(e.to_string()))?;
    let type_str: String = row.get(3).map_err(|e| to_storage_err(e.to_string()))?;
    let category_str: String = row.get(4).map_err(|e| to_storage_err(e.to_string()))?;
    let refs_json: String = row.get(8).map_err(|e| to_storage_err(e.to_string()))?;
    let occurred_str: String = row.get(6).map_err(|e| to_storage_err(e.to_string()))?;
    let expires_str: Option<String> = row.get(7).map_err(|e| to_storage_err(e.to_string()))?;
    let recorded_str: String = row.get(10).map_err(|e| to_storage_err(e.to_string()))?;

    let related_refs: Vec<String> = serde_json::from_str(&refs_json)
        .map_err(|e| to_storage_err(format!("parse related_refs: {e}")))?;

    let parse_dt = |s: &str| -> KeelResult<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| to_storage_err(format!("parse datetime '{s}': {e}")))
    };

    Ok(TrustEvent {
        id: row.get(0).map_err(|e| to_storage_err(e.to_string()))?,
        actor_id: row.get(1).map_err(|e| to_storage_err(e.to_string()))?,
        role: Role::from_str(&role_str)?,
        event_type: EventType::from_str(&type_str)?,
        category: EventCategory::from_str(&category_str)?,
        counterpart_id: row.get(5).map_err(|e| to_storage_err(e.to_string()))?,
        occurred_at: parse_dt(&occurred_str)?,
        expires_at: expires_str.as_deref().map(parse_dt).transpose()?,
        related_refs,
        dedup_digest: row.get(9).map_err(|e| to_storage_err(e.to_string()))?,
        recorded_at: parse_dt(&recorded_str)?,
    })
}
