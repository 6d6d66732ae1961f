//! Score row operations. Every write is version-checked: `insert_score`
//! loses to a concurrent bootstrap of the same row, `update_score` loses to
//! a concurrent recalculation, and both losses surface as `VersionConflict`
//! for the engine's retry loop.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};

use keel_core::errors::{KeelError, KeelResult, StorageError};
use keel_core::event::Role;
use keel_core::score::{TrustAggregates, TrustLevel, TrustScoreRecord};

use super::OptionalRow;
use crate::to_storage_err;

/// The SELECT columns for all score queries (9 columns, indices 0-8).
const SCORE_COLUMNS: &str =
    "actor_id, role, trust_level, consecutive_completed, last_negative_at,
     aggregates, version, created_at, updated_at";

/// Insert a fresh score row. A primary-key collision means another writer
/// bootstrapped the same actor/role first and is reported as a conflict.
pub fn insert_score(conn: &Connection, record: &TrustScoreRecord) -> KeelResult<()> {
    let aggregates_json =
        serde_json::to_string(&record.aggregates).map_err(|e| to_storage_err(e.to_string()))?;

    let result = conn.execute(
        "INSERT INTO trust_scores (
            actor_id, role, trust_level, consecutive_completed, last_negative_at,
            aggregates, version, created_at, updated_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            record.actor_id,
            record.role.as_str(),
            record.trust_level.as_i64(),
            record.consecutive_completed_since_last_negative as i64,
            record.last_negative_at.map(|t| t.to_rfc3339()),
            aggregates_json,
            record.version,
            record.created_at.to_rfc3339(),
            record.updated_at.to_rfc3339(),
        ],
    );

    match result {
        Ok(_) => Ok(()),
        Err(rusqlite::Error::SqliteFailure(e, _))
            if e.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            Err(KeelError::StorageError(StorageError::VersionConflict {
                actor_id: record.actor_id.clone(),
                expected: 0,
            }))
        }
        Err(e) => Err(to_storage_err(e.to_string())),
    }
}

/// Apply an updated record, guarded by the version the writer read. The
/// record's own `version` is the new value; the row must still be at
/// `expected_version` for the write to land.
pub fn update_score(
    conn: &Connection,
    record: &TrustScoreRecord,
    expected_version: i64,
) -> KeelResult<()> {
    let aggregates_json =
        serde_json::to_string(&record.aggregates).map_err(|e| to_storage_err(e.to_string()))?;

    let rows = conn
        .execute(
            "UPDATE trust_scores SET
                trust_level = ?3, consecutive_completed = ?4, last_negative_at = ?5,
                aggregates = ?6, version = ?7, updated_at = ?8
             WHERE actor_id = ?1 AND role = ?2 AND version = ?9",
            params![
                record.actor_id,
                record.role.as_str(),
                record.trust_level.as_i64(),
                record.consecutive_completed_since_last_negative as i64,
                record.last_negative_at.map(|t| t.to_rfc3339()),
                aggregates_json,
                record.version,
                record.updated_at.to_rfc3339(),
                expected_version,
            ],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    if rows == 0 {
        return Err(KeelError::StorageError(StorageError::VersionConflict {
            actor_id: record.actor_id.clone(),
            expected: expected_version,
        }));
    }
    Ok(())
}

/// Get the score row for one actor/role.
pub fn get_score(
    conn: &Connection,
    actor_id: &str,
    role: Role,
) -> KeelResult<Option<TrustScoreRecord>> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {SCORE_COLUMNS} FROM trust_scores WHERE actor_id = ?1 AND role = ?2"
        ))
        .map_err(|e| to_storage_err(e.to_string()))?;

    let result = stmt
        .query_row(params![actor_id, role.as_str()], |row| {
            Ok(row_to_score_record(row))
        })
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;

    match result {
        Some(Ok(record)) => Ok(Some(record)),
        Some(Err(e)) => Err(e),
        None => Ok(None),
    }
}

/// Every (actor, role) that has a score row, for sweep-style maintenance.
pub fn list_score_keys(conn: &Connection) -> KeelResult<Vec<(String, Role)>> {
    let mut stmt = conn
        .prepare("SELECT actor_id, role FROM trust_scores ORDER BY actor_id, role")
        .map_err(|e| to_storage_err(e.to_string()))?;

    let rows = stmt
        .query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut results = Vec::new();
    for row in rows {
        let (actor_id, role_str) = row.map_err(|e| to_storage_err(e.to_string()))?;
        results.push((actor_id, Role::from_str(&role_str)?));
    }
    Ok(results)
}

/// Parse a row from the trust_scores table into a TrustScoreRecord.
pub(crate) fn row_to_score_record(row: &rusqlite::Row<'_>) -> KeelResult<TrustScoreRecord> {
    let role_str: String = row.get(1).map_err(|e| to_storage_err(e.to_string()))?;
    let level_raw: i64 = row.get(2).map_err(|e| to_storage_err(e.to_string()))?;
    let aggregates_json: String = row.get(5).map_err(|e| to_storage_err(e.to_string()))?;
    let last_negative_str: Option<String> =
        row.get(4).map_err(|e| to_storage_err(e.to_string()))?;
    let created_str: String = row.get(7).map_err(|e| to_storage_err(e.to_string()))?;
    let updated_str: String = row.get(8).map_err(|e| to_storage_err(e.to_string()))?;

    let trust_level = TrustLevel::from_i64(level_raw)
        .ok_or_else(|| to_storage_err(format!("trust_level {level_raw} out of range")))?;
    let aggregates: TrustAggregates = serde_json::from_str(&aggregates_json)
        .map_err(|e| to_storage_err(format!("parse aggregates: {e}")))?;

    let parse_dt = |s: &str| -> KeelResult<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| to_storage_err(format!("parse datetime '{s}': {e}")))
    };

    Ok(TrustScoreRecord {
        actor_id: row.get(0).map_err(|e| to_storage_err(e.to_string()))?,
        role: Role::from_str(&role_str)?,
        trust_level,
        consecutive_completed_since_last_negative: row
            .get::<_, i64>(3)
            .map_err(|e| to_storage_err(e.to_string()))? as u64,
        last_negative_at: last_negative_str.as_deref().map(parse_dt).transpose()?,
        aggregates,
        version: row.get(6).map_err(|e| to_storage_err(e.to_string()))?,
        created_at: parse_dt(&created_str)?,
        updated_at: parse_dt(&updated_str)?,
    })
}
