//! The append+recalculate pipeline. One call, one SQLite transaction:
//! dedup probe, ledger append, full aggregate recomputation, transition
//! evaluation, version-checked score write. Commits or rolls back as a
//! unit before the writer lock is released.

use chrono::{DateTime, Duration, Utc};
use rusqlite::Connection;

use keel_aggregate::RollingAggregator;
use keel_core::constants::DEDUP_WINDOW_HOURS;
use keel_core::errors::{KeelError, KeelResult};
use keel_core::models::RecordOutcome;
use keel_core::{NewTrustEvent, TrustEvent, TrustScoreRecord};
use keel_storage::queries::{event_ops, score_ops};
use keel_storage::to_storage_err;
use keel_transition::TransitionEngine;

/// Run the record pipeline for one event inside a transaction on the write
/// connection. A version conflict surfaces as an error after rollback; the
/// engine's retry loop re-runs this function from fresh committed state.
pub fn record_in_tx(
    conn: &Connection,
    aggregator: &RollingAggregator,
    transitions: &TransitionEngine,
    request: &NewTrustEvent,
    now: DateTime<Utc>,
) -> KeelResult<RecordOutcome> {
    let tx = conn
        .unchecked_transaction()
        .map_err(|e| to_storage_err(format!("record_event begin: {e}")))?;

    match record_inner(&tx, aggregator, transitions, request, now) {
        Ok(outcome) => {
            tx.commit()
                .map_err(|e| to_storage_err(format!("record_event commit: {e}")))?;
            Ok(outcome)
        }
        Err(e) => {
            let _ = tx.rollback();
            Err(e)
        }
    }
}

/// Pipeline body, operating on the provided connection (or transaction via
/// Deref).
fn record_inner(
    conn: &Connection,
    aggregator: &RollingAggregator,
    transitions: &TransitionEngine,
    request: &NewTrustEvent,
    now: DateTime<Utc>,
) -> KeelResult<RecordOutcome> {
    // Dedup probe first: a replayed report inside the recency window returns
    // the original append and changes nothing.
    let digest = request.dedup_key.as_deref().map(|key| {
        TrustEvent::dedup_digest_for(&request.actor_id, request.role, request.event_type, key)
    });
    if let Some(digest) = &digest {
        let cutoff = now - Duration::hours(DEDUP_WINDOW_HOURS);
        if let Some(existing) = event_ops::find_recent_by_digest(conn, digest, cutoff)? {
            tracing::debug!(event_id = %existing.id, "dedup hit, replay absorbed");
            let record = score_ops::get_score(conn, &request.actor_id, request.role)?
                .ok_or_else(|| KeelError::RecordNotFound {
                    actor_id: request.actor_id.clone(),
                    role: request.role,
                })?;
            return Ok(RecordOutcome {
                event_id: existing.id,
                deduplicated: true,
                record,
            });
        }
    }

    let event = TrustEvent::new(
        request.actor_id.clone(),
        request.role,
        request.event_type,
        request.counterpart_id.clone(),
        request.occurred_at.unwrap_or(now),
        request.related_refs.clone(),
        digest,
        now,
    );
    event_ops::insert_event(conn, &event)?;

    // Full recomputation from the ledger. The aggregator is a pure function
    // of (history, now), so a retried transaction reproduces this exactly
    // from whatever state actually committed.
    let events = event_ops::list_events(conn, &request.actor_id, request.role)?;
    let aggregates = aggregator.aggregate(&events, now);

    let (mut record, expected) =
        match score_ops::get_score(conn, &request.actor_id, request.role)? {
            Some(record) => {
                let version = record.version;
                (record, Some(version))
            }
            None => (
                TrustScoreRecord::bootstrap(&request.actor_id, request.role, now),
                None,
            ),
        };

    let outcome = transitions.evaluate(&record, &event, &aggregates);
    record.trust_level = outcome.level;
    record.consecutive_completed_since_last_negative = outcome.consecutive_completed;
    record.last_negative_at = outcome.last_negative_at;
    record.aggregates = aggregates;
    record.updated_at = now;

    match expected {
        Some(expected) => {
            record.version = expected + 1;
            score_ops::update_score(conn, &record, expected)?;
        }
        None => score_ops::insert_score(conn, &record)?,
    }

    if outcome.changed() {
        tracing::info!(
            actor_id = %record.actor_id,
            role = %record.role,
            from = %outcome.previous_level,
            to = %outcome.level,
            "trust level changed"
        );
    }

    Ok(RecordOutcome {
        event_id: event.id,
        deduplicated: false,
        record,
    })
}
