//! Snapshot table behavior: insert-only rows, range reads, latest lookup.

use chrono::{Duration, Utc};
use keel_core::event::Role;
use keel_core::models::TrustSnapshot;
use keel_core::score::{TrustLevel, TrustScoreRecord};
use keel_core::traits::ITrustStorage;
use keel_storage::StorageEngine;

fn snapshot_at(actor: &str, role: Role, days_ago: i64, reason: &str) -> TrustSnapshot {
    let now = Utc::now();
    let mut record = TrustScoreRecord::bootstrap(actor, role, now);
    record.trust_level = TrustLevel::Advisory;
    TrustSnapshot::of_record(&record, reason, now - Duration::days(days_ago))
}

#[test]
fn snapshot_roundtrips_through_engine() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let snapshot = snapshot_at("actor-1", Role::Requester, 0, "auto-2026-08-24");

    engine.insert_snapshot(&snapshot).unwrap();

    let latest = engine
        .latest_snapshot("actor-1", Role::Requester)
        .unwrap()
        .unwrap();
    assert_eq!(latest, snapshot);
}

#[test]
fn latest_snapshot_picks_newest() {
    let engine = StorageEngine::open_in_memory().unwrap();
    for days_ago in [30, 2, 16] {
        engine
            .insert_snapshot(&snapshot_at(
                "actor-1",
                Role::Fulfiller,
                days_ago,
                &format!("auto-{days_ago}"),
            ))
            .unwrap();
    }

    let latest = engine
        .latest_snapshot("actor-1", Role::Fulfiller)
        .unwrap()
        .unwrap();
    assert_eq!(latest.reason, "auto-2");
}

#[test]
fn range_read_is_inclusive_and_ordered() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let now = Utc::now();
    for days_ago in [40, 20, 10, 1] {
        engine
            .insert_snapshot(&snapshot_at(
                "actor-1",
                Role::Requester,
                days_ago,
                &format!("auto-{days_ago}"),
            ))
            .unwrap();
    }

    let in_range = engine
        .snapshots_in_range(
            "actor-1",
            Role::Requester,
            now - Duration::days(21),
            now - Duration::days(5),
        )
        .unwrap();
    let reasons: Vec<&str> = in_range.iter().map(|s| s.reason.as_str()).collect();
    assert_eq!(reasons, vec!["auto-20", "auto-10"]);
}

#[test]
fn snapshots_are_partitioned_by_actor_and_role() {
    let engine = StorageEngine::open_in_memory().unwrap();
    engine
        .insert_snapshot(&snapshot_at("actor-1", Role::Requester, 1, "a"))
        .unwrap();
    engine
        .insert_snapshot(&snapshot_at("actor-2", Role::Requester, 1, "b"))
        .unwrap();

    assert!(engine
        .latest_snapshot("actor-1", Role::Fulfiller)
        .unwrap()
        .is_none());
    let latest = engine
        .latest_snapshot("actor-2", Role::Requester)
        .unwrap()
        .unwrap();
    assert_eq!(latest.reason, "b");
}
