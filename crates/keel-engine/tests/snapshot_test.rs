//! Manual snapshots and the automatic sweep: baselines, interval gating,
//! and the no-activity skip.

use chrono::{Duration, Utc};

use keel_core::config::{KeelConfig, SnapshotConfig};
use keel_core::event::{EventType, Role};
use keel_core::score::TrustLevel;
use keel_core::traits::ITrustStorage;
use keel_core::{KeelError, NewTrustEvent};
use keel_engine::{SnapshotScheduler, TrustEngine};

fn engine_with_history() -> TrustEngine {
    let engine = TrustEngine::open_in_memory().unwrap();
    for days_ago in [40, 36] {
        engine
            .record_event(
                &NewTrustEvent::new("anna", Role::Requester, EventType::NoShow)
                    .with_occurred_at(Utc::now() - Duration::days(days_ago)),
            )
            .unwrap();
    }
    engine
}

#[test]
fn take_snapshot_freezes_the_current_record() {
    let engine = engine_with_history();

    let snapshot = engine
        .take_snapshot("anna", Role::Requester, "support-review")
        .unwrap();

    assert_eq!(snapshot.trust_level, TrustLevel::Advisory);
    assert_eq!(snapshot.reason, "support-review");
    assert_eq!(snapshot.aggregates.last_90d.negative_events, 2);

    let latest = engine
        .storage()
        .latest_snapshot("anna", Role::Requester)
        .unwrap()
        .unwrap();
    assert_eq!(latest, snapshot);
}

#[test]
fn snapshot_of_an_unknown_actor_is_an_error() {
    let engine = TrustEngine::open_in_memory().unwrap();

    let err = engine
        .take_snapshot("nobody", Role::Requester, "whatever")
        .unwrap_err();
    assert!(matches!(err, KeelError::RecordNotFound { .. }));
}

#[test]
fn the_first_sweep_cuts_baselines_for_every_scored_pair() {
    let engine = engine_with_history();
    engine
        .record_event(&NewTrustEvent::new(
            "brett",
            Role::Fulfiller,
            EventType::JobCompleted,
        ))
        .unwrap();

    assert_eq!(engine.snapshot_all_due().unwrap(), 2);

    let label = engine
        .storage()
        .latest_snapshot("anna", Role::Requester)
        .unwrap()
        .unwrap()
        .reason;
    assert!(label.starts_with("auto-"), "got label {label}");

    // Immediately re-running cuts nothing: the interval has not elapsed.
    assert_eq!(engine.snapshot_all_due().unwrap(), 0);
}

#[test]
fn an_elapsed_interval_without_activity_is_skipped() {
    let engine = engine_with_history();
    let scheduler = SnapshotScheduler::new(SnapshotConfig {
        enabled: true,
        interval_days: 30,
    });

    assert_eq!(scheduler.run(engine.storage(), Utc::now()).unwrap(), 1);
    // 45 days later, nothing new happened for the pair.
    let later = Utc::now() + Duration::days(45);
    assert_eq!(scheduler.run(engine.storage(), later).unwrap(), 0);
}

#[test]
fn a_due_pair_with_fresh_events_gets_a_new_snapshot() {
    let engine = engine_with_history();
    let scheduler = SnapshotScheduler::new(SnapshotConfig {
        enabled: true,
        interval_days: 30,
    });

    assert_eq!(scheduler.run(engine.storage(), Utc::now()).unwrap(), 1);
    engine
        .record_event(&NewTrustEvent::new(
            "anna",
            Role::Requester,
            EventType::BookingCompleted,
        ))
        .unwrap();

    // Interval not yet elapsed: the fresh event alone is not enough.
    let soon = Utc::now() + Duration::days(10);
    assert_eq!(scheduler.run(engine.storage(), soon).unwrap(), 0);

    let later = Utc::now() + Duration::days(45);
    assert_eq!(scheduler.run(engine.storage(), later).unwrap(), 1);

    let snapshots = engine
        .storage()
        .snapshots_in_range(
            "anna",
            Role::Requester,
            Utc::now() - Duration::days(1),
            later + Duration::days(1),
        )
        .unwrap();
    assert_eq!(snapshots.len(), 2);
}

#[test]
fn disabled_snapshots_silence_the_sweep_but_not_manual_cuts() {
    let config = KeelConfig {
        snapshot: SnapshotConfig {
            enabled: false,
            interval_days: 14,
        },
        ..KeelConfig::default()
    };
    let engine = TrustEngine::open_in_memory_with_config(config).unwrap();
    engine
        .record_event(&NewTrustEvent::new(
            "anna",
            Role::Requester,
            EventType::BookingCompleted,
        ))
        .unwrap();

    assert_eq!(engine.snapshot_all_due().unwrap(), 0);

    let manual = engine
        .take_snapshot("anna", Role::Requester, "requested by support")
        .unwrap();
    assert_eq!(manual.trust_level, TrustLevel::Good);
}
