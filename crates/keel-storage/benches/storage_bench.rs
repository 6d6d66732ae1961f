use chrono::{Duration, Utc};
use criterion::{criterion_group, criterion_main, Criterion};

use keel_core::event::{EventType, Role, TrustEvent};
use keel_core::traits::ITrustStorage;
use keel_storage::queries::event_ops;
use keel_storage::StorageEngine;

/// Seed an actor with a mixed one-year history of the given size.
fn seed_history(engine: &StorageEngine, actor: &str, count: usize) {
    let now = Utc::now();
    engine
        .pool()
        .writer
        .with_conn(|conn| {
            for i in 0..count {
                let event_type = match i % 10 {
                    0 => EventType::NoShow,
                    1 => EventType::LateArrival,
                    2 => EventType::DisputeFiled,
                    _ => EventType::JobCompleted,
                };
                let event = TrustEvent::new(
                    actor,
                    Role::Fulfiller,
                    event_type,
                    Some(format!("counterpart-{}", i % 7)),
                    now - Duration::days((i % 365) as i64),
                    vec![],
                    None,
                    now,
                );
                event_ops::insert_event(conn, &event)?;
            }
            Ok(())
        })
        .unwrap();
}

fn bench_ledger_append(c: &mut Criterion) {
    let engine = StorageEngine::open_in_memory().unwrap();
    let now = Utc::now();

    c.bench_function("ledger_append", |b| {
        b.iter(|| {
            let event = TrustEvent::new(
                "bench-actor",
                Role::Requester,
                EventType::JobCompleted,
                None,
                now,
                vec![],
                None,
                now,
            );
            engine
                .pool()
                .writer
                .with_conn(|conn| event_ops::insert_event(conn, &event))
                .unwrap();
        });
    });
}

fn bench_history_scan_1k(c: &mut Criterion) {
    let engine = StorageEngine::open_in_memory().unwrap();
    seed_history(&engine, "bench-actor", 1_000);

    c.bench_function("history_scan_1k", |b| {
        b.iter(|| {
            let history = engine.list_events("bench-actor", Role::Fulfiller).unwrap();
            assert_eq!(history.len(), 1_000);
        });
    });
}

fn bench_dedup_probe(c: &mut Criterion) {
    let engine = StorageEngine::open_in_memory().unwrap();
    seed_history(&engine, "bench-actor", 1_000);
    let digest =
        TrustEvent::dedup_digest_for("bench-actor", Role::Fulfiller, EventType::NoShow, "job-1");
    let cutoff = Utc::now() - Duration::hours(24);

    c.bench_function("dedup_probe_1k_ledger", |b| {
        b.iter(|| {
            engine
                .pool()
                .writer
                .with_conn(|conn| event_ops::find_recent_by_digest(conn, &digest, cutoff))
                .unwrap();
        });
    });
}

criterion_group!(
    benches,
    bench_ledger_append,
    bench_history_scan_1k,
    bench_dedup_probe
);
criterion_main!(benches);
