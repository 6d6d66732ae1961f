//! Property tests: ledger roundtrips for arbitrary taxonomy members and
//! actor ids, version-token monotonicity under interleaved updates.

use chrono::{Duration, Utc};
use proptest::prelude::*;

use keel_core::event::{EventType, Role, TrustEvent};
use keel_core::score::TrustScoreRecord;
use keel_core::traits::ITrustStorage;
use keel_storage::queries::{event_ops, score_ops};
use keel_storage::StorageEngine;

fn event_type_strategy() -> impl Strategy<Value = EventType> {
    prop::sample::select(EventType::all().to_vec())
}

fn role_strategy() -> impl Strategy<Value = Role> {
    prop::sample::select(vec![Role::Requester, Role::Fulfiller])
}

proptest! {
    #[test]
    fn prop_insert_get_roundtrip(
        actor in "[a-z0-9]{1,32}",
        event_type in event_type_strategy(),
        role in role_strategy(),
        backdate_days in 0i64..400,
    ) {
        let engine = StorageEngine::open_in_memory().unwrap();
        let now = Utc::now();
        let event = TrustEvent::new(
            actor.as_str(),
            role,
            event_type,
            None,
            now - Duration::days(backdate_days),
            vec![],
            None,
            now,
        );

        engine
            .pool()
            .writer
            .with_conn(|conn| event_ops::insert_event(conn, &event))
            .unwrap();
        let retrieved = engine.get_event(&event.id).unwrap().unwrap();

        prop_assert_eq!(retrieved, event);
    }

    #[test]
    fn prop_history_count_matches_appends(
        count in 1usize..20,
        event_type in event_type_strategy(),
    ) {
        let engine = StorageEngine::open_in_memory().unwrap();
        let now = Utc::now();

        engine
            .pool()
            .writer
            .with_conn(|conn| {
                for i in 0..count {
                    let event = TrustEvent::new(
                        "prop-actor",
                        Role::Fulfiller,
                        event_type,
                        None,
                        now - Duration::minutes(i as i64),
                        vec![],
                        None,
                        now,
                    );
                    event_ops::insert_event(conn, &event)?;
                }
                Ok(())
            })
            .unwrap();

        let history = engine.list_events("prop-actor", Role::Fulfiller).unwrap();
        prop_assert_eq!(history.len(), count);
        // Oldest first.
        for pair in history.windows(2) {
            prop_assert!(pair[0].occurred_at <= pair[1].occurred_at);
        }
    }

    #[test]
    fn prop_version_updates_are_strictly_sequential(
        updates in 1i64..12,
    ) {
        let engine = StorageEngine::open_in_memory().unwrap();
        let mut record = TrustScoreRecord::bootstrap("prop-actor", Role::Requester, Utc::now());
        engine
            .pool()
            .writer
            .with_conn(|conn| score_ops::insert_score(conn, &record))
            .unwrap();

        for expected in 1..=updates {
            record.version = expected + 1;
            record.updated_at = Utc::now();
            engine
                .pool()
                .writer
                .with_conn(|conn| score_ops::update_score(conn, &record, expected))
                .unwrap();

            // Replaying the same expected version must now fail.
            let replay = engine
                .pool()
                .writer
                .with_conn(|conn| score_ops::update_score(conn, &record, expected));
            prop_assert!(replay.is_err());
        }

        let loaded = engine.get_score("prop-actor", Role::Requester).unwrap().unwrap();
        prop_assert_eq!(loaded.version, updates + 1);
    }
}
