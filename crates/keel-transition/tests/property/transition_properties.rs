//! Property tests over the state machine: invariants that must hold for any
//! record state, triggering event, and counter combination.

use chrono::Utc;
use proptest::prelude::*;

use keel_core::config::PolicyConfig;
use keel_core::{
    EventCategory, EventType, Role, TrustAggregates, TrustEvent, TrustLevel, TrustScoreRecord,
    WindowMetrics,
};
use keel_transition::{LevelChange, TransitionEngine};

fn level_strategy() -> impl Strategy<Value = TrustLevel> {
    prop::sample::select(vec![
        TrustLevel::Good,
        TrustLevel::Advisory,
        TrustLevel::Risk,
        TrustLevel::HighRisk,
    ])
}

fn role_strategy() -> impl Strategy<Value = Role> {
    prop::sample::select(vec![Role::Requester, Role::Fulfiller])
}

fn event_type_strategy() -> impl Strategy<Value = EventType> {
    prop::sample::select(EventType::all().to_vec())
}

#[derive(Debug, Clone)]
struct Scenario {
    role: Role,
    level: TrustLevel,
    streak: u64,
    event_type: EventType,
    negative: u64,
    completed: u64,
    counterparts: u64,
}

fn scenario_strategy() -> impl Strategy<Value = Scenario> {
    (
        role_strategy(),
        level_strategy(),
        0u64..20,
        event_type_strategy(),
        0u64..12,
        0u64..12,
        0u64..6,
    )
        .prop_map(
            |(role, level, streak, event_type, negative, completed, counterparts)| Scenario {
                role,
                level,
                streak,
                event_type,
                negative,
                completed,
                // Distinct counterparts come from negative events only.
                counterparts: counterparts.min(negative),
            },
        )
}

fn build(scenario: &Scenario) -> (TrustScoreRecord, TrustEvent, TrustAggregates) {
    let now = Utc::now();
    let mut record = TrustScoreRecord::bootstrap("prop-actor", scenario.role, now);
    record.trust_level = scenario.level;
    record.consecutive_completed_since_last_negative = scenario.streak;

    let event = TrustEvent::new(
        "prop-actor",
        scenario.role,
        scenario.event_type,
        None,
        now,
        vec![],
        None,
        now,
    );

    let metrics = WindowMetrics {
        negative_events: scenario.negative,
        completed_events: scenario.completed,
        neutral_events: 0,
        negative_rate: WindowMetrics::rate_of(scenario.negative, scenario.completed),
        unique_counterparts: scenario.counterparts,
    };
    let aggregates = TrustAggregates {
        computed_at: now,
        last_30d: metrics,
        last_90d: metrics,
        last_180d: metrics,
        lifetime: metrics,
    };

    (record, event, aggregates)
}

proptest! {
    #[test]
    fn prop_level_moves_at_most_one_step(scenario in scenario_strategy()) {
        let (record, event, aggregates) = build(&scenario);
        let engine = TransitionEngine::new(PolicyConfig::default());

        let outcome = engine.evaluate(&record, &event, &aggregates);

        let step = (outcome.level.as_i64() - outcome.previous_level.as_i64()).abs();
        prop_assert!(step <= 1, "level stepped by {step}");
    }

    #[test]
    fn prop_any_level_change_resets_the_streak(scenario in scenario_strategy()) {
        let (record, event, aggregates) = build(&scenario);
        let engine = TransitionEngine::new(PolicyConfig::default());

        let outcome = engine.evaluate(&record, &event, &aggregates);

        if outcome.changed() {
            prop_assert_eq!(outcome.consecutive_completed, 0);
        }
    }

    #[test]
    fn prop_promotion_only_on_negative_events(scenario in scenario_strategy()) {
        let (record, event, aggregates) = build(&scenario);
        let engine = TransitionEngine::new(PolicyConfig::default());

        let outcome = engine.evaluate(&record, &event, &aggregates);

        if outcome.change == LevelChange::Promoted {
            prop_assert_eq!(event.category, EventCategory::Negative);
            // The hard floor held in the band window.
            prop_assert!(scenario.negative >= 2);
        }
    }

    #[test]
    fn prop_demotion_needs_a_complete_streak(scenario in scenario_strategy()) {
        let (record, event, aggregates) = build(&scenario);
        let policy = PolicyConfig::default();
        let required = policy.role(scenario.role).recovery_streak;
        let engine = TransitionEngine::new(policy);

        let outcome = engine.evaluate(&record, &event, &aggregates);

        if outcome.change == LevelChange::Demoted {
            prop_assert!(outcome.previous_level > TrustLevel::Good);
            let effective = match event.category {
                EventCategory::Positive => scenario.streak + 1,
                EventCategory::Negative => 0,
                EventCategory::Neutral => scenario.streak,
            };
            prop_assert!(effective >= required);
        }
    }

    #[test]
    fn prop_single_negative_never_moves_a_fresh_record(
        role in role_strategy(),
        event_type in prop::sample::select(vec![
            EventType::NoShow,
            EventType::LateArrival,
            EventType::ExcessiveExtension,
            EventType::DisputeUpheld,
        ]),
    ) {
        let now = Utc::now();
        let record = TrustScoreRecord::bootstrap("prop-actor", role, now);
        let event = TrustEvent::new("prop-actor", role, event_type, None, now, vec![], None, now);
        let metrics = WindowMetrics {
            negative_events: 1,
            completed_events: 0,
            neutral_events: 0,
            negative_rate: 1.0,
            unique_counterparts: 1,
        };
        let aggregates = TrustAggregates {
            computed_at: now,
            last_30d: metrics,
            last_90d: metrics,
            last_180d: metrics,
            lifetime: metrics,
        };
        let engine = TransitionEngine::new(PolicyConfig::default());

        let outcome = engine.evaluate(&record, &event, &aggregates);

        prop_assert_eq!(outcome.level, TrustLevel::Good);
        prop_assert_eq!(outcome.change, LevelChange::Unchanged);
    }

    #[test]
    fn prop_evaluation_is_a_pure_function(scenario in scenario_strategy()) {
        let (record, event, aggregates) = build(&scenario);
        let engine = TransitionEngine::new(PolicyConfig::default());

        let first = engine.evaluate(&record, &event, &aggregates);
        let second = engine.evaluate(&record, &event, &aggregates);

        prop_assert_eq!(first, second);
    }
}
