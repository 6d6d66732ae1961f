use keel_core::errors::*;
use keel_core::event::Role;

#[test]
fn invalid_event_type_carries_name() {
    let err = KeelError::InvalidEventType {
        name: "account_hacked".into(),
    };
    assert!(err.to_string().contains("account_hacked"));
}

#[test]
fn category_mismatch_carries_both_sides() {
    let err = KeelError::CategoryMismatch {
        event_type: "no_show".into(),
        expected: "negative".into(),
        got: "positive".into(),
    };
    let msg = err.to_string();
    assert!(msg.contains("no_show"));
    assert!(msg.contains("negative"));
    assert!(msg.contains("positive"));
}

#[test]
fn record_not_found_carries_actor_and_role() {
    let err = KeelError::RecordNotFound {
        actor_id: "actor-9".into(),
        role: Role::Fulfiller,
    };
    let msg = err.to_string();
    assert!(msg.contains("actor-9"));
    assert!(msg.contains("fulfiller"));
}

#[test]
fn recalculation_conflict_carries_attempts() {
    let err = KeelError::RecalculationConflict {
        actor_id: "actor-1".into(),
        role: Role::Requester,
        attempts: 3,
    };
    let msg = err.to_string();
    assert!(msg.contains("actor-1"));
    assert!(msg.contains("3"));
}

// --- From impls ---

#[test]
fn storage_error_converts_to_keel_error() {
    let storage_err = StorageError::SqliteError {
        message: "disk full".into(),
    };
    let keel_err: KeelError = storage_err.into();
    assert!(matches!(keel_err, KeelError::StorageError(_)));
}

#[test]
fn serialization_error_converts_to_keel_error() {
    let json_err = serde_json::from_str::<String>("not valid json").unwrap_err();
    let keel_err: KeelError = json_err.into();
    assert!(matches!(keel_err, KeelError::SerializationError(_)));
}

// --- Sub-error variants carry context ---

#[test]
fn storage_error_migration_failed_carries_version() {
    let err = StorageError::MigrationFailed {
        version: 2,
        reason: "syntax error".into(),
    };
    let msg = err.to_string();
    assert!(msg.contains("2"));
    assert!(msg.contains("syntax error"));
}

#[test]
fn storage_error_version_conflict_carries_expected_version() {
    let err = StorageError::VersionConflict {
        actor_id: "actor-1".into(),
        expected: 7,
    };
    let msg = err.to_string();
    assert!(msg.contains("actor-1"));
    assert!(msg.contains("7"));
}

#[test]
fn storage_error_pool_exhausted_carries_count() {
    let err = StorageError::ConnectionPoolExhausted {
        active_connections: 8,
    };
    assert!(err.to_string().contains("8"));
}
