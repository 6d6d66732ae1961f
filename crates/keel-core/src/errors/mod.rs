//! Error types for the keel trust engine.
//!
//! `KeelError` is the single top-level error every public operation returns.
//! Subsystem errors (`StorageError`) nest inside it via `#[from]`.

mod storage_error;

pub use storage_error::StorageError;

use crate::event::Role;

/// Result alias used across the workspace.
pub type KeelResult<T> = Result<T, KeelError>;

/// Top-level error for all keel operations.
#[derive(Debug, thiserror::Error)]
pub enum KeelError {
    /// The event type is not a member of the closed taxonomy.
    #[error("invalid event type: {name}")]
    InvalidEventType { name: String },

    /// A role string at the boundary did not parse to a known role.
    #[error("invalid role: {name}")]
    InvalidRole { name: String },

    /// The caller-supplied category contradicts the canonical taxonomy mapping.
    #[error("category mismatch for {event_type}: expected {expected}, got {got}")]
    CategoryMismatch {
        event_type: String,
        expected: String,
        got: String,
    },

    /// No score record exists for the actor/role pair.
    #[error("no score record for actor {actor_id} role {role}")]
    RecordNotFound { actor_id: String, role: Role },

    /// Optimistic-concurrency retries exhausted; the caller should retry
    /// the whole RecordEvent call.
    #[error("recalculation conflict for actor {actor_id} role {role} after {attempts} attempts")]
    RecalculationConflict {
        actor_id: String,
        role: Role,
        attempts: u32,
    },

    #[error("storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("config error: {0}")]
    ConfigError(String),
}
