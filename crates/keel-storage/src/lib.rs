//! # keel-storage
//!
//! SQLite persistence for the keel trust engine. One write connection plus a
//! small read pool over a WAL-mode database; versioned migrations; query
//! modules for the event ledger, score rows, and snapshots.
//!
//! The event ledger is append-only and score rows carry an optimistic
//! version token; `update_score` refuses a write whose expected version no
//! longer matches the row.

pub mod engine;
pub mod migrations;
pub mod pool;
pub mod queries;

pub use engine::StorageEngine;

use keel_core::errors::{KeelError, StorageError};

/// Wrap an underlying SQLite failure message in the crate error type.
pub fn to_storage_err(message: impl Into<String>) -> KeelError {
    KeelError::StorageError(StorageError::SqliteError {
        message: message.into(),
    })
}
