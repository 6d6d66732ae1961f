/// Storage-layer errors for SQLite operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {message}")]
    SqliteError { message: String },

    #[error("migration failed at version {version}: {reason}")]
    MigrationFailed { version: u32, reason: String },

    /// The score row's version token did not match the expected value.
    /// Internal signal; the engine retries and only ever surfaces
    /// `KeelError::RecalculationConflict` to callers.
    #[error("version conflict for actor {actor_id}: expected version {expected}")]
    VersionConflict { actor_id: String, expected: i64 },

    #[error("connection pool exhausted: {active_connections} active connections")]
    ConnectionPoolExhausted { active_connections: usize },
}
