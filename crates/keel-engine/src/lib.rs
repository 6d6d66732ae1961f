//! # keel-engine
//!
//! The assembled trust engine: storage, aggregation, transitions, and
//! guidance wired together behind one façade.
//!
//! `record_event` is the single write path. It appends to the ledger,
//! recomputes the actor's windowed aggregates, applies the transition
//! policy, and persists the updated score record inside one SQLite
//! transaction. A version conflict (another writer committed first) rolls
//! the transaction back and re-runs the pipeline from fresh committed
//! state, up to a bounded number of attempts.
//!
//! Reads (`get_guidance`, `check_eligibility`) never recompute and never
//! touch the writer.

pub mod engine;
pub mod recalc;
pub mod scheduler;
pub mod tracing_setup;

pub use engine::TrustEngine;
pub use scheduler::SnapshotScheduler;
pub use tracing_setup::init_tracing;
