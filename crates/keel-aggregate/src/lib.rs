//! # keel-aggregate
//!
//! Windowed rolling aggregation over an actor's event history. A pure
//! function of `(event list, now)`: no clocks, no storage, no hidden state,
//! so recomputation is deterministic and the transition layer above can be
//! tested without a database.

pub mod engine;
pub mod qualify;

pub use engine::RollingAggregator;
