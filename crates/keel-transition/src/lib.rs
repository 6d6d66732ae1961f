//! # keel-transition
//!
//! The trust level state machine. Given the current score record, the event
//! that triggered recalculation, and freshly computed aggregates, decide the
//! next level, recovery streak, and last-negative marker. Promotion climbs
//! through per-role threshold bands; recovery descends through completion
//! streaks. At most one level step per evaluation, in either direction.

pub mod bands;
pub mod engine;
pub mod outcome;

pub use engine::TransitionEngine;
pub use outcome::{LevelChange, TransitionOutcome};
