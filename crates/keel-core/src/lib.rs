//! # keel-core
//!
//! Foundation crate for the keel marketplace trust engine.
//! Defines all types, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod event;
pub mod models;
pub mod score;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::KeelConfig;
pub use errors::{KeelError, KeelResult};
pub use event::{EventCategory, EventType, NewTrustEvent, Role, TrustEvent};
pub use score::{TrustAggregates, TrustLevel, TrustScoreRecord, Window, WindowMetrics};
pub use traits::ITrustStorage;
