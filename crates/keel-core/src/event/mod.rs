//! Trust event model: the closed taxonomy and the append-only ledger entry.

mod new_event;
mod taxonomy;
mod trust_event;

pub use new_event::NewTrustEvent;
pub use taxonomy::{EventCategory, EventType, Role};
pub use trust_event::TrustEvent;
