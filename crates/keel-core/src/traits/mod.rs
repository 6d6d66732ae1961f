//! Interfaces implemented by the storage crate and consumed by the engines.

mod storage;

pub use storage::ITrustStorage;
