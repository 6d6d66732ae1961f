//! # keel-guidance
//!
//! Read-only façade over committed trust records: human-readable status for
//! profile surfaces and yes/no eligibility for job-post / job-accept flows.
//! Both calls are a single indexed read of the score row. Nothing here ever
//! recomputes aggregates or moves a level.

pub mod eligibility;
pub mod engine;
pub mod status;
pub mod tips;

pub use engine::GuidanceEngine;
