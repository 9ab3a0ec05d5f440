//! Contribution statistics.
//!
//! Per-status totals, per-type breakdowns, the officiant list and member
//! head counts, all recomputed on demand from fetched records.

pub mod service;
pub mod types;


pub use service::Aggregator;
pub use types::*;
