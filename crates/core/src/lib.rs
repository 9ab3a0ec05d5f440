//! Core business logic for the dues service.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Domain records, aggregation and report rendering live here.
//!
//! # Modules
//!
//! - `contribution` - Contribution and member records, filters
//! - `stats` - Summary and per-type aggregation
//! - `reports` - Paginated table layout and PDF encoding
//! - `source` - Row-fetch seam implemented by the database crate
//! - `storage` - Archive for finished reports

pub mod contribution;
pub mod reports;
pub mod source;
pub mod stats;
pub mod storage;
