//! Contribution and member records.
//!
//! This module provides the row types the rest of the engine works on:
//! - Contribution records with their type and payment status
//! - Member records
//! - Filters over both, plus the preset statistics windows

mod error;
mod filter;
mod member;
mod types;

pub use error::ContributionError;
pub use filter::{ContributionFilter, FilterParams, MemberFilter, StatsPeriod, parse_date};
pub use member::{MemberRecord, MemberStatus};
pub use types::{ContributionRecord, ContributionStatus, ContributionType};
