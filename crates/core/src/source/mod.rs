//! Row-fetch seam.
//!
//! Reports and statistics read their rows through [`RecordSource`]. The
//! database crate implements it against PostgreSQL; [`InMemorySource`]
//! serves tests and demos.

mod memory;

use async_trait::async_trait;
use dues_shared::AppError;
use dues_shared::types::MemberId;
use thiserror::Error;

use crate::contribution::{ContributionFilter, ContributionRecord, MemberFilter, MemberRecord};

pub use memory::InMemorySource;

/// Failure to fetch rows.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The backing store could not be reached or queried.
    #[error("query failed: {0}")]
    Query(String),

    /// A stored row could not be turned into a record.
    #[error("corrupt row: {0}")]
    CorruptRow(String),
}

impl From<SourceError> for AppError {
    fn from(err: SourceError) -> Self {
        Self::Database(err.to_string())
    }
}

/// Fetches contribution and member rows.
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Contributions passing `filter`, newest first, with member names joined.
    async fn contributions(
        &self,
        filter: &ContributionFilter,
    ) -> Result<Vec<ContributionRecord>, SourceError>;

    /// One member, if present.
    async fn member(&self, id: MemberId) -> Result<Option<MemberRecord>, SourceError>;

    /// Members passing `filter`, sorted by full name.
    async fn members(&self, filter: &MemberFilter) -> Result<Vec<MemberRecord>, SourceError>;
}
