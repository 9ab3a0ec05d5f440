//! PostgreSQL implementation of the row-fetch seam.

use async_trait::async_trait;
use dues_core::contribution::{ContributionFilter, ContributionRecord, MemberFilter, MemberRecord};
use dues_core::source::{RecordSource, SourceError};
use dues_shared::types::MemberId;
use sea_orm::{DatabaseConnection, DbErr};
use tracing::error;

use super::contribution::{ContributionRepository, contribution_record};
use super::member::{MemberRepository, member_record};

/// Serves report and statistics rows from the database.
#[derive(Debug, Clone)]
pub struct DatabaseSource {
    members: MemberRepository,
    contributions: ContributionRepository,
}

impl DatabaseSource {
    /// Creates a source over one connection pool.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            members: MemberRepository::new(db.clone()),
            contributions: ContributionRepository::new(db),
        }
    }
}

fn query_failed(err: DbErr) -> SourceError {
    error!(error = %err, "record query failed");
    SourceError::Query(err.to_string())
}

#[async_trait]
impl RecordSource for DatabaseSource {
    async fn contributions(
        &self,
        filter: &ContributionFilter,
    ) -> Result<Vec<ContributionRecord>, SourceError> {
        self.contributions
            .list(filter)
            .await
            .map_err(query_failed)?
            .into_iter()
            .map(|row| contribution_record(row).map_err(|e| SourceError::CorruptRow(e.to_string())))
            .collect()
    }

    async fn member(&self, id: MemberId) -> Result<Option<MemberRecord>, SourceError> {
        Ok(self
            .members
            .find_by_id(id)
            .await
            .map_err(query_failed)?
            .map(member_record))
    }

    async fn members(&self, filter: &MemberFilter) -> Result<Vec<MemberRecord>, SourceError> {
        Ok(self
            .members
            .list(filter)
            .await
            .map_err(query_failed)?
            .into_iter()
            .map(member_record)
            .collect())
    }
}
