//! In-memory record source.

use std::collections::HashMap;

use async_trait::async_trait;
use dues_shared::types::MemberId;

use super::{RecordSource, SourceError};
use crate::contribution::{ContributionFilter, ContributionRecord, MemberFilter, MemberRecord};

/// Record source over fixed vectors.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    members: Vec<MemberRecord>,
    contributions: Vec<ContributionRecord>,
}

impl InMemorySource {
    /// Creates a source.
    #[must_use]
    pub fn new(members: Vec<MemberRecord>, contributions: Vec<ContributionRecord>) -> Self {
        Self {
            members,
            contributions,
        }
    }

    /// Adds a member.
    #[must_use]
    pub fn with_member(mut self, member: MemberRecord) -> Self {
        self.members.push(member);
        self
    }

    /// Adds a contribution.
    #[must_use]
    pub fn with_contribution(mut self, contribution: ContributionRecord) -> Self {
        self.contributions.push(contribution);
        self
    }
}

#[async_trait]
impl RecordSource for InMemorySource {
    async fn contributions(
        &self,
        filter: &ContributionFilter,
    ) -> Result<Vec<ContributionRecord>, SourceError> {
        let names: HashMap<MemberId, &str> = self
            .members
            .iter()
            .map(|m| (m.id, m.full_name.as_str()))
            .collect();

        let mut rows: Vec<ContributionRecord> = filter
            .apply(&self.contributions)
            .map(|record| {
                let mut record = record.clone();
                if record.member_name.is_none() {
                    record.member_name = names.get(&record.member_id).map(|n| (*n).to_string());
                }
                record
            })
            .collect();
        rows.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
        Ok(rows)
    }

    async fn member(&self, id: MemberId) -> Result<Option<MemberRecord>, SourceError> {
        Ok(self.members.iter().find(|m| m.id == id).cloned())
    }

    async fn members(&self, filter: &MemberFilter) -> Result<Vec<MemberRecord>, SourceError> {
        let mut rows: Vec<MemberRecord> = self
            .members
            .iter()
            .filter(|m| filter.matches(m))
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.full_name.cmp(&b.full_name).then(a.id.cmp(&b.id)));
        Ok(rows)
    }
}
