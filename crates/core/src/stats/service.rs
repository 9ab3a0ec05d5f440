//! Aggregation over contribution records.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use super::types::{AggregateSummary, MemberCounts, TypeAggregate};
use crate::contribution::{ContributionFilter, ContributionRecord, ContributionType, MemberRecord};

/// Computes statistics over in-memory record sets.
///
/// Every operation is a pure function of its inputs.
pub struct Aggregator;

impl Aggregator {
    /// Sums amounts per status over the records that pass `filter`.
    #[must_use]
    pub fn compute_summary(
        records: &[ContributionRecord],
        filter: &ContributionFilter,
    ) -> AggregateSummary {
        let mut summary = AggregateSummary::default();
        for record in filter.apply(records) {
            summary.add(record.status, record.amount);
        }
        debug!(
            records = records.len(),
            matched = summary.total_count,
            "computed contribution summary"
        );
        summary
    }

    /// Groups matching records by type, ascending by type identifier.
    ///
    /// Only types present in the filtered set appear in the output.
    #[must_use]
    pub fn compute_by_type(
        records: &[ContributionRecord],
        filter: &ContributionFilter,
    ) -> Vec<TypeAggregate> {
        let mut groups: BTreeMap<ContributionType, AggregateSummary> = BTreeMap::new();
        for record in filter.apply(records) {
            groups
                .entry(record.contribution_type)
                .or_default()
                .add(record.status, record.amount);
        }

        groups
            .iter()
            .map(|(contribution_type, summary)| {
                TypeAggregate::from_summary(*contribution_type, summary)
            })
            .collect()
    }

    /// Returns the distinct officiants of sacrament records, sorted ascending.
    ///
    /// Values are deduplicated case-sensitively and returned as stored.
    #[must_use]
    pub fn distinct_officiants(records: &[ContributionRecord]) -> Vec<String> {
        records
            .iter()
            .filter_map(ContributionRecord::display_officiant)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Counts members by status.
    #[must_use]
    pub fn member_counts(members: &[MemberRecord]) -> MemberCounts {
        members
            .iter()
            .fold(MemberCounts::default(), |mut counts, member| {
                counts.total += 1;
                if member.is_active() {
                    counts.active += 1;
                } else {
                    counts.inactive += 1;
                }
                counts
            })
    }
}
