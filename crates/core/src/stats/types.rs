//! Aggregate types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::contribution::{ContributionStatus, ContributionType};

/// Per-status totals over a filtered record set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateSummary {
    /// Number of matching records, whatever their status.
    pub total_count: u64,
    /// Sum of paid amounts.
    pub total_paid_amount: Decimal,
    /// Sum of unpaid amounts.
    pub total_unpaid_amount: Decimal,
    /// Sum of partially paid amounts.
    pub total_partial_amount: Decimal,
}

impl AggregateSummary {
    /// Adds one record to the totals.
    pub(crate) fn add(&mut self, status: ContributionStatus, amount: Decimal) {
        self.total_count += 1;
        match status {
            ContributionStatus::Paid => self.total_paid_amount += amount,
            ContributionStatus::Unpaid => self.total_unpaid_amount += amount,
            ContributionStatus::Partial => self.total_partial_amount += amount,
        }
    }

    /// Sum over every status.
    #[must_use]
    pub fn total_amount(&self) -> Decimal {
        self.total_paid_amount + self.total_unpaid_amount + self.total_partial_amount
    }

    /// Returns the total for one status.
    #[must_use]
    pub const fn amount_for(&self, status: ContributionStatus) -> Decimal {
        match status {
            ContributionStatus::Paid => self.total_paid_amount,
            ContributionStatus::Unpaid => self.total_unpaid_amount,
            ContributionStatus::Partial => self.total_partial_amount,
        }
    }
}

/// Totals for one contribution type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeAggregate {
    /// Contribution type.
    #[serde(rename = "type")]
    pub contribution_type: ContributionType,
    /// Number of records of this type.
    pub count: u64,
    /// Sum of every amount of this type.
    pub total_amount: Decimal,
    /// Sum of paid amounts.
    pub total_paid: Decimal,
    /// Sum of unpaid amounts.
    pub total_unpaid: Decimal,
    /// Sum of partially paid amounts.
    pub total_partial: Decimal,
}

impl TypeAggregate {
    pub(crate) fn from_summary(
        contribution_type: ContributionType,
        summary: &AggregateSummary,
    ) -> Self {
        Self {
            contribution_type,
            count: summary.total_count,
            total_amount: summary.total_amount(),
            total_paid: summary.total_paid_amount,
            total_unpaid: summary.total_unpaid_amount,
            total_partial: summary.total_partial_amount,
        }
    }
}

/// Member head counts for the roster.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberCounts {
    /// All members.
    pub total: u64,
    /// Active members.
    pub active: u64,
    /// Inactive members.
    pub inactive: u64,
}
