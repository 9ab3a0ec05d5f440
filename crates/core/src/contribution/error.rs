//! Contribution domain errors.

use dues_shared::AppError;
use dues_shared::types::ContributionId;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised while building records or parsing filters.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContributionError {
    /// Amounts must never be negative.
    #[error("contribution {id} has a negative amount: {amount}")]
    NegativeAmount {
        /// Offending contribution.
        id: ContributionId,
        /// Stored amount.
        amount: Decimal,
    },

    /// Unknown contribution type.
    #[error("unknown contribution type: {0}")]
    UnknownType(String),

    /// Unknown payment status.
    #[error("unknown contribution status: {0}")]
    UnknownStatus(String),

    /// Unknown member status.
    #[error("unknown member status: {0}")]
    UnknownMemberStatus(String),

    /// Date not in `YYYY-MM-DD` form.
    #[error("{field} must be an ISO-8601 date (YYYY-MM-DD), got '{value}'")]
    InvalidDate {
        /// Filter field name.
        field: &'static str,
        /// Raw input.
        value: String,
    },

    /// Member id is not an integer.
    #[error("member_id must be an integer, got '{0}'")]
    InvalidMemberId(String),

    /// Unknown statistics period.
    #[error("unknown period: {0} (expected 'month' or 'year')")]
    UnknownPeriod(String),
}

impl From<ContributionError> for AppError {
    fn from(err: ContributionError) -> Self {
        Self::Validation(err.to_string())
    }
}
