//! Contribution types.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use dues_shared::types::{ContributionId, MemberId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::ContributionError;

/// Kind of contribution.
///
/// Variants are declared in ascending order of their wire name so the derived
/// `Ord` matches lexicographic ordering of the identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContributionType {
    /// Baptism offering.
    #[serde(alias = "bapteme")]
    Baptism,
    /// Monthly dues.
    #[serde(alias = "mensuelle")]
    Monthly,
    /// Special-case contribution.
    #[serde(alias = "cas_particulier")]
    SpecialCase,
    /// Wedding offering.
    #[serde(alias = "mariage")]
    Wedding,
}

impl ContributionType {
    /// All contribution types in ascending identifier order.
    pub const ALL: [Self; 4] = [Self::Baptism, Self::Monthly, Self::SpecialCase, Self::Wedding];

    /// Returns the wire identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Baptism => "baptism",
            Self::Monthly => "monthly",
            Self::SpecialCase => "special_case",
            Self::Wedding => "wedding",
        }
    }

    /// Returns true for sacraments, the only types that carry an officiant.
    #[must_use]
    pub const fn is_sacrament(self) -> bool {
        matches!(self, Self::Baptism | Self::Wedding)
    }
}

impl fmt::Display for ContributionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContributionType {
    type Err = ContributionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "baptism" | "bapteme" => Ok(Self::Baptism),
            "monthly" | "mensuelle" => Ok(Self::Monthly),
            "special_case" | "cas_particulier" => Ok(Self::SpecialCase),
            "wedding" | "mariage" => Ok(Self::Wedding),
            _ => Err(ContributionError::UnknownType(s.to_string())),
        }
    }
}

/// Payment status. Every contribution has exactly one.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ContributionStatus {
    /// Fully paid.
    #[serde(alias = "paye")]
    Paid,
    /// Not paid.
    #[default]
    #[serde(alias = "non_paye")]
    Unpaid,
    /// Partially paid.
    #[serde(alias = "partiel")]
    Partial,
}

impl ContributionStatus {
    /// All statuses.
    pub const ALL: [Self; 3] = [Self::Paid, Self::Unpaid, Self::Partial];

    /// Returns the wire identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Paid => "paid",
            Self::Unpaid => "unpaid",
            Self::Partial => "partial",
        }
    }
}

impl fmt::Display for ContributionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContributionStatus {
    type Err = ContributionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "paid" | "paye" => Ok(Self::Paid),
            "unpaid" | "non_paye" => Ok(Self::Unpaid),
            "partial" | "partiel" => Ok(Self::Partial),
            _ => Err(ContributionError::UnknownStatus(s.to_string())),
        }
    }
}

/// A recorded contribution, as fetched for reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionRecord {
    /// Contribution ID.
    pub id: ContributionId,
    /// Contribution type.
    #[serde(rename = "type")]
    pub contribution_type: ContributionType,
    /// Amount, never negative.
    pub amount: Decimal,
    /// Calendar date of the contribution.
    pub date: NaiveDate,
    /// Contributing member.
    pub member_id: MemberId,
    /// Member full name, joined in by the source.
    #[serde(default)]
    pub member_name: Option<String>,
    /// Payment status.
    pub status: ContributionStatus,
    /// Free-text note.
    #[serde(default)]
    pub note: Option<String>,
    /// Stored officiant. Only meaningful for sacraments; read it through
    /// [`ContributionRecord::display_officiant`].
    #[serde(default)]
    pub officiant: Option<String>,
}

impl ContributionRecord {
    /// Creates a record with no optional fields.
    ///
    /// # Errors
    ///
    /// Returns `NegativeAmount` if `amount` is below zero.
    pub fn new(
        id: ContributionId,
        contribution_type: ContributionType,
        amount: Decimal,
        date: NaiveDate,
        member_id: MemberId,
        status: ContributionStatus,
    ) -> Result<Self, ContributionError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(ContributionError::NegativeAmount { id, amount });
        }

        Ok(Self {
            id,
            contribution_type,
            amount,
            date,
            member_id,
            member_name: None,
            status,
            note: None,
            officiant: None,
        })
    }

    /// Sets the joined member name.
    #[must_use]
    pub fn with_member_name(mut self, name: impl Into<String>) -> Self {
        self.member_name = Some(name.into());
        self
    }

    /// Sets the note.
    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Sets the stored officiant.
    #[must_use]
    pub fn with_officiant(mut self, officiant: impl Into<String>) -> Self {
        self.officiant = Some(officiant.into());
        self
    }

    /// Returns the officiant if this record may show one.
    ///
    /// Only baptisms and weddings have an officiant. For every other type the
    /// stored value is ignored even when present, and blank values count as
    /// absent.
    #[must_use]
    pub fn display_officiant(&self) -> Option<&str> {
        if !self.contribution_type.is_sacrament() {
            return None;
        }
        self.officiant
            .as_deref()
            .filter(|name| !name.trim().is_empty())
    }

    /// Returns the note if it is not blank.
    #[must_use]
    pub fn display_note(&self) -> Option<&str> {
        self.note.as_deref().filter(|note| !note.trim().is_empty())
    }
}
