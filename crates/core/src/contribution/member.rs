//! Member types.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use dues_shared::types::MemberId;
use serde::{Deserialize, Serialize};

use super::error::ContributionError;

/// Membership status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberStatus {
    /// Active member.
    #[default]
    #[serde(alias = "actif")]
    Active,
    /// Inactive (soft-deleted) member.
    #[serde(alias = "inactif")]
    Inactive,
}

impl MemberStatus {
    /// Returns the wire identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

impl fmt::Display for MemberStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MemberStatus {
    type Err = ContributionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "active" | "actif" => Ok(Self::Active),
            "inactive" | "inactif" => Ok(Self::Inactive),
            _ => Err(ContributionError::UnknownMemberStatus(s.to_string())),
        }
    }
}

/// A member of the association.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberRecord {
    /// Member ID.
    pub id: MemberId,
    /// Full name.
    pub full_name: String,
    /// Phone number.
    #[serde(default)]
    pub phone: Option<String>,
    /// Role within the association (treasurer, secretary, ...).
    #[serde(default)]
    pub role: Option<String>,
    /// Date the member joined.
    #[serde(default)]
    pub membership_date: Option<NaiveDate>,
    /// Membership status.
    #[serde(default)]
    pub status: MemberStatus,
}

impl MemberRecord {
    /// Creates an active member with no optional fields.
    #[must_use]
    pub fn new(id: MemberId, full_name: impl Into<String>) -> Self {
        Self {
            id,
            full_name: full_name.into(),
            phone: None,
            role: None,
            membership_date: None,
            status: MemberStatus::Active,
        }
    }

    /// Sets the phone number.
    #[must_use]
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Sets the role.
    #[must_use]
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    /// Sets the membership date.
    #[must_use]
    pub const fn with_membership_date(mut self, date: NaiveDate) -> Self {
        self.membership_date = Some(date);
        self
    }

    /// Sets the status.
    #[must_use]
    pub const fn with_status(mut self, status: MemberStatus) -> Self {
        self.status = status;
        self
    }

    /// Returns true if the member is active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == MemberStatus::Active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_status_from_str() {
        assert_eq!("actif".parse::<MemberStatus>().unwrap(), MemberStatus::Active);
        assert_eq!("Inactive".parse::<MemberStatus>().unwrap(), MemberStatus::Inactive);
        assert!("retired".parse::<MemberStatus>().is_err());
    }

    #[test]
    fn test_member_defaults_to_active() {
        let member = MemberRecord::new(MemberId::new(1), "Aminata Camara");
        assert!(member.is_active());
        assert!(member.phone.is_none());

        let gone = member.with_status(MemberStatus::Inactive);
        assert!(!gone.is_active());
    }
}
