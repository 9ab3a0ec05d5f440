//! Record filters.
//!
//! A contribution passes a [`ContributionFilter`] iff every supplied
//! constraint matches. [`FilterParams`] is the wire form used by callers and
//! is the one interface whose field names must stay stable.

use chrono::{Datelike, NaiveDate};
use dues_shared::types::{MemberId, parse_iso_date};
use serde::{Deserialize, Serialize};

use super::error::ContributionError;
use super::member::{MemberRecord, MemberStatus};
use super::types::{ContributionRecord, ContributionStatus, ContributionType};

/// Typed filter over contribution records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionFilter {
    /// Only this member's contributions.
    pub member_id: Option<MemberId>,
    /// Only this type.
    pub contribution_type: Option<ContributionType>,
    /// Only this status.
    pub status: Option<ContributionStatus>,
    /// Only this officiant, compared trimmed and case-insensitively.
    pub officiant: Option<String>,
    /// Inclusive lower bound.
    pub date_start: Option<NaiveDate>,
    /// Inclusive upper bound.
    pub date_end: Option<NaiveDate>,
}

impl ContributionFilter {
    /// Creates a new empty filter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts to one member.
    #[must_use]
    pub const fn with_member(mut self, member_id: MemberId) -> Self {
        self.member_id = Some(member_id);
        self
    }

    /// Restricts to one type.
    #[must_use]
    pub const fn with_type(mut self, contribution_type: ContributionType) -> Self {
        self.contribution_type = Some(contribution_type);
        self
    }

    /// Restricts to one status.
    #[must_use]
    pub const fn with_status(mut self, status: ContributionStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Restricts to one officiant. Blank input clears the constraint.
    #[must_use]
    pub fn with_officiant(mut self, officiant: impl AsRef<str>) -> Self {
        let trimmed = officiant.as_ref().trim();
        self.officiant = (!trimmed.is_empty()).then(|| trimmed.to_string());
        self
    }

    /// Sets the inclusive start date.
    #[must_use]
    pub const fn with_date_start(mut self, date: NaiveDate) -> Self {
        self.date_start = Some(date);
        self
    }

    /// Sets the inclusive end date.
    #[must_use]
    pub const fn with_date_end(mut self, date: NaiveDate) -> Self {
        self.date_end = Some(date);
        self
    }

    /// Sets both bounds of the date range.
    #[must_use]
    pub const fn with_range(self, start: NaiveDate, end: NaiveDate) -> Self {
        self.with_date_start(start).with_date_end(end)
    }

    /// Returns true if the filter is empty (matches everything).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Returns true if `record` satisfies every supplied constraint.
    #[must_use]
    pub fn matches(&self, record: &ContributionRecord) -> bool {
        if self.member_id.is_some_and(|id| id != record.member_id) {
            return false;
        }
        if self
            .contribution_type
            .is_some_and(|t| t != record.contribution_type)
        {
            return false;
        }
        if self.status.is_some_and(|s| s != record.status) {
            return false;
        }
        if self.date_start.is_some_and(|start| record.date < start) {
            return false;
        }
        if self.date_end.is_some_and(|end| record.date > end) {
            return false;
        }
        match &self.officiant {
            Some(wanted) => record
                .officiant
                .as_deref()
                .is_some_and(|stored| same_officiant(stored, wanted)),
            None => true,
        }
    }

    /// Iterates over the records that pass the filter.
    pub fn apply<'a>(
        &'a self,
        records: &'a [ContributionRecord],
    ) -> impl Iterator<Item = &'a ContributionRecord> + 'a {
        records.iter().filter(move |record| self.matches(record))
    }
}

/// Compares officiant names ignoring case and surrounding whitespace.
fn same_officiant(stored: &str, wanted: &str) -> bool {
    let stored = stored.trim();
    !stored.is_empty() && stored.to_lowercase() == wanted.trim().to_lowercase()
}

/// Wire form of a contribution filter.
///
/// Every field is optional and blank values count as absent. The legacy
/// parameter names (`membre_id`, `statut`, `celebrant`, `date_debut`) are
/// accepted as aliases.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterParams {
    /// Member id.
    #[serde(default, alias = "membre_id")]
    pub member_id: Option<String>,
    /// Contribution type.
    #[serde(default, rename = "type")]
    pub contribution_type: Option<String>,
    /// Payment status.
    #[serde(default, alias = "statut")]
    pub status: Option<String>,
    /// Officiant name.
    #[serde(default, alias = "celebrant")]
    pub officiant: Option<String>,
    /// Inclusive start date, `YYYY-MM-DD`.
    #[serde(default, alias = "date_debut")]
    pub date_start: Option<String>,
    /// Inclusive end date, `YYYY-MM-DD`.
    #[serde(default)]
    pub date_fin: Option<String>,
}

impl FilterParams {
    /// Parses the wire form into a typed filter.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a non-ISO date, an unknown type or
    /// status, or a non-integer member id.
    pub fn parse(&self) -> Result<ContributionFilter, ContributionError> {
        let mut filter = ContributionFilter::new();

        if let Some(raw) = present(self.member_id.as_deref()) {
            let id = raw
                .parse::<MemberId>()
                .map_err(|_| ContributionError::InvalidMemberId(raw.to_string()))?;
            filter = filter.with_member(id);
        }
        if let Some(raw) = present(self.contribution_type.as_deref()) {
            filter = filter.with_type(raw.parse()?);
        }
        if let Some(raw) = present(self.status.as_deref()) {
            filter = filter.with_status(raw.parse()?);
        }
        if let Some(raw) = present(self.officiant.as_deref()) {
            filter = filter.with_officiant(raw);
        }
        if let Some(raw) = present(self.date_start.as_deref()) {
            filter = filter.with_date_start(parse_date("date_start", raw)?);
        }
        if let Some(raw) = present(self.date_fin.as_deref()) {
            filter = filter.with_date_end(parse_date("date_fin", raw)?);
        }

        Ok(filter)
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Parses a named ISO date parameter.
///
/// # Errors
///
/// Returns `InvalidDate` naming the field when the value is not ISO-8601.
pub fn parse_date(field: &'static str, raw: &str) -> Result<NaiveDate, ContributionError> {
    parse_iso_date(raw).map_err(|_| ContributionError::InvalidDate {
        field,
        value: raw.to_string(),
    })
}

/// Filter over members.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberFilter {
    /// Only members with this status.
    pub status: Option<MemberStatus>,
    /// Case-insensitive substring of the full name or phone.
    pub search: Option<String>,
}

impl MemberFilter {
    /// Creates a new empty filter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts to one status.
    #[must_use]
    pub const fn with_status(mut self, status: MemberStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Restricts to names or phones containing `term`. Blank input clears it.
    #[must_use]
    pub fn with_search(mut self, term: impl AsRef<str>) -> Self {
        let trimmed = term.as_ref().trim();
        self.search = (!trimmed.is_empty()).then(|| trimmed.to_string());
        self
    }

    /// Builds a filter from raw query values.
    ///
    /// # Errors
    ///
    /// Returns `UnknownMemberStatus` for an unrecognized status.
    pub fn from_params(
        status: Option<&str>,
        search: Option<&str>,
    ) -> Result<Self, ContributionError> {
        let mut filter = Self::new();
        if let Some(raw) = present(status) {
            filter = filter.with_status(raw.parse()?);
        }
        if let Some(raw) = present(search) {
            filter = filter.with_search(raw);
        }
        Ok(filter)
    }

    /// Returns true if `member` satisfies the filter.
    #[must_use]
    pub fn matches(&self, member: &MemberRecord) -> bool {
        if self.status.is_some_and(|s| s != member.status) {
            return false;
        }
        match &self.search {
            Some(term) => {
                let term = term.to_lowercase();
                member.full_name.to_lowercase().contains(&term)
                    || member
                        .phone
                        .as_deref()
                        .is_some_and(|phone| phone.to_lowercase().contains(&term))
            }
            None => true,
        }
    }
}

/// Preset statistics windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatsPeriod {
    /// From the first day of the current month.
    Month,
    /// From the first day of the current year.
    Year,
}

impl StatsPeriod {
    /// Returns the inclusive range ending on `today`.
    ///
    /// The window never reaches back into a previous year, January included.
    #[must_use]
    pub fn range(self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        let start = match self {
            Self::Month => today.with_day(1),
            Self::Year => NaiveDate::from_ymd_opt(today.year(), 1, 1),
        };
        (start.unwrap_or(today), today)
    }
}

impl std::str::FromStr for StatsPeriod {
    type Err = ContributionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "month" | "mois" => Ok(Self::Month),
            "year" | "annee" => Ok(Self::Year),
            _ => Err(ContributionError::UnknownPeriod(s.to_string())),
        }
    }
}
