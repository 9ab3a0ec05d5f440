//! Suggested download file names.
//!
//! `stamp` is a Unix timestamp in milliseconds, supplied by the caller.

use chrono::NaiveDate;
use dues_shared::types::MemberId;

use crate::contribution::ContributionType;

/// `rapport_mensuel_<start>_<end>.pdf`, dates in ISO form.
#[must_use]
pub fn monthly_file_name(start: NaiveDate, end: NaiveDate) -> String {
    format!("rapport_mensuel_{start}_{end}.pdf")
}

/// `rapport_membre_<id>_<stamp>.pdf`.
#[must_use]
pub fn member_file_name(member_id: MemberId, stamp: i64) -> String {
    format!("rapport_membre_{member_id}_{stamp}.pdf")
}

/// `rapport_<type>_<stamp>.pdf`.
#[must_use]
pub fn event_file_name(contribution_type: ContributionType, stamp: i64) -> String {
    format!("rapport_{contribution_type}_{stamp}.pdf")
}

/// `liste_membres_<stamp>.pdf`.
#[must_use]
pub fn members_file_name(stamp: i64) -> String {
    format!("liste_membres_{stamp}.pdf")
}

/// `liste_cotisations_<stamp>.pdf`.
#[must_use]
pub fn contributions_file_name(stamp: i64) -> String {
    format!("liste_cotisations_{stamp}.pdf")
}
