//! Cell and heading formatting shared by every report shape.

use chrono::NaiveDate;
use dues_shared::types::{format_display_date, parse_iso_date};

use crate::contribution::{ContributionRecord, ContributionStatus, ContributionType, MemberStatus};

/// Shown for a missing optional field.
pub const PLACEHOLDER: &str = "-";

/// Shown for missing member details.
pub const NOT_AVAILABLE: &str = "N/A";

/// Type label used in headings and most tables.
#[must_use]
pub const fn type_label(contribution_type: ContributionType) -> &'static str {
    match contribution_type {
        ContributionType::Monthly => "Mensuelle",
        ContributionType::Baptism => "Baptême",
        ContributionType::Wedding => "Mariage",
        ContributionType::SpecialCase => "Cas part.",
    }
}

/// Abbreviated type label for narrow columns.
#[must_use]
pub const fn short_type_label(contribution_type: ContributionType) -> &'static str {
    match contribution_type {
        ContributionType::Monthly => "Mens.",
        ContributionType::Baptism => "Bapt.",
        ContributionType::Wedding => "Mariage",
        ContributionType::SpecialCase => "Cas part.",
    }
}

/// Payment status label.
#[must_use]
pub const fn status_label(status: ContributionStatus) -> &'static str {
    match status {
        ContributionStatus::Paid => "Payé",
        ContributionStatus::Unpaid => "Non payé",
        ContributionStatus::Partial => "Partiel",
    }
}

/// Member status label.
#[must_use]
pub const fn member_status_label(status: MemberStatus) -> &'static str {
    match status {
        MemberStatus::Active => "Actif",
        MemberStatus::Inactive => "Inactif",
    }
}

/// `DD/MM/YYYY`.
#[must_use]
pub fn display_date(date: NaiveDate) -> String {
    format_display_date(date)
}

/// `DD/MM/YYYY`, or `N/A` when absent.
#[must_use]
pub fn optional_date(date: Option<NaiveDate>) -> String {
    date.map_or_else(|| NOT_AVAILABLE.to_string(), format_display_date)
}

/// Officiant cell: the stored name for sacraments, the placeholder otherwise.
#[must_use]
pub fn officiant_cell(record: &ContributionRecord) -> String {
    record
        .display_officiant()
        .unwrap_or(PLACEHOLDER)
        .to_string()
}

/// Note cell: the note, or the placeholder when blank.
#[must_use]
pub fn note_cell(record: &ContributionRecord) -> String {
    record.display_note().unwrap_or(PLACEHOLDER).to_string()
}

/// Table cell for optional text: the text, or the placeholder when blank.
#[must_use]
pub fn text_cell(value: Option<&str>) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or(PLACEHOLDER)
        .to_string()
}

/// Table cell for an optional date: `DD/MM/YYYY`, or the placeholder.
#[must_use]
pub fn date_cell(date: Option<NaiveDate>) -> String {
    date.map_or_else(|| PLACEHOLDER.to_string(), format_display_date)
}

/// Optional text, or `N/A` when absent or blank.
#[must_use]
pub fn or_not_available(value: Option<&str>) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or(NOT_AVAILABLE)
        .to_string()
}

/// Rewrites a `start au end` period label with display dates.
///
/// Labels that are not two ISO dates joined by ` au ` are returned verbatim.
#[must_use]
pub fn format_period_label(label: &str) -> String {
    let mut parts = label.split(" au ");
    if let (Some(start), Some(end), None) = (parts.next(), parts.next(), parts.next()) {
        if let (Ok(start), Ok(end)) = (parse_iso_date(start), parse_iso_date(end)) {
            return period_label(start, end);
        }
    }
    label.to_string()
}

/// `DD/MM/YYYY au DD/MM/YYYY`.
#[must_use]
pub fn period_label(start: NaiveDate, end: NaiveDate) -> String {
    format!("{} au {}", format_display_date(start), format_display_date(end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use dues_shared::types::{ContributionId, MemberId};
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case("2024-01-01 au 2024-01-31", "01/01/2024 au 31/01/2024")]
    #[case("2023-12-15 au 2024-01-14", "15/12/2023 au 14/01/2024")]
    #[case("Janvier 2024", "Janvier 2024")]
    #[case("2024-01-01 au hier", "2024-01-01 au hier")]
    #[case("2024-01-01 au 2024-01-31 au 2024-02-28", "2024-01-01 au 2024-01-31 au 2024-02-28")]
    fn test_format_period_label(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(format_period_label(input), expected);
    }

    #[test]
    fn test_labels() {
        assert_eq!(type_label(ContributionType::Baptism), "Baptême");
        assert_eq!(short_type_label(ContributionType::Monthly), "Mens.");
        assert_eq!(status_label(ContributionStatus::Unpaid), "Non payé");
        assert_eq!(member_status_label(MemberStatus::Inactive), "Inactif");
    }

    #[test]
    fn test_officiant_cell_guards_non_sacraments() {
        let anomaly = ContributionRecord::new(
            ContributionId::new(1),
            ContributionType::SpecialCase,
            dec!(10000),
            NaiveDate::from_ymd_opt(2024, 3, 2).unwrap(),
            MemberId::new(1),
            ContributionStatus::Paid,
        )
        .unwrap()
        .with_officiant("Fr. Diallo");
        assert_eq!(officiant_cell(&anomaly), PLACEHOLDER);
        assert_eq!(note_cell(&anomaly), PLACEHOLDER);

        let mut wedding = anomaly.clone();
        wedding.contribution_type = ContributionType::Wedding;
        assert_eq!(officiant_cell(&wedding), "Fr. Diallo");
    }

    #[test]
    fn test_optional_fields() {
        assert_eq!(optional_date(None), NOT_AVAILABLE);
        assert_eq!(
            optional_date(NaiveDate::from_ymd_opt(2020, 6, 1)),
            "01/06/2020"
        );
        assert_eq!(or_not_available(Some("  ")), NOT_AVAILABLE);
        assert_eq!(or_not_available(Some("Trésorier")), "Trésorier");
    }

    #[test]
    fn test_optional_cells_use_placeholder() {
        assert_eq!(text_cell(None), PLACEHOLDER);
        assert_eq!(text_cell(Some(" \t")), PLACEHOLDER);
        assert_eq!(text_cell(Some("620 00 00 01")), "620 00 00 01");
        assert_eq!(date_cell(None), PLACEHOLDER);
        assert_eq!(date_cell(NaiveDate::from_ymd_opt(2021, 9, 12)), "12/09/2021");
    }
}
