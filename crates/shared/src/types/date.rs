//! Calendar date parsing and display.
//!
//! Dates travel as ISO-8601 (`YYYY-MM-DD`) and are shown as `DD/MM/YYYY`.

use chrono::NaiveDate;

/// ISO-8601 calendar date format.
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Display format used in reports.
pub const DISPLAY_DATE_FORMAT: &str = "%d/%m/%Y";

/// Parses an ISO-8601 calendar date.
///
/// Surrounding whitespace is ignored. A trailing time part
/// (`2024-01-05T10:00:00`) is accepted and dropped.
///
/// # Errors
///
/// Returns the chrono parse error when the input is not a valid date.
pub fn parse_iso_date(input: &str) -> Result<NaiveDate, chrono::ParseError> {
    let trimmed = input.trim();
    let date_part = trimmed.split_once('T').map_or(trimmed, |(date, _)| date);
    NaiveDate::parse_from_str(date_part, ISO_DATE_FORMAT)
}

/// Formats a date as `DD/MM/YYYY`.
#[must_use]
pub fn format_display_date(date: NaiveDate) -> String {
    date.format(DISPLAY_DATE_FORMAT).to_string()
}
