//! Date helper functions

use chrono::NaiveDate;

/// Parse the date part of a stored timestamp.
///
/// Accepts `YYYY-MM-DD` optionally followed by a time, as SQLite's
/// `CURRENT_TIMESTAMP` and ISO 8601 values are.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let date = value.trim().get(..10)?;
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}

/// Format date in full format (like "March 12, 2024")
pub fn long_date(date: &NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Format date in short format (like "Mar 12, 2024")
pub fn short_date(date: &NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Reformat a stored date with a named style, `long` or `short`.
/// Unparseable input is returned unchanged.
pub fn format_stored_date(value: &str, style: &str) -> String {
    match parse_date(value) {
        Some(date) if style == "short" => short_date(&date),
        Some(date) => long_date(&date),
        None => value.to_string(),
    }
}
