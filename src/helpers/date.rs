//! Date helper functions

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Formats accepted for post dates, tried in order
const DATE_FORMATS: [&str; 8] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y/%m/%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d",
    "%Y/%m/%d",
];

/// Parse a post date string in one of the accepted formats
///
/// Offsets in RFC 3339 input are dropped; the wall-clock time is kept.
pub fn parse_date_string(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }

    for fmt in DATE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }

    None
}

/// Format a date like "January 5, 2024"
pub fn long_date(date: &NaiveDateTime) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Format a date as ISO 8601 (YYYY-MM-DD)
pub fn iso_date(date: &NaiveDateTime) -> String {
    date.format("%Y-%m-%d").to_string()
}
