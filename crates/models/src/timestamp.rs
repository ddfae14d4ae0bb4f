use chrono::{DateTime, NaiveDate, Utc};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref ISO_DATE_TIME: Regex =
        Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}(\.\d{1,9})?(Z|[+-]\d{2}:\d{2})$")
            .unwrap();
    static ref ISO_DATE: Regex = Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap();
}

/// Parses a strict ISO-8601 date-time string (with offset) into UTC
///
/// # Examples
/// `2024-09-02T08:00:00Z`, `2024-09-02T10:00:00.000+02:00`
///
/// # Returns
/// `None` if the string does not match the expected format or is not a real instant
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if !ISO_DATE_TIME.is_match(value) {
        return None;
    }

    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Parses a calendar day from either `YYYY-MM-DD` or a full ISO-8601 date-time,
/// in which case the UTC date is taken
pub fn parse_day(value: &str) -> Option<NaiveDate> {
    if ISO_DATE.is_match(value) {
        return NaiveDate::parse_from_str(value, "%Y-%m-%d").ok();
    }

    parse_timestamp(value).map(|dt| dt.date_naive())
}
