// src/domain/dates.rs

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

const DAY_FORMAT: &str = "%Y-%m-%d";

/// Parses a calendar day out of a `YYYY-MM-DD` string or an ISO-8601
/// timestamp. Timestamps carrying an offset are converted to UTC before
/// truncation; timestamps without one are truncated as written.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();

    if let Ok(day) = NaiveDate::parse_from_str(raw, DAY_FORMAT) {
        return Some(day);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc).date_naive());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|ts| ts.date())
}

/// Canonical `YYYY-MM-DD` form. Blank input maps to an empty string,
/// anything unparseable to `None`.
pub fn normalize_date(raw: &str) -> Option<String> {
    if raw.trim().is_empty() {
        return Some(String::new());
    }
    parse_date(raw).map(format_date)
}

pub fn format_date(day: NaiveDate) -> String {
    day.format(DAY_FORMAT).to_string()
}

pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}
