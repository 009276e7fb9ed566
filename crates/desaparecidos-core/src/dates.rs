//! Parsing and display of the API's date strings.
//!
//! The API mixes plain dates (`2025-09-01`), local timestamps
//! (`2025-09-01T14:30:00`, optionally with fractional seconds) and RFC 3339
//! timestamps. All of them reduce to a `NaiveDateTime` for ordering.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Parse any date shape the API emits. Returns `None` for anything else.
pub fn parse_api_date(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt);
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Format an API date as `dd/mm/yyyy`, leaving unparseable input as-is.
pub fn format_br(s: &str) -> String {
    match parse_api_date(s) {
        Some(dt) => dt.format("%d/%m/%Y").to_string(),
        None => s.to_string(),
    }
}

/// Date-only ISO form sent to the write endpoint.
pub fn iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
