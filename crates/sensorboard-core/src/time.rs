//! Timestamp formatting for tables and export files

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};

/// Display format used in tables and exported sheets
pub const DISPLAY_FORMAT: &str = "%d-%m-%Y %H:%M";

/// Format an API timestamp for display in local time
///
/// Values that are not RFC 3339 (or `YYYY-MM-DD HH:MM:SS`) are returned as-is.
pub fn format_timestamp(value: &str) -> String {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return parsed.with_timezone(&Local).format(DISPLAY_FORMAT).to_string();
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S") {
        return parsed.format(DISPLAY_FORMAT).to_string();
    }
    value.to_string()
}

/// Date part of export file names (`DD-MM-YYYY`)
pub fn file_date(date: NaiveDate) -> String {
    date.format("%d-%m-%Y").to_string()
}
