//! Tolerant timestamp parsing
//!
//! Timestamp cells hold whatever the sheet produced over time: serial
//! dates, RFC 3339 strings written by the server, or text typed by hand.
//! Anything unreadable becomes `None` and is reported as `null`.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::sheets::{CellValue, Record};

/// Serial number of 1970-01-01 in the spreadsheet date system
const UNIX_EPOCH_SERIAL: f64 = 25569.0;
const SECONDS_PER_DAY: f64 = 86400.0;

/// Columns consulted, in order, for a row's creation time
pub const CREATED_FIELDS: [&str; 4] = ["created_at", "createdAt", "Date", "date"];
/// Columns consulted, in order, for a row's last update time
pub const UPDATED_FIELDS: [&str; 2] = ["updated_at", "updatedAt"];

const NAIVE_DATETIME_FORMATS: [&str; 7] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y. %m. %d %H:%M:%S",
    "%Y.%m.%d %H:%M:%S",
];

const NAIVE_DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%Y. %m. %d", "%Y.%m.%d"];

/// Serial date (days since 1899-12-30, fractional) to UTC
pub fn from_serial(serial: f64) -> Option<DateTime<Utc>> {
    if !serial.is_finite() {
        return None;
    }
    let millis = ((serial - UNIX_EPOCH_SERIAL) * SECONDS_PER_DAY * 1000.0).round();
    DateTime::from_timestamp_millis(millis as i64)
}

/// Parse a timestamp cell; `None` for empty or unreadable values
pub fn parse_timestamp(cell: &CellValue) -> Option<DateTime<Utc>> {
    match cell {
        CellValue::Number(n) if *n != 0.0 => from_serial(*n),
        CellValue::Text(s) | CellValue::Link { text: s, .. } => parse_text(s),
        _ => None,
    }
}

fn parse_text(raw: &str) -> Option<DateTime<Utc>> {
    let text = raw.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(n) = text.parse::<f64>() {
        return if n > UNIX_EPOCH_SERIAL {
            from_serial(n)
        } else {
            None
        };
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(text) {
        return Some(dt.with_timezone(&Utc));
    }
    // "Wed May 01 2024 09:30:00 GMT+0900 (Korean Standard Time)"
    let without_zone_name = text.split(" (").next().unwrap_or(text);
    if let Ok(dt) = DateTime::parse_from_str(without_zone_name, "%a %b %d %Y %H:%M:%S GMT%z") {
        return Some(dt.with_timezone(&Utc));
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(naive.and_utc());
        }
    }
    for format in NAIVE_DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
        }
    }
    None
}

/// ISO 8601 text of the first readable timestamp among `fields`
///
/// The first non-empty column decides; later columns are not consulted
/// when it fails to parse.
pub fn iso_from_fields(record: &Record<'_>, fields: &[&str]) -> Option<String> {
    parse_timestamp(record.first_present(fields)).map(|ts| shared::util::to_iso(&ts))
}

/// Creation time of a row as ISO 8601
pub fn created_iso(record: &Record<'_>) -> Option<String> {
    iso_from_fields(record, &CREATED_FIELDS)
}

/// Update time of a row as ISO 8601
pub fn updated_iso(record: &Record<'_>) -> Option<String> {
    iso_from_fields(record, &UPDATED_FIELDS)
}
