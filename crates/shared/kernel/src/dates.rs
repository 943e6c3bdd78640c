//! Client-supplied calendar dates and wall-clock times.
//!
//! Clients may send full timestamps; only the leading `YYYY-MM-DD` or `HH:MM` part is read.
//! Stored values use the same formats, so string order equals chronological order.

use crate::server::error::ApiError;
use chrono::{NaiveDate, NaiveTime};

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M";

/// Parses the first ten characters of `raw` as a `YYYY-MM-DD` date.
///
/// # Errors
/// Returns [`ApiError::BadRequest`] naming `field` when the prefix is not a valid date.
pub fn parse_date(field: &str, raw: &str) -> Result<NaiveDate, ApiError> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(prefix(raw, 10), DATE_FORMAT).map_err(|_| {
        ApiError::bad_request(format!("Invalid '{field}' value '{raw}', expected YYYY-MM-DD"))
    })
}

/// Parses the first five characters of `raw` as an `HH:MM` time.
///
/// # Errors
/// Returns [`ApiError::BadRequest`] naming `field` when the prefix is not a valid time.
pub fn parse_time(field: &str, raw: &str) -> Result<NaiveTime, ApiError> {
    let raw = raw.trim();
    NaiveTime::parse_from_str(prefix(raw, 5), TIME_FORMAT)
        .map_err(|_| ApiError::bad_request(format!("Invalid '{field}' value '{raw}', expected HH:MM")))
}

#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

#[must_use]
pub fn format_time(time: NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}

fn prefix(raw: &str, len: usize) -> &str {
    raw.get(..len).unwrap_or(raw)
}
