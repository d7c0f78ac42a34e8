//! ADIF and ISO 8601 date/time notation.

use chrono::{NaiveDateTime, Utc};

use crate::error::FormatError;
use crate::format::{ADIF_DATE_REGEX, ADIF_TIME_REGEX, ISO_DATE_REGEX, ISO_TIME_REGEX};

/// Timestamp layout of `CREATED_TIMESTAMP`.
pub const ADIF_TIMESTAMP_FORMAT: &str = "%Y%m%d %H%M%S";

/// Format a timestamp the way `CREATED_TIMESTAMP` expects it.
#[must_use]
pub fn format_adif_timestamp(datetime: &NaiveDateTime) -> String {
    datetime.format(ADIF_TIMESTAMP_FORMAT).to_string()
}

/// Current UTC time as an ADIF timestamp.
#[must_use]
pub fn current_adif_timestamp() -> String {
    format_adif_timestamp(&Utc::now().naive_utc())
}

/// `YYYYMMDD` to `YYYY-MM-DD`.
pub fn adif_date_to_iso(date: &str) -> Result<String, FormatError> {
    if !ADIF_DATE_REGEX.is_match(date) {
        return Err(FormatError::new(date, "ADIF date"));
    }
    Ok(format!("{}-{}-{}", &date[..4], &date[4..6], &date[6..]))
}

/// `HHMM[SS]` to `HH:MM[:SS]`.
pub fn adif_time_to_iso(time: &str) -> Result<String, FormatError> {
    if !ADIF_TIME_REGEX.is_match(time) {
        return Err(FormatError::new(time, "ADIF time"));
    }
    let mut out = format!("{}:{}", &time[..2], &time[2..4]);
    if time.len() == 6 {
        out.push(':');
        out.push_str(&time[4..]);
    }
    Ok(out)
}

/// `YYYY-MM-DD` to `YYYYMMDD`.
pub fn iso_date_to_adif(date: &str) -> Result<String, FormatError> {
    if !ISO_DATE_REGEX.is_match(date) {
        return Err(FormatError::new(date, "ISO date"));
    }
    Ok(date.replace('-', ""))
}

/// `HH:MM[:SS]` to `HHMM[SS]`.
pub fn iso_time_to_adif(time: &str) -> Result<String, FormatError> {
    if !ISO_TIME_REGEX.is_match(time) {
        return Err(FormatError::new(time, "ISO time"));
    }
    Ok(time.replace(':', ""))
}
