//! Helpers for working with ADIF field values.
//!
//! - [`format`]: patterns for call signs, dates, times, locators and reports
//! - [`datetime`]: conversion between ADIF and ISO 8601 date/time notation
//! - [`text`]: replacement of non-ASCII characters before ADI export

pub mod datetime;
pub mod error;
pub mod format;
pub mod text;

pub use datetime::{
    adif_date_to_iso, adif_time_to_iso, current_adif_timestamp, format_adif_timestamp,
    iso_date_to_adif, iso_time_to_adif,
};
pub use error::FormatError;
pub use format::{
    ADIF_DATE_REGEX, ADIF_TIME_REGEX, CALL_REGEX, CallParts, ISO_DATE_REGEX, ISO_TIME_REGEX,
    LOCATOR_REGEX, RST_REGEX, check_call, check_format,
};
pub use text::{replace_non_ascii, to_ascii};
