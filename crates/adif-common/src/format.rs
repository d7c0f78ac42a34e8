//! Format patterns for common ADIF field values.

use std::sync::LazyLock;

use regex::Regex;

/// Call sign with optional prefix (`HB9/`) and short suffix (`/P`, `/MM`).
pub static CALL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^([A-Z0-9]{1,4}/)?([0-9]?[A-Z]{1,2}[0-9][A-Z]{1,4})(/[A-Z0-9]{1,2})?$")
        .expect("Invalid call sign regex")
});

/// ADIF date `YYYYMMDD`.
pub static ADIF_DATE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{4}(0[1-9]|1[0-2])(0[1-9]|[12]\d|3[01])$").expect("Invalid ADIF date regex")
});

/// ADIF time `HHMM` or `HHMMSS`.
pub static ADIF_TIME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([01]\d|2[0-3])[0-5]\d([0-5]\d)?$").expect("Invalid ADIF time regex")
});

/// ISO 8601 date `YYYY-MM-DD`.
pub static ISO_DATE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{4}-(0[1-9]|1[0-2])-(0[1-9]|[12]\d|3[01])$").expect("Invalid ISO date regex")
});

/// ISO 8601 time `HH:MM` or `HH:MM:SS`.
pub static ISO_TIME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([01]\d|2[0-3]):[0-5]\d(:[0-5]\d)?$").expect("Invalid ISO time regex")
});

/// Maidenhead locator with 4, 6 or 8 characters.
pub static LOCATOR_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[A-R]{2}\d{2}([A-X]{2}(\d{2})?)?$").expect("Invalid locator regex")
});

/// Signal report: RS(T) with optional mode letter, or a signed digital-mode dB value.
pub static RST_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([1-5][1-9]([1-9][A-Za-z]?)?|[+-]\d{1,2})$").expect("Invalid RST regex")
});

/// Whether `text` matches `pattern`.
#[must_use]
pub fn check_format(pattern: &Regex, text: &str) -> bool {
    pattern.is_match(text)
}

/// A call sign split into its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallParts<'a> {
    /// Prefix including the trailing slash, e.g. `HB9/`.
    pub prefix: Option<&'a str>,
    /// Base call sign, uppercased.
    pub call: String,
    /// Suffix including the leading slash, e.g. `/P`.
    pub suffix: Option<&'a str>,
}

/// Split a call sign into prefix, base call and suffix.
///
/// Returns `None` when `text` is not a valid call sign.
#[must_use]
pub fn check_call(text: &str) -> Option<CallParts<'_>> {
    let caps = CALL_REGEX.captures(text)?;
    Some(CallParts {
        prefix: caps.get(1).as_ref().map(regex::Match::as_str),
        call: caps.get(2)?.as_str().to_uppercase(),
        suffix: caps.get(3).as_ref().map(regex::Match::as_str),
    })
}
