//! Single-tag codec: `<NAME:LENGTH[:TYPE]>VALUE`.
//!
//! LENGTH counts bytes of VALUE. The value is taken verbatim and may contain
//! `<`, `>`, line breaks or anything else; only the length delimits it.

use std::sync::LazyLock;

use adif_model::{DataTypeCode, FieldContext, INTL_SUFFIX};
use adif_standards::FieldValidator;
use regex::Regex;

use crate::error::{AdiError, Result};

static FIELD_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_]*$").expect("Invalid field name regex"));

/// A decoded tag borrowing from the input buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawTag<'a> {
    /// Field name as written (not yet uppercased).
    pub name: &'a str,
    /// Declared value length in bytes.
    pub length: usize,
    /// Optional datatype indicator.
    pub dtype: Option<&'a str>,
    /// Value bytes, possibly shorter than `length` at end of input.
    pub value: &'a [u8],
}

/// Decode the tag whose `<` is at `start`.
///
/// Returns the tag and the offset just past its value.
pub fn decode_tag(data: &[u8], start: usize) -> Result<(RawTag<'_>, usize)> {
    let rest = &data[start + 1..];
    let close = rest
        .iter()
        .position(|&b| b == b'>')
        .ok_or_else(|| AdiError::tag_definition(truncated(rest), "missing closing '>'"))?;
    let interior = &rest[..close];
    let interior = std::str::from_utf8(interior)
        .map_err(|_| AdiError::tag_definition(interior, "tag is not valid UTF-8"))?;

    let mut parts = interior.split(':');
    let (name, length, dtype) = match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(name), Some(length), dtype, None) => (name, length, dtype),
        _ => {
            return Err(AdiError::tag_definition(
                interior.as_bytes(),
                "expected NAME:LENGTH[:TYPE]",
            ));
        }
    };
    if name.is_empty() {
        return Err(AdiError::tag_definition(
            interior.as_bytes(),
            "empty field name",
        ));
    }
    let length: usize = length.trim().parse().map_err(|_| {
        AdiError::tag_definition(interior.as_bytes(), "length is not a non-negative integer")
    })?;

    let value_start = start + 1 + close + 1;
    let value_end = value_start.saturating_add(length).min(data.len());
    let tag = RawTag {
        name,
        length,
        dtype,
        value: &data[value_start..value_end],
    };
    Ok((tag, value_end))
}

fn truncated(bytes: &[u8]) -> &[u8] {
    &bytes[..bytes.len().min(32)]
}

/// Validation inputs for [`encode_tag`].
#[derive(Debug, Clone, Copy)]
pub struct TagCheck<'a> {
    pub validator: FieldValidator<'a>,
    pub context: FieldContext,
    /// Declared user-defined field names.
    pub userdefs: &'a [String],
}

impl TagCheck<'_> {
    pub fn check(&self, name: &str) -> Result<()> {
        self.validator
            .check(name, self.context, self.userdefs)
            .map_err(AdiError::from)
    }
}

/// Whether `value` only holds printable ASCII, CR and LF.
#[must_use]
pub fn is_adi_ascii(value: &str) -> bool {
    value
        .bytes()
        .all(|b| matches!(b, b' '..=b'~' | b'\n' | b'\r'))
}

/// Encode one field as a tag.
///
/// `_INTL` fields and empty values produce an empty string.
pub fn encode_tag(
    name: &str,
    value: &str,
    dtype: Option<&str>,
    check: Option<&TagCheck<'_>>,
) -> Result<String> {
    if !FIELD_NAME_RE.is_match(name) {
        return Err(AdiError::illegal_parameter(name));
    }
    if let Some(check) = check {
        check.check(name)?;
    }

    let name = name.to_ascii_uppercase();
    if name.ends_with(INTL_SUFFIX) {
        return Ok(String::new());
    }
    if !is_adi_ascii(value) {
        return Err(AdiError::not_ascii(name, value));
    }
    if let Some(dtype) = dtype {
        DataTypeCode::try_from(dtype)
            .map_err(|_| AdiError::illegal_data_type(name.as_str(), dtype))?;
    }
    if value.is_empty() {
        return Ok(String::new());
    }

    Ok(match dtype {
        Some(dtype) => format!("<{name}:{}:{dtype}>{value}", value.len()),
        None => format!("<{name}:{}>{value}", value.len()),
    })
}
