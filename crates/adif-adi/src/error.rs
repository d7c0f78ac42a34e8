//! Error types for ADI encoding and decoding.

use std::path::PathBuf;

use adif_model::FieldContext;
use adif_standards::IllegalField;
use thiserror::Error;

use crate::types::Encoding;

/// Errors that can occur when reading or writing ADI data.
#[derive(Debug, Error)]
pub enum AdiError {
    /// More than one end-of-header marker.
    #[error("found {count} end-of-header markers, expected at most one")]
    TooManyHeaders { count: usize },

    /// Malformed tag definition (`<NAME:LENGTH[:TYPE]>`).
    #[error("invalid tag definition <{tag}>: {reason}")]
    TagDefinition { tag: String, reason: &'static str },

    /// Value contains characters outside printable ASCII plus CR/LF.
    #[error("value \"{value}\" in field \"{field}\" contains non ASCII characters")]
    StringNotAscii { field: String, value: String },

    /// Field name contains characters not allowed in a tag name.
    #[error("field name \"{name}\" contains not allowed characters")]
    IllegalParameter { name: String },

    /// Datatype indicator outside the fixed set.
    #[error("datatype \"{dtype}\" in field \"{field}\" is not allowed")]
    IllegalDataType { field: String, dtype: String },

    /// Field name not allowed in its context.
    #[error("field \"{field}\" is not allowed in {context}")]
    IllegalFieldName { field: String, context: FieldContext },

    /// Value bytes cannot be decoded with the selected encoding.
    #[error("value of field \"{field}\" is not valid {encoding}")]
    InvalidEncoding { field: String, encoding: Encoding },

    /// Output text cannot be represented in the selected encoding.
    #[error("output contains characters not representable in {encoding}")]
    Unencodable { encoding: Encoding },

    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for ADI operations.
pub type Result<T> = std::result::Result<T, AdiError>;

impl AdiError {
    /// Create a TagDefinition error.
    pub fn tag_definition(tag: &[u8], reason: &'static str) -> Self {
        Self::TagDefinition {
            tag: String::from_utf8_lossy(tag).into_owned(),
            reason,
        }
    }

    /// Create a StringNotAscii error.
    pub fn not_ascii(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::StringNotAscii {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Create an IllegalParameter error.
    pub fn illegal_parameter(name: impl Into<String>) -> Self {
        Self::IllegalParameter { name: name.into() }
    }

    /// Create an IllegalDataType error.
    pub fn illegal_data_type(field: impl Into<String>, dtype: impl Into<String>) -> Self {
        Self::IllegalDataType {
            field: field.into(),
            dtype: dtype.into(),
        }
    }

    /// Create an InvalidEncoding error.
    pub fn invalid_encoding(field: impl Into<String>, encoding: Encoding) -> Self {
        Self::InvalidEncoding {
            field: field.into(),
            encoding,
        }
    }

    /// Whether this is a structural error (the input is not well-formed ADI).
    #[must_use]
    pub fn is_structural(&self) -> bool {
        matches!(self, Self::TooManyHeaders { .. } | Self::TagDefinition { .. })
    }
}

impl From<IllegalField> for AdiError {
    fn from(err: IllegalField) -> Self {
        Self::IllegalFieldName {
            field: err.field,
            context: err.context,
        }
    }
}
