//! Error types for ADX reading and writing.

use std::path::PathBuf;

use thiserror::Error;

/// Errors and validation issues of ADX processing.
#[derive(Debug, Error)]
pub enum AdxError {
    /// The input is not well-formed XML or has no `<ADX>` root.
    #[error("XML syntax error: {message}")]
    XmlSyntax { message: String },

    /// An element that the ADX layout does not define.
    #[error("undefined element <{element}> in <{parent}>")]
    UndefinedElement { element: String, parent: String },

    /// A field value or attribute that is not acceptable.
    #[error("malformed value in \"{field}\": {reason}")]
    MalformedValue { field: String, reason: String },

    /// The document has no `<RECORDS>` element.
    #[error("missing records")]
    MissingRecords,

    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for ADX operations.
pub type Result<T> = std::result::Result<T, AdxError>;

impl AdxError {
    pub fn xml_syntax(message: impl Into<String>) -> Self {
        Self::XmlSyntax {
            message: message.into(),
        }
    }

    pub fn undefined_element(element: impl Into<String>, parent: impl Into<String>) -> Self {
        Self::UndefinedElement {
            element: element.into(),
            parent: parent.into(),
        }
    }

    pub fn malformed_value(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedValue {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl From<quick_xml::Error> for AdxError {
    fn from(err: quick_xml::Error) -> Self {
        match err {
            quick_xml::Error::Io(io) => Self::Io(std::io::Error::new(io.kind(), io.to_string())),
            other => Self::xml_syntax(other.to_string()),
        }
    }
}

impl From<quick_xml::events::attributes::AttrError> for AdxError {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Self::xml_syntax(err.to_string())
    }
}

impl From<quick_xml::escape::EscapeError> for AdxError {
    fn from(err: quick_xml::escape::EscapeError) -> Self {
        Self::xml_syntax(err.to_string())
    }
}

impl From<std::str::Utf8Error> for AdxError {
    fn from(err: std::str::Utf8Error) -> Self {
        Self::xml_syntax(err.to_string())
    }
}
