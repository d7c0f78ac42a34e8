//! Error types for the ADIF data model.

use thiserror::Error;

/// Errors raised while building model values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    /// A datatype indicator outside the fixed ADIF set.
    #[error("unknown datatype indicator \"{code}\"")]
    UnknownDataType { code: String },

    /// A field context name other than `header` or `record`.
    #[error("unknown field context \"{name}\"")]
    UnknownContext { name: String },
}

/// Result type alias for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;
