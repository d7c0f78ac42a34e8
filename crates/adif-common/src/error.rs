use thiserror::Error;

/// A value does not have the expected shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("\"{value}\" is not a valid {expected}")]
pub struct FormatError {
    pub value: String,
    pub expected: &'static str,
}

impl FormatError {
    pub fn new(value: impl Into<String>, expected: &'static str) -> Self {
        Self {
            value: value.into(),
            expected,
        }
    }
}
