use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Single-character datatype indicators accepted in a tag definition.
///
/// | Code | Type        |
/// |------|-------------|
/// | `B`  | Boolean     |
/// | `N`  | Number      |
/// | `D`  | Date        |
/// | `T`  | Time        |
/// | `S`  | String      |
/// | `E`  | Enumeration |
/// | `L`  | Location    |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataTypeCode {
    Boolean,
    Number,
    Date,
    Time,
    String,
    Enumeration,
    Location,
}

impl DataTypeCode {
    pub const ALL: [DataTypeCode; 7] = [
        Self::Boolean,
        Self::Number,
        Self::Date,
        Self::Time,
        Self::String,
        Self::Enumeration,
        Self::Location,
    ];

    /// The indicator character written after the length.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::Boolean => 'B',
            Self::Number => 'N',
            Self::Date => 'D',
            Self::Time => 'T',
            Self::String => 'S',
            Self::Enumeration => 'E',
            Self::Location => 'L',
        }
    }

    #[must_use]
    pub fn from_char(code: char) -> Option<Self> {
        Self::ALL.into_iter().find(|dtype| dtype.as_char() == code)
    }
}

impl TryFrom<&str> for DataTypeCode {
    type Error = ModelError;

    fn try_from(code: &str) -> Result<Self, Self::Error> {
        let mut chars = code.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_char(c),
            _ => None,
        }
        .ok_or_else(|| ModelError::UnknownDataType {
            code: code.to_string(),
        })
    }
}

impl FromStr for DataTypeCode {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s)
    }
}

impl fmt::Display for DataTypeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Section of a document a field belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldContext {
    Header,
    Record,
}

impl FieldContext {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Header => "header",
            Self::Record => "record",
        }
    }
}

impl FromStr for FieldContext {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "header" => Ok(Self::Header),
            "record" => Ok(Self::Record),
            _ => Err(ModelError::UnknownContext {
                name: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for FieldContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
