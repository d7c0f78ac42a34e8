//! User-defined field declarations.

use serde::{Deserialize, Serialize};

/// A user-defined field declared in the header (`<USERDEFn:len:type>definition`).
///
/// The definition is the field name optionally followed by a constraint, e.g.
/// `SweaterSize,{S,M,L}` (enumeration) or `ShoeSize,{5:20}` (numeric range).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDef {
    /// The datatype indicator, kept verbatim as found in the tag.
    pub dtype: Option<String>,
    /// Field name plus optional constraint.
    #[serde(alias = "userdef")]
    pub definition: String,
}

impl UserDef {
    pub fn new(definition: impl Into<String>, dtype: Option<&str>) -> Self {
        Self {
            dtype: dtype.map(str::to_string),
            definition: definition.into(),
        }
    }

    /// The declared field name, uppercased (the part before the first comma).
    #[must_use]
    pub fn field_name(&self) -> String {
        self.definition
            .split(',')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_uppercase()
    }

    /// The constraint text including braces, e.g. `{S,M,L}` or `{5:20}`.
    #[must_use]
    pub fn constraint(&self) -> Option<&str> {
        self.definition
            .split_once(',')
            .map(|(_, rest)| rest.trim())
            .filter(|rest| !rest.is_empty())
    }

    /// Whether the constraint is a numeric range (`{min:max}`).
    #[must_use]
    pub fn is_range(&self) -> bool {
        self.constraint().is_some_and(|c| c.contains(':'))
    }
}
