//! Field-name legality checks.

use adif_model::{APP_PREFIX, FieldContext, USERDEF_PREFIX};
use thiserror::Error;

use crate::table::FieldTable;

/// A field name that is neither standard, application-defined, nor user-defined.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("field \"{field}\" is not allowed in {context}")]
pub struct IllegalField {
    pub field: String,
    pub context: FieldContext,
}

/// Decides whether a field name is legal in a header or record.
///
/// A name passes when it is in the table for its context, starts with
/// `USERDEF` or `APP_`, or matches one of the caller's declared user-defined
/// fields (case-insensitive).
#[derive(Debug, Clone, Copy)]
pub struct FieldValidator<'a> {
    table: &'a FieldTable,
}

impl Default for FieldValidator<'static> {
    fn default() -> Self {
        Self::new(FieldTable::adif_3_1_4())
    }
}

impl<'a> FieldValidator<'a> {
    pub fn new(table: &'a FieldTable) -> Self {
        Self { table }
    }

    #[must_use]
    pub fn table(&self) -> &'a FieldTable {
        self.table
    }

    #[must_use]
    pub fn is_allowed<S: AsRef<str>>(
        &self,
        name: &str,
        context: FieldContext,
        userdefs: &[S],
    ) -> bool {
        let upper = name.to_ascii_uppercase();
        self.table.contains(&upper, context)
            || upper.starts_with(USERDEF_PREFIX)
            || upper.starts_with(APP_PREFIX)
            || userdefs
                .iter()
                .any(|declared| declared.as_ref().eq_ignore_ascii_case(&upper))
    }

    pub fn check<S: AsRef<str>>(
        &self,
        name: &str,
        context: FieldContext,
        userdefs: &[S],
    ) -> Result<(), IllegalField> {
        if self.is_allowed(name, context, userdefs) {
            Ok(())
        } else {
            Err(IllegalField {
                field: name.to_ascii_uppercase(),
                context,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NONE: &[&str] = &[];

    #[test]
    fn standard_fields_pass_in_their_context() {
        let validator = FieldValidator::default();
        assert!(validator.is_allowed("call", FieldContext::Record, NONE));
        assert!(validator.is_allowed("PROGRAMID", FieldContext::Header, NONE));
        assert!(!validator.is_allowed("CALL", FieldContext::Header, NONE));
        assert!(!validator.is_allowed("PROGRAMID", FieldContext::Record, NONE));
    }

    #[test]
    fn escape_prefixes_pass_everywhere() {
        let validator = FieldValidator::default();
        assert!(validator.is_allowed("USERDEF1", FieldContext::Header, NONE));
        assert!(validator.is_allowed("APP_TESTAPP_CHANNEL", FieldContext::Record, NONE));
        assert!(validator.is_allowed("app_lotw_rxqsl", FieldContext::Header, NONE));
    }

    #[test]
    fn declared_userdefs_pass_in_records() {
        let validator = FieldValidator::default();
        assert!(validator.is_allowed("Test", FieldContext::Record, &["TEST"]));
        let err = validator
            .check("TEST", FieldContext::Record, NONE)
            .unwrap_err();
        assert_eq!(err.field, "TEST");
        assert_eq!(err.context, FieldContext::Record);
        assert_eq!(err.to_string(), "field \"TEST\" is not allowed in record");
    }
}
