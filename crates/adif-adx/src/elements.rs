//! Element names and attribute helpers of the ADX layout.

use adif_model::APP_PREFIX;
use quick_xml::escape::unescape;
use quick_xml::events::BytesStart;

use crate::error::Result;

pub const ADX: &str = "ADX";
pub const HEADER: &str = "HEADER";
pub const RECORDS: &str = "RECORDS";
pub const RECORD: &str = "RECORD";
pub const APP: &str = "APP";
pub const USERDEF: &str = "USERDEF";

/// Get an attribute value from a start tag.
pub(crate) fn get_attribute(e: &BytesStart<'_>, name: &str) -> Result<Option<String>> {
    for attr in e.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == name.as_bytes() {
            let raw = std::str::from_utf8(&attr.value)?;
            return Ok(Some(unescape(raw)?.into_owned()));
        }
    }
    Ok(None)
}

/// Flat field name of an application-defined field.
#[must_use]
pub fn app_field_name(program_id: &str, field: &str) -> String {
    format!("{APP_PREFIX}{program_id}_{field}").to_ascii_uppercase()
}

/// Split `APP_<PROGRAMID>_<FIELD>` into program id and field name.
#[must_use]
pub fn split_app_field(name: &str) -> Option<(&str, &str)> {
    let rest = name.get(APP_PREFIX.len()..)?;
    if !name[..APP_PREFIX.len()].eq_ignore_ascii_case(APP_PREFIX) {
        return None;
    }
    let (program, field) = rest.split_once('_')?;
    (!program.is_empty() && !field.is_empty()).then_some((program, field))
}
