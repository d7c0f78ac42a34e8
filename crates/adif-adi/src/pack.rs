//! Encoding of header and record field maps into ADI sections.

use adif_model::{FieldContext, FieldMap};
use adif_standards::FieldValidator;

use crate::error::Result;
use crate::tag::{TagCheck, encode_tag};
use crate::types::AdiWriterOptions;

/// Header fields that are always written, filled from defaults when missing.
pub const PRIVILEGED_HEADER_FIELDS: [&str; 4] =
    ["ADIF_VER", "PROGRAMID", "PROGRAMVERSION", "CREATED_TIMESTAMP"];

/// Tags of a record per line in readable layout.
const TAGS_PER_LINE: usize = 5;

fn tag_terminator(options: &AdiWriterOptions) -> String {
    if options.line_breaks {
        "\n".to_string()
    } else {
        options.separator()
    }
}

/// Encode a header section ending with `<EOH>`.
///
/// Only the privileged fields and the user-defined field declarations are
/// written; other header fields are dropped after validation. Returns the section and the declared user-defined field names, which
/// records may then use.
pub fn pack_header(
    header: &FieldMap,
    options: &AdiWriterOptions,
    validator: Option<FieldValidator<'_>>,
) -> Result<(String, Vec<String>)> {
    let terminator = tag_terminator(options);
    let check = validator.map(|validator| TagCheck {
        validator,
        context: FieldContext::Header,
        userdefs: &[],
    });

    let mut out = format!("{} \n", options.comment);
    let mut push = |tag: String| {
        if !tag.is_empty() {
            out.push_str(&tag);
            out.push_str(&terminator);
        }
    };

    let mut supplied = [false; PRIVILEGED_HEADER_FIELDS.len()];
    for (name, value) in header.iter() {
        let Some(idx) = PRIVILEGED_HEADER_FIELDS.iter().position(|p| *p == name) else {
            if let Some(check) = check.as_ref() {
                encode_tag(name, value, None, Some(check))?;
            }
            tracing::warn!(field = name, "header field is not written");
            continue;
        };
        if value.is_empty() {
            continue;
        }
        supplied[idx] = true;
        push(encode_tag(name, value, None, check.as_ref())?);
    }

    let mut declared = Vec::with_capacity(header.userdefs().len());
    for (i, userdef) in header.userdefs().iter().enumerate() {
        let name = format!("USERDEF{}", i + 1);
        push(encode_tag(
            &name,
            &userdef.definition,
            userdef.dtype.as_deref(),
            check.as_ref(),
        )?);
        declared.push(userdef.field_name());
    }

    for (field, _) in PRIVILEGED_HEADER_FIELDS
        .iter()
        .zip(supplied)
        .filter(|(_, supplied)| !supplied)
    {
        let value = options.defaults.value(field).unwrap_or_default();
        tracing::debug!(field, value = %value, "using header default");
        push(encode_tag(field, &value, None, check.as_ref())?);
    }

    out.push_str("<EOH>");
    Ok((out, declared))
}

/// Encode a record section ending with `<EOR>`.
///
/// Returns `None` when no field produces a tag.
pub fn pack_record(
    record: &FieldMap,
    options: &AdiWriterOptions,
    check: Option<&TagCheck<'_>>,
) -> Result<Option<String>> {
    if !record.userdefs().is_empty() {
        tracing::warn!(
            count = record.userdefs().len(),
            "user-defined field declarations in a record are not written"
        );
    }

    let separator = options.separator();
    let mut out = String::new();
    let mut written = 0;
    for (name, value) in record.iter() {
        let tag = encode_tag(name, value, None, check)?;
        if tag.is_empty() {
            continue;
        }
        written += 1;
        out.push_str(&tag);
        if options.line_breaks && written % TAGS_PER_LINE == 0 {
            out.push('\n');
        } else {
            out.push_str(&separator);
        }
    }

    if written == 0 {
        tracing::debug!("skipping record without tags");
        return Ok(None);
    }
    if options.line_breaks && !out.ends_with('\n') {
        out.push('\n');
    }
    out.push_str("<EOR>");
    Ok(Some(out))
}
