//! ADX writer.
//!
//! Field names are checked against the ADIF field table before anything is
//! written. Problems are collected as issues; with
//! [`AdxWriterOptions::raise_on_issue`] the first one is returned as an error
//! and no output is produced.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use adif_adi::{HeaderDefaults, PRIVILEGED_HEADER_FIELDS, is_adi_ascii};
use adif_model::{APP_PREFIX, Document, FieldContext, FieldMap, INTL_SUFFIX, UserDef};
use adif_standards::FieldValidator;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::elements::{ADX, APP, HEADER, RECORD, RECORDS, USERDEF, split_app_field};
use crate::error::{AdxError, Result};

/// Options for writing ADX data.
#[derive(Debug, Clone)]
pub struct AdxWriterOptions {
    /// Fail with the first issue instead of writing (default: true).
    pub raise_on_issue: bool,
    /// Header defaults.
    pub defaults: HeaderDefaults,
}

impl Default for AdxWriterOptions {
    fn default() -> Self {
        Self {
            raise_on_issue: true,
            defaults: HeaderDefaults::default(),
        }
    }
}

impl AdxWriterOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Write despite issues and return them.
    #[must_use]
    pub fn lax(mut self) -> Self {
        self.raise_on_issue = false;
        self
    }

    #[must_use]
    pub fn with_defaults(mut self, defaults: HeaderDefaults) -> Self {
        self.defaults = defaults;
        self
    }
}

/// Encoded ADX text with the issues found while writing it.
#[derive(Debug)]
pub struct AdxOutput {
    pub xml: String,
    pub issues: Vec<AdxError>,
}

/// Copy of the header with missing or empty standard fields defaulted.
fn complete_header(header: Option<&FieldMap>, defaults: &HeaderDefaults) -> FieldMap {
    let mut header = header.cloned().unwrap_or_default();
    for field in PRIVILEGED_HEADER_FIELDS {
        if header.get(field).is_none_or(str::is_empty) {
            if let Some(value) = defaults.value(field) {
                tracing::debug!(field, value = %value, "using header default");
                header.insert(field, value);
            }
        }
    }
    header
}

fn check_value(name: &str, value: &str, issues: &mut Vec<AdxError>) {
    if !name.ends_with(INTL_SUFFIX) && !is_adi_ascii(value) {
        issues.push(AdxError::malformed_value(
            name,
            "contains non ASCII characters",
        ));
    }
}

fn collect_issues(
    header: &FieldMap,
    records: &[FieldMap],
    declared: &[String],
    validator: FieldValidator<'_>,
) -> Vec<AdxError> {
    let mut issues = Vec::new();
    for (name, value) in header.iter() {
        if !validator.is_allowed(name, FieldContext::Header, &[] as &[&str]) {
            issues.push(AdxError::undefined_element(name, HEADER));
        }
        check_value(name, value, &mut issues);
    }
    for record in records {
        for (name, value) in record.iter() {
            if !validator.is_allowed(name, FieldContext::Record, declared) {
                issues.push(AdxError::undefined_element(name, RECORD));
            } else if name.starts_with(APP_PREFIX) && split_app_field(name).is_none() {
                issues.push(AdxError::malformed_value(
                    name,
                    "expected APP_<PROGRAMID>_<FIELDNAME>",
                ));
            }
            check_value(name, value, &mut issues);
        }
    }
    issues
}

fn userdef_display_name(userdef: &UserDef) -> &str {
    userdef
        .definition
        .split_once(',')
        .map_or(userdef.definition.as_str(), |(name, _)| name)
        .trim()
}

fn write_text_element<W: Write>(
    xml: &mut Writer<W>,
    element: BytesStart<'_>,
    name: &str,
    value: &str,
) -> Result<()> {
    xml.write_event(Event::Start(element))?;
    xml.write_event(Event::Text(BytesText::new(value)))?;
    xml.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

fn write_header<W: Write>(xml: &mut Writer<W>, header: &FieldMap) -> Result<()> {
    xml.write_event(Event::Start(BytesStart::new(HEADER)))?;
    for (name, value) in header.iter().filter(|(_, value)| !value.is_empty()) {
        write_text_element(xml, BytesStart::new(name), name, value)?;
    }
    for (i, userdef) in header.userdefs().iter().enumerate() {
        let id = (i + 1).to_string();
        let mut element = BytesStart::new(USERDEF);
        element.push_attribute(("FIELDID", id.as_str()));
        if let Some(dtype) = &userdef.dtype {
            element.push_attribute(("TYPE", dtype.as_str()));
        }
        if let Some(constraint) = userdef.constraint() {
            let key = if userdef.is_range() { "RANGE" } else { "ENUM" };
            element.push_attribute((key, constraint));
        }
        write_text_element(xml, element, USERDEF, userdef_display_name(userdef))?;
    }
    xml.write_event(Event::End(BytesEnd::new(HEADER)))?;
    Ok(())
}

fn write_record<W: Write>(xml: &mut Writer<W>, record: &FieldMap, declared: &[String]) -> Result<()> {
    let mut fields = record.iter().filter(|(_, value)| !value.is_empty()).peekable();
    if fields.peek().is_none() {
        xml.write_event(Event::Empty(BytesStart::new(RECORD)))?;
        return Ok(());
    }

    xml.write_event(Event::Start(BytesStart::new(RECORD)))?;
    for (name, value) in fields {
        if let Some((program, field)) = split_app_field(name) {
            let mut element = BytesStart::new(APP);
            element.push_attribute(("PROGRAMID", program));
            element.push_attribute(("FIELDNAME", field));
            write_text_element(xml, element, APP, value)?;
        } else if declared.iter().any(|d| d.eq_ignore_ascii_case(name)) {
            let mut element = BytesStart::new(USERDEF);
            element.push_attribute(("FIELDNAME", name));
            write_text_element(xml, element, USERDEF, value)?;
        } else {
            write_text_element(xml, BytesStart::new(name), name, value)?;
        }
    }
    xml.write_event(Event::End(BytesEnd::new(RECORD)))?;
    Ok(())
}

/// ADX file writer.
pub struct AdxWriter<W: Write> {
    writer: BufWriter<W>,
    options: AdxWriterOptions,
}

impl<W: Write> AdxWriter<W> {
    /// Create a new ADX writer.
    pub fn new(writer: W) -> Self {
        Self::with_options(writer, AdxWriterOptions::default())
    }

    /// Create a new ADX writer with options.
    pub fn with_options(writer: W, options: AdxWriterOptions) -> Self {
        Self {
            writer: BufWriter::new(writer),
            options,
        }
    }

    /// Write `document` and return the issues found.
    pub fn write_document(mut self, document: &Document) -> Result<Vec<AdxError>> {
        let header = complete_header(document.header.as_ref(), &self.options.defaults);
        let declared = header.userdef_names();
        let mut issues = collect_issues(
            &header,
            &document.records,
            &declared,
            FieldValidator::default(),
        );
        if self.options.raise_on_issue && !issues.is_empty() {
            return Err(issues.swap_remove(0));
        }
        for issue in &issues {
            tracing::warn!(%issue, "ADX validation issue");
        }

        let mut xml = Writer::new_with_indent(&mut self.writer, b' ', 2);
        xml.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        xml.write_event(Event::Start(BytesStart::new(ADX)))?;
        write_header(&mut xml, &header)?;
        if document.records.is_empty() {
            xml.write_event(Event::Empty(BytesStart::new(RECORDS)))?;
        } else {
            xml.write_event(Event::Start(BytesStart::new(RECORDS)))?;
            for record in &document.records {
                write_record(&mut xml, record, &declared)?;
            }
            xml.write_event(Event::End(BytesEnd::new(RECORDS)))?;
        }
        xml.write_event(Event::End(BytesEnd::new(ADX)))?;
        self.writer.flush()?;

        tracing::debug!(
            records = document.records.len(),
            issues = issues.len(),
            "wrote ADX document"
        );
        Ok(issues)
    }
}

impl AdxWriter<File> {
    /// Create an ADX file for writing.
    pub fn create(path: &Path) -> Result<Self> {
        Self::create_with_options(path, AdxWriterOptions::default())
    }

    /// Create an ADX file with options.
    pub fn create_with_options(path: &Path, options: AdxWriterOptions) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self::with_options(file, options))
    }
}

/// Encode a document as ADX text.
pub fn dumps_adx(document: &Document, options: AdxWriterOptions) -> Result<AdxOutput> {
    let mut buf = Vec::new();
    let issues = AdxWriter::with_options(&mut buf, options).write_document(document)?;
    let xml = String::from_utf8(buf).map_err(|e| AdxError::xml_syntax(e.to_string()))?;
    Ok(AdxOutput { xml, issues })
}

/// Write a document to an ADX file and return the issues found.
///
/// The file is only touched once the document has been encoded, so a
/// rejected document leaves an existing file as it was.
pub fn dump_adx(path: &Path, document: &Document) -> Result<Vec<AdxError>> {
    dump_adx_with_options(path, document, AdxWriterOptions::default())
}

/// Write a document to an ADX file with options.
pub fn dump_adx_with_options(
    path: &Path,
    document: &Document,
    options: AdxWriterOptions,
) -> Result<Vec<AdxError>> {
    let output = dumps_adx(document, options)?;
    std::fs::write(path, output.xml)?;
    Ok(output.issues)
}
