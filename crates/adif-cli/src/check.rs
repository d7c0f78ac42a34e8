//! Validation of logbook files.
//!
//! Field names are checked against the ADIF 3.1.4 table. Values of a few
//! well-known fields are checked for their expected notation and reported as
//! warnings.

use std::path::{Path, PathBuf};

use adif_adi::{AdiReaderOptions, Encoding};
use adif_adx::AdxReaderOptions;
use adif_common::{
    ADIF_DATE_REGEX, ADIF_TIME_REGEX, LOCATOR_REGEX, RST_REGEX, check_call, check_format,
};
use adif_model::{FieldContext, FieldMap};
use adif_standards::FieldValidator;
use anyhow::{Context, Result};

use crate::convert::{FileFormat, ReadSettings, read_document};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => f.write_str("error"),
            Self::Warning => f.write_str("warning"),
        }
    }
}

/// One problem found in a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub severity: Severity,
    /// 1-based record number, `None` for the header or the whole file.
    pub record: Option<usize>,
    pub field: Option<String>,
    pub message: String,
}

impl Finding {
    fn error(record: Option<usize>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            record,
            field: None,
            message: message.into(),
        }
    }

    fn warning(record: Option<usize>, field: &str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            record,
            field: Some(field.to_string()),
            message: message.into(),
        }
    }
}

/// Result of checking one file.
#[derive(Debug, Clone)]
pub struct CheckReport {
    pub path: PathBuf,
    pub format: FileFormat,
    pub records: usize,
    pub findings: Vec<Finding>,
}

impl CheckReport {
    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    fn count(&self, severity: Severity) -> usize {
        self.findings
            .iter()
            .filter(|f| f.severity == severity)
            .count()
    }
}

/// Check a logbook file. Errors in single ADI records do not stop the check.
pub fn check_file(path: &Path, encoding: Encoding) -> Result<CheckReport> {
    let format = FileFormat::from_path(path)?;
    let mut report = CheckReport {
        path: path.to_path_buf(),
        format,
        records: 0,
        findings: Vec::new(),
    };

    match format {
        FileFormat::Adi => check_adi(path, encoding, &mut report)?,
        FileFormat::Adx => {
            let options = AdxReaderOptions::new().validated();
            match adif_adx::load_adx_with_options(path, &options) {
                Ok(doc) => {
                    report.records = doc.records.len();
                    for (idx, record) in doc.records.iter().enumerate() {
                        report.findings.extend(check_values(record, idx + 1));
                    }
                }
                Err(adif_adx::AdxError::FileNotFound { path }) => {
                    anyhow::bail!("file not found: {}", path.display())
                }
                Err(err) => report.findings.push(Finding::error(None, err.to_string())),
            }
        }
        FileFormat::Json | FileFormat::Csv => {
            let doc = read_document(path, &ReadSettings::default())?;
            let validator = FieldValidator::default();
            let userdefs = doc.userdef_names();
            if let Some(header) = &doc.header {
                report
                    .findings
                    .extend(check_names(&validator, header, None, FieldContext::Header, &userdefs));
            }
            report.records = doc.records.len();
            for (idx, record) in doc.records.iter().enumerate() {
                let number = Some(idx + 1);
                report.findings.extend(check_names(
                    &validator,
                    record,
                    number,
                    FieldContext::Record,
                    &userdefs,
                ));
                report.findings.extend(check_values(record, idx + 1));
            }
        }
    }

    tracing::info!(
        path = %path.display(),
        records = report.records,
        errors = report.error_count(),
        warnings = report.warning_count(),
        "checked logbook"
    );
    Ok(report)
}

fn check_adi(path: &Path, encoding: Encoding, report: &mut CheckReport) -> Result<()> {
    let data = std::fs::read(path).with_context(|| format!("read {}", path.display()))?;
    let options = AdiReaderOptions::new().validated().with_encoding(encoding);
    let records = adif_adi::load_records(&data, &options)
        .with_context(|| format!("decode {}", path.display()))?;

    // The first item is always the header.
    for (idx, item) in records.enumerate() {
        let number = (idx > 0).then_some(idx);
        match item {
            Ok(fields) => {
                if let Some(number) = number {
                    report.records += 1;
                    report.findings.extend(check_values(&fields, number));
                }
            }
            Err(err) => {
                if number.is_some() {
                    report.records += 1;
                }
                report.findings.push(Finding::error(number, err.to_string()));
            }
        }
    }
    Ok(())
}

fn check_names(
    validator: &FieldValidator<'_>,
    fields: &FieldMap,
    record: Option<usize>,
    context: FieldContext,
    userdefs: &[String],
) -> Vec<Finding> {
    fields
        .names()
        .filter_map(|name| validator.check(name, context, userdefs).err())
        .map(|err| Finding {
            severity: Severity::Error,
            record,
            field: Some(err.field.clone()),
            message: err.to_string(),
        })
        .collect()
}

/// Notation checks for the values of well-known record fields.
pub fn check_values(record: &FieldMap, number: usize) -> Vec<Finding> {
    let mut findings = Vec::new();
    let number = Some(number);
    for (name, value) in record.iter() {
        if value.is_empty() {
            continue;
        }
        let message = match name {
            "QSO_DATE" | "QSO_DATE_OFF" if !check_format(&ADIF_DATE_REGEX, value) => {
                Some("expected date as YYYYMMDD")
            }
            "TIME_ON" | "TIME_OFF" if !check_format(&ADIF_TIME_REGEX, value) => {
                Some("expected time as HHMM or HHMMSS")
            }
            "CALL" | "STATION_CALLSIGN" | "OPERATOR" if check_call(value).is_none() => {
                Some("not a valid call sign")
            }
            "GRIDSQUARE" | "MY_GRIDSQUARE" if !check_format(&LOCATOR_REGEX, value) => {
                Some("not a valid Maidenhead locator")
            }
            "RST_SENT" | "RST_RCVD" if !check_format(&RST_REGEX, value) => {
                Some("not a valid signal report")
            }
            _ => None,
        };
        if let Some(message) = message {
            findings.push(Finding::warning(number, name, format!("{message}: \"{value}\"")));
        }
    }
    findings
}
