//! Reading and writing logbooks in the formats the tool supports.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use adif_adi::{AdiReaderOptions, AdiWriterOptions, Encoding};
use adif_adx::{AdxReaderOptions, AdxWriterOptions};
use adif_common::to_ascii;
use adif_model::{Document, FieldMap, INTL_SUFFIX};
use anyhow::{Context, Result, anyhow};

/// Field separator of CSV logbooks.
pub const CSV_DELIMITER: u8 = b';';

/// Columns written first when exporting CSV.
pub const CSV_LEADING_COLUMNS: [&str; 7] = [
    "QSO_DATE", "TIME_ON", "CALL", "BAND", "MODE", "RST_SENT", "RST_RCVD",
];

/// Logbook file format, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Adi,
    Adx,
    Json,
    Csv,
}

impl FileFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "adi" | "adif" => Ok(Self::Adi),
            "adx" => Ok(Self::Adx),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            _ => Err(anyhow!(
                "unable to determine file type of {} (use .adi, .adx, .json or .csv)",
                path.display()
            )),
        }
    }
}

impl std::fmt::Display for FileFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Adi => "ADI",
            Self::Adx => "ADX",
            Self::Json => "JSON",
            Self::Csv => "CSV",
        };
        f.write_str(label)
    }
}

/// Settings for reading an input logbook.
#[derive(Debug, Clone, Default)]
pub struct ReadSettings {
    pub validate: bool,
    pub skip: usize,
    pub encoding: Encoding,
}

/// Settings for writing an output logbook.
#[derive(Debug, Clone, Default)]
pub struct WriteSettings {
    pub validate: bool,
    pub compact: bool,
    /// Write ADX even if fields are not standard.
    pub lax: bool,
    /// Replace non-ASCII characters in fields that are not `_INTL`.
    pub replace_non_ascii: bool,
}

/// Read a logbook file.
pub fn read_document(path: &Path, settings: &ReadSettings) -> Result<Document> {
    let format = FileFormat::from_path(path)?;
    tracing::info!(path = %path.display(), %format, "reading logbook");
    let doc = match format {
        FileFormat::Adi => {
            let options = AdiReaderOptions {
                skip: settings.skip,
                validate: settings.validate,
                encoding: settings.encoding,
            };
            adif_adi::read_adi_with_options(path, options)
                .with_context(|| format!("read {}", path.display()))?
        }
        FileFormat::Adx => {
            let options = AdxReaderOptions {
                validate: settings.validate,
            };
            adif_adx::load_adx_with_options(path, &options)
                .with_context(|| format!("read {}", path.display()))?
        }
        FileFormat::Json => {
            let file = open(path)?;
            serde_json::from_reader(BufReader::new(file))
                .with_context(|| format!("parse {}", path.display()))?
        }
        FileFormat::Csv => csv_to_document(open(path)?)
            .with_context(|| format!("parse {}", path.display()))?,
    };
    Ok(doc)
}

/// Write a logbook file and return the issues reported by the writer.
pub fn write_document(path: &Path, doc: &Document, settings: &WriteSettings) -> Result<Vec<String>> {
    let format = FileFormat::from_path(path)?;
    tracing::info!(path = %path.display(), %format, records = doc.records.len(), "writing logbook");

    let replaced;
    let doc = if settings.replace_non_ascii {
        replaced = ascii_document(doc);
        &replaced
    } else {
        doc
    };

    let mut issues = Vec::new();
    match format {
        FileFormat::Adi => {
            let mut options = AdiWriterOptions::new();
            options.validate = settings.validate;
            options.line_breaks = !settings.compact;
            adif_adi::write_adi_with_options(path, doc, options)
                .with_context(|| format!("write {}", path.display()))?;
        }
        FileFormat::Adx => {
            let options = AdxWriterOptions {
                raise_on_issue: !settings.lax,
                ..AdxWriterOptions::default()
            };
            let found = adif_adx::dump_adx_with_options(path, doc, options)
                .with_context(|| format!("write {}", path.display()))?;
            issues.extend(found.iter().map(ToString::to_string));
        }
        FileFormat::Json => {
            let mut writer = BufWriter::new(create(path)?);
            if settings.compact {
                serde_json::to_writer(&mut writer, doc)?;
            } else {
                serde_json::to_writer_pretty(&mut writer, doc)?;
            }
            writer.flush()?;
        }
        FileFormat::Csv => {
            document_to_csv(doc, create(path)?)
                .with_context(|| format!("write {}", path.display()))?;
        }
    }
    Ok(issues)
}

fn open(path: &Path) -> Result<File> {
    File::open(path).with_context(|| format!("open {}", path.display()))
}

fn create(path: &Path) -> Result<File> {
    File::create(path).with_context(|| format!("create {}", path.display()))
}

/// Copy of `doc` with non-ASCII characters replaced in all non-`_INTL` fields.
#[must_use]
pub fn ascii_document(doc: &Document) -> Document {
    fn convert(fields: &FieldMap) -> FieldMap {
        let mut out: FieldMap = fields
            .iter()
            .map(|(name, value)| {
                if name.ends_with(INTL_SUFFIX) {
                    (name, value.to_string())
                } else {
                    (name, to_ascii(value))
                }
            })
            .collect();
        out.set_userdefs(fields.userdefs().to_vec());
        out
    }

    Document {
        header: doc.header.as_ref().map(convert),
        records: doc.records.iter().map(convert).collect(),
    }
}

/// Read CSV rows (first row holds field names) as records.
pub fn csv_to_document<R: Read>(reader: R) -> Result<Document> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(CSV_DELIMITER)
        .flexible(true)
        .from_reader(reader);
    let names: Vec<String> = reader
        .headers()
        .context("read CSV header")?
        .iter()
        .map(|name| name.trim().to_string())
        .collect();

    let mut doc = Document::with_header(FieldMap::new());
    for (idx, row) in reader.records().enumerate() {
        let row = row.with_context(|| format!("read CSV row {}", idx + 1))?;
        let record: FieldMap = names
            .iter()
            .zip(row.iter())
            .filter(|(name, _)| !name.is_empty())
            .map(|(name, value)| (name.as_str(), value))
            .collect();
        doc.push_record(record);
    }
    tracing::debug!(records = doc.records.len(), columns = names.len(), "read CSV");
    Ok(doc)
}

/// Column order of a CSV export: the leading columns, then every other
/// field in order of first appearance.
#[must_use]
pub fn csv_columns(doc: &Document) -> Vec<String> {
    let mut columns: Vec<String> = CSV_LEADING_COLUMNS.iter().map(|c| (*c).to_string()).collect();
    for record in &doc.records {
        for name in record.names() {
            if !columns.iter().any(|c| c == name) {
                columns.push(name.to_string());
            }
        }
    }
    columns
}

/// Write the records of `doc` as CSV.
pub fn document_to_csv<W: Write>(doc: &Document, writer: W) -> Result<()> {
    let columns = csv_columns(doc);
    let mut writer = csv::WriterBuilder::new()
        .delimiter(CSV_DELIMITER)
        .from_writer(writer);
    writer.write_record(&columns)?;
    for record in &doc.records {
        writer.write_record(columns.iter().map(|c| record.get(c).unwrap_or_default()))?;
    }
    writer.flush()?;
    Ok(())
}
