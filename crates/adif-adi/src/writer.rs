//! ADI writer.
//!
//! [`dump_chunks`] yields the encoded header (if the document has one) and
//! then each record as separate strings; [`dump`] joins them, and
//! [`AdiWriter`] streams them to any [`Write`] target.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use adif_model::{Document, FieldContext};
use adif_standards::FieldValidator;

use crate::error::Result;
use crate::pack::{pack_header, pack_record};
use crate::tag::TagCheck;
use crate::types::AdiWriterOptions;

/// Lazy sequence of encoded document chunks.
#[derive(Debug)]
pub struct AdiChunks<'a> {
    document: &'a Document,
    options: &'a AdiWriterOptions,
    validator: Option<FieldValidator<'a>>,
    header_done: bool,
    next_record: usize,
    userdefs: Vec<String>,
}

impl Iterator for AdiChunks<'_> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        let document = self.document;
        if !self.header_done {
            self.header_done = true;
            if let Some(header) = &document.header {
                return Some(
                    pack_header(header, self.options, self.validator).map(|(text, userdefs)| {
                        self.userdefs = userdefs;
                        text
                    }),
                );
            }
        }

        while let Some(record) = document.records.get(self.next_record) {
            self.next_record += 1;
            let check = self.validator.map(|validator| TagCheck {
                validator,
                context: FieldContext::Record,
                userdefs: &self.userdefs,
            });
            match pack_record(record, self.options, check.as_ref()) {
                Ok(Some(text)) => return Some(Ok(text)),
                Ok(None) => {}
                Err(e) => return Some(Err(e)),
            }
        }
        None
    }
}

/// Encode a document chunk by chunk, validating against the ADIF 3.1.4
/// field table when `options.validate` is set.
#[must_use]
pub fn dump_chunks<'a>(document: &'a Document, options: &'a AdiWriterOptions) -> AdiChunks<'a> {
    let validator = options.validate.then(FieldValidator::default);
    chunks(document, options, validator)
}

/// Encode a document chunk by chunk, always validating with `validator`.
#[must_use]
pub fn dump_chunks_with<'a>(
    document: &'a Document,
    options: &'a AdiWriterOptions,
    validator: FieldValidator<'a>,
) -> AdiChunks<'a> {
    chunks(document, options, Some(validator))
}

fn chunks<'a>(
    document: &'a Document,
    options: &'a AdiWriterOptions,
    validator: Option<FieldValidator<'a>>,
) -> AdiChunks<'a> {
    AdiChunks {
        document,
        options,
        validator,
        header_done: false,
        next_record: 0,
        userdefs: Vec::new(),
    }
}

/// Encode a complete document with default options.
pub fn dump(document: &Document) -> Result<String> {
    dump_with_options(document, &AdiWriterOptions::default())
}

/// Encode a complete document.
pub fn dump_with_options(document: &Document, options: &AdiWriterOptions) -> Result<String> {
    let chunks = dump_chunks(document, options).collect::<Result<Vec<_>>>()?;
    Ok(chunks.join(options.chunk_separator()))
}

/// ADI file writer.
pub struct AdiWriter<W: Write> {
    writer: BufWriter<W>,
    options: AdiWriterOptions,
}

impl<W: Write> AdiWriter<W> {
    /// Create a new ADI writer.
    pub fn new(writer: W) -> Self {
        Self::with_options(writer, AdiWriterOptions::default())
    }

    /// Create a new ADI writer with options.
    pub fn with_options(writer: W, options: AdiWriterOptions) -> Self {
        Self {
            writer: BufWriter::new(writer),
            options,
        }
    }

    /// Encode `document` and write it chunk by chunk.
    pub fn write_document(mut self, document: &Document) -> Result<()> {
        let separator = self.options.chunk_separator();
        let mut written = 0usize;
        for (i, chunk) in dump_chunks(document, &self.options).enumerate() {
            let chunk = chunk?;
            if i > 0 {
                self.writer.write_all(separator.as_bytes())?;
            }
            self.writer
                .write_all(&self.options.encoding.encode(&chunk)?)?;
            written += 1;
        }
        self.writer.flush()?;
        tracing::debug!(chunks = written, "wrote ADI document");
        Ok(())
    }
}

impl AdiWriter<File> {
    /// Create an ADI file for writing.
    pub fn create(path: &Path) -> Result<Self> {
        Self::create_with_options(path, AdiWriterOptions::default())
    }

    /// Create an ADI file with options.
    pub fn create_with_options(path: &Path, options: AdiWriterOptions) -> Result<Self> {
        let file = File::create(path)?;
        tracing::debug!(path = %path.display(), "created ADI file");
        Ok(Self::with_options(file, options))
    }
}

/// Write a document to an ADI file.
///
/// The whole document is encoded before the file is opened, so an encoding
/// error leaves an existing file untouched.
pub fn write_adi(path: &Path, document: &Document) -> Result<()> {
    write_adi_with_options(path, document, AdiWriterOptions::default())
}

/// Write a document to an ADI file with options.
pub fn write_adi_with_options(
    path: &Path,
    document: &Document,
    options: AdiWriterOptions,
) -> Result<()> {
    let text = dump_with_options(document, &options)?;
    std::fs::write(path, options.encoding.encode(&text)?)?;
    tracing::debug!(path = %path.display(), "wrote ADI file");
    Ok(())
}

#[cfg(test)]
mod tests {
    use adif_model::FieldMap;

    use super::*;
    use crate::error::AdiError;
    use crate::types::Encoding;

    fn records_only() -> Document {
        let mut doc = Document::new();
        doc.push_record(FieldMap::from([("TEST1", "test"), ("TEST2", "test2")]));
        doc.push_record(FieldMap::from([("TEST1", "test3"), ("TEST2", "test4\r\ntest5")]));
        doc
    }

    #[test]
    fn test_dump_validates_by_default() {
        let err = dump(&records_only()).unwrap_err();
        assert!(matches!(err, AdiError::IllegalFieldName { ref field, .. } if field == "TEST1"));
    }

    #[test]
    fn test_dump_records_only() {
        let opts = AdiWriterOptions::new().lenient();
        assert_eq!(
            dump_with_options(&records_only(), &opts).unwrap(),
            "<TEST1:4>test <TEST2:5>test2 \n<EOR>\n\n<TEST1:5>test3 <TEST2:12>test4\r\ntest5 \n<EOR>"
        );
    }

    #[test]
    fn test_dump_compact() {
        let mut doc = Document::new();
        doc.push_record(FieldMap::from([("A", "a"), ("B", "b")]));
        doc.push_record(FieldMap::from([("A", "")]));
        doc.push_record(FieldMap::from([("C", "c")]));
        let opts = AdiWriterOptions::new().compact().lenient();
        insta::assert_snapshot!(dump_with_options(&doc, &opts).unwrap(), @r"
        <A:1>a <B:1>b <EOR>
        <C:1>c <EOR>
        ");
    }

    #[test]
    fn test_chunks_report_failing_record() {
        let mut doc = records_only();
        doc.records[1].insert("NAME", "Jörg");
        let opts = AdiWriterOptions::new().lenient();
        let results: Vec<_> = dump_chunks(&doc, &opts).collect();
        assert_eq!(results.len(), 2);
        assert!(results[0].is_ok());
        assert!(matches!(results[1], Err(AdiError::StringNotAscii { .. })));
        assert!(dump_with_options(&doc, &opts).is_err());
    }

    #[test]
    fn test_writer_encodes_output() {
        let mut doc = Document::new();
        doc.push_record(FieldMap::from([("CALL", "DL1AA")]));
        let mut out = Vec::new();
        AdiWriter::with_options(&mut out, AdiWriterOptions::new().with_encoding(Encoding::Latin1))
            .write_document(&doc)
            .unwrap();
        assert_eq!(out, b"<CALL:5>DL1AA \n<EOR>");

        let mut custom = Document::new();
        custom.push_record(FieldMap::from([("NAME", "Jörg")]));
        let err = AdiWriter::new(Vec::new()).write_document(&custom).unwrap_err();
        assert!(matches!(err, AdiError::StringNotAscii { .. }));
    }
}
