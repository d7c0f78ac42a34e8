//! ADI reader.
//!
//! Decoding is lazy: [`load_records`] checks the header marker count up
//! front, then yields the header followed by one field map per record.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use adif_model::{Document, FieldContext, FieldMap};
use adif_standards::FieldValidator;

use crate::error::{AdiError, Result};
use crate::split::{RecordSections, split_header};
use crate::tag::TagCheck;
use crate::types::{AdiReaderOptions, Encoding};
use crate::unpack::unpack;

/// Lazy sequence of decoded field maps: the header first, then each record.
///
/// A document without an end-of-header marker yields an empty header. A
/// failing item does not end the iteration, so callers may drop a malformed
/// record and continue.
#[derive(Debug)]
pub struct AdiRecords<'a> {
    header: Option<Option<&'a [u8]>>,
    sections: RecordSections<'a>,
    skip: usize,
    encoding: Encoding,
    validator: Option<FieldValidator<'a>>,
    userdefs: Vec<String>,
}

impl<'a> AdiRecords<'a> {
    fn new(
        data: &'a [u8],
        options: &AdiReaderOptions,
        validator: Option<FieldValidator<'a>>,
    ) -> Result<Self> {
        let (header, records) = split_header(data)?;
        Ok(Self {
            header: Some(header),
            sections: RecordSections::new(records),
            skip: options.skip,
            encoding: options.encoding,
            validator,
            userdefs: Vec::new(),
        })
    }

    fn check(&self, context: FieldContext) -> Option<TagCheck<'_>> {
        self.validator.map(|validator| TagCheck {
            validator,
            context,
            userdefs: &self.userdefs,
        })
    }

    fn next_header(&mut self, section: Option<&'a [u8]>) -> Result<FieldMap> {
        let Some(section) = section else {
            return Ok(FieldMap::new());
        };
        let header = unpack(
            section,
            self.encoding,
            self.check(FieldContext::Header).as_ref(),
        )?;
        self.userdefs = header.userdef_names();
        Ok(header)
    }
}

impl Iterator for AdiRecords<'_> {
    type Item = Result<FieldMap>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(section) = self.header.take() {
            return Some(self.next_header(section));
        }

        while self.skip > 0 {
            self.skip -= 1;
            self.sections.next()?;
        }
        let section = self.sections.next()?;
        Some(unpack(
            section,
            self.encoding,
            self.check(FieldContext::Record).as_ref(),
        ))
    }
}

/// Start decoding ADI data, validating against the ADIF 3.1.4 field table
/// when `options.validate` is set.
pub fn load_records<'a, T>(data: &'a T, options: &AdiReaderOptions) -> Result<AdiRecords<'a>>
where
    T: AsRef<[u8]> + ?Sized,
{
    let validator = options.validate.then(FieldValidator::default);
    AdiRecords::new(data.as_ref(), options, validator)
}

/// Start decoding ADI data, always validating with `validator`.
pub fn load_records_with<'a, T>(
    data: &'a T,
    options: &AdiReaderOptions,
    validator: FieldValidator<'a>,
) -> Result<AdiRecords<'a>>
where
    T: AsRef<[u8]> + ?Sized,
{
    AdiRecords::new(data.as_ref(), options, Some(validator))
}

fn collect_document(mut records: AdiRecords<'_>) -> Result<Document> {
    let header = records.next().transpose()?.unwrap_or_default();
    let records = records.collect::<Result<Vec<_>>>()?;
    tracing::debug!(records = records.len(), "decoded ADI document");
    Ok(Document {
        header: Some(header),
        records,
    })
}

/// Decode a complete ADI document with default options.
pub fn load<T: AsRef<[u8]> + ?Sized>(data: &T) -> Result<Document> {
    load_with_options(data, &AdiReaderOptions::default())
}

/// Decode a complete ADI document.
pub fn load_with_options<T: AsRef<[u8]> + ?Sized>(
    data: &T,
    options: &AdiReaderOptions,
) -> Result<Document> {
    collect_document(load_records(data, options)?)
}

/// ADI file reader.
pub struct AdiReader<R: Read> {
    reader: BufReader<R>,
    options: AdiReaderOptions,
}

impl<R: Read> AdiReader<R> {
    /// Create a new ADI reader.
    pub fn new(reader: R) -> Self {
        Self::with_options(reader, AdiReaderOptions::default())
    }

    /// Create a new ADI reader with options.
    pub fn with_options(reader: R, options: AdiReaderOptions) -> Self {
        Self {
            reader: BufReader::new(reader),
            options,
        }
    }

    /// Read all input and decode it.
    pub fn read_document(mut self) -> Result<Document> {
        let mut data = Vec::new();
        self.reader.read_to_end(&mut data)?;
        tracing::trace!(bytes = data.len(), "read ADI input");
        load_with_options(&data, &self.options)
    }
}

impl AdiReader<File> {
    /// Open an ADI file for reading.
    pub fn open(path: &Path) -> Result<Self> {
        Self::open_with_options(path, AdiReaderOptions::default())
    }

    /// Open an ADI file with options.
    pub fn open_with_options(path: &Path, options: AdiReaderOptions) -> Result<Self> {
        let file = File::open(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AdiError::FileNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                AdiError::Io(e)
            }
        })?;
        tracing::debug!(path = %path.display(), "opened ADI file");
        Ok(Self::with_options(file, options))
    }
}

/// Read an ADI file from a path.
pub fn read_adi(path: &Path) -> Result<Document> {
    AdiReader::open(path)?.read_document()
}

/// Read an ADI file with options.
pub fn read_adi_with_options(path: &Path, options: AdiReaderOptions) -> Result<Document> {
    AdiReader::open_with_options(path, options)?.read_document()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEXT: &str = "ADIF export\n<ADIF_VER:5>3.1.4 <USERDEF1:4:S>MINE<EOH>\n\
                        <CALL:5>DL1AA <MINE:1>x <EOR>\n<CALL:5>DL2BB <EOR>\n<CALL:5>DL3CC <EOR>\n";

    #[test]
    fn test_load_records_lazy() {
        let mut records = load_records(TEXT, &AdiReaderOptions::default()).unwrap();
        let header = records.next().unwrap().unwrap();
        assert_eq!(header.get("ADIF_VER"), Some("3.1.4"));
        assert_eq!(header.userdef_names(), vec!["MINE"]);
        let first = records.next().unwrap().unwrap();
        assert_eq!(first.get("MINE"), Some("x"));
        assert_eq!(records.count(), 2);
    }

    #[test]
    fn test_load_records_skip() {
        let opts = AdiReaderOptions::new().with_skip(2);
        let maps: Vec<_> = load_records(TEXT, &opts)
            .unwrap()
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(maps.len(), 2);
        assert_eq!(maps[1].get("CALL"), Some("DL3CC"));

        let opts = AdiReaderOptions::new().with_skip(10);
        assert_eq!(load_records(TEXT, &opts).unwrap().count(), 1);
    }

    #[test]
    fn test_validation_uses_header_userdefs() {
        let opts = AdiReaderOptions::new().validated();
        let doc = load_with_options(TEXT, &opts).unwrap();
        assert_eq!(doc.num_records(), 3);

        let text = "<EOH><CALL:5>DL1AA <MINE:1>x <EOR>";
        let err = load_with_options(text, &opts).unwrap_err();
        assert!(matches!(err, AdiError::IllegalFieldName { ref field, .. } if field == "MINE"));
    }

    #[test]
    fn test_malformed_record_does_not_stop_iteration() {
        let text = "<EOH><CALL:5>DL1AA<EOR><CALL:X>bad<EOR><CALL:5>DL3CC<EOR>";
        let results: Vec<_> = load_records(text, &AdiReaderOptions::default())
            .unwrap()
            .collect();
        assert_eq!(results.len(), 4);
        assert!(results[2].is_err());
        assert_eq!(results[3].as_ref().unwrap().get("CALL"), Some("DL3CC"));
    }

    #[test]
    fn test_no_header_marker() {
        let doc = load("<CALL:5>DL1AA <EOR>").unwrap();
        assert_eq!(doc.header, Some(FieldMap::new()));
        assert_eq!(doc.records.len(), 1);
    }

    #[test]
    fn test_too_many_headers_is_eager() {
        let err = load_records("<EOH><EOH>", &AdiReaderOptions::default()).unwrap_err();
        assert!(matches!(err, AdiError::TooManyHeaders { count: 2 }));
    }

    #[test]
    fn test_reader_from_bytes() {
        let mut bytes = b"<EOH><NAME:4>J".to_vec();
        bytes.push(0xF6);
        bytes.extend_from_slice(b"rg<EOR>");
        let opts = AdiReaderOptions::new().with_encoding(Encoding::Latin1);
        let doc = AdiReader::with_options(bytes.as_slice(), opts)
            .read_document()
            .unwrap();
        assert_eq!(doc.records[0].get("NAME"), Some("Jörg"));
    }
}
