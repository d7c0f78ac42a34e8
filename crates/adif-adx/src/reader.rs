//! ADX reader.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use adif_model::{Document, FieldMap, UserDef};
use quick_xml::Reader;
use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};

use crate::elements::{ADX, APP, HEADER, RECORD, RECORDS, USERDEF, app_field_name, get_attribute};
use crate::error::{AdxError, Result};

/// Options for reading ADX data.
#[derive(Debug, Clone, Default)]
pub struct AdxReaderOptions {
    /// Reject elements outside the ADX layout, incomplete `APP`/`USERDEF`
    /// attributes and a missing `<RECORDS>` element.
    pub validate: bool,
}

impl AdxReaderOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn validated(mut self) -> Self {
        self.validate = true;
        self
    }
}

/// Where a field value goes once its element closes.
#[derive(Debug)]
enum FieldTarget {
    Plain(String),
    HeaderUserDef {
        dtype: Option<String>,
        constraint: Option<String>,
    },
}

#[derive(Debug)]
enum Scope {
    Adx,
    Header,
    Records,
    Record,
    Field { target: FieldTarget, value: String },
    Ignored,
}

impl Scope {
    fn label(&self) -> &'static str {
        match self {
            Self::Adx => ADX,
            Self::Header => HEADER,
            Self::Records => RECORDS,
            Self::Record => RECORD,
            Self::Field { .. } | Self::Ignored => "field",
        }
    }
}

struct AdxParser {
    validate: bool,
    stack: Vec<Scope>,
    header: Option<FieldMap>,
    record: FieldMap,
    records: Vec<FieldMap>,
    seen_root: bool,
    seen_records: bool,
}

impl AdxParser {
    fn new(options: &AdxReaderOptions) -> Self {
        Self {
            validate: options.validate,
            stack: Vec::new(),
            header: None,
            record: FieldMap::new(),
            records: Vec::new(),
            seen_root: false,
            seen_records: false,
        }
    }

    fn undefined(&self, name: &str, parent: &str) -> Result<Scope> {
        if self.validate {
            Err(AdxError::undefined_element(name, parent))
        } else {
            tracing::debug!(element = name, parent, "ignoring element");
            Ok(Scope::Ignored)
        }
    }

    fn open(&mut self, e: &BytesStart<'_>) -> Result<()> {
        let name = std::str::from_utf8(e.name().as_ref())?.to_string();
        let scope = match self.stack.last() {
            None if name == ADX && !self.seen_root => {
                self.seen_root = true;
                Scope::Adx
            }
            None => return Err(AdxError::xml_syntax(format!("unexpected root element <{name}>"))),
            Some(Scope::Adx) if name == HEADER => {
                self.header.get_or_insert_with(FieldMap::new);
                Scope::Header
            }
            Some(Scope::Adx) if name == RECORDS => {
                self.seen_records = true;
                Scope::Records
            }
            Some(Scope::Records) if name == RECORD => {
                self.record = FieldMap::new();
                Scope::Record
            }
            Some(Scope::Header) => self.header_field(&name, e)?,
            Some(Scope::Record) => self.record_field(&name, e)?,
            Some(Scope::Ignored) => Scope::Ignored,
            Some(parent) => {
                let parent = parent.label();
                self.undefined(&name, parent)?
            }
        };
        self.stack.push(scope);
        Ok(())
    }

    fn header_field(&self, name: &str, e: &BytesStart<'_>) -> Result<Scope> {
        if name != USERDEF {
            return Ok(field(FieldTarget::Plain(name.to_string())));
        }
        let dtype = get_attribute(e, "TYPE")?;
        let constraint = match get_attribute(e, "ENUM")? {
            Some(values) => Some(values),
            None => get_attribute(e, "RANGE")?,
        };
        if self.validate && get_attribute(e, "FIELDID")?.is_none() {
            return Err(AdxError::malformed_value(USERDEF, "missing FIELDID attribute"));
        }
        Ok(field(FieldTarget::HeaderUserDef { dtype, constraint }))
    }

    fn record_field(&self, name: &str, e: &BytesStart<'_>) -> Result<Scope> {
        let target = match name {
            APP => match (get_attribute(e, "PROGRAMID")?, get_attribute(e, "FIELDNAME")?) {
                (Some(program), Some(field)) => Some(app_field_name(&program, &field)),
                _ => None,
            },
            USERDEF => get_attribute(e, "FIELDNAME")?,
            _ => Some(name.to_string()),
        };
        match target {
            Some(target) => Ok(field(FieldTarget::Plain(target))),
            None if self.validate => Err(AdxError::malformed_value(
                name,
                "missing PROGRAMID or FIELDNAME attribute",
            )),
            None => {
                tracing::warn!(element = name, "ignoring element without field name");
                Ok(Scope::Ignored)
            }
        }
    }

    fn text(&mut self, text: &str) {
        if let Some(Scope::Field { value, .. }) = self.stack.last_mut() {
            value.push_str(text);
        }
    }

    fn close(&mut self) -> Result<()> {
        let Some(scope) = self.stack.pop() else {
            return Err(AdxError::xml_syntax("unbalanced end tag"));
        };
        match scope {
            Scope::Record => {
                self.records.push(std::mem::take(&mut self.record));
            }
            Scope::Field { target, value } => {
                let value = value.trim().to_string();
                let in_record = matches!(self.stack.last(), Some(Scope::Record));
                match target {
                    FieldTarget::Plain(name) if in_record => {
                        self.record.insert(name, value);
                    }
                    FieldTarget::Plain(name) => {
                        self.header.get_or_insert_with(FieldMap::new).insert(name, value);
                    }
                    FieldTarget::HeaderUserDef { dtype, constraint } => {
                        let definition = match constraint {
                            Some(constraint) => format!("{value},{constraint}"),
                            None => value,
                        };
                        self.header
                            .get_or_insert_with(FieldMap::new)
                            .push_userdef(UserDef { dtype, definition });
                    }
                }
            }
            Scope::Adx | Scope::Header | Scope::Records | Scope::Ignored => {}
        }
        Ok(())
    }

    fn finish(self) -> Result<Document> {
        if !self.seen_root {
            return Err(AdxError::xml_syntax("missing <ADX> root element"));
        }
        if !self.stack.is_empty() {
            return Err(AdxError::xml_syntax("unexpected end of document"));
        }
        if self.validate && !self.seen_records {
            return Err(AdxError::MissingRecords);
        }
        tracing::debug!(records = self.records.len(), "decoded ADX document");
        Ok(Document {
            header: self.header,
            records: self.records,
        })
    }
}

fn field(target: FieldTarget) -> Scope {
    Scope::Field {
        target,
        value: String::new(),
    }
}

fn parse<R: BufRead>(mut reader: Reader<R>, options: &AdxReaderOptions) -> Result<Document> {
    let mut parser = AdxParser::new(options);
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) => parser.open(e)?,
            Event::Empty(ref e) => {
                parser.open(e)?;
                parser.close()?;
            }
            Event::End(_) => parser.close()?,
            Event::Text(ref t) => {
                let raw = std::str::from_utf8(t)?;
                parser.text(&unescape(raw)?);
            }
            Event::CData(ref t) => parser.text(std::str::from_utf8(t)?),
            Event::GeneralRef(ref r) => {
                let entity = format!("&{};", std::str::from_utf8(r)?);
                parser.text(&unescape(&entity)?);
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }
    parser.finish()
}

/// Decode ADX text with default options.
pub fn loads_adx(xml: &str) -> Result<Document> {
    loads_adx_with_options(xml, &AdxReaderOptions::default())
}

/// Decode ADX text.
pub fn loads_adx_with_options(xml: &str, options: &AdxReaderOptions) -> Result<Document> {
    parse(Reader::from_str(xml), options)
}

/// Read an ADX file from a path.
pub fn load_adx(path: &Path) -> Result<Document> {
    load_adx_with_options(path, &AdxReaderOptions::default())
}

/// Read an ADX file with options.
pub fn load_adx_with_options(path: &Path, options: &AdxReaderOptions) -> Result<Document> {
    let file = File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            AdxError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            AdxError::Io(e)
        }
    })?;
    tracing::debug!(path = %path.display(), "reading ADX file");
    parse(Reader::from_reader(BufReader::new(file)), options)
}
