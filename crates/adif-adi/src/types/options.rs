//! Reader and writer options.

use adif_common::{current_adif_timestamp, format_adif_timestamp};
use chrono::NaiveDateTime;

use super::Encoding;

/// Program identifier written to `PROGRAMID` when the header does not supply one.
pub const PROGRAM_ID: &str = "adif-rs";

/// Options for reading ADI data.
#[derive(Debug, Clone, Default)]
pub struct AdiReaderOptions {
    /// Number of leading records to discard (the header is never skipped).
    pub skip: usize,
    /// Check every field name against the field table.
    pub validate: bool,
    /// Encoding of value bytes (default: UTF-8).
    pub encoding: Encoding,
}

impl AdiReaderOptions {
    /// Create reader options with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Skip the first `count` records.
    #[must_use]
    pub fn with_skip(mut self, count: usize) -> Self {
        self.skip = count;
        self
    }

    /// Enable field name validation.
    #[must_use]
    pub fn validated(mut self) -> Self {
        self.validate = true;
        self
    }

    #[must_use]
    pub fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }
}

/// Values used for header fields the caller did not supply.
#[derive(Debug, Clone)]
pub struct HeaderDefaults {
    /// `ADIF_VER` (default: "3.1.4").
    pub adif_version: String,
    /// `PROGRAMID` (default: [`PROGRAM_ID`]).
    pub program_id: String,
    /// `PROGRAMVERSION` (default: this crate's version).
    pub program_version: String,
    /// `CREATED_TIMESTAMP` (default: current UTC time).
    pub created: Option<NaiveDateTime>,
}

impl Default for HeaderDefaults {
    fn default() -> Self {
        Self {
            adif_version: adif_standards::DEFAULT_ADIF_VERSION.to_string(),
            program_id: PROGRAM_ID.to_string(),
            program_version: env!("CARGO_PKG_VERSION").to_string(),
            created: None,
        }
    }
}

impl HeaderDefaults {
    /// Default value of one of the always-written header fields.
    #[must_use]
    pub fn value(&self, field: &str) -> Option<String> {
        match field {
            "ADIF_VER" => Some(self.adif_version.clone()),
            "PROGRAMID" => Some(self.program_id.clone()),
            "PROGRAMVERSION" => Some(self.program_version.clone()),
            "CREATED_TIMESTAMP" => Some(
                self.created
                    .map_or_else(current_adif_timestamp, |created| format_adif_timestamp(&created)),
            ),
            _ => None,
        }
    }
}

/// Options for writing ADI data.
#[derive(Debug, Clone)]
pub struct AdiWriterOptions {
    /// Free text written before the first header tag.
    pub comment: String,
    /// Check every field name against the field table (default: true).
    pub validate: bool,
    /// Readable layout with line feeds (default: true).
    pub line_breaks: bool,
    /// Number of spaces between tags (default: 1).
    pub spaces: usize,
    /// Output encoding for files (default: ASCII).
    pub encoding: Encoding,
    /// Header defaults.
    pub defaults: HeaderDefaults,
}

impl Default for AdiWriterOptions {
    fn default() -> Self {
        Self {
            comment: format!("ADIF export by {PROGRAM_ID}"),
            validate: true,
            line_breaks: true,
            spaces: 1,
            encoding: Encoding::Ascii,
            defaults: HeaderDefaults::default(),
        }
    }
}

impl AdiWriterOptions {
    /// Create writer options with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the header comment.
    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    /// Enable field name validation.
    #[must_use]
    pub fn validated(mut self) -> Self {
        self.validate = true;
        self
    }

    /// Write any well-formed field name, standard or not.
    #[must_use]
    pub fn lenient(mut self) -> Self {
        self.validate = false;
        self
    }

    /// Compact layout: no line feeds, records joined by a single newline.
    #[must_use]
    pub fn compact(mut self) -> Self {
        self.line_breaks = false;
        self
    }

    /// Set the number of spaces between tags.
    #[must_use]
    pub fn with_spaces(mut self, spaces: usize) -> Self {
        self.spaces = spaces;
        self
    }

    #[must_use]
    pub fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Set the created timestamp used when the header has none.
    #[must_use]
    pub fn with_created(mut self, datetime: NaiveDateTime) -> Self {
        self.defaults.created = Some(datetime);
        self
    }

    /// Separator written between tags.
    #[must_use]
    pub fn separator(&self) -> String {
        " ".repeat(self.spaces)
    }

    /// Separator written between document chunks.
    #[must_use]
    pub fn chunk_separator(&self) -> &'static str {
        if self.line_breaks { "\n\n" } else { "\n" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writer_defaults() {
        let opts = AdiWriterOptions::default();
        assert_eq!(opts.comment, "ADIF export by adif-rs");
        assert!(opts.validate);
        assert!(opts.line_breaks);
        assert_eq!(opts.separator(), " ");
        assert_eq!(opts.chunk_separator(), "\n\n");
        assert_eq!(opts.defaults.adif_version, "3.1.4");
        assert_eq!(opts.encoding, Encoding::Ascii);
    }

    #[test]
    fn test_default_values() {
        let defaults = HeaderDefaults::default();
        assert_eq!(defaults.value("PROGRAMID").as_deref(), Some(PROGRAM_ID));
        assert_eq!(defaults.value("CREATED_TIMESTAMP").as_deref().map(str::len), Some(15));
        assert_eq!(defaults.value("CALL"), None);
    }

    #[test]
    fn test_builder() {
        let opts = AdiWriterOptions::new().compact().with_spaces(3);
        assert_eq!(opts.separator(), "   ");
        assert_eq!(opts.chunk_separator(), "\n");

        let opts = AdiReaderOptions::new().with_skip(2).validated();
        assert_eq!(opts.skip, 2);
        assert!(opts.validate);
        assert_eq!(opts.encoding, Encoding::Utf8);
    }
}
