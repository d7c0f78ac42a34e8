//! Whole-file document model.

use serde::{Deserialize, Serialize};

use crate::field_map::FieldMap;

/// A logbook document: optional header plus ordered records.
///
/// `header == None` means no header section is written on encode. Decoders
/// always produce `Some`, possibly empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    #[serde(rename = "HEADER", default, skip_serializing_if = "Option::is_none")]
    pub header: Option<FieldMap>,
    #[serde(rename = "RECORDS", default)]
    pub records: Vec<FieldMap>,
}

impl Document {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_header(header: FieldMap) -> Self {
        Self {
            header: Some(header),
            records: Vec::new(),
        }
    }

    pub fn push_record(&mut self, record: FieldMap) {
        self.records.push(record);
    }

    #[must_use]
    pub fn num_records(&self) -> usize {
        self.records.len()
    }

    /// Names of the fields declared by the header's user definitions.
    #[must_use]
    pub fn userdef_names(&self) -> Vec<String> {
        self.header
            .as_ref()
            .map(FieldMap::userdef_names)
            .unwrap_or_default()
    }
}
