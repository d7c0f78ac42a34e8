//! Allowed-field tables loaded from `Fields.csv`.

use std::collections::{BTreeMap, BTreeSet};
use std::io::Read;
use std::path::Path;
use std::sync::LazyLock;

use adif_model::FieldContext;
use csv::ReaderBuilder;
use serde::Deserialize;

use crate::error::StandardsError;

/// ADIF version of the embedded field table.
pub const DEFAULT_ADIF_VERSION: &str = "3.1.4";

const EMBEDDED_ORIGIN: &str = "<embedded>/adif/v3_1_4/Fields.csv";
const EMBEDDED_FIELDS: &str = include_str!("../../../standards/adif/v3_1_4/Fields.csv");

static ADIF_3_1_4: LazyLock<FieldTable> = LazyLock::new(|| {
    FieldTable::from_reader(EMBEDDED_FIELDS.as_bytes(), Path::new(EMBEDDED_ORIGIN))
        .expect("embedded ADIF field table is valid")
});

/// One row of the field table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FieldDefinition {
    #[serde(rename = "Field")]
    pub name: String,
    #[serde(rename = "Context")]
    pub context: FieldContext,
    #[serde(rename = "Data Type")]
    pub data_type: String,
    #[serde(rename = "Description", default)]
    pub description: String,
}

/// Immutable sets of allowed header and record field names.
#[derive(Debug, Clone, Default)]
pub struct FieldTable {
    header: BTreeSet<String>,
    record: BTreeSet<String>,
    definitions: BTreeMap<String, FieldDefinition>,
}

impl FieldTable {
    /// The ADIF 3.1.4 table compiled into the crate.
    ///
    /// Built on first use and shared for the lifetime of the process.
    pub fn adif_3_1_4() -> &'static FieldTable {
        &ADIF_3_1_4
    }

    /// Parse a field table from CSV data. `origin` is only used in errors.
    pub fn from_reader<R: Read>(reader: R, origin: &Path) -> Result<Self, StandardsError> {
        let mut reader = ReaderBuilder::new().has_headers(true).from_reader(reader);
        let mut table = Self::default();
        for row in reader.deserialize::<FieldDefinition>() {
            let mut definition = row.map_err(|e| StandardsError::csv(origin, &e))?;
            definition.name = definition.name.trim().to_ascii_uppercase();
            if definition.name.is_empty() {
                return Err(StandardsError::InvalidTable {
                    message: format!("empty field name in {}", origin.display()),
                });
            }
            table.insert(definition);
        }
        if table.header.is_empty() && table.record.is_empty() {
            return Err(StandardsError::InvalidTable {
                message: format!("no fields defined in {}", origin.display()),
            });
        }
        tracing::debug!(
            origin = %origin.display(),
            header_fields = table.header.len(),
            record_fields = table.record.len(),
            "loaded field table"
        );
        Ok(table)
    }

    fn insert(&mut self, definition: FieldDefinition) {
        let set = match definition.context {
            FieldContext::Header => &mut self.header,
            FieldContext::Record => &mut self.record,
        };
        set.insert(definition.name.clone());
        self.definitions.insert(definition.name.clone(), definition);
    }

    /// Whether `name` (uppercase) is a standard field of `context`.
    #[must_use]
    pub fn contains(&self, name: &str, context: FieldContext) -> bool {
        match context {
            FieldContext::Header => self.header.contains(name),
            FieldContext::Record => self.record.contains(name),
        }
    }

    #[must_use]
    pub fn header_fields(&self) -> &BTreeSet<String> {
        &self.header
    }

    #[must_use]
    pub fn record_fields(&self) -> &BTreeSet<String> {
        &self.record
    }

    #[must_use]
    pub fn definition(&self, name: &str) -> Option<&FieldDefinition> {
        self.definitions.get(&name.to_ascii_uppercase())
    }

    /// ADIF data type name of a standard field.
    #[must_use]
    pub fn data_type(&self, name: &str) -> Option<&str> {
        self.definition(name).map(|d| d.data_type.as_str())
    }

    /// All definitions of one context, sorted by name.
    pub fn definitions(&self, context: FieldContext) -> impl Iterator<Item = &FieldDefinition> {
        self.definitions
            .values()
            .filter(move |d| d.context == context)
    }
}

/// Load a field table from a CSV file on disk.
pub fn load_field_table(path: &Path) -> Result<FieldTable, StandardsError> {
    let file = std::fs::File::open(path).map_err(|e| StandardsError::io(path, e))?;
    FieldTable::from_reader(file, path)
}
