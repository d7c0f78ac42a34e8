#![deny(unsafe_code)]

//! ADIF standard field tables.
//!
//! The allowed header and record field names are read once from the
//! schema-derived `Fields.csv` table and handed to a [`FieldValidator`], which
//! decides whether a field name is legal in a given context.

pub mod error;
pub mod paths;
pub mod table;
pub mod validator;

pub use crate::error::StandardsError;
pub use crate::paths::{STANDARDS_ENV_VAR, field_table_path, standards_root};
pub use crate::table::{DEFAULT_ADIF_VERSION, FieldDefinition, FieldTable, load_field_table};
pub use crate::validator::{FieldValidator, IllegalField};
