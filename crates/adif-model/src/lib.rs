//! In-memory model for ADIF logbook data.
//!
//! Both interchange formats (ADI and ADX) decode into and encode from the same
//! [`Document`]: an optional header [`FieldMap`] plus an ordered list of record
//! field maps. User-defined field declarations travel with the header as a
//! side list of [`UserDef`] entries rather than as flat fields.

pub mod document;
pub mod enums;
pub mod error;
pub mod field_map;
pub mod userdef;

pub use document::Document;
pub use enums::{DataTypeCode, FieldContext};
pub use error::{ModelError, Result};
pub use field_map::{FieldMap, USERDEFS_KEY};
pub use userdef::UserDef;

/// Field name prefix of user-defined field declarations (`USERDEF1`, `USERDEF2`, ...).
pub const USERDEF_PREFIX: &str = "USERDEF";

/// Field name prefix of application-defined fields (`APP_<PROGRAMID>_<FIELD>`).
pub const APP_PREFIX: &str = "APP_";

/// Field name suffix of international (non-ASCII) variants, which ADI cannot carry.
pub const INTL_SUFFIX: &str = "_INTL";
