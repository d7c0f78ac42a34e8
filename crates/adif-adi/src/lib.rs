//! ADIF ADI (tag-length-value) format reader and writer.
//!
//! ADI data is plain text built from tags of the form
//! `<NAME:LENGTH[:TYPE]>VALUE`, where LENGTH is the byte length of VALUE. An
//! optional header ends with `<EOH>`; each record ends with `<EOR>`.
//!
//! # Example
//!
//! ```
//! use adif_adi::{AdiWriterOptions, dump_with_options, load};
//! use adif_model::{Document, FieldMap};
//!
//! let doc = load("my log <ADIF_VER:5>3.1.4 <EOH>\n<CALL:5>DL1AA <BAND:3>20m <EOR>").unwrap();
//! assert_eq!(doc.records[0].get("CALL"), Some("DL1AA"));
//!
//! let mut out = Document::new();
//! out.push_record(FieldMap::from([("CALL", "DL1AA"), ("BAND", "20m")]));
//! let text = dump_with_options(&out, &AdiWriterOptions::new().compact()).unwrap();
//! assert_eq!(text, "<CALL:5>DL1AA <BAND:3>20m <EOR>");
//! ```
//!
//! # Encodings
//!
//! Values are decoded from their raw bytes after the tag length has been
//! applied, so a UTF-8 file with multi-byte characters must declare byte
//! lengths. The output of [`dump`] is restricted to ASCII; fields ending in
//! `_INTL` are never written.

mod error;
pub mod pack;
mod reader;
pub mod split;
pub mod tag;
mod types;
pub mod unpack;
mod writer;

// Re-export error types
pub use error::{AdiError, Result};

// Re-export configuration
pub use types::{AdiReaderOptions, AdiWriterOptions, Encoding, HeaderDefaults, PROGRAM_ID};

pub use pack::{PRIVILEGED_HEADER_FIELDS, pack_header, pack_record};
pub use tag::{RawTag, TagCheck, decode_tag, encode_tag, is_adi_ascii};
pub use unpack::unpack;

// Re-export reader functionality
pub use reader::{
    AdiReader, AdiRecords, load, load_records, load_records_with, load_with_options, read_adi,
    read_adi_with_options,
};

// Re-export writer functionality
pub use writer::{
    AdiChunks, AdiWriter, dump, dump_chunks, dump_chunks_with, dump_with_options, write_adi,
    write_adi_with_options,
};
