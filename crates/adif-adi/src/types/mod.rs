//! Reader and writer configuration types.

mod encoding;
mod options;

pub use encoding::Encoding;
pub use options::{AdiReaderOptions, AdiWriterOptions, HeaderDefaults, PROGRAM_ID};
