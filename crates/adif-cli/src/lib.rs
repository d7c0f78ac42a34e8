//! Library components of the `adif` command line tool.

pub mod check;
pub mod convert;
pub mod logging;
