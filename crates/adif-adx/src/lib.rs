//! ADIF ADX (XML) format reader and writer.
//!
//! ADX carries the same [`Document`](adif_model::Document) as ADI:
//!
//! ```xml
//! <ADX>
//!   <HEADER>
//!     <ADIF_VER>3.1.4</ADIF_VER>
//!     <USERDEF FIELDID="1" TYPE="E" ENUM="{S,M,L}">SweaterSize</USERDEF>
//!   </HEADER>
//!   <RECORDS>
//!     <RECORD>
//!       <CALL>DL1AA</CALL>
//!       <APP PROGRAMID="LOGGER" FIELDNAME="AWARD">DLD</APP>
//!       <USERDEF FIELDNAME="SWEATERSIZE">M</USERDEF>
//!     </RECORD>
//!   </RECORDS>
//! </ADX>
//! ```
//!
//! `APP` elements map to flat `APP_<PROGRAMID>_<FIELDNAME>` fields and record
//! `USERDEF` elements to the declared field name, so a document converts
//! between both formats without loss.

pub mod elements;
mod error;
mod reader;
mod writer;

pub use error::{AdxError, Result};
pub use reader::{
    AdxReaderOptions, load_adx, load_adx_with_options, loads_adx, loads_adx_with_options,
};
pub use writer::{
    AdxOutput, AdxWriter, AdxWriterOptions, dump_adx, dump_adx_with_options, dumps_adx,
};
