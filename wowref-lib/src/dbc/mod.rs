//! Schema-driven decoding of client table (DBC) files.
//!
//! # File Format
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │ SIGNATURE: "WDBC" (4 bytes)                          │
//! ├──────────────────────────────────────────────────────┤
//! │ RECORD_COUNT: i32                                    │
//! │ FIELD_COUNT: i32                                     │
//! │ RECORD_SIZE: i32                                     │
//! │ STRING_BLOCK_SIZE: i32                               │
//! ├──────────────────────────────────────────────────────┤
//! │ Rows (RECORD_COUNT * RECORD_SIZE bytes)              │
//! │   - Fixed-width little-endian fields                 │
//! │   - Strings stored as offsets into the string block  │
//! ├──────────────────────────────────────────────────────┤
//! │ String block (STRING_BLOCK_SIZE bytes)               │
//! │   - NUL-terminated UTF-8 strings                     │
//! │   - Offset 0 means the empty string                  │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! A [`Schema`] describes one table's row layout. [`decode`] checks the header and the row width
//! up front and then yields one [`Record`] per row, on demand.

mod decoder;
mod error;
mod field;
mod header;
mod reader;
mod value;

#[cfg(test)]
pub mod testing;

pub use decoder::{DbcFile, Records, StringBlock, decode};
pub use error::{FormatError, LookupError};
pub use field::{FieldSpec, LOCALE_COUNT, LOCALIZATION_WIDTH, Scalar, Schema};
pub use header::{DbcHeader, HEADER_SIZE, SIGNATURE};
pub use value::{Record, Value};

use reader::RowReader;
