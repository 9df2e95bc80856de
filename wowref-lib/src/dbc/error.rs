use thiserror::Error;

/// A table file that cannot be decoded with the schema it was paired with.
///
/// Format errors are fatal for the table being decoded, and only for that table.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("invalid table signature: expected 'WDBC', found {found:?}")]
    BadSignature { found: [u8; 4] },

    #[error("table is truncated: {0}")]
    Truncated(String),

    #[error("schema row width is {schema} bytes but the table declares {declared} bytes per record")]
    RowSizeMismatch { schema: usize, declared: usize },

    #[error("string offset {offset} in field '{field}' does not point at the start of a string (string block is {block_size} bytes)")]
    InvalidStringOffset { field: &'static str, offset: u32, block_size: usize },

    #[error("string at offset {offset} in field '{field}' is not NUL terminated")]
    UnterminatedString { field: &'static str, offset: u32 },

    #[error("string at offset {offset} in field '{field}' is not valid UTF-8")]
    InvalidUtf8 { field: &'static str, offset: u32 },

    #[error("record has no field named '{0}'")]
    MissingField(String),

    #[error("field '{field}' does not hold {expected}")]
    FieldType { field: String, expected: &'static str },
}

/// A key that was asked for but is not present in a loaded table.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("no record with key {key} in table '{table}'")]
    NotFound { table: &'static str, key: String },

    #[error("table '{table}' is not loaded")]
    TableNotLoaded { table: &'static str },
}

impl LookupError {
    pub(crate) fn not_found(table: &'static str, key: impl core::fmt::Debug) -> Self {
        Self::NotFound {
            table,
            key: format!("{key:?}"),
        }
    }
}
