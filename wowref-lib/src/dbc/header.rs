use super::{FormatError, RowReader};

pub const SIGNATURE: [u8; 4] = *b"WDBC";

/// Signature plus four little-endian `i32` values.
pub const HEADER_SIZE: usize = 20;

/// The fixed header at the start of every table file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DbcHeader {
    pub record_count: usize,
    pub field_count: usize,
    pub record_size: usize,
    pub string_block_size: usize,
}

impl DbcHeader {
    /// Parses and validates the header against the length of the whole buffer.
    ///
    /// The signature is checked before anything else, so a foreign file is reported as such even
    /// when it is shorter than a header.
    pub fn parse(bytes: &[u8]) -> Result<Self, FormatError> {
        let mut reader = RowReader::new(bytes);

        let signature: [u8; 4] = reader
            .read_bytes()
            .map_err(|e| FormatError::Truncated(format!("file too short for a signature: {e}")))?;
        if signature != SIGNATURE {
            return Err(FormatError::BadSignature { found: signature });
        }

        let header = Self {
            record_count: read_count(&mut reader, "record count")?,
            field_count: read_count(&mut reader, "field count")?,
            record_size: read_count(&mut reader, "record size")?,
            string_block_size: read_count(&mut reader, "string block size")?,
        };

        let needed = header
            .total_len()
            .ok_or_else(|| FormatError::Truncated("declared table size overflows".to_string()))?;
        if bytes.len() < needed {
            return Err(FormatError::Truncated(format!(
                "header declares {needed} bytes but the file holds {}",
                bytes.len()
            )));
        }

        Ok(header)
    }

    /// Byte length of the row array.
    #[must_use]
    pub fn rows_len(&self) -> Option<usize> {
        self.record_count.checked_mul(self.record_size)
    }

    /// Offset of the string block from the start of the file.
    #[must_use]
    pub fn string_block_start(&self) -> Option<usize> {
        self.rows_len()?.checked_add(HEADER_SIZE)
    }

    /// Header, rows and string block together.
    #[must_use]
    pub fn total_len(&self) -> Option<usize> {
        self.string_block_start()?.checked_add(self.string_block_size)
    }
}

fn read_count(reader: &mut RowReader<'_>, what: &str) -> Result<usize, FormatError> {
    let value = reader
        .read_i32()
        .map_err(|e| FormatError::Truncated(format!("file too short for the {what}: {e}")))?;
    usize::try_from(value).map_err(|_negative| FormatError::Truncated(format!("negative {what}: {value}")))
}
