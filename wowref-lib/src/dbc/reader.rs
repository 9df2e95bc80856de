use super::FormatError;

/// Little-endian fixed-width reads over one row (or the header).
#[derive(Debug)]
pub struct RowReader<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> RowReader<'a> {
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    fn take<const N: usize>(&mut self) -> Result<[u8; N], FormatError> {
        let end = self.position.checked_add(N).filter(|end| *end <= self.data.len()).ok_or_else(|| {
            FormatError::Truncated(format!(
                "needed {N} bytes at offset {} but only {} remain",
                self.position,
                self.data.len().saturating_sub(self.position)
            ))
        })?;

        let mut bytes = [0u8; N];
        bytes.copy_from_slice(&self.data[self.position..end]);
        self.position = end;
        Ok(bytes)
    }

    pub fn read_bytes<const N: usize>(&mut self) -> Result<[u8; N], FormatError> {
        self.take()
    }

    pub fn read_byte(&mut self) -> Result<u8, FormatError> {
        let [byte] = self.take()?;
        Ok(byte)
    }

    pub fn read_i32(&mut self) -> Result<i32, FormatError> {
        self.take().map(i32::from_le_bytes)
    }

    pub fn read_u32(&mut self) -> Result<u32, FormatError> {
        self.take().map(u32::from_le_bytes)
    }

    pub fn read_u64(&mut self) -> Result<u64, FormatError> {
        self.take().map(u64::from_le_bytes)
    }

    pub fn read_f32(&mut self) -> Result<f32, FormatError> {
        self.take().map(f32::from_le_bytes)
    }

    pub fn skip(&mut self, count: usize) -> Result<(), FormatError> {
        match self.position.checked_add(count) {
            Some(end) if end <= self.data.len() => {
                self.position = end;
                Ok(())
            }
            _ => Err(FormatError::Truncated(format!(
                "cannot skip {count} bytes at offset {} of a {}-byte row",
                self.position,
                self.data.len()
            ))),
        }
    }
}
