use super::{DbcHeader, FieldSpec, FormatError, HEADER_SIZE, LOCALE_COUNT, Record, RowReader, Scalar, Schema, Value};
use crate::Result;
use mmap_rs::{Mmap, MmapFlags, MmapOptions};
use ohno::IntoAppError;
use std::fs::File;
use std::path::{Path, PathBuf};

/// The shared NUL-terminated string pool at the end of a table file.
#[derive(Debug, Clone, Copy)]
pub struct StringBlock<'a> {
    data: &'a [u8],
}

impl<'a> StringBlock<'a> {
    #[must_use]
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    /// Resolves a string offset.
    ///
    /// Offset 0 is the empty string and is never checked against the block. Any other offset must
    /// point at the first byte of a string, i.e. the byte before it must be a NUL.
    pub fn resolve(&self, field: &'static str, offset: u32) -> Result<String, FormatError> {
        if offset == 0 {
            return Ok(String::new());
        }

        let start = offset as usize;
        let invalid = || FormatError::InvalidStringOffset {
            field,
            offset,
            block_size: self.data.len(),
        };

        if start > self.data.len() || self.data.get(start - 1) != Some(&0) {
            return Err(invalid());
        }

        let tail = &self.data[start..];
        let len = tail
            .iter()
            .position(|b| *b == 0)
            .ok_or(FormatError::UnterminatedString { field, offset })?;

        String::from_utf8(tail[..len].to_vec()).map_err(|_invalid| FormatError::InvalidUtf8 { field, offset })
    }
}

/// Validates the header and row width of `bytes`, then returns a lazy sequence of its records.
///
/// Header problems and a schema that does not match the declared row width are reported here,
/// before any row is touched. Problems inside a row (bad string offsets) surface as the failing
/// item of the sequence.
pub fn decode(bytes: &[u8], schema: Schema) -> Result<Records<'_>, FormatError> {
    let header = DbcHeader::parse(bytes)?;

    if schema.row_width() != header.record_size {
        return Err(FormatError::RowSizeMismatch {
            schema: schema.row_width(),
            declared: header.record_size,
        });
    }

    // DbcHeader::parse guarantees the whole declared layout fits in `bytes`
    let rows_end = header.string_block_start().unwrap_or(HEADER_SIZE);
    let strings_end = header.total_len().unwrap_or(rows_end);

    Ok(Records {
        header,
        rows: &bytes[HEADER_SIZE..rows_end],
        strings: StringBlock::new(&bytes[rows_end..strings_end]),
        schema,
        next_row: 0,
    })
}

/// The records of one table file, decoded on demand.
#[derive(Debug)]
pub struct Records<'a> {
    header: DbcHeader,
    rows: &'a [u8],
    strings: StringBlock<'a>,
    schema: Schema,
    next_row: usize,
}

impl Records<'_> {
    #[must_use]
    pub const fn header(&self) -> &DbcHeader {
        &self.header
    }
}

impl Iterator for Records<'_> {
    type Item = Result<Record, FormatError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next_row >= self.header.record_count {
            return None;
        }

        let start = self.next_row * self.header.record_size;
        self.next_row += 1;

        let row = self.rows.get(start..start + self.header.record_size)?;
        Some(decode_row(row, self.strings, self.schema))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.header.record_count - self.next_row;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Records<'_> {}

fn decode_row(row: &[u8], strings: StringBlock<'_>, schema: Schema) -> Result<Record, FormatError> {
    let mut reader = RowReader::new(row);
    let mut record = Record::with_capacity(schema.named_field_count());

    for field in schema.fields() {
        let value = match *field {
            FieldSpec::Int32(_) => read_scalar(&mut reader, strings, "", Scalar::Int32)?,
            FieldSpec::UInt32(_) => read_scalar(&mut reader, strings, "", Scalar::UInt32)?,
            FieldSpec::UInt64(_) => read_scalar(&mut reader, strings, "", Scalar::UInt64)?,
            FieldSpec::Float(_) => read_scalar(&mut reader, strings, "", Scalar::Float)?,
            FieldSpec::Byte(_) => read_scalar(&mut reader, strings, "", Scalar::Byte)?,
            FieldSpec::Str(name) => read_scalar(&mut reader, strings, name, Scalar::Str)?,
            FieldSpec::Localization(name) => {
                let mut slots = Vec::with_capacity(LOCALE_COUNT);
                for _ in 0..LOCALE_COUNT {
                    slots.push(Value::Text(strings.resolve(name, reader.read_u32()?)?));
                }

                // flag word
                reader.skip(4)?;
                Some(Value::Sequence(slots))
            }
            FieldSpec::Array(name, element, count) => {
                let mut items = Vec::with_capacity(count);
                for _ in 0..count {
                    if let Some(item) = read_scalar(&mut reader, strings, name, element)? {
                        items.push(item);
                    }
                }
                Some(Value::Sequence(items))
            }
            FieldSpec::Pad(bytes) => {
                reader.skip(bytes)?;
                None
            }
        };

        if let (Some(name), Some(value)) = (field.name(), value) {
            record.insert(name, value);
        }
    }

    Ok(record)
}

fn read_scalar(
    reader: &mut RowReader<'_>,
    strings: StringBlock<'_>,
    name: &'static str,
    scalar: Scalar,
) -> Result<Option<Value>, FormatError> {
    Ok(Some(match scalar {
        Scalar::Int32 => Value::Int(i64::from(reader.read_i32()?)),
        Scalar::UInt32 => Value::UInt(u64::from(reader.read_u32()?)),
        Scalar::UInt64 => Value::UInt(reader.read_u64()?),
        Scalar::Float => Value::Float(reader.read_f32()?),
        Scalar::Byte => Value::UInt(u64::from(reader.read_byte()?)),
        Scalar::Str => Value::Text(strings.resolve(name, reader.read_u32()?)?),
        Scalar::Pad(bytes) => {
            reader.skip(bytes)?;
            return Ok(None);
        }
    }))
}

/// A table file mapped into memory.
#[derive(Debug)]
pub struct DbcFile {
    path: PathBuf,

    // empty files cannot be mapped
    mmap: Option<Mmap>,
}

impl DbcFile {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).into_app_err_with(|| format!("unable to open table file '{}'", path.display()))?;

        let metadata = file
            .metadata()
            .into_app_err_with(|| format!("unable to get metadata for '{}'", path.display()))?;
        #[expect(
            clippy::cast_possible_truncation,
            reason = "Table files won't exceed usize::MAX on any supported platform"
        )]
        let file_size = metadata.len() as usize;

        let mmap = if file_size == 0 {
            None
        } else {
            // SAFETY: The mapping is read-only and table files are not modified while the tool runs.
            let mmap = unsafe {
                MmapOptions::new(file_size)
                    .into_app_err_with(|| format!("unable to create mmap options for '{}'", path.display()))?
                    .with_flags(MmapFlags::SEQUENTIAL)
                    .with_file(&file, 0)
                    .map()
                    .into_app_err_with(|| format!("unable to memory-map '{}'", path.display()))?
            };
            Some(mmap)
        };

        Ok(Self {
            path: path.to_path_buf(),
            mmap,
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        self.mmap.as_ref().map_or(&[], |mmap| &mmap[..])
    }

    pub fn decode(&self, schema: Schema) -> Result<Records<'_>, FormatError> {
        decode(self.bytes(), schema)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dbc::testing::DbcBuilder;

    const STRING_FIELDS: &[FieldSpec] = &[FieldSpec::Int32("ID"), FieldSpec::Str("Name")];
    const ARRAY_FIELDS: &[FieldSpec] = &[FieldSpec::Array("Values", Scalar::Int32, 3)];
    const MIXED_FIELDS: &[FieldSpec] = &[
        FieldSpec::UInt32("ID"),
        FieldSpec::Pad(4),
        FieldSpec::Localization("Title"),
        FieldSpec::Array("Mixed", Scalar::Pad(4), 2),
        FieldSpec::Byte("Flag"),
        FieldSpec::Pad(3),
        FieldSpec::Float("Scale"),
    ];

    fn raw_table(record_size: i32, rows: &[u8], strings: &[u8]) -> Vec<u8> {
        let record_count = if record_size == 0 { 0 } else { rows.len() as i32 / record_size };
        let mut bytes = b"WDBC".to_vec();
        for value in [record_count, record_size / 4, record_size, strings.len() as i32] {
            bytes.extend_from_slice(&value.to_le_bytes());
        }
        bytes.extend_from_slice(rows);
        bytes.extend_from_slice(strings);
        bytes
    }

    #[test]
    fn test_string_block_slices() {
        let block = StringBlock::new(b"Hello\0World\0");
        assert_eq!(block.resolve("Name", 0).unwrap(), "");
        assert_eq!(block.resolve("Name", 6).unwrap(), "World");
        assert_eq!(
            block.resolve("Name", 1),
            Err(FormatError::InvalidStringOffset {
                field: "Name",
                offset: 1,
                block_size: 12,
            })
        );
    }

    #[test]
    fn test_string_offset_past_block() {
        let block = StringBlock::new(b"\0abc\0");
        assert!(matches!(block.resolve("Name", 6), Err(FormatError::InvalidStringOffset { .. })));
        assert!(matches!(block.resolve("Name", 5), Err(FormatError::UnterminatedString { .. })));
    }

    #[test]
    fn test_string_offset_zero_is_empty_even_with_empty_block() {
        assert_eq!(StringBlock::new(b"").resolve("Name", 0).unwrap(), "");
    }

    #[test]
    fn test_bad_signature_rejected_before_rows() {
        let mut bytes = raw_table(8, &[1, 0, 0, 0, 0, 0, 0, 0], b"\0");
        bytes[0] = b'X';
        assert!(matches!(
            decode(&bytes, Schema::new(STRING_FIELDS)),
            Err(FormatError::BadSignature { .. })
        ));
    }

    #[test]
    fn test_row_size_mismatch() {
        let bytes = raw_table(12, &[0; 12], b"\0");
        assert_eq!(
            decode(&bytes, Schema::new(STRING_FIELDS)).err(),
            Some(FormatError::RowSizeMismatch { schema: 8, declared: 12 })
        );
    }

    #[test]
    fn test_array_decode() {
        let bytes = raw_table(12, &[1, 0, 0, 0, 2, 0, 0, 0, 3, 0, 0, 0], b"");
        let records: Vec<_> = decode(&bytes, Schema::new(ARRAY_FIELDS)).unwrap().collect::<Result<_, _>>().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].i32s("Values").unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_strings_resolved_per_row() {
        let rows = [7, 0, 0, 0, 1, 0, 0, 0, 8, 0, 0, 0, 0, 0, 0, 0];
        let bytes = raw_table(8, &rows, b"\0Fireball\0");
        let records: Vec<_> = decode(&bytes, Schema::new(STRING_FIELDS)).unwrap().collect::<Result<_, _>>().unwrap();
        assert_eq!(records[0].i32("ID").unwrap(), 7);
        assert_eq!(records[0].text("Name").unwrap(), "Fireball");
        assert_eq!(records[1].text("Name").unwrap(), "");
    }

    #[test]
    fn test_mid_string_offset_fails_only_that_row() {
        let rows = [1, 0, 0, 0, 1, 0, 0, 0, 2, 0, 0, 0, 3, 0, 0, 0];
        let bytes = raw_table(8, &rows, b"\0Fireball\0");
        let results: Vec<_> = decode(&bytes, Schema::new(STRING_FIELDS)).unwrap().collect();
        assert!(results[0].is_ok());
        assert!(matches!(results[1], Err(FormatError::InvalidStringOffset { offset: 3, .. })));
    }

    #[test]
    fn test_padding_is_dropped() {
        let schema = Schema::new(MIXED_FIELDS);
        let bytes = DbcBuilder::new(schema)
            .row(&[
                ("ID", Value::UInt(42)),
                ("Title", Value::Text("the Patient".into())),
                ("Flag", Value::UInt(1)),
                ("Scale", Value::Float(0.5)),
            ])
            .build();

        let mut records = decode(&bytes, schema).unwrap();
        assert_eq!(records.len(), 1);
        let record = records.next().unwrap().unwrap();

        assert_eq!(record.len(), 5);
        assert_eq!(record.u32("ID").unwrap(), 42);
        assert_eq!(record.localized("Title").unwrap(), "the Patient");
        assert_eq!(record.texts("Title").unwrap().len(), LOCALE_COUNT);
        assert_eq!(record.get("Mixed"), Some(&Value::Sequence(Vec::new())));
        assert_eq!(record.u32("Flag").unwrap(), 1);
        assert!((record.f32("Scale").unwrap() - 0.5).abs() < f32::EPSILON);
        assert!(records.next().is_none());
    }

    #[test]
    fn test_records_can_be_decoded_again() {
        let bytes = raw_table(12, &[1, 0, 0, 0, 2, 0, 0, 0, 3, 0, 0, 0], b"");
        let schema = Schema::new(ARRAY_FIELDS);
        let first: Vec<_> = decode(&bytes, schema).unwrap().collect();
        let second: Vec<_> = decode(&bytes, schema).unwrap().collect();
        assert_eq!(first, second);
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot memory-map files")]
    fn test_open_mapped_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("Test.dbc");
        std::fs::write(&path, raw_table(12, &[1, 0, 0, 0, 2, 0, 0, 0, 3, 0, 0, 0], b"")).unwrap();

        let file = DbcFile::open(&path).unwrap();
        assert_eq!(file.path(), path.as_path());
        assert_eq!(file.decode(Schema::new(ARRAY_FIELDS)).unwrap().count(), 1);
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_open_empty_file_is_truncated() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("Empty.dbc");
        std::fs::write(&path, b"").unwrap();

        let file = DbcFile::open(&path).unwrap();
        assert!(matches!(file.decode(Schema::new(ARRAY_FIELDS)), Err(FormatError::Truncated(_))));
    }

    #[test]
    fn test_open_missing_file() {
        let err = DbcFile::open("/nonexistent/Spell.dbc").unwrap_err();
        assert!(err.to_string().contains("unable to open table file"));
    }
}
