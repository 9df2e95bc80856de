//! Synthetic table files for tests.

use super::{FieldSpec, LOCALE_COUNT, SIGNATURE, Scalar, Schema, Value};
use crate::HashMap;
use std::path::{Path, PathBuf};

type Row = Vec<(&'static str, Value)>;

/// Writes table files laid out by a [`Schema`].
///
/// Fields missing from a row are written as zero (or the empty string). A localized field accepts
/// either a single `Text`, stored in the first locale slot, or a `Sequence` of up to
/// [`LOCALE_COUNT`] texts.
#[derive(Debug)]
pub struct DbcBuilder {
    schema: Schema,
    rows: Vec<Row>,
}

impl DbcBuilder {
    pub const fn new(schema: Schema) -> Self {
        Self { schema, rows: Vec::new() }
    }

    #[must_use]
    pub fn row(mut self, values: &[(&'static str, Value)]) -> Self {
        self.rows.push(values.to_vec());
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut strings = StringPool::default();
        let mut rows = Vec::with_capacity(self.rows.len() * self.schema.row_width());

        for row in &self.rows {
            let values: HashMap<&str, &Value> = row.iter().map(|(name, value)| (*name, value)).collect();
            for field in self.schema.fields() {
                let value = field.name().and_then(|name| values.get(name).copied());
                encode_field(&mut rows, &mut strings, *field, value);
            }
        }

        let row_width = self.schema.row_width();
        let mut bytes = SIGNATURE.to_vec();
        for count in [self.rows.len(), row_width / 4, row_width, strings.data.len()] {
            bytes.extend_from_slice(&i32::try_from(count).unwrap().to_le_bytes());
        }
        bytes.extend_from_slice(&rows);
        bytes.extend_from_slice(&strings.data);
        bytes
    }

    /// Writes `<dir>/<file_name>` and returns its path.
    pub fn write_to(&self, dir: &Path, file_name: &str) -> PathBuf {
        let path = dir.join(file_name);
        std::fs::write(&path, self.build()).unwrap();
        path
    }
}

struct StringPool {
    data: Vec<u8>,
    offsets: HashMap<String, u32>,
}

impl Default for StringPool {
    fn default() -> Self {
        Self {
            data: vec![0],
            offsets: HashMap::default(),
        }
    }
}

impl StringPool {
    fn intern(&mut self, text: &str) -> u32 {
        if text.is_empty() {
            return 0;
        }

        if let Some(offset) = self.offsets.get(text) {
            return *offset;
        }

        let offset = u32::try_from(self.data.len()).unwrap();
        self.data.extend_from_slice(text.as_bytes());
        self.data.push(0);
        let _ = self.offsets.insert(text.to_string(), offset);
        offset
    }
}

fn encode_field(out: &mut Vec<u8>, strings: &mut StringPool, field: FieldSpec, value: Option<&Value>) {
    match field {
        FieldSpec::Int32(_) => encode_scalar(out, strings, Scalar::Int32, value),
        FieldSpec::UInt32(_) => encode_scalar(out, strings, Scalar::UInt32, value),
        FieldSpec::UInt64(_) => encode_scalar(out, strings, Scalar::UInt64, value),
        FieldSpec::Float(_) => encode_scalar(out, strings, Scalar::Float, value),
        FieldSpec::Byte(_) => encode_scalar(out, strings, Scalar::Byte, value),
        FieldSpec::Str(_) => encode_scalar(out, strings, Scalar::Str, value),
        FieldSpec::Localization(_) => {
            let slots: Vec<&Value> = match value {
                Some(Value::Sequence(items)) => items.iter().collect(),
                Some(text) => vec![text],
                None => Vec::new(),
            };
            assert!(slots.len() <= LOCALE_COUNT, "too many locale slots");
            for slot in 0..LOCALE_COUNT {
                encode_scalar(out, strings, Scalar::Str, slots.get(slot).copied());
            }
            out.extend_from_slice(&0u32.to_le_bytes());
        }
        FieldSpec::Array(_, element, count) => {
            let items = match value {
                Some(Value::Sequence(items)) => items.as_slice(),
                None => &[],
                Some(other) => panic!("array field given a non-sequence value {other:?}"),
            };
            let mut items = items.iter();
            for _ in 0..count {
                if let Scalar::Pad(_) = element {
                    encode_scalar(out, strings, element, None);
                } else {
                    encode_scalar(out, strings, element, items.next());
                }
            }
            assert!(items.next().is_none(), "too many array elements");
        }
        FieldSpec::Pad(bytes) => out.resize(out.len() + bytes, 0),
    }
}

fn encode_scalar(out: &mut Vec<u8>, strings: &mut StringPool, scalar: Scalar, value: Option<&Value>) {
    let int = || value.and_then(Value::as_i64).unwrap_or_default();
    match scalar {
        Scalar::Int32 => out.extend_from_slice(&i32::try_from(int()).unwrap().to_le_bytes()),
        Scalar::UInt32 => out.extend_from_slice(&u32::try_from(int()).unwrap().to_le_bytes()),
        Scalar::UInt64 => out.extend_from_slice(&value.and_then(Value::as_u64).unwrap_or_default().to_le_bytes()),
        Scalar::Float => out.extend_from_slice(&value.and_then(Value::as_f32).unwrap_or_default().to_le_bytes()),
        Scalar::Byte => out.push(u8::try_from(int()).unwrap()),
        Scalar::Str => {
            let offset = strings.intern(value.and_then(Value::as_text).unwrap_or_default());
            out.extend_from_slice(&offset.to_le_bytes());
        }
        Scalar::Pad(bytes) => out.resize(out.len() + bytes, 0),
    }
}

/// Shorthand for an integer array value.
pub fn ints(values: &[i64]) -> Value {
    Value::Sequence(values.iter().copied().map(Value::Int).collect())
}

/// Shorthand for a float array value.
pub fn floats(values: &[f32]) -> Value {
    Value::Sequence(values.iter().copied().map(Value::Float).collect())
}

/// Shorthand for a text value.
pub fn text(value: &str) -> Value {
    Value::Text(value.to_string())
}
