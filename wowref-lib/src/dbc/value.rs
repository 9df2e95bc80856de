use super::FormatError;
use crate::HashMap;

/// A decoded field value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    UInt(u64),
    Float(f32),
    Text(String),
    Sequence(Vec<Value>),
}

impl Value {
    /// Either integer variant, if it fits in an `i64`.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Self::Int(v) => Some(v),
            Self::UInt(v) => i64::try_from(v).ok(),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_u64(&self) -> Option<u64> {
        match *self {
            Self::UInt(v) => Some(v),
            Self::Int(v) => u64::try_from(v).ok(),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_f32(&self) -> Option<f32> {
        match *self {
            Self::Float(v) => Some(v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_sequence(&self) -> Option<&[Self]> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }
}

/// One decoded row: field name to value.
///
/// Padding never shows up here. Accessors report a [`FormatError`] when a field is missing or holds
/// a different kind of value than asked for.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: HashMap<&'static str, Value>,
}

impl Record {
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let mut fields = HashMap::default();
        fields.reserve(capacity);
        Self { fields }
    }

    pub fn insert(&mut self, name: &'static str, value: Value) {
        let _ = self.fields.insert(name, value);
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Value)> {
        self.fields.iter().map(|(name, value)| (*name, value))
    }

    fn field(&self, name: &str) -> Result<&Value, FormatError> {
        self.get(name).ok_or_else(|| FormatError::MissingField(name.to_string()))
    }

    fn sequence(&self, name: &str) -> Result<&[Value], FormatError> {
        self.field(name)?.as_sequence().ok_or_else(|| type_error(name, "a sequence"))
    }

    /// An integer field converted to `T`.
    pub fn int<T: TryFrom<i64>>(&self, name: &str) -> Result<T, FormatError> {
        integer(self.field(name)?, name)
    }

    /// An integer array field with every element converted to `T`.
    pub fn ints<T: TryFrom<i64>>(&self, name: &str) -> Result<Vec<T>, FormatError> {
        self.sequence(name)?.iter().map(|value| integer(value, name)).collect()
    }

    /// An integer array field of exactly `N` elements.
    pub fn int_array<T: TryFrom<i64>, const N: usize>(&self, name: &str) -> Result<[T; N], FormatError> {
        self.ints(name)?
            .try_into()
            .map_err(|_rejected: Vec<T>| type_error(name, "a sequence of the declared length"))
    }

    /// A reference to another table's row. Zero and negative values mean there is none.
    pub fn reference<T: TryFrom<i64>>(&self, name: &str) -> Result<Option<T>, FormatError> {
        let value = self.field(name)?.as_i64().ok_or_else(|| type_error(name, "an integer"))?;
        Ok(positive(value))
    }

    /// An array of references with the empty slots kept as `None`.
    pub fn references<T: TryFrom<i64>>(&self, name: &str) -> Result<Vec<Option<T>>, FormatError> {
        self.sequence(name)?
            .iter()
            .map(|value| value.as_i64().map(positive).ok_or_else(|| type_error(name, "a sequence of integers")))
            .collect()
    }

    pub fn i32(&self, name: &str) -> Result<i32, FormatError> {
        self.int(name)
    }

    pub fn u32(&self, name: &str) -> Result<u32, FormatError> {
        self.int(name)
    }

    pub fn u64(&self, name: &str) -> Result<u64, FormatError> {
        self.field(name)?.as_u64().ok_or_else(|| type_error(name, "an unsigned 64-bit integer"))
    }

    pub fn f32(&self, name: &str) -> Result<f32, FormatError> {
        self.field(name)?.as_f32().ok_or_else(|| type_error(name, "a float"))
    }

    pub fn text(&self, name: &str) -> Result<&str, FormatError> {
        self.field(name)?.as_text().ok_or_else(|| type_error(name, "text"))
    }

    pub fn i32s(&self, name: &str) -> Result<Vec<i32>, FormatError> {
        self.ints(name)
    }

    pub fn u32s(&self, name: &str) -> Result<Vec<u32>, FormatError> {
        self.ints(name)
    }

    pub fn f32s(&self, name: &str) -> Result<Vec<f32>, FormatError> {
        self.sequence(name)?
            .iter()
            .map(|value| value.as_f32().ok_or_else(|| type_error(name, "a sequence of floats")))
            .collect()
    }

    pub fn f32_array<const N: usize>(&self, name: &str) -> Result<[f32; N], FormatError> {
        self.f32s(name)?
            .try_into()
            .map_err(|_rejected: Vec<f32>| type_error(name, "a sequence of the declared length"))
    }

    pub fn texts(&self, name: &str) -> Result<Vec<String>, FormatError> {
        self.sequence(name)?
            .iter()
            .map(|value| {
                value
                    .as_text()
                    .map(ToString::to_string)
                    .ok_or_else(|| type_error(name, "a sequence of strings"))
            })
            .collect()
    }

    /// The first locale slot (enUS) of a localized field.
    pub fn localized(&self, name: &str) -> Result<&str, FormatError> {
        self.sequence(name)?
            .first()
            .and_then(Value::as_text)
            .ok_or_else(|| type_error(name, "a localized string"))
    }
}

fn integer<T: TryFrom<i64>>(value: &Value, name: &str) -> Result<T, FormatError> {
    value
        .as_i64()
        .and_then(|v| T::try_from(v).ok())
        .ok_or_else(|| type_error(name, "an integer in range"))
}

fn positive<T: TryFrom<i64>>(value: i64) -> Option<T> {
    if value > 0 { T::try_from(value).ok() } else { None }
}

fn type_error(name: &str, expected: &'static str) -> FormatError {
    FormatError::FieldType {
        field: name.to_string(),
        expected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Record {
        let mut record = Record::default();
        record.insert("ID", Value::UInt(17));
        record.insert("Delta", Value::Int(-3));
        record.insert("Radius", Value::Float(2.5));
        record.insert("Points", Value::Sequence(vec![Value::Int(1), Value::Int(-2), Value::Int(3)]));
        record.insert(
            "Name",
            Value::Sequence(vec![Value::Text("Frostbolt".into()), Value::Text(String::new())]),
        );
        record
    }

    #[test]
    fn test_integer_accessors_cross_signedness() {
        let record = sample();
        assert_eq!(record.i32("ID").unwrap(), 17);
        assert_eq!(record.u32("ID").unwrap(), 17);
        assert_eq!(record.i32("Delta").unwrap(), -3);
        assert!(matches!(record.u32("Delta"), Err(FormatError::FieldType { .. })));
    }

    #[test]
    fn test_references_treat_non_positive_as_none() {
        let record = sample();
        assert_eq!(record.reference::<u32>("ID").unwrap(), Some(17));
        assert_eq!(record.reference::<u32>("Delta").unwrap(), None);
        assert_eq!(record.references::<u32>("Points").unwrap(), vec![Some(1), None, Some(3)]);
        assert!(matches!(record.reference::<u32>("Radius"), Err(FormatError::FieldType { .. })));
    }

    #[test]
    fn test_missing_field() {
        let record = sample();
        assert_eq!(record.i32("Nope"), Err(FormatError::MissingField("Nope".into())));
    }

    #[test]
    fn test_wrong_kind() {
        let record = sample();
        assert!(matches!(record.text("ID"), Err(FormatError::FieldType { .. })));
        assert!(matches!(record.f32("ID"), Err(FormatError::FieldType { .. })));
    }

    #[test]
    fn test_arrays() {
        let record = sample();
        assert_eq!(record.i32s("Points").unwrap(), vec![1, -2, 3]);
        assert_eq!(record.int_array::<i32, 3>("Points").unwrap(), [1, -2, 3]);
        assert!(record.int_array::<i32, 2>("Points").is_err());
    }

    #[test]
    fn test_localized_takes_first_slot() {
        let record = sample();
        assert_eq!(record.localized("Name").unwrap(), "Frostbolt");
        assert_eq!(record.texts("Name").unwrap(), vec!["Frostbolt".to_string(), String::new()]);
    }
}
