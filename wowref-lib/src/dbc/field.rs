//! Row layout descriptions.

use crate::HashSet;

/// Number of string slots in a localized field (enUS, koKR, frFR, deDE, ... ).
pub const LOCALE_COUNT: usize = 16;

/// Width in bytes of a localized field: one offset per locale plus the trailing flag word.
pub const LOCALIZATION_WIDTH: usize = (LOCALE_COUNT + 1) * 4;

/// The element kind of an [`FieldSpec::Array`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scalar {
    Int32,
    UInt32,
    UInt64,
    Float,
    Byte,
    Str,

    /// Bytes consumed and dropped from the decoded sequence.
    Pad(usize),
}

impl Scalar {
    #[must_use]
    pub const fn width(self) -> usize {
        match self {
            Self::Int32 | Self::UInt32 | Self::Float | Self::Str => 4,
            Self::UInt64 => 8,
            Self::Byte => 1,
            Self::Pad(bytes) => bytes,
        }
    }
}

/// How one column of a row is laid out and decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldSpec {
    Int32(&'static str),
    UInt32(&'static str),
    UInt64(&'static str),
    Float(&'static str),
    Byte(&'static str),

    /// An offset into the string block.
    Str(&'static str),

    /// One string offset per locale followed by a flag word.
    Localization(&'static str),

    /// `count` consecutive elements of the same kind.
    Array(&'static str, Scalar, usize),

    /// Unused bytes. Never appears in a decoded record.
    Pad(usize),
}

impl FieldSpec {
    /// The field name, or `None` for padding.
    #[must_use]
    pub const fn name(&self) -> Option<&'static str> {
        match *self {
            Self::Int32(name)
            | Self::UInt32(name)
            | Self::UInt64(name)
            | Self::Float(name)
            | Self::Byte(name)
            | Self::Str(name)
            | Self::Localization(name)
            | Self::Array(name, _, _) => Some(name),
            Self::Pad(_) => None,
        }
    }

    /// Number of bytes this field occupies in a row.
    #[must_use]
    pub const fn width(&self) -> usize {
        match *self {
            Self::Int32(_) => Scalar::Int32.width(),
            Self::UInt32(_) => Scalar::UInt32.width(),
            Self::UInt64(_) => Scalar::UInt64.width(),
            Self::Float(_) => Scalar::Float.width(),
            Self::Byte(_) => Scalar::Byte.width(),
            Self::Str(_) => Scalar::Str.width(),
            Self::Localization(_) => LOCALIZATION_WIDTH,
            Self::Array(_, element, count) => element.width() * count,
            Self::Pad(bytes) => bytes,
        }
    }
}

/// An ordered list of fields describing one table's row layout.
///
/// Order defines the byte layout; once a row is decoded, fields are looked up by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schema {
    fields: &'static [FieldSpec],
}

impl Schema {
    #[must_use]
    pub const fn new(fields: &'static [FieldSpec]) -> Self {
        Self { fields }
    }

    #[must_use]
    pub const fn fields(&self) -> &'static [FieldSpec] {
        self.fields
    }

    /// Sum of the widths of every field, which must equal the table's record size.
    #[must_use]
    pub const fn row_width(&self) -> usize {
        let mut total = 0;
        let mut i = 0;
        while i < self.fields.len() {
            total += self.fields[i].width();
            i += 1;
        }
        total
    }

    /// Number of fields that show up in a decoded record.
    #[must_use]
    pub fn named_field_count(&self) -> usize {
        self.fields.iter().filter(|field| field.name().is_some()).count()
    }

    /// Returns the first field name that appears more than once, if any.
    #[must_use]
    pub fn duplicate_name(&self) -> Option<&'static str> {
        let mut seen = HashSet::default();
        self.fields.iter().filter_map(FieldSpec::name).find(|name| !seen.insert(*name))
    }
}
