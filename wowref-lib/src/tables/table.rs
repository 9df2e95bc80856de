use super::TableIndex;
use crate::Result;
use crate::dbc::{DbcFile, FormatError, LookupError, Record, Schema, decode};
use core::fmt::Debug;
use core::hash::Hash;
use ohno::IntoAppError;
use std::path::Path;

/// One logical table: where it lives on disk, how its rows are laid out, and how a decoded
/// record turns into an indexed row.
pub trait Table: Sized + Send + Sync + 'static {
    type Key: Copy + Eq + Hash + Debug + Send + Sync + 'static;
    type Row: Clone + Debug + Send + Sync + 'static;

    /// Name used in logs and load reports, also the file stem.
    const NAME: &'static str;
    const FILE_NAME: &'static str;
    const SCHEMA: Schema;

    fn read_row(record: Record) -> Result<(Self::Key, Self::Row), FormatError>;
    fn from_index(index: TableIndex<Self::Key, Self::Row>) -> Self;
    fn index(&self) -> &TableIndex<Self::Key, Self::Row>;

    fn from_records(records: impl IntoIterator<Item = Result<Record, FormatError>>) -> Result<Self, FormatError> {
        let pairs = records.into_iter().map(|record| record.and_then(Self::read_row));
        Ok(Self::from_index(TableIndex::try_from_pairs(Self::NAME, pairs)?))
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, FormatError> {
        Self::from_records(decode(bytes, Self::SCHEMA)?)
    }

    fn open(dbc_dir: impl AsRef<Path>) -> Result<Self> {
        let path = dbc_dir.as_ref().join(Self::FILE_NAME);
        let file = DbcFile::open(&path)?;
        Self::from_bytes(file.bytes()).into_app_err_with(|| format!("unable to decode table file '{}'", path.display()))
    }

    fn get(&self, key: &Self::Key) -> Result<&Self::Row, LookupError> {
        self.index().get(key)
    }

    fn len(&self) -> usize {
        self.index().len()
    }

    fn is_empty(&self) -> bool {
        self.index().is_empty()
    }
}

/// Generates a table struct and its `Table` implementation from a `snake_case` name.
///
/// Creates:
/// - `{Name}Table` - Wrapper around the table's `TableIndex`
/// - `{NAME}_FIELDS` - The row layout backing `Table::SCHEMA`
/// - Implementation of `Table`, with the file name derived from the given stem (`{stem}.dbc`)
///
/// See `spell_table.rs` or `record_tables.rs` for usage examples.
macro_rules! define_table {
    (
        $(#[$meta:meta])*
        $name_snake:ident ($stem:literal): $key:ty => $row:ty {
            schema: [$($field:expr),* $(,)?],

            fn read_row($record:ident) $read_body:block
        }
    ) => {
        pastey::paste! {
            const [<$name_snake:upper _FIELDS>]: &[$crate::dbc::FieldSpec] = &[$($field),*];

            $(#[$meta])*
            #[derive(Debug, Clone, PartialEq)]
            pub struct [<$name_snake:camel Table>] {
                index: $crate::tables::TableIndex<$key, $row>,
            }

            impl $crate::tables::Table for [<$name_snake:camel Table>] {
                type Key = $key;
                type Row = $row;

                const NAME: &'static str = $stem;
                const FILE_NAME: &'static str = concat!($stem, ".dbc");
                const SCHEMA: $crate::dbc::Schema = $crate::dbc::Schema::new([<$name_snake:upper _FIELDS>]);

                fn read_row($record: $crate::dbc::Record) -> core::result::Result<(Self::Key, Self::Row), $crate::dbc::FormatError>
                    $read_body

                fn from_index(index: $crate::tables::TableIndex<Self::Key, Self::Row>) -> Self {
                    Self { index }
                }

                fn index(&self) -> &$crate::tables::TableIndex<Self::Key, Self::Row> {
                    &self.index
                }
            }
        }
    };
}

pub(crate) use define_table;
