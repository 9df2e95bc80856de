use crate::HashMap;
use crate::dbc::{FormatError, LookupError};
use core::fmt::Debug;
use core::hash::Hash;

const LOG_TARGET: &str = "    tables";

/// An immutable key to row mapping for one table.
///
/// When several rows share a key the last one wins; the number of replaced rows is logged.
#[derive(Debug, Clone)]
pub struct TableIndex<K, V> {
    table: &'static str,
    rows: HashMap<K, V>,
}

impl<K: Eq + Hash, V: PartialEq> PartialEq for TableIndex<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.table == other.table && self.rows == other.rows
    }
}

impl<K, V> TableIndex<K, V>
where
    K: Eq + Hash + Debug,
{
    /// Builds an index from already keyed rows.
    pub fn from_pairs(table: &'static str, pairs: impl IntoIterator<Item = (K, V)>) -> Self {
        let pairs = pairs.into_iter();
        let mut rows = HashMap::default();
        rows.reserve(pairs.size_hint().0);

        let mut replaced = 0usize;
        for (key, row) in pairs {
            if rows.insert(key, row).is_some() {
                replaced += 1;
            }
        }

        if replaced > 0 {
            log::debug!(target: LOG_TARGET, "Table '{table}' has {replaced} duplicate key(s), kept the last row for each");
        }

        Self { table, rows }
    }

    /// Builds an index from the result of decoding each row, stopping at the first failure.
    pub fn try_from_pairs(
        table: &'static str,
        pairs: impl IntoIterator<Item = Result<(K, V), FormatError>>,
    ) -> Result<Self, FormatError> {
        let pairs: Vec<_> = pairs.into_iter().collect::<Result<_, _>>()?;
        Ok(Self::from_pairs(table, pairs))
    }

    #[must_use]
    pub const fn table(&self) -> &'static str {
        self.table
    }

    pub fn get(&self, key: &K) -> Result<&V, LookupError> {
        self.rows.get(key).ok_or_else(|| LookupError::not_found(self.table, key))
    }

    #[must_use]
    pub fn get_opt(&self, key: &K) -> Option<&V> {
        self.rows.get(key)
    }

    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        self.rows.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.rows.iter()
    }
}
