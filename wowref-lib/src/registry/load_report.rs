use core::time::Duration;
use strum::Display;

/// Where a loaded table's rows came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum LoadSource {
    #[strum(serialize = "decoded")]
    Decoded,

    #[strum(serialize = "cache")]
    Cache,
}

/// The result of loading one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOutcome {
    pub table: &'static str,
    pub ok: bool,

    /// Rows in the loaded table, `None` when loading failed.
    pub record_count: Option<usize>,
    pub elapsed: Duration,
    pub source: LoadSource,

    /// Why loading failed.
    pub error: Option<String>,
}

impl LoadOutcome {
    #[must_use]
    pub const fn loaded(table: &'static str, record_count: usize, elapsed: Duration, source: LoadSource) -> Self {
        Self {
            table,
            ok: true,
            record_count: Some(record_count),
            elapsed,
            source,
            error: None,
        }
    }

    #[must_use]
    pub const fn failed(table: &'static str, elapsed: Duration, error: String) -> Self {
        Self {
            table,
            ok: false,
            record_count: None,
            elapsed,
            source: LoadSource::Decoded,
            error: Some(error),
        }
    }
}

/// One outcome per table, in registry order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub outcomes: Vec<LoadOutcome>,
}

impl LoadReport {
    pub fn failed(&self) -> impl Iterator<Item = &LoadOutcome> {
        self.outcomes.iter().filter(|outcome| !outcome.ok)
    }

    #[must_use]
    pub fn all_ok(&self) -> bool {
        self.outcomes.iter().all(|outcome| outcome.ok)
    }

    #[must_use]
    pub fn total_records(&self) -> usize {
        self.outcomes.iter().filter_map(|outcome| outcome.record_count).sum()
    }

    #[must_use]
    pub fn outcome(&self, table: &str) -> Option<&LoadOutcome> {
        self.outcomes.iter().find(|outcome| outcome.table == table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_totals() {
        let report = LoadReport {
            outcomes: vec![
                LoadOutcome::loaded("Spell", 10, Duration::from_millis(5), LoadSource::Cache),
                LoadOutcome::failed("Map", Duration::ZERO, "bad signature".into()),
                LoadOutcome::loaded("Item", 3, Duration::from_millis(1), LoadSource::Decoded),
            ],
        };

        assert!(!report.all_ok());
        assert_eq!(report.total_records(), 13);
        assert_eq!(report.failed().map(|outcome| outcome.table).collect::<Vec<_>>(), vec!["Map"]);
        assert_eq!(report.outcome("Spell").unwrap().source, LoadSource::Cache);
        assert!(report.outcome("Talent").is_none());
    }

    #[test]
    fn test_source_display() {
        assert_eq!(LoadSource::Decoded.to_string(), "decoded");
        assert_eq!(LoadSource::Cache.to_string(), "cache");
    }
}
