use super::LoadReport;
use core::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

/// Running totals of one registry load, bumped by each load task as its table finishes.
#[derive(Debug, Default)]
pub struct LoadCounter {
    total: u64,
    finished: AtomicU64,
    failed: AtomicU64,
    last_table: Mutex<&'static str>,
}

impl LoadCounter {
    #[must_use]
    pub fn new(total: u64) -> Self {
        Self { total, ..Self::default() }
    }

    pub fn table_finished(&self, table: &'static str, ok: bool) {
        if !ok {
            let _ = self.failed.fetch_add(1, Ordering::Relaxed);
        }
        *self.last_table.lock().expect("lock poisoned") = table;
        let _ = self.finished.fetch_add(1, Ordering::Relaxed);
    }

    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    pub fn finished(&self) -> u64 {
        self.finished.load(Ordering::Relaxed)
    }

    pub fn failed(&self) -> u64 {
        self.failed.load(Ordering::Relaxed)
    }

    /// The table that finished most recently, empty before the first one.
    pub fn last_table(&self) -> &'static str {
        *self.last_table.lock().expect("lock poisoned")
    }
}

/// Receives the progress of [`Registry::load`](super::Registry::load).
pub trait Progress: Send + Sync {
    /// Loading has started. `counter` keeps changing until [`Progress::done`] is called.
    fn start(&self, counter: Arc<LoadCounter>);

    /// Every table has finished loading.
    fn done(&self, report: &LoadReport);
}

/// Progress sink that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentProgress;

impl Progress for SilentProgress {
    fn start(&self, _counter: Arc<LoadCounter>) {}

    fn done(&self, _report: &LoadReport) {}
}
