use crate::registry::{LoadCounter, LoadReport, Progress};
use core::time::Duration;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::{Arc, Mutex};
use std::time::Instant;
use tokio::task::JoinHandle;

const LOG_TARGET: &str = "  progress";

const REFRESH_INTERVAL: Duration = Duration::from_millis(100);

const TEMPLATE: &str = "{prefix:>12.bold.cyan} [{bar:25}] {pos}/{len} {msg}";
const TEMPLATE_NO_COLOR: &str = "{prefix:>12} [{bar:25}] {pos}/{len} {msg}";

/// A table-count bar on stderr that stays hidden unless loading outlasts `delay`.
///
/// [`Progress::start`] must be called from within a tokio runtime.
#[derive(Debug)]
pub struct ProgressReporter {
    bar: ProgressBar,
    delay: Duration,
    use_colors: bool,
    ticker: Mutex<Option<JoinHandle<()>>>,
}

impl ProgressReporter {
    #[must_use]
    pub fn new(delay: Duration, use_colors: bool) -> Self {
        Self {
            bar: ProgressBar::hidden(),
            delay,
            use_colors,
            ticker: Mutex::new(None),
        }
    }

    fn stop_ticker(&self) {
        if let Some(ticker) = self.ticker.lock().expect("lock poisoned").take() {
            ticker.abort();
        }
    }
}

impl Progress for ProgressReporter {
    fn start(&self, counter: Arc<LoadCounter>) {
        self.stop_ticker();

        let template = if self.use_colors { TEMPLATE } else { TEMPLATE_NO_COLOR };
        self.bar.set_style(
            ProgressStyle::default_bar()
                .template(template)
                .expect("could not create progress bar style")
                .progress_chars("=> "),
        );
        self.bar.set_prefix("Loading");
        self.bar.set_length(counter.total());
        self.bar.set_position(0);

        let ticker = tokio::spawn(tick(self.bar.clone(), Instant::now() + self.delay, counter));
        *self.ticker.lock().expect("lock poisoned") = Some(ticker);
    }

    fn done(&self, report: &LoadReport) {
        self.stop_ticker();
        self.bar.finish_and_clear();
        log::debug!(
            target: LOG_TARGET,
            "Loaded {} of {} tables",
            report.outcomes.len() - report.failed().count(),
            report.outcomes.len()
        );
    }
}

/// Mirrors `counter` into `bar` until aborted, drawing to stderr from `visible_after` on.
async fn tick(bar: ProgressBar, visible_after: Instant, counter: Arc<LoadCounter>) {
    let mut interval = tokio::time::interval(REFRESH_INTERVAL);
    let mut visible = false;

    #[expect(clippy::infinite_loop, reason = "task runs until aborted")]
    loop {
        let _ = interval.tick().await;

        if !visible {
            if Instant::now() < visible_after {
                continue;
            }
            visible = true;
            bar.set_draw_target(ProgressDrawTarget::stderr_with_hz(10));
        }

        bar.set_position(counter.finished());
        let failed = counter.failed();
        if failed == 0 {
            bar.set_message(counter.last_table());
        } else {
            bar.set_message(format!("{} ({failed} failed)", counter.last_table()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{LoadOptions, Registry};

    #[tokio::test]
    async fn test_stays_still_until_delay() {
        let reporter = ProgressReporter::new(Duration::from_secs(3600), false);
        let counter = Arc::new(LoadCounter::new(4));
        reporter.start(Arc::clone(&counter));
        counter.table_finished("Spell", true);
        tokio::time::sleep(3 * REFRESH_INTERVAL).await;

        assert_eq!(reporter.bar.length(), Some(4));
        assert_eq!(reporter.bar.position(), 0);
        assert_eq!(reporter.bar.prefix(), "Loading");
        reporter.done(&LoadReport::default());
        assert!(reporter.ticker.lock().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_follows_finished_tables() {
        let reporter = ProgressReporter::new(Duration::ZERO, false);
        let counter = Arc::new(LoadCounter::new(3));
        reporter.start(Arc::clone(&counter));
        counter.table_finished("Spell", true);
        counter.table_finished("Map", false);
        tokio::time::sleep(3 * REFRESH_INTERVAL).await;

        assert_eq!(reporter.bar.position(), 2);
        assert_eq!(reporter.bar.message(), "Map (1 failed)");
        reporter.done(&LoadReport::default());
    }

    #[tokio::test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    async fn test_drives_registry_load() {
        let tmp = tempfile::tempdir().unwrap();
        let reporter = ProgressReporter::new(Duration::ZERO, false);

        let (registry, report) = Registry::load(&LoadOptions::new(tmp.path()), &reporter).await;

        assert!(!report.all_ok());
        assert!(registry.spell().is_err());
        assert_eq!(report.failed().count(), report.outcomes.len());
        assert!(reporter.ticker.lock().unwrap().is_none());
    }
}
