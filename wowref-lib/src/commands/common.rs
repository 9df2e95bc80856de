//! Argument handling and setup shared by the commands that load tables.

use super::ProgressReporter;
use super::config::Config;
use crate::Result;
use crate::registry::{LoadReport, Registry};
use camino::Utf8PathBuf;
use clap::{Args, ValueEnum};
use core::time::Duration;
use ohno::IntoAppError;
use std::io::IsTerminal;

const LOG_TARGET: &str = "  commands";

/// Color mode configuration for output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Always use colors
    Always,

    /// Never use colors
    Never,

    /// Use colors if the output is a terminal, otherwise don't use colors
    Auto,
}

impl ColorMode {
    /// Whether to emit colors on a stream that may or may not be a terminal.
    pub fn use_colors(self, stream: &impl IsTerminal) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => stream.is_terminal(),
        }
    }
}

/// Log level for diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    None,

    /// Only error messages
    Error,

    /// Warning and error messages
    Warn,

    /// Info, warning, and error messages
    Info,

    /// Debug, info, warning, and error messages
    Debug,

    /// Trace, debug, info, warning, and error messages
    Trace,
}

/// Arguments shared by every command that loads the tables
#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Path to configuration file (default is `wowref.toml` in the current directory)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// Directory holding the table files
    #[arg(long, value_name = "PATH", env = "WOWREF_DBC_DIR")]
    pub dbc_dir: Option<Utf8PathBuf>,

    /// Directory where decode-cache side-cars are kept
    #[arg(long, value_name = "PATH")]
    pub cache_dir: Option<Utf8PathBuf>,

    /// Number of tables decoded at the same time
    #[arg(long, value_name = "N")]
    pub concurrency: Option<usize>,

    /// Always decode table files, ignoring and not writing side-cars
    #[arg(long)]
    pub no_decode_cache: bool,

    /// Control when to use colored output
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: ColorMode,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none", global = true)]
    pub log_level: LogLevel,
}

impl CommonArgs {
    /// Reads the configuration file and applies the command-line overrides on top of it.
    pub fn config(&self) -> Result<Config> {
        let base_dir = std::env::current_dir().into_app_err("determining the current directory")?;
        let base_dir = Utf8PathBuf::try_from(base_dir).into_app_err("the current directory is not valid UTF-8")?;
        let config = Config::load(&base_dir, self.config.as_ref())?;
        self.apply(config)
    }

    fn apply(&self, mut config: Config) -> Result<Config> {
        if let Some(dbc_dir) = &self.dbc_dir {
            config.dbc_dir.clone_from(dbc_dir);
        }

        if let Some(cache_dir) = &self.cache_dir {
            config.cache_dir = Some(cache_dir.clone());
        }

        if let Some(concurrency) = self.concurrency {
            config.concurrency = concurrency;
        }

        if self.no_decode_cache {
            config.decode_cache = false;
        }

        config.validate()?;
        Ok(config)
    }
}

/// Initialize logger based on log level
pub fn init_logging(log_level: LogLevel) {
    let level = match log_level {
        LogLevel::None => return,
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    };

    let env = env_logger::Env::default().filter_or("RUST_LOG", level);

    // a second command run in the same process keeps the first logger
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(matches!(log_level, LogLevel::Debug | LogLevel::Trace))
        .try_init();
}

/// Sets up logging, resolves the configuration and loads every table.
pub async fn load_registry(args: &CommonArgs) -> Result<(Registry, LoadReport)> {
    init_logging(args.log_level);

    let config = args.config()?;
    let options = config.load_options();
    log::info!(target: LOG_TARGET, "Loading tables from '{}'", config.dbc_dir);

    // the bar would interleave with log lines
    let delay = if args.log_level == LogLevel::None {
        Duration::from_millis(300)
    } else {
        Duration::from_hours(365 * 24)
    };

    let progress = ProgressReporter::new(delay, args.color.use_colors(&std::io::stderr()));
    Ok(Registry::load(&options, &progress).await)
}
