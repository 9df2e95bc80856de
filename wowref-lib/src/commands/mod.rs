//! Command-line interface and orchestration for wowref
//!
//! # Commands
//!
//! - **load**: Load every table and print one status line per table
//! - **describe**: Load the tables, then print the formatted description of each given spell
//! - **init**: Generate a default configuration file
//!
//! The `run` function parses command-line arguments using clap and routes to the appropriate
//! command handler. Commands that load tables share the `common` module, which merges the
//! configuration file with command-line overrides, sets up logging and drives the registry load
//! behind a delayed progress bar.
//!
//! Configuration is a TOML file, `wowref.toml`, describing where the table files live and how
//! they are loaded.

mod common;
mod config;
mod describe;
mod host;
mod init;
mod load;
mod progress_reporter;
mod run;

#[cfg(debug_assertions)]
pub use config::Config;

pub use describe::{DescribeArgs, describe_spells};
pub use host::Host;
pub use init::{InitArgs, init_config};
pub use load::{LoadArgs, load_tables};
pub use progress_reporter::ProgressReporter;
pub use run::run;
