#![doc(hidden)]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core library for wowref
//!
//! Decodes the client's binary table files, indexes them by key, and expands the `$` macros
//! embedded in spell descriptions into readable text.
//!
//! # Module Organization
//!
//! - [`dbc`]: Schema-driven decoding of table files
//! - [`tables`]: The concrete tables and their row projections
//! - [`registry`]: Concurrent loading of every table, plus cross-table lookups
//! - [`format`]: Spell description formatting
//! - `commands`: Command-line interface and orchestration

pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

pub(crate) type HashMap<K, V> = rustc_hash::FxHashMap<K, V>;

pub(crate) type HashSet<K> = rustc_hash::FxHashSet<K>;

pub mod dbc;
pub mod format;
pub mod registry;
pub mod tables;

#[cfg(any(debug_assertions, test))]
pub mod commands;
#[cfg(not(any(debug_assertions, test)))]
mod commands;

pub use crate::commands::{Host, run};
