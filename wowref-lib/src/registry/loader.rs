use super::decode_cache;
use super::{LoadOptions, LoadOutcome, LoadSource};
use crate::Result;
use crate::tables::Table;
use ohno::IntoAppError;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::time::Instant;

const LOG_TARGET: &str = "    loader";

/// Decodes a table from its file.
pub fn load_table<T: Table>(options: &LoadOptions) -> (Option<T>, LoadOutcome) {
    let start = Instant::now();
    let result = T::open(&options.dbc_dir).map(|table| (table, LoadSource::Decoded));
    finish(start, result)
}

/// Like [`load_table`], but goes through the decode cache when it is enabled.
pub fn load_cached_table<T>(options: &LoadOptions) -> (Option<T>, LoadOutcome)
where
    T: Table,
    T::Key: Serialize + DeserializeOwned,
    T::Row: Serialize + DeserializeOwned,
{
    if !options.decode_cache {
        return load_table(options);
    }

    let start = Instant::now();
    finish(start, open_cached(options))
}

fn open_cached<T>(options: &LoadOptions) -> Result<(T, LoadSource)>
where
    T: Table,
    T::Key: Serialize + DeserializeOwned,
    T::Row: Serialize + DeserializeOwned,
{
    let source = options.dbc_dir.join(T::FILE_NAME);
    let source_len = fs::metadata(&source)
        .into_app_err_with(|| format!("unable to get metadata for '{}'", source.display()))?
        .len();

    let side_car = decode_cache::side_car_path(&options.cache_dir, T::FILE_NAME);
    if let Some(table) = decode_cache::load::<T>(&side_car, source_len) {
        return Ok((table, LoadSource::Cache));
    }

    let table = T::open(&options.dbc_dir)?;
    if let Err(e) = decode_cache::save(&table, &side_car, source_len) {
        log::warn!(target: LOG_TARGET, "Unable to write decode cache for '{}': {e:#}", T::NAME);
    }

    Ok((table, LoadSource::Decoded))
}

fn finish<T: Table>(start: Instant, result: Result<(T, LoadSource)>) -> (Option<T>, LoadOutcome) {
    let elapsed = start.elapsed();
    match result {
        Ok((table, source)) => {
            log::info!(
                target: LOG_TARGET,
                "Loaded '{}': {} records in {:.3}s ({source})",
                T::NAME,
                table.len(),
                elapsed.as_secs_f64()
            );
            let outcome = LoadOutcome::loaded(T::NAME, table.len(), elapsed, source);
            (Some(table), outcome)
        }
        Err(e) => {
            log::warn!(target: LOG_TARGET, "Unable to load '{}': {e:#}", T::NAME);
            (None, LoadOutcome::failed(T::NAME, elapsed, format!("{e:#}")))
        }
    }
}
