//! Side-car snapshots of fully decoded tables.
//!
//! A snapshot records the length of the table file it was built from. It is only used when it
//! parses, carries the current format number and was built from a file of the same length.

use crate::Result;
use crate::tables::{Table, TableIndex};
use ohno::IntoAppError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

const LOG_TARGET: &str = "     cache";

/// Bumped whenever a cached row type changes shape.
pub const FORMAT_MAGIC: u64 = 0x5752_4546_0000_0001;

#[derive(Serialize, Deserialize)]
struct SideCar<R> {
    format: u64,
    source_len: u64,
    rows: R,
}

/// `<cache_dir>/<file name>.cache.json`
#[must_use]
pub fn side_car_path(cache_dir: &Path, file_name: &str) -> PathBuf {
    cache_dir.join(format!("{file_name}.cache.json"))
}

/// Reads a snapshot, returning `None` on any miss.
pub fn load<T>(path: &Path, source_len: u64) -> Option<T>
where
    T: Table,
    T::Key: DeserializeOwned,
    T::Row: DeserializeOwned,
{
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) => {
            log::debug!(target: LOG_TARGET, "Cache miss for '{}': {e:#}", T::NAME);
            return None;
        }
    };

    let side_car: SideCar<Vec<(T::Key, T::Row)>> = match serde_json::from_reader(BufReader::new(file)) {
        Ok(side_car) => side_car,
        Err(e) => {
            log::debug!(target: LOG_TARGET, "Cache miss for '{}': {e:#}", T::NAME);
            return None;
        }
    };

    if side_car.format != FORMAT_MAGIC {
        log::debug!(target: LOG_TARGET, "Cache miss for '{}': format {:#x} is stale", T::NAME, side_car.format);
        return None;
    }

    if side_car.source_len != source_len {
        log::debug!(
            target: LOG_TARGET,
            "Cache miss for '{}': built from {} bytes, table file is now {source_len} bytes",
            T::NAME,
            side_car.source_len
        );
        return None;
    }

    log::debug!(target: LOG_TARGET, "Cache hit for '{}'", T::NAME);
    Some(T::from_index(TableIndex::from_pairs(T::NAME, side_car.rows)))
}

/// Writes a snapshot of `table`, creating the cache directory when needed.
pub fn save<T>(table: &T, path: &Path, source_len: u64) -> Result<()>
where
    T: Table,
    T::Key: Serialize,
    T::Row: Serialize,
{
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).into_app_err_with(|| format!("unable to create directory '{}'", parent.display()))?;
    }

    let side_car = SideCar {
        format: FORMAT_MAGIC,
        source_len,
        rows: table.index().iter().collect::<Vec<_>>(),
    };

    let file = File::create(path).into_app_err_with(|| format!("unable to create cache file '{}'", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, &side_car).into_app_err_with(|| format!("unable to write cache file '{}'", path.display()))?;
    writer
        .flush()
        .into_app_err_with(|| format!("unable to flush cache file '{}'", path.display()))?;

    log::debug!(target: LOG_TARGET, "Wrote cache for '{}' to '{}'", T::NAME, path.display());
    Ok(())
}
