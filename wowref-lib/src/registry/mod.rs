//! The set of loaded tables.
//!
//! [`Registry::load`] builds every table concurrently and only returns once every load task
//! has finished, so a registry is always complete and read-only by the time anyone can look
//! anything up in it. Tables that failed to load are absent; asking for one yields
//! [`LookupError::TableNotLoaded`].

mod decode_cache;
mod load_report;
mod loader;
mod lookups;
mod progress;

pub use decode_cache::{FORMAT_MAGIC, side_car_path};
pub use load_report::{LoadOutcome, LoadReport, LoadSource};
pub use progress::{LoadCounter, Progress, SilentProgress};

use crate::dbc::LookupError;
use crate::tables::{
    AchievementCategoryTable, AchievementCriteriaTable, AchievementTable, CharTitlesTable, ChatProfanityTable, ChrClassesTable,
    ChrRacesTable, FactionTable, GameTipsTable, GemPropertiesTable, GlyphPropertiesTable, ItemClassTable, ItemDisplayInfoTable,
    ItemSetTable, ItemSubClassTable, ItemTable, MapTable, SkillLineAbilityTable, SkillLineTable, SpamMessagesTable,
    SpellCastTimesTable, SpellDurationTable, SpellEffectNamesTable, SpellIconTable, SpellItemEnchantmentConditionTable, SpellItemEnchantmentTable,
    SpellRadiusTable, SpellRangeTable, SpellTable, Table, TalentTabTable, TalentTable, ZoneTable,
};
use core::time::Duration;
use loader::{load_cached_table, load_table};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::spawn_blocking;

const LOG_TARGET: &str = "  registry";

/// Default number of tables decoded at the same time.
pub const DEFAULT_CONCURRENCY: usize = 8;

/// Where to find table files and how to load them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOptions {
    pub dbc_dir: PathBuf,

    /// Directory holding decode-cache side-cars.
    pub cache_dir: PathBuf,
    pub concurrency: usize,
    pub decode_cache: bool,
}

impl LoadOptions {
    /// Options for the tables in `dbc_dir`, with side-cars kept next to them.
    #[must_use]
    pub fn new(dbc_dir: impl Into<PathBuf>) -> Self {
        let dbc_dir = dbc_dir.into();
        Self {
            cache_dir: dbc_dir.clone(),
            dbc_dir,
            concurrency: DEFAULT_CONCURRENCY,
            decode_cache: true,
        }
    }
}

/// Generates the `Registry` struct and its loader from a list of table field definitions.
///
/// Creates:
/// - `Registry` with an `Option<Arc<_>>` field per table
/// - An accessor per table (e.g., `spell()`), failing with `LookupError::TableNotLoaded`
/// - A `with_<field>()` builder per table, for assembling registries by hand
/// - `Registry::load()`, which loads every table with the named loader function
macro_rules! define_tables {
    ($(
        $(#[$meta:meta])*
        $field:ident: $type:ty => $loader:ident
    ),* $(,)?) => {
        pastey::paste! {
            /// Every loaded table.
            #[derive(Debug, Clone, Default)]
            pub struct Registry {
                $(
                    $(#[$meta])*
                    $field: Option<Arc<$type>>,
                )*
            }

            impl Registry {
                $(
                    $(#[$meta])*
                    pub fn $field(&self) -> Result<&$type, LookupError> {
                        self.$field.as_deref().ok_or(LookupError::TableNotLoaded { table: <$type>::NAME })
                    }

                    #[must_use]
                    pub fn [<with_ $field>](mut self, table: $type) -> Self {
                        self.$field = Some(Arc::new(table));
                        self
                    }
                )*

                /// Loads every table, at most `options.concurrency` at a time.
                ///
                /// A table that fails to load is reported in the returned [`LoadReport`] and left
                /// out of the registry; the other tables are unaffected.
                pub async fn load(options: &LoadOptions, progress: &dyn Progress) -> (Self, LoadReport) {
                    const NUM_TABLES: u64 = count_tables!($($field)*);

                    let counter = Arc::new(LoadCounter::new(NUM_TABLES));
                    progress.start(Arc::clone(&counter));

                    log::debug!(target: LOG_TARGET, "Loading {NUM_TABLES} tables from '{}'", options.dbc_dir.display());

                    let semaphore = Arc::new(Semaphore::new(options.concurrency.max(1)));
                    let shared_options = Arc::new(options.clone());

                    $(
                        let $field = {
                            let permit_res = Arc::clone(&semaphore).acquire_owned().await;
                            let options = Arc::clone(&shared_options);
                            let counter = Arc::clone(&counter);

                            spawn_blocking(move || {
                                let _permit = permit_res.expect("Semaphore closed");
                                let loaded = $loader::<$type>(&options);
                                counter.table_finished(<$type>::NAME, loaded.1.ok);
                                loaded
                            })
                        };
                    )*

                    let mut registry = Self::default();
                    let mut outcomes = Vec::new();

                    $(
                        let (table, outcome) = match $field.await {
                            Ok(loaded) => loaded,
                            Err(e) => {
                                log::warn!(target: LOG_TARGET, "Load task for '{}' failed: {e}", <$type>::NAME);
                                (None, LoadOutcome::failed(<$type>::NAME, Duration::ZERO, format!("load task failed: {e}")))
                            }
                        };
                        registry.$field = table.map(Arc::new);
                        outcomes.push(outcome);
                    )*

                    let report = LoadReport { outcomes };
                    progress.done(&report);
                    (registry, report)
                }
            }

            /// Tables compare by content, not by identity.
            impl PartialEq for Registry {
                fn eq(&self, other: &Self) -> bool {
                    true $(&& self.$field.as_deref() == other.$field.as_deref())*
                }
            }
        }
    };
}

macro_rules! count_tables {
    () => (0);
    ($head:ident $($tail:ident)*) => (1 + count_tables!($($tail)*));
}

define_tables! {
    char_titles: CharTitlesTable => load_table,
    chr_classes: ChrClassesTable => load_table,
    chr_races: ChrRacesTable => load_table,
    gem_properties: GemPropertiesTable => load_table,
    item: ItemTable => load_table,
    item_class: ItemClassTable => load_table,
    item_display_info: ItemDisplayInfoTable => load_table,
    item_set: ItemSetTable => load_table,
    item_sub_class: ItemSubClassTable => load_table,
    spell: SpellTable => load_cached_table,
    spell_cast_times: SpellCastTimesTable => load_table,
    spell_durations: SpellDurationTable => load_table,
    spell_icon: SpellIconTable => load_table,
    spell_item_enchantment: SpellItemEnchantmentTable => load_table,
    spell_item_enchantment_condition: SpellItemEnchantmentConditionTable => load_table,
    spell_radius: SpellRadiusTable => load_table,
    zone: ZoneTable => load_table,
    map: MapTable => load_table,
    faction: FactionTable => load_table,
    talent: TalentTable => load_table,
    talent_tab: TalentTabTable => load_table,
    spell_range: SpellRangeTable => load_table,
    glyph_properties: GlyphPropertiesTable => load_table,
    skill_line: SkillLineTable => load_table,
    skill_line_ability: SkillLineAbilityTable => load_table,
    achievement: AchievementTable => load_table,
    achievement_category: AchievementCategoryTable => load_table,
    achievement_criteria: AchievementCriteriaTable => load_table,
    game_tips: GameTipsTable => load_table,
    chat_profanity: ChatProfanityTable => load_table,
    spam_messages: SpamMessagesTable => load_table,
    spell_effect_names: SpellEffectNamesTable => load_table,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dbc::Value;
    use crate::dbc::testing::{DbcBuilder, ints, text};
    use crate::tables::{ItemId, SpellId, ZoneId};
    use std::path::Path;

    fn write_tables(dir: &Path) {
        let _ = DbcBuilder::new(SpellTable::SCHEMA)
            .row(&[
                ("ID", Value::UInt(1)),
                ("SpellName", text("Arcane Intellect")),
                ("EffectBasePoints", ints(&[59, 0, 0])),
                ("DurationIndex", Value::UInt(21)),
            ])
            .row(&[("ID", Value::UInt(2)), ("SpellName", text("Polymorph"))])
            .write_to(dir, SpellTable::FILE_NAME);

        let _ = DbcBuilder::new(SpellDurationTable::SCHEMA)
            .row(&[("ID", Value::Int(21)), ("BaseDuration", Value::Int(1_800_000))])
            .write_to(dir, SpellDurationTable::FILE_NAME);

        let _ = DbcBuilder::new(ZoneTable::SCHEMA)
            .row(&[("Id", Value::Int(12)), ("Name", text("Elwynn Forest"))])
            .write_to(dir, ZoneTable::FILE_NAME);

        let _ = DbcBuilder::new(ItemTable::SCHEMA)
            .row(&[("ID", Value::Int(25)), ("InventoryType", Value::Int(13))])
            .write_to(dir, ItemTable::FILE_NAME);
    }

    fn options(dir: &Path, concurrency: usize, decode_cache: bool) -> LoadOptions {
        LoadOptions {
            dbc_dir: dir.to_path_buf(),
            cache_dir: dir.join("cache"),
            concurrency,
            decode_cache,
        }
    }

    #[tokio::test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    async fn test_load_is_independent_of_concurrency() {
        let dir = tempfile::tempdir().unwrap();
        write_tables(dir.path());

        let (serial, serial_report) = Registry::load(&options(dir.path(), 1, false), &SilentProgress).await;
        let (parallel, parallel_report) = Registry::load(&options(dir.path(), 8, false), &SilentProgress).await;

        assert_eq!(serial, parallel);
        assert_eq!(serial_report.total_records(), 5);
        assert_eq!(parallel_report.total_records(), 5);
        assert_eq!(serial_report.outcomes.len(), 32);
        assert_eq!(serial.spell_duration(SpellId(1)).unwrap(), 1_800_000);
        assert_eq!(parallel.zone_name(ZoneId(12)).unwrap(), "Elwynn Forest");
    }

    #[tokio::test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    async fn test_failed_table_does_not_affect_others() {
        let dir = tempfile::tempdir().unwrap();
        write_tables(dir.path());
        std::fs::write(dir.path().join(MapTable::FILE_NAME), b"XXXX\0\0\0\0\0\0\0\0\0\0\0\0\0\0\0\0").unwrap();

        let (registry, report) = Registry::load(&options(dir.path(), 4, false), &SilentProgress).await;

        let map = report.outcome("Map").unwrap();
        assert!(!map.ok);
        assert!(map.error.is_some());
        assert_eq!(map.record_count, None);
        assert_eq!(registry.map().unwrap_err(), LookupError::TableNotLoaded { table: "Map" });

        let item = report.outcome("Item").unwrap();
        assert!(item.ok);
        assert_eq!(item.record_count, Some(1));
        assert_eq!(registry.item_inventory_type(ItemId(25)).unwrap(), 13);
        assert!(!report.all_ok());
    }

    #[tokio::test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    async fn test_decode_cache() {
        let dir = tempfile::tempdir().unwrap();
        write_tables(dir.path());
        let options = options(dir.path(), 8, true);

        let (first, report) = Registry::load(&options, &SilentProgress).await;
        assert_eq!(report.outcome("Spell").unwrap().source, LoadSource::Decoded);
        assert!(side_car_path(&options.cache_dir, SpellTable::FILE_NAME).exists());

        let (second, report) = Registry::load(&options, &SilentProgress).await;
        assert_eq!(report.outcome("Spell").unwrap().source, LoadSource::Cache);
        assert_eq!(report.outcome("Item").unwrap().source, LoadSource::Decoded);
        assert_eq!(first, second);

        let _ = DbcBuilder::new(SpellTable::SCHEMA)
            .row(&[("ID", Value::UInt(3)), ("SpellName", text("Blink"))])
            .row(&[("ID", Value::UInt(4)), ("SpellName", text("Evocation"))])
            .row(&[("ID", Value::UInt(5)), ("SpellName", text("Counterspell"))])
            .write_to(dir.path(), SpellTable::FILE_NAME);

        let (third, report) = Registry::load(&options, &SilentProgress).await;
        assert_eq!(report.outcome("Spell").unwrap().source, LoadSource::Decoded);
        assert_eq!(third.spell_name(SpellId(4)).unwrap(), "Evocation");
        assert!(third.spell_row(SpellId(1)).is_err());
    }

    #[test]
    fn test_default_options() {
        let options = LoadOptions::new("data/dbc");
        assert_eq!(options.cache_dir, options.dbc_dir);
        assert_eq!(options.concurrency, DEFAULT_CONCURRENCY);
        assert!(options.decode_cache);
    }
}
