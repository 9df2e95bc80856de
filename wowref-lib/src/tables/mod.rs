//! Typed, indexed views over the client tables.
//!
//! Each table pairs a schema with a row projection: decoding a file yields records, and
//! `Table::read_row` turns each record into a key and the narrow row type the rest of the
//! crate works with. Tables nobody projects yet keep their full [`Record`](crate::dbc::Record).
//!
//! Tables are built once and never mutated afterwards.

mod char_titles_table;
mod chr_classes_table;
mod chr_races_table;
mod gem_properties_table;
mod ids;
mod item_class_table;
mod item_display_info_table;
mod item_set_table;
mod item_sub_class_table;
mod item_table;
mod record_tables;
mod spell_cast_times_table;
mod spell_duration_table;
mod spell_icon_table;
mod spell_item_enchantment_condition_table;
mod spell_item_enchantment_table;
mod spell_radius_table;
mod spell_table;
mod table;
mod table_index;
mod zone_table;

pub use char_titles_table::{CharTitleRow, CharTitlesTable, Gender};
pub use chr_classes_table::ChrClassesTable;
pub use chr_races_table::ChrRacesTable;
pub use gem_properties_table::{GemPropertiesRow, GemPropertiesTable};
pub use ids::*;
pub use item_class_table::ItemClassTable;
pub use item_display_info_table::ItemDisplayInfoTable;
pub use item_set_table::{ItemSetRow, ItemSetTable};
pub use item_sub_class_table::ItemSubClassTable;
pub use item_table::{ItemRow, ItemTable};
pub use record_tables::{
    AchievementCategoryTable, AchievementCriteriaTable, AchievementTable, ChatProfanityTable, FactionTable,
    GameTipsTable, GlyphPropertiesTable, MapTable, SkillLineAbilityTable, SkillLineTable, SpamMessagesTable,
    SpellEffectNamesTable, SpellRangeTable, TalentTabTable, TalentTable,
};
pub use spell_cast_times_table::SpellCastTimesTable;
pub use spell_duration_table::SpellDurationTable;
pub use spell_icon_table::SpellIconTable;
pub use spell_item_enchantment_condition_table::{EnchantmentConditionRow, SpellItemEnchantmentConditionTable};
pub use spell_item_enchantment_table::{EnchantmentRow, SpellItemEnchantmentTable};
pub use spell_radius_table::SpellRadiusTable;
pub use spell_table::{EFFECT_SLOTS, SpellRow, SpellTable};
pub use table::Table;
pub use table_index::TableIndex;
pub use zone_table::{ZoneRow, ZoneTable};

use table::define_table;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dbc::Schema;

    fn check(name: &str, schema: Schema, expected: usize) {
        assert_eq!(schema.row_width(), expected, "row width of {name}");
        assert_eq!(schema.duplicate_name(), None, "duplicate field in {name}");
    }

    macro_rules! check_widths {
        ($($table:ty => $width:literal),* $(,)?) => {
            $(check(<$table>::NAME, <$table>::SCHEMA, $width);)*
        };
    }

    #[test]
    fn test_schemas_match_client_record_sizes() {
        check_widths! {
            SpellTable => 936,
            SpellDurationTable => 16,
            SpellRadiusTable => 16,
            SpellCastTimesTable => 16,
            SpellIconTable => 8,
            ChrClassesTable => 240,
            ChrRacesTable => 276,
            CharTitlesTable => 148,
            GemPropertiesTable => 20,
            ItemTable => 32,
            ItemClassTable => 80,
            ItemSubClassTable => 176,
            ItemDisplayInfoTable => 100,
            ItemSetTable => 212,
            SpellItemEnchantmentTable => 152,
            SpellItemEnchantmentConditionTable => 64,
            ZoneTable => 144,
            MapTable => 264,
            FactionTable => 228,
            TalentTable => 92,
            TalentTabTable => 96,
            SpellRangeTable => 160,
            GlyphPropertiesTable => 16,
            SkillLineTable => 224,
            SkillLineAbilityTable => 56,
            AchievementTable => 248,
            AchievementCategoryTable => 80,
            AchievementCriteriaTable => 124,
            GameTipsTable => 72,
            ChatProfanityTable => 12,
            SpamMessagesTable => 8,
            SpellEffectNamesTable => 40,
        }
    }

    #[test]
    fn test_file_names_follow_table_names() {
        assert_eq!(ZoneTable::NAME, "AreaTable");
        assert_eq!(ZoneTable::FILE_NAME, "AreaTable.dbc");
        assert_eq!(AchievementCategoryTable::FILE_NAME, "Achievement_Category.dbc");
    }
}
