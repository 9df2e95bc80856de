//! Cross-table lookups.
//!
//! Missing keys are reported as [`LookupError::NotFound`]. The few helpers whose callers expect
//! an explicit fallback return `Option` instead, but still fail when their table is not loaded.

use super::Registry;
use crate::dbc::LookupError;
use crate::tables::{
    CharTitleRow, ClassId, DisplayId, EFFECT_SLOTS, EnchantmentConditionRow, Gender, GemId, ItemClassId, ItemId, ItemSetId,
    ItemSetRow, RaceId, SpellIconId, SpellId, SpellRow, Table, TitleId, ZoneId, ZoneRow,
};

const ICON_PREFIX: &str = "Interface\\Icons\\";

macro_rules! spell_getters {
    ($(
        $(#[$meta:meta])*
        $getter:ident -> $ty:ty = |$spell:ident| $body:expr
    );* $(;)?) => {
        $(
            $(#[$meta])*
            pub fn $getter(&self, id: SpellId) -> Result<$ty, LookupError> {
                let $spell = self.spell_row(id)?;
                Ok($body)
            }
        )*
    };
}

impl Registry {
    pub fn spell_row(&self, id: SpellId) -> Result<&SpellRow, LookupError> {
        self.spell()?.get(&id)
    }

    spell_getters! {
        spell_name -> &str = |spell| &spell.name;
        spell_rank -> &str = |spell| &spell.rank;
        spell_category -> u32 = |spell| spell.category;
        spell_icon_id -> SpellIconId = |spell| spell.icon();
        spell_tooltip -> &str = |spell| &spell.tooltip;
        spell_description -> &str = |spell| &spell.description;
        spell_base_points -> [i32; EFFECT_SLOTS] = |spell| spell.effect_base_points;
        spell_die_sides -> [i32; EFFECT_SLOTS] = |spell| spell.effect_die_sides;
        spell_effects -> [i32; EFFECT_SLOTS] = |spell| spell.effect;
        spell_aura_names -> [u32; EFFECT_SLOTS] = |spell| spell.effect_apply_aura_name;
        spell_misc_values -> [i32; EFFECT_SLOTS] = |spell| spell.effect_misc_value;
        spell_misc_values_b -> [i32; EFFECT_SLOTS] = |spell| spell.effect_misc_value_b;
        spell_chain_targets -> [u32; EFFECT_SLOTS] = |spell| spell.effect_chain_target;

        /// Periodic tick interval per effect, in milliseconds.
        spell_amplitudes -> [u32; EFFECT_SLOTS] = |spell| spell.effect_amplitude;
        spell_multiple_values -> [f32; EFFECT_SLOTS] = |spell| spell.effect_multiple_value;
        spell_bonus_multipliers -> [f32; EFFECT_SLOTS] = |spell| spell.effect_bonus_multiplier;
        spell_reagents -> [i32; 8] = |spell| spell.reagent;
        spell_reagent_counts -> [u32; 8] = |spell| spell.reagent_count;
        spell_proc_chance -> u32 = |spell| spell.proc_chance;
        spell_proc_charges -> u32 = |spell| spell.proc_charges;
        spell_stack_amount -> u32 = |spell| spell.stack_amount;
        spell_max_targets -> u32 = |spell| spell.max_affected_targets;
        spell_range_index -> u32 = |spell| spell.range_index;
        spell_casting_time_index -> u32 = |spell| spell.casting_time_index;
    }

    /// Base duration in milliseconds, 0 for spells without a duration.
    pub fn spell_duration(&self, id: SpellId) -> Result<i32, LookupError> {
        match self.spell_row(id)?.duration_id() {
            Some(duration) => self.spell_durations()?.get(&duration).copied(),
            None => Ok(0),
        }
    }

    /// Maximum radius of each effect, 0.0 for effects without one.
    pub fn spell_max_effect_radius(&self, id: SpellId) -> Result<[f32; EFFECT_SLOTS], LookupError> {
        let mut radii = [0.0; EFFECT_SLOTS];
        for (radius, index) in radii.iter_mut().zip(self.spell_row(id)?.radius_ids()) {
            if let Some(index) = index {
                *radius = *self.spell_radius()?.get(&index)?;
            }
        }
        Ok(radii)
    }

    /// Cast time in milliseconds, 0 for instant spells without a cast time entry.
    pub fn spell_cast_time(&self, id: SpellId) -> Result<i32, LookupError> {
        match self.spell_row(id)?.cast_time_id() {
            Some(cast_time) => self.spell_cast_times()?.get(&cast_time).copied(),
            None => Ok(0),
        }
    }

    /// The spell's icon file name, without the interface directory.
    pub fn spell_icon_name(&self, id: SpellId) -> Result<&str, LookupError> {
        self.icon_name(self.spell_icon_id(id)?)
    }

    pub fn icon_name(&self, icon: SpellIconId) -> Result<&str, LookupError> {
        let path = self.spell_icon()?.get(&icon)?;
        Ok(path.strip_prefix(ICON_PREFIX).unwrap_or(path.as_str()))
    }

    pub fn zone_row(&self, zone: ZoneId) -> Result<&ZoneRow, LookupError> {
        self.zone()?.get(&zone)
    }

    pub fn zone_name(&self, zone: ZoneId) -> Result<&str, LookupError> {
        Ok(self.zone_row(zone)?.name())
    }

    /// The zone's name prefixed by its parent's, as in "Dun Morogh, Kharanos".
    pub fn zone_full_name(&self, zone: ZoneId) -> Result<String, LookupError> {
        let row = self.zone_row(zone)?;
        match row.parent {
            Some(parent) => Ok(format!("{}, {}", self.zone_name(parent)?, row.name())),
            None => Ok(row.name().to_string()),
        }
    }

    pub fn char_title(&self, title: TitleId) -> Result<&CharTitleRow, LookupError> {
        self.char_titles()?.get(&title)
    }

    /// The title with a `%s` where the character's name goes.
    pub fn char_title_name(&self, title: TitleId, gender: Gender) -> Result<&str, LookupError> {
        Ok(self.char_title(title)?.name(gender))
    }

    /// The title on its own, without the name placeholder.
    pub fn char_title_clean_name(&self, title: TitleId, gender: Gender) -> Result<String, LookupError> {
        Ok(self.char_title_name(title, gender)?.replacen("%s", "", 1).trim().to_string())
    }

    pub fn class_name(&self, class: ClassId) -> Result<&str, LookupError> {
        self.chr_classes()?.get(&class).map(String::as_str)
    }

    pub fn race_name(&self, race: RaceId) -> Result<&str, LookupError> {
        self.chr_races()?.get(&race).map(String::as_str)
    }

    pub fn item_inventory_type(&self, item: ItemId) -> Result<i32, LookupError> {
        Ok(self.item()?.get(&item)?.inventory_type)
    }

    pub fn item_class_name(&self, class: ItemClassId) -> Result<&str, LookupError> {
        self.item_class()?.get(&class).map(String::as_str)
    }

    /// Lowercase icon name for an item display id.
    pub fn item_icon_name(&self, display: DisplayId) -> Result<String, LookupError> {
        Ok(self.item_display_info()?.get(&display)?.to_lowercase())
    }

    pub fn item_set_row(&self, set: ItemSetId) -> Result<Option<&ItemSetRow>, LookupError> {
        Ok(self.item_set()?.index().get_opt(&set))
    }

    pub fn item_sub_class_name(&self, class: ItemClassId, subclass: i32) -> Result<Option<&str>, LookupError> {
        Ok(self.item_sub_class()?.index().get_opt(&(class, subclass)).map(String::as_str))
    }

    pub fn gem_color_mask(&self, gem: GemId) -> Result<Option<i32>, LookupError> {
        Ok(self.gem_properties()?.index().get_opt(&gem).map(|row| row.color_mask))
    }

    /// The socket conditions of a gem, following gem, enchantment and condition in turn.
    ///
    /// `None` when any link in that chain is empty or missing.
    pub fn gem_conditions(&self, gem: GemId) -> Result<Option<&EnchantmentConditionRow>, LookupError> {
        let Some(enchantment) = self.gem_properties()?.index().get_opt(&gem).and_then(|row| row.enchantment) else {
            return Ok(None);
        };

        let Some(condition) = self
            .spell_item_enchantment()?
            .index()
            .get_opt(&enchantment)
            .and_then(|row| row.condition)
        else {
            return Ok(None);
        };

        Ok(self.spell_item_enchantment_condition()?.index().get_opt(&condition))
    }
}
