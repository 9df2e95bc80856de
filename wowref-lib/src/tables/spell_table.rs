use super::{CastTimeId, DurationId, RadiusId, SpellIconId, SpellId, define_table};
use crate::dbc::{FieldSpec as F, Scalar};
use serde::{Deserialize, Serialize};

/// Number of effect slots on a spell.
pub const EFFECT_SLOTS: usize = 3;

/// The subset of a spell record used by lookups and the description formatter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpellRow {
    pub name: String,
    pub rank: String,
    pub icon_id: u32,
    pub tooltip: String,
    pub description: String,
    pub category: u32,
    pub duration_index: u32,
    pub casting_time_index: u32,
    pub range_index: u32,
    pub max_affected_targets: u32,
    pub proc_chance: u32,
    pub proc_charges: u32,
    pub stack_amount: u32,
    pub effect: [i32; EFFECT_SLOTS],
    pub effect_die_sides: [i32; EFFECT_SLOTS],
    pub effect_base_points: [i32; EFFECT_SLOTS],
    pub effect_radius_index: [u32; EFFECT_SLOTS],
    pub effect_apply_aura_name: [u32; EFFECT_SLOTS],
    pub effect_amplitude: [u32; EFFECT_SLOTS],
    pub effect_multiple_value: [f32; EFFECT_SLOTS],
    pub effect_chain_target: [u32; EFFECT_SLOTS],
    pub effect_misc_value: [i32; EFFECT_SLOTS],
    pub effect_misc_value_b: [i32; EFFECT_SLOTS],
    pub effect_bonus_multiplier: [f32; EFFECT_SLOTS],
    pub reagent: [i32; 8],
    pub reagent_count: [u32; 8],
}

impl SpellRow {
    #[must_use]
    pub const fn duration_id(&self) -> Option<DurationId> {
        if self.duration_index == 0 {
            None
        } else {
            Some(DurationId(self.duration_index))
        }
    }

    #[must_use]
    pub const fn cast_time_id(&self) -> Option<CastTimeId> {
        if self.casting_time_index == 0 {
            None
        } else {
            Some(CastTimeId(self.casting_time_index))
        }
    }

    /// Radius per effect slot; `None` where the slot has no radius.
    #[must_use]
    pub fn radius_ids(&self) -> [Option<RadiusId>; EFFECT_SLOTS] {
        self.effect_radius_index.map(|index| (index != 0).then_some(RadiusId(index)))
    }

    #[must_use]
    pub const fn icon(&self) -> SpellIconId {
        SpellIconId(self.icon_id)
    }
}

define_table! {
    /// Every spell, keyed by spell id. The largest table by far, so it is decode-cached.
    spell ("Spell"): SpellId => SpellRow {
        schema: [
            F::UInt32("ID"),
            F::UInt32("Category"),
            F::UInt32("Dispel"),
            F::UInt32("Mechanic"),
            F::UInt32("Attributes"),
            F::Array("AttributesEx", Scalar::UInt32, 6),
            F::Pad(4),
            F::UInt32("Stances"),
            F::Pad(4),
            F::UInt32("StancesNot"),
            F::Pad(4),
            F::UInt32("Targets"),
            F::UInt32("TargetCreatureType"),
            F::UInt32("RequiresSpellFocus"),
            F::UInt32("FacingCasterFlags"),
            F::UInt32("CasterAuraState"),
            F::UInt32("TargetAuraState"),
            F::UInt32("CasterAuraStateNot"),
            F::UInt32("TargetAuraStateNot"),
            F::UInt32("CasterAuraSpell"),
            F::UInt32("TargetAuraSpell"),
            F::UInt32("ExcludeCasterAuraSpell"),
            F::UInt32("ExcludeTargetAuraSpell"),
            F::UInt32("CastingTimeIndex"),
            F::UInt32("RecoveryTime"),
            F::UInt32("CategoryRecoveryTime"),
            F::UInt32("InterruptFlags"),
            F::UInt32("AuraInterruptFlags"),
            F::UInt32("ChannelInterruptFlags"),
            F::UInt32("ProcFlags"),
            F::UInt32("ProcChance"),
            F::UInt32("ProcCharges"),
            F::UInt32("MaxLevel"),
            F::UInt32("BaseLevel"),
            F::UInt32("SpellLevel"),
            F::UInt32("DurationIndex"),
            F::UInt32("PowerType"),
            F::UInt32("ManaCost"),
            F::UInt32("ManaCostPerLevel"),
            F::UInt32("ManaPerSecond"),
            F::UInt32("ManaPerSecondPerLevel"),
            F::UInt32("RangeIndex"),
            F::Float("Speed"),
            F::UInt32("ModalNextSpell"),
            F::UInt32("StackAmount"),
            F::Array("Totem", Scalar::UInt32, 2),
            F::Array("Reagent", Scalar::Int32, 8),
            F::Array("ReagentCount", Scalar::UInt32, 8),
            F::Int32("EquippedItemClass"),
            F::Int32("EquippedItemSubClassMask"),
            F::Int32("EquippedItemInventoryTypeMask"),
            F::Array("Effect", Scalar::Int32, 3),
            F::Array("EffectDieSides", Scalar::Int32, 3),
            F::Array("EffectRealPointsPerLevel", Scalar::Int32, 3),
            F::Array("EffectBasePoints", Scalar::Int32, 3),
            F::Array("EffectMechanic", Scalar::UInt32, 3),
            F::Array("EffectImplicitTargetA", Scalar::UInt32, 3),
            F::Array("EffectImplicitTargetB", Scalar::UInt32, 3),
            F::Array("EffectRadiusIndex", Scalar::UInt32, 3),
            F::Array("EffectApplyAuraName", Scalar::UInt32, 3),
            F::Array("EffectAmplitude", Scalar::UInt32, 3),
            F::Array("EffectMultipleValue", Scalar::Float, 3),
            F::Array("EffectChainTarget", Scalar::UInt32, 3),
            F::Array("EffectItemType", Scalar::UInt32, 3),
            F::Array("EffectMiscValue", Scalar::Int32, 3),
            F::Array("EffectMiscValueB", Scalar::Int32, 3),
            F::Array("EffectTriggerSpell", Scalar::UInt32, 3),
            F::Array("EffectPointsPerComboPoint", Scalar::Float, 3),
            F::Array("EffectSpellClassMaskA", Scalar::UInt32, 3),
            F::Array("EffectSpellClassMaskB", Scalar::UInt32, 3),
            F::Array("EffectSpellClassMaskC", Scalar::UInt32, 3),
            F::Array("SpellVisual", Scalar::UInt32, 2),
            F::UInt32("SpellIconID"),
            F::UInt32("ActiveIconID"),
            F::UInt32("SpellPriority"),
            F::Localization("SpellName"),
            F::Localization("Rank"),
            F::Localization("Description"),
            F::Localization("ToolTip"),
            F::UInt32("ManaCostPercentage"),
            F::UInt32("StartRecoveryCategory"),
            F::UInt32("StartRecoveryTime"),
            F::UInt32("MaxTargetLevel"),
            F::UInt32("SpellFamilyName"),
            F::UInt64("SpellFamilyFlags"),
            F::UInt32("SpellFamilyFlags2"),
            F::UInt32("MaxAffectedTargets"),
            F::UInt32("DmgClass"),
            F::UInt32("PreventionType"),
            F::UInt32("StanceOrderBar"),
            F::Array("DmgMultiplier", Scalar::Float, 3),
            F::UInt32("MinFactionID"),
            F::UInt32("MinReputation"),
            F::UInt32("RequiredAuraVision"),
            F::Array("TotemCategory", Scalar::UInt32, 2),
            F::Int32("AreaGroupID"),
            F::UInt32("SchoolMask"),
            F::UInt32("RuneCostID"),
            F::UInt32("SpellMissileID"),
            F::UInt32("PowerDisplayID"),
            F::Array("EffectBonusMultiplier", Scalar::Float, 3),
            F::UInt32("SpellDescriptionVariableID"),
            F::UInt32("SpellDifficultyID"),
        ],

        fn read_row(record) {
            let row = SpellRow {
                name: record.localized("SpellName")?.to_string(),
                rank: record.localized("Rank")?.to_string(),
                icon_id: record.u32("SpellIconID")?,
                tooltip: record.localized("ToolTip")?.to_string(),
                description: record.localized("Description")?.to_string(),
                category: record.u32("Category")?,
                duration_index: record.u32("DurationIndex")?,
                casting_time_index: record.u32("CastingTimeIndex")?,
                range_index: record.u32("RangeIndex")?,
                max_affected_targets: record.u32("MaxAffectedTargets")?,
                proc_chance: record.u32("ProcChance")?,
                proc_charges: record.u32("ProcCharges")?,
                stack_amount: record.u32("StackAmount")?,
                effect: record.int_array("Effect")?,
                effect_die_sides: record.int_array("EffectDieSides")?,
                effect_base_points: record.int_array("EffectBasePoints")?,
                effect_radius_index: record.int_array("EffectRadiusIndex")?,
                effect_apply_aura_name: record.int_array("EffectApplyAuraName")?,
                effect_amplitude: record.int_array("EffectAmplitude")?,
                effect_multiple_value: record.f32_array("EffectMultipleValue")?,
                effect_chain_target: record.int_array("EffectChainTarget")?,
                effect_misc_value: record.int_array("EffectMiscValue")?,
                effect_misc_value_b: record.int_array("EffectMiscValueB")?,
                effect_bonus_multiplier: record.f32_array("EffectBonusMultiplier")?,
                reagent: record.int_array("Reagent")?,
                reagent_count: record.int_array("ReagentCount")?,
            };

            Ok((SpellId(record.u32("ID")?), row))
        }
    }
}
