use super::{EnchantmentConditionId, EnchantmentId, GemId, define_table};
use crate::dbc::{FieldSpec as F, Scalar};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnchantmentRow {
    pub name: String,
    pub gem_id: Option<GemId>,

    /// `None` when the enchantment has no activation condition.
    pub condition: Option<EnchantmentConditionId>,
}

define_table! {
    spell_item_enchantment ("SpellItemEnchantment"): EnchantmentId => EnchantmentRow {
        schema: [
            F::Int32("ID"),
            F::Int32("Charges"),
            F::Array("SpellDispelType", Scalar::Int32, 3),
            F::Array("MinAmount", Scalar::Int32, 3),
            F::Array("MaxAmount", Scalar::Int32, 3),
            F::Array("SpellID", Scalar::Int32, 3),
            F::Localization("DisplayName"),
            F::Int32("ItemVisuals"),
            F::Int32("Flags"),
            F::Int32("GemID"),
            F::Int32("EnchantmentCondition"),
            F::Int32("SkillLine"),
            F::Int32("SkillLevel"),
            F::Int32("RequiredLevel"),
        ],

        fn read_row(record) {
            let row = EnchantmentRow {
                name: record.localized("DisplayName")?.to_string(),
                gem_id: record.reference("GemID")?.map(GemId),
                condition: record.reference("EnchantmentCondition")?.map(EnchantmentConditionId),
            };
            Ok((EnchantmentId(record.int("ID")?), row))
        }
    }
}
