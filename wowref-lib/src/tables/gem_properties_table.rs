use super::{EnchantmentId, GemId, define_table};
use crate::dbc::FieldSpec as F;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GemPropertiesRow {
    /// Socket colours this gem fits, as a bit mask.
    pub color_mask: i32,
    pub enchantment: Option<EnchantmentId>,
}

define_table! {
    gem_properties ("GemProperties"): GemId => GemPropertiesRow {
        schema: [
            F::Int32("ID"),
            F::Int32("SpellItemEnchantment"),
            F::Pad(8),
            F::Int32("Type"),
        ],

        fn read_row(record) {
            let row = GemPropertiesRow {
                color_mask: record.i32("Type")?,
                enchantment: record.reference("SpellItemEnchantment")?.map(EnchantmentId),
            };
            Ok((GemId(record.int("ID")?), row))
        }
    }
}
