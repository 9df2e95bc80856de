use super::{EnchantmentConditionId, define_table};
use crate::dbc::{FieldSpec as F, Scalar};

/// Up to five socket-colour conditions, evaluated left to right and joined by `logic`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnchantmentConditionRow {
    pub color: [u8; 5],
    pub lt_operand: [i32; 5],
    pub comparator: [u8; 5],
    pub compare_color: [u8; 5],
    pub value: [i32; 5],
    pub logic: [u8; 5],
}

define_table! {
    spell_item_enchantment_condition ("SpellItemEnchantmentCondition"): EnchantmentConditionId => EnchantmentConditionRow {
        schema: [
            F::Int32("ID"),
            F::Array("Color", Scalar::Byte, 5),
            F::Array("LT_Operand", Scalar::Int32, 5),
            F::Array("Comparator", Scalar::Byte, 5),
            F::Array("CompareColor", Scalar::Byte, 5),
            F::Array("Value", Scalar::Int32, 5),
            F::Array("Logic", Scalar::Byte, 5),
        ],

        fn read_row(record) {
            let row = EnchantmentConditionRow {
                color: record.int_array("Color")?,
                lt_operand: record.int_array("LT_Operand")?,
                comparator: record.int_array("Comparator")?,
                compare_color: record.int_array("CompareColor")?,
                value: record.int_array("Value")?,
                logic: record.int_array("Logic")?,
            };
            Ok((EnchantmentConditionId(record.int("ID")?), row))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dbc::Value;
    use crate::dbc::testing::{DbcBuilder, ints};
    use crate::tables::Table;

    #[test]
    fn test_byte_arrays() {
        let bytes = DbcBuilder::new(SpellItemEnchantmentConditionTable::SCHEMA)
            .row(&[
                ("ID", Value::Int(7)),
                ("Color", ints(&[2, 0, 0, 0, 0])),
                ("Comparator", ints(&[5, 0, 0, 0, 0])),
                ("CompareColor", ints(&[4, 0, 0, 0, 0])),
                ("Value", ints(&[0, 0, 0, 0, 0])),
            ])
            .build();

        assert_eq!(SpellItemEnchantmentConditionTable::SCHEMA.row_width(), 64);

        let table = SpellItemEnchantmentConditionTable::from_bytes(&bytes).unwrap();
        let condition = table.get(&EnchantmentConditionId(7)).unwrap();
        assert_eq!(condition.color, [2, 0, 0, 0, 0]);
        assert_eq!(condition.comparator[0], 5);
        assert_eq!(condition.compare_color[0], 4);
        assert_eq!(condition.logic, [0; 5]);
    }
}
