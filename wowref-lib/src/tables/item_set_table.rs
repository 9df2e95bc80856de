use super::{ItemId, ItemSetId, SpellId, define_table};
use crate::dbc::{FieldSpec as F, Scalar};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemSetRow {
    pub name: String,

    /// Member items, without the empty slots.
    pub items: Vec<ItemId>,

    /// `(pieces equipped, bonus spell)` pairs, ordered by piece count.
    pub threshold_pairs: Vec<(u32, SpellId)>,
    pub required_skill: i32,
    pub required_skill_level: i32,
}

define_table! {
    item_set ("ItemSet"): ItemSetId => ItemSetRow {
        schema: [
            F::Int32("ID"),
            F::Localization("DisplayName"),
            F::Array("Items", Scalar::Int32, 17),
            F::Array("SpellID", Scalar::Int32, 8),
            F::Array("Threshold", Scalar::Int32, 8),
            F::Int32("RequiredSkill"),
            F::Int32("RequiredSkillLevel"),
        ],

        fn read_row(record) {
            let items = record.references("Items")?.into_iter().flatten().map(ItemId).collect();

            let mut threshold_pairs: Vec<_> = record
                .references::<u32>("Threshold")?
                .into_iter()
                .zip(record.references("SpellID")?)
                .filter_map(|(threshold, spell)| Some((threshold?, SpellId(spell?))))
                .collect();
            threshold_pairs.sort_unstable();

            let row = ItemSetRow {
                name: record.localized("DisplayName")?.to_string(),
                items,
                threshold_pairs,
                required_skill: record.int("RequiredSkill")?,
                required_skill_level: record.int("RequiredSkillLevel")?,
            };
            Ok((ItemSetId(record.int("ID")?), row))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dbc::Value;
    use crate::dbc::testing::{DbcBuilder, ints, text};
    use crate::tables::Table;

    #[test]
    fn test_drops_empty_slots_and_sorts_bonuses() {
        let bytes = DbcBuilder::new(ItemSetTable::SCHEMA)
            .row(&[
                ("ID", Value::Int(524)),
                ("DisplayName", text("Bonescythe Battlegear")),
                ("Items", ints(&[22478, 0, 22477, 22479])),
                ("Threshold", ints(&[6, 0, 2, 4])),
                ("SpellID", ints(&[28817, 1234, 28814, 28815])),
            ])
            .build();

        let table = ItemSetTable::from_bytes(&bytes).unwrap();
        assert_eq!(ItemSetTable::SCHEMA.row_width(), 212);

        let set = table.get(&ItemSetId(524)).unwrap();
        assert_eq!(set.name, "Bonescythe Battlegear");
        assert_eq!(set.items, vec![ItemId(22478), ItemId(22477), ItemId(22479)]);
        assert_eq!(
            set.threshold_pairs,
            vec![(2, SpellId(28814)), (4, SpellId(28815)), (6, SpellId(28817))]
        );
    }

    #[test]
    fn test_negative_slots_are_empty() {
        let bytes = DbcBuilder::new(ItemSetTable::SCHEMA)
            .row(&[
                ("ID", Value::Int(1)),
                ("DisplayName", text("Odd Set")),
                ("Items", ints(&[-1, 100])),
                ("Threshold", ints(&[2, -3])),
                ("SpellID", ints(&[-5, 77])),
                ("RequiredSkill", Value::Int(-1)),
            ])
            .build();

        let set = ItemSetTable::from_bytes(&bytes).unwrap().get(&ItemSetId(1)).unwrap().clone();
        assert_eq!(set.items, vec![ItemId(100)]);
        assert!(set.threshold_pairs.is_empty());
        assert_eq!(set.required_skill, -1);
    }
}
