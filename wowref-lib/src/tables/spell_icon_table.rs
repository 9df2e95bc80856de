use super::{SpellIconId, define_table};
use crate::dbc::FieldSpec as F;

define_table! {
    spell_icon ("SpellIcon"): SpellIconId => String {
        schema: [
            F::Int32("ID"),
            F::Str("Icon"),
        ],

        fn read_row(record) {
            Ok((SpellIconId(record.int("ID")?), record.text("Icon")?.to_string()))
        }
    }
}
