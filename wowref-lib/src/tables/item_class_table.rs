use super::{ItemClassId, define_table};
use crate::dbc::FieldSpec as F;

define_table! {
    item_class ("ItemClass"): ItemClassId => String {
        schema: [
            F::Int32("ID"),
            F::Int32("SubClass"),
            F::UInt32("IsWeapon"),
            F::Localization("Name"),
        ],

        fn read_row(record) {
            Ok((ItemClassId(record.int("ID")?), record.localized("Name")?.to_string()))
        }
    }
}
