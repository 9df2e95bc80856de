use super::{ItemClassId, define_table};
use crate::dbc::FieldSpec as F;

define_table! {
    /// Display names of item subclasses, keyed by `(class, subclass)`.
    item_sub_class ("ItemSubClass"): (ItemClassId, i32) => String {
        schema: [
            F::Int32("ClassID"),
            F::Int32("SubClassID"),
            F::Int32("PrerequisiteProficiency"),
            F::Int32("PostrequisiteProficiency"),
            F::Int32("Flags"),
            F::Int32("DisplayFlags"),
            F::Int32("WeaponParrySeq"),
            F::Int32("WeaponReadySeq"),
            F::Int32("WeaponAttackSeq"),
            F::Int32("WeaponSwingSize"),
            F::Localization("DisplayName"),
            F::Localization("VerboseName"),
        ],

        fn read_row(record) {
            let key = (ItemClassId(record.int("ClassID")?), record.int("SubClassID")?);
            Ok((key, record.localized("DisplayName")?.to_string()))
        }
    }
}
