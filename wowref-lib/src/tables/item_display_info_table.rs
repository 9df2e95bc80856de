use super::{DisplayId, define_table};
use crate::dbc::FieldSpec as F;

define_table! {
    /// Icon file name per display id. The rest of the record is model and texture data.
    item_display_info ("ItemDisplayInfo"): DisplayId => String {
        schema: [
            F::Int32("ID"),
            F::Pad(16),
            F::Str("InvType"),
            F::Pad(76),
        ],

        fn read_row(record) {
            Ok((DisplayId(record.int("ID")?), record.text("InvType")?.to_string()))
        }
    }
}
