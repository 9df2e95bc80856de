use super::{DisplayId, ItemId, define_table};
use crate::dbc::FieldSpec as F;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemRow {
    /// Item class and subclass, the keys of the item class tables.
    pub class: i32,
    pub subclass: i32,
    pub display_id: Option<DisplayId>,
    pub inventory_type: i32,
}

define_table! {
    /// The client-side item list. Only carries what the client needs to draw an item.
    item ("Item"): ItemId => ItemRow {
        schema: [
            F::Int32("ID"),
            F::Int32("Class"),
            F::Int32("SubClass"),
            F::Int32("Unk0"),
            F::Int32("Material"),
            F::Int32("DisplayId"),
            F::Int32("InventoryType"),
            F::Int32("Sheath"),
        ],

        fn read_row(record) {
            let row = ItemRow {
                class: record.int("Class")?,
                subclass: record.int("SubClass")?,
                display_id: record.reference("DisplayId")?.map(DisplayId),
                inventory_type: record.int("InventoryType")?,
            };
            Ok((ItemId(record.int("ID")?), row))
        }
    }
}
