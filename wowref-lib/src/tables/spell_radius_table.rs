use super::{RadiusId, define_table};
use crate::dbc::FieldSpec as F;

define_table! {
    /// Maximum radius in yards.
    spell_radius ("SpellRadius"): RadiusId => f32 {
        schema: [
            F::Int32("ID"),
            F::Float("RadiusMin"),
            F::Float("RadiusPerLevel"),
            F::Float("RadiusMax"),
        ],

        fn read_row(record) {
            Ok((RadiusId(record.int("ID")?), record.f32("RadiusMax")?))
        }
    }
}
