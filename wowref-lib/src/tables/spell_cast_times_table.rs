use super::{CastTimeId, define_table};
use crate::dbc::FieldSpec as F;

define_table! {
    /// Base cast time in milliseconds.
    spell_cast_times ("SpellCastTimes"): CastTimeId => i32 {
        schema: [
            F::Int32("ID"),
            F::Int32("CastTime"),
            F::Float("CastTimePerLevel"),
            F::Int32("MinCastTime"),
        ],

        fn read_row(record) {
            Ok((CastTimeId(record.int("ID")?), record.i32("CastTime")?))
        }
    }
}
