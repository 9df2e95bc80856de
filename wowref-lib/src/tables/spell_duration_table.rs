use super::{DurationId, define_table};
use crate::dbc::FieldSpec as F;

define_table! {
    /// Base duration in milliseconds. Negative values mean "until cancelled".
    spell_duration ("SpellDuration"): DurationId => i32 {
        schema: [
            F::Int32("ID"),
            F::Int32("BaseDuration"),
            F::Int32("PerLevel"),
            F::Int32("MaxDuration"),
        ],

        fn read_row(record) {
            Ok((DurationId(record.int("ID")?), record.i32("BaseDuration")?))
        }
    }
}
