use super::{ClassId, define_table};
use crate::dbc::FieldSpec as F;

define_table! {
    /// Playable class names.
    chr_classes ("ChrClasses"): ClassId => String {
        schema: [
            F::UInt32("ClassID"),
            F::Pad(4),
            F::UInt32("powerType"),
            F::Pad(4),
            F::Localization("name"),
            F::Localization("nameFemale"),
            F::Localization("nameNeutralGender"),
            F::Pad(4),
            F::UInt32("spellfamily"),
            F::Pad(4),
            F::UInt32("CinematicSequence"),
            F::UInt32("expansion"),
        ],

        fn read_row(record) {
            Ok((ClassId(record.u32("ClassID")?), record.localized("name")?.to_string()))
        }
    }
}
