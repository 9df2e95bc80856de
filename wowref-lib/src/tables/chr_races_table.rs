use super::{RaceId, define_table};
use crate::dbc::FieldSpec as F;

define_table! {
    /// Playable race names.
    chr_races ("ChrRaces"): RaceId => String {
        schema: [
            F::UInt32("RaceID"),
            F::Pad(4),
            F::UInt32("FactionID"),
            F::Pad(4),
            F::UInt32("model_m"),
            F::UInt32("model_f"),
            F::Pad(4),
            F::UInt32("TeamID"),
            F::Pad(16),
            F::UInt32("CinematicSequence"),
            F::Pad(4),
            F::Localization("name"),
            F::Localization("nameFemale"),
            F::Localization("nameNeutralGender"),
            F::Pad(12),
            F::UInt32("expansion"),
        ],

        fn read_row(record) {
            Ok((RaceId(record.u32("RaceID")?), record.localized("name")?.to_string()))
        }
    }
}
