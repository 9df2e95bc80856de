use super::{TitleId, define_table};
use crate::dbc::FieldSpec as F;
use strum::Display;

/// Which variant of a gendered name to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharTitleRow {
    pub record_id: u32,

    /// Word of the known-titles bit mask that holds this title.
    pub mask_word: u32,
    pub mask_bit: u32,

    /// `[male, female]`, each with a `%s` where the character name goes.
    pub names: [String; 2],
    pub selection_index: u32,
}

impl CharTitleRow {
    #[must_use]
    pub fn name(&self, gender: Gender) -> &str {
        match gender {
            Gender::Male => &self.names[0],
            Gender::Female => &self.names[1],
        }
    }
}

define_table! {
    /// Character titles, keyed by selection index rather than record id.
    char_titles ("CharTitles"): TitleId => CharTitleRow {
        schema: [
            F::Int32("Id"),
            F::Pad(4),
            F::Localization("TitleMale"),
            F::Localization("TitleFemale"),
            F::Int32("SelectionIndex"),
        ],

        fn read_row(record) {
            let record_id: u32 = record.int("Id")?;
            let selection_index: u32 = record.int("SelectionIndex")?;
            let row = CharTitleRow {
                record_id,
                mask_word: record_id / 32,
                mask_bit: 1 << (record_id % 32),
                names: [
                    record.localized("TitleMale")?.to_string(),
                    record.localized("TitleFemale")?.to_string(),
                ],
                selection_index,
            };

            Ok((TitleId(selection_index), row))
        }
    }
}
