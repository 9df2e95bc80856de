use super::{ZoneId, define_table};
use crate::dbc::{FieldSpec as F, Scalar};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneRow {
    pub map: i32,

    /// One name per locale.
    pub names: Vec<String>,
    pub parent: Option<ZoneId>,
}

impl ZoneRow {
    #[must_use]
    pub fn name(&self) -> &str {
        self.names.first().map_or("", String::as_str)
    }
}

define_table! {
    /// Zones and the areas inside them, from the area table.
    zone ("AreaTable"): ZoneId => ZoneRow {
        schema: [
            F::Int32("Id"),
            F::Int32("Map"),
            F::Int32("AreaTable"),
            F::Int32("AreaBit"),
            F::Int32("Flags"),
            F::Int32("SoundPreferences"),
            F::Int32("SoundPreferencesUnderWater"),
            F::Int32("SoundAmbience"),
            F::Int32("ZoneMusic"),
            F::Int32("ZoneMusicIntroTable"),
            F::Int32("ExplorationLevel"),
            F::Localization("Name"),
            F::Int32("FactionGroupMask"),
            F::Array("LiquidType", Scalar::Int32, 4),
            F::Float("MinElevation"),
            F::Float("AmbientMultiplier"),
            F::Int32("lightid"),
        ],

        fn read_row(record) {
            let row = ZoneRow {
                map: record.int("Map")?,
                names: record.texts("Name")?,
                parent: record.reference("AreaTable")?.map(ZoneId),
            };
            Ok((ZoneId(record.int("Id")?), row))
        }
    }
}
