//! Tables kept as whole records.
//!
//! Nothing in the crate projects these yet, so every row is stored as the decoded [`Record`]
//! under its first field.

use super::define_table;
use crate::dbc::{FieldSpec as F, Record, Scalar};

define_table! {
    map ("Map"): u32 => Record {
        schema: [
            F::UInt32("MapID"),
            F::Str("internalname"),
            F::UInt32("map_type"),
            F::Pad(8),
            F::Localization("name"),
            F::UInt32("linked_zone"),
            F::Localization("hordeIntro"),
            F::Localization("allianceIntro"),
            F::UInt32("multimap_id"),
            F::Pad(4),
            F::Int32("entrance_map"),
            F::Float("entrance_x"),
            F::Float("entrance_y"),
            F::Pad(4),
            F::UInt32("addon"),
            F::UInt32("unk_time"),
            F::UInt32("maxPlayers"),
        ],

        fn read_row(record) {
            Ok((record.u32("MapID")?, record))
        }
    }
}

define_table! {
    faction ("Faction"): u32 => Record {
        schema: [
            F::UInt32("ID"),
            F::Int32("reputationListID"),
            F::Array("BaseRepRaceMask", Scalar::UInt32, 4),
            F::Array("BaseRepClassMask", Scalar::UInt32, 4),
            F::Array("BaseRepValue", Scalar::Int32, 4),
            F::Array("ReputationFlags", Scalar::UInt32, 4),
            F::UInt32("team"),
            F::Float("spilloverRateIn"),
            F::Float("spilloverRateOut"),
            F::UInt32("spilloverMaxRankIn"),
            F::Pad(4),
            F::Localization("name"),
            F::Localization("description"),
        ],

        fn read_row(record) {
            Ok((record.u32("ID")?, record))
        }
    }
}

define_table! {
    talent ("Talent"): u32 => Record {
        schema: [
            F::Int32("ID"),
            F::Int32("TalentTab"),
            F::Int32("Row"),
            F::Int32("Column"),
            F::Array("SpellID", Scalar::Int32, 9),
            F::Array("ReqTalents", Scalar::Int32, 3),
            F::Array("ReqTalentsPoints", Scalar::Int32, 3),
            F::Int32("Flags"),
            F::Int32("ReqSpellID"),
            F::Array("AllowForPetFlags", Scalar::Int32, 2),
        ],

        fn read_row(record) {
            Ok((record.u32("ID")?, record))
        }
    }
}

define_table! {
    talent_tab ("TalentTab"): u32 => Record {
        schema: [
            F::Int32("ID"),
            F::Str("TabName"),
            F::Pad(64),
            F::Int32("SpellIcon"),
            F::Int32("Races"),
            F::Int32("Classes"),
            F::Int32("CreatureFamily"),
            F::Int32("TabIndex"),
            F::Str("Background"),
        ],

        fn read_row(record) {
            Ok((record.u32("ID")?, record))
        }
    }
}

define_table! {
    spell_range ("SpellRange"): u32 => Record {
        schema: [
            F::Int32("ID"),
            F::Float("MinRangeHostile"),
            F::Float("MinRangeFriend"),
            F::Float("MaxRangeHostile"),
            F::Float("MaxRangeFriend"),
            F::Int32("Type"),
            F::Localization("Description"),
            F::Localization("ShortName"),
        ],

        fn read_row(record) {
            Ok((record.u32("ID")?, record))
        }
    }
}

define_table! {
    glyph_properties ("GlyphProperties"): u32 => Record {
        schema: [
            F::Int32("ID"),
            F::Int32("SpellID"),
            F::Int32("Type"),
            F::Int32("IconID"),
        ],

        fn read_row(record) {
            Ok((record.u32("ID")?, record))
        }
    }
}

define_table! {
    skill_line ("SkillLine"): u32 => Record {
        schema: [
            F::Int32("ID"),
            F::Int32("CategoryID"),
            F::Int32("SkillCostID"),
            F::Localization("Name"),
            F::Localization("Description"),
            F::Int32("SpellIcon"),
            F::Localization("Verb"),
            F::UInt32("CanLink"),
        ],

        fn read_row(record) {
            Ok((record.u32("ID")?, record))
        }
    }
}

define_table! {
    skill_line_ability ("SkillLineAbility"): u32 => Record {
        schema: [
            F::Int32("ID"),
            F::Int32("SkillLine"),
            F::Int32("Spell"),
            F::Int32("ReqRaces"),
            F::Int32("ReqClasses"),
            F::Int32("ExRaces"),
            F::Int32("ExClasses"),
            F::Int32("MinSkill"),
            F::Int32("SpellParent"),
            F::Int32("AcquireMethod"),
            F::Int32("GreyLevel"),
            F::Int32("GreenLevel"),
            F::Array("CharPoints", Scalar::Int32, 2),
        ],

        fn read_row(record) {
            Ok((record.u32("ID")?, record))
        }
    }
}

define_table! {
    achievement ("Achievement"): u32 => Record {
        schema: [
            F::Int32("ID"),
            F::Int32("Faction"),
            F::Int32("Map"),
            F::Int32("Previous"),
            F::Localization("Name"),
            F::Localization("Description"),
            F::Int32("Category"),
            F::Int32("Points"),
            F::Int32("OrderInGroup"),
            F::Int32("Flags"),
            F::Int32("SpellIcon"),
            F::Localization("Reward"),
            F::Int32("Demands"),
            F::Int32("ReferencedAchievement"),
        ],

        fn read_row(record) {
            Ok((record.u32("ID")?, record))
        }
    }
}

define_table! {
    achievement_category ("Achievement_Category"): u32 => Record {
        schema: [
            F::Int32("ID"),
            F::Int32("ParentID"),
            F::Localization("Name"),
            F::Int32("ui_order"),
        ],

        fn read_row(record) {
            Ok((record.u32("ID")?, record))
        }
    }
}

define_table! {
    achievement_criteria ("Achievement_Criteria"): u32 => Record {
        schema: [
            F::Int32("ID"),
            F::Int32("AchievementID"),
            F::Int32("Type"),
            F::Int32("AssetID"),
            F::Int32("Quantity"),
            F::Int32("StartEvent"),
            F::Int32("StartAsset"),
            F::Int32("FailEvent"),
            F::Int32("FailAsset"),
            F::Localization("Description"),
            F::Int32("Flags"),
            F::Int32("TimerStartEvent"),
            F::Int32("TimerAssetID"),
            F::Int32("TimerTime"),
            F::Int32("ui_order"),
        ],

        fn read_row(record) {
            Ok((record.u32("ID")?, record))
        }
    }
}

define_table! {
    /// Loading screen tips.
    game_tips ("GameTips"): u32 => Record {
        schema: [
            F::Int32("Id"),
            F::Localization("Tip"),
        ],

        fn read_row(record) {
            Ok((record.u32("Id")?, record))
        }
    }
}

define_table! {
    /// Censored words, each stored as a regular expression.
    chat_profanity ("ChatProfanity"): u32 => Record {
        schema: [
            F::Int32("Id"),
            F::Str("Word"),
            F::Int32("Lang"),
        ],

        fn read_row(record) {
            Ok((record.u32("Id")?, record))
        }
    }
}

define_table! {
    /// Regular expressions matching known spam sites.
    spam_messages ("SpamMessages"): u32 => Record {
        schema: [
            F::Int32("Id"),
            F::Str("RegEx"),
        ],

        fn read_row(record) {
            Ok((record.u32("Id")?, record))
        }
    }
}

define_table! {
    /// Display names of spell effect types, one per locale without the usual flags word.
    spell_effect_names ("SpellEffectNames"): u32 => Record {
        schema: [
            F::Int32("ID"),
            F::Array("DisplayName", Scalar::Str, 8),
            F::Pad(4),
        ],

        fn read_row(record) {
            Ok((record.u32("ID")?, record))
        }
    }
}
