/// How [`describe_duration`] joins its parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DurationStyle {
    /// `1 hour 1 minute and 15 seconds`
    #[default]
    Conjunction,

    /// `1 hour 1 minute 15 seconds`
    Plain,

    /// `1h 1m 15s`
    Short,
}

const UNITS: [(&str, char, u64); 5] = [
    ("week", 'w', 7 * 24 * 60 * 60),
    ("day", 'd', 24 * 60 * 60),
    ("hour", 'h', 60 * 60),
    ("minute", 'm', 60),
    ("second", 's', 1),
];

/// Spells a number of seconds out in weeks, days, hours, minutes and seconds.
///
/// The sign is ignored and zero reads as `0 seconds`.
#[must_use]
pub fn describe_duration(secs: i64, style: DurationStyle) -> String {
    let mut remaining = secs.unsigned_abs();
    if remaining == 0 {
        return "0 seconds".to_string();
    }

    let mut parts = Vec::new();
    for (name, abbreviation, unit) in UNITS {
        let count = remaining / unit;
        if count == 0 {
            continue;
        }
        remaining %= unit;

        parts.push(match style {
            DurationStyle::Short => format!("{count}{abbreviation}"),
            DurationStyle::Conjunction | DurationStyle::Plain => {
                format!("{count} {name}{}", if count == 1 { "" } else { "s" })
            }
        });
    }

    if style == DurationStyle::Conjunction && parts.len() > 1 {
        parts.insert(parts.len() - 1, "and".to_string());
    }

    parts.join(" ")
}
