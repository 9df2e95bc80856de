use super::duration::{DurationStyle, describe_duration};
use super::expression;
use crate::dbc::LookupError;
use crate::registry::Registry;
use crate::tables::{EFFECT_SLOTS, SpellId};
use regex::{Captures, Regex};
use std::sync::LazyLock;
use thiserror::Error;

const LOG_TARGET: &str = "    format";

/// Upper bound on the `.<digits>` suffix of a reference or expression.
const MAX_ROUND_DIGITS: usize = 20;

// $[<op><rhs>;][<spell>]<type>[<index>][.<digits>]
static EFFECT_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\$(?:(?P<f_operator>[/+\-*])(?P<f_rhs>[0-9]+);)?(?P<ref_id>[0-9]+)?(?P<type>SPH|MW|mw|[hinuSmMsdDaotx])(?P<index>[0-9]+)?(?:\.(?P<round>[0-9]+))?",
    )
    .expect("invalid effect reference regex")
});

// $?(s<spell>)[<true>][<false>]
static CONDITIONAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\?\(?(?P<type>s)(?P<ref_id>[0-9]+)\)?\[(?P<true>[^\]]*)\]\[(?P<false>[^\]]*)\]")
        .expect("invalid conditional regex")
});

// ${<expression>}[.<digits>]
static EXPRESSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{(?P<expression>[^}]+)\}(?:\.(?P<round>[0-9]+))?").expect("invalid expression regex"));

// <n> $l<singular>:<plural>;
static PLURAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?P<num>[0-9]+)\s\$l(?P<singular>[^:]*):(?P<plural>[^;]*);").expect("invalid pluralizer regex")
});

/// Why a template could not be expanded.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DescribeError {
    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error("'{token}' refers to effect {index}, spells have effects 1 to 3")]
    EffectIndex { token: String, index: String },

    #[error("'{token}' divides by the amplitude of an effect that has none")]
    ZeroAmplitude { token: String },

    #[error("'{token}' divides by zero")]
    DivisionByZero { token: String },

    #[error("'{token}' refers to a spell id that is out of range")]
    SpellIdRange { token: String },
}

enum Quantity {
    Number(f64),
    Text(String),
}

/// Expands the `$` macros in spell descriptions and tooltips.
///
/// A template is rewritten by five passes, always in this order:
///
/// 1. fixed tokens such as `$<threat>`
/// 2. effect references such as `$s1`, `$/10;m2` or `$12345d`
/// 3. conditionals, `$?(s123)[then][else]`, which always take the `else` text
/// 4. arithmetic, `${...}`, left as `[...]` when it still holds a `$`
/// 5. plurals, `3 $lsec:secs;`
///
/// Later passes see the output of earlier ones and never feed back into them.
#[derive(Debug, Clone, Copy)]
pub struct DescriptionFormatter<'a> {
    registry: &'a Registry,
}

impl<'a> DescriptionFormatter<'a> {
    #[must_use]
    pub const fn new(registry: &'a Registry) -> Self {
        Self { registry }
    }

    pub fn format_description(&self, spell: SpellId) -> Result<String, DescribeError> {
        self.format(spell, self.registry.spell_description(spell)?)
    }

    pub fn format_tooltip(&self, spell: SpellId) -> Result<String, DescribeError> {
        self.format(spell, self.registry.spell_tooltip(spell)?)
    }

    /// Expands `template` on behalf of `spell`, which is the spell effect references default to.
    pub fn format(&self, spell: SpellId, template: &str) -> Result<String, DescribeError> {
        let text = self.replace_fixed_tokens(spell, template)?;
        let text = try_replace_all(&EFFECT_REFERENCE, &text, |caps| self.expand_effect_reference(spell, caps))?;
        let text = CONDITIONAL.replace_all(&text, "${false}");
        let text = EXPRESSION.replace_all(&text, |caps: &Captures<'_>| evaluate_expression(caps));
        let text = PLURAL.replace_all(&text, |caps: &Captures<'_>| pluralize(caps));
        Ok(text.into_owned())
    }

    fn replace_fixed_tokens(&self, spell: SpellId, template: &str) -> Result<String, LookupError> {
        let mut text = template.replace("$Ghe:she;", "he or she").replace("$<mult>", "1");
        if text.contains("$<duration>") {
            text = text.replace("$<duration>", &self.registry.spell_duration(spell)?.to_string());
        }
        Ok(text.replace("$<threat>", "10"))
    }

    fn expand_effect_reference(&self, spell: SpellId, caps: &Captures<'_>) -> Result<String, DescribeError> {
        let token = caps.get(0).map_or("", |m| m.as_str());
        let kind = group(caps, "type");
        if matches!(kind, "SPH" | "MW" | "mw") {
            return Ok(token.to_string());
        }

        let spell = match caps.name("ref_id") {
            Some(id) => SpellId(id.as_str().parse().map_err(|_overflow| DescribeError::SpellIdRange {
                token: token.to_string(),
            })?),
            None => spell,
        };

        let registry = self.registry;
        let values = match kind {
            "h" => vec![Quantity::Number(f64::from(registry.spell_proc_chance(spell)?))],
            "i" => vec![Quantity::Number(f64::from(registry.spell_max_targets(spell)?))],
            "n" => vec![Quantity::Number(f64::from(registry.spell_proc_charges(spell)?))],
            "u" => vec![Quantity::Number(f64::from(registry.spell_stack_amount(spell)?))],
            "d" | "D" => {
                let secs = i64::from(registry.spell_duration(spell)?).div_euclid(1000);
                vec![Quantity::Text(describe_duration(secs, DurationStyle::Conjunction))]
            }
            _ => self.effect_values(spell, kind, caps, token)?,
        };

        let formula = caps
            .name("f_operator")
            .zip(caps.name("f_rhs"))
            .map(|(operator, rhs)| (operator.as_str(), rhs.as_str().parse::<f64>().unwrap_or_default()));
        let round = round_digits(caps);

        // an inexact division keeps the fraction for every value of this reference
        let mut keep_fraction = false;
        let mut rendered = Vec::with_capacity(values.len());
        for value in values {
            let value = match value {
                Quantity::Text(text) => {
                    rendered.push(text);
                    continue;
                }
                Quantity::Number(value) => value,
            };

            let value = match formula {
                Some(("*", rhs)) => value * rhs,
                Some(("+", rhs)) => value + rhs,
                Some(("-", rhs)) => value - rhs,
                Some((_, rhs)) => {
                    if rhs == 0.0 {
                        return Err(DescribeError::DivisionByZero { token: token.to_string() });
                    }
                    keep_fraction |= value % rhs != 0.0;
                    value / rhs
                }
                None => value,
            };

            rendered.push(render_number(value, round, keep_fraction));
        }

        Ok(rendered.join(" to "))
    }

    /// Values of the per-effect quantities, a `(low, high)` pair when the effect rolls a range.
    fn effect_values(&self, spell: SpellId, kind: &str, caps: &Captures<'_>, token: &str) -> Result<Vec<Quantity>, DescribeError> {
        let registry = self.registry;

        let slot = match caps.name("index") {
            None => 0,
            Some(index) => index
                .as_str()
                .parse::<usize>()
                .ok()
                .filter(|index| (1..=EFFECT_SLOTS).contains(index))
                .map(|index| index - 1)
                .ok_or_else(|| DescribeError::EffectIndex {
                    token: token.to_string(),
                    index: index.as_str().to_string(),
                })?,
        };

        let slots: [f64; EFFECT_SLOTS] = match kind {
            "a" => registry.spell_max_effect_radius(spell)?.map(f64::from),
            "t" => registry.spell_amplitudes(spell)?.map(|amplitude| f64::from(amplitude / 1000)),
            "x" => registry.spell_chain_targets(spell)?.map(f64::from),
            _ => registry.spell_base_points(spell)?.map(f64::from),
        };

        let mut value = slots[slot];
        if matches!(kind, "M" | "m" | "o" | "S" | "s" | "x") {
            value += 1.0;
        }
        if !matches!(kind, "M" | "m") {
            value = value.abs();
        }

        if kind == "o" {
            let amplitude = registry.spell_amplitudes(spell)?[slot];
            if amplitude == 0 {
                return Err(DescribeError::ZeroAmplitude { token: token.to_string() });
            }
            value *= f64::from(registry.spell_duration(spell)?) / f64::from(amplitude);
        }

        let mut values = vec![Quantity::Number(value)];
        let spread = i64::from(registry.spell_die_sides(spell)?[slot]) - 1;
        if spread > 0 && matches!(kind, "S" | "s" | "M" | "m" | "o" | "x") {
            #[expect(clippy::cast_precision_loss, reason = "The spread comes from an i32 and fits an f64 exactly")]
            values.push(Quantity::Number(value + spread as f64));
        }

        Ok(values)
    }
}

fn evaluate_expression(caps: &Captures<'_>) -> String {
    let expression = group(caps, "expression");
    if expression.contains('$') {
        return format!("[{expression}]");
    }

    match expression::evaluate(expression) {
        Ok(value) => render_number(value, round_digits(caps), false),
        Err(e) => {
            log::debug!(target: LOG_TARGET, "Unable to evaluate '{expression}': {e}");
            format!("[{expression}]")
        }
    }
}

fn round_digits(caps: &Captures<'_>) -> Option<usize> {
    caps.name("round")
        .map(|digits| digits.as_str().parse().map_or(MAX_ROUND_DIGITS, |n: usize| n.min(MAX_ROUND_DIGITS)))
}

fn pluralize(caps: &Captures<'_>) -> String {
    let num = group(caps, "num");
    let word = if num.trim_start_matches('0') == "1" {
        group(caps, "singular")
    } else {
        group(caps, "plural")
    };
    format!("{num} {word}")
}

/// Fixed point with `round` digits when given, the full fraction when `keep_fraction` is set,
/// and otherwise the value truncated to an integer.
fn render_number(value: f64, round: Option<usize>, keep_fraction: bool) -> String {
    match round {
        Some(digits) => format!("{value:.digits$}"),
        None if keep_fraction => {
            if value.is_finite() && value.fract() == 0.0 {
                format!("{value:.1}")
            } else {
                format!("{value}")
            }
        }
        None => {
            #[expect(clippy::cast_possible_truncation, reason = "Truncation toward zero is the intended rendering")]
            let truncated = value as i64;
            truncated.to_string()
        }
    }
}

fn group<'t>(caps: &Captures<'t>, name: &str) -> &'t str {
    caps.name(name).map_or("", |m| m.as_str())
}

/// Like `Regex::replace_all`, with a replacement that can fail.
#[expect(clippy::string_slice, reason = "Match boundaries are always char boundaries")]
fn try_replace_all<E>(regex: &Regex, text: &str, mut replace: impl FnMut(&Captures<'_>) -> Result<String, E>) -> Result<String, E> {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;

    for caps in regex.captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };

        out.push_str(&text[last..whole.start()]);
        out.push_str(&replace(&caps)?);
        last = whole.end();
    }

    out.push_str(&text[last..]);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dbc::Value;
    use crate::dbc::testing::{DbcBuilder, ints, text};
    use crate::tables::{SpellDurationTable, SpellRadiusTable, SpellTable, Table};

    fn table<T: Table>(rows: &[&[(&'static str, Value)]]) -> T {
        let builder = rows.iter().fold(DbcBuilder::new(T::SCHEMA), |builder, row| builder.row(row));
        T::from_bytes(&builder.build()).unwrap()
    }

    fn registry() -> Registry {
        Registry::default()
            .with_spell(table::<SpellTable>(&[
                &[
                    ("ID", Value::UInt(1)),
                    ("Description", text("Deals $s1 damage.")),
                    ("ToolTip", text("Taking $s2 damage every $t2 sec.")),
                    ("EffectBasePoints", ints(&[4, 9, -11])),
                    ("EffectDieSides", ints(&[4, 1, 1])),
                    ("EffectAmplitude", ints(&[0, 3000, 0])),
                    ("EffectRadiusIndex", ints(&[7, 0, 0])),
                    ("EffectChainTarget", ints(&[0, 0, 2])),
                    ("DurationIndex", Value::UInt(5)),
                    ("ProcChance", Value::UInt(35)),
                    ("StackAmount", Value::UInt(5)),
                ],
                &[
                    ("ID", Value::UInt(2)),
                    ("EffectBasePoints", ints(&[99, 24, 0])),
                    ("EffectDieSides", ints(&[1, 1, 0])),
                    ("DurationIndex", Value::UInt(6)),
                ],
                &[
                    ("ID", Value::UInt(3)),
                    ("EffectBasePoints", ints(&[0, 0, 0])),
                    ("EffectDieSides", ints(&[i64::from(i32::MIN), i64::from(i32::MAX), 0])),
                ],
            ]))
            .with_spell_durations(table::<SpellDurationTable>(&[
                &[("ID", Value::Int(5)), ("BaseDuration", Value::Int(12_000))],
                &[("ID", Value::Int(6)), ("BaseDuration", Value::Int(61_000))],
            ]))
            .with_spell_radius(table::<SpellRadiusTable>(&[&[
                ("ID", Value::Int(7)),
                ("RadiusMin", Value::Float(2.0)),
                ("RadiusMax", Value::Float(8.0)),
            ]]))
    }

    fn format(registry: &Registry, template: &str) -> String {
        DescriptionFormatter::new(registry).format(SpellId(1), template).unwrap()
    }

    #[test]
    fn test_fixed_tokens() {
        let registry = registry();
        assert_eq!(
            format(&registry, "$Ghe:she; gains $<mult> charge for $<duration> ms, $<threat> threat"),
            "he or she gains 1 charge for 12000 ms, 10 threat"
        );
    }

    #[test]
    fn test_range() {
        let registry = registry();
        assert_eq!(format(&registry, "$s1"), "5 to 8");
        assert_eq!(format(&registry, "$S"), "5 to 8");
        assert_eq!(format(&registry, "$s2"), "10");
    }

    #[test]
    fn test_extreme_die_sides() {
        let registry = registry();
        assert_eq!(format(&registry, "$3s1"), "1");
        assert_eq!(format(&registry, "$3s2"), "1 to 2147483647");
    }

    #[test]
    fn test_round_digits_are_capped() {
        let registry = registry();
        assert_eq!(format(&registry, "$s2.999999999"), "10.00000000000000000000");
        assert_eq!(format(&registry, "${1/4}.99999999999999999999999"), "0.25000000000000000000");
    }

    #[test]
    fn test_signed_types() {
        let registry = registry();
        assert_eq!(format(&registry, "$m3"), "-10");
        assert_eq!(format(&registry, "$s3"), "10");
    }

    #[test]
    fn test_per_spell_quantities() {
        let registry = registry();
        assert_eq!(format(&registry, "$h% chance, $u stacks"), "35% chance, 5 stacks");
        assert_eq!(format(&registry, "$a1 yards"), "8 yards");
        assert_eq!(format(&registry, "every $t2 sec"), "every 3 sec");
        assert_eq!(format(&registry, "$x3 targets"), "3 targets");
        assert_eq!(format(&registry, "$o2 over $d"), "40 over 12 seconds");
        assert_eq!(format(&registry, "$2d"), "1 minute and 1 second");
    }

    #[test]
    fn test_formula() {
        let registry = registry();
        assert_eq!(format(&registry, "$/10;2s1"), "10");
        assert_eq!(format(&registry, "$/10;2s2"), "2.5");
        assert_eq!(format(&registry, "$*2;s2"), "20");
        assert_eq!(format(&registry, "$/4;s1"), "1.25 to 2.0");
        assert_eq!(format(&registry, "$/3;s2.2"), "3.33");
    }

    #[test]
    fn test_reserved_tokens_are_kept() {
        let registry = registry();
        assert_eq!(format(&registry, "$SPH and $MW and $mw"), "$SPH and $MW and $mw");
    }

    #[test]
    fn test_conditional_takes_else_branch() {
        let registry = Registry::default();
        assert_eq!(format(&registry, "$?(s123)[TRUE][FALSE]"), "FALSE");
        assert_eq!(format(&registry, "$?s123[TRUE][]"), "");
    }

    #[test]
    fn test_expressions() {
        let registry = registry();
        assert_eq!(format(&registry, "${10/3}.1"), "3.3");
        assert_eq!(format(&registry, "${9/3}"), "3");
        assert_eq!(format(&registry, "${$s2*2}"), "20");
        assert_eq!(format(&registry, "${$SPH*2}"), "[$SPH*2]");
        assert_eq!(format(&registry, "${1/0}"), "[1/0]");
    }

    #[test]
    fn test_plurals() {
        let registry = Registry::default();
        assert_eq!(format(&registry, "3 $lsec:secs;"), "3 secs");
        assert_eq!(format(&registry, "1 $lsec:secs;"), "1 sec");
        assert_eq!(format(&registry, "01 $lcharge:charges;"), "01 charge");
    }

    #[test]
    fn test_description_and_tooltip() {
        let registry = registry();
        let formatter = DescriptionFormatter::new(&registry);
        assert_eq!(formatter.format_description(SpellId(1)).unwrap(), "Deals 5 to 8 damage.");
        assert_eq!(formatter.format_tooltip(SpellId(1)).unwrap(), "Taking 10 damage every 3 sec.");
    }

    #[test]
    fn test_errors() {
        let registry = registry();
        let formatter = DescriptionFormatter::new(&registry);

        assert!(matches!(
            formatter.format(SpellId(1), "$s4"),
            Err(DescribeError::EffectIndex { index, .. }) if index == "4"
        ));
        assert!(matches!(
            formatter.format(SpellId(1), "$o1"),
            Err(DescribeError::ZeroAmplitude { .. })
        ));
        assert!(matches!(
            formatter.format(SpellId(1), "$/0;s1"),
            Err(DescribeError::DivisionByZero { .. })
        ));
        assert_eq!(
            formatter.format(SpellId(1), "$99s1"),
            Err(DescribeError::Lookup(LookupError::NotFound {
                table: "Spell",
                key: "SpellId(99)".to_string(),
            }))
        );
    }
}
