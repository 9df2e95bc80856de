use super::Host;
use super::common::{CommonArgs, load_registry};
use crate::Result;
use crate::format::{DescribeError, DescriptionFormatter};
use crate::registry::Registry;
use crate::tables::SpellId;
use clap::Parser;
use core::fmt::Write;
use ohno::bail;
use std::io::Write as _;

const LOG_TARGET: &str = "  describe";

#[derive(Parser, Debug)]
pub struct DescribeArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Spells to describe
    #[arg(value_name = "SPELL_ID", required = true)]
    pub spell_ids: Vec<u32>,

    /// Also print each spell's tooltip
    #[arg(long)]
    pub tooltip: bool,
}

pub async fn describe_spells<H: Host>(host: &mut H, args: &DescribeArgs) -> Result<()> {
    let (registry, report) = load_registry(&args.common).await?;
    for outcome in report.failed() {
        log::warn!(target: LOG_TARGET, "Table '{}' is not available", outcome.table);
    }

    let mut failed = 0usize;
    for &id in &args.spell_ids {
        let mut text = String::new();
        match describe_spell(&registry, SpellId(id), args.tooltip, &mut text) {
            Ok(()) => {
                let _ = write!(host.output(), "{text}");
            }
            Err(e) => {
                failed += 1;
                let _ = writeln!(host.error(), "{id}: {e}");
            }
        }
    }

    if failed > 0 {
        bail!("unable to describe {failed} spell(s)");
    }

    Ok(())
}

/// Writes the heading line and the formatted description of one spell.
pub fn describe_spell<W: Write>(registry: &Registry, id: SpellId, tooltip: bool, writer: &mut W) -> Result<(), DescribeError> {
    let formatter = DescriptionFormatter::new(registry);

    let name = registry.spell_name(id)?;
    let rank = registry.spell_rank(id)?;
    let description = formatter.format_description(id)?;
    let tooltip = if tooltip { Some(formatter.format_tooltip(id)?) } else { None };

    // writing into a String cannot fail
    let _ = if rank.is_empty() {
        writeln!(writer, "{}: {name}", id.0)
    } else {
        writeln!(writer, "{}: {name} ({rank})", id.0)
    };
    let _ = writeln!(writer, "  {description}");
    if let Some(tooltip) = tooltip {
        let _ = writeln!(writer, "  Tooltip: {tooltip}");
    }

    Ok(())
}
