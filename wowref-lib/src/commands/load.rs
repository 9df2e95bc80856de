use super::Host;
use super::common::{CommonArgs, load_registry};
use crate::Result;
use crate::registry::{LoadOutcome, LoadReport};
use clap::Parser;
use core::fmt::Write;
use owo_colors::OwoColorize;
use std::io::Write as _;

#[derive(Parser, Debug)]
pub struct LoadArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Fail if any table could not be loaded
    #[arg(long)]
    pub strict: bool,
}

pub async fn load_tables<H: Host>(host: &mut H, args: &LoadArgs) -> Result<()> {
    let (_registry, report) = load_registry(&args.common).await?;

    let mut text = String::new();
    render_report(&report, args.common.color.use_colors(&std::io::stdout()), &mut text)?;
    let _ = write!(host.output(), "{text}");

    let failed = report.failed().count();
    if args.strict && failed > 0 {
        let _ = writeln!(host.error(), "{failed} table(s) failed to load");
        host.exit(1);
    }

    Ok(())
}

/// One line per table, then a summary line.
pub fn render_report<W: Write>(report: &LoadReport, use_colors: bool, writer: &mut W) -> Result<()> {
    let width = report.outcomes.iter().map(|outcome| outcome.table.len()).max().unwrap_or(0);

    for outcome in &report.outcomes {
        render_outcome(outcome, width, use_colors, writer)?;
    }

    let failed = report.failed().count();
    writeln!(
        writer,
        "\n{} tables, {} failed, {} records",
        report.outcomes.len(),
        failed,
        report.total_records()
    )?;

    Ok(())
}

fn render_outcome<W: Write>(outcome: &LoadOutcome, width: usize, use_colors: bool, writer: &mut W) -> Result<()> {
    let status = if outcome.ok { "    OK" } else { "FAILED" };
    let status = match (use_colors, outcome.ok) {
        (false, _) => status.to_string(),
        (true, true) => status.green().bold().to_string(),
        (true, false) => status.red().bold().to_string(),
    };

    let secs = outcome.elapsed.as_secs_f64();
    match (outcome.record_count, &outcome.error) {
        (Some(records), _) => writeln!(
            writer,
            "{status} {:<width$} {records:>8} records {secs:>7.3}s ({})",
            outcome.table, outcome.source
        )?,
        (None, error) => writeln!(
            writer,
            "{status} {:<width$} {}",
            outcome.table,
            error.as_deref().unwrap_or("unknown error")
        )?,
    }

    Ok(())
}
