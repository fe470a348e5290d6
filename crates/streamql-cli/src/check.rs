use std::io::{self, Write};

use ecow::eco_format;
use streamql_syntax::diag::{Hint, HintedStrResult};
use streamql_syntax::{SyncReport, Vocabulary};

use crate::args::CheckCommand;
use crate::set_failed;

/// Execute a check command.
pub fn check(command: &CheckCommand) -> HintedStrResult<()> {
    let path = &command.tokens;
    let text = crate::read(path)?;
    let vocab = Vocabulary::parse_tokens(&text)
        .hint(eco_format!("while reading {}", path.display()))?;
    tracing::info!("Checking {} token names", vocab.symbolic().count());

    let report = vocab.sync();
    match command.format {
        Some(format) => crate::write_output(None, &crate::serialize(&report, format)?)?,
        None => print_report(&report)
            .map_err(|err| eco_format!("failed to write output ({err})"))?,
    }

    if !report.is_in_sync() {
        set_failed();
    }

    Ok(())
}

/// Print a sync report for humans.
fn print_report(report: &SyncReport) -> io::Result<()> {
    let mut out = io::stdout().lock();
    if report.is_in_sync() {
        return writeln!(out, "token kinds are in sync");
    }

    for (name, code) in &report.unknown {
        writeln!(out, "unknown: {name} ({code}) is not classified")?;
    }

    for mismatch in &report.mismatched {
        writeln!(
            out,
            "mismatched: {} has code {}, expected {} ({})",
            mismatch.name,
            mismatch.found,
            mismatch.expected,
            mismatch.kind.name(),
        )?;
    }

    for kind in &report.missing {
        writeln!(out, "missing: {} ({})", kind.name(), kind.code())?;
    }

    Ok(())
}
