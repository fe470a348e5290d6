pub mod args;
pub mod check;
pub mod classify;
pub mod highlight;
pub mod table;
pub mod terminal;
pub mod tracing;

use std::cell::Cell;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use codespan_reporting::term;
use codespan_reporting::term::termcolor::WriteColor;
use ecow::eco_format;
use once_cell::sync::Lazy;
use serde::Serialize;
use streamql_syntax::diag::{Hint, HintedStrResult, HintedString, StrResult};
use streamql_syntax::{HighlightConfig, Highlighter, Table};

use crate::args::{CliArguments, SerializationFormat};

/// Ensure a failure exit code.
pub fn set_failed() {
    EXIT.with(|cell| cell.set(ExitCode::FAILURE));
}

thread_local! {
    /// The CLI's exit code.
    pub static EXIT: Cell<ExitCode> = const { Cell::new(ExitCode::SUCCESS) };
}

/// The parsed commandline arguments.
pub static ARGS: Lazy<CliArguments> = Lazy::new(CliArguments::parse);

/// Used by `args.rs`.
pub fn streamql_version() -> &'static str {
    env!("STREAMQL_VERSION")
}

/// Build the highlighter, applying the configuration file if one was given.
pub fn highlighter(args: &CliArguments) -> HintedStrResult<Highlighter> {
    let Some(path) = &args.config else {
        return Ok(Highlighter::default());
    };

    let text = read(path)?;
    let config = HighlightConfig::parse(&text)
        .hint(eco_format!("in configuration file {}", path.display()))?;
    let table = Table::DEFAULT
        .configure(&config)
        .hint("run `streamql table` to list the token names")?;

    ::tracing::info!(path = %path.display(), "loaded highlighting configuration");
    Ok(Highlighter::new(table))
}

/// Read a file to a string.
pub fn read(path: &Path) -> StrResult<String> {
    fs::read_to_string(path)
        .map_err(|err| eco_format!("failed to read {} ({err})", path.display()))
}

/// Write output to a file or, without a path, to standard output.
pub fn write_output(path: Option<&Path>, text: &str) -> StrResult<()> {
    match path {
        Some(path) => fs::write(path, text)
            .map_err(|err| eco_format!("failed to write {} ({err})", path.display())),
        None => writeln!(io::stdout().lock(), "{text}")
            .map_err(|err| eco_format!("failed to write output ({err})")),
    }
}

/// Serialize data to the output format.
pub fn serialize(data: &impl Serialize, format: SerializationFormat) -> StrResult<String> {
    match format {
        SerializationFormat::Json => {
            serde_json::to_string_pretty(data).map_err(|e| eco_format!("{e}"))
        }
        SerializationFormat::Yaml => {
            serde_yaml::to_string(&data).map_err(|e| eco_format!("{e}"))
        }
    }
}

/// Print an application-level error, followed by its hints.
pub fn print_error(error: &HintedString) -> io::Result<()> {
    let styles = term::Styles::default();

    let mut output = terminal::out();
    output.set_color(&styles.header_error)?;
    write!(output, "error")?;

    output.reset()?;
    writeln!(output, ": {}", error.message())?;

    for hint in error.hints() {
        output.set_color(&styles.header_help)?;
        write!(output, "hint")?;

        output.reset()?;
        writeln!(output, ": {hint}")?;
    }

    Ok(())
}
