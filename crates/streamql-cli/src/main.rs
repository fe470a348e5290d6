use std::process::ExitCode;

use streamql_cli::args::Command;
use streamql_cli::{ARGS, EXIT, print_error, set_failed};
use streamql_syntax::diag::HintedStrResult;

/// Entry point.
fn main() -> ExitCode {
    streamql_cli::tracing::setup_tracing(&ARGS);

    let res = dispatch();

    if let Err(msg) = res {
        set_failed();
        print_error(&msg).expect("failed to print error");
    }

    EXIT.with(|cell| cell.get())
}

/// Execute the requested command.
fn dispatch() -> HintedStrResult<()> {
    match &ARGS.command {
        Command::Classify(command) => streamql_cli::classify::classify(command)?,
        Command::Table(command) => streamql_cli::table::table(command)?,
        Command::Check(command) => streamql_cli::check::check(command)?,
        Command::Highlight(command) => streamql_cli::highlight::highlight(command)?,
    }

    Ok(())
}
