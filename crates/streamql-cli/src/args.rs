use std::fmt::{self, Display, Formatter};
use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};

/// The StreamQL highlighting toolkit.
#[derive(Debug, Clone, Parser)]
#[clap(name = "streamql", version = crate::streamql_version(), author)]
pub struct CliArguments {
    /// The command to run
    #[command(subcommand)]
    pub command: Command,

    /// Path to a highlighting configuration file
    #[clap(long, env = "STREAMQL_CONFIG", value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Whether to use color. When set to `auto`, color is used if the
    /// terminal supports it
    #[clap(long, default_value_t = ColorChoice::Auto, global = true)]
    pub color: ColorChoice,

    /// Sets the level of logging verbosity:
    /// -v = warning & error, -vv = info, -vvv = debug, -vvvv = trace
    #[clap(short, long, action = ArgAction::Count, global = true)]
    pub verbosity: u8,
}

/// What to do.
#[derive(Debug, Clone, Subcommand)]
#[command()]
pub enum Command {
    /// Classifies token kinds given by name, literal or code
    #[command(visible_alias = "c")]
    Classify(ClassifyCommand),

    /// Prints the full classification table
    Table(TableCommand),

    /// Checks an ANTLR `.tokens` file against the built-in token kinds
    Check(CheckCommand),

    /// Highlights a source file from its token stream
    #[command(visible_alias = "hl")]
    Highlight(HighlightCommand),
}

/// Classifies token kinds given by name, literal or code
#[derive(Debug, Clone, Parser)]
pub struct ClassifyCommand {
    /// Symbolic token names (`PLUS`), quoted literals (`'+'`), rule names
    /// (`query`) or integer token codes
    #[clap(required = true, value_name = "KIND", allow_hyphen_values = true)]
    pub kinds: Vec<String>,
}

/// Prints the full classification table
#[derive(Debug, Clone, Parser)]
pub struct TableCommand {
    /// The format to serialize in
    #[clap(long = "format", default_value = "json")]
    pub format: TableFormat,
}

/// Checks an ANTLR `.tokens` file against the built-in token kinds
#[derive(Debug, Clone, Parser)]
pub struct CheckCommand {
    /// Path to the `.tokens` file generated alongside the lexer
    #[clap(value_name = "TOKENS")]
    pub tokens: PathBuf,

    /// The format to print the report in
    #[clap(long = "format")]
    pub format: Option<SerializationFormat>,
}

/// Highlights a source file from its token stream
#[derive(Debug, Clone, Parser)]
pub struct HighlightCommand {
    /// Path to the StreamQL source file
    pub input: PathBuf,

    /// Path to a JSON token stream for the input. Each token is an object
    /// with a `kind` (name or code) and a `span` (`[start, end]` byte offsets)
    #[clap(long = "tokens", value_name = "JSON")]
    pub tokens: PathBuf,

    /// Path to the output file. Defaults to standard output
    #[clap(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// The format of the output
    #[clap(long = "format", default_value_t = HighlightFormat::Html)]
    pub format: HighlightFormat,
}

/// Output file format for the check command.
#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
pub enum SerializationFormat {
    Json,
    Yaml,
}

/// Output file format for the table command.
#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
pub enum TableFormat {
    Json,
    Yaml,
    /// The ANTLR `.tokens` vocabulary format
    Tokens,
}

/// Output file format for the highlight command.
#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
pub enum HighlightFormat {
    Html,
    Json,
}

impl Display for HighlightFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.to_possible_value()
            .expect("no values are skipped")
            .get_name()
            .fmt(f)
    }
}

/// When to use colored output.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default, ValueEnum)]
pub enum ColorChoice {
    #[default]
    Auto,
    Always,
    Never,
}

impl Display for ColorChoice {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.to_possible_value()
            .expect("no values are skipped")
            .get_name()
            .fmt(f)
    }
}
