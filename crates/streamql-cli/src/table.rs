use serde::Serialize;
use streamql_syntax::diag::HintedStrResult;
use streamql_syntax::{Tag, Vocabulary};

use crate::ARGS;
use crate::args::{SerializationFormat, TableCommand, TableFormat};

/// One row of the classification table.
#[derive(Debug, Serialize)]
struct Entry {
    name: &'static str,
    code: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    literal: Option<&'static str>,
    tag: Option<Tag>,
    #[serde(skip_serializing_if = "Option::is_none")]
    key: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fallback: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    scope: Option<&'static str>,
}

/// Execute a table command.
pub fn table(command: &TableCommand) -> HintedStrResult<()> {
    let highlighter = crate::highlighter(&ARGS)?;

    let entries: Vec<Entry> = highlighter
        .table()
        .iter()
        .map(|(kind, tag)| Entry {
            name: kind.name(),
            code: kind.code(),
            literal: kind.literal(),
            tag,
            key: tag.map(Tag::key),
            fallback: tag.map(Tag::fallback),
            scope: tag.map(Tag::tm_scope),
        })
        .collect();

    let text = match command.format {
        TableFormat::Json => crate::serialize(&entries, SerializationFormat::Json)?,
        TableFormat::Yaml => crate::serialize(&entries, SerializationFormat::Yaml)?,
        TableFormat::Tokens => Vocabulary::builtin().to_tokens(),
    };

    crate::write_output(None, text.trim_end())?;
    Ok(())
}
