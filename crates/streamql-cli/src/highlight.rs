use std::path::Path;

use ecow::{EcoString, eco_format};
use serde::{Deserialize, Serialize};
use streamql_syntax::diag::{Hint, HintedStrResult, StrResult};
use streamql_syntax::{ElementType, Highlighter, Tag, Token, Vocabulary};

use crate::ARGS;
use crate::args::{HighlightCommand, HighlightFormat};
use crate::classify::resolve;

/// A token as it appears in a JSON token stream.
#[derive(Debug, Deserialize)]
struct RawToken {
    kind: RawKind,
    span: (usize, usize),
}

/// A token kind given by code or by name.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawKind {
    Code(i64),
    Name(EcoString),
}

/// A highlighted token in the JSON output.
#[derive(Debug, Serialize)]
struct Highlighted<'a> {
    span: (usize, usize),
    text: Option<&'a str>,
    tags: &'a [Tag],
}

/// Execute a highlight command.
pub fn highlight(command: &HighlightCommand) -> HintedStrResult<()> {
    let highlighter = crate::highlighter(&ARGS)?;
    let text = crate::read(&command.input)?;
    let tokens = load_tokens(&command.tokens)?;
    tracing::info!(tokens = tokens.len(), "Highlighting {}", command.input.display());

    let output = match command.format {
        HighlightFormat::Html => highlighter
            .highlight_html(&text, tokens)
            .hint("the token stream must be sorted and match the source file")?,
        HighlightFormat::Json => to_json(&highlighter, &text, tokens)?,
    };

    crate::write_output(command.output.as_deref(), &output)?;
    Ok(())
}

/// Load a JSON token stream.
fn load_tokens(path: &Path) -> StrResult<Vec<Token>> {
    let json = crate::read(path)?;
    parse_stream(&json).map_err(|err| {
        eco_format!("failed to parse token stream {} ({err})", path.display())
    })
}

/// Parse a JSON token stream.
///
/// Token kinds that are unknown by name or whose code is out of range are
/// kept, but stay unclassified.
fn parse_stream(json: &str) -> serde_json::Result<Vec<Token>> {
    let raw: Vec<RawToken> = serde_json::from_str(json)?;
    let vocab = Vocabulary::builtin();
    Ok(raw
        .into_iter()
        .map(|RawToken { kind, span: (start, end) }| Token {
            kind: element(vocab, kind),
            span: start..end,
        })
        .collect())
}

/// Resolve the kind of a token in a stream.
fn element(vocab: &Vocabulary, kind: RawKind) -> ElementType {
    match kind {
        RawKind::Code(code) => match i32::try_from(code) {
            Ok(code) => ElementType::Token(code),
            Err(_) => {
                tracing::warn!(code, "token code is out of range");
                ElementType::Unknown
            }
        },
        RawKind::Name(name) => match resolve(vocab, &name) {
            Ok(element) => element,
            Err(_) => {
                tracing::warn!(%name, "unknown token kind in token stream");
                ElementType::Unknown
            }
        },
    }
}

/// Serialize the tags of each token, together with its text.
fn to_json(highlighter: &Highlighter, text: &str, tokens: Vec<Token>) -> StrResult<String> {
    let highlighted: Vec<_> = highlighter
        .highlight_tokens(tokens)
        .map(|(span, tags)| Highlighted {
            text: text.get(span.clone()),
            span: (span.start, span.end),
            tags,
        })
        .collect();

    serde_json::to_string_pretty(&highlighted).map_err(|err| eco_format!("{err}"))
}
