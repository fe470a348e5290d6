use std::io::{self, Write};

use ecow::{EcoString, eco_format};
use streamql_syntax::diag::{HintedStrResult, bail};
use streamql_syntax::{ElementType, Tag, TokenKind, Vocabulary};

use crate::ARGS;
use crate::args::ClassifyCommand;

/// Execute a classify command.
pub fn classify(command: &ClassifyCommand) -> HintedStrResult<()> {
    let highlighter = crate::highlighter(&ARGS)?;
    let vocab = Vocabulary::builtin();

    let mut out = io::stdout().lock();
    for arg in &command.kinds {
        let element = resolve(vocab, arg)?;
        let tags = highlighter.classify(element);
        writeln!(out, "{}: {}", describe(vocab, element), format_tags(tags))
            .map_err(|err| eco_format!("failed to write output ({err})"))?;
    }

    Ok(())
}

/// Resolve a command-line argument or token stream entry to an element type.
///
/// Integers are taken as raw token codes, even if no token kind has them.
pub fn resolve(vocab: &Vocabulary, arg: &str) -> HintedStrResult<ElementType> {
    if let Ok(code) = arg.parse::<i32>() {
        return Ok(ElementType::Token(code));
    }

    if let Some(kind) = TokenKind::from_name(arg) {
        return Ok(kind.into());
    }

    match vocab.element(arg) {
        Some(element) => Ok(element),
        None => bail!(
            "unknown token kind `{arg}`";
            hint: "token names are upper case, for example `PLUS` or `ID`";
            hint: "run `streamql table` to list all of them"
        ),
    }
}

/// A human-readable description of an element type.
fn describe(vocab: &Vocabulary, element: ElementType) -> EcoString {
    match element {
        ElementType::Token(code) => match TokenKind::from_code(code) {
            Some(kind) => eco_format!("{} ({code})", kind.name()),
            None => eco_format!("unknown token ({code})"),
        },
        ElementType::Rule(index) => match vocab.rule_name(index) {
            Some(name) => eco_format!("rule {name} ({index})"),
            None => eco_format!("unknown rule ({index})"),
        },
        ElementType::Unknown => "unknown token".into(),
    }
}

/// Format the tags of an element.
fn format_tags(tags: &[Tag]) -> EcoString {
    if tags.is_empty() {
        return "none".into();
    }

    let mut buf = EcoString::new();
    for (i, tag) in tags.iter().enumerate() {
        if i > 0 {
            buf.push_str(", ");
        }
        buf.push_str(tag.name());
    }
    buf
}
