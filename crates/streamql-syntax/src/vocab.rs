use std::fmt::Write;
use std::sync::LazyLock;

use ecow::EcoString;
use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::diag::{StrResult, bail};
use crate::{ElementType, TokenKind};

/// The rules of the StreamQL grammar, in the order the parser numbers them.
const RULES: &[&str] = &[
    "parse",
    "error",
    "siddhi_app",
    "execution_element",
    "definition_stream",
    "definition_table",
    "definition_function",
    "definition_trigger",
    "function_body",
    "annotation",
    "app_annotation",
    "annotation_element",
    "partition",
    "partition_with_stream",
    "condition_ranges",
    "query",
    "query_input",
    "standard_stream",
    "join_stream",
    "join_source",
    "pattern_stream",
    "sequence_stream",
    "basic_source",
    "window",
    "query_section",
    "group_by",
    "having",
    "output_rate",
    "query_output",
    "output_event_type",
    "output_attribute",
    "attribute_reference",
    "expression",
    "math_operation",
    "function_operation",
    "time_value",
    "constant_value",
    "signed_int_value",
    "string_value",
    "attribute_type",
    "name",
    "keyword",
];

/// The process-wide vocabulary of the built-in token kinds and rules.
static BUILTIN: LazyLock<Vocabulary> = LazyLock::new(|| {
    let mut vocab = Vocabulary::default();
    for &kind in TokenKind::LIST {
        if kind == TokenKind::Eof {
            continue;
        }
        vocab.push(kind.name().into(), kind.code());
        if let Some(literal) = kind.literal() {
            vocab.push(literal.into(), kind.code());
        }
    }
    vocab.rules = RULES.iter().map(|&rule| rule.into()).collect();
    vocab
});

/// The lexical metadata of a grammar: the names of its token kinds and of
/// its rules.
///
/// A vocabulary is derived once, either from the built-in token kinds or
/// from an ANTLR `.tokens` file, and is immutable afterwards.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    /// Names with their token codes, in file order. Literal names keep their
    /// quotes.
    entries: Vec<(EcoString, i32)>,
    /// Maps names to positions in `entries`.
    index: FxHashMap<EcoString, usize>,
    /// Rule names, indexed by rule number.
    rules: Vec<EcoString>,
}

impl Vocabulary {
    /// The vocabulary of the built-in token kinds and grammar rules.
    pub fn builtin() -> &'static Self {
        &BUILTIN
    }

    /// Parse the contents of an ANTLR `.tokens` file.
    ///
    /// Each non-empty line has the form `NAME=code` or `'literal'=code`.
    pub fn parse_tokens(text: &str) -> StrResult<Self> {
        let mut vocab = Self::default();
        for (i, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let number = i + 1;
            let Some((name, code)) = line.rsplit_once('=') else {
                bail!("line {number}: expected `NAME=code`, found `{line}`");
            };

            if !is_symbolic_name(name) && !is_literal_name(name) {
                bail!("line {number}: invalid token name `{name}`");
            }

            let Ok(code) = code.trim().parse::<i32>() else {
                bail!("line {number}: invalid token code `{code}`");
            };

            if vocab.index.contains_key(name) {
                bail!("line {number}: duplicate token name `{name}`");
            }

            vocab.push(name.into(), code);
        }

        Ok(vocab)
    }

    /// Add a name for a token code.
    fn push(&mut self, name: EcoString, code: i32) {
        self.index.insert(name.clone(), self.entries.len());
        self.entries.push((name, code));
    }

    /// The token code of a symbolic or quoted literal name.
    pub fn token(&self, name: &str) -> Option<i32> {
        self.index.get(name).map(|&i| self.entries[i].1)
    }

    /// The symbolic name of a token code.
    pub fn token_name(&self, code: i32) -> Option<&str> {
        self.symbolic().find(|&(_, c)| c == code).map(|(name, _)| name)
    }

    /// The number of a grammar rule.
    pub fn rule(&self, name: &str) -> Option<u16> {
        let index = self.rules.iter().position(|rule| rule == name)?;
        u16::try_from(index).ok()
    }

    /// The name of a grammar rule.
    pub fn rule_name(&self, index: u16) -> Option<&str> {
        self.rules.get(usize::from(index)).map(EcoString::as_str)
    }

    /// Resolve a token name, literal or rule name to an element type.
    ///
    /// Token names take precedence over rule names.
    pub fn element(&self, name: &str) -> Option<ElementType> {
        self.token(name)
            .map(ElementType::Token)
            .or_else(|| self.rule(name).map(ElementType::Rule))
    }

    /// Iterate over the symbolic token names and their codes.
    pub fn symbolic(&self) -> impl Iterator<Item = (&str, i32)> {
        self.entries
            .iter()
            .filter(|(name, _)| !is_literal_name(name))
            .map(|(name, code)| (name.as_str(), *code))
    }

    /// Render the vocabulary in the ANTLR `.tokens` format.
    pub fn to_tokens(&self) -> String {
        let mut out = String::new();
        for (name, code) in &self.entries {
            writeln!(out, "{name}={code}").ok();
        }
        out
    }

    /// Compare this vocabulary with the built-in token kinds.
    ///
    /// Both symbolic and literal names are checked against the kind they
    /// stand for.
    pub fn sync(&self) -> SyncReport {
        let mut report = SyncReport::default();

        for (name, code) in &self.entries {
            let kind = if is_literal_name(name) {
                TokenKind::from_literal(name)
            } else {
                TokenKind::from_name(name)
            };

            match kind {
                None => report.unknown.push((name.clone(), *code)),
                Some(kind) if kind.code() != *code => report.mismatched.push(Mismatch {
                    name: name.clone(),
                    kind,
                    expected: kind.code(),
                    found: *code,
                }),
                Some(_) => {}
            }
        }

        report.missing = TokenKind::LIST
            .iter()
            .copied()
            .filter(|&kind| kind != TokenKind::Eof && self.token(kind.name()).is_none())
            .collect();

        if !report.is_in_sync() {
            tracing::warn!(
                unknown = report.unknown.len(),
                mismatched = report.mismatched.len(),
                missing = report.missing.len(),
                "vocabulary is out of sync with the built-in token kinds"
            );
        }

        report
    }
}

/// Whether a name is a valid symbolic token name.
fn is_symbolic_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Whether a name is a quoted literal name.
fn is_literal_name(name: &str) -> bool {
    name.len() >= 3 && name.starts_with('\'') && name.ends_with('\'')
}

/// The differences between a vocabulary and the built-in token kinds.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize)]
pub struct SyncReport {
    /// Token names and literals the classifier does not know, with their
    /// codes.
    pub unknown: Vec<(EcoString, i32)>,
    /// Known token names whose codes differ.
    pub mismatched: Vec<Mismatch>,
    /// Built-in token kinds the vocabulary does not define.
    #[serde(serialize_with = "serialize_kinds")]
    pub missing: Vec<TokenKind>,
}

impl SyncReport {
    /// Whether the vocabulary and the built-in token kinds agree.
    pub fn is_in_sync(&self) -> bool {
        self.unknown.is_empty() && self.mismatched.is_empty() && self.missing.is_empty()
    }
}

/// A token kind whose code differs between a vocabulary and the built-in
/// kinds.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct Mismatch {
    /// The symbolic or quoted literal name as it appears in the vocabulary.
    pub name: EcoString,
    /// The token kind the name stands for.
    #[serde(serialize_with = "serialize_kind")]
    pub kind: TokenKind,
    /// The built-in code.
    pub expected: i32,
    /// The code in the vocabulary.
    pub found: i32,
}

fn serialize_kind<S: serde::Serializer>(kind: &TokenKind, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(kind.name())
}

fn serialize_kinds<S: serde::Serializer>(
    kinds: &[TokenKind],
    s: S,
) -> Result<S::Ok, S::Error> {
    s.collect_seq(kinds.iter().map(|kind| kind.name()))
}
