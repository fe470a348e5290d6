//! Configuration of the classification table.

use std::collections::BTreeMap;

use ecow::EcoString;
use serde::{Deserialize, Serialize};

use crate::diag::{StrResult, eco_format};
use crate::Tag;

/// User configuration for highlighting, typically read from a TOML file.
///
/// ```toml
/// legacy-quirks = false
///
/// [overrides]
/// TRUE = "string-literal"
/// SCRIPT = "none"
/// ```
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct HighlightConfig {
    /// Whether whitespace and lexer-error tokens are highlighted like
    /// keywords.
    pub legacy_quirks: bool,
    /// Reassigned token kinds, keyed by their symbolic name.
    pub overrides: BTreeMap<EcoString, Classification>,
}

impl HighlightConfig {
    /// Parse a configuration from TOML.
    pub fn parse(text: &str) -> StrResult<Self> {
        toml::from_str(text)
            .map_err(|err| eco_format!("failed to parse configuration: {}", err.message()))
    }
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self { legacy_quirks: true, overrides: BTreeMap::new() }
    }
}

/// What an override assigns to a token kind.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Classification {
    /// No highlighting.
    None,
    /// Highlight as [`Tag::Identifier`].
    Identifier,
    /// Highlight as [`Tag::Keyword`].
    Keyword,
    /// Highlight as [`Tag::StringLiteral`].
    StringLiteral,
    /// Highlight as [`Tag::LineComment`].
    LineComment,
    /// Highlight as [`Tag::BlockComment`].
    BlockComment,
}

impl Classification {
    /// The tag this classification stands for.
    pub fn tag(self) -> Option<Tag> {
        match self {
            Self::None => None,
            Self::Identifier => Some(Tag::Identifier),
            Self::Keyword => Some(Tag::Keyword),
            Self::StringLiteral => Some(Tag::StringLiteral),
            Self::LineComment => Some(Tag::LineComment),
            Self::BlockComment => Some(Tag::BlockComment),
        }
    }
}

impl From<Option<Tag>> for Classification {
    fn from(tag: Option<Tag>) -> Self {
        match tag {
            None => Self::None,
            Some(Tag::Identifier) => Self::Identifier,
            Some(Tag::Keyword) => Self::Keyword,
            Some(Tag::StringLiteral) => Self::StringLiteral,
            Some(Tag::LineComment) => Self::LineComment,
            Some(Tag::BlockComment) => Self::BlockComment,
        }
    }
}
