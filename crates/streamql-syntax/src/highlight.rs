use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::config::HighlightConfig;
use crate::diag::{StrResult, bail};
use crate::set::{self, KindSet};
use crate::{ElementType, TokenKind};

/// A syntax highlighting tag.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tag {
    /// An identifier.
    Identifier,
    /// A keyword, operator, punctuation or non-string literal.
    Keyword,
    /// A string literal.
    StringLiteral,
    /// A line comment.
    LineComment,
    /// A block comment.
    BlockComment,
}

impl Tag {
    /// The list of all tags, in the same order as they are defined.
    ///
    /// Can be used as the counter-part to `tag as usize`.
    pub const LIST: &'static [Tag] = &[
        Self::Identifier,
        Self::Keyword,
        Self::StringLiteral,
        Self::LineComment,
        Self::BlockComment,
    ];

    /// The name of the tag, as used in configuration files.
    pub fn name(self) -> &'static str {
        match self {
            Self::Identifier => "identifier",
            Self::Keyword => "keyword",
            Self::StringLiteral => "string-literal",
            Self::LineComment => "line-comment",
            Self::BlockComment => "block-comment",
        }
    }

    /// The attribute key under which editor themes can style this tag.
    pub fn key(self) -> &'static str {
        match self {
            Self::Identifier => "STREAMQL_ID",
            Self::Keyword => "STREAMQL_KEYWORD",
            Self::StringLiteral => "STREAMQL_STRING",
            Self::LineComment => "STREAMQL_LINE_COMMENT",
            Self::BlockComment => "STREAMQL_BLOCK_COMMENT",
        }
    }

    /// The language-independent default key a theme falls back to when it
    /// does not style [`key`](Self::key).
    pub fn fallback(self) -> &'static str {
        match self {
            Self::Identifier => "IDENTIFIER",
            Self::Keyword => "KEYWORD",
            Self::StringLiteral => "STRING",
            Self::LineComment => "LINE_COMMENT",
            Self::BlockComment => "BLOCK_COMMENT",
        }
    }

    /// Return the recommended TextMate grammar scope for the given highlighting
    /// tag.
    pub fn tm_scope(self) -> &'static str {
        match self {
            Self::Identifier => "variable.other.streamql",
            Self::Keyword => "keyword.streamql",
            Self::StringLiteral => "string.quoted.double.streamql",
            Self::LineComment => "comment.line.streamql",
            Self::BlockComment => "comment.block.streamql",
        }
    }

    /// The recommended CSS class for the highlighting tag.
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Identifier => "sql-id",
            Self::Keyword => "sql-key",
            Self::StringLiteral => "sql-str",
            Self::LineComment => "sql-line-comment",
            Self::BlockComment => "sql-block-comment",
        }
    }
}

/// Which token kinds get which tag.
///
/// Kinds not named by any group stay unhighlighted. The groups must be
/// disjoint, which is checked when the default table is built.
const GROUPS: &[(KindSet, Tag)] = &[
    (KindSet::new().add(TokenKind::Id), Tag::Identifier),
    (set::PUNCTUATION, Tag::Keyword),
    (set::RESERVED, Tag::Keyword),
    (set::TYPE_NAME, Tag::Keyword),
    (set::LITERAL, Tag::Keyword),
    (set::EMBEDDED, Tag::Keyword),
    (set::LEXER_QUIRKS, Tag::Keyword),
    (KindSet::new().add(TokenKind::Str), Tag::StringLiteral),
    (KindSet::new().add(TokenKind::SingleLineComment), Tag::LineComment),
    (KindSet::new().add(TokenKind::MultilineComment), Tag::BlockComment),
];

/// A total mapping from token kinds to highlighting tags.
///
/// Every known token kind maps to exactly one tag or to none. Once built, a
/// table never changes.
#[derive(Copy, Clone, Eq, PartialEq)]
pub struct Table([Option<Tag>; TokenKind::COUNT]);

impl Table {
    /// The default classification.
    pub const DEFAULT: Self = Self(build(GROUPS));

    /// The tag of a token kind.
    pub fn get(&self, kind: TokenKind) -> Option<Tag> {
        self.0[kind as usize]
    }

    /// Iterate over all token kinds and their tags, in definition order.
    pub fn iter(&self) -> impl Iterator<Item = (TokenKind, Option<Tag>)> + '_ {
        TokenKind::LIST.iter().map(|&kind| (kind, self.get(kind)))
    }

    /// Derive a new table by applying a configuration to this one.
    ///
    /// Fails if an override names an unknown token kind.
    pub fn configure(&self, config: &HighlightConfig) -> StrResult<Self> {
        let mut table = *self;

        if !config.legacy_quirks {
            for kind in set::LEXER_QUIRKS.iter() {
                table.0[kind as usize] = None;
            }
        }

        for (name, classification) in &config.overrides {
            let Some(kind) = TokenKind::from_name(name) else {
                bail!("unknown token kind `{name}` in overrides");
            };
            table.0[kind as usize] = classification.tag();
        }

        tracing::debug!(
            legacy_quirks = config.legacy_quirks,
            overrides = config.overrides.len(),
            "configured classification table"
        );

        Ok(table)
    }
}

impl Default for Table {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl std::fmt::Debug for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(self.iter().filter_map(|(kind, tag)| Some((kind.name(), tag?))))
            .finish()
    }
}

/// Build a table from disjoint groups.
const fn build(groups: &[(KindSet, Tag)]) -> [Option<Tag>; TokenKind::COUNT] {
    let mut table = [None; TokenKind::COUNT];
    let mut g = 0;
    while g < groups.len() {
        let (kinds, tag) = groups[g];
        let mut i = 0;
        while i < TokenKind::COUNT {
            if kinds.contains(TokenKind::LIST[i]) {
                assert!(table[i].is_none(), "token kind is part of two groups");
                table[i] = Some(tag);
            }
            i += 1;
        }
        g += 1;
    }
    table
}

/// Determine the highlight tag of a token kind with the default table.
///
/// Returns `None` if the token should not be highlighted.
pub fn highlight(kind: TokenKind) -> Option<Tag> {
    Table::DEFAULT.get(kind)
}

/// A token in a token stream: its element type and its byte range in the
/// source text.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Token {
    /// The kind of the token.
    pub kind: ElementType,
    /// The byte range of the token in the source text.
    pub span: Range<usize>,
}

impl Token {
    /// Create a new token.
    pub fn new(kind: impl Into<ElementType>, span: Range<usize>) -> Self {
        Self { kind: kind.into(), span }
    }
}

/// Assigns highlighting tags to the elements of a StreamQL document.
///
/// A highlighter only reads from its table, so it can be shared freely
/// between threads.
#[derive(Debug, Clone, Default)]
pub struct Highlighter {
    table: Table,
}

impl Highlighter {
    /// Create a highlighter that classifies with the given table.
    pub fn new(table: Table) -> Self {
        Self { table }
    }

    /// The table this highlighter classifies with.
    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Determine the tags of an element.
    ///
    /// The result holds at most one tag. It is empty for syntax-tree nodes,
    /// for tokens without highlighting and for token codes this crate does
    /// not know.
    pub fn classify(&self, element: ElementType) -> &[Tag] {
        match element.token_kind() {
            Some(kind) => self.classify_kind(kind),
            None => &[],
        }
    }

    /// Determine the tags of a token kind.
    pub fn classify_kind(&self, kind: TokenKind) -> &[Tag] {
        self.table.0[kind as usize].as_slice()
    }

    /// Determine the tags of each token in a stream.
    ///
    /// Spans are passed through as they are.
    pub fn highlight_tokens<'a, I>(
        &'a self,
        tokens: I,
    ) -> impl Iterator<Item = (Range<usize>, &'a [Tag])> + 'a
    where
        I: IntoIterator<Item = Token>,
        I::IntoIter: 'a,
    {
        tokens
            .into_iter()
            .map(move |token| (token.span, self.classify(token.kind)))
    }

    /// Highlight a token stream over its source text to an HTML `code`
    /// element.
    ///
    /// This uses these [CSS classes for categories](Tag::css_class). Tokens
    /// must be sorted and must not overlap. Text between tokens is emitted
    /// without highlighting.
    pub fn highlight_html<I>(&self, text: &str, tokens: I) -> StrResult<String>
    where
        I: IntoIterator<Item = Token>,
    {
        let mut html = String::from("<code>");
        let mut cursor = 0;

        for Token { kind, span } in tokens {
            if span.start < cursor {
                bail!(
                    "token at {}..{} overlaps the previous token ending at {cursor}",
                    span.start,
                    span.end,
                );
            }

            let (Some(gap), Some(piece)) =
                (text.get(cursor..span.start), text.get(span.clone()))
            else {
                bail!(
                    "token at {}..{} is out of bounds or not on a character boundary",
                    span.start,
                    span.end,
                );
            };

            escape_html(&mut html, gap);

            let tags = self.classify(kind);
            for tag in tags {
                html.push_str("<span class=\"");
                html.push_str(tag.css_class());
                html.push_str("\">");
            }
            escape_html(&mut html, piece);
            for _ in tags {
                html.push_str("</span>");
            }

            cursor = span.end;
        }

        escape_html(&mut html, &text[cursor..]);
        html.push_str("</code>");
        Ok(html)
    }
}

/// Push text to an HTML buffer, escaping special characters.
fn escape_html(html: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '<' => html.push_str("&lt;"),
            '>' => html.push_str("&gt;"),
            '&' => html.push_str("&amp;"),
            '\'' => html.push_str("&#39;"),
            '"' => html.push_str("&quot;"),
            _ => html.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Classification;

    #[track_caller]
    fn test(kind: impl Into<ElementType>, goal: &[Tag]) {
        assert_eq!(Highlighter::default().classify(kind.into()), goal);
    }

    #[test]
    fn test_classify() {
        use Tag::*;

        test(TokenKind::Id, &[Identifier]);
        test(TokenKind::Str, &[StringLiteral]);
        test(TokenKind::SingleLineComment, &[LineComment]);
        test(TokenKind::MultilineComment, &[BlockComment]);
        test(TokenKind::Plus, &[Keyword]);
        test(TokenKind::Define, &[Keyword]);
        test(TokenKind::Milliseconds, &[Keyword]);
        test(TokenKind::IntLiteral, &[Keyword]);
        test(TokenKind::True, &[Keyword]);
        test(TokenKind::StringLiteral, &[Keyword]);
        test(TokenKind::IdQuotes, &[Keyword]);
        test(TokenKind::Script, &[Keyword]);
        test(TokenKind::Object, &[Keyword]);
        test(TokenKind::Eof, &[]);
    }

    #[test]
    fn test_classify_lexer_quirks() {
        test(TokenKind::Spaces, &[Tag::Keyword]);
        test(TokenKind::UnexpectedChar, &[Tag::Keyword]);
    }

    #[test]
    fn test_classify_unknown_and_rules() {
        test(ElementType::Token(9999), &[]);
        test(ElementType::Token(0), &[]);
        test(ElementType::Token(i32::MIN), &[]);
        test(ElementType::Rule(0), &[]);
        test(ElementType::Rule(u16::MAX), &[]);
        test(ElementType::Unknown, &[]);
    }

    #[test]
    fn test_tag_names_are_distinct() {
        let mut seen = std::collections::HashSet::new();
        for &tag in Tag::LIST {
            assert!(seen.insert(tag.name()));
            assert!(seen.insert(tag.key()));
            assert!(seen.insert(tag.fallback()));
            assert!(seen.insert(tag.tm_scope()));
            assert!(seen.insert(tag.css_class()));
            assert!(tag.key().starts_with("STREAMQL_"));
            assert!(tag.tm_scope().ends_with(".streamql"));
        }
        assert_eq!(Tag::StringLiteral.fallback(), "STRING");
    }

    #[test]
    fn test_default_table_is_total() {
        let table = Table::DEFAULT;
        assert_eq!(table.iter().count(), TokenKind::COUNT);

        let unclassified: Vec<_> =
            table.iter().filter(|(_, tag)| tag.is_none()).map(|(k, _)| k).collect();
        assert_eq!(unclassified, [TokenKind::Eof]);

        for &kind in TokenKind::LIST {
            assert_eq!(highlight(kind), table.get(kind));
            assert!(Highlighter::default().classify_kind(kind).len() <= 1);
        }
    }

    #[test]
    fn test_classify_is_pure() {
        let highlighter = Highlighter::default();
        let before: Vec<_> = TokenKind::LIST
            .iter()
            .map(|&kind| highlighter.classify_kind(kind).to_vec())
            .collect();
        for &kind in TokenKind::LIST.iter().rev() {
            highlighter.classify(kind.into());
            highlighter.classify(ElementType::Token(kind.code() + 1000));
        }
        let after: Vec<_> = TokenKind::LIST
            .iter()
            .map(|&kind| highlighter.classify_kind(kind).to_vec())
            .collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_classify_concurrently() {
        let highlighter = Highlighter::default();
        std::thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    for &kind in TokenKind::LIST {
                        assert_eq!(
                            highlighter.classify_kind(kind).first().copied(),
                            highlight(kind),
                        );
                    }
                });
            }
        });
    }

    #[test]
    fn test_configure() {
        let mut config = HighlightConfig { legacy_quirks: false, ..Default::default() };
        config.overrides.insert("TRUE".into(), Classification::StringLiteral);
        config.overrides.insert("SCRIPT".into(), Classification::None);

        let table = Table::DEFAULT.configure(&config).unwrap();
        assert_eq!(table.get(TokenKind::Spaces), None);
        assert_eq!(table.get(TokenKind::UnexpectedChar), None);
        assert_eq!(table.get(TokenKind::True), Some(Tag::StringLiteral));
        assert_eq!(table.get(TokenKind::Script), None);
        assert_eq!(table.get(TokenKind::Id), Some(Tag::Identifier));

        // The source table stays untouched.
        assert_eq!(Table::DEFAULT.get(TokenKind::Spaces), Some(Tag::Keyword));
    }

    #[test]
    fn test_configure_default_is_identity() {
        let table = Table::DEFAULT.configure(&HighlightConfig::default()).unwrap();
        assert_eq!(table, Table::DEFAULT);
    }

    #[test]
    fn test_configure_override_wins_over_quirks() {
        let mut config = HighlightConfig { legacy_quirks: false, ..Default::default() };
        config.overrides.insert("SPACES".into(), Classification::Keyword);
        let table = Table::DEFAULT.configure(&config).unwrap();
        assert_eq!(table.get(TokenKind::Spaces), Some(Tag::Keyword));
        assert_eq!(table.get(TokenKind::UnexpectedChar), None);
    }

    #[test]
    fn test_configure_unknown_kind() {
        let mut config = HighlightConfig::default();
        config.overrides.insert("SPACESHIP".into(), Classification::Keyword);
        assert_eq!(
            Table::DEFAULT.configure(&config).unwrap_err(),
            "unknown token kind `SPACESHIP` in overrides",
        );
    }

    #[test]
    fn test_highlight_tokens() {
        let highlighter = Highlighter::default();
        let tokens = vec![
            Token::new(TokenKind::Define, 0..6),
            Token::new(ElementType::Rule(4), 0..20),
            Token::new(ElementType::Token(9999), 7..8),
        ];
        let result: Vec<(Range<usize>, &[Tag])> = highlighter.highlight_tokens(tokens).collect();
        assert_eq!(result, [(0..6, &[Tag::Keyword][..]), (0..20, &[][..]), (7..8, &[][..])]);
    }

    #[test]
    fn test_highlight_html() {
        let text = "a <= 'x' -- c";
        let tokens = vec![
            Token::new(TokenKind::Id, 0..1),
            Token::new(TokenKind::LtEq, 2..4),
            Token::new(TokenKind::Str, 5..8),
            Token::new(TokenKind::SingleLineComment, 9..13),
        ];
        let html = Highlighter::default().highlight_html(text, tokens).unwrap();
        assert_eq!(
            html,
            "<code><span class=\"sql-id\">a</span> \
             <span class=\"sql-key\">&lt;=</span> \
             <span class=\"sql-str\">&#39;x&#39;</span> \
             <span class=\"sql-line-comment\">-- c</span></code>",
        );
    }

    #[test]
    fn test_highlight_html_trailing_text() {
        let html = Highlighter::default()
            .highlight_html("x & y", [Token::new(TokenKind::Eof, 0..1)])
            .unwrap();
        assert_eq!(html, "<code>x &amp; y</code>");
    }

    #[test]
    fn test_highlight_html_unknown_elements() {
        let tokens = [
            Token::new(ElementType::Unknown, 0..3),
            Token::new(ElementType::Token(4000), 4..5),
            Token::new(TokenKind::Id, 6..7),
        ];
        let html = Highlighter::default().highlight_html("new a b", tokens).unwrap();
        assert_eq!(html, "<code>new a <span class=\"sql-id\">b</span></code>");
    }

    #[test]
    fn test_highlight_html_invalid_spans() {
        let highlighter = Highlighter::default();
        let overlapping = [Token::new(TokenKind::Id, 0..3), Token::new(TokenKind::Id, 2..4)];
        assert!(highlighter.highlight_html("abcd", overlapping).is_err());
        assert!(highlighter.highlight_html("ab", [Token::new(TokenKind::Id, 1..5)]).is_err());
        assert!(highlighter.highlight_html("ä", [Token::new(TokenKind::Id, 0..1)]).is_err());
    }
}
