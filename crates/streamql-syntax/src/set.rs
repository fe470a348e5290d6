// Acknowledgement:
// Based on rust-analyzer's `TokenSet`.
// https://github.com/rust-lang/rust-analyzer/blob/master/crates/parser/src/token_set.rs

use crate::TokenKind;

/// A set of token kinds.
#[derive(Default, Copy, Clone, Eq, PartialEq)]
pub struct KindSet(u128);

impl KindSet {
    /// Create a new empty set.
    pub const fn new() -> Self {
        Self(0)
    }

    /// Insert a token kind into the set.
    ///
    /// You can only add kinds with discriminator < 128.
    pub const fn add(self, kind: TokenKind) -> Self {
        assert!((kind as u8) < BITS);
        Self(self.0 | bit(kind))
    }

    /// Combine two sets.
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Whether the two sets have no kind in common.
    pub const fn is_disjoint(self, other: Self) -> bool {
        self.0 & other.0 == 0
    }

    /// Whether the set contains the given token kind.
    pub const fn contains(&self, kind: TokenKind) -> bool {
        (kind as u8) < BITS && (self.0 & bit(kind)) != 0
    }

    /// The number of kinds in the set.
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Whether the set is empty.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterate over the kinds in the set, in definition order.
    pub fn iter(self) -> impl Iterator<Item = TokenKind> {
        TokenKind::LIST.iter().copied().filter(move |&kind| self.contains(kind))
    }
}

impl std::fmt::Debug for KindSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.iter().map(TokenKind::name)).finish()
    }
}

const BITS: u8 = 128;

// Every token kind must fit into a set.
const _: () = assert!(TokenKind::COUNT <= BITS as usize);

const fn bit(kind: TokenKind) -> u128 {
    1 << (kind as usize)
}

/// Build a set of the given kinds.
///
/// Example: `const SET: KindSet = make_set!(Plus, Minus);`
/// Becomes:
/// `KindSet::new().add(TokenKind::Plus).add(TokenKind::Minus)`
macro_rules! make_set {
    ( $($kind:ident),* $(,)? ) => {
        KindSet::new()
        $(.add(TokenKind::$kind))*
    }
}

/// Punctuation and operators.
pub const PUNCTUATION: KindSet = make_set!(
    Colon,
    Semicolon,
    Dot,
    OpenParen,
    CloseParen,
    OpenSquareBracket,
    CloseSquareBracket,
    Comma,
    Assign,
    Star,
    Plus,
    Question,
    Minus,
    Div,
    Mod,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Eq,
    NotEq,
    AtSymbol,
    FollowedBy,
    Hash,
);

/// Reserved words of the query language, including time units.
pub const RESERVED: KindSet = make_set!(
    Stream,
    Define,
    Function,
    Trigger,
    Table,
    Plan,
    From,
    Partition,
    Window,
    Select,
    Group,
    By,
    Having,
    Insert,
    Delete,
    Update,
    Return,
    Events,
    Into,
    Output,
    Expired,
    Current,
    Snapshot,
    For,
    Raw,
    Of,
    As,
    At,
    Or,
    And,
    In,
    On,
    Is,
    Not,
    Within,
    With,
    Begin,
    End,
    Null,
    Every,
    Last,
    All,
    First,
    Join,
    Inner,
    Outer,
    Right,
    Left,
    Full,
    Unidirectional,
    Years,
    Months,
    Weeks,
    Days,
    Hours,
    Minutes,
    Seconds,
    Milliseconds,
);

/// Names of the primitive attribute types.
pub const TYPE_NAME: KindSet = make_set!(Int, Long, Float, Double, Bool, Object);

/// Literals, except for the dedicated string kind.
pub const LITERAL: KindSet = make_set!(
    IntLiteral,
    LongLiteral,
    FloatLiteral,
    DoubleLiteral,
    True,
    False,
    StringLiteral,
    IdQuotes,
);

/// Tokens that introduce embedded, foreign-language content.
pub const EMBEDDED: KindSet = make_set!(Script);

/// Whitespace and lexer-error tokens.
///
/// Highlighted like keywords in the legacy table.
pub const LEXER_QUIRKS: KindSet = make_set!(Spaces, UnexpectedChar);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set() {
        let set = KindSet::new().add(TokenKind::And).add(TokenKind::Or);
        assert!(set.contains(TokenKind::And));
        assert!(set.contains(TokenKind::Or));
        assert!(!set.contains(TokenKind::Not));
        assert_eq!(set.len(), 2);
        assert_eq!(set.iter().collect::<Vec<_>>(), [TokenKind::Or, TokenKind::And]);
    }

    #[test]
    fn test_groups_are_disjoint() {
        let groups = [PUNCTUATION, RESERVED, TYPE_NAME, LITERAL, EMBEDDED, LEXER_QUIRKS];
        for (i, a) in groups.iter().enumerate() {
            for b in &groups[i + 1..] {
                assert!(a.is_disjoint(*b), "{a:?} overlaps {b:?}");
            }
        }
    }

    #[test]
    fn test_group_sizes() {
        assert_eq!(PUNCTUATION.len(), 24);
        assert_eq!(RESERVED.len(), 58);
        assert_eq!(PUNCTUATION.union(RESERVED).len(), 82);
        assert!(!RESERVED.contains(TokenKind::Str));
        assert!(KindSet::new().is_empty());
    }
}
