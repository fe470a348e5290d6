use std::sync::LazyLock;

use rustc_hash::FxHashMap;

/// Declares the token kinds together with their symbolic names and, for
/// fixed-spelling tokens, their literal names.
///
/// The order of the entries defines the token codes: the first entry is the
/// end-of-file marker with code `-1`, every following entry gets the code of
/// its position. This mirrors the numbering of the generated lexer.
macro_rules! token_kinds {
    (@literal $literal:literal) => { Some(concat!("'", $literal, "'")) };
    (@literal) => { None };
    ($(
        $(#[$attr:meta])*
        $variant:ident = $name:literal $(($literal:literal))?
    ),* $(,)?) => {
        /// A lexical token kind as produced by the StreamQL tokenizer.
        #[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
        #[repr(u8)]
        pub enum TokenKind {
            $($(#[$attr])* $variant,)*
        }

        impl TokenKind {
            /// The list of all token kinds, in the same order as they are
            /// defined.
            ///
            /// Can be used as the counter-part to `kind as usize`.
            pub const LIST: &'static [TokenKind] = &[$(Self::$variant,)*];

            /// The symbolic name of the token kind, as used by the grammar.
            pub fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)*
                }
            }

            /// The quoted literal spelling of the token kind, if it has a
            /// fixed one.
            pub fn literal(self) -> Option<&'static str> {
                match self {
                    $(Self::$variant => token_kinds!(@literal $($literal)?),)*
                }
            }
        }
    };
}

token_kinds! {
    /// The end of the token stream.
    Eof = "EOF",

    /// A colon: `:`.
    Colon = "COL" (":"),
    /// A semicolon: `;`.
    Semicolon = "SCOL" (";"),
    /// A dot for attribute access: `.`.
    Dot = "DOT" ("."),
    /// An opening parenthesis: `(`.
    OpenParen = "OPEN_PAR" ("("),
    /// A closing parenthesis: `)`.
    CloseParen = "CLOSE_PAR" (")"),
    /// An opening square bracket: `[`.
    OpenSquareBracket = "OPEN_SQARE_BRACKETS" ("["),
    /// A closing square bracket: `]`.
    CloseSquareBracket = "CLOASE_SQARE_BRACKETS" ("]"),
    /// A comma separator: `,`.
    Comma = "COMMA" (","),
    /// An assignment in annotations: `=`.
    Assign = "ASSIGN" ("="),
    /// The multiplication operator or the all-attributes wildcard: `*`.
    Star = "STAR" ("*"),
    /// The addition operator: `+`.
    Plus = "PLUS" ("+"),
    /// The optional-occurrence marker in patterns: `?`.
    Question = "QUESTION" ("?"),
    /// The subtraction operator: `-`.
    Minus = "MINUS" ("-"),
    /// The division operator: `/`.
    Div = "DIV" ("/"),
    /// The remainder operator: `%`.
    Mod = "MOD" ("%"),
    /// The less-than operator: `<`.
    Lt = "LT" ("<"),
    /// The less-than or equal operator: `<=`.
    LtEq = "LT_EQ" ("<="),
    /// The greater-than operator: `>`.
    Gt = "GT" (">"),
    /// The greater-than or equal operator: `>=`.
    GtEq = "GT_EQ" (">="),
    /// The equality operator: `==`.
    Eq = "EQ" ("=="),
    /// The inequality operator: `!=`.
    NotEq = "NOT_EQ" ("!="),
    /// The annotation marker: `@`.
    AtSymbol = "AT_SYMBOL" ("@"),
    /// The pattern sequencing arrow: `->`.
    FollowedBy = "FOLLOWED_BY" ("->"),
    /// The window or handler marker: `#`.
    Hash = "HASH" ("#"),

    /// The `stream` keyword.
    Stream = "STREAM",
    /// The `define` keyword.
    Define = "DEFINE",
    /// The `function` keyword.
    Function = "FUNCTION",
    /// The `trigger` keyword.
    Trigger = "TRIGGER",
    /// The `table` keyword.
    Table = "TABLE",
    /// The `plan` keyword.
    Plan = "PLAN",
    /// The `from` keyword.
    From = "FROM",
    /// The `partition` keyword.
    Partition = "PARTITION",
    /// The `window` keyword.
    Window = "WINDOW",
    /// The `select` keyword.
    Select = "SELECT",
    /// The `group` keyword.
    Group = "GROUP",
    /// The `by` keyword.
    By = "BY",
    /// The `having` keyword.
    Having = "HAVING",
    /// The `insert` keyword.
    Insert = "INSERT",
    /// The `delete` keyword.
    Delete = "DELETE",
    /// The `update` keyword.
    Update = "UPDATE",
    /// The `return` keyword.
    Return = "RETURN",
    /// The `events` keyword.
    Events = "EVENTS",
    /// The `into` keyword.
    Into = "INTO",
    /// The `output` keyword.
    Output = "OUTPUT",
    /// The `expired` keyword.
    Expired = "EXPIRED",
    /// The `current` keyword.
    Current = "CURRENT",
    /// The `snapshot` keyword.
    Snapshot = "SNAPSHOT",
    /// The `for` keyword.
    For = "FOR",
    /// The `raw` keyword.
    Raw = "RAW",
    /// The `of` keyword.
    Of = "OF",
    /// The `as` keyword.
    As = "AS",
    /// The `at` keyword.
    At = "AT",
    /// The `or` operator.
    Or = "OR",
    /// The `and` operator.
    And = "AND",
    /// The `in` operator.
    In = "IN",
    /// The `on` keyword.
    On = "ON",
    /// The `is` operator.
    Is = "IS",
    /// The `not` operator.
    Not = "NOT",
    /// The `within` keyword.
    Within = "WITHIN",
    /// The `with` keyword.
    With = "WITH",
    /// The `begin` keyword.
    Begin = "BEGIN",
    /// The `end` keyword.
    End = "END",
    /// The `null` keyword.
    Null = "NULL",
    /// The `every` keyword.
    Every = "EVERY",
    /// The `last` keyword.
    Last = "LAST",
    /// The `all` keyword.
    All = "ALL",
    /// The `first` keyword.
    First = "FIRST",
    /// The `join` keyword.
    Join = "JOIN",
    /// The `inner` keyword.
    Inner = "INNER",
    /// The `outer` keyword.
    Outer = "OUTER",
    /// The `right` keyword.
    Right = "RIGHT",
    /// The `left` keyword.
    Left = "LEFT",
    /// The `full` keyword.
    Full = "FULL",
    /// The `unidirectional` keyword.
    Unidirectional = "UNIDIRECTIONAL",
    /// The `years` time unit.
    Years = "YEARS",
    /// The `months` time unit.
    Months = "MONTHS",
    /// The `weeks` time unit.
    Weeks = "WEEKS",
    /// The `days` time unit.
    Days = "DAYS",
    /// The `hours` time unit.
    Hours = "HOURS",
    /// The `minutes` time unit.
    Minutes = "MINUTES",
    /// The `seconds` time unit.
    Seconds = "SECONDS",
    /// The `milliseconds` time unit.
    Milliseconds = "MILLISECONDS",
    /// The `false` literal.
    False = "FALSE",
    /// The `true` literal.
    True = "TRUE",
    /// A quoted string.
    Str = "STRING",
    /// The `int` type name.
    Int = "INT",
    /// The `long` type name.
    Long = "LONG",
    /// The `float` type name.
    Float = "FLOAT",
    /// The `double` type name.
    Double = "DOUBLE",
    /// The `bool` type name.
    Bool = "BOOL",
    /// The `object` type name.
    Object = "OBJECT",

    /// A back-quoted identifier.
    IdQuotes = "ID_QUOTES",
    /// An identifier.
    Id = "ID",
    /// A string in value position of an annotation or option.
    StringLiteral = "STRING_LITERAL",
    /// An integer literal: `12`.
    IntLiteral = "INT_LITERAL",
    /// A long literal: `12L`.
    LongLiteral = "LONG_LITERAL",
    /// A float literal: `1.5f`.
    FloatLiteral = "FLOAT_LITERAL",
    /// A double literal: `1.5`.
    DoubleLiteral = "DOUBLE_LITERAL",
    /// The body of an embedded script function.
    Script = "SCRIPT",
    /// A line comment: `-- ...` or `// ...`.
    SingleLineComment = "SINGLE_LINE_COMMENT",
    /// A block comment: `/* ... */`.
    MultilineComment = "MULTILINE_COMMENT",
    /// One or more whitespace characters.
    Spaces = "SPACES",
    /// A character the lexer could not match.
    UnexpectedChar = "UNEXPECTED_CHAR",
}

/// Maps symbolic names to token kinds.
static NAMES: LazyLock<FxHashMap<&'static str, TokenKind>> =
    LazyLock::new(|| TokenKind::LIST.iter().map(|&kind| (kind.name(), kind)).collect());

/// Maps quoted literal spellings to token kinds.
static LITERALS: LazyLock<FxHashMap<&'static str, TokenKind>> = LazyLock::new(|| {
    TokenKind::LIST
        .iter()
        .filter_map(|&kind| Some((kind.literal()?, kind)))
        .collect()
});

impl TokenKind {
    /// The number of token kinds.
    pub const COUNT: usize = Self::LIST.len();

    /// The token code of the end-of-file marker.
    pub const EOF_CODE: i32 = -1;

    /// The integer code the tokenizer assigns to this kind.
    pub fn code(self) -> i32 {
        match self {
            Self::Eof => Self::EOF_CODE,
            _ => self as i32,
        }
    }

    /// Look up a token kind by its integer code.
    ///
    /// Returns `None` for codes this crate does not know about.
    pub fn from_code(code: i32) -> Option<Self> {
        if code == Self::EOF_CODE {
            return Some(Self::Eof);
        }

        let index = usize::try_from(code).ok().filter(|&index| index > 0)?;
        Self::LIST.get(index).copied()
    }

    /// Look up a token kind by its symbolic name.
    pub fn from_name(name: &str) -> Option<Self> {
        NAMES.get(name).copied()
    }

    /// Look up a token kind by its quoted literal spelling, like `'->'`.
    pub fn from_literal(literal: &str) -> Option<Self> {
        LITERALS.get(literal).copied()
    }
}

/// The kind of an element in a StreamQL document, as the editor sees it.
///
/// Leaf tokens carry their raw token code, which may be unknown to this crate
/// if the tokenizer is newer. Inner nodes of the syntax tree are identified by
/// the index of the grammar rule that produced them.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ElementType {
    /// A leaf token with its raw token code.
    Token(i32),
    /// A syntax-tree node produced by the grammar rule with this index.
    Rule(u16),
    /// A leaf token whose kind cannot be expressed as a token code, for
    /// example a kind only a newer tokenizer knows by name.
    Unknown,
}

impl ElementType {
    /// The known token kind of this element, if it is a leaf token.
    pub fn token_kind(self) -> Option<TokenKind> {
        match self {
            Self::Token(code) => TokenKind::from_code(code),
            Self::Rule(_) | Self::Unknown => None,
        }
    }

    /// Whether this element is a leaf token.
    pub fn is_token(self) -> bool {
        !matches!(self, Self::Rule(_))
    }
}

impl From<TokenKind> for ElementType {
    fn from(kind: TokenKind) -> Self {
        Self::Token(kind.code())
    }
}
