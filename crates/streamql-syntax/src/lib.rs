//! Token classification for StreamQL syntax highlighting.

pub mod config;
pub mod diag;

mod highlight;
mod kind;
mod set;
mod vocab;

pub use self::config::{Classification, HighlightConfig};
pub use self::highlight::{Highlighter, Table, Tag, Token, highlight};
pub use self::kind::{ElementType, TokenKind};
pub use self::set::KindSet;
pub use self::vocab::{Mismatch, SyncReport, Vocabulary};
