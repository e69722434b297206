//! # Trellis Scanner
//!
//! Context-sensitive scanner for the Trellis template language: HTML extended
//! with `@`-introduced control-flow blocks (`@if`, `@for`, `@switch`, `@defer`,
//! …) and `{{ … }}` interpolation delimiters.
//!
//! A context-free grammar alone cannot decide which token is legal at many
//! template positions — whether an end tag must be synthesized because an
//! element was left unclosed, where script/style raw text stops, or whether an
//! `@` opens a directive or is a literal character. This crate supplies the
//! stateful half of that decision: a [`Scanner`] session carries a stack of
//! open tag contexts (plus a pending-`@` resolution state) across calls and
//! across incremental edits, and on each call picks at most one token from the
//! set the grammar currently allows.
//!
//! The hosting engine provides the character stream (the [`Cursor`] trait) and
//! the tag classification service (the [`TagOracle`] trait); the grammar
//! provides the [`ValidSymbols`] query. The session state can be persisted to
//! a byte buffer between incremental parses — see [`Scanner::serialize`].

pub mod codec;
pub mod keyword;
pub mod scanner;
pub mod tag;

use thiserror::Error;

pub use keyword::PendingAt;
pub use scanner::Scanner;
pub use tag::{Tag, TagCategory, TagName};

/// Errors that can occur outside the scan path.
///
/// Scanning itself never errors: a sub-scanner that cannot produce a token
/// reports `None` and leaves the decision to the grammar.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("serialization buffer holds {capacity} bytes but the header needs {needed}")]
    BufferTooSmall { capacity: usize, needed: usize },
}

/// Result type for fallible scanner operations.
pub type ScanResult<T> = Result<T, ScanError>;

/// Token kinds the scanner can produce.
///
/// The discriminants match the order in which the grammar declares its
/// external tokens, so a kind can be used directly as an index into the
/// grammar's valid-symbol array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    StartTagName,
    ScriptStartTagName,
    StyleStartTagName,
    EndTagName,
    ErroneousEndTagName,
    SelfClosingTagDelimiter,
    ImplicitEndTag,
    RawText,
    Comment,
    InterpolationStart,
    InterpolationEnd,
    IfStart,
    ElseStart,
    ForStart,
    SwitchStart,
    CaseStart,
    DefaultStart,
    DeferStart,
    LetStart,
    EmptyStart,
    PlaceholderStart,
    LoadingStart,
    ErrorStart,
    ElseIfStart,
    AtSign,
}

impl TokenKind {
    /// Number of token kinds.
    pub const COUNT: usize = TokenKind::AtSign as usize + 1;
}

/// The set of token kinds the grammar currently considers legal.
///
/// The grammar supplies one of these on every scan call; the scanner consults
/// it to decide which sub-scanner may run and which token variants it may
/// emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidSymbols {
    flags: [bool; TokenKind::COUNT],
}

impl ValidSymbols {
    /// No symbol is valid.
    pub const fn none() -> Self {
        Self {
            flags: [false; TokenKind::COUNT],
        }
    }

    /// Every symbol is valid (error-recovery mode in most grammars).
    pub const fn all() -> Self {
        Self {
            flags: [true; TokenKind::COUNT],
        }
    }

    /// Wrap a raw valid-symbol array supplied by the grammar.
    pub const fn new(flags: [bool; TokenKind::COUNT]) -> Self {
        Self { flags }
    }

    /// Builder-style marking of one kind as valid.
    #[must_use]
    pub fn with(mut self, kind: TokenKind) -> Self {
        self.flags[kind as usize] = true;
        self
    }

    /// Mark one kind valid or invalid.
    pub fn set(&mut self, kind: TokenKind, valid: bool) {
        self.flags[kind as usize] = valid;
    }

    /// Whether the grammar currently accepts `kind`.
    pub fn contains(&self, kind: TokenKind) -> bool {
        self.flags[kind as usize]
    }
}

impl From<[bool; TokenKind::COUNT]> for ValidSymbols {
    fn from(flags: [bool; TokenKind::COUNT]) -> Self {
        Self { flags }
    }
}

/// Character-stream view supplied by the hosting engine.
///
/// The scanner never owns the input. All movement happens through this trait:
/// `advance` consumes the current character (optionally excluding it from the
/// token, for leading trivia), and `mark_end` commits the current position as
/// the end boundary of the token being built. Once a boundary is marked,
/// further advances are lookahead only — on success the host resumes reading
/// at the marked boundary, and on failure it discards every uncommitted
/// advance.
pub trait Cursor {
    /// The current character, or `None` at end of input.
    fn lookahead(&self) -> Option<char>;

    /// Consume the current character. With `include_in_token` false the
    /// character is skipped (excluded from the token being built).
    fn advance(&mut self, include_in_token: bool);

    /// Commit the current position as the token's end boundary. May be called
    /// repeatedly; the last call wins. If never called during a successful
    /// scan, the token ends where the cursor stopped.
    fn mark_end(&mut self);

    /// Whether the input is exhausted.
    fn is_at_end(&self) -> bool;
}

/// Tag classification service supplied by the hosting engine.
///
/// The scanner queries it with already upper-cased names and never implements
/// the classification rules itself.
pub trait TagOracle {
    /// Classify a normalized tag name into a category. Names that are not
    /// built-in elements classify as [`TagCategory::Custom`].
    fn classify(&self, name: &str) -> TagCategory;

    /// Whether elements of this category never have closing syntax.
    fn is_void(&self, category: TagCategory) -> bool;

    /// Whether `parent` may directly contain `child`.
    fn can_contain(&self, parent: TagCategory, child: TagCategory) -> bool;
}
