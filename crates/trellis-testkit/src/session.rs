//! Grammar-style scan driver.

use tracing::debug;

use trellis_scanner::{Scanner, TagCategory, TokenKind, ValidSymbols};

use crate::cursor::StringCursor;
use crate::oracle::HtmlOracle;
use crate::TestkitError;

/// A token the session committed: its kind and the source text it spans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedToken {
    pub kind: TokenKind,
    pub text: String,
}

/// Drives a [`Scanner`] over an in-memory template the way a grammar-driven
/// host would: each [`ScanSession::scan`] commits the cursor on success and
/// rolls it back on failure, and [`ScanSession::expect_literal`] stands in
/// for the tokens the grammar lexes itself (`<`, `>`, text nodes, directive
/// bodies).
#[derive(Debug)]
pub struct ScanSession {
    scanner: Scanner,
    cursor: StringCursor,
    oracle: HtmlOracle,
}

impl ScanSession {
    pub fn new(source: &str) -> Self {
        Self {
            scanner: Scanner::new(),
            cursor: StringCursor::new(source),
            oracle: HtmlOracle::new(),
        }
    }

    /// Resume a session restored from persisted state.
    pub fn with_scanner(source: &str, scanner: Scanner) -> Self {
        Self {
            scanner,
            cursor: StringCursor::new(source),
            oracle: HtmlOracle::new(),
        }
    }

    /// Run one scan call. On success the cursor rests at the committed token
    /// boundary; on failure every advance is rolled back.
    pub fn scan(&mut self, valid: &ValidSymbols) -> Option<ScannedToken> {
        let checkpoint = self.cursor.checkpoint();
        match self.scanner.scan(&mut self.cursor, &self.oracle, valid) {
            Some(kind) => {
                let text = self.cursor.commit_token();
                debug!(?kind, text, depth = self.scanner.depth(), "token");
                Some(ScannedToken { kind, text })
            }
            None => {
                self.cursor.restore(checkpoint);
                None
            }
        }
    }

    /// Consume text the grammar would lex itself.
    pub fn expect_literal(&mut self, literal: &str) -> Result<(), TestkitError> {
        self.cursor.expect_literal(literal)
    }

    pub fn scanner(&self) -> &Scanner {
        &self.scanner
    }

    pub fn scanner_mut(&mut self) -> &mut Scanner {
        &mut self.scanner
    }

    /// Categories of the open contexts, bottom first — convenient for
    /// asserting stack transitions.
    pub fn stack(&self) -> Vec<TagCategory> {
        self.scanner.tags().iter().map(|tag| tag.category).collect()
    }

    pub fn depth(&self) -> usize {
        self.scanner.depth()
    }

    pub fn position(&self) -> usize {
        self.cursor.position()
    }

    pub fn is_at_end(&self) -> bool {
        use trellis_scanner::Cursor;
        self.cursor.is_at_end()
    }
}
