//! In-memory reference cursor.

use trellis_scanner::Cursor;

use crate::TestkitError;

/// Saved cursor position, used to roll back a failed scan the way a host
/// engine discards uncommitted advances.
#[derive(Debug, Clone, Copy)]
pub struct Checkpoint {
    pos: usize,
    token_start: Option<usize>,
    marked_end: Option<usize>,
}

/// A [`Cursor`] over an in-memory string.
///
/// Tracks the token being built: the start is the first included character,
/// the end is the last marked boundary (or wherever the cursor stopped, if no
/// boundary was marked). [`StringCursor::commit_token`] extracts the token
/// text and repositions the cursor at the committed boundary, so characters
/// consumed beyond it are re-read by the next scan — the same contract a
/// grammar-driven host provides.
#[derive(Debug)]
pub struct StringCursor {
    chars: Vec<char>,
    pos: usize,
    token_start: Option<usize>,
    marked_end: Option<usize>,
}

impl StringCursor {
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
            token_start: None,
            marked_end: None,
        }
    }

    /// Current position, in characters.
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            pos: self.pos,
            token_start: self.token_start,
            marked_end: self.marked_end,
        }
    }

    pub fn restore(&mut self, checkpoint: Checkpoint) {
        self.pos = checkpoint.pos;
        self.token_start = checkpoint.token_start;
        self.marked_end = checkpoint.marked_end;
    }

    /// Extract the committed token text, then reposition at the committed
    /// boundary and reset token tracking for the next scan.
    pub fn commit_token(&mut self) -> String {
        let end = self.marked_end.unwrap_or(self.pos);
        let start = self.token_start.unwrap_or(end).min(end);
        let text: String = self.chars[start..end].iter().collect();
        self.pos = end;
        self.token_start = None;
        self.marked_end = None;
        text
    }

    /// Consume a literal the grammar lexes itself (tag punctuation, text
    /// nodes, directive bodies).
    pub fn expect_literal(&mut self, literal: &str) -> Result<(), TestkitError> {
        for expected in literal.chars() {
            if self.chars.get(self.pos) != Some(&expected) {
                let found: String = self.chars[self.pos.min(self.chars.len())..]
                    .iter()
                    .take(literal.chars().count())
                    .collect();
                return Err(TestkitError::UnexpectedLiteral {
                    expected: literal.to_string(),
                    found,
                    position: self.pos,
                });
            }
            self.pos += 1;
        }
        Ok(())
    }
}

impl Cursor for StringCursor {
    fn lookahead(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn advance(&mut self, include_in_token: bool) {
        if self.pos < self.chars.len() {
            if include_in_token && self.token_start.is_none() {
                self.token_start = Some(self.pos);
            }
            self.pos += 1;
        }
    }

    fn mark_end(&mut self) {
        self.marked_end = Some(self.pos);
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }
}
