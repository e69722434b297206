//! Control-flow keyword recognition and the pending-`@` protocol.
//!
//! `@` is ambiguous: it can open a directive keyword (`@if`, `@defer`, …) or
//! stand for itself. When keyword matching fails, the scanner may already
//! have looked past the `@`; rather than handing stale lookahead to a second
//! matching attempt, it records that the `@` is resolved as a plain symbol
//! and emits it on the next invocation.

use tracing::trace;

use crate::scanner::Scanner;
use crate::{Cursor, TokenKind, ValidSymbols};

/// Resolution state for an `@` the previous call consumed without producing a
/// directive token.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PendingAt {
    /// No unresolved `@`.
    #[default]
    None,
    /// The next scan call must emit the `@` under the cursor as a plain
    /// at-sign token, skipping keyword matching entirely.
    EmitPlainAt,
}

/// Single-word directive keywords, matched case-sensitively and in full.
const KEYWORDS: &[(&str, TokenKind)] = &[
    ("if", TokenKind::IfStart),
    ("for", TokenKind::ForStart),
    ("switch", TokenKind::SwitchStart),
    ("case", TokenKind::CaseStart),
    ("default", TokenKind::DefaultStart),
    ("defer", TokenKind::DeferStart),
    ("let", TokenKind::LetStart),
    ("empty", TokenKind::EmptyStart),
    ("placeholder", TokenKind::PlaceholderStart),
    ("loading", TokenKind::LoadingStart),
    ("error", TokenKind::ErrorStart),
];

/// Every token kind that can begin at an `@`.
const CONTROL_FLOW_STARTS: &[TokenKind] = &[
    TokenKind::IfStart,
    TokenKind::ElseStart,
    TokenKind::ForStart,
    TokenKind::SwitchStart,
    TokenKind::CaseStart,
    TokenKind::DefaultStart,
    TokenKind::DeferStart,
    TokenKind::LetStart,
    TokenKind::EmptyStart,
    TokenKind::PlaceholderStart,
    TokenKind::LoadingStart,
    TokenKind::ErrorStart,
    TokenKind::ElseIfStart,
];

impl Scanner {
    /// Dispatch target for `@`.
    pub(crate) fn scan_at_sign<C>(&mut self, cursor: &mut C, valid: &ValidSymbols) -> Option<TokenKind>
    where
        C: Cursor + ?Sized,
    {
        if self.pending_at == PendingAt::EmitPlainAt {
            self.pending_at = PendingAt::None;
            cursor.advance(true);
            cursor.mark_end();
            return Some(TokenKind::AtSign);
        }

        if !CONTROL_FLOW_STARTS.iter().any(|&kind| valid.contains(kind)) {
            return None;
        }

        cursor.advance(true);
        cursor.mark_end();

        let mut word = String::new();
        while let Some(ch) = cursor.lookahead() {
            if !ch.is_alphanumeric() {
                break;
            }
            word.push(ch);
            cursor.advance(true);
            cursor.mark_end();
        }

        if word == "else" {
            return self.scan_else(cursor, valid);
        }

        for &(keyword, kind) in KEYWORDS {
            if word == keyword && valid.contains(kind) {
                return Some(kind);
            }
        }

        trace!(candidate = %word, "no directive keyword; pending plain at-sign");
        self.pending_at = PendingAt::EmitPlainAt;
        None
    }

    /// `@else` has been consumed up to the committed boundary. Decide between
    /// the plain token and the two-word `@else if` form.
    fn scan_else<C>(&mut self, cursor: &mut C, valid: &ValidSymbols) -> Option<TokenKind>
    where
        C: Cursor + ?Sized,
    {
        match cursor.lookahead() {
            Some(' ') => {
                // Peek one word past the boundary; the boundary moves only if
                // the combined token is actually produced.
                cursor.advance(true);
                let mut next_word = String::new();
                while let Some(ch) = cursor.lookahead() {
                    if !ch.is_alphanumeric() {
                        break;
                    }
                    next_word.push(ch);
                    cursor.advance(true);
                }

                if next_word == "if" && valid.contains(TokenKind::ElseIfStart) {
                    cursor.mark_end();
                    return Some(TokenKind::ElseIfStart);
                }
                if valid.contains(TokenKind::ElseStart) {
                    return Some(TokenKind::ElseStart);
                }
            }
            Some('{') | Some('(') => {
                if valid.contains(TokenKind::ElseStart) {
                    return Some(TokenKind::ElseStart);
                }
            }
            _ => {}
        }

        trace!("unplaceable else; pending plain at-sign");
        self.pending_at = PendingAt::EmitPlainAt;
        None
    }
}
