//! The scanner session: tag stack, dispatch, and the markup sub-scanners.
//!
//! One [`Scanner`] is created per parse session. Each [`Scanner::scan`] call
//! decides, from the current character and the symbols the grammar currently
//! allows, which sub-scanner runs; the sub-scanner either commits a token
//! (mutating the stack together with emitting it) or fails with no visible
//! stack change. The only deliberate exception is multi-level implicit
//! closing, which pops one level per call and relies on the host re-invoking
//! the scanner at each newly exposed boundary.

use tracing::trace;

use crate::keyword::PendingAt;
use crate::tag::{Tag, TagCategory, TagName};
use crate::{Cursor, TagOracle, TokenKind, ValidSymbols};

/// Scanner session state: the stack of open tag contexts plus the pending-`@`
/// resolution state.
///
/// The session exclusively owns its stack and every custom-name buffer in it;
/// dropping the session releases them. The cursor and the serialization
/// buffer stay owned by the caller.
#[derive(Debug, Default)]
pub struct Scanner {
    pub(crate) tags: Vec<Tag>,
    pub(crate) pending_at: PendingAt,
}

impl Scanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// The open tag contexts, bottom first.
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// Current nesting depth.
    pub fn depth(&self) -> usize {
        self.tags.len()
    }

    /// The pending-`@` resolution state.
    pub fn pending_at(&self) -> PendingAt {
        self.pending_at
    }

    /// Scan one token.
    ///
    /// Returns the produced token kind, or `None` when no requested token can
    /// be produced here — the grammar then lexes the position itself. On
    /// `None` the caller must discard any uncommitted cursor advance; the tag
    /// stack is only ever mutated together with a produced token.
    pub fn scan<C, O>(
        &mut self,
        cursor: &mut C,
        oracle: &O,
        valid: &ValidSymbols,
    ) -> Option<TokenKind>
    where
        C: Cursor + ?Sized,
        O: TagOracle + ?Sized,
    {
        if valid.contains(TokenKind::RawText)
            && !valid.contains(TokenKind::StartTagName)
            && !valid.contains(TokenKind::EndTagName)
        {
            return self.scan_raw_text(cursor);
        }

        while cursor.lookahead().is_some_and(char::is_whitespace) {
            cursor.advance(false);
        }

        match cursor.lookahead() {
            Some('<') => {
                cursor.mark_end();
                cursor.advance(true);

                if cursor.lookahead() == Some('!') {
                    cursor.advance(true);
                    return self.scan_comment(cursor);
                }

                if valid.contains(TokenKind::ImplicitEndTag) {
                    return self.scan_implicit_end_tag(cursor, oracle);
                }
                None
            }
            None => {
                if valid.contains(TokenKind::ImplicitEndTag) {
                    return self.scan_implicit_end_tag(cursor, oracle);
                }
                None
            }
            Some('/') => {
                if valid.contains(TokenKind::SelfClosingTagDelimiter) {
                    return self.scan_self_closing_tag_delimiter(cursor);
                }
                None
            }
            Some('{') => {
                if valid.contains(TokenKind::InterpolationStart) {
                    return self.scan_interpolation_start(cursor);
                }
                None
            }
            Some('}') => {
                if valid.contains(TokenKind::InterpolationEnd) {
                    return self.scan_interpolation_end(cursor);
                }
                None
            }
            Some('@') => self.scan_at_sign(cursor, valid),
            Some(_) => {
                if (valid.contains(TokenKind::StartTagName)
                    || valid.contains(TokenKind::EndTagName))
                    && !valid.contains(TokenKind::RawText)
                {
                    if valid.contains(TokenKind::StartTagName) {
                        return self.scan_start_tag_name(cursor, oracle);
                    }
                    return self.scan_end_tag_name(cursor, oracle);
                }
                None
            }
        }
    }

    fn pop_tag(&mut self) -> Option<Tag> {
        let popped = self.tags.pop();
        if let Some(tag) = &popped {
            trace!(?tag, depth = self.tags.len(), "closed tag context");
        }
        popped
    }

    /// Decide whether to synthesize an end tag at a tag boundary (the `<` has
    /// already been consumed with the token boundary marked before it) or at
    /// end of input.
    ///
    /// At most one marker is popped per invocation; the host re-invokes the
    /// scanner at the new boundary to unwind further levels one at a time.
    fn scan_implicit_end_tag<C, O>(&mut self, cursor: &mut C, oracle: &O) -> Option<TokenKind>
    where
        C: Cursor + ?Sized,
        O: TagOracle + ?Sized,
    {
        let mut is_closing_tag = false;
        if cursor.lookahead() == Some('/') {
            is_closing_tag = true;
            cursor.advance(true);
        } else if let Some(parent) = self.tags.last() {
            if oracle.is_void(parent.category) {
                self.pop_tag();
                return Some(TokenKind::ImplicitEndTag);
            }
        }

        // Speculative: the boundary stays before the `<`, so the grammar
        // re-scans the name itself afterwards.
        let name = scan_tag_name(cursor);
        if name.is_empty() && !cursor.is_at_end() {
            return None;
        }

        let next = Tag::for_name(oracle, name);

        if is_closing_tag {
            // The tag correctly closes the innermost open context: let the
            // grammar process it as an explicit end tag.
            if self.tags.last() == Some(&next) {
                return None;
            }

            // A matching ancestor exists further down: unwind one level and
            // leave the rest to subsequent invocations.
            if self.tags.iter().any(|tag| tag.category == next.category) {
                self.pop_tag();
                return Some(TokenKind::ImplicitEndTag);
            }

            // No match anywhere: the end-tag scanner reports it.
            return None;
        }

        if let Some(parent) = self.tags.last() {
            let top_level_container = matches!(
                parent.category,
                TagCategory::Html | TagCategory::Head | TagCategory::Body
            );
            if !oracle.can_contain(parent.category, next.category)
                || (top_level_container && cursor.is_at_end())
            {
                self.pop_tag();
                return Some(TokenKind::ImplicitEndTag);
            }
        }

        None
    }

    fn scan_start_tag_name<C, O>(&mut self, cursor: &mut C, oracle: &O) -> Option<TokenKind>
    where
        C: Cursor + ?Sized,
        O: TagOracle + ?Sized,
    {
        let name = scan_tag_name(cursor);
        if name.is_empty() {
            return None;
        }

        let tag = Tag::for_name(oracle, name);
        let kind = match tag.category {
            TagCategory::Script => TokenKind::ScriptStartTagName,
            TagCategory::Style => TokenKind::StyleStartTagName,
            _ => TokenKind::StartTagName,
        };
        trace!(?tag, depth = self.tags.len(), "opened tag context");
        self.tags.push(tag);
        Some(kind)
    }

    fn scan_end_tag_name<C, O>(&mut self, cursor: &mut C, oracle: &O) -> Option<TokenKind>
    where
        C: Cursor + ?Sized,
        O: TagOracle + ?Sized,
    {
        let name = scan_tag_name(cursor);
        if name.is_empty() {
            return None;
        }

        let tag = Tag::for_name(oracle, name);
        if self.tags.last() == Some(&tag) {
            self.pop_tag();
            return Some(TokenKind::EndTagName);
        }

        // Mismatched close: report it, leave the stack to the implicit-close
        // heuristics. Diagnosis is the grammar's responsibility.
        Some(TokenKind::ErroneousEndTagName)
    }

    fn scan_self_closing_tag_delimiter<C>(&mut self, cursor: &mut C) -> Option<TokenKind>
    where
        C: Cursor + ?Sized,
    {
        cursor.advance(true);
        if cursor.lookahead() != Some('>') {
            return None;
        }
        cursor.advance(true);
        self.pop_tag();
        Some(TokenKind::SelfClosingTagDelimiter)
    }

    /// Comment body scan; the dispatcher has already consumed `<!`.
    fn scan_comment<C>(&mut self, cursor: &mut C) -> Option<TokenKind>
    where
        C: Cursor + ?Sized,
    {
        if cursor.lookahead() != Some('-') {
            return None;
        }
        cursor.advance(true);
        if cursor.lookahead() != Some('-') {
            return None;
        }
        cursor.advance(true);

        let mut dashes = 0u32;
        while let Some(ch) = cursor.lookahead() {
            match ch {
                '-' => dashes += 1,
                '>' if dashes >= 2 => {
                    cursor.advance(true);
                    cursor.mark_end();
                    return Some(TokenKind::Comment);
                }
                _ => dashes = 0,
            }
            cursor.advance(true);
        }
        None
    }

    /// Raw content of a script/style container, up to but excluding its end
    /// tag. The terminating sequence is matched case-insensitively; the token
    /// boundary trails the match so the end tag itself is left for the
    /// grammar.
    fn scan_raw_text<C>(&mut self, cursor: &mut C) -> Option<TokenKind>
    where
        C: Cursor + ?Sized,
    {
        let top = self.tags.last()?;
        cursor.mark_end();

        let terminator: &[u8] = if top.category == TagCategory::Script {
            b"</SCRIPT"
        } else {
            b"</STYLE"
        };

        let mut matched = 0;
        loop {
            let Some(ch) = cursor.lookahead() else {
                cursor.mark_end();
                break;
            };
            if ch.to_ascii_uppercase() == terminator[matched] as char {
                matched += 1;
                if matched == terminator.len() {
                    break;
                }
                cursor.advance(true);
            } else {
                matched = 0;
                cursor.advance(true);
                cursor.mark_end();
            }
        }

        Some(TokenKind::RawText)
    }

    fn scan_interpolation_start<C>(&mut self, cursor: &mut C) -> Option<TokenKind>
    where
        C: Cursor + ?Sized,
    {
        cursor.mark_end();
        cursor.advance(true);
        if cursor.lookahead() != Some('{') {
            return None;
        }
        cursor.advance(true);
        cursor.mark_end();
        trace!(depth = self.tags.len(), "opened interpolation");
        self.tags.push(Tag::interpolation());
        Some(TokenKind::InterpolationStart)
    }

    fn scan_interpolation_end<C>(&mut self, cursor: &mut C) -> Option<TokenKind>
    where
        C: Cursor + ?Sized,
    {
        cursor.mark_end();
        cursor.advance(true);
        if cursor.lookahead() != Some('}') {
            return None;
        }
        let closes_interpolation = self
            .tags
            .last()
            .is_some_and(|tag| tag.category == TagCategory::Interpolation);
        if !closes_interpolation {
            return None;
        }
        cursor.advance(true);
        cursor.mark_end();
        self.pop_tag();
        Some(TokenKind::InterpolationEnd)
    }
}

/// Consume a maximal run of tag-name characters, upper-casing them. Empty if
/// the first character does not qualify.
pub(crate) fn scan_tag_name<C>(cursor: &mut C) -> TagName
where
    C: Cursor + ?Sized,
{
    let mut name = TagName::new();
    while let Some(ch) = cursor.lookahead() {
        if ch.is_alphanumeric() || ch == '-' || ch == ':' {
            name.push(ch);
            cursor.advance(true);
        } else {
            break;
        }
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_testkit::{HtmlOracle, StringCursor};

    #[test]
    fn tag_name_scan_normalizes_and_stops_at_delimiters() {
        let mut cursor = StringCursor::new("my-app:panel>rest");
        let name = scan_tag_name(&mut cursor);
        assert_eq!(name.as_str(), "MY-APP:PANEL");
        assert_eq!(cursor.lookahead(), Some('>'));
    }

    #[test]
    fn tag_name_scan_is_empty_off_name_characters() {
        let mut cursor = StringCursor::new(">div");
        assert!(scan_tag_name(&mut cursor).is_empty());
        assert_eq!(cursor.lookahead(), Some('>'));
    }

    #[test]
    fn start_tag_scan_fails_without_a_name() {
        let mut scanner = Scanner::new();
        let mut cursor = StringCursor::new(">");
        let valid = crate::ValidSymbols::none().with(TokenKind::StartTagName);
        assert_eq!(scanner.scan(&mut cursor, &HtmlOracle::new(), &valid), None);
        assert!(scanner.tags().is_empty());
    }

    #[test]
    fn raw_text_fails_with_no_open_context() {
        let mut scanner = Scanner::new();
        let mut cursor = StringCursor::new("var x;");
        let valid = crate::ValidSymbols::none().with(TokenKind::RawText);
        assert_eq!(scanner.scan(&mut cursor, &HtmlOracle::new(), &valid), None);
    }
}
