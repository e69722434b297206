//! # Trellis Testkit
//!
//! Reference implementations of the host-side collaborators the Trellis
//! scanner consumes, for use in tests and benchmarks:
//!
//! 1. **Cursor**: [`StringCursor`], an in-memory character stream with
//!    checkpoint/restore and committed-boundary token extraction
//! 2. **Oracle**: [`HtmlOracle`], HTML5 classification, void, and containment
//!    tables
//! 3. **Driver**: [`ScanSession`], which replays a template through a scanner
//!    the way a grammar would — commit on success, roll back on failure
//!
//! ## Usage
//!
//! ```rust,ignore
//! use trellis_scanner::TokenKind;
//! use trellis_testkit::{symbols, ScanSession};
//!
//! let mut session = ScanSession::new("<div>");
//! session.expect_literal("<")?;
//! let token = session.scan(&symbols(&[TokenKind::StartTagName])).unwrap();
//! assert_eq!(token.text, "div");
//! ```

use thiserror::Error;

use trellis_scanner::{TokenKind, ValidSymbols};

pub mod cursor;
pub mod oracle;
pub mod session;

pub use cursor::{Checkpoint, StringCursor};
pub use oracle::HtmlOracle;
pub use session::{ScanSession, ScannedToken};

/// Errors that can occur while driving a scan session.
#[derive(Error, Debug)]
pub enum TestkitError {
    #[error("expected literal {expected:?} at position {position}, found {found:?}")]
    UnexpectedLiteral {
        expected: String,
        found: String,
        position: usize,
    },
}

/// Build a valid-symbol set from a list of kinds.
pub fn symbols(kinds: &[TokenKind]) -> ValidSymbols {
    let mut valid = ValidSymbols::none();
    for &kind in kinds {
        valid.set(kind, true);
    }
    valid
}
