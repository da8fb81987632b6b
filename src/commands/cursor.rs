//! Backtrackable token iterator.
//!
//! One [`ArgumentCursor`] is created per dispatch, shared by every parameter of
//! the command being resolved. Tokens consumed by one parameter are unavailable
//! to the next; the dispatcher snapshots the position before each parameter so
//! an optional parameter that fails to resolve gives its tokens back.

use std::fmt;

/// Error returned by [`ArgumentCursor::next`] when no tokens remain.
///
/// Parsers that want graceful behavior translate this into a
/// [`ParseError`](crate::commands::ParseError); left untranslated it is fatal
/// for the dispatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OutOfTokens;

impl fmt::Display for OutOfTokens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no tokens remain in the argument cursor")
    }
}

impl std::error::Error for OutOfTokens {}

/// A restartable pointer into an ordered sequence of raw text tokens.
///
/// The token sequence is fixed at construction; the only mutable state is the
/// position, clamped to `[0, len]`. Reading the same position repeatedly
/// without mutation is idempotent.
///
/// # Backtracking
///
/// Snapshot and restore are plain integer operations:
///
/// ```
/// # use herald::commands::ArgumentCursor;
/// let mut cursor = ArgumentCursor::new(vec!["a".to_string(), "b".to_string()]);
/// let snapshot = cursor.position();
/// cursor.next().unwrap();
/// cursor.seek(snapshot);
/// assert_eq!(cursor.remaining(), 2);
/// ```
#[derive(Clone, Debug)]
pub struct ArgumentCursor {
    tokens: Vec<String>,
    cursor: usize,
}

impl ArgumentCursor {
    /// Creates a cursor over the given tokens, positioned at the start.
    pub fn new(tokens: Vec<String>) -> Self {
        ArgumentCursor { tokens, cursor: 0 }
    }

    /// Number of unconsumed tokens.
    pub fn remaining(&self) -> usize {
        self.tokens.len() - self.cursor
    }

    /// Returns the token at the current position and advances by one.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfTokens`] when the cursor is past the last token.
    pub fn next(&mut self) -> Result<&str, OutOfTokens> {
        let token = self.tokens.get(self.cursor).ok_or(OutOfTokens)?;
        self.cursor += 1;
        Ok(token)
    }

    /// Current position, usable as a snapshot for [`ArgumentCursor::seek`].
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Moves the position, clamped to the token count.
    pub fn seek(&mut self, position: usize) {
        self.cursor = position.min(self.tokens.len());
    }
}
