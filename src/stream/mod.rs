//! Cursor-based streams over characters and tokens.
//!
//! - [Stream] is the generic cursor over a fixed sequence of items.
//! - [characters] wraps it for source text and keeps track of lines, so rules
//!   can attach a [`Span`](crate::types::Span) to what they match.
//! - [`TokenStream`] is the same cursor over produced tokens, as handed to a
//!   downstream parser.
pub mod characters;

pub use characters::CharacterStream;

use crate::errors::EndOfStream;
use crate::token::Token;

/// The tokens of a successful tokenization, with the same peek/pop contract
/// as the characters they were read from.
pub type TokenStream = Stream<Token>;

/// An ordered, indexable sequence of items plus a cursor.
///
/// The cursor never exceeds the number of items. Only [`pop`](Stream::pop),
/// [`advance`](Stream::advance) and [`reset_to`](Stream::reset_to) move it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Stream<T> {
    /// The items, never modified after construction.
    items: Vec<T>,
    /// Index of the next item to be popped.
    position: usize,
}

impl<T> Stream<T> {
    /// Create a stream positioned before the first item.
    #[must_use]
    pub const fn new(items: Vec<T>) -> Self {
        Stream { items, position: 0 }
    }

    /// Total number of items, consumed or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the stream has no items at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Zero-based index of the next item.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Number of items not consumed yet.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.len().saturating_sub(self.position)
    }

    /// Whether every item has been consumed.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.position >= self.len()
    }

    /// The next item, without consuming it.
    #[must_use]
    pub fn peek(&self) -> Option<&T> {
        self.peek_nth(0)
    }

    /// The item `n` places after the cursor, without consuming anything.
    /// Out of range reads return `None`.
    #[must_use]
    pub fn peek_nth(&self, n: usize) -> Option<&T> {
        self.items.get(self.position.checked_add(n)?)
    }

    /// Consume the next item and return it.
    ///
    /// # Errors
    ///
    /// [`EndOfStream`] if every item has already been consumed.
    pub fn pop(&mut self) -> Result<&T, EndOfStream> {
        let position = self.position;
        let item = self.items.get(position).ok_or(EndOfStream { position })?;
        self.position = position.saturating_add(1);
        Ok(item)
    }

    /// The next `n` items, without consuming them. Shorter than `n` near the end.
    #[must_use]
    pub fn lookahead(&self, n: usize) -> &[T] {
        let end = self.position.saturating_add(n).min(self.len());
        self.items.get(self.position..end).unwrap_or_default()
    }

    /// Skip `n` items without reading them.
    ///
    /// # Errors
    ///
    /// [`EndOfStream`] if fewer than `n` items remain. The cursor is left
    /// untouched in that case.
    pub fn advance(&mut self, n: usize) -> Result<(), EndOfStream> {
        if n > self.remaining() {
            return Err(EndOfStream {
                position: self.len(),
            });
        }
        self.position = self.position.saturating_add(n);
        Ok(())
    }

    /// Move the cursor back to a previously observed position. Positions past
    /// the end are clamped to the end.
    pub fn reset_to(&mut self, position: usize) {
        self.position = position.min(self.len());
    }

    /// All items, consumed or not.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Give up the cursor and return the items.
    #[must_use]
    pub fn into_inner(self) -> Vec<T> {
        self.items
    }
}

impl<T> From<Vec<T>> for Stream<T> {
    fn from(items: Vec<T>) -> Self {
        Stream::new(items)
    }
}

impl<T: Clone> Iterator for Stream<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.pop().ok().cloned()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining(), Some(self.remaining()))
    }
}

impl Stream<Token> {
    /// Kind of the next token, the most common question a parser asks.
    #[must_use]
    pub fn peek_kind(&self) -> Option<&str> {
        self.peek().map(|token| token.kind.as_str())
    }
}
