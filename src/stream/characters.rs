//! The character stream every rule reads from.
//!
//! Characters are stored decoded, so offsets and columns count characters
//! rather than bytes. Line starts are recorded once up front, which keeps
//! [`CharacterStream::location`] cheap enough to call for every token.
use crate::errors::LexingError;
use crate::stream::Stream;
use crate::types::{Location, Span};

/// A [Stream] over the characters of an input text.
#[derive(Clone, Debug)]
pub struct CharacterStream {
    /// The underlying cursor.
    chars: Stream<char>,
    /// Offsets at which each line starts; always begins with `0`.
    line_starts: Vec<usize>,
}

impl CharacterStream {
    /// Create a stream positioned before the first character of `source`.
    #[must_use]
    pub fn new(source: &str) -> Self {
        let chars: Vec<char> = source.chars().collect();
        let line_starts = core::iter::once(0)
            .chain(
                chars
                    .iter()
                    .enumerate()
                    .filter(|&(_, &c)| c == '\n')
                    .map(|(offset, _)| offset.saturating_add(1)),
            )
            .collect();
        CharacterStream {
            chars: Stream::new(chars),
            line_starts,
        }
    }

    /// Total number of characters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Whether the input was empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Offset of the next character.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.chars.position()
    }

    /// Whether every character has been consumed.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.chars.is_exhausted()
    }

    /// The next character, without consuming it.
    #[must_use]
    pub fn peek(&self) -> Option<char> {
        self.chars.peek().copied()
    }

    /// The character `n` places after the cursor, without consuming anything.
    #[must_use]
    pub fn peek_nth(&self, n: usize) -> Option<char> {
        self.chars.peek_nth(n).copied()
    }

    /// Consume the next character.
    ///
    /// # Errors
    ///
    /// [`LexingError::UnexpectedEnd`] if the input is exhausted. This is the
    /// [`EndOfStream`](crate::errors::EndOfStream) of the underlying [Stream],
    /// located in the source so a rule can pass it on with `?`.
    pub fn pop(&mut self) -> Result<char, LexingError> {
        let location = self.location();
        self.chars
            .pop()
            .copied()
            .map_err(|_end| LexingError::UnexpectedEnd(location))
    }

    /// Consume the next character only if it satisfies `test`.
    pub fn pop_if<F>(&mut self, test: F) -> Option<char>
    where
        F: FnOnce(char) -> bool,
    {
        let next = self.peek().filter(|&c| test(c))?;
        self.chars.advance(1).ok()?;
        Some(next)
    }

    /// The next `n` characters, without consuming them.
    #[must_use]
    pub fn lookahead(&self, n: usize) -> &[char] {
        self.chars.lookahead(n)
    }

    /// Whether the upcoming characters spell out `word`.
    #[must_use]
    pub fn starts_with(&self, word: &str) -> bool {
        word.chars()
            .enumerate()
            .all(|(n, expected)| self.peek_nth(n) == Some(expected))
    }

    /// Skip `n` characters.
    ///
    /// # Errors
    ///
    /// [`LexingError::UnexpectedEnd`] (the located
    /// [`EndOfStream`](crate::errors::EndOfStream)) if fewer than `n` remain;
    /// nothing is skipped in that case.
    pub fn advance(&mut self, n: usize) -> Result<(), LexingError> {
        let location = self.location();
        self.chars
            .advance(n)
            .map_err(|_end| LexingError::UnexpectedEnd(location))
    }

    /// Rewind to a previously observed [position](CharacterStream::position).
    pub fn reset_to(&mut self, position: usize) {
        self.chars.reset_to(position);
    }

    /// Location of the cursor.
    #[must_use]
    pub fn location(&self) -> Location {
        self.location_at(self.position())
    }

    /// Location of an arbitrary character offset.
    #[must_use]
    pub fn location_at(&self, offset: usize) -> Location {
        let line = self
            .line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1);
        let line_start = self.line_starts.get(line).copied().unwrap_or_default();
        Location {
            line,
            col: offset.saturating_sub(line_start),
            offset,
        }
    }

    /// Span from `start` up to the cursor.
    #[must_use]
    pub fn span_from(&self, start: Location) -> Span {
        Span::from(start, self.location())
    }

    /// The source text a span covers.
    #[must_use]
    pub fn text(&self, span: Span) -> String {
        let end = span.end.offset.min(self.len());
        self.chars
            .as_slice()
            .get(span.start.offset.min(end)..end)
            .unwrap_or_default()
            .iter()
            .collect()
    }
}

/// Iterating pops the remaining characters. This consumes the stream, so
/// the cursor methods above never compete with [`Iterator`]'s.
impl IntoIterator for CharacterStream {
    type Item = char;
    type IntoIter = Stream<char>;

    fn into_iter(self) -> Stream<char> {
        self.chars
    }
}
