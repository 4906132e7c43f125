//! Rules that commit once they have seen their opening marker.
//!
//! Up to the marker they behave like any other rule and return `None` without
//! consuming anything. Past it, running out of input or meeting malformed
//! content is a fatal [`LexingError`], since there is no way to back out of a
//! half-read string or comment.
use crate::errors::LexingError;
use crate::rules::{MatchResult, SyntaxRule};
use crate::stream::CharacterStream;
use crate::token::Token;
use crate::types::Location;

/// Matches a string delimited by `"` or `'`. The same character has to close
/// the string. The token value is the unescaped content, without quotes.
///
/// Supported escapes are `\\`, the escaped quote character, `\t`, `\r`, `\n`
/// and `\x`. A `\x` followed by two hex digits decodes to that character code;
/// without them it stands for a plain `x`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[non_exhaustive]
pub struct StringRule;

impl StringRule {
    /// Kind of every token this rule produces.
    pub const KIND: &'static str = "string";

    /// Create the rule.
    #[must_use]
    pub const fn new() -> Self {
        StringRule
    }

    /// Decode the escape sequence after a backslash at `backslash`.
    fn unescape(
        stream: &mut CharacterStream,
        quote: char,
        start: Location,
        backslash: Location,
    ) -> Result<char, LexingError> {
        let Some(escape) = stream.pop_if(|_| true) else {
            return Err(LexingError::UnterminatedString(stream.span_from(start)));
        };
        match escape {
            'n' => Ok('\n'),
            't' => Ok('\t'),
            'r' => Ok('\r'),
            '\\' => Ok('\\'),
            'x' => Self::hex_pair(stream).map_or(Ok('x'), |code| {
                stream.advance(2)?;
                Ok(u8::try_from(code).map_or(char::REPLACEMENT_CHARACTER, char::from))
            }),
            c if c == quote => Ok(c),
            _ => Err(LexingError::InvalidEscape { escape, location: backslash }),
        }
    }

    /// Value of the two hex digits after the cursor, if there are two.
    fn hex_pair(stream: &CharacterStream) -> Option<u32> {
        let high = stream.peek()?.to_digit(16)?;
        let low = stream.peek_nth(1)?.to_digit(16)?;
        Some(high.saturating_mul(16).saturating_add(low))
    }
}

impl SyntaxRule for StringRule {
    fn try_match(&self, stream: &mut CharacterStream) -> MatchResult {
        let start = stream.location();
        let Some(quote) = stream.pop_if(|c| c == '"' || c == '\'') else {
            return Ok(None);
        };

        let mut value = String::new();
        loop {
            let here = stream.location();
            let Some(next) = stream.pop_if(|_| true) else {
                return Err(LexingError::UnterminatedString(stream.span_from(start)));
            };
            if next == quote {
                return Ok(Some(Token::new(Self::KIND, value, stream.span_from(start))));
            }
            if next == '\\' {
                value.push(Self::unescape(stream, quote, start, here)?);
            } else {
                value.push(next);
            }
        }
    }
}

/// Matches a comment that starts with a marker and runs up to a terminator
/// character, e.g. `CommentRule::new("#", '\n')` for line comments. The
/// token value is the text between marker and terminator; both are consumed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommentRule {
    /// The opening marker.
    begin: String,
    /// Length of the marker in characters.
    begin_length: usize,
    /// Character that ends the comment.
    terminator: char,
}

impl CommentRule {
    /// Kind of every token this rule produces.
    pub const KIND: &'static str = "Comment";

    /// Comments opening with `begin` and closed by `terminator`.
    #[must_use]
    pub fn new(begin: impl Into<String>, terminator: char) -> Self {
        let begin = begin.into();
        CommentRule {
            begin_length: begin.chars().count(),
            begin,
            terminator,
        }
    }
}

impl SyntaxRule for CommentRule {
    fn try_match(&self, stream: &mut CharacterStream) -> MatchResult {
        if self.begin_length == 0 || !stream.starts_with(&self.begin) {
            return Ok(None);
        }
        let start = stream.location();
        stream.advance(self.begin_length)?;

        let mut text = String::new();
        while let Some(c) = stream.pop_if(|c| c != self.terminator) {
            text.push(c);
        }
        if stream.pop_if(|c| c == self.terminator).is_none() {
            return Err(LexingError::UnterminatedComment(stream.span_from(start)));
        }
        Ok(Some(Token::new(Self::KIND, text, stream.span_from(start))))
    }
}
