//! Rules that match a fixed shape of characters and never commit early:
//! whenever they return `None`, they have not consumed anything.
use crate::errors::LexingError;
use crate::rules::{MatchResult, SyntaxRule};
use crate::stream::CharacterStream;
use crate::token::Token;

/// Matches exactly one specific character.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CharacterRule {
    /// Kind of the produced token.
    kind: String,
    /// The character to match.
    character: char,
}

impl CharacterRule {
    /// Match `character`, producing tokens of `kind`.
    #[must_use]
    pub fn new(kind: impl Into<String>, character: char) -> Self {
        CharacterRule {
            kind: kind.into(),
            character,
        }
    }
}

impl SyntaxRule for CharacterRule {
    fn try_match(&self, stream: &mut CharacterStream) -> MatchResult {
        let start = stream.location();
        Ok(stream
            .pop_if(|c| c == self.character)
            .map(|c| Token::new(self.kind.as_str(), String::from(c), stream.span_from(start))))
    }
}

/// Matches a literal word, as long as it is not immediately followed by a
/// letter. `"if"` matches in `"if x"` and `"if("`, but not in `"ifx"`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WordRule {
    /// Kind of the produced token.
    kind: String,
    /// The word to match.
    word: String,
    /// Length of `word` in characters.
    length: usize,
    /// Compare ASCII letters case-insensitively.
    ignore_case: bool,
}

impl WordRule {
    /// Match `word` exactly, producing tokens of `kind`.
    #[must_use]
    pub fn new(kind: impl Into<String>, word: impl Into<String>) -> Self {
        let word = word.into();
        WordRule {
            kind: kind.into(),
            length: word.chars().count(),
            word,
            ignore_case: false,
        }
    }

    /// Compare ASCII letters without regard to case. The token value is still
    /// the text as it appears in the source.
    #[must_use]
    pub fn ignore_case(mut self) -> Self {
        self.ignore_case = true;
        self
    }

    /// Whether the source character `found` matches the `expected` word character.
    fn same(&self, found: char, expected: char) -> bool {
        if self.ignore_case {
            found.eq_ignore_ascii_case(&expected)
        } else {
            found == expected
        }
    }
}

impl SyntaxRule for WordRule {
    fn try_match(&self, stream: &mut CharacterStream) -> MatchResult {
        if self.length == 0 {
            return Ok(None);
        }
        let spelled = self
            .word
            .chars()
            .enumerate()
            .all(|(n, expected)| stream.peek_nth(n).is_some_and(|c| self.same(c, expected)));
        if !spelled {
            return Ok(None);
        }
        if stream.peek_nth(self.length).is_some_and(|c| c.is_ascii_alphabetic()) {
            return Ok(None);
        }

        let start = stream.location();
        let text = stream.lookahead(self.length).iter().collect::<String>();
        stream.advance(self.length)?;
        Ok(Some(Token::new(self.kind.as_str(), text, stream.span_from(start))))
    }
}

/// Matches a single uppercase ASCII letter as a `"Symbol"`, the building
/// block of single-letter algebra notations.
///
/// Unlike the other rules, calling this on an exhausted stream is an
/// [`UnexpectedEnd`](LexingError::UnexpectedEnd) error rather than a miss.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[non_exhaustive]
pub struct AlphaCharacterRule;

impl AlphaCharacterRule {
    /// Kind of every token this rule produces.
    pub const KIND: &'static str = "Symbol";

    /// Create the rule.
    #[must_use]
    pub const fn new() -> Self {
        AlphaCharacterRule
    }
}

impl SyntaxRule for AlphaCharacterRule {
    fn try_match(&self, stream: &mut CharacterStream) -> MatchResult {
        let start = stream.location();
        let Some(next) = stream.peek() else {
            return Err(LexingError::UnexpectedEnd(start));
        };
        if !next.is_ascii_uppercase() {
            return Ok(None);
        }
        stream.advance(1)?;
        Ok(Some(Token::new(Self::KIND, String::from(next), stream.span_from(start))))
    }
}

/// Matches a maximal run of ASCII digits as a `"Number"` whose value is the
/// parsed integer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[non_exhaustive]
pub struct NumberRule;

impl NumberRule {
    /// Kind of every token this rule produces.
    pub const KIND: &'static str = "Number";

    /// Create the rule.
    #[must_use]
    pub const fn new() -> Self {
        NumberRule
    }
}

impl SyntaxRule for NumberRule {
    fn try_match(&self, stream: &mut CharacterStream) -> MatchResult {
        let start = stream.location();
        let mut digits = String::new();
        while let Some(digit) = stream.pop_if(|c| c.is_ascii_digit()) {
            digits.push(digit);
        }
        if digits.is_empty() {
            return Ok(None);
        }

        let span = stream.span_from(start);
        match digits.parse::<i64>() {
            Ok(value) => Ok(Some(Token::new(Self::KIND, value, span))),
            Err(_overflow) => Err(LexingError::NumberOutOfRange { raw: digits, span }),
        }
    }
}

/// Matches an identifier as a `"symbol"`: a letter or underscore, followed by
/// any number of letters, digits and underscores.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[non_exhaustive]
pub struct IdentifierRule;

impl IdentifierRule {
    /// Kind of every token this rule produces.
    pub const KIND: &'static str = "symbol";

    /// Create the rule.
    #[must_use]
    pub const fn new() -> Self {
        IdentifierRule
    }
}

/// Can the character start an identifier?
#[inline]
fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

/// Can the character continue an identifier?
#[inline]
fn is_identifier_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

impl SyntaxRule for IdentifierRule {
    fn try_match(&self, stream: &mut CharacterStream) -> MatchResult {
        let start = stream.location();
        let Some(first) = stream.pop_if(is_identifier_start) else {
            return Ok(None);
        };
        let mut identifier = String::from(first);
        while let Some(c) = stream.pop_if(is_identifier_continue) {
            identifier.push(c);
        }
        Ok(Some(Token::new(Self::KIND, identifier, stream.span_from(start))))
    }
}
