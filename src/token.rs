//! The data type every rule produces: a caller-labelled kind, a value and
//! the span the token was read from.
use core::fmt::{Display, Formatter};

use crate::types::Span;

/// The value of a token, either the text it matched (possibly post-processed,
/// like an unescaped string) or a scalar derived from it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[expect(
    clippy::exhaustive_enums,
    reason = "adding a new variant MUST be handled and is a breaking change."
)]
pub enum TokenValue {
    /// Textual value.
    Text(String),
    /// A parsed integer, as produced by [`NumberRule`](crate::rules::NumberRule).
    Integer(i64),
}

impl TokenValue {
    /// The textual value, if this is one.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match *self {
            TokenValue::Text(ref text) => Some(text.as_str()),
            TokenValue::Integer(_) => None,
        }
    }

    /// The integer value, if this is one.
    #[must_use]
    pub const fn as_integer(&self) -> Option<i64> {
        match *self {
            TokenValue::Integer(value) => Some(value),
            TokenValue::Text(_) => None,
        }
    }
}

impl Display for TokenValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match *self {
            TokenValue::Text(ref text) => f.write_str(text),
            TokenValue::Integer(value) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for TokenValue {
    fn from(value: &str) -> Self {
        TokenValue::Text(value.to_owned())
    }
}

impl From<String> for TokenValue {
    fn from(value: String) -> Self {
        TokenValue::Text(value)
    }
}

impl From<i64> for TokenValue {
    fn from(value: i64) -> Self {
        TokenValue::Integer(value)
    }
}

/// One lexical unit. Tokens are never modified after a rule produced them.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[expect(clippy::exhaustive_structs, reason = "kind, value and span are set in stone")]
pub struct Token {
    /// Caller-defined label, such as `"keyword"` or `"Number"`.
    pub kind: String,
    /// Matched text or derived scalar.
    pub value: TokenValue,
    /// Characters the token was read from.
    pub span: Span,
}

impl Token {
    /// Bundle a kind and a value with the span they were read from.
    #[must_use]
    pub fn new<K, V>(kind: K, value: V, span: Span) -> Self
    where
        K: Into<String>,
        V: Into<TokenValue>,
    {
        Token {
            kind: kind.into(),
            value: value.into(),
            span,
        }
    }

    /// Whether this token has the given kind.
    #[must_use]
    pub fn is(&self, kind: &str) -> bool {
        self.kind == kind
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "<{} {:?} @ {}>", self.kind, self.value.to_string(), self.span)
    }
}

#[cfg(test)]
mod test {
    use super::{Token, TokenValue};
    use crate::types::{Location, Span};

    #[test]
    fn values_convert_both_ways() {
        assert_eq!(TokenValue::from("if").as_text(), Some("if"));
        assert_eq!(TokenValue::from(12_i64).as_integer(), Some(12));
        assert_eq!(TokenValue::from(12_i64).as_text(), None);
        assert_eq!(TokenValue::from(-3_i64).to_string(), "-3");
    }

    #[test]
    fn tokens_display_kind_value_and_span() {
        let end = Location { line: 0, col: 2, offset: 2 };
        let token = Token::new("keyword", "if", Span::from(Location::default(), end));
        assert!(token.is("keyword"), "kind is kept");
        assert_eq!(token.to_string(), "<keyword \"if\" @ 0:0-0:2>");
    }
}
