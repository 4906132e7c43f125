//! The matching rules a lexer is assembled from, split by what they do.
//!
//! - [primitive] contains rules for single characters, literal words,
//!   identifiers and numbers.
//! - [literal] contains the rules that commit once they see an opening
//!   marker: strings and comments.
//! - [combinators] builds bigger rules out of smaller ones: ordered choice,
//!   sequences and greedy repetition.
//!
//! Every rule honours the same contract: it either returns a token and leaves
//! the cursor right after the matched characters, or returns `None` and leaves
//! the cursor exactly where it found it.
pub mod combinators;
pub mod literal;
pub mod primitive;

use core::fmt::Debug;

pub use combinators::{CharacterSet, CompoundRule, GreedyConsumerRule, Ruleset, WordSet};
pub use literal::{CommentRule, StringRule};
pub use primitive::{AlphaCharacterRule, CharacterRule, IdentifierRule, NumberRule, WordRule};

use crate::errors::LexingError;
use crate::stream::CharacterStream;
use crate::token::Token;

/// Outcome of a single rule: a token, no match (`None`), or a fatal error.
pub type MatchResult = Result<Option<Token>, LexingError>;

/// A matcher that attempts to consume a prefix of the character stream.
///
/// Rules are read-only configuration once built, hence the `Send + Sync`
/// bound: one rule list can serve concurrent tokenizations.
pub trait SyntaxRule: Debug + Send + Sync {
    /// Try to match at the cursor.
    ///
    /// Returning `Ok(None)` must leave the cursor untouched.
    ///
    /// # Errors
    ///
    /// A [`LexingError`] if the rule committed to a match and the input turned
    /// out to be malformed.
    fn try_match(&self, stream: &mut CharacterStream) -> MatchResult;
}

/// Owned, type-erased rule as stored in rule lists.
pub type BoxedRule = Box<dyn SyntaxRule>;

/// Box a rule, to put it into a rule list.
#[must_use]
pub fn boxed<R: SyntaxRule + 'static>(rule: R) -> BoxedRule {
    Box::new(rule)
}

impl<R: SyntaxRule + ?Sized> SyntaxRule for Box<R> {
    fn try_match(&self, stream: &mut CharacterStream) -> MatchResult {
        (**self).try_match(stream)
    }
}

impl<R: SyntaxRule + ?Sized> SyntaxRule for &R {
    fn try_match(&self, stream: &mut CharacterStream) -> MatchResult {
        (**self).try_match(stream)
    }
}
