//! Rules built out of other rules.
//!
//! [Ruleset] is ordered choice, [`CharacterSet`] and [`WordSet`] are
//! shorthands for choices among [`CharacterRules`](CharacterRule) and
//! [`WordRules`](WordRule). [`CompoundRule`] is a sequence and
//! [`GreedyConsumerRule`] is repetition followed by a mandatory terminator.
use itertools::Itertools;
use tracing::trace;

use crate::errors::LexingError;
use crate::rules::{BoxedRule, CharacterRule, MatchResult, SyntaxRule, WordRule, boxed};
use crate::stream::CharacterStream;
use crate::token::Token;

/// Ordered choice: the first sub-rule that matches wins.
#[derive(Debug, Default)]
pub struct Ruleset {
    /// Alternatives, in priority order.
    rules: Vec<BoxedRule>,
}

impl Ruleset {
    /// Try `rules` in the given order.
    #[must_use]
    pub fn new(rules: Vec<BoxedRule>) -> Self {
        Ruleset { rules }
    }

    /// Append an alternative with the lowest priority so far.
    #[must_use]
    pub fn or<R: SyntaxRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(boxed(rule));
        self
    }

    /// The alternatives, in priority order.
    #[must_use]
    pub fn rules(&self) -> &[BoxedRule] {
        &self.rules
    }
}

impl SyntaxRule for Ruleset {
    fn try_match(&self, stream: &mut CharacterStream) -> MatchResult {
        for rule in &self.rules {
            if let Some(token) = rule.try_match(stream)? {
                return Ok(Some(token));
            }
        }
        Ok(None)
    }
}

/// Matches any single character out of a fixed set.
#[derive(Debug)]
pub struct CharacterSet(Ruleset);

impl CharacterSet {
    /// Match any of `characters`, producing tokens of `kind`.
    #[must_use]
    pub fn new(kind: &str, characters: &str) -> Self {
        CharacterSet(Ruleset::new(
            characters
                .chars()
                .unique()
                .map(|c| boxed(CharacterRule::new(kind, c)))
                .collect(),
        ))
    }
}

impl SyntaxRule for CharacterSet {
    fn try_match(&self, stream: &mut CharacterStream) -> MatchResult {
        self.0.try_match(stream)
    }
}

/// Matches any word out of a list, trying them in the given order.
///
/// Words are not reordered: if one word is a prefix of another one followed
/// by a non-letter (`"<"` and `"<="`), list the longer one first.
#[derive(Debug)]
pub struct WordSet(Ruleset);

impl WordSet {
    /// Match any of `words`, producing tokens of `kind`.
    #[must_use]
    pub fn new<I>(kind: &str, words: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        WordSet(Ruleset::new(
            words
                .into_iter()
                .map(|word| boxed(WordRule::new(kind, word)))
                .collect(),
        ))
    }

    /// Like [`WordSet::new`], comparing ASCII letters case-insensitively.
    #[must_use]
    pub fn ignore_case<I>(kind: &str, words: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        WordSet(Ruleset::new(
            words
                .into_iter()
                .map(|word| boxed(WordRule::new(kind, word).ignore_case()))
                .collect(),
        ))
    }
}

impl SyntaxRule for WordSet {
    fn try_match(&self, stream: &mut CharacterStream) -> MatchResult {
        self.0.try_match(stream)
    }
}

/// A sequence of rules that all have to match, one after the other, to
/// produce a single token. Parts flagged as included contribute the source
/// text they matched to the token value; the others are consumed silently.
///
/// If a part does not match, the cursor is restored to where the compound
/// started, so the compound as a whole is atomic. Fatal errors of parts are
/// passed on as they are.
#[derive(Debug)]
pub struct CompoundRule {
    /// Kind of the produced token.
    kind: String,
    /// The parts and whether their value is part of the token value.
    parts: Vec<(BoxedRule, bool)>,
}

impl CompoundRule {
    /// A sequence of `parts`, each flagged whether its value is kept.
    #[must_use]
    pub fn new(kind: impl Into<String>, parts: Vec<(BoxedRule, bool)>) -> Self {
        CompoundRule {
            kind: kind.into(),
            parts,
        }
    }

    /// Append a part whose value is kept.
    #[must_use]
    pub fn then<R: SyntaxRule + 'static>(mut self, rule: R) -> Self {
        self.parts.push((boxed(rule), true));
        self
    }

    /// Append a part that is matched but left out of the value.
    #[must_use]
    pub fn then_skip<R: SyntaxRule + 'static>(mut self, rule: R) -> Self {
        self.parts.push((boxed(rule), false));
        self
    }
}

impl SyntaxRule for CompoundRule {
    fn try_match(&self, stream: &mut CharacterStream) -> MatchResult {
        let start = stream.location();
        let mut value = String::new();
        for (index, &(ref rule, include)) in self.parts.iter().enumerate() {
            let Some(token) = rule.try_match(stream)? else {
                if stream.position() != start.offset {
                    trace!(kind = %self.kind, part = index, at = %start, "compound rule rewinding");
                }
                stream.reset_to(start.offset);
                return Ok(None);
            };
            if include {
                value.push_str(&stream.text(token.span));
            }
        }
        Ok(Some(Token::new(self.kind.as_str(), value, stream.span_from(start))))
    }
}

/// Applies `consumer` as often as it matches, then requires `terminator`.
/// The token value is the source text of all consumer matches; the
/// terminator is consumed, but not part of the value. Zero consumer matches
/// followed by the terminator produce a token with an empty value.
///
/// Once the consumer has matched, a missing terminator is a fatal
/// [`MissingTerminator`](LexingError::MissingTerminator) error. If neither the
/// consumer nor the terminator match, this is a plain miss.
#[derive(Debug)]
pub struct GreedyConsumerRule {
    /// Kind of the produced token.
    kind: String,
    /// Rule applied repeatedly.
    consumer: BoxedRule,
    /// Rule that has to follow the last consumer match.
    terminator: BoxedRule,
}

impl GreedyConsumerRule {
    /// Repeat `consumer`, then require `terminator`.
    #[must_use]
    pub fn new<C, T>(kind: impl Into<String>, consumer: C, terminator: T) -> Self
    where
        C: SyntaxRule + 'static,
        T: SyntaxRule + 'static,
    {
        GreedyConsumerRule {
            kind: kind.into(),
            consumer: boxed(consumer),
            terminator: boxed(terminator),
        }
    }
}

impl SyntaxRule for GreedyConsumerRule {
    fn try_match(&self, stream: &mut CharacterStream) -> MatchResult {
        let start = stream.location();
        let mut value = String::new();
        let mut matched = false;
        loop {
            let before = stream.position();
            match self.consumer.try_match(stream)? {
                Some(token) if stream.position() > before => {
                    value.push_str(&stream.text(token.span));
                    matched = true;
                }
                // A match that consumed nothing would repeat forever.
                Some(_) | None => {
                    stream.reset_to(before);
                    break;
                }
            }
        }
        if self.terminator.try_match(stream)?.is_none() {
            if !matched {
                return Ok(None);
            }
            return Err(LexingError::MissingTerminator(stream.span_from(start)));
        }
        Ok(Some(Token::new(self.kind.as_str(), value, stream.span_from(start))))
    }
}
