//! The driver that turns text into tokens by applying rules over and over.
//!
//! Between tokens, characters from the ignore set are skipped. At every other
//! position the rules are tried in the order the caller gave them, and the first
//! one that matches produces the next token. If none matches, tokenization stops
//! with an [`UnknownSymbol`](LexingError::UnknownSymbol) error.
//!
//! ```rust
//! use rulelex::lexer::tokenize;
//! use rulelex::rules::{AlphaCharacterRule, CommentRule, boxed};
//!
//! let rules = [boxed(CommentRule::new("#", '\n')), boxed(AlphaCharacterRule::new())];
//! let tokens = tokenize("#hi\nAB", &rules, " \t\n").expect("valid input");
//! assert_eq!(tokens.len(), 3);
//! ```
use tracing::{debug, trace};

use crate::errors::LexingError;
use crate::rules::{BoxedRule, SyntaxRule};
use crate::stream::{CharacterStream, TokenStream};
use crate::token::Token;

/// Characters skipped between tokens unless configured otherwise.
pub const DEFAULT_IGNORED: &str = " \t\n";

/// An ordered rule list plus an ignore set, ready to tokenize any number of
/// inputs. Tokenizing does not modify the lexer, so one lexer can be shared
/// between threads.
#[derive(Debug)]
pub struct DefaultLexer {
    /// Rules, in priority order.
    rules: Vec<BoxedRule>,
    /// Characters skipped between tokens.
    ignored: Vec<char>,
}

impl DefaultLexer {
    /// A lexer trying `rules` in the given order, skipping [`DEFAULT_IGNORED`].
    #[must_use]
    pub fn new(rules: Vec<BoxedRule>) -> Self {
        DefaultLexer {
            rules,
            ignored: DEFAULT_IGNORED.chars().collect(),
        }
    }

    /// Replace the set of characters skipped between tokens.
    #[must_use]
    pub fn with_ignored(mut self, ignored: &str) -> Self {
        self.ignored = ignored.chars().collect();
        self
    }

    /// The rules, in priority order.
    #[must_use]
    pub fn rules(&self) -> &[BoxedRule] {
        &self.rules
    }

    /// The characters skipped between tokens.
    #[must_use]
    pub fn ignored(&self) -> &[char] {
        &self.ignored
    }

    /// Tokenize `source` completely.
    ///
    /// # Errors
    ///
    /// The first [`LexingError`] encountered; no partial result is returned.
    pub fn tokenize(&self, source: &str) -> Result<Vec<Token>, LexingError> {
        run(&mut CharacterStream::new(source), &self.rules, &self.ignored)
    }

    /// Like [`DefaultLexer::tokenize`], wrapped up for a parser to consume.
    ///
    /// # Errors
    ///
    /// The first [`LexingError`] encountered.
    pub fn tokenize_stream(&self, source: &str) -> Result<TokenStream, LexingError> {
        self.tokenize(source).map(TokenStream::new)
    }
}

/// Tokenize `source` with `rules` in the given order, skipping the characters
/// of `ignored` between tokens.
///
/// # Errors
///
/// The first [`LexingError`] encountered; no partial result is returned.
pub fn tokenize<R: SyntaxRule>(
    source: &str,
    rules: &[R],
    ignored: &str,
) -> Result<Vec<Token>, LexingError> {
    let ignored = ignored.chars().collect::<Vec<_>>();
    run(&mut CharacterStream::new(source), rules, &ignored)
}

/// The tokenization loop shared by all entry points.
fn run<R: SyntaxRule>(
    stream: &mut CharacterStream,
    rules: &[R],
    ignored: &[char],
) -> Result<Vec<Token>, LexingError> {
    debug!(chars = stream.len(), rules = rules.len(), "tokenizing");
    let mut tokens = Vec::new();

    'tokens: loop {
        while stream.pop_if(|c| ignored.contains(&c)).is_some() {
            // skip
        }
        let Some(symbol) = stream.peek() else {
            break;
        };

        let start = stream.position();
        for rule in rules {
            match rule.try_match(stream) {
                Ok(Some(token)) => {
                    if stream.position() == start {
                        return Err(fail(LexingError::EmptyMatch {
                            rule: format!("{rule:?}"),
                            location: stream.location(),
                        }));
                    }
                    trace!(%token, "matched");
                    tokens.push(token);
                    continue 'tokens;
                }
                Ok(None) => {
                    debug_assert_eq!(
                        stream.position(),
                        start,
                        "{rule:?} consumed input without matching"
                    );
                }
                Err(err) => return Err(fail(err)),
            }
        }

        return Err(fail(LexingError::UnknownSymbol {
            symbol,
            location: stream.location(),
        }));
    }

    debug!(tokens = tokens.len(), "tokenizing finished");
    Ok(tokens)
}

/// Log a fatal error on its way out.
fn fail(err: LexingError) -> LexingError {
    debug!(error = %err, "tokenizing failed");
    err
}

#[cfg(test)]
mod test {
    use std::thread;

    use super::{DefaultLexer, tokenize};
    use crate::errors::LexingError;
    use crate::rules::{
        AlphaCharacterRule, BoxedRule, CharacterSet, CommentRule, CompoundRule, IdentifierRule,
        NumberRule, StringRule, WordRule, WordSet, boxed,
    };
    use crate::token::{Token, TokenValue};
    use crate::types::Location;

    fn pairs(tokens: Vec<Token>) -> Vec<(String, TokenValue)> {
        tokens
            .into_iter()
            .map(|token| (token.kind, token.value))
            .collect()
    }

    fn pair(kind: &str, value: impl Into<TokenValue>) -> (String, TokenValue) {
        (kind.to_owned(), value.into())
    }

    fn tokenize_no_spans(rules: Vec<BoxedRule>, source: &str) -> Vec<(String, TokenValue)> {
        pairs(
            DefaultLexer::new(rules)
                .tokenize(source)
                .expect("Tokenizing failed"),
        )
    }

    fn script_lexer() -> DefaultLexer {
        DefaultLexer::new(vec![
            boxed(CommentRule::new("#", '\n')),
            boxed(WordSet::new("keyword", ["if", "else", "while"])),
            boxed(IdentifierRule::new()),
            boxed(NumberRule::new()),
            boxed(StringRule::new()),
            boxed(CharacterSet::new("operator", "+-*/=<>")),
            boxed(CharacterSet::new("bracket", "()")),
        ])
    }

    #[test]
    fn keywords_win_over_identifiers() {
        let rules = || vec![boxed(WordRule::new("keyword", "if")), boxed(IdentifierRule::new())];
        assert_eq!(tokenize_no_spans(rules(), "if"), vec![pair("keyword", "if")]);
        assert_eq!(tokenize_no_spans(rules(), "ifx"), vec![pair("symbol", "ifx")]);
    }

    #[test]
    fn identifiers_first_shadow_keywords() {
        let rules = vec![boxed(IdentifierRule::new()), boxed(WordRule::new("keyword", "if"))];
        assert_eq!(tokenize_no_spans(rules, "if"), vec![pair("symbol", "if")]);
    }

    #[test]
    fn numbers_are_parsed() {
        assert_eq!(
            tokenize_no_spans(vec![boxed(NumberRule::new())], "123"),
            vec![pair("Number", 123_i64)]
        );
        assert_eq!(
            tokenize_no_spans(
                vec![boxed(NumberRule::new()), boxed(IdentifierRule::new())],
                "12a"
            ),
            vec![pair("Number", 12_i64), pair("symbol", "a")]
        );
    }

    #[test]
    fn strings_are_unescaped() {
        assert_eq!(
            tokenize_no_spans(vec![boxed(StringRule::new())], r#""a\"b""#),
            vec![pair("string", "a\"b")]
        );
        let result = DefaultLexer::new(vec![boxed(StringRule::new())]).tokenize("\"unterminated");
        assert!(
            matches!(result, Err(LexingError::UnterminatedString(_))),
            "got {result:?}"
        );
    }

    #[test]
    fn comments_are_tokens() {
        assert_eq!(
            tokenize_no_spans(
                vec![boxed(CommentRule::new("#", '\n')), boxed(AlphaCharacterRule::new())],
                "#hi\nAB"
            ),
            vec![pair("Comment", "hi"), pair("Symbol", "A"), pair("Symbol", "B")]
        );
    }

    #[test]
    fn unmatched_characters_are_fatal() {
        let rules = [AlphaCharacterRule::new()];
        assert_eq!(
            tokenize("A1", &rules, " \t\n"),
            Err(LexingError::UnknownSymbol {
                symbol: '1',
                location: Location { line: 0, col: 1, offset: 1 },
            })
        );
    }

    #[test]
    fn ignored_characters_are_skipped() {
        let rules = vec![boxed(AlphaCharacterRule::new())];
        assert_eq!(
            tokenize_no_spans(rules, " \tA\n\n B  "),
            vec![pair("Symbol", "A"), pair("Symbol", "B")]
        );
        assert!(
            tokenize_no_spans(vec![boxed(AlphaCharacterRule::new())], "  \n").is_empty(),
            "only ignored characters"
        );
        assert!(
            tokenize_no_spans(vec![boxed(AlphaCharacterRule::new())], "").is_empty(),
            "empty input"
        );
    }

    #[test]
    fn ignore_set_is_configurable() {
        let lexer = DefaultLexer::new(vec![boxed(AlphaCharacterRule::new())]).with_ignored(";");
        assert_eq!(
            pairs(lexer.tokenize("A;;B").expect("semicolons are skipped")),
            vec![pair("Symbol", "A"), pair("Symbol", "B")]
        );
        assert!(
            matches!(lexer.tokenize("A B"), Err(LexingError::UnknownSymbol { symbol: ' ', .. })),
            "spaces are no longer ignored"
        );
    }

    #[test]
    fn spans_locate_tokens() {
        let tokens = script_lexer()
            .tokenize("if x\n  y = 10")
            .expect("valid script");
        let spans = tokens
            .iter()
            .map(|token| (token.span.start.line, token.span.start.col, token.span.len()))
            .collect::<Vec<_>>();
        assert_eq!(spans, vec![(0, 0, 2), (0, 3, 1), (1, 2, 1), (1, 4, 1), (1, 6, 2)]);
    }

    #[test]
    fn tokenizing_is_deterministic() {
        let lexer = script_lexer();
        let source = "while x < 10 # loop\n  x = x + 'one'\n";
        assert_eq!(lexer.tokenize(source), lexer.tokenize(source));
    }

    #[test]
    fn tokens_and_ignored_runs_cover_the_input() {
        let lexer = script_lexer();
        for source in [
            "if (a) b = 1 else c = \"two\"\n",
            "  x#c\n\ty",
            "while 1 if 2 else 3",
            "",
        ] {
            let tokens = lexer.tokenize(source).expect("valid script");
            let chars = source.chars().collect::<Vec<_>>();
            let mut rebuilt = String::new();
            let mut offset = 0;
            for token in &tokens {
                let gap = chars.get(offset..token.span.start.offset).expect("gap in bounds");
                assert!(
                    gap.iter().all(|c| lexer.ignored().contains(c)),
                    "{gap:?} before {token} is not ignorable"
                );
                let matched = chars
                    .get(token.span.start.offset..token.span.end.offset)
                    .expect("span in bounds");
                rebuilt.extend(gap);
                rebuilt.extend(matched);
                offset = token.span.end.offset;
            }
            let rest = chars.get(offset..).expect("rest in bounds");
            assert!(rest.iter().all(|c| lexer.ignored().contains(c)), "trailing {rest:?}");
            rebuilt.extend(rest);
            assert_eq!(rebuilt, source);
        }
    }

    #[test]
    fn empty_matches_are_rejected() {
        let rules = vec![boxed(CompoundRule::new("empty", Vec::new()))];
        let result = DefaultLexer::new(rules).tokenize("x");
        assert!(
            matches!(result, Err(LexingError::EmptyMatch { .. })),
            "got {result:?}"
        );
    }

    #[test]
    fn fatal_errors_abort_the_whole_call() {
        let result = script_lexer().tokenize("x = 1 # no newline");
        assert!(
            matches!(result, Err(LexingError::UnterminatedComment(_))),
            "got {result:?}"
        );
    }

    #[test]
    fn token_stream_hands_tokens_to_a_parser() {
        let mut tokens = script_lexer()
            .tokenize_stream("x = 1")
            .expect("valid script");
        assert_eq!(tokens.peek_kind(), Some("symbol"));
        assert_eq!(tokens.lookahead(2).len(), 2);
        let kinds = tokens.by_ref().map(|token| token.kind).collect::<Vec<_>>();
        assert_eq!(kinds, vec!["symbol", "operator", "Number"]);
        assert!(tokens.pop().is_err(), "stream is drained");
    }

    #[test]
    fn one_lexer_serves_many_threads() {
        let lexer = &script_lexer();
        let sources = ["if a", "b = 2", "while c", "'s'"];
        thread::scope(|scope| {
            let handles = sources
                .iter()
                .map(|&source| scope.spawn(move || lexer.tokenize(source)))
                .collect::<Vec<_>>();
            for (handle, source) in handles.into_iter().zip(sources) {
                let tokens = handle.join().expect("thread finished");
                assert_eq!(tokens, lexer.tokenize(source), "{source}");
            }
        });
    }
}
