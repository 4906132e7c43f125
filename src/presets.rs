//! Ready-made rule lists for a couple of small notations.
//!
//! Keyword and operator tables are plain constants handed to the rule
//! constructors, so a caller can build a variation of a preset from the same
//! pieces.
use std::collections::HashMap;
use std::sync::LazyLock;

use crate::lexer::DefaultLexer;
use crate::rules::{
    AlphaCharacterRule, CharacterRule, CharacterSet, CommentRule, IdentifierRule, NumberRule,
    StringRule, WordSet, boxed,
};
use crate::util::map;

/// Keywords of the scripting notation. Each one is only recognised when no
/// letter follows it, so `in` never swallows the start of `import`.
pub const SCRIPT_KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global",
    "if", "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return",
    "try", "while", "with", "yield",
];

/// Single-character operators of the scripting notation.
pub const SCRIPT_OPERATORS: &str = "+-*/%=<>!&|^~@";

/// Brackets of the scripting notation.
pub const SCRIPT_BRACKETS: &str = "()[]{}";

/// Delimiters of the scripting notation.
pub const SCRIPT_DELIMITERS: &str = "#,.:";

/// Characters skipped by the scripting notation. Newlines are tokens there.
pub const SCRIPT_IGNORED: &str = " ;\t\r";

/// Operators of the boolean algebra notation: `+` is or, `'` and `~` negate.
pub const ALGEBRA_OPERATORS: &str = "+'~";

/// Boolean algebra over single uppercase letters, e.g. `AB'+C(A+B)`.
#[must_use]
pub fn algebra() -> DefaultLexer {
    DefaultLexer::new(vec![
        boxed(AlphaCharacterRule::new()),
        boxed(CommentRule::new("#", '\n')),
        boxed(CharacterSet::new("Operator", ALGEBRA_OPERATORS)),
        boxed(CharacterRule::new("Assignment", '=')),
        boxed(CharacterSet::new("Scope", "()")),
    ])
}

/// A Python-like scripting notation with keywords, identifiers, numbers,
/// strings and newline tokens.
#[must_use]
pub fn script() -> DefaultLexer {
    DefaultLexer::new(vec![
        boxed(WordSet::new("keyword", SCRIPT_KEYWORDS.iter().copied())),
        boxed(IdentifierRule::new()),
        boxed(NumberRule::new()),
        boxed(CharacterSet::new("operator", SCRIPT_OPERATORS)),
        boxed(CharacterSet::new("bracket", SCRIPT_BRACKETS)),
        boxed(CharacterSet::new("delim", SCRIPT_DELIMITERS)),
        boxed(CharacterRule::new("newline", '\n')),
        boxed(StringRule::new()),
    ])
    .with_ignored(SCRIPT_IGNORED)
}

/// Constructor of a preset lexer.
pub type Preset = fn() -> DefaultLexer;

/// All presets by name.
pub static PRESETS: LazyLock<HashMap<&'static str, Preset>> = LazyLock::new(|| {
    map! { Preset;
        "algebra" => algebra,
        "script"  => script,
    }
});

/// Look up a preset by name and build its lexer.
#[must_use]
pub fn by_name(name: &str) -> Option<DefaultLexer> {
    PRESETS.get(name).map(|preset| preset())
}

#[cfg(test)]
mod test {
    use super::{algebra, by_name, script};
    use crate::token::TokenValue;

    fn kinds_and_values(lexer: &crate::lexer::DefaultLexer, source: &str) -> Vec<(String, String)> {
        lexer
            .tokenize(source)
            .expect("Tokenizing failed")
            .into_iter()
            .map(|token| (token.kind, token.value.to_string()))
            .collect()
    }

    #[test]
    fn algebra_expression() {
        let tokens = kinds_and_values(&algebra(), "ABCZ'+C'(AB)'");
        let rendered = tokens
            .iter()
            .map(|&(ref kind, ref value)| format!("{kind}:{value}"))
            .collect::<Vec<_>>();
        assert_eq!(
            rendered,
            vec![
                "Symbol:A", "Symbol:B", "Symbol:C", "Symbol:Z", "Operator:'", "Operator:+",
                "Symbol:C", "Operator:'", "Scope:(", "Symbol:A", "Symbol:B", "Scope:)",
                "Operator:'",
            ]
        );
    }

    #[test]
    fn algebra_comments_and_assignment() {
        let tokens = kinds_and_values(&algebra(), "# xor\nF = AB' + A'B");
        assert_eq!(tokens.first(), Some(&("Comment".to_owned(), " xor".to_owned())));
        assert_eq!(tokens.get(2), Some(&("Assignment".to_owned(), "=".to_owned())));
        assert_eq!(tokens.len(), 10);
    }

    #[test]
    fn script_definition() {
        let tokens = script()
            .tokenize("@cached\ndef area(r):\n    return 3 * r * r;\n")
            .expect("Tokenizing failed");
        let kinds = tokens.iter().map(|token| token.kind.as_str()).collect::<Vec<_>>();
        assert_eq!(
            kinds,
            vec![
                "operator", "symbol", "newline", "keyword", "symbol", "bracket", "symbol",
                "bracket", "delim", "newline", "keyword", "Number", "operator", "symbol",
                "operator", "symbol", "newline",
            ]
        );
        assert_eq!(tokens.get(11).map(|token| &token.value), Some(&TokenValue::Integer(3)));
    }

    #[test]
    fn script_keywords_need_a_word_boundary() {
        let tokens = kinds_and_values(&script(), "import inx in 'in'");
        assert_eq!(
            tokens,
            vec![
                ("keyword".to_owned(), "import".to_owned()),
                ("symbol".to_owned(), "inx".to_owned()),
                ("keyword".to_owned(), "in".to_owned()),
                ("string".to_owned(), "in".to_owned()),
            ]
        );
    }

    #[test]
    fn presets_are_found_by_name() {
        assert!(by_name("algebra").is_some(), "algebra preset");
        assert!(by_name("script").is_some(), "script preset");
        assert!(by_name("json").is_none(), "no json preset");
    }
}
