//! Errors that can occur while streaming characters, matching rules and
//! driving a tokenization, plus the errors of the command-line shell.
use std::io::Error as IOError;
use std::process::ExitCode;

use thiserror::Error;

use crate::types::{Location, Span};

/// Returned by a [`Stream`](crate::stream::Stream) when an item is read past
/// its end. Escaping a rule, this always indicates a bug in that rule, since
/// every rule must peek before it pops.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("attempted to read past the end of the stream at position {position}")]
#[expect(clippy::exhaustive_structs, reason = "a position is all there is to report.")]
pub struct EndOfStream {
    /// Cursor position at which the read was attempted.
    pub position: usize,
}

/// Errors that can happen during lexing. All of them are fatal to the
/// current tokenization; a rule that simply does not match returns `None`
/// instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LexingError {
    /// No rule matched at the given position.
    #[error("unknown symbol {symbol:?} at {location}")]
    UnknownSymbol {
        /// The character no rule accepted.
        symbol: char,
        /// Where that character is.
        location: Location,
    },
    /// A string was started but not terminated until the end of input.
    #[error("unterminated string starting at {0}")]
    UnterminatedString(Span),
    /// A backslash inside a string was followed by a character that cannot be escaped.
    #[error("invalid escape sequence '\\{escape}' at {location}")]
    InvalidEscape {
        /// The character after the backslash.
        escape: char,
        /// Where the backslash is.
        location: Location,
    },
    /// A comment was started but its terminator never showed up.
    #[error("unterminated comment starting at {0}")]
    UnterminatedComment(Span),
    /// A greedy rule consumed its body, but the terminator did not follow.
    #[error("missing terminator after {0}")]
    MissingTerminator(Span),
    /// A run of digits that does not fit into an `i64`.
    #[error("number {raw} at {span} is out of range")]
    NumberOutOfRange {
        /// The digits as they appeared in the source.
        raw: String,
        /// Where the digits are.
        span: Span,
    },
    /// A rule read past the end of the input.
    #[error("unexpected end of input at {0}")]
    UnexpectedEnd(Location),
    /// A rule reported a match, but did not consume anything.
    #[error("rule {rule} matched without consuming input at {location}")]
    EmptyMatch {
        /// Debug rendering of the offending rule.
        rule: String,
        /// Where the cursor was stuck.
        location: Location,
    },
}

/// An error that occurred inside the command-line shell.
///
/// To support the [`std::process::Termination`] trait, a
/// `From<EngineError> for ExitCode` implementation is provided that follows
/// the [`<sysexits.h>`](https://man.freebsd.org/cgi/man.cgi?query=sysexits&apropos=0&sektion=0&manpath=FreeBSD+4.3-RELEASE&format=html)
/// conventions.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EngineError {
    /// An error in how the tool is called.
    #[error("usage: {0}")]
    UsageError(String),
    /// The requested preset does not exist.
    #[error("unknown preset '{name}', available presets: {available}")]
    UnknownPreset {
        /// The name that was asked for.
        name: String,
        /// Comma separated list of valid names.
        available: String,
    },
    /// Errors that happened when trying to load the file
    /// or read the REPL line.
    #[error("error reading source: {0}")]
    FileError(#[from] IOError),
    /// Errors that happened during tokenization.
    #[error("error when tokenizing: {0}")]
    LexingError(#[from] LexingError),
}

impl From<EngineError> for ExitCode {
    fn from(value: EngineError) -> Self {
        ExitCode::from(match value {
            EngineError::UsageError(_) | EngineError::UnknownPreset { .. } => 64, // EX_USAGE
            EngineError::FileError(_) => 66,         // EX_NOINPUT
            EngineError::LexingError(_) => 65,       // EX_DATAERR
        })
    }
}

// Continuation helpers for the REPL

/// Whether an error occurred because the input was too short.
/// Such errors can be recoverable by allowing further input on the REPL.
pub trait UnterminatedError {
    /// Was this error caused by sudden end of input?
    fn is_unterminated(&self) -> bool;
}

impl UnterminatedError for EngineError {
    fn is_unterminated(&self) -> bool {
        match *self {
            EngineError::LexingError(ref err) => err.is_unterminated(),
            EngineError::UsageError(_)
            | EngineError::UnknownPreset { .. }
            | EngineError::FileError(_) => false,
        }
    }
}

impl UnterminatedError for LexingError {
    fn is_unterminated(&self) -> bool {
        match *self {
            LexingError::UnknownSymbol { .. }
            | LexingError::InvalidEscape { .. }
            | LexingError::NumberOutOfRange { .. }
            | LexingError::EmptyMatch { .. } => false,
            LexingError::UnterminatedString(_)
            | LexingError::UnterminatedComment(_)
            | LexingError::MissingTerminator(_)
            | LexingError::UnexpectedEnd(_) => true,
        }
    }
}

#[cfg(test)]
mod test {
    use super::{EngineError, LexingError, UnterminatedError};
    use crate::types::{Location, Span};

    #[test]
    fn unterminated_errors_ask_for_more_input() {
        let span = Span::from(Location::default(), Location::default());
        assert!(LexingError::UnterminatedString(span).is_unterminated(), "string");
        assert!(LexingError::UnterminatedComment(span).is_unterminated(), "comment");
        assert!(
            !LexingError::UnknownSymbol {
                symbol: '$',
                location: Location::default()
            }
            .is_unterminated(),
            "unknown symbols stay unknown"
        );
        assert!(
            EngineError::from(LexingError::UnexpectedEnd(Location::default())).is_unterminated(),
            "wrapped errors are classified as well"
        );
    }

    #[test]
    fn messages_name_the_position() {
        let err = LexingError::UnknownSymbol {
            symbol: '1',
            location: Location { line: 0, col: 1, offset: 1 },
        };
        assert_eq!(err.to_string(), "unknown symbol '1' at 0:1");
    }

    #[test]
    fn unknown_presets_list_alternatives() {
        let err = EngineError::UnknownPreset {
            name: "json".to_owned(),
            available: "algebra, script".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "unknown preset 'json', available presets: algebra, script"
        );
        assert!(!err.is_unterminated(), "usage errors are final");
    }
}
