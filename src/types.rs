//! Position types shared by the streams, the tokens and the errors, mostly
//! in an auxiliary fashion to support (better) error reporting.

use core::cmp::Ordering;
use core::fmt::{Display, Formatter};

/// A Location consists of a line and column position, plus the absolute
/// character offset into the source text.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[expect(
    clippy::exhaustive_structs,
    reason = "Locations are always line+col+offset, anything else is a breaking change."
)]
pub struct Location {
    /// Line of the location, 0-indexed.
    pub line: usize,
    /// Column of the location, 0-indexed.
    pub col: usize,
    /// Offset in characters (not bytes) from the start of the input.
    pub offset: usize,
}

impl PartialOrd for Location {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Location {
    fn cmp(&self, other: &Self) -> Ordering {
        self.offset.cmp(&other.offset)
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

/// Source Spans define which characters of the input an element covers,
/// given both their start and end positions as [`Locations`](Location).
/// The start is inclusive, the end is exclusive.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub struct Span {
    /// Start of the Span
    pub start: Location,
    /// End of the Span, one past the last covered character
    pub end: Location,
}

impl Span {
    /// Construct a source span from given start and end positions
    #[must_use]
    pub const fn from(start: Location, end: Location) -> Self {
        Span { start, end }
    }

    /// Number of characters covered by this span.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end.offset.saturating_sub(self.start.offset)
    }

    /// Whether this span covers no characters at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Smallest span covering both `self` and `other`.
    #[must_use]
    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

impl Display for Span {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

#[cfg(test)]
mod test {
    use super::{Location, Span};

    fn loc(line: usize, col: usize, offset: usize) -> Location {
        Location { line, col, offset }
    }

    #[test]
    fn spans_measure_characters() {
        let span = Span::from(loc(0, 2, 2), loc(1, 1, 6));
        assert_eq!(span.len(), 4, "offsets 2..6");
        assert!(!span.is_empty(), "span is not empty");
        assert_eq!(span.to_string(), "0:2-1:1");
    }

    #[test]
    fn merge_covers_both() {
        let first = Span::from(loc(0, 0, 0), loc(0, 3, 3));
        let second = Span::from(loc(0, 5, 5), loc(0, 7, 7));
        let merged = second.merge(first);
        assert_eq!(merged, Span::from(loc(0, 0, 0), loc(0, 7, 7)));
    }

    #[test]
    fn empty_span_displays_single_location() {
        let span = Span::from(loc(2, 4, 10), loc(2, 4, 10));
        assert!(span.is_empty(), "zero-width span");
        assert_eq!(span.to_string(), "2:4");
    }
}
