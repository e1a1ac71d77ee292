use serde::{Deserialize, Serialize};
use std::fmt;

/// Errors raised by span construction and span lookups.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpanError {
    #[error("Invalid span: from {from} is after to {to}")]
    InvalidSpan { from: usize, to: usize },
    #[error("Span {span} is outside the document (length {len})")]
    OutOfBounds { span: Span, len: usize },
    #[error("Edits overlap or are out of order at offset {at}")]
    UnorderedEdits { at: usize },
    #[error("Offset {offset} splits a surrogate pair")]
    NotCharBoundary { offset: usize },
}

/// A half-open range `[from, to)` of UTF-16 code units into one document snapshot.
///
/// Spans carry no reference to the snapshot that produced them; callers must
/// remap them through every [`ChangeSet`](super::ChangeSet) before reading the
/// next snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Span {
    /// Inclusive start offset.
    pub from: usize,
    /// Exclusive end offset.
    pub to: usize,
}

impl Span {
    /// Creates a span, failing when `from > to`.
    ///
    /// Never clamps: an inverted range is a caller bug.
    pub fn new(from: usize, to: usize) -> Result<Self, SpanError> {
        if from > to {
            return Err(SpanError::InvalidSpan { from, to });
        }
        Ok(Self { from, to })
    }

    /// A zero-length span at `at`.
    pub const fn empty(at: usize) -> Self {
        Self { from: at, to: at }
    }

    #[must_use]
    pub fn len(self) -> usize {
        self.to.saturating_sub(self.from)
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// True iff the two half-open intervals share at least one offset.
    pub fn overlaps(self, other: Span) -> bool {
        self.from < other.to && other.from < self.to
    }

    /// True when one span ends exactly where the other starts.
    pub fn is_adjacent(self, other: Span) -> bool {
        self.to == other.from || other.to == self.from
    }

    pub fn contains(self, offset: usize) -> bool {
        offset >= self.from && offset < self.to
    }

    /// Smallest span covering every input span. `None` for an empty input.
    pub fn union<I>(spans: I) -> Option<Span>
    where
        I: IntoIterator<Item = Span>,
    {
        spans.into_iter().reduce(|acc, sp| Span {
            from: acc.from.min(sp.from),
            to: acc.to.max(sp.to),
        })
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.from, self.to)
    }
}
