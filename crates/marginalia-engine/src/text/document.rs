use serde::{Deserialize, Serialize};
use std::fmt;
use xi_rope::{Rope, delta::Builder, rope::Utf16CodeUnitsMetric};

use super::mapping::{ChangeSet, EditRange};
use super::span::{Span, SpanError};

/// A single replacement, in UTF-16 code units of the document it applies to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextEdit {
    pub from: usize,
    pub to: usize,
    pub insert: String,
}

impl TextEdit {
    pub fn insert(at: usize, text: impl Into<String>) -> Self {
        Self {
            from: at,
            to: at,
            insert: text.into(),
        }
    }

    pub fn delete(from: usize, to: usize) -> Self {
        Self {
            from,
            to,
            insert: String::new(),
        }
    }

    pub fn replace(from: usize, to: usize, text: impl Into<String>) -> Self {
        Self {
            from,
            to,
            insert: text.into(),
        }
    }

    /// Length of the inserted text in UTF-16 code units.
    pub fn inserted_len(&self) -> usize {
        self.insert.encode_utf16().count()
    }
}

/// Immutable snapshot of the document text.
///
/// Each edit transaction produces a new snapshot with a higher version; the
/// rope buffer is shared between snapshots so cloning is cheap.
#[derive(Clone)]
pub struct Document {
    /// Text buffer; offsets at the public boundary are UTF-16 code units
    buffer: Rope,
    version: u64,
}

impl Document {
    pub fn new(text: &str) -> Self {
        Self {
            buffer: Rope::from(text),
            version: 0,
        }
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn text(&self) -> String {
        self.buffer.to_string()
    }

    /// Length in UTF-16 code units.
    pub fn len(&self) -> usize {
        self.buffer.count::<Utf16CodeUnitsMetric>(self.buffer.len())
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.len() == 0
    }

    /// Text covered by `span`. Fails if the span runs past the end of the document
    /// or either end falls inside a surrogate pair.
    pub fn slice(&self, span: Span) -> Result<String, SpanError> {
        let (start, end) = self.byte_range(span)?;
        Ok(self.buffer.slice_to_cow(start..end).into_owned())
    }

    /// Zero-based line containing the UTF-16 offset.
    pub fn line_of(&self, offset: usize) -> usize {
        let offset = offset.min(self.len());
        self.buffer.line_of_offset(self.byte_offset(offset))
    }

    /// Applies one edit transaction, returning the next snapshot and the position mapping.
    ///
    /// Edits must be ordered, non-overlapping and expressed against this snapshot.
    /// Edits that re-insert the text they replace are dropped, so mapping through
    /// them leaves every span untouched.
    pub fn apply(&self, edits: &[TextEdit]) -> Result<(Document, ChangeSet), SpanError> {
        let len = self.len();
        let mut last_end = 0;
        let mut ranges = Vec::with_capacity(edits.len());
        let mut builder = Builder::new(self.buffer.len());

        for edit in edits {
            let span = Span::new(edit.from, edit.to)?;
            if span.to > len {
                return Err(SpanError::OutOfBounds { span, len });
            }
            if span.from < last_end {
                return Err(SpanError::UnorderedEdits { at: span.from });
            }
            last_end = span.to;

            if self.slice(span)? == edit.insert {
                continue;
            }

            let (start, end) = self.byte_range(span)?;
            builder.replace(start..end, Rope::from(edit.insert.as_str()));
            ranges.push(EditRange {
                from: span.from,
                to: span.to,
                inserted_len: edit.inserted_len(),
            });
        }

        let buffer = if ranges.is_empty() {
            self.buffer.clone()
        } else {
            builder.build().apply(&self.buffer)
        };

        let next = Document {
            buffer,
            version: self.version + 1,
        };
        Ok((next, ChangeSet::new(ranges)?))
    }

    fn byte_offset(&self, utf16: usize) -> usize {
        self.buffer.count_base_units::<Utf16CodeUnitsMetric>(utf16)
    }

    /// Like [`Self::byte_offset`], but rejects offsets the rope would round to
    /// the end of a non-BMP char.
    fn boundary_byte_offset(&self, utf16: usize) -> Result<usize, SpanError> {
        let byte = self.byte_offset(utf16);
        if self.buffer.count::<Utf16CodeUnitsMetric>(byte) != utf16 {
            return Err(SpanError::NotCharBoundary { offset: utf16 });
        }
        Ok(byte)
    }

    fn byte_range(&self, span: Span) -> Result<(usize, usize), SpanError> {
        let len = self.len();
        if span.from > span.to {
            return Err(SpanError::InvalidSpan {
                from: span.from,
                to: span.to,
            });
        }
        if span.to > len {
            return Err(SpanError::OutOfBounds { span, len });
        }
        Ok((
            self.boundary_byte_offset(span.from)?,
            self.boundary_byte_offset(span.to)?,
        ))
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("version", &self.version)
            .field("len", &self.len())
            .finish()
    }
}

impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        // Rope nodes don't implement PartialEq, compare the text instead
        self.version == other.version && self.buffer.to_string() == other.buffer.to_string()
    }
}
