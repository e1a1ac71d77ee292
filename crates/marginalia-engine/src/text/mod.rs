//! Text-side model: spans, document snapshots and span remapping through edits.
//!
//! All offsets are UTF-16 code units. [`Document`] converts them to rope byte
//! offsets internally; [`TextIndex`] does the same for borrowed strings.

pub mod document;
pub mod index;
pub mod mapping;
pub mod span;

pub use document::{Document, TextEdit};
pub use index::TextIndex;
pub use mapping::{Bias, ChangeSet, EditRange};
pub use span::{Span, SpanError};
