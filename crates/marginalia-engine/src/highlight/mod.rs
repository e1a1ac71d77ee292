//! Rule-based highlighting.
//!
//! A [`Pipeline`] runs [`Rule`]s in registration order over the document text.
//! Matching rules (list, pattern) read the text; join rules (proximity,
//! co-occurrence) combine highlights produced by earlier rules. The whole
//! pipeline is re-run on every text change.

mod joins;
mod matchers;
pub mod pipeline;
pub mod presets;
pub mod quantity;
pub mod rules;
pub mod types;

pub use pipeline::{Pipeline, PipelineError};
pub use quantity::Quantity;
pub use rules::{EnrichFn, Enrichment, Rule, RuleKind};
pub use types::{Data, Highlight, HighlightId, HighlightSet, RuleId, Value};
