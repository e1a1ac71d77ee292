use regex::{Captures, Regex};
use std::fmt;
use std::sync::Arc;

use super::joins::{co_occurrence_join, proximity_join};
use super::matchers::{list_match, pattern_match};
use super::quantity::Quantity;
use super::types::{Data, Highlight, RuleId, Value};
use crate::text::TextIndex;

/// Closure used by [`Enrichment::Custom`].
pub type EnrichFn = Arc<dyn Fn(&Captures<'_>) -> Data + Send + Sync>;

/// Post-processing applied to every pattern match to fill its `data`.
#[derive(Clone)]
pub enum Enrichment {
    /// Parse the matched text as a quantity (`amount`, `unit`).
    Quantity,
    /// Copy every named capture group into `data`.
    Captures,
    Custom(EnrichFn),
}

impl Enrichment {
    pub(crate) fn apply(&self, regex: &Regex, caps: &Captures<'_>) -> Data {
        match self {
            Enrichment::Quantity => caps
                .get(0)
                .and_then(|m| Quantity::parse(m.as_str()))
                .map(Quantity::into_data)
                .unwrap_or_default(),
            Enrichment::Captures => regex
                .capture_names()
                .flatten()
                .filter_map(|name| {
                    caps.name(name)
                        .map(|m| (name.to_string(), Value::from(m.as_str())))
                })
                .collect(),
            Enrichment::Custom(f) => f(caps),
        }
    }
}

impl fmt::Debug for Enrichment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Enrichment::Quantity => f.write_str("Quantity"),
            Enrichment::Captures => f.write_str("Captures"),
            Enrichment::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// A literal term and its compiled whole-word matcher.
#[derive(Debug, Clone)]
pub struct ListTerm {
    pub term: String,
    pub(crate) matcher: Regex,
}

#[derive(Debug, Clone)]
pub enum RuleKind {
    /// Case-insensitive whole-word literals; earlier terms win overlaps.
    List { terms: Vec<ListTerm> },
    /// Global regex. `regex` is `None` when the source failed to compile.
    Pattern {
        source: String,
        regex: Option<Regex>,
        enrichment: Option<Enrichment>,
    },
    /// Joins a `first` highlight immediately followed by a `second` one.
    Proximity {
        first: RuleId,
        second: RuleId,
        max_distance: usize,
    },
    /// Joins one highlight of each required rule found on the same line.
    CoOccurrence { required: Vec<RuleId> },
}

/// A named matching rule. Rules are pure: the same text and upstream
/// highlights always yield the same spans and data.
#[derive(Debug, Clone)]
pub struct Rule {
    pub id: RuleId,
    pub kind: RuleKind,
}

impl Rule {
    pub fn list<I, S>(id: impl Into<RuleId>, terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let id = id.into();
        let terms = terms
            .into_iter()
            .map(Into::into)
            .filter(|term: &String| !term.trim().is_empty())
            .filter_map(|term| match whole_word_matcher(&term) {
                Ok(matcher) => Some(ListTerm { term, matcher }),
                Err(e) => {
                    log::warn!("Rule '{id}': skipping term '{term}': {e}");
                    None
                }
            })
            .collect();
        Self {
            id,
            kind: RuleKind::List { terms },
        }
    }

    /// A regex rule. An invalid pattern is logged and matches nothing.
    pub fn pattern(id: impl Into<RuleId>, source: &str) -> Self {
        let id = id.into();
        let regex = match Regex::new(source) {
            Ok(regex) => Some(regex),
            Err(e) => {
                log::warn!("Rule '{id}': invalid pattern, rule will match nothing: {e}");
                None
            }
        };
        Self {
            id,
            kind: RuleKind::Pattern {
                source: source.to_string(),
                regex,
                enrichment: None,
            },
        }
    }

    /// Sets the enrichment step of a pattern rule. Other kinds are returned unchanged.
    pub fn with_enrichment(mut self, enrich: Enrichment) -> Self {
        if let RuleKind::Pattern { enrichment, .. } = &mut self.kind {
            *enrichment = Some(enrich);
        }
        self
    }

    pub fn proximity(
        id: impl Into<RuleId>,
        first: impl Into<RuleId>,
        second: impl Into<RuleId>,
        max_distance: usize,
    ) -> Self {
        Self {
            id: id.into(),
            kind: RuleKind::Proximity {
                first: first.into(),
                second: second.into(),
                max_distance,
            },
        }
    }

    pub fn co_occurrence<I, R>(id: impl Into<RuleId>, required: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<RuleId>,
    {
        Self {
            id: id.into(),
            kind: RuleKind::CoOccurrence {
                required: required.into_iter().map(Into::into).collect(),
            },
        }
    }

    /// Rule ids whose output this rule consumes.
    pub fn upstream(&self) -> Vec<&RuleId> {
        match &self.kind {
            RuleKind::List { .. } | RuleKind::Pattern { .. } => Vec::new(),
            RuleKind::Proximity { first, second, .. } => vec![first, second],
            RuleKind::CoOccurrence { required } => required.iter().collect(),
        }
    }

    /// Runs the rule over `index`'s text and the highlights produced so far.
    pub fn run(&self, index: &TextIndex<'_>, existing: &[Highlight]) -> Vec<Highlight> {
        match &self.kind {
            RuleKind::List { terms } => list_match(&self.id, terms, index),
            RuleKind::Pattern {
                regex, enrichment, ..
            } => match regex {
                Some(regex) => pattern_match(&self.id, regex, enrichment.as_ref(), index),
                None => Vec::new(),
            },
            RuleKind::Proximity {
                first,
                second,
                max_distance,
            } => proximity_join(&self.id, first, second, *max_distance, existing),
            RuleKind::CoOccurrence { required } => {
                co_occurrence_join(&self.id, required, index, existing)
            }
        }
    }
}

/// `\b` is only meaningful next to word characters, so it is added per side.
fn whole_word_matcher(term: &str) -> Result<Regex, regex::Error> {
    let is_word = |c: char| c.is_alphanumeric() || c == '_';
    let starts_word = term.chars().next().is_some_and(is_word);
    let ends_word = term.chars().last().is_some_and(is_word);

    let pattern = format!(
        "(?i){}{}{}",
        if starts_word { r"\b" } else { "" },
        regex::escape(term),
        if ends_word { r"\b" } else { "" },
    );
    Regex::new(&pattern)
}
