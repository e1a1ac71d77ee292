use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

use crate::text::Span;

/// Identifier of a single highlight. Freshly generated on every pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HighlightId(Uuid);

impl HighlightId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for HighlightId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for HighlightId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Name of a registered rule, e.g. `"ingredient"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RuleId(String);

impl RuleId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RuleId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for RuleId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A value attached to a highlight by the rule that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => write!(f, "{n}"),
            Value::Text(s) => f.write_str(s),
        }
    }
}

pub type Data = BTreeMap<String, Value>;

/// A rule-produced candidate annotation over the text.
///
/// `refs` holds the upstream highlights a join rule combined, keyed by their
/// rule id. Rules only consume earlier rules' output, so refs never cycle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Highlight {
    pub id: HighlightId,
    pub rule_id: RuleId,
    pub span: Span,
    pub data: Data,
    pub refs: BTreeMap<RuleId, Highlight>,
}

impl Highlight {
    pub fn new(rule_id: RuleId, span: Span) -> Self {
        Self {
            id: HighlightId::new(),
            rule_id,
            span,
            data: Data::new(),
            refs: BTreeMap::new(),
        }
    }

    pub fn with_data(mut self, data: Data) -> Self {
        self.data = data;
        self
    }

    /// Compares rule, span, data and refs recursively, ignoring ids.
    pub fn same_content(&self, other: &Highlight) -> bool {
        self.rule_id == other.rule_id
            && self.span == other.span
            && self.data == other.data
            && self.refs.len() == other.refs.len()
            && self
                .refs
                .iter()
                .zip(other.refs.iter())
                .all(|((ka, a), (kb, b))| ka == kb && a.same_content(b))
    }
}

/// The output of one pipeline run, in rule registration order.
#[derive(Debug, Clone, Default)]
pub struct HighlightSet {
    items: Vec<Highlight>,
}

impl HighlightSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Highlight> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[Highlight] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn find(&self, id: HighlightId) -> Option<&Highlight> {
        self.items.iter().find(|h| h.id == id)
    }

    pub fn by_rule<'a>(&'a self, rule: &'a str) -> impl Iterator<Item = &'a Highlight> + 'a {
        self.items.iter().filter(move |h| h.rule_id.as_str() == rule)
    }
}

impl From<Vec<Highlight>> for HighlightSet {
    fn from(items: Vec<Highlight>) -> Self {
        Self { items }
    }
}

impl<'a> IntoIterator for &'a HighlightSet {
    type Item = &'a Highlight;
    type IntoIter = std::slice::Iter<'a, Highlight>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
