use regex::Regex;

use super::rules::{Enrichment, ListTerm};
use super::types::{Data, Highlight, RuleId, Value};
use crate::text::TextIndex;

/// Finds every whole-word occurrence of each term, in list order then text order.
///
/// A candidate overlapping any match accepted before it is dropped, so the
/// result never contains two overlapping spans. Output is sorted by position.
pub(crate) fn list_match(
    rule_id: &RuleId,
    terms: &[ListTerm],
    index: &TextIndex<'_>,
) -> Vec<Highlight> {
    let mut accepted: Vec<Highlight> = Vec::new();

    for ListTerm { term, matcher } in terms {
        for m in matcher.find_iter(index.text()) {
            let span = index.span_of(m.range());
            if span.is_empty() || accepted.iter().any(|h| h.span.overlaps(span)) {
                continue;
            }
            let mut data = Data::new();
            data.insert("term".to_string(), Value::from(term.as_str()));
            accepted.push(Highlight::new(rule_id.clone(), span).with_data(data));
        }
    }

    accepted.sort_by_key(|h| h.span);
    accepted
}

/// One highlight per non-empty regex match, optionally enriched.
pub(crate) fn pattern_match(
    rule_id: &RuleId,
    regex: &Regex,
    enrichment: Option<&Enrichment>,
    index: &TextIndex<'_>,
) -> Vec<Highlight> {
    regex
        .captures_iter(index.text())
        .filter_map(|caps| {
            let m = caps.get(0)?;
            if m.is_empty() {
                return None;
            }
            let data = enrichment
                .map(|e| e.apply(regex, &caps))
                .unwrap_or_default();
            Some(Highlight::new(rule_id.clone(), index.span_of(m.range())).with_data(data))
        })
        .collect()
}
