use std::collections::BTreeMap;

use super::types::{Data, Highlight, RuleId};
use crate::text::{Span, TextIndex};

/// Joins each `first` highlight immediately followed by a `second` highlight.
///
/// The union of both inputs is sorted by start offset and scanned pairwise.
/// A pair joins when the gap between them is positive and below
/// `max_distance`. Joined items are consumed, so the scan is greedy from the
/// left and never reuses an item.
pub(crate) fn proximity_join(
    rule_id: &RuleId,
    first: &RuleId,
    second: &RuleId,
    max_distance: usize,
    existing: &[Highlight],
) -> Vec<Highlight> {
    let mut candidates: Vec<&Highlight> = existing
        .iter()
        .filter(|h| h.rule_id == *first || h.rule_id == *second)
        .collect();
    candidates.sort_by_key(|h| h.span.from);

    let mut out = Vec::new();
    let mut i = 0;
    while i + 1 < candidates.len() {
        let (a, b) = (candidates[i], candidates[i + 1]);
        let gap = b.span.from.checked_sub(a.span.to);
        let joins = a.rule_id == *first
            && b.rule_id == *second
            && gap.is_some_and(|gap| gap > 0 && gap < max_distance);

        if let Some(highlight) = joins.then(|| joined(rule_id, &[a, b])).flatten() {
            out.push(highlight);
            i += 2;
        } else {
            i += 1;
        }
    }
    out
}

/// Joins one highlight of every required rule that start on the same line.
///
/// A line only produces output when each required rule has exactly one match
/// starting on it.
pub(crate) fn co_occurrence_join(
    rule_id: &RuleId,
    required: &[RuleId],
    index: &TextIndex<'_>,
    existing: &[Highlight],
) -> Vec<Highlight> {
    let mut lines: BTreeMap<usize, BTreeMap<&RuleId, Vec<&Highlight>>> = BTreeMap::new();
    for h in existing.iter().filter(|h| required.contains(&h.rule_id)) {
        lines
            .entry(index.line_of(h.span.from))
            .or_default()
            .entry(&h.rule_id)
            .or_default()
            .push(h);
    }

    lines
        .values()
        .filter_map(|by_rule| {
            let parts: Option<Vec<&Highlight>> = required
                .iter()
                .map(|rule| match by_rule.get(rule).map(Vec::as_slice) {
                    Some([only]) => Some(*only),
                    _ => None,
                })
                .collect();
            joined(rule_id, &parts?)
        })
        .collect()
}

/// Builds a highlight spanning all `parts`, with data merged (earlier parts win)
/// and refs keyed by each part's rule id.
fn joined(rule_id: &RuleId, parts: &[&Highlight]) -> Option<Highlight> {
    let span = Span::union(parts.iter().map(|h| h.span))?;

    let mut data = Data::new();
    for part in parts {
        for (key, value) in &part.data {
            data.entry(key.clone()).or_insert_with(|| value.clone());
        }
    }

    let mut highlight = Highlight::new(rule_id.clone(), span).with_data(data);
    for part in parts {
        highlight
            .refs
            .insert(part.rule_id.clone(), (*part).clone());
    }
    Some(highlight)
}
