use super::span::{Span, SpanError};

/// Which side of an edit a mapped position sticks to.
///
/// Span starts map with [`Bias::Start`] and span ends with [`Bias::End`]. A
/// start touching an edit moves past the inserted text, an end touching an
/// edit stays before it, so spans never absorb text inserted at their edges
/// and adjacent spans stay ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bias {
    Start,
    End,
}

/// One replaced range, in the coordinates of the document it was applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditRange {
    pub from: usize,
    pub to: usize,
    /// Length of the replacement text in UTF-16 code units.
    pub inserted_len: usize,
}

impl EditRange {
    fn shift(&self) -> isize {
        self.inserted_len as isize - (self.to - self.from) as isize
    }
}

/// Position mapping produced by one edit transaction.
///
/// Edits are ordered, non-overlapping and all expressed against the
/// pre-edit document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    edits: Vec<EditRange>,
}

impl ChangeSet {
    pub fn new(edits: Vec<EditRange>) -> Result<Self, SpanError> {
        let mut last_end = 0;
        for edit in &edits {
            if edit.from > edit.to {
                return Err(SpanError::InvalidSpan {
                    from: edit.from,
                    to: edit.to,
                });
            }
            if edit.from < last_end {
                return Err(SpanError::UnorderedEdits { at: edit.from });
            }
            last_end = edit.to;
        }
        Ok(Self { edits })
    }

    /// A change set that maps every position to itself.
    pub fn identity() -> Self {
        Self::default()
    }

    pub fn is_identity(&self) -> bool {
        self.edits.is_empty()
    }

    pub fn edits(&self) -> &[EditRange] {
        &self.edits
    }

    /// Maps a pre-edit position into the post-edit document.
    pub fn map_position(&self, pos: usize, bias: Bias) -> usize {
        let mut pos = pos;
        let mut shift = 0isize;

        match bias {
            Bias::Start => {
                for edit in &self.edits {
                    if pos < edit.from {
                        break;
                    }
                    // Inside or touching: stick to the end of the replacement
                    pos = pos.max(edit.to);
                    shift += edit.shift();
                }
            }
            Bias::End => {
                for edit in &self.edits {
                    if pos <= edit.from {
                        break;
                    }
                    if pos <= edit.to {
                        return edit.from.saturating_add_signed(shift);
                    }
                    shift += edit.shift();
                }
            }
        }

        pos.saturating_add_signed(shift)
    }

    /// Maps a span, clamping a degenerate result to a zero-length span at its start.
    pub fn map_span(&self, span: Span) -> Span {
        if self.is_identity() {
            return span;
        }
        let from = self.map_position(span.from, Bias::Start);
        let to = self.map_position(span.to, Bias::End);
        if from > to {
            Span::empty(from)
        } else {
            Span { from, to }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn changes(edits: &[(usize, usize, usize)]) -> ChangeSet {
        ChangeSet::new(
            edits
                .iter()
                .map(|&(from, to, inserted_len)| EditRange {
                    from,
                    to,
                    inserted_len,
                })
                .collect(),
        )
        .unwrap()
    }

    fn sp(from: usize, to: usize) -> Span {
        Span { from, to }
    }

    #[test]
    fn rejects_unordered_edits() {
        let result = ChangeSet::new(vec![
            EditRange {
                from: 10,
                to: 12,
                inserted_len: 0,
            },
            EditRange {
                from: 5,
                to: 6,
                inserted_len: 0,
            },
        ]);
        assert_eq!(result, Err(SpanError::UnorderedEdits { at: 5 }));
    }

    #[test]
    fn rejects_inverted_edit() {
        let result = ChangeSet::new(vec![EditRange {
            from: 4,
            to: 2,
            inserted_len: 1,
        }]);
        assert_eq!(result, Err(SpanError::InvalidSpan { from: 4, to: 2 }));
    }

    // ============ Position mapping ============

    #[rstest]
    #[case(3, Bias::Start, 3)]
    #[case(3, Bias::End, 3)]
    #[case(12, Bias::Start, 15)]
    #[case(12, Bias::End, 15)]
    fn positions_outside_an_insertion(#[case] pos: usize, #[case] bias: Bias, #[case] at: usize) {
        let cs = changes(&[(10, 10, 3)]);
        assert_eq!(cs.map_position(pos, bias), at);
    }

    #[test]
    fn insertion_point_depends_on_bias() {
        let cs = changes(&[(10, 10, 3)]);
        assert_eq!(cs.map_position(10, Bias::Start), 13);
        assert_eq!(cs.map_position(10, Bias::End), 10);
    }

    #[rstest]
    #[case(5, Bias::Start, 5)]
    #[case(7, Bias::Start, 5)]
    #[case(10, Bias::Start, 5)]
    #[case(7, Bias::End, 5)]
    #[case(10, Bias::End, 5)]
    #[case(15, Bias::End, 10)]
    fn positions_inside_a_deletion_collapse(
        #[case] pos: usize,
        #[case] bias: Bias,
        #[case] at: usize,
    ) {
        let cs = changes(&[(5, 10, 0)]);
        assert_eq!(cs.map_position(pos, bias), at);
    }

    #[test]
    fn replacement_collapses_to_either_side() {
        // [5, 10) replaced by 2 units
        let cs = changes(&[(5, 10, 2)]);
        assert_eq!(cs.map_position(7, Bias::Start), 7);
        assert_eq!(cs.map_position(7, Bias::End), 5);
    }

    #[test]
    fn shifts_accumulate_across_edits() {
        let cs = changes(&[(0, 2, 0), (4, 4, 5)]);
        assert_eq!(cs.map_position(3, Bias::Start), 1);
        assert_eq!(cs.map_position(6, Bias::Start), 9);
    }

    #[test]
    fn start_bias_skips_consecutive_insertions() {
        let cs = changes(&[(4, 4, 2), (4, 4, 3)]);
        assert_eq!(cs.map_position(4, Bias::Start), 9);
        assert_eq!(cs.map_position(4, Bias::End), 4);
    }

    // ============ Span mapping ============

    #[test]
    fn span_bracketing_a_deletion_shrinks() {
        let cs = changes(&[(3, 8, 0)]);
        assert_eq!(cs.map_span(sp(2, 9)), sp(2, 4));
    }

    #[test]
    fn span_overlapping_deletion_start_is_trimmed() {
        let cs = changes(&[(3, 8, 0)]);
        assert_eq!(cs.map_span(sp(5, 10)), sp(3, 5));
    }

    #[test]
    fn span_inside_replacement_becomes_empty_at_start() {
        let cs = changes(&[(3, 8, 8)]);
        // from -> 11, to -> 3, clamped to a zero-length span at 11
        assert_eq!(cs.map_span(sp(5, 7)), Span::empty(11));
    }

    #[test]
    fn insertions_at_span_edges_are_not_absorbed() {
        let cs = changes(&[(2, 2, 4), (6, 6, 1)]);
        assert_eq!(cs.map_span(sp(2, 6)), sp(6, 10));
    }

    #[test]
    fn identity_changeset_keeps_spans() {
        let cs = ChangeSet::identity();
        assert_eq!(cs.map_span(sp(2, 6)), sp(2, 6));
    }

    #[test]
    fn adjacent_spans_stay_ordered_through_insertion_between_them() {
        let cs = changes(&[(5, 5, 3)]);
        let a = cs.map_span(sp(0, 5));
        let b = cs.map_span(sp(5, 9));
        assert!(a.to <= b.from);
        assert_eq!(a, sp(0, 5));
        assert_eq!(b, sp(8, 12));
    }
}
