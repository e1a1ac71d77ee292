//! Grouping and stacking: building groups and stacks from the selection and
//! laying out group members.

pub mod group;
pub mod stack;

pub use group::{group_selection, member_slots};
pub use stack::{create_stack, toggle_stack};

use crate::canvas::{Annotation, Canvas};
use crate::interaction::Selection;

/// Selected loose annotations ordered top to bottom, then left to right, then
/// by canvas order.
pub(crate) fn selected_loose_tokens<'a>(
    canvas: &'a Canvas,
    selection: &Selection,
) -> Vec<&'a Annotation> {
    // loose_tokens is in canvas order and the sort is stable
    let mut tokens: Vec<&Annotation> = canvas
        .loose_tokens()
        .filter(|a| selection.contains(a.id))
        .collect();
    tokens.sort_by(|a, b| {
        a.position
            .y
            .total_cmp(&b.position.y)
            .then(a.position.x.total_cmp(&b.position.x))
    });
    tokens
}
