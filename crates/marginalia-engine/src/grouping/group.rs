use super::selected_loose_tokens;
use crate::canvas::{Canvas, CanvasError, ComponentId, Group, Point};
use crate::interaction::Selection;

/// Member ids of `group` paired with the slot each one renders at.
pub fn member_slots(canvas: &Canvas, group: ComponentId) -> Option<Vec<(ComponentId, Point)>> {
    let group = canvas.find(group)?.as_group()?;
    let layout = canvas.layout();
    Some(
        group
            .members
            .iter()
            .enumerate()
            .map(|(i, id)| (*id, layout.member_position(group.position, i)))
            .collect(),
    )
}

/// Groups the selected loose tokens, anchored at the topmost one.
///
/// Returns `Ok(None)` when no loose token is selected.
pub fn group_selection(
    canvas: &mut Canvas,
    selection: &Selection,
) -> Result<Option<ComponentId>, CanvasError> {
    let tokens = selected_loose_tokens(canvas, selection);
    let Some(anchor) = tokens.first().map(|a| a.position) else {
        return Ok(None);
    };
    let members: Vec<ComponentId> = tokens.iter().map(|a| a.id).collect();
    let count = members.len();

    let id = canvas.add(Group::new(anchor, members))?;
    log::debug!("Grouped {count} tokens into {id}");
    Ok(Some(id))
}
