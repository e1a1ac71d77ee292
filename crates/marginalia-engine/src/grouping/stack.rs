use super::selected_loose_tokens;
use crate::canvas::{Annotation, Canvas, CanvasError, Component, ComponentId, Stack};
use crate::interaction::Selection;

/// Absorbs the selected loose annotations into a new collapsed stack placed
/// where the topmost of them was.
///
/// Stack order is top to bottom, ties left to right. Unselected and grouped
/// annotations are left alone. Returns `Ok(None)` when nothing qualifies.
pub fn create_stack(
    canvas: &mut Canvas,
    selection: &Selection,
) -> Result<Option<ComponentId>, CanvasError> {
    let (anchor, ids) = {
        let tokens = selected_loose_tokens(canvas, selection);
        let Some(first) = tokens.first() else {
            return Ok(None);
        };
        let ids: Vec<ComponentId> = tokens.iter().map(|a| a.id).collect();
        (first.position, ids)
    };

    let annotations: Vec<Annotation> = ids
        .into_iter()
        .filter_map(|id| match canvas.remove(id) {
            Some(Component::Token(annotation)) => Some(annotation),
            _ => None,
        })
        .collect();
    let count = annotations.len();

    let id = canvas.add(Stack::new(anchor, annotations))?;
    log::debug!("Stacked {count} annotations into {id}");
    Ok(Some(id))
}

/// Flips a stack between collapsed and expanded. Returns the new state.
pub fn toggle_stack(canvas: &mut Canvas, id: ComponentId) -> Result<bool, CanvasError> {
    match canvas.find_mut(id) {
        Some(Component::Stack(stack)) => {
            stack.is_expanded = !stack.is_expanded;
            Ok(stack.is_expanded)
        }
        Some(_) => Err(CanvasError::NotAStack(id)),
        None => Err(CanvasError::NotFound(id)),
    }
}
