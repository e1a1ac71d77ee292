use std::collections::BTreeSet;

use super::selection::Selection;
use crate::canvas::{Canvas, CanvasError, Component, ComponentId, Point};

/// Keyboard state accompanying a pointer gesture.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Pull a grouped token out of its group instead of dragging the group.
    pub extract: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Extraction {
    member: ComponentId,
    group: ComponentId,
    index: usize,
}

/// An in-progress drag. Exists only between gesture start and end.
///
/// Positions and group membership at gesture start are captured so that a
/// cancelled drag can put everything back.
#[derive(Debug, Clone, PartialEq)]
pub struct DragState {
    moving: Vec<ComponentId>,
    hovered_group: Option<ComponentId>,
    origins: Vec<(ComponentId, Point)>,
    extraction: Option<Extraction>,
}

impl DragState {
    /// Starts dragging `target`.
    ///
    /// A selected target drags the whole selection. An unselected one drags
    /// alone, or as its owning group when grouped. With
    /// [`Modifiers::extract`] a grouped target is spliced out of its group
    /// first. Returns `None` when `target` is not on the canvas.
    pub fn begin(
        canvas: &mut Canvas,
        selection: &Selection,
        target: ComponentId,
        modifiers: Modifiers,
    ) -> Option<Self> {
        let origin = canvas.find(target)?.position();

        if modifiers.extract && canvas.group_of(target).is_some() {
            let (group, index) = canvas.leave_group(target)?;
            return Some(Self {
                moving: vec![target],
                hovered_group: None,
                origins: vec![(target, origin)],
                extraction: Some(Extraction {
                    member: target,
                    group,
                    index,
                }),
            });
        }

        let moving = if selection.contains(target) {
            active_set(canvas, selection.iter())
        } else {
            active_set(canvas, [target])
        };
        let origins = moving
            .iter()
            .filter_map(|id| Some((*id, canvas.find(*id)?.position())))
            .collect();

        Some(Self {
            moving,
            hovered_group: None,
            origins,
            extraction: None,
        })
    }

    /// Components moved by this drag, in canvas order.
    pub fn moving(&self) -> &[ComponentId] {
        &self.moving
    }

    pub fn hovered_group(&self) -> Option<ComponentId> {
        self.hovered_group
    }

    /// The group and slot the dragged token was extracted from, if any.
    pub fn extracted_from(&self) -> Option<(ComponentId, usize)> {
        self.extraction.map(|e| (e.group, e.index))
    }

    /// Moves every active component by `delta` and re-tests the drop target
    /// under `pointer`. Returns whether the hovered group changed.
    pub fn update(&mut self, canvas: &mut Canvas, pointer: Point, delta: Point) -> bool {
        for id in &self.moving {
            if let Some(component) = canvas.find_mut(*id) {
                component.translate(delta);
            }
        }

        let hovered = if self.moving.iter().all(|id| canvas.is_loose_token(*id)) {
            canvas
                .groups()
                .find(|g| canvas.rect_of(g.id).is_some_and(|r| r.contains(pointer)))
                .map(|g| g.id)
        } else {
            None
        };

        let changed = hovered != self.hovered_group;
        self.hovered_group = hovered;
        changed
    }

    /// Ends the drag. With a hover target every active id is appended to
    /// that group in active-set order, and the group id is returned.
    pub fn finish(self, canvas: &mut Canvas) -> Result<Option<ComponentId>, CanvasError> {
        let Some(group) = self.hovered_group else {
            return Ok(None);
        };
        canvas.join_group(group, &self.moving)?;
        Ok(Some(group))
    }

    /// Restores the positions and membership captured at gesture start.
    pub fn cancel(self, canvas: &mut Canvas) {
        for (id, origin) in &self.origins {
            if let Some(component) = canvas.find_mut(*id) {
                component.set_position(*origin);
            }
        }
        if let Some(Extraction {
            member,
            group,
            index,
        }) = self.extraction
            && let Err(e) = canvas.join_group_at(group, index, member)
        {
            log::debug!("Could not return {member} to group {group}: {e}");
        }
    }
}

/// Maps `ids` to the components a drag actually moves: grouped tokens are
/// promoted to their group, unknown ids dropped, duplicates removed, and the
/// result is in canvas order.
pub(crate) fn active_set(
    canvas: &Canvas,
    ids: impl IntoIterator<Item = ComponentId>,
) -> Vec<ComponentId> {
    let promoted: BTreeSet<ComponentId> = ids
        .into_iter()
        .filter(|id| canvas.contains(*id))
        .map(|id| canvas.group_of(id).unwrap_or(id))
        .collect();

    canvas
        .iter()
        .map(Component::id)
        .filter(|id| promoted.contains(id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{Annotation, Group, LayoutConfig};
    use crate::text::Span;
    use pretty_assertions::assert_eq;

    fn layout() -> LayoutConfig {
        LayoutConfig {
            token_width: 100.0,
            token_height: 30.0,
            token_gap: 10.0,
            group_width: 120.0,
            collapsed_stack_height: 40.0,
        }
    }

    fn token(canvas: &mut Canvas, x: f64, y: f64) -> ComponentId {
        canvas
            .add(Annotation::new(Span::empty(0), Point::new(x, y)))
            .unwrap()
    }

    fn position(canvas: &Canvas, id: ComponentId) -> Point {
        canvas.find(id).unwrap().position()
    }

    // ============ Active set ============

    #[test]
    fn unselected_target_drags_alone() {
        let mut canvas = Canvas::new(layout());
        let a = token(&mut canvas, 100.0, 100.0);
        let b = token(&mut canvas, 300.0, 300.0);
        let selection: Selection = [b].into_iter().collect();

        let mut drag = DragState::begin(&mut canvas, &selection, a, Modifiers::default()).unwrap();
        assert_eq!(drag.moving(), &[a]);

        drag.update(&mut canvas, Point::new(105.0, 105.0), Point::new(5.0, 5.0));
        assert_eq!(position(&canvas, a), Point::new(105.0, 105.0));
        assert_eq!(position(&canvas, b), Point::new(300.0, 300.0));
    }

    #[test]
    fn selected_target_drags_whole_selection() {
        let mut canvas = Canvas::new(layout());
        let a = token(&mut canvas, 0.0, 0.0);
        let b = token(&mut canvas, 50.0, 10.0);
        let c = token(&mut canvas, 200.0, 80.0);
        let selection: Selection = [c, a, b].into_iter().collect();

        let mut drag = DragState::begin(&mut canvas, &selection, b, Modifiers::default()).unwrap();
        assert_eq!(drag.moving(), &[a, b, c]);

        drag.update(&mut canvas, Point::ORIGIN, Point::new(10.0, -5.0));
        drag.update(&mut canvas, Point::ORIGIN, Point::new(10.0, -5.0));
        assert_eq!(position(&canvas, a), Point::new(20.0, -10.0));
        assert_eq!(position(&canvas, b), Point::new(70.0, 0.0));
        assert_eq!(position(&canvas, c), Point::new(220.0, 70.0));
    }

    #[test]
    fn grouped_target_drags_its_group() {
        let mut canvas = Canvas::new(layout());
        let a = token(&mut canvas, 0.0, 0.0);
        let b = token(&mut canvas, 0.0, 0.0);
        let group = canvas.add(Group::new(Point::new(10.0, 10.0), vec![a, b])).unwrap();

        let mut drag =
            DragState::begin(&mut canvas, &Selection::new(), b, Modifiers::default()).unwrap();
        assert_eq!(drag.moving(), &[group]);

        drag.update(&mut canvas, Point::ORIGIN, Point::new(5.0, 5.0));
        assert_eq!(position(&canvas, group), Point::new(15.0, 15.0));
        assert_eq!(canvas.rendered_position(b), Some(Point::new(15.0, 55.0)));
    }

    #[test]
    fn selected_members_are_promoted_to_their_group_once() {
        let mut canvas = Canvas::new(layout());
        let a = token(&mut canvas, 0.0, 0.0);
        let b = token(&mut canvas, 0.0, 0.0);
        let loose = token(&mut canvas, 0.0, 0.0);
        let group = canvas.add(Group::new(Point::ORIGIN, vec![a, b])).unwrap();

        let ids = active_set(&canvas, [b, loose, a, ComponentId::new()]);
        assert_eq!(ids, vec![loose, group]);
    }

    #[test]
    fn begin_on_unknown_target_is_ignored() {
        let mut canvas = Canvas::new(layout());
        let drag = DragState::begin(
            &mut canvas,
            &Selection::new(),
            ComponentId::new(),
            Modifiers::default(),
        );
        assert!(drag.is_none());
    }

    // ============ Drop targets ============

    #[test]
    fn hovering_a_group_and_ending_appends_active_set() {
        let mut canvas = Canvas::new(layout());
        let member = token(&mut canvas, 0.0, 0.0);
        let group = canvas.add(Group::new(Point::new(400.0, 0.0), vec![member])).unwrap();
        let a = token(&mut canvas, 0.0, 200.0);
        let b = token(&mut canvas, 0.0, 300.0);
        let selection: Selection = [b, a].into_iter().collect();

        let mut drag = DragState::begin(&mut canvas, &selection, a, Modifiers::default()).unwrap();
        assert!(!drag.update(&mut canvas, Point::new(300.0, 10.0), Point::new(1.0, 1.0)));
        assert!(drag.update(&mut canvas, Point::new(400.0, 40.0), Point::new(1.0, 1.0)));
        assert_eq!(drag.hovered_group(), Some(group));

        assert_eq!(drag.finish(&mut canvas), Ok(Some(group)));
        assert_eq!(canvas.members_of(group), Some(&[member, a, b][..]));
    }

    #[test]
    fn hover_uses_inclusive_group_bounds() {
        let mut canvas = Canvas::new(layout());
        let member = token(&mut canvas, 0.0, 0.0);
        let group = canvas.add(Group::new(Point::new(100.0, 100.0), vec![member])).unwrap();
        let a = token(&mut canvas, 0.0, 0.0);

        let mut drag =
            DragState::begin(&mut canvas, &Selection::new(), a, Modifiers::default()).unwrap();
        // bottom-right corner of a 120 x 40 group
        drag.update(&mut canvas, Point::new(220.0, 140.0), Point::ORIGIN);
        assert_eq!(drag.hovered_group(), Some(group));
    }

    #[test]
    fn dragging_a_group_never_hovers() {
        let mut canvas = Canvas::new(layout());
        let a = token(&mut canvas, 0.0, 0.0);
        let b = token(&mut canvas, 0.0, 0.0);
        canvas.add(Group::new(Point::ORIGIN, vec![a])).unwrap();
        let target = canvas.add(Group::new(Point::new(500.0, 0.0), vec![b])).unwrap();

        let mut drag =
            DragState::begin(&mut canvas, &Selection::new(), a, Modifiers::default()).unwrap();
        drag.update(&mut canvas, Point::new(510.0, 10.0), Point::ORIGIN);
        assert_eq!(drag.hovered_group(), None);

        drag.finish(&mut canvas).unwrap();
        assert_eq!(canvas.members_of(target), Some(&[b][..]));
    }

    #[test]
    fn leaving_the_group_clears_hover() {
        let mut canvas = Canvas::new(layout());
        let member = token(&mut canvas, 0.0, 0.0);
        canvas.add(Group::new(Point::ORIGIN, vec![member])).unwrap();
        let a = token(&mut canvas, 500.0, 500.0);

        let mut drag =
            DragState::begin(&mut canvas, &Selection::new(), a, Modifiers::default()).unwrap();
        drag.update(&mut canvas, Point::new(10.0, 10.0), Point::ORIGIN);
        assert!(drag.update(&mut canvas, Point::new(900.0, 900.0), Point::ORIGIN));
        assert_eq!(drag.hovered_group(), None);
        assert_eq!(drag.finish(&mut canvas), Ok(None));
    }

    // ============ Extraction and cancel ============

    #[test]
    fn extract_modifier_pulls_member_out_of_group() {
        let mut canvas = Canvas::new(layout());
        let a = token(&mut canvas, 0.0, 0.0);
        let b = token(&mut canvas, 0.0, 0.0);
        let group = canvas.add(Group::new(Point::new(10.0, 10.0), vec![a, b])).unwrap();

        let mut drag =
            DragState::begin(&mut canvas, &Selection::new(), b, Modifiers { extract: true })
                .unwrap();
        assert_eq!(drag.moving(), &[b]);
        assert_eq!(drag.extracted_from(), Some((group, 1)));
        assert_eq!(canvas.members_of(group), Some(&[a][..]));

        drag.update(&mut canvas, Point::new(300.0, 300.0), Point::new(5.0, 5.0));
        assert_eq!(position(&canvas, b), Point::new(15.0, 55.0));
        assert_eq!(drag.finish(&mut canvas), Ok(None));
        assert!(canvas.is_loose_token(b));
    }

    #[test]
    fn extract_modifier_on_loose_token_is_a_plain_drag() {
        let mut canvas = Canvas::new(layout());
        let a = token(&mut canvas, 0.0, 0.0);
        let drag =
            DragState::begin(&mut canvas, &Selection::new(), a, Modifiers { extract: true })
                .unwrap();
        assert_eq!(drag.moving(), &[a]);
        assert_eq!(drag.extracted_from(), None);
    }

    #[test]
    fn cancel_restores_positions_and_membership() {
        let mut canvas = Canvas::new(layout());
        let a = token(&mut canvas, 7.0, 7.0);
        let b = token(&mut canvas, 0.0, 0.0);
        let c = token(&mut canvas, 0.0, 0.0);
        let group = canvas.add(Group::new(Point::new(10.0, 10.0), vec![a, b, c])).unwrap();
        let before = canvas.clone();

        let mut drag =
            DragState::begin(&mut canvas, &Selection::new(), a, Modifiers { extract: true })
                .unwrap();
        drag.update(&mut canvas, Point::new(500.0, 500.0), Point::new(50.0, 50.0));
        drag.cancel(&mut canvas);

        assert_eq!(canvas.members_of(group), before.members_of(group));
        for id in [a, b, c, group] {
            assert_eq!(canvas.find(id), before.find(id));
        }
    }

    #[test]
    fn cancel_of_plain_drag_restores_every_active_component() {
        let mut canvas = Canvas::new(layout());
        let a = token(&mut canvas, 0.0, 0.0);
        let b = token(&mut canvas, 40.0, 40.0);
        let selection: Selection = [a, b].into_iter().collect();

        let mut drag = DragState::begin(&mut canvas, &selection, a, Modifiers::default()).unwrap();
        drag.update(&mut canvas, Point::ORIGIN, Point::new(5.0, 5.0));
        drag.cancel(&mut canvas);

        assert_eq!(position(&canvas, a), Point::new(0.0, 0.0));
        assert_eq!(position(&canvas, b), Point::new(40.0, 40.0));
    }
}
