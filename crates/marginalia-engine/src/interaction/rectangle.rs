use super::selection::Selection;
use crate::canvas::{Canvas, ComponentId, Point, Rect};

/// Rubber-band selection started on empty canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct RectSelection {
    origin: Point,
    movement: Point,
    previous: Vec<ComponentId>,
}

impl RectSelection {
    /// Starts a rectangle at `origin`, clearing the current selection.
    pub fn begin(origin: Point, selection: &mut Selection) -> Self {
        let previous = selection.iter().collect();
        selection.clear();
        Self {
            origin,
            movement: Point::ORIGIN,
            previous,
        }
    }

    /// Rectangle between the start point and the accumulated movement.
    pub fn rect(&self) -> Rect {
        Rect::from_corners(self.origin, self.origin + self.movement)
    }

    /// Grows the rectangle by `delta` and replaces the selection with every
    /// loose annotation whose position lies inside it. Returns whether the
    /// selection changed.
    pub fn update(&mut self, delta: Point, canvas: &Canvas, selection: &mut Selection) -> bool {
        self.movement += delta;
        let rect = self.rect();
        selection.replace(
            canvas
                .loose_tokens()
                .filter(|a| rect.contains(a.position))
                .map(|a| a.id),
        )
    }

    /// Puts back the selection that existed before the gesture started.
    pub fn cancel(self, selection: &mut Selection) -> bool {
        selection.replace(self.previous)
    }
}
