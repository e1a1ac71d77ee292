use super::geometry::{Point, Rect};

/// Fixed slot metrics used to derive every rectangle on the canvas.
///
/// Nothing derived from these values is stored: group member positions and
/// component rectangles are recomputed on each query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    pub token_width: f64,
    pub token_height: f64,
    /// Vertical space between two consecutive group or stack members.
    pub token_gap: f64,
    pub group_width: f64,
    pub collapsed_stack_height: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            token_width: 160.0,
            token_height: 32.0,
            token_gap: 8.0,
            group_width: 176.0,
            collapsed_stack_height: 48.0,
        }
    }
}

impl LayoutConfig {
    pub fn slot_height(&self) -> f64 {
        self.token_height + self.token_gap
    }

    /// Where member `index` of a group anchored at `origin` is rendered.
    pub fn member_position(&self, origin: Point, index: usize) -> Point {
        Point::new(origin.x, origin.y + index as f64 * self.slot_height())
    }

    pub fn token_rect(&self, position: Point) -> Rect {
        Rect::new(position, self.token_width, self.token_height)
    }

    pub fn group_rect(&self, position: Point, members: usize) -> Rect {
        Rect::new(position, self.group_width, members as f64 * self.slot_height())
    }

    pub fn stack_rect(&self, position: Point, annotations: usize, expanded: bool) -> Rect {
        let height = if expanded {
            annotations as f64 * self.slot_height()
        } else {
            self.collapsed_stack_height
        };
        Rect::new(position, self.token_width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn members_are_laid_out_top_to_bottom() {
        let layout = LayoutConfig {
            token_height: 30.0,
            token_gap: 10.0,
            ..LayoutConfig::default()
        };
        let origin = Point::new(20.0, 100.0);

        assert_eq!(layout.member_position(origin, 0), origin);
        assert_eq!(layout.member_position(origin, 1), Point::new(20.0, 140.0));
        assert_eq!(layout.member_position(origin, 3), Point::new(20.0, 220.0));
    }

    #[test]
    fn group_rect_grows_with_member_count() {
        let layout = LayoutConfig::default();
        let rect = layout.group_rect(Point::ORIGIN, 3);
        assert_eq!(rect.width, layout.group_width);
        assert_eq!(rect.height, 3.0 * layout.slot_height());
    }

    #[test]
    fn stack_height_depends_on_expansion() {
        let layout = LayoutConfig::default();
        let collapsed = layout.stack_rect(Point::ORIGIN, 5, false);
        let expanded = layout.stack_rect(Point::ORIGIN, 5, true);

        assert_eq!(collapsed.height, layout.collapsed_stack_height);
        assert_eq!(expanded.height, 5.0 * layout.slot_height());
        assert_eq!(layout.stack_rect(Point::ORIGIN, 1, false).height, collapsed.height);
    }
}
