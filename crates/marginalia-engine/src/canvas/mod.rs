//! Spatial component model: annotation tokens, groups and stacks placed on an
//! infinite canvas.
//!
//! [`Canvas`] owns every component. Positions are plain fields; rectangles and
//! group member slots are derived from [`LayoutConfig`] on demand.

pub mod collection;
pub mod component;
pub mod geometry;
pub mod layout;

pub use collection::{Canvas, CanvasError};
pub use component::{Annotation, Component, ComponentId, Group, Stack};
pub use geometry::{Point, Rect};
pub use layout::LayoutConfig;
