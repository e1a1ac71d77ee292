//! Pointer interaction: the selection set, drag gestures with group drop
//! targets, and rectangle selection.

pub mod drag;
pub mod rectangle;
pub mod selection;

pub use drag::{DragState, Modifiers};
pub use rectangle::RectSelection;
pub use selection::Selection;
