pub mod canvas;
pub mod grouping;
pub mod highlight;
pub mod interaction;
pub mod session;
pub mod text;

// Re-export key types for easier usage
pub use canvas::{
    Annotation, Canvas, CanvasError, Component, ComponentId, Group, LayoutConfig, Point, Rect,
    Stack,
};
pub use highlight::{
    Data, Enrichment, Highlight, HighlightId, HighlightSet, Pipeline, PipelineError, Rule, RuleId,
    Value,
};
pub use interaction::{DragState, Modifiers, RectSelection, Selection};
pub use session::{
    Command, EditEvent, EditorSession, GesturePhase, PointerEvent, SessionChange, SessionError,
    SubscriptionId,
};
pub use text::{Bias, ChangeSet, Document, Span, SpanError, TextEdit};
