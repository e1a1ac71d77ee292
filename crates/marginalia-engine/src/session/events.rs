use crate::canvas::{ComponentId, Point};
use crate::highlight::HighlightId;
use crate::interaction::Modifiers;
use crate::text::{Span, TextEdit};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GesturePhase {
    Start,
    Move,
    End,
    Cancel,
}

/// One step of a pointer gesture, in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub phase: GesturePhase,
    pub position: Point,
    /// Movement since the previous event of the same gesture.
    pub delta: Point,
    pub modifiers: Modifiers,
    /// Component under the pointer at gesture start; `None` on empty canvas.
    pub target: Option<ComponentId>,
}

impl PointerEvent {
    pub fn start(position: Point, target: Option<ComponentId>) -> Self {
        Self {
            phase: GesturePhase::Start,
            position,
            delta: Point::ORIGIN,
            modifiers: Modifiers::default(),
            target,
        }
    }

    pub fn moved(position: Point, delta: Point) -> Self {
        Self {
            phase: GesturePhase::Move,
            position,
            delta,
            modifiers: Modifiers::default(),
            target: None,
        }
    }

    pub fn end(position: Point) -> Self {
        Self {
            phase: GesturePhase::End,
            position,
            delta: Point::ORIGIN,
            modifiers: Modifiers::default(),
            target: None,
        }
    }

    pub fn cancel(position: Point) -> Self {
        Self {
            phase: GesturePhase::Cancel,
            position,
            delta: Point::ORIGIN,
            modifiers: Modifiers::default(),
            target: None,
        }
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// A document edit transaction reported by the text editor.
#[derive(Debug, Clone, PartialEq)]
pub struct EditEvent {
    /// Ordered, non-overlapping edits against the current document.
    pub edits: Vec<TextEdit>,
    /// Full text after the edits, when the editor reports it. Used to detect
    /// drift between the editor and the session.
    pub resulting_text: Option<String>,
}

impl EditEvent {
    pub fn new(edits: Vec<TextEdit>) -> Self {
        Self {
            edits,
            resulting_text: None,
        }
    }

    pub fn with_result(mut self, text: impl Into<String>) -> Self {
        self.resulting_text = Some(text.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    CreateStackFromSelection,
    /// Sets the kind of every selected annotation, including members of
    /// selected groups and contents of selected stacks.
    ClassifySelection(String),
    ToggleStack(ComponentId),
    /// Drops a text fragment onto the canvas as a new loose token.
    PlaceAnnotation {
        span: Span,
        position: Point,
        kind: Option<String>,
    },
    /// Places a token covering a highlight's span, classified by its rule id.
    PlaceHighlight {
        highlight: HighlightId,
        position: Point,
    },
    GroupSelection,
    DeleteSelection,
}
