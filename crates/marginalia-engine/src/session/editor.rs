use super::events::{Command, EditEvent, GesturePhase, PointerEvent};
use super::observer::{Observers, SessionChange, SubscriptionId};
use crate::canvas::{Annotation, Canvas, CanvasError, ComponentId, LayoutConfig};
use crate::grouping::{create_stack, group_selection, toggle_stack};
use crate::highlight::{HighlightId, HighlightSet, Pipeline};
use crate::interaction::{DragState, RectSelection, Selection};
use crate::text::{Document, Span, SpanError};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Span(#[from] SpanError),
    #[error(transparent)]
    Canvas(#[from] CanvasError),
    #[error("Edit result does not match the document at version {version}")]
    ResultMismatch { version: u64 },
    #[error("Highlight {0} not found")]
    UnknownHighlight(HighlightId),
}

#[derive(Debug, Default)]
enum Gesture {
    #[default]
    Idle,
    Dragging(DragState),
    Selecting(RectSelection),
}

impl Gesture {
    fn name(&self) -> &'static str {
        match self {
            Gesture::Idle => "idle",
            Gesture::Dragging(_) => "dragging",
            Gesture::Selecting(_) => "selecting",
        }
    }
}

/// All editor state for one document: text, highlights, canvas, selection
/// and the gesture in progress.
///
/// Every handler runs to completion and leaves the session settled before
/// subscribers are notified. Edits remap annotation spans before the
/// highlight pipeline re-runs.
#[derive(Debug)]
pub struct EditorSession {
    document: Document,
    pipeline: Pipeline,
    highlights: HighlightSet,
    canvas: Canvas,
    selection: Selection,
    gesture: Gesture,
    observers: Observers,
}

impl EditorSession {
    pub fn new(text: &str, pipeline: Pipeline, layout: LayoutConfig) -> Self {
        let highlights = pipeline.run(text);
        Self {
            document: Document::new(text),
            pipeline,
            highlights,
            canvas: Canvas::new(layout),
            selection: Selection::new(),
            gesture: Gesture::Idle,
            observers: Observers::default(),
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    pub fn highlights(&self) -> &HighlightSet {
        &self.highlights
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn drag_state(&self) -> Option<&DragState> {
        match &self.gesture {
            Gesture::Dragging(drag) => Some(drag),
            _ => None,
        }
    }

    pub fn rect_selection(&self) -> Option<&RectSelection> {
        match &self.gesture {
            Gesture::Selecting(rect) => Some(rect),
            _ => None,
        }
    }

    pub fn hovered_group(&self) -> Option<ComponentId> {
        self.drag_state().and_then(DragState::hovered_group)
    }

    pub fn span_text(&self, span: Span) -> Result<String, SpanError> {
        self.document.slice(span)
    }

    /// Current text of a token on the canvas.
    pub fn annotation_text(&self, id: ComponentId) -> Option<String> {
        let annotation = self.canvas.annotation(id)?;
        self.document.slice(annotation.span).ok()
    }

    pub fn subscribe(&mut self, callback: impl FnMut(&SessionChange) + 'static) -> SubscriptionId {
        self.observers.subscribe(Box::new(callback))
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Replaces the selection, e.g. after a click.
    pub fn select(&mut self, ids: impl IntoIterator<Item = ComponentId>) {
        let ids = ids.into_iter().filter(|id| self.canvas.contains(*id));
        if self.selection.replace(ids.collect::<Vec<_>>()) {
            self.notify(&[SessionChange::Selection]);
        }
    }

    /// Applies an edit transaction.
    ///
    /// The session is left untouched when the edits are invalid or when the
    /// reported resulting text disagrees with the applied edits.
    pub fn apply_edit(&mut self, event: EditEvent) -> Result<(), SessionError> {
        let (next, changes) = self.document.apply(&event.edits)?;
        if let Some(expected) = &event.resulting_text
            && next.text() != *expected
        {
            let version = self.document.version();
            log::warn!("Rejecting edit at version {version}: resulting text does not match");
            return Err(SessionError::ResultMismatch { version });
        }

        self.document = next;
        if changes.is_identity() {
            self.notify(&[SessionChange::Document]);
            return Ok(());
        }

        self.canvas.remap_spans(&changes);
        self.highlights = self.pipeline.run(&self.document.text());
        log::debug!(
            "Document at version {}: {} highlights",
            self.document.version(),
            self.highlights.len()
        );
        self.notify(&[
            SessionChange::Document,
            SessionChange::Components,
            SessionChange::Highlights,
        ]);
        Ok(())
    }

    /// Routes one pointer event through the gesture state machine. Events
    /// that make no sense in the current state are ignored.
    pub fn handle_pointer(&mut self, event: PointerEvent) {
        let gesture = std::mem::take(&mut self.gesture);
        let (next, changes) = match (gesture, event.phase) {
            (Gesture::Idle, GesturePhase::Start) => self.start_gesture(&event),
            (Gesture::Dragging(mut drag), GesturePhase::Move) => {
                let mut changes = vec![SessionChange::Components];
                if drag.update(&mut self.canvas, event.position, event.delta) {
                    changes.push(SessionChange::DragHover);
                }
                (Gesture::Dragging(drag), changes)
            }
            (Gesture::Dragging(drag), GesturePhase::End) => {
                let mut changes = Vec::new();
                if drag.hovered_group().is_some() {
                    changes.push(SessionChange::DragHover);
                }
                match drag.finish(&mut self.canvas) {
                    Ok(Some(group)) => {
                        log::debug!("Dropped into group {group}");
                        changes.push(SessionChange::Components);
                    }
                    Ok(None) => {}
                    Err(e) => log::warn!("Drop rejected: {e}"),
                }
                (Gesture::Idle, changes)
            }
            (Gesture::Dragging(drag), GesturePhase::Cancel) => {
                let mut changes = vec![SessionChange::Components];
                if drag.hovered_group().is_some() {
                    changes.push(SessionChange::DragHover);
                }
                drag.cancel(&mut self.canvas);
                (Gesture::Idle, changes)
            }
            (Gesture::Selecting(mut rect), GesturePhase::Move) => {
                let changed = rect.update(event.delta, &self.canvas, &mut self.selection);
                (Gesture::Selecting(rect), selection_change(changed))
            }
            (Gesture::Selecting(_), GesturePhase::End) => (Gesture::Idle, Vec::new()),
            (Gesture::Selecting(rect), GesturePhase::Cancel) => {
                let changed = rect.cancel(&mut self.selection);
                (Gesture::Idle, selection_change(changed))
            }
            (gesture, phase) => {
                log::debug!("Ignoring {phase:?} pointer event while {}", gesture.name());
                (gesture, Vec::new())
            }
        };
        self.gesture = next;
        self.notify(&changes);
    }

    fn start_gesture(&mut self, event: &PointerEvent) -> (Gesture, Vec<SessionChange>) {
        let Some(target) = event.target else {
            let had_selection = !self.selection.is_empty();
            let rect = RectSelection::begin(event.position, &mut self.selection);
            return (Gesture::Selecting(rect), selection_change(had_selection));
        };

        match DragState::begin(&mut self.canvas, &self.selection, target, event.modifiers) {
            Some(drag) => {
                let changes = if drag.extracted_from().is_some() {
                    vec![SessionChange::Components]
                } else {
                    Vec::new()
                };
                (Gesture::Dragging(drag), changes)
            }
            None => {
                log::debug!("Ignoring drag of unknown component {target}");
                (Gesture::Idle, Vec::new())
            }
        }
    }

    /// Runs a command. Returns the id of the component it created, if any.
    pub fn execute(&mut self, command: Command) -> Result<Option<ComponentId>, SessionError> {
        let (created, mut changes) = match command {
            Command::CreateStackFromSelection => {
                let created = create_stack(&mut self.canvas, &self.selection)?;
                (created, component_change(created.is_some()))
            }
            Command::ClassifySelection(kind) => {
                let classified = self.classify_selection(&kind);
                (None, component_change(classified > 0))
            }
            Command::ToggleStack(id) => {
                toggle_stack(&mut self.canvas, id)?;
                (None, component_change(true))
            }
            Command::PlaceAnnotation {
                span,
                position,
                kind,
            } => {
                self.document.slice(span)?;
                let mut annotation = Annotation::new(span, position);
                annotation.kind = kind;
                (Some(self.canvas.add(annotation)?), component_change(true))
            }
            Command::PlaceHighlight {
                highlight,
                position,
            } => {
                let found = self
                    .highlights
                    .find(highlight)
                    .ok_or(SessionError::UnknownHighlight(highlight))?;
                let annotation =
                    Annotation::new(found.span, position).with_kind(found.rule_id.as_str());
                (Some(self.canvas.add(annotation)?), component_change(true))
            }
            Command::GroupSelection => {
                let created = group_selection(&mut self.canvas, &self.selection)?;
                (created, component_change(created.is_some()))
            }
            Command::DeleteSelection => {
                let ids = self.selection.in_canvas_order(&self.canvas);
                for id in &ids {
                    self.canvas.remove(*id);
                }
                (None, component_change(!ids.is_empty()))
            }
        };

        if self.selection.retain_existing(&self.canvas) {
            changes.push(SessionChange::Selection);
        }
        self.notify(&changes);
        Ok(created)
    }

    /// Sets `kind` on selected tokens, members of selected groups and
    /// contents of selected stacks. Returns how many annotations changed.
    fn classify_selection(&mut self, kind: &str) -> usize {
        let mut targets = Vec::new();
        for id in self.selection.iter() {
            match self.canvas.members_of(id) {
                Some(members) => targets.extend_from_slice(members),
                None => targets.push(id),
            }
        }

        let mut classified = 0;
        for id in targets {
            let Some(component) = self.canvas.find_mut(id) else {
                continue;
            };
            for annotation in component.annotations_mut() {
                annotation.kind = Some(kind.to_string());
                classified += 1;
            }
        }
        classified
    }

    fn notify(&mut self, changes: &[SessionChange]) {
        for change in changes {
            self.observers.notify(*change);
        }
    }
}

fn selection_change(changed: bool) -> Vec<SessionChange> {
    if changed {
        vec![SessionChange::Selection]
    } else {
        Vec::new()
    }
}

fn component_change(changed: bool) -> Vec<SessionChange> {
    if changed {
        vec![SessionChange::Components]
    } else {
        Vec::new()
    }
}
