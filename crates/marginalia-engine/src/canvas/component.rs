use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::geometry::Point;
use crate::text::Span;

/// Stable identity of a canvas component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ComponentId(Uuid);

impl ComponentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ComponentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A fragment of the document placed on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub id: ComponentId,
    pub span: Span,
    /// Stored position. Grouped annotations render at their slot instead.
    pub position: Point,
    pub kind: Option<String>,
}

impl Annotation {
    pub fn new(span: Span, position: Point) -> Self {
        Self {
            id: ComponentId::new(),
            span,
            position,
            kind: None,
        }
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }
}

/// An ordered cluster of annotation tokens. Members render top to bottom in
/// list order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: ComponentId,
    pub position: Point,
    pub members: Vec<ComponentId>,
}

impl Group {
    pub fn new(position: Point, members: Vec<ComponentId>) -> Self {
        Self {
            id: ComponentId::new(),
            position,
            members,
        }
    }
}

/// A pile of annotations owned by value, collapsed by default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stack {
    pub id: ComponentId,
    pub position: Point,
    pub annotations: Vec<Annotation>,
    pub is_expanded: bool,
}

impl Stack {
    pub fn new(position: Point, annotations: Vec<Annotation>) -> Self {
        Self {
            id: ComponentId::new(),
            position,
            annotations,
            is_expanded: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Component {
    Token(Annotation),
    Group(Group),
    Stack(Stack),
}

impl Component {
    pub fn id(&self) -> ComponentId {
        match self {
            Component::Token(a) => a.id,
            Component::Group(g) => g.id,
            Component::Stack(s) => s.id,
        }
    }

    pub fn position(&self) -> Point {
        match self {
            Component::Token(a) => a.position,
            Component::Group(g) => g.position,
            Component::Stack(s) => s.position,
        }
    }

    pub fn set_position(&mut self, position: Point) {
        match self {
            Component::Token(a) => a.position = position,
            Component::Group(g) => g.position = position,
            Component::Stack(s) => s.position = position,
        }
    }

    pub fn translate(&mut self, delta: Point) {
        let moved = self.position() + delta;
        self.set_position(moved);
    }

    pub fn as_token(&self) -> Option<&Annotation> {
        match self {
            Component::Token(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_token_mut(&mut self) -> Option<&mut Annotation> {
        match self {
            Component::Token(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_group(&self) -> Option<&Group> {
        match self {
            Component::Group(g) => Some(g),
            _ => None,
        }
    }

    pub fn as_stack(&self) -> Option<&Stack> {
        match self {
            Component::Stack(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_stack_mut(&mut self) -> Option<&mut Stack> {
        match self {
            Component::Stack(s) => Some(s),
            _ => None,
        }
    }

    /// Every annotation held by this component: the token itself or a
    /// stack's contents. Groups hold ids only.
    pub fn annotations_mut(&mut self) -> &mut [Annotation] {
        match self {
            Component::Token(a) => std::slice::from_mut(a),
            Component::Group(_) => &mut [],
            Component::Stack(s) => &mut s.annotations,
        }
    }
}

impl From<Annotation> for Component {
    fn from(annotation: Annotation) -> Self {
        Component::Token(annotation)
    }
}

impl From<Group> for Component {
    fn from(group: Group) -> Self {
        Component::Group(group)
    }
}

impl From<Stack> for Component {
    fn from(stack: Stack) -> Self {
        Component::Stack(stack)
    }
}
