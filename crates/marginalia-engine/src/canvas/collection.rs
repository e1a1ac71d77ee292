use super::component::{Annotation, Component, ComponentId, Group};
use super::geometry::{Point, Rect};
use super::layout::LayoutConfig;
use crate::text::ChangeSet;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CanvasError {
    #[error("Component {0} already exists")]
    DuplicateId(ComponentId),
    #[error("Component {0} not found")]
    NotFound(ComponentId),
    #[error("Component {0} is not an annotation token")]
    NotAToken(ComponentId),
    #[error("Component {0} is not a group")]
    NotAGroup(ComponentId),
    #[error("Component {0} is not a stack")]
    NotAStack(ComponentId),
    #[error("Token {member} is already a member of group {group}")]
    DuplicateMembership {
        member: ComponentId,
        group: ComponentId,
    },
}

/// Authoritative collection of canvas components, kept in insertion order.
///
/// Insertion order is the iteration order used for hit testing and for
/// ordering drag active sets. An annotation token belongs to at most one
/// group; every mutation here preserves that.
#[derive(Debug, Clone, Default)]
pub struct Canvas {
    components: Vec<Component>,
    layout: LayoutConfig,
}

impl Canvas {
    pub fn new(layout: LayoutConfig) -> Self {
        Self {
            components: Vec::new(),
            layout,
        }
    }

    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Component> {
        self.components.iter()
    }

    pub fn contains(&self, id: ComponentId) -> bool {
        self.index_of(id).is_some()
    }

    pub fn find(&self, id: ComponentId) -> Option<&Component> {
        self.components.iter().find(|c| c.id() == id)
    }

    pub fn find_mut(&mut self, id: ComponentId) -> Option<&mut Component> {
        self.components.iter_mut().find(|c| c.id() == id)
    }

    /// Position of `id` in iteration order.
    pub fn index_of(&self, id: ComponentId) -> Option<usize> {
        self.components.iter().position(|c| c.id() == id)
    }

    pub fn add(&mut self, component: impl Into<Component>) -> Result<ComponentId, CanvasError> {
        let component = component.into();
        let id = component.id();
        if self.contains(id) {
            return Err(CanvasError::DuplicateId(id));
        }
        if let Component::Group(group) = &component {
            self.check_joinable(group.id, &group.members)?;
        }

        self.components.push(component);
        Ok(id)
    }

    /// Removes a component. A removed token leaves its group; a removed
    /// group releases its members as loose tokens at their slot positions.
    pub fn remove(&mut self, id: ComponentId) -> Option<Component> {
        let index = self.index_of(id)?;
        let removed = self.components.remove(index);

        match &removed {
            Component::Token(_) => {
                for group in self.groups_mut() {
                    group.members.retain(|m| *m != id);
                }
            }
            Component::Group(group) => {
                for (slot, member) in group.members.iter().enumerate() {
                    let position = self.layout.member_position(group.position, slot);
                    if let Some(component) = self.find_mut(*member) {
                        component.set_position(position);
                    }
                }
            }
            Component::Stack(_) => {}
        }
        Some(removed)
    }

    pub fn annotation(&self, id: ComponentId) -> Option<&Annotation> {
        self.find(id).and_then(Component::as_token)
    }

    pub fn annotation_mut(&mut self, id: ComponentId) -> Option<&mut Annotation> {
        self.find_mut(id).and_then(Component::as_token_mut)
    }

    pub fn groups(&self) -> impl Iterator<Item = &Group> {
        self.components.iter().filter_map(Component::as_group)
    }

    fn groups_mut(&mut self) -> impl Iterator<Item = &mut Group> {
        self.components.iter_mut().filter_map(|c| match c {
            Component::Group(g) => Some(g),
            _ => None,
        })
    }

    fn group_mut(&mut self, id: ComponentId) -> Result<&mut Group, CanvasError> {
        match self.find_mut(id) {
            Some(Component::Group(g)) => Ok(g),
            Some(_) => Err(CanvasError::NotAGroup(id)),
            None => Err(CanvasError::NotFound(id)),
        }
    }

    /// Member ids of a group in display order, or `None` if `group` is not a group.
    pub fn members_of(&self, group: ComponentId) -> Option<&[ComponentId]> {
        self.find(group)
            .and_then(Component::as_group)
            .map(|g| g.members.as_slice())
    }

    /// The group `token` belongs to, if any.
    pub fn group_of(&self, token: ComponentId) -> Option<ComponentId> {
        self.groups()
            .find(|g| g.members.contains(&token))
            .map(|g| g.id)
    }

    /// Tokens that are not members of any group, in canvas order.
    pub fn loose_tokens(&self) -> impl Iterator<Item = &Annotation> {
        self.components
            .iter()
            .filter_map(Component::as_token)
            .filter(|a| self.group_of(a.id).is_none())
    }

    pub fn is_loose_token(&self, id: ComponentId) -> bool {
        self.annotation(id).is_some() && self.group_of(id).is_none()
    }

    /// Appends `members` to `group` in the given order.
    pub fn join_group(
        &mut self,
        group: ComponentId,
        members: &[ComponentId],
    ) -> Result<(), CanvasError> {
        self.group_mut(group)?;
        self.check_joinable(group, members)?;
        self.group_mut(group)?.members.extend_from_slice(members);
        Ok(())
    }

    /// Inserts a single member at `index`, clamped to the member count.
    pub fn join_group_at(
        &mut self,
        group: ComponentId,
        index: usize,
        member: ComponentId,
    ) -> Result<(), CanvasError> {
        self.group_mut(group)?;
        self.check_joinable(group, &[member])?;
        let members = &mut self.group_mut(group)?.members;
        let index = index.min(members.len());
        members.insert(index, member);
        Ok(())
    }

    /// Splices `token` out of its group and moves it to the slot it was
    /// rendered at. Returns the former group and slot index.
    pub fn leave_group(&mut self, token: ComponentId) -> Option<(ComponentId, usize)> {
        let group = self.groups_mut().find(|g| g.members.contains(&token))?;
        let index = group.members.iter().position(|m| *m == token)?;
        group.members.remove(index);
        let (group_id, origin) = (group.id, group.position);

        let slot = self.layout.member_position(origin, index);
        if let Some(component) = self.find_mut(token) {
            component.set_position(slot);
        }
        Some((group_id, index))
    }

    /// Where a component is drawn: the slot position for grouped tokens,
    /// the stored position otherwise.
    pub fn rendered_position(&self, id: ComponentId) -> Option<Point> {
        let component = self.find(id)?;
        let slot = self.groups().find_map(|g| {
            let index = g.members.iter().position(|m| *m == id)?;
            Some(self.layout.member_position(g.position, index))
        });
        Some(slot.unwrap_or_else(|| component.position()))
    }

    pub fn rect_of(&self, id: ComponentId) -> Option<Rect> {
        let rect = match self.find(id)? {
            Component::Token(_) => self.layout.token_rect(self.rendered_position(id)?),
            Component::Group(g) => self.layout.group_rect(g.position, g.members.len()),
            Component::Stack(s) => {
                let count = s.annotations.len();
                self.layout.stack_rect(s.position, count, s.is_expanded)
            }
        };
        Some(rect)
    }

    /// Maps every annotation span, including those inside stacks, through one
    /// edit transaction.
    pub fn remap_spans(&mut self, changes: &ChangeSet) {
        if changes.is_identity() {
            return;
        }
        for component in &mut self.components {
            for annotation in component.annotations_mut() {
                annotation.span = changes.map_span(annotation.span);
            }
        }
    }

    fn check_joinable(
        &self,
        group: ComponentId,
        members: &[ComponentId],
    ) -> Result<(), CanvasError> {
        for (i, member) in members.iter().enumerate() {
            match self.find(*member) {
                None => return Err(CanvasError::NotFound(*member)),
                Some(Component::Token(_)) => {}
                Some(_) => return Err(CanvasError::NotAToken(*member)),
            }
            if members[..i].contains(member) {
                return Err(CanvasError::DuplicateMembership {
                    member: *member,
                    group,
                });
            }
            if let Some(owner) = self.group_of(*member) {
                return Err(CanvasError::DuplicateMembership {
                    member: *member,
                    group: owner,
                });
            }
        }
        Ok(())
    }
}
