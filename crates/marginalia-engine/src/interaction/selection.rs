use std::collections::BTreeSet;

use crate::canvas::{Canvas, ComponentId};

/// Set of selected component ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: BTreeSet<ComponentId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: ComponentId) -> bool {
        self.ids.contains(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = ComponentId> + '_ {
        self.ids.iter().copied()
    }

    pub fn insert(&mut self, id: ComponentId) -> bool {
        self.ids.insert(id)
    }

    pub fn remove(&mut self, id: ComponentId) -> bool {
        self.ids.remove(&id)
    }

    /// Adds `id` if absent, removes it otherwise. Returns whether it is now selected.
    pub fn toggle(&mut self, id: ComponentId) -> bool {
        if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        }
    }

    pub fn clear(&mut self) -> bool {
        let changed = !self.ids.is_empty();
        self.ids.clear();
        changed
    }

    /// Replaces the whole selection. Returns whether anything changed.
    pub fn replace(&mut self, ids: impl IntoIterator<Item = ComponentId>) -> bool {
        let next: BTreeSet<ComponentId> = ids.into_iter().collect();
        let changed = next != self.ids;
        self.ids = next;
        changed
    }

    /// Drops ids that no longer exist on `canvas`.
    pub fn retain_existing(&mut self, canvas: &Canvas) -> bool {
        let before = self.ids.len();
        self.ids.retain(|id| canvas.contains(*id));
        before != self.ids.len()
    }

    /// Selected ids in canvas order.
    pub fn in_canvas_order(&self, canvas: &Canvas) -> Vec<ComponentId> {
        canvas
            .iter()
            .map(|c| c.id())
            .filter(|id| self.contains(*id))
            .collect()
    }
}

impl FromIterator<ComponentId> for Selection {
    fn from_iter<I: IntoIterator<Item = ComponentId>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}
