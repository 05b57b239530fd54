//! Selected element ids.

use crate::elements::ElementId;

/// Insertion-ordered set of selected element ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: Vec<ElementId>,
}

impl Selection {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if an id is selected.
    pub fn contains(&self, id: ElementId) -> bool {
        self.ids.contains(&id)
    }

    /// Add an id. Returns false if it was already selected.
    pub fn insert(&mut self, id: ElementId) -> bool {
        if self.contains(id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    /// Deselect an id. Returns false if it was not selected.
    pub fn remove(&mut self, id: ElementId) -> bool {
        let before = self.ids.len();
        self.ids.retain(|&selected| selected != id);
        self.ids.len() != before
    }

    /// Flip membership of `id`.
    pub fn toggle(&mut self, id: ElementId) {
        if !self.remove(id) {
            self.ids.push(id);
        }
    }

    /// Make `id` the only selected element.
    pub fn select_only(&mut self, id: ElementId) {
        self.ids.clear();
        self.ids.push(id);
    }

    /// Deselect everything.
    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Drop every id the predicate rejects.
    pub fn retain(&mut self, mut keep: impl FnMut(ElementId) -> bool) {
        self.ids.retain(|&id| keep(id));
    }

    /// Selected ids in the order they were added.
    pub fn ids(&self) -> &[ElementId] {
        &self.ids
    }

    /// Number of selected ids.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Check if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_toggle() {
        let mut selection = Selection::new();
        let id = Uuid::new_v4();
        selection.toggle(id);
        assert!(selection.contains(id));
        selection.toggle(id);
        assert!(selection.is_empty());
    }

    #[test]
    fn test_select_only_replaces() {
        let mut selection = Selection::new();
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        selection.insert(a);
        selection.select_only(b);
        assert_eq!(selection.ids(), &[b]);
    }

    #[test]
    fn test_insert_is_idempotent() {
        let mut selection = Selection::new();
        let id = Uuid::new_v4();
        assert!(selection.insert(id));
        assert!(!selection.insert(id));
        assert_eq!(selection.len(), 1);
    }

    #[test]
    fn test_retain_keeps_order() {
        let mut selection = Selection::new();
        let ids: Vec<_> = (0..4).map(|_| Uuid::new_v4()).collect();
        for id in &ids {
            selection.insert(*id);
        }
        selection.retain(|id| id != ids[1]);
        assert_eq!(selection.ids(), &[ids[0], ids[2], ids[3]]);
    }
}
