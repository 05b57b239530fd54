//! Ordered element collection.

use crate::elements::{Element, ElementId, ElementPatch};
use kurbo::Rect;
use uuid::Uuid;

/// The ordered element collection.
///
/// Order is paint order: later elements paint on top and win hit-tests.
/// Ids are unique; [`ElementStore::add`] assigns a fresh id when needed.
/// This type knows nothing about history; the session records snapshots
/// around user-level changes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementStore {
    elements: Vec<Element>,
}

impl ElementStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from a seed list. Duplicate or nil ids are replaced.
    pub fn from_elements(elements: Vec<Element>) -> Self {
        let mut store = Self::new();
        store.replace_all(elements);
        store
    }

    /// Append an element and return its id.
    pub fn add(&mut self, mut element: Element) -> ElementId {
        if element.id().is_nil() || self.contains(element.id()) {
            element.set_id(Uuid::new_v4());
        }
        let id = element.id();
        self.elements.push(element);
        id
    }

    /// Apply a partial update. Returns false for an unknown id.
    pub fn update(&mut self, id: ElementId, patch: &ElementPatch) -> bool {
        match self.get_mut(id) {
            Some(element) => {
                element.apply_patch(patch);
                true
            }
            None => false,
        }
    }

    /// Remove an element, returning it. Unknown ids are a no-op.
    pub fn remove(&mut self, id: ElementId) -> Option<Element> {
        let index = self.index_of(id)?;
        Some(self.elements.remove(index))
    }

    /// Remove every listed element, returning the ones that existed, in
    /// collection order.
    pub fn remove_many(&mut self, ids: &[ElementId]) -> Vec<Element> {
        let mut removed = Vec::new();
        let mut kept = Vec::with_capacity(self.elements.len());
        for element in self.elements.drain(..) {
            if ids.contains(&element.id()) {
                removed.push(element);
            } else {
                kept.push(element);
            }
        }
        self.elements = kept;
        removed
    }

    /// Replace the whole collection, keeping ids unique.
    pub fn replace_all(&mut self, elements: Vec<Element>) {
        self.elements.clear();
        for element in elements {
            self.add(element);
        }
    }

    /// Remove every element.
    pub fn clear(&mut self) {
        self.elements.clear();
    }

    /// Elements in paint order (back to front).
    pub fn list(&self) -> &[Element] {
        &self.elements
    }

    /// Get an element by id.
    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| e.id() == id)
    }

    fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| e.id() == id)
    }

    /// Check if an element with this id exists.
    pub fn contains(&self, id: ElementId) -> bool {
        self.index_of(id).is_some()
    }

    /// Position of an element in paint order.
    pub fn index_of(&self, id: ElementId) -> Option<usize> {
        self.elements.iter().position(|e| e.id() == id)
    }

    /// Element ids in paint order.
    pub fn ids(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.elements.iter().map(Element::id)
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Check if the store has no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Union of all element bounds, or `None` when empty.
    pub fn bounds(&self) -> Option<Rect> {
        self.elements
            .iter()
            .map(Element::bounds)
            .reduce(|acc, b| acc.union(b))
    }
}
