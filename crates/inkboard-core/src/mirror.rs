//! Collaborator that mirrors local mutations to an external store.
//!
//! The session applies every change locally first and then notifies the
//! mirror. Failures are logged and never roll back local state.

use crate::elements::{Element, ElementId, ElementPatch};
use std::sync::{Arc, RwLock};
use thiserror::Error;

/// Mirror errors.
#[derive(Debug, Error)]
pub enum MirrorError {
    #[error("Element not found: {0}")]
    NotFound(ElementId),
    #[error("Access denied: {0}")]
    AccessDenied(String),
    #[error("Mirror unavailable: {0}")]
    Unavailable(String),
}

/// Result type for mirror operations.
pub type MirrorResult<T> = Result<T, MirrorError>;

/// Receives each element-level mutation made by the session.
pub trait ElementMirror {
    fn add_element(&self, element: &Element) -> MirrorResult<()>;

    fn update_element(&self, id: ElementId, patch: &ElementPatch) -> MirrorResult<()>;

    fn delete_element(&self, id: ElementId) -> MirrorResult<()>;
}

#[derive(Debug, Default)]
struct MirrorState {
    elements: Vec<Element>,
    offline: bool,
    calls: usize,
}

/// In-memory mirror for tests and headless hosts.
///
/// Clones share state, so a test can keep one handle while the session owns
/// another.
#[derive(Debug, Clone, Default)]
pub struct MemoryMirror {
    state: Arc<RwLock<MirrorState>>,
}

impl MemoryMirror {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mirror pre-populated with a seed collection.
    pub fn with_elements(elements: Vec<Element>) -> Self {
        let mirror = Self::new();
        if let Ok(mut state) = mirror.state.write() {
            state.elements = elements;
        }
        mirror
    }

    /// While offline every call fails with [`MirrorError::Unavailable`].
    pub fn set_offline(&self, offline: bool) {
        if let Ok(mut state) = self.state.write() {
            state.offline = offline;
        }
    }

    /// Copy of the mirrored collection.
    pub fn elements(&self) -> Vec<Element> {
        self.state
            .read()
            .map(|state| state.elements.clone())
            .unwrap_or_default()
    }

    pub fn ids(&self) -> Vec<ElementId> {
        self.elements().iter().map(Element::id).collect()
    }

    /// Number of calls received, including failed ones.
    pub fn call_count(&self) -> usize {
        self.state.read().map(|state| state.calls).unwrap_or(0)
    }

    fn with_state<T>(&self, f: impl FnOnce(&mut MirrorState) -> MirrorResult<T>) -> MirrorResult<T> {
        let mut state = self
            .state
            .write()
            .map_err(|e| MirrorError::Unavailable(format!("Lock error: {}", e)))?;
        state.calls += 1;
        if state.offline {
            return Err(MirrorError::Unavailable("offline".to_string()));
        }
        f(&mut *state)
    }
}

impl ElementMirror for MemoryMirror {
    fn add_element(&self, element: &Element) -> MirrorResult<()> {
        self.with_state(|state| {
            state.elements.retain(|e| e.id() != element.id());
            state.elements.push(element.clone());
            Ok(())
        })
    }

    fn update_element(&self, id: ElementId, patch: &ElementPatch) -> MirrorResult<()> {
        self.with_state(|state| {
            let element = state
                .elements
                .iter_mut()
                .find(|e| e.id() == id)
                .ok_or(MirrorError::NotFound(id))?;
            element.apply_patch(patch);
            Ok(())
        })
    }

    fn delete_element(&self, id: ElementId) -> MirrorResult<()> {
        self.with_state(|state| {
            let before = state.elements.len();
            state.elements.retain(|e| e.id() != id);
            if state.elements.len() == before {
                return Err(MirrorError::NotFound(id));
            }
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{ElementStyle, Rectangle};
    use kurbo::Point;
    use uuid::Uuid;

    fn rect() -> Element {
        Rectangle::new(Point::ZERO, 10.0, 10.0, ElementStyle::rectangle()).into()
    }

    #[test]
    fn test_add_update_delete() {
        let mirror = MemoryMirror::new();
        let element = rect();
        let id = element.id();
        mirror.add_element(&element).unwrap();
        assert_eq!(mirror.ids(), vec![id]);

        mirror.update_element(id, &ElementPatch::position(5.0, 5.0)).unwrap();
        assert_eq!(mirror.elements()[0].origin(), Point::new(5.0, 5.0));

        mirror.delete_element(id).unwrap();
        assert!(mirror.elements().is_empty());
        assert_eq!(mirror.call_count(), 3);
    }

    #[test]
    fn test_unknown_id_is_not_found() {
        let mirror = MemoryMirror::new();
        let id = Uuid::new_v4();
        assert!(matches!(mirror.delete_element(id), Err(MirrorError::NotFound(missing)) if missing == id));
        assert!(matches!(
            mirror.update_element(id, &ElementPatch::new()),
            Err(MirrorError::NotFound(_))
        ));
    }

    #[test]
    fn test_offline_fails_every_call() {
        let mirror = MemoryMirror::new();
        mirror.set_offline(true);
        assert!(matches!(mirror.add_element(&rect()), Err(MirrorError::Unavailable(_))));
        assert!(mirror.elements().is_empty());
        mirror.set_offline(false);
        assert!(mirror.add_element(&rect()).is_ok());
    }

    #[test]
    fn test_clones_share_state() {
        let mirror = MemoryMirror::with_elements(vec![rect()]);
        let handle = mirror.clone();
        mirror.add_element(&rect()).unwrap();
        assert_eq!(handle.elements().len(), 2);
    }
}
