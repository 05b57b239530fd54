//! Snapshot-based linear undo/redo.

use crate::elements::Element;

/// Default number of snapshots kept.
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Linear history of full collection snapshots.
///
/// `index` always names the snapshot that matches the live collection, so
/// the history must be seeded with a baseline before the first change.
#[derive(Debug, Clone)]
pub struct History {
    snapshots: Vec<Vec<Element>>,
    index: usize,
    limit: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::with_limit(DEFAULT_HISTORY_LIMIT)
    }
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// History holding at most `limit` snapshots (at least 1).
    pub fn with_limit(limit: usize) -> Self {
        Self {
            snapshots: Vec::new(),
            index: 0,
            limit: limit.max(1),
        }
    }

    /// Push a copy of `elements`, discarding any redo branch.
    pub fn record(&mut self, elements: &[Element]) {
        if !self.snapshots.is_empty() {
            self.snapshots.truncate(self.index + 1);
        }
        self.snapshots.push(elements.to_vec());

        // Limit history size
        if self.snapshots.len() > self.limit {
            let excess = self.snapshots.len() - self.limit;
            self.snapshots.drain(..excess);
        }
        self.index = self.snapshots.len() - 1;
    }

    /// Step back. Returns the snapshot to restore, or `None` at the start.
    pub fn undo(&mut self) -> Option<&[Element]> {
        if !self.can_undo() {
            return None;
        }
        self.index -= 1;
        self.snapshots.get(self.index).map(Vec::as_slice)
    }

    /// Step forward. Returns the snapshot to restore, or `None` at the end.
    pub fn redo(&mut self) -> Option<&[Element]> {
        if !self.can_redo() {
            return None;
        }
        self.index += 1;
        self.snapshots.get(self.index).map(Vec::as_slice)
    }

    /// Check if an older snapshot exists.
    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    /// Check if a newer snapshot exists.
    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.snapshots.len()
    }

    /// The snapshot matching the live collection.
    pub fn current(&self) -> Option<&[Element]> {
        self.snapshots.get(self.index).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Drop everything; the next `record` becomes the baseline.
    pub fn clear(&mut self) {
        self.snapshots.clear();
        self.index = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{ElementStyle, Rectangle};
    use kurbo::Point;

    fn rect(x: f64) -> Element {
        Rectangle::new(Point::new(x, 0.0), 10.0, 10.0, ElementStyle::rectangle()).into()
    }

    #[test]
    fn test_empty_history() {
        let mut history = History::new();
        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert!(history.undo().is_none());
        assert!(history.redo().is_none());
        assert!(history.current().is_none());
    }

    #[test]
    fn test_baseline_then_change_is_undoable() {
        let mut history = History::new();
        history.record(&[]);
        assert!(!history.can_undo());

        let a = rect(0.0);
        history.record(std::slice::from_ref(&a));
        assert!(history.can_undo());
        assert!(!history.can_redo());

        assert_eq!(history.undo(), Some(&[][..]));
        assert!(history.can_redo());
        assert_eq!(history.redo(), Some(std::slice::from_ref(&a)));
    }

    #[test]
    fn test_record_after_undo_truncates_redo() {
        let mut history = History::new();
        let (a, b, c) = (rect(0.0), rect(1.0), rect(2.0));
        history.record(&[]);
        history.record(&[a.clone()]);
        history.record(&[a.clone(), b]);
        history.undo();
        assert!(history.can_redo());

        history.record(&[a.clone(), c.clone()]);
        assert!(!history.can_redo());
        assert_eq!(history.len(), 3);
        assert_eq!(history.current(), Some(&[a, c][..]));
    }

    #[test]
    fn test_undo_past_start_is_noop() {
        let mut history = History::new();
        history.record(&[]);
        history.record(&[rect(0.0)]);
        assert!(history.undo().is_some());
        assert!(history.undo().is_none());
        assert_eq!(history.index(), 0);
    }

    #[test]
    fn test_limit_drops_oldest() {
        let mut history = History::with_limit(3);
        for i in 0..5 {
            history.record(&[rect(i as f64)]);
        }
        assert_eq!(history.len(), 3);
        assert_eq!(history.index(), 2);
        let oldest_x = |h: &mut History| {
            while h.undo().is_some() {}
            h.current().unwrap()[0].origin().x
        };
        assert!((oldest_x(&mut history) - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_index_stays_in_bounds() {
        let mut history = History::with_limit(2);
        history.record(&[]);
        history.record(&[rect(0.0)]);
        history.undo();
        history.record(&[rect(1.0)]);
        history.record(&[rect(2.0)]);
        assert!(history.index() < history.len());
        assert!(history.can_undo());
        assert!(!history.can_redo());
    }
}
