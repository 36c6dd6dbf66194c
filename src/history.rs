use log::debug;

use crate::shape::Shape;

/// Linear undo history of full canvas snapshots.
///
/// Entry 0 is always the empty canvas, so undoing the first edit lands on
/// a blank sheet. Recording while not at the tail truncates the redo arm
/// before pushing.
#[derive(Debug, Clone)]
pub struct History {
    snapshots: Vec<Vec<Shape>>,
    index: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    pub fn new() -> Self {
        Self {
            snapshots: vec![Vec::new()],
            index: 0,
        }
    }

    /// Records the canvas as it stands after a completed edit.
    pub fn record(&mut self, shapes: &[Shape]) {
        self.snapshots.truncate(self.index + 1);
        self.snapshots.push(shapes.to_vec());
        self.index = self.snapshots.len() - 1;
        debug!("Recorded snapshot {} ({} shapes)", self.index, shapes.len());
    }

    /// Steps back one snapshot and returns it, or `None` at the start.
    pub fn undo(&mut self) -> Option<Vec<Shape>> {
        if !self.can_undo() {
            return None;
        }
        self.index -= 1;
        Some(self.snapshots[self.index].clone())
    }

    /// Steps forward one snapshot and returns it, or `None` at the tail.
    pub fn redo(&mut self) -> Option<Vec<Shape>> {
        if !self.can_redo() {
            return None;
        }
        self.index += 1;
        Some(self.snapshots[self.index].clone())
    }

    /// Whether there is a snapshot to undo to
    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    /// Whether there is a snapshot to redo to
    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.snapshots.len()
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
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::{ShapeKind, ShapeStyle};
    use egui::{pos2, vec2};

    fn rect(x: f32) -> Shape {
        Shape::new(
            ShapeKind::Rectangle { size: vec2(10.0, 10.0) },
            pos2(x, 0.0),
            ShapeStyle::default(),
        )
    }

    #[test]
    fn test_starts_with_empty_baseline() {
        let mut history = History::new();
        assert_eq!(history.len(), 1);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert_eq!(history.undo(), None);
        assert_eq!(history.redo(), None);
    }

    #[test]
    fn test_undo_redo_walk() {
        let mut history = History::new();
        let first = vec![rect(0.0)];
        let second = vec![rect(0.0), rect(20.0)];
        history.record(&first);
        history.record(&second);

        assert_eq!(history.undo().as_deref(), Some(first.as_slice()));
        assert!(history.can_redo());
        assert_eq!(history.undo().as_deref(), Some([].as_slice()));
        assert!(!history.can_undo());
        assert_eq!(history.redo().as_deref(), Some(first.as_slice()));
        assert_eq!(history.redo().as_deref(), Some(second.as_slice()));
        assert!(!history.can_redo());
    }

    #[test]
    fn test_record_truncates_redo_arm() {
        let mut history = History::new();
        let first = vec![rect(0.0)];
        history.record(&first);
        history.record(&[rect(0.0), rect(20.0)]);
        history.undo();
        assert!(history.can_redo());

        let replacement = vec![rect(0.0), rect(40.0)];
        history.record(&replacement);
        assert!(!history.can_redo());
        assert_eq!(history.len(), 3);
        assert_eq!(history.undo().as_deref(), Some(first.as_slice()));
        assert_eq!(history.redo().as_deref(), Some(replacement.as_slice()));
    }
}
