use egui::{Color32, Pos2, Vec2};
use log::debug;

use crate::error::{EditorError, EditorResult};
use crate::geometry;
use crate::shape::{Shape, ShapeId, ShapeKind, ShapeStyle};

/// An edit applied to the selected shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Mutation {
    Translate(Vec2),
    Rotate(f32),
    SetRotation(f32),
    LineWidth(f32),
    StrokeColor(Color32),
    FillColor(Color32),
    Opacity(f32),
}

/// The set of shapes on the canvas, plus the in-progress shape and the
/// current selection.
///
/// Shapes are kept in insertion order; later shapes sit on top for
/// hit-testing and erasing. Only the committed shapes participate in
/// history snapshots.
#[derive(Debug, Clone, Default)]
pub struct Document {
    shapes: Vec<Shape>,
    provisional: Option<Shape>,
    selected: Option<ShapeId>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn provisional(&self) -> Option<&Shape> {
        self.provisional.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Starts a new provisional shape at `origin`.
    pub fn begin_shape(&mut self, kind: ShapeKind, origin: Pos2, style: ShapeStyle) -> EditorResult {
        if self.provisional.is_some() {
            return Err(EditorError::InvalidToolState);
        }
        self.provisional = Some(Shape::new(kind, origin, style));
        Ok(())
    }

    /// Reshapes the provisional shape so its far edge tracks the pointer.
    pub fn update_provisional(&mut self, to: Pos2) -> EditorResult {
        let Some(shape) = self.provisional.as_mut() else {
            return Err(EditorError::NothingToCommit);
        };
        match &mut shape.kind {
            ShapeKind::Wall { end } => *end = to,
            ShapeKind::Rectangle { size }
            | ShapeKind::Circle { size }
            | ShapeKind::Door { size }
            | ShapeKind::Window { size } => *size = to - shape.origin,
            ShapeKind::Text { .. } => return Err(EditorError::InvalidToolState),
        }
        Ok(())
    }

    /// Moves the provisional shape into the committed set and returns its id.
    pub fn commit_provisional(&mut self) -> Result<ShapeId, EditorError> {
        let shape = self.provisional.take().ok_or(EditorError::NothingToCommit)?;
        let id = shape.id;
        self.shapes.push(shape);
        Ok(id)
    }

    /// Discards the provisional shape, if any.
    pub fn cancel_provisional(&mut self) {
        self.provisional = None;
    }

    /// Adds a committed text shape anchored at `origin`.
    pub fn insert_text(
        &mut self,
        origin: Pos2,
        content: String,
        style: ShapeStyle,
        font_size: f32,
    ) -> ShapeId {
        let shape = Shape::new(ShapeKind::Text { content, font_size }, origin, style);
        let id = shape.id;
        self.shapes.push(shape);
        id
    }

    /// Selects the topmost shape under `point`, or clears the selection if
    /// nothing is there. Returns the new selection.
    pub fn select_at(&mut self, point: Pos2) -> Option<ShapeId> {
        self.selected = self
            .shapes
            .iter()
            .rev()
            .find(|shape| geometry::hit_test(shape, point))
            .map(|shape| shape.id);
        self.selected
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn selected_id(&self) -> Option<ShapeId> {
        self.selected
    }

    pub fn selected_shape(&self) -> Option<&Shape> {
        let id = self.selected?;
        self.shapes.iter().find(|shape| shape.id == id)
    }

    fn selected_shape_mut(&mut self) -> Option<&mut Shape> {
        let id = self.selected?;
        self.shapes.iter_mut().find(|shape| shape.id == id)
    }

    /// Applies `mutation` to the selected shape.
    pub fn mutate_selected(&mut self, mutation: Mutation) -> EditorResult {
        let shape = self.selected_shape_mut().ok_or(EditorError::EmptySelection)?;
        match mutation {
            Mutation::Translate(delta) => {
                shape.origin += delta;
                // A wall's endpoint is absolute and must move with it.
                if let ShapeKind::Wall { end } = &mut shape.kind {
                    *end += delta;
                }
            }
            Mutation::Rotate(delta) => shape.rotation += delta,
            Mutation::SetRotation(degrees) => shape.rotation = degrees,
            Mutation::LineWidth(width) => shape.style.line_width = width,
            Mutation::StrokeColor(color) => shape.style.stroke = color,
            Mutation::FillColor(color) => shape.style.fill = color,
            Mutation::Opacity(opacity) => shape.style.opacity = opacity,
        }
        Ok(())
    }

    /// Removes the topmost shape under `point`. Returns the removed shape's
    /// id, or `None` when the point hits nothing.
    pub fn remove_topmost_at(&mut self, point: Pos2) -> Option<ShapeId> {
        let index = self
            .shapes
            .iter()
            .rposition(|shape| geometry::hit_test(shape, point))?;
        let removed = self.shapes.remove(index);
        if self.selected == Some(removed.id) {
            self.selected = None;
        }
        debug!("Erased {} {}", removed.kind_name(), removed.id);
        Some(removed.id)
    }

    /// Removes every shape, the provisional shape, and the selection.
    pub fn clear(&mut self) {
        self.shapes.clear();
        self.provisional = None;
        self.selected = None;
    }

    /// Replaces the committed shapes wholesale, as undo and redo do. The
    /// provisional shape is dropped and a selection that no longer resolves
    /// is cleared.
    pub fn restore(&mut self, shapes: Vec<Shape>) {
        self.shapes = shapes;
        self.provisional = None;
        if let Some(id) = self.selected {
            if !self.shapes.iter().any(|shape| shape.id == id) {
                self.selected = None;
            }
        }
    }
}
