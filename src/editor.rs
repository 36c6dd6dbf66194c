use egui::{Pos2, Vec2, pos2};
use log::{debug, info};

use crate::document::{Document, Mutation};
use crate::error::{EditorError, EditorResult};
use crate::geometry::{self, HandleKind};
use crate::history::History;
use crate::input::EditorEvent;
use crate::shape::{ShapeStyle, Tool};
use crate::view::ViewTransform;

/// The gesture currently in progress, if any.
///
/// Pointer events are only meaningful relative to this: a move while
/// `Drawing` resizes the provisional shape, while `Moving` it drags the
/// selection, and so on. `TextPending` is the one state that outlives the
/// pointer gesture; it ends when the text entry is confirmed or canceled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Interaction {
    Idle,
    Drawing,
    Moving { last: Pos2, moved: bool },
    Rotating { last: Pos2, rotated: bool },
    TextPending { anchor: Pos2 },
}

/// Editor settings that survive restarts.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EditorPrefs {
    pub tool: Tool,
    pub style: ShapeStyle,
    pub font_size: f32,
    pub show_labels: bool,
}

impl Default for EditorPrefs {
    fn default() -> Self {
        Self {
            tool: Tool::default(),
            style: ShapeStyle::default(),
            font_size: 16.0,
            show_labels: true,
        }
    }
}

/// Owns all editor state and applies [`EditorEvent`]s to it.
///
/// Every mutation flows through [`Editor::handle_event`] so there is a
/// single place where gestures, history recording, and tool rules meet.
/// Failures leave the state unchanged and are reported as [`EditorError`]s;
/// none of them are fatal.
pub struct Editor {
    document: Document,
    history: History,
    view: ViewTransform,
    tool: Tool,
    interaction: Interaction,
    style: ShapeStyle,
    font_size: f32,
    show_labels: bool,
    cursor: Pos2,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

impl Editor {
    pub fn new() -> Self {
        Self::with_prefs(EditorPrefs::default())
    }

    pub fn with_prefs(prefs: EditorPrefs) -> Self {
        Self {
            document: Document::new(),
            history: History::new(),
            view: ViewTransform::new(),
            tool: prefs.tool,
            interaction: Interaction::Idle,
            style: prefs.style,
            font_size: prefs.font_size,
            show_labels: prefs.show_labels,
            cursor: pos2(0.0, 0.0),
        }
    }

    pub fn prefs(&self) -> EditorPrefs {
        EditorPrefs {
            tool: self.tool,
            style: self.style,
            font_size: self.font_size,
            show_labels: self.show_labels,
        }
    }

    pub fn handle_event(&mut self, event: EditorEvent) -> EditorResult {
        match event {
            EditorEvent::PointerDown(pos) => self.pointer_down(pos),
            EditorEvent::PointerMove(pos) => self.pointer_move(pos),
            EditorEvent::PointerUp(pos) => self.pointer_up(pos),
            EditorEvent::ToolSelected(tool) => {
                self.switch_tool(tool);
                Ok(())
            }
            EditorEvent::CommitText(text) => self.commit_text(text),
            EditorEvent::CancelText => self.cancel_text(),
            EditorEvent::SetLineWidth(width) => self.apply_style(Mutation::LineWidth(width)),
            EditorEvent::SetStrokeColor(color) => self.apply_style(Mutation::StrokeColor(color)),
            EditorEvent::SetFillColor(color) => self.apply_style(Mutation::FillColor(color)),
            EditorEvent::SetOpacity(percent) => {
                self.apply_style(Mutation::Opacity((percent / 100.0).clamp(0.0, 1.0)))
            }
            EditorEvent::SetFontSize(size) => {
                self.font_size = size;
                Ok(())
            }
            EditorEvent::SetRotation(degrees) => {
                self.document.mutate_selected(Mutation::SetRotation(degrees))
            }
            EditorEvent::ZoomIn => {
                self.view.zoom_in();
                Ok(())
            }
            EditorEvent::ZoomOut => {
                self.view.zoom_out();
                Ok(())
            }
            EditorEvent::ResetView => {
                self.view.reset();
                Ok(())
            }
            EditorEvent::Undo => self.undo(),
            EditorEvent::Redo => self.redo(),
            EditorEvent::ClearCanvas => {
                self.clear_canvas();
                Ok(())
            }
            EditorEvent::SetLabelsVisible(visible) => {
                self.show_labels = visible;
                Ok(())
            }
        }
    }

    fn pointer_down(&mut self, pos: Pos2) -> EditorResult {
        self.cursor = pos;
        match self.interaction {
            Interaction::Idle => {}
            // Another press while the text entry is open just moves its
            // anchor, handled below.
            Interaction::TextPending { .. } if self.tool == Tool::Text => {}
            _ => return Err(EditorError::InvalidToolState),
        }
        match self.tool {
            Tool::Select => {
                self.select_or_grab(pos);
                Ok(())
            }
            Tool::Erase => {
                if self.document.remove_topmost_at(pos).is_some() {
                    self.history.record(self.document.shapes());
                }
                Ok(())
            }
            Tool::Text => {
                self.interaction = Interaction::TextPending { anchor: pos };
                Ok(())
            }
            _ => {
                let kind = self
                    .tool
                    .begin_kind(pos)
                    .ok_or(EditorError::InvalidToolState)?;
                self.document.begin_shape(kind, pos, self.style)?;
                self.interaction = Interaction::Drawing;
                Ok(())
            }
        }
    }

    /// Select-tool press: a handle grab on the current selection wins over
    /// re-selection, so the handles stay usable even when another shape
    /// lies underneath them.
    fn select_or_grab(&mut self, pos: Pos2) {
        if let Some(shape) = self.document.selected_shape() {
            let scale = self.view.scale();
            let handles = geometry::selection_handles(geometry::selection_rect(shape), scale);
            match handles.hit(pos, scale) {
                Some(HandleKind::Rotate) => {
                    self.interaction = Interaction::Rotating { last: pos, rotated: false };
                    return;
                }
                Some(HandleKind::Translate) => {
                    self.interaction = Interaction::Moving { last: pos, moved: false };
                    return;
                }
                None => {}
            }
        }
        if self.document.select_at(pos).is_some() {
            self.interaction = Interaction::Moving { last: pos, moved: false };
        }
    }

    fn pointer_move(&mut self, pos: Pos2) -> EditorResult {
        self.cursor = pos;
        match &mut self.interaction {
            Interaction::Idle | Interaction::TextPending { .. } => Ok(()),
            Interaction::Drawing => self.document.update_provisional(pos),
            Interaction::Moving { last, moved } => {
                let delta = pos - *last;
                *last = pos;
                if delta != Vec2::ZERO {
                    *moved = true;
                    self.document.mutate_selected(Mutation::Translate(delta))?;
                }
                Ok(())
            }
            Interaction::Rotating { last, rotated } => {
                let Some(shape) = self.document.selected_shape() else {
                    return Err(EditorError::EmptySelection);
                };
                let center = geometry::rotation_center(shape);
                let prev = *last - center;
                let cur = pos - center;
                *last = pos;
                let mut delta = (cur.y.atan2(cur.x) - prev.y.atan2(prev.x)).to_degrees();
                // Keep the step in (-180, 180] so crossing the atan2 seam
                // does not spin the shape a full turn.
                if delta > 180.0 {
                    delta -= 360.0;
                } else if delta < -180.0 {
                    delta += 360.0;
                }
                if delta != 0.0 {
                    *rotated = true;
                    self.document.mutate_selected(Mutation::Rotate(delta))?;
                }
                Ok(())
            }
        }
    }

    fn pointer_up(&mut self, pos: Pos2) -> EditorResult {
        self.cursor = pos;
        match std::mem::replace(&mut self.interaction, Interaction::Idle) {
            Interaction::Idle => Ok(()),
            Interaction::Drawing => {
                self.document.update_provisional(pos)?;
                self.document.commit_provisional()?;
                self.history.record(self.document.shapes());
                Ok(())
            }
            Interaction::Moving { moved, .. } => {
                if moved {
                    self.history.record(self.document.shapes());
                }
                Ok(())
            }
            Interaction::Rotating { rotated, .. } => {
                if rotated {
                    self.history.record(self.document.shapes());
                }
                Ok(())
            }
            pending @ Interaction::TextPending { .. } => {
                // The entry stays open; releasing the press that anchored
                // it is not a commit.
                self.interaction = pending;
                Ok(())
            }
        }
    }

    fn commit_text(&mut self, text: String) -> EditorResult {
        let Interaction::TextPending { anchor } = self.interaction else {
            return Err(EditorError::InvalidToolState);
        };
        self.interaction = Interaction::Idle;
        let content = text.trim();
        if content.is_empty() {
            return Ok(());
        }
        self.document
            .insert_text(anchor, content.to_owned(), self.style, self.font_size);
        self.history.record(self.document.shapes());
        Ok(())
    }

    fn cancel_text(&mut self) -> EditorResult {
        match self.interaction {
            Interaction::TextPending { .. } => {
                self.interaction = Interaction::Idle;
                Ok(())
            }
            _ => Err(EditorError::InvalidToolState),
        }
    }

    /// Switching tools abandons any gesture in progress. The selection is
    /// kept only when switching to the select tool.
    pub fn switch_tool(&mut self, tool: Tool) {
        self.document.cancel_provisional();
        self.interaction = Interaction::Idle;
        if tool != Tool::Select {
            self.document.clear_selection();
        }
        self.tool = tool;
        debug!("Switched to {} tool", tool.name());
    }

    /// Updates the default style for new shapes and, if a shape is
    /// selected, restyles it as well.
    fn apply_style(&mut self, mutation: Mutation) -> EditorResult {
        match mutation {
            Mutation::LineWidth(width) => self.style.line_width = width,
            Mutation::StrokeColor(color) => self.style.stroke = color,
            Mutation::FillColor(color) => self.style.fill = color,
            Mutation::Opacity(opacity) => self.style.opacity = opacity,
            _ => return Err(EditorError::InvalidToolState),
        }
        if self.document.selected_id().is_some() {
            self.document.mutate_selected(mutation)?;
        }
        Ok(())
    }

    fn undo(&mut self) -> EditorResult {
        let shapes = self.history.undo().ok_or(EditorError::HistoryBoundary)?;
        self.document.restore(shapes);
        self.interaction = Interaction::Idle;
        Ok(())
    }

    fn redo(&mut self) -> EditorResult {
        let shapes = self.history.redo().ok_or(EditorError::HistoryBoundary)?;
        self.document.restore(shapes);
        self.interaction = Interaction::Idle;
        Ok(())
    }

    fn clear_canvas(&mut self) {
        self.document.cancel_provisional();
        self.interaction = Interaction::Idle;
        if !self.document.is_empty() {
            self.document.clear();
            self.history.record(self.document.shapes());
            info!("Canvas cleared");
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn view(&self) -> &ViewTransform {
        &self.view
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn interaction(&self) -> Interaction {
        self.interaction
    }

    /// Last pointer position in model coordinates, for the status bar.
    pub fn cursor_pos(&self) -> Pos2 {
        self.cursor
    }

    pub fn show_labels(&self) -> bool {
        self.show_labels
    }

    pub fn line_width(&self) -> f32 {
        self.style.line_width
    }

    pub fn stroke_color(&self) -> egui::Color32 {
        self.style.stroke
    }

    pub fn fill_color(&self) -> egui::Color32 {
        self.style.fill
    }

    pub fn opacity(&self) -> f32 {
        self.style.opacity
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn selected_rotation(&self) -> Option<f32> {
        self.document.selected_shape().map(|shape| shape.rotation)
    }

    pub fn is_text_pending(&self) -> bool {
        matches!(self.interaction, Interaction::TextPending { .. })
    }

    pub fn text_anchor(&self) -> Option<Pos2> {
        match self.interaction {
            Interaction::TextPending { anchor } => Some(anchor),
            _ => None,
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn history_index(&self) -> usize {
        self.history.index()
    }
}
