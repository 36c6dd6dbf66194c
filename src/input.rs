use egui::{Color32, Context, LayerId, PointerButton, Pos2, Rect};

use crate::shape::Tool;
use crate::view::ViewTransform;

/// A normalized editor command, in model coordinates where positional.
///
/// The UI layer produces these; the editor consumes them. Pointer events
/// are already translated through the view transform, so the editor never
/// sees screen coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    PointerDown(Pos2),
    PointerMove(Pos2),
    PointerUp(Pos2),
    ToolSelected(Tool),
    CommitText(String),
    CancelText,
    SetLineWidth(f32),
    SetStrokeColor(Color32),
    SetFillColor(Color32),
    /// Opacity as a percentage, 0 to 100, as the panel slider reports it.
    SetOpacity(f32),
    SetFontSize(f32),
    SetRotation(f32),
    ZoomIn,
    ZoomOut,
    ResetView,
    Undo,
    Redo,
    ClearCanvas,
    SetLabelsVisible(bool),
}

/// Converts raw egui pointer state into canvas-space pointer events.
///
/// Tracks the primary button across frames so a drag that wanders out of
/// the canvas keeps reporting moves, and a drag that ends off-window still
/// gets a release at the last known position.
#[derive(Debug, Default)]
pub struct PointerTranslator {
    last_pointer_pos: Option<Pos2>,
    primary_down: bool,
}

impl PointerTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Polls egui for pointer changes since the last frame.
    ///
    /// Raw state is read in a single `ctx.input` call and processed
    /// afterwards; `Context::layer_id_at` takes the same lock and must not
    /// be called from inside the closure.
    pub fn poll(
        &mut self,
        ctx: &Context,
        canvas_rect: Rect,
        canvas_layer: LayerId,
        view: &ViewTransform,
    ) -> Vec<EditorEvent> {
        let (hover, pressed, released) = ctx.input(|input| {
            (
                input.pointer.hover_pos(),
                input.pointer.button_pressed(PointerButton::Primary),
                input.pointer.button_released(PointerButton::Primary),
            )
        });

        let mut events = Vec::new();
        let to_model = |pos: Pos2| view.to_model(canvas_rect.min, pos);

        if let Some(pos) = hover {
            if self.last_pointer_pos != Some(pos) && (canvas_rect.contains(pos) || self.primary_down)
            {
                events.push(EditorEvent::PointerMove(to_model(pos)));
            }
            self.last_pointer_pos = Some(pos);
        }

        if pressed {
            if let Some(pos) = hover {
                // Only a press that lands on the canvas layer itself starts a
                // gesture; presses on floating windows above it do not.
                if canvas_rect.contains(pos) && ctx.layer_id_at(pos) == Some(canvas_layer) {
                    events.push(EditorEvent::PointerDown(to_model(pos)));
                    self.primary_down = true;
                }
            }
        }

        if released && self.primary_down {
            if let Some(pos) = hover.or(self.last_pointer_pos) {
                events.push(EditorEvent::PointerUp(to_model(pos)));
            }
            self.primary_down = false;
        }

        if hover.is_none() {
            if self.primary_down {
                // Pointer left the window mid-drag; end the gesture where it
                // was last seen.
                if let Some(pos) = self.last_pointer_pos {
                    events.push(EditorEvent::PointerUp(to_model(pos)));
                }
                self.primary_down = false;
            }
            self.last_pointer_pos = None;
        }

        events
    }
}
