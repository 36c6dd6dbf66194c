use egui::{Pos2, Vec2, pos2};

/// Multiplicative step applied per zoom click.
pub const ZOOM_STEP: f32 = 1.1;

/// Maps model coordinates to screen coordinates within the canvas panel.
///
/// A screen point is `canvas_origin + offset + model * scale`. The offset
/// is in screen units and is not scaled, so panning feels the same at any
/// zoom level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    scale: f32,
    offset: Vec2,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            scale: 1.0,
            offset: Vec2::ZERO,
        }
    }
}

impl ViewTransform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    pub fn to_screen(&self, canvas_origin: Pos2, model: Pos2) -> Pos2 {
        pos2(
            canvas_origin.x + self.offset.x + model.x * self.scale,
            canvas_origin.y + self.offset.y + model.y * self.scale,
        )
    }

    pub fn to_model(&self, canvas_origin: Pos2, screen: Pos2) -> Pos2 {
        pos2(
            (screen.x - canvas_origin.x - self.offset.x) / self.scale,
            (screen.y - canvas_origin.y - self.offset.y) / self.scale,
        )
    }

    pub fn zoom_in(&mut self) {
        self.scale *= ZOOM_STEP;
    }

    pub fn zoom_out(&mut self) {
        self.scale /= ZOOM_STEP;
    }

    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Current zoom as a whole percentage for the status bar.
    pub fn zoom_percent(&self) -> i32 {
        (self.scale * 100.0).round() as i32
    }
}
