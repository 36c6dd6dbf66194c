use egui::{Color32, CursorIcon, Pos2, Vec2};
use uuid::Uuid;

/// Stable identifier for a committed or provisional shape.
pub type ShapeId = Uuid;

/// Stroke/fill styling shared by every shape kind.
///
/// `opacity` is stored normalized to `0.0..=1.0`; the property panel edits
/// it as a 0-100 percentage.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ShapeStyle {
    pub line_width: f32,
    pub stroke: Color32,
    pub fill: Color32,
    pub opacity: f32,
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            line_width: 2.0,
            stroke: Color32::BLACK,
            fill: Color32::WHITE,
            opacity: 1.0,
        }
    }
}

/// Per-kind payload of a shape.
///
/// Extent sizes are signed: they record the drag direction, and negative
/// components are normalized only where bounds are needed. A circle's
/// radius is half the Euclidean norm of its size vector (half the diagonal
/// of the drag box, not the drag distance).
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeKind {
    Wall { end: Pos2 },
    Rectangle { size: Vec2 },
    Circle { size: Vec2 },
    Door { size: Vec2 },
    Window { size: Vec2 },
    Text { content: String, font_size: f32 },
}

/// A drawable primitive on the floor plan.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub id: ShapeId,
    pub origin: Pos2,
    pub style: ShapeStyle,
    /// Rotation in degrees, applied about the shape's rotation center.
    pub rotation: f32,
    pub kind: ShapeKind,
}

impl Shape {
    pub fn new(kind: ShapeKind, origin: Pos2, style: ShapeStyle) -> Self {
        Self {
            id: Uuid::new_v4(),
            origin,
            style,
            rotation: 0.0,
            kind,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            ShapeKind::Wall { .. } => "wall",
            ShapeKind::Rectangle { .. } => "rectangle",
            ShapeKind::Circle { .. } => "circle",
            ShapeKind::Door { .. } => "door",
            ShapeKind::Window { .. } => "window",
            ShapeKind::Text { .. } => "text",
        }
    }

    /// Canvas label for this kind. Text shapes are never labelled.
    pub fn label(&self) -> Option<&'static str> {
        match self.kind {
            ShapeKind::Wall { .. } => Some("Wall"),
            ShapeKind::Rectangle { .. } => Some("Rectangle"),
            ShapeKind::Circle { .. } => Some("Circle"),
            ShapeKind::Door { .. } => Some("Door"),
            ShapeKind::Window { .. } => Some("Window"),
            ShapeKind::Text { .. } => None,
        }
    }
}

/// The active editing tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum Tool {
    #[default]
    Select,
    Wall,
    Rectangle,
    Circle,
    Door,
    Window,
    Erase,
    Text,
}

impl Tool {
    pub const ALL: [Tool; 8] = [
        Tool::Select,
        Tool::Wall,
        Tool::Rectangle,
        Tool::Circle,
        Tool::Door,
        Tool::Window,
        Tool::Erase,
        Tool::Text,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Tool::Select => "Select",
            Tool::Wall => "Wall",
            Tool::Rectangle => "Rectangle",
            Tool::Circle => "Circle",
            Tool::Door => "Door",
            Tool::Window => "Window",
            Tool::Erase => "Erase",
            Tool::Text => "Text",
        }
    }

    pub fn is_draw(self) -> bool {
        matches!(
            self,
            Tool::Wall | Tool::Rectangle | Tool::Circle | Tool::Door | Tool::Window
        )
    }

    /// Initial kind payload for a draw gesture starting at `origin`.
    /// `None` for tools that do not drag out a shape.
    pub fn begin_kind(self, origin: Pos2) -> Option<ShapeKind> {
        match self {
            Tool::Wall => Some(ShapeKind::Wall { end: origin }),
            Tool::Rectangle => Some(ShapeKind::Rectangle { size: Vec2::ZERO }),
            Tool::Circle => Some(ShapeKind::Circle { size: Vec2::ZERO }),
            Tool::Door => Some(ShapeKind::Door { size: Vec2::ZERO }),
            Tool::Window => Some(ShapeKind::Window { size: Vec2::ZERO }),
            Tool::Select | Tool::Erase | Tool::Text => None,
        }
    }

    pub fn cursor_icon(self) -> CursorIcon {
        match self {
            Tool::Select => CursorIcon::Default,
            Tool::Erase => CursorIcon::NotAllowed,
            Tool::Text => CursorIcon::Text,
            _ => CursorIcon::Crosshair,
        }
    }
}
