use egui::{Pos2, Rect, Vec2, pos2};

use crate::shape::{Shape, ShapeKind};

/// Maximum perpendicular distance at which a point still hits a wall.
pub const WALL_HIT_TOLERANCE: f32 = 5.0;
/// Padding added on each side of a shape's bounds for the selection outline.
pub const SELECTION_PADDING: f32 = 5.0;
/// Screen-space distance of the rotation handle above the selection outline.
pub const ROTATION_HANDLE_OFFSET: f32 = 20.0;
/// Screen-space distance of the move handle below the selection outline.
pub const MOVE_HANDLE_OFFSET: f32 = 10.0;
/// Screen-space radius within which a pointer press grabs a handle.
pub const HANDLE_GRAB_RADIUS: f32 = 8.0;

/// Rotates `point` around `center` by `degrees` (clockwise in screen
/// coordinates, matching the renderer).
pub fn rotate_point(point: Pos2, center: Pos2, degrees: f32) -> Pos2 {
    if degrees == 0.0 {
        return point;
    }
    let (sin, cos) = degrees.to_radians().sin_cos();
    let v = point - center;
    pos2(
        center.x + v.x * cos - v.y * sin,
        center.y + v.x * sin + v.y * cos,
    )
}

/// The pivot a shape rotates about: walls use the segment midpoint, extent
/// kinds the middle of the (signed) drag box, text its anchor point.
pub fn rotation_center(shape: &Shape) -> Pos2 {
    match &shape.kind {
        ShapeKind::Wall { end } => shape.origin + (*end - shape.origin) * 0.5,
        ShapeKind::Rectangle { size }
        | ShapeKind::Circle { size }
        | ShapeKind::Door { size }
        | ShapeKind::Window { size } => shape.origin + *size * 0.5,
        ShapeKind::Text { .. } => shape.origin,
    }
}

/// Approximate width of rendered text. Kept free of any font machinery so
/// hit-testing stays pure; half an em per character is close enough for
/// selection purposes.
pub fn estimated_text_width(content: &str, font_size: f32) -> f32 {
    0.5 * font_size * content.chars().count() as f32
}

/// Tests whether `point` (model coordinates) lies on `shape`.
///
/// The point is first rotated by the inverse of the shape's rotation about
/// its rotation center, so hits agree with the rendered geometry. Text is
/// the exception: its hit box stays axis-aligned regardless of rotation.
pub fn hit_test(shape: &Shape, point: Pos2) -> bool {
    let point = match shape.kind {
        ShapeKind::Text { .. } => point,
        _ => rotate_point(point, rotation_center(shape), -shape.rotation),
    };
    match &shape.kind {
        ShapeKind::Wall { end } => {
            distance_to_line(point, shape.origin, *end) < WALL_HIT_TOLERANCE
        }
        ShapeKind::Rectangle { size } | ShapeKind::Door { size } | ShapeKind::Window { size } => {
            extent_rect(shape.origin, *size).contains(point)
        }
        ShapeKind::Circle { size } => {
            let center = shape.origin + *size * 0.5;
            let radius = size.length() * 0.5;
            (point - center).length() <= radius
        }
        ShapeKind::Text { content, font_size } => {
            text_rect(shape.origin, content, *font_size).contains(point)
        }
    }
}

/// Axis-aligned bounds of the unrotated shape geometry.
pub fn bounding_box(shape: &Shape) -> Rect {
    match &shape.kind {
        ShapeKind::Wall { end } => Rect::from_two_pos(shape.origin, *end),
        ShapeKind::Rectangle { size }
        | ShapeKind::Circle { size }
        | ShapeKind::Door { size }
        | ShapeKind::Window { size } => extent_rect(shape.origin, *size),
        ShapeKind::Text { content, font_size } => text_rect(shape.origin, content, *font_size),
    }
}

/// Bounds of the selection outline drawn around a selected shape.
pub fn selection_rect(shape: &Shape) -> Rect {
    bounding_box(shape).expand(SELECTION_PADDING)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleKind {
    Rotate,
    Translate,
}

/// Model-space positions of the two selection handles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionHandles {
    pub rotate: Pos2,
    pub translate: Pos2,
}

impl SelectionHandles {
    /// Which handle, if any, a press at `point` grabs. Tolerance is
    /// screen-constant, hence divided by the zoom scale.
    pub fn hit(&self, point: Pos2, scale: f32) -> Option<HandleKind> {
        let tolerance = HANDLE_GRAB_RADIUS / scale;
        let tolerance_sq = tolerance * tolerance;
        if (point - self.rotate).length_sq() <= tolerance_sq {
            Some(HandleKind::Rotate)
        } else if (point - self.translate).length_sq() <= tolerance_sq {
            Some(HandleKind::Translate)
        } else {
            None
        }
    }
}

/// Handle positions for a selection outline. The offsets are constant on
/// screen, so they shrink in model space as the view zooms in.
pub fn selection_handles(selection: Rect, scale: f32) -> SelectionHandles {
    let center_x = selection.center().x;
    SelectionHandles {
        rotate: pos2(center_x, selection.min.y - ROTATION_HANDLE_OFFSET / scale),
        translate: pos2(center_x, selection.max.y + MOVE_HANDLE_OFFSET / scale),
    }
}

/// Distance from `point` to the infinite line through `a` and `b`.
///
/// Deliberately not clamped to the segment: points beyond the endpoints
/// but inside the corridor still count as wall hits.
fn distance_to_line(point: Pos2, a: Pos2, b: Pos2) -> f32 {
    let d = b - a;
    let len = d.length();
    if len == 0.0 {
        return (point - a).length();
    }
    ((d.y * point.x - d.x * point.y + b.x * a.y - b.y * a.x) / len).abs()
}

/// Normalized rectangle for a signed drag extent.
fn extent_rect(origin: Pos2, size: Vec2) -> Rect {
    Rect::from_two_pos(origin, origin + size)
}

/// Text hit box, anchored at the baseline: it extends upward from the
/// origin by the font size and rightward by the estimated width.
fn text_rect(origin: Pos2, content: &str, font_size: f32) -> Rect {
    Rect::from_min_max(
        pos2(origin.x, origin.y - font_size),
        pos2(origin.x + estimated_text_width(content, font_size), origin.y),
    )
}
