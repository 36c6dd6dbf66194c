use egui::epaint::TextShape;
use egui::{Align2, Color32, FontId, Painter, Pos2, Rect, Stroke, Vec2, pos2, vec2};

use crate::editor::Editor;
use crate::geometry;
use crate::shape::{Shape, ShapeKind};
use crate::view::ViewTransform;

const BACKGROUND: Color32 = Color32::WHITE;
const GRID_COLOR: Color32 = Color32::from_rgb(0xe0, 0xe0, 0xe0);
/// Grid cell size in model units.
const GRID_CELL: f32 = 20.0;
/// Brown used for door leaves and panels.
const DOOR_COLOR: Color32 = Color32::from_rgb(0x65, 0x43, 0x21);
const WINDOW_GLASS_COLOR: Color32 = Color32::from_rgb(0x00, 0xaa, 0xff);
/// Door and window glyphs use a fixed stroke width, not the shape's own.
const GLYPH_STROKE_WIDTH: f32 = 2.0;
const HANDLE_COLOR: Color32 = Color32::from_rgb(30, 144, 255);
const HANDLE_RADIUS: f32 = 5.0;
const LABEL_COLOR: Color32 = Color32::from_rgb(0x33, 0x33, 0x33);
const LABEL_FONT_SIZE: f32 = 12.0;

/// Draws the whole canvas for one frame: grid, shapes, labels, and the
/// selection overlay. Reads the editor but never mutates it.
#[derive(Debug, Default)]
pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, painter: &Painter, canvas_rect: Rect, editor: &Editor) {
        let view = editor.view();
        let document = editor.document();

        painter.rect_filled(canvas_rect, 0.0, BACKGROUND);
        self.draw_grid(painter, canvas_rect, view);

        for shape in document.shapes() {
            self.draw_shape(painter, canvas_rect, view, shape);
        }
        if let Some(shape) = document.provisional() {
            self.draw_shape(painter, canvas_rect, view, shape);
        }

        if editor.show_labels() {
            for shape in document.shapes().iter().chain(document.provisional()) {
                self.draw_label(painter, canvas_rect, view, shape);
            }
        }

        if let Some(shape) = document.selected_shape() {
            self.draw_selection(painter, canvas_rect, view, shape);
        }
    }

    fn draw_grid(&self, painter: &Painter, canvas_rect: Rect, view: &ViewTransform) {
        let step = GRID_CELL * view.scale();
        // Below this the grid becomes noise.
        if step < 2.0 {
            return;
        }
        let stroke = Stroke::new(1.0, GRID_COLOR);
        let offset = view.offset();
        let mut x = canvas_rect.min.x + offset.x.rem_euclid(step);
        while x <= canvas_rect.max.x {
            painter.line_segment(
                [pos2(x, canvas_rect.min.y), pos2(x, canvas_rect.max.y)],
                stroke,
            );
            x += step;
        }
        let mut y = canvas_rect.min.y + offset.y.rem_euclid(step);
        while y <= canvas_rect.max.y {
            painter.line_segment(
                [pos2(canvas_rect.min.x, y), pos2(canvas_rect.max.x, y)],
                stroke,
            );
            y += step;
        }
    }

    fn draw_shape(&self, painter: &Painter, canvas_rect: Rect, view: &ViewTransform, shape: &Shape) {
        let center = geometry::rotation_center(shape);
        let rotation = shape.rotation;
        // Model position to screen, shape rotation applied.
        let place =
            |p: Pos2| view.to_screen(canvas_rect.min, geometry::rotate_point(p, center, rotation));

        let scale = view.scale();
        let opacity = shape.style.opacity;
        let stroke_color = shape.style.stroke.gamma_multiply(opacity);
        let fill_color = shape.style.fill.gamma_multiply(opacity);
        let stroke = Stroke::new(shape.style.line_width * scale, stroke_color);

        match &shape.kind {
            ShapeKind::Wall { end } => {
                painter.line_segment([place(shape.origin), place(*end)], stroke);
            }
            ShapeKind::Rectangle { size } => {
                let rect = Rect::from_two_pos(shape.origin, shape.origin + *size);
                let corners = vec![
                    place(rect.left_top()),
                    place(rect.right_top()),
                    place(rect.right_bottom()),
                    place(rect.left_bottom()),
                ];
                painter.add(egui::Shape::convex_polygon(corners, fill_color, stroke));
            }
            ShapeKind::Circle { size } => {
                let radius = size.length() * 0.5 * scale;
                painter.circle(place(shape.origin + *size * 0.5), radius, fill_color, stroke);
            }
            ShapeKind::Door { size } => {
                self.draw_door(painter, shape.origin, *size, scale, opacity, &place);
            }
            ShapeKind::Window { size } => {
                self.draw_window(painter, shape.origin, *size, scale, opacity, &place);
            }
            ShapeKind::Text { content, font_size } => {
                let galley = painter.layout_no_wrap(
                    content.clone(),
                    FontId::proportional(font_size * scale),
                    stroke_color,
                );
                // The anchor sits on the baseline; the galley's position is
                // its top left, roughly one font size above.
                let top_left = place(pos2(shape.origin.x, shape.origin.y - font_size));
                let mut text = TextShape::new(top_left, galley, stroke_color);
                if rotation != 0.0 {
                    text = text.with_angle(rotation.to_radians());
                }
                painter.add(text);
            }
        }
    }

    /// Architectural door glyph: leaf, dashed quarter-circle swing arc, and
    /// a thin panel straddling the leaf. The hinge is the shape origin.
    fn draw_door(
        &self,
        painter: &Painter,
        hinge: Pos2,
        size: Vec2,
        scale: f32,
        opacity: f32,
        place: &impl Fn(Pos2) -> Pos2,
    ) {
        let leaf_stroke = Stroke::new(
            GLYPH_STROKE_WIDTH * scale,
            DOOR_COLOR.gamma_multiply(opacity),
        );
        painter.line_segment([place(hinge), place(hinge + vec2(size.x, 0.0))], leaf_stroke);

        let radius = size.x.abs();
        let arc: Vec<Pos2> = (0..=24)
            .map(|i| {
                let angle = i as f32 / 24.0 * std::f32::consts::FRAC_PI_2;
                place(hinge + radius * vec2(angle.cos(), angle.sin()))
            })
            .collect();
        let arc_stroke = Stroke::new(
            GLYPH_STROKE_WIDTH * scale,
            Color32::BLACK.gamma_multiply(opacity),
        );
        painter.extend(egui::Shape::dashed_line(
            &arc,
            arc_stroke,
            5.0 * scale,
            3.0 * scale,
        ));

        let panel = [
            place(hinge + vec2(0.0, -size.y / 8.0)),
            place(hinge + vec2(size.x, -size.y / 8.0)),
            place(hinge + vec2(size.x, size.y / 8.0)),
            place(hinge + vec2(0.0, size.y / 8.0)),
        ];
        painter.add(egui::Shape::closed_line(panel.to_vec(), leaf_stroke));
    }

    /// Window glyph: outer frame, two glass lines inset along the long
    /// axis, and a dashed center line in glass blue. The inset arithmetic
    /// is signed, matching how drags in either direction always behaved.
    fn draw_window(
        &self,
        painter: &Painter,
        origin: Pos2,
        size: Vec2,
        scale: f32,
        opacity: f32,
        place: &impl Fn(Pos2) -> Pos2,
    ) {
        let frame_stroke = Stroke::new(
            GLYPH_STROKE_WIDTH * scale,
            Color32::BLACK.gamma_multiply(opacity),
        );
        let frame = [
            place(origin),
            place(origin + vec2(size.x, 0.0)),
            place(origin + size),
            place(origin + vec2(0.0, size.y)),
        ];
        painter.add(egui::Shape::closed_line(frame.to_vec(), frame_stroke));

        let inset = size.x.abs().min(size.y.abs()) * 0.25;
        let horizontal = size.x.abs() > size.y.abs();
        if horizontal {
            for y in [origin.y + inset, origin.y + size.y - inset] {
                painter.line_segment(
                    [place(pos2(origin.x, y)), place(pos2(origin.x + size.x, y))],
                    frame_stroke,
                );
            }
        } else {
            for x in [origin.x + inset, origin.x + size.x - inset] {
                painter.line_segment(
                    [place(pos2(x, origin.y)), place(pos2(x, origin.y + size.y))],
                    frame_stroke,
                );
            }
        }

        let glass_stroke = Stroke::new(
            GLYPH_STROKE_WIDTH * scale,
            WINDOW_GLASS_COLOR.gamma_multiply(opacity),
        );
        let glass = if horizontal {
            [
                place(pos2(origin.x, origin.y + size.y / 2.0)),
                place(pos2(origin.x + size.x, origin.y + size.y / 2.0)),
            ]
        } else {
            [
                place(pos2(origin.x + size.x / 2.0, origin.y)),
                place(pos2(origin.x + size.x / 2.0, origin.y + size.y)),
            ]
        };
        painter.extend(egui::Shape::dashed_line(
            &glass,
            glass_stroke,
            4.0 * scale,
            3.0 * scale,
        ));
    }

    /// Kind labels float unrotated over each shape's center at a fixed
    /// screen size, like little tags rather than part of the drawing.
    fn draw_label(&self, painter: &Painter, canvas_rect: Rect, view: &ViewTransform, shape: &Shape) {
        let Some(label) = shape.label() else {
            return;
        };
        let pos = view.to_screen(canvas_rect.min, geometry::rotation_center(shape));
        painter.text(
            pos,
            Align2::CENTER_CENTER,
            label,
            FontId::proportional(LABEL_FONT_SIZE),
            LABEL_COLOR,
        );
    }

    fn draw_selection(
        &self,
        painter: &Painter,
        canvas_rect: Rect,
        view: &ViewTransform,
        shape: &Shape,
    ) {
        let selection = geometry::selection_rect(shape);
        let handles = geometry::selection_handles(selection, view.scale());

        let min = view.to_screen(canvas_rect.min, selection.min);
        let max = view.to_screen(canvas_rect.min, selection.max);
        let screen_rect = Rect::from_two_pos(min, max);
        let stroke = Stroke::new(1.0, HANDLE_COLOR);
        painter.rect_stroke(screen_rect, 0.0, stroke);

        let rotate = view.to_screen(canvas_rect.min, handles.rotate);
        let translate = view.to_screen(canvas_rect.min, handles.translate);
        painter.line_segment([screen_rect.center_top(), rotate], stroke);
        painter.circle_stroke(rotate, HANDLE_RADIUS, stroke);
        painter.circle_filled(translate, HANDLE_RADIUS, HANDLE_COLOR);
    }
}
