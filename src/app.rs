use egui::{Align2, Key, KeyboardShortcut, Modifiers, Rect};
use log::debug;
#[cfg(not(target_arch = "wasm32"))]
use log::{error, info};

use crate::editor::Editor;
use crate::input::{EditorEvent, PointerTranslator};
use crate::panels;
use crate::renderer::Renderer;

#[cfg(not(target_arch = "wasm32"))]
const EXPORT_FILE: &str = "floor-plan.png";

const UNDO_SHORTCUT: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::Z);
const REDO_SHORTCUT: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::Y);

/// The eframe shell around the editor: panels, floating windows, keyboard
/// shortcuts, and the PNG export path.
pub struct SketchApp {
    editor: Editor,
    translator: PointerTranslator,
    renderer: Renderer,
    text_entry: String,
    text_focused: bool,
    confirm_clear: bool,
    canvas_rect: Rect,
}

impl SketchApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let prefs = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY))
            .unwrap_or_default();
        Self {
            editor: Editor::with_prefs(prefs),
            translator: PointerTranslator::new(),
            renderer: Renderer::new(),
            text_entry: String::new(),
            text_focused: false,
            confirm_clear: false,
            canvas_rect: Rect::NOTHING,
        }
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    /// Routes an event to the editor. Rejected events are a normal part of
    /// interactive use (a stray release, undo at the boundary) and are only
    /// logged.
    pub fn dispatch(&mut self, event: EditorEvent) {
        if let Err(err) = self.editor.handle_event(event) {
            debug!("Ignored event: {err}");
        }
    }

    pub fn poll_pointer(
        &mut self,
        ctx: &egui::Context,
        canvas_rect: Rect,
        canvas_layer: egui::LayerId,
    ) -> Vec<EditorEvent> {
        self.translator
            .poll(ctx, canvas_rect, canvas_layer, self.editor.view())
    }

    pub fn set_canvas_rect(&mut self, rect: Rect) {
        self.canvas_rect = rect;
    }

    pub fn open_clear_confirm(&mut self) {
        self.confirm_clear = true;
    }

    /// Asks the backend for a screenshot; the actual write happens when the
    /// screenshot event arrives in a later frame.
    pub fn request_export(&mut self, ctx: &egui::Context) {
        #[cfg(not(target_arch = "wasm32"))]
        ctx.send_viewport_cmd(egui::ViewportCommand::Screenshot(egui::UserData::default()));
        #[cfg(target_arch = "wasm32")]
        {
            let _ = ctx;
            log::warn!("Export is not available in the browser build");
        }
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        // While typing a label the shortcuts belong to the text field.
        if self.editor.is_text_pending() {
            return;
        }
        if ctx.input_mut(|input| input.consume_shortcut(&UNDO_SHORTCUT)) {
            self.dispatch(EditorEvent::Undo);
        }
        if ctx.input_mut(|input| input.consume_shortcut(&REDO_SHORTCUT)) {
            self.dispatch(EditorEvent::Redo);
        }
    }

    fn text_entry_window(&mut self, ctx: &egui::Context) {
        let Some(anchor) = self.editor.text_anchor() else {
            self.text_entry.clear();
            self.text_focused = false;
            return;
        };
        let pos = self.editor.view().to_screen(self.canvas_rect.min, anchor);
        let mut commit = false;
        let mut cancel = false;
        egui::Window::new("Add Text")
            .collapsible(false)
            .resizable(false)
            .fixed_pos(pos)
            .show(ctx, |ui| {
                let response = ui.text_edit_singleline(&mut self.text_entry);
                if !self.text_focused {
                    response.request_focus();
                    self.text_focused = true;
                }
                if response.lost_focus() && ui.input(|input| input.key_pressed(Key::Enter)) {
                    commit = true;
                }
                if ui.input(|input| input.key_pressed(Key::Escape)) {
                    cancel = true;
                }
                ui.horizontal(|ui| {
                    if ui.button("Add").clicked() {
                        commit = true;
                    }
                    if ui.button("Cancel").clicked() {
                        cancel = true;
                    }
                });
            });
        if commit {
            let text = std::mem::take(&mut self.text_entry);
            self.text_focused = false;
            self.dispatch(EditorEvent::CommitText(text));
        } else if cancel {
            self.text_entry.clear();
            self.text_focused = false;
            self.dispatch(EditorEvent::CancelText);
        }
    }

    fn clear_confirm_window(&mut self, ctx: &egui::Context) {
        if !self.confirm_clear {
            return;
        }
        let mut clear = false;
        let mut keep = false;
        egui::Window::new("Clear Canvas")
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                ui.label("Are you sure you want to clear the canvas?");
                ui.horizontal(|ui| {
                    if ui.button("Clear").clicked() {
                        clear = true;
                    }
                    if ui.button("Cancel").clicked() {
                        keep = true;
                    }
                });
            });
        if clear {
            self.confirm_clear = false;
            self.dispatch(EditorEvent::ClearCanvas);
        } else if keep {
            self.confirm_clear = false;
        }
    }

    /// Picks up the screenshot requested by [`Self::request_export`], crops
    /// it to the canvas, and writes it out as a PNG.
    #[cfg(not(target_arch = "wasm32"))]
    fn handle_screenshots(&mut self, ctx: &egui::Context) {
        let capture = ctx.input(|input| {
            input.raw.events.iter().find_map(|event| match event {
                egui::Event::Screenshot { image, .. } => Some(image.clone()),
                _ => None,
            })
        });
        let Some(capture) = capture else {
            return;
        };
        if !self.canvas_rect.is_positive() {
            return;
        }
        let canvas = capture.region(&self.canvas_rect, Some(ctx.pixels_per_point()));
        let pixels: Vec<u8> = canvas.pixels.iter().flat_map(|c| c.to_array()).collect();
        match image::save_buffer(
            EXPORT_FILE,
            &pixels,
            canvas.width() as u32,
            canvas.height() as u32,
            image::ColorType::Rgba8,
        ) {
            Ok(()) => info!("Saved canvas to {EXPORT_FILE}"),
            Err(err) => error!("Failed to save {EXPORT_FILE}: {err}"),
        }
    }
}

impl eframe::App for SketchApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, &self.editor.prefs());
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        #[cfg(not(target_arch = "wasm32"))]
        self.handle_screenshots(ctx);
        self.handle_shortcuts(ctx);

        panels::tools_panel(self, ctx);
        panels::status_bar(self, ctx);
        panels::central_panel(self, ctx);

        self.text_entry_window(ctx);
        self.clear_confirm_window(ctx);
    }
}
