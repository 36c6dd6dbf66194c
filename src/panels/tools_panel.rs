use crate::SketchApp;
use crate::input::EditorEvent;
use crate::shape::Tool;

pub fn tools_panel(app: &mut SketchApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(true)
        .default_width(200.0)
        .show(ctx, |ui| {
            ui.heading("Tools");

            let active = app.editor().tool();
            for tool in Tool::ALL {
                if ui.selectable_label(active == tool, tool.name()).clicked() {
                    log::info!("Tool selected from UI: {}", tool.name());
                    app.dispatch(EditorEvent::ToolSelected(tool));
                }
            }

            ui.separator();
            ui.heading("Properties");

            let mut line_width = app.editor().line_width();
            ui.horizontal(|ui| {
                ui.label("Width:");
                if ui.add(egui::Slider::new(&mut line_width, 1.0..=10.0)).changed() {
                    app.dispatch(EditorEvent::SetLineWidth(line_width));
                }
            });

            let mut stroke = app.editor().stroke_color();
            ui.horizontal(|ui| {
                ui.label("Stroke:");
                if egui::color_picker::color_edit_button_srgba(
                    ui,
                    &mut stroke,
                    egui::color_picker::Alpha::Opaque,
                )
                .changed()
                {
                    app.dispatch(EditorEvent::SetStrokeColor(stroke));
                }
            });

            let mut fill = app.editor().fill_color();
            ui.horizontal(|ui| {
                ui.label("Fill:");
                if egui::color_picker::color_edit_button_srgba(
                    ui,
                    &mut fill,
                    egui::color_picker::Alpha::Opaque,
                )
                .changed()
                {
                    app.dispatch(EditorEvent::SetFillColor(fill));
                }
            });

            let mut opacity = app.editor().opacity() * 100.0;
            ui.horizontal(|ui| {
                ui.label("Opacity:");
                if ui
                    .add(egui::Slider::new(&mut opacity, 0.0..=100.0).suffix("%"))
                    .changed()
                {
                    app.dispatch(EditorEvent::SetOpacity(opacity));
                }
            });

            let mut font_size = app.editor().font_size();
            ui.horizontal(|ui| {
                ui.label("Font size:");
                if ui.add(egui::Slider::new(&mut font_size, 8.0..=72.0)).changed() {
                    app.dispatch(EditorEvent::SetFontSize(font_size));
                }
            });

            // Editable only while a shape is selected.
            let selected_rotation = app.editor().selected_rotation();
            let mut rotation = selected_rotation.unwrap_or(0.0);
            ui.horizontal(|ui| {
                ui.label("Rotation:");
                if ui
                    .add_enabled(
                        selected_rotation.is_some(),
                        egui::DragValue::new(&mut rotation).suffix("°"),
                    )
                    .changed()
                {
                    app.dispatch(EditorEvent::SetRotation(rotation));
                }
            });

            let mut show_labels = app.editor().show_labels();
            if ui.checkbox(&mut show_labels, "Show labels").changed() {
                app.dispatch(EditorEvent::SetLabelsVisible(show_labels));
            }

            ui.separator();

            ui.horizontal(|ui| {
                let can_undo = app.editor().can_undo();
                let can_redo = app.editor().can_redo();

                if ui.add_enabled(can_undo, egui::Button::new("Undo")).clicked() {
                    app.dispatch(EditorEvent::Undo);
                }
                if ui.add_enabled(can_redo, egui::Button::new("Redo")).clicked() {
                    app.dispatch(EditorEvent::Redo);
                }
            });
            ui.label(format!(
                "History: {}/{}",
                app.editor().history_index() + 1,
                app.editor().history_len()
            ));

            ui.separator();

            ui.horizontal(|ui| {
                if ui.button("Zoom In").clicked() {
                    app.dispatch(EditorEvent::ZoomIn);
                }
                if ui.button("Zoom Out").clicked() {
                    app.dispatch(EditorEvent::ZoomOut);
                }
            });
            if ui.button("Reset View").clicked() {
                app.dispatch(EditorEvent::ResetView);
            }

            ui.separator();

            if ui.button("Clear Canvas").clicked() {
                app.open_clear_confirm();
            }
            if ui.button("Export PNG").clicked() {
                app.request_export(ctx);
            }
        });
}
