use crate::SketchApp;

pub fn central_panel(app: &mut SketchApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let canvas_rect = ui.available_rect_before_wrap();
        app.set_canvas_rect(canvas_rect);

        if ui.rect_contains_pointer(canvas_rect) {
            let icon = app.editor().tool().cursor_icon();
            ctx.output_mut(|output| output.cursor_icon = icon);
        }

        // Translate pointer input and feed it through the editor.
        for event in app.poll_pointer(ctx, canvas_rect, ui.layer_id()) {
            app.dispatch(event);
        }

        let painter = ui.painter_at(canvas_rect);
        app.renderer().render(&painter, canvas_rect, app.editor());
    });
}
