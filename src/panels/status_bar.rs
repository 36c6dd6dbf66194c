use crate::SketchApp;

pub fn status_bar(app: &mut SketchApp, ctx: &egui::Context) {
    egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            let cursor = app.editor().cursor_pos();
            ui.label(format!(
                "X: {}, Y: {}",
                cursor.x.round() as i32,
                cursor.y.round() as i32
            ));
            ui.separator();
            ui.label(format!("Current Tool: {}", app.editor().tool().name()));
            ui.separator();
            ui.label(format!("Scale: {}%", app.editor().view().zoom_percent()));
        });
    });
}
