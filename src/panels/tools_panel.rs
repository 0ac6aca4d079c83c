use crate::SkillsApp;

const BUTTON_AREA_HEIGHT: f32 = 120.0;

/// The bottom panel holding the download button and the export status.
pub fn tools_panel(app: &mut SkillsApp, ctx: &egui::Context) {
    egui::TopBottomPanel::bottom("tools_panel")
        .resizable(false)
        .show(ctx, |ui| {
            let exporting = app.is_exporting();
            let label = if exporting { "Exporting…" } else { "Download PDF" };

            let response = app
                .download_button_mut()
                .show(ui, BUTTON_AREA_HEIGHT, label, !exporting);
            if response.clicked() {
                log::info!("Download requested");
                app.start_export();
            }

            if let Some(status) = app.export_status() {
                ui.label(status);
            }
        });
}
