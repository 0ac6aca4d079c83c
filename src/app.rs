use egui::Rect;
use crate::export::{ExportTask, PdfExporter, ScreenshotRasterizer};
use crate::event::LogHandler;
use crate::input::{route_event, InputHandler};
use crate::panels::{central_panel, tools_panel};
use crate::settings::Settings;
use crate::state::EditorContext;
use crate::widgets::BouncingButton;

/// Only the settings are persisted on shutdown; the skills list lives as long
/// as the window does.
#[derive(Debug)]
pub struct SkillsApp {
    settings: Settings,
    editor: EditorContext,
    input: InputHandler,
    exporter: PdfExporter,
    // Needs the egui context, so only exists once the app is running
    rasterizer: Option<ScreenshotRasterizer>,
    export_task: Option<ExportTask>,
    export_status: Option<String>,
    download_button: BouncingButton,
    /// Screen rect of the résumé content, the region that gets exported
    content_rect: Option<Rect>,
}

impl Default for SkillsApp {
    fn default() -> Self {
        Self::with_settings(Settings::default())
    }
}

impl SkillsApp {
    /// Called once before the first frame.
    ///
    /// `settings` overrides whatever was persisted by a previous run.
    pub fn new(cc: &eframe::CreationContext<'_>, settings: Option<Settings>) -> Self {
        let settings = settings
            .or_else(|| cc.storage.and_then(|storage| eframe::get_value(storage, eframe::APP_KEY)))
            .unwrap_or_default();

        let mut app = Self::with_settings(settings);
        app.rasterizer = Some(ScreenshotRasterizer::new(cc.egui_ctx.clone()));
        app
    }

    pub fn with_settings(settings: Settings) -> Self {
        let editor = EditorContext::new(settings.editor.clone());
        editor.event_bus.subscribe(Box::new(LogHandler));

        Self {
            exporter: PdfExporter::new(settings.export.clone()),
            settings,
            editor,
            input: InputHandler::new(),
            rasterizer: None,
            export_task: None,
            export_status: None,
            download_button: BouncingButton::default(),
            content_rect: None,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn editor(&self) -> &EditorContext {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut EditorContext {
        &mut self.editor
    }

    pub fn input_mut(&mut self) -> &mut InputHandler {
        &mut self.input
    }

    pub fn download_button_mut(&mut self) -> &mut BouncingButton {
        &mut self.download_button
    }

    pub fn set_content_rect(&mut self, rect: Rect) {
        self.content_rect = Some(rect);
    }

    pub fn is_exporting(&self) -> bool {
        self.export_task.is_some()
    }

    pub fn export_status(&self) -> Option<&str> {
        self.export_status.as_deref()
    }

    /// Starts exporting the résumé content. Ignored while an export runs.
    pub fn start_export(&mut self) {
        if self.is_exporting() {
            return;
        }
        let Some(region) = self.content_rect else {
            log::warn!("Nothing rendered yet, cannot export");
            return;
        };
        let Some(rasterizer) = self.rasterizer.as_mut() else {
            log::warn!("No rasterizer available, cannot export");
            return;
        };

        let future = self.exporter.export_to_pdf(rasterizer, region);
        self.export_task = Some(ExportTask::new(future));
        self.export_status = Some("Exporting…".to_owned());
    }

    fn poll_export(&mut self) {
        let Some(task) = &mut self.export_task else {
            return;
        };
        let Some(result) = task.poll() else {
            return;
        };

        self.export_task = None;
        self.export_status = Some(match result {
            Ok(path) => format!("Saved {}", path.display()),
            Err(err) => {
                log::error!("Export failed: {}", err);
                format!("Export failed: {}", err)
            }
        });
    }
}

impl eframe::App for SkillsApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, &self.settings);
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Some(rasterizer) = &self.rasterizer {
            rasterizer.on_frame(ctx);
        }
        self.poll_export();

        // Bottom panel first so the central panel gets the remaining space
        tools_panel(self, ctx);
        central_panel(self, ctx);

        for event in self.input.process_input(ctx) {
            route_event(&event, &mut self.editor);
        }

        if self.is_exporting() || self.editor.ripple().is_some() {
            ctx.request_repaint();
        }
    }
}
