use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::task::{Context, Poll};
use egui::Rect;
use futures::future::{self, BoxFuture, FutureExt};
use crate::error::{ExportError, ExportResult};
use crate::settings::ExportSettings;
use super::capture::{Bitmap, Rasterizer};
use super::paginate::{paginate, PageLayout};
use super::pdf::PdfDocument;

/// Turns a captured bitmap into a paginated PDF document.
pub fn build_document(bitmap: &Bitmap, settings: &ExportSettings) -> ExportResult<PdfDocument> {
    if bitmap.is_empty() {
        return Err(ExportError::EmptyCapture {
            width: bitmap.width(),
            height: bitmap.height(),
        });
    }

    let placements = paginate(bitmap.width(), bitmap.height(), &PageLayout::from(settings));
    let mut document = PdfDocument::new(settings.paper_width_mm, settings.paper_height_mm);
    let image = document.embed_jpeg(bitmap, settings.jpeg_quality)?;
    for placement in &placements {
        if placement.page >= document.page_count() {
            document.add_page();
        }
        document.add_image(image, placement.x, placement.y, placement.width, placement.height);
    }
    log::debug!(
        "Paginated {}x{} capture into {} pages",
        bitmap.width(),
        bitmap.height(),
        document.page_count()
    );
    Ok(document)
}

/// Clears the in-flight flag when the export finishes or is dropped.
struct InFlight(Arc<AtomicBool>);

impl InFlight {
    fn acquire(flag: &Arc<AtomicBool>) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag.clone()))
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Exports a region of the window as a multi-page PDF.
///
/// Only one export runs at a time; requests made while one is in flight are
/// rejected with [`ExportError::Busy`].
#[derive(Debug, Clone, Default)]
pub struct PdfExporter {
    settings: ExportSettings,
    in_flight: Arc<AtomicBool>,
}

impl PdfExporter {
    pub fn new(settings: ExportSettings) -> Self {
        Self {
            settings,
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn settings(&self) -> &ExportSettings {
        &self.settings
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Captures `region`, paginates it and saves the PDF under the configured
    /// file name. Resolves to the written path.
    pub fn export_to_pdf(
        &self,
        rasterizer: &mut dyn Rasterizer,
        region: Rect,
    ) -> BoxFuture<'static, ExportResult<PathBuf>> {
        let Some(guard) = InFlight::acquire(&self.in_flight) else {
            log::warn!("Export requested while another one is in progress");
            return future::ready(Err(ExportError::Busy)).boxed();
        };

        log::info!("Exporting region {:?}", region);
        let capture = rasterizer.capture(region);
        let settings = self.settings.clone();

        async move {
            let _guard = guard;
            let bitmap = capture.await?;
            let document = build_document(&bitmap, &settings)?;
            let path = PathBuf::from(&settings.file_name);
            document.save(&path)?;
            Ok::<_, ExportError>(path)
        }
        .boxed()
    }
}

/// An export being driven from the UI loop.
///
/// The UI has no executor; it polls the task once per frame until it is done.
pub struct ExportTask {
    future: BoxFuture<'static, ExportResult<PathBuf>>,
}

impl std::fmt::Debug for ExportTask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExportTask").finish_non_exhaustive()
    }
}

impl ExportTask {
    pub fn new(future: BoxFuture<'static, ExportResult<PathBuf>>) -> Self {
        Self { future }
    }

    /// Polls the export once. Returns the outcome when it has settled.
    pub fn poll(&mut self) -> Option<ExportResult<PathBuf>> {
        let mut cx = Context::from_waker(futures::task::noop_waker_ref());
        match self.future.poll_unpin(&mut cx) {
            Poll::Ready(result) => Some(result),
            Poll::Pending => None,
        }
    }
}
