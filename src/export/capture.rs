use std::sync::Arc;
use egui::{ColorImage, Context, Pos2, Rect};
use futures::channel::oneshot;
use futures::future::{BoxFuture, FutureExt};
use image::RgbaImage;
use parking_lot::Mutex;
use crate::error::CaptureError;

/// A captured region as RGBA pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct Bitmap {
    image: RgbaImage,
}

impl Bitmap {
    /// Wraps a tightly packed RGBA buffer.
    pub fn from_rgba(width: u32, height: u32, rgba: Vec<u8>) -> Result<Self, CaptureError> {
        RgbaImage::from_raw(width, height, rgba)
            .map(|image| Self { image })
            .ok_or(CaptureError::BadPixelBuffer { width, height })
    }

    /// A bitmap filled with a single color.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, image::Rgba(rgba)),
        }
    }

    pub fn from_color_image(color_image: &ColorImage) -> Result<Self, CaptureError> {
        let [width, height] = color_image.size;
        let rgba: Vec<u8> = color_image.pixels.iter().flat_map(|c| c.to_array()).collect();
        Self::from_rgba(width as u32, height as u32, rgba)
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    pub fn as_image(&self) -> &RgbaImage {
        &self.image
    }

    /// Encodes the bitmap as an opaque JPEG.
    pub fn to_jpeg(&self, quality: u8) -> Result<Vec<u8>, image::ImageError> {
        let rgb = image::DynamicImage::ImageRgba8(self.image.clone()).to_rgb8();
        let mut bytes = Vec::new();
        let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut bytes, quality);
        rgb.write_with_encoder(encoder)?;
        Ok(bytes)
    }
}

/// Turns a region of the screen into a bitmap. Capturing may take frames to
/// complete, so the result is a future.
pub trait Rasterizer {
    fn capture(&mut self, region: Rect) -> BoxFuture<'static, Result<Bitmap, CaptureError>>;
}

struct PendingCapture {
    region: Rect,
    sender: oneshot::Sender<Result<Bitmap, CaptureError>>,
}

/// Captures regions using egui viewport screenshots.
///
/// `capture` asks the backend for a screenshot; the screenshot arrives as an
/// input event on a later frame, where [`ScreenshotRasterizer::on_frame`]
/// crops it and completes every pending capture.
#[derive(Clone)]
pub struct ScreenshotRasterizer {
    ctx: Context,
    pending: Arc<Mutex<Vec<PendingCapture>>>,
}

impl std::fmt::Debug for ScreenshotRasterizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScreenshotRasterizer")
            .field("pending", &format!("<{} captures>", self.pending.lock().len()))
            .finish()
    }
}

impl ScreenshotRasterizer {
    pub fn new(ctx: Context) -> Self {
        Self {
            ctx,
            pending: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn pending_count(&self) -> usize {
        self.pending.lock().len()
    }

    /// Completes pending captures if this frame delivered a screenshot
    pub fn on_frame(&self, ctx: &Context) {
        let screenshot = ctx.input(|i| {
            i.raw.events.iter().find_map(|event| match event {
                egui::Event::Screenshot { image, .. } => Some(image.clone()),
                _ => None,
            })
        });
        let Some(screenshot) = screenshot else {
            return;
        };

        let pixels_per_point = ctx.pixels_per_point();
        for pending in self.pending.lock().drain(..) {
            let result = crop(&screenshot, pending.region, pixels_per_point);
            if let Err(err) = &result {
                log::error!("Capture of {:?} failed: {}", pending.region, err);
            }
            // The export may have been dropped in the meantime
            let _ = pending.sender.send(result);
        }
    }
}

impl Rasterizer for ScreenshotRasterizer {
    fn capture(&mut self, region: Rect) -> BoxFuture<'static, Result<Bitmap, CaptureError>> {
        let (sender, receiver) = oneshot::channel();
        self.pending.lock().push(PendingCapture { region, sender });
        self.ctx
            .send_viewport_cmd(egui::ViewportCommand::Screenshot(egui::UserData::default()));
        log::debug!("Requested screenshot for region {:?}", region);

        async move { receiver.await.map_err(|_| CaptureError::Cancelled)? }.boxed()
    }
}

/// Cuts `region` (in points) out of a full-screen screenshot.
pub fn crop(screenshot: &ColorImage, region: Rect, pixels_per_point: f32) -> Result<Bitmap, CaptureError> {
    let screen = Rect::from_min_size(
        Pos2::ZERO,
        egui::vec2(screenshot.size[0] as f32, screenshot.size[1] as f32) / pixels_per_point,
    );
    let visible = region.intersect(screen);
    if !visible.is_positive() {
        return Err(CaptureError::OutOfBounds(region));
    }
    Bitmap::from_color_image(&screenshot.region(&visible, Some(pixels_per_point)))
}
