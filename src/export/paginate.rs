//! Slicing one tall captured image into fixed-height pages.
//!
//! The capture is a single bitmap, so every page places the *same* image,
//! shifted up by the height already shown on earlier pages. Each page acts
//! as a window sliding down the image.
use crate::settings::ExportSettings;

/// Geometry used for pagination, in mm.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageLayout {
    /// Width the image is scaled to on every page
    pub image_width: f32,
    /// Height of image shown per page
    pub page_height: f32,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self::from(&ExportSettings::default())
    }
}

impl From<&ExportSettings> for PageLayout {
    fn from(settings: &ExportSettings) -> Self {
        Self {
            image_width: settings.image_width_mm,
            page_height: settings.page_height_mm,
        }
    }
}

/// Where the captured image goes on one page. Offsets are from the page's
/// top-left corner, in mm; `y` is zero or negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PagePlacement {
    /// Zero-based page index
    pub page: usize,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Height in mm of a `width`x`height` bitmap scaled to the layout's width.
pub fn scaled_height(bitmap_width: u32, bitmap_height: u32, layout: &PageLayout) -> f64 {
    bitmap_height as f64 * layout.image_width as f64 / bitmap_width as f64
}

/// Computes one placement per page for a bitmap of the given size.
///
/// The first page shows the image at offset 0. While the height still left
/// to show is at least zero, another page follows with the image shifted up
/// by everything shown so far. An image that fits exactly on `n` pages
/// therefore gets an extra, blank page.
///
/// An empty bitmap yields no placements.
pub fn paginate(bitmap_width: u32, bitmap_height: u32, layout: &PageLayout) -> Vec<PagePlacement> {
    if bitmap_width == 0 || bitmap_height == 0 || layout.page_height <= 0.0 {
        return Vec::new();
    }

    let image_height = scaled_height(bitmap_width, bitmap_height, layout);
    let page_height = layout.page_height as f64;
    let place = |page: usize, y: f64| PagePlacement {
        page,
        x: 0.0,
        y: y as f32,
        width: layout.image_width,
        height: image_height as f32,
    };

    let mut placements = vec![place(0, 0.0)];
    let mut height_left = image_height - page_height;
    while height_left >= 0.0 {
        placements.push(place(placements.len(), height_left - image_height));
        height_left -= page_height;
    }
    placements
}
