//! Exporting the résumé as a PDF: capture the content region, slice the
//! captured image into pages, encode, save.
mod capture;
mod exporter;
mod paginate;
mod pdf;

pub use capture::{crop, Bitmap, Rasterizer, ScreenshotRasterizer};
pub use exporter::{build_document, ExportTask, PdfExporter};
pub use paginate::{paginate, scaled_height, PageLayout, PagePlacement};
pub use pdf::{mm_to_pt, ImageHandle, PdfDocument};
