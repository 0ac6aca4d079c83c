use thiserror::Error;

/// Errors raised while capturing a region of the screen
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("Capture was dropped before the screenshot arrived")]
    Cancelled,

    #[error("Capture region {0:?} is outside the screenshot")]
    OutOfBounds(egui::Rect),

    #[error("Captured pixel buffer does not match {width}x{height}")]
    BadPixelBuffer { width: u32, height: u32 },
}

/// Errors that can occur while exporting the document to PDF
///
/// A failed export never leaves a partially written file behind.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("An export is already in progress")]
    Busy,

    #[error("Failed to capture the document: {0}")]
    Capture(#[from] CaptureError),

    #[error("Captured image is empty ({width}x{height})")]
    EmptyCapture { width: u32, height: u32 },

    #[error("Failed to encode page image: {0}")]
    Encode(#[from] image::ImageError),

    #[error("Failed to write PDF: {0}")]
    Io(#[from] std::io::Error),

    #[error("Saving files is not supported on this platform")]
    Unsupported,
}

/// Result type for export operations
pub type ExportResult<T> = Result<T, ExportError>;

/// Errors that can occur while loading settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to read settings file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Invalid settings: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid settings: {0}")]
    Invalid(String),
}
