#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod error;
pub mod event;
pub mod export;
pub mod input;
pub mod panels;
pub mod settings;
pub mod skill;
pub mod state;
pub mod widgets;

pub use app::SkillsApp;
pub use error::{CaptureError, ExportError, SettingsError};
pub use event::{EditorEvent, EventBus};
pub use export::{PdfExporter, Rasterizer};
pub use input::{InputEvent, InputLocation};
pub use settings::Settings;
pub use skill::{BlockId, Level, SkillBlock};
pub use state::{EditMode, EditorContext};
