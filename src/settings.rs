use serde::{Deserialize, Serialize};
use std::path::Path;
use crate::error::SettingsError;
use crate::skill::MAX_LEVEL;

/// Environment variable pointing at an optional JSON settings file.
pub const SETTINGS_ENV_VAR: &str = "RESUME_SKILLS_SETTINGS";

/// User-tunable settings. Persisted with the app state; the skills list itself
/// never is.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct Settings {
    pub editor: EditorSettings,
    pub export: ExportSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// Name given to a freshly added block
    pub default_name: String,
    /// Level given to a freshly added block
    pub default_level: u8,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            default_name: "New Language".to_owned(),
            default_level: 0,
        }
    }
}

/// Page geometry and output options for the PDF export. Lengths are in mm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    pub file_name: String,
    /// Width the captured image is scaled to
    pub image_width_mm: f32,
    /// Height of the window each page shows of the captured image
    pub page_height_mm: f32,
    /// Paper size of every page
    pub paper_width_mm: f32,
    pub paper_height_mm: f32,
    pub jpeg_quality: u8,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            file_name: "resume.pdf".to_owned(),
            image_width_mm: 210.0,
            page_height_mm: 295.0,
            paper_width_mm: 210.0,
            paper_height_mm: 297.0,
            jpeg_quality: 90,
        }
    }
}

impl Settings {
    /// Reads settings from a JSON file. Missing fields take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Loads the file named by `RESUME_SKILLS_SETTINGS`, falling back to the
    /// defaults when the variable is unset or the file is unusable.
    pub fn from_env() -> Self {
        let Ok(path) = std::env::var(SETTINGS_ENV_VAR) else {
            return Self::default();
        };
        match Self::load(&path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path);
                settings
            }
            Err(err) => {
                log::warn!("Ignoring settings file {}: {}", path, err);
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        let export = &self.export;
        if self.editor.default_level > MAX_LEVEL {
            return Err(SettingsError::Invalid(format!(
                "default_level must be at most {}, got {}",
                MAX_LEVEL, self.editor.default_level
            )));
        }
        let lengths = [
            ("image_width_mm", export.image_width_mm),
            ("page_height_mm", export.page_height_mm),
            ("paper_width_mm", export.paper_width_mm),
            ("paper_height_mm", export.paper_height_mm),
        ];
        for (name, value) in lengths {
            if !value.is_finite() || value <= 0.0 {
                return Err(SettingsError::Invalid(format!("{} must be positive, got {}", name, value)));
            }
        }
        if export.file_name.trim().is_empty() {
            return Err(SettingsError::Invalid("file_name must not be empty".to_owned()));
        }
        if !(1..=100).contains(&export.jpeg_quality) {
            return Err(SettingsError::Invalid(format!(
                "jpeg_quality must be in 1..=100, got {}",
                export.jpeg_quality
            )));
        }
        Ok(())
    }
}
