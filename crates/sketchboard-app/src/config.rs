//! Application configuration.

use crate::error::{AppError, AppResult};
use kurbo::Size;
use peniko::Color;
use serde::{Deserialize, Serialize};
use sketchboard_core::{SerializableColor, ToolSettings};
use std::path::Path;

/// Settings for one run of the app. Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub title: String,
    pub canvas_width: f64,
    pub canvas_height: f64,
    /// Any color string the toolbar accepts, e.g. `#fafafa`.
    pub background_color: String,
    pub tool: ToolSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Sketchboard".to_string(),
            canvas_width: 1280.0,
            canvas_height: 800.0,
            background_color: "#fafafa".to_string(),
            tool: ToolSettings::default(),
        }
    }
}

impl AppConfig {
    /// Read a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| AppError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = serde_json::from_str(&json)?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn canvas_size(&self) -> Size {
        Size::new(self.canvas_width, self.canvas_height)
    }

    pub fn background(&self) -> AppResult<Color> {
        Ok(SerializableColor::parse(&self.background_color)?.into())
    }
}
