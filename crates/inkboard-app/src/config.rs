//! Host configuration.

use crate::error::AppError;
use inkboard_core::{EditorConfig, SerializableColor};
use peniko::Color;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Application configuration. Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub title: String,
    pub background_color: SerializableColor,
    pub editor: EditorConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Inkboard".to_string(),
            background_color: SerializableColor::white(),
            editor: EditorConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load a JSON config file.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let json = std::fs::read_to_string(path)?;
        serde_json::from_str(&json).map_err(AppError::Config)
    }

    /// Load `path` if given, otherwise use defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, AppError> {
        match path {
            Some(path) => {
                log::info!("Loading config from {}", path.display());
                Self::load(path)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn background(&self) -> Color {
        self.background_color.into()
    }
}
