//! Editor configuration.

use crate::elements::{DEFAULT_FONT_SIZE, ElementStyle};
use crate::history::DEFAULT_HISTORY_LIMIT;
use serde::{Deserialize, Serialize};

/// Tunables for an editor session. Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Maximum number of history snapshots kept.
    pub history_limit: usize,
    pub rectangle_style: ElementStyle,
    pub pen_style: ElementStyle,
    pub text_style: ElementStyle,
    pub text_font_size: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_limit: DEFAULT_HISTORY_LIMIT,
            rectangle_style: ElementStyle::rectangle(),
            pen_style: ElementStyle::pen(),
            text_style: ElementStyle::text(),
            text_font_size: DEFAULT_FONT_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::ACCENT_BLUE;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: EditorConfig = serde_json::from_str(r#"{"history_limit": 5}"#).unwrap();
        assert_eq!(config.history_limit, 5);
        assert_eq!(config.rectangle_style.fill_color, Some(ACCENT_BLUE));
        assert!((config.text_font_size - 16.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_json_is_default() {
        let config: EditorConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, EditorConfig::default());
    }
}
