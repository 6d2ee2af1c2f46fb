// Theme specific configurations (colors)
use serde::{Deserialize, Serialize};

use client::notify::AlertIcon;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemePalette {
    pub background: String,
    pub foreground: String,
    pub surface: String,
    pub border: String,
    pub primary: String,
    pub secondary: String,
}

impl ThemePalette {
    pub fn default_dark() -> Self {
        Self {
            background: "#1e1e1e".to_string(),
            foreground: "#d1d4dc".to_string(),
            surface: "#2b2b2b".to_string(),
            border: "#444444".to_string(),
            primary: "#0d6efd".to_string(),
            secondary: "#6c757d".to_string(),
        }
    }

    pub fn default_light() -> Self {
        Self {
            background: "#f8f9fa".to_string(),
            foreground: "#212529".to_string(),
            surface: "#ffffff".to_string(),
            border: "#dee2e6".to_string(),
            primary: "#0d6efd".to_string(),
            secondary: "#6c757d".to_string(),
        }
    }
}

/// Both palettes, overridable from the `colors` section of the config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeColors {
    #[serde(default = "ThemePalette::default_dark")]
    pub dark: ThemePalette,
    #[serde(default = "ThemePalette::default_light")]
    pub light: ThemePalette,
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            dark: ThemePalette::default_dark(),
            light: ThemePalette::default_light(),
        }
    }
}

/// Glyph and colour drawn for each alert icon.
pub fn icon_style(icon: AlertIcon) -> (&'static str, &'static str) {
    match icon {
        AlertIcon::Success => ("✔", "#198754"),
        AlertIcon::Error => ("✖", "#dc3545"),
        AlertIcon::Warning => ("!", "#ffc107"),
        AlertIcon::Info => ("i", "#0dcaf0"),
        AlertIcon::Question => ("?", "#6c757d"),
    }
}
