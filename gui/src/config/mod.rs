// GUI configuration module
pub mod theme; // Colours for the theme and alert icons

// Structure for the entire application configuration loaded from JSON.
// Mirrors assets/config/default.json.
use serde::Deserialize;

use client::config::ClientSettings;
use client::ui::ShortcutMap;
use theme::ThemeColors;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    pub version: String,
    pub app: AppSettings,
    #[serde(default)]
    pub client: ClientSettings,
    pub shortcuts: Shortcuts,
    #[serde(default)]
    pub colors: ThemeColors,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppSettings {
    pub title: String,
    pub theme: String, // "dark" or "light"
    pub language: String,
    #[serde(default = "default_tooltips")]
    pub tooltips: bool,
}

fn default_tooltips() -> bool {
    true
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Shortcuts {
    pub search: String,
    pub close_modals: String,
}

impl Shortcuts {
    pub fn to_map(&self) -> anyhow::Result<ShortcutMap> {
        Ok(ShortcutMap::from_config(&self.search, &self.close_modals)?)
    }
}

impl AppConfig {
    // The default config is embedded so the binary runs from any directory.
    pub fn load_default() -> Result<Self, anyhow::Error> {
        let config_str = include_str!("../../assets/config/default.json"); // Path relative to this .rs file
        Self::from_json_str(config_str)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, anyhow::Error> {
        let config: AppConfig = serde_json::from_str(raw)?;
        config.client.validate()?;
        Ok(config)
    }
}
