// Application state for the GUI
// Provided once at the root through a `Signal<AppState>` context; components
// read and write it through that handle instead of any global.

use client::ui::UiState;
use serde::{Deserialize, Serialize};

use crate::config::theme::{ThemeColors, ThemePalette};
use crate::config::AppConfig;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Theme {
    Dark,
    Light,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub current_theme: Theme,
    pub language: String, // e.g., "pt-BR"
    pub ui: UiState,
    pub colors: ThemeColors,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            current_theme: Theme::Light,
            language: "pt-BR".to_string(),
            ui: UiState::default(),
            colors: ThemeColors::default(),
        }
    }
}

impl AppState {
    pub fn from_config(config: &AppConfig) -> Self {
        let current_theme = if config.app.theme.eq_ignore_ascii_case("dark") {
            Theme::Dark
        } else {
            Theme::Light
        };
        Self {
            current_theme,
            language: config.app.language.clone(),
            ui: UiState::default(),
            colors: config.colors.clone(),
        }
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.current_theme = theme;
    }

    pub fn palette(&self) -> ThemePalette {
        match self.current_theme {
            Theme::Dark => self.colors.dark.clone(),
            Theme::Light => self.colors.light.clone(),
        }
    }
}
