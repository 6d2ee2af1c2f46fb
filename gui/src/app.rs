#![allow(non_snake_case)]
use client::ui::{ShortcutMap, UiState};
use dioxus::prelude::*;
use serde::Deserialize;

use crate::components::{AlertOverlay, LoadingSpinner, ProductLookup, Tooltip};
use crate::config::AppConfig;
use crate::services::Services;
use crate::state::app_state::{AppState, Theme};

const STYLES: &str = include_str!("../assets/styles.css");

const FOCUS_SEARCH_JS: &str = r#"
    const field = document.querySelector('#searchInput, #barcodeInput');
    if (field) { field.focus(); field.select(); }
"#;

// Shortcuts work wherever focus is, so the listener sits on the document.
const KEY_LISTENER_JS: &str = r#"
    document.addEventListener('keydown', (e) => {
        dioxus.send({ key: e.key, ctrl: e.ctrlKey });
    });
"#;

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct KeyPress {
    key: String,
    #[serde(default)]
    ctrl: bool,
}

/// Applies every shortcut bound to `press`; true when the search field
/// should take focus.
fn apply_key_press(ui: &mut UiState, shortcuts: &ShortcutMap, press: &KeyPress) -> bool {
    for action in shortcuts.resolve(&press.key, press.ctrl) {
        ui.apply_shortcut(action);
    }
    ui.take_search_focus()
}

#[component]
pub fn App() -> Element {
    let config = use_context::<AppConfig>();
    let services = use_context::<Services>();
    let mut app_state = use_context_provider(|| Signal::new(AppState::from_config(&config)));

    use_hook(|| tracing::info!(version = %config.version, "Sistema de Supermercado inicializado"));

    let shortcuts = services.shortcuts.clone();
    use_future(move || {
        let shortcuts = shortcuts.clone();
        async move {
            let mut listener = eval(KEY_LISTENER_JS);
            loop {
                let value = match listener.recv().await {
                    Ok(value) => value,
                    Err(e) => {
                        tracing::warn!(error = ?e, "Keyboard listener stopped");
                        break;
                    }
                };
                let press = match serde_json::from_value::<KeyPress>(value) {
                    Ok(press) => press,
                    Err(e) => {
                        tracing::debug!(error = %e, "Ignoring malformed key event");
                        continue;
                    }
                };
                let focus = apply_key_press(&mut app_state.write().ui, &shortcuts, &press);
                if focus {
                    let _ = eval(FOCUS_SEARCH_JS);
                }
            }
        }
    });

    let palette = app_state.read().palette();
    let background = palette.background;
    let foreground = palette.foreground;
    let dark = app_state.read().current_theme == Theme::Dark;
    let theme_label = if dark { "Tema claro" } else { "Tema escuro" };
    let title = config.app.title.clone();
    let lang = app_state.read().language.clone();

    rsx! {
        style { "{STYLES}" }
        div {
            class: "app-root",
            lang: "{lang}",
            style: "background: {background}; color: {foreground};",
            header {
                class: "app-header",
                span { class: "app-title", "{title}" }
                Tooltip {
                    text: "Alternar tema",
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| {
                            let next = if dark { Theme::Light } else { Theme::Dark };
                            app_state.write().set_theme(next);
                        },
                        "{theme_label}"
                    }
                }
            }
            main { ProductLookup {} }
            LoadingSpinner {}
            AlertOverlay {}
        }
    }
}
