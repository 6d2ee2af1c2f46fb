#![allow(non_snake_case)]
use dioxus::prelude::*;

use crate::config::AppConfig;

/// Hover hint around `children`. Renders the children bare when tooltips
/// are switched off in the config.
#[component]
pub fn Tooltip(text: String, children: Element) -> Element {
    let config = use_context::<AppConfig>();
    if !config.app.tooltips {
        return rsx! { {children} };
    }

    rsx! {
        span {
            class: "tooltip-wrapper",
            "data-bs-toggle": "tooltip",
            title: "{text}",
            {children}
            span { class: "tooltip-text", role: "tooltip", "{text}" }
        }
    }
}
