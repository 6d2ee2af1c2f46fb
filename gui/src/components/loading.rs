#![allow(non_snake_case)]
use dioxus::prelude::*;

use crate::state::app_state::AppState;

/// Full-window overlay shown while a request is in flight.
#[component]
pub fn LoadingSpinner() -> Element {
    let app_state = use_context::<Signal<AppState>>();
    let hidden = if app_state.read().ui.is_loading() { "" } else { " d-none" };

    rsx! {
        div {
            id: "loadingSpinner",
            class: "loading-overlay{hidden}",
            div { class: "spinner", role: "status" }
            span { class: "visually-hidden", "Carregando..." }
        }
    }
}
