// Barcode lookup: validates the code, asks the backend for the product and
// shows it in a modal. The last code typed is remembered across sessions.
#![allow(non_snake_case)]
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use chrono::{Local, NaiveDateTime};
use client::notify::{AlertIcon, ConfirmRequest, NotificationPresenter};
use client::services::copy_to_clipboard;
use client::timing::{debounce, throttle, Throttle};
use client::ui::{Animation, FieldRule, FormValidation, ANIMATION_DURATION};
use dioxus::prelude::*;
use shared::models::{ApiReply, Produto};
use shared::{format_date_time, format_money, format_number, string_to_slug};
use tokio::sync::mpsc;

use crate::components::Tooltip;
use crate::services::clipboard::WebviewClipboard;
use crate::services::Services;
use crate::state::app_state::AppState;

const BARCODE_FIELD: &str = "codigo_barras";
const LAST_BARCODE_KEY: &str = "ultimoCodigoBarras";
const PRODUCT_MODAL: &str = "modalProduto";
const PERSIST_DELAY: Duration = Duration::from_millis(500);
const SEARCH_THROTTLE: Duration = Duration::from_millis(1000);

type LookupQueue = Rc<RefCell<Option<mpsc::UnboundedReceiver<String>>>>;

fn product_url(code: &str) -> String {
    format!("/api/produto/{}", code)
}

async fn run_lookup(
    services: Services,
    mut app_state: Signal<AppState>,
    mut produto: Signal<Option<Produto>>,
    mut looked_up_at: Signal<Option<NaiveDateTime>>,
    code: String,
) {
    app_state.write().ui.show_loading();
    let result = services.http.get::<ApiReply<Produto>>(&product_url(&code)).await;
    app_state.write().ui.hide_loading();

    let notifier = &services.notifier;
    let shown = match result.map(ApiReply::into_result) {
        Ok(Ok(found)) => {
            tracing::info!(code = %code, id = found.id, "Product found");
            let shown = notifier.success("Produto encontrado", &found.nome);
            produto.set(Some(found));
            looked_up_at.set(Some(Local::now().naive_local()));
            app_state.write().ui.open_modal(PRODUCT_MODAL);
            shown
        }
        Ok(Err(message)) => notifier.warning("Produto não encontrado", &message),
        Err(e) if e.status() == Some(404) => notifier.warning(
            "Produto não encontrado",
            &format!("Nenhum produto com o código {}", code),
        ),
        Err(e) => notifier.error("Erro", &e.to_string()),
    };
    if let Err(e) = shown {
        tracing::warn!(error = %e, "Could not show lookup result");
    }
}

#[component]
pub fn ProductLookup() -> Element {
    let services = use_context::<Services>();
    let mut app_state = use_context::<Signal<AppState>>();

    let mut barcode = use_signal(|| {
        services
            .storage
            .load::<String>(LAST_BARCODE_KEY)
            .unwrap_or_default()
    });
    let mut form = use_signal(|| {
        FormValidation::new().field(BARCODE_FIELD, &[FieldRule::Required, FieldRule::Barcode])
    });
    let produto = use_signal(|| None::<Produto>);
    let looked_up_at = use_signal(|| None::<NaiveDateTime>);

    let persist = use_hook(|| {
        let storage = services.storage.clone();
        Rc::new(debounce(
            move |code: String| storage.save(LAST_BARCODE_KEY, &code),
            PERSIST_DELAY,
        ))
    });

    // Repeated clicks inside the throttle window never reach the queue.
    let (gate, queue): (Rc<Throttle<String>>, LookupQueue) = use_hook(|| {
        let (tx, rx) = mpsc::unbounded_channel::<String>();
        let gate = throttle(
            move |code: String| {
                if tx.send(code).is_err() {
                    tracing::warn!("Lookup queue closed");
                }
            },
            SEARCH_THROTTLE,
        );
        (Rc::new(gate), Rc::new(RefCell::new(Some(rx))))
    });

    let lookup_services = services.clone();
    use_future(move || {
        let receiver = queue.borrow_mut().take();
        let services = lookup_services.clone();
        async move {
            let Some(mut receiver) = receiver else {
                return;
            };
            while let Some(code) = receiver.recv().await {
                run_lookup(services.clone(), app_state, produto, looked_up_at, code).await;
            }
        }
    });

    let submit = move || {
        let code = barcode.read().trim().to_string();
        let values = HashMap::from([(BARCODE_FIELD.to_string(), code.clone())]);
        if !form.write().submit(&values) {
            app_state.write().ui.animate(BARCODE_FIELD, Animation::Shake);
            spawn(async move {
                tokio::time::sleep(ANIMATION_DURATION).await;
                app_state.write().ui.clear_animation(BARCODE_FIELD);
            });
            return;
        }
        if !gate.call(code) {
            tracing::debug!("Lookup throttled");
        }
    };
    let mut submit_on_click = submit.clone();
    let mut submit_on_enter = submit;

    let clear_services = services.clone();
    let clear_history = move |_: MouseEvent| {
        let services = clear_services.clone();
        spawn(async move {
            let notifier = &services.notifier;
            let request = ConfirmRequest::new(
                "Limpar histórico?",
                "O último código pesquisado será esquecido.",
            );
            let confirmed = match notifier.confirm(request).await {
                Ok(confirmed) => confirmed,
                Err(e) => {
                    tracing::warn!(error = %e, "Confirmation dialog failed");
                    false
                }
            };
            if !confirmed {
                return;
            }
            let shown = match services.storage.try_remove(LAST_BARCODE_KEY) {
                Ok(()) => {
                    barcode.set(String::new());
                    form.write().reset();
                    notifier.toast(AlertIcon::Success, "Histórico limpo")
                }
                Err(e) => notifier.error("Erro", &e.to_string()),
            };
            if let Err(e) = shown {
                tracing::warn!(error = %e, "Could not show notification");
            }
        });
    };

    let (invalid_class, feedback) = {
        let form = form.read();
        match form.error_for(BARCODE_FIELD) {
            Some(error) if form.was_validated() => ("is-invalid", error.message.clone()),
            _ if form.was_validated() => ("is-valid", String::new()),
            _ => ("", String::new()),
        }
    };
    let animation = app_state.read().ui.animation_classes(BARCODE_FIELD);
    let modal_open = app_state.read().ui.is_modal_open(PRODUCT_MODAL);

    rsx! {
        div {
            class: "card lookup-card",
            h1 { class: "card-title", "Consulta de produto" }
            div {
                class: "input-group {animation}",
                input {
                    id: "barcodeInput",
                    class: "form-control {invalid_class}",
                    r#type: "text",
                    inputmode: "numeric",
                    autocomplete: "off",
                    placeholder: "Código de barras",
                    value: "{barcode}",
                    oninput: move |evt| {
                        let value = evt.value();
                        persist.call(value.clone());
                        barcode.set(value);
                    },
                    onkeydown: move |evt: KeyboardEvent| {
                        if evt.key().to_string() == "Enter" {
                            submit_on_enter();
                        }
                    },
                }
                Tooltip {
                    text: "Buscar produto (Ctrl+K foca o campo)",
                    button {
                        class: "btn btn-primary",
                        r#type: "button",
                        onclick: move |_| submit_on_click(),
                        "Buscar"
                    }
                }
            }
            if !feedback.is_empty() {
                div { class: "invalid-feedback d-block", "{feedback}" }
            }
            Tooltip {
                text: "Esquece o último código pesquisado",
                button {
                    class: "btn btn-link btn-sm",
                    r#type: "button",
                    onclick: clear_history,
                    "Limpar histórico"
                }
            }
        }
        if modal_open {
            ProductModal { produto, looked_up_at }
        }
    }
}

#[component]
fn ProductModal(produto: Signal<Option<Produto>>, looked_up_at: Signal<Option<NaiveDateTime>>) -> Element {
    let services = use_context::<Services>();
    let mut app_state = use_context::<Signal<AppState>>();

    let Some(item) = produto.read().clone() else {
        return rsx! {};
    };
    let price = format_money(item.preco);
    let stock = format_number(item.estoque as f64);
    let category_tag = string_to_slug(&item.categoria);
    let consulted = looked_up_at()
        .map(|at| format_date_time(at))
        .unwrap_or_default();
    let pulse = Animation::Pulse.classes();
    let status = if item.ativo { "Ativo" } else { "Inativo" };
    let name = item.nome.clone();
    let category = item.categoria.clone();
    let code = item.codigo_barras.clone();
    let code_label = item.codigo_barras.clone();

    rsx! {
        div {
            id: "{PRODUCT_MODAL}",
            class: "dialog-backdrop",
            div {
                class: "dialog-card product-card {pulse}",
                role: "dialog",
                h2 { class: "dialog-title", "{name}" }
                span { class: "badge category-{category_tag}", "{category}" }
                dl {
                    dt { "Preço" }
                    dd { "{price}" }
                    dt { "Estoque" }
                    dd { "{stock}" }
                    dt { "Código de barras" }
                    dd { "{code_label}" }
                    dt { "Situação" }
                    dd { "{status}" }
                }
                small { class: "text-muted", "Consultado em {consulted}" }
                div {
                    class: "dialog-actions",
                    Tooltip {
                        text: "Copiar código de barras",
                        button {
                            r#type: "button",
                            class: "btn btn-outline-secondary",
                            onclick: move |_| {
                                let services = services.clone();
                                let code = code.clone();
                                spawn(async move {
                                    copy_to_clipboard(&WebviewClipboard, &services.notifier, &code).await;
                                });
                            },
                            "Copiar código"
                        }
                    }
                    button {
                        r#type: "button",
                        class: "btn btn-secondary",
                        onclick: move |_| app_state.write().ui.close_modal(PRODUCT_MODAL),
                        "Fechar"
                    }
                }
            }
        }
    }
}
