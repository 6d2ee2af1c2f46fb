// Toast and dialog overlay, the drawing side of the alert channel
#![allow(non_snake_case)]
use std::time::Duration;

use client::notify::{AlertIcon, AlertOptions, AlertOutcome, ToastPosition, CANCEL_BUTTON_COLOR};
use dioxus::prelude::*;
use shared::generate_unique_id;
use tokio::sync::oneshot;
use tokio::time::Instant;

use crate::config::theme::icon_style;
use crate::services::alerts::{AlertInbox, AlertRequest};

const ESCAPE_LISTENER_JS: &str = r#"
    document.addEventListener('keydown', (e) => {
        if (e.key === 'Escape') { dioxus.send(true); }
    });
"#;

const PAUSED_POLL: Duration = Duration::from_millis(250);

/// Countdown that can be paused and picks up where it stopped.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ToastTimer {
    remaining: Duration,
    running_since: Option<Instant>,
}

impl ToastTimer {
    fn start(total: Duration, now: Instant) -> Self {
        Self { remaining: total, running_since: Some(now) }
    }

    fn pause(&mut self, now: Instant) {
        if let Some(since) = self.running_since.take() {
            self.remaining = self.remaining.saturating_sub(now.saturating_duration_since(since));
        }
    }

    fn resume(&mut self, now: Instant) {
        if self.running_since.is_none() {
            self.running_since = Some(now);
        }
    }

    /// `None` while paused.
    fn time_left(&self, now: Instant) -> Option<Duration> {
        self.running_since
            .map(|since| self.remaining.saturating_sub(now.saturating_duration_since(since)))
    }
}

pub struct PendingAlert {
    id: String,
    options: AlertOptions,
    reply: Option<oneshot::Sender<AlertOutcome>>,
    timer: Option<ToastTimer>,
}

/// Dialog that Escape should dismiss: the one on screen.
fn oldest_dialog(alerts: &[PendingAlert]) -> Option<String> {
    alerts.iter().find(|a| !a.options.toast).map(|a| a.id.clone())
}

// Owned snapshot of one alert for rendering.
#[derive(Clone, PartialEq)]
struct AlertView {
    id: String,
    icon: Option<AlertIcon>,
    title: String,
    text: String,
    toast: bool,
    position: ToastPosition,
    timer_ms: Option<u128>,
    pause_on_hover: bool,
    show_confirm: bool,
    show_cancel: bool,
    confirm_text: String,
    cancel_text: String,
    confirm_color: String,
    cancel_color: String,
}

impl From<&PendingAlert> for AlertView {
    fn from(alert: &PendingAlert) -> Self {
        let o = &alert.options;
        Self {
            id: alert.id.clone(),
            icon: o.icon,
            title: o.title.clone(),
            text: o.text.clone(),
            toast: o.toast,
            position: o.position.unwrap_or(ToastPosition::TopEnd),
            timer_ms: o.timer.filter(|_| o.timer_progress_bar).map(|t| t.as_millis()),
            pause_on_hover: o.pause_on_hover,
            show_confirm: o.show_confirm_button,
            show_cancel: o.show_cancel_button,
            confirm_text: o.confirm_button_text.clone().unwrap_or_else(|| "OK".to_string()),
            cancel_text: o.cancel_button_text.clone().unwrap_or_else(|| "Cancelar".to_string()),
            confirm_color: o.confirm_button_color.clone().unwrap_or_else(|| "#0d6efd".to_string()),
            cancel_color: o.cancel_button_color.clone().unwrap_or_else(|| CANCEL_BUTTON_COLOR.to_string()),
        }
    }
}

fn position_style(position: ToastPosition) -> &'static str {
    match position {
        ToastPosition::Top => "top: 1rem; left: 50%; transform: translateX(-50%);",
        ToastPosition::TopStart => "top: 1rem; left: 1rem;",
        ToastPosition::TopEnd => "top: 1rem; right: 1rem;",
        ToastPosition::Center => "top: 50%; left: 50%; transform: translate(-50%, -50%);",
        ToastPosition::Bottom => "bottom: 1rem; left: 50%; transform: translateX(-50%);",
        ToastPosition::BottomStart => "bottom: 1rem; left: 1rem;",
        ToastPosition::BottomEnd => "bottom: 1rem; right: 1rem;",
    }
}

fn enqueue(mut alerts: Signal<Vec<PendingAlert>>, request: AlertRequest) {
    let id = generate_unique_id();
    let timer = request.options.timer.map(|total| ToastTimer::start(total, Instant::now()));
    let timed = timer.is_some();
    alerts.write().push(PendingAlert {
        id: id.clone(),
        options: request.options,
        reply: request.reply,
        timer,
    });

    if timed {
        spawn(async move {
            loop {
                let left = alerts
                    .read()
                    .iter()
                    .find(|a| a.id == id)
                    .and_then(|a| a.timer)
                    .map(|t| t.time_left(Instant::now()));
                match left {
                    // Closed by hand already
                    None => return,
                    Some(None) => tokio::time::sleep(PAUSED_POLL).await,
                    Some(Some(d)) if d.is_zero() => break,
                    Some(Some(d)) => tokio::time::sleep(d).await,
                }
            }
            resolve(alerts, &id, AlertOutcome::dismissed());
        });
    }
}

fn resolve(mut alerts: Signal<Vec<PendingAlert>>, id: &str, outcome: AlertOutcome) {
    let removed = {
        let mut list = alerts.write();
        list.iter().position(|a| a.id == id).map(|pos| list.remove(pos))
    };
    if let Some(reply) = removed.and_then(|alert| alert.reply) {
        // The asker may have gone away; nothing to do then.
        let _ = reply.send(outcome);
    }
}

fn set_paused(mut alerts: Signal<Vec<PendingAlert>>, id: &str, paused: bool) {
    let now = Instant::now();
    if let Some(timer) = alerts
        .write()
        .iter_mut()
        .find(|a| a.id == id)
        .and_then(|a| a.timer.as_mut())
    {
        if paused {
            timer.pause(now);
        } else {
            timer.resume(now);
        }
    }
}

#[component]
pub fn AlertOverlay() -> Element {
    let inbox = use_context::<AlertInbox>();
    let alerts = use_signal(Vec::<PendingAlert>::new);

    use_future(move || {
        let receiver = inbox.take();
        async move {
            let Some(mut receiver) = receiver else {
                tracing::warn!("Alert inbox already taken; overlay will stay empty");
                return;
            };
            while let Some(request) = receiver.recv().await {
                enqueue(alerts, request);
            }
        }
    });

    use_future(move || async move {
        let mut listener = eval(ESCAPE_LISTENER_JS);
        while listener.recv().await.is_ok() {
            let dialog = oldest_dialog(&alerts.read());
            if let Some(id) = dialog {
                resolve(alerts, &id, AlertOutcome::dismissed());
            }
        }
        tracing::warn!("Escape listener stopped");
    });

    let views: Vec<AlertView> = alerts.read().iter().map(AlertView::from).collect();
    let (toasts, dialogs): (Vec<AlertView>, Vec<AlertView>) = views.into_iter().partition(|v| v.toast);
    let container_style = position_style(toasts.first().map(|t| t.position).unwrap_or(ToastPosition::TopEnd));
    // Dialogs queue up; only the oldest is on screen.
    let dialog = dialogs.into_iter().next();

    rsx! {
        div {
            class: "toast-container",
            style: "position: fixed; z-index: 1100; display: flex; flex-direction: column; gap: .5rem; {container_style}",
            for toast in toasts {
                ToastCard { key: "{toast.id}", view: toast, alerts }
            }
        }
        {dialog.map(|view| rsx! { DialogCard { view, alerts } })}
    }
}

#[component]
fn ToastCard(view: AlertView, alerts: Signal<Vec<PendingAlert>>) -> Element {
    let (glyph, color) = view.icon.map(icon_style).unwrap_or(("", "#6c757d"));
    let pause_on_hover = view.pause_on_hover;
    let enter_id = view.id.clone();
    let leave_id = view.id.clone();
    let close_id = view.id.clone();
    let title = view.title.clone();
    let text = view.text.clone();

    rsx! {
        div {
            class: "toast-card",
            role: "alert",
            style: "border-left: 4px solid {color};",
            onmouseenter: move |_| {
                if pause_on_hover {
                    set_paused(alerts, &enter_id, true);
                }
            },
            onmouseleave: move |_| {
                if pause_on_hover {
                    set_paused(alerts, &leave_id, false);
                }
            },
            span { class: "alert-icon", style: "color: {color};", "{glyph}" }
            div {
                class: "toast-body",
                strong { "{title}" }
                if !text.is_empty() {
                    div { class: "toast-text", "{text}" }
                }
            }
            button {
                class: "toast-close",
                r#type: "button",
                onclick: move |_| resolve(alerts, &close_id, AlertOutcome::dismissed()),
                "×"
            }
            if let Some(ms) = view.timer_ms {
                div { class: "toast-progress", style: "animation-duration: {ms}ms; background: {color};" }
            }
        }
    }
}

#[component]
fn DialogCard(view: AlertView, alerts: Signal<Vec<PendingAlert>>) -> Element {
    let (glyph, color) = view.icon.map(icon_style).unwrap_or(("", "#6c757d"));
    let confirm_id = view.id.clone();
    let cancel_id = view.id.clone();
    let title = view.title.clone();
    let text = view.text.clone();
    let confirm_text = view.confirm_text.clone();
    let cancel_text = view.cancel_text.clone();
    let confirm_color = view.confirm_color.clone();
    let cancel_color = view.cancel_color.clone();

    rsx! {
        div {
            class: "dialog-backdrop",
            div {
                class: "dialog-card",
                role: "dialog",
                div { class: "dialog-icon", style: "color: {color}; border-color: {color};", "{glyph}" }
                h2 { class: "dialog-title", "{title}" }
                if !text.is_empty() {
                    p { class: "dialog-text", "{text}" }
                }
                div {
                    class: "dialog-actions",
                    if view.show_confirm {
                        button {
                            r#type: "button",
                            style: "background: {confirm_color};",
                            onclick: move |_| resolve(alerts, &confirm_id, AlertOutcome::confirmed()),
                            "{confirm_text}"
                        }
                    }
                    if view.show_cancel {
                        button {
                            r#type: "button",
                            style: "background: {cancel_color};",
                            onclick: move |_| resolve(alerts, &cancel_id, AlertOutcome::dismissed()),
                            "{cancel_text}"
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending(id: &str, toast: bool) -> PendingAlert {
        PendingAlert {
            id: id.to_string(),
            options: AlertOptions { toast, ..AlertOptions::default() },
            reply: None,
            timer: None,
        }
    }

    #[test]
    fn test_timer_counts_down_while_running() {
        let t0 = Instant::now();
        let timer = ToastTimer::start(Duration::from_millis(3000), t0);
        assert_eq!(timer.time_left(t0 + Duration::from_millis(1000)), Some(Duration::from_millis(2000)));
        assert_eq!(timer.time_left(t0 + Duration::from_millis(5000)), Some(Duration::ZERO));
    }

    #[test]
    fn test_hover_pause_keeps_remaining_time() {
        let t0 = Instant::now();
        let mut timer = ToastTimer::start(Duration::from_millis(3000), t0);
        timer.pause(t0 + Duration::from_millis(1000));
        assert_eq!(timer.time_left(t0 + Duration::from_millis(9000)), None);

        // Resumed long after the original deadline: still 2s to go
        let resumed_at = t0 + Duration::from_millis(10_000);
        timer.resume(resumed_at);
        assert_eq!(timer.time_left(resumed_at), Some(Duration::from_millis(2000)));
        assert_eq!(timer.time_left(resumed_at + Duration::from_millis(500)), Some(Duration::from_millis(1500)));
    }

    #[test]
    fn test_repeated_pause_and_resume_are_idempotent() {
        let t0 = Instant::now();
        let mut timer = ToastTimer::start(Duration::from_millis(3000), t0);
        timer.pause(t0 + Duration::from_millis(500));
        timer.pause(t0 + Duration::from_millis(2500));
        timer.resume(t0 + Duration::from_millis(3000));
        timer.resume(t0 + Duration::from_millis(4000));
        assert_eq!(timer.time_left(t0 + Duration::from_millis(3000)), Some(Duration::from_millis(2500)));
    }

    #[test]
    fn test_escape_targets_the_dialog_on_screen() {
        let alerts = vec![pending("toast", true), pending("first", false), pending("second", false)];
        assert_eq!(oldest_dialog(&alerts).as_deref(), Some("first"));
        assert_eq!(oldest_dialog(&[pending("toast", true)]), None);
    }
}
