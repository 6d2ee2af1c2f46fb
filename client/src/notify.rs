//! Notification presentation
//!
//! [`NotificationPresenter`] is what views call (`success`, `error`,
//! `warning`, `info`, `confirm`). [`Notifier`] implements it by building
//! [`AlertOptions`] and handing them to an [`AlertBackend`], the piece that
//! actually draws toasts and dialogs. Swapping the backend lets the helpers
//! run without any UI present.

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use crate::config::ClientSettings;
use crate::error::{ClientError, Result};

pub const CONFIRM_BUTTON_COLOR: &str = "#198754";
pub const CANCEL_BUTTON_COLOR: &str = "#6c757d";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertIcon {
    Success,
    Error,
    Warning,
    Info,
    Question,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToastPosition {
    Top,
    TopStart,
    TopEnd,
    Center,
    Bottom,
    BottomStart,
    BottomEnd,
}

impl FromStr for ToastPosition {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "top" => Ok(ToastPosition::Top),
            "top-start" => Ok(ToastPosition::TopStart),
            "top-end" => Ok(ToastPosition::TopEnd),
            "center" => Ok(ToastPosition::Center),
            "bottom" => Ok(ToastPosition::Bottom),
            "bottom-start" => Ok(ToastPosition::BottomStart),
            "bottom-end" => Ok(ToastPosition::BottomEnd),
            other => Err(ClientError::ConfigError(format!("unknown toast position '{}'", other))),
        }
    }
}

/// Everything a backend needs to draw one toast or dialog.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertOptions {
    pub icon: Option<AlertIcon>,
    pub title: String,
    pub text: String,
    pub timer: Option<Duration>,
    pub timer_progress_bar: bool,
    pub show_confirm_button: bool,
    pub show_cancel_button: bool,
    pub toast: bool,
    pub position: Option<ToastPosition>,
    pub confirm_button_text: Option<String>,
    pub cancel_button_text: Option<String>,
    pub confirm_button_color: Option<String>,
    pub cancel_button_color: Option<String>,
    pub pause_on_hover: bool,
}

impl Default for AlertOptions {
    fn default() -> Self {
        Self {
            icon: None,
            title: String::new(),
            text: String::new(),
            timer: None,
            timer_progress_bar: false,
            show_confirm_button: true,
            show_cancel_button: false,
            toast: false,
            position: None,
            confirm_button_text: None,
            cancel_button_text: None,
            confirm_button_color: None,
            cancel_button_color: None,
            pause_on_hover: false,
        }
    }
}

/// How the user closed a dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AlertOutcome {
    pub is_confirmed: bool,
    pub is_dismissed: bool,
}

impl AlertOutcome {
    pub fn confirmed() -> Self {
        Self { is_confirmed: true, is_dismissed: false }
    }

    pub fn dismissed() -> Self {
        Self { is_confirmed: false, is_dismissed: true }
    }
}

/// The toast/dialog renderer.
#[async_trait]
pub trait AlertBackend: Send + Sync {
    /// Presents an alert without waiting for it to close.
    fn show(&self, options: AlertOptions) -> anyhow::Result<()>;

    /// Presents a dialog and resolves once the user answers it.
    async fn ask(&self, options: AlertOptions) -> anyhow::Result<AlertOutcome>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConfirmRequest {
    pub title: String,
    pub message: String,
    pub confirm_text: String,
    pub cancel_text: String,
}

impl ConfirmRequest {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            confirm_text: "Sim".to_string(),
            cancel_text: "Não".to_string(),
        }
    }

    pub fn with_labels(mut self, confirm_text: impl Into<String>, cancel_text: impl Into<String>) -> Self {
        self.confirm_text = confirm_text.into();
        self.cancel_text = cancel_text.into();
        self
    }
}

#[async_trait]
pub trait NotificationPresenter: Send + Sync {
    fn success(&self, title: &str, message: &str) -> Result<()>;
    fn error(&self, title: &str, message: &str) -> Result<()>;
    fn warning(&self, title: &str, message: &str) -> Result<()>;
    fn info(&self, title: &str, message: &str) -> Result<()>;
    async fn confirm(&self, request: ConfirmRequest) -> Result<bool>;
}

/// Defaults applied to every toast.
#[derive(Debug, Clone, PartialEq)]
pub struct ToastDefaults {
    pub position: ToastPosition,
    pub timer: Duration,
    pub timer_progress_bar: bool,
    pub pause_on_hover: bool,
}

impl Default for ToastDefaults {
    fn default() -> Self {
        Self {
            position: ToastPosition::TopEnd,
            timer: Duration::from_millis(3000),
            timer_progress_bar: true,
            pause_on_hover: true,
        }
    }
}

impl ToastDefaults {
    pub fn from_settings(settings: &ClientSettings) -> Result<Self> {
        Ok(Self {
            position: settings.toast_position.parse()?,
            timer: Duration::from_millis(settings.toast_timer_ms),
            ..Self::default()
        })
    }
}

pub struct Notifier<B: AlertBackend> {
    backend: Arc<B>,
    defaults: ToastDefaults,
}

impl<B: AlertBackend> Clone for Notifier<B> {
    fn clone(&self) -> Self {
        Self {
            backend: self.backend.clone(),
            defaults: self.defaults.clone(),
        }
    }
}

impl<B: AlertBackend> Notifier<B> {
    pub fn new(backend: Arc<B>, defaults: ToastDefaults) -> Self {
        Self { backend, defaults }
    }

    pub fn defaults(&self) -> &ToastDefaults {
        &self.defaults
    }

    /// Short toast with only an icon and a title, using the configured defaults.
    pub fn toast(&self, icon: AlertIcon, title: &str) -> Result<()> {
        self.present(self.toast_options(icon, title, ""))
    }

    fn toast_options(&self, icon: AlertIcon, title: &str, message: &str) -> AlertOptions {
        AlertOptions {
            icon: Some(icon),
            title: title.to_string(),
            text: message.to_string(),
            timer: Some(self.defaults.timer),
            timer_progress_bar: self.defaults.timer_progress_bar,
            show_confirm_button: false,
            toast: true,
            position: Some(self.defaults.position),
            pause_on_hover: self.defaults.pause_on_hover,
            ..AlertOptions::default()
        }
    }

    fn modal_options(icon: AlertIcon, title: &str, message: &str) -> AlertOptions {
        AlertOptions {
            icon: Some(icon),
            title: title.to_string(),
            text: message.to_string(),
            confirm_button_text: Some("OK".to_string()),
            ..AlertOptions::default()
        }
    }

    fn present(&self, options: AlertOptions) -> Result<()> {
        self.backend.show(options).map_err(ClientError::AlertError)
    }
}

#[async_trait]
impl<B: AlertBackend> NotificationPresenter for Notifier<B> {
    fn success(&self, title: &str, message: &str) -> Result<()> {
        self.present(self.toast_options(AlertIcon::Success, title, message))
    }

    fn error(&self, title: &str, message: &str) -> Result<()> {
        self.present(Self::modal_options(AlertIcon::Error, title, message))
    }

    fn warning(&self, title: &str, message: &str) -> Result<()> {
        self.present(Self::modal_options(AlertIcon::Warning, title, message))
    }

    fn info(&self, title: &str, message: &str) -> Result<()> {
        self.present(Self::modal_options(AlertIcon::Info, title, message))
    }

    async fn confirm(&self, request: ConfirmRequest) -> Result<bool> {
        let options = AlertOptions {
            icon: Some(AlertIcon::Question),
            title: request.title,
            text: request.message,
            show_cancel_button: true,
            confirm_button_text: Some(request.confirm_text),
            cancel_button_text: Some(request.cancel_text),
            confirm_button_color: Some(CONFIRM_BUTTON_COLOR.to_string()),
            cancel_button_color: Some(CANCEL_BUTTON_COLOR.to_string()),
            ..AlertOptions::default()
        };
        let outcome = self.backend.ask(options).await.map_err(ClientError::AlertError)?;
        Ok(outcome.is_confirmed)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    pub(crate) struct RecordingBackend {
        pub shown: Mutex<Vec<AlertOptions>>,
        pub asked: Mutex<Vec<AlertOptions>>,
        pub answer: Mutex<Option<AlertOutcome>>,
        pub fail: bool,
    }

    #[async_trait]
    impl AlertBackend for RecordingBackend {
        fn show(&self, options: AlertOptions) -> anyhow::Result<()> {
            if self.fail {
                anyhow::bail!("renderer unavailable");
            }
            self.shown.lock().unwrap().push(options);
            Ok(())
        }

        async fn ask(&self, options: AlertOptions) -> anyhow::Result<AlertOutcome> {
            if self.fail {
                anyhow::bail!("renderer unavailable");
            }
            self.asked.lock().unwrap().push(options);
            Ok(self.answer.lock().unwrap().unwrap_or_default())
        }
    }

    fn notifier(backend: RecordingBackend) -> (Arc<RecordingBackend>, Notifier<RecordingBackend>) {
        let backend = Arc::new(backend);
        (backend.clone(), Notifier::new(backend, ToastDefaults::default()))
    }

    #[test]
    fn test_success_is_a_timed_toast() {
        let (backend, notifier) = notifier(RecordingBackend::default());
        notifier.success("Salvo!", "Produto cadastrado").unwrap();

        let shown = backend.shown.lock().unwrap();
        let options = &shown[0];
        assert_eq!(options.icon, Some(AlertIcon::Success));
        assert_eq!(options.title, "Salvo!");
        assert_eq!(options.text, "Produto cadastrado");
        assert!(options.toast);
        assert!(!options.show_confirm_button);
        assert!(options.timer_progress_bar);
        assert_eq!(options.timer, Some(Duration::from_millis(3000)));
        assert_eq!(options.position, Some(ToastPosition::TopEnd));
    }

    #[test]
    fn test_error_warning_info_are_modal_with_ok() {
        let (backend, notifier) = notifier(RecordingBackend::default());
        notifier.error("Erro", "Falhou").unwrap();
        notifier.warning("Atenção", "").unwrap();
        notifier.info("Info", "").unwrap();

        let shown = backend.shown.lock().unwrap();
        let icons: Vec<_> = shown.iter().map(|o| o.icon).collect();
        assert_eq!(icons, vec![Some(AlertIcon::Error), Some(AlertIcon::Warning), Some(AlertIcon::Info)]);
        for options in shown.iter() {
            assert!(!options.toast);
            assert!(options.show_confirm_button);
            assert_eq!(options.confirm_button_text.as_deref(), Some("OK"));
            assert_eq!(options.timer, None);
        }
    }

    #[tokio::test]
    async fn test_confirm_returns_is_confirmed() {
        let backend = RecordingBackend::default();
        *backend.answer.lock().unwrap() = Some(AlertOutcome::confirmed());
        let (backend, notifier) = notifier(backend);

        let confirmed = notifier
            .confirm(ConfirmRequest::new("Excluir produto?", "Esta ação não pode ser desfeita"))
            .await
            .unwrap();
        assert!(confirmed);

        let asked = backend.asked.lock().unwrap();
        let options = &asked[0];
        assert_eq!(options.icon, Some(AlertIcon::Question));
        assert!(options.show_cancel_button);
        assert_eq!(options.confirm_button_text.as_deref(), Some("Sim"));
        assert_eq!(options.cancel_button_text.as_deref(), Some("Não"));
        assert_eq!(options.confirm_button_color.as_deref(), Some(CONFIRM_BUTTON_COLOR));
        assert_eq!(options.cancel_button_color.as_deref(), Some(CANCEL_BUTTON_COLOR));
    }

    #[tokio::test]
    async fn test_confirm_dismissed_is_false() {
        let backend = RecordingBackend::default();
        *backend.answer.lock().unwrap() = Some(AlertOutcome::dismissed());
        let (_, notifier) = notifier(backend);
        let request = ConfirmRequest::new("Sair?", "").with_labels("Sair", "Ficar");
        assert!(!notifier.confirm(request).await.unwrap());
    }

    #[tokio::test]
    async fn test_backend_failures_propagate() {
        let (_, notifier) = notifier(RecordingBackend { fail: true, ..Default::default() });
        assert!(matches!(notifier.success("x", ""), Err(ClientError::AlertError(_))));
        assert!(matches!(
            notifier.confirm(ConfirmRequest::new("x", "")).await,
            Err(ClientError::AlertError(_))
        ));
    }

    #[test]
    fn test_toast_defaults_from_settings() {
        let settings = ClientSettings {
            toast_timer_ms: 5000,
            toast_position: "bottom-end".to_string(),
            ..ClientSettings::default()
        };
        let defaults = ToastDefaults::from_settings(&settings).unwrap();
        assert_eq!(defaults.position, ToastPosition::BottomEnd);
        assert_eq!(defaults.timer, Duration::from_millis(5000));

        let bad = ClientSettings { toast_position: "middle".to_string(), ..ClientSettings::default() };
        assert!(ToastDefaults::from_settings(&bad).is_err());
    }
}
