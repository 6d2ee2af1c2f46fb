// Clipboard copy with user feedback
use async_trait::async_trait;

use crate::error::ClientError;
use crate::notify::NotificationPresenter;

pub const COPIED_TITLE: &str = "Copiado!";
pub const COPIED_MESSAGE: &str = "Texto copiado para a área de transferência";
pub const COPY_FAILED_TITLE: &str = "Erro";
pub const COPY_FAILED_MESSAGE: &str = "Não foi possível copiar o texto";

/// Platform clipboard capability. Fails when access is denied or no
/// clipboard is available. Runs on the UI thread, so futures need not be `Send`.
#[async_trait(?Send)]
pub trait ClipboardWriter {
    async fn write_text(&self, text: &str) -> anyhow::Result<()>;
}

/// Copies `text` and tells the user how it went. Never fails; returns
/// whether the text reached the clipboard.
pub async fn copy_to_clipboard(
    clipboard: &dyn ClipboardWriter,
    presenter: &dyn NotificationPresenter,
    text: &str,
) -> bool {
    match clipboard.write_text(text).await {
        Ok(()) => {
            if let Err(e) = presenter.success(COPIED_TITLE, COPIED_MESSAGE) {
                tracing::warn!(error = %e, "Could not show copy confirmation");
            }
            true
        }
        Err(e) => {
            let err = ClientError::ClipboardError(e);
            tracing::error!(error = %err, "Failed to copy text");
            if let Err(e) = presenter.error(COPY_FAILED_TITLE, COPY_FAILED_MESSAGE) {
                tracing::warn!(error = %e, "Could not show copy failure");
            }
            false
        }
    }
}
