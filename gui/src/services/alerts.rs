// Alert backend that forwards requests to the overlay component over a channel.
// Dialogs get a oneshot reply that the overlay fulfils when a button is clicked.

use std::sync::{Arc, Mutex};

use anyhow::anyhow;
use async_trait::async_trait;
use client::notify::{AlertBackend, AlertOptions, AlertOutcome};
use tokio::sync::{mpsc, oneshot};

#[derive(Debug)]
pub struct AlertRequest {
    pub options: AlertOptions,
    pub reply: Option<oneshot::Sender<AlertOutcome>>,
}

pub struct ChannelAlertBackend {
    tx: mpsc::UnboundedSender<AlertRequest>,
}

/// Receiving end, handed to the overlay once through the launch context.
#[derive(Clone)]
pub struct AlertInbox(Arc<Mutex<Option<mpsc::UnboundedReceiver<AlertRequest>>>>);

impl AlertInbox {
    pub fn take(&self) -> Option<mpsc::UnboundedReceiver<AlertRequest>> {
        match self.0.lock() {
            Ok(mut guard) => guard.take(),
            Err(_) => None,
        }
    }
}

pub fn alert_channel() -> (ChannelAlertBackend, AlertInbox) {
    let (tx, rx) = mpsc::unbounded_channel();
    (ChannelAlertBackend { tx }, AlertInbox(Arc::new(Mutex::new(Some(rx)))))
}

#[async_trait]
impl AlertBackend for ChannelAlertBackend {
    fn show(&self, options: AlertOptions) -> anyhow::Result<()> {
        self.tx
            .send(AlertRequest { options, reply: None })
            .map_err(|_| anyhow!("alert overlay is not running"))
    }

    async fn ask(&self, options: AlertOptions) -> anyhow::Result<AlertOutcome> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(AlertRequest { options, reply: Some(reply_tx) })
            .map_err(|_| anyhow!("alert overlay is not running"))?;
        reply_rx
            .await
            .map_err(|_| anyhow!("dialog closed without an answer"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_show_forwards_without_reply() {
        let (backend, inbox) = alert_channel();
        let mut rx = inbox.take().unwrap();
        assert!(inbox.take().is_none());

        backend.show(AlertOptions { title: "Oi".to_string(), ..AlertOptions::default() }).unwrap();
        let request = rx.recv().await.unwrap();
        assert_eq!(request.options.title, "Oi");
        assert!(request.reply.is_none());
    }

    #[tokio::test]
    async fn test_ask_waits_for_overlay_answer() {
        let (backend, inbox) = alert_channel();
        let mut rx = inbox.take().unwrap();

        let overlay = tokio::spawn(async move {
            let request = rx.recv().await.unwrap();
            request.reply.unwrap().send(AlertOutcome::confirmed()).unwrap();
        });
        let outcome = backend.ask(AlertOptions::default()).await.unwrap();
        assert!(outcome.is_confirmed);
        overlay.await.unwrap();
    }

    #[tokio::test]
    async fn test_closed_overlay_is_an_error() {
        let (backend, inbox) = alert_channel();
        drop(inbox.take());
        assert!(backend.show(AlertOptions::default()).is_err());
        assert!(backend.ask(AlertOptions::default()).await.is_err());
    }
}
