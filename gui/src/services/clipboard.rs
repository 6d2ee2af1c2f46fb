// Clipboard access through the webview's async clipboard API
use anyhow::anyhow;
use async_trait::async_trait;
use client::services::ClipboardWriter;
use dioxus::prelude::*;
use serde_json::Value;

const WRITE_TEXT_JS: &str = r#"
    const text = await dioxus.recv();
    try {
        await navigator.clipboard.writeText(text);
        dioxus.send({ ok: true });
    } catch (err) {
        dioxus.send({ ok: false, error: String(err) });
    }
"#;

pub struct WebviewClipboard;

#[async_trait(?Send)]
impl ClipboardWriter for WebviewClipboard {
    async fn write_text(&self, text: &str) -> anyhow::Result<()> {
        let mut script = eval(WRITE_TEXT_JS);
        script
            .send(Value::String(text.to_string()))
            .map_err(|e| anyhow!("clipboard script failed to start: {:?}", e))?;
        let reply = script
            .recv()
            .await
            .map_err(|e| anyhow!("clipboard script did not answer: {:?}", e))?;

        if reply.get("ok").and_then(Value::as_bool) == Some(true) {
            Ok(())
        } else {
            let reason = reply
                .get("error")
                .and_then(Value::as_str)
                .unwrap_or("clipboard unavailable");
            Err(anyhow!("{}", reason))
        }
    }
}
