// Client settings, usually embedded in the application config file
use serde::Deserialize;

use crate::error::{ClientError, Result};

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ClientSettings {
    /// Base for relative request URLs.
    pub api_base_url: String,
    /// Name of the directory / file used by the file-backed store.
    pub storage_namespace: String,
    pub toast_timer_ms: u64,
    pub toast_position: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        ClientSettings {
            api_base_url: "http://localhost:5000".to_string(),
            storage_namespace: "supermercado".to_string(),
            toast_timer_ms: 3000,
            toast_position: "top-end".to_string(),
        }
    }
}

impl ClientSettings {
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let settings: ClientSettings = serde_json::from_str(raw)
            .map_err(|e| ClientError::ConfigError(format!("invalid client settings: {}", e)))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.api_base_url.starts_with("http://") || self.api_base_url.starts_with("https://")) {
            return Err(ClientError::ConfigError(format!(
                "api_base_url must be an http(s) URL, got '{}'",
                self.api_base_url
            )));
        }
        if self.storage_namespace.trim().is_empty() {
            return Err(ClientError::ConfigError("storage_namespace must not be empty".to_string()));
        }
        Ok(())
    }
}
