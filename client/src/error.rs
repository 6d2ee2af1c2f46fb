use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    // Non-2xx response. The status is kept numeric so callers can branch on it.
    #[error("HTTP error! status: {status}")]
    HttpStatus { method: &'static str, status: u16 },

    #[error("HTTP transport error: {source}")]
    TransportError {
        #[from]
        source: reqwest::Error,
    },

    #[error("JSON error: {source}")]
    JsonError {
        #[from]
        source: serde_json::Error,
    },

    #[error("I/O error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Clipboard error: {0}")]
    ClipboardError(#[source] anyhow::Error),

    #[error("Alert presentation error: {0}")]
    AlertError(#[source] anyhow::Error),
}

impl ClientError {
    /// Numeric status of a failed HTTP response, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
