//! JSON-over-HTTP helpers
//!
//! Thin wrappers around `reqwest` with one uniform policy: every request
//! carries `Content-Type: application/json`, POST/PUT bodies are serialized
//! to JSON, a non-2xx status becomes [`ClientError::HttpStatus`], and a 2xx
//! body is parsed as JSON. Failures are logged and handed back to the
//! caller. There is no retry and no request timeout.
//!
//! Cookies set by the backend (the login session) are kept and sent back
//! on later requests, as a browser does for same-origin calls.

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ClientSettings;
use crate::error::{ClientError, Result};

#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
}

impl HttpClient {
    /// Creates a client whose relative URLs resolve against `base_url`.
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder().use_rustls_tls().cookie_store(true).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_settings(settings: &ClientSettings) -> Result<Self> {
        Self::new(settings.api_base_url.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URLs pass through; anything else is joined to the base URL.
    pub fn resolve_url(&self, url: &str) -> String {
        if url.starts_with("http://") || url.starts_with("https://") {
            url.to_string()
        } else if url.starts_with('/') {
            format!("{}{}", self.base_url, url)
        } else {
            format!("{}/{}", self.base_url, url)
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        self.send(Method::GET, "GET", url, None::<&()>).await
    }

    pub async fn post<B, T>(&self, url: &str, data: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(Method::POST, "POST", url, Some(data)).await
    }

    pub async fn put<B, T>(&self, url: &str, data: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(Method::PUT, "PUT", url, Some(data)).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        self.send(Method::DELETE, "DELETE", url, None::<&()>).await
    }

    async fn send<B, T>(&self, method: Method, method_name: &'static str, url: &str, body: Option<&B>) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let full_url = self.resolve_url(url);
        tracing::debug!(method = method_name, url = %full_url, "Sending request");

        let result = self.execute(method, method_name, &full_url, body).await;
        if let Err(e) = &result {
            tracing::error!(method = method_name, url = %full_url, error = %e, "HTTP request failed");
        }
        result
    }

    async fn execute<B, T>(&self, method: Method, method_name: &'static str, url: &str, body: Option<&B>) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let mut request = self
            .client
            .request(method, url)
            .header(CONTENT_TYPE, "application/json");
        if let Some(data) = body {
            request = request.body(serde_json::to_vec(data)?);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::HttpStatus {
                method: method_name,
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}
