//! Shared HTTP plumbing for network-backed adapters
//!
//! One pooled [`reqwest::Client`] is shared across all adapters; each
//! [`HttpTransport`] carries its own endpoint and per-call timeout.

use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use super::error::Unavailable;

/// Endpoint plus timeout bound to a shared client
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    url: String,
    timeout: Duration,
}

impl HttpTransport {
    pub fn new(client: Client, url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client,
            url: url.into(),
            timeout,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// POSTs an `application/x-www-form-urlencoded` body
    pub async fn post_form(&self, form: &[(&str, &str)]) -> Result<Response, Unavailable> {
        self.send(self.client.post(&self.url).form(form)).await
    }

    /// POSTs a JSON body
    pub async fn post_json<T: Serialize + ?Sized>(&self, body: &T) -> Result<Response, Unavailable> {
        self.send(self.client.post(&self.url).json(body)).await
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, Unavailable> {
        let start = Instant::now();

        let response = request
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    warn!(url = %self.url, timeout_ms = self.timeout.as_millis(), "Backend request timed out");
                    Unavailable::Timeout(self.timeout)
                } else if e.is_connect() {
                    warn!(url = %self.url, "Cannot connect to backend");
                    Unavailable::Network(format!("connection failed: {}", e))
                } else {
                    warn!(url = %self.url, error = %e, "Backend request failed");
                    Unavailable::Network(format!("request failed: {}", e))
                }
            })?;

        let status = response.status();
        debug!(
            url = %self.url,
            status = status.as_u16(),
            elapsed_ms = start.elapsed().as_millis(),
            "Backend responded"
        );

        if !status.is_success() {
            return Err(Unavailable::Status {
                status: status.as_u16(),
            });
        }

        Ok(response)
    }
}

/// Decodes a JSON body into `T`
pub async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, Unavailable> {
    let body = read_text(response).await?;
    serde_json::from_str(&body).map_err(|e| Unavailable::Malformed(format!("JSON parse error: {}", e)))
}

/// Reads the whole body as text
pub async fn read_text(response: Response) -> Result<String, Unavailable> {
    response.text().await.map_err(|e| {
        if e.is_timeout() {
            Unavailable::Network("timed out reading response body".to_string())
        } else {
            Unavailable::Network(format!("failed to read response body: {}", e))
        }
    })
}
