//! HTTP client with bounded timeouts

use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// HTTP client errors
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Timeout after {0}s")]
    Timeout(u64),

    #[error("Connection refused")]
    ConnectionRefused,
}

/// HTTP response wrapper
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// Status code
    pub status: u16,
    /// Response body
    pub body: String,
}

impl HttpResponse {
    /// Check if response is successful (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// GET-only client; every request is bounded by the configured timeout.
pub struct HttpClient {
    client: Client,
    timeout_seconds: u64,
}

impl HttpClient {
    /// Create a new HTTP client with the given timeout and user agent
    pub fn new(timeout_seconds: u64, user_agent: &str) -> Self {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(timeout_seconds))
            .connect_timeout(Duration::from_secs(timeout_seconds))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            timeout_seconds,
        }
    }

    /// Perform a GET request
    pub async fn get(&self, url: &str) -> Result<HttpResponse, ClientError> {
        debug!("GET {}", url);

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                ClientError::Timeout(self.timeout_seconds)
            } else if e.is_connect() {
                ClientError::ConnectionRefused
            } else {
                ClientError::Request(e)
            }
        })?;

        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();

        Ok(HttpResponse { status, body })
    }
}
