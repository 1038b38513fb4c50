//! Shared reqwest client construction

use std::time::Duration;

use likemint_common::UpstreamConfig;
use likemint_core::DomainError;
use serde::Deserialize;

/// Timeouts applied to every outbound client
#[derive(Debug, Clone, Copy)]
pub struct HttpClientConfig {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(5),
            request_timeout: Duration::from_secs(15),
        }
    }
}

impl From<&UpstreamConfig> for HttpClientConfig {
    fn from(config: &UpstreamConfig) -> Self {
        Self {
            request_timeout: config.request_timeout(),
            ..Self::default()
        }
    }
}

/// Build a client with connect and request timeouts
pub fn build_client(config: HttpClientConfig) -> Result<reqwest::Client, DomainError> {
    reqwest::Client::builder()
        .connect_timeout(config.connect_timeout)
        .timeout(config.request_timeout)
        .user_agent(concat!("likemint/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| DomainError::Internal(format!("failed building HTTP client: {e}")))
}

/// Join a base URL and a path without doubling slashes
pub(crate) fn join(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
    message: Option<String>,
}

/// Best-effort human message out of an error response
pub(crate) async fn error_message(response: reqwest::Response) -> String {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    serde_json::from_str::<ErrorBody>(&text)
        .ok()
        .and_then(|b| b.error.or(b.message))
        .unwrap_or_else(|| {
            if text.is_empty() {
                status.to_string()
            } else {
                format!("{status}: {text}")
            }
        })
}
