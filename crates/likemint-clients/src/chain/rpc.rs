//! JSON-RPC primitives

use std::sync::atomic::{AtomicU64, Ordering};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use likemint_core::DomainError;

#[derive(Serialize)]
struct JsonRpcRequest<P: Serialize> {
    jsonrpc: &'static str,
    id: u64,
    method: &'static str,
    params: P,
}

#[derive(Deserialize)]
struct JsonRpcResponse<T> {
    result: Option<T>,
    error: Option<JsonRpcError>,
}

#[derive(Debug, Deserialize)]
struct JsonRpcError {
    code: i64,
    message: String,
}

/// Minimal JSON-RPC 2.0 client over HTTP POST
pub struct JsonRpcClient {
    http: reqwest::Client,
    url: String,
    next_id: AtomicU64,
}

impl JsonRpcClient {
    pub fn new(http: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            http,
            url: url.into(),
            next_id: AtomicU64::new(1),
        }
    }

    /// Call `method` and deserialize its `result`
    pub async fn call<P, T>(&self, method: &'static str, params: P) -> Result<T, DomainError>
    where
        P: Serialize + Send,
        T: DeserializeOwned + Send,
    {
        let request = JsonRpcRequest {
            jsonrpc: "2.0",
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            method,
            params,
        };

        let response: JsonRpcResponse<T> = self
            .http
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| DomainError::fetch(format!("{method}: {e}")))?
            .error_for_status()
            .map_err(|e| DomainError::fetch(format!("{method}: {e}")))?
            .json()
            .await
            .map_err(|e| DomainError::fetch(format!("{method} response parse error: {e}")))?;

        response.result.ok_or_else(|| {
            let msg = response
                .error
                .map(|e| format!("code={} msg={}", e.code, e.message))
                .unwrap_or_else(|| "no result and no error".into());
            DomainError::fetch(format!("{method} failed: {msg}"))
        })
    }
}

/// `0x`-prefixed minimal hex quantity
pub fn encode_quantity(value: u64) -> String {
    format!("{value:#x}")
}

pub fn decode_quantity(value: &str) -> Result<u64, DomainError> {
    let digits = value
        .strip_prefix("0x")
        .ok_or_else(|| DomainError::fetch(format!("quantity without 0x prefix: {value}")))?;
    u64::from_str_radix(digits, 16)
        .map_err(|e| DomainError::fetch(format!("bad quantity {value}: {e}")))
}

pub fn decode_data(value: &str) -> Result<Vec<u8>, DomainError> {
    hex::decode(value.trim_start_matches("0x"))
        .map_err(|e| DomainError::fetch(format!("bad hex data: {e}")))
}
