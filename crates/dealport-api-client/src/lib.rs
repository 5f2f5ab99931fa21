//! JSON-RPC client for the provider deal service.
//!
//! Provides a minimal client with optional Bearer auth, a generic `call` helper
//! speaking JSON-RPC 2.0 over HTTP POST, and the [`DealApi`] implementation
//! used by the import workflow (see `api`).
//!
//! [`DealApi`]: dealport_core::DealApi

pub mod api;

use anyhow::{Context, Result};
use dealport_core::{ApiConfig, DealApiError, DealApiResult};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Namespace prefix of every deal service method.
pub const METHOD_NAMESPACE: &str = "Filecoin";

#[derive(Debug, Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: String,
    params: &'a serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: serde_json::Value,
    #[serde(default)]
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    message: String,
}

impl From<RpcErrorObject> for DealApiError {
    fn from(err: RpcErrorObject) -> Self {
        // The service reports missing deals only through the message text.
        if err.message.contains("not found") {
            DealApiError::NotFound(err.message)
        } else {
            DealApiError::Rpc {
                code: err.code,
                message: err.message,
            }
        }
    }
}

/// HTTP client for the deal service API.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    api_url: String,
    token: Option<String>,
    next_id: Arc<AtomicU64>,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        config.validate()?;

        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            token: config.api_token.clone(),
            next_id: Arc::new(AtomicU64::new(1)),
        })
    }

    /// Create client from environment: DEALPORT_API_URL (or BOOST_API_URL),
    /// DEALPORT_API_TOKEN (or BOOST_API_TOKEN).
    pub fn from_env() -> Result<Self> {
        let config = ApiConfig::from_env().context("Failed to load deal API configuration")?;
        Self::new(&config)
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn apply_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.header("Authorization", format!("Bearer {}", token)),
            None => request,
        }
    }

    /// Call `method` (without namespace) with positional `params` and decode the result.
    pub async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> DealApiResult<T> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = RpcRequest {
            jsonrpc: "2.0",
            id,
            method: format!("{}.{}", METHOD_NAMESPACE, method),
            params: &params,
        };

        tracing::debug!(method = %body.method, id, "Calling deal API");

        let request = self.apply_auth(self.client.post(&self.api_url).json(&body));
        let response = request
            .send()
            .await
            .map_err(|e| DealApiError::Transport(format!("Failed to send request: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(DealApiError::Transport(format!(
                "API request failed with status {}: {}",
                status, error_text
            )));
        }

        let rpc: RpcResponse = response.json().await.map_err(|e| {
            DealApiError::InvalidResponse(format!("Failed to parse response as JSON: {}", e))
        })?;

        if let Some(err) = rpc.error {
            return Err(err.into());
        }

        serde_json::from_value(rpc.result).map_err(|e| {
            DealApiError::InvalidResponse(format!("Unexpected result for {}: {}", method, e))
        })
    }
}
