//! HTTP client implementation for the Jeedom JSON-RPC API
//!
//! Every call is a POST of a JSON-RPC 2.0 envelope to
//! `{base_url}/core/api/jeeApi.php`, with the configured API key merged
//! into the parameters.

use crate::client::JeedomClient;
use crate::config::{credentials::ApiKey, JeedomConfig};
use crate::error::{JeedomError, Result};
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};
use url::Url;

const API_PATH: &str = "core/api/jeeApi.php";

#[derive(Debug, Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    method: &'a str,
    params: Map<String, Value>,
    id: u32,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    /// `None` only when the member is missing; `"result": null` is `Some(Null)`
    #[serde(default, deserialize_with = "present")]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcErrorBody>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorBody {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    message: String,
}

fn present<'de, D>(deserializer: D) -> std::result::Result<Option<Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// HTTP client for a Jeedom server
pub struct JeedomHttpClient {
    /// HTTP client instance
    client: Client,

    /// Resolved JSON-RPC endpoint
    endpoint: Url,

    /// Static credential merged into every call
    api_key: ApiKey,
}

impl JeedomHttpClient {
    /// Create a new HTTP client
    pub fn new(config: &JeedomConfig) -> Result<Self> {
        let mut client_builder = ClientBuilder::new()
            .timeout(config.timeout)
            .user_agent(format!("jeedom-mcp-rust/{}", env!("CARGO_PKG_VERSION")));

        if !config.verify_ssl {
            warn!("SSL verification disabled - this is insecure for production use");
            client_builder = client_builder.danger_accept_invalid_certs(true);
        }

        let client = client_builder
            .build()
            .map_err(|e| JeedomError::connection(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: Self::endpoint_for(&config.url)?,
            api_key: config.api_key.clone(),
        })
    }

    /// Resolve the API endpoint below the base URL, keeping any sub-path
    /// the installation is served from.
    fn endpoint_for(base_url: &Url) -> Result<Url> {
        let mut base = base_url.clone();
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(base.join(API_PATH)?)
    }

    /// Endpoint this client posts to
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn build_params(&self, params: Value) -> Map<String, Value> {
        let mut merged = match params {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            other => {
                warn!("ignoring non-object RPC params: {other}");
                Map::new()
            }
        };
        merged.insert(
            "apikey".to_string(),
            Value::String(self.api_key.expose().to_string()),
        );
        merged
    }
}

#[async_trait]
impl JeedomClient for JeedomHttpClient {
    async fn call(&self, method: &str, params: Value) -> Result<Value> {
        let request = RpcRequest {
            jsonrpc: "2.0",
            method,
            params: self.build_params(params),
            id: 1,
        };

        debug!(method, endpoint = %self.endpoint, "sending JSON-RPC request");

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    JeedomError::timeout(format!("{method}: {e}"))
                } else if e.is_connect() {
                    JeedomError::connection(format!("{method}: {e}"))
                } else {
                    JeedomError::Http(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = format!("HTTP error {status}: {body}");
            return Err(match status.as_u16() {
                401 | 403 => JeedomError::authentication(message),
                _ => JeedomError::connection(message),
            });
        }

        let text = response.text().await?;
        let envelope: RpcResponse = serde_json::from_str(&text).map_err(|e| {
            JeedomError::parsing_error(format!("{method}: invalid JSON-RPC response: {e}"))
        })?;

        if let Some(error) = envelope.error {
            return Err(JeedomError::rpc(method, error.code, error.message));
        }

        envelope.result.ok_or_else(|| {
            JeedomError::parsing_error(format!(
                "{method}: JSON-RPC response has neither result nor error"
            ))
        })
    }
}
