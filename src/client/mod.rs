//! Jeedom JSON-RPC client
//!
//! The bridge sees the remote server through a single call abstraction:
//! a method name plus parameters in, a parsed JSON result out. Callers in
//! the sync cycle go through [`call_or_default`] so a failing call
//! degrades to an empty value instead of aborting the cycle.

pub mod http_client;
pub mod models;

use crate::error::Result;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

pub use http_client::JeedomHttpClient;
pub use models::{PluginInfo, RemoteCommand, RemoteEquipment, RemoteObject};

/// JSON-RPC method names used by the bridge
pub mod methods {
    pub const LIST_PLUGINS: &str = "plugin::listPlugin";
    pub const VERSION: &str = "version";
    pub const OBJECT_FULL: &str = "jeeObject::full";
    pub const EXEC_CMD: &str = "cmd::execCmd";
}

/// Trait for Jeedom client implementations
#[async_trait]
pub trait JeedomClient: Send + Sync {
    /// Issue one remote call and return its `result` member
    async fn call(&self, method: &str, params: Value) -> Result<Value>;
}

/// Issue a call and decode its result, substituting `default` on any failure.
///
/// Transport errors, JSON-RPC error objects and results that do not decode
/// into `T` are all logged here and never reach the caller.
pub async fn call_or_default<T>(
    client: &dyn JeedomClient,
    method: &str,
    params: Value,
    default: T,
) -> T
where
    T: DeserializeOwned,
{
    match client.call(method, params).await {
        Ok(value) => match serde_json::from_value::<T>(value) {
            Ok(decoded) => {
                debug!(method, "remote call succeeded");
                decoded
            }
            Err(e) => {
                warn!(method, error = %e, "unexpected result shape, using default");
                default
            }
        },
        Err(e) => {
            warn!(method, error = %e, "remote call failed, using default");
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockJeedomClient;
    use serde_json::json;

    #[tokio::test]
    async fn call_or_default_decodes_result() {
        let client = MockJeedomClient::new().with_response(methods::VERSION, json!("4.4.8"));
        let version: Option<String> =
            call_or_default(&client, methods::VERSION, json!({}), None).await;
        assert_eq!(version.as_deref(), Some("4.4.8"));
    }

    #[tokio::test]
    async fn call_or_default_masks_failures() {
        let client = MockJeedomClient::new().with_failure(methods::OBJECT_FULL);
        let objects: Vec<Value> =
            call_or_default(&client, methods::OBJECT_FULL, json!({}), Vec::new()).await;
        assert!(objects.is_empty());
    }

    #[tokio::test]
    async fn call_or_default_masks_shape_mismatch() {
        let client =
            MockJeedomClient::new().with_response(methods::LIST_PLUGINS, json!({"not": "a list"}));
        let plugins: Vec<PluginInfo> =
            call_or_default(&client, methods::LIST_PLUGINS, json!({}), Vec::new()).await;
        assert!(plugins.is_empty());
    }
}
