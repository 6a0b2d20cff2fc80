//! Mock implementations for testing
//!
//! [`MockJeedomClient`] answers calls from canned responses and records
//! every call it receives, so tests can assert on what the bridge sent.

use crate::client::{methods, JeedomClient};
use crate::error::{JeedomError, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;

/// One recorded remote call
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub method: String,
    pub params: Value,
}

/// Mock Jeedom client for testing
#[derive(Clone, Default)]
pub struct MockJeedomClient {
    responses: Arc<RwLock<HashMap<String, Value>>>,
    failures: Arc<RwLock<HashSet<String>>>,
    calls: Arc<RwLock<Vec<RecordedCall>>>,
}

impl MockJeedomClient {
    /// Create new mock client
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `method` with `result`
    pub fn with_response(self, method: &str, result: Value) -> Self {
        if let Ok(mut responses) = self.responses.try_write() {
            responses.insert(method.to_string(), result);
        }
        self
    }

    /// Fail every call to `method`
    pub fn with_failure(self, method: &str) -> Self {
        if let Ok(mut failures) = self.failures.try_write() {
            failures.insert(method.to_string());
        }
        self
    }

    /// Replace the canned response for `method` while in use
    pub async fn set_response(&self, method: &str, result: Value) {
        self.failures.write().await.remove(method);
        self.responses
            .write()
            .await
            .insert(method.to_string(), result);
    }

    /// Start failing `method` while in use
    pub async fn set_failure(&self, method: &str) {
        self.failures.write().await.insert(method.to_string());
    }

    /// All calls received so far
    pub async fn calls(&self) -> Vec<RecordedCall> {
        self.calls.read().await.clone()
    }

    /// Command ids passed to `cmd::execCmd`, in call order
    pub async fn executed_commands(&self) -> Vec<u64> {
        self.calls
            .read()
            .await
            .iter()
            .filter(|call| call.method == methods::EXEC_CMD)
            .filter_map(|call| call.params.get("id").and_then(Value::as_u64))
            .collect()
    }

    /// Forget recorded calls
    pub async fn clear_calls(&self) {
        self.calls.write().await.clear();
    }
}

#[async_trait]
impl JeedomClient for MockJeedomClient {
    async fn call(&self, method: &str, params: Value) -> Result<Value> {
        self.calls.write().await.push(RecordedCall {
            method: method.to_string(),
            params,
        });

        if self.failures.read().await.contains(method) {
            return Err(JeedomError::connection(format!("mock failure for {method}")));
        }

        Ok(self
            .responses
            .read()
            .await
            .get(method)
            .cloned()
            .unwrap_or(Value::Null))
    }
}
