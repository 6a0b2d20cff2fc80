//! Assistant-facing surface of the bridge
//!
//! [`JeedomBridge`] is what the hosting assistant framework talks to: it
//! serves the software version, the instructions and the advertised action
//! schemas from the current snapshot, and routes the two callable actions
//! to the dispatcher.

pub mod scheduler;

use crate::client::{JeedomClient, JeedomHttpClient};
use crate::config::ServerConfig;
use crate::error::Result;
use crate::services::snapshot::{Snapshot, SnapshotStore};
use crate::services::sync::SyncService;
use crate::tools::dispatch::ActionDispatcher;
use crate::tools::models::{
    LightAction, ShutterAction, ToolSchema, UpdateLightsRequest, UpdateShuttersRequest,
};
use crate::tools::{lighting, shutters};
use scheduler::RefreshScheduler;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Bridge between the assistant and one Jeedom server
pub struct JeedomBridge {
    store: SnapshotStore,
    sync: Arc<SyncService>,
    dispatcher: ActionDispatcher,
    refresh_interval: Duration,
}

impl JeedomBridge {
    /// Create a bridge over an existing client
    pub fn new(client: Arc<dyn JeedomClient>, refresh_interval: Duration) -> Self {
        let store = SnapshotStore::new();
        Self {
            sync: Arc::new(SyncService::new(client.clone(), store.clone())),
            dispatcher: ActionDispatcher::new(client, store.clone()),
            store,
            refresh_interval,
        }
    }

    /// Create a bridge talking HTTP to the configured server
    pub fn from_config(config: &ServerConfig) -> Result<Self> {
        config.validate()?;
        let client = JeedomHttpClient::new(&config.jeedom)?;
        info!(endpoint = %client.endpoint(), "Jeedom client ready");
        Ok(Self::new(Arc::new(client), config.sync.refresh_interval))
    }

    /// Scheduler driving this bridge's refresh cycles
    pub fn scheduler(&self) -> RefreshScheduler {
        RefreshScheduler::new(self.sync.clone(), self.refresh_interval)
    }

    /// Run one cycle now
    pub async fn refresh(&self) -> Result<Arc<Snapshot>> {
        self.sync.run_cycle().await
    }

    pub async fn snapshot(&self) -> Arc<Snapshot> {
        self.store.current().await
    }

    /// Remote software version
    pub async fn version(&self) -> Option<String> {
        self.store.current().await.version.clone()
    }

    /// Instructions text for the assistant
    pub async fn instructions(&self) -> String {
        self.store.current().await.instructions.clone()
    }

    /// Action schemas to advertise
    pub async fn tools(&self) -> Vec<ToolSchema> {
        self.store.current().await.tools.clone()
    }

    pub async fn update_lights(&self, action: LightAction, ids: &[String]) -> String {
        lighting::update_lights(&self.dispatcher, action, ids).await
    }

    pub async fn update_shutters(&self, action: ShutterAction, ids: &[String]) -> String {
        shutters::update_shutters(&self.dispatcher, action, ids).await
    }

    /// Route a tool call by name with JSON arguments
    pub async fn call_tool(&self, name: &str, arguments: Value) -> String {
        match name {
            lighting::TOOL_NAME => match serde_json::from_value::<UpdateLightsRequest>(arguments) {
                Ok(request) => self.update_lights(request.action, &request.ids).await,
                Err(e) => invalid_arguments(name, e),
            },
            shutters::TOOL_NAME => {
                match serde_json::from_value::<UpdateShuttersRequest>(arguments) {
                    Ok(request) => self.update_shutters(request.action, &request.ids).await,
                    Err(e) => invalid_arguments(name, e),
                }
            }
            other => {
                warn!(tool = other, "unknown tool called");
                format!("Error: unknown tool '{other}'")
            }
        }
    }

    pub fn dispatcher(&self) -> &ActionDispatcher {
        &self.dispatcher
    }
}

fn invalid_arguments(tool: &str, err: serde_json::Error) -> String {
    warn!(tool, error = %err, "invalid tool arguments");
    format!("Error: invalid arguments for {tool}: {err}")
}
