//! One refresh cycle: fetch, project, compose, hand over

use crate::client::{call_or_default, methods, JeedomClient, PluginInfo, RemoteObject};
use crate::error::Result;
use crate::services::projector;
use crate::services::snapshot::{Snapshot, SnapshotStore};
use crate::tools::instructions;
use serde_json::json;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

/// Rebuilds the snapshot from the remote server
pub struct SyncService {
    client: Arc<dyn JeedomClient>,
    store: SnapshotStore,
    cycles: AtomicU64,
}

impl SyncService {
    pub fn new(client: Arc<dyn JeedomClient>, store: SnapshotStore) -> Self {
        Self {
            client,
            store,
            cycles: AtomicU64::new(0),
        }
    }

    pub fn store(&self) -> &SnapshotStore {
        &self.store
    }

    /// Run one full cycle and publish its snapshot.
    ///
    /// The plugin list and version degrade to empty defaults. The object
    /// graph is the one call without a safe default: when it fails, or
    /// its result is not an array, the error is returned and the previous
    /// snapshot stays in place.
    pub async fn run_cycle(&self) -> Result<Arc<Snapshot>> {
        let client = self.client.as_ref();
        debug!("starting refresh cycle");

        let plugins: Vec<PluginInfo> =
            call_or_default(client, methods::LIST_PLUGINS, json!({}), Vec::new()).await;
        let version: Option<String> =
            call_or_default(client, methods::VERSION, json!({}), None).await;
        let graph = client.call(methods::OBJECT_FULL, json!({})).await?;

        let objects = RemoteObject::decode_all(graph)?;
        let projection = projector::project(&objects, &plugins);
        let catalogs = projection.catalogs;

        let cycle = self.cycles.fetch_add(1, Ordering::Relaxed) + 1;
        let snapshot = Snapshot {
            version,
            instructions: instructions::compose(&catalogs),
            tools: instructions::advertised_tools(&catalogs),
            catalogs,
            index: projection.index,
            plugin_present: projection.plugin_present,
            refreshed_at: Some(chrono::Utc::now()),
            cycle,
        };

        info!(
            cycle,
            locations = snapshot.catalogs.locations.len(),
            lights = snapshot.catalogs.lights.len(),
            shutters = snapshot.catalogs.shutters.len(),
            "snapshot refreshed"
        );

        self.store.replace(snapshot).await;
        Ok(self.store.current().await)
    }
}
