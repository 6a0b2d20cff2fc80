//! Immutable per-cycle snapshot and its atomic handover
//!
//! Readers clone the current `Arc<Snapshot>` and release the lock at once;
//! the sync cycle swaps in a whole new snapshot, so no reader ever sees a
//! half-built one.

use crate::services::catalog::Catalogs;
use crate::services::device_index::DeviceIndex;
use crate::tools::instructions;
use crate::tools::models::ToolSchema;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Everything one successful cycle produced
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// Remote software version, when the server reported one
    pub version: Option<String>,
    pub catalogs: Catalogs,
    pub index: DeviceIndex,
    pub instructions: String,
    pub tools: Vec<ToolSchema>,
    /// Whether the market `virtual` plugin was found
    pub plugin_present: bool,
    /// Completion time of the producing cycle, `None` before the first one
    pub refreshed_at: Option<DateTime<Utc>>,
    /// Sequence number of the producing cycle, 0 before the first one
    pub cycle: u64,
}

impl Snapshot {
    /// Snapshot served before the first cycle completes
    pub fn empty() -> Self {
        let catalogs = Catalogs::default();
        Self {
            version: None,
            instructions: instructions::compose(&catalogs),
            tools: instructions::advertised_tools(&catalogs),
            catalogs,
            index: DeviceIndex::new(),
            plugin_present: false,
            refreshed_at: None,
            cycle: 0,
        }
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Self::empty()
    }
}

/// Shared handle to the current snapshot
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    current: Arc<RwLock<Arc<Snapshot>>>,
}

impl Default for SnapshotStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(Snapshot::empty()))),
        }
    }

    /// Most recently completed snapshot
    pub async fn current(&self) -> Arc<Snapshot> {
        self.current.read().await.clone()
    }

    /// Swap in a new snapshot, returning the one it replaces
    pub async fn replace(&self, snapshot: Snapshot) -> Arc<Snapshot> {
        let next = Arc::new(snapshot);
        let mut guard = self.current.write().await;
        std::mem::replace(&mut *guard, next)
    }
}
