//! Fixed-delay refresh loop
//!
//! A cycle runs on boot, then the timer is armed only after the cycle body
//! returns, so no two cycles ever overlap.

use crate::services::sync::SyncService;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Scheduler state, published on a watch channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    /// Waiting for the timer
    Idle,
    /// One cycle in flight
    Running,
}

/// Drives [`SyncService::run_cycle`] until cancelled
pub struct RefreshScheduler {
    sync: Arc<SyncService>,
    delay: Duration,
    state: watch::Sender<SchedulerState>,
}

impl RefreshScheduler {
    pub fn new(sync: Arc<SyncService>, delay: Duration) -> Self {
        let (state, _) = watch::channel(SchedulerState::Idle);
        Self { sync, delay, state }
    }

    /// Observe state transitions
    pub fn subscribe(&self) -> watch::Receiver<SchedulerState> {
        self.state.subscribe()
    }

    /// Run the loop on a background task
    pub fn spawn(self, cancel: CancellationToken) -> JoinHandle<()> {
        tokio::spawn(self.run(cancel))
    }

    pub async fn run(self, cancel: CancellationToken) {
        info!(delay = ?self.delay, "refresh scheduler started");

        while !cancel.is_cancelled() {
            self.state.send_replace(SchedulerState::Running);
            if let Err(e) = self.sync.run_cycle().await {
                warn!(error = %e, "refresh cycle failed, keeping previous snapshot");
            }
            self.state.send_replace(SchedulerState::Idle);

            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                _ = tokio::time::sleep(self.delay) => {}
            }
        }

        info!("refresh scheduler stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::methods;
    use crate::mock::MockJeedomClient;
    use crate::services::snapshot::SnapshotStore;
    use serde_json::json;

    async fn graph_fetches(client: &MockJeedomClient) -> usize {
        client
            .calls()
            .await
            .iter()
            .filter(|c| c.method == methods::OBJECT_FULL)
            .count()
    }

    #[tokio::test(start_paused = true)]
    async fn cycles_run_on_boot_then_every_delay() {
        let client = MockJeedomClient::new().with_response(methods::OBJECT_FULL, json!([]));
        let sync = Arc::new(SyncService::new(
            Arc::new(client.clone()),
            SnapshotStore::new(),
        ));
        let cancel = CancellationToken::new();
        let handle = RefreshScheduler::new(sync, Duration::from_secs(5)).spawn(cancel.clone());

        tokio::time::sleep(Duration::from_secs(11)).await;
        cancel.cancel();
        handle.await.unwrap();

        assert_eq!(graph_fetches(&client).await, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn failing_cycles_keep_rescheduling() {
        let client = MockJeedomClient::new().with_failure(methods::OBJECT_FULL);
        let sync = Arc::new(SyncService::new(
            Arc::new(client.clone()),
            SnapshotStore::new(),
        ));
        let cancel = CancellationToken::new();
        let scheduler = RefreshScheduler::new(sync.clone(), Duration::from_secs(5));
        let state = scheduler.subscribe();
        let handle = scheduler.spawn(cancel.clone());

        tokio::time::sleep(Duration::from_secs(6)).await;
        cancel.cancel();
        handle.await.unwrap();

        assert_eq!(graph_fetches(&client).await, 2);
        assert_eq!(*state.borrow(), SchedulerState::Idle);
        assert_eq!(sync.store().current().await.cycle, 0);
    }
}
