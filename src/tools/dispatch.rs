//! Translation of assistant actions into `cmd::execCmd` requests
//!
//! Each id is resolved through the device index of the current snapshot;
//! every command tagged `{FAMILY}_{VERB}` is executed in a detached task.
//! The caller's answer never waits on those tasks.

use crate::client::{methods, models::RemoteId, JeedomClient};
use crate::error::{JeedomError, Result};
use crate::services::catalog::DeviceFamily;
use crate::services::snapshot::SnapshotStore;
use serde_json::json;
use std::sync::Arc;
use tokio_util::task::TaskTracker;
use tracing::{debug, info, warn};

/// Answer returned when the full id list was processed
pub const DONE: &str = "Done.";

/// Resolves ids and verbs to remote command executions
#[derive(Clone)]
pub struct ActionDispatcher {
    client: Arc<dyn JeedomClient>,
    store: SnapshotStore,
    tracker: TaskTracker,
}

impl ActionDispatcher {
    pub fn new(client: Arc<dyn JeedomClient>, store: SnapshotStore) -> Self {
        Self {
            client,
            store,
            tracker: TaskTracker::new(),
        }
    }

    /// Perform `verb` on every equipment in `ids`.
    ///
    /// Returns `"Done."` whether or not any command matched, and
    /// `"Error: <message>"` when an id cannot be resolved at all.
    pub async fn perform_action(&self, family: DeviceFamily, verb: &str, ids: &[String]) -> String {
        match self.dispatch(family, verb, ids).await {
            Ok(issued) => {
                info!(family = ?family, verb, ids = ids.len(), issued, "action dispatched");
                DONE.to_string()
            }
            Err(e) => {
                warn!(family = ?family, verb, error = %e, "action rejected");
                format!("Error: {e}")
            }
        }
    }

    async fn dispatch(&self, family: DeviceFamily, verb: &str, ids: &[String]) -> Result<usize> {
        let equipment_ids = ids
            .iter()
            .map(|id| parse_equipment_id(id))
            .collect::<Result<Vec<_>>>()?;

        let snapshot = self.store.current().await;
        let tag = family.command_tag(verb);
        let mut issued = 0;

        for equipment_id in equipment_ids {
            for command in snapshot.index.commands_tagged(equipment_id, &tag) {
                self.spawn_exec(equipment_id, command.id);
                issued += 1;
            }
        }

        Ok(issued)
    }

    fn spawn_exec(&self, equipment_id: RemoteId, command_id: RemoteId) {
        let client = self.client.clone();
        self.tracker.spawn(async move {
            match client
                .call(methods::EXEC_CMD, json!({ "id": command_id }))
                .await
            {
                Ok(_) => debug!(equipment_id, command_id, "command executed"),
                Err(e) => warn!(equipment_id, command_id, error = %e, "command execution failed"),
            }
        });
    }

    /// Number of execution requests still in flight
    pub fn pending(&self) -> usize {
        self.tracker.len()
    }

    /// Wait for every execution request issued so far
    pub async fn drain(&self) {
        self.tracker.close();
        self.tracker.wait().await;
        self.tracker.reopen();
    }
}

/// Parse an assistant-supplied equipment id
pub fn parse_equipment_id(raw: &str) -> Result<RemoteId> {
    raw.trim()
        .parse()
        .map_err(|_| JeedomError::invalid_input(format!("invalid equipment id {raw:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::models::RemoteCommand;
    use crate::mock::MockJeedomClient;
    use crate::services::device_index::DeviceIndex;
    use crate::services::snapshot::Snapshot;
    use serde_json::Value;

    fn cmd(id: RemoteId, tag: &str) -> RemoteCommand {
        RemoteCommand {
            id,
            generic_type: tag.to_string(),
            state: Value::Null,
        }
    }

    async fn dispatcher_with(index: DeviceIndex) -> (ActionDispatcher, MockJeedomClient) {
        let client = MockJeedomClient::new();
        let store = SnapshotStore::new();
        store
            .replace(Snapshot {
                index,
                ..Snapshot::empty()
            })
            .await;
        (ActionDispatcher::new(Arc::new(client.clone()), store), client)
    }

    #[tokio::test]
    async fn on_executes_matching_command_only() {
        let mut index = DeviceIndex::new();
        index.register(4, vec![cmd(101, "LIGHT_ON"), cmd(102, "LIGHT_STATE")]);
        let (dispatcher, client) = dispatcher_with(index).await;

        let answer = dispatcher
            .perform_action(DeviceFamily::Light, "on", &["4".to_string()])
            .await;
        dispatcher.drain().await;

        assert_eq!(answer, DONE);
        assert_eq!(client.executed_commands().await, vec![101]);
    }

    #[tokio::test]
    async fn unknown_id_is_a_silent_no_op() {
        let (dispatcher, client) = dispatcher_with(DeviceIndex::new()).await;

        let answer = dispatcher
            .perform_action(DeviceFamily::Flap, "open", &["999".to_string()])
            .await;
        dispatcher.drain().await;

        assert_eq!(answer, DONE);
        assert!(client.calls().await.is_empty());
    }

    #[tokio::test]
    async fn malformed_id_reports_error() {
        let mut index = DeviceIndex::new();
        index.register(4, vec![cmd(101, "LIGHT_ON")]);
        let (dispatcher, client) = dispatcher_with(index).await;

        let answer = dispatcher
            .perform_action(
                DeviceFamily::Light,
                "on",
                &["4".to_string(), "lamp".to_string()],
            )
            .await;
        dispatcher.drain().await;

        assert!(answer.starts_with("Error: "), "{answer}");
        assert!(answer.contains("lamp"));
        assert!(client.calls().await.is_empty());
    }

    #[tokio::test]
    async fn remote_failure_does_not_stop_other_ids() {
        let mut index = DeviceIndex::new();
        index.register(8, vec![cmd(801, "FLAP_CLOSE")]);
        index.register(9, vec![cmd(901, "FLAP_CLOSE"), cmd(902, "FLAP_CLOSE")]);
        let client = MockJeedomClient::new().with_failure(methods::EXEC_CMD);
        let store = SnapshotStore::new();
        store
            .replace(Snapshot {
                index,
                ..Snapshot::empty()
            })
            .await;
        let dispatcher = ActionDispatcher::new(Arc::new(client.clone()), store);

        let answer = dispatcher
            .perform_action(DeviceFamily::Flap, "close", &["8".into(), "9".into()])
            .await;
        dispatcher.drain().await;

        assert_eq!(answer, DONE);
        let mut executed = client.executed_commands().await;
        executed.sort_unstable();
        assert_eq!(executed, vec![801, 901, 902]);
        assert_eq!(dispatcher.pending(), 0);
    }

    #[test]
    fn equipment_ids_are_trimmed() {
        assert_eq!(parse_equipment_id(" 42 ").unwrap(), 42);
        assert!(parse_equipment_id("").is_err());
        assert!(parse_equipment_id("-1").is_err());
    }
}
