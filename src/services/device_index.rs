//! Equipment id -> command list lookup used by the action dispatcher

use crate::client::models::{RemoteCommand, RemoteId};
use std::collections::HashMap;

/// Commands of every eligible equipment seen in one cycle
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeviceIndex {
    equipment: HashMap<RemoteId, Vec<RemoteCommand>>,
}

impl DeviceIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an equipment's full command list, replacing any prior entry
    pub fn register(&mut self, equipment_id: RemoteId, commands: Vec<RemoteCommand>) {
        self.equipment.insert(equipment_id, commands);
    }

    /// Commands of an equipment; empty when the id is unknown
    pub fn commands(&self, equipment_id: RemoteId) -> &[RemoteCommand] {
        self.equipment
            .get(&equipment_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Commands of an equipment whose generic type is exactly `tag`
    pub fn commands_tagged<'a>(
        &'a self,
        equipment_id: RemoteId,
        tag: &'a str,
    ) -> impl Iterator<Item = &'a RemoteCommand> + 'a {
        self.commands(equipment_id)
            .iter()
            .filter(move |cmd| cmd.generic_type == tag)
    }

    pub fn contains(&self, equipment_id: RemoteId) -> bool {
        self.equipment.contains_key(&equipment_id)
    }

    pub fn len(&self) -> usize {
        self.equipment.len()
    }

    pub fn is_empty(&self) -> bool {
        self.equipment.is_empty()
    }
}
