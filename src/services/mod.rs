//! Synchronization services for the Jeedom bridge
//!
//! This module holds the per-cycle pipeline: projection of the remote
//! object graph, the device index, and the snapshot handed to readers.

pub mod catalog;
pub mod device_index;
pub mod projector;
pub mod snapshot;
pub mod sync;

pub use catalog::{Catalogs, DeviceFamily, Light, LightState, Location, Shutter};
pub use device_index::DeviceIndex;
pub use projector::{project, Projection};
pub use snapshot::{Snapshot, SnapshotStore};
pub use sync::SyncService;
