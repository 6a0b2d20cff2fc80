//! Projection of the remote object graph into catalogs and the device index
//!
//! Runs once per cycle over the full `jeeObject::full` result. Only
//! equipment of type `virtual` is considered; all output is built fresh.

use crate::client::models::{PluginInfo, RemoteEquipment, RemoteObject};
use crate::services::catalog::{Catalogs, DeviceFamily, Light, LightState, Location, Shutter};
use crate::services::device_index::DeviceIndex;
use serde_json::Value;
use tracing::{debug, warn};

/// Result of projecting one object graph
#[derive(Debug, Clone, Default)]
pub struct Projection {
    pub catalogs: Catalogs,
    pub index: DeviceIndex,
    /// Whether the market `virtual` plugin is installed
    pub plugin_present: bool,
}

/// Whether the plugin list contains `{id: "virtual", source: "market"}`
pub fn virtual_plugin_present(plugins: &[PluginInfo]) -> bool {
    plugins
        .iter()
        .any(|p| p.id == RemoteEquipment::VIRTUAL && p.source.as_deref() == Some("market"))
}

/// Truthiness of a remote state value.
///
/// `null`, `false`, `0`, `""` and numeric strings equal to zero are false.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => {
            let s = s.trim();
            !s.is_empty() && s.parse::<f64>().map_or(true, |f| f != 0.0)
        }
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn light_state(value: &Value) -> LightState {
    if is_truthy(value) {
        LightState::On
    } else {
        LightState::Off
    }
}

fn shutter_state(value: &Value) -> String {
    if !is_truthy(value) {
        return "unknown".to_string();
    }
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Build catalogs and index from the object graph
pub fn project(objects: &[RemoteObject], plugins: &[PluginInfo]) -> Projection {
    let plugin_present = virtual_plugin_present(plugins);
    if !plugin_present {
        warn!("the 'virtual' plugin from the market is not installed; no device can be exposed");
    }

    let mut catalogs = Catalogs::default();
    let mut index = DeviceIndex::new();

    for object in objects {
        catalogs.locations.push(Location {
            id: object.id.to_string(),
            name: object.name.clone(),
            parent_location_id: object.parent_id.map(|id| id.to_string()),
        });

        if object.equipment.is_empty() {
            continue;
        }

        for equipment in object.equipment.iter().filter(|eq| eq.is_virtual()) {
            index.register(equipment.id, equipment.commands.clone());

            let location_id = equipment.location_id.unwrap_or(object.id).to_string();

            let light_cmd = equipment
                .commands
                .iter()
                .find(|cmd| cmd.generic_type == DeviceFamily::Light.state_tag());
            if let Some(cmd) = light_cmd {
                catalogs.lights.push(Light {
                    id: equipment.id.to_string(),
                    name: equipment.name.clone(),
                    state: light_state(&cmd.state),
                    location_id: location_id.clone(),
                });
            }

            let flap_cmd = equipment
                .commands
                .iter()
                .find(|cmd| cmd.generic_type == DeviceFamily::Flap.state_tag());
            if let Some(cmd) = flap_cmd {
                catalogs.shutters.push(Shutter {
                    id: equipment.id.to_string(),
                    name: equipment.name.clone(),
                    state: shutter_state(&cmd.state),
                    location_id,
                });
            }
        }
    }

    debug!(
        locations = catalogs.locations.len(),
        lights = catalogs.lights.len(),
        shutters = catalogs.shutters.len(),
        indexed = index.len(),
        "projected object graph"
    );

    Projection {
        catalogs,
        index,
        plugin_present,
    }
}
