//! Flat device catalogs exposed to the assistant

use serde::{Deserialize, Serialize};

/// Device family handled by the bridge, keyed by generic-type prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeviceFamily {
    Light,
    Flap,
}

impl DeviceFamily {
    /// Generic-type prefix shared by the family's commands
    pub fn prefix(&self) -> &'static str {
        match self {
            DeviceFamily::Light => "LIGHT",
            DeviceFamily::Flap => "FLAP",
        }
    }

    /// Tag of the state-reporting command
    pub fn state_tag(&self) -> &'static str {
        match self {
            DeviceFamily::Light => "LIGHT_STATE",
            DeviceFamily::Flap => "FLAP_STATE",
        }
    }

    /// Tag of the action command for `verb`, e.g. `on` -> `LIGHT_ON`
    pub fn command_tag(&self, verb: &str) -> String {
        format!("{}_{}", self.prefix(), verb.trim().to_uppercase())
    }
}

/// Location row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub id: String,
    pub name: String,
    #[serde(rename = "parentLocationId")]
    pub parent_location_id: Option<String>,
}

/// Binary light state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LightState {
    On,
    Off,
}

/// Light row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Light {
    pub id: String,
    pub name: String,
    pub state: LightState,
    #[serde(rename = "locationId")]
    pub location_id: String,
}

/// Shutter row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shutter {
    pub id: String,
    pub name: String,
    pub state: String,
    #[serde(rename = "locationId")]
    pub location_id: String,
}

/// The three collections rebuilt every cycle
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalogs {
    pub locations: Vec<Location>,
    pub lights: Vec<Light>,
    pub shutters: Vec<Shutter>,
}

impl Catalogs {
    /// No light and no shutter to talk about
    pub fn has_no_devices(&self) -> bool {
        self.lights.is_empty() && self.shutters.is_empty()
    }
}
