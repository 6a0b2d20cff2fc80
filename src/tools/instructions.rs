//! Assistant briefing built from the current catalogs

use crate::services::catalog::Catalogs;
use crate::tools::models::ToolSchema;
use crate::tools::{lighting, shutters};
use serde_json::json;

/// Guidance that opens every briefing
pub const BASELINE_INSTRUCTIONS: &str = "\
You are a home automation assistant connected to a Jeedom server. \
You can read the state of the user's lights and shutters and act on them with the tools you are given. \
Only refer to devices and rooms listed in the data below, and always use their ids when calling a tool. \
When you aggregate numeric values (averages, sums, percentages), round the result to one decimal place.";

/// Guidance appended when neither catalog has a device
pub const NO_DEVICES_INSTRUCTIONS: &str = "\
No lights or shutters are available yet. \
Tell the user to create virtual equipment with the Jeedom Virtual plugin, \
give its commands the LIGHT_* or FLAP_* generic types, and assign it to a room.";

fn data_block(catalogs: &Catalogs) -> serde_json::Value {
    json!({
        "schemas": {
            "location": {
                "description": "A room or area of the home. Locations nest through parentLocationId.",
                "fields": {
                    "id": "Location id",
                    "name": "Human readable name",
                    "parentLocationId": "Id of the enclosing location, null for a top-level one"
                }
            },
            "light": {
                "description": "A light the user can switch on or off.",
                "fields": {
                    "id": "Light id, to pass to update_lights",
                    "name": "Human readable name",
                    "state": "\"on\" or \"off\"",
                    "locationId": "Id of the location the light is in"
                }
            },
            "shutter": {
                "description": "A shutter the user can open, close or stop.",
                "fields": {
                    "id": "Shutter id, to pass to update_shutters",
                    "name": "Human readable name",
                    "state": "Last reported state, \"unknown\" when the server has none",
                    "locationId": "Id of the location the shutter is in"
                }
            }
        },
        "locations": catalogs.locations,
        "lights": catalogs.lights,
        "shutters": catalogs.shutters,
    })
}

/// Compose the instructions text for the given catalogs
pub fn compose(catalogs: &Catalogs) -> String {
    let mut text = String::from(BASELINE_INSTRUCTIONS);
    text.push_str("\n\n");

    if catalogs.has_no_devices() {
        text.push_str(NO_DEVICES_INSTRUCTIONS);
        return text;
    }

    let block = serde_json::to_string_pretty(&data_block(catalogs)).unwrap_or_default();
    text.push_str("Current home topology and device states:\n\n```json\n");
    text.push_str(&block);
    text.push_str("\n```");
    text
}

/// Action schemas to advertise; an empty catalog never advertises its action
pub fn advertised_tools(catalogs: &Catalogs) -> Vec<ToolSchema> {
    let mut tools = Vec::new();
    if !catalogs.lights.is_empty() {
        tools.push(lighting::tool_schema());
    }
    if !catalogs.shutters.is_empty() {
        tools.push(shutters::tool_schema());
    }
    tools
}

/// Extract the fenced data block from composed instructions
pub fn extract_data_block(instructions: &str) -> Option<serde_json::Value> {
    let start = instructions.find("```json\n")? + "```json\n".len();
    let end = start + instructions[start..].find("\n```")?;
    serde_json::from_str(&instructions[start..end]).ok()
}
