//! `update_lights` action

use crate::services::catalog::DeviceFamily;
use crate::tools::dispatch::ActionDispatcher;
use crate::tools::models::{LightAction, ToolSchema, UpdateLightsRequest};

pub const TOOL_NAME: &str = "update_lights";

const DESCRIPTION: &str = "Switch one or more lights on or off. \
Pass the ids from the lights catalog; every listed light receives the same action.";

/// Schema advertised while at least one light exists
pub fn tool_schema() -> ToolSchema {
    ToolSchema::for_input::<UpdateLightsRequest>(TOOL_NAME, DESCRIPTION)
}

/// Switch every light in `ids`
pub async fn update_lights(
    dispatcher: &ActionDispatcher,
    action: LightAction,
    ids: &[String],
) -> String {
    dispatcher
        .perform_action(DeviceFamily::Light, action.as_str(), ids)
        .await
}
