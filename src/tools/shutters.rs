//! `update_shutters` action

use crate::services::catalog::DeviceFamily;
use crate::tools::dispatch::ActionDispatcher;
use crate::tools::models::{ShutterAction, ToolSchema, UpdateShuttersRequest};

pub const TOOL_NAME: &str = "update_shutters";

const DESCRIPTION: &str = "Open, close or stop one or more shutters. \
Pass the ids from the shutters catalog; every listed shutter receives the same action.";

/// Schema advertised while at least one shutter exists
pub fn tool_schema() -> ToolSchema {
    ToolSchema::for_input::<UpdateShuttersRequest>(TOOL_NAME, DESCRIPTION)
}

/// Move every shutter in `ids`
pub async fn update_shutters(
    dispatcher: &ActionDispatcher,
    action: ShutterAction,
    ids: &[String],
) -> String {
    dispatcher
        .perform_action(DeviceFamily::Flap, action.as_str(), ids)
        .await
}
