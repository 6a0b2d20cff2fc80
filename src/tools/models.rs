//! Request models and schemas for the assistant-callable actions

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Action accepted by `update_lights`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum LightAction {
    On,
    Off,
}

impl LightAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            LightAction::On => "on",
            LightAction::Off => "off",
        }
    }
}

/// Action accepted by `update_shutters`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ShutterAction {
    Open,
    Close,
    Stop,
}

impl ShutterAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShutterAction::Open => "open",
            ShutterAction::Close => "close",
            ShutterAction::Stop => "stop",
        }
    }
}

/// `update_lights` parameters
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct UpdateLightsRequest {
    #[schemars(description = "Action to perform on every listed light")]
    pub action: LightAction,
    #[schemars(description = "Ids of the lights, as listed in the lights catalog")]
    pub ids: Vec<String>,
}

/// `update_shutters` parameters
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct UpdateShuttersRequest {
    #[schemars(description = "Action to perform on every listed shutter")]
    pub action: ShutterAction,
    #[schemars(description = "Ids of the shutters, as listed in the shutters catalog")]
    pub ids: Vec<String>,
}

/// Callable action advertised to the assistant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSchema {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

impl ToolSchema {
    /// Build a schema whose input is described by `T`
    pub fn for_input<T: JsonSchema>(name: &str, description: &str) -> Self {
        let schema = schemars::schema_for!(T);
        Self {
            name: name.to_string(),
            description: description.to_string(),
            input_schema: serde_json::to_value(schema).unwrap_or(Value::Null),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_schema_lists_action_enum() {
        let tool = ToolSchema::for_input::<UpdateShuttersRequest>("update_shutters", "Move");
        let text = tool.input_schema.to_string();
        for verb in ["open", "close", "stop"] {
            assert!(text.contains(verb), "missing {verb} in {text}");
        }
        let required = tool.input_schema["required"].as_array().unwrap();
        assert!(required.contains(&json!("ids")));
        assert!(required.contains(&json!("action")));
    }

    #[test]
    fn unknown_action_is_rejected() {
        let err = serde_json::from_value::<UpdateLightsRequest>(json!({
            "action": "dim",
            "ids": ["4"]
        }));
        assert!(err.is_err());
    }
}
