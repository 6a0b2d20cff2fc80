//! Wire models for the Jeedom object graph
//!
//! Jeedom returns ids as strings or numbers depending on the endpoint and
//! version, and uses `null` for empty lists; the deserializers below
//! normalize both.

use crate::error::JeedomError;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Numeric id of a remote object, equipment or command
pub type RemoteId = u64;

/// Plugin entry from `plugin::listPlugin`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PluginInfo {
    pub id: String,
    #[serde(default)]
    pub source: Option<String>,
}

/// Location node from `jeeObject::full`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RemoteObject {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: RemoteId,
    #[serde(default)]
    pub name: String,
    #[serde(
        rename = "father_id",
        default,
        deserialize_with = "optional_id_from_string_or_number"
    )]
    pub parent_id: Option<RemoteId>,
    #[serde(rename = "eqLogics", default, deserialize_with = "null_as_default")]
    pub equipment: Vec<RemoteEquipment>,
}

/// Equipment (`eqLogic`) attached to a location
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RemoteEquipment {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: RemoteId,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "eqType_name", default)]
    pub eq_type: String,
    #[serde(
        rename = "object_id",
        default,
        deserialize_with = "optional_id_from_string_or_number"
    )]
    pub location_id: Option<RemoteId>,
    #[serde(rename = "cmds", default, deserialize_with = "null_as_default")]
    pub commands: Vec<RemoteCommand>,
}

/// Command (`cmd`) of an equipment
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RemoteCommand {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: RemoteId,
    #[serde(rename = "generic_type", default, deserialize_with = "null_as_default")]
    pub generic_type: String,
    #[serde(default)]
    pub state: Value,
}

impl RemoteEquipment {
    /// Equipment type tag that makes an equipment eligible for projection
    pub const VIRTUAL: &'static str = "virtual";

    pub fn is_virtual(&self) -> bool {
        self.eq_type == Self::VIRTUAL
    }
}

impl RemoteObject {
    /// Decode a `jeeObject::full` result node by node.
    ///
    /// A malformed node is logged and dropped so the rest of the graph
    /// still projects. A result that is not an array at all is an error,
    /// so the cycle fails instead of publishing an empty graph.
    pub fn decode_all(value: Value) -> crate::error::Result<Vec<RemoteObject>> {
        let nodes = match value {
            Value::Array(nodes) => nodes,
            other => {
                return Err(JeedomError::parsing_error(format!(
                    "object graph is {}, expected an array",
                    value_kind(&other)
                )))
            }
        };

        Ok(nodes
            .into_iter()
            .filter_map(|node| match serde_json::from_value::<RemoteObject>(node) {
                Ok(object) => Some(object),
                Err(e) => {
                    tracing::warn!(error = %e, "skipping malformed location node");
                    None
                }
            })
            .collect())
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    Number(u64),
    String(String),
}

fn parse_id<E: serde::de::Error>(raw: StringOrNumber) -> Result<RemoteId, E> {
    match raw {
        StringOrNumber::Number(n) => Ok(n),
        StringOrNumber::String(s) => s
            .trim()
            .parse()
            .map_err(|_| E::custom(format!("invalid id {s:?}"))),
    }
}

fn id_from_string_or_number<'de, D>(deserializer: D) -> Result<RemoteId, D::Error>
where
    D: Deserializer<'de>,
{
    parse_id(StringOrNumber::deserialize(deserializer)?)
}

fn optional_id_from_string_or_number<'de, D>(
    deserializer: D,
) -> Result<Option<RemoteId>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<StringOrNumber>::deserialize(deserializer)? {
        None => Ok(None),
        Some(StringOrNumber::String(s)) if s.trim().is_empty() => Ok(None),
        Some(raw) => parse_id(raw).map(Some),
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
