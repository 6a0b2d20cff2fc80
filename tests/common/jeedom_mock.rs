//! WireMock-based Jeedom JSON-RPC mocking infrastructure
//!
//! Every Jeedom call is a POST to `/core/api/jeeApi.php`; mocks are told
//! apart by the `method` member of the request body.

#![allow(dead_code)]

use jeedom_mcp_rust::config::{credentials::ApiKey, JeedomConfig, ServerConfig};
use serde_json::{json, Value};
use wiremock::{
    matchers::{body_partial_json, method, path},
    Mock, MockServer, ResponseTemplate,
};

pub const API_PATH: &str = "/core/api/jeeApi.php";
pub const API_KEY: &str = "test-api-key";

/// Mock Jeedom server for testing
pub struct MockJeedomServer {
    pub server: MockServer,
}

impl MockJeedomServer {
    /// Start a server with no mounted methods
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Start a server answering the three refresh calls with a small home
    pub async fn with_home() -> Self {
        let mock = Self::start().await;
        mock.mock_result("plugin::listPlugin", market_plugins()).await;
        mock.mock_result("version", json!("4.4.8")).await;
        mock.mock_result("jeeObject::full", home_graph()).await;
        mock.mock_result("cmd::execCmd", json!({})).await;
        mock
    }

    pub fn url(&self) -> String {
        self.server.uri()
    }

    /// Bridge configuration pointing at this server
    pub fn config(&self) -> ServerConfig {
        ServerConfig {
            jeedom: JeedomConfig {
                url: self.url().parse().unwrap(),
                api_key: ApiKey::new(API_KEY),
                ..JeedomConfig::default()
            },
            ..ServerConfig::default()
        }
    }

    /// Answer `rpc_method` with a JSON-RPC result
    pub async fn mock_result(&self, rpc_method: &str, result: Value) {
        Mock::given(method("POST"))
            .and(path(API_PATH))
            .and(body_partial_json(json!({ "method": rpc_method })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "jsonrpc": "2.0",
                "id": 1,
                "result": result
            })))
            .mount(&self.server)
            .await;
    }

    /// Answer `rpc_method` with a JSON-RPC error object
    pub async fn mock_rpc_error(&self, rpc_method: &str, code: i64, message: &str) {
        Mock::given(method("POST"))
            .and(path(API_PATH))
            .and(body_partial_json(json!({ "method": rpc_method })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "jsonrpc": "2.0",
                "id": 1,
                "error": { "code": code, "message": message }
            })))
            .mount(&self.server)
            .await;
    }

    /// Answer `rpc_method` with an arbitrary JSON body
    pub async fn mock_body(&self, rpc_method: &str, body: Value) {
        Mock::given(method("POST"))
            .and(path(API_PATH))
            .and(body_partial_json(json!({ "method": rpc_method })))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Answer `rpc_method` with a bare HTTP status
    pub async fn mock_status(&self, rpc_method: &str, status: u16) {
        Mock::given(method("POST"))
            .and(path(API_PATH))
            .and(body_partial_json(json!({ "method": rpc_method })))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.server)
            .await;
    }

    /// Drop every mounted mock and recorded request
    pub async fn reset(&self) {
        self.server.reset().await;
    }

    /// JSON bodies of every request received so far
    pub async fn request_bodies(&self) -> Vec<Value> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter_map(|request| request.body_json::<Value>().ok())
            .collect()
    }

    /// Command ids sent through `cmd::execCmd`
    pub async fn executed_commands(&self) -> Vec<u64> {
        let mut ids: Vec<u64> = self
            .request_bodies()
            .await
            .iter()
            .filter(|body| body["method"] == "cmd::execCmd")
            .filter_map(|body| body["params"]["id"].as_u64())
            .collect();
        ids.sort_unstable();
        ids
    }
}

pub fn market_plugins() -> Value {
    json!([
        {"id": "virtual", "source": "market", "name": "Virtuel"},
        {"id": "weather", "source": "market", "name": "Météo"}
    ])
}

/// A house with a living room light, a bedroom shutter, an empty cellar
/// and a non-virtual lamp that must never be exposed.
pub fn home_graph() -> Value {
    json!([
        {"id": "1", "name": "Maison", "father_id": null, "eqLogics": []},
        {
            "id": "2", "name": "Salon", "father_id": "1",
            "eqLogics": [
                {
                    "id": "4", "name": "Lampe salon", "eqType_name": "virtual", "object_id": "2",
                    "cmds": [
                        {"id": "101", "generic_type": "LIGHT_ON"},
                        {"id": "102", "generic_type": "LIGHT_STATE", "state": 1},
                        {"id": "103", "generic_type": "LIGHT_OFF"}
                    ]
                },
                {
                    "id": "7", "name": "Lampe zwave", "eqType_name": "zwavejs", "object_id": "2",
                    "cmds": [
                        {"id": "701", "generic_type": "LIGHT_ON"},
                        {"id": "702", "generic_type": "LIGHT_STATE", "state": 0}
                    ]
                }
            ]
        },
        {
            "id": "3", "name": "Chambre", "father_id": "1",
            "eqLogics": [{
                "id": "8", "name": "Volet chambre", "eqType_name": "virtual", "object_id": "3",
                "cmds": [
                    {"id": "801", "generic_type": "FLAP_STATE", "state": "closed"},
                    {"id": "802", "generic_type": "FLAP_OPEN"},
                    {"id": "803", "generic_type": "FLAP_CLOSE"},
                    {"id": "804", "generic_type": "FLAP_STOP"}
                ]
            }]
        },
        {"id": "5", "name": "Cave", "father_id": "1", "eqLogics": null}
    ])
}
