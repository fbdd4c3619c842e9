//! JSON-RPC 2.0 handling for the MCP protocol surface.
//!
//! Tool failures are reported inside successful `tools/call` results via the
//! `isError` flag; JSON-RPC error objects are reserved for malformed
//! protocol traffic.

use serde::Deserialize;
use serde_json::{Value, json};

use abagenta_tools::dispatch;

use crate::server::GatewayState;

pub const MCP_PROTOCOL_VERSION: &str = "2024-11-05";
pub const SERVER_NAME: &str = "abagenta-mcp";

pub const PARSE_ERROR: i64 = -32700;
pub const METHOD_NOT_FOUND: i64 = -32601;
pub const INVALID_PARAMS: i64 = -32602;

#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcRequest {
    #[serde(default)]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
}

pub fn response(id: Option<Value>, result: Value) -> Value {
    json!({ "jsonrpc": "2.0", "id": id, "result": result })
}

pub fn error_response(id: Option<Value>, code: i64, message: &str) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "error": { "code": code, "message": message }
    })
}

/// Handle one MCP request. Notifications return `None`.
pub async fn handle(state: &GatewayState, request: JsonRpcRequest) -> Option<Value> {
    match request.method.as_str() {
        "initialize" => Some(response(
            request.id,
            json!({
                "protocolVersion": MCP_PROTOCOL_VERSION,
                "serverInfo": {
                    "name": SERVER_NAME,
                    "version": env!("CARGO_PKG_VERSION")
                },
                "capabilities": { "tools": {} }
            }),
        )),
        "notifications/initialized" => None,
        "ping" => Some(response(request.id, json!({}))),
        "tools/list" => Some(response(
            request.id,
            json!({ "tools": state.registry.definitions() }),
        )),
        "tools/call" => Some(call_tool(state, request.id, request.params).await),
        method => Some(error_response(
            request.id,
            METHOD_NOT_FOUND,
            &format!("Method not found: {method}"),
        )),
    }
}

async fn call_tool(state: &GatewayState, id: Option<Value>, params: Option<Value>) -> Value {
    let params = params.unwrap_or(Value::Null);
    let Some(name) = params.get("name").and_then(Value::as_str) else {
        return error_response(id, INVALID_PARAMS, "tools/call requires a tool name");
    };
    let arguments = params
        .get("arguments")
        .cloned()
        .unwrap_or_else(|| json!({}));

    let result = dispatch(&state.registry, name, &arguments, state.debug).await;
    response(
        id,
        json!({
            "content": [{ "type": "text", "text": result.text }],
            "isError": result.is_error
        }),
    )
}
