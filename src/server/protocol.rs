//! JSON-RPC 2.0 message handling for the MCP surface.
//!
//! One inbound message yields at most one response. Notifications and
//! client-side responses are consumed silently. Batches are rejected.

use crate::server::tools::{tool_definitions, ToolName, Toolbox};
use crate::server::{prompts, resources};
use serde_json::{json, Map, Value};

pub const JSONRPC_VERSION: &str = "2.0";
pub const DEFAULT_PROTOCOL_VERSION: &str = "2024-11-05";
pub const SERVER_NAME: &str = "kiotviet-mcp";

pub const PARSE_ERROR: i64 = -32700;
pub const INVALID_REQUEST: i64 = -32600;
pub const METHOD_NOT_FOUND: i64 = -32601;
pub const INVALID_PARAMS: i64 = -32602;
pub const INTERNAL_ERROR: i64 = -32603;
pub const RESOURCE_NOT_FOUND: i64 = -32002;

const INSTRUCTIONS: &str = "Tools for the KiotViet retail API. Every tool needs access_token and \
retailer, which the host injects. Read the kiotviet://*_schema resources to interpret results.";

#[derive(Debug, Clone, PartialEq)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
}

impl RpcError {
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    fn invalid_params(message: impl Into<String>) -> Self {
        Self::new(INVALID_PARAMS, message)
    }
}

pub fn success_response(id: Value, result: Value) -> Value {
    json!({ "jsonrpc": JSONRPC_VERSION, "id": id, "result": result })
}

pub fn error_response(id: Value, error: &RpcError) -> Value {
    json!({
        "jsonrpc": JSONRPC_VERSION,
        "id": id,
        "error": { "code": error.code, "message": error.message },
    })
}

/// Serialized -32700 response. The request id is unknown, so it is null.
pub fn parse_error_response(detail: impl std::fmt::Display) -> String {
    let error = RpcError::new(PARSE_ERROR, format!("Parse error: {}", detail));
    error_response(Value::Null, &error).to_string()
}

pub struct McpServer {
    toolbox: Toolbox,
}

impl McpServer {
    pub fn new(toolbox: Toolbox) -> Self {
        Self { toolbox }
    }

    pub fn toolbox(&self) -> &Toolbox {
        &self.toolbox
    }

    /// Handles one line of the stdio stream. Blank lines are ignored.
    pub async fn handle_line(&self, line: &str) -> Option<String> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let message: Value = match serde_json::from_str(line) {
            Ok(message) => message,
            Err(e) => {
                tracing::warn!("Discarding malformed message: {}", e);
                return Some(parse_error_response(e));
            }
        };

        self.handle_message(message)
            .await
            .map(|response| response.to_string())
    }

    pub async fn handle_message(&self, message: Value) -> Option<Value> {
        let object = match message {
            Value::Object(object) => object,
            Value::Array(_) => {
                let error = RpcError::new(INVALID_REQUEST, "Batch requests are not supported");
                return Some(error_response(Value::Null, &error));
            }
            _ => {
                let error = RpcError::new(INVALID_REQUEST, "Request must be a JSON object");
                return Some(error_response(Value::Null, &error));
            }
        };

        let id = object.get("id").cloned();
        let method = object.get("method").and_then(Value::as_str);

        let Some(method) = method else {
            if id.is_some() && (object.contains_key("result") || object.contains_key("error")) {
                return None;
            }
            let error = RpcError::new(INVALID_REQUEST, "Missing method");
            return Some(error_response(id.unwrap_or(Value::Null), &error));
        };

        let Some(id) = id else {
            tracing::debug!("Notification {}", method);
            return None;
        };

        let params = object.get("params").cloned().unwrap_or(Value::Null);
        let response = match self.dispatch(method, &params).await {
            Ok(result) => success_response(id, result),
            Err(error) => {
                tracing::debug!("{} failed with {}: {}", method, error.code, error.message);
                error_response(id, &error)
            }
        };
        Some(response)
    }

    async fn dispatch(&self, method: &str, params: &Value) -> Result<Value, RpcError> {
        match method {
            "initialize" => Ok(self.initialize(params)),
            "ping" => Ok(json!({})),
            "tools/list" => Ok(json!({
                "tools": tool_definitions().iter().map(|t| t.to_json()).collect::<Vec<_>>()
            })),
            "tools/call" => self.call_tool(params).await,
            "resources/list" => Ok(json!({
                "resources": resources::RESOURCES.iter().map(|r| r.descriptor()).collect::<Vec<_>>()
            })),
            "resources/templates/list" => Ok(json!({ "resourceTemplates": [] })),
            "resources/read" => read_resource(params),
            "prompts/list" => Ok(json!({ "prompts": prompts::list() })),
            "prompts/get" => get_prompt(params),
            other => Err(RpcError::new(
                METHOD_NOT_FOUND,
                format!("Method not found: {}", other),
            )),
        }
    }

    fn initialize(&self, params: &Value) -> Value {
        let protocol_version = params
            .get("protocolVersion")
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_PROTOCOL_VERSION);

        if let Some(client) = params.get("clientInfo").and_then(|c| c.get("name")) {
            tracing::info!("Client connected: {}", client);
        }

        json!({
            "protocolVersion": protocol_version,
            "capabilities": {
                "tools": { "listChanged": false },
                "resources": { "subscribe": false, "listChanged": false },
                "prompts": { "listChanged": false },
            },
            "serverInfo": {
                "name": SERVER_NAME,
                "version": env!("CARGO_PKG_VERSION"),
            },
            "instructions": INSTRUCTIONS,
        })
    }

    async fn call_tool(&self, params: &Value) -> Result<Value, RpcError> {
        let name = string_param(params, "name")?;
        let tool = ToolName::parse(name)
            .ok_or_else(|| RpcError::invalid_params(format!("Unknown tool: {}", name)))?;
        let arguments = params.get("arguments").cloned().unwrap_or(Value::Null);

        match self.toolbox.call(tool, &arguments).await {
            Ok(value) => Ok(tool_result(value)),
            Err(e) => {
                tracing::warn!("{} failed: {}", tool, e);
                tracing::debug!("Suggestion: {}", e.recovery_suggestion());
                Ok(json!({
                    "content": [{ "type": "text", "text": e.to_string() }],
                    "isError": true,
                }))
            }
        }
    }
}

fn string_param<'a>(params: &'a Value, key: &str) -> Result<&'a str, RpcError> {
    params
        .get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| RpcError::invalid_params(format!("Missing string parameter '{}'", key)))
}

/// Wraps a remote JSON value as a successful tool result.
pub fn tool_result(value: Value) -> Value {
    let text = serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string());
    let mut result = Map::new();
    result.insert("content".to_string(), json!([{ "type": "text", "text": text }]));
    if value.is_object() {
        result.insert("structuredContent".to_string(), value);
    }
    result.insert("isError".to_string(), Value::Bool(false));
    Value::Object(result)
}

fn read_resource(params: &Value) -> Result<Value, RpcError> {
    let uri = string_param(params, "uri")?;
    let resource = resources::find(uri).ok_or_else(|| {
        RpcError::new(RESOURCE_NOT_FOUND, format!("Resource not found: {}", uri))
    })?;
    let contents = resource
        .contents()
        .map_err(|e| RpcError::new(INTERNAL_ERROR, e.to_string()))?;
    Ok(json!({ "contents": [contents] }))
}

fn get_prompt(params: &Value) -> Result<Value, RpcError> {
    let name = string_param(params, "name")?;
    prompts::get(name).ok_or_else(|| RpcError::invalid_params(format!("Unknown prompt: {}", name)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server() -> McpServer {
        McpServer::new(Toolbox::default())
    }

    async fn request(method: &str, params: Value) -> Value {
        server()
            .handle_message(json!({ "jsonrpc": "2.0", "id": 1, "method": method, "params": params }))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn initialize_echoes_protocol_version() {
        let response = request("initialize", json!({ "protocolVersion": "2025-06-18" })).await;
        assert_eq!(response["id"], 1);
        assert_eq!(response["result"]["protocolVersion"], "2025-06-18");
        assert_eq!(response["result"]["serverInfo"]["name"], "kiotviet-mcp");
        assert!(response["result"]["capabilities"]["tools"].is_object());

        let response = request("initialize", json!({})).await;
        assert_eq!(response["result"]["protocolVersion"], DEFAULT_PROTOCOL_VERSION);
    }

    #[tokio::test]
    async fn notifications_get_no_response() {
        let response = server()
            .handle_message(json!({ "jsonrpc": "2.0", "method": "notifications/initialized" }))
            .await;
        assert!(response.is_none());
    }

    #[tokio::test]
    async fn unknown_method() {
        let response = request("tools/delete", json!({})).await;
        assert_eq!(response["error"]["code"], METHOD_NOT_FOUND);
    }

    #[tokio::test]
    async fn malformed_line_is_parse_error() {
        let line = server().handle_line("{not json").await.unwrap();
        let response: Value = serde_json::from_str(&line).unwrap();
        assert_eq!(response["error"]["code"], PARSE_ERROR);
        assert!(response["id"].is_null());

        assert!(server().handle_line("   ").await.is_none());
    }

    #[tokio::test]
    async fn batches_are_rejected() {
        let response = server().handle_message(json!([])).await.unwrap();
        assert_eq!(response["error"]["code"], INVALID_REQUEST);
    }

    #[tokio::test]
    async fn unknown_tool_is_invalid_params() {
        let response = request("tools/call", json!({ "name": "kv_drop_tables" })).await;
        assert_eq!(response["error"]["code"], INVALID_PARAMS);
    }

    #[tokio::test]
    async fn tool_argument_errors_are_tool_results() {
        let response = request(
            "tools/call",
            json!({
                "name": "kv_get_product",
                "arguments": { "access_token": "t", "retailer": "r" }
            }),
        )
        .await;
        assert_eq!(response["result"]["isError"], true);
        let text = response["result"]["content"][0]["text"].as_str().unwrap();
        assert!(text.contains("product_id or product_code"));
    }

    #[tokio::test]
    async fn unknown_resource() {
        let response = request("resources/read", json!({ "uri": "kiotviet://nope" })).await;
        assert_eq!(response["error"]["code"], RESOURCE_NOT_FOUND);
    }

    #[test]
    fn tool_result_keeps_structured_objects_only() {
        let result = tool_result(json!({ "data": [] }));
        assert_eq!(result["structuredContent"], json!({ "data": [] }));
        assert_eq!(result["isError"], false);

        let result = tool_result(json!([1, 2]));
        assert!(result.get("structuredContent").is_none());
        assert_eq!(result["content"][0]["text"], "[\n  1,\n  2\n]");
    }
}
