//! JSON-RPC protocol types for the MCP stdio transport.
//!
//! Only the subset an MCP client needs from a tool server:
//!
//! - **Requests**: client → server (`initialize`, `ping`, `tools/list`, `tools/call`)
//! - **Responses**: server → client (result or error)
//! - **Notifications**: client → server, never answered

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Value, json};
use wpmcp_application::DispatchError;

pub const JSONRPC_VERSION: &str = "2.0";

/// Protocol revision answered when the client does not name one
pub const DEFAULT_PROTOCOL_VERSION: &str = "2024-11-05";

pub const SERVER_NAME: &str = "wordpress-mcp";

/// Standard JSON-RPC error codes
pub mod error_codes {
    pub const PARSE_ERROR: i64 = -32700;
    pub const INVALID_REQUEST: i64 = -32600;
    pub const METHOD_NOT_FOUND: i64 = -32601;
    pub const INVALID_PARAMS: i64 = -32602;
    pub const INTERNAL_ERROR: i64 = -32603;
}

/// Incoming JSON-RPC message. Without an `id` it is a notification; an
/// explicit `"id": null` is still a request.
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcRequest {
    #[serde(default)]
    pub jsonrpc: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
}

impl JsonRpcRequest {
    pub fn is_notification(&self) -> bool {
        self.id.is_none()
    }
}

/// JSON-RPC response
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: &'static str,
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
}

impl JsonRpcResponse {
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn failure(id: Value, error: RpcError) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            result: None,
            error: Some(error),
        }
    }
}

/// JSON-RPC error object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl RpcError {
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    pub fn parse_error(detail: impl std::fmt::Display) -> Self {
        Self::new(error_codes::PARSE_ERROR, format!("Parse error: {}", detail))
    }

    pub fn invalid_request(detail: impl Into<String>) -> Self {
        Self::new(error_codes::INVALID_REQUEST, detail)
    }

    pub fn method_not_found(method: &str) -> Self {
        Self::new(
            error_codes::METHOD_NOT_FOUND,
            format!("Method not found: {}", method),
        )
    }

    pub fn invalid_params(detail: impl Into<String>) -> Self {
        Self::new(error_codes::INVALID_PARAMS, detail)
    }
}

impl From<DispatchError> for RpcError {
    fn from(err: DispatchError) -> Self {
        let code = match err {
            DispatchError::InvalidParams(_) => error_codes::INVALID_PARAMS,
            DispatchError::MethodNotFound { .. } => error_codes::METHOD_NOT_FOUND,
            DispatchError::Internal { .. } => error_codes::INTERNAL_ERROR,
        };
        Self::new(code, err.to_string())
    }
}

/// Parameters of `tools/call`
#[derive(Debug, Clone, Deserialize)]
pub struct ToolCallParams {
    pub name: String,
    /// `None` only when the key is missing; `null` is kept for the shape check
    #[serde(default, deserialize_with = "present")]
    pub arguments: Option<Value>,
}

/// `Some` for any value that is present, `null` included. Absent keys fall
/// back to `None` through `#[serde(default)]`.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Result of `initialize`; echoes the client's protocol version.
pub fn initialize_result(params: Option<&Value>, version: &str) -> Value {
    let protocol_version = params
        .and_then(|p| p.get("protocolVersion"))
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_PROTOCOL_VERSION);

    json!({
        "protocolVersion": protocol_version,
        "capabilities": { "tools": {} },
        "serverInfo": { "name": SERVER_NAME, "version": version },
    })
}
