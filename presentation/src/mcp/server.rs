//! MCP server over newline-delimited JSON-RPC.
//!
//! One message per line. Each request is answered before the next line is
//! read; notifications are consumed without a reply.

use super::protocol::{
    JsonRpcRequest, JsonRpcResponse, RpcError, ToolCallParams, error_codes, initialize_result,
};
use serde_json::{Value, json};
use std::sync::Arc;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, warn};
use wpmcp_application::{DispatchToolUseCase, ToolSchemaPort};

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Transport I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize response: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub struct McpServer {
    dispatcher: Arc<DispatchToolUseCase>,
    schema: Arc<dyn ToolSchemaPort>,
    version: String,
}

impl McpServer {
    pub fn new(dispatcher: Arc<DispatchToolUseCase>, schema: Arc<dyn ToolSchemaPort>) -> Self {
        Self {
            dispatcher,
            schema,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Override the version reported in `serverInfo`
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Serve until `reader` reaches end of input.
    pub async fn serve<R, W>(&self, reader: R, mut writer: W) -> Result<(), ServerError>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        info!(
            tools = self.dispatcher.registry().len(),
            sites = self.dispatcher.sites().len(),
            "MCP server listening on stdio"
        );

        let mut lines = reader.lines();
        while let Some(line) = lines.next_line().await? {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            if let Some(response) = self.handle_line(line).await {
                let mut payload = serde_json::to_string(&response)?;
                payload.push('\n');
                writer.write_all(payload.as_bytes()).await?;
                writer.flush().await?;
            }
        }

        info!("Input closed, shutting down");
        Ok(())
    }

    /// Handle one raw line. `None` means nothing is sent back.
    pub async fn handle_line(&self, line: &str) -> Option<JsonRpcResponse> {
        let message: Value = match serde_json::from_str(line) {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, "Unparseable message");
                return Some(JsonRpcResponse::failure(
                    Value::Null,
                    RpcError::parse_error(e),
                ));
            }
        };

        let id = message.get("id").cloned();
        let has_method = message.get("method").is_some_and(Value::is_string);
        if !message.is_object() || !has_method {
            return Some(JsonRpcResponse::failure(
                id.unwrap_or(Value::Null),
                RpcError::invalid_request("Invalid Request"),
            ));
        }

        let request: JsonRpcRequest = match serde_json::from_value(message) {
            Ok(request) => request,
            Err(e) => {
                return Some(JsonRpcResponse::failure(
                    id.unwrap_or(Value::Null),
                    RpcError::invalid_request(format!("Invalid Request: {}", e)),
                ));
            }
        };

        if request.is_notification() {
            debug!(method = %request.method, "Notification ignored");
            return None;
        }

        let id = request.id.clone().unwrap_or(Value::Null);
        Some(match self.handle_request(&request).await {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(error) => JsonRpcResponse::failure(id, error),
        })
    }

    async fn handle_request(&self, request: &JsonRpcRequest) -> Result<Value, RpcError> {
        debug!(method = %request.method, "Request");
        match request.method.as_str() {
            "initialize" => Ok(initialize_result(request.params.as_ref(), &self.version)),
            "ping" => Ok(json!({})),
            "tools/list" => Ok(json!({
                "tools": self.schema.all_tools_schema(self.dispatcher.registry()),
            })),
            "tools/call" => self.call_tool(request.params.clone()).await,
            other => Err(RpcError::method_not_found(other)),
        }
    }

    async fn call_tool(&self, params: Option<Value>) -> Result<Value, RpcError> {
        let params: ToolCallParams = serde_json::from_value(params.unwrap_or(Value::Null))
            .map_err(|e| RpcError::invalid_params(format!("Invalid tools/call params: {}", e)))?;

        let result = self
            .dispatcher
            .execute(&params.name, params.arguments.as_ref())
            .await
            .map_err(|e| {
                warn!(tool = %params.name, error = %e, "Tool call failed");
                RpcError::from(e)
            })?;

        serde_json::to_value(result)
            .map_err(|e| RpcError::new(error_codes::INTERNAL_ERROR, e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use tokio::io::BufReader;
    use wpmcp_application::{ToolContext, ToolHandler, ToolRegistry};
    use wpmcp_domain::tool::{
        ParamType, ToolCall, ToolCategory, ToolDefinition, ToolError, ToolParameter, ToolResult,
    };
    use wpmcp_domain::{Site, SitesConfig};

    struct EchoPostTool;

    #[async_trait]
    impl ToolHandler for EchoPostTool {
        fn definition(&self) -> ToolDefinition {
            ToolDefinition::new("wp_api_get_post", "Get a post", ToolCategory::RestApi)
                .with_parameter(
                    ToolParameter::new("postId", "Post ID", true).with_type(ParamType::Integer),
                )
        }

        async fn execute(
            &self,
            call: &ToolCall,
            context: &ToolContext<'_>,
        ) -> Result<ToolResult, ToolError> {
            let id = call.require_i64("postId").map_err(ToolError::invalid_argument)?;
            if id < 0 {
                return Err(ToolError::execution_failed("no such post"));
            }
            Ok(ToolResult::text(format!("post {} on {}", id, context.site_key))
                .with_field("postId", id))
        }
    }

    struct NameOnlySchema;

    impl ToolSchemaPort for NameOnlySchema {
        fn tool_to_schema(&self, tool: &ToolDefinition) -> Value {
            json!({ "name": tool.name })
        }
    }

    fn server() -> McpServer {
        let sites = SitesConfig::new().with_site(
            "blog",
            Site::new("Blog", "/srv/blog", "/srv/blog/plugins", "http://blog.test/wp-json"),
        );
        let registry = ToolRegistry::builder().register(EchoPostTool).build().unwrap();
        let dispatcher = DispatchToolUseCase::new(Arc::new(sites), Arc::new(registry));
        McpServer::new(Arc::new(dispatcher), Arc::new(NameOnlySchema)).with_version("9.9.9")
    }

    async fn roundtrip(line: &str) -> Value {
        let response = server().handle_line(line).await.expect("a response");
        serde_json::to_value(response).unwrap()
    }

    #[tokio::test]
    async fn test_initialize() {
        let response = roundtrip(
            r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{"protocolVersion":"2025-03-26","capabilities":{}}}"#,
        )
        .await;

        assert_eq!(response["id"], 1);
        assert_eq!(response["result"]["protocolVersion"], "2025-03-26");
        assert_eq!(response["result"]["serverInfo"]["name"], "wordpress-mcp");
        assert_eq!(response["result"]["serverInfo"]["version"], "9.9.9");
    }

    #[tokio::test]
    async fn test_ping_and_tools_list() {
        let response = roundtrip(r#"{"jsonrpc":"2.0","id":"a","method":"ping"}"#).await;
        assert_eq!(response["id"], "a");
        assert_eq!(response["result"], json!({}));

        let response = roundtrip(r#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#).await;
        assert_eq!(response["result"]["tools"], json!([{ "name": "wp_api_get_post" }]));
    }

    #[tokio::test]
    async fn test_tools_call_success() {
        let response = roundtrip(
            r#"{"jsonrpc":"2.0","id":3,"method":"tools/call","params":{"name":"wp_api_get_post","arguments":{"postId":12}}}"#,
        )
        .await;

        assert_eq!(
            response["result"],
            json!({
                "content": [{ "type": "text", "text": "post 12 on blog" }],
                "postId": 12
            })
        );
    }

    #[tokio::test]
    async fn test_tools_call_errors_map_to_codes() {
        let unknown = roundtrip(
            r#"{"jsonrpc":"2.0","id":4,"method":"tools/call","params":{"name":"wp_nonexistent"}}"#,
        )
        .await;
        assert_eq!(unknown["error"]["code"], error_codes::METHOD_NOT_FOUND);
        assert_eq!(
            unknown["error"]["message"],
            "Unknown tool: wp_nonexistent. Available tools: wp_api_get_post"
        );

        let bad_site = roundtrip(
            r#"{"jsonrpc":"2.0","id":5,"method":"tools/call","params":{"name":"wp_api_get_post","arguments":{"siteKey":3,"postId":1}}}"#,
        )
        .await;
        assert_eq!(bad_site["error"]["code"], error_codes::INVALID_PARAMS);

        let failing = roundtrip(
            r#"{"jsonrpc":"2.0","id":6,"method":"tools/call","params":{"name":"wp_api_get_post","arguments":{"postId":-1}}}"#,
        )
        .await;
        assert_eq!(failing["error"]["code"], error_codes::INTERNAL_ERROR);

        let no_params = roundtrip(r#"{"jsonrpc":"2.0","id":7,"method":"tools/call"}"#).await;
        assert_eq!(no_params["error"]["code"], error_codes::INVALID_PARAMS);
    }

    #[tokio::test]
    async fn test_unresolved_site_is_error_result() {
        let response = roundtrip(
            r#"{"jsonrpc":"2.0","id":8,"method":"tools/call","params":{"name":"wp_api_get_post","arguments":{"siteKey":"zzzzzz","postId":1}}}"#,
        )
        .await;

        assert!(response.get("error").is_none());
        assert_eq!(response["result"]["isError"], true);
        let text = response["result"]["content"][0]["text"].as_str().unwrap();
        assert!(text.starts_with("❌"));
    }

    #[tokio::test]
    async fn test_protocol_errors() {
        let parse = roundtrip("{not json").await;
        assert_eq!(parse["id"], Value::Null);
        assert_eq!(parse["error"]["code"], error_codes::PARSE_ERROR);

        let not_object = roundtrip("[1,2,3]").await;
        assert_eq!(not_object["error"]["code"], error_codes::INVALID_REQUEST);

        let no_method = roundtrip(r#"{"jsonrpc":"2.0","id":9}"#).await;
        assert_eq!(no_method["id"], 9);
        assert_eq!(no_method["error"]["code"], error_codes::INVALID_REQUEST);

        let unknown = roundtrip(r#"{"jsonrpc":"2.0","id":10,"method":"resources/list"}"#).await;
        assert_eq!(unknown["error"]["code"], error_codes::METHOD_NOT_FOUND);
    }

    #[tokio::test]
    async fn test_notifications_get_no_reply() {
        let response = server()
            .handle_line(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#)
            .await;
        assert!(response.is_none());
    }

    #[tokio::test]
    async fn test_null_id_is_answered() {
        let response = roundtrip(r#"{"jsonrpc":"2.0","id":null,"method":"ping"}"#).await;
        assert_eq!(response["id"], Value::Null);
        assert_eq!(response["result"], json!({}));
    }

    #[tokio::test]
    async fn test_null_arguments_rejected_as_non_object() {
        let response = roundtrip(
            r#"{"jsonrpc":"2.0","id":11,"method":"tools/call","params":{"name":"wp_api_get_post","arguments":null}}"#,
        )
        .await;
        assert_eq!(response["error"]["code"], error_codes::INVALID_PARAMS);
        assert_eq!(response["error"]["message"], "Arguments must be an object");
    }

    #[tokio::test]
    async fn test_serve_over_duplex() {
        let (client, server_end) = tokio::io::duplex(8192);
        let (server_read, server_write) = tokio::io::split(server_end);
        let (client_read, mut client_write) = tokio::io::split(client);
        let server = server();

        let client_side = async move {
            let input = concat!(
                r#"{"jsonrpc":"2.0","id":1,"method":"ping"}"#,
                "\n\n",
                r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
                "\n",
                r#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#,
                "\n",
            );
            client_write.write_all(input.as_bytes()).await.unwrap();
            client_write.shutdown().await.unwrap();

            let mut replies = Vec::new();
            let mut lines = BufReader::new(client_read).lines();
            while let Some(line) = lines.next_line().await.unwrap() {
                replies.push(serde_json::from_str::<Value>(&line).unwrap());
            }
            replies
        };

        let (served, replies) = tokio::join!(
            server.serve(BufReader::new(server_read), server_write),
            client_side
        );

        served.unwrap();
        assert_eq!(replies.len(), 2);
        assert_eq!(replies[0]["id"], 1);
        assert_eq!(replies[1]["id"], 2);
        assert!(replies[1]["result"]["tools"].is_array());
    }
}
