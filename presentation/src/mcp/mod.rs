//! MCP stdio transport
//!
//! [`McpServer`] reads newline-delimited JSON-RPC from any async reader and
//! answers on any async writer; the binary wires it to stdin/stdout.

pub mod protocol;
pub mod server;

pub use protocol::{JsonRpcRequest, JsonRpcResponse, RpcError, ToolCallParams};
pub use server::{McpServer, ServerError};
