//! Presentation layer for wordpress-mcp
//!
//! This crate contains the CLI definition, the console formatter for the
//! listing commands, and the MCP server speaking JSON-RPC over stdio.

pub mod cli;
pub mod mcp;
pub mod output;

// Re-export commonly used types
pub use cli::commands::Cli;
pub use mcp::{McpServer, ServerError};
pub use output::console::ConsoleFormatter;
