//! Application layer for wordpress-mcp
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod registry;
pub mod use_cases;

// Re-export commonly used types
pub use config::DispatchConfig;
pub use ports::{
    tool_handler::{ToolContext, ToolHandler},
    tool_schema::ToolSchemaPort,
};
pub use registry::{RegisteredTool, RegistryError, ToolRegistry, ToolRegistryBuilder};
pub use use_cases::dispatch_tool::{DispatchError, DispatchToolUseCase};
