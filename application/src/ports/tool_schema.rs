//! Tool schema conversion port.
//!
//! Separates "which tools exist" (domain definitions, registry order) from
//! "how to describe them to the client" (JSON Schema, infrastructure).

use crate::registry::ToolRegistry;
use wpmcp_domain::tool::ToolDefinition;

/// Port for converting tool definitions to the discovery format.
pub trait ToolSchemaPort: Send + Sync {
    /// Convert a single tool definition to a `{name, description, inputSchema}` descriptor.
    fn tool_to_schema(&self, tool: &ToolDefinition) -> serde_json::Value;

    /// Convert every registered tool, in registration order.
    fn all_tools_schema(&self, registry: &ToolRegistry) -> Vec<serde_json::Value> {
        registry
            .definitions()
            .map(|definition| self.tool_to_schema(definition))
            .collect()
    }
}
