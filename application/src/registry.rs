//! Tool Registry
//!
//! The [`ToolRegistry`] is the fixed catalog of tools this server exposes.
//! It is assembled once at startup and never mutated afterwards; the
//! dispatcher and the discovery endpoint both borrow it through an `Arc`.
//!
//! # Usage
//!
//! ```ignore
//! use wpmcp_application::ToolRegistry;
//!
//! let registry = ToolRegistry::builder()
//!     .register(GetPostsTool::new(api.clone()))
//!     .register(GetPostTool::new(api.clone()))
//!     .build()?;
//!
//! assert!(registry.get("wp_api_get_posts").is_some());
//! ```
//!
//! Tools are listed in registration order. Registering two handlers with
//! the same tool name is rejected by [`ToolRegistryBuilder::build`].

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;
use wpmcp_domain::tool::ToolDefinition;

use crate::ports::tool_handler::ToolHandler;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Tool '{0}' is registered more than once")]
    DuplicateTool(String),
}

/// A tool definition paired with the handler that executes it
#[derive(Clone)]
pub struct RegisteredTool {
    definition: ToolDefinition,
    handler: Arc<dyn ToolHandler>,
}

impl RegisteredTool {
    pub fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    pub fn handler(&self) -> &Arc<dyn ToolHandler> {
        &self.handler
    }

    pub fn name(&self) -> &str {
        &self.definition.name
    }
}

impl std::fmt::Debug for RegisteredTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisteredTool")
            .field("name", &self.definition.name)
            .field("category", &self.definition.category)
            .finish()
    }
}

/// Immutable, ordered catalog of tools
#[derive(Debug, Default)]
pub struct ToolRegistry {
    tools: Vec<RegisteredTool>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    pub fn builder() -> ToolRegistryBuilder {
        ToolRegistryBuilder::default()
    }

    /// Look up a tool by exact name
    pub fn get(&self, name: &str) -> Option<&RegisteredTool> {
        self.index.get(name).map(|&i| &self.tools[i])
    }

    /// Tool definitions in registration order
    pub fn definitions(&self) -> impl Iterator<Item = &ToolDefinition> {
        self.tools.iter().map(|t| &t.definition)
    }

    /// Tool names in registration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tools.iter().map(|t| t.name())
    }

    pub fn iter(&self) -> impl Iterator<Item = &RegisteredTool> {
        self.tools.iter()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

/// Collects handlers before freezing them into a [`ToolRegistry`]
#[derive(Default)]
pub struct ToolRegistryBuilder {
    tools: Vec<RegisteredTool>,
}

impl ToolRegistryBuilder {
    /// Register a tool handler
    pub fn register<H: ToolHandler + 'static>(self, handler: H) -> Self {
        self.register_arc(Arc::new(handler))
    }

    /// Register a tool handler (Arc version)
    pub fn register_arc(mut self, handler: Arc<dyn ToolHandler>) -> Self {
        let definition = handler.definition();
        self.tools.push(RegisteredTool {
            definition,
            handler,
        });
        self
    }

    pub fn build(self) -> Result<ToolRegistry, RegistryError> {
        let mut index = HashMap::with_capacity(self.tools.len());
        for (i, tool) in self.tools.iter().enumerate() {
            if index.insert(tool.name().to_string(), i).is_some() {
                return Err(RegistryError::DuplicateTool(tool.name().to_string()));
            }
            tracing::debug!(
                tool = %tool.name(),
                category = %tool.definition.category,
                "Registered tool"
            );
        }

        Ok(ToolRegistry {
            tools: self.tools,
            index,
        })
    }
}
