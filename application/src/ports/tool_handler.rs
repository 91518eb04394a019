//! Tool handler port
//!
//! Defines the interface every tool implementation conforms to.

use async_trait::async_trait;
use wpmcp_domain::site::{ShellWrapper, Site};
use wpmcp_domain::tool::{ToolCall, ToolDefinition, ToolError, ToolResult};

/// Everything a handler gets to know about the site it acts on.
#[derive(Debug, Clone, Copy)]
pub struct ToolContext<'a> {
    /// Key the site is configured under
    pub site_key: &'a str,
    pub site: &'a Site,
    /// Present for tools whose category requires a shell wrapper
    pub shell_wrapper: Option<&'a ShellWrapper>,
}

impl<'a> ToolContext<'a> {
    pub fn new(site_key: &'a str, site: &'a Site) -> Self {
        Self {
            site_key,
            site,
            shell_wrapper: None,
        }
    }

    pub fn with_shell_wrapper(mut self, wrapper: &'a ShellWrapper) -> Self {
        self.shell_wrapper = Some(wrapper);
        self
    }

    pub fn require_shell_wrapper(&self) -> Result<&'a ShellWrapper, ToolError> {
        self.shell_wrapper.ok_or_else(|| {
            ToolError::execution_failed(format!(
                "No shell wrapper prepared for site \"{}\"",
                self.site_key
            ))
        })
    }
}

/// Port for a single tool
///
/// Implementations (adapters) live in the infrastructure layer, one per
/// tool. A handler is invoked at most once per request.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    /// Name, category and parameters of this tool
    fn definition(&self) -> ToolDefinition;

    /// Run the tool against the resolved site.
    ///
    /// `call` already contains `siteKey` set to the resolved site key.
    /// Returning `Err` with an `INVALID_ARGUMENT` code is reported to the
    /// client as invalid params; any other error as an internal error.
    async fn execute(
        &self,
        call: &ToolCall,
        context: &ToolContext<'_>,
    ) -> Result<ToolResult, ToolError>;
}
