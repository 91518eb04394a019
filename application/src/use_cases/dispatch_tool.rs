//! Dispatch tool use case
//!
//! Routes one `tools/call` request to the handler that implements it.
//!
//! # Pipeline
//!
//! 1. **Shape check** - arguments must be an object, `siteKey` a string
//! 2. **Site resolution** - the loose `siteKey` must name exactly one site
//! 3. **Tool lookup** - the tool name must be registered
//! 4. **Argument validation** - arguments must match the tool's parameters
//! 5. **Context preparation** - WP-CLI tools get the site's shell wrapper
//! 6. **Invocation** - the handler runs exactly once
//!
//! Site resolution and shell wrapper failures are answered with an error
//! *result* (`isError: true`, prefixed with "❌") that lists what the user
//! can pick from, not with a protocol error. Everything else that goes
//! wrong becomes a [`DispatchError`].

use crate::config::DispatchConfig;
use crate::ports::tool_handler::ToolContext;
use crate::registry::ToolRegistry;
use serde_json::{Map, Value};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};
use wpmcp_domain::site::{ShellWrapper, ShellWrapperError, Site, SitesConfig, resolve_site};
use wpmcp_domain::tool::{
    DefaultToolValidator, SITE_KEY_ARG, ToolCall, ToolResult, ToolValidator,
    validate_site_selector,
};

/// Errors reported to the client as protocol errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// Arguments are malformed or do not fit the tool's parameters
    #[error("{0}")]
    InvalidParams(String),

    /// No tool with that name is registered
    #[error("Unknown tool: {name}. Available tools: {}", .available.join(", "))]
    MethodNotFound { name: String, available: Vec<String> },

    /// The handler failed
    #[error("{tool} failed: {message}")]
    Internal { tool: String, message: String },
}

/// Use case for invoking a registered tool against a configured site.
pub struct DispatchToolUseCase {
    sites: Arc<SitesConfig>,
    registry: Arc<ToolRegistry>,
    validator: Option<Arc<dyn ToolValidator>>,
}

impl DispatchToolUseCase {
    pub fn new(sites: Arc<SitesConfig>, registry: Arc<ToolRegistry>) -> Self {
        Self {
            sites,
            registry,
            validator: Some(Arc::new(DefaultToolValidator)),
        }
    }

    pub fn with_config(mut self, config: &DispatchConfig) -> Self {
        if !config.validate_arguments {
            self.validator = None;
        }
        self
    }

    pub fn with_validator(mut self, validator: Arc<dyn ToolValidator>) -> Self {
        self.validator = Some(validator);
        self
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    pub fn sites(&self) -> &SitesConfig {
        &self.sites
    }

    /// Execute `name` with `arguments` (absent arguments count as `{}`).
    pub async fn execute(
        &self,
        name: &str,
        arguments: Option<&Value>,
    ) -> Result<ToolResult, DispatchError> {
        let empty = Value::Object(Map::new());
        let arguments = arguments.unwrap_or(&empty);

        let selector = validate_site_selector(arguments)
            .map_err(|e| DispatchError::InvalidParams(e.to_string()))?;

        let resolved = match resolve_site(&self.sites, selector.site_key) {
            Ok(resolved) => resolved,
            Err(e) => {
                debug!(tool = name, site_key = ?selector.site_key, "Site resolution failed");
                return Ok(ToolResult::error(format!("❌ {}", e)));
            }
        };
        debug!(tool = name, site = resolved.key, "Resolved site");

        let tool = self
            .registry
            .get(name)
            .ok_or_else(|| DispatchError::MethodNotFound {
                name: name.to_string(),
                available: self.registry.names().map(str::to_string).collect(),
            })?;

        let mut call = ToolCall::from_object(name, selector.arguments);
        call.arguments.insert(
            SITE_KEY_ARG.to_string(),
            Value::String(resolved.key.to_string()),
        );

        if let Some(validator) = &self.validator {
            validator
                .validate(&call, tool.definition())
                .map_err(DispatchError::InvalidParams)?;
        }

        let shell_wrapper = if tool.definition().requires_shell_wrapper() {
            match prepare_shell_wrapper(resolved.key, resolved.site).await {
                Ok(wrapper) => Some(wrapper),
                Err(e) => {
                    debug!(tool = name, site = resolved.key, error = %e, "Shell wrapper unavailable");
                    return Ok(ToolResult::error(format!("❌ {}", e)));
                }
            }
        } else {
            None
        };

        let mut context = ToolContext::new(resolved.key, resolved.site);
        if let Some(wrapper) = &shell_wrapper {
            context = context.with_shell_wrapper(wrapper);
        }

        debug!(tool = name, site = resolved.key, "Invoking tool handler");
        match tool.handler().execute(&call, &context).await {
            Ok(result) => Ok(result),
            Err(e) if e.is_invalid_argument() => Err(DispatchError::InvalidParams(e.to_string())),
            Err(e) => {
                warn!(tool = name, site = resolved.key, code = %e.code, "Tool failed: {}", e);
                Err(DispatchError::Internal {
                    tool: name.to_string(),
                    message: e.to_string(),
                })
            }
        }
    }
}

/// Derive the site's shell wrapper and make sure its entry script exists.
async fn prepare_shell_wrapper(
    site_key: &str,
    site: &Site,
) -> Result<ShellWrapper, ShellWrapperError> {
    let wrapper = ShellWrapper::for_site(site_key, site)?;
    if let Some(file) = wrapper.entry_file() {
        let exists = tokio::fs::try_exists(file).await.unwrap_or(false);
        if !exists {
            return Err(ShellWrapperError::EntryFileMissing {
                site_key: site_key.to_string(),
                path: file.to_path_buf(),
            });
        }
    }
    Ok(wrapper)
}
