//! Plugin activation and listing over `/wp/v2/plugins`

use async_trait::async_trait;
use serde_json::{Value, json};
use wpmcp_application::ports::tool_handler::{ToolContext, ToolHandler};
use wpmcp_domain::tool::{ToolCall, ToolCategory, ToolDefinition, ToolError, ToolParameter, ToolResult};

use super::fetch_plugins;
use crate::wordpress::WpRestClient;

pub const ACTIVATE_PLUGIN: &str = "wp_api_activate_plugin";
pub const DEACTIVATE_PLUGIN: &str = "wp_api_deactivate_plugin";
pub const GET_PLUGINS: &str = "wp_api_get_plugins";

const PLUGIN_STATUSES: [&str; 3] = ["active", "inactive", "all"];

fn plugin_slug_parameter() -> ToolParameter {
    ToolParameter::new(
        "pluginSlug",
        "Plugin slug in the form directory/main-file, e.g. akismet/akismet",
        true,
    )
}

/// REST route for a plugin; WordPress identifies plugins without the `.php` suffix
fn plugin_route(slug: &str) -> String {
    format!("plugins/{}", slug.strip_suffix(".php").unwrap_or(slug))
}

async fn set_plugin_status(
    api: &WpRestClient,
    context: &ToolContext<'_>,
    slug: &str,
    status: &str,
    action: &str,
) -> Result<Value, ToolError> {
    let data = api
        .put(context.site, &plugin_route(slug), &json!({ "status": status }), action)
        .await?;
    tracing::info!(site = context.site_key, plugin = slug, status, "Plugin status changed");
    Ok(data)
}

/// `wp_api_activate_plugin`
pub struct ActivatePluginTool {
    api: WpRestClient,
}

impl ActivatePluginTool {
    pub fn new(api: WpRestClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl ToolHandler for ActivatePluginTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            ACTIVATE_PLUGIN,
            "Activates a WordPress plugin using REST API",
            ToolCategory::RestApi,
        )
        .with_parameter(plugin_slug_parameter())
    }

    async fn execute(
        &self,
        call: &ToolCall,
        context: &ToolContext<'_>,
    ) -> Result<ToolResult, ToolError> {
        let slug = call
            .require_string("pluginSlug")
            .map_err(ToolError::invalid_argument)?;
        let data = set_plugin_status(&self.api, context, slug, "active", "activate plugin").await?;

        Ok(ToolResult::text(format!("Plugin {} activated successfully.", slug))
            .with_field("pluginData", data))
    }
}

/// `wp_api_deactivate_plugin`
///
/// Only plugins that are currently active can be deactivated; anything
/// else gets the list of active plugins back.
pub struct DeactivatePluginTool {
    api: WpRestClient,
}

impl DeactivatePluginTool {
    pub fn new(api: WpRestClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl ToolHandler for DeactivatePluginTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            DEACTIVATE_PLUGIN,
            "Deactivates a WordPress plugin using REST API",
            ToolCategory::RestApi,
        )
        .with_parameter(plugin_slug_parameter())
    }

    async fn execute(
        &self,
        call: &ToolCall,
        context: &ToolContext<'_>,
    ) -> Result<ToolResult, ToolError> {
        let slug = call
            .require_string("pluginSlug")
            .map_err(ToolError::invalid_argument)?;
        let wanted = slug.strip_suffix(".php").unwrap_or(slug);

        let active = fetch_plugins(&self.api, context.site, Some("active")).await?;
        let active_slugs: Vec<&str> = active
            .iter()
            .filter_map(|p| p.get("plugin").and_then(Value::as_str))
            .collect();

        if !active_slugs.contains(&wanted) {
            return Ok(ToolResult::error(format!(
                "Plugin {} is not active or invalid. Active plugins:\n{}. Please try again with a correct plugin slug.",
                slug,
                active_slugs.join("\n")
            )));
        }

        let data =
            set_plugin_status(&self.api, context, slug, "inactive", "deactivate plugin").await?;
        Ok(ToolResult::text(format!("Plugin {} deactivated successfully.", slug))
            .with_field("pluginData", data))
    }
}

/// `wp_api_get_plugins`
pub struct GetPluginsTool {
    api: WpRestClient,
}

impl GetPluginsTool {
    pub fn new(api: WpRestClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl ToolHandler for GetPluginsTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            GET_PLUGINS,
            "Get WordPress plugins (active, inactive, or all) using REST API",
            ToolCategory::RestApi,
        )
        .with_parameter(
            ToolParameter::new("status", "Plugin status filter (default: active)", false)
                .with_allowed_values(PLUGIN_STATUSES),
        )
    }

    async fn execute(
        &self,
        call: &ToolCall,
        context: &ToolContext<'_>,
    ) -> Result<ToolResult, ToolError> {
        let status = call.get_string("status").unwrap_or("active");
        let filter = (status != "all").then_some(status);

        let plugins = fetch_plugins(&self.api, context.site, filter).await?;
        let names: Vec<&str> = plugins
            .iter()
            .filter_map(|p| p.get("name").and_then(Value::as_str))
            .collect();

        Ok(ToolResult::text(format!(
            "{} plugins:\n{}",
            capitalize(status),
            names.join(", ")
        ))
        .with_field("plugins", Value::Array(plugins)))
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
