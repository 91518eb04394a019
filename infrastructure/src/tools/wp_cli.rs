//! `wp_cli_install_and_activate_plugin`: WP-CLI through the site's shell wrapper

use async_trait::async_trait;
use wpmcp_application::ports::tool_handler::{ToolContext, ToolHandler};
use wpmcp_domain::core::string::truncate_head;
use wpmcp_domain::tool::{ToolCall, ToolCategory, ToolDefinition, ToolError, ToolParameter, ToolResult};

use super::process::CommandRunner;

pub const INSTALL_AND_ACTIVATE_PLUGIN: &str = "wp_cli_install_and_activate_plugin";

const MAX_ERROR_OUTPUT: usize = 4000;

/// Slugs end up inside a shell command line, so only the characters
/// wordpress.org slugs are made of are let through.
fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.starts_with('-')
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '-' | '_' | '.'))
}

pub struct InstallAndActivatePluginTool {
    runner: CommandRunner,
}

impl InstallAndActivatePluginTool {
    pub fn new(runner: CommandRunner) -> Self {
        Self { runner }
    }
}

#[async_trait]
impl ToolHandler for InstallAndActivatePluginTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            INSTALL_AND_ACTIVATE_PLUGIN,
            "Installs and activates a specified WordPress plugin via WP-CLI.",
            ToolCategory::WpCli,
        )
        .with_parameter(ToolParameter::new(
            "pluginSlug",
            "Plugin slug to install and activate.",
            true,
        ))
    }

    async fn execute(
        &self,
        call: &ToolCall,
        context: &ToolContext<'_>,
    ) -> Result<ToolResult, ToolError> {
        let slug = call
            .require_string("pluginSlug")
            .map_err(ToolError::invalid_argument)?;
        if !is_valid_slug(slug) {
            return Err(ToolError::invalid_argument(format!(
                "Invalid plugin slug: \"{}\". Use the wordpress.org slug (lowercase letters, digits, '-', '_' and '.').",
                slug
            )));
        }

        let wrapper = context.require_shell_wrapper()?;
        let command_line = wrapper.wrap(&format!("wp plugin install {} --activate", slug));
        tracing::info!(site = context.site_key, plugin = slug, "Installing plugin with WP-CLI");

        let output = self.runner.run_shell(&command_line, &context.site.path).await?;
        if !output.success() {
            return Err(ToolError::execution_failed(format!(
                "WP-CLI exited with code {}: {}",
                output.exit_code,
                truncate_head(output.combined().trim(), MAX_ERROR_OUTPUT)
            )));
        }

        Ok(ToolResult::text(format!(
            "✅ Plugin '{}' was installed and activated. Output from WP-CLI:\n\n{}",
            slug, output.stdout
        )))
    }
}
