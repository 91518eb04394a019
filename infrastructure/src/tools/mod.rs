//! Tool handlers exposed by the server
//!
//! Handlers are grouped by what they touch:
//! - `filesystem`: plugin directories and block sources on disk
//! - `build`: npm / npx in a block plugin
//! - `wp_api`: the site's WordPress REST API
//! - `wp_cli`: WP-CLI through the site's shell wrapper
//!
//! [`default_registry`] assembles the full catalog in the order it is
//! listed to clients.

pub mod build;
pub mod filesystem;
pub mod process;
pub mod schema;
pub mod wp_api;
pub mod wp_cli;

use thiserror::Error;
use wpmcp_application::{RegistryError, ToolRegistry};

use crate::config::{FileCommandsConfig, FileHttpConfig};
use crate::wordpress::{WpApiError, WpRestClient};

pub use build::{BlockBuilder, BuildBlockTool, ScaffoldBlockTool};
pub use filesystem::{EditBlockFileTool, EditBlockJsonTool, ListAvailablePluginsTool, ListPluginFilesTool};
pub use process::{CommandOutput, CommandRunner};
pub use schema::JsonSchemaToolConverter;
pub use wp_cli::InstallAndActivatePluginTool;

#[derive(Error, Debug)]
pub enum ToolSetupError {
    #[error(transparent)]
    Http(#[from] WpApiError),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Build the registry of every tool the server offers.
pub fn default_registry(
    http: &FileHttpConfig,
    commands: &FileCommandsConfig,
) -> Result<ToolRegistry, ToolSetupError> {
    let api = WpRestClient::new(http)?;
    let runner = CommandRunner::new(commands.timeout());
    let builder = BlockBuilder::new(runner.clone(), commands.npm.as_str());

    let registry = ToolRegistry::builder()
        .register(EditBlockFileTool::new(builder.clone()))
        .register(ScaffoldBlockTool::new(runner.clone(), commands.npx.as_str()))
        .register(ListPluginFilesTool)
        .register(ListAvailablePluginsTool)
        .register(BuildBlockTool::new(builder.clone()))
        .register(EditBlockJsonTool::new(builder))
        .register(wp_api::ActivatePluginTool::new(api.clone()))
        .register(wp_api::DeactivatePluginTool::new(api.clone()))
        .register(wp_api::CreatePostTool::new(api.clone()))
        .register(wp_api::DeletePostTool::new(api.clone()))
        .register(wp_api::UpdatePostStatusTool::new(api.clone()))
        .register(wp_api::GetPostsTool::new(api.clone()))
        .register(wp_api::GetPostTool::new(api.clone()))
        .register(wp_api::GetPostTypesTool::new(api.clone()))
        .register(wp_api::GetPluginsTool::new(api.clone()))
        .register(wp_api::UpdatePostTool::new(api.clone()))
        .register(wp_api::GetGutenbergBlocksTool::new(api.clone()))
        .register(wp_api::GetTemplatesTool::new(api.clone()))
        .register(wp_api::GetRestBaseTool::new(api.clone()))
        .register(wp_api::UpdatePostContentTool::new(api.clone()))
        .register(wp_api::GetSiteSettingsTool::new(api.clone()))
        .register(wp_api::UpdateSiteSettingTool::string(api.clone()))
        .register(wp_api::UpdateSiteSettingTool::integer(api.clone()))
        .register(wp_api::GetPostPreviewLinkTool::new(api))
        .register(InstallAndActivatePluginTool::new(runner))
        .build()?;

    tracing::debug!(tools = registry.len(), "Tool registry ready");
    Ok(registry)
}
