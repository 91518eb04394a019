//! Block build tools: `wp_build_block`, `wp_scaffold_block`
//!
//! Both shell out to the Node toolchain (`npm`, `npx`) through a
//! [`CommandRunner`]. [`BlockBuilder`] is also used by the edit tools to
//! rebuild a block after changing its sources.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use wpmcp_application::ports::tool_handler::{ToolContext, ToolHandler};
use wpmcp_domain::core::string::truncate_head;
use wpmcp_domain::tool::{ToolCall, ToolCategory, ToolDefinition, ToolError, ToolParameter, ToolResult};

use super::filesystem::relative_path;
use super::process::CommandRunner;

pub const BUILD_BLOCK: &str = "wp_build_block";
pub const SCAFFOLD_BLOCK: &str = "wp_scaffold_block";

/// How much raw output to quote when a command fails
const MAX_ERROR_OUTPUT: usize = 4000;

const NPM_INSTALL_ARGS: [&str; 4] = ["install", "--no-audit", "--no-fund", "--silent"];
const NPM_BUILD_ARGS: [&str; 2] = ["run", "build"];

/// Installs dependencies and runs `npm run build` for one block plugin
#[derive(Debug, Clone)]
pub struct BlockBuilder {
    runner: CommandRunner,
    npm: String,
}

impl BlockBuilder {
    pub fn new(runner: CommandRunner, npm: impl Into<String>) -> Self {
        Self {
            runner,
            npm: npm.into(),
        }
    }

    /// Build the block in `block_dir`, returning a human-readable summary.
    pub async fn build(&self, block_dir: &Path, name: &str) -> Result<String, ToolError> {
        tracing::info!(block = name, dir = %block_dir.display(), "Installing block dependencies");
        let install = self.runner.run(&self.npm, &NPM_INSTALL_ARGS, block_dir).await?;
        if !install.success() {
            return Err(ToolError::execution_failed(format!(
                "npm install failed: {}",
                truncate_head(install.combined().trim(), MAX_ERROR_OUTPUT)
            )));
        }

        tracing::info!(block = name, "Building block");
        let build = self.runner.run(&self.npm, &NPM_BUILD_ARGS, block_dir).await?;
        let output = build.combined();
        if !build.success() {
            let mut details = filter_lines(&output, &["error", "failed", "webpack"]);
            if details.is_empty() {
                details = truncate_head(output.trim(), MAX_ERROR_OUTPUT);
            }
            return Err(ToolError::execution_failed(format!("Build failed:\n{}", details)));
        }

        Ok(format!(
            "✅ Block \"{}\" built successfully!\n\nBuild summary:\n{}",
            name,
            filter_lines(&output, &["webpack", "compiled", "error", "warning"])
        ))
    }
}

/// Lines of `output` containing any of `needles`
fn filter_lines(output: &str, needles: &[&str]) -> String {
    output
        .lines()
        .filter(|line| needles.iter().any(|n| line.contains(n)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// `wp_build_block`
pub struct BuildBlockTool {
    builder: BlockBuilder,
}

impl BuildBlockTool {
    pub fn new(builder: BlockBuilder) -> Self {
        Self { builder }
    }
}

#[async_trait]
impl ToolHandler for BuildBlockTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            BUILD_BLOCK,
            "Builds a Gutenberg block using npm run build",
            ToolCategory::Build,
        )
        .with_parameter(ToolParameter::new(
            "blockPluginDirname",
            "Block plugin directory name (inside the site's plugins directory)",
            true,
        ))
    }

    async fn execute(
        &self,
        call: &ToolCall,
        context: &ToolContext<'_>,
    ) -> Result<ToolResult, ToolError> {
        let dirname = call
            .require_string("blockPluginDirname")
            .map_err(ToolError::invalid_argument)?;
        let block_dir = context
            .site
            .plugins_path
            .join(relative_path("blockPluginDirname", dirname)?);
        if !block_dir.is_dir() {
            return Err(ToolError::new(
                ToolError::NOT_FOUND,
                format!("Block directory {} not exists.", block_dir.display()),
            ));
        }

        let summary = self.builder.build(&block_dir, dirname).await?;
        Ok(ToolResult::text(summary))
    }
}

/// `wp_scaffold_block`
pub struct ScaffoldBlockTool {
    runner: CommandRunner,
    npx: String,
}

impl ScaffoldBlockTool {
    pub fn new(runner: CommandRunner, npx: impl Into<String>) -> Self {
        Self {
            runner,
            npx: npx.into(),
        }
    }
}

#[async_trait]
impl ToolHandler for ScaffoldBlockTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            SCAFFOLD_BLOCK,
            "Creates a new Gutenberg block using @wordpress/create-block",
            ToolCategory::Build,
        )
        .with_parameter(ToolParameter::new("name", "Block name", true))
        .with_parameter(ToolParameter::new(
            "directory",
            "Optional: Custom directory path (default: the site's plugins directory)",
            false,
        ))
    }

    async fn execute(
        &self,
        call: &ToolCall,
        context: &ToolContext<'_>,
    ) -> Result<ToolResult, ToolError> {
        let name = call.require_string("name").map_err(ToolError::invalid_argument)?;
        if name.trim().is_empty() || name.contains(['/', '\\']) {
            return Err(ToolError::invalid_argument(format!(
                "Invalid block name: \"{}\"",
                name
            )));
        }

        let directory: PathBuf = match call.get_string("directory") {
            Some(dir) => context.site.plugins_path.join(dir),
            None => context.site.plugins_path.clone(),
        };

        let output = self
            .runner
            .run(&self.npx, &["--yes", "@wordpress/create-block", name], &directory)
            .await
            .map_err(|e| ToolError::execution_failed(format!("Failed to create block: {}", e)))?;
        if !output.success() {
            return Err(ToolError::execution_failed(format!(
                "Failed to create block: {}",
                truncate_head(output.combined().trim(), MAX_ERROR_OUTPUT)
            )));
        }

        Ok(ToolResult::text(format!(
            "Block \"{}\" created successfully in {}.\n\nRemember to activate plugin: \"{}\" in WordPress. Output:\n{}",
            name,
            directory.display(),
            name,
            output.stdout
        )))
    }
}
