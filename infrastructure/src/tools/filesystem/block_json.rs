//! `wp_edit_block_json_file`: replace a block's `block.json`

use async_trait::async_trait;
use serde_json::Value;
use wpmcp_application::ports::tool_handler::{ToolContext, ToolHandler};
use wpmcp_domain::tool::{
    ParamType, ToolCall, ToolCategory, ToolDefinition, ToolError, ToolParameter, ToolResult,
};

use super::{block_plugin_dir, relative_path};
use crate::tools::build::BlockBuilder;

pub const EDIT_BLOCK_JSON_FILE: &str = "wp_edit_block_json_file";

/// `wp_edit_block_json_file`
///
/// Nothing is written until the caller repeats the request with
/// `areYouSure: true`; the first answer echoes the new content back as an
/// error result so the client can confirm.
pub struct EditBlockJsonTool {
    builder: BlockBuilder,
}

impl EditBlockJsonTool {
    pub fn new(builder: BlockBuilder) -> Self {
        Self { builder }
    }
}

#[async_trait]
impl ToolHandler for EditBlockJsonTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            EDIT_BLOCK_JSON_FILE,
            "Edits a file: block.json in WordPress Gutenberg Block Plugin with automatic rebuild detection and block.json file validation.",
            ToolCategory::Filesystem,
        )
        .with_parameter(ToolParameter::new(
            "blockPluginDirname",
            "Block plugin directory name.",
            true,
        ))
        .with_parameter(ToolParameter::new(
            "filePath",
            "Path to the block.json file relative to the plugin root.",
            true,
        ))
        .with_parameter(ToolParameter::new(
            "content",
            "New content for the block.json file",
            true,
        ))
        .with_parameter(
            ToolParameter::new(
                "areYouSure",
                "Are you sure about this changes from new content?",
                true,
            )
            .with_type(ParamType::Boolean),
        )
    }

    async fn execute(
        &self,
        call: &ToolCall,
        context: &ToolContext<'_>,
    ) -> Result<ToolResult, ToolError> {
        let dirname = call
            .require_string("blockPluginDirname")
            .map_err(ToolError::invalid_argument)?;
        let file_path = call
            .require_string("filePath")
            .map_err(ToolError::invalid_argument)?;
        let content = call
            .require_string("content")
            .map_err(ToolError::invalid_argument)?;
        let are_you_sure = call.get_bool("areYouSure").unwrap_or(false);

        let block_dir = block_plugin_dir(&context.site.plugins_path, dirname).await?;
        let full_path = block_dir.join(relative_path("filePath", file_path)?);
        if !file_path.ends_with("block.json") {
            return Err(ToolError::invalid_argument(format!(
                "this tool can only edit block.json file. Are you sure {} is valid for this action?",
                full_path.display()
            )));
        }
        if !full_path.is_file() {
            return Err(ToolError::new(
                ToolError::NOT_FOUND,
                format!("File block.json not found: {}.", full_path.display()),
            ));
        }

        let parsed: Value = serde_json::from_str(content).map_err(|e| {
            ToolError::invalid_argument(format!("New content cannot be parsed: {}", content))
                .with_details(e.to_string())
        })?;

        if !are_you_sure {
            let pretty = serde_json::to_string_pretty(&parsed).unwrap_or_else(|_| content.to_string());
            return Ok(ToolResult::error(format!(
                "Are you sure to make changes to block.json file within {}\nNew content:\n{}",
                full_path.display(),
                pretty
            )));
        }

        tokio::fs::write(&full_path, content).await.map_err(|e| {
            ToolError::execution_failed(format!("Failed to write block.json file: {}", e))
        })?;
        tracing::info!(file = %full_path.display(), "block.json edited");

        match self.builder.build(&block_dir, dirname).await {
            Ok(summary) => Ok(ToolResult::text(format!(
                "block.json file: {} edited successfully.\n\nBuild output:\n{}",
                full_path.display(),
                summary
            ))),
            Err(e) => Err(ToolError::execution_failed(format!(
                "block.json file: {} edited but build failed: {}. Please try build again or check error logs on your own.",
                full_path.display(),
                e
            ))),
        }
    }
}
