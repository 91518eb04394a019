//! `wp_api_get_gutenberg_blocks`: block types registered on the site

use async_trait::async_trait;
use wpmcp_application::ports::tool_handler::{ToolContext, ToolHandler};
use wpmcp_domain::tool::{ToolCall, ToolCategory, ToolDefinition, ToolError, ToolResult};

use super::pretty;
use crate::wordpress::WpRestClient;

pub const GET_GUTENBERG_BLOCKS: &str = "wp_api_get_gutenberg_blocks";

pub struct GetGutenbergBlocksTool {
    api: WpRestClient,
}

impl GetGutenbergBlocksTool {
    pub fn new(api: WpRestClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl ToolHandler for GetGutenbergBlocksTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            GET_GUTENBERG_BLOCKS,
            "Get available Gutenberg blocks for the WordPress site",
            ToolCategory::RestApi,
        )
    }

    async fn execute(
        &self,
        _call: &ToolCall,
        context: &ToolContext<'_>,
    ) -> Result<ToolResult, ToolError> {
        let blocks = self
            .api
            .get(context.site, "block-types", "get Gutenberg blocks")
            .await?;

        Ok(ToolResult::text(format!(
            "Available Gutenberg blocks:\n{}",
            pretty(&blocks)
        ))
        .with_field("blocks", blocks))
    }
}
