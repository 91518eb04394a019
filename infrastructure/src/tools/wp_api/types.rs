//! Post types, their REST bases and page templates

use async_trait::async_trait;
use wpmcp_application::ports::tool_handler::{ToolContext, ToolHandler};
use wpmcp_domain::tool::{ToolCall, ToolCategory, ToolDefinition, ToolError, ToolResult};

use super::{
    fetch_post_types, fetch_templates, post_type_parameter, post_types_list, rest_base_for,
    templates_list,
};
use crate::wordpress::WpRestClient;

pub const GET_POST_TYPES: &str = "wp_api_get_post_types";
pub const GET_REST_BASE: &str = "wp_api_get_rest_base_for_post_type";
pub const GET_TEMPLATES: &str = "wp_api_get_templates";

/// `wp_api_get_post_types`
pub struct GetPostTypesTool {
    api: WpRestClient,
}

impl GetPostTypesTool {
    pub fn new(api: WpRestClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl ToolHandler for GetPostTypesTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            GET_POST_TYPES,
            "Get a WordPress post types using REST API",
            ToolCategory::RestApi,
        )
    }

    async fn execute(
        &self,
        _call: &ToolCall,
        context: &ToolContext<'_>,
    ) -> Result<ToolResult, ToolError> {
        let types = fetch_post_types(&self.api, context.site).await?;
        Ok(ToolResult::text(format!(
            "Available post types:\n{}",
            post_types_list(&types).join("\n")
        ))
        .with_field("postTypes", types))
    }
}

/// `wp_api_get_rest_base_for_post_type`
pub struct GetRestBaseTool {
    api: WpRestClient,
}

impl GetRestBaseTool {
    pub fn new(api: WpRestClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl ToolHandler for GetRestBaseTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            GET_REST_BASE,
            "Get a WordPress REST API base for post type to use in REST API",
            ToolCategory::RestApi,
        )
        .with_parameter(post_type_parameter("Post type (default: page)"))
    }

    async fn execute(
        &self,
        call: &ToolCall,
        context: &ToolContext<'_>,
    ) -> Result<ToolResult, ToolError> {
        let post_type = call
            .require_string("postType")
            .map_err(ToolError::invalid_argument)?;
        let rest_base = rest_base_for(&self.api, context.site, post_type).await?;

        Ok(ToolResult::text(format!(
            "API REST base for post type: {} is a: \n{}",
            post_type, rest_base
        ))
        .with_field("restBase", rest_base))
    }
}

/// `wp_api_get_templates`
pub struct GetTemplatesTool {
    api: WpRestClient,
}

impl GetTemplatesTool {
    pub fn new(api: WpRestClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl ToolHandler for GetTemplatesTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            GET_TEMPLATES,
            "Get available templates for a specific post type in WordPress",
            ToolCategory::RestApi,
        )
        .with_parameter(post_type_parameter("The post type to fetch templates for"))
    }

    async fn execute(
        &self,
        call: &ToolCall,
        context: &ToolContext<'_>,
    ) -> Result<ToolResult, ToolError> {
        let post_type = call
            .require_string("postType")
            .map_err(ToolError::invalid_argument)?;
        let templates = fetch_templates(&self.api, context.site, post_type).await?;
        let list = templates_list(&templates);

        Ok(ToolResult::text(format!(
            "Available templates for post type \"{}\":\n\n{}",
            post_type,
            list.join("\n")
        ))
        .with_field("templates", templates))
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{api, mount_post_types, site};
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_get_post_types() {
        let server = MockServer::start().await;
        mount_post_types(&server).await;

        let site = site(&server);
        let context = ToolContext::new("blog", &site);
        let result = GetPostTypesTool::new(api())
            .execute(&ToolCall::new(GET_POST_TYPES), &context)
            .await
            .unwrap();

        assert_eq!(
            result.text_content(),
            "Available post types:\n1. Pages (slug: page)\n2. Posts (slug: post)"
        );
        assert_eq!(result.structured["postTypes"]["post"]["rest_base"], "posts");
    }

    #[tokio::test]
    async fn test_get_rest_base() {
        let server = MockServer::start().await;
        mount_post_types(&server).await;

        let site = site(&server);
        let context = ToolContext::new("blog", &site);
        let call = ToolCall::new(GET_REST_BASE).with_arg("postType", "page");
        let result = GetRestBaseTool::new(api()).execute(&call, &context).await.unwrap();

        assert_eq!(
            result.text_content(),
            "API REST base for post type: page is a: \npages"
        );
        assert_eq!(result.structured["restBase"], "pages");
    }

    #[tokio::test]
    async fn test_get_templates() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/wp-json/wp/v2/templates"))
            .and(query_param("post_type", "page"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"slug": "page-no-title", "title": {"raw": "Page No Title"}},
                {"slug": "blank", "title": {"raw": "Blank"}},
            ])))
            .mount(&server)
            .await;

        let site = site(&server);
        let context = ToolContext::new("blog", &site);
        let call = ToolCall::new(GET_TEMPLATES).with_arg("postType", "page");
        let result = GetTemplatesTool::new(api()).execute(&call, &context).await.unwrap();

        assert_eq!(
            result.text_content(),
            "Available templates for post type \"page\":\n\n1. Page No Title (slug: page-no-title)\n2. Blank (slug: blank)"
        );
    }
}
