//! Reading, creating and deleting posts of any post type

use async_trait::async_trait;
use serde_json::{Map, Value, json};
use wpmcp_application::ports::tool_handler::{ToolContext, ToolHandler};
use wpmcp_domain::tool::{
    ParamType, ToolCall, ToolCategory, ToolDefinition, ToolError, ToolParameter, ToolResult,
};

use super::{
    fetch_post, fetch_post_types, fetch_templates, field_str, post_id_parameter, post_ref,
    post_type_parameter, pretty, rest_base_for, templates_list,
};
use crate::wordpress::WpRestClient;

pub const GET_POSTS: &str = "wp_api_get_posts";
pub const GET_POST: &str = "wp_api_get_post";
pub const GET_POST_PREVIEW_LINK: &str = "wp_api_get_post_preview_link";
pub const CREATE_POST: &str = "wp_api_create_post";
pub const DELETE_POST: &str = "wp_api_delete_post";

const DEFAULT_PER_PAGE: i64 = 10;
const DEFAULT_PAGE: i64 = 1;

/// `wp_api_get_posts`
///
/// `postType` is used as the route as given (`posts`, `pages`, ...).
pub struct GetPostsTool {
    api: WpRestClient,
}

impl GetPostsTool {
    pub fn new(api: WpRestClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl ToolHandler for GetPostsTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            GET_POSTS,
            "Retrieve a list of posts, pages, or custom post type items using REST API",
            ToolCategory::RestApi,
        )
        .with_parameter(post_type_parameter("Post type (default: posts)"))
        .with_parameter(
            ToolParameter::new("perPage", "Number of posts to retrieve (default: 10)", false)
                .with_type(ParamType::Integer),
        )
        .with_parameter(
            ToolParameter::new("page", "Page number for pagination (default: 1)", false)
                .with_type(ParamType::Integer),
        )
    }

    async fn execute(
        &self,
        call: &ToolCall,
        context: &ToolContext<'_>,
    ) -> Result<ToolResult, ToolError> {
        let post_type = call
            .require_string("postType")
            .map_err(ToolError::invalid_argument)?;
        let per_page = call.get_i64("perPage").unwrap_or(DEFAULT_PER_PAGE);
        let page = call.get_i64("page").unwrap_or(DEFAULT_PAGE);

        let posts = self
            .api
            .get_with_query(
                context.site,
                post_type,
                &[("per_page", per_page.to_string()), ("page", page.to_string())],
                "retrieve posts",
            )
            .await?;

        Ok(ToolResult::text(format!(
            "Posts retrieved successfully.\n\nPosts: {}",
            pretty(&posts)
        ))
        .with_field("posts", posts))
    }
}

/// `wp_api_get_post`
pub struct GetPostTool {
    api: WpRestClient,
}

impl GetPostTool {
    pub fn new(api: WpRestClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl ToolHandler for GetPostTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            GET_POST,
            "Retrieve a single post, page, or custom post type item using REST API",
            ToolCategory::RestApi,
        )
        .with_parameter(post_type_parameter("Post type (default: posts)"))
        .with_parameter(post_id_parameter("Post ID to retrieve"))
    }

    async fn execute(
        &self,
        call: &ToolCall,
        context: &ToolContext<'_>,
    ) -> Result<ToolResult, ToolError> {
        let (post_type, post_id) = post_ref(call)?;
        let post = fetch_post(&self.api, context.site, post_type, post_id).await?;

        Ok(ToolResult::text(format!(
            "Post retrieved successfully.\n\nPost: {}",
            pretty(&post)
        ))
        .with_field("post", post))
    }
}

/// `wp_api_get_post_preview_link`
pub struct GetPostPreviewLinkTool {
    api: WpRestClient,
}

impl GetPostPreviewLinkTool {
    pub fn new(api: WpRestClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl ToolHandler for GetPostPreviewLinkTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            GET_POST_PREVIEW_LINK,
            "Retrieve a preview link for single post, page, or custom post type item using REST API. Especially for draft status.",
            ToolCategory::RestApi,
        )
        .with_parameter(post_type_parameter("Post type (default: posts)"))
        .with_parameter(post_id_parameter("Post ID to retrieve"))
    }

    async fn execute(
        &self,
        call: &ToolCall,
        context: &ToolContext<'_>,
    ) -> Result<ToolResult, ToolError> {
        let (post_type, post_id) = post_ref(call)?;
        let post = fetch_post(&self.api, context.site, post_type, post_id).await?;

        let guid = field_str(&post, "guid", "rendered");
        if guid.is_empty() {
            return Err(ToolError::execution_failed(format!(
                "Post {} has no guid to build a preview link from",
                post_id
            )));
        }
        let preview_link = format!("{}&preview=true", guid);

        Ok(ToolResult::text(format!(
            "Post preview link retrieved successfully. Remember it is only for logged in user with proper permissions.\nURL: {}",
            preview_link
        ))
        .with_field("previewLink", preview_link))
    }
}

/// `wp_api_create_post`
///
/// New posts are always drafts. A `template` must be one the site offers
/// for the post type.
pub struct CreatePostTool {
    api: WpRestClient,
}

impl CreatePostTool {
    pub fn new(api: WpRestClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl ToolHandler for CreatePostTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            CREATE_POST,
            "Create a WordPress post, page or custom post type item using REST API",
            ToolCategory::RestApi,
        )
        .with_parameter(post_type_parameter("Post type (default: pages)"))
        .with_parameter(ToolParameter::new("title", "Post title", true))
        .with_parameter(ToolParameter::new("content", "Post content", false))
        .with_parameter(
            ToolParameter::new("parent", "Post parent ID", false).with_type(ParamType::Integer),
        )
        .with_parameter(ToolParameter::new("template", "Optional: Post template", false))
    }

    async fn execute(
        &self,
        call: &ToolCall,
        context: &ToolContext<'_>,
    ) -> Result<ToolResult, ToolError> {
        let post_type = call
            .require_string("postType")
            .map_err(ToolError::invalid_argument)?;
        let title = call.require_string("title").map_err(ToolError::invalid_argument)?;
        let site = context.site;

        let rest_base = rest_base_for(&self.api, site, post_type).await?;

        let mut body = Map::new();
        body.insert("title".into(), json!(title));
        body.insert("status".into(), json!("draft"));
        if let Some(content) = call.get_string("content") {
            body.insert("content".into(), json!(content));
        }
        if let Some(parent) = call.get_i64("parent") {
            body.insert("parent".into(), json!(parent));
        }
        if let Some(template) = call.get_string("template") {
            let templates = fetch_templates(&self.api, site, post_type).await?;
            let known = templates.as_array().is_some_and(|all| {
                all.iter()
                    .any(|t| t.get("slug").and_then(Value::as_str) == Some(template))
            });
            if !known {
                return Err(ToolError::execution_failed(format!(
                    "Invalid template.\nUse one of the following:\n{}",
                    templates_list(&templates).join("\n")
                )));
            }
            body.insert("template".into(), json!(template));
        }

        let post = match self
            .api
            .post(site, &rest_base, &Value::Object(body), "create post")
            .await
        {
            Ok(post) => post,
            Err(err) if err.is_no_route() => {
                let types = fetch_post_types(&self.api, site).await?;
                let keys: Vec<&str> = types
                    .as_object()
                    .map(|t| t.keys().map(String::as_str).collect())
                    .unwrap_or_default();
                return Ok(ToolResult::error(format!(
                    "Probably {} is invalid.\nUsed REST API URL: {}.\nPlease select a proper post type from a list: {}.",
                    post_type,
                    err.url().unwrap_or_default(),
                    keys.join(", ")
                )));
            }
            Err(err) => return Err(err.into()),
        };

        tracing::info!(
            site = context.site_key,
            post_type,
            id = post.get("id").and_then(serde_json::Value::as_i64),
            "Post created"
        );
        Ok(ToolResult::text(format!(
            "Post created successfully.\n\nPost: {}",
            pretty(&post)
        ))
        .with_field("post", post))
    }
}

/// `wp_api_delete_post`
pub struct DeletePostTool {
    api: WpRestClient,
}

impl DeletePostTool {
    pub fn new(api: WpRestClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl ToolHandler for DeletePostTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            DELETE_POST,
            "Deletes a WordPress post, page, or any custom post type using REST API",
            ToolCategory::RestApi,
        )
        .with_parameter(post_type_parameter(
            "Type of the post (e.g., post, page, custom type)",
        ))
        .with_parameter(post_id_parameter("ID of the post to delete"))
        .with_parameter(
            ToolParameter::new("force", "Whether to force delete the post", false)
                .with_type(ParamType::Boolean),
        )
    }

    async fn execute(
        &self,
        call: &ToolCall,
        context: &ToolContext<'_>,
    ) -> Result<ToolResult, ToolError> {
        let (post_type, post_id) = post_ref(call)?;
        let force = call.get_bool("force").unwrap_or(false);

        let rest_base = rest_base_for(&self.api, context.site, post_type).await?;
        let data = self
            .api
            .delete(
                context.site,
                &format!("{}/{}", rest_base, post_id),
                &[("force", force.to_string())],
                "delete post",
            )
            .await?;

        tracing::info!(site = context.site_key, post_type, post_id, force, "Post deleted");
        Ok(ToolResult::text(format!(
            "Post {} ({}) deleted successfully.",
            post_id, post_type
        ))
        .with_field("post", data))
    }
}
