//! Updating existing posts: status, settings and content
//!
//! Content edits go through their own tool so that a client always sees
//! the current revision before replacing it.

use async_trait::async_trait;
use serde_json::{Map, Value, json};
use wpmcp_application::ports::tool_handler::{ToolContext, ToolHandler};
use wpmcp_domain::tool::{
    ParamType, ToolCall, ToolCategory, ToolDefinition, ToolError, ToolParameter, ToolResult,
};

use super::{field_str, post_id_parameter, post_ref, post_type_parameter, rest_base_for};
use crate::wordpress::WpRestClient;

pub const UPDATE_POST_STATUS: &str = "wp_api_update_post_status";
pub const UPDATE_POST: &str = "wp_api_update_post";
pub const UPDATE_POST_CONTENT: &str = "wp_api_update_post_content";

const POST_STATUSES: [&str; 2] = ["publish", "draft"];

async fn update_post(
    api: &WpRestClient,
    context: &ToolContext<'_>,
    post_type: &str,
    post_id: i64,
    body: Value,
    action: &str,
) -> Result<Value, ToolError> {
    let rest_base = rest_base_for(api, context.site, post_type).await?;
    let post = api
        .post(context.site, &format!("{}/{}", rest_base, post_id), &body, action)
        .await?;
    tracing::info!(site = context.site_key, post_type, post_id, "Post updated ({})", action);
    Ok(post)
}

fn link(post: &Value) -> &str {
    post.get("link").and_then(Value::as_str).unwrap_or_default()
}

/// `wp_api_update_post_status`
pub struct UpdatePostStatusTool {
    api: WpRestClient,
}

impl UpdatePostStatusTool {
    pub fn new(api: WpRestClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl ToolHandler for UpdatePostStatusTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            UPDATE_POST_STATUS,
            "Update the status of an existing WordPress post, page, or custom post type item using REST API",
            ToolCategory::RestApi,
        )
        .with_parameter(post_id_parameter("ID of the post to update"))
        .with_parameter(post_type_parameter("Post type (default: posts)"))
        .with_parameter(
            ToolParameter::new("status", "Status to set (publish or draft)", true)
                .with_allowed_values(POST_STATUSES),
        )
        .with_parameter(ToolParameter::new(
            "publishDate",
            "Optional scheduled publication date in ISO 8601 format",
            false,
        ))
    }

    async fn execute(
        &self,
        call: &ToolCall,
        context: &ToolContext<'_>,
    ) -> Result<ToolResult, ToolError> {
        let (post_type, post_id) = post_ref(call)?;
        let status = call.require_string("status").map_err(ToolError::invalid_argument)?;

        let mut body = Map::new();
        body.insert("status".into(), json!(status));
        // A date only schedules publishing; drafts keep theirs
        if status == "publish"
            && let Some(date) = call.get_string("publishDate")
        {
            body.insert("date".into(), json!(date));
        }

        let post = update_post(
            &self.api,
            context,
            post_type,
            post_id,
            Value::Object(body),
            "update post status",
        )
        .await?;

        let text = format!(
            "Post status updated successfully.\nPost #ID: {}\nPost URL: {}\nPost status: {}\nPost type: {}\nPost title: {}",
            post.get("id").and_then(Value::as_i64).unwrap_or(post_id),
            link(&post),
            post.get("status").and_then(Value::as_str).unwrap_or(status),
            post.get("type").and_then(Value::as_str).unwrap_or(post_type),
            field_str(&post, "title", "rendered")
        );
        Ok(ToolResult::text(text).with_field("post", post))
    }
}

/// `wp_api_update_post`
///
/// Settings only (title, template). Content is refused.
pub struct UpdatePostTool {
    api: WpRestClient,
}

impl UpdatePostTool {
    pub fn new(api: WpRestClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl ToolHandler for UpdatePostTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            UPDATE_POST,
            "Update the settings (i.e. template, title, excerpt) of a WordPress post with post type using REST API. THIS TOOL IS NOT DESIGNED TO UPDATE POST CONTENT.",
            ToolCategory::RestApi,
        )
        .with_parameter(post_id_parameter("Post ID to update"))
        .with_parameter(post_type_parameter("Type of the post (e.g., posts, pages)"))
        .with_parameter(ToolParameter::new("template", "Optional: Post template", false))
        .with_parameter(ToolParameter::new("title", "Optional: Post title", false))
        .with_parameter(ToolParameter::new(
            "content",
            "Not accepted: use wp_api_update_post_content to change post content",
            false,
        ))
    }

    async fn execute(
        &self,
        call: &ToolCall,
        context: &ToolContext<'_>,
    ) -> Result<ToolResult, ToolError> {
        if call.arguments.contains_key("content") {
            return Err(ToolError::invalid_argument(format!(
                "Failed. To update post content use special tool: {}",
                UPDATE_POST_CONTENT
            )));
        }
        let (post_type, post_id) = post_ref(call)?;

        let mut body = Map::new();
        for key in ["title", "template"] {
            if let Some(value) = call.get_string(key) {
                body.insert(key.into(), json!(value));
            }
        }

        let post = update_post(
            &self.api,
            context,
            post_type,
            post_id,
            Value::Object(body),
            "update post",
        )
        .await?;

        Ok(ToolResult::text(format!(
            "Post settings updated successfully! Preview URL: {}.",
            link(&post)
        ))
        .with_field("post", post))
    }
}

/// `wp_api_update_post_content`
///
/// With `readCurrentContent` set nothing is written: the current rendered
/// content comes back as an error result asking for a new revision.
pub struct UpdatePostContentTool {
    api: WpRestClient,
}

impl UpdatePostContentTool {
    pub fn new(api: WpRestClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl ToolHandler for UpdatePostContentTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            UPDATE_POST_CONTENT,
            "Update the content of a WordPress post with post type using REST API",
            ToolCategory::RestApi,
        )
        .with_parameter(post_id_parameter("Post ID to update"))
        .with_parameter(post_type_parameter("Type of the post (e.g., posts, pages)"))
        .with_parameter(ToolParameter::new(
            "content",
            "Optional: New content for the post (only if content changed)",
            false,
        ))
        .with_parameter(
            ToolParameter::new(
                "readCurrentContent",
                "Determine, you need a current version of post content to update context or just update content.",
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
        let (post_type, post_id) = post_ref(call)?;
        let read_current = call.get_bool("readCurrentContent").unwrap_or(false);

        if read_current {
            let post = super::fetch_post(&self.api, context.site, post_type, post_id).await?;
            return Ok(ToolResult::error(format!(
                "Please generate a new post content from current content revision:\n\n{}",
                field_str(&post, "content", "rendered")
            )));
        }

        let content = call.get_string("content").ok_or_else(|| {
            ToolError::invalid_argument(
                "content is required when readCurrentContent is false",
            )
        })?;
        let post = update_post(
            &self.api,
            context,
            post_type,
            post_id,
            json!({ "content": content }),
            "update post content",
        )
        .await?;

        Ok(ToolResult::text(format!(
            "Post content updated successfully! Preview URL: {}.",
            link(&post)
        ))
        .with_field("post", post))
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{api, mount_post_types, site};
    use super::*;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_publish_with_date() {
        let server = MockServer::start().await;
        mount_post_types(&server).await;
        Mock::given(method("POST"))
            .and(path("/wp-json/wp/v2/posts/12"))
            .and(body_json(json!({"status": "publish", "date": "2026-11-01T09:00:00"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 12,
                "link": "http://blog.test/hello",
                "status": "future",
                "type": "post",
                "title": {"rendered": "Hello"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let site = site(&server);
        let context = ToolContext::new("blog", &site);
        let call = ToolCall::new(UPDATE_POST_STATUS)
            .with_arg("postType", "post")
            .with_arg("postId", 12)
            .with_arg("status", "publish")
            .with_arg("publishDate", "2026-11-01T09:00:00");
        let result = UpdatePostStatusTool::new(api())
            .execute(&call, &context)
            .await
            .unwrap();

        assert_eq!(
            result.text_content(),
            "Post status updated successfully.\nPost #ID: 12\nPost URL: http://blog.test/hello\nPost status: future\nPost type: post\nPost title: Hello"
        );
    }

    #[tokio::test]
    async fn test_draft_ignores_publish_date() {
        let server = MockServer::start().await;
        mount_post_types(&server).await;
        Mock::given(method("POST"))
            .and(path("/wp-json/wp/v2/posts/12"))
            .and(body_json(json!({"status": "draft"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 12})))
            .expect(1)
            .mount(&server)
            .await;

        let site = site(&server);
        let context = ToolContext::new("blog", &site);
        let call = ToolCall::new(UPDATE_POST_STATUS)
            .with_arg("postType", "post")
            .with_arg("postId", 12)
            .with_arg("status", "draft")
            .with_arg("publishDate", "2026-11-01T09:00:00");
        UpdatePostStatusTool::new(api())
            .execute(&call, &context)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_update_post_settings() {
        let server = MockServer::start().await;
        mount_post_types(&server).await;
        Mock::given(method("POST"))
            .and(path("/wp-json/wp/v2/pages/3"))
            .and(body_json(json!({"title": "About us"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 3, "link": "http://blog.test/about"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let site = site(&server);
        let context = ToolContext::new("blog", &site);
        let call = ToolCall::new(UPDATE_POST)
            .with_arg("postType", "page")
            .with_arg("postId", 3)
            .with_arg("title", "About us");
        let result = UpdatePostTool::new(api()).execute(&call, &context).await.unwrap();

        assert_eq!(
            result.text_content(),
            "Post settings updated successfully! Preview URL: http://blog.test/about."
        );
    }

    #[tokio::test]
    async fn test_update_post_refuses_content() {
        let server = MockServer::start().await;
        let site = site(&server);
        let context = ToolContext::new("blog", &site);
        let call = ToolCall::new(UPDATE_POST)
            .with_arg("postType", "page")
            .with_arg("postId", 3)
            .with_arg("content", "<p>new</p>");
        let err = UpdatePostTool::new(api())
            .execute(&call, &context)
            .await
            .unwrap_err();

        assert!(err.is_invalid_argument());
        assert_eq!(
            err.message,
            "Failed. To update post content use special tool: wp_api_update_post_content"
        );
    }

    #[tokio::test]
    async fn test_read_current_content_returns_revision() {
        let server = MockServer::start().await;
        mount_post_types(&server).await;
        Mock::given(method("GET"))
            .and(path("/wp-json/wp/v2/posts/8"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 8, "content": {"rendered": "<p>Old</p>"}
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let site = site(&server);
        let context = ToolContext::new("blog", &site);
        let call = ToolCall::new(UPDATE_POST_CONTENT)
            .with_arg("postType", "post")
            .with_arg("postId", 8)
            .with_arg("readCurrentContent", true)
            .with_arg("content", "<p>New</p>");
        let result = UpdatePostContentTool::new(api())
            .execute(&call, &context)
            .await
            .unwrap();

        assert!(result.is_error());
        assert_eq!(
            result.text_content(),
            "Please generate a new post content from current content revision:\n\n<p>Old</p>"
        );
    }

    #[tokio::test]
    async fn test_update_content() {
        let server = MockServer::start().await;
        mount_post_types(&server).await;
        Mock::given(method("POST"))
            .and(path("/wp-json/wp/v2/posts/8"))
            .and(body_json(json!({"content": "<p>New</p>"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 8, "link": "http://blog.test/?p=8"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let site = site(&server);
        let context = ToolContext::new("blog", &site);
        let call = ToolCall::new(UPDATE_POST_CONTENT)
            .with_arg("postType", "post")
            .with_arg("postId", 8)
            .with_arg("readCurrentContent", false)
            .with_arg("content", "<p>New</p>");
        let result = UpdatePostContentTool::new(api())
            .execute(&call, &context)
            .await
            .unwrap();

        assert_eq!(
            result.text_content(),
            "Post content updated successfully! Preview URL: http://blog.test/?p=8."
        );
    }
}
