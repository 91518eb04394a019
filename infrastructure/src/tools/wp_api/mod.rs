//! Tools backed by the WordPress REST API (`wp/v2`)
//!
//! Every tool holds a clone of the shared [`WpRestClient`] and takes the
//! target site from the [`ToolContext`](wpmcp_application::ports::tool_handler::ToolContext).
//! The helpers below are the lookups several tools share: post types and
//! their REST bases, templates, plugins and single posts.

pub mod blocks;
pub mod plugins;
pub mod post_updates;
pub mod posts;
pub mod settings;
pub mod types;

use serde_json::Value;
use wpmcp_domain::Site;
use wpmcp_domain::tool::{ParamType, ToolCall, ToolError, ToolParameter};

use crate::wordpress::{WpApiError, WpRestClient};

pub use blocks::GetGutenbergBlocksTool;
pub use plugins::{ActivatePluginTool, DeactivatePluginTool, GetPluginsTool};
pub use post_updates::{UpdatePostContentTool, UpdatePostStatusTool, UpdatePostTool};
pub use posts::{CreatePostTool, DeletePostTool, GetPostPreviewLinkTool, GetPostTool, GetPostsTool};
pub use settings::{GetSiteSettingsTool, UpdateSiteSettingTool};
pub use types::{GetPostTypesTool, GetRestBaseTool, GetTemplatesTool};

pub(crate) fn post_type_parameter(description: &str) -> ToolParameter {
    ToolParameter::new("postType", description, true)
}

pub(crate) fn post_id_parameter(description: &str) -> ToolParameter {
    ToolParameter::new("postId", description, true).with_type(ParamType::Integer)
}

/// `postType` and `postId` of a call addressing a single post
pub(crate) fn post_ref(call: &ToolCall) -> Result<(&str, i64), ToolError> {
    let post_type = call
        .require_string("postType")
        .map_err(ToolError::invalid_argument)?;
    let post_id = call.require_i64("postId").map_err(ToolError::invalid_argument)?;
    Ok((post_type, post_id))
}

/// `{"rendered": ...}` / `{"raw": ...}` style field of a REST object
pub(crate) fn field_str<'a>(value: &'a Value, field: &str, inner: &str) -> &'a str {
    value
        .get(field)
        .and_then(|f| f.get(inner))
        .and_then(Value::as_str)
        .unwrap_or_default()
}

pub(crate) fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

pub(crate) async fn fetch_post_types(api: &WpRestClient, site: &Site) -> Result<Value, WpApiError> {
    api.get(site, "types", "get post types").await
}

/// `1. Posts (slug: post)` lines for a `/types` answer
pub(crate) fn post_types_list(types: &Value) -> Vec<String> {
    types
        .as_object()
        .map(|types| {
            types
                .values()
                .enumerate()
                .map(|(i, t)| {
                    format!(
                        "{}. {} (slug: {})",
                        i + 1,
                        t.get("name").and_then(Value::as_str).unwrap_or_default(),
                        t.get("slug").and_then(Value::as_str).unwrap_or_default()
                    )
                })
                .collect()
        })
        .unwrap_or_default()
}

/// REST base (`posts`, `pages`, ...) of a post type.
///
/// A failed lookup lists the available post types so the client can
/// retry with a valid one.
pub(crate) async fn rest_base_for(
    api: &WpRestClient,
    site: &Site,
    post_type: &str,
) -> Result<String, ToolError> {
    let path = format!("types/{}", post_type);
    let data = match api.get(site, &path, "get post types").await {
        Ok(data) => data,
        Err(err) => {
            let available = match fetch_post_types(api, site).await {
                Ok(types) => post_types_list(&types).join("\n"),
                Err(_) => String::new(),
            };
            return Err(ToolError::execution_failed(format!(
                "{}. Please try again with one of the following post type:\n{}",
                err, available
            )));
        }
    };

    data.get("rest_base")
        .and_then(Value::as_str)
        .filter(|base| !base.is_empty())
        .map(str::to_string)
        .ok_or_else(|| {
            ToolError::execution_failed(format!("Post type {} has no REST base", post_type))
        })
}

pub(crate) async fn fetch_templates(
    api: &WpRestClient,
    site: &Site,
    post_type: &str,
) -> Result<Value, WpApiError> {
    api.get_with_query(
        site,
        "templates",
        &[("post_type", post_type.to_string())],
        "get templates",
    )
    .await
}

/// `1. Single Posts (slug: single)` lines for a `/templates` answer
pub(crate) fn templates_list(templates: &Value) -> Vec<String> {
    templates
        .as_array()
        .map(|templates| {
            templates
                .iter()
                .enumerate()
                .map(|(i, t)| {
                    format!(
                        "{}. {} (slug: {})",
                        i + 1,
                        field_str(t, "title", "raw"),
                        t.get("slug").and_then(Value::as_str).unwrap_or_default()
                    )
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Plugins filtered by status; `None` lists all of them
pub(crate) async fn fetch_plugins(
    api: &WpRestClient,
    site: &Site,
    status: Option<&str>,
) -> Result<Vec<Value>, WpApiError> {
    let query: Vec<(&str, String)> = status
        .map(|s| vec![("status", s.to_string())])
        .unwrap_or_default();
    let plugins = api
        .get_with_query(site, "plugins", &query, "get plugins")
        .await?;
    Ok(match plugins {
        Value::Array(plugins) => plugins,
        _ => Vec::new(),
    })
}

/// A single post of `post_type`, resolved through its REST base
pub(crate) async fn fetch_post(
    api: &WpRestClient,
    site: &Site,
    post_type: &str,
    post_id: i64,
) -> Result<Value, ToolError> {
    let rest_base = rest_base_for(api, site, post_type).await?;
    let post = api
        .get(site, &format!("{}/{}", rest_base, post_id), "get post")
        .await?;
    Ok(post)
}

#[cfg(test)]
pub(crate) mod test_support {
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};
    use wpmcp_domain::Site;

    use crate::config::FileHttpConfig;
    use crate::wordpress::WpRestClient;

    pub fn api() -> WpRestClient {
        WpRestClient::new(&FileHttpConfig::default()).unwrap()
    }

    pub fn site(server: &MockServer) -> Site {
        Site::new(
            "Blog",
            "/srv/blog",
            "/srv/blog/wp-content/plugins",
            format!("{}/wp-json", server.uri()),
        )
        .with_credentials("admin", "app-password")
    }

    /// Serve `/types`, `/types/post` and `/types/page`
    pub async fn mount_post_types(server: &MockServer) {
        let post = json!({"name": "Posts", "slug": "post", "rest_base": "posts"});
        let page = json!({"name": "Pages", "slug": "page", "rest_base": "pages"});
        Mock::given(method("GET"))
            .and(path("/wp-json/wp/v2/types"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "page": page.clone(),
                "post": post.clone(),
            })))
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path("/wp-json/wp/v2/types/post"))
            .respond_with(ResponseTemplate::new(200).set_body_json(post))
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path("/wp-json/wp/v2/types/page"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page))
            .mount(server)
            .await;
    }
}
