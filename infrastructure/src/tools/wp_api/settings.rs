//! Site settings over `/wp/v2/settings`
//!
//! Updates go through one handler per value type; each accepts only the
//! settings WordPress stores with that type.

use async_trait::async_trait;
use serde_json::{Map, Value};
use wpmcp_application::ports::tool_handler::{ToolContext, ToolHandler};
use wpmcp_domain::tool::{
    ParamType, ToolCall, ToolCategory, ToolDefinition, ToolError, ToolParameter, ToolResult,
};

use super::pretty;
use crate::wordpress::WpRestClient;

pub const GET_SITE_SETTINGS: &str = "wp_api_get_site_settings";
pub const UPDATE_STRING_SITE_SETTING: &str = "wp_api_update_string_site_setting";
pub const UPDATE_INTEGER_SITE_SETTING: &str = "wp_api_update_integer_site_setting";

pub const STRING_SETTING_KEYS: [&str; 12] = [
    "title",
    "description",
    "url",
    "email",
    "timezone",
    "date_format",
    "time_format",
    "language",
    "default_post_format",
    "show_on_front",
    "default_ping_status",
    "default_comment_status",
];

pub const INTEGER_SETTING_KEYS: [&str; 7] = [
    "posts_per_page",
    "page_on_front",
    "page_for_posts",
    "site_logo",
    "site_icon",
    "default_category",
    "start_of_week",
];

/// `wp_api_get_site_settings`
pub struct GetSiteSettingsTool {
    api: WpRestClient,
}

impl GetSiteSettingsTool {
    pub fn new(api: WpRestClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl ToolHandler for GetSiteSettingsTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            GET_SITE_SETTINGS,
            "Retrieves all WordPress site settings using REST API",
            ToolCategory::RestApi,
        )
    }

    async fn execute(
        &self,
        _call: &ToolCall,
        context: &ToolContext<'_>,
    ) -> Result<ToolResult, ToolError> {
        let settings = self
            .api
            .get(context.site, "settings", "retrieve site settings")
            .await?;

        Ok(ToolResult::text(format!(
            "Site settings retrieved successfully.\n\nSettings: {}",
            pretty(&settings)
        ))
        .with_field("settings", settings))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SettingKind {
    String,
    Integer,
}

impl SettingKind {
    fn tool_name(self) -> &'static str {
        match self {
            SettingKind::String => UPDATE_STRING_SITE_SETTING,
            SettingKind::Integer => UPDATE_INTEGER_SITE_SETTING,
        }
    }

    fn keys(self) -> &'static [&'static str] {
        match self {
            SettingKind::String => &STRING_SETTING_KEYS,
            SettingKind::Integer => &INTEGER_SETTING_KEYS,
        }
    }

    fn param_type(self) -> ParamType {
        match self {
            SettingKind::String => ParamType::String,
            SettingKind::Integer => ParamType::Integer,
        }
    }

    /// The value of `settingValue`, when it has this kind's type
    fn value(self, call: &ToolCall) -> Option<Value> {
        match self {
            SettingKind::String => call.get_string("settingValue").map(Value::from),
            SettingKind::Integer => call.get_i64("settingValue").map(Value::from),
        }
    }
}

/// `wp_api_update_string_site_setting` / `wp_api_update_integer_site_setting`
pub struct UpdateSiteSettingTool {
    api: WpRestClient,
    kind: SettingKind,
}

impl UpdateSiteSettingTool {
    pub fn string(api: WpRestClient) -> Self {
        Self {
            api,
            kind: SettingKind::String,
        }
    }

    pub fn integer(api: WpRestClient) -> Self {
        Self {
            api,
            kind: SettingKind::Integer,
        }
    }
}

#[async_trait]
impl ToolHandler for UpdateSiteSettingTool {
    fn definition(&self) -> ToolDefinition {
        let format = match self.kind {
            SettingKind::String => "string",
            SettingKind::Integer => "integer",
        };
        ToolDefinition::new(
            self.kind.tool_name(),
            format!(
                "Updates a single WordPress site setting in {} format using REST API",
                format
            ),
            ToolCategory::RestApi,
        )
        .with_parameter(
            ToolParameter::new("settingKey", "The key of the setting to update", true)
                .with_allowed_values(self.kind.keys().iter().copied()),
        )
        .with_parameter(
            ToolParameter::new("settingValue", "The new value for the setting", true)
                .with_type(self.kind.param_type()),
        )
    }

    async fn execute(
        &self,
        call: &ToolCall,
        context: &ToolContext<'_>,
    ) -> Result<ToolResult, ToolError> {
        let key = call
            .require_string("settingKey")
            .map_err(ToolError::invalid_argument)?;
        let keys = self.kind.keys();
        if !keys.contains(&key) {
            return Err(ToolError::invalid_argument(format!(
                "Invalid setting key: {}. Allowed values: {}",
                key,
                keys.join(", ")
            )));
        }
        let value = self.kind.value(call).ok_or_else(|| {
            ToolError::invalid_argument(format!(
                "settingValue must be of type {}",
                self.kind.param_type()
            ))
        })?;

        let mut body = Map::new();
        body.insert(key.to_string(), value);
        let settings = self
            .api
            .post(context.site, "settings", &Value::Object(body), "update site setting")
            .await?;
        tracing::info!(site = context.site_key, setting = key, "Site setting updated");

        Ok(ToolResult::text(format!(
            "Site settings updated successfully.\n\nNew settings object: {}",
            pretty(&settings)
        ))
        .with_field("settings", settings))
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{api, site};
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_definitions_carry_allowed_keys() {
        let string = UpdateSiteSettingTool::string(api()).definition();
        assert_eq!(string.name, UPDATE_STRING_SITE_SETTING);
        let key = string.parameter("settingKey").unwrap();
        assert_eq!(key.allowed_values.len(), STRING_SETTING_KEYS.len());

        let integer = UpdateSiteSettingTool::integer(api()).definition();
        assert_eq!(integer.name, UPDATE_INTEGER_SITE_SETTING);
        assert_eq!(
            integer.parameter("settingValue").unwrap().param_type,
            ParamType::Integer
        );
        assert!(integer.description.contains("integer format"));
    }

    #[tokio::test]
    async fn test_get_settings() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/wp-json/wp/v2/settings"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"title": "Blog"})))
            .mount(&server)
            .await;

        let site = site(&server);
        let context = ToolContext::new("blog", &site);
        let result = GetSiteSettingsTool::new(api())
            .execute(&ToolCall::new(GET_SITE_SETTINGS), &context)
            .await
            .unwrap();

        assert_eq!(
            result.text_content(),
            "Site settings retrieved successfully.\n\nSettings: {\n  \"title\": \"Blog\"\n}"
        );
    }

    #[tokio::test]
    async fn test_update_string_setting() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/wp-json/wp/v2/settings"))
            .and(body_json(json!({"title": "New title"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"title": "New title"})))
            .expect(1)
            .mount(&server)
            .await;

        let site = site(&server);
        let context = ToolContext::new("blog", &site);
        let call = ToolCall::new(UPDATE_STRING_SITE_SETTING)
            .with_arg("settingKey", "title")
            .with_arg("settingValue", "New title");
        let result = UpdateSiteSettingTool::string(api())
            .execute(&call, &context)
            .await
            .unwrap();

        assert!(result.text_content().starts_with("Site settings updated successfully.\n\nNew settings object: {"));
    }

    #[tokio::test]
    async fn test_update_integer_setting() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/wp-json/wp/v2/settings"))
            .and(body_json(json!({"posts_per_page": 5})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"posts_per_page": 5})))
            .expect(1)
            .mount(&server)
            .await;

        let site = site(&server);
        let context = ToolContext::new("blog", &site);
        let call = ToolCall::new(UPDATE_INTEGER_SITE_SETTING)
            .with_arg("settingKey", "posts_per_page")
            .with_arg("settingValue", 5);
        UpdateSiteSettingTool::integer(api())
            .execute(&call, &context)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_rejects_key_of_other_kind() {
        let server = MockServer::start().await;
        let site = site(&server);
        let context = ToolContext::new("blog", &site);
        let call = ToolCall::new(UPDATE_STRING_SITE_SETTING)
            .with_arg("settingKey", "posts_per_page")
            .with_arg("settingValue", "5");
        let err = UpdateSiteSettingTool::string(api())
            .execute(&call, &context)
            .await
            .unwrap_err();

        assert!(err.is_invalid_argument());
        assert!(err.message.starts_with("Invalid setting key: posts_per_page. Allowed values: title, "));
    }
}
