//! JSON Schema tool converter.
//!
//! Default implementation of [`ToolSchemaPort`] producing the
//! `{name, description, inputSchema}` descriptors of `tools/list`.

use serde_json::{Map, Value, json};
use wpmcp_application::ports::tool_schema::ToolSchemaPort;
use wpmcp_domain::tool::{SITE_KEY_ARG, ToolDefinition};

const SITE_KEY_DESCRIPTION: &str = "Site key (name, alias or partial match)";

/// Default implementation producing MCP input schemas.
///
/// Every schema gets the optional `siteKey` selector on top of the tool's
/// own parameters. Parameters with allowed values become an `enum`.
pub struct JsonSchemaToolConverter;

impl ToolSchemaPort for JsonSchemaToolConverter {
    fn tool_to_schema(&self, tool: &ToolDefinition) -> Value {
        let mut properties = Map::new();
        properties.insert(
            SITE_KEY_ARG.to_string(),
            json!({ "type": "string", "description": SITE_KEY_DESCRIPTION }),
        );
        let mut required = Vec::new();

        for param in &tool.parameters {
            let mut prop = Map::new();
            prop.insert("type".to_string(), json!(param.param_type.as_str()));
            prop.insert("description".to_string(), json!(param.description));
            if !param.allowed_values.is_empty() {
                prop.insert("enum".to_string(), json!(param.allowed_values));
            }
            properties.insert(param.name.clone(), Value::Object(prop));

            if param.required {
                required.push(json!(param.name));
            }
        }

        json!({
            "name": tool.name,
            "description": tool.description,
            "inputSchema": {
                "type": "object",
                "properties": properties,
                "required": required,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wpmcp_domain::tool::{ParamType, ToolCategory, ToolParameter};

    #[test]
    fn test_tool_to_schema() {
        let converter = JsonSchemaToolConverter;
        let tool = ToolDefinition::new("wp_api_get_post", "Get a post", ToolCategory::RestApi)
            .with_parameter(ToolParameter::new("postType", "Post type", true))
            .with_parameter(
                ToolParameter::new("postId", "Post ID", true).with_type(ParamType::Integer),
            )
            .with_parameter(
                ToolParameter::new("force", "Force", false).with_type(ParamType::Boolean),
            );

        let schema = converter.tool_to_schema(&tool);

        assert_eq!(schema["name"], "wp_api_get_post");
        assert_eq!(schema["description"], "Get a post");
        assert_eq!(schema["inputSchema"]["type"], "object");

        let props = &schema["inputSchema"]["properties"];
        assert_eq!(props["postType"]["type"], "string");
        assert_eq!(props["postType"]["description"], "Post type");
        assert_eq!(props["postId"]["type"], "integer");
        assert_eq!(props["force"]["type"], "boolean");
        assert!(props["postType"].get("enum").is_none());

        let required = schema["inputSchema"]["required"].as_array().unwrap();
        assert_eq!(required, &vec![json!("postType"), json!("postId")]);
    }

    #[test]
    fn test_site_key_is_optional_on_every_tool() {
        let schema = JsonSchemaToolConverter.tool_to_schema(&ToolDefinition::new(
            "wp_api_get_post_types",
            "Post types",
            ToolCategory::RestApi,
        ));

        assert_eq!(
            schema["inputSchema"]["properties"]["siteKey"],
            json!({"type": "string", "description": SITE_KEY_DESCRIPTION})
        );
        assert_eq!(schema["inputSchema"]["required"], json!([]));
    }

    #[test]
    fn test_allowed_values_become_enum() {
        let tool = ToolDefinition::new("wp_api_get_plugins", "Plugins", ToolCategory::RestApi)
            .with_parameter(
                ToolParameter::new("status", "Status", false)
                    .with_allowed_values(["active", "inactive", "all"]),
            );

        let schema = JsonSchemaToolConverter.tool_to_schema(&tool);
        assert_eq!(
            schema["inputSchema"]["properties"]["status"]["enum"],
            json!(["active", "inactive", "all"])
        );
    }
}
