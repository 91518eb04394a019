//! Tool domain traits
//!
//! Contains pure domain logic traits for tool validation.
//! The async ToolHandler port is defined in the application layer (ports).

use super::arguments::SITE_KEY_ARG;
use super::entities::{ToolCall, ToolDefinition};

/// Validator for tool calls
///
/// This is a pure domain trait that validates tool calls
/// against their definitions without any I/O operations.
pub trait ToolValidator: Send + Sync {
    /// Validate a tool call against its definition
    fn validate(&self, call: &ToolCall, definition: &ToolDefinition) -> Result<(), String>;
}

/// Default implementation of ToolValidator
///
/// Checks required parameters, primitive JSON types, allowed values and
/// rejects parameters the tool does not declare. The site selector is
/// accepted by every tool.
#[derive(Debug, Clone, Default)]
pub struct DefaultToolValidator;

impl ToolValidator for DefaultToolValidator {
    fn validate(&self, call: &ToolCall, definition: &ToolDefinition) -> Result<(), String> {
        for param in &definition.parameters {
            let value = match call.arguments.get(&param.name) {
                Some(v) if !v.is_null() => v,
                _ if param.required => {
                    return Err(format!(
                        "Missing required parameter '{}' for tool '{}'",
                        param.name, definition.name
                    ));
                }
                _ => continue,
            };

            if !param.param_type.accepts(value) {
                return Err(format!(
                    "Parameter '{}' for tool '{}' must be of type {}",
                    param.name, definition.name, param.param_type
                ));
            }

            if !param.allowed_values.is_empty() {
                let allowed = value
                    .as_str()
                    .map(|s| param.allowed_values.iter().any(|a| a == s))
                    .unwrap_or(false);
                if !allowed {
                    return Err(format!(
                        "Parameter '{}' for tool '{}' must be one of: {}",
                        param.name,
                        definition.name,
                        param.allowed_values.join(", ")
                    ));
                }
            }
        }

        for arg_name in call.arguments.keys() {
            if arg_name != SITE_KEY_ARG && definition.parameter(arg_name).is_none() {
                let mut accepted: Vec<&str> =
                    definition.parameters.iter().map(|p| p.name.as_str()).collect();
                accepted.push(SITE_KEY_ARG);
                return Err(format!(
                    "Unknown parameter '{}' for tool '{}' (accepted: {})",
                    arg_name,
                    definition.name,
                    accepted.join(", ")
                ));
            }
        }

        Ok(())
    }
}
