//! Tool domain value objects: immutable result and error types
//!
//! A handler either produces a [`ToolResult`] (which may itself be flagged
//! as an error the client should read, e.g. "which site did you mean?") or
//! fails with a [`ToolError`]. The dispatcher turns `ToolError` codes into
//! protocol errors:
//!
//! | Code | Protocol error |
//! |------|----------------|
//! | `INVALID_ARGUMENT` | InvalidParams |
//! | anything else | InternalError |

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Error that occurred during tool execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolError {
    /// Error code (e.g., "NOT_FOUND", "EXECUTION_FAILED")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ToolError {
    pub const INVALID_ARGUMENT: &'static str = "INVALID_ARGUMENT";
    pub const NOT_FOUND: &'static str = "NOT_FOUND";
    pub const EXECUTION_FAILED: &'static str = "EXECUTION_FAILED";
    pub const PERMISSION_DENIED: &'static str = "PERMISSION_DENIED";
    pub const TIMEOUT: &'static str = "TIMEOUT";

    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    // Common error constructors
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::new(
            Self::NOT_FOUND,
            format!("Resource not found: {}", resource.into()),
        )
    }

    pub fn permission_denied(resource: impl Into<String>) -> Self {
        Self::new(
            Self::PERMISSION_DENIED,
            format!("Permission denied: {}", resource.into()),
        )
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(Self::INVALID_ARGUMENT, message)
    }

    pub fn execution_failed(message: impl Into<String>) -> Self {
        Self::new(Self::EXECUTION_FAILED, message)
    }

    pub fn timeout(operation: impl Into<String>) -> Self {
        Self::new(
            Self::TIMEOUT,
            format!("Operation timed out: {}", operation.into()),
        )
    }

    pub fn is_invalid_argument(&self) -> bool {
        self.code == Self::INVALID_ARGUMENT
    }
}

impl std::fmt::Display for ToolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(details) = &self.details {
            write!(f, " ({})", details)?;
        }
        Ok(())
    }
}

impl std::error::Error for ToolError {}

/// One block of tool output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ToolContent {
    Text { text: String },
}

impl ToolContent {
    pub fn text(text: impl Into<String>) -> Self {
        ToolContent::Text { text: text.into() }
    }

    pub fn as_text(&self) -> &str {
        match self {
            ToolContent::Text { text } => text,
        }
    }
}

/// Result of a tool invocation as sent back to the client.
///
/// `is_error` marks results the client should treat as a failed attempt
/// (bad site reference, confirmation needed, ...) while still reading the
/// text. Tool-specific structured fields travel in [`Self::structured`]
/// and are flattened into the serialized object.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolResult {
    pub content: Vec<ToolContent>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_error: bool,
    #[serde(flatten)]
    pub structured: Map<String, Value>,
}

impl ToolResult {
    /// Create a successful text result
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::text(text)],
            is_error: false,
            structured: Map::new(),
        }
    }

    /// Create a text result flagged as an error
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            is_error: true,
            ..Self::text(text)
        }
    }

    /// Add a structured field alongside the content
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.structured.insert(key.into(), value.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.is_error
    }

    /// All text blocks joined by newlines
    pub fn text_content(&self) -> String {
        self.content
            .iter()
            .map(ToolContent::as_text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}
