//! Errors from the WordPress REST API

use serde::Deserialize;
use thiserror::Error;
use wpmcp_domain::tool::ToolError;

/// Error code WordPress returns for unknown routes
pub const NO_ROUTE_CODE: &str = "rest_no_route";

#[derive(Debug, Error)]
pub enum WpApiError {
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Failed to {action}: {source}")]
    InvalidRequest {
        action: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to {action}: {source}.\nRequested URL: {url}")]
    Transport {
        action: String,
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Non-2xx answer. `message` is WordPress' own message when the body
    /// carries one, otherwise the HTTP reason phrase.
    #[error("Failed to {action}: {}.\nRequested URL: {url}", sentence(.message))]
    Status {
        action: String,
        status: u16,
        code: Option<String>,
        message: String,
        url: String,
    },

    #[error("Failed to {action}: response is not valid JSON ({source}).\nRequested URL: {url}")]
    Decode {
        action: String,
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl WpApiError {
    /// True when WordPress has no route for the requested URL and method,
    /// which usually means a wrong post type or rest base.
    pub fn is_no_route(&self) -> bool {
        match self {
            WpApiError::Status { code, message, .. } => {
                code.as_deref() == Some(NO_ROUTE_CODE)
                    || message.contains("No route was found matching the URL and request method")
            }
            _ => false,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            WpApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// URL of the failed request, when one was sent
    pub fn url(&self) -> Option<&str> {
        match self {
            WpApiError::Transport { url, .. }
            | WpApiError::Status { url, .. }
            | WpApiError::Decode { url, .. } => Some(url),
            _ => None,
        }
    }
}

/// WordPress messages usually end with a period; the message format adds its own.
fn sentence(message: &str) -> &str {
    message.strip_suffix('.').unwrap_or(message)
}

impl From<WpApiError> for ToolError {
    fn from(err: WpApiError) -> Self {
        ToolError::execution_failed(err.to_string())
    }
}

/// Shape of a WordPress REST error body
#[derive(Debug, Default, Deserialize)]
pub(crate) struct WpErrorBody {
    pub code: Option<String>,
    pub message: Option<String>,
}
