//! REST client configuration from TOML (`[http]` section)

use super::ConfigValidationError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw HTTP configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileHttpConfig {
    /// Per-request timeout for WordPress REST calls
    pub timeout_seconds: u64,
    /// `User-Agent` header sent to WordPress
    pub user_agent: String,
}

impl Default for FileHttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            user_agent: format!("wordpress-mcp/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl FileHttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub(super) fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.timeout_seconds == 0 {
            return Err(ConfigValidationError::InvalidTimeout { section: "http" });
        }
        if self.user_agent.trim().is_empty() {
            return Err(ConfigValidationError::EmptyUserAgent);
        }
        Ok(())
    }
}
