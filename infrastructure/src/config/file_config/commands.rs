//! External command configuration from TOML (`[commands]` section)

use super::ConfigValidationError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw command configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCommandsConfig {
    /// Upper bound for a single npm / npx / WP-CLI invocation
    pub timeout_seconds: u64,
    /// npm executable, looked up on `PATH` unless absolute
    pub npm: String,
    /// npx executable, looked up on `PATH` unless absolute
    pub npx: String,
}

impl Default for FileCommandsConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 300,
            npm: "npm".to_string(),
            npx: "npx".to_string(),
        }
    }
}

impl FileCommandsConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub(super) fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.timeout_seconds == 0 {
            return Err(ConfigValidationError::InvalidTimeout {
                section: "commands",
            });
        }
        if self.npm.trim().is_empty() {
            return Err(ConfigValidationError::EmptyProgram { key: "npm" });
        }
        if self.npx.trim().is_empty() {
            return Err(ConfigValidationError::EmptyProgram { key: "npx" });
        }
        Ok(())
    }
}
