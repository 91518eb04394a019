//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use application types where appropriate.

mod commands;
mod http;
mod logging;

pub use commands::FileCommandsConfig;
pub use http::FileHttpConfig;
pub use logging::FileLoggingConfig;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;
use wpmcp_application::DispatchConfig;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("[{section}] timeout_seconds cannot be 0")]
    InvalidTimeout { section: &'static str },

    #[error("[commands] {key} cannot be empty")]
    EmptyProgram { key: &'static str },

    #[error("[http] user_agent cannot be empty")]
    EmptyUserAgent,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Path to the sites JSON file (overridden by `--sites` / `WP_SITES_PATH`)
    pub sites_path: Option<PathBuf>,
    /// WordPress REST client settings
    pub http: FileHttpConfig,
    /// External command settings (npm, npx, WP-CLI)
    pub commands: FileCommandsConfig,
    /// Dispatcher behavior
    pub dispatch: DispatchConfig,
    /// Log output settings
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, stopping at the first problem.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        self.http.validate()?;
        self.commands.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = FileConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.sites_path.is_none());
        assert!(config.dispatch.validate_arguments);
    }

    #[test]
    fn test_full_toml() {
        let toml_str = r#"
sites_path = "/etc/wordpress-mcp/sites.json"

[http]
timeout_seconds = 10

[commands]
npm = "/opt/node/bin/npm"

[dispatch]
validate_arguments = false

[logging]
level = "debug"
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.sites_path,
            Some(PathBuf::from("/etc/wordpress-mcp/sites.json"))
        );
        assert_eq!(config.http.timeout_seconds, 10);
        assert_eq!(config.commands.npm, "/opt/node/bin/npm");
        assert_eq!(config.commands.npx, "npx");
        assert!(!config.dispatch.validate_arguments);
        assert_eq!(config.logging.level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config: FileConfig = toml::from_str("[commands]\ntimeout_seconds = 0\n").unwrap();
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::InvalidTimeout {
                section: "commands"
            })
        );
    }
}
