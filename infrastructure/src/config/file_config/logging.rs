//! Logging configuration from TOML (`[logging]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw logging configuration from TOML
///
/// stdout carries the protocol, so logs never go there: they go to stderr,
/// or to `file` when set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// `EnvFilter` directive used when no `-v` flag is given (e.g. `"info"`)
    pub level: Option<String>,
    /// Append logs to this file instead of stderr
    pub file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_logging_deserialize() {
        let toml_str = r#"
[logging]
level = "wpmcp_application=debug"
file = "/tmp/wordpress-mcp.log"
"#;
        let config: super::super::FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.logging.level.as_deref(),
            Some("wpmcp_application=debug")
        );
        assert_eq!(
            config.logging.file.as_deref(),
            Some(std::path::Path::new("/tmp/wordpress-mcp.log"))
        );
    }
}
