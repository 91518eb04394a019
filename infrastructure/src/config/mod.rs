//! Configuration loading for wordpress-mcp
//!
//! Two inputs are loaded at startup:
//!
//! - Settings (TOML), merged from several sources. The priority order
//!   (highest to lowest):
//!   1. `WP_MCP_*` environment variables
//!   2. `--config <path>` specified file
//!   3. Project root: `./wordpress-mcp.toml` or `./.wordpress-mcp.toml`
//!   4. XDG config: `$XDG_CONFIG_HOME/wordpress-mcp/config.toml`
//!   5. Default values
//! - The sites file (JSON), located by `--sites` / `WP_SITES_PATH` or
//!   `sites_path` in the settings.

mod file_config;
mod loader;
mod sites;

pub use file_config::{
    ConfigValidationError, FileCommandsConfig, FileConfig, FileHttpConfig, FileLoggingConfig,
};
pub use loader::ConfigLoader;
pub use sites::{ConfigError, SitesConfigLoader};
