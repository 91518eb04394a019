//! Infrastructure layer for wordpress-mcp
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: configuration file loading, the WordPress
//! REST client and the concrete tool handlers.

pub mod config;
pub mod tools;
pub mod wordpress;

// Re-export commonly used types
pub use config::{
    ConfigError, ConfigLoader, ConfigValidationError, FileCommandsConfig, FileConfig,
    FileHttpConfig, FileLoggingConfig, SitesConfigLoader,
};
pub use tools::{JsonSchemaToolConverter, ToolSetupError, default_registry};
pub use wordpress::{WpApiError, WpRestClient};
