//! Sites file loading
//!
//! The sites file is JSON of the form:
//!
//! ```json
//! {
//!   "sites": {
//!     "blog": {
//!       "name": "My Blog",
//!       "path": "/srv/blog",
//!       "pluginsPath": "/srv/blog/wp-content/plugins",
//!       "aliases": ["personal"],
//!       "apiUrl": "https://blog.example.com/wp-json",
//!       "apiCredentials": { "username": "admin", "password": "app-password" },
//!       "cli": "localwp",
//!       "localWpSshEntryFile": "/Users/me/Library/.../ssh-entry/abc.sh"
//!     }
//!   }
//! }
//! ```

use figment::{
    Figment,
    providers::{Format, Json},
};
use std::path::{Path, PathBuf};
use thiserror::Error;
use wpmcp_domain::SitesConfig;

use super::file_config::ConfigValidationError;

/// Errors raised while assembling startup configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("WP_SITES_PATH environment variable is required")]
    MissingSitesPath,

    #[error("Config file not found at: {}", .0.display())]
    SitesFileNotFound(PathBuf),

    #[error("Failed to load config: {0}")]
    InvalidSites(#[source] Box<figment::Error>),

    #[error("Failed to load settings: {0}")]
    Settings(#[from] Box<figment::Error>),

    #[error("Invalid settings: {0}")]
    Validation(#[from] ConfigValidationError),
}

/// Loads the sites file into a [`SitesConfig`]
pub struct SitesConfigLoader;

impl SitesConfigLoader {
    /// Pick the sites file path: CLI / `WP_SITES_PATH` first, then the settings file.
    pub fn resolve_path(
        explicit: Option<&Path>,
        configured: Option<&Path>,
    ) -> Result<PathBuf, ConfigError> {
        explicit
            .or(configured)
            .map(Path::to_path_buf)
            .ok_or(ConfigError::MissingSitesPath)
    }

    pub fn load(path: &Path) -> Result<SitesConfig, ConfigError> {
        if !path.is_file() {
            return Err(ConfigError::SitesFileNotFound(path.to_path_buf()));
        }

        let sites: SitesConfig = Figment::from(Json::file(path))
            .extract()
            .map_err(|e| ConfigError::InvalidSites(Box::new(e)))?;

        tracing::info!(path = %path.display(), sites = sites.len(), "Loaded sites config");
        if sites.is_empty() {
            tracing::warn!(path = %path.display(), "Sites config defines no sites");
        }
        Ok(sites)
    }
}
