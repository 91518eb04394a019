//! Site domain entities

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// How WP-CLI commands are reached for a site
///
/// Values other than `localwp` and `system` still load; they are reported
/// when a WP-CLI tool is called for that site.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CliKind {
    /// Local by Flywheel: commands must run inside the site's SSH entry shell
    LocalWp,
    /// `wp` is available on the server's own PATH
    System,
    /// Any other value found in the sites file
    Unsupported(String),
}

impl CliKind {
    pub fn as_str(&self) -> &str {
        match self {
            CliKind::LocalWp => "localwp",
            CliKind::System => "system",
            CliKind::Unsupported(raw) => raw,
        }
    }
}

impl From<String> for CliKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "localwp" => CliKind::LocalWp,
            "system" => CliKind::System,
            _ => CliKind::Unsupported(value),
        }
    }
}

impl From<CliKind> for String {
    fn from(kind: CliKind) -> Self {
        match kind {
            CliKind::Unsupported(raw) => raw,
            other => other.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for CliKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Credentials for WordPress application-password authentication
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiCredentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for ApiCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiCredentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// A configured WordPress site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Site {
    /// Human-readable site name
    pub name: String,
    /// WordPress root directory
    pub path: PathBuf,
    /// Directory containing the site's plugins
    pub plugins_path: PathBuf,
    /// Alternative names the site can be referred to by
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
    /// Base URL of the REST API (e.g. `https://example.com/wp-json`)
    pub api_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_credentials: Option<ApiCredentials>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cli: Option<CliKind>,
    /// Local by Flywheel SSH entry script, required when `cli` is `localwp`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_wp_ssh_entry_file: Option<PathBuf>,
}

impl Site {
    pub fn new(
        name: impl Into<String>,
        path: impl Into<PathBuf>,
        plugins_path: impl Into<PathBuf>,
        api_url: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            plugins_path: plugins_path.into(),
            aliases: Vec::new(),
            api_url: api_url.into(),
            api_credentials: None,
            cli: None,
            local_wp_ssh_entry_file: None,
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.api_credentials = Some(ApiCredentials {
            username: username.into(),
            password: password.into(),
        });
        self
    }

    pub fn with_cli(mut self, cli: CliKind) -> Self {
        self.cli = Some(cli);
        self
    }

    pub fn with_local_wp_ssh_entry_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.local_wp_ssh_entry_file = Some(file.into());
        self
    }

    /// All labels a search term is compared against: name first, then aliases
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.aliases.iter().map(String::as_str))
    }
}

/// The set of sites this server can act on, keyed by site key.
///
/// Loaded once at startup and never mutated afterwards. Iteration follows
/// key order so listings are stable between runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SitesConfig {
    #[serde(default)]
    pub sites: BTreeMap<String, Site>,
}

impl SitesConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_site(mut self, key: impl Into<String>, site: Site) -> Self {
        self.sites.insert(key.into(), site);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Site> {
        self.sites.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Site)> {
        self.sites.iter().map(|(k, s)| (k.as_str(), s))
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }
}
