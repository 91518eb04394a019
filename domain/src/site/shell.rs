//! Shell wrappers for running WP-CLI against a site
//!
//! A wrapper is a command template containing [`COMMAND_PLACEHOLDER`].
//! Sites served by Local by Flywheel only expose `wp` inside the shell
//! environment set up by their SSH entry script, so the command has to be
//! spliced into a subshell that sources that script first.

use super::entities::{CliKind, Site};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Placeholder replaced by the actual command
pub const COMMAND_PLACEHOLDER: &str = "{{cmd}}";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShellWrapperError {
    #[error("Option: \"cli\" for site \"{site_key}\" is not specified in wp-sites.json")]
    CliNotConfigured { site_key: String },

    #[error(
        "Option: \"cli\" for site \"{site_key}\" is \"{value}\", expected \"localwp\" or \"system\""
    )]
    UnsupportedCli { site_key: String, value: String },

    #[error(
        "Option: \"localWpSshEntryFile\" for site \"{site_key}\" is not specified in wp-sites.json while option \"cli\" is \"localwp\""
    )]
    EntryFileNotConfigured { site_key: String },

    #[error(
        "Option: \"localWpSshEntryFile\" for site \"{site_key}\" points to \"{}\", which does not exist",
        .path.display()
    )]
    EntryFileMissing { site_key: String, path: PathBuf },
}

/// Command template for one site
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellWrapper {
    template: String,
    entry_file: Option<PathBuf>,
}

impl ShellWrapper {
    /// Template that runs the command as-is
    pub fn passthrough() -> Self {
        Self {
            template: COMMAND_PLACEHOLDER.to_string(),
            entry_file: None,
        }
    }

    /// Template that sources a Local by Flywheel SSH entry script first
    pub fn local_wp(entry_file: impl Into<PathBuf>) -> Self {
        let entry_file = entry_file.into();
        Self {
            template: format!(
                "echo $(SHELL= && source \"{}\" &>/dev/null && {})",
                entry_file.display(),
                COMMAND_PLACEHOLDER
            ),
            entry_file: Some(entry_file),
        }
    }

    /// Derive the wrapper from a site's configuration.
    ///
    /// Only checks that the configuration is complete; whether the entry
    /// script actually exists is left to the caller via [`Self::entry_file`].
    pub fn for_site(site_key: &str, site: &Site) -> Result<Self, ShellWrapperError> {
        match &site.cli {
            Some(CliKind::LocalWp) => match &site.local_wp_ssh_entry_file {
                Some(file) => Ok(Self::local_wp(file)),
                None => Err(ShellWrapperError::EntryFileNotConfigured {
                    site_key: site_key.to_string(),
                }),
            },
            Some(CliKind::System) => Ok(Self::passthrough()),
            Some(CliKind::Unsupported(value)) => Err(ShellWrapperError::UnsupportedCli {
                site_key: site_key.to_string(),
                value: value.clone(),
            }),
            None => Err(ShellWrapperError::CliNotConfigured {
                site_key: site_key.to_string(),
            }),
        }
    }

    /// Script that must exist on disk for this wrapper to work
    pub fn entry_file(&self) -> Option<&Path> {
        self.entry_file.as_deref()
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// Splice `command` into the template
    pub fn wrap(&self, command: &str) -> String {
        self.template.replace(COMMAND_PLACEHOLDER, command)
    }
}
