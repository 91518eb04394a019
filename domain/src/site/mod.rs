//! Site domain module
//!
//! A server instance manages several WordPress installations ("sites").
//! Each request names the site it targets, loosely: by key, display name,
//! alias or any close-enough fragment of them.
//!
//! ```text
//! "blo" ──▶ find_matching_sites ──▶ [blog 0.8] ──▶ resolve_site ──▶ ResolvedSite
//!                                   [shop 0.25 ✗ below threshold]
//! ```
//!
//! # Key Types
//!
//! - [`Site`] / [`SitesConfig`]: immutable site configuration
//! - [`similarity`] / [`find_matching_sites`]: fuzzy ranking
//! - [`resolve_site`]: exactly-one selection, ambiguity is an error
//! - [`ShellWrapper`]: per-site command template for WP-CLI

pub mod entities;
pub mod matching;
pub mod resolution;
pub mod shell;

pub use entities::{ApiCredentials, CliKind, Site, SitesConfig};
pub use matching::{MatchCandidate, find_matching_sites, format_sites_list, similarity};
pub use resolution::{ResolvedSite, SiteResolutionError, resolve_site};
pub use shell::{ShellWrapper, ShellWrapperError};
