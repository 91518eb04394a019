//! Turning a loose site reference into exactly one site

use super::entities::{Site, SitesConfig};
use super::matching::{find_matching_sites, format_sites_list};
use thiserror::Error;

/// The single site a request will act on
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedSite<'a> {
    pub key: &'a str,
    pub site: &'a Site,
}

/// Why a site reference could not be narrowed down to one site.
///
/// Both variants carry numbered `"1. key (name)"` lines so the caller can
/// show the user what to choose from.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SiteResolutionError {
    /// Nothing scored above the threshold; lists every configured site
    #[error("No matching sites found. Available sites:\n{}", .available.join("\n"))]
    NoMatch { available: Vec<String> },

    /// More than one site matched; lists the matches best first
    #[error(
        "Multiple matching sites found. Let user specify which one to use:\n{}",
        .candidates.join("\n")
    )]
    Ambiguous { candidates: Vec<String> },
}

/// Resolve `term` against the configured sites.
///
/// Exactly one match is required. Several matches are always reported as
/// ambiguous, even when one of them scores clearly higher.
pub fn resolve_site<'a>(
    config: &'a SitesConfig,
    term: Option<&str>,
) -> Result<ResolvedSite<'a>, SiteResolutionError> {
    let matches = find_matching_sites(config, term);

    match matches.as_slice() {
        [] => Err(SiteResolutionError::NoMatch {
            available: format_sites_list(config.iter()),
        }),
        [only] => Ok(ResolvedSite {
            key: only.key,
            site: only.site,
        }),
        many => Err(SiteResolutionError::Ambiguous {
            candidates: format_sites_list(many.iter().map(|m| (m.key, m.site))),
        }),
    }
}
