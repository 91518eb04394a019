//! Fuzzy site matching
//!
//! Callers refer to sites loosely ("blog", "the shop", an alias). Every
//! configured site is scored against the search term and only candidates
//! above [`MATCH_THRESHOLD`] survive, ranked best first.
//!
//! The scorer is deliberately cheap: substring containment wins outright
//! with [`CONTAINMENT_SCORE`], otherwise the score is the fraction of the
//! longer string's characters that also occur somewhere in the shorter one.

use super::entities::{Site, SitesConfig};
use std::cmp::Ordering;
use std::collections::HashSet;

/// Candidates must score strictly above this to count as a match
pub const MATCH_THRESHOLD: f64 = 0.3;

/// Score returned when one string contains the other
pub const CONTAINMENT_SCORE: f64 = 0.8;

/// Case-insensitive similarity between two strings, in `[0, 1]`.
///
/// Identical non-empty strings contain each other and therefore score
/// [`CONTAINMENT_SCORE`], not 1.0. Two empty strings score 1.0.
/// The result does not depend on argument order.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a = a.to_lowercase();
    let b = b.to_lowercase();

    if a.is_empty() && b.is_empty() {
        return 1.0;
    }

    if a.contains(&b) || b.contains(&a) {
        return CONTAINMENT_SCORE;
    }

    let a_len = a.chars().count();
    let b_len = b.chars().count();

    // Equal lengths fall back to lexical order so that swapping the
    // arguments always picks the same "longer" string.
    let (longer, shorter, len) = match a_len.cmp(&b_len) {
        Ordering::Greater => (&a, &b, a_len),
        Ordering::Less => (&b, &a, b_len),
        Ordering::Equal if a >= b => (&a, &b, a_len),
        Ordering::Equal => (&b, &a, b_len),
    };

    let present: HashSet<char> = shorter.chars().collect();
    let mismatches = longer.chars().filter(|c| !present.contains(c)).count();

    (len - mismatches) as f64 / len as f64
}

/// A site scored against a search term
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchCandidate<'a> {
    pub key: &'a str,
    pub site: &'a Site,
    pub score: f64,
}

/// Best score of the site key, display name and aliases against `term`
pub fn score_site(key: &str, site: &Site, term: &str) -> f64 {
    site.labels()
        .map(|label| similarity(label, term))
        .fold(similarity(key, term), f64::max)
}

/// Rank configured sites against an optional search term.
///
/// Without a term (or with an empty one) every site is returned with score
/// 1.0 in key order. With a term, sites scoring at or below
/// [`MATCH_THRESHOLD`] are dropped and the rest are sorted by descending
/// score; ties keep key order.
pub fn find_matching_sites<'a>(
    config: &'a SitesConfig,
    term: Option<&str>,
) -> Vec<MatchCandidate<'a>> {
    let term = match term {
        Some(t) if !t.is_empty() => t,
        _ => {
            return config
                .iter()
                .map(|(key, site)| MatchCandidate {
                    key,
                    site,
                    score: 1.0,
                })
                .collect();
        }
    };

    let mut matches: Vec<MatchCandidate<'a>> = config
        .iter()
        .map(|(key, site)| MatchCandidate {
            key,
            site,
            score: score_site(key, site, term),
        })
        .filter(|c| c.score > MATCH_THRESHOLD)
        .collect();

    matches.sort_by(|a, b| b.score.total_cmp(&a.score));
    matches
}

/// Numbered `"1. key (name)"` lines for presenting sites to a user
pub fn format_sites_list<'a>(sites: impl IntoIterator<Item = (&'a str, &'a Site)>) -> Vec<String> {
    sites
        .into_iter()
        .enumerate()
        .map(|(i, (key, site))| format!("{}. {} ({})", i + 1, key, site.name))
        .collect()
}
