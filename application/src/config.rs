//! Application-level configuration.
//!
//! Controls how the dispatch use case treats inbound calls.

use serde::{Deserialize, Serialize};

/// Dispatch behavior configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// Validate arguments against each tool's declared parameters before
    /// invoking its handler.
    pub validate_arguments: bool,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            validate_arguments: true,
        }
    }
}

impl DispatchConfig {
    /// Hand argument checking entirely to the handlers.
    pub fn without_validation() -> Self {
        Self {
            validate_arguments: false,
        }
    }
}
