//! Domain layer for wordpress-mcp
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Sites
//!
//! One server manages several WordPress installations. Requests name the
//! site they target loosely and [`resolve_site`] narrows the reference down
//! to exactly one configured [`Site`], or explains why it could not.
//!
//! ## Tools
//!
//! Every capability exposed to the client is a tool: a [`ToolDefinition`]
//! with a [`ToolCategory`] and typed parameters, invoked through a
//! [`ToolCall`] and answered with a [`ToolResult`] or [`ToolError`].

pub mod core;
pub mod site;
pub mod tool;

// Re-export commonly used types
pub use core::string::truncate_head;
pub use site::{
    ApiCredentials, CliKind, MatchCandidate, ResolvedSite, ShellWrapper, ShellWrapperError, Site,
    SiteResolutionError, SitesConfig, find_matching_sites, format_sites_list, resolve_site,
    similarity,
};
pub use tool::{
    ArgumentError, DefaultToolValidator, ParamType, SITE_KEY_ARG, SiteSelector, ToolCall,
    ToolCategory, ToolContent, ToolDefinition, ToolError, ToolParameter, ToolResult,
    ToolValidator, validate_site_selector,
};
