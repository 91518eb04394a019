//! Tool domain module
//!
//! This module defines the contract every tool exposed by the server
//! conforms to: a [`ToolDefinition`] describing its name, category and
//! parameters, a [`ToolCall`] carrying the client's arguments, and a
//! [`ToolResult`] / [`ToolError`] pair for the outcome.
//!
//! ```text
//! ┌──────────────────┐    ┌──────────────┐    ┌──────────────┐
//! │ ToolDefinition   │───▶│ ToolCall     │───▶│ ToolResult   │
//! │ (name, category, │    │ (arguments + │    │ or ToolError │
//! │  parameters)     │    │  siteKey)    │    │              │
//! └──────────────────┘    └──────────────┘    └──────────────┘
//! ```
//!
//! # Categories
//!
//! The [`ToolCategory`](entities::ToolCategory) of a definition tells the
//! dispatcher what per-site context to prepare:
//!
//! | Category | Examples | Context |
//! |----------|----------|---------|
//! | `Filesystem` | `wp_list_plugin_files` | site paths |
//! | `Build` | `wp_build_block` | site paths |
//! | `RestApi` | `wp_api_get_posts` | API URL and credentials |
//! | `WpCli` | `wp_cli_install_and_activate_plugin` | shell wrapper |
//!
//! # Architecture
//!
//! - **Domain** (this module): pure definitions and validation, no I/O
//! - **Application** (`ToolHandler`, `ToolRegistry`): handler port and dispatch
//! - **Infrastructure**: concrete handlers doing HTTP, file and process I/O

pub mod arguments;
pub mod entities;
pub mod traits;
pub mod value_objects;

pub use arguments::{ArgumentError, SITE_KEY_ARG, SiteSelector, validate_site_selector};
pub use entities::{ParamType, ToolCall, ToolCategory, ToolDefinition, ToolParameter};
pub use traits::{DefaultToolValidator, ToolValidator};
pub use value_objects::{ToolContent, ToolError, ToolResult};
