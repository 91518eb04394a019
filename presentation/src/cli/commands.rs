//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for wordpress-mcp
#[derive(Parser, Debug)]
#[command(name = "wordpress-mcp")]
#[command(author, version, about = "MCP server for managing several WordPress sites")]
#[command(long_about = r#"
wordpress-mcp is a Model Context Protocol server speaking JSON-RPC over
stdin/stdout. It exposes tools for the WordPress REST API, WP-CLI, and
Gutenberg block plugins on disk, for every site in the sites file.

Each tool call may name its target with "siteKey" (key, display name,
alias or a partial match). With a single configured site it can be omitted.

Configuration files are loaded from (in priority order):
1. WP_MCP_* environment variables
2. --config <path>     Explicit config file
3. ./wordpress-mcp.toml Project-level config
4. ~/.config/wordpress-mcp/config.toml   Global config

Example:
  wordpress-mcp --sites ~/wp-sites.json
  WP_SITES_PATH=~/wp-sites.json wordpress-mcp -vv
  wordpress-mcp --sites ~/wp-sites.json --list-sites blog
"#)]
pub struct Cli {
    /// Path to the sites JSON file
    #[arg(long, value_name = "PATH", env = "WP_SITES_PATH")]
    pub sites: Option<PathBuf>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Print the available tools and exit
    #[arg(long)]
    pub list_tools: bool,

    /// Print the configured sites (optionally ranked against TERM) and exit
    #[arg(long, value_name = "TERM", num_args = 0..=1, default_missing_value = "")]
    pub list_sites: Option<String>,
}
