//! CLI entrypoint for wordpress-mcp
//!
//! This is the main binary that wires together all layers using
//! dependency injection, then serves MCP on stdin/stdout.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use tokio::io::BufReader;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use wpmcp_application::DispatchToolUseCase;
use wpmcp_domain::find_matching_sites;
use wpmcp_infrastructure::{
    ConfigLoader, FileConfig, FileLoggingConfig, JsonSchemaToolConverter, SitesConfigLoader,
    default_registry,
};
use wpmcp_presentation::{Cli, ConsoleFormatter, McpServer};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Server failed to start: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    // === Configuration ===
    let config: FileConfig = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).context("Failed to load configuration")?
    };
    config.validate()?;

    let _guard = init_logging(cli.verbose, &config.logging)?;
    info!(version = env!("CARGO_PKG_VERSION"), "Starting wordpress-mcp");

    // === Dependency Injection ===
    let registry = default_registry(&config.http, &config.commands)?;

    if cli.list_tools {
        println!("{}", ConsoleFormatter::format_tools(&registry));
        return Ok(());
    }

    let sites_path =
        SitesConfigLoader::resolve_path(cli.sites.as_deref(), config.sites_path.as_deref())?;
    let sites = SitesConfigLoader::load(&sites_path)?;

    if let Some(term) = cli.list_sites.as_deref() {
        let candidates = find_matching_sites(&sites, Some(term));
        println!("{}", ConsoleFormatter::format_sites(&candidates, Some(term)));
        return Ok(());
    }

    let dispatcher = DispatchToolUseCase::new(Arc::new(sites), Arc::new(registry))
        .with_config(&config.dispatch);
    let server = McpServer::new(Arc::new(dispatcher), Arc::new(JsonSchemaToolConverter))
        .with_version(env!("CARGO_PKG_VERSION"));

    server
        .serve(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
        .await?;

    Ok(())
}

/// Install the global subscriber. Logs go to stderr, or to the configured
/// file; stdout carries the protocol.
///
/// The returned guard flushes buffered lines when dropped.
fn init_logging(verbose: u8, logging: &FileLoggingConfig) -> Result<WorkerGuard> {
    let filter = match (verbose, logging.level.as_deref()) {
        (0, Some(level)) => {
            EnvFilter::try_new(level).with_context(|| format!("Invalid log level: {}", level))?
        }
        (0, None) => EnvFilter::new("warn"),
        (1, _) => EnvFilter::new("info"),
        (2, _) => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let (writer, guard, ansi) = match &logging.file {
        Some(path) => {
            let (directory, file_name) = split_log_path(path)?;
            let appender = tracing_appender::rolling::never(directory, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (writer, guard, false)
        }
        None => {
            let (writer, guard) = tracing_appender::non_blocking(std::io::stderr());
            (writer, guard, true)
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(ansi)
        .with_writer(writer)
        .init();

    Ok(guard)
}

fn split_log_path(path: &Path) -> Result<(&Path, &std::ffi::OsStr)> {
    let file_name = path
        .file_name()
        .with_context(|| format!("Log file path has no file name: {}", path.display()))?;
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    Ok((directory, file_name))
}
