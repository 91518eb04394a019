//! Console output for the listing commands
//!
//! Everything here goes to stdout and is only used when the binary is not
//! serving the protocol.

use colored::Colorize;
use wpmcp_application::ToolRegistry;
use wpmcp_domain::MatchCandidate;

/// Formats tools and sites for terminal display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Every registered tool in catalog order, with its parameters.
    ///
    /// Required parameters are marked with `*`.
    pub fn format_tools(registry: &ToolRegistry) -> String {
        let mut output = String::new();

        output.push_str(&Self::header(&format!("Available Tools ({})", registry.len())));
        output.push('\n');

        for definition in registry.definitions() {
            output.push_str(&format!(
                "\n{} {}\n  {}\n",
                definition.name.cyan().bold(),
                format!("[{}]", definition.category).dimmed(),
                definition.description
            ));

            for param in &definition.parameters {
                let marker = if param.required { "*" } else { " " };
                output.push_str(&format!(
                    "    {}{} {} {}\n",
                    param.name.yellow(),
                    marker.red().bold(),
                    format!("({})", param.param_type.as_str()).dimmed(),
                    param.description
                ));
                if !param.allowed_values.is_empty() {
                    output.push_str(&format!(
                        "      {} {}\n",
                        "one of:".dimmed(),
                        param.allowed_values.join(", ")
                    ));
                }
            }
        }

        output
    }

    /// Configured sites, ranked against `term` when one is given.
    pub fn format_sites(candidates: &[MatchCandidate<'_>], term: Option<&str>) -> String {
        let mut output = String::new();

        let title = match term {
            Some(t) if !t.is_empty() => format!("Sites matching \"{}\"", t),
            _ => "Configured Sites".to_string(),
        };
        output.push_str(&Self::header(&title));
        output.push('\n');

        if candidates.is_empty() {
            output.push_str(&format!("\n{}\n", "No matching sites found.".yellow()));
            return output;
        }

        for (i, candidate) in candidates.iter().enumerate() {
            let site = candidate.site;
            output.push_str(&format!(
                "\n{}. {} ({}) {}\n",
                i + 1,
                candidate.key.cyan().bold(),
                site.name,
                format!("score {:.2}", candidate.score).dimmed()
            ));
            output.push_str(&format!("   {} {}\n", "path:".dimmed(), site.path.display()));
            output.push_str(&format!(
                "   {} {}\n",
                "plugins:".dimmed(),
                site.plugins_path.display()
            ));
            output.push_str(&format!("   {} {}\n", "api:".dimmed(), site.api_url));
            if !site.aliases.is_empty() {
                output.push_str(&format!(
                    "   {} {}\n",
                    "aliases:".dimmed(),
                    site.aliases.join(", ")
                ));
            }
            if let Some(cli) = &site.cli {
                output.push_str(&format!("   {} {}\n", "cli:".dimmed(), cli));
            }
        }

        output
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }
}
