//! Console output formatter for domains and switch results

use super::view::{DomainView, EnvironmentView};
use colored::Colorize;
use envswitch_application::{SwitchIgnored, SwitchOutcome};

/// Formats controller snapshots for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Every domain with its environments
    pub fn format_domains(domains: &[DomainView]) -> String {
        if domains.is_empty() {
            return format!(
                "{}\n",
                "No domains configured. Add [domains.<key>] sections to envswitch.toml.".dimmed()
            );
        }

        let mut output = String::new();
        for (i, domain) in domains.iter().enumerate() {
            if i > 0 {
                output.push('\n');
            }
            output.push_str(&Self::domain_header(domain));
            if let Some(error) = &domain.error {
                output.push_str(&format!("  {} {}\n", "error:".red().bold(), error));
                continue;
            }
            for env in &domain.environments {
                output.push_str(&Self::environment_line(env));
            }
        }
        output
    }

    /// The environment in use for one domain, with its values
    pub fn format_current(domain: &DomainView) -> String {
        let mut output = Self::domain_header(domain);

        let Some(env) = domain.current_environment() else {
            let reason = domain.error.as_deref().unwrap_or("no environment selected");
            output.push_str(&format!("  {} {}\n", "error:".red().bold(), reason));
            return output;
        };

        output.push_str(&Self::environment_line(env));
        if !env.values.is_empty() {
            let width = env.values.keys().map(String::len).max().unwrap_or(0);
            for (key, value) in &env.values {
                output.push_str(&format!("      {}  {}\n", format!("{:width$}", key).dimmed(), value));
            }
        }
        output
    }

    /// One line describing a switch request's result
    pub fn format_switch(domain: &str, outcome: &SwitchOutcome) -> String {
        match outcome {
            SwitchOutcome::Switched { id, exited } => {
                let mut line = format!("{} {} -> {}", "Switched".green().bold(), domain, id);
                if !exited {
                    line.push_str(" (restart to apply everywhere)");
                }
                line
            }
            SwitchOutcome::Ignored(reason) => {
                let reason = match reason {
                    SwitchIgnored::StagingNotAllowed => "staging is not allowed",
                    SwitchIgnored::AlreadySelected => "already selected",
                    SwitchIgnored::UnknownConfiguration => "no such environment",
                };
                format!("{} {}: {}", "Unchanged".yellow().bold(), domain, reason)
            }
        }
    }

    /// Format as JSON
    pub fn format_json<T: serde::Serialize + ?Sized>(value: &T) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    }

    fn domain_header(domain: &DomainView) -> String {
        let mut flags = Vec::new();
        if domain.staging_allowed {
            flags.push("staging allowed");
        }
        if domain.exit_on_change {
            flags.push("exit on change");
        }
        let flags = if flags.is_empty() {
            String::new()
        } else {
            format!(" ({})", flags.join(", "))
        };
        format!("{}{}\n", domain.domain.cyan().bold(), flags.dimmed())
    }

    fn environment_line(env: &EnvironmentView) -> String {
        let marker = if env.current { "*".green().bold() } else { " ".normal() };
        let production = if env.production {
            format!(" {}", "[production]".yellow())
        } else {
            String::new()
        };
        format!("  {} {:>4}  {}{}\n", marker, env.id, env.name, production)
    }
}
