//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for listings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Colored human-readable text
    #[default]
    Text,
    /// JSON output
    Json,
}

/// CLI arguments for envswitch
#[derive(Parser, Debug)]
#[command(name = "envswitch")]
#[command(author, version, about = "Runtime environment switcher for multi-backend applications")]
#[command(long_about = r#"
envswitch keeps one selected environment per configuration domain
(production, staging, QA, ...) and persists the selection across restarts.

Configuration files are loaded from (in priority order):
1. ENVSWITCH_* environment variables
2. --config <path>     Explicit config file
3. ./envswitch.toml    Project-level config
4. ~/.config/envswitch/config.toml   Global config

Example:
  envswitch --staging-allowed list
  envswitch current api-server --format json
  envswitch --staging-allowed switch api-server 2
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Allow non-production environments (overrides the config file)
    #[arg(long, global = true)]
    pub staging_allowed: bool,

    /// Treat this run as a debug build, suppressing staging warnings
    #[arg(long, global = true)]
    pub debug_build: bool,

    /// Keep selections in memory instead of the preference file
    #[arg(long, global = true)]
    pub ephemeral: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Route staging notices to the log instead of the console
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List every domain with its environments
    List {
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
    /// Show the environment currently in use for a domain
    Current {
        /// Domain key, as declared under [domains.<key>]
        domain: String,
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
    /// Select another environment for a domain
    Switch {
        /// Domain key, as declared under [domains.<key>]
        domain: String,
        /// Environment id
        id: i64,
    },
    /// Show configuration file locations
    Sources,
}
