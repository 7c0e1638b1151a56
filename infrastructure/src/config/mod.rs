//! Configuration file loading for envswitch
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `ENVSWITCH_*` environment variables (`__` separates nesting)
//! 2. `--config <path>` specified file
//! 3. Project root: `./envswitch.toml` or `./.envswitch.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/envswitch/config.toml`
//! 5. Default values
//!
//! Declared `[domains.*]` become controllers through [`TableConfigurationSet`].

mod environment_set;
mod file_config;
mod loader;

pub use environment_set::{EnvironmentDescriptor, TableConfigurationSet, register_file_domains};
pub use file_config::{
    ConfigIssue, ConfigIssueCode, FileConfig, FileDomainConfig, FileEnvironmentConfig,
    FileSwitcherConfig, Severity,
};
pub use loader::ConfigLoader;
