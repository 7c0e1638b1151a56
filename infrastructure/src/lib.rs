//! Infrastructure layer for envswitch
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, plus configuration file loading.

pub mod config;
pub mod preferences;
pub mod process;

// Re-export commonly used types
pub use config::{
    ConfigIssue, ConfigIssueCode, ConfigLoader, EnvironmentDescriptor, FileConfig,
    FileDomainConfig, FileEnvironmentConfig, FileSwitcherConfig, Severity, TableConfigurationSet,
    register_file_domains,
};
pub use preferences::{JsonPreferenceStore, MemoryPreferenceStore};
pub use process::{ProcessExitTerminator, TracingNotifier};
