//! Presentation layer for envswitch
//!
//! This crate contains CLI definitions, output formatters and the console
//! notifier for staging notices.

pub mod cli;
pub mod output;

// Re-export commonly used types
pub use cli::commands::{Cli, Command, OutputFormat};
pub use output::{
    ConsoleFormatter, ConsoleNotifier, ConsoleSwitchReporter, DomainView, EnvironmentView,
};
