//! Output rendering: console text, JSON and staging notices

pub mod console;
pub mod notifier;
pub mod reporter;
pub mod view;

pub use console::ConsoleFormatter;
pub use notifier::ConsoleNotifier;
pub use reporter::ConsoleSwitchReporter;
pub use view::{DomainView, EnvironmentView};
