//! Console banner for staging notices

use colored::Colorize;
use envswitch_application::WarningNotifier;

/// Prints each notice as a yellow banner on stderr.
///
/// Stderr keeps notices out of JSON written to stdout.
pub struct ConsoleNotifier;

impl ConsoleNotifier {
    pub fn banner(text: &str) -> String {
        format!("{} {}", "!".yellow().bold(), text.yellow().bold())
    }
}

impl WarningNotifier for ConsoleNotifier {
    fn notify(&self, text: &str) {
        eprintln!("{}", Self::banner(text));
    }
}
