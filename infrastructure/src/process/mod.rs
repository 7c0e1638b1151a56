//! Process-level adapters: warning notification and termination.

mod notifier;
mod terminator;

pub use notifier::TracingNotifier;
pub use terminator::ProcessExitTerminator;
