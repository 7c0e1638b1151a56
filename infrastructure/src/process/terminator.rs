//! Terminator that ends the current process.

use envswitch_application::TerminatorPort;
use tracing::info;

/// Calls [`std::process::exit`]; never returns.
pub struct ProcessExitTerminator;

impl TerminatorPort for ProcessExitTerminator {
    fn exit(&self, code: i32) {
        info!("Exiting with code {} to apply configuration switch", code);
        std::process::exit(code);
    }
}
