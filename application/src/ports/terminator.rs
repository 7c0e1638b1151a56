//! Process termination port

/// Ends the process after a configuration switch so the new selection is
/// observed cleanly on the next start.
///
/// Production adapters never return from [`exit`](Self::exit). Test doubles
/// record the call and return; the controller logs that as an error and
/// leaves itself `Terminated`.
pub trait TerminatorPort: Send + Sync {
    fn exit(&self, code: i32);
}
