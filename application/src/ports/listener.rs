//! Switch listener port

use envswitch_domain::{ConfigurationDescriptor, HostContext};
use thiserror::Error;

/// Failure reported by a [`SwitchListener`]. Aborts the switch before the
/// process is terminated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ListenerError {
    message: String,
}

impl ListenerError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Callback fired when a controller switches to another configuration.
///
/// Listeners are held by strong reference until removed, so anything they
/// capture lives as long as the controller. Clear caches or data that
/// depends on the environment here; the process is terminated right after
/// every listener has returned.
pub trait SwitchListener: Send + Sync {
    fn on_switch(
        &self,
        host: &HostContext,
        descriptor: &dyn ConfigurationDescriptor,
    ) -> Result<(), ListenerError>;
}
