//! Controller and locator errors

use crate::ports::listener::ListenerError;
use crate::ports::persistence::PersistenceError;
use envswitch_domain::{ConfigurationError, ControllerState};
use thiserror::Error;

/// Errors surfaced by [`ConfigurationController`](super::ConfigurationController)
/// and [`ServiceLocator`](crate::locator::ServiceLocator).
#[derive(Error, Debug)]
pub enum ControllerError {
    /// The configuration set failed registration or validation.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// A read or switch was attempted before the controller became ready,
    /// or after it was left invalid. A terminated controller still serves
    /// reads but refuses further switches.
    #[error("Controller '{domain}' is not ready (state: {state})")]
    NotInitialized {
        domain: String,
        state: ControllerState,
    },

    #[error("Controller '{domain}' has already been initialized")]
    AlreadyInitialized { domain: String },

    #[error("No controller registered for domain '{0}'")]
    UnknownDomain(String),

    /// Checked narrowing to a concrete descriptor type failed.
    #[error("Controller '{domain}' holds {actual} descriptors, not {expected}")]
    DescriptorTypeMismatch {
        domain: String,
        expected: &'static str,
        actual: &'static str,
    },

    /// The new selection could not be made durable; no listener was called.
    #[error("Failed to persist configuration selection: {0}")]
    Persistence(#[from] PersistenceError),

    /// A listener failed during fan-out; the process was not terminated.
    #[error("Switch listener failed: {0}")]
    Listener(#[from] ListenerError),
}

impl ControllerError {
    /// Whether the error was raised by startup validation
    pub fn is_validation(&self) -> bool {
        matches!(self, ControllerError::Configuration(_))
    }
}
