//! Controller lifecycle state

use serde::Serialize;
use std::fmt;

/// Lifecycle of a configuration controller
///
/// `Fresh → Registering → Initializing → Validating → Ready`, then either
/// `Ready` indefinitely or `Switching → Terminated`. Any validation failure
/// leaves the controller `Invalid`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ControllerState {
    Fresh,
    Registering,
    Initializing,
    Validating,
    Ready,
    Switching,
    Terminated,
    Invalid,
}

impl ControllerState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ControllerState::Fresh => "fresh",
            ControllerState::Registering => "registering",
            ControllerState::Initializing => "initializing",
            ControllerState::Validating => "validating",
            ControllerState::Ready => "ready",
            ControllerState::Switching => "switching",
            ControllerState::Terminated => "terminated",
            ControllerState::Invalid => "invalid",
        }
    }

    /// Whether the controller has passed validation and can answer reads.
    ///
    /// A terminated controller still answers: the terminator is a
    /// collaborator and may return in tests.
    pub fn can_serve_reads(&self) -> bool {
        matches!(
            self,
            ControllerState::Ready | ControllerState::Switching | ControllerState::Terminated
        )
    }

    /// Whether `initialize` has already been attempted.
    pub fn has_started(&self) -> bool {
        !matches!(self, ControllerState::Fresh)
    }
}

impl fmt::Display for ControllerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
