//! Application layer for envswitch
//!
//! This crate contains the configuration controller state machine, the
//! service locator that wires controllers to shared process services, and
//! the port definitions those services implement.
//! It depends only on the domain layer.

pub mod controller;
pub mod locator;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types
pub use controller::{
    ConfigurationController, ConfigurationSet, ControllerError, ControllerServices, Registrar,
    SwitchIgnored, SwitchOutcome, TypedController,
};
pub use locator::{LocatorSettings, STAGING_ON_RELEASE_WARNING, ServiceLocator};
pub use ports::{
    listener::{ListenerError, SwitchListener},
    notifier::{NoNotifier, WarningNotifier},
    persistence::{PersistenceError, PreferenceStore},
    terminator::TerminatorPort,
};
