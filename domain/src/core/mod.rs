//! Core domain concepts shared across the crate.
//!
//! - [`host::HostContext`]: the host-process handle passed to descriptors and listeners
//! - [`error::ConfigurationError`]: validation failures for a configuration set

pub mod error;
pub mod host;
