//! Domain layer for envswitch
//!
//! This crate contains the value objects and entities that describe
//! switchable environment configurations. It has no dependencies on
//! persistence, process control or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Descriptor
//!
//! A [`ConfigurationDescriptor`] is one named environment (production,
//! staging, ...) identified by a stable [`ConfigId`].
//!
//! ## Domain
//!
//! A group of descriptors managed together under a domain key such as
//! `"api-server"`. Exactly one descriptor in a domain is elected production;
//! the user's selection is persisted under a [`SettingKey`] derived from the
//! domain key.

pub mod configuration;
pub mod core;

// Re-export commonly used types
pub use configuration::{
    AsAny, ConfigId, ConfigurationDescriptor, ControllerState, SETTING_KEY_NAMESPACE, SettingKey,
};
pub use core::{error::ConfigurationError, host::HostContext};
