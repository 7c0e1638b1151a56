//! Environment configuration concepts
//!
//! A *domain* (e.g. "api-server") owns a set of descriptors, exactly one of
//! which is elected production. These types carry no I/O; the controller
//! that drives them lives in the application layer.

mod descriptor;
mod id;
mod setting_key;
mod state;

pub use descriptor::{AsAny, ConfigurationDescriptor};
pub use id::ConfigId;
pub use setting_key::{SETTING_KEY_NAMESPACE, SettingKey};
pub use state::ControllerState;
