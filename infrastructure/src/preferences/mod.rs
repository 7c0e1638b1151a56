//! Preference store adapters
//!
//! Implementations of the [`PreferenceStore`](envswitch_application::PreferenceStore)
//! port: a JSON file that survives process restarts, and an in-memory map
//! for previews and tests.

mod json_store;
mod memory_store;

pub use json_store::JsonPreferenceStore;
pub use memory_store::MemoryPreferenceStore;
