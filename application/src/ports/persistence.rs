//! Preference persistence port
//!
//! Defines the key/value facility that stores each domain's selected
//! configuration id between process runs.

use thiserror::Error;

/// Errors raised by a [`PreferenceStore`] adapter.
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("Failed to read preferences from {location}: {message}")]
    Read { location: String, message: String },

    #[error("Failed to write preferences to {location}: {message}")]
    Write { location: String, message: String },

    #[error("Preference store unavailable: {0}")]
    Unavailable(String),
}

/// Port for the string-keyed integer store that backs configuration
/// selection.
///
/// `put_long` may stage a value; it only has to be visible to the next
/// process once `commit` has returned `Ok`.
pub trait PreferenceStore: Send + Sync {
    /// Read the value stored under `key`, or `default` when absent.
    fn get_long(&self, key: &str, default: i64) -> Result<i64, PersistenceError>;

    /// Stage `value` under `key`.
    fn put_long(&self, key: &str, value: i64) -> Result<(), PersistenceError>;

    /// Make every staged write durable.
    fn commit(&self) -> Result<(), PersistenceError>;
}
