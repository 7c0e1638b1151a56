//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod listener;
pub mod notifier;
pub mod persistence;
pub mod terminator;
