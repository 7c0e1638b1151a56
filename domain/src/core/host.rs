//! Host context value object

use std::path::{Path, PathBuf};

/// Handle to the embedding application (Value Object)
///
/// Passed through to descriptors during `init` and to switch listeners.
/// The core never inspects it beyond handing it on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostContext {
    app_name: String,
    data_dir: Option<PathBuf>,
}

impl HostContext {
    /// Create a context for the named application
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            data_dir: None,
        }
    }

    /// Attach the directory where the application keeps its data
    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(data_dir.into());
        self
    }

    /// Get the application name
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Get the application data directory, if one was attached
    pub fn data_dir(&self) -> Option<&Path> {
        self.data_dir.as_deref()
    }
}

impl Default for HostContext {
    fn default() -> Self {
        Self::new("envswitch")
    }
}
