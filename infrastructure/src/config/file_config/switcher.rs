//! Switcher configuration from TOML (`[switcher]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw process-level switcher configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSwitcherConfig {
    /// Application name handed to descriptors through the host context
    pub app_name: String,
    /// Allow non-production configurations to be selected
    pub staging_allowed: bool,
    /// Treat this as a debug build (suppresses release warnings)
    pub debug_build: bool,
    /// Where selections are persisted
    pub store_path: Option<PathBuf>,
}

impl Default for FileSwitcherConfig {
    fn default() -> Self {
        Self {
            app_name: "envswitch".to_string(),
            staging_allowed: false,
            debug_build: false,
            store_path: None,
        }
    }
}

impl FileSwitcherConfig {
    /// Preference file path: `store_path` if set, otherwise
    /// `$XDG_DATA_HOME/envswitch/preferences.json`, falling back to
    /// `./.envswitch/preferences.json` when no data directory is known.
    pub fn resolved_store_path(&self) -> PathBuf {
        if let Some(path) = &self.store_path {
            return path.clone();
        }
        dirs::data_dir()
            .map(|d| d.join("envswitch"))
            .unwrap_or_else(|| PathBuf::from(".envswitch"))
            .join("preferences.json")
    }

    /// Directory holding the preference file, exposed to descriptors
    pub fn data_dir(&self) -> Option<PathBuf> {
        self.resolved_store_path().parent().map(PathBuf::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_production_only() {
        let config = FileSwitcherConfig::default();
        assert!(!config.staging_allowed);
        assert!(!config.debug_build);
        assert_eq!(config.app_name, "envswitch");
    }

    #[test]
    fn test_explicit_store_path_wins() {
        let config = FileSwitcherConfig {
            store_path: Some(PathBuf::from("/tmp/prefs.json")),
            ..Default::default()
        };
        assert_eq!(config.resolved_store_path(), PathBuf::from("/tmp/prefs.json"));
        assert_eq!(config.data_dir(), Some(PathBuf::from("/tmp")));
    }

    #[test]
    fn test_default_store_path_file_name() {
        let path = FileSwitcherConfig::default().resolved_store_path();
        assert!(path.ends_with("envswitch/preferences.json") || path.ends_with(".envswitch/preferences.json"));
    }
}
