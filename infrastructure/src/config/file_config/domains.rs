//! Domain configuration from TOML (`[domains.<key>]` sections)

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Raw configuration of one domain's environments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDomainConfig {
    /// Id selected on first run when staging is allowed
    pub default: Option<i64>,
    /// Terminate the process after a switch
    pub exit_on_change: bool,
    /// Declared environments
    pub environments: Vec<FileEnvironmentConfig>,
}

impl Default for FileDomainConfig {
    fn default() -> Self {
        Self {
            default: None,
            exit_on_change: true,
            environments: Vec::new(),
        }
    }
}

impl FileDomainConfig {
    /// Id of the first environment marked production
    pub fn production_id(&self) -> Option<i64> {
        self.environments
            .iter()
            .find(|e| e.production)
            .map(|e| e.id)
    }

    pub fn contains(&self, id: i64) -> bool {
        self.environments.iter().any(|e| e.id == id)
    }
}

/// Raw environment entry (`[[domains.<key>.environments]]`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEnvironmentConfig {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub production: bool,
    /// Free-form settings; `{app}` expands to the application name
    #[serde(default)]
    pub values: BTreeMap<String, String>,
}
