//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly; [`FileConfig::validate`] reports problems
//! before any controller is built from them.

mod domains;
mod switcher;

pub use domains::{FileDomainConfig, FileEnvironmentConfig};
pub use switcher::FileSwitcherConfig;

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the domain cannot be registered.
    Error,
    /// Non-fatal: the domain works but may not behave as expected.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// No `[domains.*]` section is configured.
    NoDomains,
    /// A domain does not declare exactly one production environment.
    ProductionCount { domain: String, count: usize },
    /// Two environments share an id; the later one wins.
    DuplicateEnvironmentId { domain: String, id: i64 },
    /// An environment has a blank name.
    BlankName { domain: String, id: i64 },
    /// `default` names an id that is not declared; production is used instead.
    UnknownDefault { domain: String, id: i64 },
}

/// A detected issue in the configuration file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Process-wide switcher settings
    pub switcher: FileSwitcherConfig,
    /// Environment sets keyed by domain
    pub domains: BTreeMap<String, FileDomainConfig>,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.domains.is_empty() {
            issues.push(ConfigIssue {
                severity: Severity::Warning,
                code: ConfigIssueCode::NoDomains,
                message: "no [domains.*] sections are configured".to_string(),
            });
        }

        for (key, domain) in &self.domains {
            let production = domain.environments.iter().filter(|e| e.production).count();
            if production != 1 {
                issues.push(ConfigIssue {
                    severity: Severity::Error,
                    code: ConfigIssueCode::ProductionCount {
                        domain: key.clone(),
                        count: production,
                    },
                    message: format!(
                        "domains.{}: expected exactly one production environment, found {}",
                        key, production
                    ),
                });
            }

            let mut seen = HashSet::new();
            for env in &domain.environments {
                if !seen.insert(env.id) {
                    issues.push(ConfigIssue {
                        severity: Severity::Warning,
                        code: ConfigIssueCode::DuplicateEnvironmentId {
                            domain: key.clone(),
                            id: env.id,
                        },
                        message: format!(
                            "domains.{}: environment id {} is declared more than once; the last one wins",
                            key, env.id
                        ),
                    });
                }
                if env.name.trim().is_empty() {
                    issues.push(ConfigIssue {
                        severity: Severity::Error,
                        code: ConfigIssueCode::BlankName {
                            domain: key.clone(),
                            id: env.id,
                        },
                        message: format!("domains.{}: environment {} has no name", key, env.id),
                    });
                }
            }

            if let Some(default) = domain.default
                && !domain.contains(default)
            {
                issues.push(ConfigIssue {
                    severity: Severity::Warning,
                    code: ConfigIssueCode::UnknownDefault {
                        domain: key.clone(),
                        id: default,
                    },
                    message: format!(
                        "domains.{}: default id {} is not declared, falling back to production",
                        key, default
                    ),
                });
            }
        }

        issues
    }

    /// Whether any issue is fatal
    pub fn has_errors(issues: &[ConfigIssue]) -> bool {
        issues.iter().any(|i| i.severity == Severity::Error)
    }
}
