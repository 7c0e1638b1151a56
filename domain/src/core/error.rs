//! Domain error types

use crate::configuration::ConfigId;
use thiserror::Error;

/// Validation failures raised while a configuration set is registered
/// and elected.
///
/// All variants are fatal for the controller that raised them: a set that
/// fails validation never becomes ready.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error(
        "Configurations {existing} and {duplicate} both report production; only one may be production"
    )]
    DuplicateProductionConfiguration {
        existing: ConfigId,
        duplicate: ConfigId,
    },

    #[error("None of the registered configurations report production")]
    NoProductionConfiguration,

    #[error("No configurations were registered")]
    EmptyConfigurationSet,

    #[error("Configuration {id} has an empty name after initialization")]
    EmptyName { id: ConfigId },
}

impl ConfigurationError {
    /// Check if this error concerns the production election
    pub fn is_election_failure(&self) -> bool {
        matches!(
            self,
            ConfigurationError::DuplicateProductionConfiguration { .. }
                | ConfigurationError::NoProductionConfiguration
        )
    }
}
