//! Configuration sets declared in the config file
//!
//! Each `[domains.<key>]` section becomes a [`TableConfigurationSet`] whose
//! descriptors are [`EnvironmentDescriptor`]s: a name, a production flag and
//! a table of string values.

use super::file_config::{FileDomainConfig, FileEnvironmentConfig};
use envswitch_application::{
    ConfigurationController, ConfigurationSet, ControllerError, Registrar, ServiceLocator,
};
use envswitch_domain::{ConfigId, ConfigurationDescriptor, ConfigurationError, HostContext};
use serde::Serialize;
use std::collections::BTreeMap;

const APP_PLACEHOLDER: &str = "{app}";

/// Environment declared in the config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvironmentDescriptor {
    id: ConfigId,
    name: String,
    production: bool,
    #[serde(skip)]
    raw_values: BTreeMap<String, String>,
    values: BTreeMap<String, String>,
}

impl EnvironmentDescriptor {
    pub fn from_file(env: &FileEnvironmentConfig) -> Self {
        Self {
            id: ConfigId::new(env.id),
            name: env.name.clone(),
            production: env.production,
            raw_values: env.values.clone(),
            values: env.values.clone(),
        }
    }

    /// Value after `{app}` expansion
    pub fn value(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn values(&self) -> &BTreeMap<String, String> {
        &self.values
    }
}

impl ConfigurationDescriptor for EnvironmentDescriptor {
    fn id(&self) -> ConfigId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn is_production(&self) -> bool {
        self.production
    }

    fn init(&mut self, host: &HostContext) {
        // Expand from the raw table so repeated calls give the same result.
        self.values = self
            .raw_values
            .iter()
            .map(|(k, v)| (k.clone(), v.replace(APP_PLACEHOLDER, host.app_name())))
            .collect();
    }
}

/// Configuration set built from a `[domains.<key>]` section.
#[derive(Debug, Clone)]
pub struct TableConfigurationSet {
    environments: Vec<FileEnvironmentConfig>,
    default: Option<i64>,
    exit_on_change: bool,
}

impl TableConfigurationSet {
    pub fn from_file(domain: &FileDomainConfig) -> Self {
        Self {
            environments: domain.environments.clone(),
            default: domain.default,
            exit_on_change: domain.exit_on_change,
        }
    }

    fn production_id(&self) -> Option<i64> {
        self.environments
            .iter()
            .find(|e| e.production)
            .map(|e| e.id)
    }
}

impl ConfigurationSet for TableConfigurationSet {
    type Descriptor = EnvironmentDescriptor;

    /// The declared `default`, else the first non-production environment.
    /// Production when staging is not allowed.
    fn default_config_id(&self, staging_allowed: bool) -> ConfigId {
        let production = self.production_id().unwrap_or_default();
        if !staging_allowed {
            return ConfigId::new(production);
        }
        let staging = self
            .environments
            .iter()
            .find(|e| !e.production)
            .map(|e| e.id);
        ConfigId::new(self.default.or(staging).unwrap_or(production))
    }

    fn add_all_configurations(
        &self,
        registrar: &mut Registrar<'_, EnvironmentDescriptor>,
    ) -> Result<(), ConfigurationError> {
        for env in &self.environments {
            registrar.register(EnvironmentDescriptor::from_file(env))?;
        }
        Ok(())
    }

    fn should_exit_on_change(&self) -> bool {
        self.exit_on_change
    }
}

/// Register a controller for every configured domain.
///
/// Stops at the first domain that fails validation; domains registered
/// before it stay usable.
pub fn register_file_domains(
    locator: &mut ServiceLocator,
    domains: &BTreeMap<String, FileDomainConfig>,
) -> Result<(), ControllerError> {
    for (key, domain) in domains {
        let controller = ConfigurationController::new(TableConfigurationSet::from_file(domain));
        locator.register_controller(key.as_str(), controller)?;
    }
    Ok(())
}
