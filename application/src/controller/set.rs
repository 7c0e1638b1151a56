//! Configuration set extension point and descriptor registration

use envswitch_domain::{ConfigId, ConfigurationDescriptor, ConfigurationError};
use std::collections::BTreeMap;
use std::marker::PhantomData;
use tracing::{debug, warn};

/// The per-domain extension surface an embedding application implements.
///
/// One `ConfigurationSet` describes every environment of a domain and the
/// policy for switching between them. Hand it to
/// [`ConfigurationController::new`](super::ConfigurationController::new).
///
/// # Examples
///
/// ```
/// use envswitch_application::{ConfigurationSet, Registrar};
/// use envswitch_domain::{ConfigId, ConfigurationDescriptor, ConfigurationError};
///
/// struct Api { id: i64, production: bool }
///
/// impl ConfigurationDescriptor for Api {
///     fn id(&self) -> ConfigId { ConfigId::new(self.id) }
///     fn name(&self) -> &str { if self.production { "Production" } else { "Staging" } }
///     fn is_production(&self) -> bool { self.production }
/// }
///
/// struct ApiSet;
///
/// impl ConfigurationSet for ApiSet {
///     type Descriptor = Api;
///
///     fn default_config_id(&self, staging_allowed: bool) -> ConfigId {
///         ConfigId::new(if staging_allowed { 2 } else { 1 })
///     }
///
///     fn add_all_configurations(
///         &self,
///         registrar: &mut Registrar<'_, Api>,
///     ) -> Result<(), ConfigurationError> {
///         registrar.register(Api { id: 1, production: true })?;
///         registrar.register(Api { id: 2, production: false })
///     }
///
///     fn should_exit_on_change(&self) -> bool {
///         true
///     }
/// }
/// ```
pub trait ConfigurationSet: Send + Sync + 'static {
    /// Concrete descriptor type of this domain, recovered by typed lookups.
    type Descriptor: ConfigurationDescriptor;

    /// Id to select on first run. Ignored when staging is not allowed.
    fn default_config_id(&self, staging_allowed: bool) -> ConfigId;

    /// Register every descriptor of the domain. Exactly one must report
    /// production. Descriptors are initialized after this returns.
    fn add_all_configurations(
        &self,
        registrar: &mut Registrar<'_, Self::Descriptor>,
    ) -> Result<(), ConfigurationError>;

    /// Whether an accepted switch terminates the process.
    fn should_exit_on_change(&self) -> bool;
}

/// Object-safe view of a [`ConfigurationSet`] with its descriptor type erased.
pub(crate) trait ErasedConfigurationSet: Send + Sync {
    fn default_config_id(&self, staging_allowed: bool) -> ConfigId;

    fn add_all_configurations(
        &self,
        registry: &mut DescriptorRegistry,
    ) -> Result<(), ConfigurationError>;

    fn should_exit_on_change(&self) -> bool;
}

impl<S: ConfigurationSet> ErasedConfigurationSet for S {
    fn default_config_id(&self, staging_allowed: bool) -> ConfigId {
        ConfigurationSet::default_config_id(self, staging_allowed)
    }

    fn add_all_configurations(
        &self,
        registry: &mut DescriptorRegistry,
    ) -> Result<(), ConfigurationError> {
        let mut registrar = Registrar::new(registry);
        ConfigurationSet::add_all_configurations(self, &mut registrar)
    }

    fn should_exit_on_change(&self) -> bool {
        ConfigurationSet::should_exit_on_change(self)
    }
}

/// Typed handle passed to [`ConfigurationSet::add_all_configurations`].
pub struct Registrar<'a, D> {
    registry: &'a mut DescriptorRegistry,
    _descriptor: PhantomData<fn(D)>,
}

impl<'a, D: ConfigurationDescriptor> Registrar<'a, D> {
    pub(crate) fn new(registry: &'a mut DescriptorRegistry) -> Self {
        Self {
            registry,
            _descriptor: PhantomData,
        }
    }

    /// Add a descriptor to the set.
    ///
    /// # Errors
    ///
    /// [`ConfigurationError::DuplicateProductionConfiguration`] if another
    /// production descriptor was already registered.
    pub fn register(&mut self, descriptor: D) -> Result<(), ConfigurationError> {
        self.registry.insert(Box::new(descriptor))
    }

    /// Number of descriptors registered so far
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }
}

/// Descriptors of one domain keyed by id, plus the production election.
#[derive(Default)]
pub(crate) struct DescriptorRegistry {
    descriptors: BTreeMap<ConfigId, Box<dyn ConfigurationDescriptor>>,
    production_id: Option<ConfigId>,
}

impl DescriptorRegistry {
    pub(crate) fn insert(
        &mut self,
        descriptor: Box<dyn ConfigurationDescriptor>,
    ) -> Result<(), ConfigurationError> {
        let id = descriptor.id();
        let is_production = descriptor.is_production();

        if is_production && let Some(existing) = self.production_id {
            return Err(ConfigurationError::DuplicateProductionConfiguration {
                existing,
                duplicate: id,
            });
        }

        if self.descriptors.insert(id, descriptor).is_some() {
            warn!("Configuration id {} registered twice; keeping the later one", id);
        }
        if is_production {
            self.production_id = Some(id);
        }
        debug!("Registered configuration {} (production: {})", id, is_production);
        Ok(())
    }

    pub(crate) fn production_id(&self) -> Option<ConfigId> {
        self.production_id
    }

    pub(crate) fn get(&self, id: ConfigId) -> Option<&dyn ConfigurationDescriptor> {
        self.descriptors.get(&id).map(|d| &**d)
    }

    pub(crate) fn contains(&self, id: ConfigId) -> bool {
        self.descriptors.contains_key(&id)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &(dyn ConfigurationDescriptor + 'static)> {
        self.descriptors.values().map(|d| &**d)
    }

    pub(crate) fn iter_mut(
        &mut self,
    ) -> impl Iterator<Item = &mut Box<dyn ConfigurationDescriptor>> {
        self.descriptors.values_mut()
    }

    pub(crate) fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ServerConfiguration;

    #[test]
    fn test_register_elects_production() {
        let mut registry = DescriptorRegistry::default();
        let mut registrar = Registrar::new(&mut registry);
        registrar.register(ServerConfiguration::production(1)).unwrap();
        registrar.register(ServerConfiguration::staging(2)).unwrap();
        assert_eq!(registrar.len(), 2);

        assert_eq!(registry.production_id(), Some(ConfigId::new(1)));
        assert!(registry.contains(ConfigId::new(2)));
    }

    #[test]
    fn test_second_production_rejected() {
        let mut registry = DescriptorRegistry::default();
        let mut registrar = Registrar::new(&mut registry);
        registrar.register(ServerConfiguration::production(1)).unwrap();
        let err = registrar
            .register(ServerConfiguration::production(2))
            .unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::DuplicateProductionConfiguration {
                existing: ConfigId::new(1),
                duplicate: ConfigId::new(2),
            }
        );
        assert_eq!(registry.production_id(), Some(ConfigId::new(1)));
    }

    #[test]
    fn test_reregistering_production_id_still_fails() {
        let mut registry = DescriptorRegistry::default();
        registry
            .insert(Box::new(ServerConfiguration::production(1)))
            .unwrap();
        let err = registry
            .insert(Box::new(ServerConfiguration::production(1)))
            .unwrap_err();
        assert!(err.is_election_failure());
    }

    #[test]
    fn test_duplicate_id_overwrites() {
        let mut registry = DescriptorRegistry::default();
        registry
            .insert(Box::new(ServerConfiguration::staging(2)))
            .unwrap();
        registry
            .insert(Box::new(ServerConfiguration::staging(2).with_host("https://qa.example.com")))
            .unwrap();
        assert_eq!(registry.len(), 1);

        let kept = registry
            .get(ConfigId::new(2))
            .and_then(|d| d.downcast_ref::<ServerConfiguration>())
            .unwrap();
        assert_eq!(kept.server_host(), "https://qa.example.com");
    }
}
