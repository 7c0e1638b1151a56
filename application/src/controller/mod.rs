//! Configuration controller
//!
//! A [`ConfigurationController`] owns the descriptors of one domain and
//! drives them through their lifecycle:
//!
//! 1. **Register** - the [`ConfigurationSet`] adds every descriptor and the
//!    production descriptor is elected
//! 2. **Initialize** - each descriptor's `init` runs once with the host context
//! 3. **Validate** - a production descriptor must exist and the set must be non-empty
//! 4. **Ready** - reads resolve the persisted selection, falling back to production
//! 5. **Switch** - persist, notify listeners, then terminate the process
//!
//! Controllers are normally created by the embedding application and handed
//! to [`ServiceLocator::register_controller`](crate::locator::ServiceLocator::register_controller),
//! which supplies the shared process services.

mod error;
mod set;
mod typed;

pub use error::ControllerError;
pub use set::{ConfigurationSet, Registrar};
pub use typed::TypedController;

use crate::ports::listener::SwitchListener;
use crate::ports::notifier::WarningNotifier;
use crate::ports::persistence::PreferenceStore;
use crate::ports::terminator::TerminatorPort;
use envswitch_domain::{
    ConfigId, ConfigurationDescriptor, ConfigurationError, ControllerState, HostContext,
    SettingKey,
};
use set::{DescriptorRegistry, ErasedConfigurationSet};
use std::any::{TypeId, type_name};
use std::sync::{Arc, OnceLock};
use tracing::{error, info, warn};

/// Process-level collaborators shared by every controller.
#[derive(Clone)]
pub struct ControllerServices {
    pub host: Arc<HostContext>,
    pub preferences: Arc<dyn PreferenceStore>,
    pub notifier: Arc<dyn WarningNotifier>,
    pub terminator: Arc<dyn TerminatorPort>,
}

impl ControllerServices {
    pub fn new(
        host: Arc<HostContext>,
        preferences: Arc<dyn PreferenceStore>,
        notifier: Arc<dyn WarningNotifier>,
        terminator: Arc<dyn TerminatorPort>,
    ) -> Self {
        Self {
            host,
            preferences,
            notifier,
            terminator,
        }
    }
}

/// Why a call to [`ConfigurationController::set_selected_config_id`] changed nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchIgnored {
    StagingNotAllowed,
    AlreadySelected,
    UnknownConfiguration,
}

/// Result of a switch request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchOutcome {
    /// Nothing was persisted, notified or terminated.
    Ignored(SwitchIgnored),
    /// The selection was persisted and every listener notified. `exited`
    /// is true when the terminator was invoked.
    Switched { id: ConfigId, exited: bool },
}

impl SwitchOutcome {
    pub fn is_switched(&self) -> bool {
        matches!(self, SwitchOutcome::Switched { .. })
    }
}

/// State machine managing the environment configurations of one domain.
pub struct ConfigurationController {
    set: Box<dyn ErasedConfigurationSet>,
    descriptor_type: TypeId,
    descriptor_type_name: &'static str,
    registry: DescriptorRegistry,
    state: ControllerState,
    domain_key: String,
    setting_key: Option<SettingKey>,
    staging_allowed: bool,
    services: Option<ControllerServices>,
    selected: OnceLock<ConfigId>,
    listeners: Vec<Arc<dyn SwitchListener>>,
}

impl ConfigurationController {
    /// Create a fresh controller for the given configuration set.
    ///
    /// Nothing is registered until [`initialize`](Self::initialize) runs.
    pub fn new<S: ConfigurationSet>(set: S) -> Self {
        Self {
            set: Box::new(set),
            descriptor_type: TypeId::of::<S::Descriptor>(),
            descriptor_type_name: type_name::<S::Descriptor>(),
            registry: DescriptorRegistry::default(),
            state: ControllerState::Fresh,
            domain_key: String::new(),
            setting_key: None,
            staging_allowed: false,
            services: None,
            selected: OnceLock::new(),
            listeners: Vec::new(),
        }
    }

    /// Register, initialize and validate every configuration of the domain.
    ///
    /// On success the controller is [`ControllerState::Ready`]. A validation
    /// failure leaves it [`ControllerState::Invalid`] and every later read
    /// fails.
    ///
    /// When staging is allowed on a non-debug build a single advisory
    /// warning is sent through the notifier.
    ///
    /// # Errors
    ///
    /// - [`ControllerError::AlreadyInitialized`] - called a second time
    /// - [`ControllerError::Configuration`] - duplicate or missing production
    ///   configuration, empty set, or an unnamed descriptor
    pub fn initialize(
        &mut self,
        services: ControllerServices,
        domain_key: &str,
        staging_allowed: bool,
        debug_build: bool,
    ) -> Result<(), ControllerError> {
        if self.state.has_started() {
            return Err(ControllerError::AlreadyInitialized {
                domain: domain_key.to_string(),
            });
        }

        self.domain_key = domain_key.to_string();
        self.setting_key = Some(SettingKey::for_domain(domain_key));
        self.staging_allowed = staging_allowed;
        let host = Arc::clone(&services.host);
        self.services = Some(services);

        if let Err(e) = self.register_and_validate(&host) {
            self.state = ControllerState::Invalid;
            warn!("Configuration controller '{}' is invalid: {}", domain_key, e);
            return Err(e.into());
        }
        self.state = ControllerState::Ready;

        info!(
            "Configuration controller '{}' ready with {} configurations",
            domain_key,
            self.registry.len()
        );

        if staging_allowed && !debug_build {
            let text = if self.is_staging_enabled()? {
                format!("DEBUG: STAGING IS IN USE FOR {}", domain_key)
            } else {
                format!("DEBUG: STAGING ALLOWED FOR {}", domain_key)
            };
            self.notify(&text);
        }

        Ok(())
    }

    fn register_and_validate(&mut self, host: &HostContext) -> Result<(), ConfigurationError> {
        self.state = ControllerState::Registering;
        self.set.add_all_configurations(&mut self.registry)?;

        self.state = ControllerState::Initializing;
        for descriptor in self.registry.iter_mut() {
            descriptor.init(host);
        }

        self.state = ControllerState::Validating;
        if self.registry.production_id().is_none() {
            return Err(ConfigurationError::NoProductionConfiguration);
        }
        if self.registry.is_empty() {
            return Err(ConfigurationError::EmptyConfigurationSet);
        }
        if let Some(unnamed) = self.registry.iter().find(|d| d.name().trim().is_empty()) {
            return Err(ConfigurationError::EmptyName { id: unnamed.id() });
        }
        Ok(())
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn domain_key(&self) -> &str {
        &self.domain_key
    }

    /// Key under which the selection is persisted. `None` before initialization.
    pub fn setting_key(&self) -> Option<&SettingKey> {
        self.setting_key.as_ref()
    }

    pub fn is_staging_allowed(&self) -> bool {
        self.staging_allowed
    }

    /// Whether this set's policy terminates the process after a switch
    pub fn should_exit_on_change(&self) -> bool {
        self.set.should_exit_on_change()
    }

    /// Fully qualified name of the descriptor type this controller holds
    pub fn descriptor_type_name(&self) -> &'static str {
        self.descriptor_type_name
    }

    pub(crate) fn descriptor_type(&self) -> TypeId {
        self.descriptor_type
    }

    /// Id of the elected production configuration.
    pub fn production_config_id(&self) -> Result<ConfigId, ControllerError> {
        self.ensure_ready()?;
        self.registry
            .production_id()
            .ok_or_else(|| self.not_initialized())
    }

    /// Currently selected configuration id.
    ///
    /// When staging is not allowed this is always the production id and any
    /// persisted value is ignored. Otherwise the persisted value is read once
    /// (falling back to the set's default id) and cached.
    pub fn selected_config_id(&self) -> Result<ConfigId, ControllerError> {
        let production = self.production_config_id()?;
        let services = self.services()?;
        Ok(*self
            .selected
            .get_or_init(|| self.load_selected_id(services, production)))
    }

    fn load_selected_id(&self, services: &ControllerServices, production: ConfigId) -> ConfigId {
        if !self.staging_allowed {
            return production;
        }

        let default = self.set.default_config_id(true);
        let Some(key) = &self.setting_key else {
            return default;
        };
        match services.preferences.get_long(key.as_str(), default.value()) {
            Ok(value) => ConfigId::new(value),
            Err(e) => {
                warn!(
                    "Could not read selection for '{}', using default {}: {}",
                    self.domain_key, default, e
                );
                default
            }
        }
    }

    /// Whether a non-production configuration is currently selected
    pub fn is_staging_enabled(&self) -> Result<bool, ControllerError> {
        Ok(self.selected_config_id()? != self.production_config_id()?)
    }

    /// Currently selected configuration.
    ///
    /// If the selected id is not registered (for example a persisted id
    /// from an older build) a warning is logged and the production
    /// configuration is returned instead.
    pub fn current(&self) -> Result<&dyn ConfigurationDescriptor, ControllerError> {
        let selected = self.selected_config_id()?;
        if let Some(descriptor) = self.registry.get(selected) {
            return Ok(descriptor);
        }

        let production = self.production_config_id()?;
        warn!(
            "Selected configuration {} for '{}' is not registered; falling back to production configuration {}",
            selected, self.domain_key, production
        );
        self.registry
            .get(production)
            .ok_or_else(|| self.not_initialized())
    }

    /// Look up a registered configuration by id
    pub fn descriptor(&self, id: ConfigId) -> Option<&dyn ConfigurationDescriptor> {
        self.registry.get(id)
    }

    /// All registered configurations ordered by id
    pub fn descriptors(&self) -> impl Iterator<Item = &(dyn ConfigurationDescriptor + 'static)> {
        self.registry.iter()
    }

    /// Select another configuration, notify listeners, then terminate.
    ///
    /// The request is ignored when staging is not allowed, when `id` is
    /// already selected, or when `id` is not registered.
    ///
    /// Otherwise the new id is committed to the preference store before any
    /// listener runs, and every listener returns before the terminator is
    /// invoked (only if the set's `should_exit_on_change` policy is true).
    ///
    /// # Errors
    ///
    /// - [`ControllerError::NotInitialized`] - controller is not ready, or
    ///   has already terminated after an earlier switch
    /// - [`ControllerError::Persistence`] - the write failed; nothing was notified
    /// - [`ControllerError::Listener`] - a listener failed; the process was not terminated
    pub fn set_selected_config_id(&mut self, id: ConfigId) -> Result<SwitchOutcome, ControllerError> {
        let current = self.selected_config_id()?;
        if self.state == ControllerState::Terminated {
            return Err(self.not_initialized());
        }

        if !self.staging_allowed {
            return Ok(SwitchOutcome::Ignored(SwitchIgnored::StagingNotAllowed));
        }
        if !self.registry.contains(id) {
            return Ok(SwitchOutcome::Ignored(SwitchIgnored::UnknownConfiguration));
        }
        if id == current {
            return Ok(SwitchOutcome::Ignored(SwitchIgnored::AlreadySelected));
        }

        self.state = ControllerState::Switching;
        let result = self.persist_and_notify(id);
        if let Err(e) = result {
            self.state = ControllerState::Ready;
            return Err(e);
        }

        if !self.set.should_exit_on_change() {
            self.state = ControllerState::Ready;
            return Ok(SwitchOutcome::Switched { id, exited: false });
        }

        info!("Shutting down to apply configuration switch for '{}'", self.domain_key);
        self.state = ControllerState::Terminated;
        self.services()?.terminator.exit(0);
        error!(
            "Terminator returned after switching '{}'; the process is still running",
            self.domain_key
        );
        Ok(SwitchOutcome::Switched { id, exited: true })
    }

    fn persist_and_notify(&mut self, id: ConfigId) -> Result<(), ControllerError> {
        let services = self.services()?.clone();
        let key = self.setting_key.clone().ok_or_else(|| self.not_initialized())?;

        services.preferences.put_long(key.as_str(), id.value())?;
        services.preferences.commit()?;
        self.selected = OnceLock::from(id);

        let descriptor = self
            .registry
            .get(id)
            .ok_or_else(|| self.not_initialized())?;
        info!(
            "Notifying {} listeners for switch to {}",
            self.listeners.len(),
            descriptor.name()
        );
        for listener in &self.listeners {
            listener.on_switch(&services.host, descriptor)?;
        }
        Ok(())
    }

    /// Register interest in configuration switches.
    ///
    /// The listener is held by strong reference until removed. Adding the
    /// same listener twice has no effect.
    pub fn add_listener(&mut self, listener: Arc<dyn SwitchListener>) {
        if !self.listeners.iter().any(|l| same_listener(l, &listener)) {
            self.listeners.push(listener);
        }
    }

    /// Unregister a listener. Returns false if it was not registered.
    pub fn remove_listener(&mut self, listener: &Arc<dyn SwitchListener>) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|l| !same_listener(l, listener));
        self.listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn notify(&self, text: &str) {
        if let Some(services) = &self.services {
            services.notifier.notify(text);
        }
    }

    fn ensure_ready(&self) -> Result<(), ControllerError> {
        if self.state.can_serve_reads() {
            Ok(())
        } else {
            Err(self.not_initialized())
        }
    }

    fn services(&self) -> Result<&ControllerServices, ControllerError> {
        self.services.as_ref().ok_or_else(|| self.not_initialized())
    }

    fn not_initialized(&self) -> ControllerError {
        ControllerError::NotInitialized {
            domain: self.domain_key.clone(),
            state: self.state,
        }
    }
}

impl std::fmt::Debug for ConfigurationController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigurationController")
            .field("domain_key", &self.domain_key)
            .field("state", &self.state)
            .field("descriptor_type", &self.descriptor_type_name)
            .field("configurations", &self.registry.len())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// Listener identity is the allocation, not the vtable.
fn same_listener(a: &Arc<dyn SwitchListener>, b: &Arc<dyn SwitchListener>) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}
