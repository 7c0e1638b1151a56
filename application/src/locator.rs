//! Service locator for configuration controllers
//!
//! The [`ServiceLocator`] is created once at the application's composition
//! root and passed to whatever needs environment configuration. It binds the
//! process-level settings and collaborators, and hands them to each
//! controller as it is registered.
//!
//! # Usage
//!
//! ```ignore
//! let mut locator = ServiceLocator::initialize(
//!     HostContext::new("shop"),
//!     LocatorSettings { staging_allowed: true, debug_build: false },
//!     preferences,
//!     notifier,
//!     terminator,
//! );
//! locator.register_controller("api-server", ConfigurationController::new(ApiServers))?;
//!
//! let api = locator.current_as::<ApiServer>("api-server")?;
//! ```

use crate::controller::{
    ConfigurationController, ControllerError, ControllerServices, SwitchOutcome, TypedController,
};
use crate::ports::notifier::WarningNotifier;
use crate::ports::persistence::PreferenceStore;
use crate::ports::terminator::TerminatorPort;
use envswitch_domain::{ConfigId, ConfigurationDescriptor, HostContext};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{info, warn};

/// Advisory text shown when a release build permits staging.
pub const STAGING_ON_RELEASE_WARNING: &str = "DEBUG: STAGING ALLOWED ON A RELEASE BUILD.";

/// Process-wide flags shared by every controller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LocatorSettings {
    /// Whether non-production configurations may be selected at all.
    pub staging_allowed: bool,
    /// Whether this is a debug build; suppresses the release warnings.
    pub debug_build: bool,
}

/// Registry of configuration controllers keyed by domain.
pub struct ServiceLocator {
    controllers: BTreeMap<String, ConfigurationController>,
    settings: LocatorSettings,
    services: ControllerServices,
}

impl ServiceLocator {
    /// Bind the shared settings and collaborators.
    ///
    /// Emits [`STAGING_ON_RELEASE_WARNING`] once when staging is allowed on
    /// a non-debug build.
    pub fn initialize(
        host: HostContext,
        settings: LocatorSettings,
        preferences: Arc<dyn PreferenceStore>,
        notifier: Arc<dyn WarningNotifier>,
        terminator: Arc<dyn TerminatorPort>,
    ) -> Self {
        if settings.staging_allowed && !settings.debug_build {
            notifier.notify(STAGING_ON_RELEASE_WARNING);
        }
        info!(
            "Configuration locator initialized for {} (staging allowed: {}, debug build: {})",
            host.app_name(),
            settings.staging_allowed,
            settings.debug_build
        );

        Self {
            controllers: BTreeMap::new(),
            settings,
            services: ControllerServices::new(Arc::new(host), preferences, notifier, terminator),
        }
    }

    pub fn settings(&self) -> LocatorSettings {
        self.settings
    }

    pub fn host(&self) -> &HostContext {
        &self.services.host
    }

    /// Store `controller` under `domain_key` and drive it through
    /// initialization.
    ///
    /// Registering the same key twice replaces the earlier controller. If
    /// initialization fails the controller stays registered in the
    /// `Invalid` state so later reads report why.
    pub fn register_controller(
        &mut self,
        domain_key: impl Into<String>,
        controller: ConfigurationController,
    ) -> Result<(), ControllerError> {
        let domain_key = domain_key.into();
        if self.controllers.contains_key(&domain_key) {
            warn!("Replacing configuration controller for '{}'", domain_key);
        }

        self.controllers.insert(domain_key.clone(), controller);
        let controller = self
            .controllers
            .get_mut(&domain_key)
            .ok_or_else(|| ControllerError::UnknownDomain(domain_key.clone()))?;
        controller.initialize(
            self.services.clone(),
            &domain_key,
            self.settings.staging_allowed,
            self.settings.debug_build,
        )
    }

    pub fn controller(&self, domain_key: &str) -> Option<&ConfigurationController> {
        self.controllers.get(domain_key)
    }

    /// Mutable access, for listener registration and switching.
    pub fn controller_mut(&mut self, domain_key: &str) -> Option<&mut ConfigurationController> {
        self.controllers.get_mut(domain_key)
    }

    /// Controller for `domain_key`, narrowed to descriptor type `D`.
    pub fn typed_controller<D: ConfigurationDescriptor>(
        &self,
        domain_key: &str,
    ) -> Result<TypedController<'_, D>, ControllerError> {
        TypedController::narrow(self.require(domain_key)?)
    }

    /// Current configuration of `domain_key`.
    pub fn current(&self, domain_key: &str) -> Result<&dyn ConfigurationDescriptor, ControllerError> {
        self.require(domain_key)?.current()
    }

    /// Current configuration of `domain_key` as its concrete type.
    pub fn current_as<D: ConfigurationDescriptor>(
        &self,
        domain_key: &str,
    ) -> Result<&D, ControllerError> {
        self.typed_controller::<D>(domain_key)?.current()
    }

    /// Request a switch on `domain_key`. See
    /// [`ConfigurationController::set_selected_config_id`].
    pub fn switch(
        &mut self,
        domain_key: &str,
        id: ConfigId,
    ) -> Result<SwitchOutcome, ControllerError> {
        self.controllers
            .get_mut(domain_key)
            .ok_or_else(|| ControllerError::UnknownDomain(domain_key.to_string()))?
            .set_selected_config_id(id)
    }

    /// Registered domain keys, sorted
    pub fn domains(&self) -> impl Iterator<Item = &str> {
        self.controllers.keys().map(String::as_str)
    }

    /// Registered controllers, sorted by domain key
    pub fn controllers(&self) -> impl Iterator<Item = &ConfigurationController> {
        self.controllers.values()
    }

    fn require(&self, domain_key: &str) -> Result<&ConfigurationController, ControllerError> {
        self.controllers
            .get(domain_key)
            .ok_or_else(|| ControllerError::UnknownDomain(domain_key.to_string()))
    }
}
