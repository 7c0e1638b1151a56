//! Serializable snapshots of controllers for display

use envswitch_application::ConfigurationController;
use envswitch_domain::{ConfigurationDescriptor, ControllerState};
use serde::Serialize;
use std::collections::BTreeMap;

/// One environment of a domain
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvironmentView {
    pub id: i64,
    pub name: String,
    pub production: bool,
    /// Whether this is the environment currently in use
    pub current: bool,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub values: BTreeMap<String, String>,
}

/// One domain with its environments
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DomainView {
    pub domain: String,
    pub state: ControllerState,
    pub staging_allowed: bool,
    pub exit_on_change: bool,
    /// Id of the environment in use, after production fallback
    pub current: Option<i64>,
    pub environments: Vec<EnvironmentView>,
    /// Why the controller cannot serve reads
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DomainView {
    /// Snapshot `controller`. `values` extracts the display table of a
    /// descriptor; descriptor types are opaque to this layer.
    pub fn from_controller<F>(controller: &ConfigurationController, values: F) -> Self
    where
        F: Fn(&dyn ConfigurationDescriptor) -> BTreeMap<String, String>,
    {
        let (current, error) = match controller.current() {
            Ok(descriptor) => (Some(descriptor.id().value()), None),
            Err(e) => (None, Some(e.to_string())),
        };

        let environments = controller
            .descriptors()
            .map(|d| EnvironmentView {
                id: d.id().value(),
                name: d.name().to_string(),
                production: d.is_production(),
                current: current == Some(d.id().value()),
                values: values(d),
            })
            .collect();

        Self {
            domain: controller.domain_key().to_string(),
            state: controller.state(),
            staging_allowed: controller.is_staging_allowed(),
            exit_on_change: controller.should_exit_on_change(),
            current,
            environments,
            error,
        }
    }

    /// The environment in use
    pub fn current_environment(&self) -> Option<&EnvironmentView> {
        self.environments.iter().find(|e| e.current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use envswitch_application::{
        ConfigurationSet, ControllerServices, NoNotifier, PersistenceError, PreferenceStore,
        Registrar, TerminatorPort,
    };
    use envswitch_domain::{ConfigId, ConfigurationError, HostContext};
    use std::sync::Arc;

    struct Endpoint {
        id: i64,
        production: bool,
    }

    impl ConfigurationDescriptor for Endpoint {
        fn id(&self) -> ConfigId {
            ConfigId::new(self.id)
        }

        fn name(&self) -> &str {
            if self.production { "Production" } else { "Staging" }
        }

        fn is_production(&self) -> bool {
            self.production
        }
    }

    struct Endpoints;

    impl ConfigurationSet for Endpoints {
        type Descriptor = Endpoint;

        fn default_config_id(&self, staging_allowed: bool) -> ConfigId {
            ConfigId::new(if staging_allowed { 2 } else { 1 })
        }

        fn add_all_configurations(
            &self,
            registrar: &mut Registrar<'_, Endpoint>,
        ) -> Result<(), ConfigurationError> {
            registrar.register(Endpoint { id: 1, production: true })?;
            registrar.register(Endpoint { id: 2, production: false })
        }

        fn should_exit_on_change(&self) -> bool {
            false
        }
    }

    struct NoPreferences;

    impl PreferenceStore for NoPreferences {
        fn get_long(&self, _key: &str, default: i64) -> Result<i64, PersistenceError> {
            Ok(default)
        }

        fn put_long(&self, _key: &str, _value: i64) -> Result<(), PersistenceError> {
            Ok(())
        }

        fn commit(&self) -> Result<(), PersistenceError> {
            Ok(())
        }
    }

    struct NeverExit;

    impl TerminatorPort for NeverExit {
        fn exit(&self, _code: i32) {}
    }

    fn services() -> ControllerServices {
        ControllerServices::new(
            Arc::new(HostContext::new("shop")),
            Arc::new(NoPreferences),
            Arc::new(NoNotifier),
            Arc::new(NeverExit),
        )
    }

    #[test]
    fn test_snapshot_marks_current_environment() {
        let mut controller = ConfigurationController::new(Endpoints);
        controller.initialize(services(), "api", true, true).unwrap();

        let view = DomainView::from_controller(&controller, |_| BTreeMap::new());

        assert_eq!(view.domain, "api");
        assert_eq!(view.state, ControllerState::Ready);
        assert_eq!(view.current, Some(2));
        assert!(!view.exit_on_change);
        assert_eq!(view.environments.len(), 2);
        assert_eq!(view.current_environment().unwrap().name, "Staging");
        assert!(view.error.is_none());
    }

    #[test]
    fn test_snapshot_of_uninitialized_controller_carries_error() {
        let controller = ConfigurationController::new(Endpoints);
        let view = DomainView::from_controller(&controller, |_| BTreeMap::new());

        assert_eq!(view.state, ControllerState::Fresh);
        assert!(view.current.is_none());
        assert!(view.error.is_some());
        assert!(view.current_environment().is_none());
    }
}
