//! Recording test doubles for the controller ports.

use crate::controller::{ConfigurationSet, ControllerServices, Registrar};
use crate::ports::listener::{ListenerError, SwitchListener};
use crate::ports::notifier::WarningNotifier;
use crate::ports::persistence::{PersistenceError, PreferenceStore};
use crate::ports::terminator::TerminatorPort;
use envswitch_domain::{ConfigId, ConfigurationDescriptor, ConfigurationError, HostContext};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Observable side effect, in the order it happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Event {
    Put(String, i64),
    Committed,
    Listener(String, ConfigId),
    Notified(String),
    Exited(i32),
}

type Events = Arc<Mutex<Vec<Event>>>;

#[derive(Clone)]
pub(crate) struct EventLog {
    events: Events,
    preferences: Arc<FakePreferences>,
}

impl Default for EventLog {
    fn default() -> Self {
        let events = Events::default();
        Self {
            preferences: Arc::new(FakePreferences::new(Arc::clone(&events))),
            events,
        }
    }
}

impl EventLog {
    pub(crate) fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    pub(crate) fn preferences(&self) -> &FakePreferences {
        &self.preferences
    }

    fn push(&self, event: Event) {
        self.events.lock().unwrap().push(event);
    }
}

pub(crate) fn services(log: &EventLog) -> ControllerServices {
    ControllerServices::new(
        Arc::new(HostContext::new("test-app")),
        log.preferences.clone(),
        Arc::new(RecordingNotifier(log.clone())),
        Arc::new(RecordingTerminator(log.clone())),
    )
}

pub(crate) struct FakePreferences {
    events: Events,
    values: Mutex<HashMap<String, i64>>,
    staged: Mutex<HashMap<String, i64>>,
    reads: AtomicUsize,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl FakePreferences {
    fn new(events: Events) -> Self {
        Self {
            events,
            values: Mutex::default(),
            staged: Mutex::default(),
            reads: AtomicUsize::new(0),
            fail_reads: AtomicBool::new(false),
            fail_writes: AtomicBool::new(false),
        }
    }

    /// Store a value as if a previous process had committed it.
    pub(crate) fn seed(&self, key: &str, value: i64) {
        self.values.lock().unwrap().insert(key.to_string(), value);
    }

    pub(crate) fn stored(&self, key: &str) -> Option<i64> {
        self.values.lock().unwrap().get(key).copied()
    }

    pub(crate) fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub(crate) fn fail_reads(&self) {
        self.fail_reads.store(true, Ordering::SeqCst);
    }

    pub(crate) fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }
}

impl PreferenceStore for FakePreferences {
    fn get_long(&self, key: &str, default: i64) -> Result<i64, PersistenceError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(PersistenceError::Unavailable("reads disabled".to_string()));
        }
        Ok(self.stored(key).unwrap_or(default))
    }

    fn put_long(&self, key: &str, value: i64) -> Result<(), PersistenceError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(PersistenceError::Write {
                location: "memory".to_string(),
                message: "writes disabled".to_string(),
            });
        }
        self.staged.lock().unwrap().insert(key.to_string(), value);
        self.events
            .lock()
            .unwrap()
            .push(Event::Put(key.to_string(), value));
        Ok(())
    }

    fn commit(&self) -> Result<(), PersistenceError> {
        let staged: Vec<_> = self.staged.lock().unwrap().drain().collect();
        self.values.lock().unwrap().extend(staged);
        self.events.lock().unwrap().push(Event::Committed);
        Ok(())
    }
}

struct RecordingNotifier(EventLog);

impl WarningNotifier for RecordingNotifier {
    fn notify(&self, text: &str) {
        self.0.push(Event::Notified(text.to_string()));
    }
}

struct RecordingTerminator(EventLog);

impl TerminatorPort for RecordingTerminator {
    fn exit(&self, code: i32) {
        self.0.push(Event::Exited(code));
    }
}

pub(crate) struct RecordingListener {
    label: String,
    log: EventLog,
    fail: bool,
}

impl RecordingListener {
    pub(crate) fn new(label: &str, log: &EventLog) -> Arc<dyn SwitchListener> {
        Arc::new(Self {
            label: label.to_string(),
            log: log.clone(),
            fail: false,
        })
    }

    pub(crate) fn failing(label: &str, log: &EventLog) -> Arc<dyn SwitchListener> {
        Arc::new(Self {
            label: label.to_string(),
            log: log.clone(),
            fail: true,
        })
    }
}

impl SwitchListener for RecordingListener {
    fn on_switch(
        &self,
        _host: &HostContext,
        descriptor: &dyn ConfigurationDescriptor,
    ) -> Result<(), ListenerError> {
        if self.fail {
            return Err(ListenerError::new(format!("{} refused", self.label)));
        }
        self.log
            .push(Event::Listener(self.label.clone(), descriptor.id()));
        Ok(())
    }
}

/// Server environment descriptor
#[derive(Debug, Clone)]
pub(crate) struct ServerConfiguration {
    id: i64,
    name: String,
    production: bool,
    server_host: String,
    app_name: Option<String>,
    init_calls: usize,
}

impl ServerConfiguration {
    pub(crate) fn production(id: i64) -> Self {
        Self {
            id,
            name: "Production".to_string(),
            production: true,
            server_host: "https://api.example.com".to_string(),
            app_name: None,
            init_calls: 0,
        }
    }

    pub(crate) fn staging(id: i64) -> Self {
        Self {
            id,
            name: "Staging".to_string(),
            production: false,
            server_host: "https://staging.api.example.com".to_string(),
            app_name: None,
            init_calls: 0,
        }
    }

    pub(crate) fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub(crate) fn with_host(mut self, host: &str) -> Self {
        self.server_host = host.to_string();
        self
    }

    pub(crate) fn server_host(&self) -> &str {
        &self.server_host
    }

    pub(crate) fn app_name(&self) -> Option<&str> {
        self.app_name.as_deref()
    }

    pub(crate) fn init_calls(&self) -> usize {
        self.init_calls
    }
}

impl ConfigurationDescriptor for ServerConfiguration {
    fn id(&self) -> ConfigId {
        ConfigId::new(self.id)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn is_production(&self) -> bool {
        self.production
    }

    fn init(&mut self, host: &HostContext) {
        self.app_name = Some(host.app_name().to_string());
        self.init_calls += 1;
    }
}

pub(crate) struct TestConfigurationSet {
    descriptors: Vec<ServerConfiguration>,
    default_id: i64,
    exit_on_change: bool,
}

impl TestConfigurationSet {
    pub(crate) fn new(descriptors: Vec<ServerConfiguration>) -> Self {
        Self {
            descriptors,
            default_id: 2,
            exit_on_change: true,
        }
    }

    /// Production (1) and staging (2), defaulting to staging.
    pub(crate) fn standard() -> Self {
        Self::new(vec![
            ServerConfiguration::production(1),
            ServerConfiguration::staging(2),
        ])
    }

    pub(crate) fn with_default(mut self, id: i64) -> Self {
        self.default_id = id;
        self
    }

    pub(crate) fn with_exit_on_change(mut self, exit: bool) -> Self {
        self.exit_on_change = exit;
        self
    }
}

impl ConfigurationSet for TestConfigurationSet {
    type Descriptor = ServerConfiguration;

    fn default_config_id(&self, staging_allowed: bool) -> ConfigId {
        if staging_allowed {
            ConfigId::new(self.default_id)
        } else {
            ConfigId::new(1)
        }
    }

    fn add_all_configurations(
        &self,
        registrar: &mut Registrar<'_, ServerConfiguration>,
    ) -> Result<(), ConfigurationError> {
        for descriptor in &self.descriptors {
            registrar.register(descriptor.clone())?;
        }
        Ok(())
    }

    fn should_exit_on_change(&self) -> bool {
        self.exit_on_change
    }
}
