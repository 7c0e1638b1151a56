//! Configuration descriptor trait

use crate::core::host::HostContext;
use std::any::Any;

use super::ConfigId;

/// Upcast to [`Any`] so a type-erased descriptor can be narrowed back to
/// its concrete type. Implemented for every `'static` type.
pub trait AsAny {
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A single named environment configuration (e.g. production, staging).
///
/// Implementations are registered with a controller, initialized once
/// before first use, and then only read. Exactly one descriptor per set
/// reports [`is_production`](Self::is_production).
pub trait ConfigurationDescriptor: AsAny + Send + Sync + 'static {
    /// Identifier persisted as the user's selection. Must be unique within
    /// the set and stable across releases.
    fn id(&self) -> ConfigId;

    /// Human-readable name, used by switcher UIs. Must be non-empty once
    /// [`init`](Self::init) has run.
    fn name(&self) -> &str;

    /// Whether this is the production configuration of its set.
    fn is_production(&self) -> bool;

    /// Load anything that needs the host context.
    ///
    /// Called exactly once by the controller, after registration and
    /// before first use. Implementations must still tolerate repeated calls.
    fn init(&mut self, _host: &HostContext) {}
}

impl<'a> dyn ConfigurationDescriptor + 'a {
    /// Narrow to the concrete descriptor type, if it matches.
    pub fn downcast_ref<D: ConfigurationDescriptor>(&self) -> Option<&D> {
        self.as_any().downcast_ref::<D>()
    }
}
