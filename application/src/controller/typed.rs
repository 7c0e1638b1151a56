//! Typed view over a type-erased controller

use super::{ConfigurationController, ControllerError};
use envswitch_domain::{ConfigId, ConfigurationDescriptor};
use std::any::{TypeId, type_name};
use std::marker::PhantomData;

/// A [`ConfigurationController`] narrowed to its concrete descriptor type.
///
/// The descriptor type is checked once in [`narrow`](Self::narrow); reads
/// through this view then hand out `&D` directly.
pub struct TypedController<'a, D> {
    controller: &'a ConfigurationController,
    _descriptor: PhantomData<fn() -> D>,
}

impl<'a, D: ConfigurationDescriptor> TypedController<'a, D> {
    /// Narrow `controller` to descriptors of type `D`.
    ///
    /// # Errors
    ///
    /// [`ControllerError::DescriptorTypeMismatch`] if the controller was
    /// built from a set with a different descriptor type.
    pub fn narrow(controller: &'a ConfigurationController) -> Result<Self, ControllerError> {
        if controller.descriptor_type() != TypeId::of::<D>() {
            return Err(mismatch::<D>(controller));
        }
        Ok(Self {
            controller,
            _descriptor: PhantomData,
        })
    }

    /// The underlying untyped controller
    pub fn controller(&self) -> &'a ConfigurationController {
        self.controller
    }

    /// Currently selected configuration, with production fallback.
    pub fn current(&self) -> Result<&'a D, ControllerError> {
        let controller = self.controller;
        let descriptor = controller.current()?;
        descriptor
            .downcast_ref::<D>()
            .ok_or_else(|| mismatch::<D>(controller))
    }

    pub fn descriptor(&self, id: ConfigId) -> Option<&'a D> {
        let controller = self.controller;
        controller.descriptor(id).and_then(|d| d.downcast_ref::<D>())
    }

    pub fn descriptors(&self) -> impl Iterator<Item = &'a D> {
        let controller = self.controller;
        controller
            .descriptors()
            .filter_map(|d| d.downcast_ref::<D>())
    }
}

impl<D> std::fmt::Debug for TypedController<'_, D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypedController")
            .field("descriptor", &type_name::<D>())
            .field("controller", self.controller)
            .finish()
    }
}

fn mismatch<D>(controller: &ConfigurationController) -> ControllerError {
    ControllerError::DescriptorTypeMismatch {
        domain: controller.domain_key().to_string(),
        expected: type_name::<D>(),
        actual: controller.descriptor_type_name(),
    }
}
