use std::rc::Rc;

use crate::module::{EngineHandle, EngineModule};

/// No engine instance yet.
#[derive(Debug, Default)]
pub struct Uninitialized;

/// An engine instance is live.
pub struct Ready<M: EngineModule> {
    pub(super) instance: EngineInstance<M>,
}

/// The instance was released; the module stays cached for a later `initialize`.
#[derive(Debug, Default)]
pub struct Destroyed;

/// Lifecycle states from which `initialize` may run.
pub trait Dormant: sealed::Sealed {}

impl Dormant for Uninitialized {}
impl Dormant for Destroyed {}

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::Uninitialized {}
    impl Sealed for super::Destroyed {}
}

/// One engine instance: a handle plus the module that issued it.
///
/// The handle is released through the module exactly once, when the instance
/// is dropped.
pub struct EngineInstance<M: EngineModule> {
    module: Rc<M>,
    handle: EngineHandle,
}

impl<M: EngineModule> EngineInstance<M> {
    pub(super) fn create(module: Rc<M>) -> Option<Self> {
        let handle = module.create()?;
        Some(Self { module, handle })
    }

    #[inline]
    pub fn handle(&self) -> EngineHandle {
        self.handle
    }

    #[inline]
    pub fn module(&self) -> &M {
        &self.module
    }
}

impl<M: EngineModule> Drop for EngineInstance<M> {
    fn drop(&mut self) {
        self.module.destroy(self.handle);
        log::debug!("engine instance {} destroyed", self.handle.raw());
    }
}
