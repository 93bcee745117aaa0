//! Studio engine crate.
//!
//! Typed binding to an external design-studio drawing engine: module loading,
//! engine-instance lifecycle, and the rendering surface the engine draws into.
//! The engine itself is supplied by the user as an [`module::EngineModule`].

pub mod binding;
pub mod coords;
pub mod logging;
pub mod module;
pub mod surface;

#[cfg(not(target_family = "wasm"))]
pub mod device;

pub use binding::{BindingError, EngineBinding, ReadyBinding};
