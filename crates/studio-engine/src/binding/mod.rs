//! Engine binding.
//!
//! Owns the loaded module, the live engine instance, and the rendering surface,
//! and forwards typed calls between them. Lifecycle is encoded in the type:
//! see [`EngineBinding`].

mod engine;
mod error;
mod state;

pub use engine::{EngineBinding, ReadyBinding};
pub use error::BindingError;
pub use state::{Destroyed, Dormant, EngineInstance, Ready, Uninitialized};
