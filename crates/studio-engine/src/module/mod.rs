//! Foreign engine surface.
//!
//! The drawing engine lives outside this crate. It is reached through
//! [`EngineModule`], a typed rendition of the engine's exported C-style calls,
//! and obtained through a [`ModuleLoader`], the only suspending step of the
//! binding lifecycle.
//!
//! Implementations:
//! - [`stub::StubModule`]: in-process double that records every call
//! - `web::WebModule` (wasm32 only): the `_engine_*` exports of a loaded
//!   `DesignStudioModule`

use std::future::Future;
use std::num::NonZeroU64;

use crate::binding::BindingError;
use crate::coords::{CanvasSize, ColorRgba, Rect, Vec2};

pub mod stub;

#[cfg(target_family = "wasm")]
pub mod web;

/// Opaque token identifying one engine instance.
///
/// Returned by [`EngineModule::create`]; valid until passed to
/// [`EngineModule::destroy`]. The raw value is whatever the module uses
/// (a pointer into wasm memory, a slot number, ...) and is never zero.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct EngineHandle(NonZeroU64);

impl EngineHandle {
    /// Wraps a raw module token. Zero (a null instance) yields `None`.
    #[inline]
    pub fn from_raw(raw: u64) -> Option<Self> {
        NonZeroU64::new(raw).map(Self)
    }

    #[inline]
    pub fn raw(self) -> u64 {
        self.0.get()
    }
}

/// Index of a rectangle previously added to an engine instance.
///
/// Only meaningful for the instance that returned it. There is no lookup or
/// per-index delete; shapes are removed in bulk.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct RectRef(u32);

impl RectRef {
    #[inline]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    #[inline]
    pub const fn index(self) -> u32 {
        self.0
    }
}

/// The engine's exported call surface.
///
/// Semantics belong to the module; the binding forwards arguments unchanged and
/// validates nothing. Methods take `&self` because a module is shared between
/// the binding and the instance that must outlive it.
pub trait EngineModule {
    /// Creates an engine instance. `None` means the module handed back a null instance.
    fn create(&self) -> Option<EngineHandle>;

    fn destroy(&self, handle: EngineHandle);

    /// Prepares the instance for a canvas of `size`. Returns the engine's success flag.
    fn initialize(&self, handle: EngineHandle, size: CanvasSize) -> bool;

    fn set_canvas_size(&self, handle: EngineHandle, size: CanvasSize);

    fn render(&self, handle: EngineHandle);

    fn mouse_down(&self, handle: EngineHandle, pos: Vec2);
    fn mouse_move(&self, handle: EngineHandle, pos: Vec2);
    fn mouse_up(&self, handle: EngineHandle, pos: Vec2);

    /// Adds a rectangle and returns its index, or `None` if the engine refused it.
    fn add_rectangle(&self, handle: EngineHandle, rect: Rect) -> Option<RectRef>;

    fn set_rectangle_color(&self, handle: EngineHandle, index: RectRef, color: ColorRgba);

    fn clear_shapes(&self, handle: EngineHandle);
}

/// Produces the engine module.
///
/// Called at most once per binding: once loaded, a module is cached and reused
/// across destroy/initialize cycles.
pub trait ModuleLoader {
    type Module: EngineModule + 'static;

    fn load(&mut self) -> impl Future<Output = Result<Self::Module, BindingError>>;
}
