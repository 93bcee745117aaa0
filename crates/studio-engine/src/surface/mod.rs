//! Rendering surfaces.
//!
//! A [`CanvasTarget`] is something the binding can be pointed at (a window, an
//! HTML canvas). Binding it produces a [`RenderSurface`]: the GPU context the
//! binding clears and sizes before the engine draws into the same canvas.
//!
//! Implementations:
//! - `crate::device::WindowCanvas` (native): wgpu swapchain on a winit window
//! - `HtmlCanvasElement` (wasm32): WebGL 1 context
//! - [`StubCanvas`]: records operations for tests

mod recording;

#[cfg(target_family = "wasm")]
mod webgl;

pub use recording::{RecordingSurface, StubCanvas, SurfaceLog, SurfaceOp};

#[cfg(target_family = "wasm")]
pub use webgl::WebGlSurface;

use crate::coords::{CanvasSize, ColorRgba};

/// Clear color applied when a surface is bound.
pub const CANVAS_CLEAR: ColorRgba = ColorRgba::new(0.95, 0.95, 0.95, 1.0);

/// GPU context owned by the binding.
pub trait RenderSurface {
    /// One-time setup right after binding: clear color and fixed pipeline state.
    fn configure(&mut self, clear: ColorRgba);

    /// Resizes the backing store and viewport to `size`.
    fn resize(&mut self, size: CanvasSize);

    /// Clears color (and depth, where present) ahead of an engine frame.
    fn clear(&mut self);
}

/// Something a rendering surface can be created on.
pub trait CanvasTarget {
    type Surface: RenderSurface + 'static;

    /// Acquires a GPU context. Fails when the target has no capable context.
    fn into_surface(self) -> anyhow::Result<Self::Surface>;
}
