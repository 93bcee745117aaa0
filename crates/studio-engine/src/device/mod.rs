//! Native GPU surface.
//!
//! Owns the wgpu Device/Queue/Surface for a winit window and exposes it to the
//! binding as a [`RenderSurface`](crate::surface::RenderSurface). The engine
//! does its own drawing; this layer only sizes the swapchain and clears it.

mod canvas;
mod gpu;

pub use canvas::WindowCanvas;
pub use gpu::{GpuInit, GpuSurface, SurfaceErrorAction};
