use std::sync::Arc;

use winit::window::Window;

use crate::surface::CanvasTarget;

use super::{GpuInit, GpuSurface};

/// A winit window used as the drawing canvas; its client area is the canvas.
pub struct WindowCanvas {
    window: Arc<Window>,
    init: GpuInit,
}

impl WindowCanvas {
    pub fn new(window: Arc<Window>) -> Self {
        Self::with_init(window, GpuInit::default())
    }

    pub fn with_init(window: Arc<Window>, init: GpuInit) -> Self {
        Self { window, init }
    }
}

impl CanvasTarget for WindowCanvas {
    type Surface = GpuSurface;

    fn into_surface(self) -> anyhow::Result<GpuSurface> {
        // Adapter/device acquisition is async under wgpu; the binding is synchronous.
        pollster::block_on(GpuSurface::new(self.window, self.init))
    }
}
