use anyhow::anyhow;
use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, WebGlRenderingContext as Gl};

use crate::coords::{CanvasSize, ColorRgba};

use super::{CanvasTarget, RenderSurface};

/// WebGL 1 context bound to an HTML canvas.
pub struct WebGlSurface {
    canvas: HtmlCanvasElement,
    gl: Gl,
}

impl RenderSurface for WebGlSurface {
    fn configure(&mut self, clear: ColorRgba) {
        self.gl.clear_color(clear.r, clear.g, clear.b, clear.a);
        self.gl.enable(Gl::DEPTH_TEST);
        log::info!("WebGL context initialized");
    }

    fn resize(&mut self, size: CanvasSize) {
        self.canvas.set_width(size.width);
        self.canvas.set_height(size.height);
        self.gl.viewport(0, 0, size.width as i32, size.height as i32);
    }

    fn clear(&mut self) {
        self.gl.clear(Gl::COLOR_BUFFER_BIT | Gl::DEPTH_BUFFER_BIT);
    }
}

impl CanvasTarget for HtmlCanvasElement {
    type Surface = WebGlSurface;

    fn into_surface(self) -> anyhow::Result<WebGlSurface> {
        let gl = ["webgl", "experimental-webgl"]
            .iter()
            .find_map(|kind| self.get_context(kind).ok().flatten())
            .and_then(|ctx| ctx.dyn_into::<Gl>().ok())
            .ok_or_else(|| anyhow!("WebGL not supported"))?;

        Ok(WebGlSurface { canvas: self, gl })
    }
}
