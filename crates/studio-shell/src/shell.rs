use studio_engine::binding::{Destroyed, EngineBinding, ReadyBinding};
use studio_engine::coords::{CanvasSize, Vec2};
use studio_engine::module::{ModuleLoader, RectRef};

use crate::canvas::{canvas_for_window, clamp_canvas};
use crate::config::ShellConfig;
use crate::shapes::ShapeRng;

/// Editor state in front of the engine binding.
///
/// Holds the canvas size, the draw-mode toggle, and (once initialization has
/// finished) a Ready binding. Until then, and after [`Shell::shutdown`], every
/// action is silently skipped; actions that would yield a rectangle return `None`.
pub struct Shell<L: ModuleLoader> {
    canvas: CanvasSize,
    draw_mode: bool,
    shapes: ShapeRng,
    engine: Option<ReadyBinding<L>>,
}

impl<L: ModuleLoader> Shell<L> {
    pub fn new(config: &ShellConfig) -> Self {
        Self {
            canvas: clamp_canvas(config.canvas),
            draw_mode: config.draw_mode,
            shapes: ShapeRng::new(config.seed),
            engine: None,
        }
    }

    /// Adopts a Ready binding and pushes the current canvas size to it.
    ///
    /// A previously attached binding is destroyed.
    pub fn attach(&mut self, mut engine: ReadyBinding<L>) {
        engine.resize(self.canvas);
        if let Some(previous) = self.engine.replace(engine) {
            previous.destroy();
        }
    }

    /// Destroys the engine instance. Later actions become no-ops again.
    pub fn shutdown(&mut self) -> Option<EngineBinding<L, Destroyed>> {
        self.engine.take().map(EngineBinding::destroy)
    }

    pub fn engine(&self) -> Option<&ReadyBinding<L>> {
        self.engine.as_ref()
    }

    pub fn is_engine_loaded(&self) -> bool {
        self.engine.is_some()
    }

    // ── canvas ────────────────────────────────────────────────────────────

    pub fn canvas_size(&self) -> CanvasSize {
        self.canvas
    }

    /// Clamps `size` to the shell limits and resizes the engine if it changed.
    /// Returns the size actually in effect.
    pub fn set_canvas_size(&mut self, size: CanvasSize) -> CanvasSize {
        let size = clamp_canvas(size);
        if size == self.canvas {
            return size;
        }

        self.canvas = size;
        if let Some(engine) = self.engine.as_mut() {
            engine.resize(size);
        }
        size
    }

    /// Follows an OS window resize. A zero-area window (minimized) leaves the
    /// canvas and the engine untouched and returns `None`.
    pub fn window_resized(&mut self, window: CanvasSize) -> Option<CanvasSize> {
        let size = canvas_for_window(window)?;
        Some(self.set_canvas_size(size))
    }

    pub fn set_canvas_width(&mut self, width: u32) -> CanvasSize {
        self.set_canvas_size(CanvasSize::new(width, self.canvas.height))
    }

    pub fn set_canvas_height(&mut self, height: u32) -> CanvasSize {
        self.set_canvas_size(CanvasSize::new(self.canvas.width, height))
    }

    // ── draw mode ─────────────────────────────────────────────────────────

    pub fn draw_mode(&self) -> bool {
        self.draw_mode
    }

    pub fn set_draw_mode(&mut self, on: bool) {
        self.draw_mode = on;
    }

    pub fn toggle_draw_mode(&mut self) -> bool {
        self.draw_mode = !self.draw_mode;
        log::info!("draw mode {}", if self.draw_mode { "on" } else { "off" });
        self.draw_mode
    }

    // ── pointer ───────────────────────────────────────────────────────────

    /// Pointer pressed at canvas-local `pos`.
    ///
    /// Normal mode forwards the press. Draw mode instead adds a randomly sized,
    /// randomly colored rectangle whose top-left corner is `pos` and returns it.
    pub fn pointer_down(&mut self, pos: Vec2) -> Option<RectRef> {
        let engine = self.engine.as_mut()?;

        if !self.draw_mode {
            engine.mouse_down(pos);
            return None;
        }

        let rect = self.shapes.rect_at(pos);
        let color = self.shapes.color();
        let index = engine.add_rectangle(rect)?;
        engine.set_rectangle_color(index, color);
        Some(index)
    }

    pub fn pointer_move(&mut self, pos: Vec2) {
        if let Some(engine) = self.engine.as_mut() {
            engine.mouse_move(pos);
        }
    }

    pub fn pointer_up(&mut self, pos: Vec2) {
        if let Some(engine) = self.engine.as_mut() {
            engine.mouse_up(pos);
        }
    }

    // ── shape actions ─────────────────────────────────────────────────────

    /// Adds a randomly placed and sized rectangle in the engine's default fill.
    pub fn add_random_rectangle(&mut self) -> Option<RectRef> {
        let engine = self.engine.as_mut()?;
        let rect = self.shapes.rect_within(self.canvas);
        engine.add_rectangle(rect)
    }

    /// Like [`add_random_rectangle`](Self::add_random_rectangle), then paints it a random color.
    pub fn add_random_colored_rectangle(&mut self) -> Option<RectRef> {
        let engine = self.engine.as_mut()?;
        let rect = self.shapes.rect_within(self.canvas);
        let color = self.shapes.color();
        let index = engine.add_rectangle(rect)?;
        engine.set_rectangle_color(index, color);
        Some(index)
    }

    pub fn clear_shapes(&mut self) {
        if let Some(engine) = self.engine.as_mut() {
            engine.clear_shapes();
        }
    }

    pub fn render(&mut self) {
        if let Some(engine) = self.engine.as_mut() {
            engine.render();
        }
    }
}
