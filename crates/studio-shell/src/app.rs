use std::sync::Arc;

use anyhow::{Context, Result};
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use studio_engine::binding::{EngineBinding, Uninitialized};
use studio_engine::coords::CanvasSize;
use studio_engine::device::WindowCanvas;
use studio_engine::module::ModuleLoader;

use crate::canvas::{step_canvas, MAX_CANVAS_EDGE, MIN_CANVAS_EDGE};
use crate::config::ShellConfig;
use crate::input::{translate_window_event, PointerTracker, ShellCommand, ShellInput};
use crate::shell::Shell;

/// Opens the studio window and runs the event loop until it is closed.
///
/// The engine module comes from `loader`; it is loaded and instantiated once
/// the window exists.
pub fn run<L>(config: ShellConfig, loader: L) -> Result<()>
where
    L: ModuleLoader + 'static,
{
    let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = StudioApp::new(config, loader);

    event_loop
        .run_app(&mut app)
        .context("winit event loop terminated with error")?;

    Ok(())
}

struct StudioApp<L: ModuleLoader> {
    config: ShellConfig,
    shell: Shell<L>,
    pending: Option<EngineBinding<L, Uninitialized>>,
    window: Option<Arc<Window>>,
    pointer: PointerTracker,
}

impl<L: ModuleLoader> StudioApp<L> {
    fn new(config: ShellConfig, loader: L) -> Self {
        Self {
            shell: Shell::new(&config),
            pending: Some(EngineBinding::new(loader)),
            pointer: PointerTracker::default(),
            window: None,
            config,
        }
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> Result<Arc<Window>> {
        let size = self.shell.canvas_size();
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(PhysicalSize::new(size.width, size.height))
            .with_min_inner_size(PhysicalSize::new(MIN_CANVAS_EDGE, MIN_CANVAS_EDGE))
            .with_max_inner_size(PhysicalSize::new(MAX_CANVAS_EDGE, MAX_CANVAS_EDGE));

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        Ok(Arc::new(window))
    }

    /// Loads the module, creates the instance, and binds the window surface.
    ///
    /// Failures are logged; the shell then keeps running without an engine.
    fn start_engine(&mut self, window: Arc<Window>) {
        let Some(binding) = self.pending.take() else {
            return;
        };

        let mut engine = match pollster::block_on(binding.initialize()) {
            Ok(engine) => engine,
            Err(err) => {
                log::error!("failed to initialize design engine: {err}");
                return;
            }
        };

        if let Err(err) = engine.set_canvas(WindowCanvas::new(window)) {
            log::error!("engine runs without drawing: {err}");
        }

        log::info!(
            "design engine ready (handle {:?}, drawing {})",
            engine.handle(),
            if engine.has_surface() { "on" } else { "off" }
        );
        self.shell.attach(engine);
    }

    fn apply(&mut self, input: ShellInput) {
        match input {
            ShellInput::PointerDown(pos) => {
                if let Some(index) = self.shell.pointer_down(pos) {
                    log::debug!("drew rectangle {}", index.index());
                }
            }
            ShellInput::PointerMove(pos) => self.shell.pointer_move(pos),
            ShellInput::PointerUp(pos) => self.shell.pointer_up(pos),
            ShellInput::Command(cmd) => self.run_command(cmd),
        }
    }

    fn run_command(&mut self, cmd: ShellCommand) {
        match cmd {
            ShellCommand::AddRectangle => {
                if let Some(index) = self.shell.add_random_rectangle() {
                    log::debug!("added rectangle {}", index.index());
                }
            }
            ShellCommand::AddColoredRectangle => {
                if let Some(index) = self.shell.add_random_colored_rectangle() {
                    log::debug!("added colored rectangle {}", index.index());
                }
            }
            ShellCommand::ClearShapes => self.shell.clear_shapes(),
            ShellCommand::ToggleDrawMode => {
                self.shell.toggle_draw_mode();
                self.refresh_title();
            }
            ShellCommand::ResizeCanvas { dw, dh } => {
                let target = step_canvas(self.shell.canvas_size(), dw, dh);
                let size = self.shell.set_canvas_size(target);
                if let Some(window) = &self.window {
                    let _ = window.request_inner_size(PhysicalSize::new(size.width, size.height));
                }
            }
        }
    }

    fn refresh_title(&self) {
        let Some(window) = &self.window else {
            return;
        };

        let engine = if self.shell.is_engine_loaded() { "loaded" } else { "not loaded" };
        let mode = if self.shell.draw_mode() { ", draw mode" } else { "" };
        window.set_title(&format!("{} (engine {engine}{mode})", self.config.title));
    }

    fn request_redraw(&self) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl<L: ModuleLoader> ApplicationHandler for StudioApp<L> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match self.create_window(event_loop) {
            Ok(window) => window,
            Err(err) => {
                log::error!("{err:#}");
                event_loop.exit();
                return;
            }
        };

        self.window = Some(window.clone());
        self.start_engine(window);
        self.refresh_title();
        self.request_redraw();
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if let Some(input) = translate_window_event(&mut self.pointer, &event) {
            self.apply(input);
            self.request_redraw();
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                if self.shell.shutdown().is_some() {
                    log::info!("design engine destroyed");
                }
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if self.shell.window_resized(CanvasSize::new(size.width, size.height)).is_some() {
                    self.request_redraw();
                }
            }

            WindowEvent::RedrawRequested => self.shell.render(),

            _ => {}
        }
    }
}
