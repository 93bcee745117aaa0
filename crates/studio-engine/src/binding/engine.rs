use std::rc::Rc;

use crate::coords::{CanvasSize, ColorRgba, Rect, Vec2};
use crate::module::{EngineHandle, EngineModule, ModuleLoader, RectRef};
use crate::surface::{CanvasTarget, RenderSurface, CANVAS_CLEAR};

use super::state::{Dormant, EngineInstance, Ready, Uninitialized};
use super::{BindingError, Destroyed};

/// Binding in the `Ready` state for loader `L`.
pub type ReadyBinding<L> = EngineBinding<L, Ready<<L as ModuleLoader>::Module>>;

/// Adapter between a canvas and one external engine instance.
///
/// `S` is the lifecycle state. Forwarding calls exist only on
/// `EngineBinding<L, Ready<_>>`; the transitions consume the binding:
///
/// ```text
/// Uninitialized --initialize--> Ready --destroy--> Destroyed
///                                 ^                    |
///                                 +----initialize------+
/// ```
///
/// Every call with a visual effect renders synchronously afterwards; there is
/// no batching or dirty tracking.
pub struct EngineBinding<L: ModuleLoader, S = Uninitialized> {
    loader: L,
    /// Cached after the first successful load.
    module: Option<Rc<L::Module>>,
    surface: Option<Box<dyn RenderSurface>>,
    state: S,
}

impl<L: ModuleLoader> EngineBinding<L, Uninitialized> {
    pub fn new(loader: L) -> Self {
        Self {
            loader,
            module: None,
            surface: None,
            state: Uninitialized,
        }
    }
}

impl<L: ModuleLoader, S> EngineBinding<L, S> {
    pub fn is_module_loaded(&self) -> bool {
        self.module.is_some()
    }

    /// True once `set_canvas` has succeeded.
    pub fn has_surface(&self) -> bool {
        self.surface.is_some()
    }
}

impl<L: ModuleLoader, S: Dormant> EngineBinding<L, S> {
    /// Loads the module (first time only) and creates an engine instance.
    ///
    /// The binding is consumed; on failure there is nothing to fall back to and
    /// the caller starts over with a fresh binding.
    pub async fn initialize(self) -> Result<ReadyBinding<L>, BindingError> {
        let Self { mut loader, module, surface, .. } = self;

        let module = match module {
            Some(module) => module,
            None => {
                let module = loader.load().await.inspect_err(|e| {
                    log::error!("{e}");
                })?;
                log::info!("engine module loaded");
                Rc::new(module)
            }
        };

        let instance = EngineInstance::create(Rc::clone(&module)).ok_or_else(|| {
            log::error!("engine module returned no instance");
            BindingError::CreateFailed
        })?;
        log::info!("engine instance {} created", instance.handle().raw());

        Ok(EngineBinding {
            loader,
            module: Some(module),
            surface,
            state: Ready { instance },
        })
    }
}

impl<L: ModuleLoader> EngineBinding<L, Ready<L::Module>> {
    pub fn handle(&self) -> EngineHandle {
        self.state.instance.handle()
    }

    pub fn module(&self) -> &L::Module {
        self.state.instance.module()
    }

    /// Binds the rendering surface. Fails when the canvas has no GPU context;
    /// in that case any previously bound surface is kept as is.
    pub fn set_canvas<C: CanvasTarget>(&mut self, canvas: C) -> Result<(), BindingError> {
        let mut surface = canvas
            .into_surface()
            .map_err(|e| BindingError::SurfaceUnavailable(format!("{e:#}")))?;

        surface.configure(CANVAS_CLEAR);
        self.surface = Some(Box::new(surface));
        Ok(())
    }

    /// Pushes `size` to the surface and the engine, then renders.
    pub fn resize(&mut self, size: CanvasSize) {
        if let Some(surface) = self.surface.as_mut() {
            surface.resize(size);
        }

        let (module, handle) = (self.state.instance.module(), self.handle());
        module.set_canvas_size(handle, size);
        if !module.initialize(handle, size) {
            log::warn!("engine rejected canvas {}x{}", size.width, size.height);
        }

        self.render();
    }

    /// Clears the surface and lets the engine draw. No-op without a surface.
    pub fn render(&mut self) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };

        surface.clear();
        self.state.instance.module().render(self.state.instance.handle());
    }

    pub fn mouse_down(&mut self, pos: Vec2) {
        self.module().mouse_down(self.handle(), pos);
        log::debug!("mouse down: {}, {}", pos.x, pos.y);
    }

    pub fn mouse_move(&mut self, pos: Vec2) {
        self.module().mouse_move(self.handle(), pos);
    }

    pub fn mouse_up(&mut self, pos: Vec2) {
        self.module().mouse_up(self.handle(), pos);
        log::debug!("mouse up: {}, {}", pos.x, pos.y);
    }

    /// Adds a rectangle and renders. Returns the engine's index for it.
    pub fn add_rectangle(&mut self, rect: Rect) -> Option<RectRef> {
        let index = self.module().add_rectangle(self.handle(), rect);
        match index {
            Some(i) => log::debug!(
                "added rectangle {} at ({}, {}) size {}x{}",
                i.index(),
                rect.origin.x,
                rect.origin.y,
                rect.size.x,
                rect.size.y
            ),
            None => log::warn!("engine refused rectangle {rect:?}"),
        }

        self.render();
        index
    }

    pub fn set_rectangle_color(&mut self, index: RectRef, color: ColorRgba) {
        self.module().set_rectangle_color(self.handle(), index, color);
        log::debug!(
            "set rectangle {} color to ({}, {}, {}, {})",
            index.index(),
            color.r,
            color.g,
            color.b,
            color.a
        );
        self.render();
    }

    pub fn clear_shapes(&mut self) {
        self.module().clear_shapes(self.handle());
        log::debug!("cleared all shapes");
        self.render();
    }

    /// Releases the engine instance. The module and surface stay with the binding.
    pub fn destroy(self) -> EngineBinding<L, Destroyed> {
        let Self { loader, module, surface, state } = self;
        drop(state);

        EngineBinding {
            loader,
            module,
            surface,
            state: Destroyed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::stub::{EngineCall, StubLoader, StubModule};
    use crate::surface::{StubCanvas, SurfaceLog, SurfaceOp};

    fn initialized(module: &StubModule) -> ReadyBinding<StubLoader> {
        let binding = EngineBinding::new(StubLoader::new(module.clone()));
        pollster::block_on(binding.initialize()).expect("stub initializes")
    }

    fn with_canvas(module: &StubModule) -> (ReadyBinding<StubLoader>, SurfaceLog) {
        let mut binding = initialized(module);
        let canvas = StubCanvas::new();
        let log = canvas.log();
        binding.set_canvas(canvas).expect("stub canvas is supported");
        module.take_calls();
        (binding, log)
    }

    // ── initialize ────────────────────────────────────────────────────────

    #[test]
    fn initialize_creates_one_instance() {
        let module = StubModule::new();
        let binding = initialized(&module);
        assert_eq!(module.live_instances(), 1);
        assert_eq!(module.calls(), vec![EngineCall::Create(Some(binding.handle()))]);
        assert!(binding.is_module_loaded());
        assert!(!binding.has_surface());
    }

    #[test]
    fn initialize_reports_load_failure() {
        let binding = EngineBinding::new(StubLoader::failing("script 404"));
        let err = pollster::block_on(binding.initialize()).err().unwrap();
        assert!(matches!(err, BindingError::ModuleLoad(_)));
    }

    #[test]
    fn initialize_reports_null_instance() {
        let module = StubModule::refusing_create();
        let binding = EngineBinding::new(StubLoader::new(module));
        let err = pollster::block_on(binding.initialize()).err().unwrap();
        assert!(matches!(err, BindingError::CreateFailed));
    }

    // ── set_canvas ────────────────────────────────────────────────────────

    #[test]
    fn set_canvas_without_gpu_context_fails_and_binds_nothing() {
        let module = StubModule::new();
        let mut binding = initialized(&module);
        let err = binding.set_canvas(StubCanvas::unsupported()).unwrap_err();
        assert!(matches!(err, BindingError::SurfaceUnavailable(_)));
        assert!(!binding.has_surface());
    }

    #[test]
    fn failed_set_canvas_keeps_bound_surface() {
        let module = StubModule::new();
        let (mut binding, log) = with_canvas(&module);

        let err = binding.set_canvas(StubCanvas::unsupported()).unwrap_err();
        assert!(matches!(err, BindingError::SurfaceUnavailable(_)));
        assert!(binding.has_surface());

        binding.render();
        assert_eq!(log.ops(), vec![SurfaceOp::Configure(CANVAS_CLEAR), SurfaceOp::Clear]);
        assert_eq!(module.calls(), vec![EngineCall::Render(binding.handle())]);
    }

    #[test]
    fn set_canvas_configures_clear_color() {
        let module = StubModule::new();
        let (binding, log) = with_canvas(&module);
        assert!(binding.has_surface());
        assert_eq!(log.ops(), vec![SurfaceOp::Configure(CANVAS_CLEAR)]);
    }

    // ── render / resize ───────────────────────────────────────────────────

    #[test]
    fn render_without_surface_does_nothing() {
        let module = StubModule::new();
        let mut binding = initialized(&module);
        module.take_calls();
        binding.render();
        assert!(module.calls().is_empty());
    }

    #[test]
    fn render_clears_then_forwards() {
        let module = StubModule::new();
        let (mut binding, log) = with_canvas(&module);
        binding.render();
        assert_eq!(log.clears(), 1);
        assert_eq!(module.calls(), vec![EngineCall::Render(binding.handle())]);
    }

    #[test]
    fn resize_forwards_size_and_renders() {
        let module = StubModule::new();
        let (mut binding, log) = with_canvas(&module);
        let h = binding.handle();
        let size = CanvasSize::new(640, 480);

        binding.resize(size);

        assert_eq!(
            module.calls(),
            vec![
                EngineCall::SetCanvasSize(h, size),
                EngineCall::Initialize(h, size),
                EngineCall::Render(h),
            ]
        );
        assert_eq!(&log.ops()[1..], &[SurfaceOp::Resize(size), SurfaceOp::Clear]);
        assert_eq!(module.canvas(h), Some((size, true)));
    }

    #[test]
    fn resize_without_surface_still_reaches_engine() {
        let module = StubModule::new();
        let mut binding = initialized(&module);
        module.take_calls();
        binding.resize(CanvasSize::new(300, 200));
        assert_eq!(module.count(|c| matches!(c, EngineCall::SetCanvasSize(..))), 1);
        assert_eq!(module.count(|c| matches!(c, EngineCall::Render(_))), 0);
    }

    // ── pointer ───────────────────────────────────────────────────────────

    #[test]
    fn pointer_events_are_forwarded_unchanged_without_render() {
        let module = StubModule::new();
        let (mut binding, log) = with_canvas(&module);
        let h = binding.handle();

        binding.mouse_down(Vec2::new(10.5, 20.0));
        binding.mouse_move(Vec2::new(-3.0, 1e6));
        binding.mouse_up(Vec2::new(11.0, 21.0));

        assert_eq!(
            module.calls(),
            vec![
                EngineCall::MouseDown(h, Vec2::new(10.5, 20.0)),
                EngineCall::MouseMove(h, Vec2::new(-3.0, 1e6)),
                EngineCall::MouseUp(h, Vec2::new(11.0, 21.0)),
            ]
        );
        assert_eq!(log.clears(), 0);
    }

    // ── shapes ────────────────────────────────────────────────────────────

    #[test]
    fn added_index_addresses_exactly_one_color_call() {
        let module = StubModule::new();
        let (mut binding, _log) = with_canvas(&module);
        let h = binding.handle();

        binding.add_rectangle(Rect::new(0.0, 0.0, 5.0, 5.0));
        let index = binding.add_rectangle(Rect::new(10.0, 20.0, 30.0, 40.0)).unwrap();
        let color = ColorRgba::new(0.1, 0.2, 0.3, 0.4);
        binding.set_rectangle_color(index, color);

        let color_calls: Vec<_> = module
            .calls()
            .into_iter()
            .filter(|c| matches!(c, EngineCall::SetRectangleColor(..)))
            .collect();
        assert_eq!(color_calls, vec![EngineCall::SetRectangleColor(h, index, color)]);
        assert_eq!(module.shapes(h)[index.index() as usize].color, color);
    }

    #[test]
    fn add_rectangle_renders_after_forwarding() {
        let module = StubModule::new();
        let (mut binding, log) = with_canvas(&module);
        let h = binding.handle();
        let rect = Rect::new(1.0, 2.0, 3.0, 4.0);

        binding.add_rectangle(rect);

        assert_eq!(module.calls(), vec![EngineCall::AddRectangle(h, rect), EngineCall::Render(h)]);
        assert_eq!(log.clears(), 1);
    }

    #[test]
    fn color_out_of_range_is_forwarded_unvalidated() {
        let module = StubModule::new();
        let (mut binding, _log) = with_canvas(&module);
        let h = binding.handle();
        let wild = ColorRgba::new(2.0, -1.0, 0.5, 7.0);

        binding.set_rectangle_color(RectRef::new(99), wild);

        assert_eq!(
            module.calls(),
            vec![EngineCall::SetRectangleColor(h, RectRef::new(99), wild), EngineCall::Render(h)]
        );
    }

    #[test]
    fn clear_shapes_forwards_once_then_renders_once() {
        let module = StubModule::new();
        let (mut binding, log) = with_canvas(&module);
        let h = binding.handle();
        binding.add_rectangle(Rect::new(0.0, 0.0, 1.0, 1.0));
        module.take_calls();
        let clears_before = log.clears();

        binding.clear_shapes();

        assert_eq!(module.calls(), vec![EngineCall::ClearShapes(h), EngineCall::Render(h)]);
        assert_eq!(log.clears(), clears_before + 1);
        assert!(module.shapes(h).is_empty());
    }

    // ── destroy ───────────────────────────────────────────────────────────

    #[test]
    fn destroy_releases_the_handle() {
        let module = StubModule::new();
        let binding = initialized(&module);
        let h = binding.handle();

        let destroyed = binding.destroy();

        assert_eq!(module.count(|c| *c == EngineCall::Destroy(h)), 1);
        assert_eq!(module.live_instances(), 0);
        assert!(destroyed.is_module_loaded());
    }

    #[test]
    fn dropping_a_ready_binding_destroys_once() {
        let module = StubModule::new();
        let h = {
            let binding = initialized(&module);
            binding.handle()
        };
        assert_eq!(module.count(|c| *c == EngineCall::Destroy(h)), 1);
    }

    #[test]
    fn reinitialize_reuses_loaded_module() {
        let module = StubModule::new();
        let (binding, _log) = with_canvas(&module);
        let first = binding.handle();

        let again = pollster::block_on(binding.destroy().initialize()).unwrap();

        assert_eq!(module.loads(), 1);
        assert_ne!(again.handle(), first);
        assert!(again.has_surface());
        assert_eq!(module.live_instances(), 1);
    }
}
