//! In-process stand-in for the external engine.
//!
//! `StubModule` is injected explicitly where no real engine is available (tests,
//! the desktop shell without a native engine). It records every call it
//! receives and keeps just enough state to answer like the real engine does:
//! a per-instance shape list whose indices are list positions, a default fill,
//! and pointer tracking.
//!
//! Clones share state, so a test can hand one clone to a [`StubLoader`] and keep
//! another to inspect what the binding forwarded.

use std::cell::RefCell;
use std::collections::HashMap;
use std::future::{ready, Future};
use std::rc::Rc;

use crate::binding::BindingError;
use crate::coords::{CanvasSize, ColorRgba, Rect, Vec2};

use super::{EngineHandle, EngineModule, ModuleLoader, RectRef};

/// Fill given to rectangles that never had a colour set.
pub const DEFAULT_FILL: ColorRgba = ColorRgba::new(0.5, 0.5, 0.8, 1.0);

/// One forwarded call, in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineCall {
    Create(Option<EngineHandle>),
    Destroy(EngineHandle),
    Initialize(EngineHandle, CanvasSize),
    SetCanvasSize(EngineHandle, CanvasSize),
    Render(EngineHandle),
    MouseDown(EngineHandle, Vec2),
    MouseMove(EngineHandle, Vec2),
    MouseUp(EngineHandle, Vec2),
    AddRectangle(EngineHandle, Rect),
    SetRectangleColor(EngineHandle, RectRef, ColorRgba),
    ClearShapes(EngineHandle),
}

/// A rectangle as the stub stores it.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct StubShape {
    pub rect: Rect,
    pub color: ColorRgba,
}

#[derive(Debug, Default)]
struct StubInstance {
    size: CanvasSize,
    initialized: bool,
    shapes: Vec<StubShape>,
    pointer_down: bool,
    last_pointer: Vec2,
}

#[derive(Debug, Default)]
struct StubState {
    calls: Vec<EngineCall>,
    instances: HashMap<EngineHandle, StubInstance>,
    next_handle: u64,
    refuse_create: bool,
    loads: u32,
}

#[derive(Debug, Clone, Default)]
pub struct StubModule {
    state: Rc<RefCell<StubState>>,
}

impl StubModule {
    pub fn new() -> Self {
        Self::default()
    }

    /// A module whose `create` returns a null instance.
    pub fn refusing_create() -> Self {
        let module = Self::new();
        module.state.borrow_mut().refuse_create = true;
        module
    }

    /// Every call received so far.
    pub fn calls(&self) -> Vec<EngineCall> {
        self.state.borrow().calls.clone()
    }

    /// Drains the call log.
    pub fn take_calls(&self) -> Vec<EngineCall> {
        std::mem::take(&mut self.state.borrow_mut().calls)
    }

    /// Number of logged calls matching `pred`.
    pub fn count(&self, pred: impl Fn(&EngineCall) -> bool) -> usize {
        self.state.borrow().calls.iter().filter(|c| pred(c)).count()
    }

    /// How many times a [`StubLoader`] handed this module out.
    pub fn loads(&self) -> u32 {
        self.state.borrow().loads
    }

    /// Instances created and not yet destroyed.
    pub fn live_instances(&self) -> usize {
        self.state.borrow().instances.len()
    }

    /// Shapes held by `handle`, in index order. Empty for unknown handles.
    pub fn shapes(&self, handle: EngineHandle) -> Vec<StubShape> {
        self.state
            .borrow()
            .instances
            .get(&handle)
            .map(|i| i.shapes.clone())
            .unwrap_or_default()
    }

    /// Last size pushed to `handle` and whether `initialize` ran.
    pub fn canvas(&self, handle: EngineHandle) -> Option<(CanvasSize, bool)> {
        self.state
            .borrow()
            .instances
            .get(&handle)
            .map(|i| (i.size, i.initialized))
    }

    /// Pointer pressed flag and last pointer position for `handle`.
    pub fn pointer(&self, handle: EngineHandle) -> Option<(bool, Vec2)> {
        self.state
            .borrow()
            .instances
            .get(&handle)
            .map(|i| (i.pointer_down, i.last_pointer))
    }

    fn record(&self, call: EngineCall) {
        self.state.borrow_mut().calls.push(call);
    }

    fn with_instance<R>(
        &self,
        handle: EngineHandle,
        f: impl FnOnce(&mut StubInstance) -> R,
    ) -> Option<R> {
        let mut state = self.state.borrow_mut();
        match state.instances.get_mut(&handle) {
            Some(instance) => Some(f(instance)),
            None => {
                log::warn!("stub engine: call on unknown handle {}", handle.raw());
                None
            }
        }
    }
}

impl EngineModule for StubModule {
    fn create(&self) -> Option<EngineHandle> {
        let handle = {
            let mut state = self.state.borrow_mut();
            if state.refuse_create {
                None
            } else {
                state.next_handle += 1;
                let handle = EngineHandle::from_raw(state.next_handle);
                if let Some(h) = handle {
                    state.instances.insert(h, StubInstance::default());
                }
                handle
            }
        };
        self.record(EngineCall::Create(handle));
        handle
    }

    fn destroy(&self, handle: EngineHandle) {
        self.record(EngineCall::Destroy(handle));
        if self.state.borrow_mut().instances.remove(&handle).is_none() {
            log::warn!("stub engine: destroy of unknown handle {}", handle.raw());
        }
    }

    fn initialize(&self, handle: EngineHandle, size: CanvasSize) -> bool {
        self.record(EngineCall::Initialize(handle, size));
        self.with_instance(handle, |i| {
            i.size = size;
            i.initialized = true;
            log::debug!("stub engine initialized: {}x{}", size.width, size.height);
        })
        .is_some()
    }

    fn set_canvas_size(&self, handle: EngineHandle, size: CanvasSize) {
        self.record(EngineCall::SetCanvasSize(handle, size));
        self.with_instance(handle, |i| i.size = size);
    }

    fn render(&self, handle: EngineHandle) {
        self.record(EngineCall::Render(handle));
        self.with_instance(handle, |i| {
            if i.initialized {
                log::trace!("stub engine: frame with {} shapes", i.shapes.len());
            }
        });
    }

    fn mouse_down(&self, handle: EngineHandle, pos: Vec2) {
        self.record(EngineCall::MouseDown(handle, pos));
        self.with_instance(handle, |i| {
            i.pointer_down = true;
            i.last_pointer = pos;
        });
    }

    fn mouse_move(&self, handle: EngineHandle, pos: Vec2) {
        self.record(EngineCall::MouseMove(handle, pos));
        self.with_instance(handle, |i| i.last_pointer = pos);
    }

    fn mouse_up(&self, handle: EngineHandle, pos: Vec2) {
        self.record(EngineCall::MouseUp(handle, pos));
        self.with_instance(handle, |i| {
            i.pointer_down = false;
            i.last_pointer = pos;
        });
    }

    fn add_rectangle(&self, handle: EngineHandle, rect: Rect) -> Option<RectRef> {
        self.record(EngineCall::AddRectangle(handle, rect));
        self.with_instance(handle, |i| {
            i.shapes.push(StubShape { rect, color: DEFAULT_FILL });
            u32::try_from(i.shapes.len() - 1).ok().map(RectRef::new)
        })
        .flatten()
    }

    fn set_rectangle_color(&self, handle: EngineHandle, index: RectRef, color: ColorRgba) {
        self.record(EngineCall::SetRectangleColor(handle, index, color));
        self.with_instance(handle, |i| {
            // Out-of-range indices are ignored, as the engine does.
            if let Some(shape) = i.shapes.get_mut(index.index() as usize) {
                shape.color = color;
            }
        });
    }

    fn clear_shapes(&self, handle: EngineHandle) {
        self.record(EngineCall::ClearShapes(handle));
        self.with_instance(handle, |i| i.shapes.clear());
    }
}

/// Loader handing out a shared [`StubModule`].
#[derive(Debug, Clone)]
pub struct StubLoader {
    module: StubModule,
    failure: Option<String>,
}

impl StubLoader {
    pub fn new(module: StubModule) -> Self {
        Self { module, failure: None }
    }

    /// A loader whose every load fails with `reason`.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            module: StubModule::new(),
            failure: Some(reason.into()),
        }
    }
}

impl ModuleLoader for StubLoader {
    type Module = StubModule;

    fn load(&mut self) -> impl Future<Output = Result<StubModule, BindingError>> {
        self.module.state.borrow_mut().loads += 1;
        let result = match &self.failure {
            Some(reason) => Err(BindingError::ModuleLoad(reason.clone())),
            None => Ok(self.module.clone()),
        };
        ready(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handle(module: &StubModule) -> EngineHandle {
        module.create().expect("stub creates instances")
    }

    // ── instances ─────────────────────────────────────────────────────────

    #[test]
    fn create_hands_out_distinct_handles() {
        let m = StubModule::new();
        let a = handle(&m);
        let b = handle(&m);
        assert_ne!(a, b);
        assert_eq!(m.live_instances(), 2);
    }

    #[test]
    fn refusing_create_returns_null_instance() {
        let m = StubModule::refusing_create();
        assert!(m.create().is_none());
        assert_eq!(m.calls(), vec![EngineCall::Create(None)]);
        assert_eq!(m.live_instances(), 0);
    }

    #[test]
    fn destroy_forgets_instance() {
        let m = StubModule::new();
        let h = handle(&m);
        m.destroy(h);
        assert_eq!(m.live_instances(), 0);
        assert!(m.canvas(h).is_none());
    }

    // ── shapes ────────────────────────────────────────────────────────────

    #[test]
    fn rectangle_indices_are_list_positions() {
        let m = StubModule::new();
        let h = handle(&m);
        let a = m.add_rectangle(h, Rect::new(0.0, 0.0, 10.0, 10.0));
        let b = m.add_rectangle(h, Rect::new(5.0, 5.0, 10.0, 10.0));
        assert_eq!(a, Some(RectRef::new(0)));
        assert_eq!(b, Some(RectRef::new(1)));
        assert_eq!(m.shapes(h)[1].color, DEFAULT_FILL);
    }

    #[test]
    fn color_applies_to_addressed_shape_only() {
        let m = StubModule::new();
        let h = handle(&m);
        m.add_rectangle(h, Rect::new(0.0, 0.0, 10.0, 10.0));
        let b = m.add_rectangle(h, Rect::new(0.0, 0.0, 10.0, 10.0)).unwrap();
        let red = ColorRgba::opaque(1.0, 0.0, 0.0);
        m.set_rectangle_color(h, b, red);
        let shapes = m.shapes(h);
        assert_eq!(shapes[0].color, DEFAULT_FILL);
        assert_eq!(shapes[1].color, red);
    }

    #[test]
    fn out_of_range_color_is_ignored() {
        let m = StubModule::new();
        let h = handle(&m);
        m.add_rectangle(h, Rect::new(0.0, 0.0, 10.0, 10.0));
        m.set_rectangle_color(h, RectRef::new(7), ColorRgba::opaque(0.0, 1.0, 0.0));
        assert_eq!(m.shapes(h)[0].color, DEFAULT_FILL);
    }

    #[test]
    fn clear_restarts_indices() {
        let m = StubModule::new();
        let h = handle(&m);
        m.add_rectangle(h, Rect::new(0.0, 0.0, 1.0, 1.0));
        m.clear_shapes(h);
        assert!(m.shapes(h).is_empty());
        assert_eq!(m.add_rectangle(h, Rect::new(0.0, 0.0, 1.0, 1.0)), Some(RectRef::new(0)));
    }

    #[test]
    fn unknown_handle_adds_nothing() {
        let m = StubModule::new();
        let h = handle(&m);
        m.destroy(h);
        assert_eq!(m.add_rectangle(h, Rect::new(0.0, 0.0, 1.0, 1.0)), None);
    }

    // ── pointer ───────────────────────────────────────────────────────────

    #[test]
    fn pointer_tracks_press_and_position() {
        let m = StubModule::new();
        let h = handle(&m);
        m.mouse_down(h, Vec2::new(1.0, 2.0));
        assert_eq!(m.pointer(h), Some((true, Vec2::new(1.0, 2.0))));
        m.mouse_move(h, Vec2::new(3.0, 4.0));
        assert_eq!(m.pointer(h), Some((true, Vec2::new(3.0, 4.0))));
        m.mouse_up(h, Vec2::new(5.0, 6.0));
        assert_eq!(m.pointer(h), Some((false, Vec2::new(5.0, 6.0))));
    }

    // ── loader ────────────────────────────────────────────────────────────

    #[test]
    fn loader_shares_state_with_its_module() {
        let module = StubModule::new();
        let mut loader = StubLoader::new(module.clone());
        let loaded = pollster::block_on(loader.load()).unwrap();
        loaded.create();
        assert_eq!(module.live_instances(), 1);
        assert_eq!(module.loads(), 1);
    }

    #[test]
    fn failing_loader_reports_reason() {
        let mut loader = StubLoader::failing("script 404");
        let err = pollster::block_on(loader.load()).unwrap_err();
        assert!(matches!(err, BindingError::ModuleLoad(ref r) if r == "script 404"));
    }
}
