use std::cell::RefCell;
use std::rc::Rc;

use crate::coords::{CanvasSize, ColorRgba};

use super::{CanvasTarget, RenderSurface};

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum SurfaceOp {
    Configure(ColorRgba),
    Resize(CanvasSize),
    Clear,
}

/// Shared operation log; clones observe the same entries.
#[derive(Debug, Clone, Default)]
pub struct SurfaceLog(Rc<RefCell<Vec<SurfaceOp>>>);

impl SurfaceLog {
    pub fn ops(&self) -> Vec<SurfaceOp> {
        self.0.borrow().clone()
    }

    pub fn clears(&self) -> usize {
        self.0.borrow().iter().filter(|op| **op == SurfaceOp::Clear).count()
    }

    fn push(&self, op: SurfaceOp) {
        self.0.borrow_mut().push(op);
    }
}

/// Surface that only records what it was asked to do.
#[derive(Debug)]
pub struct RecordingSurface {
    log: SurfaceLog,
}

impl RenderSurface for RecordingSurface {
    fn configure(&mut self, clear: ColorRgba) {
        self.log.push(SurfaceOp::Configure(clear));
    }

    fn resize(&mut self, size: CanvasSize) {
        self.log.push(SurfaceOp::Resize(size));
    }

    fn clear(&mut self) {
        self.log.push(SurfaceOp::Clear);
    }
}

/// Canvas double. `StubCanvas::unsupported` behaves like a canvas with no GPU context.
#[derive(Debug, Clone)]
pub struct StubCanvas {
    supported: bool,
    log: SurfaceLog,
}

impl StubCanvas {
    pub fn new() -> Self {
        Self { supported: true, log: SurfaceLog::default() }
    }

    pub fn unsupported() -> Self {
        Self { supported: false, log: SurfaceLog::default() }
    }

    pub fn log(&self) -> SurfaceLog {
        self.log.clone()
    }
}

impl Default for StubCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl CanvasTarget for StubCanvas {
    type Surface = RecordingSurface;

    fn into_surface(self) -> anyhow::Result<RecordingSurface> {
        anyhow::ensure!(self.supported, "canvas has no GPU context");
        Ok(RecordingSurface { log: self.log })
    }
}
