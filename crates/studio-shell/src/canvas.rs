//! Canvas sizing and pointer mapping.

use studio_engine::coords::{CanvasSize, Vec2};

/// Smallest canvas edge the shell accepts, in pixels.
pub const MIN_CANVAS_EDGE: u32 = 100;
/// Largest canvas edge the shell accepts, in pixels.
pub const MAX_CANVAS_EDGE: u32 = 2000;
/// Step used by the grow/shrink shortcuts.
pub const CANVAS_STEP: i32 = 50;

pub const DEFAULT_CANVAS: CanvasSize = CanvasSize::new(800, 600);

/// The canvas fills the window client area, so their origins coincide.
pub const CANVAS_ORIGIN: Vec2 = Vec2::zero();

#[inline]
pub fn clamp_edge(v: u32) -> u32 {
    v.clamp(MIN_CANVAS_EDGE, MAX_CANVAS_EDGE)
}

#[inline]
pub fn clamp_canvas(size: CanvasSize) -> CanvasSize {
    CanvasSize::new(clamp_edge(size.width), clamp_edge(size.height))
}

/// Grows (or shrinks, for negative deltas) each edge and clamps the result.
pub fn step_canvas(size: CanvasSize, dw: i32, dh: i32) -> CanvasSize {
    let step = |edge: u32, d: i32| clamp_edge(edge.saturating_add_signed(d));
    CanvasSize::new(step(size.width, dw), step(size.height, dh))
}

/// Canvas size to adopt after the window was resized to `window`.
///
/// A minimized window reports a zero-area size; that yields `None` and the
/// canvas keeps its size.
pub fn canvas_for_window(window: CanvasSize) -> Option<CanvasSize> {
    (!window.is_empty()).then(|| clamp_canvas(window))
}

/// Converts a pointer position in client space to canvas-local coordinates.
#[inline]
pub fn to_canvas_local(client: Vec2, canvas_origin: Vec2) -> Vec2 {
    client - canvas_origin
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_edge_bounds() {
        assert_eq!(clamp_edge(0), MIN_CANVAS_EDGE);
        assert_eq!(clamp_edge(99), 100);
        assert_eq!(clamp_edge(640), 640);
        assert_eq!(clamp_edge(5000), MAX_CANVAS_EDGE);
    }

    #[test]
    fn step_canvas_clamps_both_directions() {
        let grown = step_canvas(CanvasSize::new(1990, 120), CANVAS_STEP, -CANVAS_STEP);
        assert_eq!(grown, CanvasSize::new(2000, 100));
    }

    #[test]
    fn step_canvas_plain_step() {
        let s = step_canvas(DEFAULT_CANVAS, CANVAS_STEP, 0);
        assert_eq!(s, CanvasSize::new(850, 600));
    }

    #[test]
    fn minimized_window_keeps_canvas() {
        assert_eq!(canvas_for_window(CanvasSize::new(0, 0)), None);
        assert_eq!(canvas_for_window(CanvasSize::new(1024, 0)), None);
    }

    #[test]
    fn window_size_is_clamped() {
        assert_eq!(
            canvas_for_window(CanvasSize::new(40, 900)),
            Some(CanvasSize::new(100, 900))
        );
    }

    #[test]
    fn canvas_local_subtracts_origin() {
        let local = to_canvas_local(Vec2::new(130.0, 95.5), Vec2::new(30.0, 15.5));
        assert_eq!(local, Vec2::new(100.0, 80.0));
    }
}
