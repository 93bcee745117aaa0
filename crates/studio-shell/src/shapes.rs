//! Random shape synthesis for the shell's quick-add actions and draw mode.

use std::ops::Range;

use studio_engine::coords::{CanvasSize, ColorRgba, Rect, Vec2};

/// Edge length range for rectangles placed anywhere on the canvas.
pub const PLACED_SIDE: Range<f32> = 20.0..150.0;
/// Edge length range for rectangles drawn at the pointer.
pub const DRAWN_SIDE: Range<f32> = 20.0..100.0;

/// Seedable source of rectangles and fill colors.
#[derive(Debug, Clone)]
pub struct ShapeRng {
    rng: fastrand::Rng,
}

impl ShapeRng {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };
        Self { rng }
    }

    /// A rectangle lying entirely on `canvas`.
    pub fn rect_within(&mut self, canvas: CanvasSize) -> Rect {
        let (cw, ch) = (canvas.width as f32, canvas.height as f32);
        let w = self.side_up_to(cw);
        let h = self.side_up_to(ch);
        let x = self.rng.f32() * (cw - w);
        let y = self.rng.f32() * (ch - h);
        Rect::new(x, y, w, h)
    }

    /// A rectangle whose top-left corner is `at`.
    pub fn rect_at(&mut self, at: Vec2) -> Rect {
        let w = self.in_range(DRAWN_SIDE);
        let h = self.in_range(DRAWN_SIDE);
        Rect::new(at.x, at.y, w, h)
    }

    /// An opaque color with uniformly random channels.
    pub fn color(&mut self) -> ColorRgba {
        ColorRgba::opaque(self.rng.f32(), self.rng.f32(), self.rng.f32())
    }

    fn side_up_to(&mut self, limit: f32) -> f32 {
        let hi = PLACED_SIDE.end.min(limit);
        let lo = PLACED_SIDE.start.min(hi);
        self.in_range(lo..hi)
    }

    fn in_range(&mut self, range: Range<f32>) -> f32 {
        range.start + self.rng.f32() * (range.end - range.start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placed_rects_stay_on_canvas() {
        let mut rng = ShapeRng::new(Some(7));
        for canvas in [CanvasSize::new(100, 100), CanvasSize::new(800, 600), CanvasSize::new(2000, 120)] {
            for _ in 0..200 {
                let r = rng.rect_within(canvas);
                assert!(r.fits_within(canvas), "{r:?} escapes {canvas:?}");
                assert!(!r.is_empty());
            }
        }
    }

    #[test]
    fn placed_rects_shrink_on_tiny_canvas() {
        let mut rng = ShapeRng::new(Some(1));
        let canvas = CanvasSize::new(10, 10);
        for _ in 0..50 {
            assert!(rng.rect_within(canvas).fits_within(canvas));
        }
    }

    #[test]
    fn drawn_rects_start_at_pointer() {
        let mut rng = ShapeRng::new(Some(3));
        let at = Vec2::new(42.0, 17.0);
        let r = rng.rect_at(at);
        assert_eq!(r.origin, at);
        let side = DRAWN_SIDE.start..=DRAWN_SIDE.end;
        assert!(side.contains(&r.size.x));
        assert!(side.contains(&r.size.y));
    }

    #[test]
    fn colors_are_opaque_and_normalized() {
        let mut rng = ShapeRng::new(Some(9));
        for _ in 0..100 {
            let c = rng.color();
            assert_eq!(c.a, 1.0);
            assert!(c.is_normalized());
        }
    }

    #[test]
    fn same_seed_same_sequence() {
        let canvas = CanvasSize::new(800, 600);
        let mut a = ShapeRng::new(Some(1234));
        let mut b = ShapeRng::new(Some(1234));
        assert_eq!(a.rect_within(canvas), b.rect_within(canvas));
        assert_eq!(a.color(), b.color());
    }
}
