use super::{CanvasSize, Vec2};

/// Axis-aligned rectangle in canvas pixels (top-left origin).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn max(self) -> Vec2 {
        self.origin + self.size
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }

    /// True when the whole rectangle lies on a canvas of `canvas` size.
    #[inline]
    pub fn fits_within(self, canvas: CanvasSize) -> bool {
        let max = self.max();
        self.origin.x >= 0.0
            && self.origin.y >= 0.0
            && max.x <= canvas.width as f32
            && max.y <= canvas.height as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(x: f32, y: f32, w: f32, h: f32) -> Rect { Rect::new(x, y, w, h) }

    // ── fits_within ───────────────────────────────────────────────────────

    #[test]
    fn fits_within_touching_edges() {
        let canvas = CanvasSize::new(100, 50);
        assert!(r(0.0, 0.0, 100.0, 50.0).fits_within(canvas));
    }

    #[test]
    fn fits_within_rejects_overhang() {
        let canvas = CanvasSize::new(100, 50);
        assert!(!r(90.0, 0.0, 20.0, 10.0).fits_within(canvas));
        assert!(!r(-1.0, 0.0, 20.0, 10.0).fits_within(canvas));
        assert!(!r(0.0, 45.0, 20.0, 10.0).fits_within(canvas));
    }

    // ── is_empty ──────────────────────────────────────────────────────────

    #[test]
    fn is_empty_zero_size() {
        assert!(r(0.0, 0.0, 0.0, 5.0).is_empty());
        assert!(r(0.0, 0.0, 5.0, 0.0).is_empty());
        assert!(!r(0.0, 0.0, 1.0, 1.0).is_empty());
    }
}
