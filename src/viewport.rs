//! Plane-centred coordinates and the screen rectangle they map onto.
//!
//! The core works in a plane whose origin sits at the centre of the viewport,
//! x growing right and y growing down (matching pixel rows). Pixel coordinates
//! have their origin at the top-left corner. Converting between the two is a
//! shift by half the viewport size.

use glam::Vec2;

/// Logical viewport size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(900, 600)
    }
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0, "Viewport must be non-empty");
        Self { width, height }
    }

    /// Half extents `(w/2, h/2)`.
    #[inline]
    pub fn half(&self) -> Vec2 {
        Vec2::new(self.width as f32 * 0.5, self.height as f32 * 0.5)
    }

    /// Pixel coordinates to plane coordinates.
    #[inline]
    pub fn to_plane(&self, pixel: Vec2) -> Vec2 {
        pixel - self.half()
    }

    /// Plane coordinates to pixel coordinates.
    #[inline]
    pub fn to_pixel(&self, plane: Vec2) -> Vec2 {
        plane + self.half()
    }

    /// True when `p` lies outside the viewport grown by `margin` on every
    /// side. Points exactly on the grown edge are still inside.
    #[inline]
    pub fn is_outside(&self, p: Vec2, margin: f32) -> bool {
        let half = self.half();
        p.x < -half.x - margin
            || p.x > half.x + margin
            || p.y < -half.y - margin
            || p.y > half.y + margin
    }

    /// Map a cursor position in physical window pixels onto viewport pixels.
    ///
    /// The window can be resized freely while the viewport stays fixed, so the
    /// cursor is rescaled by the window/viewport ratio on each axis.
    pub fn window_to_pixel(&self, cursor: Vec2, window_size: (u32, u32)) -> Vec2 {
        let (w, h) = window_size;
        if w == 0 || h == 0 {
            return cursor;
        }
        Vec2::new(
            cursor.x * self.width as f32 / w as f32,
            cursor.y * self.height as f32 / h as f32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plane_pixel_conversion() {
        let vp = Viewport::new(900, 600);
        assert_eq!(vp.to_plane(Vec2::new(450.0, 300.0)), Vec2::ZERO);
        assert_eq!(vp.to_plane(Vec2::ZERO), Vec2::new(-450.0, -300.0));
        assert_eq!(vp.to_pixel(Vec2::new(-150.0, 0.0)), Vec2::new(300.0, 300.0));
    }

    #[test]
    fn test_outside_with_margin_is_inclusive_at_edge() {
        let vp = Viewport::new(900, 600);
        assert!(!vp.is_outside(Vec2::new(500.0, 0.0), 50.0));
        assert!(vp.is_outside(Vec2::new(500.1, 0.0), 50.0));
        assert!(!vp.is_outside(Vec2::new(0.0, -350.0), 50.0));
        assert!(vp.is_outside(Vec2::new(0.0, -350.1), 50.0));
        assert!(!vp.is_outside(Vec2::new(0.0, 400.0), 100.0));
    }

    #[test]
    fn test_window_to_pixel_rescales() {
        let vp = Viewport::new(900, 600);
        let p = vp.window_to_pixel(Vec2::new(900.0, 600.0), (1800, 1200));
        assert_eq!(p, Vec2::new(450.0, 300.0));
        // Degenerate window passes the cursor through
        let q = vp.window_to_pixel(Vec2::new(3.0, 4.0), (0, 0));
        assert_eq!(q, Vec2::new(3.0, 4.0));
    }
}
