//! Per-pixel field-magnitude background.
//!
//! Every viewport pixel is converted to plane coordinates, the field magnitude
//! is scaled by a brightness constant, clamped to `[0, 1]` and written as an
//! opaque grey pixel. The whole image is rebuilt whenever the charge set
//! changes; nothing is patched incrementally.

use image::{Rgba, RgbaImage};

use crate::charge::Charge;
use crate::field::{magnitude_at, FieldConfig};
use crate::viewport::Viewport;

/// Brightness mapping for the background.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BackgroundConfig {
    /// Multiplier from field magnitude to brightness; 1.0 brightness is white.
    pub brightness_scale: f32,
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            brightness_scale: 0.03,
        }
    }
}

impl BackgroundConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_brightness_scale(mut self, scale: f32) -> Self {
        self.brightness_scale = scale;
        self
    }
}

/// Brightness in `[0, 1]` for a field magnitude. Non-finite input maps to 0.
#[inline]
pub fn brightness(magnitude: f32, scale: f32) -> f32 {
    let v = magnitude * scale;
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 1.0)
    }
}

/// 8-bit intensity for a brightness already clamped to `[0, 1]`.
#[inline]
pub fn intensity(brightness: f32) -> u8 {
    (brightness * 255.0) as u8
}

/// Greyscale image of field magnitude, one pixel per viewport pixel.
#[derive(Debug, Clone, PartialEq)]
pub struct BackgroundField {
    image: RgbaImage,
}

impl BackgroundField {
    /// Sample the field at every pixel. O(pixels × charges).
    pub fn sample(
        charges: &[Charge],
        field: &FieldConfig,
        config: &BackgroundConfig,
        viewport: Viewport,
    ) -> Self {
        let half = viewport.half();
        let image = RgbaImage::from_fn(viewport.width, viewport.height, |px, py| {
            let p = glam::Vec2::new(px as f32 - half.x, py as f32 - half.y);
            let b = brightness(magnitude_at(p, charges, field), config.brightness_scale);
            let c = intensity(b);
            Rgba([c, c, c, 255])
        });
        Self { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Grey level at a pixel.
    pub fn intensity_at(&self, px: u32, py: u32) -> u8 {
        self.image.get_pixel(px, py).0[0]
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }
}
