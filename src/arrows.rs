//! Direction arrows sampled on a regular pixel grid.
//!
//! Arrows have a fixed length regardless of field strength; they only show
//! direction. Samples with a near-zero field are skipped.

use glam::Vec2;

use crate::charge::Charge;
use crate::field::{direction_at, FieldConfig};
use crate::viewport::Viewport;

/// Layout and shape of the arrow grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArrowConfig {
    /// Distance between samples in pixels. The first sample is at half this.
    pub spacing: u32,
    /// Shaft length.
    pub length: f32,
    /// Length of each head stroke.
    pub head_length: f32,
    /// Angle between shaft and each head stroke, in radians.
    pub head_angle: f32,
    /// Samples with a weaker field are skipped.
    pub min_field: f32,
}

impl Default for ArrowConfig {
    fn default() -> Self {
        Self {
            spacing: 40,
            length: 15.0,
            head_length: 6.0,
            head_angle: 0.6,
            min_field: 1e-3,
        }
    }
}

impl ArrowConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_spacing(mut self, spacing: u32) -> Self {
        assert!(spacing > 0, "Arrow spacing must be positive");
        self.spacing = spacing;
        self
    }

    pub fn with_length(mut self, length: f32) -> Self {
        self.length = length;
        self
    }

    pub fn with_head(mut self, length: f32, angle: f32) -> Self {
        self.head_length = length;
        self.head_angle = angle;
        self
    }

    pub fn with_min_field(mut self, min_field: f32) -> Self {
        self.min_field = min_field;
        self
    }
}

/// One arrow in plane coordinates: shaft `tail → tip`, plus two head strokes
/// `tip → heads[i]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arrow {
    pub tail: Vec2,
    pub tip: Vec2,
    pub heads: [Vec2; 2],
}

impl Arrow {
    fn new(tail: Vec2, dir: Vec2, config: &ArrowConfig) -> Self {
        let tip = tail + dir * config.length;
        let angle = dir.y.atan2(dir.x);
        let head = |a: f32| tip - config.head_length * Vec2::new(a.cos(), a.sin());
        Self {
            tail,
            tip,
            heads: [head(angle + config.head_angle), head(angle - config.head_angle)],
        }
    }

    /// The three strokes making up the arrow.
    pub fn strokes(&self) -> [(Vec2, Vec2); 3] {
        [
            (self.tail, self.tip),
            (self.tip, self.heads[0]),
            (self.tip, self.heads[1]),
        ]
    }
}

/// Pixel centres of the sample grid, row by row.
pub fn grid_pixels(viewport: Viewport, spacing: u32) -> impl Iterator<Item = Vec2> {
    let step = spacing as usize;
    let start = spacing / 2;
    (start..viewport.height).step_by(step).flat_map(move |py| {
        (start..viewport.width)
            .step_by(step)
            .map(move |px| Vec2::new(px as f32, py as f32))
    })
}

/// Sample the arrow grid for the current charge set.
pub fn build_arrows(
    charges: &[Charge],
    field: &FieldConfig,
    config: &ArrowConfig,
    viewport: Viewport,
) -> Vec<Arrow> {
    grid_pixels(viewport, config.spacing)
        .filter_map(|pixel| {
            let p = viewport.to_plane(pixel);
            let (dir, _) = direction_at(p, charges, field, config.min_field)?;
            Some(Arrow::new(p, dir, config))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_layout() {
        let pixels: Vec<Vec2> = grid_pixels(Viewport::new(900, 600), 40).collect();
        // 20, 60, ..., 860 across; 20, 60, ..., 580 down
        assert_eq!(pixels.len(), 22 * 15);
        assert_eq!(pixels[0], Vec2::new(20.0, 20.0));
        assert_eq!(pixels[21], Vec2::new(860.0, 20.0));
        assert_eq!(*pixels.last().unwrap(), Vec2::new(860.0, 580.0));
    }

    #[test]
    fn test_no_charges_no_arrows() {
        let arrows = build_arrows(
            &[],
            &FieldConfig::default(),
            &ArrowConfig::default(),
            Viewport::default(),
        );
        assert!(arrows.is_empty());
    }

    #[test]
    fn test_arrow_shape() {
        let cfg = ArrowConfig::default();
        let arrow = Arrow::new(Vec2::ZERO, Vec2::X, &cfg);
        assert!((arrow.tip - Vec2::new(15.0, 0.0)).length() < 1e-5);
        for h in arrow.heads {
            assert!((h.distance(arrow.tip) - 6.0).abs() < 1e-4);
            // Heads sit behind the tip
            assert!(h.x < arrow.tip.x);
        }
        // Mirror images about the shaft
        assert!((arrow.heads[0].y + arrow.heads[1].y).abs() < 1e-5);
    }

    #[test]
    fn test_arrows_point_away_from_positive_charge() {
        let charges = [Charge::new(Vec2::ZERO, 1.0)];
        let arrows = build_arrows(
            &charges,
            &FieldConfig::default(),
            &ArrowConfig::default(),
            Viewport::default(),
        );
        assert!(!arrows.is_empty());
        for a in &arrows {
            assert!(a.tip.length() > a.tail.length());
        }
    }
}
