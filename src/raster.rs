//! CPU composition of a full frame.
//!
//! The frame is drawn into an [`RgbaImage`] the size of the viewport, back to
//! front: background (or black), field lines, arrows, charges, test particle.
//! The GPU side only uploads and stretches the finished image.

use glam::Vec2;
use image::{Rgba, RgbaImage};

use crate::charge::Polarity;
use crate::session::Frame;

/// Colours and sizes used when composing a frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    pub empty_background: [u8; 4],
    pub field_line: [u8; 4],
    pub arrow: [u8; 4],
    pub positive_charge: [u8; 4],
    pub negative_charge: [u8; 4],
    pub particle: [u8; 4],
    pub charge_radius: f32,
    pub particle_radius: f32,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            empty_background: [0, 0, 0, 255],
            field_line: [255, 255, 255, 180],
            arrow: [0, 255, 0, 200],
            positive_charge: [255, 80, 80, 255],
            negative_charge: [80, 80, 255, 255],
            particle: [255, 255, 0, 255],
            charge_radius: 7.0,
            particle_radius: 4.0,
        }
    }
}

impl Palette {
    pub fn charge_color(&self, polarity: Polarity) -> [u8; 4] {
        match polarity {
            Polarity::Positive => self.positive_charge,
            Polarity::Negative => self.negative_charge,
        }
    }
}

/// Source-over blend of `color` onto the pixel at `(x, y)`. Off-image
/// coordinates are ignored.
pub fn blend_pixel(image: &mut RgbaImage, x: i64, y: i64, color: [u8; 4]) {
    if x < 0 || y < 0 || x >= image.width() as i64 || y >= image.height() as i64 {
        return;
    }
    let dst = image.get_pixel_mut(x as u32, y as u32);
    let a = color[3] as u32;
    if a == 255 {
        *dst = Rgba(color);
        return;
    }
    let inv = 255 - a;
    for i in 0..3 {
        dst.0[i] = ((color[i] as u32 * a + dst.0[i] as u32 * inv + 127) / 255) as u8;
    }
    dst.0[3] = (a + (dst.0[3] as u32 * inv + 127) / 255).min(255) as u8;
}

/// Pixels covered by a one-pixel line between two pixel-space points
/// (Bresenham), endpoints included.
fn line_pixels(from: Vec2, to: Vec2) -> Vec<(i64, i64)> {
    let (mut x0, mut y0) = (from.x.round() as i64, from.y.round() as i64);
    let (x1, y1) = (to.x.round() as i64, to.y.round() as i64);
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    let mut out = Vec::with_capacity((dx - dy + 1) as usize);
    loop {
        out.push((x0, y0));
        if x0 == x1 && y0 == y1 {
            return out;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

/// One-pixel line between two pixel-space points.
pub fn draw_line(image: &mut RgbaImage, from: Vec2, to: Vec2, color: [u8; 4]) {
    for (x, y) in line_pixels(from, to) {
        blend_pixel(image, x, y, color);
    }
}

/// Polyline through consecutive pixel-space points. Shared vertices are drawn
/// once so translucent strokes do not darken at joints.
pub fn draw_polyline(
    image: &mut RgbaImage,
    points: impl IntoIterator<Item = Vec2>,
    color: [u8; 4],
) {
    let mut iter = points.into_iter();
    let Some(mut prev) = iter.next() else {
        return;
    };
    let mut skip_first = false;
    for p in iter {
        for (x, y) in line_pixels(prev, p).into_iter().skip(skip_first as usize) {
            blend_pixel(image, x, y, color);
        }
        skip_first = true;
        prev = p;
    }
}

/// Filled disc: every pixel whose centre lies within `radius` of `center`.
pub fn fill_circle(image: &mut RgbaImage, center: Vec2, radius: f32, color: [u8; 4]) {
    let r2 = radius * radius;
    let x_min = (center.x - radius).floor() as i64;
    let x_max = (center.x + radius).ceil() as i64;
    let y_min = (center.y - radius).floor() as i64;
    let y_max = (center.y + radius).ceil() as i64;
    for y in y_min..=y_max {
        for x in x_min..=x_max {
            let d = Vec2::new(x as f32 + 0.5, y as f32 + 0.5) - center;
            if d.length_squared() <= r2 {
                blend_pixel(image, x, y, color);
            }
        }
    }
}

/// Compose the whole frame, back to front.
pub fn compose_frame(frame: &Frame<'_>, palette: &Palette) -> RgbaImage {
    let vp = frame.viewport;
    let mut image = match frame.background {
        Some(bg) if bg.width() == vp.width && bg.height() == vp.height => bg.image().clone(),
        _ => RgbaImage::from_pixel(vp.width, vp.height, Rgba(palette.empty_background)),
    };

    for line in frame.field_lines {
        draw_polyline(
            &mut image,
            line.points.iter().map(|&p| vp.to_pixel(p)),
            palette.field_line,
        );
    }

    for arrow in frame.arrows {
        for (a, b) in arrow.strokes() {
            draw_line(&mut image, vp.to_pixel(a), vp.to_pixel(b), palette.arrow);
        }
    }

    for charge in frame.charges {
        fill_circle(
            &mut image,
            vp.to_pixel(charge.position),
            palette.charge_radius,
            palette.charge_color(charge.polarity()),
        );
    }

    if let Some(p) = frame.particle {
        fill_circle(
            &mut image,
            vp.to_pixel(p),
            palette.particle_radius,
            palette.particle,
        );
    }

    image
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::session::{Session, SessionEvent};
    use crate::viewport::Viewport;

    #[test]
    fn test_blend_opaque_and_translucent() {
        let mut img = RgbaImage::from_pixel(2, 1, Rgba([0, 0, 0, 255]));
        blend_pixel(&mut img, 0, 0, [255, 80, 80, 255]);
        assert_eq!(img.get_pixel(0, 0).0, [255, 80, 80, 255]);

        blend_pixel(&mut img, 1, 0, [255, 255, 255, 180]);
        let px = img.get_pixel(1, 0).0;
        assert_eq!(px[0], 180);
        assert_eq!(px[3], 255);

        // Out of range is ignored
        blend_pixel(&mut img, -1, 0, [1, 2, 3, 255]);
        blend_pixel(&mut img, 2, 0, [1, 2, 3, 255]);
    }

    #[test]
    fn test_line_covers_endpoints() {
        let mut img = RgbaImage::from_pixel(10, 10, Rgba([0, 0, 0, 255]));
        draw_line(
            &mut img,
            Vec2::new(1.0, 1.0),
            Vec2::new(8.0, 4.0),
            [255, 255, 255, 255],
        );
        assert_eq!(img.get_pixel(1, 1).0[0], 255);
        assert_eq!(img.get_pixel(8, 4).0[0], 255);
        let lit = img.pixels().filter(|p| p.0[0] == 255).count();
        assert_eq!(lit, 8);
    }

    #[test]
    fn test_polyline_joints_not_double_blended() {
        let mut img = RgbaImage::from_pixel(10, 3, Rgba([0, 0, 0, 255]));
        let pts = [Vec2::new(0.0, 1.0), Vec2::new(4.0, 1.0), Vec2::new(8.0, 1.0)];
        draw_polyline(&mut img, pts, [255, 255, 255, 180]);
        for x in 0..=8 {
            assert_eq!(img.get_pixel(x, 1).0[0], 180);
        }
    }

    #[test]
    fn test_fill_circle_radius() {
        let mut img = RgbaImage::from_pixel(20, 20, Rgba([0, 0, 0, 255]));
        fill_circle(&mut img, Vec2::new(10.0, 10.0), 4.0, [255, 255, 0, 255]);
        assert_eq!(img.get_pixel(10, 10).0, [255, 255, 0, 255]);
        assert_eq!(img.get_pixel(0, 0).0, [0, 0, 0, 255]);
        assert_eq!(img.get_pixel(10, 15).0, [0, 0, 0, 255]);
    }

    #[test]
    fn test_compose_before_first_rebuild_is_black_with_charges() {
        let session = Session::new(Config::new().with_viewport(Viewport::new(400, 100)));
        let img = compose_frame(&session.frame(), &Palette::default());
        assert_eq!((img.width(), img.height()), (400, 100));
        // Charges at (-150, 0) and (150, 0) map to pixels (50, 50) and (350, 50)
        assert_eq!(img.get_pixel(50, 50).0, [255, 80, 80, 255]);
        assert_eq!(img.get_pixel(350, 50).0, [80, 80, 255, 255]);
        assert_eq!(img.get_pixel(200, 5).0, [0, 0, 0, 255]);
    }

    #[test]
    fn test_compose_draws_particle() {
        let mut session = Session::empty(Config::new().with_viewport(Viewport::new(100, 100)));
        session.tick([SessionEvent::SpawnParticle {
            position: Vec2::new(10.0, 10.0),
        }]);
        let img = compose_frame(&session.frame(), &Palette::default());
        // Empty field: particle holds at (60, 60)
        assert_eq!(img.get_pixel(60, 60).0, [255, 255, 0, 255]);
    }
}
