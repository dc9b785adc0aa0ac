//! Electric field from a set of point charges.
//!
//! The field at a point is the superposition of Coulomb-like contributions
//! from every charge:
//!
//! ```text
//! E(P) = Σ k·q / r³ · (P − c)      with r² clamped to at least `min_r2`
//! ```
//!
//! The `min_r2` floor is the only regularization in the crate. It keeps the
//! field finite at (and near) a charge, so the tracer, the background sampler
//! and the test particle never see an unbounded magnitude.
//!
//! # Example
//!
//! ```
//! use efield::{field_at, Charge, FieldConfig};
//! use glam::Vec2;
//!
//! let charges = [Charge::new(Vec2::new(-150.0, 0.0), 1.0)];
//! let e = field_at(Vec2::ZERO, &charges, &FieldConfig::default());
//! assert!(e.x > 0.0);
//! ```

use glam::Vec2;

use crate::charge::Charge;

/// Constants of the field model.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldConfig {
    /// Coulomb-like proportionality constant `k`.
    pub k: f32,

    /// Floor applied to the squared distance before dividing.
    /// Bounds the field magnitude by `k·|q| / min_r2` per charge.
    pub min_r2: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            k: 2000.0,
            min_r2: 16.0,
        }
    }
}

impl FieldConfig {
    /// Create a field configuration with the default constants.
    ///
    /// Default values:
    /// - `k`: 2000.0
    /// - `min_r2`: 16.0 (a 4 px core radius)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the proportionality constant.
    pub fn with_k(mut self, k: f32) -> Self {
        self.k = k;
        self
    }

    /// Set the squared-distance floor.
    pub fn with_min_r2(mut self, min_r2: f32) -> Self {
        assert!(min_r2 > 0.0, "min_r2 must be positive");
        self.min_r2 = min_r2;
        self
    }

    /// Largest magnitude a single unit charge can produce anywhere.
    pub fn peak_unit_magnitude(&self) -> f32 {
        self.k / self.min_r2
    }
}

/// Contribution of a single charge at `point`.
#[inline]
pub fn contribution(point: Vec2, charge: &Charge, config: &FieldConfig) -> Vec2 {
    let d = point - charge.position;
    let r2 = d.length_squared().max(config.min_r2);
    let r = r2.sqrt();
    d * (config.k * charge.q / (r2 * r)) // k*q/r^3
}

/// Superposed field at `point`. Returns zero for an empty charge set.
///
/// Summation runs in slice order so repeated evaluations are bit-identical.
pub fn field_at(point: Vec2, charges: &[Charge], config: &FieldConfig) -> Vec2 {
    charges
        .iter()
        .fold(Vec2::ZERO, |e, c| e + contribution(point, c, config))
}

/// Field magnitude at `point`.
#[inline]
pub fn magnitude_at(point: Vec2, charges: &[Charge], config: &FieldConfig) -> f32 {
    field_at(point, charges, config).length()
}

/// Unit field direction and magnitude, or `None` when the magnitude is below
/// `floor` or not finite.
///
/// Shared by the tracer and the test particle, which only differ in the floor
/// they use.
#[inline]
pub fn direction_at(
    point: Vec2,
    charges: &[Charge],
    config: &FieldConfig,
    floor: f32,
) -> Option<(Vec2, f32)> {
    let e = field_at(point, charges, config);
    let mag = e.length();
    // Negated comparison so NaN counts as too weak
    if !(mag >= floor) || !mag.is_finite() {
        return None;
    }
    Some((e / mag, mag))
}
