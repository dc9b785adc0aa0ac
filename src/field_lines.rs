//! Seeding and collecting the full set of field lines.
//!
//! Every charge gets `seeds_per_charge` seed points spread evenly on a small
//! ring around it. One line is traced per seed: forward for positive charges,
//! backward for negative ones, so lines leave positive charges and arrive at
//! negative charges. Degenerate lines (one point or none) are dropped.

use std::f32::consts::TAU;

use glam::Vec2;

use crate::charge::Charge;
use crate::field::FieldConfig;
use crate::tracer::{trace_field_line, FieldLine, TracerConfig};
use crate::viewport::Viewport;

/// Where and how many lines start around each charge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SeedConfig {
    /// Lines per charge.
    pub seeds_per_charge: usize,
    /// Radius of the seed ring.
    pub seed_radius: f32,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            seeds_per_charge: 20,
            seed_radius: 8.0,
        }
    }
}

impl SeedConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seeds_per_charge(mut self, n: usize) -> Self {
        self.seeds_per_charge = n;
        self
    }

    pub fn with_seed_radius(mut self, radius: f32) -> Self {
        self.seed_radius = radius;
        self
    }
}

/// Evenly spaced points on a ring: angle `TAU * i / n` for `i in 0..n`.
pub fn seed_ring(center: Vec2, radius: f32, n: usize) -> Vec<Vec2> {
    (0..n)
        .map(|i| {
            let angle = TAU * i as f32 / n as f32;
            center + radius * Vec2::new(angle.cos(), angle.sin())
        })
        .collect()
}

/// Trace every seed of every charge and keep the drawable lines.
///
/// The returned collection is built in full before it is handed back, so a
/// caller that swaps it in never shows a partially rebuilt set.
pub fn build_field_lines(
    charges: &[Charge],
    field: &FieldConfig,
    tracer: &TracerConfig,
    seeds: &SeedConfig,
    viewport: Viewport,
) -> Vec<FieldLine> {
    if charges.is_empty() {
        return Vec::new();
    }

    let mut lines = Vec::with_capacity(charges.len() * seeds.seeds_per_charge);
    for charge in charges {
        let sign = charge.trace_sign();
        for seed in seed_ring(charge.position, seeds.seed_radius, seeds.seeds_per_charge) {
            let (line, _) = trace_field_line(seed, sign, charges, field, tracer, viewport);
            if !line.is_degenerate() {
                lines.push(line);
            }
        }
    }
    lines
}
