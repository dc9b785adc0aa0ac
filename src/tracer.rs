//! Fixed-step Euler tracing of a single field line.
//!
//! [`FieldLineTracer`] is a lazy, finite, non-restartable iterator over plane
//! points. Each step evaluates the field at the current point, advances one
//! step length along the unit field direction (or against it), and yields the
//! new point unless one of the stop conditions fires:
//!
//! 1. the field magnitude is below [`TracerConfig::weak_field_floor`]
//! 2. the new point leaves the viewport grown by [`TracerConfig::bounds_margin`]
//! 3. the new point is within [`TracerConfig::exclusion_radius`] of any charge
//! 4. [`TracerConfig::max_steps`] steps have been taken
//!
//! The point that triggers a stop is never yielded. After the iterator is
//! exhausted, [`FieldLineTracer::termination`] reports which condition fired.

use glam::Vec2;

use crate::charge::Charge;
use crate::field::{direction_at, FieldConfig};
use crate::viewport::Viewport;

/// Integration parameters for field-line tracing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TracerConfig {
    /// Distance advanced per step.
    pub step: f32,
    /// Upper bound on steps (and so on yielded points) per line.
    pub max_steps: usize,
    /// Below this magnitude the field has no usable direction.
    pub weak_field_floor: f32,
    /// How far past the viewport edge a line may run.
    pub bounds_margin: f32,
    /// A line stops when it comes this close to any charge.
    pub exclusion_radius: f32,
}

impl Default for TracerConfig {
    fn default() -> Self {
        Self {
            step: 3.0,
            max_steps: 1500,
            weak_field_floor: 1e-6,
            bounds_margin: 50.0,
            exclusion_radius: 8.0,
        }
    }
}

impl TracerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_step(mut self, step: f32) -> Self {
        assert!(step > 0.0, "Tracer step must be positive");
        self.step = step;
        self
    }

    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    pub fn with_weak_field_floor(mut self, floor: f32) -> Self {
        self.weak_field_floor = floor;
        self
    }

    pub fn with_bounds_margin(mut self, margin: f32) -> Self {
        self.bounds_margin = margin;
        self
    }

    pub fn with_exclusion_radius(mut self, radius: f32) -> Self {
        self.exclusion_radius = radius;
        self
    }
}

/// Why a traced line ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// Field too weak (or not finite) at the last yielded point.
    WeakField,
    /// The next step would have left the extended viewport.
    OutOfBounds,
    /// The next step would have landed inside a charge's exclusion radius.
    NearCharge,
    /// Step budget used up.
    MaxSteps,
}

/// Lazy field-line iterator. Borrowed charge set, owned cursor.
pub struct FieldLineTracer<'a> {
    charges: &'a [Charge],
    field: &'a FieldConfig,
    config: &'a TracerConfig,
    viewport: Viewport,
    position: Vec2,
    sign: f32,
    steps: usize,
    termination: Option<Termination>,
}

impl<'a> FieldLineTracer<'a> {
    /// Start a trace at `start`. `sign` is `+1.0` to follow the field and
    /// `-1.0` to run against it.
    pub fn new(
        start: Vec2,
        sign: f32,
        charges: &'a [Charge],
        field: &'a FieldConfig,
        config: &'a TracerConfig,
        viewport: Viewport,
    ) -> Self {
        Self {
            charges,
            field,
            config,
            viewport,
            position: start,
            sign: if sign < 0.0 { -1.0 } else { 1.0 },
            steps: 0,
            termination: None,
        }
    }

    /// Stop reason, available once the iterator has returned `None`.
    pub fn termination(&self) -> Option<Termination> {
        self.termination
    }

    fn near_any_charge(&self, p: Vec2) -> bool {
        let r = self.config.exclusion_radius;
        self.charges.iter().any(|c| p.distance(c.position) < r)
    }

    fn stop(&mut self, reason: Termination) -> Option<Vec2> {
        self.termination = Some(reason);
        None
    }
}

impl Iterator for FieldLineTracer<'_> {
    type Item = Vec2;

    fn next(&mut self) -> Option<Vec2> {
        if self.termination.is_some() {
            return None;
        }
        if self.steps >= self.config.max_steps {
            return self.stop(Termination::MaxSteps);
        }
        self.steps += 1;

        let Some((dir, _)) = direction_at(
            self.position,
            self.charges,
            self.field,
            self.config.weak_field_floor,
        ) else {
            return self.stop(Termination::WeakField);
        };

        let next = self.position + dir * (self.sign * self.config.step);

        if self.viewport.is_outside(next, self.config.bounds_margin) {
            return self.stop(Termination::OutOfBounds);
        }
        if self.near_any_charge(next) {
            return self.stop(Termination::NearCharge);
        }

        self.position = next;
        Some(next)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.termination.is_some() {
            (0, Some(0))
        } else {
            (0, Some(self.config.max_steps - self.steps))
        }
    }
}

/// An ordered polyline in plane coordinates. Consecutive points are one
/// integration step apart.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FieldLine {
    pub points: Vec<Vec2>,
}

impl FieldLine {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// A line needs at least two points to be drawn.
    pub fn is_degenerate(&self) -> bool {
        self.points.len() <= 1
    }

    /// Consecutive point pairs, ready for stroking.
    pub fn segments(&self) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
        self.points.windows(2).map(|w| (w[0], w[1]))
    }
}

/// Trace one line eagerly, returning the points and the stop reason.
pub fn trace_field_line(
    start: Vec2,
    sign: f32,
    charges: &[Charge],
    field: &FieldConfig,
    config: &TracerConfig,
    viewport: Viewport,
) -> (FieldLine, Termination) {
    let mut tracer = FieldLineTracer::new(start, sign, charges, field, config, viewport);
    let points: Vec<Vec2> = tracer.by_ref().collect();
    // An exhausted tracer always records its reason
    let reason = tracer.termination().unwrap_or(Termination::MaxSteps);
    (FieldLine { points }, reason)
}
