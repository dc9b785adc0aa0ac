//! The single massless test particle.
//!
//! Each tick the particle moves a fixed distance along the local unit field
//! direction (forward Euler). In a near-null field it holds position for that
//! tick instead of dying; it only dies when it leaves the viewport grown by
//! [`ParticleConfig::bounds_margin`]. Once dead, advancing it is a no-op.

use glam::Vec2;

use crate::charge::Charge;
use crate::field::{direction_at, FieldConfig};
use crate::viewport::Viewport;

/// Advection parameters for the test particle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleConfig {
    /// Distance moved per tick.
    pub step: f32,
    /// Below this magnitude the particle holds still for the tick.
    pub stall_floor: f32,
    /// How far past the viewport edge the particle survives.
    pub bounds_margin: f32,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            step: 2.0,
            stall_floor: 1e-4,
            bounds_margin: 100.0,
        }
    }
}

impl ParticleConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_step(mut self, step: f32) -> Self {
        self.step = step;
        self
    }

    pub fn with_stall_floor(mut self, floor: f32) -> Self {
        self.stall_floor = floor;
        self
    }

    pub fn with_bounds_margin(mut self, margin: f32) -> Self {
        self.bounds_margin = margin;
        self
    }
}

/// Outcome of one advection step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Moved one step and is still live.
    Moved,
    /// Field too weak; position unchanged.
    Held,
    /// Moved out of bounds and is now dead.
    Died,
    /// Already dead; nothing happened.
    Inactive,
}

/// Position plus liveness. No trajectory history is kept.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TestParticle {
    pub position: Vec2,
    pub live: bool,
}

impl TestParticle {
    /// A live particle at `position`.
    pub fn spawn(position: Vec2) -> Self {
        Self {
            position,
            live: true,
        }
    }

    /// Advance by one tick.
    pub fn advance(
        &mut self,
        charges: &[Charge],
        field: &FieldConfig,
        config: &ParticleConfig,
        viewport: Viewport,
    ) -> Advance {
        if !self.live {
            return Advance::Inactive;
        }

        let Some((dir, _)) = direction_at(self.position, charges, field, config.stall_floor) else {
            return Advance::Held;
        };

        self.position += dir * config.step;

        if viewport.is_outside(self.position, config.bounds_margin) {
            self.live = false;
            return Advance::Died;
        }
        Advance::Moved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn advance(p: &mut TestParticle, charges: &[Charge]) -> Advance {
        p.advance(charges, &FieldConfig::default(), &ParticleConfig::default(), Viewport::default())
    }

    #[test]
    fn test_spawn_is_live() {
        let p = TestParticle::spawn(Vec2::new(1.0, 2.0));
        assert!(p.live);
        assert_eq!(p.position, Vec2::new(1.0, 2.0));
    }

    #[test]
    fn test_moves_one_step_along_field() {
        let charges = [Charge::new(Vec2::ZERO, 1.0)];
        let mut p = TestParticle::spawn(Vec2::new(0.0, 50.0));
        assert_eq!(advance(&mut p, &charges), Advance::Moved);
        assert!((p.position - Vec2::new(0.0, 52.0)).length() < 1e-5);
    }

    #[test]
    fn test_holds_in_null_field() {
        let mut p = TestParticle::spawn(Vec2::new(5.0, 5.0));
        assert_eq!(advance(&mut p, &[]), Advance::Held);
        assert!(p.live);
        assert_eq!(p.position, Vec2::new(5.0, 5.0));
    }

    #[test]
    fn test_dies_past_extended_bounds_then_stays_put() {
        let charges = [Charge::new(Vec2::ZERO, 1.0)];
        // 450 + 100 = 550 is the last live x
        let mut p = TestParticle::spawn(Vec2::new(548.0, 0.0));
        assert_eq!(advance(&mut p, &charges), Advance::Moved);
        assert_eq!(p.position.x, 550.0);
        assert_eq!(advance(&mut p, &charges), Advance::Died);
        assert!(!p.live);

        let frozen = p.position;
        assert_eq!(advance(&mut p, &charges), Advance::Inactive);
        assert_eq!(p.position, frozen);
    }

    #[test]
    fn test_particle_is_attracted_by_negative_charge() {
        let charges = [Charge::new(Vec2::ZERO, -1.0)];
        let mut p = TestParticle::spawn(Vec2::new(100.0, 0.0));
        advance(&mut p, &charges);
        assert!((p.position.x - 98.0).abs() < 1e-5);
    }
}
