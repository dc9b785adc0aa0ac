//! Session state and the per-tick driver.
//!
//! A [`Session`] owns the charge set, the cached derived state (field lines,
//! background, arrows) and the test particle. Charge mutations bump a revision
//! counter; derived state remembers the revision it was built from and is
//! rebuilt on the next tick when the two differ.
//!
//! Within one [`Session::tick`] the order is fixed:
//!
//! 1. apply input events (charge placement, particle spawn)
//! 2. rebuild derived state if stale
//! 3. advance the test particle
//!
//! Rendering then reads [`Session::frame`]. A rebuild constructs the new
//! [`DerivedState`] completely before replacing the old one, so readers only
//! ever see a whole set.

use std::time::Instant;

use glam::Vec2;
use tracing::{debug, info};

use crate::arrows::{build_arrows, Arrow};
use crate::background::BackgroundField;
use crate::charge::{default_dipole, Charge, Polarity};
use crate::config::Config;
use crate::field::field_at;
use crate::field_lines::build_field_lines;
use crate::particle::{Advance, TestParticle};
use crate::tracer::FieldLine;
use crate::viewport::Viewport;

/// Discrete, edge-triggered requests from the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionEvent {
    /// Place a unit charge of the given polarity at a plane point.
    PlaceCharge { position: Vec2, polarity: Polarity },
    /// Spawn (or respawn) the test particle at a plane point.
    SpawnParticle { position: Vec2 },
}

/// Everything derived from the charge set, rebuilt as one unit.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedState {
    revision: u64,
    pub field_lines: Vec<FieldLine>,
    pub background: BackgroundField,
    pub arrows: Vec<Arrow>,
}

impl DerivedState {
    fn build(charges: &[Charge], config: &Config, revision: u64) -> Self {
        Self {
            revision,
            field_lines: build_field_lines(
                charges,
                &config.field,
                &config.tracer,
                &config.seeds,
                config.viewport,
            ),
            background: BackgroundField::sample(
                charges,
                &config.field,
                &config.background,
                config.viewport,
            ),
            arrows: build_arrows(charges, &config.field, &config.arrows, config.viewport),
        }
    }

    /// Charge-set revision this state was built from.
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

/// Read-only view handed to the renderer once per tick.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub viewport: Viewport,
    pub charges: &'a [Charge],
    pub field_lines: &'a [FieldLine],
    pub background: Option<&'a BackgroundField>,
    pub arrows: &'a [Arrow],
    /// Position of the live test particle, if any.
    pub particle: Option<Vec2>,
}

/// What happened during one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickReport {
    pub charges_added: usize,
    pub particle_spawned: bool,
    pub rebuilt: bool,
    pub particle: Option<Advance>,
}

/// Charge set, cached derived state and test particle for one window.
#[derive(Debug)]
pub struct Session {
    config: Config,
    charges: Vec<Charge>,
    revision: u64,
    derived: Option<DerivedState>,
    particle: Option<TestParticle>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl Session {
    /// Session starting with the default dipole.
    pub fn new(config: Config) -> Self {
        Self::with_charges(config, default_dipole())
    }

    /// Session starting with no charges.
    pub fn empty(config: Config) -> Self {
        Self::with_charges(config, Vec::new())
    }

    /// Session starting from an explicit charge set. Derived state starts
    /// stale and is built on the first tick.
    pub fn with_charges(config: Config, charges: Vec<Charge>) -> Self {
        Self {
            config,
            charges,
            revision: 0,
            derived: None,
            particle: None,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn charges(&self) -> &[Charge] {
        &self.charges
    }

    pub fn particle(&self) -> Option<&TestParticle> {
        self.particle.as_ref()
    }

    pub fn derived(&self) -> Option<&DerivedState> {
        self.derived.as_ref()
    }

    /// True when derived state is missing or older than the charge set.
    pub fn is_stale(&self) -> bool {
        self.derived
            .as_ref()
            .map_or(true, |d| d.revision != self.revision)
    }

    /// Field at a plane point for the current charge set.
    pub fn field_at(&self, point: Vec2) -> Vec2 {
        field_at(point, &self.charges, &self.config.field)
    }

    /// Append a charge and mark derived state stale.
    pub fn add_charge(&mut self, charge: Charge) {
        self.charges.push(charge);
        self.revision = self.revision.wrapping_add(1);
        info!(
            x = charge.position.x,
            y = charge.position.y,
            q = charge.q,
            total = self.charges.len(),
            "charge placed"
        );
    }

    /// Replace any previous test particle with a live one at `position`.
    pub fn spawn_particle(&mut self, position: Vec2) {
        self.particle = Some(TestParticle::spawn(position));
        info!(x = position.x, y = position.y, "test particle spawned");
    }

    /// Apply a single event.
    pub fn apply(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::PlaceCharge { position, polarity } => {
                self.add_charge(Charge::unit(position, polarity));
            }
            SessionEvent::SpawnParticle { position } => self.spawn_particle(position),
        }
    }

    /// Rebuild derived state if stale. Returns whether a rebuild happened.
    pub fn refresh(&mut self) -> bool {
        if !self.is_stale() {
            return false;
        }
        self.rebuild();
        true
    }

    /// Unconditionally rebuild derived state from the current charge set.
    pub fn rebuild(&mut self) {
        let start = Instant::now();
        let next = DerivedState::build(&self.charges, &self.config, self.revision);
        debug!(
            charges = self.charges.len(),
            lines = next.field_lines.len(),
            arrows = next.arrows.len(),
            elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
            "derived state rebuilt"
        );
        self.derived = Some(next);
    }

    /// Advance the test particle one step, if there is one.
    pub fn advance_particle(&mut self) -> Option<Advance> {
        let particle = self.particle.as_mut()?;
        let outcome = particle.advance(
            &self.charges,
            &self.config.field,
            &self.config.particle,
            self.config.viewport,
        );
        if outcome == Advance::Died {
            debug!(
                x = particle.position.x,
                y = particle.position.y,
                "test particle left the field"
            );
        }
        Some(outcome)
    }

    /// One frame: events, then rebuild if stale, then particle advection.
    pub fn tick<I>(&mut self, events: I) -> TickReport
    where
        I: IntoIterator<Item = SessionEvent>,
    {
        let mut report = TickReport::default();
        for event in events {
            match event {
                SessionEvent::PlaceCharge { .. } => report.charges_added += 1,
                SessionEvent::SpawnParticle { .. } => report.particle_spawned = true,
            }
            self.apply(event);
        }
        report.rebuilt = self.refresh();
        report.particle = self.advance_particle();
        report
    }

    /// Snapshot for rendering.
    pub fn frame(&self) -> Frame<'_> {
        let (field_lines, background, arrows) = match &self.derived {
            Some(d) => (d.field_lines.as_slice(), Some(&d.background), d.arrows.as_slice()),
            None => (&[][..], None, &[][..]),
        };
        Frame {
            viewport: self.config.viewport,
            charges: &self.charges,
            field_lines,
            background,
            arrows,
            particle: self.particle.filter(|p| p.live).map(|p| p.position),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> Config {
        Config::new().with_viewport(Viewport::new(120, 80))
    }

    #[test]
    fn test_new_session_is_stale_until_first_tick() {
        let mut session = Session::new(small_config());
        assert!(session.is_stale());
        assert!(session.frame().background.is_none());

        let report = session.tick([]);
        assert!(report.rebuilt);
        assert!(!session.is_stale());
        assert!(session.frame().background.is_some());

        let report = session.tick([]);
        assert!(!report.rebuilt);
    }

    #[test]
    fn test_placing_charge_marks_stale_and_rebuilds_same_tick() {
        let mut session = Session::empty(small_config());
        session.tick([]);
        assert!(session.frame().field_lines.is_empty());

        let report = session.tick([SessionEvent::PlaceCharge {
            position: Vec2::new(5.0, 5.0),
            polarity: Polarity::Negative,
        }]);
        assert_eq!(report.charges_added, 1);
        assert!(report.rebuilt);
        assert_eq!(session.charges().len(), 1);
        assert_eq!(session.charges()[0].q, -1.0);
        assert!(!session.frame().field_lines.is_empty());
    }

    #[test]
    fn test_spawn_does_not_trigger_rebuild() {
        let mut session = Session::new(small_config());
        session.tick([]);
        let report = session.tick([SessionEvent::SpawnParticle {
            position: Vec2::new(0.0, 20.0),
        }]);
        assert!(report.particle_spawned);
        assert!(!report.rebuilt);
        assert_eq!(report.particle, Some(Advance::Moved));
    }

    #[test]
    fn test_particle_advances_every_tick_regardless_of_rebuild() {
        let mut session = Session::new(small_config());
        session.spawn_particle(Vec2::new(0.0, 10.0));
        let before = session.particle().unwrap().position;
        session.tick([]);
        let after = session.particle().unwrap().position;
        assert!((before.distance(after) - 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_respawn_overwrites_previous_particle() {
        let mut session = Session::new(small_config());
        session.spawn_particle(Vec2::new(1.0, 1.0));
        session.spawn_particle(Vec2::new(-3.0, 2.0));
        assert_eq!(session.particle().unwrap().position, Vec2::new(-3.0, 2.0));
    }

    #[test]
    fn test_dead_particle_is_absent_from_frame() {
        let mut session = Session::empty(small_config());
        session.add_charge(Charge::new(Vec2::ZERO, 1.0));
        // Right at the edge of the extended bounds: 60 + 100 = 160
        session.spawn_particle(Vec2::new(159.0, 0.0));
        session.tick([]);
        assert_eq!(session.particle().map(|p| p.live), Some(false));
        assert!(session.frame().particle.is_none());
    }

    #[test]
    fn test_revision_tracks_rebuilds() {
        let mut session = Session::empty(small_config());
        session.tick([]);
        let r0 = session.derived().unwrap().revision();
        session.add_charge(Charge::new(Vec2::ZERO, 1.0));
        assert!(session.is_stale());
        session.refresh();
        assert_eq!(session.derived().unwrap().revision(), r0 + 1);
    }
}
