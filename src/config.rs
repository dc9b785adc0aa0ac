//! Aggregate configuration for a visualizer session.
//!
//! Each concern keeps its own config struct next to the code that uses it.
//! [`Config`] bundles them with the viewport so a session can be built in one
//! chained expression:
//!
//! ```
//! use efield::{Config, SeedConfig, Viewport};
//!
//! let config = Config::new()
//!     .with_viewport(Viewport::new(640, 480))
//!     .with_seeds(SeedConfig::new().with_seeds_per_charge(12));
//! assert_eq!(config.seeds.seeds_per_charge, 12);
//! ```

use crate::arrows::ArrowConfig;
use crate::background::BackgroundConfig;
use crate::field::FieldConfig;
use crate::field_lines::SeedConfig;
use crate::particle::ParticleConfig;
use crate::tracer::TracerConfig;
use crate::viewport::Viewport;

/// All tunables of a session.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Config {
    pub viewport: Viewport,
    pub field: FieldConfig,
    pub tracer: TracerConfig,
    pub seeds: SeedConfig,
    pub background: BackgroundConfig,
    pub arrows: ArrowConfig,
    pub particle: ParticleConfig,
}

impl Config {
    /// Defaults matching a 900×600 window.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    pub fn with_field(mut self, field: FieldConfig) -> Self {
        self.field = field;
        self
    }

    pub fn with_tracer(mut self, tracer: TracerConfig) -> Self {
        self.tracer = tracer;
        self
    }

    pub fn with_seeds(mut self, seeds: SeedConfig) -> Self {
        self.seeds = seeds;
        self
    }

    pub fn with_background(mut self, background: BackgroundConfig) -> Self {
        self.background = background;
        self
    }

    pub fn with_arrows(mut self, arrows: ArrowConfig) -> Self {
        self.arrows = arrows;
        self
    }

    pub fn with_particle(mut self, particle: ParticleConfig) -> Self {
        self.particle = particle;
        self
    }
}
