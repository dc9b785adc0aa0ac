//! # efield - interactive 2D electrostatic field visualizer
//!
//! Point charges on a plane, the field they produce, and four views of it:
//! traced field lines, a field-magnitude background, a grid of direction
//! arrows and a single test particle drifting along the field.
//!
//! The field core ([`field`], [`tracer`], [`field_lines`], [`background`],
//! [`arrows`], [`particle`]) is pure and headless. [`Session`] owns the
//! charge set and caches everything derived from it; the window layer only
//! feeds it events and draws the [`Frame`] it hands back.
//!
//! ## Quick Start
//!
//! ```
//! use efield::prelude::*;
//!
//! let mut session = Session::new(Config::new());
//! session.tick([SessionEvent::PlaceCharge {
//!     position: Vec2::new(0.0, 120.0),
//!     polarity: Polarity::Positive,
//! }]);
//!
//! let frame = session.frame();
//! assert_eq!(frame.charges.len(), 3);
//! assert!(!frame.field_lines.is_empty());
//! ```
//!
//! ## Coordinates
//!
//! Everything in the core is in plane coordinates: origin at the viewport
//! centre, x right, y down. [`Viewport`] converts to and from pixels.
//!
//! ## Views
//!
//! | View | Built by | Rebuilt |
//! |------|----------|---------|
//! | Field lines | [`build_field_lines`] | on charge change |
//! | Background | [`BackgroundField::sample`] | on charge change |
//! | Arrows | [`build_arrows`] | on charge change |
//! | Test particle | [`TestParticle::advance`] | every tick |

pub mod arrows;
pub mod background;
pub mod charge;
pub mod config;
pub mod error;
pub mod field;
pub mod field_lines;
mod gpu;
pub mod input;
pub mod particle;
pub mod raster;
pub mod session;
pub mod time;
pub mod tracer;
pub mod viewport;
pub mod window;

pub use arrows::{build_arrows, Arrow, ArrowConfig};
pub use background::{BackgroundConfig, BackgroundField};
pub use charge::{default_dipole, Charge, Polarity};
pub use config::Config;
pub use error::{AppError, GpuError};
pub use field::{direction_at, field_at, magnitude_at, FieldConfig};
pub use field_lines::{build_field_lines, seed_ring, SeedConfig};
pub use glam::Vec2;
pub use particle::{Advance, ParticleConfig, TestParticle};
pub use raster::{compose_frame, Palette};
pub use session::{DerivedState, Frame, Session, SessionEvent, TickReport};
pub use tracer::{trace_field_line, FieldLine, FieldLineTracer, Termination, TracerConfig};
pub use viewport::Viewport;
pub use window::App;

/// Convenient re-exports for common usage.
///
/// ```
/// use efield::prelude::*;
/// ```
pub mod prelude {
    pub use crate::arrows::ArrowConfig;
    pub use crate::background::BackgroundConfig;
    pub use crate::charge::{Charge, Polarity};
    pub use crate::config::Config;
    pub use crate::field::{field_at, FieldConfig};
    pub use crate::field_lines::SeedConfig;
    pub use crate::input::{Input, KeyCode, MouseButton};
    pub use crate::particle::ParticleConfig;
    pub use crate::session::{Frame, Session, SessionEvent};
    pub use crate::time::FrameClock;
    pub use crate::tracer::TracerConfig;
    pub use crate::viewport::Viewport;
    pub use crate::Vec2;
}
