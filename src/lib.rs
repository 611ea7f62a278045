//! Short-lived particle bursts: discs, boxes and stars that fly out from a point, shrinking and
//! fading until they expire.
//!
//! A host drives a [`ParticleField`] once per frame with [`ParticleField::tick`], handing it the
//! frame's delta, a [`SpawnRequest`] sampled from its input, and a [`Canvas`] to draw onto.

pub mod draw;
pub mod error;
pub mod field;
pub mod input;
pub mod particle;
pub mod settings;
pub mod shape;

pub use draw::{Canvas, DrawList, DrawPrimitive, Viewport};
pub use error::{Error, Result};
pub use field::{ParticleField, TickReport};
pub use input::{PointerState, SpawnRequest};
pub use particle::{Particle, ParticleOptions, Vector};
pub use settings::{Overflow, Settings, Speed, SpeedDistr};
pub use shape::{Shape, ShapeKind};

/// The frame rate deltas are measured against; a delta of 1 is one frame at this rate.
pub const NOMINAL_FPS: f32 = 60.0;

/// Default fill for spawned particles.
pub const THEME_ACCENT: u32 = 0x2277ee;

pub const BACKGROUND: u32 = 0x061639;

/// Width and height of the demo's square view.
pub const VIEW_SIZE: f32 = 512.0;
