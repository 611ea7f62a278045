use glam::vec2;
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::draw::{Canvas, DrawPrimitive, Viewport};
use crate::error::{Error, Result};
use crate::shape::{Shape, ShapeKind};
use crate::NOMINAL_FPS;

/// A per-tick displacement.
pub type Vector = Vec2;

pub const DEFAULT_RADIUS: f32 = 5.0;
pub const DEFAULT_SIZE: f32 = 10.0;
pub const DEFAULT_FILL: u32 = 0xffffff;
pub const DEFAULT_POINTS: u32 = 5;
pub const DEFAULT_INNER_RATIO: f32 = 0.5;

/// How to build a particle. Anything left as `None` falls back to its default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParticleOptions {
    pub position: Option<Vec2>,
    pub radius: Option<f32>,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub fill: Option<u32>,
    /// Opacity until the first update, after which it follows the remaining life.
    pub alpha: Option<f32>,
    /// Life span in frames. Rounded down to a whole frame count.
    pub life: Option<f32>,
    pub points: Option<u32>,
    /// Star inner radius as a fraction of `radius`.
    pub inner_ratio: Option<f32>,
    /// Rotation per frame, in radians.
    pub spin: Option<f32>,
    #[serde(default)]
    pub mirror_x: bool,
    #[serde(default)]
    pub mirror_y: bool,
}

impl ParticleOptions {
    /// Builds the shape of the given kind from these options.
    pub fn shape(&self, kind: ShapeKind) -> Result<Shape> {
        let radius = self.radius.unwrap_or(DEFAULT_RADIUS);
        let shape = match kind {
            ShapeKind::Disc => Shape::Disc { radius },
            ShapeKind::Box => Shape::Box {
                width: self.width.unwrap_or(DEFAULT_SIZE),
                height: self.height.unwrap_or(DEFAULT_SIZE),
            },
            ShapeKind::Star => {
                let ratio = self.inner_ratio.unwrap_or(DEFAULT_INNER_RATIO);
                if !(0.0..=1.0).contains(&ratio) {
                    return Err(Error::invalid(format!(
                        "inner radius ratio must be within [0, 1], got {}",
                        ratio
                    )));
                }
                Shape::Star {
                    points: self.points.unwrap_or(DEFAULT_POINTS),
                    radius,
                    inner_radius: radius * ratio,
                }
            }
        };
        shape.validate()?;
        Ok(shape)
    }
}

fn finite(name: &str, value: f32) -> Result<f32> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::invalid(format!("{} must be finite, got {}", name, value)))
    }
}

/// Life can only ever count down, so anything but a finite, non-negative delta is treated as 0.
pub fn sanitize_delta(delta: f32) -> f32 {
    if delta.is_finite() && delta > 0.0 {
        delta
    } else {
        0.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vector,
    pub shape: Shape,
    pub fill: u32,
    pub rotation: f32,
    pub spin: f32,

    life: f32,
    max_life: f32,
    /// `±1` per axis.
    mirror: Vec2,

    /// Opacity until the first update.
    initial_alpha: f32,
    updated: bool,
}

impl Particle {
    /// Creates a stationary particle with a full life.
    pub fn new(options: &ParticleOptions, kind: ShapeKind) -> Result<Self> {
        let shape = options.shape(kind)?;

        let position = options.position.unwrap_or(Vec2::ZERO);
        if !position.is_finite() {
            return Err(Error::invalid("position must be finite"));
        }

        let max_life = finite("life", options.life.unwrap_or(NOMINAL_FPS))?.floor();
        if max_life <= 0.0 {
            return Err(Error::invalid(format!(
                "life must be at least one frame, got {}",
                max_life
            )));
        }

        let alpha = finite("alpha", options.alpha.unwrap_or(1.0))?;
        let spin = finite("spin", options.spin.unwrap_or(0.0))?;

        let mirror = vec2(
            if options.mirror_x { -1.0 } else { 1.0 },
            if options.mirror_y { -1.0 } else { 1.0 },
        );

        Ok(Self {
            position,
            velocity: Vec2::ZERO,
            shape,
            fill: options.fill.unwrap_or(DEFAULT_FILL),
            rotation: 0.0,
            spin,

            life: max_life,
            max_life,
            mirror,

            initial_alpha: alpha,
            updated: false,
        })
    }

    pub fn life(&self) -> f32 {
        self.life
    }

    pub fn max_life(&self) -> f32 {
        self.max_life
    }

    /// Once updated, this is always the life ratio, the same one [`Particle::scale`] uses.
    pub fn alpha(&self) -> f32 {
        if self.updated {
            self.life_ratio()
        } else {
            self.initial_alpha
        }
    }

    pub fn scale(&self) -> Vec2 {
        self.mirror * self.life_ratio()
    }

    /// The remaining fraction of this particle's life.
    pub fn life_ratio(&self) -> f32 {
        self.life / self.max_life
    }

    pub fn is_expired(&self) -> bool {
        self.life < 0.0
    }

    /// Advances the particle by one tick, returning whether it has now expired.
    ///
    /// Velocity is a per-tick displacement, so only the life countdown (and spin) is scaled by `delta`.
    /// A negative or non-finite `delta` counts as no time passing.
    pub fn update(&mut self, delta: f32) -> bool {
        let delta = sanitize_delta(delta);

        self.position += self.velocity;
        self.life -= delta;
        self.rotation += self.spin * delta;
        self.updated = true;

        self.is_expired()
    }

    /// The primitive this particle would currently be drawn as.
    pub fn primitive(&self) -> DrawPrimitive {
        DrawPrimitive {
            shape: self.shape,
            position: self.position,
            scale: self.scale(),
            rotation: self.rotation,
            fill: self.fill,
            alpha: self.alpha(),
        }
    }

    /// Draws the particle onto `canvas`, unless it's expired or outside `cull`.
    ///
    /// Returns whether anything was drawn.
    pub fn render<C: Canvas + ?Sized>(&self, canvas: &mut C, cull: Option<Viewport>) -> bool {
        if self.is_expired() {
            return false;
        }
        if let Some(view) = cull {
            if !view.contains(self.position) {
                return false;
            }
        }

        canvas.draw(&self.primitive());
        true
    }
}
