use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// The geometry a particle is drawn with.
///
/// Sizes are the unscaled ones; the particle's current scale is applied on top when rendering.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Disc {
        radius: f32,
    },
    Box {
        width: f32,
        height: f32,
    },
    Star {
        points: u32,
        radius: f32,
        /// Radius of the inner vertices between the tips.
        inner_radius: f32,
    },
}

/// Which variant of [`Shape`] to build, without any size information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    Disc,
    Box,
    Star,
}

impl ShapeKind {
    /// The next kind in the demo's shape button cycle: disc → box → star → disc.
    pub fn next(self) -> Self {
        match self {
            ShapeKind::Disc => ShapeKind::Box,
            ShapeKind::Box => ShapeKind::Star,
            ShapeKind::Star => ShapeKind::Disc,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ShapeKind::Disc => "Circle",
            ShapeKind::Box => "Rectangle",
            ShapeKind::Star => "Star",
        }
    }
}

impl Default for ShapeKind {
    fn default() -> Self {
        ShapeKind::Disc
    }
}

impl Shape {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Disc { .. } => ShapeKind::Disc,
            Shape::Box { .. } => ShapeKind::Box,
            Shape::Star { .. } => ShapeKind::Star,
        }
    }

    /// Checks the sizes are finite and non-negative, and that a star has enough tips to be drawn.
    pub fn validate(&self) -> Result<()> {
        fn size(name: &str, value: f32) -> Result<()> {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::invalid(format!(
                    "{} must be finite and >= 0, got {}",
                    name, value
                )));
            }
            Ok(())
        }

        match *self {
            Shape::Disc { radius } => size("radius", radius),
            Shape::Box { width, height } => {
                size("width", width)?;
                size("height", height)
            }
            Shape::Star {
                points,
                radius,
                inner_radius,
            } => {
                if points < 2 {
                    return Err(Error::invalid(format!(
                        "a star needs at least 2 points, got {}",
                        points
                    )));
                }
                size("radius", radius)?;
                size("inner radius", inner_radius)?;
                if inner_radius > radius {
                    return Err(Error::invalid("inner radius can't exceed the outer radius"));
                }
                Ok(())
            }
        }
    }
}
