use std::f32::consts::TAU;

use glam::vec2;
use glam::Vec2;
use palette::Srgb;
use serde::{Deserialize, Serialize};

use crate::shape::Shape;

/// Splits a packed `0xRRGGBB` color into its channels.
pub fn unpack_rgb(packed: u32) -> Srgb<u8> {
    Srgb::new(
        ((packed >> 16) & 0xff) as u8,
        ((packed >> 8) & 0xff) as u8,
        (packed & 0xff) as u8,
    )
}

/// The visible area particles are culled against.
///
/// The left edge is inclusive and the top edge exclusive, matching how the demo has always culled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        0.0 <= point.x && point.x < self.width && 0.0 < point.y && point.y < self.height
    }
}

/// An instruction to draw one filled shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawPrimitive {
    pub shape: Shape,
    pub position: Vec2,
    /// Per-axis scale. A negative component means the shape is drawn mirrored along that axis.
    pub scale: Vec2,
    pub rotation: f32,
    /// Packed `0xRRGGBB`.
    pub fill: u32,
    pub alpha: f32,
}

impl DrawPrimitive {
    pub fn color(&self) -> Srgb<f32> {
        unpack_rgb(self.fill).into_format()
    }

    /// The scaled radius of a disc or star, using the larger axis.
    pub fn scaled_radius(&self) -> f32 {
        let radius = match self.shape {
            Shape::Disc { radius } | Shape::Star { radius, .. } => radius,
            Shape::Box { width, height } => 0.5 * f32::max(width, height),
        };
        radius * self.scale.abs().max_element()
    }

    /// The top-left corner and size of a box, in world space.
    ///
    /// Boxes are anchored at their position, so a mirrored box extends left/up from it instead.
    pub fn box_rect(&self) -> Option<(Vec2, Vec2)> {
        match self.shape {
            Shape::Box { width, height } => {
                let extent = vec2(width, height) * self.scale;
                let far = self.position + extent;
                Some((self.position.min(far), extent.abs()))
            }
            _ => None,
        }
    }

    /// The outline of a star as alternating outer and inner vertices, in world space.
    pub fn star_vertices(&self) -> Option<Vec<Vec2>> {
        match self.shape {
            Shape::Star {
                points,
                radius,
                inner_radius,
            } => Some(star_points(
                self.position,
                points,
                radius,
                inner_radius,
                self.rotation,
                self.scale,
            )),
            _ => None,
        }
    }
}

/// Generates the `2 * points` vertices of a star, starting with a tip pointing straight up (before rotation).
pub fn star_points(
    center: Vec2,
    points: u32,
    radius: f32,
    inner_radius: f32,
    rotation: f32,
    scale: Vec2,
) -> Vec<Vec2> {
    let count = points as usize * 2;
    let step = TAU / count as f32;
    // Screen space has y pointing down, so "up" is -PI/2.
    let start = rotation - TAU / 4.0;

    (0..count)
        .map(|i| {
            let r = if i % 2 == 0 { radius } else { inner_radius };
            let angle = start + step * i as f32;
            center + vec2(r * angle.cos(), r * angle.sin()) * scale
        })
        .collect()
}

/// Something particles can be drawn onto.
pub trait Canvas {
    fn draw(&mut self, primitive: &DrawPrimitive);
}

/// Discards everything, for running the simulation headless.
impl Canvas for () {
    fn draw(&mut self, _primitive: &DrawPrimitive) {}
}

impl<C: Canvas + ?Sized> Canvas for &mut C {
    fn draw(&mut self, primitive: &DrawPrimitive) {
        (**self).draw(primitive)
    }
}

/// Records every primitive drawn to it, in order.
#[derive(Debug, Default, Clone)]
pub struct DrawList {
    pub primitives: Vec<DrawPrimitive>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    pub fn clear(&mut self) {
        self.primitives.clear();
    }
}

impl Canvas for DrawList {
    fn draw(&mut self, primitive: &DrawPrimitive) {
        self.primitives.push(*primitive);
    }
}
