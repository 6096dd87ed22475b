//! Core types for the physics simulation.
//!
//! Units follow the host's screen space:
//! - Position: pixels
//! - Velocity: pixels per second
//! - Mass: arbitrary (only ratios matter; pool balls use 1.0)
//! - Force: mass * pixels / s²

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub, SubAssign};

use crate::arena::BodyHandle;

// =============================================================================
// Vec2 - 2D Vector
// =============================================================================

/// A 2D vector used for positions, velocities, forces and impulses.
///
/// Coordinate system matches the host window:
/// - X: horizontal, positive to the right
/// - Y: vertical, positive downward
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };
    pub const UNIT_X: Vec2 = Vec2 { x: 1.0, y: 0.0 };
    pub const UNIT_Y: Vec2 = Vec2 { x: 0.0, y: 1.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared magnitude (avoids sqrt for comparisons)
    pub fn magnitude_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    /// Magnitude (length) of the vector
    pub fn magnitude(&self) -> f64 {
        self.magnitude_squared().sqrt()
    }

    pub fn dot(&self, other: &Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    pub fn distance(&self, other: &Self) -> f64 {
        (*other - *self).magnitude()
    }

    /// Component-wise clamp into `[min, max]`. If a bound pair is inverted
    /// the lower bound wins.
    pub fn clamp(&self, min: Self, max: Self) -> Self {
        Self {
            x: self.x.min(max.x).max(min.x),
            y: self.y.min(max.y).max(min.y),
        }
    }

    pub fn lerp(&self, other: &Self, t: f64) -> Self {
        *self + (*other - *self) * t
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Vec2 {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
    }
}

impl Sub for Vec2 {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl SubAssign for Vec2 {
    fn sub_assign(&mut self, other: Self) {
        self.x -= other.x;
        self.y -= other.y;
    }
}

impl Mul<f64> for Vec2 {
    type Output = Self;
    fn mul(self, scalar: f64) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
        }
    }
}

impl MulAssign<f64> for Vec2 {
    fn mul_assign(&mut self, scalar: f64) {
        self.x *= scalar;
        self.y *= scalar;
    }
}

impl Div<f64> for Vec2 {
    type Output = Self;
    fn div(self, scalar: f64) -> Self {
        Self {
            x: self.x / scalar,
            y: self.y / scalar,
        }
    }
}

impl Neg for Vec2 {
    type Output = Self;
    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
        }
    }
}

impl Default for Vec2 {
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<(f64, f64)> for Vec2 {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

// =============================================================================
// Static Geometry
// =============================================================================

/// An immovable straight boundary (a table cushion).
///
/// Segments have no mass or restitution of their own; a body hitting one
/// bounces with its own restitution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub p1: Vec2,
    pub p2: Vec2,
}

impl Segment {
    pub const fn new(p1: Vec2, p2: Vec2) -> Self {
        Self { p1, p2 }
    }

    /// Closest point on the segment to `point`, clamped to the endpoints.
    ///
    /// A zero-length segment degenerates to its first endpoint.
    pub fn closest_point(&self, point: Vec2) -> Vec2 {
        let seg = self.p2 - self.p1;
        let len_sq = seg.magnitude_squared();
        if len_sq < constants::EPSILON {
            return self.p1;
        }
        let t = ((point - self.p1).dot(&seg) / len_sq).clamp(0.0, 1.0);
        self.p1 + seg * t
    }
}

// =============================================================================
// Play Field
// =============================================================================

/// Rectangular play area used for the positional clamp.
///
/// The playable interior spans `[margin, width - margin]` horizontally and
/// `[margin, height - margin]` vertically.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayField {
    pub margin: f64,
    pub width: f64,
    pub height: f64,
}

impl PlayField {
    pub const fn new(margin: f64, width: f64, height: f64) -> Self {
        Self {
            margin,
            width,
            height,
        }
    }

    /// The 1280x720 window with a 50 px rail used by the pool table.
    pub fn pool_table() -> Self {
        Self::new(50.0, 1280.0, 720.0)
    }

    pub fn left(&self) -> f64 {
        self.margin
    }

    pub fn right(&self) -> f64 {
        self.width - self.margin
    }

    pub fn top(&self) -> f64 {
        self.margin
    }

    pub fn bottom(&self) -> f64 {
        self.height - self.margin
    }

    /// Clamp a circle's center so the whole circle stays inside the field.
    pub fn clamp_circle(&self, center: Vec2, radius: f64) -> Vec2 {
        center.clamp(
            Vec2::new(self.left() + radius, self.top() + radius),
            Vec2::new(self.right() - radius, self.bottom() - radius),
        )
    }

    /// Whether a circle lies fully inside the field (inclusive).
    pub fn contains_circle(&self, center: Vec2, radius: f64) -> bool {
        center.x >= self.left() + radius
            && center.x <= self.right() - radius
            && center.y >= self.top() + radius
            && center.y <= self.bottom() - radius
    }

    /// The four edges of the interior, clockwise from the top.
    pub fn cushions(&self) -> [Segment; 4] {
        let tl = Vec2::new(self.left(), self.top());
        let tr = Vec2::new(self.right(), self.top());
        let br = Vec2::new(self.right(), self.bottom());
        let bl = Vec2::new(self.left(), self.bottom());
        [
            Segment::new(tl, tr),
            Segment::new(tr, br),
            Segment::new(br, bl),
            Segment::new(bl, tl),
        ]
    }
}

impl Default for PlayField {
    fn default() -> Self {
        Self::pool_table()
    }
}

// =============================================================================
// Body Tags
// =============================================================================

/// Gameplay identity carried alongside a body.
///
/// The physics core stores the tag but never reads it; rules code uses it to
/// tell the cue ball from object balls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyTag {
    CueBall,
    Ball(u8),
    Host(u64),
}

// =============================================================================
// Collision Types
// =============================================================================

/// Contact geometry produced by the narrow phase.
///
/// `normal` points from `body_a` toward `body_b` for body pairs, and away
/// from the boundary for body-vs-segment contacts (where `body_b` is `None`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub normal: Vec2,
    pub penetration: f64,
    pub point: Vec2,
    pub body_a: BodyHandle,
    pub body_b: Option<BodyHandle>,
}

impl Contact {
    pub fn is_boundary(&self) -> bool {
        self.body_b.is_none()
    }
}

// =============================================================================
// Physical Constants
// =============================================================================

/// Constants shared across the engine.
pub mod constants {
    use super::Vec2;

    /// Small value for floating-point comparisons
    pub const EPSILON: f64 = 1e-10;

    /// Normal used when two circle centers coincide exactly
    pub const COINCIDENT_CIRCLE_NORMAL: Vec2 = Vec2::UNIT_X;

    /// Normal used when a circle center lies exactly on a segment
    pub const ON_SEGMENT_NORMAL: Vec2 = Vec2::UNIT_Y;

    /// Fraction of penetration removed per body-body contact
    pub const POSITIONAL_CORRECTION_PERCENT: f64 = 0.2;

    /// Default substeps per frame
    pub const SUBSTEPS: u32 = 4;

    /// Default constraint relaxation iterations per substep
    pub const RELAXATION_ITERATIONS: u32 = 8;

    /// Default outer timestep (seconds)
    pub const TIME_STEP: f64 = 1.0 / 240.0;

    /// Speed below which a body counts as stopped
    pub const REST_SPEED: f64 = 0.1;
}

// =============================================================================
// Tests
// =============================================================================
