//! Physical state of a circular body.
//!
//! A `Body` is a point mass with a radius. It has no orientation and no
//! angular velocity. Forces accumulate until the world integrates the body;
//! impulses change velocity immediately.

use serde::{Deserialize, Serialize};

use crate::config::BodyMaterial;
use crate::constraint::DistanceConstraint;
use crate::types::{constants, BodyTag, Vec2};

/// A circular body in the simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub position: Vec2,
    /// Position at spawn or last respawn. The semi-implicit integrator does
    /// not advance it.
    pub prev_position: Vec2,
    pub velocity: Vec2,
    /// Accumulated force, consumed by the next integration step.
    pub(crate) force: Vec2,
    pub radius: f64,
    mass: f64,
    inv_mass: f64,
    /// Bounciness, 0-1.
    pub restitution: f64,
    /// Per-substep velocity damping factor, 0-1.
    pub friction: f64,
    is_static: bool,
    /// Pinned bodies keep their mass for collisions but are never integrated.
    pub pinned: bool,
    pub tag: Option<BodyTag>,
    pub(crate) constraints: Vec<DistanceConstraint>,
}

impl Body {
    /// Create a body with default restitution (0.8) and friction (0.1).
    ///
    /// A mass of zero (or any non-positive / non-finite mass) makes the body
    /// static.
    pub fn new(position: Vec2, radius: f64, mass: f64) -> Self {
        let (mass, inv_mass) = normalize_mass(mass);
        Self {
            position,
            prev_position: position,
            velocity: Vec2::ZERO,
            force: Vec2::ZERO,
            radius,
            mass,
            inv_mass,
            restitution: 0.8,
            friction: 0.1,
            is_static: inv_mass == 0.0,
            pinned: false,
            tag: None,
            constraints: Vec::new(),
        }
    }

    /// Create an immovable body.
    pub fn new_static(position: Vec2, radius: f64) -> Self {
        Self::new(position, radius, 0.0)
    }

    /// Create a body from a material preset.
    pub fn from_material(position: Vec2, material: &BodyMaterial) -> Self {
        Self::new(position, material.radius, material.mass)
            .with_restitution(material.restitution)
            .with_friction(material.friction)
    }

    pub fn with_restitution(mut self, restitution: f64) -> Self {
        self.restitution = restitution.clamp(0.0, 1.0);
        self
    }

    pub fn with_friction(mut self, friction: f64) -> Self {
        self.friction = friction.clamp(0.0, 1.0);
        self
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_tag(mut self, tag: BodyTag) -> Self {
        self.tag = Some(tag);
        self
    }

    pub fn pinned(mut self) -> Self {
        self.pinned = true;
        self
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn inv_mass(&self) -> f64 {
        self.inv_mass
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }

    pub fn force(&self) -> Vec2 {
        self.force
    }

    /// Whether the integrator moves this body.
    pub fn is_integrated(&self) -> bool {
        !self.is_static && !self.pinned
    }

    /// Change the mass, keeping `inv_mass` and `is_static` consistent.
    pub fn set_mass(&mut self, mass: f64) {
        let (mass, inv_mass) = normalize_mass(mass);
        self.mass = mass;
        self.inv_mass = inv_mass;
        self.is_static = inv_mass == 0.0;
    }

    pub fn set_pinned(&mut self, pinned: bool) {
        self.pinned = pinned;
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    /// Accumulate a force until the next integration step.
    pub fn apply_force(&mut self, force: Vec2) {
        self.force += force;
    }

    /// Change velocity instantly by `impulse / mass`. No-op on static bodies.
    pub fn apply_impulse(&mut self, impulse: Vec2) {
        if !self.is_static {
            self.velocity += impulse * self.inv_mass;
        }
    }

    pub(crate) fn clear_force(&mut self) {
        self.force = Vec2::ZERO;
    }

    /// Respawn at `position` with no velocity and no pending force.
    pub fn reset_to(&mut self, position: Vec2) {
        self.position = position;
        self.prev_position = position;
        self.velocity = Vec2::ZERO;
        self.force = Vec2::ZERO;
    }

    /// Attach a distance constraint relaxed by the world every substep.
    pub fn attach_constraint(&mut self, constraint: DistanceConstraint) {
        self.constraints.push(constraint);
    }

    pub fn constraints(&self) -> &[DistanceConstraint] {
        &self.constraints
    }

    pub fn speed(&self) -> f64 {
        self.velocity.magnitude()
    }

    pub fn is_moving(&self, threshold: f64) -> bool {
        self.speed() > threshold
    }

    pub fn momentum(&self) -> Vec2 {
        self.velocity * self.mass
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity.magnitude_squared()
    }
}

/// Returns `(mass, inv_mass)`, mapping anything that is not a positive finite
/// mass to a static body.
fn normalize_mass(mass: f64) -> (f64, f64) {
    if mass.is_finite() && mass > constants::EPSILON {
        (mass, 1.0 / mass)
    } else {
        (0.0, 0.0)
    }
}

// =============================================================================
// Tests
// =============================================================================
