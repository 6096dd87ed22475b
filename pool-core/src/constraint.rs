//! Position-based distance constraints and soft-body groups.
//!
//! A constraint only stores handles to its two bodies; the world (or the
//! soft-body group registered with it) owns the bodies themselves.
//!
//! ## Relaxation
//!
//! ```text
//! delta      = p_b - p_a
//! error      = |delta| - target
//! correction = delta * (error / |delta|) * stiffness
//! p_a += correction * w_a / (w_a + w_b)
//! p_b -= correction * w_b / (w_a + w_b)
//! ```
//!
//! where `w` is inverse mass. Velocities are left alone, so a constrained body
//! can drift out of sync with its velocity; that is acceptable for decorative
//! soft assemblies and is never used for the balls themselves.

use log::debug;
use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

use crate::arena::{BodyArena, BodyHandle};
use crate::body::Body;
use crate::types::Vec2;

/// Keeps two bodies at a target separation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistanceConstraint {
    pub body_a: BodyHandle,
    pub body_b: BodyHandle,
    /// Target center-to-center distance.
    pub distance: f64,
    /// Fraction of the error removed per pass, 0-1.
    pub stiffness: f64,
    /// Passes performed per `solve` call.
    pub iterations: u32,
}

impl DistanceConstraint {
    pub fn new(body_a: BodyHandle, body_b: BodyHandle, distance: f64) -> Self {
        Self {
            body_a,
            body_b,
            distance,
            stiffness: 1.0,
            iterations: 1,
        }
    }

    pub fn with_stiffness(mut self, stiffness: f64) -> Self {
        self.stiffness = stiffness.clamp(0.0, 1.0);
        self
    }

    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    /// Current `|distance - target|`, or `None` if a body is gone.
    pub fn error(&self, bodies: &BodyArena) -> Option<f64> {
        let a = bodies.get(self.body_a)?;
        let b = bodies.get(self.body_b)?;
        Some((a.position.distance(&b.position) - self.distance).abs())
    }

    /// Run this constraint's configured number of relaxation passes.
    pub fn solve(&self, bodies: &mut BodyArena) {
        for _ in 0..self.iterations {
            self.relax(bodies);
        }
    }

    /// One relaxation pass. Stale handles and static pairs are skipped.
    pub fn relax(&self, bodies: &mut BodyArena) {
        let Some([a, b]) = bodies.get_disjoint_mut([self.body_a, self.body_b]) else {
            return;
        };
        relax_pair(a, b, self.distance, self.stiffness);
    }
}

fn relax_pair(a: &mut Body, b: &mut Body, target: f64, stiffness: f64) {
    if a.is_static() && b.is_static() {
        return;
    }

    let delta = b.position - a.position;
    let dist = delta.magnitude();
    if dist == 0.0 {
        return;
    }

    let total_inv_mass = a.inv_mass() + b.inv_mass();
    let correction = delta * ((dist - target) / dist) * stiffness;

    a.position += correction * (a.inv_mass() / total_inv_mass);
    b.position -= correction * (b.inv_mass() / total_inv_mass);
}

// =============================================================================
// Soft Bodies
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
struct Link {
    a: usize,
    b: usize,
    distance: f64,
    stiffness: f64,
    iterations: u32,
}

/// A soft assembly under construction: particles plus links between them.
///
/// Links refer to particles by their local index. Registering the assembly
/// with a world moves the particles into the world's body arena and turns the
/// links into handle-based [`DistanceConstraint`]s.
#[derive(Debug, Clone)]
pub struct SoftBody {
    particles: Vec<Body>,
    links: Vec<Link>,
    stiffness: f64,
}

impl SoftBody {
    pub fn new() -> Self {
        Self {
            particles: Vec::new(),
            links: Vec::new(),
            stiffness: 1.0,
        }
    }

    /// Stiffness used by links added after this call.
    pub fn with_stiffness(mut self, stiffness: f64) -> Self {
        self.stiffness = stiffness.clamp(0.0, 1.0);
        self
    }

    /// Add a particle and return its local index.
    pub fn add_particle(&mut self, particle: Body) -> usize {
        self.particles.push(particle);
        self.particles.len() - 1
    }

    pub fn particle_mut(&mut self, index: usize) -> Option<&mut Body> {
        self.particles.get_mut(index)
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    /// Link two particles at an explicit target distance.
    ///
    /// Returns `false` (and adds nothing) if an index is out of range or both
    /// indices are equal.
    pub fn add_constraint(&mut self, a: usize, b: usize, distance: f64) -> bool {
        if a == b || a >= self.particles.len() || b >= self.particles.len() {
            return false;
        }
        self.links.push(Link {
            a,
            b,
            distance,
            stiffness: self.stiffness,
            iterations: 1,
        });
        true
    }

    /// Link two particles at their current separation.
    pub fn connect(&mut self, a: usize, b: usize) -> bool {
        let (Some(pa), Some(pb)) = (self.particles.get(a), self.particles.get(b)) else {
            return false;
        };
        let distance = pa.position.distance(&pb.position);
        self.add_constraint(a, b, distance)
    }

    /// A chain of `segments + 1` equal particles from `start` to `end`.
    pub fn rope(start: Vec2, end: Vec2, segments: usize, radius: f64, mass: f64) -> Self {
        let mut rope = Self::new();
        let segments = segments.max(1);
        for i in 0..=segments {
            let t = i as f64 / segments as f64;
            rope.add_particle(Body::new(start.lerp(&end, t), radius, mass));
        }
        for i in 0..segments {
            rope.connect(i, i + 1);
        }
        rope
    }

    /// Move the particles into `bodies` and resolve links to handles.
    pub(crate) fn register(self, bodies: &mut BodyArena) -> SoftBodyGroup {
        let members: Vec<BodyHandle> = self
            .particles
            .into_iter()
            .map(|particle| bodies.insert(particle))
            .collect();
        let constraints = self
            .links
            .iter()
            .map(|link| {
                DistanceConstraint::new(members[link.a], members[link.b], link.distance)
                    .with_stiffness(link.stiffness)
                    .with_iterations(link.iterations)
            })
            .collect();
        debug!(
            "registered soft body: {} particles, {} constraints",
            members.len(),
            self.links.len()
        );
        SoftBodyGroup {
            members,
            constraints,
        }
    }
}

impl Default for SoftBody {
    fn default() -> Self {
        Self::new()
    }
}

new_key_type! {
    /// Stable identity of a soft-body group inside a world.
    pub struct SoftBodyHandle;
}

/// A registered soft body: member handles plus the constraints between them.
#[derive(Debug, Clone, Default)]
pub struct SoftBodyGroup {
    pub members: Vec<BodyHandle>,
    pub constraints: Vec<DistanceConstraint>,
}

impl SoftBodyGroup {
    /// One Gauss-Seidel sweep over every constraint in the group.
    pub fn solve_constraints(&self, bodies: &mut BodyArena) {
        for constraint in &self.constraints {
            constraint.solve(bodies);
        }
    }

    /// Largest `|distance - target|` over the group's live constraints.
    pub fn max_error(&self, bodies: &BodyArena) -> f64 {
        self.constraints
            .iter()
            .filter_map(|c| c.error(bodies))
            .fold(0.0, f64::max)
    }
}

// =============================================================================
// Tests
// =============================================================================
