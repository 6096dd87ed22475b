//! Collision response for circular bodies.
//!
//! Computes post-contact velocities and positions from:
//! - Coefficient of restitution (the smaller of the two bodies' values)
//! - Inverse masses (static bodies have zero and never move)
//! - A positional-correction percentage that bleeds off overlap
//!
//! ## Contact Cases
//!
//! ```text
//! A static,  B dynamic   push B out by the full penetration
//! A dynamic, B static    flip the normal, treat B as a boundary
//! boundary (segment)     push A out, reflect the inbound normal velocity
//! A dynamic, B dynamic   impulse along n, then partial positional correction
//! A static,  B static    ignored
//! ```
//!
//! ## Impulse
//!
//! ```text
//! vn = (vB - vA) · n          // >= 0 means separating: skip
//! e  = min(eA, eB)
//! j  = -(1 + e) · vn / (wA + wB)
//! vA -= j · n · wA
//! vB += j · n · wB
//! ```
//!
//! Positional correction moves each body along the normal by
//! `percent · penetration · w / (wA + wB)`, so overlap decays over a few
//! substeps instead of snapping apart.

use crate::arena::BodyArena;
use crate::body::Body;
use crate::types::{constants, Contact, Vec2};

/// Impulse-based contact resolver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionResolver {
    /// Fraction of body-body penetration removed per contact.
    pub correction_percent: f64,
    /// Multiplier applied to a body's velocity after a boundary contact.
    pub cushion_damping: f64,
}

impl CollisionResolver {
    pub fn new(correction_percent: f64, cushion_damping: f64) -> Self {
        Self {
            correction_percent,
            cushion_damping,
        }
    }

    /// Resolve a contact against the bodies it refers to.
    ///
    /// Returns `true` if any body was changed. Contacts naming a removed body
    /// are ignored.
    pub fn resolve(&self, contact: &Contact, bodies: &mut BodyArena) -> bool {
        match contact.body_b {
            None => match bodies.get_mut(contact.body_a) {
                Some(a) => self.resolve_boundary(a, contact.normal, contact.penetration),
                None => false,
            },
            Some(handle_b) => match bodies.get_disjoint_mut([contact.body_a, handle_b]) {
                Some([a, b]) => self.resolve_pair(a, b, contact.normal, contact.penetration),
                None => false,
            },
        }
    }

    /// Resolve a body against an immovable surface.
    ///
    /// `normal` must point away from the surface, toward the body.
    pub fn resolve_boundary(&self, body: &mut Body, normal: Vec2, penetration: f64) -> bool {
        if body.is_static() {
            return false;
        }

        body.position += normal * penetration;

        let vn = body.velocity.dot(&normal);
        if vn < 0.0 {
            body.velocity -= normal * ((1.0 + body.restitution) * vn);
        }
        body.velocity *= self.cushion_damping;
        true
    }

    /// Resolve two bodies in contact. `normal` points from `a` toward `b`.
    pub fn resolve_pair(&self, a: &mut Body, b: &mut Body, normal: Vec2, penetration: f64) -> bool {
        match (a.is_static(), b.is_static()) {
            (true, true) => false,
            (true, false) => {
                b.position += normal * penetration;
                true
            }
            (false, true) => self.resolve_boundary(a, -normal, penetration),
            (false, false) => self.resolve_dynamic(a, b, normal, penetration),
        }
    }

    fn resolve_dynamic(&self, a: &mut Body, b: &mut Body, normal: Vec2, penetration: f64) -> bool {
        let vn = (b.velocity - a.velocity).dot(&normal);
        if vn >= 0.0 {
            return false;
        }

        let total_inv_mass = a.inv_mass() + b.inv_mass();
        if total_inv_mass < constants::EPSILON {
            return false;
        }

        let restitution = a.restitution.min(b.restitution);
        let j = -(1.0 + restitution) * vn / total_inv_mass;
        let impulse = normal * j;
        a.apply_impulse(-impulse);
        b.apply_impulse(impulse);

        let correction = normal * (penetration * self.correction_percent / total_inv_mass);
        a.position -= correction * a.inv_mass();
        b.position += correction * b.inv_mass();
        true
    }
}

impl Default for CollisionResolver {
    fn default() -> Self {
        Self::new(constants::POSITIONAL_CORRECTION_PERCENT, 1.0)
    }
}

// =============================================================================
// Tests
// =============================================================================
