//! Numerical integration for advancing bodies in time.
//!
//! The engine uses a single integrator: semi-implicit (symplectic) Euler with
//! a linear drag term.
//!
//! ## Algorithm
//!
//! For a substep of length `h`:
//!
//! ```text
//! 1. v = v + F * inv_m * h
//! 2. v = v * (1 - friction)
//! 3. x = x + v * h          // uses the *new* velocity
//! 4. F = 0
//! 5. x = clamp(x, field inset by radius)
//! ```
//!
//! The clamp is a last line of defence against numerical drift. Cushion
//! collisions are what actually keep balls on the table.
//!
//! Static bodies skip steps 1-3 but are still clamped, so a post placed over
//! the rail is pulled onto the table. Pinned bodies are left untouched.

use crate::body::Body;
use crate::types::PlayField;

/// Semi-implicit Euler integrator with play-field clamping.
pub struct SemiImplicitEuler;

impl SemiImplicitEuler {
    /// Advance one body by `dt`.
    ///
    /// Static and pinned bodies are not integrated; their pending force is
    /// still consumed so it cannot pile up while they are frozen.
    pub fn step(body: &mut Body, field: &PlayField, dt: f64) {
        if body.pinned {
            body.clear_force();
            return;
        }

        if body.is_integrated() {
            let acceleration = body.force() * body.inv_mass();
            body.velocity += acceleration * dt;
            body.velocity *= 1.0 - body.friction;
            body.position += body.velocity * dt;
        }
        body.clear_force();

        body.position = field.clamp_circle(body.position, body.radius);
    }

    /// Advance every body in `bodies` by `dt`.
    pub fn step_all<'a, I>(bodies: I, field: &PlayField, dt: f64)
    where
        I: IntoIterator<Item = &'a mut Body>,
    {
        for body in bodies {
            Self::step(body, field, dt);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
