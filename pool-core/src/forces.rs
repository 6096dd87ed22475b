//! Forces applied to bodies at the start of every substep.
//!
//! A pool table is viewed from above, so the default gravity is zero; the
//! force stage stays general so a tilted table or a wind field can be dropped
//! in without touching the world loop.

use serde::{Deserialize, Serialize};

use crate::body::Body;
use crate::types::Vec2;

/// Produces the force acting on a body for the current substep.
pub trait ForceModel {
    /// Force to accumulate on `body`. Only called for non-static bodies.
    fn force(&self, body: &Body) -> Vec2;

    /// Accumulate this model's force on every non-static body.
    fn apply<'a, I>(&self, bodies: I)
    where
        I: IntoIterator<Item = &'a mut Body>,
        Self: Sized,
    {
        for body in bodies {
            if !body.is_static() {
                let force = self.force(body);
                body.apply_force(force);
            }
        }
    }
}

/// Uniform gravitational field: `F = g * m`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Gravity {
    pub acceleration: Vec2,
}

impl Gravity {
    pub const fn new(acceleration: Vec2) -> Self {
        Self { acceleration }
    }

    pub fn is_zero(&self) -> bool {
        self.acceleration == Vec2::ZERO
    }
}

impl Default for Gravity {
    fn default() -> Self {
        Self::new(Vec2::ZERO)
    }
}

impl ForceModel for Gravity {
    fn force(&self, body: &Body) -> Vec2 {
        self.acceleration * body.mass()
    }
}

// =============================================================================
// Tests
// =============================================================================
