//! Collision detection and resolution for circular bodies.
//!
//! This module handles:
//! - **Detection**: discrete overlap tests, circle vs. circle and circle vs.
//!   static segment
//! - **Resolution**: impulse exchange plus positional correction
//!
//! ## Discrete Overlap
//!
//! Contacts are found by testing positions at the end of each substep, not
//! by sweeping trajectories. The world runs several substeps per frame so a
//! ball cannot cross a cushion in one of them.
//!
//! ```text
//!        n
//!   A  ───→  B          penetration = rA + rB - |pB - pA|
//!  ( ●  ( )●  )         normal      = (pB - pA) / |pB - pA|
//!       └┘
//!   overlap
//! ```
//!
//! Contacts are resolved as soon as they are detected, so a later pair sees
//! the velocities produced by an earlier one.

pub mod detection;
pub mod resolution;

pub use detection::*;
pub use resolution::*;
