//! # Pool Core
//!
//! A real-time 2D physics engine for pool and billiards tables.
//!
//! ## Architecture
//!
//! - `types`: Core data structures (Vec2, segments, play field, contacts)
//! - `arena`: Generational body storage with stable handles
//! - `body`: Circular point-mass bodies
//! - `constraint`: Distance constraints and soft bodies
//! - `forces`: Force models (uniform gravity)
//! - `integrator`: Semi-implicit Euler with play-field clamp
//! - `collision`: Circle/circle and circle/segment detection plus impulse resolution
//! - `config`: YAML-based world and material configuration
//! - `world`: Main orchestrator running the fixed-substep loop
//!
//! ## Example
//!
//! ```
//! use pool_core::{Body, PhysicsWorld, Vec2};
//!
//! let mut world = PhysicsWorld::default();
//! world.add_boundary_rect();
//! let cue = world.add_body(Body::new(Vec2::new(300.0, 360.0), 15.0, 1.0));
//! world.apply_impulse(cue, Vec2::new(400.0, 0.0));
//! world.step_n(60);
//! assert!(world.position(cue).unwrap().x > 300.0);
//! ```

pub mod arena;
pub mod body;
pub mod collision;
pub mod config;
pub mod constraint;
pub mod forces;
pub mod integrator;
pub mod types;
pub mod world;

pub use arena::{BodyArena, BodyHandle};
pub use body::Body;
pub use collision::CollisionResolver;
pub use config::{BodyMaterial, ConfigError, ConfigLoader, WorldConfig};
pub use constraint::{DistanceConstraint, SoftBody, SoftBodyGroup, SoftBodyHandle};
pub use forces::{ForceModel, Gravity};
pub use types::{BodyTag, Contact, PlayField, Segment, Vec2};
pub use world::{EffectsSystem, PhysicsWorld, StepReport, WorldSnapshot};
