//! The physics world: body ownership and the fixed-substep loop.
//!
//! ## Frame Structure
//!
//! ```text
//! step()
//! ├── substep × N            (h = time_step / N)
//! │   ├── 1. forces          gravity · m on every dynamic body
//! │   ├── 2. integrate       semi-implicit Euler + play-field clamp
//! │   ├── 3. relax           soft-body groups, then body-attached constraints
//! │   └── 4. collide         body pairs (arena order), then bodies vs. segments
//! ├── effects.update(time_step)
//! └── time += time_step
//! ```
//!
//! The world is single-threaded and run-to-completion. Iteration order is
//! fixed by the arena, so identical inputs give identical trajectories.

use std::ops::AddAssign;

use log::{debug, trace};
use serde::{Deserialize, Serialize};
use slotmap::SlotMap;

use crate::arena::{clear_in_slot_order, BodyArena, BodyHandle};
use crate::body::Body;
use crate::collision::{circle_vs_circle, circle_vs_segment, CollisionResolver};
use crate::config::{ConfigError, WorldConfig};
use crate::constraint::{DistanceConstraint, SoftBody, SoftBodyGroup, SoftBodyHandle};
use crate::forces::{ForceModel, Gravity};
use crate::integrator::SemiImplicitEuler;
use crate::types::{constants, BodyTag, Segment, Vec2};

/// Visual side effects advanced once per frame (particles, trails, ...).
///
/// The world only calls [`update`](EffectsSystem::update); it never reads
/// anything back.
pub trait EffectsSystem: Send {
    fn update(&mut self, dt: f64);
}

/// Contacts resolved during one or more frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StepReport {
    pub body_contacts: usize,
    pub boundary_contacts: usize,
}

impl StepReport {
    pub fn total(&self) -> usize {
        self.body_contacts + self.boundary_contacts
    }
}

impl AddAssign for StepReport {
    fn add_assign(&mut self, other: Self) {
        self.body_contacts += other.body_contacts;
        self.boundary_contacts += other.boundary_contacts;
    }
}

/// Serializable view of one body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodySnapshot {
    pub handle: BodyHandle,
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f64,
    pub is_static: bool,
    pub tag: Option<BodyTag>,
}

/// Serializable view of the whole world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub time: f64,
    pub frame: u64,
    pub bodies: Vec<BodySnapshot>,
    pub segments: Vec<Segment>,
}

/// Owns every body, segment and soft-body group, and steps them.
pub struct PhysicsWorld {
    config: WorldConfig,
    bodies: BodyArena,
    segments: Vec<Segment>,
    soft_bodies: SlotMap<SoftBodyHandle, SoftBodyGroup>,
    gravity: Gravity,
    resolver: CollisionResolver,
    effects: Option<Box<dyn EffectsSystem>>,
    time: f64,
    frame: u64,
}

impl PhysicsWorld {
    /// Create an empty world.
    ///
    /// `config` is trusted; use [`try_new`](Self::try_new) for configs that
    /// come from outside the program.
    pub fn new(config: WorldConfig) -> Self {
        Self {
            config,
            bodies: BodyArena::with_key(),
            segments: Vec::new(),
            soft_bodies: SlotMap::with_key(),
            gravity: Gravity::new(config.gravity),
            resolver: CollisionResolver::new(config.correction_percent, config.cushion_damping),
            effects: None,
            time: 0.0,
            frame: 0,
        }
    }

    /// Validate `config`, then create an empty world.
    pub fn try_new(config: WorldConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config))
    }

    pub fn with_effects(mut self, effects: Box<dyn EffectsSystem>) -> Self {
        self.effects = Some(effects);
        self
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Simulated seconds since creation or the last reset.
    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    // -------------------------------------------------------------------------
    // Registration
    // -------------------------------------------------------------------------

    pub fn add_body(&mut self, body: Body) -> BodyHandle {
        let handle = self.bodies.insert(body);
        debug!("added body {:?} ({} total)", handle, self.bodies.len());
        handle
    }

    /// Remove a body. Removing an already-removed body returns `None`.
    ///
    /// The body is also dropped from any soft-body group it belonged to; the
    /// rest of the group keeps simulating.
    pub fn remove_body(&mut self, handle: BodyHandle) -> Option<Body> {
        let body = self.bodies.remove(handle)?;
        for group in self.soft_bodies.values_mut() {
            group.members.retain(|h| *h != handle);
            group
                .constraints
                .retain(|c| c.body_a != handle && c.body_b != handle);
        }
        debug!("removed body {:?} ({} left)", handle, self.bodies.len());
        Some(body)
    }

    pub fn add_static_segment(&mut self, p1: Vec2, p2: Vec2) {
        self.segments.push(Segment::new(p1, p2));
    }

    /// Add the four cushions along the play-field edges.
    pub fn add_boundary_rect(&mut self) {
        self.segments.extend(self.config.field.cushions());
        debug!("added table cushions ({} segments)", self.segments.len());
    }

    /// Register a soft body. Its particles join the general body collection
    /// and collide like any other body.
    pub fn add_soft_body(&mut self, soft_body: SoftBody) -> SoftBodyHandle {
        let group = soft_body.register(&mut self.bodies);
        self.soft_bodies.insert(group)
    }

    /// Attach a constraint to its first body. Returns `false` if that body is
    /// gone.
    pub fn attach_constraint(&mut self, constraint: DistanceConstraint) -> bool {
        match self.bodies.get_mut(constraint.body_a) {
            Some(body) => {
                body.attach_constraint(constraint);
                true
            }
            None => false,
        }
    }

    // -------------------------------------------------------------------------
    // Access
    // -------------------------------------------------------------------------

    pub fn body(&self, handle: BodyHandle) -> Option<&Body> {
        self.bodies.get(handle)
    }

    pub fn body_mut(&mut self, handle: BodyHandle) -> Option<&mut Body> {
        self.bodies.get_mut(handle)
    }

    pub fn bodies(&self) -> impl Iterator<Item = (BodyHandle, &Body)> {
        self.bodies.iter()
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn position(&self, handle: BodyHandle) -> Option<Vec2> {
        self.bodies.get(handle).map(|b| b.position)
    }

    pub fn radius(&self, handle: BodyHandle) -> Option<f64> {
        self.bodies.get(handle).map(|b| b.radius)
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn soft_body(&self, handle: SoftBodyHandle) -> Option<&SoftBodyGroup> {
        self.soft_bodies.get(handle)
    }

    /// Returns `false` if the handle is stale.
    pub fn apply_force(&mut self, handle: BodyHandle, force: Vec2) -> bool {
        self.bodies
            .get_mut(handle)
            .map(|b| b.apply_force(force))
            .is_some()
    }

    /// Returns `false` if the handle is stale.
    pub fn apply_impulse(&mut self, handle: BodyHandle, impulse: Vec2) -> bool {
        self.bodies
            .get_mut(handle)
            .map(|b| b.apply_impulse(impulse))
            .is_some()
    }

    /// Respawn a body at rest. Returns `false` if the handle is stale.
    pub fn reset_body(&mut self, handle: BodyHandle, position: Vec2) -> bool {
        self.bodies
            .get_mut(handle)
            .map(|b| b.reset_to(position))
            .is_some()
    }

    /// Whether no dynamic body is moving faster than `threshold`.
    pub fn is_settled(&self, threshold: f64) -> bool {
        self.bodies
            .iter()
            .all(|(_, b)| b.is_static() || !b.is_moving(threshold))
    }

    /// [`is_settled`](Self::is_settled) with the default rest speed.
    pub fn is_at_rest(&self) -> bool {
        self.is_settled(constants::REST_SPEED)
    }

    pub fn kinetic_energy(&self) -> f64 {
        self.bodies.iter().map(|(_, b)| b.kinetic_energy()).sum()
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            time: self.time,
            frame: self.frame,
            bodies: self
                .bodies
                .iter()
                .map(|(handle, b)| BodySnapshot {
                    handle,
                    position: b.position,
                    velocity: b.velocity,
                    radius: b.radius,
                    is_static: b.is_static(),
                    tag: b.tag,
                })
                .collect(),
            segments: self.segments.clone(),
        }
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Drop bodies, segments and soft bodies; keep the configuration and
    /// effects. Handles from before the reset stay stale.
    pub fn reset(&mut self) {
        clear_in_slot_order(&mut self.bodies);
        self.segments.clear();
        clear_in_slot_order(&mut self.soft_bodies);
        self.time = 0.0;
        self.frame = 0;
        debug!("world reset");
    }

    /// Drop bodies and soft bodies but keep the cushions.
    pub fn clear_bodies(&mut self) {
        clear_in_slot_order(&mut self.bodies);
        clear_in_slot_order(&mut self.soft_bodies);
        debug!("cleared bodies, {} segments kept", self.segments.len());
    }

    // -------------------------------------------------------------------------
    // Simulation
    // -------------------------------------------------------------------------

    /// Advance the world by one outer time step.
    pub fn step(&mut self) -> StepReport {
        let dt = self.config.time_step;
        let h = self.config.substep_dt();
        let mut report = StepReport::default();

        for _ in 0..self.config.substeps {
            report += self.substep(h);
        }

        if let Some(effects) = self.effects.as_mut() {
            effects.update(dt);
        }

        self.time += dt;
        self.frame += 1;
        trace!(
            "frame {}: {} body contacts, {} boundary contacts",
            self.frame,
            report.body_contacts,
            report.boundary_contacts
        );
        report
    }

    /// Run `frames` steps and sum their reports.
    pub fn step_n(&mut self, frames: usize) -> StepReport {
        let mut report = StepReport::default();
        for _ in 0..frames {
            report += self.step();
        }
        report
    }

    fn substep(&mut self, h: f64) -> StepReport {
        if !self.gravity.is_zero() {
            self.gravity.apply(self.bodies.values_mut());
        }
        SemiImplicitEuler::step_all(self.bodies.values_mut(), &self.config.field, h);
        self.relax_constraints();

        let handles: Vec<BodyHandle> = self.bodies.keys().collect();
        StepReport {
            body_contacts: self.collide_bodies(&handles),
            boundary_contacts: self.collide_segments(&handles),
        }
    }

    fn relax_constraints(&mut self) {
        let attached: Vec<DistanceConstraint> = self
            .bodies
            .iter()
            .flat_map(|(_, body)| body.constraints.iter().copied())
            .collect();
        if self.soft_bodies.is_empty() && attached.is_empty() {
            return;
        }

        for _ in 0..self.config.iterations {
            for group in self.soft_bodies.values() {
                group.solve_constraints(&mut self.bodies);
            }
            for constraint in &attached {
                constraint.solve(&mut self.bodies);
            }
        }
    }

    fn collide_bodies(&mut self, handles: &[BodyHandle]) -> usize {
        let mut resolved = 0;
        for (i, &ha) in handles.iter().enumerate() {
            for &hb in &handles[i + 1..] {
                let contact = match (self.bodies.get(ha), self.bodies.get(hb)) {
                    (Some(a), Some(b)) if !(a.is_static() && b.is_static()) => {
                        circle_vs_circle(ha, a, hb, b)
                    }
                    _ => None,
                };
                if let Some(contact) = contact {
                    if self.resolver.resolve(&contact, &mut self.bodies) {
                        resolved += 1;
                    }
                }
            }
        }
        resolved
    }

    fn collide_segments(&mut self, handles: &[BodyHandle]) -> usize {
        let mut resolved = 0;
        for &handle in handles {
            for segment in &self.segments {
                let contact = match self.bodies.get(handle) {
                    Some(body) if !body.is_static() => circle_vs_segment(handle, body, segment),
                    _ => None,
                };
                if let Some(contact) = contact {
                    if self.resolver.resolve(&contact, &mut self.bodies) {
                        resolved += 1;
                    }
                }
            }
        }
        resolved
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new(WorldConfig::default())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BodyMaterial;
    use crate::types::PlayField;
    use std::sync::{Arc, Mutex};

    fn pool_ball(x: f64, y: f64) -> Body {
        Body::from_material(Vec2::new(x, y), &BodyMaterial::pool_ball())
    }

    fn rack(world: &mut PhysicsWorld) -> BodyHandle {
        let cue = world.add_body(
            pool_ball(520.0, 360.0)
                .with_velocity(Vec2::new(2500.0, 40.0))
                .with_tag(BodyTag::CueBall),
        );
        let mut n = 1;
        for row in 0..5 {
            for k in 0..=row {
                let x = 900.0 + row as f64 * 26.0;
                let y = 360.0 + (k as f64 - row as f64 / 2.0) * 30.5;
                world.add_body(pool_ball(x, y).with_tag(BodyTag::Ball(n)));
                n += 1;
            }
        }
        cue
    }

    #[test]
    fn test_clamp_invariant_every_step() {
        let mut world = PhysicsWorld::default();
        world.add_boundary_rect();
        rack(&mut world);
        let field = world.config().field;

        for frame in 0..600 {
            world.step();
            for (handle, body) in world.bodies() {
                let p = body.position;
                let r = body.radius;
                assert!(
                    p.x >= field.left() + r - 1e-6
                        && p.x <= field.right() - r + 1e-6
                        && p.y >= field.top() + r - 1e-6
                        && p.y <= field.bottom() - r + 1e-6,
                    "frame {}: {:?} escaped the table at {:?}",
                    frame,
                    handle,
                    p
                );
            }
        }
    }

    #[test]
    fn test_determinism() {
        let run = || {
            let mut world = PhysicsWorld::default();
            world.add_boundary_rect();
            rack(&mut world);
            world.step_n(400);
            world.snapshot()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_scenario_head_on_contact() {
        let mut world = PhysicsWorld::default();
        let a = world.add_body(pool_ball(100.0, 100.0).with_velocity(Vec2::new(100.0, 0.0)));
        let b = world.add_body(pool_ball(140.0, 100.0));

        let mut contact_frame = None;
        for frame in 0..200 {
            let before_a = world.body(a).unwrap().velocity.x;
            let momentum_before =
                world.body(a).unwrap().momentum().x + world.body(b).unwrap().momentum().x;

            let report = world.step();
            if report.body_contacts > 0 {
                let va = world.body(a).unwrap().velocity.x;
                let vb = world.body(b).unwrap().velocity.x;
                let momentum_after = va + vb;

                assert!(va < before_a, "A should slow down: {} -> {}", before_a, va);
                assert!(vb > va, "B should move faster than A: vA={} vB={}", va, vb);
                assert!(
                    momentum_after <= momentum_before + 1e-9
                        && momentum_after >= 0.95 * momentum_before,
                    "momentum {} -> {}",
                    momentum_before,
                    momentum_after
                );
                let d = world.position(a).unwrap().distance(&world.position(b).unwrap());
                assert!(d >= 30.0 - 0.5, "centers too close after contact: {}", d);
                contact_frame = Some(frame);
                break;
            }
        }
        assert!(contact_frame.is_some(), "A never reached B");
    }

    #[test]
    fn test_soft_body_converges_in_world() {
        let mut world = PhysicsWorld::default();
        let mut soft = SoftBody::new();
        let p = soft.add_particle(Body::new(Vec2::new(400.0, 300.0), 2.0, 1.0));
        let q = soft.add_particle(Body::new(Vec2::new(440.0, 300.0), 2.0, 1.0));
        assert!(soft.add_constraint(p, q, 30.0));

        let handle = world.add_soft_body(soft);
        assert_eq!(world.body_count(), 2);
        let initial = world.soft_body(handle).unwrap().max_error(&world.bodies);
        assert!((initial - 10.0).abs() < 1e-10);

        world.step();
        let err = world.soft_body(handle).unwrap().max_error(&world.bodies);
        assert!(err < 1e-9, "constraint error after one frame: {}", err);
    }

    #[test]
    fn test_attached_constraint_is_relaxed() {
        let mut world = PhysicsWorld::default();
        let a = world.add_body(Body::new(Vec2::new(400.0, 300.0), 2.0, 1.0));
        let b = world.add_body(Body::new(Vec2::new(460.0, 300.0), 2.0, 1.0));
        assert!(world.attach_constraint(DistanceConstraint::new(a, b, 20.0)));

        world.step();
        let d = world.position(a).unwrap().distance(&world.position(b).unwrap());
        assert!((d - 20.0).abs() < 1e-9, "distance {}", d);
    }

    #[test]
    fn test_removed_body_leaves_simulation() {
        let mut world = PhysicsWorld::default();
        let a = world.add_body(pool_ball(200.0, 200.0));
        let b = world.add_body(pool_ball(215.0, 200.0));

        assert!(world.remove_body(b).is_some());
        assert!(world.remove_body(b).is_none(), "removal is idempotent");
        assert!(world.body(b).is_none());
        assert!(!world.apply_impulse(b, Vec2::new(1.0, 0.0)));

        let report = world.step();
        assert_eq!(report.body_contacts, 0);
        assert_eq!(world.position(a), Some(Vec2::new(200.0, 200.0)));
    }

    #[test]
    fn test_stale_handle_after_slot_reuse() {
        let mut world = PhysicsWorld::default();
        let old = world.add_body(pool_ball(200.0, 200.0));
        world.remove_body(old);
        let new = world.add_body(pool_ball(600.0, 400.0));

        assert_ne!(old, new);
        assert!(world.body(old).is_none());
        assert_eq!(world.position(new), Some(Vec2::new(600.0, 400.0)));
    }

    #[test]
    fn test_removing_soft_member_keeps_group() {
        let mut world = PhysicsWorld::default();
        let rope = SoftBody::rope(Vec2::new(300.0, 300.0), Vec2::new(360.0, 300.0), 3, 2.0, 1.0);
        let handle = world.add_soft_body(rope);
        let middle = world.soft_body(handle).unwrap().members[1];

        world.remove_body(middle);
        let group = world.soft_body(handle).unwrap();
        assert_eq!(group.members.len(), 3);
        assert_eq!(group.constraints.len(), 1);
        world.step();
    }

    #[test]
    fn test_cushion_bounce_keeps_ball_on_table() {
        let mut world = PhysicsWorld::default();
        world.add_boundary_rect();
        let ball = world.add_body(pool_ball(640.0, 100.0).with_velocity(Vec2::new(0.0, -800.0)));

        let report = world.step_n(30);
        assert!(report.boundary_contacts > 0);
        assert!(world.body(ball).unwrap().velocity.y > 0.0, "ball should head back down");
    }

    #[test]
    fn test_static_segments_do_not_move_static_bodies() {
        let mut world = PhysicsWorld::default();
        world.add_boundary_rect();
        let post = world.add_body(Body::new_static(Vec2::new(66.0, 66.0), 15.0));
        world.step();
        assert_eq!(world.position(post), Some(Vec2::new(66.0, 66.0)));
    }

    #[test]
    fn test_static_body_outside_field_is_clamped() {
        let mut world = PhysicsWorld::default();
        let post = world.add_body(Body::new_static(Vec2::new(10.0, 10.0), 15.0));
        world.add_body(pool_ball(640.0, 360.0).with_velocity(Vec2::new(100.0, 0.0)));
        world.step();

        let field = world.config().field;
        let p = world.position(post).unwrap();
        assert!(field.contains_circle(p, 15.0), "static body left at {:?}", p);
        assert_eq!(p, Vec2::new(65.0, 65.0));
    }

    #[test]
    fn test_clamp_invariant_every_substep() {
        let config = WorldConfig {
            substeps: 1,
            ..Default::default()
        };
        let mut world = PhysicsWorld::new(config);
        world.add_boundary_rect();
        world.add_body(pool_ball(1150.0, 300.0).with_velocity(Vec2::new(600.0, 0.0)));
        world.add_body(pool_ball(1185.0, 300.0));
        world.add_body(pool_ball(1200.0, 80.0).with_velocity(Vec2::new(400.0, -400.0)));
        let field = world.config().field;

        let mut contacts = StepReport::default();
        for frame in 0..240 {
            contacts += world.step();
            for (handle, body) in world.bodies() {
                assert!(
                    field.contains_circle(body.position, body.radius - 1e-6),
                    "substep {}: {:?} escaped the table at {:?}",
                    frame,
                    handle,
                    body.position
                );
            }
        }
        assert!(contacts.body_contacts > 0);
        assert!(contacts.boundary_contacts > 0);
    }

    #[test]
    fn test_soft_body_handle_stale_after_reset() {
        let mut world = PhysicsWorld::default();
        let rope = || {
            SoftBody::rope(Vec2::new(300.0, 300.0), Vec2::new(360.0, 300.0), 3, 2.0, 1.0)
        };
        let old = world.add_soft_body(rope());

        world.reset();
        assert!(world.soft_body(old).is_none());
        let new = world.add_soft_body(rope());
        assert_ne!(old, new);
        assert!(world.soft_body(old).is_none());

        world.clear_bodies();
        assert!(world.soft_body(new).is_none());
    }

    #[test]
    fn test_gravity_accelerates_dynamic_bodies() {
        let config = WorldConfig {
            gravity: Vec2::new(0.0, 100.0),
            ..Default::default()
        };
        let mut world = PhysicsWorld::new(config);
        let ball = world.add_body(Body::new(Vec2::new(640.0, 200.0), 10.0, 1.0).with_friction(0.0));
        world.step();
        // v = g * time_step after four substeps
        let vy = world.body(ball).unwrap().velocity.y;
        assert!((vy - 100.0 / 240.0).abs() < 1e-12, "vy = {}", vy);
    }

    #[test]
    fn test_settles_from_friction() {
        let mut world = PhysicsWorld::default();
        world.add_boundary_rect();
        let ball = world.add_body(pool_ball(640.0, 360.0));
        assert!(world.is_at_rest());

        world.apply_impulse(ball, Vec2::new(300.0, 0.0));
        assert!(!world.is_at_rest());
        world.step_n(2000);
        assert!(world.is_at_rest(), "speed {}", world.body(ball).unwrap().speed());
    }

    #[test]
    fn test_reset_and_clear() {
        let mut world = PhysicsWorld::default();
        world.add_boundary_rect();
        let ball = world.add_body(pool_ball(640.0, 360.0));
        world.step_n(3);

        world.clear_bodies();
        assert_eq!(world.body_count(), 0);
        assert_eq!(world.segments().len(), 4);
        assert!(world.body(ball).is_none());

        world.reset();
        assert!(world.segments().is_empty());
        assert_eq!(world.frame(), 0);
        assert_eq!(world.time(), 0.0);
    }

    #[test]
    fn test_reset_body_respawns_at_rest() {
        let mut world = PhysicsWorld::default();
        let cue = world.add_body(pool_ball(640.0, 360.0).with_velocity(Vec2::new(50.0, 0.0)));
        assert!(world.reset_body(cue, Vec2::new(320.0, 360.0)));
        let body = world.body(cue).unwrap();
        assert_eq!(body.position, Vec2::new(320.0, 360.0));
        assert_eq!(body.velocity, Vec2::ZERO);
    }

    #[test]
    fn test_effects_advanced_once_per_frame() {
        struct Recorder(Arc<Mutex<Vec<f64>>>);
        impl EffectsSystem for Recorder {
            fn update(&mut self, dt: f64) {
                self.0.lock().unwrap().push(dt);
            }
        }

        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut world = PhysicsWorld::default().with_effects(Box::new(Recorder(calls.clone())));
        world.step_n(3);

        let calls = calls.lock().unwrap();
        assert_eq!(calls.len(), 3);
        assert!(calls.iter().all(|dt| *dt == constants::TIME_STEP));
    }

    #[test]
    fn test_try_new_rejects_invalid_config() {
        let config = WorldConfig {
            substeps: 0,
            ..Default::default()
        };
        assert!(matches!(
            PhysicsWorld::try_new(config),
            Err(ConfigError::Invalid(_))
        ));
        let tiny = WorldConfig {
            field: PlayField::new(10.0, 15.0, 15.0),
            ..Default::default()
        };
        assert!(PhysicsWorld::try_new(tiny).is_err());
    }

    #[test]
    fn test_snapshot_serializes() {
        let mut world = PhysicsWorld::default();
        world.add_body(pool_ball(640.0, 360.0).with_tag(BodyTag::CueBall));
        world.step();

        let snapshot = world.snapshot();
        assert_eq!(snapshot.frame, 1);
        assert_eq!(snapshot.bodies[0].tag, Some(BodyTag::CueBall));
        let yaml = serde_yaml::to_string(&snapshot).unwrap();
        let back: WorldSnapshot = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back.bodies.len(), 1);
    }
}
