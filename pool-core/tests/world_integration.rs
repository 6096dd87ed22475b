//! End-to-end runs of the world loop with shipped configuration.

use std::path::PathBuf;

use pool_core::{
    Body, BodyMaterial, BodyTag, ConfigLoader, PhysicsWorld, SoftBody, Vec2, WorldConfig,
};

fn config_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("..").join("config")
}

fn rack(world: &mut PhysicsWorld, material: &BodyMaterial) {
    let mut number = 1;
    for row in 0..5 {
        for k in 0..=row {
            let x = 900.0 + row as f64 * 26.5;
            let y = 360.0 + (k as f64 - row as f64 / 2.0) * 31.0;
            world.add_body(
                Body::from_material(Vec2::new(x, y), material).with_tag(BodyTag::Ball(number)),
            );
            number += 1;
        }
    }
}

#[test]
fn break_shot_settles_on_the_table() {
    let loader = ConfigLoader::new(config_path());
    let config = loader.load_world("default").expect("default world config");
    let ball = loader.load_material("pool_ball").expect("pool ball material");
    let cue_material = loader.load_material("cue_ball").expect("cue ball material");

    let mut world = PhysicsWorld::try_new(config).expect("valid config");
    world.add_boundary_rect();
    rack(&mut world, &ball);
    let cue = world.add_body(
        Body::from_material(Vec2::new(450.0, 362.0), &cue_material).with_tag(BodyTag::CueBall),
    );
    world.apply_impulse(cue, Vec2::new(4000.0, 0.0));

    let initial_energy = world.kinetic_energy();
    let report = world.step_n(240);
    assert!(report.body_contacts > 0, "cue ball never reached the rack");
    assert!(
        world.kinetic_energy() < initial_energy,
        "energy should drain: {} -> {}",
        initial_energy,
        world.kinetic_energy()
    );

    let mut frames = 240;
    while !world.is_at_rest() && frames < 20_000 {
        world.step();
        frames += 1;
    }
    assert!(world.is_at_rest(), "table still moving after {} frames", frames);

    let field = world.config().field;
    for (handle, body) in world.bodies() {
        assert!(body.position.is_finite(), "{:?} has a non-finite position", handle);
        assert!(
            body.position.x >= field.left() + body.radius - 1e-6
                && body.position.x <= field.right() - body.radius + 1e-6,
            "{:?} left the table at {:?}",
            handle,
            body.position
        );
    }
}

#[test]
fn tilted_table_rolls_balls_toward_bottom_rail() {
    let loader = ConfigLoader::new(config_path());
    let config = loader.load_world("tilted_table").expect("tilted config");
    assert!(config.gravity.y > 0.0);

    let mut world = PhysicsWorld::new(config);
    world.add_boundary_rect();
    let ball = world.add_body(Body::from_material(
        Vec2::new(640.0, 200.0),
        &BodyMaterial::pool_ball(),
    ));

    world.step_n(600);
    let y = world.position(ball).unwrap().y;
    assert!(y > 200.0, "ball should roll downhill, y = {}", y);
    assert!(y <= config.field.bottom() - 15.0 + 1e-6);
}

#[test]
fn rope_hangs_between_balls_without_exploding() {
    let mut world = PhysicsWorld::new(WorldConfig::default());
    world.add_boundary_rect();
    let rope = SoftBody::rope(Vec2::new(400.0, 300.0), Vec2::new(520.0, 300.0), 6, 3.0, 0.2);
    let handle = world.add_soft_body(rope);
    let cue = world.add_body(Body::from_material(
        Vec2::new(460.0, 500.0),
        &BodyMaterial::pool_ball(),
    ));
    world.apply_impulse(cue, Vec2::new(0.0, -900.0));

    world.step_n(600);

    let group = world.soft_body(handle).expect("soft body registered");
    for member in &group.members {
        let p = world.position(*member).expect("member alive");
        assert!(p.is_finite(), "rope particle went non-finite");
    }
    assert_eq!(group.members.len(), 7);
}

#[test]
fn reset_world_replays_identically() {
    let populate = |world: &mut PhysicsWorld| {
        world.add_boundary_rect();
        rack(world, &BodyMaterial::pool_ball());
        let cue = world.add_body(Body::from_material(
            Vec2::new(450.0, 350.0),
            &BodyMaterial::pool_ball(),
        ));
        world.apply_impulse(cue, Vec2::new(3000.0, 60.0));
    };
    let state = |world: &PhysicsWorld| -> Vec<(Vec2, Vec2)> {
        world
            .snapshot()
            .bodies
            .iter()
            .map(|b| (b.position, b.velocity))
            .collect()
    };

    let mut fresh = PhysicsWorld::default();
    populate(&mut fresh);
    fresh.step_n(300);

    let mut reused = PhysicsWorld::default();
    populate(&mut reused);
    reused.step_n(150);
    reused.reset();
    populate(&mut reused);
    reused.step_n(300);

    assert_eq!(reused.frame(), fresh.frame());
    assert_eq!(state(&reused), state(&fresh));
}
