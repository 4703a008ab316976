//! Integration tests for the rapier backend.
//!
//! These run the controller against real physics: a capsule avatar
//! settling on a ground slab, walking under keyboard state, jumping,
//! and the camera rig tracking the body through transform propagation.

#![cfg(feature = "rapier3d")]

use bevy::input::keyboard::{Key, KeyboardInput};
use bevy::input::ButtonState;
use bevy::prelude::*;
use bevy::time::Virtual;
use bevy_rapier3d::prelude::*;
use fps_locomotion::prelude::*;

/// Create a minimal test app with physics and the locomotion plugin.
fn create_test_app() -> App {
    let mut app = App::new();

    app.add_plugins(MinimalPlugins);
    app.add_plugins(TransformPlugin);
    app.add_plugins(RapierPhysicsPlugin::<NoUserData>::default());
    app.add_plugins(LocomotionPlugin::<Rapier3dBackend>::default());
    app.insert_resource(Time::<Fixed>::from_hz(60.0));
    // Drive the clock deterministically: each `update` advances time by
    // exactly one fixed timestep instead of the wall-clock delta.
    app.insert_resource(bevy::time::TimeUpdateStrategy::ManualDuration(
        std::time::Duration::from_secs_f64(1.0 / 60.0),
    ));

    app.finish();
    app.cleanup();
    app.update();
    app
}

/// Spawn a static ground slab whose top surface sits at y = 0.
fn spawn_ground(app: &mut App) -> Entity {
    let transform = Transform::from_xyz(0.0, -0.5, 0.0);
    app.world_mut()
        .spawn((
            transform,
            GlobalTransform::from(transform),
            RigidBody::Fixed,
            Collider::cuboid(50.0, 0.5, 50.0),
        ))
        .id()
}

/// Spawn a camera + avatar pair with the rapier body components.
///
/// The capsule is frictionless so velocity assertions aren't skewed by
/// contact friction between the solve and the read.
fn spawn_player(app: &mut App, position: Vec3) -> (Entity, Entity) {
    let camera = app
        .world_mut()
        .spawn((Transform::default(), GlobalTransform::default()))
        .id();

    let config = LocomotionConfig::player();
    let avatar = {
        let mut commands = app.world_mut().commands();
        spawn_avatar(&mut commands, camera, position, config)
    };
    app.world_mut().flush();

    app.world_mut().entity_mut(avatar).insert((
        Rapier3dAvatarBundle::from_config(&config),
        Friction::coefficient(0.0),
        GlobalTransform::from(Transform::from_translation(position)),
    ));

    (avatar, camera)
}

/// Run one frame: advance virtual time by the fixed timestep and update.
fn tick(app: &mut App) {
    let timestep = std::time::Duration::from_secs_f64(1.0 / 60.0);
    app.world_mut()
        .resource_mut::<Time<Virtual>>()
        .advance_by(timestep);
    app.update();
}

fn run_frames(app: &mut App, frames: usize) {
    for _ in 0..frames {
        tick(app);
    }
}

fn press(app: &mut App, avatar: Entity, key: &str) {
    let mut input = app.world_mut().get_mut::<InputState>(avatar).unwrap();
    input.press(key);
}

fn linvel(app: &App, avatar: Entity) -> Vec3 {
    app.world().get::<Velocity>(avatar).unwrap().linvel
}

fn position(app: &App, avatar: Entity) -> Vec3 {
    app.world()
        .get::<GlobalTransform>(avatar)
        .unwrap()
        .translation()
}

fn horizontal(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z)
}

// ==================== Settling & walking ====================

#[test]
fn avatar_settles_on_the_ground() {
    let mut app = create_test_app();
    spawn_ground(&mut app);
    let (avatar, _) = spawn_player(&mut app, Vec3::new(0.0, 0.8, 0.0));

    run_frames(&mut app, 90);

    let v = linvel(&app, avatar);
    let pos = position(&app, avatar);

    // PROOF: resting on the slab, not falling through or bouncing.
    assert!(v.y.abs() < 0.5, "vertical velocity at rest: {}", v.y);
    assert!(
        pos.y > 0.3 && pos.y < 0.8,
        "capsule center should rest near half height: {}",
        pos.y
    );
}

#[test]
fn walking_reaches_the_configured_speed() {
    let mut app = create_test_app();
    spawn_ground(&mut app);
    let (avatar, _) = spawn_player(&mut app, Vec3::new(0.0, 0.8, 0.0));
    run_frames(&mut app, 90);

    press(&mut app, avatar, "w");
    run_frames(&mut app, 5);

    let v = linvel(&app, avatar);
    // Default camera faces -Z, so the avatar walks toward -Z.
    assert!(
        (horizontal(v).length() - 3.0).abs() < 0.3,
        "horizontal speed: {}",
        horizontal(v).length()
    );
    assert!(v.z < -2.5, "walk direction should be -Z: {v}");
    assert!(v.y.abs() < 0.5, "walking must not excite vertical motion");
}

#[test]
fn opposing_keys_leave_the_avatar_standing() {
    let mut app = create_test_app();
    spawn_ground(&mut app);
    let (avatar, _) = spawn_player(&mut app, Vec3::new(0.0, 0.8, 0.0));
    run_frames(&mut app, 90);

    press(&mut app, avatar, "w");
    press(&mut app, avatar, "s");
    run_frames(&mut app, 5);

    assert!(horizontal(linvel(&app, avatar)).length() < 0.05);
}

#[test]
fn falling_body_keeps_its_vertical_velocity_while_steering() {
    let mut app = create_test_app();
    spawn_ground(&mut app);
    let (avatar, _) = spawn_player(&mut app, Vec3::new(0.0, 5.0, 0.0));

    press(&mut app, avatar, "w");
    run_frames(&mut app, 10);

    let v = linvel(&app, avatar);
    // PROOF: gravity accumulated while the solver wrote horizontal
    // velocity every tick; it was not zeroed to (v_forward, 0, 0).
    assert!(v.y < -0.5, "should be falling: {}", v.y);
    assert!(
        (horizontal(v).length() - 3.0).abs() < 0.3,
        "horizontal speed while airborne: {}",
        horizontal(v).length()
    );
}

// ==================== Jumping ====================

#[test]
fn jump_from_rest_sets_the_jump_speed() {
    let mut app = create_test_app();
    spawn_ground(&mut app);
    let (avatar, _) = spawn_player(&mut app, Vec3::new(0.0, 0.8, 0.0));
    run_frames(&mut app, 90);

    press(&mut app, avatar, "space");
    tick(&mut app);

    let v = linvel(&app, avatar);
    // One gravity step may already have decayed the impulse slightly.
    assert!(
        v.y > 4.0 && v.y <= 5.01,
        "vertical velocity right after the jump: {}",
        v.y
    );
}

#[test]
fn holding_jump_does_not_retrigger_in_the_air() {
    let mut app = create_test_app();
    spawn_ground(&mut app);
    let (avatar, _) = spawn_player(&mut app, Vec3::new(0.0, 0.8, 0.0));
    run_frames(&mut app, 90);

    press(&mut app, avatar, "space");
    tick(&mut app);
    let after_takeoff = linvel(&app, avatar).y;

    // Keep holding; vertical speed must only decay under gravity.
    let mut previous = after_takeoff;
    for _ in 0..10 {
        tick(&mut app);
        let current = linvel(&app, avatar).y;
        assert!(
            current < previous + 1e-3,
            "vertical velocity re-spiked while airborne: {} -> {}",
            previous,
            current
        );
        previous = current;
    }
}

#[test]
fn jump_requires_ground_within_probe_range() {
    let mut app = create_test_app();
    spawn_ground(&mut app);
    let (avatar, _) = spawn_player(&mut app, Vec3::new(0.0, 5.0, 0.0));

    press(&mut app, avatar, "space");
    run_frames(&mut app, 3);

    // Falling from well above the probe length: the jump never fires.
    assert!(linvel(&app, avatar).y <= 0.0);
}

// ==================== Camera rig ====================

#[test]
fn camera_tracks_body_at_the_eye_offset() {
    let mut app = create_test_app();
    spawn_ground(&mut app);
    let (avatar, camera) = spawn_player(&mut app, Vec3::new(0.0, 0.8, 0.0));
    run_frames(&mut app, 90);

    press(&mut app, avatar, "w");
    press(&mut app, avatar, "d");
    run_frames(&mut app, 30);

    let body = position(&app, avatar);
    let cam = app
        .world()
        .get::<GlobalTransform>(camera)
        .unwrap()
        .translation();

    let expected = body + LocomotionConfig::player().eye_offset;
    assert!(
        (cam - expected).length() < 1e-3,
        "camera at {cam}, expected {expected}"
    );
}

// ==================== Keyboard event wiring ====================

#[test]
fn keyboard_events_drive_walking() {
    let mut app = create_test_app();
    spawn_ground(&mut app);
    let (avatar, _) = spawn_player(&mut app, Vec3::new(0.0, 0.8, 0.0));
    run_frames(&mut app, 90);

    app.world_mut().send_event(KeyboardInput {
        key_code: KeyCode::KeyW,
        logical_key: Key::Character("w".into()),
        state: ButtonState::Pressed,
        text: None,
        repeat: false,
        window: Entity::PLACEHOLDER,
    });
    run_frames(&mut app, 5);

    assert!(app.world().get::<InputState>(avatar).unwrap().is_held("w"));
    assert!(linvel(&app, avatar).z < -2.5);

    app.world_mut().send_event(KeyboardInput {
        key_code: KeyCode::KeyW,
        logical_key: Key::Character("w".into()),
        state: ButtonState::Released,
        text: None,
        repeat: false,
        window: Entity::PLACEHOLDER,
    });
    run_frames(&mut app, 5);

    assert!(!app.world().get::<InputState>(avatar).unwrap().is_held("w"));
    assert!(horizontal(linvel(&app, avatar)).length() < 0.05);
}
