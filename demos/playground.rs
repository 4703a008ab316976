//! Playground Example
//!
//! A first-person physics playground:
//! - A 10x10 ground slab and a bouncing sphere
//! - A capsule avatar dropped from above with the camera at eye height
//! - An egui overlay with an fps readout and a click counter
//!
//! ## Controls
//! - **W/A/S/D**: Walk and strafe relative to the camera
//! - **Space**: Jump (requires ground contact)
//! - **Mouse**: Look around (click to grab the cursor, Escape to release)

use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::input::mouse::MouseMotion;
use bevy::prelude::*;
use bevy::window::{CursorGrabMode, PrimaryWindow};
use bevy_egui::{egui, EguiContexts, EguiPlugin, EguiPrimaryContextPass};
use bevy_rapier3d::prelude::*;
use fps_locomotion::prelude::*;

// ==================== Constants ====================

const GROUND_SIZE: f32 = 10.0;
const SPHERE_RADIUS: f32 = 1.0;
const SPHERE_RESTITUTION: f32 = 0.75;

const SPAWN_POSITION: Vec3 = Vec3::new(0.0, 4.0, 0.0);
const KILL_PLANE_Y: f32 = -20.0;

const MOUSE_SENSITIVITY: f32 = 0.002;
const PITCH_LIMIT: f32 = 1.54; // just shy of straight up/down

// ==================== Components & resources ====================

/// Yaw/pitch state for the rig camera.
#[derive(Component, Default)]
struct LookAngles {
    yaw: f32,
    pitch: f32,
}

/// State for the overlay panel.
#[derive(Resource, Default)]
struct OverlayState {
    counter: u32,
    disposed: bool,
}

// ==================== Main ====================

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Playground".into(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(FrameTimeDiagnosticsPlugin::default())
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::default())
        .add_plugins(RapierDebugRenderPlugin::default())
        .add_plugins(EguiPlugin::default())
        .add_plugins(LocomotionPlugin::<Rapier3dBackend>::default())
        .init_resource::<OverlayState>()
        .add_systems(Startup, setup)
        .add_systems(Update, (cursor_grab, mouse_look, respawn_fallen))
        .add_systems(EguiPrimaryContextPass, overlay)
        .run();
}

// ==================== Setup ====================

fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    // Lighting: soft ambient plus one directional light.
    commands.insert_resource(AmbientLight {
        brightness: 200.0,
        ..default()
    });
    commands.spawn((
        DirectionalLight {
            illuminance: 5_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(4.0, 8.0, 4.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    // Ground slab, top surface at y = 0.
    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(GROUND_SIZE, GROUND_SIZE))),
        MeshMaterial3d(materials.add(Color::srgb(0.35, 0.45, 0.35))),
        Transform::from_xyz(0.0, -0.05, 0.0),
        RigidBody::Fixed,
        Collider::cuboid(GROUND_SIZE / 2.0, 0.05, GROUND_SIZE / 2.0),
    ));

    // Bouncing sphere dropped next to the player.
    commands.spawn((
        Mesh3d(meshes.add(Sphere::new(SPHERE_RADIUS))),
        MeshMaterial3d(materials.add(Color::srgb(0.8, 0.3, 0.3))),
        Transform::from_xyz(2.5, 4.0, -2.5),
        RigidBody::Dynamic,
        Collider::ball(SPHERE_RADIUS),
        Restitution::coefficient(SPHERE_RESTITUTION),
    ));

    // Player: camera rig + capsule avatar.
    let camera = commands
        .spawn((Camera3d::default(), LookAngles::default()))
        .id();

    let config = LocomotionConfig::player();
    let avatar = spawn_avatar(&mut commands, camera, SPAWN_POSITION, config);
    commands.entity(avatar).insert((
        Rapier3dAvatarBundle::from_config(&config),
        Mesh3d(meshes.add(Capsule3d::new(
            config.capsule_radius,
            2.0 * (config.capsule_half_height - config.capsule_radius),
        ))),
        MeshMaterial3d(materials.add(Color::srgb(0.3, 0.4, 0.8))),
    ));
}

// ==================== Systems ====================

/// Grab the cursor on click, release it on Escape.
fn cursor_grab(
    mut q_window: Query<&mut Window, With<PrimaryWindow>>,
    mouse: Res<ButtonInput<MouseButton>>,
    keyboard: Res<ButtonInput<KeyCode>>,
) {
    let Ok(mut window) = q_window.single_mut() else {
        return;
    };

    if mouse.just_pressed(MouseButton::Left) {
        window.cursor_options.grab_mode = CursorGrabMode::Locked;
        window.cursor_options.visible = false;
    }
    if keyboard.just_pressed(KeyCode::Escape) {
        window.cursor_options.grab_mode = CursorGrabMode::None;
        window.cursor_options.visible = true;
    }
}

/// Pointer-driven yaw/pitch on the rig camera.
///
/// Only the camera's rotation changes; its translation stays at the
/// eye offset set when the rig was attached.
fn mouse_look(
    q_window: Query<&Window, With<PrimaryWindow>>,
    mut motion: EventReader<MouseMotion>,
    mut q_camera: Query<(&mut Transform, &mut LookAngles)>,
) {
    let grabbed = q_window
        .single()
        .map(|w| w.cursor_options.grab_mode == CursorGrabMode::Locked)
        .unwrap_or(false);
    if !grabbed {
        motion.clear();
        return;
    }

    let mut delta = Vec2::ZERO;
    for event in motion.read() {
        delta += event.delta;
    }
    if delta == Vec2::ZERO {
        return;
    }

    for (mut transform, mut look) in &mut q_camera {
        look.yaw -= delta.x * MOUSE_SENSITIVITY;
        look.pitch = (look.pitch - delta.y * MOUSE_SENSITIVITY).clamp(-PITCH_LIMIT, PITCH_LIMIT);
        transform.rotation = Quat::from_euler(EulerRot::YXZ, look.yaw, look.pitch, 0.0);
    }
}

/// Put the avatar back at the spawn point if it falls off the slab.
fn respawn_fallen(mut q_avatar: Query<(&mut Transform, &mut Velocity), With<PlayerAvatar>>) {
    for (mut transform, mut velocity) in &mut q_avatar {
        if transform.translation.y < KILL_PLANE_Y {
            transform.translation = SPAWN_POSITION;
            *velocity = Velocity::zero();
        }
    }
}

/// Overlay panel: fps readout, click counter, dispose button.
fn overlay(
    mut contexts: EguiContexts,
    diagnostics: Res<DiagnosticsStore>,
    mut state: ResMut<OverlayState>,
) {
    if state.disposed {
        return;
    }
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    let fps = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(|d| d.smoothed())
        .unwrap_or(0.0);

    egui::Window::new("Playground")
        .anchor(egui::Align2::LEFT_TOP, [20.0, 20.0])
        .resizable(false)
        .collapsible(false)
        .show(ctx, |ui| {
            ui.label(format!("{fps:.0} fps"));
            ui.label("Click to grab the cursor, Escape to release.");
            if ui
                .button(format!("Click me ({})", state.counter))
                .clicked()
            {
                state.counter += 1;
            }
            if ui.button("Dispose GUI").clicked() {
                state.disposed = true;
            }
        });
}
