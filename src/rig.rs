//! Camera-body coupling and avatar construction.
//!
//! The rig camera is parented to the avatar body once, at construction,
//! with its local transform reset to the configured eye offset and a
//! forward-facing rotation. From then on transform propagation keeps
//! the camera's world position equal to body position + offset; the
//! controller never re-parents or repositions it.
//!
//! Look rotation (yaw/pitch) is driven by pointer input outside this
//! crate and lives on the camera's local transform, independent of the
//! body's (locked) orientation.

use bevy::prelude::*;

use crate::config::LocomotionConfig;
use crate::detection::GroundContact;
use crate::input::{InputState, KeyBindings};

/// Marker for a locomotion-controlled avatar body.
#[derive(Component, Reflect, Debug, Clone, Copy, Default)]
#[reflect(Component)]
pub struct PlayerAvatar;

/// Points an avatar at its rig camera.
///
/// The solver reads the camera's transform for the look direction;
/// if the camera entity is gone, the avatar's tick is a no-op.
#[derive(Component, Debug, Clone, Copy)]
pub struct CameraRig {
    /// The camera entity parented to this avatar.
    pub camera: Entity,
}

/// Spawn a locomotion-controlled avatar and attach the given camera.
///
/// This is the single construction call exposed to the application:
/// it spawns the avatar entity at `position` with the controller
/// components (input map, bindings, ground contact, config) and
/// parents `camera` to it at the config's eye offset with rotation
/// reset to the forward-facing pose.
///
/// Physics body components are backend-specific and are added by the
/// caller, e.g. `Rapier3dAvatarBundle::from_config(&config)`.
pub fn spawn_avatar(
    commands: &mut Commands,
    camera: Entity,
    position: Vec3,
    config: LocomotionConfig,
) -> Entity {
    let eye_offset = config.eye_offset;
    let avatar = commands
        .spawn((
            PlayerAvatar,
            config,
            KeyBindings::default(),
            InputState::default(),
            GroundContact::default(),
            CameraRig { camera },
            Transform::from_translation(position),
            Visibility::default(),
        ))
        .id();

    commands.entity(avatar).add_child(camera);
    commands
        .entity(camera)
        .insert(Transform::from_translation(eye_offset));

    avatar
}
