//! The locomotion solver.
//!
//! Runs once per simulation tick, after the ground probe and before
//! the physics world integrates velocities. It fuses the avatar's
//! input state, the rig camera's orientation, and the current vertical
//! velocity into a new linear velocity:
//!
//! 1. Flatten the camera's forward/right axes onto the horizontal
//!    plane, so look pitch never bleeds into movement.
//! 2. Accumulate a direction from the held directional keys (opposing
//!    keys cancel) and normalize it, so diagonals aren't faster.
//! 3. Scale by the configured walk speed and write it back with the
//!    body's vertical velocity preserved; gravity integration stays
//!    with the physics engine.
//! 4. While the jump key is held: if the ground probe hit and the
//!    vertical velocity is near zero, set it to the jump speed. The
//!    threshold makes jumps single-shot per ground contact without an
//!    explicit airborne state machine.
//!
//! A missing camera or body makes the tick a silent no-op.

use bevy::prelude::*;

use crate::backend::LocomotionPhysicsBackend;
use crate::config::LocomotionConfig;
use crate::detection::GroundContact;
use crate::input::{InputState, KeyBindings};
use crate::rig::{CameraRig, PlayerAvatar};

/// Project a direction onto the horizontal plane and renormalize.
///
/// Returns `Vec3::ZERO` for vectors with no horizontal component
/// (straight up/down or zero).
pub fn flatten_to_plane(direction: Vec3) -> Vec3 {
    Vec3::new(direction.x, 0.0, direction.z).normalize_or_zero()
}

/// Accumulate the movement direction from the held directional keys.
///
/// `forward` and `right` must already be flattened unit vectors.
/// Opposing keys cancel arithmetically; the result is normalized, so
/// its magnitude is 1.0 whenever any net direction remains and 0.0
/// otherwise.
pub fn movement_direction(
    forward: Vec3,
    right: Vec3,
    input: &InputState,
    bindings: &KeyBindings,
) -> Vec3 {
    let mut direction = Vec3::ZERO;
    if input.is_held(&bindings.forward) {
        direction += forward;
    }
    if input.is_held(&bindings.backward) {
        direction -= forward;
    }
    if input.is_held(&bindings.strafe_right) {
        direction += right;
    }
    if input.is_held(&bindings.strafe_left) {
        direction -= right;
    }
    direction.normalize_or_zero()
}

/// Per-tick locomotion solve for every [`PlayerAvatar`].
///
/// Exclusive so it can read camera transforms and drive the backend's
/// velocity accessors in one pass. Must run in
/// [`LocomotionSet::Solve`](crate::LocomotionSet::Solve), after the
/// backend's ground probe.
pub fn apply_locomotion<B: LocomotionPhysicsBackend>(world: &mut World) {
    let avatars: Vec<(
        Entity,
        LocomotionConfig,
        KeyBindings,
        InputState,
        CameraRig,
        GroundContact,
    )> = world
        .query_filtered::<(
            Entity,
            &LocomotionConfig,
            &KeyBindings,
            &InputState,
            &CameraRig,
            &GroundContact,
        ), With<PlayerAvatar>>()
        .iter(world)
        .map(|(entity, config, bindings, input, rig, contact)| {
            (
                entity,
                *config,
                bindings.clone(),
                input.clone(),
                *rig,
                *contact,
            )
        })
        .collect();

    for (entity, config, bindings, input, rig, contact) in avatars {
        // The rig camera may have been despawned; skip the tick.
        let Some(camera_transform) = world.get::<Transform>(rig.camera).copied() else {
            continue;
        };

        // The body's rotation is locked upright, so the camera's local
        // rotation is also its world look direction.
        let forward = flatten_to_plane(*camera_transform.forward());
        let right = flatten_to_plane(*camera_transform.right());

        let direction = movement_direction(forward, right, &input, &bindings);

        let velocity = B::get_velocity(world, entity);
        let mut new_velocity = direction * config.walk_speed;
        new_velocity.y = velocity.y;
        B::set_velocity(world, entity, new_velocity);

        if input.is_held(&bindings.jump)
            && contact.probed
            && contact.grounded
            && velocity.y.abs() < config.vertical_rest_threshold
        {
            new_velocity.y = config.jump_speed;
            B::set_velocity(world, entity, new_velocity);
        }
    }
}
