//! Rapier3D physics backend implementation.
//!
//! This module provides the physics backend for Bevy Rapier3D.
//! Enable with the `rapier3d` feature (default).

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::backend::LocomotionPhysicsBackend;
use crate::config::LocomotionConfig;
use crate::detection::GroundContact;
use crate::input::{InputState, KeyBindings};
use crate::rig::PlayerAvatar;
use crate::LocomotionSet;

/// Rapier3D physics backend for the locomotion solver.
///
/// Velocity access goes through Rapier's [`Velocity`] component; the
/// ground probe is a dedicated system that raycasts through
/// [`ReadRapierContext`] in the Probe phase.
pub struct Rapier3dBackend;

impl LocomotionPhysicsBackend for Rapier3dBackend {
    fn plugin() -> impl Plugin {
        Rapier3dBackendPlugin
    }

    fn get_velocity(world: &World, entity: Entity) -> Vec3 {
        world
            .get::<Velocity>(entity)
            .map(|v| v.linvel)
            .unwrap_or(Vec3::ZERO)
    }

    fn set_velocity(world: &mut World, entity: Entity, velocity: Vec3) {
        if let Some(mut vel) = world.get_mut::<Velocity>(entity) {
            vel.linvel = velocity;
        }
    }

    fn get_position(world: &World, entity: Entity) -> Vec3 {
        world
            .get::<Transform>(entity)
            .map(|t| t.translation)
            .or_else(|| {
                world
                    .get::<GlobalTransform>(entity)
                    .map(|t| t.translation())
            })
            .unwrap_or(Vec3::ZERO)
    }
}

/// Plugin that sets up the Rapier3D ground probe for the solver.
pub struct Rapier3dBackendPlugin;

impl Plugin for Rapier3dBackendPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            rapier_ground_probe.in_set(LocomotionSet::Probe),
        );
    }
}

/// Physics components for a rapier-backed avatar body.
///
/// Spawns as a dynamic rigid body with a capsule collider sized from
/// the locomotion config and all rotation axes locked, so the capsule
/// can never tip over.
#[derive(Bundle)]
pub struct Rapier3dAvatarBundle {
    /// Dynamic body integrated by rapier.
    pub rigid_body: RigidBody,
    /// Linear/angular velocity, written by the solver each tick.
    pub velocity: Velocity,
    /// Rotation locked on all axes to keep the capsule upright.
    pub locked_axes: LockedAxes,
    /// Vertical capsule collider.
    pub collider: Collider,
}

impl Rapier3dAvatarBundle {
    /// Build the body components from a locomotion config.
    pub fn from_config(config: &LocomotionConfig) -> Self {
        // capsule_y takes the half length of the cylindrical segment;
        // the config stores half of the total extent including caps.
        let segment_half = (config.capsule_half_height - config.capsule_radius).max(0.0);
        Self {
            rigid_body: RigidBody::Dynamic,
            velocity: Velocity::zero(),
            locked_axes: LockedAxes::ROTATION_LOCKED,
            collider: Collider::capsule_y(segment_half, config.capsule_radius),
        }
    }
}

/// Ground probe: a short downward raycast from the body center.
///
/// Runs before the solver every tick, but only casts on ticks where
/// the avatar's jump key is held; on other ticks the contact resets to
/// "not probed". The solver only consults the contact for jump
/// arbitration, so idle ticks skip the ray entirely.
///
/// The ray excludes the avatar's own body and sensor colliders, and a
/// hit at exactly the probe length counts as grounded (inclusive).
fn rapier_ground_probe(
    rapier_context: ReadRapierContext,
    mut q_avatars: Query<
        (
            Entity,
            &GlobalTransform,
            &LocomotionConfig,
            &InputState,
            &KeyBindings,
            &mut GroundContact,
        ),
        With<PlayerAvatar>,
    >,
) {
    let Ok(context) = rapier_context.single() else {
        return;
    };

    for (entity, transform, config, input, bindings, mut contact) in &mut q_avatars {
        if !input.is_held(&bindings.jump) {
            *contact = GroundContact::default();
            continue;
        }

        let origin = transform.translation();
        let filter = QueryFilter::default()
            .exclude_rigid_body(entity)
            .exclude_sensors();

        *contact = match context.cast_ray(
            origin,
            Vec3::NEG_Y,
            config.probe_length(),
            true, // solid
            filter,
        ) {
            Some((_, toi)) => GroundContact::hit(toi),
            None => GroundContact::miss(),
        };
    }
}
