//! Physics backend abstraction.
//!
//! This module defines the trait that physics backends must implement
//! to work with the locomotion solver. The solver never touches
//! engine-native body or vector types; it only sees this minimal
//! body-capability surface, so it can be tested against a fake backend
//! and swapped between physics engines (Rapier3D included).

use bevy::prelude::*;

/// Trait for physics backend implementations.
///
/// The solver reads and writes linear velocity through this trait and
/// delegates everything engine-specific (ground raycasts, body setup,
/// integration ordering) to the plugin returned by [`plugin`].
///
/// All accessors degrade silently: a missing body component reads as a
/// zero vector and writes to it are dropped. The solver relies on this
/// to be a no-op on ticks where the avatar has no body yet.
///
/// [`plugin`]: LocomotionPhysicsBackend::plugin
pub trait LocomotionPhysicsBackend: 'static + Send + Sync {
    /// Returns the plugin that sets up this backend.
    ///
    /// Backend plugins register their ground-probe system in
    /// [`LocomotionSet::Probe`](crate::LocomotionSet::Probe) so the
    /// contact result is fresh when the solver runs.
    fn plugin() -> impl Plugin;

    /// Get the current linear velocity of an entity's body.
    ///
    /// Returns `Vec3::ZERO` if the entity has no body.
    fn get_velocity(world: &World, entity: Entity) -> Vec3;

    /// Set the linear velocity of an entity's body.
    ///
    /// Does nothing if the entity has no body.
    fn set_velocity(world: &mut World, entity: Entity, velocity: Vec3);

    /// Get the current world position of an entity's body.
    ///
    /// Returns `Vec3::ZERO` if the entity has no transform.
    fn get_position(world: &World, entity: Entity) -> Vec3;
}

/// Empty plugin for backends that don't need additional setup.
pub struct NoOpBackendPlugin;

impl Plugin for NoOpBackendPlugin {
    fn build(&self, _app: &mut App) {}
}
