//! # `fps_locomotion`
//!
//! First-person capsule locomotion on top of a pluggable physics
//! backend: camera-relative walking and strafing, raycast ground
//! probing, and jump arbitration on a dynamic rigid body.
//!
//! The controller fuses three inputs every simulation tick:
//! - a per-avatar keyboard [`InputState`](input::InputState) map,
//! - the rig camera's look direction, flattened to the horizontal
//!   plane so pitch never bleeds into movement,
//! - the body's current vertical velocity, which is always preserved
//!   so gravity integration stays with the physics engine.
//!
//! Jumps fire while the jump key is held, but only when a short
//! downward raycast finds ground *and* the vertical velocity is near
//! zero. This gives single-shot semantics without an explicit airborne
//! state machine.
//!
//! ## Architecture
//!
//! Systems are generic over a [`LocomotionPhysicsBackend`] so the
//! solver never touches engine-native types. The crate ships a
//! [`bevy_rapier3d`] backend behind the `rapier3d` feature (default).
//!
//! ## Usage
//!
//! ```rust,no_run
//! use bevy::prelude::*;
//! use bevy_rapier3d::prelude::*;
//! use fps_locomotion::prelude::*;
//!
//! fn setup(mut commands: Commands) {
//!     let camera = commands.spawn(Camera3d::default()).id();
//!     let config = LocomotionConfig::player();
//!     let avatar = spawn_avatar(&mut commands, camera, Vec3::new(0.0, 4.0, 0.0), config);
//!     commands
//!         .entity(avatar)
//!         .insert(Rapier3dAvatarBundle::from_config(&config));
//! }
//!
//! App::new()
//!     .add_plugins(DefaultPlugins)
//!     .add_plugins(RapierPhysicsPlugin::<NoUserData>::default())
//!     .add_plugins(LocomotionPlugin::<Rapier3dBackend>::default())
//!     .add_systems(Startup, setup)
//!     .run();
//! ```

use bevy::input::keyboard::KeyboardInput;
use bevy::prelude::*;

pub mod backend;
pub mod config;
pub mod detection;
pub mod input;
pub mod rig;
pub mod systems;

#[cfg(feature = "rapier3d")]
pub mod rapier;

pub use backend::LocomotionPhysicsBackend;

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::backend::LocomotionPhysicsBackend;
    pub use crate::config::LocomotionConfig;
    pub use crate::detection::GroundContact;
    pub use crate::input::{InputState, KeyBindings};
    pub use crate::rig::{spawn_avatar, CameraRig, PlayerAvatar};
    pub use crate::{LocomotionPlugin, LocomotionSet};

    #[cfg(feature = "rapier3d")]
    pub use crate::rapier::{Rapier3dAvatarBundle, Rapier3dBackend};
}

/// Phases of one locomotion tick, run in order in `FixedUpdate`.
///
/// Backends put their ground probe in [`Probe`](LocomotionSet::Probe);
/// the solver runs in [`Solve`](LocomotionSet::Solve). Both run before
/// the physics world integrates velocities for the tick, so velocity
/// writes take effect the same frame.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocomotionSet {
    /// Backend ground-contact probing.
    Probe,
    /// The locomotion solve (velocity synthesis + jump arbitration).
    Solve,
}

/// Main plugin for the locomotion controller.
///
/// Generic over a physics backend `B` which provides velocity access
/// and the ground probe (e.g. [`rapier::Rapier3dBackend`]).
///
/// Keyboard events are absorbed into each avatar's input map in
/// `Update`; the probe and solver run in `FixedUpdate`, so key state
/// is eventually consistent within one frame.
pub struct LocomotionPlugin<B: LocomotionPhysicsBackend> {
    _marker: std::marker::PhantomData<B>,
}

impl<B: LocomotionPhysicsBackend> Default for LocomotionPlugin<B> {
    fn default() -> Self {
        Self {
            _marker: std::marker::PhantomData,
        }
    }
}

impl<B: LocomotionPhysicsBackend> Plugin for LocomotionPlugin<B> {
    fn build(&self, app: &mut App) {
        app.register_type::<config::LocomotionConfig>();
        app.register_type::<detection::GroundContact>();
        app.register_type::<input::InputState>();
        app.register_type::<input::KeyBindings>();
        app.register_type::<rig::PlayerAvatar>();

        // Idempotent; already present when InputPlugin is loaded, but
        // headless test apps rely on it.
        app.add_event::<KeyboardInput>();

        app.add_plugins(B::plugin());

        app.add_systems(Update, input::track_keyboard_input);

        app.configure_sets(
            FixedUpdate,
            (LocomotionSet::Probe, LocomotionSet::Solve).chain(),
        );
        app.add_systems(
            FixedUpdate,
            systems::apply_locomotion::<B>.in_set(LocomotionSet::Solve),
        );
    }
}
