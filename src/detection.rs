//! Ground contact probing results.
//!
//! The ground probe casts a short ray straight down from the body
//! center, excluding the avatar's own collider. The cast itself is
//! backend-specific (see the backend plugins); this module holds the
//! transient per-tick result the solver reads.
//!
//! The probe only runs on ticks where the jump key is held, since the
//! solver only consults it for jumps. On every other tick it resets to
//! "not probed" so a stale hit can never leak into a later jump check.

use bevy::prelude::*;

/// Result of the most recent ground probe.
///
/// Recomputed (or reset) every tick by the backend's probe system
/// before the solver runs. `distance` is measured from the body center
/// along the ray; a hit at exactly the probe length counts as grounded.
#[derive(Component, Reflect, Debug, Clone, Copy, Default, PartialEq)]
#[reflect(Component)]
pub struct GroundContact {
    /// Whether the probe ran this tick. `false` means `grounded` and
    /// `distance` are meaningless leftovers.
    pub probed: bool,
    /// Whether the ray struck supporting geometry within range.
    pub grounded: bool,
    /// Distance from the body center to the impact point, if grounded.
    pub distance: f32,
}

impl GroundContact {
    /// A probe that struck geometry at the given distance.
    pub fn hit(distance: f32) -> Self {
        Self {
            probed: true,
            grounded: true,
            distance,
        }
    }

    /// A probe that found nothing within range.
    pub fn miss() -> Self {
        Self {
            probed: true,
            grounded: false,
            distance: 0.0,
        }
    }
}
