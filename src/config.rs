//! Locomotion configuration.
//!
//! [`LocomotionConfig`] holds the tuning parameters for one avatar:
//! walk speed, jump speed, the vertical-rest threshold that gates
//! jumps, capsule dimensions, the ground-probe margin, and the camera
//! eye offset.

use bevy::prelude::*;

/// Tuning parameters for a locomotion-controlled avatar.
///
/// Defaults match a human-scale capsule: 1.0 units tall with a 0.3
/// radius, walking at 3 units/s and jumping at 5 units/s.
#[derive(Component, Reflect, Debug, Clone, Copy, PartialEq)]
#[reflect(Component)]
pub struct LocomotionConfig {
    /// Horizontal speed while any directional key is held, in units/s.
    ///
    /// Control is velocity-based: this speed is reached instantly, with
    /// no acceleration ramp.
    pub walk_speed: f32,
    /// Vertical speed set when a jump fires, in units/s.
    pub jump_speed: f32,
    /// A jump is only allowed while the magnitude of the body's
    /// vertical velocity is below this threshold. Guards against
    /// re-triggering mid-bounce or right after takeoff.
    pub vertical_rest_threshold: f32,
    /// Half of the capsule's total vertical extent, measured from the
    /// body center to the lowest point.
    pub capsule_half_height: f32,
    /// Radius of the capsule collider.
    pub capsule_radius: f32,
    /// Extra length added to the ground probe beyond the capsule's
    /// half height. A hit at exactly the full probe length still
    /// counts as grounded.
    pub probe_margin: f32,
    /// Local offset of the rig camera from the body center (eye
    /// height).
    pub eye_offset: Vec3,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            walk_speed: 3.0,
            jump_speed: 5.0,
            vertical_rest_threshold: 0.2,
            capsule_half_height: 0.5,
            capsule_radius: 0.3,
            probe_margin: 0.1,
            eye_offset: Vec3::new(0.0, 0.4, 0.0),
        }
    }
}

impl LocomotionConfig {
    /// Default configuration for a player-controlled avatar.
    pub fn player() -> Self {
        Self::default()
    }

    /// Set the horizontal walk speed.
    pub fn with_walk_speed(mut self, speed: f32) -> Self {
        self.walk_speed = speed;
        self
    }

    /// Set the vertical jump speed.
    pub fn with_jump_speed(mut self, speed: f32) -> Self {
        self.jump_speed = speed;
        self
    }

    /// Set the vertical-rest threshold that gates jumps.
    pub fn with_vertical_rest_threshold(mut self, threshold: f32) -> Self {
        self.vertical_rest_threshold = threshold;
        self
    }

    /// Set the capsule dimensions (half of total height, radius).
    pub fn with_capsule(mut self, half_height: f32, radius: f32) -> Self {
        self.capsule_half_height = half_height;
        self.capsule_radius = radius;
        self
    }

    /// Set the ground-probe margin.
    pub fn with_probe_margin(mut self, margin: f32) -> Self {
        self.probe_margin = margin;
        self
    }

    /// Set the camera eye offset.
    pub fn with_eye_offset(mut self, offset: Vec3) -> Self {
        self.eye_offset = offset;
        self
    }

    /// Total length of the downward ground probe, measured from the
    /// body center.
    pub fn probe_length(&self) -> f32 {
        self.capsule_half_height + self.probe_margin
    }
}
