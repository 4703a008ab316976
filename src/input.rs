//! Keyboard input state tracking.
//!
//! [`InputState`] is a per-avatar map from key identifier to held
//! state, mutated by [`track_keyboard_input`] as keyboard events
//! arrive and read by the solver on the next tick. Each avatar owns
//! its own map, so multiple controllers stay independent.
//!
//! Key identity is case-insensitive: identifiers are lowercased both
//! when stored and when queried. There is no debouncing or repeat
//! suppression; a held key stays `true` until its release event.

use std::collections::HashMap;

use bevy::input::keyboard::{Key, KeyboardInput};
use bevy::input::ButtonState;
use bevy::prelude::*;

/// Held/released state for every key seen so far, keyed by lowercase
/// identifier.
///
/// Only [`track_keyboard_input`] should mutate this during play; the
/// solver treats it as read-only. A key that was never pressed reads
/// as not held.
#[derive(Component, Reflect, Debug, Clone, Default)]
#[reflect(Component)]
pub struct InputState {
    held: HashMap<String, bool>,
}

impl InputState {
    /// Mark a key as held.
    pub fn press(&mut self, key: &str) {
        self.held.insert(key.to_lowercase(), true);
    }

    /// Mark a key as released.
    pub fn release(&mut self, key: &str) {
        self.held.insert(key.to_lowercase(), false);
    }

    /// Whether a key is currently held. Unknown keys read as `false`.
    pub fn is_held(&self, key: &str) -> bool {
        self.held
            .get(&key.to_lowercase())
            .copied()
            .unwrap_or(false)
    }

    /// Forget all key states.
    pub fn clear(&mut self) {
        self.held.clear();
    }
}

/// Key identifiers for the five locomotion actions.
///
/// Identifiers are compared case-insensitively against [`InputState`].
/// Defaults are WASD plus space.
#[derive(Component, Reflect, Debug, Clone, PartialEq, Eq)]
#[reflect(Component)]
pub struct KeyBindings {
    /// Move along the camera's flattened forward direction.
    pub forward: String,
    /// Move against the camera's flattened forward direction.
    pub backward: String,
    /// Strafe along the camera's flattened left direction.
    pub strafe_left: String,
    /// Strafe along the camera's flattened right direction.
    pub strafe_right: String,
    /// Request a jump while held.
    pub jump: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            forward: "w".into(),
            backward: "s".into(),
            strafe_left: "a".into(),
            strafe_right: "d".into(),
            jump: "space".into(),
        }
    }
}

/// Map a logical key to its lowercase string identifier.
///
/// Character keys map to their lowercased text; a handful of named
/// keys useful for locomotion bindings get stable names. Anything else
/// is ignored by the tracker.
pub fn key_identifier(key: &Key) -> Option<String> {
    match key {
        Key::Character(text) => Some(text.to_lowercase()),
        Key::Space => Some("space".into()),
        Key::Shift => Some("shift".into()),
        Key::Control => Some("control".into()),
        Key::ArrowUp => Some("arrowup".into()),
        Key::ArrowDown => Some("arrowdown".into()),
        Key::ArrowLeft => Some("arrowleft".into()),
        Key::ArrowRight => Some("arrowright".into()),
        _ => None,
    }
}

/// Absorb keyboard press/release events into every [`InputState`].
///
/// Runs in `Update`; the solver reads the resulting state from
/// `FixedUpdate` on the next tick. Key repeats re-assert the held
/// state, which is harmless.
pub fn track_keyboard_input(
    mut events: EventReader<KeyboardInput>,
    mut q_input: Query<&mut InputState>,
) {
    for event in events.read() {
        let Some(identifier) = key_identifier(&event.logical_key) else {
            continue;
        };
        for mut input in &mut q_input {
            match event.state {
                ButtonState::Pressed => input.press(&identifier),
                ButtonState::Released => input.release(&identifier),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_key_reads_as_not_held() {
        let input = InputState::default();
        assert!(!input.is_held("w"));
    }

    #[test]
    fn press_then_release() {
        let mut input = InputState::default();
        input.press("w");
        assert!(input.is_held("w"));

        input.release("w");
        assert!(!input.is_held("w"));
    }

    #[test]
    fn key_identity_is_case_insensitive() {
        let mut input = InputState::default();
        input.press("W");
        assert!(input.is_held("w"));
        assert!(input.is_held("W"));

        input.release("w");
        assert!(!input.is_held("W"));
    }

    #[test]
    fn held_keys_are_independent() {
        let mut input = InputState::default();
        input.press("w");
        input.press("d");
        input.release("w");

        assert!(!input.is_held("w"));
        assert!(input.is_held("d"));
    }

    #[test]
    fn clear_forgets_everything() {
        let mut input = InputState::default();
        input.press("space");
        input.clear();
        assert!(!input.is_held("space"));
    }

    #[test]
    fn character_keys_map_lowercased() {
        assert_eq!(
            key_identifier(&Key::Character("W".into())),
            Some("w".to_string())
        );
        assert_eq!(
            key_identifier(&Key::Character("d".into())),
            Some("d".to_string())
        );
    }

    #[test]
    fn named_keys_have_stable_identifiers() {
        assert_eq!(key_identifier(&Key::Space), Some("space".to_string()));
        assert_eq!(
            key_identifier(&Key::ArrowLeft),
            Some("arrowleft".to_string())
        );
        assert_eq!(key_identifier(&Key::Alt), None);
    }

    #[test]
    fn default_bindings_are_wasd_space() {
        let bindings = KeyBindings::default();
        assert_eq!(bindings.forward, "w");
        assert_eq!(bindings.backward, "s");
        assert_eq!(bindings.strafe_left, "a");
        assert_eq!(bindings.strafe_right, "d");
        assert_eq!(bindings.jump, "space");
    }
}
