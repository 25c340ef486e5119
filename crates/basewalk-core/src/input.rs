//! Keyboard and pointer input.
//!
//! Host events mutate an [`InputState`] between frames. Once per frame the
//! frame loop calls [`InputState::snapshot`], which freezes the held keys,
//! drains key-down edges and drains the accumulated pointer delta into an
//! [`InputSnapshot`]. The step only ever sees the snapshot.
//!
//! Key-down edges are recorded on the up-to-down transition only, so OS key
//! auto-repeat cannot re-trigger a jump while the key stays held.
//!
//! ```
//! use basewalk_core::input::{InputState, Key};
//!
//! let mut input = InputState::new();
//! input.key_down("W");
//! input.key_down(" ");
//!
//! let snap = input.snapshot();
//! assert!(snap.is_held(Key::Forward));
//! assert!(snap.was_pressed(Key::Jump));
//!
//! // The edge is consumed; the key is still held.
//! let snap = input.snapshot();
//! assert!(snap.is_held(Key::Jump));
//! assert!(!snap.was_pressed(Key::Jump));
//! ```

use std::collections::HashSet;

use bitflags::bitflags;
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::LookConfig;

/// Logical keys the step understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    /// `w` / `ArrowUp`
    Forward,
    /// `s` / `ArrowDown`
    Back,
    /// `a` / `ArrowLeft`
    Left,
    /// `d` / `ArrowRight`
    Right,
    /// Space bar
    Jump,
    /// Shift
    Run,
}

impl Key {
    /// Maps a browser-style key name to a logical key.
    ///
    /// Matching is case-insensitive. Unmapped names return `None`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let key = match name.to_ascii_lowercase().as_str() {
            "w" | "arrowup" => Self::Forward,
            "s" | "arrowdown" => Self::Back,
            "a" | "arrowleft" => Self::Left,
            "d" | "arrowright" => Self::Right,
            " " | "space" | "spacebar" => Self::Jump,
            "shift" => Self::Run,
            _ => return None,
        };
        Some(key)
    }

    const fn bit(self) -> Keys {
        match self {
            Self::Forward => Keys::FORWARD,
            Self::Back => Keys::BACK,
            Self::Left => Keys::LEFT,
            Self::Right => Keys::RIGHT,
            Self::Jump => Keys::JUMP,
            Self::Run => Keys::RUN,
        }
    }
}

bitflags! {
    /// Set of logical keys.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct Keys: u8 {
        /// Move forward
        const FORWARD = 1 << 0;
        /// Move back
        const BACK = 1 << 1;
        /// Move left
        const LEFT = 1 << 2;
        /// Move right
        const RIGHT = 1 << 3;
        /// Jump
        const JUMP = 1 << 4;
        /// Run modifier
        const RUN = 1 << 5;
    }
}

impl From<Key> for Keys {
    fn from(key: Key) -> Self {
        key.bit()
    }
}

// =============================================================================
// InputState
// =============================================================================

/// Event-fed input accumulator owned by the host.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Lowercased names of the physical keys currently down.
    held_names: HashSet<String>,
    held: Keys,
    pressed: Keys,
    pointer_delta: Vec2,
    pointer_locked: bool,
}

impl InputState {
    /// Creates an input state with nothing held.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Handles a key-down event by key name. Unmapped names are ignored.
    ///
    /// An edge is recorded only when the logical key goes from up to down,
    /// so a second alias of an already held key adds no edge.
    pub fn key_down(&mut self, name: &str) {
        let name = name.to_ascii_lowercase();
        let Some(key) = Key::from_name(&name) else {
            return;
        };
        let bit = key.bit();
        if !self.held.contains(bit) {
            self.pressed.insert(bit);
        }
        self.held.insert(bit);
        self.held_names.insert(name);
    }

    /// Handles a key-up event by key name. Unmapped names are ignored.
    ///
    /// The logical key stays held while any other name mapping to it is down.
    pub fn key_up(&mut self, name: &str) {
        let name = name.to_ascii_lowercase();
        let Some(key) = Key::from_name(&name) else {
            return;
        };
        self.held_names.remove(&name);
        let alias_held = self
            .held_names
            .iter()
            .any(|held| Key::from_name(held) == Some(key));
        if !alias_held {
            self.held.remove(key.bit());
        }
    }

    /// Handles a pointer-lock state change. Unlocking drops any pending delta.
    pub fn set_pointer_lock(&mut self, locked: bool) {
        self.pointer_locked = locked;
        if !locked {
            self.pointer_delta = Vec2::ZERO;
        }
    }

    /// Whether the pointer is currently locked.
    #[must_use]
    pub fn pointer_locked(&self) -> bool {
        self.pointer_locked
    }

    /// Accumulates a relative pointer movement. Ignored unless locked.
    pub fn pointer_move(&mut self, dx: f32, dy: f32) {
        if self.pointer_locked {
            self.pointer_delta += Vec2::new(dx, dy);
        }
    }

    /// Releases every key, e.g. when the page loses focus.
    pub fn clear(&mut self) {
        self.held_names.clear();
        self.held = Keys::empty();
        self.pressed = Keys::empty();
        self.pointer_delta = Vec2::ZERO;
    }

    /// Freezes the current input for one frame and drains edges and deltas.
    pub fn snapshot(&mut self) -> InputSnapshot {
        let snapshot = InputSnapshot {
            held: self.held,
            pressed: self.pressed,
            pointer_delta: self.pointer_delta,
        };
        self.pressed = Keys::empty();
        self.pointer_delta = Vec2::ZERO;
        snapshot
    }
}

// =============================================================================
// InputSnapshot
// =============================================================================

/// Immutable per-frame view of the input.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct InputSnapshot {
    /// Keys held when the snapshot was taken.
    pub held: Keys,
    /// Keys that went down since the previous snapshot.
    pub pressed: Keys,
    /// Pointer movement since the previous snapshot.
    pub pointer_delta: Vec2,
}

impl InputSnapshot {
    /// Snapshot with nothing held.
    #[must_use]
    pub fn idle() -> Self {
        Self::default()
    }

    /// Snapshot holding `keys` with no new edges.
    #[must_use]
    pub fn holding(keys: Keys) -> Self {
        Self {
            held: keys,
            ..Self::default()
        }
    }

    /// Adds key-down edges (which also count as held).
    #[must_use]
    pub fn with_pressed(mut self, keys: Keys) -> Self {
        self.pressed |= keys;
        self.held |= keys;
        self
    }

    /// Sets the pointer delta.
    #[must_use]
    pub fn with_pointer_delta(mut self, delta: Vec2) -> Self {
        self.pointer_delta = delta;
        self
    }

    /// Whether `key` was held.
    #[must_use]
    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(key.bit())
    }

    /// Whether `key` went down this frame.
    #[must_use]
    pub fn was_pressed(&self, key: Key) -> bool {
        self.pressed.contains(key.bit())
    }
}

// =============================================================================
// Mouse look
// =============================================================================

/// Yaw/pitch view orientation driven by pointer deltas.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LookState {
    /// Rotation about +y (radians). Positive turns left.
    pub yaw: f32,
    /// Rotation about the view x axis (radians). Positive looks up.
    pub pitch: f32,
}

impl LookState {
    /// Applies a pointer delta scaled by the configured sensitivity.
    ///
    /// Moving the pointer right turns right and moving it down looks down.
    /// Pitch is clamped to `±pitch_limit`.
    pub fn apply(&mut self, delta: Vec2, config: &LookConfig) {
        if delta == Vec2::ZERO {
            return;
        }
        self.yaw -= delta.x * config.sensitivity;
        self.pitch = (self.pitch - delta.y * config.sensitivity)
            .clamp(-config.pitch_limit, config.pitch_limit);
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    mod key_name_tests {
        use super::*;

        #[test]
        fn letters_and_arrows_map_to_same_key() {
            assert_eq!(Key::from_name("w"), Some(Key::Forward));
            assert_eq!(Key::from_name("ArrowUp"), Some(Key::Forward));
            assert_eq!(Key::from_name("S"), Some(Key::Back));
            assert_eq!(Key::from_name("arrowleft"), Some(Key::Left));
            assert_eq!(Key::from_name("D"), Some(Key::Right));
            assert_eq!(Key::from_name(" "), Some(Key::Jump));
            assert_eq!(Key::from_name("Spacebar"), Some(Key::Jump));
            assert_eq!(Key::from_name("Shift"), Some(Key::Run));
        }

        #[test]
        fn unmapped_names_are_none() {
            assert_eq!(Key::from_name("q"), None);
            assert_eq!(Key::from_name("Escape"), None);
            assert_eq!(Key::from_name(""), None);
        }
    }

    mod state_tests {
        use super::*;

        #[test]
        fn unmapped_keys_are_ignored() {
            let mut input = InputState::new();
            input.key_down("F5");
            input.key_up("Tab");
            assert_eq!(input.snapshot(), InputSnapshot::idle());
        }

        #[test]
        fn release_clears_held() {
            let mut input = InputState::new();
            input.key_down("a");
            input.key_up("A");
            let snap = input.snapshot();
            assert!(!snap.is_held(Key::Left));
            // The edge still happened between frames.
            assert!(snap.was_pressed(Key::Left));
        }

        #[test]
        fn releasing_one_alias_keeps_key_held() {
            let mut input = InputState::new();
            input.key_down("w");
            input.key_down("ArrowUp");
            let snap = input.snapshot();
            assert!(snap.was_pressed(Key::Forward));

            input.key_up("ArrowUp");
            let snap = input.snapshot();
            assert!(snap.is_held(Key::Forward));
            assert!(!snap.was_pressed(Key::Forward));

            input.key_up("W");
            assert!(!input.snapshot().is_held(Key::Forward));
        }

        #[test]
        fn second_alias_adds_no_edge() {
            let mut input = InputState::new();
            input.key_down(" ");
            let _ = input.snapshot();
            input.key_down("Space");
            let snap = input.snapshot();
            assert!(snap.is_held(Key::Jump));
            assert!(!snap.was_pressed(Key::Jump));
        }

        #[test]
        fn auto_repeat_does_not_create_new_edge() {
            let mut input = InputState::new();
            input.key_down(" ");
            assert!(input.snapshot().was_pressed(Key::Jump));

            input.key_down(" ");
            input.key_down(" ");
            let snap = input.snapshot();
            assert!(snap.is_held(Key::Jump));
            assert!(!snap.was_pressed(Key::Jump));
        }

        #[test]
        fn re_press_after_release_creates_edge() {
            let mut input = InputState::new();
            input.key_down(" ");
            let _ = input.snapshot();
            input.key_up(" ");
            input.key_down(" ");
            assert!(input.snapshot().was_pressed(Key::Jump));
        }

        #[test]
        fn pointer_delta_requires_lock() {
            let mut input = InputState::new();
            input.pointer_move(10.0, 5.0);
            assert_eq!(input.snapshot().pointer_delta, Vec2::ZERO);

            input.set_pointer_lock(true);
            input.pointer_move(10.0, 5.0);
            input.pointer_move(2.0, -1.0);
            assert_eq!(input.snapshot().pointer_delta, Vec2::new(12.0, 4.0));
            assert_eq!(input.snapshot().pointer_delta, Vec2::ZERO);
        }

        #[test]
        fn unlock_drops_pending_delta() {
            let mut input = InputState::new();
            input.set_pointer_lock(true);
            input.pointer_move(10.0, 5.0);
            input.set_pointer_lock(false);
            assert!(!input.pointer_locked());
            assert_eq!(input.snapshot().pointer_delta, Vec2::ZERO);
        }

        #[test]
        fn clear_releases_everything() {
            let mut input = InputState::new();
            input.key_down("w");
            input.key_down("shift");
            input.clear();
            assert_eq!(input.snapshot(), InputSnapshot::idle());
        }
    }

    mod snapshot_tests {
        use super::*;

        #[test]
        fn pressed_implies_held() {
            let snap = InputSnapshot::idle().with_pressed(Keys::JUMP);
            assert!(snap.is_held(Key::Jump));
            assert!(snap.was_pressed(Key::Jump));
        }

        #[test]
        fn holding_has_no_edges() {
            let snap = InputSnapshot::holding(Keys::FORWARD | Keys::RUN);
            assert!(snap.is_held(Key::Forward));
            assert!(snap.is_held(Key::Run));
            assert!(!snap.was_pressed(Key::Forward));
        }
    }

    mod look_tests {
        use super::*;

        #[test]
        fn pointer_right_turns_right() {
            let mut look = LookState::default();
            look.apply(Vec2::new(100.0, 0.0), &LookConfig::default());
            assert!((look.yaw + 0.2).abs() < 1e-6);
            assert_eq!(look.pitch, 0.0);
        }

        #[test]
        fn pitch_is_clamped_to_vertical() {
            let config = LookConfig::default();
            let mut look = LookState::default();

            look.apply(Vec2::new(0.0, -10_000.0), &config);
            assert_eq!(look.pitch, FRAC_PI_2);

            look.apply(Vec2::new(0.0, 20_000.0), &config);
            assert_eq!(look.pitch, -FRAC_PI_2);
        }

        #[test]
        fn yaw_is_unbounded() {
            let config = LookConfig::default();
            let mut look = LookState::default();
            look.apply(Vec2::new(-10_000.0, 0.0), &config);
            assert!((look.yaw - 20.0).abs() < 1e-4);
        }
    }
}
