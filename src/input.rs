use std::collections::HashSet;

use glam::Vec2;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// Identifier for a physical keyboard key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    Named(NamedKey),
    Character(char),
    Digit(u8),
    Function(u8),
}

/// Friendly names for the non-character keys the testbed reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NamedKey {
    Space,
    Enter,
    Tab,
    Left,
    Right,
    Up,
    Down,
    Escape,
    LeftShift,
    RightShift,
    LeftCtrl,
    RightCtrl,
    LeftAlt,
    RightAlt,
}

/// Identifier for a mouse button (left button is zero).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MouseButton(u8);

impl MouseButton {
    pub const LEFT: Self = Self(0);

    pub fn new(index: u8) -> Self {
        Self(index)
    }

    pub fn index(self) -> u8 {
        self.0
    }
}

/// Buttons on an extended gamepad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamepadButton {
    A,
    B,
    X,
    Y,
    Menu,
    Options,
    Home,
}

/// Thread-safe snapshot of keyboard, mouse and gamepad state.
///
/// Mouse deltas and scroll are accumulators: cameras drain them with the
/// `take_` methods once applied, matching how the original controllers
/// zeroed them after use.
#[derive(Debug, Default)]
pub struct InputState {
    keys: RwLock<HashSet<KeyCode>>,
    buttons: RwLock<HashSet<GamepadButton>>,
    mouse_buttons: RwLock<HashSet<MouseButton>>,
    mouse_position: RwLock<Vec2>,
    mouse_delta: RwLock<Vec2>,
    mouse_scroll: RwLock<Vec2>,
    left_joystick: RwLock<Vec2>,
    right_joystick: RwLock<Vec2>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_key_down(&self, key: KeyCode) {
        self.keys.write().insert(key);
    }

    pub fn set_key_up(&self, key: KeyCode) {
        self.keys.write().remove(&key);
    }

    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys.read().contains(&key)
    }

    pub fn set_button_down(&self, button: GamepadButton) {
        self.buttons.write().insert(button);
    }

    pub fn set_button_up(&self, button: GamepadButton) {
        self.buttons.write().remove(&button);
    }

    pub fn is_button_down(&self, button: GamepadButton) -> bool {
        self.buttons.read().contains(&button)
    }

    pub fn set_mouse_button_down(&self, button: MouseButton) {
        self.mouse_buttons.write().insert(button);
    }

    pub fn set_mouse_button_up(&self, button: MouseButton) {
        self.mouse_buttons.write().remove(&button);
    }

    pub fn is_mouse_button_down(&self, button: MouseButton) -> bool {
        self.mouse_buttons.read().contains(&button)
    }

    pub fn set_mouse_position(&self, position: Vec2) {
        *self.mouse_position.write() = position;
    }

    pub fn mouse_position(&self) -> Vec2 {
        *self.mouse_position.read()
    }

    pub fn add_mouse_delta(&self, delta: Vec2) {
        *self.mouse_delta.write() += delta;
    }

    /// Returns the accumulated mouse movement and resets it.
    pub fn take_mouse_delta(&self) -> Vec2 {
        std::mem::take(&mut *self.mouse_delta.write())
    }

    pub fn add_mouse_scroll(&self, delta: Vec2) {
        *self.mouse_scroll.write() += delta;
    }

    /// Returns the accumulated scroll and resets it.
    pub fn take_mouse_scroll(&self) -> Vec2 {
        std::mem::take(&mut *self.mouse_scroll.write())
    }

    pub fn set_left_joystick(&self, position: Vec2) {
        *self.left_joystick.write() = position;
    }

    pub fn left_joystick(&self) -> Vec2 {
        *self.left_joystick.read()
    }

    pub fn set_right_joystick(&self, position: Vec2) {
        *self.right_joystick.write() = position;
    }

    pub fn right_joystick(&self) -> Vec2 {
        *self.right_joystick.read()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_state_tracks_keys() {
        let state = InputState::new();
        state.set_key_down(KeyCode::Character('W'));
        assert!(state.is_key_down(KeyCode::Character('W')));
        state.set_key_up(KeyCode::Character('W'));
        assert!(!state.is_key_down(KeyCode::Character('W')));
    }

    #[test]
    fn mouse_delta_accumulates_and_drains() {
        let state = InputState::new();
        state.add_mouse_delta(Vec2::new(1.0, 2.0));
        state.add_mouse_delta(Vec2::new(0.5, -1.0));
        assert_eq!(state.take_mouse_delta(), Vec2::new(1.5, 1.0));
        assert_eq!(state.take_mouse_delta(), Vec2::ZERO);
    }

    #[test]
    fn gamepad_buttons_and_sticks() {
        let state = InputState::new();
        state.set_button_down(GamepadButton::A);
        assert!(state.is_button_down(GamepadButton::A));
        state.set_left_joystick(Vec2::new(0.3, 0.9));
        assert_eq!(state.left_joystick(), Vec2::new(0.3, 0.9));
        state.set_button_up(GamepadButton::A);
        assert!(!state.is_button_down(GamepadButton::A));
    }
}
