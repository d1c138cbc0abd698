use glam::{Vec2, Vec3};

use crate::input::{InputState, KeyCode};

/// Tuning shared by every camera technique.
pub mod settings {
    pub const ROTATION_SPEED: f32 = 2.0;
    pub const TRANSLATION_SPEED: f32 = 3.0;
    pub const MOUSE_SCROLL_SENSITIVITY: f32 = 0.1;
    pub const MOUSE_PAN_SENSITIVITY: f32 = 0.008;
}

/// Positional and angular change produced by one input tick. Radians.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MovementDelta {
    pub position: Vec3,
    pub rotation: Vec3,
}

/// Horizontal heading for a given yaw.
pub fn forward_vector(yaw: f32) -> Vec3 {
    Vec3::new(yaw.sin(), 0.0, yaw.cos()).normalize()
}

pub fn right_vector(yaw: f32) -> Vec3 {
    let forward = forward_vector(yaw);
    Vec3::new(forward.z, forward.y, -forward.x)
}

/// Turns the current key and joystick state into a movement delta relative
/// to the given yaw. Keyboard and left stick share the same direction
/// vector; the stick wins when deflected and is clamped to unit magnitude.
pub fn update_input(delta_time: f32, input: &InputState, yaw: f32) -> MovementDelta {
    let rotation_amount = delta_time * settings::ROTATION_SPEED;
    let translation_amount = delta_time * settings::TRANSLATION_SPEED;
    let mut delta = MovementDelta::default();

    let mut direction = Vec3::ZERO;
    if input.is_key_down(KeyCode::Character('W')) {
        direction.z += 1.0;
    }
    if input.is_key_down(KeyCode::Character('S')) {
        direction.z -= 1.0;
    }
    if input.is_key_down(KeyCode::Character('A')) {
        direction.x -= 1.0;
    }
    if input.is_key_down(KeyCode::Character('D')) {
        direction.x += 1.0;
    }
    if direction != Vec3::ZERO {
        direction = direction.normalize();
    }

    let right_stick = input.right_joystick();
    delta.rotation.y += right_stick.x * rotation_amount;
    delta.rotation.x += right_stick.y * rotation_amount;

    let left_stick = input.left_joystick();
    if left_stick != Vec2::ZERO {
        direction.z = left_stick.y;
        direction.x = left_stick.x;
        let magnitude = (direction.x * direction.x + direction.z * direction.z).sqrt();
        if magnitude > 1.0 {
            direction /= magnitude;
        }
    }

    if direction != Vec3::ZERO {
        delta.position +=
            (direction.z * forward_vector(yaw) + direction.x * right_vector(yaw)) * translation_amount;
    }
    delta
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_input_produces_no_motion() {
        let input = InputState::new();
        assert_eq!(update_input(0.1, &input, 0.0), MovementDelta::default());
    }

    #[test]
    fn forward_key_moves_along_heading() {
        let input = InputState::new();
        input.set_key_down(KeyCode::Character('W'));

        let ahead = update_input(0.5, &input, 0.0);
        assert!((ahead.position - Vec3::new(0.0, 0.0, 1.5)).length() < 1e-5);

        let turned = update_input(0.5, &input, std::f32::consts::FRAC_PI_2);
        assert!((turned.position - Vec3::new(1.5, 0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn diagonal_keys_are_normalized() {
        let input = InputState::new();
        input.set_key_down(KeyCode::Character('W'));
        input.set_key_down(KeyCode::Character('D'));
        let delta = update_input(1.0, &input, 0.0);
        assert!((delta.position.length() - settings::TRANSLATION_SPEED).abs() < 1e-4);
    }

    #[test]
    fn left_stick_overrides_keys_and_clamps() {
        let input = InputState::new();
        input.set_key_down(KeyCode::Character('S'));
        input.set_left_joystick(Vec2::new(1.0, 1.0));
        let delta = update_input(1.0, &input, 0.0);
        // Deflection beyond unit magnitude scales back to one.
        assert!((delta.position.length() - settings::TRANSLATION_SPEED).abs() < 1e-4);
        assert!(delta.position.z > 0.0);
    }

    #[test]
    fn right_stick_turns_the_camera() {
        let input = InputState::new();
        input.set_right_joystick(Vec2::new(0.5, -0.25));
        let delta = update_input(1.0, &input, 0.0);
        assert!((delta.rotation.y - 1.0).abs() < 1e-6);
        assert!((delta.rotation.x + 0.5).abs() < 1e-6);
    }
}
