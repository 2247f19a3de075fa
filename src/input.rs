//! Window input for one frame.
//!
//! minifb is polled rather than event driven, so each frame the window state
//! is collected into a [`FrameInput`] and handed to the app.

use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window};

use crate::camera::Movement;

/// Camera key bindings.
pub fn movement_for_key(key: Key) -> Option<Movement> {
    match key {
        Key::W => Some(Movement::Forward),
        Key::S => Some(Movement::Backward),
        Key::A => Some(Movement::StrafeLeft),
        Key::D => Some(Movement::StrafeRight),
        Key::E => Some(Movement::Ascend),
        Key::Q => Some(Movement::Descend),
        _ => None,
    }
}

#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    pub pressed: Vec<Key>,
    pub released: Vec<Key>,
    pub mouse_pos: Option<(f32, f32)>,
    pub left_down: bool,
    pub right_down: bool,
    /// Wheel movement since the last frame, positive is away from the user.
    pub scroll: Option<(f32, f32)>,
    pub window_size: (usize, usize),
}

impl FrameInput {
    pub fn poll(window: &Window) -> Self {
        Self {
            pressed: window.get_keys_pressed(KeyRepeat::No),
            released: window.get_keys_released(),
            mouse_pos: window.get_mouse_pos(MouseMode::Pass),
            left_down: window.get_mouse_down(MouseButton::Left),
            right_down: window.get_mouse_down(MouseButton::Right),
            scroll: window.get_scroll_wheel(),
            window_size: window.get_size(),
        }
    }
}

/// Turns absolute cursor positions into per-frame offsets while looking
/// around.
#[derive(Debug, Clone, Copy, Default)]
pub struct MouseLook {
    last: Option<(f32, f32)>,
}

impl MouseLook {
    /// Offset since the previous call. The first position after a
    /// [`MouseLook::reset`] only anchors the cursor.
    pub fn delta(&mut self, pos: (f32, f32)) -> (f32, f32) {
        let delta = match self.last {
            Some((x, y)) => (pos.0 - x, pos.1 - y),
            None => (0.0, 0.0),
        };
        self.last = Some(pos);
        delta
    }

    pub fn reset(&mut self) {
        self.last = None;
    }

    pub fn is_active(&self) -> bool {
        self.last.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wasd_qe_map_to_movement() {
        assert_eq!(movement_for_key(Key::W), Some(Movement::Forward));
        assert_eq!(movement_for_key(Key::S), Some(Movement::Backward));
        assert_eq!(movement_for_key(Key::A), Some(Movement::StrafeLeft));
        assert_eq!(movement_for_key(Key::D), Some(Movement::StrafeRight));
        assert_eq!(movement_for_key(Key::E), Some(Movement::Ascend));
        assert_eq!(movement_for_key(Key::Q), Some(Movement::Descend));
        assert_eq!(movement_for_key(Key::F), None);
    }

    #[test]
    fn mouse_look_reports_offsets_after_anchoring() {
        let mut look = MouseLook::default();
        assert_eq!(look.delta((100.0, 100.0)), (0.0, 0.0));
        assert!(look.is_active());
        assert_eq!(look.delta((110.0, 95.0)), (10.0, -5.0));
        look.reset();
        assert!(!look.is_active());
        assert_eq!(look.delta((0.0, 0.0)), (0.0, 0.0));
    }
}
