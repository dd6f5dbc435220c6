//! Keyboard, pointer and window-close collection for one rendered frame.

use app::app_loop::FrameInput;
use game_core::Pos;
use macroquad::prelude::{
    KeyCode, MouseButton, is_key_pressed, is_mouse_button_pressed, is_quit_requested,
    mouse_position,
};

const WATCHED_KEYS: [KeyCode; 2] = [KeyCode::Enter, KeyCode::KpEnter];
const POINTER_BUTTONS: [MouseButton; 3] =
    [MouseButton::Left, MouseButton::Right, MouseButton::Middle];

pub fn capture_frame_input() -> FrameInput {
    let keys_pressed = WATCHED_KEYS.into_iter().filter(|key| is_key_pressed(*key)).collect();

    let pointer_pressed = POINTER_BUTTONS
        .into_iter()
        .any(is_mouse_button_pressed)
        .then(|| {
            let (x, y) = mouse_position();
            Pos::new(x, y)
        });

    FrameInput { keys_pressed, pointer_pressed, quit_requested: is_quit_requested() }
}
