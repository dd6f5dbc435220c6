//! Window configuration for the desktop app.

use app::APP_NAME;
use game_core::constants::{FIELD_HEIGHT, FIELD_WIDTH};
use macroquad::window::Conf;

pub fn build_window_conf() -> Conf {
    Conf {
        window_title: APP_NAME.to_owned(),
        window_width: FIELD_WIDTH as i32,
        window_height: FIELD_HEIGHT as i32,
        // The field is laid out in fixed logical pixels; keep one screen pixel per unit.
        high_dpi: false,
        window_resizable: false,
        ..Default::default()
    }
}
