pub mod app_loop;
pub mod game_layout;
pub mod seed;
pub mod species_api;
pub mod ui_text;

pub const APP_NAME: &str = "Gotta Katchem All";

/// Directory holding the field, avatar and capsule sprites, relative to the working directory.
pub const SPRITE_DIR: &str = "./sprites";
