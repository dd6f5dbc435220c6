use crate::constants::*;
use crate::types::Size;

/// Tunables for one session. `Default` matches the shipped game.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SessionConfig {
    pub field: Size,
    pub status_bar_height: f32,
    pub item_count: usize,
    pub max_capsules: usize,
    pub max_captured: usize,
    pub avatar_speed: f32,
    pub reveal_margin: f32,
    pub avatar_size: Size,
    pub item_size: Size,
    pub capsule_size: Size,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            field: Size::new(FIELD_WIDTH, FIELD_HEIGHT),
            status_bar_height: STATUS_BAR_HEIGHT,
            item_count: FIELD_ITEM_COUNT,
            max_capsules: MAX_CAPSULES,
            max_captured: MAX_CAPTURED,
            avatar_speed: AVATAR_SPEED,
            reveal_margin: REVEAL_MARGIN,
            avatar_size: Size::new(DEFAULT_AVATAR_SIZE.0, DEFAULT_AVATAR_SIZE.1),
            item_size: Size::new(DEFAULT_ITEM_SIZE.0, DEFAULT_ITEM_SIZE.1),
            capsule_size: Size::new(DEFAULT_CAPSULE_SIZE.0, DEFAULT_CAPSULE_SIZE.1),
        }
    }
}

impl SessionConfig {
    /// Y coordinate where the status bar begins.
    pub fn status_bar_top(&self) -> f32 {
        self.field.height - self.status_bar_height
    }
}
