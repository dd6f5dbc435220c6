//! Fixed dimensions and tuning values of the field.

pub const FIELD_WIDTH: f32 = 1100.0;
pub const FIELD_HEIGHT: f32 = 900.0;
pub const STATUS_BAR_HEIGHT: f32 = 100.0;

pub const FIELD_ITEM_COUNT: usize = 10;
pub const MAX_CAPSULES: usize = 6;
pub const MAX_CAPTURED: usize = 6;

pub const AVATAR_SPEED: f32 = 5.0;
pub const REVEAL_MARGIN: f32 = 20.0;

pub const CREATURE_ID_MIN: u16 = 1;
pub const CREATURE_ID_MAX: u16 = 151;
pub const ICON_HEIGHT: u32 = 80;

// Fallback sprite sizes used when no texture dimensions are supplied.
pub const DEFAULT_AVATAR_SIZE: (f32, f32) = (48.0, 64.0);
pub const DEFAULT_ITEM_SIZE: (f32, f32) = (64.0, 80.0);
pub const DEFAULT_CAPSULE_SIZE: (f32, f32) = (32.0, 32.0);
