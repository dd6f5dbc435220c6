//! Rendering for the field, the status bar and the full-screen message panels.

use crate::assets::{IconCache, SpriteSet};
use app::app_loop::{AppMode, AppState, CaptureNotice};
use app::game_layout::{STATUS_BAR_BORDER, status_bar_slots};
use game_core::constants::{FIELD_HEIGHT, FIELD_WIDTH};
use game_core::{Pos, Session, Size};
use macroquad::prelude::*;

const FIELD_GREEN: Color = Color { r: 0.133, g: 0.545, b: 0.133, a: 1.0 };
const NOTICE_TAN: Color = Color { r: 0.824, g: 0.706, b: 0.549, a: 1.0 };
const BAR_RED: Color = Color { r: 0.8, g: 0.0, b: 0.0, a: 1.0 };
const BAR_BORDER_YELLOW: Color = Color { r: 0.702, g: 0.631, b: 0.145, a: 1.0 };

const AVATAR_PLACEHOLDER: Color = Color { r: 0.2, g: 0.3, b: 0.8, a: 1.0 };
const ITEM_PLACEHOLDER: Color = Color { r: 0.05, g: 0.35, b: 0.1, a: 1.0 };
const CAPSULE_PLACEHOLDER: Color = Color { r: 0.9, g: 0.1, b: 0.1, a: 1.0 };

const HEADLINE_FONT_SIZE: f32 = 50.0;
const PROMPT_FONT_SIZE: f32 = 30.0;
const MESSAGE_LINE_STEP: f32 = 40.0;

pub fn draw_frame(session: &Session, app_state: &AppState, sprites: &SpriteSet, icons: &IconCache) {
    if let AppMode::ShowingCapture(notice) = &app_state.mode {
        draw_capture_notice(notice);
        return;
    }

    clear_background(FIELD_GREEN);
    draw_status_bar(session, icons);

    for item in session.items() {
        draw_sprite(sprites.item.as_ref(), item.pos, item.size, ITEM_PLACEHOLDER);
    }
    let avatar = session.avatar();
    draw_sprite(sprites.avatar.as_ref(), avatar.pos(), avatar.size(), AVATAR_PLACEHOLDER);

    let capsule_size = session.config().capsule_size;
    for placement in session.revealed() {
        draw_sprite(sprites.capsule.as_ref(), placement.pos, capsule_size, CAPSULE_PLACEHOLDER);
    }
}

fn draw_sprite(texture: Option<&Texture2D>, pos: Pos, size: Size, placeholder: Color) {
    match texture {
        Some(texture) => draw_texture(texture, pos.x, pos.y, WHITE),
        None => draw_rectangle(pos.x, pos.y, size.width, size.height, placeholder),
    }
}

fn draw_status_bar(session: &Session, icons: &IconCache) {
    let config = session.config();
    let top = config.status_bar_top();
    draw_rectangle(0.0, top, config.field.width, config.status_bar_height, BAR_RED);
    draw_rectangle(0.0, top, config.field.width, STATUS_BAR_BORDER, BAR_BORDER_YELLOW);

    for slot in status_bar_slots(session) {
        if let Some(texture) = icons.get(slot.creature) {
            draw_texture(texture, slot.pos.x, slot.pos.y, WHITE);
        }
    }
}

fn draw_capture_notice(notice: &CaptureNotice) {
    clear_background(NOTICE_TAN);
    let center_y = FIELD_HEIGHT / 2.0;
    draw_centered_text(&notice.headline, center_y - 20.0, HEADLINE_FONT_SIZE, BLACK);
    draw_centered_text(&notice.prompt, center_y + 20.0, PROMPT_FONT_SIZE, BLACK);
}

/// Plain full-screen text, used while loading and after a failed start.
pub fn draw_message_screen(lines: &[String]) {
    clear_background(NOTICE_TAN);
    let block_height = MESSAGE_LINE_STEP * lines.len().saturating_sub(1) as f32;
    let mut center_y = FIELD_HEIGHT / 2.0 - block_height / 2.0;
    for line in lines {
        draw_centered_text(line, center_y, PROMPT_FONT_SIZE, BLACK);
        center_y += MESSAGE_LINE_STEP;
    }
}

fn draw_centered_text(text: &str, center_y: f32, font_size: f32, color: Color) {
    let dims = measure_text(text, None, font_size as u16, 1.0);
    let origin = centered_baseline(
        Pos::new(FIELD_WIDTH / 2.0, center_y),
        Size::new(dims.width, dims.height),
        dims.offset_y,
    );
    draw_text(text, origin.x, origin.y, font_size, color);
}

/// Baseline origin that centers a text box of `size` on `center`. `offset_y` is
/// the distance from the box top to the baseline.
fn centered_baseline(center: Pos, size: Size, offset_y: f32) -> Pos {
    Pos::new(center.x - size.width / 2.0, center.y - size.height / 2.0 + offset_y)
}
