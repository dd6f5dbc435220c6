use game_core::{CreatureId, Pos, Session};
use macroquad::prelude::KeyCode;
use tracing::info;

use crate::ui_text::capture_lines;

const CONFIRM_KEYS: [KeyCode; 2] = [KeyCode::Enter, KeyCode::KpEnter];

/// Announcement shown after a capture until the player confirms it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaptureNotice {
    pub creature: CreatureId,
    pub headline: String,
    pub prompt: String,
}

#[derive(Debug, PartialEq, Eq, Default)]
pub enum AppMode {
    #[default]
    Playing,
    ShowingCapture(CaptureNotice),
    Closed,
}

/// Everything the player did during one frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameInput {
    pub keys_pressed: Vec<KeyCode>,
    pub pointer_pressed: Option<Pos>,
    pub quit_requested: bool,
}

#[derive(Default)]
pub struct AppState {
    pub mode: AppMode,
    /// Announcements raised so far.
    pub captures_announced: u32,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_closed(&self) -> bool {
        self.mode == AppMode::Closed
    }

    /// Process input and logic for a single frame. While an announcement is up the
    /// session is frozen and only confirmation or quit are observed.
    pub fn tick(&mut self, session: &mut Session, input: &FrameInput) {
        if input.quit_requested {
            if !self.is_closed() {
                info!(frame = session.frame(), "quit requested");
            }
            self.mode = AppMode::Closed;
            return;
        }

        match &self.mode {
            AppMode::Playing => {
                if let Some(target) = input.pointer_pressed {
                    session.set_target(target);
                }
                if let Some(event) = session.update().captured {
                    let [headline, prompt] = capture_lines(&event);
                    self.captures_announced += 1;
                    self.mode = AppMode::ShowingCapture(CaptureNotice {
                        creature: event.creature,
                        headline,
                        prompt,
                    });
                }
            }
            AppMode::ShowingCapture(_) => {
                if input.keys_pressed.iter().any(|key| CONFIRM_KEYS.contains(key)) {
                    self.mode = AppMode::Playing;
                }
            }
            AppMode::Closed => {
                // No inputs valid after close
            }
        }
    }
}
