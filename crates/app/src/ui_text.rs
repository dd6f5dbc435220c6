//! Text shown on the announcement, loading and failure screens.

use game_core::CaptureEvent;

pub const CONTINUE_PROMPT: &str = "Press ENTER to continue.";
pub const LOADING_TEXT: &str = "Searching the tall grass...";

/// Upper-case the first letter of every alphabetic run and lower-case the rest,
/// so `mr-mime` becomes `Mr-Mime`.
pub fn title_case(raw: &str) -> String {
    let mut previous_is_letter = false;
    let mut titled = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if previous_is_letter {
            titled.extend(ch.to_lowercase());
        } else {
            titled.extend(ch.to_uppercase());
        }
        previous_is_letter = ch.is_alphabetic();
    }
    titled
}

pub fn capture_headline(name: &str) -> String {
    format!("You caught {}!", title_case(name))
}

pub fn capture_lines(event: &CaptureEvent) -> [String; 2] {
    [capture_headline(&event.name), CONTINUE_PROMPT.to_string()]
}

pub fn startup_failure_lines(error: &anyhow::Error) -> Vec<String> {
    let mut lines = vec!["The field could not be prepared.".to_string()];
    lines.extend(error.chain().map(|cause| cause.to_string()));
    lines.push("Close the window to exit.".to_string());
    lines
}
