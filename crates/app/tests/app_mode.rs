use app::app_loop::{AppMode, AppState, FrameInput};
use app::game_layout::status_bar_slots;
use game_core::fixtures::FixtureSource;
use game_core::{CreatureId, Pos, Session, SessionConfig};
use macroquad::prelude::KeyCode;

fn press_at(pos: Pos) -> FrameInput {
    FrameInput { pointer_pressed: Some(pos), ..FrameInput::default() }
}

fn keys(pressed: &[KeyCode]) -> FrameInput {
    FrameInput { keys_pressed: pressed.to_vec(), ..FrameInput::default() }
}

fn single_capsule_session(id: u16) -> (Session, Pos) {
    let config = SessionConfig::default();
    let session = Session::with_layout(
        config,
        [(Pos::new(400.0, 300.0), Some(FixtureSource::record_for(CreatureId(id))))],
    );
    let placement = session
        .items()
        .next()
        .map(|item| item.capsule_placement(config.capsule_size, config.field.width))
        .expect("layout has one item");
    (session, placement)
}

#[test]
fn test_walking_onto_capsule_announces_once_and_fills_status_bar() {
    let (mut session, placement) = single_capsule_session(25);
    let mut app = AppState::new();

    app.tick(&mut session, &press_at(placement));
    let mut frames = 1;
    while app.mode == AppMode::Playing && frames < 600 {
        app.tick(&mut session, &FrameInput::default());
        frames += 1;
    }

    let AppMode::ShowingCapture(notice) = &app.mode else {
        panic!("expected a capture announcement, got {:?}", app.mode);
    };
    assert_eq!(notice.creature, CreatureId(25));
    assert_eq!(notice.headline, "You caught Specimen-25!");
    assert_eq!(notice.prompt, "Press ENTER to continue.");

    app.tick(&mut session, &keys(&[KeyCode::Enter]));
    assert_eq!(app.mode, AppMode::Playing);

    for _ in 0..120 {
        app.tick(&mut session, &FrameInput::default());
    }
    assert_eq!(app.captures_announced, 1);
    assert_eq!(app.mode, AppMode::Playing);

    let slots = status_bar_slots(&session);
    assert_eq!(slots.len(), 1);
    assert_eq!(slots[0].creature, CreatureId(25));
}

#[test]
fn test_announcement_freezes_session_and_ignores_pointer() {
    let (mut session, placement) = single_capsule_session(7);
    let mut app = AppState::new();

    app.tick(&mut session, &press_at(placement));
    while app.mode == AppMode::Playing {
        app.tick(&mut session, &FrameInput::default());
        assert!(session.frame() < 600, "capture never happened");
    }

    let frozen_frame = session.frame();
    let frozen_target = session.avatar().target();
    for key in [KeyCode::Space, KeyCode::Escape, KeyCode::A] {
        app.tick(&mut session, &keys(&[key]));
    }
    app.tick(&mut session, &press_at(Pos::new(5.0, 5.0)));

    assert!(matches!(app.mode, AppMode::ShowingCapture(_)));
    assert_eq!(session.frame(), frozen_frame);
    assert_eq!(session.avatar().target(), frozen_target);
}

#[test]
fn test_keypad_enter_also_confirms() {
    let (mut session, placement) = single_capsule_session(3);
    let mut app = AppState::new();

    app.tick(&mut session, &press_at(placement));
    while app.mode == AppMode::Playing {
        app.tick(&mut session, &FrameInput::default());
        assert!(session.frame() < 600, "capture never happened");
    }

    app.tick(&mut session, &keys(&[KeyCode::KpEnter]));
    assert_eq!(app.mode, AppMode::Playing);
}

#[test]
fn test_quit_during_announcement_closes() {
    let (mut session, placement) = single_capsule_session(9);
    let mut app = AppState::new();

    app.tick(&mut session, &press_at(placement));
    while app.mode == AppMode::Playing {
        app.tick(&mut session, &FrameInput::default());
        assert!(session.frame() < 600, "capture never happened");
    }

    app.tick(&mut session, &FrameInput { quit_requested: true, ..FrameInput::default() });
    assert_eq!(app.mode, AppMode::Closed);
}

#[test]
fn test_pointer_press_sets_target_before_update() {
    let mut session = Session::with_layout(SessionConfig::default(), []);
    let mut app = AppState::new();

    app.tick(&mut session, &press_at(Pos::new(100.0, 0.0)));
    assert_eq!(session.avatar().target(), Pos::new(100.0, 0.0));
    assert_eq!(session.avatar().pos(), Pos::new(5.0, 0.0));
}
