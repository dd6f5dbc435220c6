mod assets;
mod frame_input;
mod ui_render;
mod window_config;

use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use app::SPRITE_DIR;
use app::app_loop::AppState;
use app::game_layout::config_with_sprite_sizes;
use app::seed::generate_runtime_seed;
use app::species_api::{DEFAULT_API_BASE, SpeciesClient};
use app::ui_text::{LOADING_TEXT, startup_failure_lines};
use game_core::{Session, SessionConfig};
use macroquad::prelude::{Conf, is_quit_requested, next_frame, prevent_quit};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::assets::{IconCache, SpriteSet};

const FRAME_BUDGET: Duration = Duration::from_nanos(1_000_000_000 / 60);

fn window_conf() -> Conf {
    window_config::build_window_conf()
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).compact().init();
}

fn start_session(config: SessionConfig, seed: u64) -> anyhow::Result<Session> {
    let mut client = SpeciesClient::new(DEFAULT_API_BASE).context("building the species client")?;
    Session::new(config, seed, &mut client).context("populating the field")
}

/// Caps the loop at 60 updates per second when the display refreshes faster.
struct FramePacer {
    last_frame: Instant,
}

impl FramePacer {
    fn new() -> Self {
        Self { last_frame: Instant::now() }
    }

    fn wait(&mut self) {
        if let Some(rest) = FRAME_BUDGET.checked_sub(self.last_frame.elapsed()) {
            thread::sleep(rest);
        }
        self.last_frame = Instant::now();
    }
}

async fn show_startup_failure(err: &anyhow::Error) {
    let lines = startup_failure_lines(err);
    while !is_quit_requested() {
        ui_render::draw_message_screen(&lines);
        next_frame().await;
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    init_tracing();
    prevent_quit();

    let sprites = SpriteSet::load(SPRITE_DIR).await;
    let config = config_with_sprite_sizes(SessionConfig::default(), sprites.sizes());

    // Creature lookups block; put the loading text on screen first.
    ui_render::draw_message_screen(&[LOADING_TEXT.to_owned()]);
    next_frame().await;

    let seed = generate_runtime_seed();
    info!(seed, "starting session");
    let mut session = match start_session(config, seed) {
        Ok(session) => session,
        Err(err) => {
            error!(seed, "startup failed: {err:#}");
            show_startup_failure(&err).await;
            return;
        }
    };

    let icons = IconCache::from_session(&session);
    let mut app_state = AppState::new();
    let mut pacer = FramePacer::new();

    loop {
        pacer.wait();
        let input = frame_input::capture_frame_input();
        app_state.tick(&mut session, &input);
        if app_state.is_closed() {
            break;
        }
        ui_render::draw_frame(&session, &app_state, &sprites, &icons);
        next_frame().await;
    }

    info!(
        frames = session.frame(),
        captured = session.avatar().captured().len(),
        announced = app_state.captures_announced,
        "session closed"
    );
}
