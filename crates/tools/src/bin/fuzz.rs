use std::{env, io};

use anyhow::{Result, bail};
use clap::Parser;
use game_core::fixtures::FixtureSource;
use game_core::{CreatureId, Pos, Session, SessionConfig};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 3000)]
    frames: u32,
    /// Frames between simulated pointer presses
    #[arg(short, long, default_value_t = 60)]
    press_every: u32,
}

/// `RUST_LOG`-style directives, falling back to `info` when absent or invalid.
fn log_filter(directives: Option<String>) -> EnvFilter {
    directives
        .and_then(|raw| EnvFilter::try_new(raw).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

fn init_tracing() {
    let filter = log_filter(env::var(EnvFilter::DEFAULT_ENV).ok());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .with_writer(io::stderr)
        .init();
}

fn choose<T: Copy>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    let p = rng.next_u64() as usize % slice.len();
    slice[p]
}

fn random_press(rng: &mut ChaCha8Rng, config: &SessionConfig) -> Pos {
    let x = (rng.next_u32() % config.field.width as u32) as f32;
    let y = (rng.next_u32() % config.field.height as u32) as f32;
    Pos::new(x, y)
}

/// Press either somewhere random or straight onto a capsule already showing.
fn next_press(rng: &mut ChaCha8Rng, session: &Session) -> Pos {
    let config = session.config();
    let placements: Vec<Pos> = session.revealed().iter().map(|placement| placement.pos).collect();
    if !placements.is_empty() && choose(rng, &[true, false, false]) {
        return choose(rng, &placements);
    }
    random_press(rng, config)
}

/// Drive a fixture-backed session and return it with the captures in order.
fn run(seed: u64, frames: u32, press_every: u32) -> Result<(Session, Vec<CreatureId>)> {
    let mut source = FixtureSource::default();
    let mut session = Session::new(SessionConfig::default(), seed, &mut source)?;
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut captured = Vec::new();
    let press_every = press_every.max(1);

    for frame in 0..frames {
        if frame % press_every == 0 {
            let press = next_press(&mut rng, &session);
            session.set_target(press);
        }

        let report = session.update();
        if let Some(event) = report.captured {
            if captured.contains(&event.creature) {
                bail!("creature {} captured twice by frame {}", event.creature, session.frame());
            }
            let frame = session.frame();
            info!(frame, creature = %event.creature, name = %event.name, "captured");
            captured.push(event.creature);
        }

        if let Err(reason) = session.check_invariants() {
            bail!("invariant failed at frame {}: {reason}", session.frame());
        }
    }

    Ok((session, captured))
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing();

    info!(seed = args.seed, frames = args.frames, "starting fuzz harness");
    let (session, captured) = run(args.seed, args.frames, args.press_every)?;

    info!(captures = captured.len(), "fuzzing completed successfully");
    println!("{}", serde_json::to_string_pretty(&session.report())?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{log_filter, run};

    #[test]
    fn log_filter_defaults_to_info() {
        assert_eq!(log_filter(None).to_string(), "info");
        assert_eq!(log_filter(Some("debug".to_string())).to_string(), "debug");
    }

    #[test]
    fn seeded_run_keeps_invariants_and_captures_each_creature_once() {
        for seed in [1, 42, 9_001] {
            let (session, captured) = run(seed, 3_000, 30).expect("fuzz run");
            assert_eq!(session.frame(), 3_000);
            assert!(captured.len() <= session.records().count());
        }
    }
}
