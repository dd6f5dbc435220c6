use std::{env, io};

use anyhow::{Context, Result};
use clap::Parser;
use game_core::fixtures::FixtureSource;
use game_core::{Pos, Session, SessionConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Print the field generated for a seed, optionally after walking the avatar somewhere.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    /// Target to walk toward, as `x,y`
    #[arg(short, long, value_parser = parse_pos)]
    walk_to: Option<Pos>,
    /// Frames to simulate after setting the target
    #[arg(short, long, default_value_t = 0)]
    frames: u32,
}

fn parse_pos(raw: &str) -> Result<Pos, String> {
    let (x, y) = raw.split_once(',').ok_or_else(|| format!("expected `x,y`, got `{raw}`"))?;
    let x = x.trim().parse::<f32>().map_err(|err| format!("bad x `{x}`: {err}"))?;
    let y = y.trim().parse::<f32>().map_err(|err| format!("bad y `{y}`: {err}"))?;
    Ok(Pos::new(x, y))
}

fn init_tracing() {
    let filter = env::var(EnvFilter::DEFAULT_ENV)
        .ok()
        .and_then(|raw| EnvFilter::try_new(raw).ok())
        .unwrap_or_else(|| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing();

    let mut source = FixtureSource::default();
    let mut session = Session::new(SessionConfig::default(), args.seed, &mut source)
        .with_context(|| format!("Failed to populate field for seed {}", args.seed))?;

    if let Some(target) = args.walk_to {
        session.set_target(target);
    }
    for _ in 0..args.frames {
        if let Some(event) = session.update().captured {
            info!(frame = session.frame(), creature = %event.creature, "captured");
        }
    }

    let json = serde_json::to_string_pretty(&session.report())
        .with_context(|| "Failed to serialize session report")?;
    println!("{json}");
    Ok(())
}
